use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// CLI configuration.
///
/// The `[access]` section carries the reference identity and secret digest.
/// Anyone who can read this file can read the digest; this is demo-grade
/// gating for a personal vault, not real authentication. Move the check
/// behind a server if genuine access control is ever needed.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeepsakeConfig {
    pub access: AccessSection,
    #[serde(default)]
    pub lockout: LockoutSection,
    #[serde(default)]
    pub session: SessionSection,
    pub store: StoreSection,
    #[serde(default)]
    pub timeline: TimelineSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessSection {
    /// Reference identity.
    pub identity: String,
    /// Lowercase-hex SHA-256 digest of the reference secret.
    pub secret_digest: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LockoutSection {
    pub max_attempts: u32,
    pub lock_seconds: u32,
}

impl Default for LockoutSection {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lock_seconds: 5 * 60,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSection {
    pub ttl_hours: i64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self { ttl_hours: 24 }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    /// Path of the JSON state file (attempt counter, lock, session).
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TimelineSection {
    /// Optional JSON file replacing the built-in milestones.
    pub path: Option<String>,
}

impl KeepsakeConfig {
    pub fn new(
        identity: String,
        secret_digest: String,
        store_path: PathBuf,
        timeline_path: Option<PathBuf>,
    ) -> Self {
        Self {
            access: AccessSection {
                identity,
                secret_digest,
            },
            lockout: LockoutSection::default(),
            session: SessionSection::default(),
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            timeline: TimelineSection {
                path: timeline_path.map(|path| path.to_string_lossy().to_string()),
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("state.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<KeepsakeConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &KeepsakeConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("keepsake"));
        }
    }
    Ok(home_dir()?.join(".config").join("keepsake"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("keepsake"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("keepsake"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
