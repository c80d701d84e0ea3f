//! Keepsake CLI - a password-gated personal memories vault
//!
//! This is the command-line interface for Keepsake. Logging in runs the
//! credential guard (three strikes, five-minute lockout); a successful
//! login opens a 24-hour session that gates the timeline and surprise
//! commands.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use chrono::{Local, NaiveDate};
use dialoguer::{Input, Password};
use zeroize::Zeroizing;

use keepsake_core::guard::sha256_hex;
use keepsake_core::store::JsonFileStore;
use keepsake_core::surprise::{self, Effect};
use keepsake_core::timeline::Timeline;
use keepsake_core::{
    CredentialGuard, GuardPolicy, Outcome, ReferenceCredential, Session, VERSION,
};

mod config;
mod constants;
mod output;

use config::{default_config_path, default_store_path, read_config, write_config, KeepsakeConfig};
use constants::exit_codes;
use output::{
    format_mmss, milestones_json, parse_output_format, print_lock_line, print_milestones_plain,
    print_milestones_table, print_session_line, OutputFormat,
};

/// Keepsake - a password-gated personal memories vault
#[derive(Parser)]
#[command(name = "keepsake")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "KEEPSAKE_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the config file with the reference credential
    Init {
        /// Reference identity
        #[arg(long)]
        identity: Option<String>,

        /// Lowercase-hex SHA-256 digest of the secret (skips the prompt)
        #[arg(long, value_name = "HEX")]
        secret_digest: Option<String>,

        /// Path of the JSON state file
        #[arg(long, value_name = "PATH")]
        store: Option<String>,

        /// Path of a JSON timeline file replacing the built-in milestones
        #[arg(long, value_name = "PATH")]
        timeline: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Authenticate and start a session
    Login,

    /// Show lock and session state
    Status,

    /// End the session
    Logout,

    /// Show the milestone timeline (requires a session)
    Timeline {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Output format (table, plain)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,
    },

    /// Show the surprise message for a date (requires a session)
    Surprise {
        /// Date to query (YYYY-MM-DD, defaults to today)
        #[arg(value_name = "DATE")]
        date: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Init {
            identity,
            secret_digest,
            store,
            timeline,
            force,
        }) => {
            if config_path.exists() && !force {
                eprintln!(
                    "Config already exists: {} (use --force to overwrite)",
                    config_path.display()
                );
                return Ok(exit_code(exit_codes::INVALID_INPUT));
            }

            let identity = match identity {
                Some(value) => value,
                None => Input::new().with_prompt("Identity").interact_text()?,
            };
            let digest = match secret_digest {
                Some(value) => normalize_digest(&value)?,
                None => {
                    let secret = Zeroizing::new(
                        Password::new()
                            .with_prompt("Secret")
                            .with_confirmation("Confirm secret", "Secrets do not match")
                            .interact()?,
                    );
                    sha256_hex(secret.as_bytes())
                }
            };

            let store_path = match store {
                Some(value) => PathBuf::from(value),
                None => default_store_path()?,
            };
            let config = KeepsakeConfig::new(identity, digest, store_path, timeline.map(Into::into));
            write_config(&config_path, &config)?;

            if !cli.quiet {
                println!("Wrote config to {}", config_path.display());
                println!("Note: the digest in this file gates a personal vault; it is not real authentication.");
            }
        }
        Some(Commands::Login) => {
            let config = read_config(&config_path)?;
            let mut guard = open_guard(&config)?;

            let identity = prompt_identity()?;
            let secret = prompt_secret()?;

            match guard.attempt(&identity, &secret)? {
                Outcome::Success => {
                    let mut session =
                        Session::new(guard.into_store(), config.session.ttl_hours);
                    session.start()?;
                    if !cli.quiet {
                        println!("Welcome back. Session open for {} hours.", config.session.ttl_hours);
                    }
                }
                Outcome::InvalidCredentials { attempts_remaining } => {
                    eprintln!(
                        "Invalid identity or secret. {} attempt(s) remaining.",
                        attempts_remaining
                    );
                    return Ok(exit_code(exit_codes::AUTH_FAILED));
                }
                Outcome::LockedOut { attempts_used } => {
                    eprintln!(
                        "Too many failed attempts ({}). Locked for {}.",
                        attempts_used,
                        format_mmss(lock_seconds(&config))
                    );
                    return Ok(exit_code(exit_codes::LOCKED_OUT));
                }
                Outcome::Locked { remaining_seconds } => {
                    eprintln!(
                        "Attempts are locked. Try again in {}.",
                        format_mmss(remaining_seconds)
                    );
                    return Ok(exit_code(exit_codes::LOCKED_OUT));
                }
            }
        }
        Some(Commands::Status) => {
            let config = read_config(&config_path)?;
            let mut guard = open_guard(&config)?;
            let status = guard.check_lock_status()?;
            let attempts = guard.failed_attempts()?;

            let mut session = Session::new(guard.into_store(), config.session.ttl_hours);
            let active = session.is_active()?;

            print_lock_line(&status);
            print_session_line(active);
            if !cli.quiet && attempts > 0 {
                println!(
                    "Failed attempts: {}/{}",
                    attempts, config.lockout.max_attempts
                );
            }
        }
        Some(Commands::Logout) => {
            let config = read_config(&config_path)?;
            let store = JsonFileStore::open(config.store.path.as_ref())?;
            // Ends the session only; attempt history is left alone.
            let mut session = Session::new(store, config.session.ttl_hours);
            session.end()?;
            if !cli.quiet {
                println!("Session ended.");
            }
        }
        Some(Commands::Timeline { json, format }) => {
            let config = read_config(&config_path)?;
            if !require_session(&config)? {
                return Ok(exit_code(exit_codes::NO_SESSION));
            }

            let timeline = match &config.timeline.path {
                Some(path) => Timeline::load(path.as_ref())?,
                None => Timeline::builtin(),
            };

            let format = parse_output_format(format.as_deref())?;
            if json {
                if format.is_some() {
                    return Err(anyhow::anyhow!("--format cannot be used with --json"));
                }
                println!("{}", milestones_json(timeline.milestones())?);
            } else {
                match format.unwrap_or(OutputFormat::Table) {
                    OutputFormat::Table => print_milestones_table(timeline.milestones()),
                    OutputFormat::Plain => print_milestones_plain(timeline.milestones()),
                }
            }
        }
        Some(Commands::Surprise { date }) => {
            let config = read_config(&config_path)?;
            if !require_session(&config)? {
                return Ok(exit_code(exit_codes::NO_SESSION));
            }

            let date = match date {
                Some(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("Invalid date (expected YYYY-MM-DD): {}", e))?,
                None => Local::now().date_naive(),
            };

            let message = surprise::for_date(date);
            if !cli.quiet {
                let effect = match message.effect {
                    Effect::Hearts => "💕💕💕",
                    Effect::Fireworks => "🎆🎆🎆",
                };
                println!("{}", effect);
            }
            println!("{}", message.text);
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "keepsake", &mut std::io::stdout());
        }
        None => {
            println!("Keepsake v{}", VERSION);
            println!("\nRun `keepsake --help` for usage information.");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}

fn resolve_config_path(flag: Option<&str>) -> anyhow::Result<PathBuf> {
    match flag {
        Some(value) => Ok(PathBuf::from(value)),
        None => default_config_path(),
    }
}

fn open_guard(
    config: &KeepsakeConfig,
) -> anyhow::Result<CredentialGuard<JsonFileStore>> {
    let reference =
        ReferenceCredential::new(&config.access.identity, &config.access.secret_digest)?;
    let policy = GuardPolicy {
        max_attempts: config.lockout.max_attempts,
        lock_duration_ms: i64::from(config.lockout.lock_seconds) * 1000,
    };
    let store = JsonFileStore::open(config.store.path.as_ref())?;
    Ok(CredentialGuard::new(store, reference, policy))
}

fn require_session(config: &KeepsakeConfig) -> anyhow::Result<bool> {
    let store = JsonFileStore::open(config.store.path.as_ref())?;
    let mut session = Session::new(store, config.session.ttl_hours);
    let active = session.is_active()?;
    if !active {
        eprintln!("No active session. Run `keepsake login` first.");
    }
    Ok(active)
}

fn lock_seconds(config: &KeepsakeConfig) -> u64 {
    u64::from(config.lockout.lock_seconds)
}

fn prompt_identity() -> anyhow::Result<String> {
    if let Ok(value) = std::env::var("KEEPSAKE_USERNAME") {
        if !value.trim().is_empty() {
            return Ok(value);
        }
    }
    Input::new()
        .with_prompt("Identity")
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read identity: {}", e))
}

fn prompt_secret() -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var("KEEPSAKE_PASSWORD") {
        if !value.is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }
    Password::new()
        .with_prompt("Secret")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))
}

fn normalize_digest(value: &str) -> anyhow::Result<String> {
    let digest = value.trim().to_ascii_lowercase();
    if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow::anyhow!(
            "--secret-digest must be 64 hex characters"
        ));
    }
    Ok(digest)
}
