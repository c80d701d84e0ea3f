//! Milestone timeline.
//!
//! The content the guard protects: a static, chronologically ordered list
//! of milestone records. A built-in set ships with the binary; a JSON file
//! can replace it.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{KeepsakeError, Result};

/// Kind of media attached to a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Text,
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Short label for table output.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Text => "text",
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

/// A single remembered moment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Calendar date of the moment
    pub date: NaiveDate,

    /// Short title (e.g., "First meeting")
    pub title: String,

    /// Where it happened
    pub location: String,

    /// The memory itself
    pub content: String,

    /// Attached media kind
    #[serde(default = "default_kind")]
    pub kind: MediaKind,

    /// Mood emoji
    #[serde(default)]
    pub mood: String,

    /// Weather emoji
    #[serde(default)]
    pub weather: String,
}

fn default_kind() -> MediaKind {
    MediaKind::Text
}

/// An ordered collection of milestones.
#[derive(Debug, Clone)]
pub struct Timeline {
    milestones: Vec<Milestone>,
}

impl Timeline {
    /// Build a timeline from arbitrary milestones, sorting by date
    /// ascending (stable, so same-day entries keep their given order).
    pub fn new(mut milestones: Vec<Milestone>) -> Self {
        milestones.sort_by_key(|m| m.date);
        Self { milestones }
    }

    /// The built-in milestone set.
    pub fn builtin() -> Self {
        Self::new(builtin_milestones())
    }

    /// Load a timeline from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns `KeepsakeError::Store` if the file cannot be read, or
    /// `KeepsakeError::Validation` if it is not a JSON array of milestones.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            KeepsakeError::Store(format!("Failed to read timeline {}: {}", path.display(), e))
        })?;
        let milestones: Vec<Milestone> = serde_json::from_str(&contents)?;
        Ok(Self::new(milestones))
    }

    /// Milestones in date-ascending order.
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Number of milestones.
    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    /// Whether the timeline is empty.
    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // Inputs below are fixed and valid.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn builtin_milestones() -> Vec<Milestone> {
    vec![
        Milestone {
            date: date(2023, 2, 14),
            title: "First meeting".to_string(),
            location: "Coffee shop".to_string(),
            content: "A sunny afternoon in that little coffee shop. You ordered a latte, \
                      I ordered an americano. From that moment I knew you would be the most \
                      important person in my life."
                .to_string(),
            kind: MediaKind::Text,
            mood: "💕".to_string(),
            weather: "☀️".to_string(),
        },
        Milestone {
            date: date(2023, 3, 20),
            title: "First date".to_string(),
            location: "The park".to_string(),
            content: "We walked through the park watching cherry blossoms fall. You said it \
                      was the most beautiful spring you had seen; I thought the most beautiful \
                      thing was your smile."
                .to_string(),
            kind: MediaKind::Image,
            mood: "🌸".to_string(),
            weather: "🌤️".to_string(),
        },
        Milestone {
            date: date(2023, 5, 1),
            title: "First trip".to_string(),
            location: "The seaside".to_string(),
            content: "Our first trip together, to that beautiful seaside town. Sea breeze, \
                      sunset. You said it was your most memorable May Day holiday."
                .to_string(),
            kind: MediaKind::Video,
            mood: "🌊".to_string(),
            weather: "🌅".to_string(),
        },
        Milestone {
            date: date(2023, 7, 15),
            title: "Birthday surprise".to_string(),
            location: "Home".to_string(),
            content: "On your birthday I prepared a little surprise. Nothing expensive, but \
                      seeing you happy made it all worth it."
                .to_string(),
            kind: MediaKind::Audio,
            mood: "🎂".to_string(),
            weather: "🌟".to_string(),
        },
        Milestone {
            date: date(2023, 9, 10),
            title: "Studying together".to_string(),
            location: "The library".to_string(),
            content: "Studying side by side in the library, sneaking glances at how focused \
                      you looked. Those quiet afternoons are some of our most treasured \
                      memories."
                .to_string(),
            kind: MediaKind::Text,
            mood: "📚".to_string(),
            weather: "🍂".to_string(),
        },
        Milestone {
            date: date(2023, 12, 25),
            title: "First Christmas".to_string(),
            location: "Home".to_string(),
            content: "Our first Christmas together: decorating the tree, exchanging gifts, \
                      watching a movie. That warmth made me feel that home is wherever you \
                      are."
                .to_string(),
            kind: MediaKind::Image,
            mood: "🎄".to_string(),
            weather: "❄️".to_string(),
        },
    ]
}
