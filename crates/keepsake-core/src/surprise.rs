//! Date-keyed surprise messages.
//!
//! A handful of month-day dates carry a special message and a visual
//! effect hint; every other date gets a fallback. There is no "nothing
//! happened" answer.

use chrono::{Datelike, NaiveDate};

/// Visual effect the presentation layer should play with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Hearts,
    Fireworks,
}

/// Message produced for a queried date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurpriseMessage {
    /// The message text.
    pub text: String,
    /// Effect hint.
    pub effect: Effect,
    /// Whether the date is one of the configured special dates.
    pub special: bool,
}

/// Special dates as (month, day, effect, message).
const SPECIAL_DATES: &[(u32, u32, Effect, &str)] = &[
    (
        2,
        14,
        Effect::Hearts,
        "💕 Happy Valentine's Day! May our love stay as beautiful and lasting as a sky full of hearts!",
    ),
    (
        5,
        20,
        Effect::Fireworks,
        "🎆 I love you! 520 — let the fireworks bloom for us!",
    ),
    (
        12,
        25,
        Effect::Hearts,
        "🎄 Merry Christmas! On this special day, you are the best gift of all!",
    ),
    (
        1,
        1,
        Effect::Fireworks,
        "🎊 Happy New Year! May the new year make our love even sweeter!",
    ),
    (
        8,
        9,
        Effect::Hearts,
        "💖 Today is the day we first met. Thank you, fate, for bringing us together!",
    ),
];

const FALLBACK: &str = "This is a special day too, because you are here 💕";

/// Look up the surprise message for a date.
pub fn for_date(date: NaiveDate) -> SurpriseMessage {
    let (month, day) = (date.month(), date.day());
    for (m, d, effect, text) in SPECIAL_DATES {
        if *m == month && *d == day {
            return SurpriseMessage {
                text: (*text).to_string(),
                effect: *effect,
                special: true,
            };
        }
    }
    SurpriseMessage {
        text: FALLBACK.to_string(),
        effect: Effect::Hearts,
        special: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_valentines_day() {
        let message = for_date(date(2026, 2, 14));
        assert!(message.special);
        assert_eq!(message.effect, Effect::Hearts);
        assert!(message.text.contains("Valentine"));
    }

    #[test]
    fn test_520_uses_fireworks() {
        let message = for_date(date(2026, 5, 20));
        assert!(message.special);
        assert_eq!(message.effect, Effect::Fireworks);
    }

    #[test]
    fn test_year_does_not_matter() {
        assert_eq!(for_date(date(1999, 1, 1)), for_date(date(2030, 1, 1)));
    }

    #[test]
    fn test_ordinary_date_gets_fallback() {
        let message = for_date(date(2026, 3, 3));
        assert!(!message.special);
        assert_eq!(message.effect, Effect::Hearts);
        assert_eq!(message.text, FALLBACK);
    }
}
