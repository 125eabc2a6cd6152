//! Schedule categories.
//!
//! Every slot in a weekly plan carries a category. The category drives how
//! the exported calendar event is displayed: a bracketed prefix in the event
//! summary and a Google Calendar color id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The category assigned to a schedule slot.
///
/// The known set is closed, but values read from stored plans that do not
/// match any known category are preserved verbatim in [`Category::Other`] so
/// they survive serialization round-trips instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Primary focus block (`farol1`).
    Farol1,
    /// Secondary focus block (`farol2`).
    Farol2,
    /// Tertiary focus block (`farol3`).
    Farol3,
    /// Flexible "wildcard" time (`tempo-coringa`).
    TempoCoringa,
    /// Off-plan detour (`desvio-de-rota`).
    DesvioDeRota,
    /// Any category string not in the known set.
    Other(String),
}

impl Category {
    /// Returns the canonical wire string for this category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Farol1 => "farol1",
            Self::Farol2 => "farol2",
            Self::Farol3 => "farol3",
            Self::TempoCoringa => "tempo-coringa",
            Self::DesvioDeRota => "desvio-de-rota",
            Self::Other(s) => s,
        }
    }

    /// Returns the bracketed-summary prefix for this category.
    ///
    /// Unrecognized categories fall back to the generic `PLAN` prefix.
    pub fn summary_prefix(&self) -> &str {
        match self {
            Self::Farol1 => "FAROL 1",
            Self::Farol2 => "FAROL 2",
            Self::Farol3 => "FAROL 3",
            Self::TempoCoringa => "CORINGA",
            Self::DesvioDeRota => "DESVIO",
            Self::Other(_) => "PLAN",
        }
    }

    /// Returns the Google Calendar color id for this category.
    ///
    /// Google Calendar color ids are the strings "1" through "11".
    /// Unrecognized categories fall back to `"1"` (lavender).
    pub fn color_id(&self) -> &'static str {
        match self {
            Self::Farol1 => "3",        // grape
            Self::Farol2 => "5",        // banana
            Self::Farol3 => "10",       // basil
            Self::TempoCoringa => "7",  // peacock
            Self::DesvioDeRota => "9",  // blueberry
            Self::Other(_) => "1",      // lavender
        }
    }

    /// Returns `true` if this is one of the known categories.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "farol1" => Self::Farol1,
            "farol2" => Self::Farol2,
            "farol3" => Self::Farol3,
            "tempo-coringa" => Self::TempoCoringa,
            "desvio-de-rota" => Self::DesvioDeRota,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_round_trip() {
        for name in [
            "farol1",
            "farol2",
            "farol3",
            "tempo-coringa",
            "desvio-de-rota",
        ] {
            let category = Category::from(name);
            assert!(category.is_known(), "{name} should be known");
            assert_eq!(category.as_str(), name);
        }
    }

    #[test]
    fn unknown_category_is_preserved() {
        let category = Category::from("deep-work");
        assert!(!category.is_known());
        assert_eq!(category.as_str(), "deep-work");
    }

    #[test]
    fn summary_prefix_is_total() {
        assert_eq!(Category::Farol1.summary_prefix(), "FAROL 1");
        assert_eq!(Category::Farol2.summary_prefix(), "FAROL 2");
        assert_eq!(Category::Farol3.summary_prefix(), "FAROL 3");
        assert_eq!(Category::TempoCoringa.summary_prefix(), "CORINGA");
        assert_eq!(Category::DesvioDeRota.summary_prefix(), "DESVIO");
        assert_eq!(Category::from("whatever").summary_prefix(), "PLAN");
    }

    #[test]
    fn color_id_is_total() {
        assert_eq!(Category::Farol1.color_id(), "3");
        assert_eq!(Category::Farol2.color_id(), "5");
        assert_eq!(Category::Farol3.color_id(), "10");
        assert_eq!(Category::TempoCoringa.color_id(), "7");
        assert_eq!(Category::DesvioDeRota.color_id(), "9");
        assert_eq!(Category::from("whatever").color_id(), "1");
    }

    #[test]
    fn serde_uses_bare_strings() {
        let json = serde_json::to_string(&Category::TempoCoringa).unwrap();
        assert_eq!(json, r#""tempo-coringa""#);

        let parsed: Category = serde_json::from_str(r#""farol1""#).unwrap();
        assert_eq!(parsed, Category::Farol1);

        let parsed: Category = serde_json::from_str(r#""mystery""#).unwrap();
        assert_eq!(parsed, Category::Other("mystery".to_string()));
    }
}
