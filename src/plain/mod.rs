//! Structure recovery for unstructured plain text.
//!
//! - `heading`: heading-like lines
//! - `paragraph`: paragraph boundaries from blank lines, bullets, sentences
//!   and length

mod heading;
mod paragraph;

pub use heading::{detect_headings, Heading};
pub use paragraph::{normalize_newlines, paragraphize};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::limits;

/// How plain text is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// Every line is its own paragraph.
    #[default]
    Tweet,
    /// Long-form reflow with heading detection.
    Article,
}

impl StyleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tweet => "tweet",
            Self::Article => "article",
        }
    }
}

impl FromStr for StyleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tweet" => Ok(Self::Tweet),
            "article" => Ok(Self::Article),
            _ => Err(Error::UnknownMode(s.to_owned())),
        }
    }
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character-count thresholds of the plain-text heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflowThresholds {
    /// Heading lines are longer than this.
    pub heading_min_len: usize,
    /// Heading lines are shorter than this.
    pub heading_max_len: usize,
    /// Article lines accumulate into a paragraph up to this length.
    pub line_flush: usize,
    /// Unbroken article input below this length stays whole.
    pub short_input: usize,
    /// Sentences accumulate into a paragraph up to this length.
    pub sentence_flush: usize,
}

impl Default for ReflowThresholds {
    fn default() -> Self {
        Self {
            heading_min_len: limits::HEADING_MIN_LEN,
            heading_max_len: limits::HEADING_MAX_LEN,
            line_flush: limits::LINE_FLUSH_LEN,
            short_input: limits::SHORT_INPUT_LEN,
            sentence_flush: limits::SENTENCE_FLUSH_LEN,
        }
    }
}

/// Strategy for recovering structure from plain text.
pub trait TextHeuristics: Send + Sync {
    /// Heading lines of `text`, indexed into its trimmed non-empty lines.
    fn headings(&self, text: &str) -> Vec<Heading>;

    /// Ordered, non-empty paragraphs of `text`.
    fn paragraphs(&self, text: &str, mode: StyleMode) -> Vec<String>;
}

/// The built-in heuristics with tunable thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultHeuristics {
    pub thresholds: ReflowThresholds,
}

impl DefaultHeuristics {
    pub fn new(thresholds: ReflowThresholds) -> Self {
        Self { thresholds }
    }
}

impl TextHeuristics for DefaultHeuristics {
    fn headings(&self, text: &str) -> Vec<Heading> {
        detect_headings(text, &self.thresholds)
    }

    fn paragraphs(&self, text: &str, mode: StyleMode) -> Vec<String> {
        paragraphize(text, mode, &self.thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("tweet".parse::<StyleMode>().unwrap(), StyleMode::Tweet);
        assert_eq!(" Article ".parse::<StyleMode>().unwrap(), StyleMode::Article);
        assert!(matches!("thread".parse::<StyleMode>(), Err(Error::UnknownMode(m)) if m == "thread"));
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&StyleMode::Article).unwrap(), "\"article\"");
        assert_eq!(serde_json::from_str::<StyleMode>("\"tweet\"").unwrap(), StyleMode::Tweet);
    }

    #[test]
    fn test_custom_thresholds() {
        let heuristics = DefaultHeuristics::new(ReflowThresholds {
            line_flush: 10,
            ..ReflowThresholds::default()
        });
        assert_eq!(
            heuristics.paragraphs("Alpha beta\ngamma delta", StyleMode::Article),
            vec!["Alpha beta", "gamma delta"]
        );
    }
}
