//! Tuned cutoffs for linkification and plain-text reflow.
//!
//! The reflow values are empirical; `ReflowThresholds::default()` reads them
//! from here so callers can override them without touching the heuristics.

/// Maximum handle length matched after `@`.
pub const MAX_MENTION_LEN: usize = 15;

/// A heading line must be longer than this many characters.
pub const HEADING_MIN_LEN: usize = 2;

/// A heading line must be shorter than this many characters.
pub const HEADING_MAX_LEN: usize = 80;

/// Article reflow flushes a paragraph before it would exceed this length.
pub const LINE_FLUSH_LEN: usize = 260;

/// Unbroken article input shorter than this stays a single paragraph.
pub const SHORT_INPUT_LEN: usize = 420;

/// Sentence grouping flushes a paragraph before it would exceed this length.
pub const SENTENCE_FLUSH_LEN: usize = 290;

/// Prefix of mention links.
pub const MENTION_BASE_URL: &str = "https://x.com/";

/// Prefix of hashtag links.
pub const HASHTAG_BASE_URL: &str = "https://x.com/hashtag/";
