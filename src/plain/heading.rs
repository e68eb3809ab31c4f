//! Heading-like lines in unstructured text.

use serde::Serialize;

use super::paragraph::normalize_newlines;
use super::ReflowThresholds;

/// A detected heading line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    /// Index into the trimmed non-empty lines of the text.
    pub line_index: usize,
    pub text: String,
}

/// Detect heading lines.
///
/// A line other than the last is a heading when its length lies strictly
/// between the thresholds, it does not end in sentence or clause
/// punctuation, and the next line is strictly longer.
pub fn detect_headings(text: &str, thresholds: &ReflowThresholds) -> Vec<Heading> {
    let normalized = normalize_newlines(text);
    let lines: Vec<(&str, usize)> = normalized
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| (line, line.chars().count()))
        .collect();

    lines
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            let (line, len) = pair[0];
            let next_len = pair[1].1;
            let is_heading = len > thresholds.heading_min_len
                && len < thresholds.heading_max_len
                && !line.ends_with(['.', '!', '?', ',', ';', ':'])
                && next_len > len;
            is_heading.then(|| Heading {
                line_index: i,
                text: line.to_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(text: &str) -> Vec<(usize, String)> {
        detect_headings(text, &ReflowThresholds::default())
            .into_iter()
            .map(|h| (h.line_index, h.text))
            .collect()
    }

    #[test]
    fn test_short_line_before_longer_line() {
        let text = "Intro\nThis is a considerably longer line of body text.";
        assert_eq!(headings(text), vec![(0, "Intro".to_owned())]);
    }

    #[test]
    fn test_last_line_is_never_heading() {
        assert!(headings("Only line").is_empty());
        assert!(headings("A longer first line\nEnd").is_empty());
    }

    #[test]
    fn test_punctuation_disqualifies() {
        for end in ['.', '!', '?', ',', ';', ':'] {
            let text = format!("Intro{end}\nThis is a considerably longer line of body text.");
            assert!(headings(&text).is_empty(), "ending {end:?}");
        }
    }

    #[test]
    fn test_length_bounds_are_exclusive() {
        // Two characters is not enough.
        assert!(headings("Hi\nA much longer following line").is_empty());
        assert_eq!(headings("Hey\nA much longer following line"), vec![(0, "Hey".to_owned())]);

        let long = "x".repeat(80);
        let text = format!("{long}\n{long}yy");
        assert!(headings(&text).is_empty());
    }

    #[test]
    fn test_next_line_must_be_strictly_longer() {
        assert!(headings("Same\nSame").is_empty());
    }

    #[test]
    fn test_indices_skip_blank_lines() {
        let text = "\r\n  Title  \r\n\r\nA longer line of text follows\nShort\nA longer line of text follows";
        assert_eq!(
            headings(text),
            vec![(0, "Title".to_owned()), (2, "Short".to_owned())]
        );
    }

    #[test]
    fn test_lengths_count_characters() {
        // Three characters, nine bytes.
        assert_eq!(headings("日本語\n日本語です"), vec![(0, "日本語".to_owned())]);
    }
}
