//! Paragraph reconstruction for unstructured text.
//!
//! Rules are tried in order and the first that applies decides the output:
//! blank-line splitting, tweet line splitting, then article reflow with a
//! sentence-grouping fallback for long unbroken input.

use std::borrow::Cow;

use memchr::memchr;

use super::{ReflowThresholds, StyleMode};

/// Convert `\r\n` and lone `\r` to `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if memchr(b'\r', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Split text into paragraphs. Never returns empty paragraphs.
pub fn paragraphize(text: &str, mode: StyleMode, thresholds: &ReflowThresholds) -> Vec<String> {
    let normalized = normalize_newlines(text);
    let text = normalized.trim();
    if text.is_empty() {
        return Vec::new();
    }

    if text.contains("\n\n") {
        return non_empty_trimmed(text.split("\n\n"));
    }

    match mode {
        StyleMode::Tweet => non_empty_trimmed(text.split('\n')),
        StyleMode::Article => reflow_article(text, thresholds),
    }
}

fn non_empty_trimmed<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<String> {
    pieces
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}

fn reflow_article(text: &str, thresholds: &ReflowThresholds) -> Vec<String> {
    let rewritten = insert_breaks(text);

    let mut acc = Accumulator::new(thresholds.line_flush);
    for line in rewritten.split('\n').map(str::trim) {
        if line.is_empty() {
            acc.flush();
        } else {
            acc.push(line);
        }
    }
    let paragraphs = acc.finish();

    if paragraphs.len() > 1 {
        return paragraphs;
    }
    if text.chars().count() < thresholds.short_input {
        return vec![text.to_owned()];
    }

    let mut acc = Accumulator::new(thresholds.sentence_flush);
    for sentence in sentences(text) {
        acc.push(sentence);
    }
    let grouped = acc.finish();
    if grouped.is_empty() {
        vec![text.to_owned()]
    } else {
        grouped
    }
}

/// Greedy space-joined accumulation with a character threshold.
struct Accumulator {
    limit: usize,
    buf: String,
    buf_chars: usize,
    out: Vec<String>,
}

impl Accumulator {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            buf: String::new(),
            buf_chars: 0,
            out: Vec::new(),
        }
    }

    fn push(&mut self, piece: &str) {
        let piece_chars = piece.chars().count();
        if self.buf.is_empty() {
            self.buf.push_str(piece);
            self.buf_chars = piece_chars;
        } else if self.buf_chars + 1 + piece_chars > self.limit {
            self.flush();
            self.buf.push_str(piece);
            self.buf_chars = piece_chars;
        } else {
            self.buf.push(' ');
            self.buf.push_str(piece);
            self.buf_chars += 1 + piece_chars;
        }
    }

    fn flush(&mut self) {
        if !self.buf.is_empty() {
            self.out.push(std::mem::take(&mut self.buf));
        }
        self.buf_chars = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.out
    }
}

const BULLETS: [char; 3] = ['•', '●', '▪'];

#[inline]
fn is_variation_selector(c: char) -> bool {
    matches!(c, '\u{FE0E}' | '\u{FE0F}')
}

#[inline]
fn is_opening_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '“' | '‘' | '«')
}

/// Rewrite article text with break markers.
///
/// Bullets and numbered markers start a new paragraph (`\n\n`); sentence
/// ends followed by a capital, digit or opening quote start a new line.
fn insert_breaks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if BULLETS.contains(&c) {
            trim_end_horizontal(&mut out);
            out.push_str("\n\n• ");
            i += 1;
            while i < chars.len() && (is_variation_selector(chars[i]) || is_horizontal_space(chars[i])) {
                i += 1;
            }
            continue;
        }

        if let Some(len) = numbered_marker_len(&chars, i) {
            trim_end_horizontal(&mut out);
            out.push_str("\n\n");
            out.extend(&chars[i..i + len]);
            i += len;
            continue;
        }

        out.push(c);
        i += 1;

        if matches!(c, '.' | '!' | '?') {
            let mut j = i;
            while j < chars.len() && is_horizontal_space(chars[j]) {
                j += 1;
            }
            let starts_sentence = j > i
                && chars
                    .get(j)
                    .is_some_and(|&n| n.is_uppercase() || n.is_ascii_digit() || is_opening_quote(n));
            if starts_sentence {
                out.push('\n');
                i = j;
            }
        }
    }

    out
}

/// Length of a `<digits>. ` marker at `i`, including the trailing space.
///
/// Only matches at the start of the text or after whitespace.
fn numbered_marker_len(chars: &[char], i: usize) -> Option<usize> {
    if i > 0 && !chars[i - 1].is_whitespace() {
        return None;
    }
    let digits = chars[i..].iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    match (chars.get(i + digits), chars.get(i + digits + 1)) {
        (Some('.'), Some(&next)) if is_horizontal_space(next) => Some(digits + 2),
        _ => None,
    }
}

#[inline]
fn is_horizontal_space(c: char) -> bool {
    c != '\n' && c.is_whitespace()
}

fn trim_end_horizontal(out: &mut String) {
    let kept = out.trim_end_matches(is_horizontal_space).len();
    out.truncate(kept);
}

/// Sentences of `text`: runs ending in `.`, `!` or `?`, plus any remainder.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        loop {
            if rest.is_empty() {
                return None;
            }
            let end = match rest.find(['.', '!', '?']) {
                Some(p) => {
                    let tail = &rest[p..];
                    p + tail.len() - tail.trim_start_matches(['.', '!', '?']).len()
                }
                None => rest.len(),
            };
            let sentence = rest[..end].trim();
            rest = &rest[end..];
            if !sentence.is_empty() {
                return Some(sentence);
            }
        }
    })
}
