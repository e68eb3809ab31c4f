//! HTML escaping and URL filtering.
//!
//! Fast-path optimized: scans for the first escapable character,
//! then bulk-copies segments between escapes.
//!
//! Text escaping only touches `<`, `>`, `&` and `"`. Single quotes are left
//! alone so escaped text never contains `&#...;` sequences that the
//! hashtag linkifier could pick up.

use memchr::{memchr, memchr3};

/// Lookup table for escapable characters in text content.
const TEXT_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table
};

/// Escape HTML text content into an output string.
///
/// # Example
/// ```
/// use postrender::escape::escape_text_into;
///
/// let mut out = String::new();
/// escape_text_into(&mut out, "<script>");
/// assert_eq!(out, "&lt;script&gt;");
/// ```
pub fn escape_text_into(out: &mut String, input: &str) {
    if input.is_empty() {
        return;
    }

    let bytes = input.as_bytes();
    let mut pos = match first_text_escape(bytes) {
        Some(p) => p,
        None => {
            out.push_str(input);
            return;
        }
    };

    out.reserve(input.len() + input.len() / 8);
    out.push_str(&input[..pos]);

    while pos < bytes.len() {
        let scan_start = pos;
        while pos < bytes.len() && !TEXT_ESCAPE_TABLE[bytes[pos] as usize] {
            pos += 1;
        }

        // Escapable bytes are ASCII, so both ends are char boundaries.
        if pos > scan_start {
            out.push_str(&input[scan_start..pos]);
        }

        if pos < bytes.len() {
            out.push_str(match bytes[pos] {
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'&' => "&amp;",
                _ => "&quot;",
            });
            pos += 1;
        }
    }
}

/// Escape and return as a new String.
///
/// Prefer `escape_text_into` to reuse buffers.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    escape_text_into(&mut out, input);
    out
}

/// Escape a raw value for a double-quoted attribute.
#[inline]
pub fn escape_attr_into(out: &mut String, input: &str) {
    html_escape::encode_double_quoted_attribute_to_string(input, out);
}

#[inline]
fn first_text_escape(input: &[u8]) -> Option<usize> {
    let a = memchr3(b'<', b'>', b'&', input);
    let b = memchr(b'"', input);
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Accept only absolute `http`/`https` URLs.
///
/// Returns the trimmed URL, or `None` for any other scheme (`javascript:`,
/// `data:`, relative paths) and for URLs without a host.
///
/// # Example
/// ```
/// use postrender::escape::sanitize_url;
///
/// assert_eq!(sanitize_url(" https://example.com/a "), Some("https://example.com/a"));
/// assert_eq!(sanitize_url("javascript:alert(1)"), None);
/// ```
pub fn sanitize_url(url: &str) -> Option<&str> {
    let url = url.trim();
    let rest = strip_prefix_ignore_case(url, "https://")
        .or_else(|| strip_prefix_ignore_case(url, "http://"))?;

    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host = &rest[..host_end];
    if host.is_empty() || host.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    if url.chars().any(char::is_control) {
        return None;
    }
    Some(url)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}
