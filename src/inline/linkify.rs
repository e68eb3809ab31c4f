//! Linkification of bare URLs, @mentions and #hashtags.
//!
//! Input is already-escaped text. URL regions are found first and protected;
//! mentions and hashtags are matched only in the gaps between them.

use memchr::{memchr2, memmem};
use smallvec::SmallVec;

use crate::escape::sanitize_url;
use crate::limits::{HASHTAG_BASE_URL, MAX_MENTION_LEN, MENTION_BASE_URL};
use crate::range::Range;
use crate::render::HtmlWriter;

/// URL regions of one text run. Most runs contain none or one.
type UrlRegions = SmallVec<[Range; 2]>;

/// Linkify escaped text into a new string.
///
/// # Example
/// ```
/// use postrender::inline::linkify;
///
/// assert_eq!(
///     linkify("hi @bob"),
///     "hi <a href=\"https://x.com/bob\" target=\"_blank\" rel=\"noopener noreferrer\">@bob</a>"
/// );
/// ```
pub fn linkify(escaped: &str) -> String {
    let mut writer = HtmlWriter::with_capacity_for(escaped.len());
    linkify_into(&mut writer, escaped);
    writer.into_string()
}

/// Linkify escaped text into `w`.
pub fn linkify_into(w: &mut HtmlWriter, escaped: &str) {
    let mut urls = UrlRegions::new();
    find_urls_into(escaped, &mut urls);

    let mut pos = 0;
    for url in &urls {
        link_handles(w, escaped, pos, url.start_usize());
        write_url(w, &escaped[url.start_usize()..url.end_usize()]);
        pos = url.end_usize();
    }
    link_handles(w, escaped, pos, escaped.len());
}

/// Find `http://` and `https://` runs, each extending to the next whitespace
/// or `<`.
fn find_urls_into(text: &str, out: &mut UrlRegions) {
    let bytes = text.as_bytes();
    let mut resume = 0;

    for start in memmem::find_iter(bytes, b"http") {
        if start < resume {
            continue;
        }
        let rest = &text[start..];
        let scheme_len = if rest.starts_with("https://") {
            8
        } else if rest.starts_with("http://") {
            7
        } else {
            continue;
        };

        let body = &rest[scheme_len..];
        let body_len = body
            .find(|c: char| c.is_whitespace() || c == '<')
            .unwrap_or(body.len());
        if body_len == 0 {
            continue;
        }

        let end = start + scheme_len + body_len;
        out.push(Range::from_usize(start, end));
        resume = end;
    }
}

fn write_url(w: &mut HtmlWriter, url: &str) {
    match sanitize_url(url) {
        Some(href) => {
            w.link_start_escaped(href);
            w.write_string(url);
            w.link_end();
        }
        None => {
            log::debug!("leaving unusable url unlinked: {url:?}");
            w.write_string(url);
        }
    }
}

/// Link mentions and hashtags in `text[from..to]`, copying everything else.
fn link_handles(w: &mut HtmlWriter, text: &str, from: usize, to: usize) {
    let bytes = text.as_bytes();
    let mut copied = from;
    let mut pos = from;

    while let Some(found) = memchr2(b'@', b'#', &bytes[pos..to]) {
        let sigil_at = pos + found;
        pos = sigil_at + 1;

        if sigil_at > 0 && is_word_byte(bytes[sigil_at - 1]) {
            continue;
        }

        let is_mention = bytes[sigil_at] == b'@';
        let max_len = if is_mention { MAX_MENTION_LEN } else { usize::MAX };
        let name_len = bytes[pos..to]
            .iter()
            .take(max_len)
            .take_while(|&&b| is_word_byte(b))
            .count();
        if name_len == 0 {
            continue;
        }

        let name_end = pos + name_len;
        let name = &text[pos..name_end];

        w.write_string(&text[copied..sigil_at]);
        w.write_str("<a href=\"");
        w.write_str(if is_mention { MENTION_BASE_URL } else { HASHTAG_BASE_URL });
        w.write_string(name);
        w.write_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
        w.write_string(&text[sigil_at..name_end]);
        w.link_end();

        copied = name_end;
        pos = name_end;
    }

    w.write_string(&text[copied..to]);
}

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
