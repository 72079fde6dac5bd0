//! Case-insensitive highlighting of the search query inside result titles.
//!
//! The query is escaped before it is compiled, so characters such as `+`,
//! `(` or `*` match literally instead of breaking the pattern.

use regex::RegexBuilder;

/// A run of title text, either matching the query or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    fn new(text: &str, matched: bool) -> Self {
        Self {
            text: text.to_string(),
            matched,
        }
    }
}

/// Byte ranges `(start, end)` of every case-insensitive occurrence of `query`
/// in `text`. A blank query matches nothing.
#[must_use]
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let query = query.trim();
    if query.is_empty() {
        return vec![];
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        tracing::debug!(query, "query could not be compiled for highlighting");
        return vec![];
    };

    pattern
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}

/// Splits `text` into alternating plain and matched segments.
///
/// Concatenating the segment texts always yields `text` unchanged.
#[must_use]
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for (start, end) in highlight_ranges(text, query) {
        if start > cursor {
            segments.push(Segment::new(&text[cursor..start], false));
        }
        segments.push(Segment::new(&text[start..end], true));
        cursor = end;
    }

    if cursor < text.len() || segments.is_empty() {
        segments.push(Segment::new(&text[cursor..], false));
    }
    segments
}
