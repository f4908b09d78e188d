//! Match highlighting
//!
//! Highlighting produces a list of runs instead of a marked-up string, so
//! record text can never smuggle markup into the output. Each renderer
//! decides how to show a marked run and escapes what it has to.

use std::fmt;

use super::CompiledPattern;

/// One run of text, either plain or part of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub marked: bool,
}

/// Text split into plain and matched runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted<'a> {
    spans: Vec<Span<'a>>,
}

impl<'a> Highlighted<'a> {
    /// Text with no marked runs
    pub fn plain(text: &'a str) -> Self {
        let spans = if text.is_empty() {
            Vec::new()
        } else {
            vec![Span { text, marked: false }]
        };
        Self { spans }
    }

    /// Check whether any run is marked
    pub fn has_matches(&self) -> bool {
        self.spans.iter().any(|s| s.marked)
    }

    /// The matched substrings, in order
    pub fn matches(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.spans.iter().filter(|s| s.marked).map(|s| s.text)
    }

    /// Render as HTML: all text escaped, matches wrapped in `<mark>`
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            if span.marked {
                out.push_str("<mark>");
                push_escaped(&mut out, span.text);
                out.push_str("</mark>");
            } else {
                push_escaped(&mut out, span.text);
            }
        }
        out
    }

    /// Render for a terminal: matches in reverse video
    pub fn to_terminal(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            if span.marked {
                out.push_str("\x1b[7m");
                out.push_str(span.text);
                out.push_str("\x1b[0m");
            } else {
                out.push_str(span.text);
            }
        }
        out
    }
}

/// The original text, without any marking
impl fmt::Display for Highlighted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(span.text)?;
        }
        Ok(())
    }
}

/// Split `text` into runs around every non-empty match of `pattern`.
///
/// Without a pattern the text comes back as a single plain run.
pub fn highlight<'a>(text: &'a str, pattern: Option<&CompiledPattern>) -> Highlighted<'a> {
    let Some(pattern) = pattern else {
        return Highlighted::plain(text);
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for m in pattern.regex().find_iter(text) {
        if m.start() == m.end() {
            continue;
        }
        if m.start() > last {
            spans.push(Span {
                text: &text[last..m.start()],
                marked: false,
            });
        }
        spans.push(Span {
            text: m.as_str(),
            marked: true,
        });
        last = m.end();
    }
    if last < text.len() {
        spans.push(Span {
            text: &text[last..],
            marked: false,
        });
    }

    Highlighted { spans }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
