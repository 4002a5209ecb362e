//! Output model for rule matches
//!
//! A successful rule attempt produces a flat, ordered list of fragments.
//! Text fragments are verbatim substrings of the input and get HTML-escaped
//! at render time. Marker fragments are the opening/closing halves of a
//! classified span and are emitted literally, never escaped.
//!
//! Ordering is significant: concatenating the text fragments of a parse
//! result (ignoring markers) reconstructs the original input.

use std::fmt;

/// One element of a rule's successful output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A verbatim piece of the input text. Escaped when rendered.
    Text(String),
    /// Opening marker of a classified span, carrying the tag name.
    Open(String),
    /// Closing marker of a classified span.
    Close,
}

impl Fragment {
    /// Build a text fragment from any string-ish value
    pub fn text(s: impl Into<String>) -> Self {
        Fragment::Text(s.into())
    }

    /// Whether this fragment is plain input text (as opposed to a marker)
    pub fn is_text(&self) -> bool {
        matches!(self, Fragment::Text(_))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text(s) => write!(f, "{}", s),
            Fragment::Open(class) => write!(f, "<span class='{}'>", class),
            Fragment::Close => write!(f, "</span>"),
        }
    }
}

/// Escape the characters reserved by the output format.
///
/// `&` must be replaced first so already-escaped entities don't get
/// double-escaped.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a fragment sequence to the final output string.
///
/// Text fragments are escaped, markers pass through untouched.
pub fn render(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Text(s) => out.push_str(&escape(s)),
            marker => out.push_str(&marker.to_string()),
        }
    }
    out
}

/// Concatenate only the text fragments, unescaped.
///
/// For any grammar, this reconstructs the slice of input the match consumed.
pub fn plain_text(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .filter_map(|f| match f {
            Fragment::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_reserved_characters() {
        assert_eq!(escape("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn test_escape_ampersand_first() {
        // "&lt;" in the input must not collapse with the escaping of "<"
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_render_escapes_text_only() {
        let fragments = vec![
            Fragment::Open("keyword".to_string()),
            Fragment::text("<x>"),
            Fragment::Close,
        ];
        assert_eq!(
            render(&fragments),
            "<span class='keyword'>&lt;x&gt;</span>"
        );
    }

    #[test]
    fn test_plain_text_skips_markers() {
        let fragments = vec![
            Fragment::text("a"),
            Fragment::Open("number".to_string()),
            Fragment::text("42"),
            Fragment::Close,
            Fragment::text(";"),
        ];
        assert_eq!(plain_text(&fragments), "a42;");
    }
}
