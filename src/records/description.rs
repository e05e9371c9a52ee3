//! Content and generated descriptions.
//!
//! Content is markdown. When a record has no description of its own, one is
//! derived from the first paragraph of the content: markup is dropped
//! (inline HTML included), whitespace collapsed, and the text cut on a word
//! boundary so it fits [`DescriptionPolicy::max_chars`] including the
//! trailing ellipsis.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DescriptionPolicy {
    /// Upper bound on generated description length, in characters.
    pub max_chars: usize,
}

impl Default for DescriptionPolicy {
    fn default() -> Self {
        Self { max_chars: 160 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Described {
    /// Markdown body.
    pub content: String,
    /// Plain-text summary; `None` or blank means "generate on save".
    pub description: Option<String>,
}

/// Plain text of the first non-empty paragraph of `markdown`.
///
/// Documents without paragraphs (only headings, say) fall back to all of
/// their text.
pub fn first_paragraph(markdown: &str) -> String {
    let mut paragraph = String::new();
    let mut everything = String::new();
    let mut in_paragraph = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) => {
                if !paragraph.trim().is_empty() {
                    break;
                }
                in_paragraph = false;
                paragraph.clear();
            }
            Event::Text(text) | Event::Code(text) => {
                if in_paragraph {
                    paragraph.push_str(&text);
                }
                everything.push_str(&text);
                everything.push(' ');
            }
            Event::SoftBreak | Event::HardBreak if in_paragraph => paragraph.push(' '),
            _ => {}
        }
    }

    let source = if paragraph.trim().is_empty() {
        &everything
    } else {
        &paragraph
    };
    source.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to at most `max_chars` characters on a word boundary.
pub fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    // Leave room for the ellipsis
    let budget = max_chars.saturating_sub(1);
    let head: String = text.chars().take(budget).collect();
    let ends_on_word = text.chars().nth(budget).is_some_and(char::is_whitespace);
    let cut = match head.rfind(char::is_whitespace) {
        _ if ends_on_word => head.as_str(),
        Some(pos) if pos > 0 => &head[..pos],
        _ => head.as_str(),
    };
    let cut = cut.trim_end_matches(|c: char| c.is_whitespace() || c == ',' || c == ';');
    format!("{cut}…")
}

/// Generate a description from markdown `content`.
pub fn generate_description(content: &str, policy: &DescriptionPolicy) -> String {
    truncate_words(&first_paragraph(content), policy.max_chars)
}

/// Fill in a missing description. Returns whether one was written.
pub fn assign_description(described: &mut Described, policy: &DescriptionPolicy) -> bool {
    let missing = described
        .description
        .as_deref()
        .is_none_or(|d| d.trim().is_empty());
    if !missing {
        return false;
    }

    let generated = generate_description(&described.content, policy);
    if generated.is_empty() {
        return false;
    }
    described.description = Some(generated);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_paragraph_skips_headings() {
        let md = "# Title\n\nFirst *real* paragraph\nwraps here.\n\nSecond one.";
        assert_eq!(first_paragraph(md), "First real paragraph wraps here.");
    }

    #[test]
    fn first_paragraph_strips_links_and_html() {
        let md = "See [the docs](https://example.com) and <b>bold</b> `code`.";
        assert_eq!(first_paragraph(md), "See the docs and bold code.");
    }

    #[test]
    fn first_paragraph_falls_back_to_all_text() {
        assert_eq!(first_paragraph("# Only\n## Headings"), "Only Headings");
    }

    #[test]
    fn first_paragraph_of_empty_content() {
        assert_eq!(first_paragraph(""), "");
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_words("short text", 160), "short text");
    }

    #[test]
    fn truncate_cuts_on_word_boundary() {
        let out = truncate_words("alpha beta gamma delta", 13);
        assert_eq!(out, "alpha beta…");
        assert!(out.chars().count() <= 13);
    }

    #[test]
    fn truncate_single_long_word() {
        let out = truncate_words("abcdefghijklmnop", 6);
        assert_eq!(out, "abcde…");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let out = truncate_words("ééé ééé ééé", 8);
        assert_eq!(out, "ééé ééé…");
    }

    #[test]
    fn assign_fills_missing_description() {
        let mut d = Described {
            content: "Body text.".into(),
            description: None,
        };
        assert!(assign_description(&mut d, &DescriptionPolicy::default()));
        assert_eq!(d.description.as_deref(), Some("Body text."));
    }

    #[test]
    fn assign_treats_blank_as_missing() {
        let mut d = Described {
            content: "Body text.".into(),
            description: Some("   ".into()),
        };
        assert!(assign_description(&mut d, &DescriptionPolicy::default()));
        assert_eq!(d.description.as_deref(), Some("Body text."));
    }

    #[test]
    fn assign_keeps_manual_description() {
        let mut d = Described {
            content: "Body text.".into(),
            description: Some("Hand written".into()),
        };
        assert!(!assign_description(&mut d, &DescriptionPolicy::default()));
        assert_eq!(d.description.as_deref(), Some("Hand written"));
    }

    #[test]
    fn assign_leaves_empty_content_alone() {
        let mut d = Described::default();
        assert!(!assign_description(&mut d, &DescriptionPolicy::default()));
        assert_eq!(d.description, None);
    }
}
