//! Rich-text wrap templates for stacked multi-language entries.

use crate::constants::template::PLACEHOLDER;

/// A wrap pattern split at its placeholder into prefix and suffix.
///
/// `<b>*</b>` wraps a sub-line as `<b>text</b>`. A pattern without a
/// placeholder wraps the sub-line with the literal pattern on both
/// sides; an empty pattern leaves the sub-line untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichTextTemplate {
    prefix: String,
    suffix: String,
}

impl RichTextTemplate {
    /// Split `pattern` at the first placeholder marker.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        pattern.find(PLACEHOLDER).map_or_else(
            || Self {
                prefix: pattern.to_string(),
                suffix: pattern.to_string(),
            },
            |pos| Self {
                prefix: pattern[..pos].to_string(),
                suffix: pattern[pos + PLACEHOLDER.len_utf8()..].to_string(),
            },
        )
    }

    /// Whether applying this template leaves text unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }

    /// Wrap one sub-line.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        format!("{}{text}{}", self.prefix, self.suffix)
    }
}

/// Wrap each sub-line of a merged entry text with its language template.
///
/// Sub-lines are separated by `\n`. The template index is bound to the
/// original file order of the merged group: with `reverse = false` the
/// merge step stacked later file lines first, so display position `i`
/// of `n` maps to template `n - 1 - i`; with `reverse = true` file
/// order was preserved and position `i` maps to template `i`. Sub-lines
/// without a template, with an empty template, or themselves empty pass
/// through unchanged.
pub(crate) fn wrap_stacked(text: &str, templates: &[RichTextTemplate], reverse: bool) -> String {
    if templates.is_empty() || text.is_empty() {
        return text.to_string();
    }

    let count = text.split('\n').count();
    let mut out = String::with_capacity(text.len() + 16);
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let index = if reverse { i } else { count - 1 - i };
        match templates.get(index) {
            Some(template) if !template.is_empty() && !part.is_empty() => {
                out.push_str(&template.apply(part));
            }
            _ => out.push_str(part),
        }
    }
    out
}
