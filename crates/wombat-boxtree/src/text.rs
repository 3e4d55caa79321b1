//! Text node conversion: whitespace handling, transforms, segmentation.
//!
//! [§ 3 White Space Processing](https://www.w3.org/TR/css-text-3/#white-space-property)
//!
//! A text node becomes zero or more text boxes in the enclosing inline
//! container. Collapsing modes squash whitespace runs and push edge spaces
//! into trailing-space flags on neighboring boxes; preserving modes keep
//! the text intact and split it into per-line boxes.

use crate::box_tree::{BoxId, BoxType, LinkContext};
use crate::construct::BoxTreeBuilder;
use crate::error::BuildError;
use wombat_css::TextTransform;
use wombat_dom::NodeId;

/// No-break space, used to keep preserved spaces from collapsing later.
pub const NBSP: char = '\u{00A0}';

/// Collapse every run of ASCII whitespace to a single space. Edge
/// whitespace collapses too; it is not trimmed.
#[must_use]
pub fn squash_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for ch in s.chars() {
        if ch.is_ascii_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Collapse whitespace runs and trim the edges. Used for attribute text
/// such as `alt`, `title`, and option labels.
#[must_use]
pub fn squash_and_trim(s: &str) -> String {
    squash_whitespace(s).trim().to_string()
}

/// Replace spaces and tabs with no-break spaces, preserving newlines.
/// Preserved-whitespace text goes through this so later collapsing passes
/// cannot eat the spacing.
#[must_use]
pub fn spaces_to_nbsp(s: &str) -> String {
    s.chars()
        .map(|ch| if ch == ' ' || ch == '\t' { NBSP } else { ch })
        .collect()
}

/// [§ 2.1 text-transform](https://www.w3.org/TR/css-text-3/#text-transform-property)
///
/// Apply a text transform. Case mapping is ASCII-only; other scripts pass
/// through unchanged.
#[must_use]
pub fn apply_text_transform(s: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => s.to_string(),
        TextTransform::Uppercase => s
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .collect(),
        TextTransform::Lowercase => s
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .collect(),
        TextTransform::Capitalize => {
            let mut out = String::with_capacity(s.len());
            let mut at_word_start = true;
            for ch in s.chars() {
                if at_word_start {
                    out.push(ch.to_ascii_uppercase());
                } else {
                    out.push(ch);
                }
                at_word_start = ch.is_ascii_whitespace();
            }
            out
        }
    }
}

impl BoxTreeBuilder<'_> {
    /// Convert one text node into text boxes under the open inline
    /// container, creating the container if needed.
    pub(crate) fn convert_text(
        &mut self,
        node: NodeId,
        parent_style: &std::rc::Rc<wombat_css::ComputedStyle>,
        parent: BoxId,
        inline_container: &mut Option<BoxId>,
        link: &LinkContext,
    ) -> Result<(), BuildError> {
        let dom = self.dom;
        let Some(raw) = dom.as_text(node) else {
            return Ok(());
        };
        let transform = parent_style.text_transform();

        if parent_style.white_space().collapses() {
            self.convert_collapsing_text(raw, parent_style, parent, inline_container, link, transform)
        } else {
            self.convert_preserved_text(raw, parent_style, parent, inline_container, link, transform)
        }
    }

    /// `normal`, `nowrap`, `pre-line`: whitespace runs collapse; edge
    /// spaces become trailing-space flags instead of characters.
    fn convert_collapsing_text(
        &mut self,
        raw: &str,
        style: &std::rc::Rc<wombat_css::ComputedStyle>,
        parent: BoxId,
        inline_container: &mut Option<BoxId>,
        link: &LinkContext,
        transform: TextTransform,
    ) -> Result<(), BuildError> {
        let had_leading = raw.starts_with(|c: char| c.is_ascii_whitespace());
        let had_trailing = raw.ends_with(|c: char| c.is_ascii_whitespace());
        let squashed = squash_and_trim(raw);

        if squashed.is_empty() {
            // Whitespace-only text: no box, but the preceding box in the
            // open container gains a trailing space.
            if let Some(container) = *inline_container {
                if let Some(last) = self.tree[container].last_child {
                    self.tree[last].has_trailing_space = true;
                }
            }
            return Ok(());
        }

        let text = apply_text_transform(&squashed, transform);

        // TODO(nowrap-nbsp): white-space: nowrap is meant to harden
        // interior spaces against wrapping here; pending a decision on
        // whether layout or construction owns that.

        let container = self.ensure_inline_container(parent, inline_container);
        let text_box = self
            .tree
            .create_box(BoxType::Text, Some(style.clone()), link, None);
        self.tree[text_box].text = Some(text);
        self.tree[text_box].has_trailing_space = had_trailing;
        self.tree.append_child(container, text_box);

        if had_leading {
            if let Some(prev) = self.tree[text_box].prev_sibling {
                self.tree[prev].has_trailing_space = true;
            }
        }
        Ok(())
    }

    /// `pre`, `pre-wrap`: text is kept verbatim (spaces hardened to
    /// no-break spaces) and split into one box per line. Only a CRLF line
    /// ending closes the open inline container; bare `\n` or `\r` starts a
    /// new box in the same container.
    fn convert_preserved_text(
        &mut self,
        raw: &str,
        style: &std::rc::Rc<wombat_css::ComputedStyle>,
        parent: BoxId,
        inline_container: &mut Option<BoxId>,
        link: &LinkContext,
        transform: TextTransform,
    ) -> Result<(), BuildError> {
        let text = apply_text_transform(&spaces_to_nbsp(raw), transform);
        let mut rest = text.as_str();

        // One leading newline is swallowed immediately after a <pre> opens.
        if self.tree[parent].strip_leading_newline {
            self.tree[parent].strip_leading_newline = false;
            rest = if let Some(r) = rest.strip_prefix("\r\n") {
                r
            } else if let Some(r) = rest.strip_prefix(['\r', '\n']) {
                r
            } else {
                rest
            };
        }

        loop {
            let line_len = rest.find(['\r', '\n']).unwrap_or(rest.len());
            let (line, tail) = rest.split_at(line_len);

            let container = self.ensure_inline_container(parent, inline_container);
            let text_box = self
                .tree
                .create_box(BoxType::Text, Some(style.clone()), link, None);
            self.tree[text_box].text = Some(line.to_string());
            self.tree.append_child(container, text_box);

            if tail.is_empty() {
                break;
            }
            if let Some(after) = tail.strip_prefix("\r\n") {
                // A CRLF hard line ending closes the current container.
                *inline_container = None;
                rest = after;
            } else {
                rest = &tail[1..];
            }
            if rest.is_empty() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squash_collapses_runs() {
        assert_eq!(squash_whitespace("a \t\n b"), "a b");
        assert_eq!(squash_whitespace("  a  "), " a ");
    }

    #[test]
    fn squash_and_trim_trims_edges() {
        assert_eq!(squash_and_trim("  hi   there "), "hi there");
        assert_eq!(squash_and_trim(" \n\t "), "");
    }

    #[test]
    fn nbsp_replaces_spaces_and_tabs() {
        assert_eq!(spaces_to_nbsp("a b\tc\nd"), "a\u{a0}b\u{a0}c\nd");
    }

    #[test]
    fn transforms_are_ascii_only() {
        assert_eq!(
            apply_text_transform("héllo", TextTransform::Uppercase),
            "HéLLO"
        );
        assert_eq!(
            apply_text_transform("two words", TextTransform::Capitalize),
            "Two Words"
        );
        assert_eq!(
            apply_text_transform("MiXeD", TextTransform::Lowercase),
            "mixed"
        );
    }
}
