//! The cascade-engine seam.
//!
//! Selector matching, specificity, and CSS parsing live in an external
//! cascade engine. Box construction consults it through [`StyleEngine`]:
//! one call to select the matched declaration set for a node, and one call
//! per composition step to complete a computed style against its parent.

use thiserror::Error;

use crate::computed::{ComputedStyle, compose};
use crate::defaults::default_display_for_element;
use crate::display::DisplayValue;
use crate::values::{
    ColorValue, ContentValue, FloatValue, ListStyleType, PositionValue, SizeValue, TextTransform,
    Visibility, WhiteSpace,
};
use wombat_dom::{DomTree, NodeId};

/// [§ 7.3 Recognized media types](https://www.w3.org/TR/CSS2/media.html#media-types)
///
/// Media context for selection. Box construction always selects for
/// [`Media::Screen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Media {
    /// "Intended primarily for screen media."
    Screen,
    /// "Intended for paged material."
    Print,
}

/// Failure inside the cascade engine.
///
/// Selection or composition failure aborts box construction (it is assumed
/// to stem from resource exhaustion, not from malformed style input).
#[derive(Debug, Error)]
pub enum StyleError {
    /// The engine could not produce a matched declaration set.
    #[error("style selection failed: {0}")]
    Selection(String),
    /// Completing a computed style against its parent failed.
    #[error("style composition failed: {0}")]
    Composition(String),
}

/// The styles matched for one node: the element's own partial computed
/// style plus any pseudo-element styles the match produced.
///
/// [§ 5.12 Pseudo-elements](https://www.w3.org/TR/CSS2/selector.html#pseudo-elements)
#[derive(Debug, Clone, Default)]
pub struct MatchedStyles {
    /// The element's own computed style (partial until composed).
    pub primary: ComputedStyle,
    /// `::before` pseudo-element style, if any rules matched.
    pub before: Option<ComputedStyle>,
    /// `::after` pseudo-element style, if any rules matched.
    pub after: Option<ComputedStyle>,
    /// `::first-line` style (completion deferred, kept for layout).
    pub first_line: Option<ComputedStyle>,
    /// `::first-letter` style (completion deferred, kept for layout).
    pub first_letter: Option<ComputedStyle>,
}

/// External cascade/style engine contract.
///
/// `select_style` returns the matched declaration set for a node under the
/// given media, folding in an optional per-node inline-style override
/// (the raw `style` attribute text — parsing it is the engine's job).
/// `compose_style` completes `overlay` in place against `base`.
pub trait StyleEngine {
    /// Select the matched styles for `node`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Selection`] if the engine cannot produce a
    /// result; box construction treats this as fatal.
    fn select_style(
        &mut self,
        dom: &DomTree,
        node: NodeId,
        media: Media,
        inline_style: Option<&str>,
    ) -> Result<MatchedStyles, StyleError>;

    /// Complete the computed style `overlay` by composing it against the
    /// already-completed `base`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Composition`] on failure; box construction
    /// treats this as fatal.
    fn compose_style(
        &self,
        base: &ComputedStyle,
        overlay: &mut ComputedStyle,
    ) -> Result<(), StyleError>;
}

/// A minimal bundled engine: element-default display values plus literal
/// `property: value` declarations from the inline `style` attribute.
///
/// This is a stand-in for a real cascade engine — there is no selector
/// matching and no stylesheet input — but it honors the full
/// [`StyleEngine`] contract, which makes it useful for tests and headless
/// tooling.
#[derive(Debug, Default)]
pub struct DefaultStyleEngine;

impl DefaultStyleEngine {
    /// Create a new default engine.
    #[must_use]
    pub fn new() -> Self {
        DefaultStyleEngine
    }
}

impl StyleEngine for DefaultStyleEngine {
    fn select_style(
        &mut self,
        dom: &DomTree,
        node: NodeId,
        _media: Media,
        inline_style: Option<&str>,
    ) -> Result<MatchedStyles, StyleError> {
        let mut style = ComputedStyle::default();

        if let Some(name) = dom.element_name(node) {
            style.display = default_display_for_element(&name);
        }

        if let Some(text) = inline_style {
            apply_inline_declarations(&mut style, text);
        }

        Ok(MatchedStyles {
            primary: style,
            ..MatchedStyles::default()
        })
    }

    fn compose_style(
        &self,
        base: &ComputedStyle,
        overlay: &mut ComputedStyle,
    ) -> Result<(), StyleError> {
        compose(base, overlay);
        Ok(())
    }
}

/// Apply literal `property: value` declarations to a partial style.
///
/// Covers exactly the properties box construction consumes. Unknown
/// properties and unparsable values are ignored, as a forgiving CSS
/// parser would.
fn apply_inline_declarations(style: &mut ComputedStyle, text: &str) {
    for decl in text.split(';') {
        let Some((prop, value)) = decl.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim();

        match prop.as_str() {
            "display" => {
                if let Some(display) = DisplayValue::parse(value) {
                    style.display = display;
                }
            }
            "position" => {
                style.position = match value.to_ascii_lowercase().as_str() {
                    "relative" => PositionValue::Relative,
                    "absolute" => PositionValue::Absolute,
                    "fixed" => PositionValue::Fixed,
                    _ => PositionValue::Static,
                };
            }
            "float" => {
                style.float = match value.to_ascii_lowercase().as_str() {
                    "left" => FloatValue::Left,
                    "right" => FloatValue::Right,
                    _ => FloatValue::None,
                };
            }
            "white-space" => {
                style.white_space = match value.to_ascii_lowercase().as_str() {
                    "normal" => Some(WhiteSpace::Normal),
                    "nowrap" => Some(WhiteSpace::Nowrap),
                    "pre" => Some(WhiteSpace::Pre),
                    "pre-line" => Some(WhiteSpace::PreLine),
                    "pre-wrap" => Some(WhiteSpace::PreWrap),
                    _ => style.white_space,
                };
            }
            "text-transform" => {
                style.text_transform = match value.to_ascii_lowercase().as_str() {
                    "none" => Some(TextTransform::None),
                    "uppercase" => Some(TextTransform::Uppercase),
                    "lowercase" => Some(TextTransform::Lowercase),
                    "capitalize" => Some(TextTransform::Capitalize),
                    _ => style.text_transform,
                };
            }
            "list-style-type" => {
                style.list_style_type = match value.to_ascii_lowercase().as_str() {
                    "disc" => Some(ListStyleType::Disc),
                    "circle" => Some(ListStyleType::Circle),
                    "square" => Some(ListStyleType::Square),
                    "decimal" => Some(ListStyleType::Decimal),
                    "lower-alpha" => Some(ListStyleType::LowerAlpha),
                    "upper-alpha" => Some(ListStyleType::UpperAlpha),
                    "lower-roman" => Some(ListStyleType::LowerRoman),
                    "upper-roman" => Some(ListStyleType::UpperRoman),
                    "none" => Some(ListStyleType::None),
                    _ => style.list_style_type,
                };
            }
            "list-style-image" => {
                style.list_style_image = parse_url_value(value);
            }
            "visibility" => {
                style.visibility = match value.to_ascii_lowercase().as_str() {
                    "visible" => Some(Visibility::Visible),
                    "hidden" => Some(Visibility::Hidden),
                    "collapse" => Some(Visibility::Collapse),
                    _ => style.visibility,
                };
            }
            "color" => {
                if let Some(color) = ColorValue::parse(value) {
                    style.color = Some(color);
                }
            }
            "background-color" => {
                if value.eq_ignore_ascii_case("transparent") {
                    style.background_color = None;
                } else if let Some(color) = ColorValue::parse(value) {
                    style.background_color = Some(color);
                }
            }
            "background-image" => {
                style.background_image = parse_url_value(value);
            }
            "width" => {
                if let Some(size) = parse_size_value(value) {
                    style.width = size;
                }
            }
            "height" => {
                if let Some(size) = parse_size_value(value) {
                    style.height = size;
                }
            }
            "content" => {
                style.content = match value.to_ascii_lowercase().as_str() {
                    "normal" => ContentValue::Normal,
                    "none" => ContentValue::None,
                    _ => ContentValue::Text(value.trim_matches(['"', '\'']).to_string()),
                };
            }
            _ => {}
        }
    }
}

/// Parse a `url(...)` value, tolerating bare URLs and quotes.
fn parse_url_value(value: &str) -> Option<String> {
    if value.eq_ignore_ascii_case("none") {
        return None;
    }
    let inner = value
        .strip_prefix("url(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(value);
    let inner = inner.trim().trim_matches(['"', '\'']);
    if inner.is_empty() {
        None
    } else {
        Some(inner.to_string())
    }
}

/// Parse `<length>px`, `<number>%`, or `auto`.
fn parse_size_value(value: &str) -> Option<SizeValue> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
        Some(SizeValue::Auto)
    } else if let Some(pct) = value.strip_suffix('%') {
        pct.trim().parse::<f32>().ok().map(SizeValue::Percent)
    } else if let Some(px) = value.strip_suffix("px") {
        px.trim().parse::<f32>().ok().map(SizeValue::Length)
    } else {
        None
    }
}
