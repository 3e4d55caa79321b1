//! Frameset grids and inline subwindows.
//!
//! [§ 16.2 Frames](https://html.spec.whatwg.org/multipage/obsolete.html#frames)
//!
//! A frameset document carries no renderable box content; it is captured
//! as a grid of frame descriptors on the document instead. Inline frames
//! (`<iframe>`) do produce a box and record a descriptor alongside it.

use serde::Serialize;

use crate::box_tree::BoxId;
use wombat_common::url::extract_link;
use wombat_css::ColorValue;
use wombat_dom::{DomTree, NodeId};

/// Unit of one frameset row/column dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
pub enum FrameUnit {
    /// Absolute CSS pixels.
    Pixels,
    /// Percentage of the available extent.
    Percent,
    /// Relative share (`*` syntax) of the remaining extent.
    Relative,
}

/// One dimension out of a `rows` or `cols` multi-length list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameDimension {
    /// The magnitude; always positive.
    pub value: f32,
    /// The unit the magnitude is measured in.
    pub unit: FrameUnit,
}

/// Scrollbar policy for a frame or inline frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
pub enum Scrolling {
    /// Scrollbars appear when the content overflows.
    #[default]
    Auto,
    /// Scrollbars are always shown.
    Yes,
    /// Scrollbars are never shown.
    No,
}

impl Scrolling {
    pub(crate) fn parse(value: &str) -> Scrolling {
        if value.eq_ignore_ascii_case("yes") {
            Scrolling::Yes
        } else if value.eq_ignore_ascii_case("no") {
            Scrolling::No
        } else {
            Scrolling::Auto
        }
    }
}

/// One cell of a frame grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Column dimension this frame occupies.
    pub width: FrameDimension,
    /// Row dimension this frame occupies.
    pub height: FrameDimension,
    /// Resolved content URL, absent for empty cells and self-references.
    pub url: Option<String>,
    /// Frame name, for link targeting.
    pub name: Option<String>,
    /// Whether the user may resize this frame.
    pub no_resize: bool,
    /// Scrollbar policy.
    pub scrolling: Scrolling,
    /// Whether the frame draws a border.
    pub border: bool,
    /// Border color.
    pub border_color: ColorValue,
    /// Horizontal content margin in pixels.
    pub margin_width: u32,
    /// Vertical content margin in pixels.
    pub margin_height: u32,
    /// Nested grid, when the cell holds a child `<frameset>`.
    pub children: Option<FrameGrid>,
}

/// A frameset's grid of frames, row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameGrid {
    /// Row dimensions, top to bottom.
    pub rows: Vec<FrameDimension>,
    /// Column dimensions, left to right.
    pub cols: Vec<FrameDimension>,
    /// `rows.len() * cols.len()` frames, row-major. Cells without a
    /// matching child element stay empty defaults.
    pub frames: Vec<Frame>,
}

impl FrameGrid {
    /// The frame at grid position (`row`, `col`).
    #[must_use]
    pub fn frame(&self, row: usize, col: usize) -> Option<&Frame> {
        if col >= self.cols.len() {
            return None;
        }
        self.frames.get(row * self.cols.len() + col)
    }
}

/// Descriptor for one inline frame, recorded next to its box.
#[derive(Debug, Clone)]
pub struct IframeDescriptor {
    /// The box rendering the subwindow.
    pub box_id: BoxId,
    /// Resolved content URL.
    pub url: String,
    /// Frame name, for link targeting.
    pub name: Option<String>,
    /// Horizontal content margin in pixels.
    pub margin_width: u32,
    /// Vertical content margin in pixels.
    pub margin_height: u32,
    /// Scrollbar policy.
    pub scrolling: Scrolling,
    /// Whether the subwindow draws a border.
    pub border: bool,
    /// Border color, when given.
    pub border_color: Option<ColorValue>,
}

/// [§ 16.2.1 The frameset element](https://html.spec.whatwg.org/multipage/obsolete.html#frameset)
///
/// Parse a `rows`/`cols` multi-length list: comma-separated entries, each
/// a number followed by an optional `%` or `*` unit. Non-positive and
/// unparsable magnitudes coerce to 1.
#[must_use]
pub fn parse_multi_lengths(value: &str) -> Vec<FrameDimension> {
    value.split(',').map(parse_dimension).collect()
}

fn parse_dimension(entry: &str) -> FrameDimension {
    let s = entry.trim();
    let number_end = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-'))
        .unwrap_or(s.len());
    let value = s[..number_end].parse::<f32>().unwrap_or(0.0);
    let unit = match s[number_end..].chars().next() {
        Some('%') => FrameUnit::Percent,
        Some('*') => FrameUnit::Relative,
        _ => FrameUnit::Pixels,
    };
    FrameDimension {
        value: if value <= 0.0 { 1.0 } else { value },
        unit,
    }
}

/// Build the frame grid for a `<frameset>` element, recursing into nested
/// framesets.
pub(crate) fn build_frame_grid(dom: &DomTree, node: NodeId, base: Option<&str>) -> FrameGrid {
    let rows = dom
        .attr(node, "rows")
        .map_or_else(full_extent, parse_multi_lengths);
    let cols = dom
        .attr(node, "cols")
        .map_or_else(full_extent, parse_multi_lengths);

    let mut default_border = true;
    if let Some(value) = dom.attr(node, "frameborder") {
        if value.eq_ignore_ascii_case("no") {
            default_border = false;
        }
    }
    if let Some(value) = dom.attr(node, "border") {
        if parse_int(value) == 0 {
            default_border = false;
        }
    }
    let default_color = dom
        .attr(node, "bordercolor")
        .and_then(ColorValue::parse)
        .unwrap_or(ColorValue::BLACK);

    let cell_count = rows.len() * cols.len();
    let mut frames = Vec::with_capacity(cell_count);
    let mut children = dom.children(node).iter().copied().filter(|&child| {
        matches!(
            dom.element_name(child).as_deref(),
            Some("frame" | "frameset")
        )
    });

    for row in 0..rows.len() {
        for col in 0..cols.len() {
            let mut frame = Frame {
                width: cols[col],
                height: rows[row],
                url: None,
                name: None,
                no_resize: false,
                scrolling: Scrolling::Auto,
                border: default_border,
                border_color: default_color,
                margin_width: 0,
                margin_height: 0,
                children: None,
            };
            if let Some(child) = children.next() {
                match dom.element_name(child).as_deref() {
                    Some("frameset") => {
                        // A nested grid draws its own borders.
                        frame.children = Some(build_frame_grid(dom, child, base));
                        frame.border = false;
                    }
                    Some("frame") => fill_frame(dom, child, base, &mut frame),
                    _ => {}
                }
            }
            frames.push(frame);
        }
    }

    FrameGrid { rows, cols, frames }
}

fn fill_frame(dom: &DomTree, node: NodeId, base: Option<&str>, frame: &mut Frame) {
    if let Some(src) = dom.attr(node, "src") {
        if let Some(url) = extract_link(src, base) {
            // A frame pointing back at its own document is dropped.
            if base.is_none_or(|b| b != url) {
                frame.url = Some(url);
            }
        }
    }
    frame.name = dom.attr(node, "name").map(str::to_string);
    frame.no_resize = dom.attr(node, "noresize").is_some();
    if let Some(value) = dom.attr(node, "frameborder") {
        frame.border = parse_int(value) != 0;
    }
    if let Some(value) = dom.attr(node, "scrolling") {
        frame.scrolling = Scrolling::parse(value);
    }
    if let Some(value) = dom.attr(node, "marginwidth") {
        frame.margin_width = parse_int(value);
    }
    if let Some(value) = dom.attr(node, "marginheight") {
        frame.margin_height = parse_int(value);
    }
    if let Some(color) = dom.attr(node, "bordercolor").and_then(ColorValue::parse) {
        frame.border_color = color;
    }
}

/// A missing `rows`/`cols` attribute means one full-extent track.
fn full_extent() -> Vec<FrameDimension> {
    vec![FrameDimension {
        value: 100.0,
        unit: FrameUnit::Percent,
    }]
}

/// Parse a leading unsigned integer, ignoring trailing junk.
pub(crate) fn parse_int(value: &str) -> u32 {
    let s = value.trim();
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_lengths_parse_units() {
        let dims = parse_multi_lengths("50%, 2*, 120");
        assert_eq!(
            dims,
            vec![
                FrameDimension {
                    value: 50.0,
                    unit: FrameUnit::Percent
                },
                FrameDimension {
                    value: 2.0,
                    unit: FrameUnit::Relative
                },
                FrameDimension {
                    value: 120.0,
                    unit: FrameUnit::Pixels
                },
            ]
        );
    }

    #[test]
    fn bare_star_is_one_relative() {
        let dims = parse_multi_lengths("*");
        assert_eq!(dims[0].value, 1.0);
        assert_eq!(dims[0].unit, FrameUnit::Relative);
    }

    #[test]
    fn non_positive_values_coerce_to_one() {
        let dims = parse_multi_lengths("0%, -5, junk");
        assert!(dims.iter().all(|d| d.value == 1.0));
        assert_eq!(dims[0].unit, FrameUnit::Percent);
        assert_eq!(dims[1].unit, FrameUnit::Pixels);
        assert_eq!(dims[2].unit, FrameUnit::Pixels);
    }

    #[test]
    fn parse_int_tolerates_junk() {
        assert_eq!(parse_int("12px"), 12);
        assert_eq!(parse_int("nope"), 0);
    }
}
