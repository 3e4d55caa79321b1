//! The layout box tree.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! "Block-level elements generate a principal block box... Inline-level
//! elements generate inline-level boxes."
//!
//! # Design
//!
//! Boxes live in an arena indexed by [`BoxId`]; parent, sibling, and child
//! relationships are ids, the same shape as the document tree feeding this
//! crate. Styles are completed before boxes are created and shared via
//! `Rc`, so a box never owns its style exclusively.

use std::fmt;
use std::rc::Rc;

use crate::frameset::{FrameGrid, IframeDescriptor};
use crate::forms::ControlHandle;
use crate::fetch::ObjectParams;
use wombat_css::{ColorValue, ComputedStyle};

/// A type-safe index into the box tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(pub usize);

/// The kind of a layout box.
///
/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// Inline-level content never sits directly under a block box: it is
/// grouped under an anonymous [`BoxType::InlineContainer`] (the arena's
/// rendition of CSS 2.1's anonymous block boxes around inline content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum BoxType {
    /// A block-level box establishing block flow for its children.
    Block,
    /// An inline box; its children run in the surrounding line flow.
    Inline,
    /// Anonymous grouping box holding a run of inline-level boxes under a
    /// block parent.
    InlineContainer,
    /// Closing sentinel paired with an [`BoxType::Inline`] box whose
    /// children were lifted into the same inline container.
    InlineEnd,
    /// An inline-level box that establishes its own block flow inside
    /// (`display: inline-block`, form controls, subwindows).
    InlineBlock,
    /// A run of text. Carries the segmented text content.
    Text,
    /// A forced line break (`<br>`).
    ForcedBreak,
    /// Anonymous wrapper for a left-floated block in inline flow.
    FloatLeft,
    /// Anonymous wrapper for a right-floated block in inline flow.
    FloatRight,
    /// A table box.
    Table,
    /// A table row group box.
    TableRowGroup,
    /// A table row box.
    TableRow,
    /// A table cell box.
    TableCell,
    /// Generates no box. A box of this kind is released before it ever
    /// joins the tree.
    None,
}

/// [§ 6.6 Frame target names](https://html.spec.whatwg.org/multipage/document-sequences.html#valid-browsing-context-name-or-keyword)
///
/// Where a followed link should load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameTarget {
    /// "_blank: a new top-level traversable"
    Blank,
    /// "_self: the current navigable"
    SelfFrame,
    /// "_parent: the parent navigable"
    Parent,
    /// "_top: the top-level traversable"
    Top,
    /// A named frame or window.
    Named(Rc<str>),
}

impl FrameTarget {
    /// Parse a `target` attribute value, mapping the reserved keywords
    /// case-insensitively and treating anything else as a name.
    #[must_use]
    pub fn parse(value: &str) -> FrameTarget {
        if value.eq_ignore_ascii_case("_blank") {
            FrameTarget::Blank
        } else if value.eq_ignore_ascii_case("_self") {
            FrameTarget::SelfFrame
        } else if value.eq_ignore_ascii_case("_parent") {
            FrameTarget::Parent
        } else if value.eq_ignore_ascii_case("_top") {
            FrameTarget::Top
        } else {
            FrameTarget::Named(Rc::from(value))
        }
    }
}

impl fmt::Display for FrameTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameTarget::Blank => write!(f, "_blank"),
            FrameTarget::SelfFrame => write!(f, "_self"),
            FrameTarget::Parent => write!(f, "_parent"),
            FrameTarget::Top => write!(f, "_top"),
            FrameTarget::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Link context inherited down the document tree during conversion.
///
/// [§ 4.5.1 The a element](https://html.spec.whatwg.org/multipage/text-level-semantics.html#the-a-element)
///
/// An anchor's resolved href, target, and the nearest `title` attribute
/// flow down to every descendant box, so a text box deep inside an anchor
/// still knows what it links to.
#[derive(Debug, Clone, Default)]
pub struct LinkContext {
    /// Resolved URL of the nearest enclosing anchor, if any.
    pub href: Option<Rc<str>>,
    /// Target of the nearest enclosing anchor, if any.
    pub target: Option<FrameTarget>,
    /// Nearest `title` attribute value, whitespace-squashed.
    pub title: Option<Rc<str>>,
}

/// One box in the layout tree.
///
/// Boxes carry everything later layout passes need: the shared computed
/// style, segmented text, link context, form-control binding, replaced
/// content parameters, and the structural links into the arena.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// The kind of this box.
    pub box_type: BoxType,
    /// Completed computed style; `None` only on anonymous boxes
    /// (inline containers, float wrappers).
    pub style: Option<Rc<ComputedStyle>>,
    /// Segmented text content, for [`BoxType::Text`] boxes and labels.
    pub text: Option<String>,
    /// Whether a collapsed space follows this box's text.
    pub has_trailing_space: bool,
    /// Resolved URL of the enclosing anchor, if any.
    pub href: Option<Rc<str>>,
    /// Link target of the enclosing anchor, if any.
    pub target: Option<FrameTarget>,
    /// Nearest `title` attribute value, if any.
    pub title: Option<Rc<str>>,
    /// The element's `id` (or an anchor's `name`), for fragment targets.
    pub id: Option<String>,
    /// Image map name referenced by a `usemap` attribute, `#` stripped.
    pub usemap: Option<String>,
    /// Table column span (`colspan`), default 1.
    pub columns: u32,
    /// Table row span (`rowspan`), default 1.
    pub rows: u32,
    /// Ordinal carried by list marker boxes, default 1.
    pub marker_ordinal: u32,
    /// Pending strip of one leading newline from the next preformatted
    /// text child (`<pre>`).
    pub strip_leading_newline: bool,
    /// Whether both replaced-content dimensions are already known from
    /// the style, letting layout proceed before the fetch completes.
    pub replaced_dims_known: bool,
    /// Bound form control, if this box renders one.
    pub gadget: Option<ControlHandle>,
    /// Parameters for embedded object content, if any.
    pub object: Option<ObjectParams>,
    /// List marker box attached to this list-item box. The marker hangs
    /// off the item rather than sitting in its child list.
    pub list_marker: Option<BoxId>,
    /// The paired box: an inline box points at its inline-end sentinel
    /// and vice versa.
    pub inline_end: Option<BoxId>,
    /// Parent box in the tree.
    pub parent: Option<BoxId>,
    /// Previous sibling.
    pub prev_sibling: Option<BoxId>,
    /// Next sibling.
    pub next_sibling: Option<BoxId>,
    /// First child.
    pub first_child: Option<BoxId>,
    /// Last child.
    pub last_child: Option<BoxId>,
}

impl LayoutBox {
    fn new(box_type: BoxType) -> LayoutBox {
        LayoutBox {
            box_type,
            style: None,
            text: None,
            has_trailing_space: false,
            href: None,
            target: None,
            title: None,
            id: None,
            usemap: None,
            columns: 1,
            rows: 1,
            marker_ordinal: 1,
            strip_leading_newline: false,
            replaced_dims_known: false,
            gadget: None,
            object: None,
            list_marker: None,
            inline_end: None,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            first_child: None,
            last_child: None,
        }
    }
}

/// The box tree for one document, plus the document-level state that box
/// construction accumulates alongside it.
#[derive(Debug)]
pub struct BoxTree {
    boxes: Vec<LayoutBox>,
    root: BoxId,
    /// Document background from the `body` element's style; `None` means
    /// the viewport default applies.
    pub background: Option<ColorValue>,
    /// The document's frame grid, if the document is frameset-based.
    /// Only the first `<frameset>` ever wins.
    pub frameset: Option<FrameGrid>,
    /// Inline subwindows discovered during conversion, in document order.
    pub iframes: Vec<IframeDescriptor>,
}

impl BoxTree {
    /// Create an empty tree holding only a synthetic block root.
    ///
    /// The synthetic root collects whatever the document's root element
    /// produces; construction promotes the real root afterwards.
    #[must_use]
    pub fn new() -> BoxTree {
        BoxTree {
            boxes: vec![LayoutBox::new(BoxType::Block)],
            root: BoxId(0),
            background: None,
            frameset: None,
            iframes: Vec::new(),
        }
    }

    /// The root box.
    #[must_use]
    pub fn root(&self) -> BoxId {
        self.root
    }

    /// Number of boxes in the arena, including detached ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the arena holds no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Get a box by id.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&LayoutBox> {
        self.boxes.get(id.0)
    }

    /// Create a styled box carrying the current link context.
    pub fn create_box(
        &mut self,
        box_type: BoxType,
        style: Option<Rc<ComputedStyle>>,
        link: &LinkContext,
        id: Option<String>,
    ) -> BoxId {
        let mut b = LayoutBox::new(box_type);
        b.style = style;
        b.href = link.href.clone();
        b.target = link.target.clone();
        b.title = link.title.clone();
        b.id = id;
        let id = BoxId(self.boxes.len());
        self.boxes.push(b);
        id
    }

    /// Create an anonymous box (no style, no link context).
    pub fn create_anonymous(&mut self, box_type: BoxType) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(LayoutBox::new(box_type));
        id
    }

    /// Append `child` as the last child of `parent`, linking siblings.
    pub fn append_child(&mut self, parent: BoxId, child: BoxId) {
        let prev_last = self.boxes[parent.0].last_child;

        self.boxes[child.0].parent = Some(parent);
        self.boxes[child.0].prev_sibling = prev_last;
        self.boxes[child.0].next_sibling = None;

        if let Some(prev) = prev_last {
            self.boxes[prev.0].next_sibling = Some(child);
        } else {
            self.boxes[parent.0].first_child = Some(child);
        }
        self.boxes[parent.0].last_child = Some(child);
    }

    /// Promote `id` to be the tree root, detaching it from the synthetic
    /// root it was collected under.
    pub(crate) fn set_root(&mut self, id: BoxId) {
        self.boxes[id.0].parent = None;
        self.root = id;
    }

    /// Iterate the attached children of a box, in order.
    pub fn children(&self, id: BoxId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            next: self.boxes[id.0].first_child,
        }
    }

    /// Pre-order traversal of the tree starting at the root. List marker
    /// boxes hang off their items and are not visited.
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter {
            tree: self,
            stack: vec![self.root],
        }
    }
}

impl Default for BoxTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<BoxId> for BoxTree {
    type Output = LayoutBox;

    fn index(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }
}

impl std::ops::IndexMut<BoxId> for BoxTree {
    fn index_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }
}

/// Iterator over a box's children.
pub struct ChildIter<'a> {
    tree: &'a BoxTree,
    next: Option<BoxId>,
}

impl Iterator for ChildIter<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<BoxId> {
        let current = self.next?;
        self.next = self.tree.boxes[current.0].next_sibling;
        Some(current)
    }
}

/// Pre-order box tree iterator.
pub struct PreorderIter<'a> {
    tree: &'a BoxTree,
    stack: Vec<BoxId>,
}

impl Iterator for PreorderIter<'_> {
    type Item = BoxId;

    fn next(&mut self) -> Option<BoxId> {
        let current = self.stack.pop()?;
        let mut child = self.tree.boxes[current.0].last_child;
        while let Some(c) = child {
            self.stack.push(c);
            child = self.tree.boxes[c.0].prev_sibling;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_links_siblings() {
        let mut tree = BoxTree::new();
        let root = tree.root();
        let a = tree.create_anonymous(BoxType::Block);
        let b = tree.create_anonymous(BoxType::Block);
        tree.append_child(root, a);
        tree.append_child(root, b);

        assert_eq!(tree[root].first_child, Some(a));
        assert_eq!(tree[root].last_child, Some(b));
        assert_eq!(tree[a].next_sibling, Some(b));
        assert_eq!(tree[b].prev_sibling, Some(a));
        assert_eq!(tree[b].parent, Some(root));
    }

    #[test]
    fn preorder_visits_depth_first() {
        let mut tree = BoxTree::new();
        let root = tree.root();
        let a = tree.create_anonymous(BoxType::Block);
        let a1 = tree.create_anonymous(BoxType::InlineContainer);
        let b = tree.create_anonymous(BoxType::Block);
        tree.append_child(root, a);
        tree.append_child(a, a1);
        tree.append_child(root, b);

        let order: Vec<BoxId> = tree.iter_preorder().collect();
        assert_eq!(order, vec![root, a, a1, b]);
    }

    #[test]
    fn target_keywords_parse_case_insensitively() {
        assert_eq!(FrameTarget::parse("_BLANK"), FrameTarget::Blank);
        assert_eq!(FrameTarget::parse("_top"), FrameTarget::Top);
        assert_eq!(
            FrameTarget::parse("content"),
            FrameTarget::Named(Rc::from("content"))
        );
    }
}
