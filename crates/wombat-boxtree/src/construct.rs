//! The box tree construction driver.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! One pre-order walk over the document tree. Each element resolves its
//! style, maps its display to a box kind, runs its special handler if it
//! has one, and joins the flow: inline-level boxes go into the open
//! anonymous inline container, block-level boxes close it. Text nodes
//! segment into the same containers.

use std::rc::Rc;

use crate::box_tree::{BoxId, BoxTree, BoxType, LinkContext};
use crate::error::BuildError;
use crate::fetch::{AcceptedTypes, FetchSubsystem};
use crate::forms::FormBinding;
use crate::special;
use crate::text::squash_and_trim;
use wombat_common::url::resolve_url;
use wombat_common::warning::clear_warnings;
use wombat_css::{
    ComputedStyle, ContentValue, DisplayValue, FloatValue, ListStyleType, MatchedStyles, Media,
    StyleEngine,
};
use wombat_dom::{DomTree, NodeId, NodeType};

/// Per-document build parameters.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Base URL every link and fetch resolves against.
    pub base_url: Option<String>,
    /// Viewport width hint passed to fetches, in pixels.
    pub available_width: u32,
}

impl BuildContext {
    /// A context with the given base URL and a default-width viewport.
    #[must_use]
    pub fn with_base(base_url: &str) -> BuildContext {
        BuildContext {
            base_url: Some(base_url.to_string()),
            available_width: 800,
        }
    }
}

/// Build the box tree for a document.
///
/// The driver walks the document once; collaborators are consulted along
/// the way. Malformed markup degrades structurally and never fails the
/// build.
///
/// # Errors
///
/// Returns [`BuildError`] when a collaborator fails or when the document
/// yields no layout root at all; the partial tree is discarded.
pub fn build_box_tree(
    dom: &DomTree,
    engine: &mut dyn StyleEngine,
    fetch: &mut dyn FetchSubsystem,
    forms: &mut dyn FormBinding,
    ctx: &BuildContext,
) -> Result<BoxTree, BuildError> {
    clear_warnings();

    let root_element = dom
        .children(NodeId::ROOT)
        .iter()
        .copied()
        .find(|&child| dom.as_element(child).is_some())
        .ok_or(BuildError::EmptyTree)?;

    let mut builder = BoxTreeBuilder {
        dom,
        engine,
        fetch,
        forms,
        ctx,
        tree: BoxTree::new(),
        pending_pre_strip: false,
    };

    let synthetic_root = builder.tree.root();
    let mut inline_container = None;
    builder.convert(
        root_element,
        None,
        synthetic_root,
        &mut inline_container,
        &LinkContext::default(),
    )?;

    let root = builder.tree[synthetic_root]
        .first_child
        .ok_or(BuildError::EmptyTree)?;
    builder.tree.set_root(root);
    Ok(builder.tree)
}

/// Mapping from computed display to box kind.
///
/// Table columns and column groups generate no boxes; captions run
/// inline; run-in falls back to inline.
fn box_type_for_display(display: DisplayValue) -> BoxType {
    match display {
        DisplayValue::Inline | DisplayValue::RunIn | DisplayValue::TableCaption => BoxType::Inline,
        DisplayValue::Block | DisplayValue::ListItem => BoxType::Block,
        DisplayValue::InlineBlock => BoxType::InlineBlock,
        DisplayValue::Table | DisplayValue::InlineTable => BoxType::Table,
        DisplayValue::TableRowGroup
        | DisplayValue::TableHeaderGroup
        | DisplayValue::TableFooterGroup => BoxType::TableRowGroup,
        DisplayValue::TableRow => BoxType::TableRow,
        DisplayValue::TableCell => BoxType::TableCell,
        DisplayValue::TableColumnGroup | DisplayValue::TableColumn | DisplayValue::None => {
            BoxType::None
        }
    }
}

/// [§ 9.7 Relationships between display, position, and float](https://www.w3.org/TR/CSS2/visuren.html#dis-pos-flo)
///
/// The root element's display blockifies.
fn blockified(display: DisplayValue) -> DisplayValue {
    match display {
        DisplayValue::Inline | DisplayValue::RunIn | DisplayValue::InlineBlock => {
            DisplayValue::Block
        }
        DisplayValue::InlineTable => DisplayValue::Table,
        other => other,
    }
}

/// State threaded through one document conversion.
pub(crate) struct BoxTreeBuilder<'a> {
    pub(crate) dom: &'a DomTree,
    pub(crate) engine: &'a mut dyn StyleEngine,
    pub(crate) fetch: &'a mut dyn FetchSubsystem,
    pub(crate) forms: &'a mut dyn FormBinding,
    pub(crate) ctx: &'a BuildContext,
    pub(crate) tree: BoxTree,
    /// Set while converting an element whose parent box had a pending
    /// preformatted newline strip; the textarea handler consumes it.
    pub(crate) pending_pre_strip: bool,
}

impl BoxTreeBuilder<'_> {
    /// Convert one document node (and its subtree) into boxes under
    /// `parent`.
    pub(crate) fn convert(
        &mut self,
        node: NodeId,
        parent_style: Option<&Rc<ComputedStyle>>,
        parent: BoxId,
        inline_container: &mut Option<BoxId>,
        link: &LinkContext,
    ) -> Result<(), BuildError> {
        let Some(dom_node) = self.dom.get(node) else {
            return Ok(());
        };
        match &dom_node.node_type {
            NodeType::Element(_) => {
                self.convert_element(node, parent_style, parent, inline_container, link)
            }
            NodeType::Text(_) => {
                // Text before any styled ancestor has nothing to inherit
                // from and is dropped.
                let Some(style) = parent_style else {
                    return Ok(());
                };
                self.convert_text(node, style, parent, inline_container, link)
            }
            _ => Ok(()),
        }
    }

    fn convert_element(
        &mut self,
        node: NodeId,
        parent_style: Option<&Rc<ComputedStyle>>,
        parent: BoxId,
        inline_container: &mut Option<BoxId>,
        link: &LinkContext,
    ) -> Result<(), BuildError> {
        let dom = self.dom;

        // A tag directly after a <pre> open cancels the newline strip;
        // only the textarea handler still honors it.
        let pre_strip = self.tree[parent].strip_leading_newline;
        self.tree[parent].strip_leading_newline = false;
        self.pending_pre_strip = pre_strip;

        let styles = self.styles_for_node(node, parent_style)?;
        let primary = Rc::new(styles.primary);

        let mut link = link.clone();
        if let Some(title) = dom.attr(node, "title") {
            link.title = Some(Rc::from(squash_and_trim(title).as_str()));
        }
        let id = dom.attr(node, "id").map(str::to_string);

        let box_id = self
            .tree
            .create_box(BoxType::Inline, Some(primary.clone()), &link, id.clone());

        // The root element's display blockifies; out-of-flow inline-level
        // boxes promote to inline-block.
        let display = primary.display;
        let is_root = dom
            .parent(node)
            .and_then(|p| dom.get(p))
            .is_none_or(|p| matches!(p.node_type, NodeType::Document));
        let promoted = primary.position.is_out_of_flow()
            && matches!(
                display,
                DisplayValue::Inline | DisplayValue::InlineBlock | DisplayValue::InlineTable
            );
        let effective_display = if is_root { blockified(display) } else { display };
        self.tree[box_id].box_type = if promoted {
            BoxType::InlineBlock
        } else {
            box_type_for_display(effective_display)
        };

        if self.tree[box_id].box_type == BoxType::Block {
            self.generate_pseudo(box_id, styles.before.as_ref(), &link);
        }

        let mut convert_children = true;
        if let Some(name) = dom.element_name(node) {
            if let Some(handler) = special::handler_for(&name) {
                handler(self, node, box_id, &mut convert_children)?;
            }
        }
        // Anchors rewrite these on their box; everything below inherits.
        link.href = self.tree[box_id].href.clone();
        link.target = self.tree[box_id].target.clone();

        // No box: drop the style and undo any control binding, but the
        // element itself was still converted successfully.
        if self.tree[box_id].box_type == BoxType::None || display == DisplayValue::None {
            self.tree[box_id].style = None;
            if let Some(control) = self.tree[box_id].gadget.take() {
                self.forms.unbind_box(control);
            }
            return Ok(());
        }

        if self.tree[box_id].box_type == BoxType::TableCell {
            self.apply_cell_spans(node, box_id);
        }

        if let Some(image) = primary.background_image.clone() {
            let url = resolve_url(&image, self.ctx.base_url.as_deref());
            self.start_image_fetch(&url, box_id, true)?;
        }

        let box_type = self.tree[box_id].box_type;
        let floated = primary.float.is_floated();
        let inline_level = matches!(
            box_type,
            BoxType::Inline | BoxType::ForcedBreak | BoxType::InlineBlock
        );

        let container = if inline_level || floated {
            Some(self.ensure_inline_container(parent, inline_container))
        } else {
            None
        };

        match box_type {
            BoxType::Inline | BoxType::ForcedBreak => {
                if let Some(container) = container {
                    self.tree.append_child(container, box_id);
                }
                if convert_children && dom.first_child(node).is_some() {
                    // Children run in the same inline container; the
                    // enclosing block stays the structural parent.
                    for &child in dom.children(node) {
                        self.convert(child, Some(&primary), parent, inline_container, &link)?;
                    }
                    let end = self
                        .tree
                        .create_box(BoxType::InlineEnd, Some(primary.clone()), &link, id);
                    let attach = inline_container
                        .unwrap_or_else(|| self.tree[box_id].parent.unwrap_or(parent));
                    self.tree.append_child(attach, end);
                    self.tree[box_id].inline_end = Some(end);
                    self.tree[end].inline_end = Some(box_id);
                }
            }
            BoxType::InlineBlock => {
                if let Some(container) = container {
                    self.tree.append_child(container, box_id);
                }
                if convert_children {
                    let mut child_container = None;
                    for &child in dom.children(node) {
                        self.convert(child, Some(&primary), box_id, &mut child_container, &link)?;
                    }
                }
            }
            _ => {
                if effective_display == DisplayValue::ListItem {
                    self.attach_list_marker(box_id, &primary, parent, &link)?;
                }
                let attach_parent = if floated {
                    let wrapper = self.tree.create_box(
                        if primary.float == FloatValue::Left {
                            BoxType::FloatLeft
                        } else {
                            BoxType::FloatRight
                        },
                        None,
                        &link,
                        None,
                    );
                    if let Some(container) = container {
                        self.tree.append_child(container, wrapper);
                    }
                    wrapper
                } else {
                    parent
                };
                self.tree.append_child(attach_parent, box_id);
                if convert_children {
                    let mut child_container = None;
                    for &child in dom.children(node) {
                        self.convert(child, Some(&primary), box_id, &mut child_container, &link)?;
                    }
                }
                // A non-floated block interrupts the surrounding inline
                // flow; floats live inside it and leave it open.
                if !floated {
                    *inline_container = None;
                }
            }
        }

        if self.tree[box_id].box_type == BoxType::Block {
            self.generate_pseudo(box_id, styles.after.as_ref(), &link);
        }
        Ok(())
    }

    /// Select and complete the styles for a node: the primary style
    /// composes against the parent, pseudo styles against the primary.
    fn styles_for_node(
        &mut self,
        node: NodeId,
        parent_style: Option<&Rc<ComputedStyle>>,
    ) -> Result<MatchedStyles, BuildError> {
        let inline_style = self.dom.attr(node, "style");
        let mut styles = self
            .engine
            .select_style(self.dom, node, Media::Screen, inline_style)?;
        if let Some(parent_style) = parent_style {
            self.engine.compose_style(parent_style, &mut styles.primary)?;
        }
        let MatchedStyles {
            primary,
            before,
            after,
            ..
        } = &mut styles;
        if let Some(before) = before {
            self.engine.compose_style(primary, before)?;
        }
        if let Some(after) = after {
            self.engine.compose_style(primary, after)?;
        }
        Ok(styles)
    }

    /// Materialize a `::before`/`::after` pseudo box.
    ///
    /// Only block-display pseudo-elements with non-`normal` content become
    /// boxes, and they stay empty (enough for presentational clearing
    /// idioms; textual generated content is not rendered).
    fn generate_pseudo(
        &mut self,
        owner: BoxId,
        pseudo_style: Option<&ComputedStyle>,
        link: &LinkContext,
    ) {
        let Some(style) = pseudo_style else {
            return;
        };
        if matches!(style.content, ContentValue::Normal) {
            return;
        }
        if style.display != DisplayValue::Block {
            return;
        }
        let style = Rc::new(style.clone());
        let pseudo = self
            .tree
            .create_box(BoxType::Block, Some(style), link, None);
        self.tree.append_child(owner, pseudo);
    }

    /// [§ 12.5.1 Lists](https://www.w3.org/TR/CSS2/generate.html#lists)
    ///
    /// Attach a marker box to a list item. Ordered markers continue the
    /// count of the nearest previous marker, found by walking the
    /// last-descendant chain of the preceding sibling.
    fn attach_list_marker(
        &mut self,
        item: BoxId,
        style: &Rc<ComputedStyle>,
        parent: BoxId,
        link: &LinkContext,
    ) -> Result<(), BuildError> {
        let marker = self
            .tree
            .create_box(BoxType::Block, Some(style.clone()), link, None);

        match style.list_style_type() {
            ListStyleType::Disc => self.tree[marker].text = Some("\u{2022}".to_string()),
            ListStyleType::Circle => self.tree[marker].text = Some("\u{25CB}".to_string()),
            ListStyleType::Square => self.tree[marker].text = Some("\u{25AA}".to_string()),
            ListStyleType::None => self.tree[marker].text = Some(String::new()),
            // Alphabetic and roman markers render their decimal ordinal
            // until the front end learns the other numbering systems.
            _ => {
                let mut ordinal = 1;
                let mut cursor = self.tree[parent].last_child;
                while let Some(current) = cursor {
                    if let Some(prev_marker) = self.tree[current].list_marker {
                        ordinal = self.tree[prev_marker].marker_ordinal + 1;
                        break;
                    }
                    cursor = self.tree[current].last_child;
                }
                self.tree[marker].marker_ordinal = ordinal;
                self.tree[marker].text = Some(format!("{ordinal}."));
            }
        }

        if let Some(image) = style.list_style_image.clone() {
            let url = resolve_url(&image, self.ctx.base_url.as_deref());
            self.start_image_fetch(&url, marker, false)?;
        }

        self.tree[marker].parent = Some(item);
        self.tree[item].list_marker = Some(marker);
        Ok(())
    }

    /// Record `colspan`/`rowspan` on a table cell box. Only leading-digit
    /// values count, clamped to a sane span.
    fn apply_cell_spans(&mut self, node: NodeId, box_id: BoxId) {
        if let Some(value) = self.dom.attr(node, "colspan") {
            if let Some(span) = parse_span(value) {
                self.tree[box_id].columns = span;
            }
        }
        if let Some(value) = self.dom.attr(node, "rowspan") {
            if let Some(span) = parse_span(value) {
                self.tree[box_id].rows = span;
            }
        }
    }

    /// The open inline container under `parent`, creating one if needed.
    pub(crate) fn ensure_inline_container(
        &mut self,
        parent: BoxId,
        inline_container: &mut Option<BoxId>,
    ) -> BoxId {
        if let Some(container) = *inline_container {
            return container;
        }
        let container = self.tree.create_anonymous(BoxType::InlineContainer);
        self.tree.append_child(parent, container);
        *inline_container = Some(container);
        container
    }

    /// Start an image fetch on behalf of a box.
    pub(crate) fn start_image_fetch(
        &mut self,
        url: &str,
        owner: BoxId,
        background: bool,
    ) -> Result<(), BuildError> {
        self.fetch.start_fetch(
            url,
            owner,
            AcceptedTypes::Image,
            self.ctx.available_width,
            1000,
            background,
        )?;
        Ok(())
    }
}

/// Parse a span attribute: leading digits only, 1 to 1000.
fn parse_span(value: &str) -> Option<u32> {
    let s = value.trim();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let span: u32 = s[..end].parse().ok()?;
    if span == 0 { None } else { Some(span.min(1000)) }
}
