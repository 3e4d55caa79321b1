//! End-to-end box construction tests: document tree in, box tree out.

use wombat_boxtree::{
    AcceptedTypes, BoxId, BoxTree, BoxType, BuildContext, BuildError, FetchError, FetchSubsystem,
    FrameTarget, FrameUnit, MemoryFormBinding, build_box_tree,
};
use wombat_css::{
    ComputedStyle, ContentValue, DefaultStyleEngine, DisplayValue, MatchedStyles, Media,
    StyleEngine, StyleError,
};
use wombat_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

const BASE: &str = "https://example.com/dir/index.html";

/// Fetch stub that records every started fetch.
#[derive(Default)]
struct RecordingFetch {
    fetches: Vec<(String, AcceptedTypes, bool)>,
    rejected_types: Vec<String>,
}

impl FetchSubsystem for RecordingFetch {
    fn start_fetch(
        &mut self,
        url: &str,
        _owner: BoxId,
        accept: AcceptedTypes,
        _available_width: u32,
        _available_height: u32,
        background: bool,
    ) -> Result<(), FetchError> {
        self.fetches.push((url.to_string(), accept, background));
        Ok(())
    }

    fn supports_mime_type(&self, mime: &str) -> bool {
        !self.rejected_types.iter().any(|m| m == mime)
    }
}

fn element(dom: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let mut map = AttributesMap::new();
    for (name, value) in attrs {
        let _ = map.insert((*name).to_string(), (*value).to_string());
    }
    let id = dom.alloc(NodeType::Element(ElementData {
        tag_name: tag.to_string(),
        attrs: map,
    }));
    dom.append_child(parent, id);
    id
}

fn text(dom: &mut DomTree, parent: NodeId, content: &str) -> NodeId {
    let id = dom.alloc(NodeType::Text(content.to_string()));
    dom.append_child(parent, id);
    id
}

/// A document skeleton: `<html><body>`.
fn doc() -> (DomTree, NodeId) {
    let mut dom = DomTree::new();
    let html = element(&mut dom, NodeId::ROOT, "html", &[]);
    let body = element(&mut dom, html, "body", &[]);
    (dom, body)
}

fn build(dom: &DomTree) -> Result<(BoxTree, RecordingFetch), BuildError> {
    build_with_fetch(dom, RecordingFetch::default())
}

fn build_with_fetch(
    dom: &DomTree,
    mut fetch: RecordingFetch,
) -> Result<(BoxTree, RecordingFetch), BuildError> {
    let mut engine = DefaultStyleEngine::new();
    let mut forms = MemoryFormBinding::new();
    let ctx = BuildContext::with_base(BASE);
    let tree = build_box_tree(dom, &mut engine, &mut fetch, &mut forms, &ctx)?;
    Ok((tree, fetch))
}

fn children(tree: &BoxTree, id: BoxId) -> Vec<BoxId> {
    tree.children(id).collect()
}

/// The single `<body>` box under the root.
fn body_box(tree: &BoxTree) -> BoxId {
    let root_children = children(tree, tree.root());
    assert_eq!(root_children.len(), 1);
    root_children[0]
}

/// Structural fingerprint for comparing independent builds.
fn shape(tree: &BoxTree) -> Vec<(BoxType, Option<String>)> {
    tree.iter_preorder()
        .map(|id| (tree[id].box_type, tree[id].text.clone()))
        .collect()
}

#[test]
fn inline_content_groups_under_inline_containers() {
    let (mut dom, body) = doc();
    let _ = text(&mut dom, body, "a");
    let span = element(&mut dom, body, "span", &[]);
    let _ = text(&mut dom, span, "b");
    let div = element(&mut dom, body, "div", &[]);
    let _ = text(&mut dom, div, "c");
    let _ = text(&mut dom, body, "d");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let body_children = children(&tree, body);
    assert_eq!(body_children.len(), 3);

    // First run of inline content: text, the span, its text, the closing
    // sentinel.
    let first = body_children[0];
    assert_eq!(tree[first].box_type, BoxType::InlineContainer);
    let inline_run = children(&tree, first);
    let kinds: Vec<BoxType> = inline_run.iter().map(|&b| tree[b].box_type).collect();
    assert_eq!(
        kinds,
        vec![
            BoxType::Text,
            BoxType::Inline,
            BoxType::Text,
            BoxType::InlineEnd
        ]
    );
    // Inline and sentinel point at each other.
    assert_eq!(tree[inline_run[1]].inline_end, Some(inline_run[3]));
    assert_eq!(tree[inline_run[3]].inline_end, Some(inline_run[1]));

    // The div interrupts the flow; trailing text opens a fresh container.
    assert_eq!(tree[body_children[1]].box_type, BoxType::Block);
    assert_eq!(tree[body_children[2]].box_type, BoxType::InlineContainer);
    let last_run = children(&tree, body_children[2]);
    assert_eq!(tree[last_run[0]].text.as_deref(), Some("d"));
}

#[test]
fn whitespace_collapses_into_trailing_space_flags() {
    let (mut dom, body) = doc();
    let _ = text(&mut dom, body, "  hi   there ");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let container = children(&tree, body)[0];
    let text_box = children(&tree, container)[0];
    assert_eq!(tree[text_box].text.as_deref(), Some("hi there"));
    assert!(tree[text_box].has_trailing_space);
}

#[test]
fn whitespace_only_text_marks_previous_box() {
    let (mut dom, body) = doc();
    let span_a = element(&mut dom, body, "span", &[]);
    let _ = text(&mut dom, span_a, "a");
    let _ = text(&mut dom, body, "   ");
    let span_b = element(&mut dom, body, "span", &[]);
    let _ = text(&mut dom, span_b, "b");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let container = children(&tree, body)[0];
    let run = children(&tree, container);
    // The whitespace-only node produced no box, only a flag on the box
    // before it (span a's closing sentinel).
    assert_eq!(tree[run[2]].box_type, BoxType::InlineEnd);
    assert!(tree[run[2]].has_trailing_space);
    assert_eq!(tree[run[3]].box_type, BoxType::Inline);
}

#[test]
fn preformatted_text_splits_per_line() {
    let (mut dom, body) = doc();
    let pre = element(&mut dom, body, "pre", &[("style", "white-space: pre")]);
    let _ = text(&mut dom, pre, "\nfirst  x\nsecond");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let pre_box = children(&tree, body)[0];
    let container = children(&tree, pre_box)[0];
    let lines = children(&tree, container);
    // The newline right after <pre> is stripped; spaces harden to NBSP;
    // the bare newline keeps both lines in one container.
    assert_eq!(lines.len(), 2);
    assert_eq!(
        tree[lines[0]].text.as_deref(),
        Some("first\u{a0}\u{a0}x")
    );
    assert_eq!(tree[lines[1]].text.as_deref(), Some("second"));
}

#[test]
fn crlf_line_ending_closes_the_container() {
    let (mut dom, body) = doc();
    let pre = element(&mut dom, body, "div", &[("style", "white-space: pre")]);
    let _ = text(&mut dom, pre, "a\r\nb");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let pre_box = children(&tree, body)[0];
    let containers = children(&tree, pre_box);
    assert_eq!(containers.len(), 2);
    assert_eq!(
        tree[children(&tree, containers[0])[0]].text.as_deref(),
        Some("a")
    );
    assert_eq!(
        tree[children(&tree, containers[1])[0]].text.as_deref(),
        Some("b")
    );
}

#[test]
fn anchor_link_flows_to_descendant_text() {
    let (mut dom, body) = doc();
    let a = element(
        &mut dom,
        body,
        "a",
        &[
            ("href", " pa ge.html "),
            ("target", "_BLANK"),
            ("name", "top"),
        ],
    );
    let _ = text(&mut dom, a, "go");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let run = children(&tree, children(&tree, body)[0]);
    let anchor = run[0];
    let label = run[1];
    assert_eq!(tree[anchor].id.as_deref(), Some("top"));
    assert_eq!(
        tree[label].href.as_deref(),
        Some("https://example.com/dir/pa%20ge.html")
    );
    assert_eq!(tree[label].target, Some(FrameTarget::Blank));
}

#[test]
fn unquoted_javascript_href_is_dropped() {
    let (mut dom, body) = doc();
    let a = element(&mut dom, body, "a", &[("href", "javascript:void(0)")]);
    let _ = text(&mut dom, a, "x");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let run = children(&tree, children(&tree, body)[0]);
    assert_eq!(tree[run[0]].href, None);
}

#[test]
fn image_squashes_alt_and_starts_fetch() {
    let (mut dom, body) = doc();
    let _ = element(
        &mut dom,
        body,
        "img",
        &[
            ("src", "pic.png"),
            ("alt", "  hi   there "),
            ("style", "width: 10px; height: 20px"),
        ],
    );

    let (tree, fetch) = build(&dom).unwrap();
    let body = body_box(&tree);
    let img = children(&tree, children(&tree, body)[0])[0];
    assert_eq!(tree[img].text.as_deref(), Some("hi there"));
    assert!(tree[img].replaced_dims_known);
    assert_eq!(
        fetch.fetches,
        vec![(
            "https://example.com/dir/pic.png".to_string(),
            AcceptedTypes::Image,
            false
        )]
    );
}

#[test]
fn display_none_subtree_is_skipped() {
    let (mut dom, body) = doc();
    let hidden = element(&mut dom, body, "div", &[("style", "display: none")]);
    let _ = text(&mut dom, hidden, "invisible");
    let img = element(&mut dom, hidden, "img", &[("src", "pic.png")]);
    let _ = img;

    let (tree, fetch) = build(&dom).unwrap();
    let body = body_box(&tree);
    assert!(children(&tree, body).is_empty());
    assert!(fetch.fetches.is_empty());
}

#[test]
fn absolute_inline_promotes_to_inline_block() {
    let (mut dom, body) = doc();
    let span = element(&mut dom, body, "span", &[("style", "position: absolute")]);
    let _ = text(&mut dom, span, "x");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let promoted = children(&tree, children(&tree, body)[0])[0];
    assert_eq!(tree[promoted].box_type, BoxType::InlineBlock);
    // Its content lives in its own container, not the outer one.
    let inner = children(&tree, promoted)[0];
    assert_eq!(tree[inner].box_type, BoxType::InlineContainer);
}

#[test]
fn floated_block_wraps_and_keeps_flow_open() {
    let (mut dom, body) = doc();
    let _ = text(&mut dom, body, "before");
    let float = element(&mut dom, body, "div", &[("style", "float: left")]);
    let _ = text(&mut dom, float, "f");
    let _ = text(&mut dom, body, "after");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let body_children = children(&tree, body);
    // One container holds everything: the float did not close the flow.
    assert_eq!(body_children.len(), 1);
    let run = children(&tree, body_children[0]);
    assert_eq!(tree[run[0]].text.as_deref(), Some("before"));
    assert_eq!(tree[run[1]].box_type, BoxType::FloatLeft);
    assert_eq!(tree[run[2]].text.as_deref(), Some("after"));
    let float_box = children(&tree, run[1])[0];
    assert_eq!(tree[float_box].box_type, BoxType::Block);
}

#[test]
fn ordered_list_markers_count_up() {
    let (mut dom, body) = doc();
    let ol = element(&mut dom, body, "ol", &[("style", "list-style-type: decimal")]);
    for label in ["one", "two", "three"] {
        let li = element(&mut dom, ol, "li", &[]);
        let _ = text(&mut dom, li, label);
    }

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let ol_box = children(&tree, body)[0];
    let items = children(&tree, ol_box);
    assert_eq!(items.len(), 3);
    let marker_texts: Vec<String> = items
        .iter()
        .map(|&item| {
            let marker = tree[item].list_marker.unwrap();
            tree[marker].text.clone().unwrap()
        })
        .collect();
    assert_eq!(marker_texts, vec!["1.", "2.", "3."]);
}

#[test]
fn unordered_list_markers_use_bullets() {
    let (mut dom, body) = doc();
    let ul = element(&mut dom, body, "ul", &[("style", "list-style-type: disc")]);
    let li = element(&mut dom, ul, "li", &[]);
    let _ = text(&mut dom, li, "x");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let li_box = children(&tree, children(&tree, body)[0])[0];
    let marker = tree[li_box].list_marker.unwrap();
    assert_eq!(tree[marker].text.as_deref(), Some("\u{2022}"));
    assert_eq!(tree[marker].parent, Some(li_box));
}

#[test]
fn body_background_color_recorded() {
    let mut dom = DomTree::new();
    let html = element(&mut dom, NodeId::ROOT, "html", &[]);
    let _ = element(
        &mut dom,
        html,
        "body",
        &[("style", "background-color: #ff0000")],
    );

    let (tree, _) = build(&dom).unwrap();
    let background = tree.background.unwrap();
    assert_eq!((background.r, background.g, background.b), (255, 0, 0));
}

#[test]
fn transparent_body_keeps_default_background() {
    let (dom, _) = doc();
    let (tree, _) = build(&dom).unwrap();
    assert!(tree.background.is_none());
}

#[test]
fn hidden_input_produces_no_box() {
    let (mut dom, body) = doc();
    let _ = element(&mut dom, body, "input", &[("type", "hidden")]);

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    assert!(children(&tree, body).is_empty());
}

#[test]
fn password_input_masks_its_value() {
    let (mut dom, body) = doc();
    let _ = element(
        &mut dom,
        body,
        "input",
        &[("type", "password"), ("value", "secret")],
    );

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let input = children(&tree, children(&tree, body)[0])[0];
    assert_eq!(tree[input].box_type, BoxType::InlineBlock);
    let label = children(&tree, children(&tree, input)[0])[0];
    assert_eq!(tree[label].text.as_deref(), Some("******"));
}

#[test]
fn submit_input_defaults_its_label() {
    let (mut dom, body) = doc();
    let _ = element(&mut dom, body, "input", &[("type", "submit")]);

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let input = children(&tree, children(&tree, body)[0])[0];
    let label = children(&tree, children(&tree, input)[0])[0];
    assert_eq!(tree[label].text.as_deref(), Some("Submit"));
}

#[test]
fn select_shows_first_option_when_none_selected() {
    let (mut dom, body) = doc();
    let select = element(&mut dom, body, "select", &[]);
    let alpha = element(&mut dom, select, "option", &[]);
    let _ = text(&mut dom, alpha, " Alpha  one ");
    let beta = element(&mut dom, select, "option", &[]);
    let _ = text(&mut dom, beta, "Beta");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let select_box = children(&tree, children(&tree, body)[0])[0];
    assert!(tree[select_box].gadget.is_some());
    let label = children(&tree, children(&tree, select_box)[0])[0];
    assert_eq!(tree[label].text.as_deref(), Some("Alpha one"));
}

#[test]
fn select_with_multiple_selection_shows_placeholder() {
    let (mut dom, body) = doc();
    let select = element(&mut dom, body, "select", &[("multiple", "")]);
    for label in ["a", "b"] {
        let option = element(&mut dom, select, "option", &[("selected", "")]);
        let _ = text(&mut dom, option, label);
    }

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let select_box = children(&tree, children(&tree, body)[0])[0];
    let label = children(&tree, children(&tree, select_box)[0])[0];
    assert_eq!(tree[label].text.as_deref(), Some("(multiple)"));
}

#[test]
fn select_without_options_is_omitted() {
    let (mut dom, body) = doc();
    let _ = element(&mut dom, body, "select", &[]);

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    assert!(children(&tree, body).is_empty());
}

#[test]
fn textarea_alternates_text_and_breaks() {
    let (mut dom, body) = doc();
    let textarea = element(&mut dom, body, "textarea", &[]);
    let _ = text(&mut dom, textarea, "line1\nline2\n\nline4");

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let ta = children(&tree, children(&tree, body)[0])[0];
    let run = children(&tree, children(&tree, ta)[0]);
    let kinds: Vec<BoxType> = run.iter().map(|&b| tree[b].box_type).collect();
    assert_eq!(
        kinds,
        vec![
            BoxType::Text,
            BoxType::ForcedBreak,
            BoxType::Text,
            BoxType::ForcedBreak,
            BoxType::Text,
            BoxType::ForcedBreak,
            BoxType::Text
        ]
    );
    assert_eq!(tree[run[4]].text.as_deref(), Some(""));
    assert_eq!(tree[run[6]].text.as_deref(), Some("line4"));
}

#[test]
fn frameset_is_captured_and_first_wins() {
    let mut dom = DomTree::new();
    let html = element(&mut dom, NodeId::ROOT, "html", &[]);
    let outer = element(&mut dom, html, "frameset", &[("rows", "50%,*")]);
    let _ = element(&mut dom, outer, "frame", &[("src", "top.html"), ("name", "top")]);
    let _ = element(&mut dom, outer, "frame", &[("src", "bottom.html")]);
    let _ = element(&mut dom, html, "frameset", &[("rows", "10%,90%")]);

    let (tree, _) = build(&dom).unwrap();
    let grid = tree.frameset.unwrap();
    assert_eq!(grid.rows.len(), 2);
    assert_eq!(grid.cols.len(), 1);
    assert_eq!(grid.rows[0].value, 50.0);
    assert_eq!(grid.rows[0].unit, FrameUnit::Percent);
    assert_eq!(grid.rows[1].unit, FrameUnit::Relative);

    let top = grid.frame(0, 0).unwrap();
    assert_eq!(top.url.as_deref(), Some("https://example.com/dir/top.html"));
    assert_eq!(top.name.as_deref(), Some("top"));
}

#[test]
fn iframe_records_descriptor_with_placeholder_box() {
    let (mut dom, body) = doc();
    let _ = element(
        &mut dom,
        body,
        "iframe",
        &[("src", "sub.html"), ("name", "sub"), ("scrolling", "no")],
    );

    let (tree, _) = build(&dom).unwrap();
    assert_eq!(tree.iframes.len(), 1);
    let descriptor = &tree.iframes[0];
    assert_eq!(descriptor.url, "https://example.com/dir/sub.html");
    assert_eq!(descriptor.name.as_deref(), Some("sub"));
    assert_eq!(tree[descriptor.box_id].box_type, BoxType::InlineBlock);
}

#[test]
fn hidden_iframe_records_nothing() {
    let (mut dom, body) = doc();
    let _ = element(
        &mut dom,
        body,
        "iframe",
        &[("src", "sub.html"), ("style", "visibility: hidden")],
    );

    let (tree, _) = build(&dom).unwrap();
    assert!(tree.iframes.is_empty());
}

#[test]
fn object_collects_params_and_fetches() {
    let (mut dom, body) = doc();
    let object = element(
        &mut dom,
        body,
        "object",
        &[("data", "movie.bin"), ("type", "application/x-movie")],
    );
    let _ = element(
        &mut dom,
        object,
        "param",
        &[("name", "loop"), ("value", "true")],
    );
    let fallback = element(&mut dom, object, "span", &[]);
    let _ = text(&mut dom, fallback, "no plugin");

    let (tree, fetch) = build(&dom).unwrap();
    let body = body_box(&tree);
    let object_box = children(&tree, children(&tree, body)[0])[0];
    let params = tree[object_box].object.as_ref().unwrap();
    assert_eq!(
        params.data.as_deref(),
        Some("https://example.com/dir/movie.bin")
    );
    assert_eq!(params.params.len(), 1);
    assert_eq!(params.params[0].name.as_deref(), Some("loop"));
    assert_eq!(params.params[0].value_type, "data");
    // Fallback content was suppressed.
    assert!(children(&tree, object_box).is_empty());
    assert_eq!(fetch.fetches.len(), 1);
    assert_eq!(fetch.fetches[0].1, AcceptedTypes::Any);
}

#[test]
fn object_with_rejected_type_falls_back_to_children() {
    let (mut dom, body) = doc();
    let object = element(
        &mut dom,
        body,
        "object",
        &[("data", "movie.bin"), ("type", "application/x-bad")],
    );
    let fallback = element(&mut dom, object, "span", &[]);
    let _ = text(&mut dom, fallback, "no plugin");

    let fetch = RecordingFetch {
        rejected_types: vec!["application/x-bad".to_string()],
        ..RecordingFetch::default()
    };
    let (tree, fetch) = build_with_fetch(&dom, fetch).unwrap();
    let body = body_box(&tree);
    let object_box = children(&tree, children(&tree, body)[0])[0];
    assert!(tree[object_box].object.is_none());
    assert!(fetch.fetches.is_empty());
    // Fallback children rendered inside the object box.
    assert!(!children(&tree, object_box).is_empty());
}

#[test]
fn object_pointing_at_own_document_is_ignored() {
    let (mut dom, body) = doc();
    let _ = element(&mut dom, body, "object", &[("data", BASE)]);

    let (tree, fetch) = build(&dom).unwrap();
    let body = body_box(&tree);
    let object_box = children(&tree, children(&tree, body)[0])[0];
    assert!(tree[object_box].object.is_none());
    assert!(fetch.fetches.is_empty());
}

#[test]
fn table_cell_records_spans() {
    let (mut dom, body) = doc();
    let table = element(&mut dom, body, "table", &[]);
    let row = element(&mut dom, table, "tr", &[]);
    let _ = element(&mut dom, row, "td", &[("colspan", "3"), ("rowspan", "2")]);

    let (tree, _) = build(&dom).unwrap();
    let body = body_box(&tree);
    let table_box = children(&tree, body)[0];
    assert_eq!(tree[table_box].box_type, BoxType::Table);
    let row_box = children(&tree, table_box)[0];
    let cell = children(&tree, row_box)[0];
    assert_eq!(tree[cell].box_type, BoxType::TableCell);
    assert_eq!(tree[cell].columns, 3);
    assert_eq!(tree[cell].rows, 2);
}

#[test]
fn root_display_none_fails_with_empty_tree() {
    let mut dom = DomTree::new();
    let _ = element(&mut dom, NodeId::ROOT, "html", &[("style", "display: none")]);

    let mut engine = DefaultStyleEngine::new();
    let mut fetch = RecordingFetch::default();
    let mut forms = MemoryFormBinding::new();
    let ctx = BuildContext::with_base(BASE);
    let result = build_box_tree(&dom, &mut engine, &mut fetch, &mut forms, &ctx);
    assert!(matches!(result, Err(BuildError::EmptyTree)));
}

#[test]
fn empty_document_fails_with_empty_tree() {
    let dom = DomTree::new();
    let mut engine = DefaultStyleEngine::new();
    let mut fetch = RecordingFetch::default();
    let mut forms = MemoryFormBinding::new();
    let ctx = BuildContext::default();
    let result = build_box_tree(&dom, &mut engine, &mut fetch, &mut forms, &ctx);
    assert!(matches!(result, Err(BuildError::EmptyTree)));
}

/// Engine stub that matches a `::before` rule on `class="cleared"`.
struct ClearfixEngine(DefaultStyleEngine);

impl StyleEngine for ClearfixEngine {
    fn select_style(
        &mut self,
        dom: &DomTree,
        node: NodeId,
        media: Media,
        inline_style: Option<&str>,
    ) -> Result<MatchedStyles, StyleError> {
        let mut matched = self.0.select_style(dom, node, media, inline_style)?;
        if dom.attr(node, "class") == Some("cleared") {
            let mut before = ComputedStyle::default();
            before.display = DisplayValue::Block;
            before.content = ContentValue::Text(String::new());
            matched.before = Some(before);
        }
        Ok(matched)
    }

    fn compose_style(
        &self,
        base: &ComputedStyle,
        overlay: &mut ComputedStyle,
    ) -> Result<(), StyleError> {
        self.0.compose_style(base, overlay)
    }
}

#[test]
fn block_pseudo_materializes_as_empty_block() {
    let (mut dom, body) = doc();
    let div = element(&mut dom, body, "div", &[("class", "cleared")]);
    let _ = text(&mut dom, div, "x");

    let mut engine = ClearfixEngine(DefaultStyleEngine::new());
    let mut fetch = RecordingFetch::default();
    let mut forms = MemoryFormBinding::new();
    let ctx = BuildContext::with_base(BASE);
    let tree = build_box_tree(&dom, &mut engine, &mut fetch, &mut forms, &ctx).unwrap();

    let body = body_box(&tree);
    let div_box = children(&tree, body)[0];
    let div_children = children(&tree, div_box);
    assert_eq!(div_children.len(), 2);
    // The generated box comes first, carries the pseudo style, stays
    // empty.
    assert_eq!(tree[div_children[0]].box_type, BoxType::Block);
    assert!(tree[div_children[0]].style.is_some());
    assert!(children(&tree, div_children[0]).is_empty());
    assert_eq!(tree[div_children[1]].box_type, BoxType::InlineContainer);
}

#[test]
fn rebuilding_the_same_document_gives_the_same_shape() {
    let (mut dom, body) = doc();
    let _ = text(&mut dom, body, "a ");
    let span = element(&mut dom, body, "span", &[]);
    let _ = text(&mut dom, span, "b");
    let div = element(&mut dom, body, "div", &[("style", "float: right")]);
    let _ = text(&mut dom, div, "c");
    let ol = element(&mut dom, body, "ol", &[]);
    let li = element(&mut dom, ol, "li", &[]);
    let _ = text(&mut dom, li, "item");

    let (first, _) = build(&dom).unwrap();
    let (second, _) = build(&dom).unwrap();
    assert_eq!(shape(&first), shape(&second));
}
