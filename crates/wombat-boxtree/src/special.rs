//! Per-element conversion handlers.
//!
//! Elements with conversion behavior beyond the generic display mapping
//! are dispatched through a name-sorted table. A handler adjusts the box
//! created for its element (and may veto child conversion); returning an
//! error aborts the whole build.

use std::rc::Rc;

use crate::box_tree::{BoxId, BoxType, FrameTarget};
use crate::construct::BoxTreeBuilder;
use crate::error::BuildError;
use crate::fetch::{AcceptedTypes, ObjectParam, ObjectParams};
use crate::forms;
use crate::frameset::{self, IframeDescriptor, Scrolling};
use crate::text::squash_and_trim;
use wombat_common::url::extract_link;
use wombat_common::warning::warn_once;
use wombat_css::{ColorValue, DisplayValue, Visibility};
use wombat_dom::NodeId;

/// A handler for one element kind. `convert_children` starts `true`; a
/// handler clears it to stop the driver descending into the element's
/// children.
pub(crate) type SpecialHandler =
    fn(&mut BoxTreeBuilder<'_>, NodeId, BoxId, &mut bool) -> Result<(), BuildError>;

/// Dispatch table, sorted by element name for binary search.
const ELEMENT_TABLE: &[(&str, SpecialHandler)] = &[
    ("a", handle_anchor),
    ("body", handle_body),
    ("br", handle_br),
    ("button", forms::handle_button),
    ("embed", handle_embed),
    ("frameset", handle_frameset),
    ("iframe", handle_iframe),
    ("image", handle_image),
    ("img", handle_image),
    ("input", forms::handle_input),
    ("object", handle_object),
    ("pre", handle_pre),
    ("select", forms::handle_select),
    ("textarea", forms::handle_textarea),
];

/// Look up the handler for a (lowercased) element name.
pub(crate) fn handler_for(name: &str) -> Option<SpecialHandler> {
    ELEMENT_TABLE
        .binary_search_by(|probe| probe.0.cmp(name))
        .ok()
        .map(|index| ELEMENT_TABLE[index].1)
}

/// [§ 4.5.1 The a element](https://html.spec.whatwg.org/multipage/text-level-semantics.html#the-a-element)
///
/// Resolve the href, adopt a `name` attribute as the fragment id, and
/// parse the link target. The driver propagates href and target from this
/// box to every descendant.
fn handle_anchor(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    _convert_children: &mut bool,
) -> Result<(), BuildError> {
    let dom = builder.dom;
    if let Some(href) = dom.attr(node, "href") {
        if let Some(url) = extract_link(href, builder.ctx.base_url.as_deref()) {
            builder.tree[box_id].href = Some(Rc::from(url.as_str()));
        }
    }
    if let Some(name) = dom.attr(node, "name") {
        builder.tree[box_id].id = Some(name.to_string());
    }
    if let Some(target) = dom.attr(node, "target") {
        builder.tree[box_id].target = Some(FrameTarget::parse(target));
    }
    Ok(())
}

/// Record the document background from the body's style. A transparent
/// body keeps the viewport default.
fn handle_body(
    builder: &mut BoxTreeBuilder<'_>,
    _node: NodeId,
    box_id: BoxId,
    _convert_children: &mut bool,
) -> Result<(), BuildError> {
    if let Some(style) = builder.tree[box_id].style.clone() {
        builder.tree.background = if style.background_is_transparent() {
            None
        } else {
            style.background_color
        };
    }
    Ok(())
}

fn handle_br(
    builder: &mut BoxTreeBuilder<'_>,
    _node: NodeId,
    box_id: BoxId,
    _convert_children: &mut bool,
) -> Result<(), BuildError> {
    builder.tree[box_id].box_type = BoxType::ForcedBreak;
    Ok(())
}

/// The next preformatted text child drops one leading newline.
fn handle_pre(
    builder: &mut BoxTreeBuilder<'_>,
    _node: NodeId,
    box_id: BoxId,
    _convert_children: &mut bool,
) -> Result<(), BuildError> {
    builder.tree[box_id].strip_leading_newline = true;
    Ok(())
}

/// [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
///
/// Squash the alt text onto the box, note any image map, and start the
/// image fetch. When the style pins both dimensions, layout can size the
/// box before any data arrives.
fn handle_image(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    _convert_children: &mut bool,
) -> Result<(), BuildError> {
    let dom = builder.dom;
    let Some(style) = builder.tree[box_id].style.clone() else {
        return Ok(());
    };
    if style.display == DisplayValue::None {
        return Ok(());
    }

    if let Some(alt) = dom.attr(node, "alt") {
        builder.tree[box_id].text = Some(squash_and_trim(alt));
    }
    if let Some(usemap) = dom.attr(node, "usemap") {
        let map = usemap.strip_prefix('#').unwrap_or(usemap);
        builder.tree[box_id].usemap = Some(map.to_string());
    }

    let Some(src) = dom.attr(node, "src") else {
        return Ok(());
    };
    let Some(url) = extract_link(src, builder.ctx.base_url.as_deref()) else {
        return Ok(());
    };
    builder.start_image_fetch(&url, box_id, false)?;

    if style.width.fixed_px().is_some() && style.height.fixed_px().is_some() {
        builder.tree[box_id].replaced_dims_known = true;
    }
    Ok(())
}

/// [§ 4.8.7 The object element](https://html.spec.whatwg.org/multipage/iframe-embed-object.html#the-object-element)
///
/// Collect object parameters, vet declared MIME types, and start the
/// content fetch. Every degenerate case (no URL, self-reference, rejected
/// type) leaves the element's children to render as fallback content.
fn handle_object(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    convert_children: &mut bool,
) -> Result<(), BuildError> {
    let dom = builder.dom;
    let base = builder.ctx.base_url.clone();
    let base = base.as_deref();
    let Some(style) = builder.tree[box_id].style.clone() else {
        return Ok(());
    };
    if style.display == DisplayValue::None {
        return Ok(());
    }

    if let Some(usemap) = dom.attr(node, "usemap") {
        let map = usemap.strip_prefix('#').unwrap_or(usemap);
        builder.tree[box_id].usemap = Some(map.to_string());
    }

    let codebase = dom
        .attr(node, "codebase")
        .and_then(|value| extract_link(value, base));
    let effective_base = codebase.as_deref().or(base);
    let classid = dom
        .attr(node, "classid")
        .and_then(|value| extract_link(value, effective_base));
    let data = dom
        .attr(node, "data")
        .and_then(|value| extract_link(value, effective_base));

    if classid.is_none() && data.is_none() {
        return Ok(());
    }
    if let Some(b) = base {
        if classid.as_deref() == Some(b) || data.as_deref() == Some(b) {
            warn_once("object", "object refers to its own document; ignoring");
            return Ok(());
        }
    }

    let mut params = ObjectParams {
        data,
        classid,
        codebase,
        codetype: dom.attr(node, "codetype").map(str::to_string),
        mime_type: dom.attr(node, "type").map(str::to_string),
        params: Vec::new(),
    };

    // Vet declared types before committing to a fetch.
    if params.data.is_none() {
        if let Some(codetype) = &params.codetype {
            if !builder.fetch.supports_mime_type(codetype) {
                return Ok(());
            }
        }
    } else if let Some(mime) = &params.mime_type {
        if !builder.fetch.supports_mime_type(mime) {
            return Ok(());
        }
    }

    // <param> children come first; the first non-param element starts the
    // fallback content.
    for &child in dom.children(node) {
        match dom.element_name(child).as_deref() {
            Some("param") => {
                params.params.push(ObjectParam {
                    name: dom.attr(child, "name").map(str::to_string),
                    value: dom.attr(child, "value").map(str::to_string),
                    param_type: dom.attr(child, "type").map(str::to_string),
                    value_type: dom
                        .attr(child, "valuetype")
                        .unwrap_or("data")
                        .to_string(),
                });
            }
            Some(_) => break,
            None => {}
        }
    }

    let url = params.data.clone().or_else(|| params.classid.clone());
    builder.tree[box_id].object = Some(params);
    if let Some(url) = url {
        builder.fetch.start_fetch(
            &url,
            box_id,
            AcceptedTypes::Any,
            builder.ctx.available_width,
            1000,
            false,
        )?;
    }
    *convert_children = false;
    Ok(())
}

/// [§ 4.8.6 The embed element](https://html.spec.whatwg.org/multipage/iframe-embed-object.html#the-embed-element)
///
/// Like a generic object, but the content URL is `src` and every other
/// attribute passes through verbatim as a parameter.
fn handle_embed(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    _convert_children: &mut bool,
) -> Result<(), BuildError> {
    let dom = builder.dom;
    let base = builder.ctx.base_url.clone();
    let base = base.as_deref();
    let Some(style) = builder.tree[box_id].style.clone() else {
        return Ok(());
    };
    if style.display == DisplayValue::None {
        return Ok(());
    }

    let Some(src) = dom.attr(node, "src") else {
        return Ok(());
    };
    let Some(url) = extract_link(src, base) else {
        return Ok(());
    };
    if base == Some(url.as_str()) {
        warn_once("embed", "embed refers to its own document; ignoring");
        return Ok(());
    }

    let mut params = ObjectParams {
        data: Some(url.clone()),
        ..ObjectParams::default()
    };
    if let Some(element) = dom.as_element(node) {
        let mut attrs: Vec<(&String, &String)> = element
            .attrs
            .iter()
            .filter(|(name, _)| name.as_str() != "src")
            .collect();
        attrs.sort_by(|a, b| a.0.cmp(b.0));
        for (name, value) in attrs {
            params.params.push(ObjectParam {
                name: Some(name.clone()),
                value: Some(value.clone()),
                param_type: None,
                value_type: "data".to_string(),
            });
        }
    }
    builder.tree[box_id].object = Some(params);

    builder.fetch.start_fetch(
        &url,
        box_id,
        AcceptedTypes::Any,
        builder.ctx.available_width,
        1000,
        false,
    )?;
    Ok(())
}

/// [§ 4.8.5 The iframe element](https://html.spec.whatwg.org/multipage/iframe-embed-object.html#the-iframe-element)
///
/// Record a subwindow descriptor next to an inline-block placeholder box.
/// Hidden or unresolvable iframes produce nothing.
fn handle_iframe(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    convert_children: &mut bool,
) -> Result<(), BuildError> {
    let dom = builder.dom;
    let base = builder.ctx.base_url.clone();
    let base = base.as_deref();
    let Some(style) = builder.tree[box_id].style.clone() else {
        return Ok(());
    };
    if style.display == DisplayValue::None || style.visibility() == Visibility::Hidden {
        return Ok(());
    }

    let Some(src) = dom.attr(node, "src") else {
        return Ok(());
    };
    let Some(url) = extract_link(src, base) else {
        return Ok(());
    };
    if base == Some(url.as_str()) {
        warn_once("iframe", "iframe refers to its own document; ignoring");
        return Ok(());
    }

    let descriptor = IframeDescriptor {
        box_id,
        url,
        name: dom.attr(node, "name").map(str::to_string),
        margin_width: dom
            .attr(node, "marginwidth")
            .map_or(0, frameset::parse_int),
        margin_height: dom
            .attr(node, "marginheight")
            .map_or(0, frameset::parse_int),
        scrolling: dom
            .attr(node, "scrolling")
            .map_or(Scrolling::Auto, Scrolling::parse),
        border: dom
            .attr(node, "frameborder")
            .is_none_or(|value| frameset::parse_int(value) != 0),
        border_color: dom.attr(node, "bordercolor").and_then(ColorValue::parse),
    };
    builder.tree.iframes.push(descriptor);

    builder.tree[box_id].box_type = BoxType::InlineBlock;
    *convert_children = false;
    Ok(())
}

/// [§ 16.2.1 The frameset element](https://html.spec.whatwg.org/multipage/obsolete.html#frameset)
///
/// Capture the frame grid on the document; the element itself generates
/// no box. Only the first frameset in a document counts.
fn handle_frameset(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    convert_children: &mut bool,
) -> Result<(), BuildError> {
    if builder.tree.frameset.is_some() {
        warn_once("frameset", "multiple framesets in document; ignoring extras");
    } else {
        let grid =
            frameset::build_frame_grid(builder.dom, node, builder.ctx.base_url.as_deref());
        builder.tree.frameset = Some(grid);
    }
    builder.tree[box_id].box_type = BoxType::None;
    *convert_children = false;
    Ok(())
}
