//! Form-control binding and form element conversion.
//!
//! [§ 4.10 Forms](https://html.spec.whatwg.org/multipage/forms.html)
//!
//! Form semantics (values, submission, selection state) live in an
//! external binding; box construction only asks it for the control behind
//! a node, registers `<option>` entries, and ties controls to the boxes
//! that render them.

use std::collections::HashMap;

use thiserror::Error;

use crate::box_tree::{BoxId, BoxType, LinkContext};
use crate::construct::BoxTreeBuilder;
use crate::error::BuildError;
use crate::text::{spaces_to_nbsp, squash_and_trim};
use wombat_common::url::resolve_url;
use wombat_css::DisplayValue;
use wombat_dom::{DomTree, NodeId};

/// Opaque reference to a form control owned by the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlHandle(pub usize);

/// Failure inside the form binding.
#[derive(Debug, Error)]
pub enum FormError {
    /// The binding has no control for a form element node. The binding is
    /// built from the same document, so this means it is out of sync.
    #[error("no form control bound to node")]
    MissingControl,

    /// Registering a select option failed.
    #[error("failed to register select option: {0}")]
    RegisterOption(String),
}

/// Snapshot of a select control's state after its options are registered.
#[derive(Debug, Clone, Default)]
pub struct SelectSummary {
    /// Number of registered options.
    pub option_count: usize,
    /// Number of currently selected options.
    pub selected_count: usize,
    /// Label of the selected option when exactly one is selected.
    pub current_label: Option<String>,
    /// Whether the control allows multiple selection.
    pub multiple: bool,
}

/// The form-binding contract.
pub trait FormBinding {
    /// The control behind a form element node, if the binding knows one.
    fn control_for_node(&mut self, dom: &DomTree, node: NodeId) -> Option<ControlHandle>;

    /// Register one `<option>` under a select control.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::RegisterOption`] on failure; box construction
    /// aborts on this.
    fn register_option(
        &mut self,
        control: ControlHandle,
        value: String,
        label: String,
        selected: bool,
    ) -> Result<(), FormError>;

    /// Current value of a control (text inputs, submit labels).
    fn control_value(&self, control: ControlHandle) -> Option<String>;

    /// Summarize a select control's option state. For single-select
    /// controls with at least one option and nothing selected, the binding
    /// selects the first option here, so `selected_count` comes back
    /// non-zero.
    fn select_summary(&mut self, control: ControlHandle) -> SelectSummary;

    /// Tie a control to the box rendering it.
    fn bind_box(&mut self, control: ControlHandle, box_id: BoxId);

    /// Release a control's box tie (the box was discarded).
    fn unbind_box(&mut self, control: ControlHandle);
}

/// Convert an `<input>` element.
///
/// [§ 4.10.5 The input element](https://html.spec.whatwg.org/multipage/input.html)
///
/// The rendering depends on the `type` attribute: text-like inputs show
/// their value (password-masked where appropriate), buttons show a label,
/// hidden inputs produce no box, image inputs start an image fetch.
pub(crate) fn handle_input(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    convert_children: &mut bool,
) -> Result<(), BuildError> {
    let dom = builder.dom;
    let control = builder
        .forms
        .control_for_node(dom, node)
        .ok_or(FormError::MissingControl)?;
    builder.tree[box_id].gadget = Some(control);
    builder.forms.bind_box(control, box_id);

    let kind = dom
        .attr(node, "type")
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match kind.as_str() {
        "hidden" => {
            builder.tree[box_id].box_type = BoxType::None;
        }
        "checkbox" | "radio" => {
            // Rendered by the front end from the gadget alone.
        }
        "file" => {
            builder.tree[box_id].box_type = BoxType::InlineBlock;
        }
        "submit" | "reset" | "button" => {
            let label = builder.forms.control_value(control).unwrap_or_else(|| {
                match kind.as_str() {
                    "submit" => "Submit",
                    "reset" => "Reset",
                    _ => "Button",
                }
                .to_string()
            });
            builder.tree[box_id].box_type = BoxType::InlineBlock;
            attach_control_label(builder, box_id, label);
        }
        "image" => {
            let display = builder.tree[box_id]
                .style
                .as_ref()
                .map_or(DisplayValue::None, |s| s.display);
            if display != DisplayValue::None {
                if let Some(src) = dom.attr(node, "src") {
                    let base = builder.ctx.base_url.as_deref();
                    let url = resolve_url(src, base);
                    // An image input pointing back at the page itself is
                    // dropped rather than fetched.
                    if base.is_none_or(|b| !url.eq_ignore_ascii_case(b)) {
                        builder.start_image_fetch(&url, box_id, false)?;
                    }
                }
            }
        }
        // "text", "password", and anything unrecognized render as a
        // text-entry control.
        _ => {
            let value = builder.forms.control_value(control).unwrap_or_default();
            let shown = if kind == "password" {
                "*".repeat(value.chars().count())
            } else {
                spaces_to_nbsp(&value)
            };
            builder.tree[box_id].box_type = BoxType::InlineBlock;
            attach_control_label(builder, box_id, shown);
        }
    }

    *convert_children = false;
    Ok(())
}

/// Convert a `<button>` element.
///
/// The button's children render as its content, so conversion continues
/// into them; only the control binding happens here.
pub(crate) fn handle_button(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    _convert_children: &mut bool,
) -> Result<(), BuildError> {
    let control = builder
        .forms
        .control_for_node(builder.dom, node)
        .ok_or(FormError::MissingControl)?;
    builder.tree[box_id].gadget = Some(control);
    builder.forms.bind_box(control, box_id);
    Ok(())
}

/// Convert a `<select>` element.
///
/// [§ 4.10.7 The select element](https://html.spec.whatwg.org/multipage/form-elements.html#the-select-element)
///
/// Options (including those nested one level down in `<optgroup>`) are
/// registered with the binding; the box shows a one-line summary label. A
/// select with no options produces no box at all.
pub(crate) fn handle_select(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    convert_children: &mut bool,
) -> Result<(), BuildError> {
    let dom = builder.dom;
    let control = builder
        .forms
        .control_for_node(dom, node)
        .ok_or(FormError::MissingControl)?;

    for &child in dom.children(node) {
        match dom.element_name(child).as_deref() {
            Some("option") => register_option_node(builder, control, child)?,
            Some("optgroup") => {
                for &grandchild in dom.children(child) {
                    if dom.element_name(grandchild).as_deref() == Some("option") {
                        register_option_node(builder, control, grandchild)?;
                    }
                }
            }
            _ => {}
        }
    }

    let summary = builder.forms.select_summary(control);
    if summary.option_count == 0 {
        // Nothing to choose from: the whole control is omitted.
        builder.tree[box_id].box_type = BoxType::None;
        *convert_children = false;
        return Ok(());
    }

    builder.tree[box_id].box_type = BoxType::InlineBlock;
    builder.tree[box_id].gadget = Some(control);
    builder.forms.bind_box(control, box_id);

    let label = match summary.selected_count {
        0 => "(none)".to_string(),
        1 => summary.current_label.unwrap_or_default(),
        _ => "(multiple)".to_string(),
    };
    attach_control_label(builder, box_id, label);

    *convert_children = false;
    Ok(())
}

/// Convert a `<textarea>` element.
///
/// [§ 4.10.11 The textarea element](https://html.spec.whatwg.org/multipage/form-elements.html#the-textarea-element)
///
/// The descendant text becomes alternating text and forced-break boxes:
/// the first and last children are always text boxes (possibly empty), and
/// no two breaks are ever adjacent.
pub(crate) fn handle_textarea(
    builder: &mut BoxTreeBuilder<'_>,
    node: NodeId,
    box_id: BoxId,
    convert_children: &mut bool,
) -> Result<(), BuildError> {
    let dom = builder.dom;
    let control = builder
        .forms
        .control_for_node(dom, node)
        .ok_or(FormError::MissingControl)?;
    builder.tree[box_id].box_type = BoxType::InlineBlock;
    builder.tree[box_id].gadget = Some(control);
    builder.forms.bind_box(control, box_id);

    let raw = dom.descendant_text(node);
    let mut rest = raw.as_str();
    if builder.pending_pre_strip {
        rest = strip_one_newline(rest);
    }

    let style = builder.tree[box_id].style.clone();
    let link = LinkContext {
        href: builder.tree[box_id].href.clone(),
        target: builder.tree[box_id].target.clone(),
        title: builder.tree[box_id].title.clone(),
    };

    let container = builder.tree.create_anonymous(BoxType::InlineContainer);
    loop {
        let line_len = rest.find(['\r', '\n']).unwrap_or(rest.len());
        let (line, tail) = rest.split_at(line_len);

        let text_box = builder
            .tree
            .create_box(BoxType::Text, style.clone(), &link, None);
        builder.tree[text_box].text = Some(line.to_string());
        builder.tree.append_child(container, text_box);

        if tail.is_empty() {
            break;
        }
        let br = builder
            .tree
            .create_box(BoxType::ForcedBreak, style.clone(), &link, None);
        builder.tree.append_child(container, br);
        rest = strip_one_newline(tail);
    }
    builder.tree.append_child(box_id, container);

    *convert_children = false;
    Ok(())
}

/// Register one `<option>` node with the binding.
fn register_option_node(
    builder: &mut BoxTreeBuilder<'_>,
    control: ControlHandle,
    option: NodeId,
) -> Result<(), BuildError> {
    let dom = builder.dom;
    let label = squash_and_trim(&dom.descendant_text(option));
    let value = dom
        .attr(option, "value")
        .map_or_else(|| label.clone(), str::to_string);
    let selected = dom.attr(option, "selected").is_some();
    builder
        .forms
        .register_option(control, value, label, selected)?;
    Ok(())
}

/// Attach a single-line text label under a control box, wrapped in an
/// inline container the way all inline content is.
fn attach_control_label(builder: &mut BoxTreeBuilder<'_>, box_id: BoxId, label: String) {
    let style = builder.tree[box_id].style.clone();
    let link = LinkContext {
        href: builder.tree[box_id].href.clone(),
        target: builder.tree[box_id].target.clone(),
        title: builder.tree[box_id].title.clone(),
    };
    let container = builder.tree.create_anonymous(BoxType::InlineContainer);
    let text_box = builder.tree.create_box(BoxType::Text, style, &link, None);
    builder.tree[text_box].text = Some(label);
    builder.tree.append_child(container, text_box);
    builder.tree.append_child(box_id, container);
}

/// Strip one leading `\n`, `\r`, or `\r\n` from `s`.
fn strip_one_newline(s: &str) -> &str {
    if let Some(rest) = s.strip_prefix("\r\n") {
        rest
    } else if let Some(rest) = s.strip_prefix(['\r', '\n']) {
        rest
    } else {
        s
    }
}

/// In-memory form binding: control state derived from the document alone.
///
/// A real browser binds controls to form submission machinery; this
/// binding keeps just enough state to honor the [`FormBinding`] contract,
/// which covers tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryFormBinding {
    controls: Vec<ControlState>,
    by_node: HashMap<NodeId, ControlHandle>,
}

#[derive(Debug)]
struct ControlState {
    value: Option<String>,
    multiple: bool,
    options: Vec<OptionEntry>,
    bound_box: Option<BoxId>,
}

#[derive(Debug)]
struct OptionEntry {
    label: String,
    selected: bool,
}

impl MemoryFormBinding {
    /// Create an empty binding.
    #[must_use]
    pub fn new() -> Self {
        MemoryFormBinding::default()
    }

    /// The box currently bound to a control, if any.
    #[must_use]
    pub fn bound_box(&self, control: ControlHandle) -> Option<BoxId> {
        self.controls.get(control.0).and_then(|c| c.bound_box)
    }
}

impl FormBinding for MemoryFormBinding {
    fn control_for_node(&mut self, dom: &DomTree, node: NodeId) -> Option<ControlHandle> {
        if let Some(&handle) = self.by_node.get(&node) {
            return Some(handle);
        }
        let handle = ControlHandle(self.controls.len());
        self.controls.push(ControlState {
            value: dom.attr(node, "value").map(str::to_string),
            multiple: dom.attr(node, "multiple").is_some(),
            options: Vec::new(),
            bound_box: None,
        });
        let _ = self.by_node.insert(node, handle);
        Some(handle)
    }

    fn register_option(
        &mut self,
        control: ControlHandle,
        _value: String,
        label: String,
        selected: bool,
    ) -> Result<(), FormError> {
        let state = self
            .controls
            .get_mut(control.0)
            .ok_or(FormError::MissingControl)?;
        state.options.push(OptionEntry { label, selected });
        Ok(())
    }

    fn control_value(&self, control: ControlHandle) -> Option<String> {
        self.controls.get(control.0).and_then(|c| c.value.clone())
    }

    fn select_summary(&mut self, control: ControlHandle) -> SelectSummary {
        let Some(state) = self.controls.get_mut(control.0) else {
            return SelectSummary::default();
        };
        // Single-select controls with options always have a selection.
        if !state.multiple
            && !state.options.is_empty()
            && !state.options.iter().any(|o| o.selected)
        {
            state.options[0].selected = true;
        }
        let selected_count = state.options.iter().filter(|o| o.selected).count();
        let current_label = if selected_count == 1 {
            state
                .options
                .iter()
                .find(|o| o.selected)
                .map(|o| o.label.clone())
        } else {
            None
        };
        SelectSummary {
            option_count: state.options.len(),
            selected_count,
            current_label,
            multiple: state.multiple,
        }
    }

    fn bind_box(&mut self, control: ControlHandle, box_id: BoxId) {
        if let Some(state) = self.controls.get_mut(control.0) {
            state.bound_box = Some(box_id);
        }
    }

    fn unbind_box(&mut self, control: ControlHandle) {
        if let Some(state) = self.controls.get_mut(control.0) {
            state.bound_box = None;
        }
    }
}
