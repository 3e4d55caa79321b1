//! Default display values for HTML elements.
//!
//! [HTML Living Standard § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//! defines the default CSS styles for HTML elements. Only the display
//! defaults are needed here; everything else is the cascade engine's
//! business.

use crate::display::DisplayValue;

/// Returns the default display value for an HTML element.
///
/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
/// [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
/// [§ 15.3.9 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2)
#[must_use]
pub fn default_display_for_element(tag_name: &str) -> DisplayValue {
    // [§ 15.3.1 Hidden elements]
    // "The following elements must have their display set to none:"
    let hidden = [
        "area", "base", "basefont", "datalist", "head", "link", "meta", "noembed", "noframes",
        "param", "rp", "script", "style", "template", "title",
    ];
    if hidden.contains(&tag_name) {
        return DisplayValue::None;
    }

    // [§ 15.3.3 Flow content]
    // Block-level elements by default
    let block_elements = [
        "address",
        "article",
        "aside",
        "blockquote",
        "body",
        "center",
        "dd",
        "details",
        "dialog",
        "dir",
        "div",
        "dl",
        "dt",
        "fieldset",
        "figcaption",
        "figure",
        "footer",
        "form",
        "frameset",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "header",
        "hgroup",
        "hr",
        "html",
        "legend",
        "listing",
        "main",
        "menu",
        "nav",
        "ol",
        "p",
        "plaintext",
        "pre",
        "search",
        "section",
        "summary",
        "ul",
        "xmp",
    ];
    if block_elements.contains(&tag_name) {
        return DisplayValue::Block;
    }

    // [§ 15.3.7 Lists](https://html.spec.whatwg.org/multipage/rendering.html#lists)
    // "li { display: list-item; }"
    if tag_name == "li" {
        return DisplayValue::ListItem;
    }

    // [§ 15.3.9 Tables]
    match tag_name {
        "table" => return DisplayValue::Table,
        "caption" => return DisplayValue::TableCaption,
        "colgroup" => return DisplayValue::TableColumnGroup,
        "col" => return DisplayValue::TableColumn,
        "thead" => return DisplayValue::TableHeaderGroup,
        "tbody" => return DisplayValue::TableRowGroup,
        "tfoot" => return DisplayValue::TableFooterGroup,
        "tr" => return DisplayValue::TableRow,
        "td" | "th" => return DisplayValue::TableCell,
        _ => {}
    }

    // [§ 15.5.12 The input element](https://html.spec.whatwg.org/multipage/rendering.html#the-input-element-as-a-form-control)
    // [§ 15.5.13 The button element](https://html.spec.whatwg.org/multipage/rendering.html#the-button-element)
    //
    // Form controls are inline-block by default.
    if matches!(tag_name, "input" | "button" | "textarea" | "select") {
        return DisplayValue::InlineBlock;
    }

    // Legacy subwindows construct as inline-block.
    if matches!(tag_name, "iframe" | "object" | "embed" | "applet") {
        return DisplayValue::InlineBlock;
    }

    // Inline elements (default)
    // a, abbr, b, br, cite, code, em, i, img, kbd, label, q, s, samp,
    // small, span, strong, sub, sup, u, var, wbr, ...
    DisplayValue::Inline
}
