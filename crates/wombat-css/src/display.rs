//! CSS display property values.
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)

use serde::Serialize;

/// [§ 2 The display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// "The display property defines an element's display type, which consists
/// of the two basic qualities of how an element generates boxes."
///
/// Kept as the flat CSS 2.1 keyword set: it is exactly the domain of the
/// display-to-box-type mapping box construction performs, including the
/// legacy table keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
pub enum DisplayValue {
    /// "The element generates an inline-level box."
    #[default]
    Inline,
    /// "The element generates a block-level box."
    Block,
    /// [§ 9.2.1.1](https://www.w3.org/TR/CSS2/visuren.html#display-prop)
    /// "This value causes an element to generate a principal block box and
    /// a marker box."
    ListItem,
    /// "Run-in boxes are a type of inline-level box" (treated as inline).
    RunIn,
    /// "This value causes an element to generate an inline-level block
    /// container."
    InlineBlock,
    /// "Specifies that an element defines a block-level table."
    Table,
    /// "Specifies that an element defines an inline-level table."
    InlineTable,
    /// "Specifies that an element groups one or more rows."
    TableRowGroup,
    /// Like `table-row-group`, displayed before all other rows.
    TableHeaderGroup,
    /// Like `table-row-group`, displayed after all other rows.
    TableFooterGroup,
    /// "Specifies that an element is a row of cells."
    TableRow,
    /// "Specifies that an element groups one or more columns."
    TableColumnGroup,
    /// "Specifies that an element describes a column of cells."
    TableColumn,
    /// "Specifies that an element represents a table cell."
    TableCell,
    /// "Specifies a caption for the table" (constructed as inline).
    TableCaption,
    /// "The element and its descendants generate no boxes."
    None,
}

impl DisplayValue {
    /// Parse a display keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let value = match s.trim().to_ascii_lowercase().as_str() {
            "inline" => DisplayValue::Inline,
            "block" => DisplayValue::Block,
            "list-item" => DisplayValue::ListItem,
            "run-in" => DisplayValue::RunIn,
            "inline-block" => DisplayValue::InlineBlock,
            "table" => DisplayValue::Table,
            "inline-table" => DisplayValue::InlineTable,
            "table-row-group" => DisplayValue::TableRowGroup,
            "table-header-group" => DisplayValue::TableHeaderGroup,
            "table-footer-group" => DisplayValue::TableFooterGroup,
            "table-row" => DisplayValue::TableRow,
            "table-column-group" => DisplayValue::TableColumnGroup,
            "table-column" => DisplayValue::TableColumn,
            "table-cell" => DisplayValue::TableCell,
            "table-caption" => DisplayValue::TableCaption,
            "none" => DisplayValue::None,
            _ => return None,
        };
        Some(value)
    }

    /// Whether this display value is inline-level for flow purposes.
    ///
    /// [§ 9.2.2 Inline-level elements](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    #[must_use]
    pub const fn is_inline_level(self) -> bool {
        matches!(
            self,
            DisplayValue::Inline
                | DisplayValue::RunIn
                | DisplayValue::InlineBlock
                | DisplayValue::InlineTable
        )
    }
}
