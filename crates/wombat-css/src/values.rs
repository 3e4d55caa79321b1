//! Style value types used by box construction.
//!
//! [CSS Values Level 4](https://www.w3.org/TR/css-values-4/)

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Fully transparent black, the initial background-color.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// "The syntax of a `<hex-color>` is a `<hash-token>` token whose value
    /// consists of 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        match hex.len() {
            // [§ 4.2.1]
            // "The three-digit RGB notation (#RGB) is converted into
            // six-digit form (#RRGGBB) by replicating digits."
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
                Some(ColorValue { r, g, b, a: 255 })
            }
            // Six-digit RGB notation (#RRGGBB)
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(ColorValue { r, g, b, a: 255 })
            }
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// A small subset of the named color table, enough for the legacy
    /// `bordercolor` attributes box construction parses.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let rgb = match name.to_ascii_lowercase().as_str() {
            "white" => (255, 255, 255),
            "black" => (0, 0, 0),
            "red" => (255, 0, 0),
            "green" => (0, 128, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "gray" | "grey" => (128, 128, 128),
            "silver" => (192, 192, 192),
            "navy" => (0, 0, 128),
            "maroon" => (128, 0, 0),
            _ => return None,
        };
        Some(ColorValue {
            r: rgb.0,
            g: rgb.1,
            b: rgb.2,
            a: 255,
        })
    }

    /// Parse a color literal: hex notation first, then named colors.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_named(s)
        }
    }

    /// Whether this color is fully transparent.
    #[must_use]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// [§ 3 White Space Processing](https://www.w3.org/TR/css-text-3/#white-space-property)
///
/// "This property specifies two things: whether and how white space inside
/// the element is collapsed; whether lines may wrap."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
pub enum WhiteSpace {
    /// "This value directs user agents to collapse sequences of white space."
    #[default]
    Normal,
    /// Collapse white space, but suppress wrapping.
    Nowrap,
    /// "This value prevents user agents from collapsing sequences of white
    /// space. Lines are only broken at preserved newline characters."
    Pre,
    /// Collapse white space, preserve segment breaks.
    PreLine,
    /// Preserve white space, allow wrapping.
    PreWrap,
}

impl WhiteSpace {
    /// Whether this value collapses runs of white space
    /// (the squash-and-trim segmentation policy).
    #[must_use]
    pub const fn collapses(self) -> bool {
        matches!(self, WhiteSpace::Normal | WhiteSpace::Nowrap)
    }
}

/// [§ 2.1 Transforming Text](https://www.w3.org/TR/css-text-3/#text-transform-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
pub enum TextTransform {
    /// "No effects."
    #[default]
    None,
    /// "Puts all letters in uppercase."
    Uppercase,
    /// "Puts all letters in lowercase."
    Lowercase,
    /// "Puts the first letter of each word in uppercase."
    Capitalize,
}

/// [§ 3.2 list-style-type](https://www.w3.org/TR/css-lists-3/#text-markers)
///
/// The marker glyph or numbering system for list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
pub enum ListStyleType {
    /// Filled disc marker (U+2022 BULLET).
    #[default]
    Disc,
    /// Hollow circle marker (U+25CB WHITE CIRCLE).
    Circle,
    /// Filled square marker (U+25AA BLACK SMALL SQUARE).
    Square,
    /// Decimal ordinal numbering.
    Decimal,
    /// Lowercase alphabetic numbering.
    LowerAlpha,
    /// Uppercase alphabetic numbering.
    UpperAlpha,
    /// Lowercase roman numbering.
    LowerRoman,
    /// Uppercase roman numbering.
    UpperRoman,
    /// "The element's marker does not have a visible glyph."
    None,
}

/// [§ 4.4 visibility](https://www.w3.org/TR/CSS2/visufx.html#visibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
pub enum Visibility {
    /// "The generated box is visible."
    #[default]
    Visible,
    /// "The generated box is invisible, but still affects layout."
    Hidden,
    /// Collapse (treated as hidden outside tables).
    Collapse,
}

/// [§ 9.3.1 Choosing a positioning scheme](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
pub enum PositionValue {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// Offset relative to its normal position.
    Relative,
    /// "The box's position is specified with the top/right/bottom/left
    /// properties" relative to its containing block.
    Absolute,
    /// "The box's position is calculated according to the absolute model,
    /// but fixed with respect to the viewport."
    Fixed,
}

impl PositionValue {
    /// Whether the box is taken out of normal flow by positioning.
    #[must_use]
    pub const fn is_out_of_flow(self) -> bool {
        matches!(self, PositionValue::Absolute | PositionValue::Fixed)
    }
}

/// [§ 9.5.1 Positioning the float](https://www.w3.org/TR/CSS2/visuren.html#float-position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum_macros::Display)]
pub enum FloatValue {
    /// "The box is not floated."
    #[default]
    None,
    /// "The element generates a block box that is floated to the left."
    Left,
    /// "Similar to left, except the box is floated to the right."
    Right,
}

impl FloatValue {
    /// Whether the box is floated at all.
    #[must_use]
    pub const fn is_floated(self) -> bool {
        !matches!(self, FloatValue::None)
    }
}

/// [§ 10.2 Content width](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
///
/// A computed width or height value. Lengths are kept in CSS pixels; unit
/// resolution beyond that is layout's concern.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum SizeValue {
    /// "The width depends on the values of other properties."
    #[default]
    Auto,
    /// A fixed length in CSS pixels.
    Length(f32),
    /// A percentage of the containing block.
    Percent(f32),
}

impl SizeValue {
    /// The fixed pixel length, if this value is neither auto nor a
    /// percentage. Replaced content with both dimensions fixed can be
    /// laid out before its fetch completes.
    #[must_use]
    pub const fn fixed_px(self) -> Option<f32> {
        match self {
            SizeValue::Length(px) => Some(px),
            SizeValue::Auto | SizeValue::Percent(_) => None,
        }
    }
}

/// [§ 2.3 content](https://www.w3.org/TR/CSS2/generate.html#content)
///
/// The generated-content property of a pseudo-element. Only presence is
/// modelled; textual and counter content is not generated by this core.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum ContentValue {
    /// "For pseudo-elements, computes to none" — no generated box.
    #[default]
    Normal,
    /// `content: none`.
    None,
    /// Some generated content was specified (value retained for layout).
    Text(String),
}
