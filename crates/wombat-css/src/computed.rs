//! Computed style representation and parent composition.
//!
//! [§ 6 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)

use serde::Serialize;

use crate::display::DisplayValue;
use crate::values::{
    ColorValue, ContentValue, FloatValue, ListStyleType, PositionValue, SizeValue, TextTransform,
    Visibility, WhiteSpace,
};

/// The computed style for one node, as box construction consumes it.
///
/// [§ 6 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
///
/// The cascade engine returns a *partial* computed style: inherited
/// properties that were not declared on the node itself are left `None`
/// until [`compose`] fills them from the parent's completed style. After
/// composition the style is read-only and shared.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComputedStyle {
    /// [§ 2 display](https://www.w3.org/TR/css-display-3/#the-display-properties)
    /// "Inherited: no"
    pub display: DisplayValue,

    /// [§ 9.3.1 position](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    /// "Inherited: no"
    pub position: PositionValue,

    /// [§ 9.5.1 float](https://www.w3.org/TR/CSS2/visuren.html#float-position)
    /// "Inherited: no"
    pub float: FloatValue,

    /// [§ 3 white-space](https://www.w3.org/TR/css-text-3/#white-space-property)
    /// "Inherited: yes" — `None` means not declared, inherit.
    pub white_space: Option<WhiteSpace>,

    /// [§ 2.1 text-transform](https://www.w3.org/TR/css-text-3/#text-transform-property)
    /// "Inherited: yes" — `None` means not declared, inherit.
    pub text_transform: Option<TextTransform>,

    /// [§ 3.2 list-style-type](https://www.w3.org/TR/css-lists-3/#text-markers)
    /// "Inherited: yes" — `None` means not declared, inherit.
    pub list_style_type: Option<ListStyleType>,

    /// [§ 3.3 list-style-image](https://www.w3.org/TR/CSS2/generate.html#propdef-list-style-image)
    /// "Inherited: yes" — URL of the marker image, if any.
    pub list_style_image: Option<String>,

    /// [§ 4.4 visibility](https://www.w3.org/TR/CSS2/visufx.html#visibility)
    /// "Inherited: yes" — `None` means not declared, inherit.
    pub visibility: Option<Visibility>,

    /// [§ 3.1 color](https://www.w3.org/TR/css-color-4/#the-color-property)
    /// "Inherited: yes" — `None` means not declared, inherit.
    pub color: Option<ColorValue>,

    /// [§ 3.2 background-color](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    /// "Inherited: no" — `None` means transparent.
    pub background_color: Option<ColorValue>,

    /// [§ 3.1 background-image](https://www.w3.org/TR/css-backgrounds-3/#background-image)
    /// "Inherited: no" — URL of the background image, if any.
    pub background_image: Option<String>,

    /// [§ 10.2 width](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
    /// "Inherited: no"
    pub width: SizeValue,

    /// [§ 10.5 height](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    /// "Inherited: no"
    pub height: SizeValue,

    /// [§ 2.3 content](https://www.w3.org/TR/CSS2/generate.html#content)
    /// Only meaningful on pseudo-element styles.
    pub content: ContentValue,
}

impl ComputedStyle {
    /// The white-space policy in effect (initial value `normal`).
    #[must_use]
    pub fn white_space(&self) -> WhiteSpace {
        self.white_space.unwrap_or_default()
    }

    /// The text-transform in effect (initial value `none`).
    #[must_use]
    pub fn text_transform(&self) -> TextTransform {
        self.text_transform.unwrap_or_default()
    }

    /// The list-style-type in effect (initial value `disc`).
    #[must_use]
    pub fn list_style_type(&self) -> ListStyleType {
        self.list_style_type.unwrap_or_default()
    }

    /// The visibility in effect (initial value `visible`).
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility.unwrap_or_default()
    }

    /// Whether the computed background is transparent.
    #[must_use]
    pub fn background_is_transparent(&self) -> bool {
        self.background_color.is_none_or(|c| c.is_transparent())
    }
}

/// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
///
/// "Inheritance propagates property values from parent elements to their
/// children."
///
/// Complete `overlay` in place by filling its undeclared inherited
/// properties from the parent's completed style `base`. Non-inherited
/// properties are untouched.
pub fn compose(base: &ComputedStyle, overlay: &mut ComputedStyle) {
    if overlay.white_space.is_none() {
        overlay.white_space = base.white_space;
    }
    if overlay.text_transform.is_none() {
        overlay.text_transform = base.text_transform;
    }
    if overlay.list_style_type.is_none() {
        overlay.list_style_type = base.list_style_type;
    }
    if overlay.list_style_image.is_none() {
        overlay.list_style_image = base.list_style_image.clone();
    }
    if overlay.visibility.is_none() {
        overlay.visibility = base.visibility;
    }
    if overlay.color.is_none() {
        overlay.color = base.color;
    }
}
