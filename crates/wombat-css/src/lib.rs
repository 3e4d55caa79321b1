//! Computed style representation and cascade-engine interface for the
//! Wombat box construction core.
//!
//! # Scope
//!
//! This crate implements:
//! - **Style value types** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Color values (hex, a few named colors)
//!   - White-space, text-transform, list-style, float, position, visibility
//!   - Width/height size values (auto, px lengths, percentages)
//! - **Display values** ([CSS Display Level 3](https://www.w3.org/TR/css-display-3/))
//!   - The flat display keyword set box construction maps to box types
//! - **Computed styles** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - [`ComputedStyle`] with parent composition ([`compose`])
//! - **Cascade engine seam** — the [`StyleEngine`] trait through which the
//!   external selector-matching engine is consulted
//! - **Default display table** per
//!   [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! # Not in scope
//!
//! CSS tokenizing, parsing, and selector matching all belong to the
//! external cascade engine behind [`StyleEngine`].

/// Computed style representation per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod computed;
/// Default display table per [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html).
pub mod defaults;
/// Display keyword types per [CSS Display Level 3](https://www.w3.org/TR/css-display-3/).
pub mod display;
/// Cascade-engine interface (selector matching is external).
pub mod engine;
/// Style value types per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod values;

// Re-exports for convenience
pub use computed::{ComputedStyle, compose};
pub use defaults::default_display_for_element;
pub use display::DisplayValue;
pub use engine::{DefaultStyleEngine, MatchedStyles, Media, StyleEngine, StyleError};
pub use values::{
    ColorValue, ContentValue, FloatValue, ListStyleType, PositionValue, SizeValue, TextTransform,
    Visibility, WhiteSpace,
};
