//! Box tree construction for the Wombat browser engine.
//!
//! Turns a parsed document tree ([`wombat_dom::DomTree`]) into the typed
//! box tree ([`BoxTree`]) that layout consumes, per
//! [CSS 2.1 § 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen).
//!
//! # Scope
//!
//! This crate implements:
//! - **The conversion driver** ([`build_box_tree`]) — one pre-order walk
//!   mapping elements to boxes, grouping inline content under anonymous
//!   inline containers, pairing inline boxes with end sentinels, wrapping
//!   floats, and attaching list markers
//! - **Text segmentation** — whitespace collapsing and preservation per
//!   [CSS Text Level 3 § 3](https://www.w3.org/TR/css-text-3/#white-space-property)
//! - **Special element handling** — anchors, images, objects, embeds,
//!   subwindows, framesets, preformatted blocks, and form controls
//! - **Frameset capture** — `<frameset>`/`<frame>` grids and `<iframe>`
//!   descriptors recorded on the document instead of the box tree
//!
//! # Collaborators
//!
//! Style selection, fetching, and form semantics live behind traits:
//! [`wombat_css::StyleEngine`], [`FetchSubsystem`], and [`FormBinding`].
//! Construction drives them; it never implements them (the bundled
//! [`MemoryFormBinding`] and [`wombat_css::DefaultStyleEngine`] exist for
//! tests and headless use).

/// The layout box arena and box kinds.
pub mod box_tree;
/// The conversion driver.
pub mod construct;
/// Failure taxonomy.
pub mod error;
/// Fetch-subsystem seam and embedded-object parameters.
pub mod fetch;
/// Form-control binding seam and form element conversion.
pub mod forms;
/// Frameset grids and inline subwindows.
pub mod frameset;
/// Text node conversion.
pub mod text;

mod special;

// Re-exports for convenience
pub use box_tree::{BoxId, BoxTree, BoxType, FrameTarget, LayoutBox, LinkContext};
pub use construct::{BuildContext, build_box_tree};
pub use error::BuildError;
pub use fetch::{AcceptedTypes, FetchError, FetchSubsystem, ObjectParam, ObjectParams};
pub use forms::{ControlHandle, FormBinding, FormError, MemoryFormBinding, SelectSummary};
pub use frameset::{
    Frame, FrameDimension, FrameGrid, FrameUnit, IframeDescriptor, Scrolling, parse_multi_lengths,
};
pub use text::{apply_text_transform, spaces_to_nbsp, squash_and_trim, squash_whitespace};
