//! Construction failure taxonomy.
//!
//! Only collaborator failure aborts a build; malformed markup always
//! degrades structurally and keeps the build going.

use thiserror::Error;

use crate::fetch::FetchError;
use crate::forms::FormError;
use wombat_css::StyleError;

/// Fatal failure while building a box tree.
///
/// On error the partial tree is undefined and must be discarded; dropping
/// the [`crate::BoxTree`] releases everything.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The cascade engine failed to select or compose a style.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// The fetch subsystem failed to start a replaced-content fetch.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The form-control binding failed.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Conversion produced no layout root (for example a root element
    /// resolving to `display: none`).
    #[error("document produced no layout root")]
    EmptyTree,
}
