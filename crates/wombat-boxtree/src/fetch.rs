//! The fetch-subsystem seam and embedded-object parameters.
//!
//! Box construction only *initiates* fetches for replaced content (images,
//! objects, background images, list marker images); delivery and decoding
//! happen elsewhere and later. The one thing construction needs back is
//! whether the fetch could be started at all.

use thiserror::Error;

use crate::box_tree::BoxId;

/// What content types the owner box will accept for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum AcceptedTypes {
    /// Only image types are acceptable (`<img>`, markers, backgrounds).
    Image,
    /// Any renderable type (`<object>`, `<embed>`, plugin content).
    Any,
}

/// Failure to start a fetch.
///
/// Box construction treats this as fatal: an unstartable fetch means the
/// fetch subsystem is out of resources, not that the URL is bad.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The subsystem refused to start the fetch.
    #[error("failed to start fetch for {url}: {reason}")]
    Start {
        /// The absolute URL that was requested.
        url: String,
        /// Subsystem-provided reason.
        reason: String,
    },
}

/// The fetch subsystem contract.
///
/// `available_width` and `available_height` are layout hints only; they
/// never constrain what the fetch delivers.
pub trait FetchSubsystem {
    /// Start fetching `url` on behalf of `owner`.
    ///
    /// `background` marks background-image fetches, which paint behind the
    /// owner instead of replacing its content.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the fetch cannot be started; box
    /// construction aborts on this.
    fn start_fetch(
        &mut self,
        url: &str,
        owner: BoxId,
        accept: AcceptedTypes,
        available_width: u32,
        available_height: u32,
        background: bool,
    ) -> Result<(), FetchError>;

    /// Whether the subsystem can handle content of the given MIME type.
    /// Used to vet `<object>` type hints before fetching.
    fn supports_mime_type(&self, mime: &str) -> bool;
}

/// One `<param>` (or embed attribute) passed to embedded object content.
///
/// [§ 4.8.8 The param element](https://html.spec.whatwg.org/multipage/obsolete.html#the-param-element)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectParam {
    /// `name` attribute.
    pub name: Option<String>,
    /// `value` attribute.
    pub value: Option<String>,
    /// `type` attribute.
    pub param_type: Option<String>,
    /// `valuetype` attribute, defaulting to `data`.
    pub value_type: String,
}

/// Parameters collected from an `<object>` or `<embed>` element for the
/// plugin/content handler.
///
/// [§ 4.8.7 The object element](https://html.spec.whatwg.org/multipage/iframe-embed-object.html#the-object-element)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectParams {
    /// Resolved `data` URL, if any.
    pub data: Option<String>,
    /// Content type hint from the `type` attribute.
    pub mime_type: Option<String>,
    /// Code type hint from the `codetype` attribute.
    pub codetype: Option<String>,
    /// Base URL for resolving `classid` and `data` (the `codebase`
    /// attribute, itself resolved against the document base).
    pub codebase: Option<String>,
    /// Resolved `classid` URL, if any.
    pub classid: Option<String>,
    /// Parameters from `<param>` children (or extra embed attributes).
    pub params: Vec<ObjectParam>,
}
