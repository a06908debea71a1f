//! Error types for document writes.

use thiserror::Error;

use crate::document::ElementId;

/// Failures while writing to a document element.
///
/// The fill engine treats these as per-element problems: the element is
/// skipped and the pass continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentError {
    /// Element handle does not belong to this document.
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    /// Element cannot hold the requested state.
    #[error("Element {element} <{tag}> does not support {operation}")]
    Unsupported {
        /// The element that was written to.
        element: ElementId,
        /// Its tag name.
        tag: String,
        /// The attempted write.
        operation: &'static str,
    },

    /// Option index past the end of the select's options.
    #[error("Select {element} has no option at index {index}")]
    OptionOutOfRange {
        /// The select control.
        element: ElementId,
        /// The requested option index.
        index: usize,
    },

    /// The host refused the write.
    #[error("Write to {element} rejected: {reason}")]
    Rejected {
        /// The element that was written to.
        element: ElementId,
        /// Host-provided reason.
        reason: String,
    },
}
