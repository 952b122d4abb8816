//! Client side of the form service: an HTTP client for the API, the
//! authoring state behind the form editor, and the respondent-facing viewer.

pub mod editor;
pub mod sequence;
pub mod service;
pub mod viewer;

pub use editor::{DraftInput, EditorError, FormEditor, MAX_INPUTS};
pub use sequence::{InputSequence, OutOfRange};
pub use service::{ClientError, FormServiceClient};
pub use viewer::{
    Control, FormViewer, ResponseTable, UNTITLED_FIELD, ViewerError, ViewerState, share_link,
};
