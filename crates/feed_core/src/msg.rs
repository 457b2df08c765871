use crate::item::{ContentItem, FeedbackAction};
use crate::state::Generation;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Application start: provision default sources, then load the first page.
    Started,
    /// User adjusted one retrieval control (always triggers a re-fetch).
    ControlChanged(ControlChange),
    /// User clicked a feedback action on a card.
    FeedbackClicked {
        content_id: String,
        action: FeedbackAction,
    },
    /// A retrieval settled successfully.
    FeedLoaded {
        generation: Generation,
        items: Vec<ContentItem>,
    },
    /// A retrieval settled with an error; prior items stay displayed.
    FeedFailed { generation: Generation },
    /// User opened the manual upload modal.
    UploadOpened,
    /// User edited one field of the upload draft.
    UploadFieldChanged { field: UploadField, value: String },
    /// User submitted the current upload draft.
    UploadSubmitted,
    /// The backend settled the manual upload.
    UploadFinished { result: Result<(), String> },
    /// User dismissed the modal, discarding the draft.
    UploadCancelled,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// A change to one retrieval control.
///
/// Value identity is deliberately not diffed: re-setting a field to its
/// current value still re-fetches, and observable request counts depend on
/// that.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlChange {
    Serendipity(bool),
    Diversity(bool),
    MinScore(f64),
    /// Re-run retrieval without changing any field.
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadField {
    Title,
    Content,
    Source,
}
