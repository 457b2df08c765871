use crate::item::{FeedQuery, FeedbackAction};
use crate::state::{Generation, UploadDraft};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Idempotent backend provisioning; failures are logged and swallowed.
    SetupDefaultSources,
    /// Run a retrieval; settles as `Msg::FeedLoaded` or `Msg::FeedFailed`
    /// carrying the same generation.
    FetchFeed {
        generation: Generation,
        query: FeedQuery,
    },
    /// Best-effort feedback write; the local increment is never rolled back.
    SendFeedback {
        content_id: String,
        action: FeedbackAction,
    },
    /// Submit the draft for server-side analysis; settles as
    /// `Msg::UploadFinished`.
    SubmitUpload { draft: UploadDraft },
}
