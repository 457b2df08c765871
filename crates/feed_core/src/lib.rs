//! Feed core: pure state machine and view-model helpers.
mod effect;
mod feedback;
mod item;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use feedback::apply_feedback;
pub use item::{ContentItem, FeedQuery, FeedbackAction, PAGE_SIZE};
pub use msg::{ControlChange, Msg, UploadField};
pub use state::{
    FeedState, FilterControls, Generation, UploadDraft, UploadModal, DEFAULT_UPLOAD_SOURCE,
};
pub use update::update;
pub use view_model::{
    CardView, FeedViewModel, ScoreTone, UploadView, MAX_CARD_TAGS, SUMMARY_FALLBACK_CHARS,
};
