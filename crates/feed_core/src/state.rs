use serde::Serialize;

use crate::effect::Effect;
use crate::feedback::apply_feedback;
use crate::item::{ContentItem, FeedQuery, FeedbackAction, PAGE_SIZE};
use crate::msg::{ControlChange, UploadField};
use crate::view_model::{card_view, FeedViewModel, UploadView};

/// Monotonically increasing retrieval counter used to fence stale responses.
pub type Generation = u64;

/// Source label pre-filled in a fresh upload draft.
pub const DEFAULT_UPLOAD_SOURCE: &str = "Manual Upload";

const VALIDATION_MESSAGE: &str = "Title and content are both required";

/// The user's retrieval preferences.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterControls {
    pub serendipity: bool,
    pub diversity: bool,
    pub min_score: f64,
}

/// Manually authored content pending submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadDraft {
    pub title: String,
    pub content: String,
    pub source: String,
}

impl Default for UploadDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            source: DEFAULT_UPLOAD_SOURCE.to_string(),
        }
    }
}

/// Upload modal state: lives only while the modal is open.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadModal {
    pub draft: UploadDraft,
    pub submitting: bool,
    pub error: Option<String>,
}

/// The feed state machine's owned state.
///
/// Mutated exclusively through [`crate::update`]; items are replaced
/// wholesale on every successful retrieval and never re-sorted client-side.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedState {
    items: Vec<ContentItem>,
    loading: bool,
    controls: FilterControls,
    generation: Generation,
    upload: Option<UploadModal>,
    dirty: bool,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> FeedViewModel {
        FeedViewModel {
            loading: self.loading,
            controls: self.controls.clone(),
            cards: self.items.iter().map(card_view).collect(),
            upload: self.upload.as_ref().map(|modal| UploadView {
                title: modal.draft.title.clone(),
                content: modal.draft.content.clone(),
                source: modal.draft.source.clone(),
                submitting: modal.submitting,
                error: modal.error.clone(),
            }),
            dirty: self.dirty,
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn controls(&self) -> &FilterControls {
        &self.controls
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Retrieval parameters for the current controls.
    pub fn query(&self) -> FeedQuery {
        FeedQuery {
            limit: PAGE_SIZE,
            min_score: self.controls.min_score,
            serendipity: self.controls.serendipity,
            diversity: self.controls.diversity,
        }
    }

    /// Returns whether the view changed since the last call, and resets the
    /// flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn apply_control(&mut self, change: &ControlChange) {
        match change {
            ControlChange::Serendipity(on) => self.controls.serendipity = *on,
            ControlChange::Diversity(on) => self.controls.diversity = *on,
            ControlChange::MinScore(value) => self.controls.min_score = *value,
            ControlChange::Refresh => {}
        }
    }

    /// Starts a new retrieval: bumps the generation, flips `loading`, and
    /// returns the fetch effect carrying the current query.
    pub(crate) fn begin_fetch(&mut self) -> Effect {
        self.generation += 1;
        self.loading = true;
        self.dirty = true;
        Effect::FetchFeed {
            generation: self.generation,
            query: self.query(),
        }
    }

    pub(crate) fn settle_fetch_success(&mut self, generation: Generation, items: Vec<ContentItem>) {
        // A newer fetch has been issued since; this response is stale.
        if generation != self.generation {
            return;
        }
        self.items = items;
        self.loading = false;
        self.dirty = true;
    }

    pub(crate) fn settle_fetch_failure(&mut self, generation: Generation) {
        if generation != self.generation {
            return;
        }
        // Stale-but-valid display beats a blank feed: items stay untouched.
        self.loading = false;
        self.dirty = true;
    }

    pub(crate) fn record_feedback(&mut self, content_id: &str, action: FeedbackAction) {
        self.items = apply_feedback(std::mem::take(&mut self.items), content_id, action);
        self.dirty = true;
    }

    pub(crate) fn open_upload(&mut self) {
        if self.upload.is_none() {
            self.upload = Some(UploadModal::default());
            self.dirty = true;
        }
    }

    pub(crate) fn edit_upload(&mut self, field: UploadField, value: String) {
        if let Some(modal) = self.upload.as_mut() {
            match field {
                UploadField::Title => modal.draft.title = value,
                UploadField::Content => modal.draft.content = value,
                UploadField::Source => modal.draft.source = value,
            }
            self.dirty = true;
        }
    }

    /// Validates the draft and, if acceptable, marks it in flight and returns
    /// a copy for submission. Validation failures never reach the network.
    pub(crate) fn begin_upload(&mut self) -> Option<UploadDraft> {
        let modal = self.upload.as_mut()?;
        if modal.submitting {
            return None;
        }
        if modal.draft.title.trim().is_empty() || modal.draft.content.trim().is_empty() {
            modal.error = Some(VALIDATION_MESSAGE.to_string());
            self.dirty = true;
            return None;
        }
        modal.submitting = true;
        modal.error = None;
        self.dirty = true;
        Some(modal.draft.clone())
    }

    pub(crate) fn close_upload(&mut self) {
        if self.upload.take().is_some() {
            self.dirty = true;
        }
    }

    /// Keeps the modal open with the draft intact so the user can retry
    /// without retyping.
    pub(crate) fn fail_upload(&mut self, detail: String) {
        if let Some(modal) = self.upload.as_mut() {
            modal.submitting = false;
            modal.error = Some(detail);
            self.dirty = true;
        }
    }
}
