use crate::{Effect, FeedState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            // Provisioning is idempotent on the backend side; the shell logs
            // and swallows its failure, so startup never blocks on it.
            let fetch = state.begin_fetch();
            vec![Effect::SetupDefaultSources, fetch]
        }
        Msg::ControlChanged(change) => {
            // Every filter change re-fetches, redundant ones included.
            // Request counts are part of the observable contract.
            state.apply_control(&change);
            vec![state.begin_fetch()]
        }
        Msg::FeedbackClicked { content_id, action } => {
            // Optimistic: the local mirror is updated before the write is
            // even issued, and stands regardless of its outcome.
            state.record_feedback(&content_id, action);
            vec![Effect::SendFeedback { content_id, action }]
        }
        Msg::FeedLoaded { generation, items } => {
            state.settle_fetch_success(generation, items);
            Vec::new()
        }
        Msg::FeedFailed { generation } => {
            state.settle_fetch_failure(generation);
            Vec::new()
        }
        Msg::UploadOpened => {
            state.open_upload();
            Vec::new()
        }
        Msg::UploadFieldChanged { field, value } => {
            state.edit_upload(field, value);
            Vec::new()
        }
        Msg::UploadSubmitted => match state.begin_upload() {
            Some(draft) => vec![Effect::SubmitUpload { draft }],
            None => Vec::new(),
        },
        Msg::UploadFinished { result } => match result {
            Ok(()) => {
                // The analyzed item appears ranked among existing items via a
                // fresh retrieval; it is never spliced in locally.
                state.close_upload();
                vec![state.begin_fetch()]
            }
            Err(detail) => {
                state.fail_upload(detail);
                Vec::new()
            }
        },
        Msg::UploadCancelled => {
            state.close_upload();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
