use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use feed_client::{ApiError, ClientCommander, ClientEvent, ClientHandle, ClientSettings};
use feed_core::{Effect, Msg};
use feed_logging::{feed_info, feed_warn};

use crate::app::AppEvent;

/// Executes core effects against the backend client and pumps completions
/// back into the dispatch loop.
pub struct EffectRunner {
    commands: ClientCommander,
}

impl EffectRunner {
    pub fn new(base_url: String, tx: mpsc::Sender<AppEvent>) -> Result<Self, ApiError> {
        let settings = ClientSettings {
            base_url,
            ..ClientSettings::default()
        };
        let handle = ClientHandle::new(settings)?;
        let commands = handle.commander();
        spawn_event_pump(handle, tx);
        Ok(Self { commands })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SetupDefaultSources => {
                    self.commands.setup_default_sources();
                }
                Effect::FetchFeed { generation, query } => {
                    feed_info!(
                        "fetch generation={} min_score={} serendipity={} diversity={}",
                        generation,
                        query.min_score,
                        query.serendipity,
                        query.diversity
                    );
                    self.commands.fetch_feed(generation, query);
                }
                Effect::SendFeedback { content_id, action } => {
                    self.commands.send_feedback(content_id, action);
                }
                Effect::SubmitUpload { draft } => {
                    self.commands.submit_upload(draft);
                }
            }
        }
    }
}

fn spawn_event_pump(handle: ClientHandle, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        if let Some(event) = handle.try_recv() {
            if let Some(msg) = map_event(event) {
                if tx.send(AppEvent::Msg(msg)).is_err() {
                    break;
                }
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    });
}

/// Maps a client completion onto a core message. Setup and feedback
/// failures are swallowed here after logging; the core never sees them.
fn map_event(event: ClientEvent) -> Option<Msg> {
    match event {
        ClientEvent::FeedFetched { generation, result } => match result {
            Ok(items) => Some(Msg::FeedLoaded { generation, items }),
            Err(err) => {
                feed_warn!("Feed retrieval failed: {}", err);
                Some(Msg::FeedFailed { generation })
            }
        },
        ClientEvent::SetupFinished { result } => {
            match result {
                Ok(()) => feed_info!("Default sources provisioned"),
                Err(err) => feed_warn!("Default source setup failed: {}", err),
            }
            None
        }
        ClientEvent::FeedbackSent { content_id, result } => {
            if let Err(err) = result {
                feed_warn!("Feedback write for {} failed: {}", content_id, err);
            }
            None
        }
        ClientEvent::UploadFinished { result } => Some(Msg::UploadFinished {
            result: result.map_err(|err| match err {
                // The backend's own wording reaches the modal untouched.
                ApiError::Rejected { detail } => detail,
                other => other.to_string(),
            }),
        }),
    }
}
