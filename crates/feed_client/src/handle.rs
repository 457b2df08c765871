use std::sync::{mpsc, Arc};
use std::thread;

use feed_core::{ContentItem, FeedQuery, FeedbackAction, Generation, UploadDraft};

use crate::client::{ApiClient, ClientSettings, FeedApi};
use crate::error::ApiError;

enum ClientCommand {
    FetchFeed {
        generation: Generation,
        query: FeedQuery,
    },
    SetupDefaultSources,
    SendFeedback {
        content_id: String,
        action: FeedbackAction,
    },
    SubmitUpload {
        draft: UploadDraft,
    },
}

/// Completion events reported back to the shell.
#[derive(Debug)]
pub enum ClientEvent {
    FeedFetched {
        generation: Generation,
        result: Result<Vec<ContentItem>, ApiError>,
    },
    SetupFinished {
        result: Result<(), ApiError>,
    },
    FeedbackSent {
        content_id: String,
        result: Result<(), ApiError>,
    },
    UploadFinished {
        result: Result<(), ApiError>,
    },
}

/// Commands in, events out. One dedicated thread owns the tokio runtime;
/// every command is spawned as an independent task, so overlapping requests
/// stay concurrent and nothing is queued or cancelled.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = Arc::new(ApiClient::new(settings)?);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    /// A clonable sender half, so commands can be issued while another
    /// thread owns the handle and drains its events.
    pub fn commander(&self) -> ClientCommander {
        ClientCommander {
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Command-issuing half of a [`ClientHandle`].
#[derive(Clone)]
pub struct ClientCommander {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientCommander {
    pub fn fetch_feed(&self, generation: Generation, query: FeedQuery) {
        let _ = self
            .cmd_tx
            .send(ClientCommand::FetchFeed { generation, query });
    }

    pub fn setup_default_sources(&self) {
        let _ = self.cmd_tx.send(ClientCommand::SetupDefaultSources);
    }

    pub fn send_feedback(&self, content_id: String, action: FeedbackAction) {
        let _ = self
            .cmd_tx
            .send(ClientCommand::SendFeedback { content_id, action });
    }

    pub fn submit_upload(&self, draft: UploadDraft) {
        let _ = self.cmd_tx.send(ClientCommand::SubmitUpload { draft });
    }
}

async fn handle_command(
    client: &dyn FeedApi,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let event = match command {
        ClientCommand::FetchFeed { generation, query } => ClientEvent::FeedFetched {
            generation,
            result: client.fetch_content(&query).await,
        },
        ClientCommand::SetupDefaultSources => ClientEvent::SetupFinished {
            result: client.setup_default_sources().await,
        },
        ClientCommand::SendFeedback { content_id, action } => {
            let result = client.send_feedback(&content_id, action).await;
            ClientEvent::FeedbackSent { content_id, result }
        }
        ClientCommand::SubmitUpload { draft } => ClientEvent::UploadFinished {
            result: client.submit_manual(&draft).await,
        },
    };
    let _ = event_tx.send(event);
}
