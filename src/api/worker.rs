//! Background worker for backend requests
//!
//! The UI never blocks on the network: commands are sent over a channel to a
//! worker thread that hosts a tokio runtime, and results come back as events
//! the UI drains every frame.

use crate::api::client::ApiClient;
use crate::api::types::{AudioUpload, ChatResponse};
use crate::session::{HistoryEntry, OutboundChat};
use crate::Result;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Commands that can be sent to the API worker
#[derive(Debug, Clone)]
pub enum ApiCommand {
    /// Send a chat turn
    Chat {
        request_id: Uuid,
        persona_id: String,
        message: String,
        history: Vec<HistoryEntry>,
    },

    /// Upload a voice clip for speech-to-speech
    Transcribe {
        request_id: Uuid,
        persona_id: String,
        upload: AudioUpload,
    },

    /// Download reply audio for the replay panel
    FetchAudio { url: String },

    /// Shutdown the worker
    Shutdown,
}

impl From<OutboundChat> for ApiCommand {
    fn from(chat: OutboundChat) -> Self {
        ApiCommand::Chat {
            request_id: chat.request_id,
            persona_id: chat.persona_id.to_string(),
            message: chat.message,
            history: chat.history,
        }
    }
}

/// Events emitted by the API worker
#[derive(Debug, Clone)]
pub enum ApiEvent {
    ChatCompleted {
        request_id: Uuid,
        result: Result<ChatResponse>,
    },

    TranscriptionCompleted {
        request_id: Uuid,
        result: Result<ChatResponse>,
    },

    AudioFetched {
        url: String,
        result: Result<Vec<u8>>,
    },

    /// Worker has shut down
    Shutdown,
}

type Notifier = Arc<dyn Fn() + Send + Sync>;

/// API worker with channel-based communication
pub struct ApiWorker {
    client: ApiClient,
    command_tx: Sender<ApiCommand>,
    command_rx: Receiver<ApiCommand>,
    event_tx: Sender<ApiEvent>,
    event_rx: Receiver<ApiEvent>,
    notifier: Option<Notifier>,
}

impl ApiWorker {
    pub fn new(client: ApiClient) -> Self {
        let (command_tx, command_rx) = bounded(100);
        // Emitted from runtime tasks, so sending must never wait on the UI
        let (event_tx, event_rx) = unbounded();

        Self {
            client,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
            notifier: None,
        }
    }

    /// Call `notify` after every emitted event, e.g. to wake the UI
    pub fn with_notifier(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notifier = Some(Arc::new(notify));
        self
    }

    pub fn command_sender(&self) -> Sender<ApiCommand> {
        self.command_tx.clone()
    }

    pub fn event_receiver(&self) -> Receiver<ApiEvent> {
        self.event_rx.clone()
    }

    /// Start the worker thread
    pub fn start(self) -> Result<std::thread::JoinHandle<()>> {
        let Self {
            client,
            command_rx,
            event_tx,
            notifier,
            ..
        } = self;

        let handle = std::thread::Builder::new()
            .name("pastport-api".to_string())
            .spawn(move || run_worker(client, command_rx, event_tx, notifier))?;

        Ok(handle)
    }
}

/// Pushes events to the UI and wakes it
#[derive(Clone)]
struct EventEmitter {
    event_tx: Sender<ApiEvent>,
    notifier: Option<Notifier>,
}

impl EventEmitter {
    fn emit(&self, event: ApiEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Event receiver dropped");
        }
        if let Some(notify) = &self.notifier {
            notify();
        }
    }
}

fn run_worker(
    client: ApiClient,
    command_rx: Receiver<ApiCommand>,
    event_tx: Sender<ApiEvent>,
    notifier: Option<Notifier>,
) {
    info!("API worker starting ({})", client.base_url());

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            let _ = event_tx.send(ApiEvent::Shutdown);
            return;
        }
    };

    let emitter = EventEmitter { event_tx, notifier };

    loop {
        match command_rx.recv() {
            Ok(ApiCommand::Chat {
                request_id,
                persona_id,
                message,
                history,
            }) => {
                debug!("Dispatching chat request {}", request_id);
                let client = client.clone();
                let emitter = emitter.clone();
                runtime.spawn(async move {
                    let result = client.send_chat(&persona_id, &message, &history).await;
                    emitter.emit(ApiEvent::ChatCompleted { request_id, result });
                });
            }

            Ok(ApiCommand::Transcribe {
                request_id,
                persona_id,
                upload,
            }) => {
                debug!("Dispatching transcription request {}", request_id);
                let client = client.clone();
                let emitter = emitter.clone();
                runtime.spawn(async move {
                    let result = client.send_audio(&persona_id, upload).await;
                    emitter.emit(ApiEvent::TranscriptionCompleted { request_id, result });
                });
            }

            Ok(ApiCommand::FetchAudio { url }) => {
                let client = client.clone();
                let emitter = emitter.clone();
                runtime.spawn(async move {
                    let result = client.fetch_audio(&url).await;
                    emitter.emit(ApiEvent::AudioFetched { url, result });
                });
            }

            Ok(ApiCommand::Shutdown) => {
                info!("API worker shutting down");
                emitter.emit(ApiEvent::Shutdown);
                break;
            }

            Err(_) => {
                debug!("Command channel closed");
                break;
            }
        }
    }

    // Requests still in flight are dropped with the runtime
    runtime.shutdown_background();
    info!("API worker stopped");
}
