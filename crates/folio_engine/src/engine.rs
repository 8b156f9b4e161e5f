use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use folio_core::{Generation, Publication};
use folio_logging::{folio_debug, folio_error, folio_trace};
use tokio_util::sync::CancellationToken;

use crate::client::PublicationSource;
use crate::error::ApiError;
use crate::prefetch::{ImageFetcher, PrefetchedImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PublicationFetched {
        generation: Generation,
        result: Result<Publication, ApiError>,
    },
    ImagePrefetched {
        url: String,
        result: Result<PrefetchedImage, ApiError>,
    },
}

enum EngineCommand {
    FetchPublication { generation: Generation, slug: String },
    Cancel { generation: Generation },
    Prefetch { urls: Vec<String> },
}

type InFlight = Arc<Mutex<HashMap<Generation, CancellationToken>>>;

/// Sending half: runs IO on a background tokio runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving half, movable to whichever thread drains results.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        source: Arc<dyn PublicationSource>,
        images: Arc<dyn ImageFetcher>,
    ) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    folio_error!("Failed to start engine runtime: {}", err);
                    reject_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::FetchPublication { generation, slug } => {
                        let token = CancellationToken::new();
                        if let Ok(mut map) = in_flight.lock() {
                            map.insert(generation, token.clone());
                        }
                        let source = source.clone();
                        let event_tx = event_tx.clone();
                        let in_flight = in_flight.clone();
                        runtime.spawn(async move {
                            let outcome = token
                                .run_until_cancelled(source.fetch_publication(&slug))
                                .await;
                            if let Ok(mut map) = in_flight.lock() {
                                map.remove(&generation);
                            }
                            match outcome {
                                Some(result) => {
                                    let _ = event_tx
                                        .send(EngineEvent::PublicationFetched { generation, result });
                                }
                                None => folio_debug!("Fetch generation={} cancelled", generation),
                            }
                        });
                    }
                    EngineCommand::Cancel { generation } => {
                        let token = in_flight
                            .lock()
                            .ok()
                            .and_then(|mut map| map.remove(&generation));
                        if let Some(token) = token {
                            token.cancel();
                        }
                    }
                    EngineCommand::Prefetch { urls } => {
                        for url in urls {
                            let images = images.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let result = images.fetch_image(&url).await;
                                let _ = event_tx.send(EngineEvent::ImagePrefetched { url, result });
                            });
                        }
                    }
                }
            }
            folio_trace!("Engine command channel closed");
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    pub fn fetch_publication(&self, generation: Generation, slug: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPublication {
            generation,
            slug: slug.into(),
        });
    }

    /// Abandons an in-flight fetch; no event is reported for it.
    pub fn cancel(&self, generation: Generation) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { generation });
    }

    pub fn prefetch(&self, urls: Vec<String>) {
        if urls.is_empty() {
            return;
        }
        let _ = self.cmd_tx.send(EngineCommand::Prefetch { urls });
    }
}

impl EngineEvents {
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Blocks until the next event; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

fn reject_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(command) = cmd_rx.recv() {
        let error = ApiError::network(format!("engine unavailable: {reason}"));
        let event = match command {
            EngineCommand::FetchPublication { generation, .. } => EngineEvent::PublicationFetched {
                generation,
                result: Err(error),
            },
            EngineCommand::Prefetch { .. } | EngineCommand::Cancel { .. } => continue,
        };
        let _ = event_tx.send(event);
    }
}
