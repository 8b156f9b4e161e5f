use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use folio_core::{Effect, Msg};
use folio_engine::{ApiClient, EngineEvent, EngineEvents, EngineHandle};
use folio_logging::{folio_debug, folio_info, folio_warn};

use super::app::AppEvent;
use super::ui::constants::LOAD_FALLBACK;

/// Executes core effects: IO goes to the engine, flip timers run on their own threads.
pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(api: &ApiClient, msg_tx: mpsc::Sender<AppEvent>) -> Self {
        let (engine, events) =
            EngineHandle::new(Arc::new(api.clone()), Arc::new(api.image_fetcher()));
        spawn_event_pump(events, msg_tx.clone());
        Self { engine, msg_tx }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPublication { generation, slug } => {
                    folio_info!("FetchPublication generation={} slug={}", generation, slug);
                    self.engine.fetch_publication(generation, slug);
                }
                Effect::CancelFetch { generation } => {
                    folio_debug!("CancelFetch generation={}", generation);
                    self.engine.cancel(generation);
                }
                Effect::StartFlip {
                    flip_id,
                    from,
                    to,
                    duration_ms,
                } => {
                    folio_debug!("StartFlip {} {} -> {} ({} ms)", flip_id, from, to, duration_ms);
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(Duration::from_millis(duration_ms));
                        let _ = msg_tx.send(AppEvent::Msg(Msg::FlipFinished { flip_id }));
                    });
                }
                Effect::PrefetchImages { urls } => {
                    folio_debug!("PrefetchImages count={}", urls.len());
                    self.engine.prefetch(urls);
                }
            }
        }
    }
}

fn spawn_event_pump(events: EngineEvents, msg_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if let Some(msg) = map_event(event) {
                if msg_tx.send(AppEvent::Msg(msg)).is_err() {
                    break;
                }
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::PublicationFetched { generation, result } => Some(Msg::PublicationLoaded {
            generation,
            outcome: result.map_err(|err| {
                folio_warn!("Publication fetch generation={} failed: {}", generation, err);
                err.user_message(LOAD_FALLBACK)
            }),
        }),
        EngineEvent::ImagePrefetched { url, result } => {
            match result {
                Ok(image) => folio_debug!("Prefetched {} ({} bytes)", url, image.bytes.len()),
                Err(err) => folio_warn!("Prefetch of {} failed: {}", url, err),
            }
            None
        }
    }
}
