use std::collections::BTreeSet;

use folio_logging::{folio_debug, folio_info, folio_trace, folio_warn};

use crate::layout::{compute_layout, AspectRatio, Breakpoints, PageLayout, Viewport};
use crate::navigation::{classify_swipe, NavIntent, SwipeSettings};
use crate::view_model::AppViewModel;
use crate::{Generation, LoadOutcome, Publication};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    pub breakpoints: Breakpoints,
    pub swipe: SwipeSettings,
    pub aspect_ratio: AspectRatio,
    pub flip_duration_ms: u64,
    pub initial_viewport: Viewport,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            swipe: SwipeSettings::default(),
            aspect_ratio: AspectRatio::default(),
            flip_duration_ms: 600,
            initial_viewport: Viewport::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipPhase {
    #[default]
    Idle,
    Flipping { flip_id: u64, target: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    NotLoaded,
    Ready(Publication),
    Failed(String),
}

/// A newly issued publication request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: Generation,
    pub slug: String,
    pub superseded: Option<Generation>,
}

/// An accepted page turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipTicket {
    pub flip_id: u64,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct LoaderState {
    latest: Generation,
    in_flight: Option<Generation>,
    slug: Option<String>,
}

/// Flipbook viewer state. Owned by one viewer; mutated only through `update`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    settings: ViewerSettings,
    viewport: Viewport,
    layout: PageLayout,
    phase: FlipPhase,
    current_page_index: usize,
    next_flip_id: u64,
    loader: LoaderState,
    content: Content,
    touch_start_x: Option<f32>,
    prefetched: BTreeSet<String>,
    dirty: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::with_settings(ViewerSettings::default())
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ViewerSettings) -> Self {
        let viewport = settings.initial_viewport;
        let layout = compute_layout(viewport, &settings.breakpoints, settings.aspect_ratio);
        Self {
            settings,
            viewport,
            layout,
            phase: FlipPhase::Idle,
            current_page_index: 0,
            next_flip_id: 0,
            loader: LoaderState::default(),
            content: Content::NotLoaded,
            touch_start_x: None,
            prefetched: BTreeSet::new(),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self.phase, FlipPhase::Flipping { .. })
    }

    pub fn phase(&self) -> FlipPhase {
        self.phase
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn publication(&self) -> Option<&Publication> {
        match &self.content {
            Content::Ready(publication) => Some(publication),
            _ => None,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.loader.slug.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.in_flight.is_some()
    }

    pub fn page_count(&self) -> usize {
        self.publication().map_or(0, Publication::page_count)
    }

    pub fn stride(&self) -> usize {
        self.layout.spread_mode.stride()
    }

    /// Number of pages shown at the current index.
    pub fn visible_count(&self) -> usize {
        self.page_count()
            .saturating_sub(self.current_page_index)
            .min(self.stride())
    }

    pub fn can_request_next(&self) -> bool {
        !self.is_flipping() && self.current_page_index < self.last_spread_start()
    }

    pub fn can_request_prev(&self) -> bool {
        !self.is_flipping() && self.current_page_index > 0
    }

    /// Forward turns are allowed only below this index (`N-1` single, `N-2` spread).
    fn last_spread_start(&self) -> usize {
        self.page_count().saturating_sub(self.stride())
    }

    pub(crate) fn begin_load(&mut self, slug: &str) -> Option<LoadTicket> {
        let slug = slug.trim();
        if slug.is_empty() {
            folio_trace!("Ignoring open request with empty slug");
            return None;
        }
        self.loader.latest += 1;
        let generation = self.loader.latest;
        let superseded = self.loader.in_flight.replace(generation);
        self.loader.slug = Some(slug.to_string());
        self.dirty = true;
        folio_info!("Loading publication slug={} generation={}", slug, generation);
        Some(LoadTicket {
            generation,
            slug: slug.to_string(),
            superseded,
        })
    }

    /// Applies a loader response. Returns `false` for stale responses.
    pub(crate) fn apply_loaded(&mut self, generation: Generation, outcome: LoadOutcome) -> bool {
        if self.loader.in_flight != Some(generation) {
            folio_debug!(
                "Discarding stale publication response generation={} (latest={})",
                generation,
                self.loader.latest
            );
            return false;
        }
        self.loader.in_flight = None;
        self.current_page_index = 0;
        self.phase = FlipPhase::Idle;
        self.touch_start_x = None;
        self.prefetched.clear();
        self.content = match outcome {
            Ok(publication) => {
                folio_info!(
                    "Loaded publication id={} pages={}",
                    publication.id,
                    publication.page_count()
                );
                Content::Ready(publication)
            }
            Err(message) => {
                folio_warn!("Publication load failed: {}", message);
                Content::Failed(message)
            }
        };
        self.relayout();
        self.dirty = true;
        true
    }

    pub(crate) fn request_flip(&mut self, intent: NavIntent) -> Option<FlipTicket> {
        let from = self.current_page_index;
        let to = match intent {
            NavIntent::Next if self.can_request_next() => {
                (from + self.stride()).min(self.page_count().saturating_sub(1))
            }
            NavIntent::Prev if self.can_request_prev() => from.saturating_sub(self.stride()),
            _ => {
                folio_trace!("Rejected {:?} at index {} ({:?})", intent, from, self.phase);
                return None;
            }
        };
        self.next_flip_id += 1;
        let flip_id = self.next_flip_id;
        self.phase = FlipPhase::Flipping {
            flip_id,
            target: to,
        };
        self.dirty = true;
        folio_debug!("Flip {} started {} -> {}", flip_id, from, to);
        Some(FlipTicket { flip_id, from, to })
    }

    pub(crate) fn finish_flip(&mut self, flip_id: u64) -> bool {
        match self.phase {
            FlipPhase::Flipping {
                flip_id: active,
                target,
            } if active == flip_id => {
                self.phase = FlipPhase::Idle;
                self.current_page_index = target;
                self.dirty = true;
                folio_debug!("Flip {} landed on {}", flip_id, target);
                true
            }
            _ => {
                folio_trace!("Ignoring completion of inactive flip {}", flip_id);
                false
            }
        }
    }

    pub(crate) fn jump_to(&mut self, index: usize) -> bool {
        if self.is_flipping() || index >= self.page_count() || index == self.current_page_index {
            folio_trace!("Rejected jump to {}", index);
            return false;
        }
        self.current_page_index = index;
        self.dirty = true;
        true
    }

    pub(crate) fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        let before = self.layout;
        self.relayout();
        if self.layout != before {
            self.dirty = true;
        }
    }

    pub(crate) fn touch_started(&mut self, x: f32) {
        self.touch_start_x = (!self.is_flipping()).then_some(x);
    }

    pub(crate) fn touch_ended(&mut self, x: f32) -> Option<NavIntent> {
        let start = self.touch_start_x.take()?;
        if self.is_flipping() {
            return None;
        }
        classify_swipe(start, x, &self.settings.swipe)
    }

    /// URLs of the visible and the following spread not yet requested.
    pub(crate) fn take_prefetch_urls(&mut self) -> Vec<String> {
        let Some(publication) = self.publication() else {
            return Vec::new();
        };
        let start = self.current_page_index;
        let end = (start + 2 * self.stride()).min(publication.page_count());
        let candidates: Vec<String> = publication.pages()[start..end]
            .iter()
            .map(|page| page.image_url.clone())
            .collect();
        candidates
            .into_iter()
            .filter(|url| self.prefetched.insert(url.clone()))
            .collect()
    }

    fn relayout(&mut self) {
        let aspect = self
            .publication()
            .and_then(|publication| publication.aspect_ratio)
            .unwrap_or(self.settings.aspect_ratio);
        self.layout = compute_layout(self.viewport, &self.settings.breakpoints, aspect);
    }
}
