use crate::navigation::{intent_for_key, NavIntent};
use crate::{Effect, Msg, ViewerState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Rejected requests (navigation mid-flip, past either end, stale loader
/// responses) leave the state untouched and produce no effects.
pub fn update(mut state: ViewerState, msg: Msg) -> (ViewerState, Vec<Effect>) {
    let effects = match msg {
        Msg::OpenPublication(slug) => match state.begin_load(&slug) {
            Some(ticket) => {
                let mut effects = Vec::with_capacity(2);
                if let Some(generation) = ticket.superseded {
                    effects.push(Effect::CancelFetch { generation });
                }
                effects.push(Effect::FetchPublication {
                    generation: ticket.generation,
                    slug: ticket.slug,
                });
                effects
            }
            None => Vec::new(),
        },
        Msg::PublicationLoaded {
            generation,
            outcome,
        } => {
            if state.apply_loaded(generation, outcome) {
                prefetch_effects(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::NextClicked => navigate(&mut state, NavIntent::Next),
        Msg::PrevClicked => navigate(&mut state, NavIntent::Prev),
        Msg::ThumbnailClicked(index) => navigate(&mut state, NavIntent::JumpTo(index)),
        Msg::KeyPressed(key) => navigate(&mut state, intent_for_key(key)),
        Msg::TouchStarted { x } => {
            state.touch_started(x);
            Vec::new()
        }
        Msg::TouchEnded { x } => match state.touch_ended(x) {
            Some(intent) => navigate(&mut state, intent),
            None => Vec::new(),
        },
        Msg::FlipFinished { flip_id } => {
            if state.finish_flip(flip_id) {
                prefetch_effects(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::Resized(viewport) => {
            state.resize(viewport);
            Vec::new()
        }
    };

    (state, effects)
}

fn navigate(state: &mut ViewerState, intent: NavIntent) -> Vec<Effect> {
    match intent {
        NavIntent::Next | NavIntent::Prev => match state.request_flip(intent) {
            Some(ticket) => vec![Effect::StartFlip {
                flip_id: ticket.flip_id,
                from: ticket.from,
                to: ticket.to,
                duration_ms: state.settings().flip_duration_ms,
            }],
            None => Vec::new(),
        },
        NavIntent::JumpTo(index) => jump(state, index),
        NavIntent::JumpToLast => match state.page_count().checked_sub(1) {
            Some(last) => jump(state, last),
            None => Vec::new(),
        },
    }
}

fn jump(state: &mut ViewerState, index: usize) -> Vec<Effect> {
    if state.jump_to(index) {
        prefetch_effects(state)
    } else {
        Vec::new()
    }
}

fn prefetch_effects(state: &mut ViewerState) -> Vec<Effect> {
    let urls = state.take_prefetch_urls();
    if urls.is_empty() {
        Vec::new()
    } else {
        vec![Effect::PrefetchImages { urls }]
    }
}
