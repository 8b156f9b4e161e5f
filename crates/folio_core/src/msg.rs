use crate::{Generation, Key, Publication, Viewport};

/// Result of a publication fetch as seen by the core: a user-facing error
/// message on failure.
pub type LoadOutcome = Result<Publication, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Route changed to a publication slug.
    OpenPublication(String),
    /// Loader completion for the request tagged with `generation`.
    PublicationLoaded {
        generation: Generation,
        outcome: LoadOutcome,
    },
    /// User clicked Next.
    NextClicked,
    /// User clicked Previous.
    PrevClicked,
    /// User clicked a thumbnail in the strip.
    ThumbnailClicked(usize),
    KeyPressed(Key),
    /// Touch began at horizontal position `x`.
    TouchStarted { x: f32 },
    /// Touch ended at horizontal position `x`.
    TouchEnded { x: f32 },
    /// Page-turn animation `flip_id` finished.
    FlipFinished { flip_id: u64 },
    Resized(Viewport),
}
