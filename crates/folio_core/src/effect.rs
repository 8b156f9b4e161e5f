use crate::Generation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPublication { generation: Generation, slug: String },
    /// The request is superseded; its response will be discarded anyway.
    CancelFetch { generation: Generation },
    /// Run the page-turn animation, then report `Msg::FlipFinished`.
    StartFlip {
        flip_id: u64,
        from: usize,
        to: usize,
        duration_ms: u64,
    },
    PrefetchImages { urls: Vec<String> },
}
