//! Folio engine: backend client, admin session and background IO.
mod client;
mod engine;
mod envelope;
mod error;
mod persist;
mod prefetch;
mod session;

pub use client::{ApiClient, BlogQuery, ClientSettings, PublicationSource};
pub use engine::{EngineEvent, EngineEvents, EngineHandle};
pub use envelope::{
    AdminAck, BlogPage, BlogPost, Category, MagazineSummary, Paginated, Pagination,
};
pub use error::ApiError;
pub use persist::{ensure_state_dir, PersistError, StateFile};
pub use prefetch::{ImageFetcher, PrefetchedImage, ReqwestImageFetcher};
pub use session::{AdminClient, MemoryTokenStore, Session, TokenStore, TokenStoreError, TOKEN_KEY};
