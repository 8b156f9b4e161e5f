//! Folio core: flipbook viewer state machine, layout and admin form rules.
mod effect;
mod forms;
mod layout;
mod metadata;
mod msg;
mod navigation;
mod publication;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use forms::{
    split_comma_list, suggest_slug, BlogDraft, BlogPayload, BlogStatus, CategoryDraft,
    CategoryPayload, ContentType, Credentials, FieldError, LoginForm, MagazineDraft,
    MagazinePayload, ValidationErrors,
};
pub use layout::{
    compute_layout, AspectRatio, Breakpoints, DeviceClass, PageLayout, SpreadMode, Viewport,
};
pub use metadata::{format_publish_date, MetadataPanel};
pub use msg::{LoadOutcome, Msg};
pub use navigation::{classify_swipe, intent_for_key, page_label, Key, NavIntent, SwipeSettings};
pub use publication::{Generation, PageRef, Publication};
pub use state::{Content, FlipPhase, ViewerSettings, ViewerState};
pub use update::update;
pub use view_model::{
    AppViewModel, ContentView, NavControls, ThumbnailView, LOADING_TEXT, NO_PAGES_TEXT,
};
