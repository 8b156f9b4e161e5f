use crate::layout::PageLayout;
use crate::metadata::MetadataPanel;
use crate::navigation::page_label;
use crate::state::Content;
use crate::{PageRef, ViewerState};

pub const LOADING_TEXT: &str = "Loading magazine...";
pub const NO_PAGES_TEXT: &str = "No pages found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    NotLoaded,
    Failed { message: String },
    NoPages,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub page_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailView {
    pub index: usize,
    pub image_url: String,
    pub is_visible: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub slug: Option<String>,
    pub loading: bool,
    pub content: ContentView,
    pub metadata: Option<MetadataPanel>,
    pub visible_pages: Vec<PageRef>,
    pub thumbnails: Vec<ThumbnailView>,
    pub controls: NavControls,
    pub layout: PageLayout,
    pub current_page_index: usize,
    pub page_count: usize,
    pub is_flipping: bool,
}

impl AppViewModel {
    pub(crate) fn build(state: &ViewerState) -> Self {
        let current = state.current_page_index();
        let visible = state.visible_count();
        let (content, metadata) = match state.content() {
            Content::NotLoaded => (ContentView::NotLoaded, None),
            Content::Failed(message) => (
                ContentView::Failed {
                    message: message.clone(),
                },
                None,
            ),
            Content::Ready(publication) if publication.page_count() == 0 => (
                ContentView::NoPages,
                Some(MetadataPanel::from_publication(publication)),
            ),
            Content::Ready(publication) => (
                ContentView::Ready,
                Some(MetadataPanel::from_publication(publication)),
            ),
        };

        let pages = state.publication().map(|p| p.pages()).unwrap_or_default();
        let visible_pages = pages.iter().skip(current).take(visible).cloned().collect();
        let thumbnails = pages
            .iter()
            .map(|page| ThumbnailView {
                index: page.index,
                image_url: page.image_url.clone(),
                is_visible: page.index >= current && page.index < current + visible,
                enabled: !state.is_flipping(),
            })
            .collect();

        Self {
            slug: state.slug().map(ToOwned::to_owned),
            loading: state.is_loading(),
            content,
            metadata,
            visible_pages,
            thumbnails,
            controls: NavControls {
                prev_enabled: state.can_request_prev(),
                next_enabled: state.can_request_next(),
                page_label: page_label(current, visible, state.page_count()),
            },
            layout: state.layout(),
            current_page_index: current,
            page_count: state.page_count(),
            is_flipping: state.is_flipping(),
        }
    }
}
