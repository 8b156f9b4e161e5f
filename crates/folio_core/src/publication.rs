use crate::layout::AspectRatio;

/// Monotonic id of a publication load request.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    pub index: usize,
    pub image_url: String,
}

/// A digitized magazine issue. Pages always form a contiguous `0..N` run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub date_published: Option<String>,
    pub cover_summary: Option<String>,
    pub keywords: Vec<String>,
    pub aspect_ratio: Option<AspectRatio>,
    pages: Vec<PageRef>,
}

impl Publication {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Replaces the page list. Blank URLs are dropped and the rest re-indexed.
    pub fn with_page_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.pages = urls
            .into_iter()
            .filter_map(|url| {
                let url = url.as_ref().trim();
                (!url.is_empty()).then(|| url.to_string())
            })
            .enumerate()
            .map(|(index, image_url)| PageRef { index, image_url })
            .collect();
        self
    }

    pub fn pages(&self) -> &[PageRef] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&PageRef> {
        self.pages.get(index)
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.pages.first().map(|page| page.image_url.as_str())
    }
}
