//! Wire shapes of the backend and their conversion into one typed result per
//! endpoint. Nothing outside this module sees the raw `data`/`blogs` wrappers.

use folio_core::Publication;
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub(crate) data: Option<T>,
}

impl<T> DataEnvelope<T> {
    pub(crate) fn into_data(self, what: &str) -> Result<T, ApiError> {
        self.data
            .ok_or_else(|| ApiError::malformed(format!("{what} response has no data field")))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageDto {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MagazineDto {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    slug: Option<String>,
    title: Option<String>,
    date_of_publish: Option<String>,
    author: Option<String>,
    publisher: Option<String>,
    cover_summary: Option<String>,
    cover_image: Option<String>,
    keywords: Option<Vec<String>>,
    pages: Option<Vec<PageDto>>,
}

impl MagazineDto {
    fn identity(&self, fallback: &str) -> String {
        self.slug
            .clone()
            .or_else(|| self.id.clone())
            .or_else(|| self.mongo_id.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Viewer form. A missing `pages` field is malformed; an empty list is not.
    pub(crate) fn into_publication(self, slug: &str) -> Result<Publication, ApiError> {
        let id = self.identity(slug);
        let Some(pages) = self.pages else {
            return Err(ApiError::malformed("publication has no pages field"));
        };
        let mut publication = Publication::new(id, self.title.unwrap_or_default())
            .with_page_urls(pages.into_iter().filter_map(|page| page.url));
        publication.author = self.author;
        publication.publisher = self.publisher;
        publication.date_published = self.date_of_publish;
        publication.cover_summary = self.cover_summary;
        publication.keywords = self.keywords.unwrap_or_default();
        Ok(publication)
    }

    pub(crate) fn into_summary(self) -> MagazineSummary {
        MagazineSummary {
            id: self.identity(""),
            slug: self.slug.clone(),
            title: self.title.unwrap_or_default(),
            date_of_publish: self.date_of_publish,
            author: self.author,
            cover_image: self.cover_image.or_else(|| {
                self.pages
                    .as_ref()
                    .and_then(|pages| pages.iter().find_map(|page| page.url.clone()))
            }),
            page_count: self.pages.as_ref().map_or(0, Vec::len),
        }
    }
}

/// Listing entry for a magazine issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagazineSummary {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub date_of_publish: Option<String>,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub page_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaginatedDto<T> {
    data: Option<Vec<T>>,
    #[serde(default)]
    pagination: Pagination,
}

impl PaginatedDto<MagazineDto> {
    pub(crate) fn into_magazines(self) -> Result<Paginated<MagazineSummary>, ApiError> {
        let data = self
            .data
            .ok_or_else(|| ApiError::malformed("magazine listing has no data field"))?;
        Ok(Paginated {
            items: data.into_iter().map(MagazineDto::into_summary).collect(),
            pagination: self.pagination,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BlogDto {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    slug: Option<String>,
    title: Option<String>,
    excerpt: Option<String>,
    content: Option<String>,
    author: Option<String>,
    tags: Option<Vec<String>>,
    category: Option<serde_json::Value>,
    featured_image: Option<String>,
    status: Option<String>,
    created_at: Option<String>,
}

impl From<BlogDto> for BlogPost {
    fn from(dto: BlogDto) -> Self {
        // Populated categories arrive as objects, bare ones as ids.
        let category = match dto.category {
            Some(serde_json::Value::String(name)) => Some(name),
            Some(serde_json::Value::Object(map)) => map
                .get("name")
                .or_else(|| map.get("_id"))
                .and_then(|v| v.as_str())
                .map(ToOwned::to_owned),
            _ => None,
        };
        BlogPost {
            id: dto.mongo_id.or(dto.id).unwrap_or_default(),
            slug: dto.slug.unwrap_or_default(),
            title: dto.title.unwrap_or_default(),
            excerpt: dto.excerpt,
            content: dto.content.unwrap_or_default(),
            author: dto.author,
            tags: dto.tags.unwrap_or_default(),
            category,
            featured_image: dto.featured_image,
            status: dto.status,
            created_at: dto.created_at,
        }
    }
}

/// One page of blog posts with optional paging hints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogPage {
    pub posts: Vec<BlogPost>,
    pub next_page: Option<u32>,
    pub previous_page: Option<u32>,
    pub total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BlogListDto {
    blogs: Option<Vec<BlogDto>>,
    data: Option<Vec<BlogDto>>,
    next_page: Option<u32>,
    previous_page: Option<u32>,
    total_pages: Option<u32>,
}

impl BlogListDto {
    pub(crate) fn into_page(self) -> Result<BlogPage, ApiError> {
        let posts = self
            .blogs
            .or(self.data)
            .ok_or_else(|| ApiError::malformed("blog listing has neither blogs nor data"))?;
        Ok(BlogPage {
            posts: posts.into_iter().map(BlogPost::from).collect(),
            next_page: self.next_page,
            previous_page: self.previous_page,
            total_pages: self.total_pages,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryListDto {
    data: Option<Vec<Category>>,
    categories: Option<Vec<Category>>,
}

impl CategoryListDto {
    pub(crate) fn into_categories(self) -> Result<Vec<Category>, ApiError> {
        self.data
            .or(self.categories)
            .ok_or_else(|| ApiError::malformed("category listing has no data field"))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenDto {
    pub(crate) token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadDto {
    url: Option<String>,
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: Option<String>,
}

impl UploadDto {
    pub(crate) fn into_url(self) -> Result<String, ApiError> {
        self.url
            .or(self.data.and_then(|data| data.url))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ApiError::malformed("upload response has no url"))
    }
}

/// Acknowledgement of an admin mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AdminAck {
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magazine_without_pages_field_is_malformed() {
        let dto: DataEnvelope<MagazineDto> =
            serde_json::from_str(r#"{"data":{"title":"Issue"}}"#).unwrap();
        let err = dto.into_data("magazine").unwrap().into_publication("issue");
        assert!(matches!(err, Err(ApiError::Malformed { .. })));
    }

    #[test]
    fn null_lists_read_as_empty() {
        let dto: DataEnvelope<MagazineDto> = serde_json::from_str(
            r#"{"data":{"title":"Issue","keywords":null,"pages":[{"url":"https://cdn/p1.jpg"}]}}"#,
        )
        .unwrap();
        let publication = dto.into_data("magazine").unwrap().into_publication("issue").unwrap();
        assert!(publication.keywords.is_empty());
        assert_eq!(publication.page_count(), 1);

        let dto: BlogDto = serde_json::from_str(r#"{"title":"t","tags":null}"#).unwrap();
        assert!(BlogPost::from(dto).tags.is_empty());
    }

    #[test]
    fn blog_category_object_is_flattened_to_name() {
        let dto: BlogDto = serde_json::from_str(
            r#"{"_id":"b1","slug":"s","title":"T","category":{"_id":"c1","name":"Interiors"}}"#,
        )
        .unwrap();
        let post = BlogPost::from(dto);
        assert_eq!(post.id, "b1");
        assert_eq!(post.category.as_deref(), Some("Interiors"));
    }

    #[test]
    fn blog_listing_accepts_either_wrapper() {
        let blogs: BlogListDto = serde_json::from_str(r#"{"blogs":[],"nextPage":2}"#).unwrap();
        assert_eq!(blogs.into_page().unwrap().next_page, Some(2));

        let data: BlogListDto = serde_json::from_str(r#"{"data":[{"title":"x"}]}"#).unwrap();
        assert_eq!(data.into_page().unwrap().posts.len(), 1);

        let neither: BlogListDto = serde_json::from_str(r#"{}"#).unwrap();
        assert!(neither.into_page().is_err());
    }
}
