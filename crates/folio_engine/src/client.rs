use std::time::Duration;

use folio_core::{Credentials, Publication};
use folio_logging::{folio_debug, folio_info};
use reqwest::{RequestBuilder, Response};
use url::Url;
use serde::de::DeserializeOwned;

use crate::envelope::{
    BlogDto, BlogListDto, BlogPage, BlogPost, Category, CategoryListDto, DataEnvelope,
    MagazineDto, MagazineSummary, Paginated, PaginatedDto, TokenDto,
};
use crate::error::{error_from_status, map_reqwest_error, ApiError};
use crate::prefetch::ReqwestImageFetcher;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    /// Whole-request deadline; `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
    /// Upper bound on a single prefetched image.
    pub prefetch_max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            prefetch_max_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Filters for blog listings and search. Absent fields are left out of the query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub tag: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl BlogQuery {
    fn append_to(&self, url: &mut Url) {
        let pairs = [
            ("q", self.q.clone()),
            ("category", self.category.clone()),
            ("author", self.author.clone()),
            ("tag", self.tag.clone()),
            ("page", self.page.map(|p| p.to_string())),
            ("limit", self.limit.map(|l| l.to_string())),
        ];
        let present: Vec<(&str, String)> = pairs
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (key, v))
            })
            .collect();
        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }
    }
}

#[async_trait::async_trait]
pub trait PublicationSource: Send + Sync {
    async fn fetch_publication(&self, slug: &str) -> Result<Publication, ApiError>;
}

/// Typed client for the backend REST contract.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    settings: ClientSettings,
}

impl ApiClient {
    pub fn new(base_url: &str, settings: ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)
            .map_err(|err| ApiError::network(format!("invalid base url {base_url}: {err}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::network(format!(
                "base url must be http or https: {base_url}"
            )));
        }

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ApiError::network(err.to_string()))?;

        Ok(Self {
            http,
            base,
            settings,
        })
    }

    /// Image fetcher sharing this client's connection pool.
    pub fn image_fetcher(&self) -> ReqwestImageFetcher {
        ReqwestImageFetcher::new(self.http.clone(), self.settings.prefetch_max_bytes)
    }

    /// `{base}/api/{segments...}`, each segment percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| ApiError::network(format!("base url cannot carry a path: {}", self.base)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        folio_debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    pub async fn list_magazines(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Paginated<MagazineSummary>, ApiError> {
        let mut url = self.endpoint(&["magazines"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        let dto: PaginatedDto<MagazineDto> = self.get_json(url).await?;
        dto.into_magazines()
    }

    pub async fn latest_magazines(&self) -> Result<Vec<MagazineSummary>, ApiError> {
        let url = self.endpoint(&["magazines", "latest"])?;
        let dto: DataEnvelope<Vec<MagazineDto>> = self.get_json(url).await?;
        Ok(dto
            .into_data("latest magazines")?
            .into_iter()
            .map(MagazineDto::into_summary)
            .collect())
    }

    pub async fn fetch_blog(&self, slug: &str) -> Result<BlogPost, ApiError> {
        let url = self.endpoint(&["blogs", slug])?;
        let dto: DataEnvelope<BlogDto> = self.get_json(url).await?;
        Ok(dto.into_data("blog")?.into())
    }

    pub async fn latest_blogs(&self) -> Result<BlogPage, ApiError> {
        let url = self.endpoint(&["blogs", "latest"])?;
        let dto: BlogListDto = self.get_json(url).await?;
        dto.into_page()
    }

    pub async fn older_blogs(&self, query: &BlogQuery) -> Result<BlogPage, ApiError> {
        let mut url = self.endpoint(&["blogs", "older"])?;
        query.append_to(&mut url);
        let dto: BlogListDto = self.get_json(url).await?;
        dto.into_page()
    }

    pub async fn search_blogs(&self, query: &BlogQuery) -> Result<BlogPage, ApiError> {
        let mut url = self.endpoint(&["blogs", "search"])?;
        query.append_to(&mut url);
        let dto: BlogListDto = self.get_json(url).await?;
        dto.into_page()
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint(&["categories"])?;
        let dto: CategoryListDto = self.get_json(url).await?;
        dto.into_categories()
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let url = self.endpoint(&["auth", "admin", "login"])?;
        folio_info!("Logging in as {}", credentials.email);
        let response = self
            .http
            .post(url)
            .json(credentials)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let dto: DataEnvelope<TokenDto> = read_json(response).await?;
        dto.into_data("login")?
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::malformed("login response has no token"))
    }
}

#[async_trait::async_trait]
impl PublicationSource for ApiClient {
    async fn fetch_publication(&self, slug: &str) -> Result<Publication, ApiError> {
        let url = self.endpoint(&["magazines", slug])?;
        let dto: DataEnvelope<MagazineDto> = self.get_json(url).await?;
        dto.into_data("magazine")?.into_publication(slug)
    }
}

/// Reads a JSON body, turning non-success statuses into [`ApiError`].
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        return Err(error_from_status(status.as_u16(), &body));
    }
    serde_json::from_slice(&body).map_err(|err| ApiError::malformed(err.to_string()))
}
