use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{map_reqwest_error, ApiError};

/// A page image held in memory so the next turn renders without a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefetchedImage {
    pub url: String,
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<PrefetchedImage, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestImageFetcher {
    http: reqwest::Client,
    max_bytes: u64,
}

impl ReqwestImageFetcher {
    pub fn new(http: reqwest::Client, max_bytes: u64) -> Self {
        Self { http, max_bytes }
    }

    fn too_large(&self, url: &str, actual: u64) -> ApiError {
        ApiError::malformed(format!(
            "image {url} exceeds {} bytes ({actual})",
            self.max_bytes
        ))
    }
}

#[async_trait::async_trait]
impl ImageFetcher for ReqwestImageFetcher {
    async fn fetch_image(&self, url: &str) -> Result<PrefetchedImage, ApiError> {
        let parsed = Url::parse(url)
            .map_err(|err| ApiError::network(format!("invalid image url {url}: {err}")))?;
        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: None,
                details: Vec::new(),
            });
        }
        if let Some(len) = response.content_length() {
            if len > self.max_bytes {
                return Err(self.too_large(url, len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        let mut buffer = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = (buffer.len() + chunk.len()) as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(url, next_len));
            }
            buffer.extend_from_slice(&chunk);
        }

        Ok(PrefetchedImage {
            url: url.to_string(),
            bytes: buffer.freeze(),
            content_type,
        })
    }
}
