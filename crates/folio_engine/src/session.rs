//! Admin authentication: the bearer token, where it is kept, and the
//! authorized calls that depend on it.

use bytes::Bytes;
use folio_core::{BlogPayload, CategoryPayload, MagazinePayload};
use folio_logging::{folio_debug, folio_info, folio_warn};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::client::{read_json, ApiClient};
use crate::envelope::{AdminAck, UploadDto};
use crate::error::{map_reqwest_error, ApiError};
use crate::persist::PersistError;

/// Key the token is stored under.
pub const TOKEN_KEY: &str = "admin_token";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token storage failed: {0}")]
    Persist(#[from] PersistError),
    #[error("token could not be encoded: {0}")]
    Encode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Durable home of the admin token.
pub trait TokenStore: Send {
    fn load(&self) -> Option<String>;
    fn save(&mut self, token: &str) -> Result<(), TokenStoreError>;
    fn clear(&mut self) -> Result<(), TokenStoreError>;
}

/// Process-lifetime store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn save(&mut self, token: &str) -> Result<(), TokenStoreError> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TokenStoreError> {
        self.token = None;
        Ok(())
    }
}

pub struct Session {
    token: Option<String>,
    store: Box<dyn TokenStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    /// Restores whatever token the store holds.
    pub fn init(store: Box<dyn TokenStore>) -> Self {
        let token = store.load().filter(|token| !token.trim().is_empty());
        folio_debug!("Session restored authenticated={}", token.is_some());
        Self { token, store }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn establish(&mut self, token: impl Into<String>) -> Result<(), TokenStoreError> {
        let token = token.into();
        self.store.save(&token)?;
        self.token = Some(token);
        folio_info!("Admin session established");
        Ok(())
    }

    /// Forgets the token in memory and in the store.
    pub fn teardown(&mut self) {
        self.token = None;
        if let Err(err) = self.store.clear() {
            folio_warn!("Failed to clear stored token: {}", err);
        }
        folio_info!("Admin session cleared");
    }

    fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

/// Authorized calls. Borrowing the session lets a rejected token clear it.
pub struct AdminClient<'a> {
    api: &'a ApiClient,
    session: &'a mut Session,
}

impl<'a> AdminClient<'a> {
    pub fn new(api: &'a ApiClient, session: &'a mut Session) -> Self {
        Self { api, session }
    }

    pub async fn verify(&mut self) -> Result<AdminAck, ApiError> {
        let url = self.api.endpoint(&["auth", "admin", "verify"])?;
        let request = self.api.request(Method::POST, url);
        self.send_ack(request).await
    }

    pub async fn create_blog(&mut self, payload: &BlogPayload) -> Result<AdminAck, ApiError> {
        let url = self.api.endpoint(&["blogs"])?;
        self.send_json(Method::POST, url, payload).await
    }

    pub async fn update_blog(
        &mut self,
        id: &str,
        payload: &BlogPayload,
    ) -> Result<AdminAck, ApiError> {
        let url = self.api.endpoint(&["blogs", id])?;
        self.send_json(Method::PUT, url, payload).await
    }

    pub async fn delete_blog(&mut self, id: &str) -> Result<AdminAck, ApiError> {
        let url = self.api.endpoint(&["blogs", id])?;
        let request = self.api.request(Method::DELETE, url);
        self.send_ack(request).await
    }

    /// Uploads an image and returns its public URL.
    pub async fn upload_image(
        &mut self,
        file_name: &str,
        data: impl Into<Bytes>,
    ) -> Result<String, ApiError> {
        let url = self.api.endpoint(&["blogs", "upload"])?;
        let form = Form::new().part("image", file_part(file_name, data.into())?);
        let request = self.api.request(Method::POST, url).multipart(form);
        let response = self.send(request).await?;
        let dto: UploadDto = read_json(response).await?;
        dto.into_url()
    }

    pub async fn create_category(
        &mut self,
        payload: &CategoryPayload,
    ) -> Result<AdminAck, ApiError> {
        let url = self.api.endpoint(&["categories"])?;
        self.send_json(Method::POST, url, payload).await
    }

    pub async fn create_magazine(
        &mut self,
        payload: &MagazinePayload,
    ) -> Result<AdminAck, ApiError> {
        let url = self.api.endpoint(&["magazines"])?;
        self.send_json(Method::POST, url, payload).await
    }

    pub async fn upload_magazine_pdf(
        &mut self,
        slug: &str,
        file_name: &str,
        data: impl Into<Bytes>,
    ) -> Result<AdminAck, ApiError> {
        let url = self.api.endpoint(&["magazines", slug, "pdf"])?;
        let form = Form::new().part("pdf", file_part(file_name, data.into())?);
        let request = self.api.request(Method::POST, url).multipart(form);
        self.send_ack(request).await
    }

    async fn send_json<T: Serialize + ?Sized>(
        &mut self,
        method: Method,
        url: Url,
        payload: &T,
    ) -> Result<AdminAck, ApiError> {
        let request = self.api.request(method, url).json(payload);
        self.send_ack(request).await
    }

    async fn send_ack(&mut self, request: RequestBuilder) -> Result<AdminAck, ApiError> {
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        // Mutations may answer with an empty body.
        let mut ack: AdminAck = if body.is_empty() {
            AdminAck::default()
        } else {
            serde_json::from_slice(&body).unwrap_or_default()
        };
        ack.status = status;
        Ok(ack)
    }

    /// Attaches the bearer token and maps failures; a rejected token ends the session.
    async fn send(&mut self, request: RequestBuilder) -> Result<Response, ApiError> {
        let Some(bearer) = self.session.bearer() else {
            return Err(ApiError::unauthorized("Not logged in"));
        };
        let response = request
            .header(AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let err = crate::error::error_from_status(status.as_u16(), &body);
        if err.is_unauthorized() {
            folio_warn!("Admin token rejected with status {}", status.as_u16());
            self.session.teardown();
        }
        Err(err)
    }
}

fn file_part(file_name: &str, data: Bytes) -> Result<Part, ApiError> {
    let len = data.len() as u64;
    Part::stream_with_length(data, len)
        .file_name(file_name.to_string())
        .mime_str(content_type_for(file_name))
        .map_err(map_reqwest_error)
}

/// Upload content type by file extension; the backend filters on it.
fn content_type_for(file_name: &str) -> &'static str {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
