//! Admin form rules: field checks run before anything is submitted, and
//! conversion of raw form input into request payloads.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn summary(&self) -> String {
        let messages: Vec<&str> = self.errors.iter().map(|err| err.message.as_str()).collect();
        format!("Validation error: {}", messages.join("; "))
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Splits comma separated input, trimming entries and dropping empty ones.
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Derives a URL slug from a title: `"Summer Issue 2025!"` -> `"summer-issue-2025"`.
pub fn suggest_slug(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl BlogStatus {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlogStatus::Draft => write!(f, "draft"),
            BlogStatus::Published => write!(f, "published"),
            BlogStatus::Archived => write!(f, "archived"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Html,
    Markdown,
}

impl ContentType {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "html" => Some(Self::Html),
            "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

/// Raw blog editor input; every field is form text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub tags: String,
    pub category: String,
    pub featured_image: String,
    pub status: String,
    pub content_type: String,
    pub author: String,
    pub likes_count: String,
    pub saves_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPayload {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub featured_image: String,
    pub status: BlogStatus,
    pub content_type: ContentType,
    pub author: String,
    pub likes_count: u64,
    pub saves_count: u64,
}

impl BlogDraft {
    pub fn validate(&self) -> Result<BlogPayload, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("title", "Title is required");
        } else if title.chars().count() > 100 {
            errors.push("title", "Title cannot exceed 100 characters");
        }
        if self.content.trim().chars().count() < 50 {
            errors.push("content", "Content must be at least 50 characters");
        }
        if self.excerpt.trim().chars().count() > 300 {
            errors.push("excerpt", "Excerpt cannot exceed 300 characters");
        }
        if self.featured_image.trim().is_empty() {
            errors.push("featuredImage", "Featured image is required");
        }
        let status = BlogStatus::parse(&self.status);
        if status.is_none() {
            errors.push("status", "Status must be draft, published or archived");
        }
        let content_type = ContentType::parse(&self.content_type);
        if content_type.is_none() {
            errors.push("contentType", "Content type must be html or markdown");
        }
        if self.author.trim().is_empty() {
            errors.push("author", "Author is required");
        }
        let likes = parse_count(&self.likes_count, "likesCount", "Likes", &mut errors);
        let saves = parse_count(&self.saves_count, "savesCount", "Saves", &mut errors);

        errors.into_result(|| BlogPayload {
            title: title.to_string(),
            content: self.content.trim().to_string(),
            excerpt: non_empty(&self.excerpt),
            tags: split_comma_list(&self.tags),
            category: non_empty(&self.category),
            featured_image: self.featured_image.trim().to_string(),
            status: status.unwrap_or_default(),
            content_type: content_type.unwrap_or_default(),
            author: self.author.trim().to_string(),
            likes_count: likes,
            saves_count: saves,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MagazineDraft {
    pub title: String,
    pub slug: String,
    pub date_of_publish: String,
    pub author: String,
    pub publisher: String,
    pub cover_summary: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagazinePayload {
    pub title: String,
    pub slug: String,
    pub date_of_publish: String,
    pub author: String,
    pub publisher: String,
    pub cover_summary: String,
    pub keywords: Vec<String>,
}

impl MagazineDraft {
    pub fn validate(&self) -> Result<MagazinePayload, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("title", "Title is required");
        } else if title.chars().count() > 120 {
            errors.push("title", "Title too long");
        }
        let slug = self.slug.trim();
        if slug.is_empty() {
            errors.push("slug", "Slug is required");
        } else if !slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            errors.push("slug", "Use lowercase, numbers and dashes only");
        }
        require(&self.date_of_publish, "dateOfPublish", "Publish date is required", &mut errors);
        require(&self.author, "author", "Author is required", &mut errors);
        require(&self.publisher, "publisher", "Publisher is required", &mut errors);
        if self.cover_summary.trim().chars().count() > 500 {
            errors.push("coverSummary", "Summary too long");
        }

        errors.into_result(|| MagazinePayload {
            title: title.to_string(),
            slug: slug.to_string(),
            date_of_publish: self.date_of_publish.trim().to_string(),
            author: self.author.trim().to_string(),
            publisher: self.publisher.trim().to_string(),
            cover_summary: self.cover_summary.trim().to_string(),
            keywords: split_comma_list(&self.keywords),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CategoryDraft {
    pub fn validate(&self) -> Result<CategoryPayload, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require(&self.name, "name", "Category name is required", &mut errors);
        errors.into_result(|| CategoryPayload {
            name: self.name.trim().to_string(),
            description: non_empty(&self.description),
            color: non_empty(&self.color),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let email = self.email.trim();
        if !looks_like_email(email) {
            errors.push("email", "Invalid email");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        errors.into_result(|| Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain.split('.').count() >= 2
                && domain.split('.').all(|label| !label.is_empty())
        }
        _ => false,
    }
}

fn require(value: &str, field: &'static str, message: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.push(field, message);
    }
}

fn parse_count(raw: &str, field: &'static str, label: &str, errors: &mut ValidationErrors) -> u64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<i64>() {
        Ok(value) if value >= 0 => value as u64,
        Ok(_) => {
            errors.push(field, format!("{label} must be 0 or more"));
            0
        }
        Err(_) => {
            errors.push(field, format!("{label} must be a whole number"));
            0
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
