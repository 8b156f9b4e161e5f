use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::Publication;

pub const UNTITLED: &str = "Untitled issue";
pub const MISSING_DATE: &str = "Date unavailable";
pub const MISSING_AUTHOR: &str = "Unknown author";
pub const MISSING_PUBLISHER: &str = "Unknown publisher";
pub const MISSING_SUMMARY: &str = "No summary available.";
pub const MISSING_KEYWORDS: &str = "No keywords";

/// Display-ready publication metadata. Every slot is always filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataPanel {
    pub title: String,
    pub date: String,
    pub author: String,
    pub publisher: String,
    pub summary: String,
    pub keywords: String,
    pub cover_url: Option<String>,
}

impl MetadataPanel {
    pub fn from_publication(publication: &Publication) -> Self {
        Self {
            title: or_fallback(Some(&publication.title), UNTITLED),
            date: publication
                .date_published
                .as_deref()
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(format_publish_date)
                .unwrap_or_else(|| MISSING_DATE.to_string()),
            author: or_fallback(publication.author.as_ref(), MISSING_AUTHOR),
            publisher: or_fallback(publication.publisher.as_ref(), MISSING_PUBLISHER),
            summary: or_fallback(publication.cover_summary.as_ref(), MISSING_SUMMARY),
            keywords: format_keywords(&publication.keywords),
            cover_url: publication.cover_url().map(ToOwned::to_owned),
        }
    }
}

/// Renders an ISO date or RFC 3339 timestamp as `June 5, 2025`.
///
/// Values in any other shape are returned verbatim.
pub fn format_publish_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn or_fallback(value: Option<&String>, fallback: &str) -> String {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn format_keywords(keywords: &[String]) -> String {
    let tags: Vec<String> = keywords
        .iter()
        .map(|kw| kw.trim())
        .filter(|kw| !kw.is_empty())
        .map(|kw| format!("#{kw}"))
        .collect();
    if tags.is_empty() {
        MISSING_KEYWORDS.to_string()
    } else {
        tags.join(" ")
    }
}
