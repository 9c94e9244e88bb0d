use crate::catalog::types::{
    CatalogListing, SearchFilters, SearchPage, TemplateDraft, TemplateRecord,
};
use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const LIST_PATH: &str = "/api/v1/prompts";

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    prompts: Vec<TemplateRecord>,
    #[serde(default)]
    total: u64,
}

/// Blocking client for the template catalog service.
pub struct CatalogClient {
    base_url: String,
    timeout: Duration,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn search(&self, filters: &SearchFilters) -> Result<SearchPage, CatalogError> {
        let url = format!("{}{LIST_PATH}", self.base_url);
        let mut request = ureq::get(&url).timeout(self.timeout);
        for (name, value) in filters.query_pairs() {
            request = request.query(name, &value);
        }
        debug!(url = %url, "searching the catalog");
        let response = request.call().map_err(map_ureq_error)?;
        let list: ListResponse = response
            .into_json()
            .map_err(|err| CatalogError::Decode(Box::new(err)))?;
        Ok(page_from(list, filters.offset))
    }

    pub fn get(&self, id: &str) -> Result<TemplateRecord, CatalogError> {
        let url = format!("{}{LIST_PATH}/{id}", self.base_url);
        let response = ureq::get(&url)
            .timeout(self.timeout)
            .call()
            .map_err(map_ureq_error)?;
        response
            .into_json()
            .map_err(|err| CatalogError::Decode(Box::new(err)))
    }

    pub fn create(&self, draft: &TemplateDraft) -> Result<TemplateRecord, CatalogError> {
        let url = format!("{}{LIST_PATH}", self.base_url);
        debug!(name = %draft.name, "publishing a draft to the catalog");
        let response = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(draft)
            .map_err(map_ureq_error)?;
        response
            .into_json()
            .map_err(|err| CatalogError::Decode(Box::new(err)))
    }
}

fn page_from(list: ListResponse, offset: u32) -> SearchPage {
    let has_more = (offset as u64) + (list.prompts.len() as u64) < list.total;
    SearchPage {
        items: list.prompts,
        total: list.total,
        has_more,
    }
}

fn map_ureq_error(err: ureq::Error) -> CatalogError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            CatalogError::Status {
                status,
                message: status_message(body),
            }
        }
        transport => CatalogError::Transport(Box::new(transport)),
    }
}

/// Pulls a human-readable message out of an error body. The service sends
/// `{"error": …}`; older deployments send `{"message": …}` or plain text.
fn status_message(body: String) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        message: Option<String>,
    }
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body)
        && let Some(message) = parsed.error.or(parsed.message)
    {
        return message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no details".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Turns a day count into the relative phrasing the catalog UI shows.
/// Future timestamps clamp to `today`.
pub fn humanize_age(days: i64) -> String {
    if days <= 0 {
        "today".to_string()
    } else if days == 1 {
        "1 day ago".to_string()
    } else if days < 7 {
        format!("{days} days ago")
    } else if days < 30 {
        let weeks = days / 7;
        if weeks == 1 {
            "1 week ago".to_string()
        } else {
            format!("{weeks} weeks ago")
        }
    } else if days < 365 {
        let months = days / 30;
        if months == 1 {
            "1 month ago".to_string()
        } else {
            format!("{months} months ago")
        }
    } else {
        let years = days / 365;
        if years == 1 {
            "1 year ago".to_string()
        } else {
            format!("{years} years ago")
        }
    }
}

impl CatalogListing {
    /// Flattens a record for display. Records without a license fall back
    /// to MIT, matching what the catalog assumes at publish time.
    pub fn from_record(record: &TemplateRecord, now: DateTime<Utc>) -> Self {
        let days = (now - record.updated_at).num_days();
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            description: record.content.description.clone(),
            updated: humanize_age(days),
            tags: record.content.tags.clone(),
            author: record.content.author.clone(),
            category: record.content.category.clone(),
            difficulty: record.content.difficulty,
            license: record
                .content
                .license
                .clone()
                .unwrap_or_else(|| "MIT".to_string()),
            downloads: record.downloads,
        }
    }
}
