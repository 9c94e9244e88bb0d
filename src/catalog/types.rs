use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty rating carried by templates. Lowercase on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Difficulty::Beginner => Difficulty::Intermediate,
            Difficulty::Intermediate => Difficulty::Advanced,
            Difficulty::Advanced => Difficulty::Beginner,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the publish wizard collects. Posted to the catalog as-is,
/// camelCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateDraft {
    pub name: String,
    pub author: String,
    pub description: String,
    pub license: String,
    pub content: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub language: String,
    pub tags: Vec<String>,
}

/// Template body and metadata as stored by the catalog. Every field is
/// optional on the wire; older records miss most of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateContent {
    pub author: String,
    pub description: String,
    pub prompt: String,
    pub license: Option<String>,
    pub tags: Vec<String>,
    pub category: String,
    pub difficulty: Difficulty,
    pub language: Option<String>,
}

/// A published template as returned by the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub readme: String,
    #[serde(default)]
    pub content: TemplateContent,
    #[serde(default)]
    pub downloads: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Record flattened for display, with the update timestamp humanized.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogListing {
    pub id: String,
    pub name: String,
    pub description: String,
    pub updated: String,
    pub tags: Vec<String>,
    pub author: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub license: String,
    pub downloads: u64,
}

/// Search parameters for the catalog listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: None,
            category: None,
            difficulty: None,
            limit: 20,
            offset: 0,
        }
    }
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Query-string pairs in the order the service documents them. The
    /// free-text filter travels as `search`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(query) = &self.query {
            pairs.push(("search", query.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(difficulty) = self.difficulty {
            pairs.push(("difficulty", difficulty.label().to_ascii_lowercase()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("offset", self.offset.to_string()));
        pairs
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub items: Vec<TemplateRecord>,
    pub total: u64,
    pub has_more: bool,
}
