pub mod client;
pub mod types;

pub use client::{CatalogClient, humanize_age};
pub use types::{
    CatalogListing, Difficulty, SearchFilters, SearchPage, TemplateContent, TemplateDraft,
    TemplateRecord,
};
