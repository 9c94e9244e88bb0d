use thiserror::Error;

/// Failure surfaced by a submit handler. The wizard shows the display
/// string, returns to editing, and lets the user retry; the source chain
/// stays available for logging.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SubmitError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SubmitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CatalogError> for SubmitError {
    fn from(err: CatalogError) -> Self {
        Self::with_source(err.to_string(), err)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to reach the catalog service")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to decode catalog response")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save settings to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("No config directory available on this platform")]
    NoConfigDir,
}
