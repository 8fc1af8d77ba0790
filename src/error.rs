use salesreport_traits::{DataAccessError, ResourceError};
use salesreport_wordml::WordmlError;
use thiserror::Error;

/// Errors raised while producing a sales report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A template resource is missing, unreadable or not in the expected format.
    #[error("Template resource unavailable: {0}")]
    ResourceMissing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data access failed: {0}")]
    DataAccess(#[from] DataAccessError),

    #[error("Document generation failed: {0}")]
    Document(#[from] WordmlError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReportError {
    pub(crate) fn resource(name: &str, err: impl std::fmt::Display) -> Self {
        ReportError::ResourceMissing(format!("{}: {}", name, err))
    }
}

impl From<ResourceError> for ReportError {
    fn from(err: ResourceError) -> Self {
        ReportError::ResourceMissing(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Config(err.to_string())
    }
}
