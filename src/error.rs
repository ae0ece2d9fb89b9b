//! Error types for the back-office core

use thiserror::Error;

/// Main error type for document operations
#[derive(Error, Debug)]
pub enum DocError {
    /// The identified render surface does not exist in the registry
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// An auxiliary asset (logo image) could not be loaded
    #[error("Asset load failure: {0}")]
    AssetLoad(String),

    /// Rasterization or PDF generation failed
    #[error("Render failure: {0}")]
    Render(String),

    /// A record is missing data required to build its document
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<genpdf::error::Error> for DocError {
    fn from(err: genpdf::error::Error) -> Self {
        DocError::Render(err.to_string())
    }
}

impl From<image::ImageError> for DocError {
    fn from(err: image::ImageError) -> Self {
        DocError::Render(err.to_string())
    }
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocError>;
