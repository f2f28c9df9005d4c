use std::path::PathBuf;

use thiserror::Error;

/// Failures while producing icons.
///
/// `DependencyUnavailable` is the one outcome callers recover from (install,
/// then try again). Everything else is reported and tolerated by the entry
/// point.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{name} not available: {reason}")]
    DependencyUnavailable { name: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("can't create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub fn is_dependency_unavailable(&self) -> bool {
        matches!(self, GenerateError::DependencyUnavailable { .. })
    }
}
