use std::path::PathBuf;

use gamepersist_resources::ResourceError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type PersistResult<T> = Result<T, PersistError>;

/// Errors surfaced by the persistence layer.
///
/// Nothing here is retried or recovered internally; every failure carries
/// the path, resource name, or source text needed to diagnose it and is
/// handed straight back to the caller.
#[derive(Debug, Error, Diagnostic)]
pub enum PersistError {
    #[error("io error at {}: {source}", path.display())]
    #[diagnostic(code("persist.io"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json: {message}")]
    #[diagnostic(code("persist.parse"))]
    Parse {
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },
    #[error("document does not match the requested type: {0}")]
    #[diagnostic(code("persist.mismatch"))]
    Mismatch(String),
    #[error("unknown type tag '{0}'")]
    #[diagnostic(code("persist.unknown_type"))]
    UnknownType(String),
    #[error("serialization failed: {0}")]
    #[diagnostic(code("persist.encode"))]
    Encode(String),
    #[error("bundled resource '{0}' not found")]
    #[diagnostic(code("persist.resource_missing"))]
    ResourceMissing(String),
}

impl From<ResourceError> for PersistError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound(name) => PersistError::ResourceMissing(name),
            ResourceError::NotUtf8(name) => {
                PersistError::Mismatch(format!("bundled resource '{name}' is not valid UTF-8"))
            }
        }
    }
}
