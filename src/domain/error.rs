use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for dockergen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Product name is not one the generator knows about.
    #[error(
        "Unknown product '{0}': must be one of couchbase-server, sync-gateway, server-sandbox, couchbase-columnar, couchbase-edge-server, enterprise-analytics"
    )]
    UnknownProduct(String),

    /// Edition name is not community or enterprise.
    #[error("Unknown edition '{0}': must be community or enterprise")]
    UnknownEdition(String),

    /// Version string does not start with a numeric MAJOR.MINOR.PATCH triple.
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Template argument is not of the form KEY=VALUE.
    #[error("-t '{0}' not of form KEY=VALUE")]
    InvalidOverride(String),

    /// Template source file is missing.
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Template failed to parse or render.
    #[error("Template '{name}' failed: {details}")]
    Template { name: String, details: String },

    /// Required resource file is missing.
    #[error("Resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// Generator configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Skip filter pattern does not compile.
    #[error("Invalid skip pattern for '{product}': {details}")]
    InvalidSkipPattern { product: String, details: String },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Recursive copy failed while walking a resource tree.
    #[error("Failed to walk {}: {details}", .path.display())]
    Walk { path: PathBuf, details: String },

    /// Generation of a single variant failed.
    #[error("Failed ({edition}/{product}/{version}): {source}")]
    Variant {
        edition: String,
        product: String,
        version: String,
        #[source]
        source: Box<AppError>,
    },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn invalid_version<V: Into<String>, R: Into<String>>(version: V, reason: R) -> Self {
        AppError::InvalidVersion { version: version.into(), reason: reason.into() }
    }

    /// Attach edition/product/version context to an error raised while generating a variant.
    pub fn in_variant(self, edition: &str, product: &str, version: &str) -> Self {
        AppError::Variant {
            edition: edition.to_string(),
            product: product.to_string(),
            version: version.to_string(),
            source: Box::new(self),
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers that only need a category.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::UnknownProduct(_)
            | AppError::UnknownEdition(_)
            | AppError::InvalidVersion { .. }
            | AppError::InvalidOverride(_)
            | AppError::Template { .. }
            | AppError::Configuration(_)
            | AppError::InvalidSkipPattern { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::TemplateNotFound(_) | AppError::ResourceNotFound(_) => {
                io::ErrorKind::NotFound
            }
            AppError::HttpClient(_) | AppError::Walk { .. } => io::ErrorKind::Other,
            AppError::Variant { source, .. } => source.kind(),
        }
    }
}
