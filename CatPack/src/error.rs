//! Error types for `CatPack`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `CatPack` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ==================== Properties Errors ====================
    /// A `.properties` text could not be decoded.
    #[error("invalid properties at line {line}: {message}")]
    InvalidProperties {
        /// The 1-based line where the logical line containing the error starts.
        line: usize,
        /// Description of what is invalid.
        message: String,
    },

    // ==================== Catalog Errors ====================
    /// The archive is not a readable catalog library.
    ///
    /// Malformed ZIP data, unreadable properties and unparsable values are
    /// all reported through this variant.
    #[error("invalid catalog {}: {message}", path.display())]
    InvalidCatalog {
        /// The catalog archive being read.
        path: PathBuf,
        /// Description of what is invalid.
        message: String,
    },

    /// Writing a catalog archive failed. The destination file is left untouched.
    #[error("failed to write catalog {}: {source}", path.display())]
    WriteFailed {
        /// The destination archive.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// The operation was cancelled through its [`CancelToken`](crate::recorder::CancelToken).
    #[error("operation interrupted")]
    Interrupted,

    /// A content reference cannot be packaged (no readable local data).
    #[error("unsupported content: {content}")]
    UnsupportedContent {
        /// The content description.
        content: String,
    },

    /// A remote resource could not be downloaded.
    #[error("failed to download {url}: {message}")]
    Download {
        /// The requested URL.
        url: String,
        /// Description of the failure.
        message: String,
    },

    // ==================== Library Errors ====================
    /// The item handle does not belong to the library.
    #[error("item not found in library: {0}")]
    ItemNotFound(u64),

    /// Not an `xx` or `xx_YY` locale tag (the default locale is not an override).
    #[error("invalid locale: '{0}'")]
    InvalidLocale(String),

    // ==================== Configuration Errors ====================
    /// Recorder options or preferences are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON parsing or serialization error (preferences).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl Error {
    /// Returns true if this error only signals a cancelled operation.
    ///
    /// Cancellation wrapped in [`Error::WriteFailed`] is reported as well.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        match self {
            Error::Interrupted => true,
            Error::WriteFailed { source, .. } => source.is_interrupted(),
            _ => false,
        }
    }
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `CatPack` operations.
pub type Result<T> = std::result::Result<T, Error>;
