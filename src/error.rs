//! Custom error types and result handling for fake-comics operations.
//!
//! All fallible operations return a [`Result<T>`] which is a type alias for
//! `std::result::Result<T, Error>`.
//!
use std::path::PathBuf;

/// Type alias for Results with fake-comics errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for every generation step.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O errors from the standard library
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Image encoding errors
    #[error(transparent)]
    Image(#[from] image::ImageError),
    /// ZIP file operation errors
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
    /// Blocking task join errors
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    #[error(transparent)]
    ForgeBuilder(#[from] crate::forge::ForgeConfigBuilderError),
    /// Error for invalid file or directory paths
    #[error("The given path '{0:?}' is invalid: {1}")]
    InvalidPath(PathBuf, String),
    /// Error for operations on a generator in an unusable state
    #[error("Unsupported: {0}")]
    Unsupported(String),
    /// Other errors that don't fit into specific categories
    #[error("Other error: {0}")]
    Other(String),
}

#[cfg(feature = "serde")]
impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
