//! Generator module provides the archive writer interface and its CBZ implementation.

use crate::error::Result;
use crate::metadata::ComicInfo;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub mod cbz;

/// Common interface for archive writers.
///
/// A generator is opened on an output file, receives pages and one metadata
/// document, and is consumed by [`save`](Generator::save).
#[async_trait]
pub trait Generator {
    /// Creates a new generator instance.
    ///
    /// # Parameters
    /// * `output_dir` - Existing directory where the archive will be saved
    /// * `base_filename` - Name of the output file without extension
    ///   (e.g. "Series P001S001 (v1) #001 (1977)")
    fn new(output_dir: &Path, base_filename: &str) -> Result<Self>
    where
        Self: Sized;

    /// Adds an encoded page image.
    ///
    /// # Parameters
    /// * `bytes` - Encoded image data
    /// * `extension` - File extension used for the entry name (e.g. "jpg")
    async fn add_page(&mut self, bytes: Vec<u8>, extension: &str) -> Result<&mut Self>
    where
        Self: Sized;

    /// Writes the metadata document.
    async fn set_metadata(&mut self, info: &ComicInfo) -> Result<&mut Self>
    where
        Self: Sized;

    /// Finalizes the archive and returns its path.
    async fn save(self) -> Result<PathBuf>;
}
