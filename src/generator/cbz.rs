use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::metadata::ComicInfo;
use crate::path_utils::normalize_path;
use async_trait::async_trait;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name of the metadata entry inside every archive.
pub const COMIC_INFO_ENTRY: &str = "ComicInfo.xml";

/// A generator for creating CBZ (Comic Book ZIP) files.
///
/// Pages are stored as `page_001.<ext>`, `page_002.<ext>`, ... and the metadata
/// as `ComicInfo.xml`.
pub struct Cbz {
    zip: Option<ZipWriter<File>>,
    options: SimpleFileOptions,
    path: PathBuf,
    page_index: usize, // 0-based index for pages added
}

impl Cbz {
    fn writer(&mut self) -> Result<&mut ZipWriter<File>> {
        self.zip
            .as_mut()
            .ok_or_else(|| Error::Unsupported("Zip writer not available".to_string()))
    }
}

#[async_trait]
impl Generator for Cbz {
    fn new(output_dir: &Path, base_filename: &str) -> Result<Self> {
        let options: SimpleFileOptions = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let normalized_output_dir = normalize_path(output_dir)?;
        if !normalized_output_dir.is_dir() {
            return Err(Error::InvalidPath(
                output_dir.to_path_buf(),
                "Output directory does not exist".to_string(),
            ));
        }

        let path = normalized_output_dir.join(format!("{}.cbz", base_filename));
        let file = File::create(&path)?;

        Ok(Cbz {
            zip: Some(ZipWriter::new(file)),
            options,
            path,
            page_index: 0,
        })
    }

    async fn add_page(&mut self, bytes: Vec<u8>, extension: &str) -> Result<&mut Self> {
        let file_name = format!("page_{:03}.{}", self.page_index + 1, extension);
        let options = self.options;

        let zip = self.writer()?;
        zip.start_file(file_name, options)?;
        zip.write_all(&bytes)?;

        self.page_index += 1;

        Ok(self)
    }

    async fn set_metadata(&mut self, info: &ComicInfo) -> Result<&mut Self> {
        let xml = info.to_xml();
        let options = self.options;

        let zip = self.writer()?;
        zip.start_file(COMIC_INFO_ENTRY, options)?;
        zip.write_all(xml.as_bytes())?;

        Ok(self)
    }

    async fn save(mut self) -> Result<PathBuf> {
        let zip = self
            .zip
            .take()
            .ok_or_else(|| Error::Unsupported("Zip writer not available".to_string()))?;

        // Finish writing the zip file in a blocking task
        spawn_blocking(move || zip.finish().map(|_| ()).map_err(Error::Zip)).await??;

        Ok(self.path)
    }
}
