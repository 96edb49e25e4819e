//! fake-comics - Fake CBZ Library Generator
//!
//! This crate synthesizes a tree of one-page comic archives (`.cbz`) to
//! stress-test comic-library servers. Every archive holds a generated cover
//! JPEG and a `ComicInfo.xml` metadata document.
//!
//! Names are positional (`Publisher001`, `Series P001S002`, volume and issue
//! numbers), covers share one color per series volume, and each publisher
//! releases one issue per month from a random starting year.
//!
//! # Getting Started
//!
//! ```rust,no_run
//! use fake_comics::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> fake_comics::error::Result<()> {
//!     let config = ForgeConfig::builder()
//!         .publishers(1u32)
//!         .series(2u32)
//!         .volumes(1u32)
//!         .issues(12u32)
//!         .destination(PathBuf::from("./fake_comics"))
//!         .layout(Layout::Tree)
//!         .features(Features {
//!             credits: true,
//!             tags: true,
//!             ..Default::default()
//!         })
//!         .build()?;
//!
//!     let report = config.generate().await?;
//!     println!("Wrote {} archives", report.archive_count());
//!     Ok(())
//! }
//! ```

pub mod confirm;
pub mod cover;
pub mod error;
pub mod forge;
pub mod generator;
pub mod metadata;
pub mod path_utils;
pub mod sentence;
pub mod types;

pub use forge::ForgeConfig;
pub use forge::ForgeConfigBuilder;

pub use types::{
    CoverInfo, DateCursor, Features, GenerationReport, HierarchyPosition, IssueInfo, Layout,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::{
        CoverInfo, DateCursor, Features, ForgeConfig, ForgeConfigBuilder, GenerationReport,
        HierarchyPosition, IssueInfo, Layout, error, generator, types,
    };
    pub use crate::metadata::ComicInfo;
    pub use std::path::{Path, PathBuf};
}
