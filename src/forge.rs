use chrono::Local;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;

use crate::cover::{DEFAULT_COVER_HEIGHT, render_cover};
use crate::error::{Error, Result};
use crate::generator::{Generator, cbz::Cbz};
use crate::metadata::ComicInfo;
use crate::path_utils::{ensure_dir, ensure_dir_all, path_to_string_lossy, validate_path};
use crate::types::{
    DateCursor, Features, GenerationReport, HierarchyPosition, IssueInfo, Layout, publisher_name,
};

/// Destination used when none is configured.
pub const DEFAULT_DESTINATION: &str = "fake_comics";
/// Smallest cover height that still fits the caption.
pub const MIN_COVER_HEIGHT: u32 = 64;
/// Largest cover height, the JPEG encoder's dimension limit.
pub const MAX_COVER_HEIGHT: u32 = 65535;

/// Settings of a generation run, built declaratively using the builder pattern.
///
/// The hierarchy is `publishers` x `series` x `volumes` x `issues`; one archive
/// is written per issue. Once built, [`generate`](ForgeConfig::generate) runs the
/// whole job sequentially.
///
/// ```rust,no_run
/// # use fake_comics::prelude::*;
/// # async fn run() -> fake_comics::error::Result<()> {
/// let config = ForgeConfig::builder()
///     .publishers(1u32)
///     .issues(3u32)
///     .destination("fake_comics")
///     .layout(Layout::Tree)
///     .build()?;
/// let report = config.generate().await?;
/// println!("{} archives", report.archive_count());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, derive_builder::Builder)]
#[builder(setter(into, strip_option), build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForgeConfig {
    /// Number of publishers.
    #[builder(default = "2")]
    pub publishers: u32,

    /// Series per publisher.
    #[builder(default = "2")]
    pub series: u32,

    /// Volumes per series.
    #[builder(default = "2")]
    pub volumes: u32,

    /// Issues per volume.
    #[builder(default = "10")]
    pub issues: u32,

    /// Root directory of the generated library. Created with missing parents.
    #[builder(default = "PathBuf::from(DEFAULT_DESTINATION)")]
    pub destination: PathBuf,

    /// Flat directory or publisher/series/volume tree.
    #[builder(default)]
    pub layout: Layout,

    /// Optional metadata blocks.
    #[builder(default)]
    pub features: Features,

    /// Cover height in pixels; the width follows the poster aspect ratio.
    #[builder(default = "DEFAULT_COVER_HEIGHT")]
    pub cover_height: u32,

    /// Seed for start years, tags, credits and summaries.
    ///
    /// Cover colors never depend on it. Without a seed every run differs.
    #[builder(default)]
    pub seed: Option<u64>,
}

impl ForgeConfig {
    pub fn builder() -> ForgeConfigBuilder {
        ForgeConfigBuilder::default()
    }

    /// Number of archives a run will write.
    ///
    /// Four `u32` factors always fit in a `u128`.
    pub fn total_issues(&self) -> u128 {
        [self.publishers, self.series, self.volumes, self.issues]
            .iter()
            .map(|count| u128::from(*count))
            .product()
    }

    /// Human-readable plan shown before asking for confirmation.
    pub fn plan_summary(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Going to create {} fake comics!", self.total_issues()),
            format!(
                " * Destination folder: '{}'",
                path_to_string_lossy(&self.destination)
            ),
        ];
        lines.push(match self.layout {
            Layout::Tree => " * Folder tree based on publisher/series/volume".to_string(),
            Layout::Flat => " * All files in same flat folder".to_string(),
        });
        if self.features.credits {
            lines.push(" * Random credits will be created".to_string());
        }
        if self.features.tags {
            lines.push(" * Random tags will be created".to_string());
        }
        if self.features.summaries {
            lines.push(" * Random summaries will be created".to_string());
        }
        if self.features.story_arcs {
            lines.push(" * Story arcs will be created".to_string());
        }
        lines.push(format!(" * {} publishers", self.publishers));
        lines.push(format!(" * {} series per publisher", self.series));
        lines.push(format!(" * {} volumes per series", self.volumes));
        lines.push(format!(" * {} issues per volume", self.issues));
        lines
    }

    /// Checks the destination before anything is written.
    pub fn preflight_check(&self) -> Result<&Self> {
        validate_path(&self.destination)?;
        if self.destination.exists() && !self.destination.is_dir() {
            return Err(Error::InvalidPath(
                self.destination.clone(),
                "Destination exists and is not a directory.".to_string(),
            ));
        }
        Ok(self)
    }

    /// Generates every archive of the configured hierarchy.
    ///
    /// Publishers, series, volumes and issues are walked in order. Each
    /// publisher gets its own release calendar starting at a random year; every
    /// issue advances it by one month. A failure aborts the run and leaves the
    /// archives written so far in place.
    pub async fn generate(&self) -> Result<GenerationReport> {
        self.preflight_check()?;
        let started_at = Local::now();

        ensure_dir_all(&self.destination).await?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut archives = Vec::new();
        let mut current_dir: Option<PathBuf> = None;

        for publisher in 1..=self.publishers {
            let mut calendar = DateCursor::random(&mut rng);
            info!(
                "Generating {} (first release in {})",
                publisher_name(publisher),
                calendar.start_year()
            );

            for series in 1..=self.series {
                for volume in 1..=self.volumes {
                    for number in 1..=self.issues {
                        let position = HierarchyPosition {
                            publisher,
                            series,
                            volume,
                            issue: number,
                        };
                        let issue = IssueInfo::new(position, calendar.advance()?);

                        let relative_dir = issue.relative_dir(self.layout);
                        if current_dir.as_ref() != Some(&relative_dir) {
                            self.ensure_tree(&relative_dir).await?;
                            current_dir = Some(relative_dir.clone());
                        }

                        let output_dir = self.destination.join(&relative_dir);
                        archives.push(self.write_issue(&issue, &output_dir, &mut rng).await?);
                    }
                }
            }
        }

        let report = GenerationReport {
            archives,
            publishers: self.publishers,
            started_at,
            finished_at: Local::now(),
        };
        info!(
            "Wrote {} archives to '{}' in {} ms",
            report.archive_count(),
            path_to_string_lossy(&self.destination),
            report.elapsed().num_milliseconds()
        );
        Ok(report)
    }

    /// Creates each directory level of `relative` under the destination.
    async fn ensure_tree(&self, relative: &Path) -> Result<()> {
        let mut dir = self.destination.clone();
        for component in relative.components() {
            dir.push(component);
            ensure_dir(&dir).await?;
        }
        Ok(())
    }

    /// Renders the cover and metadata of one issue and packs them into a CBZ.
    async fn write_issue(
        &self,
        issue: &IssueInfo,
        output_dir: &Path,
        rng: &mut StdRng,
    ) -> Result<PathBuf> {
        let height = self.cover_height;
        let cover_issue = issue.clone();
        let cover = spawn_blocking(move || render_cover(&cover_issue, height)).await??;

        let comic_info = ComicInfo::synthesize(issue, &self.features, cover.info, rng);

        let mut cbz = Cbz::new(output_dir, &issue.archive_base_name())?;
        cbz.set_metadata(&comic_info).await?;
        cbz.add_page(cover.bytes, "jpg").await?;
        let path = cbz.save().await?;

        debug!("Wrote {}", path_to_string_lossy(&path));
        Ok(path)
    }
}

impl ForgeConfigBuilder {
    /// Custom validation logic for the builder.
    fn validate(&self) -> std::result::Result<(), String> {
        let counts = [
            ("publishers", self.publishers),
            ("series", self.series),
            ("volumes", self.volumes),
            ("issues", self.issues),
        ];
        for (name, count) in counts {
            if count == Some(0) {
                return Err(format!("`{}` must be at least 1", name));
            }
        }

        if let Some(height) = self.cover_height {
            if height < MIN_COVER_HEIGHT {
                return Err(format!(
                    "`cover_height` must be at least {} pixels, got {}",
                    MIN_COVER_HEIGHT, height
                ));
            }
            if height > MAX_COVER_HEIGHT {
                return Err(format!(
                    "`cover_height` must be at most {} pixels, got {}",
                    MAX_COVER_HEIGHT, height
                ));
            }
        }

        if let Some(destination) = &self.destination {
            if destination.as_os_str().is_empty() {
                return Err("`destination` must not be empty".to_string());
            }
        }

        Ok(())
    }
}
