//! Core data types for the fake-comics generator.
//!
//! This module defines the value types that flow through a generation run:
//! - Run settings (`Layout`, `Features`)
//! - Positional identity of an issue (`HierarchyPosition`, `IssueInfo`)
//! - The per-publisher release calendar (`DateCursor`)
//! - Encoded cover facts (`CoverInfo`) and the run summary (`GenerationReport`)

use chrono::{DateTime, Datelike, Local, Months, NaiveDate};
use rand::Rng;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Where the generated archives are placed under the destination directory.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// Every archive directly in the destination directory.
    #[default]
    Flat,
    /// `destination/<publisher>/<series>/<series> v<volume>/`
    Tree,
}

/// Optional metadata blocks, each toggled independently.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Features {
    pub credits: bool,
    pub tags: bool,
    pub summaries: bool,
    pub story_arcs: bool,
}

/// 1-based position of an issue in the publisher/series/volume/issue hierarchy.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyPosition {
    pub publisher: u32,
    pub series: u32,
    pub volume: u32,
    pub issue: u32,
}

impl HierarchyPosition {
    pub fn publisher_name(&self) -> String {
        publisher_name(self.publisher)
    }

    pub fn series_name(&self) -> String {
        series_name(self.publisher, self.series)
    }

    pub fn volume_name(&self) -> String {
        self.volume.to_string()
    }
}

/// `Publisher001`
pub fn publisher_name(publisher: u32) -> String {
    format!("Publisher{:03}", publisher)
}

/// `Series P001S002`
pub fn series_name(publisher: u32, series: u32) -> String {
    format!("Series P{:03}S{:03}", publisher, series)
}

/// Monthly release calendar of one publisher.
///
/// Starts *before* the first month of `start_year`: the first call to
/// [`advance`](DateCursor::advance) yields January, the thirteenth yields
/// January of the following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCursor {
    start_year: i32,
    current: Option<NaiveDate>,
}

impl DateCursor {
    /// Earliest start year a publisher can draw.
    pub const FIRST_YEAR: i32 = 1938;
    /// Latest start year a publisher can draw.
    pub const LAST_YEAR: i32 = 2000;

    pub fn new(start_year: i32) -> Self {
        Self {
            start_year,
            current: None,
        }
    }

    /// Draws a start year uniformly in `[FIRST_YEAR, LAST_YEAR]`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(Self::FIRST_YEAR..=Self::LAST_YEAR))
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Current release date, `None` until the first advance.
    pub fn current(&self) -> Option<NaiveDate> {
        self.current
    }

    /// Moves one month forward and returns the first day of that month.
    pub fn advance(&mut self) -> Result<NaiveDate> {
        let next = match self.current {
            None => NaiveDate::from_ymd_opt(self.start_year, 1, 1),
            Some(date) => date.checked_add_months(Months::new(1)),
        }
        .ok_or_else(|| {
            Error::Other(format!(
                "Release calendar overflowed after {:?}",
                self.current
            ))
        })?;
        self.current = Some(next);
        Ok(next)
    }
}

/// Identity of a single generated issue, shared by cover and metadata synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IssueInfo {
    pub position: HierarchyPosition,
    pub publisher: String,
    pub series: String,
    pub volume: String,
    pub issue: u32,
    pub release_date: NaiveDate,
}

impl IssueInfo {
    pub fn new(position: HierarchyPosition, release_date: NaiveDate) -> Self {
        Self {
            publisher: position.publisher_name(),
            series: position.series_name(),
            volume: position.volume_name(),
            issue: position.issue,
            position,
            release_date,
        }
    }

    pub fn year(&self) -> i32 {
        self.release_date.year()
    }

    pub fn month(&self) -> u32 {
        self.release_date.month()
    }

    /// `{series} (v{volume}) #{issue:03} ({year})`, without extension.
    pub fn archive_base_name(&self) -> String {
        format!(
            "{} (v{}) #{:03} ({})",
            self.series,
            self.volume,
            self.issue,
            self.year()
        )
    }

    /// Directory of this issue relative to the destination for the given layout.
    pub fn relative_dir(&self, layout: Layout) -> PathBuf {
        match layout {
            Layout::Flat => PathBuf::new(),
            Layout::Tree => PathBuf::from(&self.publisher)
                .join(&self.series)
                .join(format!("{} v{}", self.series, self.volume)),
        }
    }
}

/// Facts about an encoded cover needed by the page descriptor in `ComicInfo.xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverInfo {
    /// Encoded JPEG length in bytes.
    pub size: usize,
    pub width: u32,
    pub height: u32,
}

/// Summary of a finished generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub archives: Vec<PathBuf>,
    pub publishers: u32,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl GenerationReport {
    pub fn archive_count(&self) -> usize {
        self.archives.len()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
