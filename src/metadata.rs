//! `ComicInfo.xml` synthesis.
//!
//! [`ComicInfo::synthesize`] fills a metadata document for one issue, drawing
//! tags, credits and summaries from the caller's RNG when the matching feature
//! is enabled. [`ComicInfo::to_xml`] renders it through the bundled template.

use chrono::Datelike;
use rand::Rng;
use std::ops::RangeInclusive;

use crate::sentence::random_paragraph;
use crate::types::{CoverInfo, Features, IssueInfo};

const TEMPLATE: &str = include_str!("../templates/ComicInfo.xml");

pub const DEFAULT_SUMMARY: &str = "This is a test comic!";
pub const NOTES: &str = "Auto-generated test comic";
pub const WEB: &str = "https://example.com/fake-comics";
/// A new story arc starts every `ISSUES_PER_ARC` issues of a volume.
pub const ISSUES_PER_ARC: u32 = 5;
pub const SUMMARY_SENTENCES: usize = 10;

pub const LOCATION_COUNT: RangeInclusive<usize> = 1..=10;
pub const LOCATION_IDS: u32 = 2000;
pub const TEAM_COUNT: RangeInclusive<usize> = 1..=5;
pub const TEAM_IDS: u32 = 2000;
pub const CHARACTER_COUNT: RangeInclusive<usize> = 1..=20;
pub const CHARACTER_IDS: u32 = 15000;
pub const PEOPLE_PER_ROLE: RangeInclusive<usize> = 1..=3;
pub const PERSON_IDS: u32 = 5000;

/// Creator roles written when credits are enabled, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreditRole {
    Writer,
    Penciller,
    Inker,
    Colorist,
    Letterer,
    CoverArtist,
    Editor,
}

impl CreditRole {
    pub const ALL: [CreditRole; 7] = [
        CreditRole::Writer,
        CreditRole::Penciller,
        CreditRole::Inker,
        CreditRole::Colorist,
        CreditRole::Letterer,
        CreditRole::CoverArtist,
        CreditRole::Editor,
    ];

    /// Element name in `ComicInfo.xml`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditRole::Writer => "Writer",
            CreditRole::Penciller => "Penciller",
            CreditRole::Inker => "Inker",
            CreditRole::Colorist => "Colorist",
            CreditRole::Letterer => "Letterer",
            CreditRole::CoverArtist => "CoverArtist",
            CreditRole::Editor => "Editor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credit {
    pub role: CreditRole,
    pub people: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tags {
    pub locations: Vec<String>,
    pub teams: Vec<String>,
    pub characters: Vec<String>,
}

/// One `<Page>` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageInfo {
    pub image: usize,
    pub width: u32,
    pub height: u32,
    pub size: usize,
    pub front_cover: bool,
}

impl From<CoverInfo> for PageInfo {
    fn from(cover: CoverInfo) -> Self {
        Self {
            image: 0,
            width: cover.width,
            height: cover.height,
            size: cover.size,
            front_cover: true,
        }
    }
}

/// Metadata document stored as `ComicInfo.xml` in every archive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComicInfo {
    pub title: String,
    pub series: String,
    pub number: u32,
    pub volume: String,
    pub story_arc: Option<String>,
    pub summary: String,
    pub notes: String,
    pub web: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub publisher: String,
    pub page_count: usize,
    pub tags: Option<Tags>,
    pub credits: Vec<Credit>,
    pub pages: Vec<PageInfo>,
}

/// Story arc of an issue within its volume: issues 1-5 are arc 1, 6-10 arc 2...
pub fn story_arc_number(issue: u32) -> u32 {
    issue.saturating_sub(1) / ISSUES_PER_ARC + 1
}

/// Draws a random-length list of `{prefix}{id:05}` identifiers, duplicates allowed.
fn random_ids<R: Rng + ?Sized>(
    rng: &mut R,
    prefix: &str,
    count: RangeInclusive<usize>,
    id_space: u32,
) -> Vec<String> {
    let count = rng.gen_range(count);
    (0..count)
        .map(|_| format!("{}{:05}", prefix, rng.gen_range(1..=id_space)))
        .collect()
}

/// Escapes the five XML reserved characters.
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Replaces every `%name%` in `template` for which `lookup` has a value.
///
/// Substituted text is never scanned again, so values may contain `%`.
fn fill_template<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let value = after
            .find('%')
            .and_then(|end| lookup(&after[..end]).map(|value| (end, value)));
        match value {
            Some((end, value)) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn element(name: &str, text: &str) -> String {
    format!("    <{name}>{}</{name}>", escape_xml(text))
}

impl ComicInfo {
    /// Builds the metadata for one issue.
    ///
    /// `rng` is only consulted for the optional blocks enabled in `features`.
    pub fn synthesize<R: Rng + ?Sized>(
        issue: &IssueInfo,
        features: &Features,
        cover: CoverInfo,
        rng: &mut R,
    ) -> Self {
        let story_arc = features.story_arcs.then(|| {
            format!(
                "Story {}-{}-{}",
                issue.series,
                issue.volume,
                story_arc_number(issue.issue)
            )
        });

        let summary = if features.summaries {
            random_paragraph(rng, SUMMARY_SENTENCES)
        } else {
            DEFAULT_SUMMARY.to_string()
        };

        let tags = features.tags.then(|| Tags {
            locations: random_ids(rng, "Location", LOCATION_COUNT, LOCATION_IDS),
            teams: random_ids(rng, "Team", TEAM_COUNT, TEAM_IDS),
            characters: random_ids(rng, "Character", CHARACTER_COUNT, CHARACTER_IDS),
        });

        let credits = if features.credits {
            CreditRole::ALL
                .iter()
                .map(|role| Credit {
                    role: *role,
                    people: random_ids(rng, "Person", PEOPLE_PER_ROLE, PERSON_IDS),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            title: format!(
                "Title of {} v{} #{}",
                issue.series, issue.volume, issue.issue
            ),
            series: issue.series.clone(),
            number: issue.issue,
            volume: issue.volume.clone(),
            story_arc,
            summary,
            notes: NOTES.to_string(),
            web: WEB.to_string(),
            year: issue.release_date.year(),
            month: issue.release_date.month(),
            day: issue.release_date.day(),
            publisher: issue.publisher.clone(),
            page_count: 1,
            tags,
            credits,
            pages: vec![PageInfo::from(cover)],
        }
    }

    /// Renders the document, escaping every interpolated value.
    pub fn to_xml(&self) -> String {
        let story_arc = self
            .story_arc
            .as_deref()
            .map(|arc| element("StoryArc", arc))
            .unwrap_or_default();

        let tags = self
            .tags
            .as_ref()
            .map(|tags| {
                [
                    element("Locations", &tags.locations.join(",")),
                    element("Teams", &tags.teams.join(",")),
                    element("Characters", &tags.characters.join(",")),
                ]
                .join("\n")
            })
            .unwrap_or_default();

        let credits = self
            .credits
            .iter()
            .map(|credit| element(credit.role.as_str(), &credit.people.join(",")))
            .collect::<Vec<_>>()
            .join("\n");

        let pages = self
            .pages
            .iter()
            .map(|page| {
                let kind = if page.front_cover {
                    r#" Type="FrontCover""#
                } else {
                    ""
                };
                format!(
                    r#"        <Page Image="{}" ImageHeight="{}" ImageSize="{}" ImageWidth="{}"{} />"#,
                    page.image, page.height, page.size, page.width, kind
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let xml = fill_template(TEMPLATE, |name| {
            let value = match name {
                "title" => escape_xml(&self.title),
                "series" => escape_xml(&self.series),
                "number" => self.number.to_string(),
                "volume" => escape_xml(&self.volume),
                "summary" => escape_xml(&self.summary),
                "notes" => escape_xml(&self.notes),
                "web" => escape_xml(&self.web),
                "year" => self.year.to_string(),
                "month" => self.month.to_string(),
                "day" => self.day.to_string(),
                "publisher" => escape_xml(&self.publisher),
                "pagecount" => self.page_count.to_string(),
                "storyarc" => story_arc.clone(),
                "tags" => tags.clone(),
                "credits" => credits.clone(),
                "pages" => pages.clone(),
                _ => return None,
            };
            Some(value)
        });

        // Disabled blocks leave their placeholder line empty
        xml.lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
