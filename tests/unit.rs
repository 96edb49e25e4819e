//! Unit tests for core fake-comics functionality.
//!
//! Tests the synthesis functions and configuration in isolation, without
//! writing archives.

use chrono::{Datelike, NaiveDate};
use fake_comics::cover::{background_color, cover_width, draw_cover, render_cover};
use fake_comics::error::Result;
use fake_comics::metadata::{
    CHARACTER_IDS, CreditRole, DEFAULT_SUMMARY, LOCATION_IDS, PERSON_IDS, TEAM_IDS,
    story_arc_number,
};
use fake_comics::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

fn issue(publisher: u32, series: u32, volume: u32, number: u32) -> IssueInfo {
    let position = HierarchyPosition {
        publisher,
        series,
        volume,
        issue: number,
    };
    IssueInfo::new(position, NaiveDate::from_ymd_opt(1984, 3, 1).unwrap())
}

fn cover_info() -> CoverInfo {
    CoverInfo {
        size: 1234,
        width: 517,
        height: 800,
    }
}

fn ids(values: &[String], prefix: &str) -> Vec<u32> {
    values
        .iter()
        .map(|value| {
            let digits = value
                .strip_prefix(prefix)
                .unwrap_or_else(|| panic!("{value} lacks prefix {prefix}"));
            assert_eq!(digits.len(), 5, "{value} is not zero-padded to 5 digits");
            digits.parse().unwrap()
        })
        .collect()
}

#[tokio::test]
async fn test_forge_config_defaults() -> Result<()> {
    let config = ForgeConfig::builder().build()?;
    assert_eq!(
        (config.publishers, config.series, config.volumes, config.issues),
        (2, 2, 2, 10)
    );
    assert_eq!(config.destination, PathBuf::from("fake_comics"));
    assert_eq!(config.layout, Layout::Flat);
    assert_eq!(config.features, Features::default());
    assert_eq!(config.cover_height, 800);
    assert_eq!(config.seed, None);
    assert_eq!(config.total_issues(), 80);
    Ok(())
}

#[tokio::test]
async fn test_forge_config_builder_validation() {
    let result = ForgeConfig::builder().issues(0u32).build();
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("`issues` must be at least 1")
    );

    let result = ForgeConfig::builder().publishers(0u32).build();
    assert!(result.is_err());

    let result = ForgeConfig::builder().cover_height(10u32).build();
    assert!(result.unwrap_err().to_string().contains("cover_height"));

    let result = ForgeConfig::builder().cover_height(100_000u32).build();
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("`cover_height` must be at most 65535")
    );
    assert!(ForgeConfig::builder().cover_height(65_535u32).build().is_ok());

    let result = ForgeConfig::builder().destination("").build();
    assert!(result.is_err());
}

#[tokio::test]
async fn test_plan_summary_lists_options() -> Result<()> {
    let config = ForgeConfig::builder()
        .publishers(3u32)
        .layout(Layout::Tree)
        .features(Features {
            credits: true,
            story_arcs: true,
            ..Default::default()
        })
        .build()?;
    let summary = config.plan_summary();

    assert_eq!(summary[0], "Going to create 120 fake comics!");
    assert!(summary.iter().any(|l| l.contains("Folder tree")));
    assert!(summary.iter().any(|l| l.contains("credits")));
    assert!(summary.iter().any(|l| l.contains("Story arcs")));
    assert!(!summary.iter().any(|l| l.contains("tags")));
    assert!(summary.iter().any(|l| l == " * 3 publishers"));
    Ok(())
}

#[tokio::test]
async fn test_total_issues_handles_largest_counts() -> Result<()> {
    let config = ForgeConfig::builder()
        .publishers(u32::MAX)
        .series(u32::MAX)
        .volumes(u32::MAX)
        .issues(u32::MAX)
        .build()?;
    let expected = u128::from(u32::MAX).pow(4);
    assert_eq!(config.total_issues(), expected);
    assert_eq!(
        config.plan_summary()[0],
        format!("Going to create {} fake comics!", expected)
    );
    Ok(())
}

#[tokio::test]
async fn test_cover_color_is_stable_per_volume() {
    let first = background_color("Series P001S001", "1", "Publisher001");
    let again = background_color("Series P001S001", "1", "Publisher001");
    assert_eq!(first, again);

    // Issue number and date do not influence the color
    let a = draw_cover(&issue(1, 1, 1, 1), 200);
    let b = draw_cover(&issue(1, 1, 1, 9), 200);
    let corner = (a.width() - 1, a.height() - 1);
    assert_eq!(a.get_pixel(corner.0, corner.1), b.get_pixel(corner.0, corner.1));
    assert_eq!(*a.get_pixel(corner.0, corner.1), first);
}

#[tokio::test]
async fn test_cover_color_differs_between_volumes() {
    let mut colors = HashSet::new();
    for p in 1..=3 {
        for s in 1..=3 {
            for v in 1..=3 {
                let info = issue(p, s, v, 1);
                colors.insert(background_color(&info.series, &info.volume, &info.publisher).0);
            }
        }
    }
    assert_eq!(colors.len(), 27);
}

#[tokio::test]
async fn test_cover_color_is_bright() {
    for v in 1..=50 {
        let color = background_color("Series P001S001", &v.to_string(), "Publisher001");
        let max = *color.0.iter().max().unwrap();
        let min = *color.0.iter().min().unwrap();
        // lightness in [0.4, 0.6) and saturation >= 0.5 keep channels apart
        assert!(max > min, "{color:?} is gray");
        assert!(max as u32 + min as u32 >= 2 * 256 * 4 / 10 - 2, "{color:?} too dark");
    }
}

#[tokio::test]
async fn test_render_cover_encodes_jpeg() -> Result<()> {
    let cover = render_cover(&issue(2, 1, 3, 12), 800)?;
    assert_eq!(&cover.bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(cover.info.size, cover.bytes.len());
    assert_eq!(cover.info.width, cover_width(800));
    assert_eq!(cover.info.width, 517);
    assert_eq!(cover.info.height, 800);

    // Caption is drawn in black over the background near the top-left corner
    let raster = draw_cover(&issue(2, 1, 3, 12), 800);
    let dark = (20..120)
        .flat_map(|y| (20..300).map(move |x| (x, y)))
        .filter(|(x, y)| raster.get_pixel(*x, *y).0 == [0, 0, 0])
        .count();
    assert!(dark > 0);
    Ok(())
}

#[tokio::test]
async fn test_date_cursor_rolls_over_years() -> Result<()> {
    let mut cursor = DateCursor::new(1938);
    for n in 1..=30u32 {
        let date = cursor.advance()?;
        assert!((1..=12).contains(&date.month()));
        assert_eq!(date.day(), 1);
        assert_eq!(date.year(), 1938 + ((n - 1) / 12) as i32);
        assert_eq!(date.month(), (n - 1) % 12 + 1);
    }

    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let year = DateCursor::random(&mut rng).start_year();
        assert!((DateCursor::FIRST_YEAR..=DateCursor::LAST_YEAR).contains(&year));
    }
    Ok(())
}

#[tokio::test]
async fn test_story_arcs_every_five_issues() {
    assert_eq!(story_arc_number(1), 1);
    assert_eq!(story_arc_number(5), 1);
    assert_eq!(story_arc_number(6), 2);
    assert_eq!(story_arc_number(10), 2);
    assert_eq!(story_arc_number(11), 3);

    let mut rng = StdRng::seed_from_u64(1);
    let features = Features {
        story_arcs: true,
        ..Default::default()
    };
    let info = ComicInfo::synthesize(&issue(1, 2, 3, 7), &features, cover_info(), &mut rng);
    assert_eq!(info.story_arc.as_deref(), Some("Story Series P001S002-3-2"));
    assert!(
        info.to_xml()
            .contains("<StoryArc>Story Series P001S002-3-2</StoryArc>")
    );

    let info = ComicInfo::synthesize(&issue(1, 2, 3, 7), &Features::default(), cover_info(), &mut rng);
    assert!(info.story_arc.is_none());
    assert!(!info.to_xml().contains("StoryArc"));
}

#[tokio::test]
async fn test_required_fields() {
    let mut rng = StdRng::seed_from_u64(1);
    let info = ComicInfo::synthesize(&issue(4, 5, 6, 7), &Features::default(), cover_info(), &mut rng);
    let xml = info.to_xml();

    assert!(xml.starts_with("<?xml version='1.0' encoding='utf-8'?>"));
    assert!(xml.contains("<Title>Title of Series P004S005 v6 #7</Title>"));
    assert!(xml.contains("<Series>Series P004S005</Series>"));
    assert!(xml.contains("<Number>7</Number>"));
    assert!(xml.contains("<Volume>6</Volume>"));
    assert!(xml.contains(&format!("<Summary>{}</Summary>", DEFAULT_SUMMARY)));
    assert!(xml.contains("<Notes>Auto-generated test comic</Notes>"));
    assert!(xml.contains("<Year>1984</Year>"));
    assert!(xml.contains("<Month>3</Month>"));
    assert!(xml.contains("<Day>1</Day>"));
    assert!(xml.contains("<Publisher>Publisher004</Publisher>"));
    assert!(xml.contains("<PageCount>1</PageCount>"));
    assert!(xml.contains(
        r#"<Page Image="0" ImageHeight="800" ImageSize="1234" ImageWidth="517" Type="FrontCover" />"#
    ));
    assert!(!xml.contains("<Locations>"));
}

#[tokio::test]
async fn test_credits_have_seven_roles() {
    let features = Features {
        credits: true,
        ..Default::default()
    };
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let info = ComicInfo::synthesize(&issue(1, 1, 1, 1), &features, cover_info(), &mut rng);

        let roles: Vec<CreditRole> = info.credits.iter().map(|c| c.role).collect();
        assert_eq!(roles, CreditRole::ALL.to_vec());
        for credit in &info.credits {
            assert!((1..=3).contains(&credit.people.len()));
            for id in ids(&credit.people, "Person") {
                assert!((1..=PERSON_IDS).contains(&id));
            }
        }

        let xml = info.to_xml();
        for role in CreditRole::ALL {
            let open = format!("<{}>", role.as_str());
            assert_eq!(xml.matches(&open).count(), 1, "{open} in {xml}");
        }
    }

    let mut rng = StdRng::seed_from_u64(0);
    let info = ComicInfo::synthesize(&issue(1, 1, 1, 1), &Features::default(), cover_info(), &mut rng);
    assert!(info.credits.is_empty());
    let xml = info.to_xml();
    for role in CreditRole::ALL {
        assert!(!xml.contains(&format!("<{}>", role.as_str())));
    }
}

#[tokio::test]
async fn test_tags_stay_within_bounds() {
    let features = Features {
        tags: true,
        ..Default::default()
    };
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let info = ComicInfo::synthesize(&issue(1, 1, 1, 1), &features, cover_info(), &mut rng);
        let tags = info.tags.expect("tags enabled");

        assert!((1..=10).contains(&tags.locations.len()));
        assert!((1..=5).contains(&tags.teams.len()));
        assert!((1..=20).contains(&tags.characters.len()));
        assert!(ids(&tags.locations, "Location").iter().all(|id| (1..=LOCATION_IDS).contains(id)));
        assert!(ids(&tags.teams, "Team").iter().all(|id| (1..=TEAM_IDS).contains(id)));
        assert!(
            ids(&tags.characters, "Character")
                .iter()
                .all(|id| (1..=CHARACTER_IDS).contains(id))
        );
    }
}

#[tokio::test]
async fn test_summaries_have_ten_sentences() {
    let features = Features {
        summaries: true,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(9);
    let info = ComicInfo::synthesize(&issue(1, 1, 1, 1), &features, cover_info(), &mut rng);
    assert_ne!(info.summary, DEFAULT_SUMMARY);
    assert_eq!(info.summary.matches('.').count(), 10);
    assert!(!info.summary.ends_with(' '));
}

#[tokio::test]
async fn test_xml_escapes_free_text() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut info = ComicInfo::synthesize(&issue(1, 1, 1, 1), &Features::default(), cover_info(), &mut rng);
    info.summary = "Cats & <dogs> say \"hi\"".to_string();
    info.series = "Tom's".to_string();

    let xml = info.to_xml();
    assert!(xml.contains("<Summary>Cats &amp; &lt;dogs&gt; say &quot;hi&quot;</Summary>"));
    assert!(xml.contains("<Series>Tom&apos;s</Series>"));
}
