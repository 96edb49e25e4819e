//! Cover image synthesis.
//!
//! A cover is a flat colored poster with five lines of black caption text.
//! The background color depends only on the series, volume and publisher names,
//! so every issue of a volume shares the same look while the caption varies.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{ImageFormat, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::io::Cursor;

use crate::error::Result;
use crate::types::{CoverInfo, IssueInfo};

/// Default cover height in pixels.
pub const DEFAULT_COVER_HEIGHT: u32 = 800;
/// Poster aspect ratio, width:height.
const ASPECT_WIDTH: u32 = 663;
const ASPECT_HEIGHT: u32 = 1024;
/// Left margin and first baseline offset of the caption.
const TEXT_MARGIN: u32 = 20;
/// Each 8x8 glyph cell is drawn as `FONT_SCALE`x`FONT_SCALE` pixel blocks.
const FONT_SCALE: u32 = 4;
const GLYPH_CELL: u32 = 8;
const LINE_SPACING: f32 = 1.2;
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// An encoded cover ready to be packed into an archive.
#[derive(Debug, Clone)]
pub struct Cover {
    pub bytes: Vec<u8>,
    pub info: CoverInfo,
}

/// Width of a cover of the given height.
pub fn cover_width(height: u32) -> u32 {
    (height as u64 * ASPECT_WIDTH as u64 / ASPECT_HEIGHT as u64) as u32
}

/// Deterministic background color for a series/volume/publisher triple.
///
/// The names are concatenated without separator and hashed with SHA-256; the
/// digest seeds a private RNG that is dropped once the color is drawn.
pub fn background_color(series: &str, volume: &str, publisher: &str) -> Rgb<u8> {
    let mut hasher = Sha256::new();
    hasher.update(series.as_bytes());
    hasher.update(volume.as_bytes());
    hasher.update(publisher.as_bytes());
    let seed: [u8; 32] = hasher.finalize().into();
    let mut rng = StdRng::from_seed(seed);

    // A bit bright: never gray, never too dark or washed out
    let hue: f64 = rng.r#gen();
    let saturation = 0.5 + rng.r#gen::<f64>() / 2.0;
    let lightness = 0.4 + rng.r#gen::<f64>() / 5.0;

    let (r, g, b) = hls_to_rgb(hue, lightness, saturation);
    Rgb([to_channel(r), to_channel(g), to_channel(b)])
}

fn to_channel(value: f64) -> u8 {
    (256.0 * value).clamp(0.0, 255.0) as u8
}

/// Converts a hue/lightness/saturation triple (all in `[0, 1]`) to RGB in `[0, 1]`.
pub fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// The five caption lines printed on a cover.
pub fn caption_lines(issue: &IssueInfo) -> [String; 5] {
    [
        issue.series.clone(),
        format!("Volume {}", issue.volume),
        format!("Issue #{:03}", issue.issue),
        format!("({})", issue.publisher),
        issue.release_date.format("[%Y-%m]").to_string(),
    ]
}

/// Height of the inked part of a line, measured from the top of its glyph cells.
pub fn line_height(line: &str) -> u32 {
    let rows = line
        .chars()
        .filter_map(|c| BASIC_FONTS.get(c))
        .filter_map(|glyph| glyph.iter().rposition(|row| *row != 0))
        .max()
        .map(|last_row| last_row as u32 + 1)
        .unwrap_or(0);
    rows * FONT_SCALE
}

fn draw_line(image: &mut RgbImage, line: &str, x: u32, y: u32) {
    let (width, height) = image.dimensions();
    for (index, c) in line.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(c) else {
            continue;
        };
        let origin_x = x + index as u32 * GLYPH_CELL * FONT_SCALE;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_CELL {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = origin_x + col * FONT_SCALE;
                let py = y + row as u32 * FONT_SCALE;
                for dy in 0..FONT_SCALE {
                    for dx in 0..FONT_SCALE {
                        if px + dx < width && py + dy < height {
                            image.put_pixel(px + dx, py + dy, TEXT_COLOR);
                        }
                    }
                }
            }
        }
    }
}

/// Paints the cover raster for an issue without encoding it.
pub fn draw_cover(issue: &IssueInfo, height: u32) -> RgbImage {
    let width = cover_width(height);
    let color = background_color(&issue.series, &issue.volume, &issue.publisher);
    let mut image = RgbImage::from_pixel(width, height, color);

    let mut y = TEXT_MARGIN;
    for line in caption_lines(issue) {
        draw_line(&mut image, &line, TEXT_MARGIN, y);
        y += (line_height(&line) as f32 * LINE_SPACING) as u32;
    }
    image
}

/// Paints and JPEG-encodes the cover for an issue.
pub fn render_cover(issue: &IssueInfo, height: u32) -> Result<Cover> {
    let image = draw_cover(issue, height);
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;

    let info = CoverInfo {
        size: bytes.len(),
        width: image.width(),
        height: image.height(),
    };
    Ok(Cover { bytes, info })
}
