//! Placeholder scan images: business card fronts/backs, handwriting sheets and
//! attachment photos.
//!
//! Text is drawn as solid bars of roughly the text's rendered width so the
//! images have realistic layout without a font dependency.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rand::Rng;
use tracing::info;

use crate::pools::{CARD_COMPANIES, CARD_NAMES, CARD_TITLES, HANDWRITING_NOTES};
use crate::{GenError, pick};

pub const CANVAS_SIZE: u32 = 1024;
const PROGRESS_EVERY: u32 = 100;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const RULE_GREY: Rgb<u8> = Rgb([200, 200, 200]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    BizcardFront,
    BizcardBack,
    Handwriting,
    Attachment,
}

impl ImageKind {
    pub const ALL: [ImageKind; 4] = [
        ImageKind::BizcardFront,
        ImageKind::BizcardBack,
        ImageKind::Handwriting,
        ImageKind::Attachment,
    ];

    /// Sub-directory of the survey's image directory.
    pub fn dir(self) -> &'static str {
        match self {
            ImageKind::BizcardFront | ImageKind::BizcardBack => "bizcard",
            ImageKind::Handwriting => "handwriting",
            ImageKind::Attachment => "attachment",
        }
    }

    /// File name for set `index` (1-based) of `survey_id`.
    pub fn file_name(self, survey_id: &str, index: u32) -> String {
        match self {
            ImageKind::BizcardFront => format!("{survey_id}_{index:04}_1.jpg"),
            ImageKind::BizcardBack => format!("{survey_id}_{index:04}_2.jpg"),
            ImageKind::Handwriting => format!("{survey_id}_{index:04}_handwriting.png"),
            ImageKind::Attachment => format!("{survey_id}_{index:04}_attachment.jpg"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageSetConfig {
    pub survey_id: String,
    pub count: u32,
    /// Images land in `<output_dir>/<survey_id>/{bizcard,handwriting,attachment}`.
    pub output_dir: PathBuf,
}

impl ImageSetConfig {
    pub fn new(survey_id: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            survey_id: survey_id.into(),
            count: 900,
            output_dir: output_dir.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSetSummary {
    pub target_dir: PathBuf,
    pub sets: u32,
    pub files: usize,
}

/// Render one image. `label` is printed on attachments.
pub fn render<R: Rng + ?Sized>(kind: ImageKind, rng: &mut R, label: &str) -> RgbImage {
    match kind {
        ImageKind::BizcardFront => bizcard_front(rng),
        ImageKind::BizcardBack => bizcard_back(),
        ImageKind::Handwriting => handwriting(rng),
        ImageKind::Attachment => attachment(rng, label),
    }
}

/// Regenerate the full image set for a survey. Existing image directories are
/// removed first.
pub fn generate_images<R: Rng + ?Sized>(
    rng: &mut R,
    config: &ImageSetConfig,
) -> Result<ImageSetSummary, GenError> {
    let target_dir = config.output_dir.join(&config.survey_id);
    for dir in ["bizcard", "handwriting", "attachment"] {
        reset_dir(&target_dir.join(dir))?;
    }

    info!(survey_id = %config.survey_id, sets = config.count, "generating images");
    let mut files = 0;
    for i in 1..=config.count {
        for kind in ImageKind::ALL {
            let name = kind.file_name(&config.survey_id, i);
            let image = render(kind, rng, &name);
            image.save(target_dir.join(kind.dir()).join(&name))?;
            files += 1;
        }
        if i % PROGRESS_EVERY == 0 {
            info!(sets = i, "generated image sets");
        }
    }

    Ok(ImageSetSummary {
        target_dir,
        sets: config.count,
        files,
    })
}

fn reset_dir(dir: &Path) -> Result<(), GenError> {
    let io = |source| GenError::Io {
        path: dir.to_path_buf(),
        source,
    };
    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(io)?;
    }
    std::fs::create_dir_all(dir).map_err(io)
}

// ── Layouts ──

fn bizcard_front<R: Rng + ?Sized>(rng: &mut R) -> RgbImage {
    let mut img = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, WHITE);
    outline_rect(&mut img, (50, 200), (974, 824), 5, BLACK);

    let company = pick(rng, CARD_COMPANIES);
    let name = pick(rng, CARD_NAMES);
    let title = pick(rng, CARD_TITLES);
    text_bar(&mut img, (100, 300), company, 60, BLACK);
    text_bar(&mut img, (100, 450), title, 30, BLACK);
    text_bar(&mut img, (100, 500), name, 60, BLACK);
    text_bar(&mut img, (100, 650), "Tel: 03-1234-5678", 40, BLACK);
    text_bar(&mut img, (100, 700), "Email: info@example.com", 40, BLACK);

    let logo = Rgb([rng.r#gen(), rng.r#gen(), rng.r#gen()]);
    fill_triangle(&mut img, [(800, 250), (950, 250), (875, 400)], logo);
    img
}

fn bizcard_back() -> RgbImage {
    let mut img = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, WHITE);
    outline_rect(&mut img, (50, 200), (974, 824), 2, RULE_GREY);
    text_bar(&mut img, (400, 250), "MEMO / NOTES", 40, Rgb([100, 100, 100]));
    for i in 0..10 {
        let y = 350 + i * 50;
        draw_line(&mut img, (100, y), (900, y), 1, RULE_GREY);
    }
    img
}

fn handwriting<R: Rng + ?Sized>(rng: &mut R) -> RgbImage {
    const SEGMENTS: i64 = 20;
    let mut img = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgb([255, 255, 240]));

    for _ in 0..rng.gen_range(5..=15) {
        let start_x = rng.gen_range(50..=200);
        let start_y = rng.gen_range(100..=900);
        let end_x = start_x + rng.gen_range(200..=600);
        let ink = Rgb([
            rng.gen_range(0..=50),
            rng.gen_range(0..=50),
            rng.gen_range(100..=255),
        ]);

        let step = (end_x - start_x) as f64 / SEGMENTS as f64;
        let mut prev = (start_x, start_y);
        let mut y = start_y;
        for s in 1..=SEGMENTS {
            y += rng.gen_range(-5..=5);
            let next = (start_x + (step * s as f64) as i64, y);
            draw_line(&mut img, prev, next, 4, ink);
            prev = next;
        }
    }

    let note = pick(rng, HANDWRITING_NOTES);
    text_bar(&mut img, (100, 50), note, 50, Rgb([0, 0, 128]));
    img
}

fn attachment<R: Rng + ?Sized>(rng: &mut R, label: &str) -> RgbImage {
    let mut img = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgb([240, 240, 240]));
    fill_rect(&mut img, (50, 50), (974, 974), WHITE);
    outline_rect(&mut img, (50, 50), (974, 974), 3, BLACK);

    // Floor plan: axis-aligned walls.
    for _ in 0..15 {
        let x1 = rng.gen_range(100..=900);
        let y1 = rng.gen_range(100..=900);
        let mut x2 = rng.gen_range(100..=900);
        let mut y2 = rng.gen_range(100..=900);
        if rng.r#gen::<f64>() > 0.5 {
            x2 = x1;
        } else {
            y2 = y1;
        }
        let wall = Rgb([
            rng.gen_range(50..=150),
            rng.gen_range(50..=150),
            rng.gen_range(50..=150),
        ]);
        draw_line(&mut img, (x1, y1), (x2, y2), 3, wall);
    }

    text_bar(&mut img, (70, 70), "Evidence / Inspection Photo", 40, Rgb([50, 50, 50]));
    text_bar(&mut img, (70, 120), &format!("Ref: {label}"), 40, Rgb([100, 100, 100]));
    img
}

// ── Drawing primitives ──
//
// Coordinates are signed so strokes may run off the canvas; off-canvas pixels
// are clipped.

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && x < img.width() as i64 && y < img.height() as i64 {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Inclusive corners.
fn fill_rect(img: &mut RgbImage, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Rgb<u8>) {
    for y in y0.min(y1)..=y0.max(y1) {
        for x in x0.min(x1)..=x0.max(x1) {
            put(img, x, y, color);
        }
    }
}

/// Border of `width` pixels drawn inwards from the corners.
fn outline_rect(
    img: &mut RgbImage,
    (x0, y0): (i64, i64),
    (x1, y1): (i64, i64),
    width: i64,
    color: Rgb<u8>,
) {
    let w = width - 1;
    fill_rect(img, (x0, y0), (x1, y0 + w), color);
    fill_rect(img, (x0, y1 - w), (x1, y1), color);
    fill_rect(img, (x0, y0), (x0 + w, y1), color);
    fill_rect(img, (x1 - w, y0), (x1, y1), color);
}

/// Bresenham line stamped with a square pen.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), width: i64, color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let lo = -(width - 1) / 2;
    let hi = lo + width - 1;

    loop {
        fill_rect(img, (x + lo, y + lo), (x + hi, y + hi), color);
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn fill_triangle(img: &mut RgbImage, pts: [(i64, i64); 3], color: Rgb<u8>) {
    let edge = |(ax, ay): (i64, i64), (bx, by): (i64, i64), (px, py): (i64, i64)| {
        (bx - ax) * (py - ay) - (by - ay) * (px - ax)
    };
    let area = edge(pts[0], pts[1], pts[2]);
    if area == 0 {
        return;
    }

    let xs = pts.map(|p| p.0);
    let ys = pts.map(|p| p.1);
    let (min_x, max_x) = (xs.into_iter().min().unwrap_or(0), xs.into_iter().max().unwrap_or(0));
    let (min_y, max_y) = (ys.into_iter().min().unwrap_or(0), ys.into_iter().max().unwrap_or(0));

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = (x, y);
            let w0 = edge(pts[1], pts[2], p);
            let w1 = edge(pts[2], pts[0], p);
            let w2 = edge(pts[0], pts[1], p);
            let inside = if area > 0 {
                w0 >= 0 && w1 >= 0 && w2 >= 0
            } else {
                w0 <= 0 && w1 <= 0 && w2 <= 0
            };
            if inside {
                put(img, x, y, color);
            }
        }
    }
}

/// A bar where `text` would be drawn at `size` px: full-width glyphs are
/// `size` wide, ASCII about half that, spaces left blank.
fn text_bar(img: &mut RgbImage, (x, y): (i64, i64), text: &str, size: i64, color: Rgb<u8>) {
    let top = y + size / 10;
    let bottom = y + size * 9 / 10;
    let mut cursor = x;
    for ch in text.chars() {
        let advance = if ch.is_ascii() { size * 11 / 20 } else { size };
        if !ch.is_whitespace() {
            fill_rect(img, (cursor, top), (cursor + advance - 2, bottom), color);
        }
        cursor += advance;
    }
}
