//! Procedural raster assets: gradient backdrop, glass card, rounded panels,
//! app icon, and the per-query condition-icon composite. All functions are
//! deterministic for fixed inputs.

use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};

pub const WINDOW_WIDTH: u32 = 430;
pub const WINDOW_HEIGHT: u32 = 650;
pub const ICON_SIZE: u32 = 120;

pub const BG_TOP: Rgba<u8> = Rgba([62, 30, 104, 255]);
pub const BG_BOTTOM: Rgba<u8> = Rgba([90, 44, 141, 255]);
pub const ACCENT: Rgba<u8> = Rgba([122, 90, 245, 255]);

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GLASS_FILL: Rgba<u8> = Rgba([255, 255, 255, 40]);
const GLASS_HIGHLIGHT: Rgba<u8> = Rgba([255, 255, 255, 12]);

/// Vertical two-color gradient. The top row equals `top` and the bottom row
/// equals `bottom` exactly; rows in between interpolate linearly. A single
/// row renders as `top`.
pub fn vertical_gradient(w: u32, h: u32, top: Rgba<u8>, bottom: Rgba<u8>) -> RgbaImage {
    let mut img = RgbaImage::new(w, h);
    for y in 0..h {
        let t = if h > 1 {
            y as f32 / (h - 1) as f32
        } else {
            0.0
        };
        let px = lerp(top, bottom, t);
        for x in 0..w {
            img.put_pixel(x, y, px);
        }
    }
    img
}

fn lerp(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
    Rgba([
        mix(a[0], b[0]),
        mix(a[1], b[1]),
        mix(a[2], b[2]),
        mix(a[3], b[3]),
    ])
}

/// Rounded rectangle filling the whole canvas; pixels past the corner radius
/// stay fully transparent.
pub fn rounded_rect(w: u32, h: u32, radius: f32, fill: Rgba<u8>) -> RgbaImage {
    let mut img = RgbaImage::new(w, h);
    if w == 0 || h == 0 {
        return img;
    }
    let r = radius
        .min((w as f32 - 1.0) / 2.0)
        .min((h as f32 - 1.0) / 2.0)
        .max(0.0);
    for y in 0..h {
        for x in 0..w {
            if inside_rounded(x as f32, y as f32, w as f32, h as f32, r) {
                img.put_pixel(x, y, fill);
            }
        }
    }
    img
}

fn inside_rounded(x: f32, y: f32, w: f32, h: f32, r: f32) -> bool {
    // Distance from the pixel to the nearest corner-arc center.
    let cx = x.clamp(r, w - 1.0 - r);
    let cy = y.clamp(r, h - 1.0 - r);
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= r * r
}

/// Semi-transparent "glass" panel: low-alpha white rounded rectangle with an
/// inset highlight, softened by a light blur. Never opaque anywhere.
pub fn glass_card(w: u32, h: u32, radius: f32) -> RgbaImage {
    let mut card = rounded_rect(w, h, radius, GLASS_FILL);
    if w > 12 && h > 12 {
        let highlight = rounded_rect(w - 12, h - 12, (radius - 6.0).max(1.0), GLASS_HIGHLIGHT);
        imageops::overlay(&mut card, &highlight, 6, 6);
    }
    imageops::blur(&card, 0.6)
}

/// Accent-colored pill for the submit button.
pub fn button_pill(w: u32, h: u32) -> RgbaImage {
    let pill = rounded_rect(w, h, h as f32 / 2.0, ACCENT);
    imageops::blur(&pill, 0.2)
}

/// White rounded panel behind the search input.
pub fn search_panel(w: u32, h: u32) -> RgbaImage {
    let panel = rounded_rect(w, h, 12.0, WHITE);
    imageops::blur(&panel, 0.3)
}

/// Full-window backdrop: vertical gradient plus two large blurred orbs for
/// texture.
pub fn background(w: u32, h: u32) -> RgbaImage {
    let mut bg = vertical_gradient(w, h, BG_TOP, BG_BOTTOM);
    if w == 0 || h == 0 {
        return bg;
    }
    let wf = w as f32;
    let hf = h as f32;
    let mut orbs = RgbaImage::new(w, h);
    filled_circle(&mut orbs, wf * 0.35, hf * 0.35, wf * 0.67, Rgba([255, 255, 255, 12]));
    filled_circle(&mut orbs, wf * 0.86, hf * 0.23, wf * 0.58, Rgba([255, 255, 255, 6]));
    let orbs = imageops::blur(&orbs, 24.0);
    imageops::overlay(&mut bg, &orbs, 0, 0);
    bg
}

/// Circular app icon: purple disc, sun, blurred cloud glyph, soft highlight.
pub fn app_icon(size: u32) -> RgbaImage {
    let s = size as f32;
    let center = (s - 1.0) / 2.0;
    let mut img = RgbaImage::new(size, size);

    filled_circle(&mut img, center, center, s / 2.0, Rgba([120, 85, 245, 255]));
    // Sun peeking out above the cloud.
    filled_circle(
        &mut img,
        center - s * 0.09,
        center - s * 0.06,
        s * 0.19,
        Rgba([255, 205, 0, 255]),
    );

    // Cloud on its own layer so its blur stays off the disc edge.
    let mut cloud = RgbaImage::new(size, size);
    filled_circle(&mut cloud, s * 0.33, s * 0.60, s * 0.13, WHITE);
    filled_circle(&mut cloud, s * 0.50, s * 0.51, s * 0.15, WHITE);
    filled_circle(&mut cloud, s * 0.67, s * 0.60, s * 0.13, WHITE);
    fill_rect(
        &mut cloud,
        (s * 0.18) as u32,
        (s * 0.58) as u32,
        (s * 0.82) as u32,
        (s * 0.74) as u32,
        WHITE,
    );
    let cloud = imageops::blur(&cloud, 0.6);
    imageops::overlay(&mut img, &cloud, 0, 0);

    filled_circle(&mut img, s * 0.25, s * 0.25, s * 0.20, Rgba([255, 255, 255, 50]));
    img
}

/// Decode a fetched condition icon, resize it to exactly 120x120 and
/// composite it over a translucent circular backdrop.
pub fn compose_icon(png_bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    let icon = image::load_from_memory(png_bytes)?.to_rgba8();
    let icon = imageops::resize(&icon, ICON_SIZE, ICON_SIZE, FilterType::Lanczos3);

    let mut composite = RgbaImage::new(ICON_SIZE, ICON_SIZE);
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    filled_circle(
        &mut composite,
        center,
        center,
        ICON_SIZE as f32 / 2.0,
        Rgba([255, 255, 255, 20]),
    );
    imageops::overlay(&mut composite, &icon, 0, 0);
    Ok(composite)
}

/// Alpha-blend a filled circle into `img`.
pub fn filled_circle(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, fill: Rgba<u8>) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || radius <= 0.0 {
        return;
    }
    let x0 = (cx - radius).floor().max(0.0) as u32;
    let y0 = (cy - radius).floor().max(0.0) as u32;
    let x1 = ((cx + radius).ceil() as i64).clamp(0, w as i64 - 1) as u32;
    let y1 = ((cy + radius).ceil() as i64).clamp(0, h as i64 - 1) as u32;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= radius * radius {
                img.get_pixel_mut(x, y).blend(&fill);
            }
        }
    }
}

fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, fill: Rgba<u8>) {
    let (w, h) = img.dimensions();
    for y in y0..y1.min(h) {
        for x in x0..x1.min(w) {
            img.get_pixel_mut(x, y).blend(&fill);
        }
    }
}
