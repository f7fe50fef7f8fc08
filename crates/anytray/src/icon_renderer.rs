//! Procedural tray icons.
//!
//! Each state is drawn as a filled disc in its color with a darker rim and,
//! optionally, a glyph scaled up from a 5x7 bitmap.

use crate::{
    AppError, AppResult,
    config::{Glyph, StateStyle},
};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{Rgba, RgbaImage};
use tray_icon::Icon;

/// Edge length of generated icons in pixels.
pub(crate) const ICON_SIZE: u32 = 32;

const GLYPH_COLUMNS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
const GLYPH_SCALE: u32 = 3;
const RIM_WIDTH: f32 = 2.0;
const RIM_SHADE: f32 = 0.6;
const LIGHT_LUMA_THRESHOLD: f32 = 160.0;

const GLYPH_ON_DARK: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GLYPH_ON_LIGHT: Rgba<u8> = Rgba([27, 27, 27, 255]);

/// Draw the icon for a state.
#[track_caller]
pub(crate) fn render_icon(style: &StateStyle) -> AppResult<RgbaImage> {
    let [r, g, b] = style.rgb().ok_or_else(|| AppError::TrayError {
        reason: format!("Invalid color {:?} for state {:?}", style.color, style.name),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let fill = Rgba([r, g, b, 255]);
    let rim = Rgba([shade(r), shade(g), shade(b), 255]);

    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 1.0;

    let mut img = RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let dist = ((x as f32 - center).powi(2) + (y as f32 - center).powi(2)).sqrt();
        if dist > radius {
            Rgba([0, 0, 0, 0])
        } else if dist > radius - RIM_WIDTH {
            rim
        } else {
            fill
        }
    });

    if let Some(glyph) = style.glyph {
        let ink = if luma(r, g, b) > LIGHT_LUMA_THRESHOLD {
            GLYPH_ON_LIGHT
        } else {
            GLYPH_ON_DARK
        };
        draw_glyph(&mut img, glyph, ink);
    }

    Ok(img)
}

/// Convert a rendered image into a tray icon.
#[track_caller]
pub(crate) fn to_tray_icon(img: &RgbaImage) -> AppResult<Icon> {
    let (width, height) = img.dimensions();

    Icon::from_rgba(img.as_raw().clone(), width, height).map_err(|e| AppError::TrayError {
        reason: format!("Failed to create icon from RGBA: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Top-left pixel of the glyph area, centered in the icon.
pub(crate) fn glyph_origin() -> (u32, u32) {
    (
        (ICON_SIZE - GLYPH_COLUMNS * GLYPH_SCALE) / 2,
        (ICON_SIZE - GLYPH_ROWS * GLYPH_SCALE) / 2,
    )
}

fn draw_glyph(img: &mut RgbaImage, glyph: Glyph, ink: Rgba<u8>) {
    let (origin_x, origin_y) = glyph_origin();

    for (row, bits) in (0u32..).zip(glyph.bitmap()) {
        for col in 0..GLYPH_COLUMNS {
            if bits & (1 << (GLYPH_COLUMNS - 1 - col)) == 0 {
                continue;
            }
            for dy in 0..GLYPH_SCALE {
                for dx in 0..GLYPH_SCALE {
                    img.put_pixel(
                        origin_x + col * GLYPH_SCALE + dx,
                        origin_y + row * GLYPH_SCALE + dy,
                        ink,
                    );
                }
            }
        }
    }
}

fn shade(channel: u8) -> u8 {
    (f32::from(channel) * RIM_SHADE) as u8
}

fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)
}
