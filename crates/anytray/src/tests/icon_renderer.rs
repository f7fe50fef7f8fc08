use crate::{
    config::{Glyph, StateStyle},
    icon_renderer::{ICON_SIZE, glyph_origin, render_icon},
};

use image::Rgba;

/// WHAT: Icons are square at the tray size
/// WHY: tray-icon expects RGBA buffers matching the stated dimensions
#[test]
#[allow(clippy::unwrap_used)]
fn given_state_style_when_rendering_then_icon_has_tray_size() {
    // Given: A plain green state
    let style = StateStyle::new("green", "#2ecc40", None);

    // When: Rendering it
    let img = render_icon(&style).unwrap();

    // Then: 32x32
    assert_eq!(img.dimensions(), (ICON_SIZE, ICON_SIZE));
}

/// WHAT: Disc is filled with the state color, corners are transparent
/// WHY: The color is what distinguishes states at a glance
#[test]
#[allow(clippy::unwrap_used)]
fn given_plain_state_when_rendering_then_disc_filled_and_corners_clear() {
    // Given: A plain green state
    let style = StateStyle::new("green", "#2ecc40", None);

    // When: Rendering it
    let img = render_icon(&style).unwrap();

    // Then: Center is the fill, corner is transparent, edge is the darker rim
    assert_eq!(*img.get_pixel(15, 15), Rgba([0x2e, 0xcc, 0x40, 255]));
    assert_eq!(img.get_pixel(0, 0)[3], 0);
    assert_eq!(*img.get_pixel(15, 1), Rgba([27, 122, 38, 255]));
}

/// WHAT: Glyph is drawn in dark ink on light fills
/// WHY: A white glyph on yellow would be unreadable
#[test]
#[allow(clippy::unwrap_used)]
fn given_exclamation_on_yellow_when_rendering_then_glyph_is_dark() {
    // Given: The exclamation state
    let style = StateStyle::new("exclamation", "#ffdc00", Some(Glyph::Exclamation));
    let (x, y) = glyph_origin();

    // When: Rendering it
    let img = render_icon(&style).unwrap();

    // Then: The bar of the "!" is dark, the gap below it keeps the fill
    assert_eq!(*img.get_pixel(x + 7, y + 1), Rgba([27, 27, 27, 255]));
    assert_eq!(*img.get_pixel(x + 7, y + 15), Rgba([0xff, 0xdc, 0x00, 255]));
    assert_eq!(*img.get_pixel(x + 7, y + 19), Rgba([27, 27, 27, 255]));
}

/// WHAT: Glyph is drawn in white on dark fills
/// WHY: Keeps the question mark readable on blue
#[test]
#[allow(clippy::unwrap_used)]
fn given_question_on_blue_when_rendering_then_glyph_is_white() {
    // Given: The question state
    let style = StateStyle::new("question", "#0074d9", Some(Glyph::Question));
    let (x, y) = glyph_origin();

    // When: Rendering it
    let img = render_icon(&style).unwrap();

    // Then: The dot of the "?" is white
    assert_eq!(*img.get_pixel(x + 7, y + 19), Rgba([255, 255, 255, 255]));
}

/// WHAT: Invalid colors fail to render
/// WHY: Surfaces bad styles as errors instead of drawing garbage
#[test]
fn given_invalid_color_when_rendering_then_returns_error() {
    // Given: A named color
    let style = StateStyle::new("red", "red", None);

    // When: Rendering it
    let result = render_icon(&style);

    // Then: Error
    assert!(result.is_err());
}

/// WHAT: Every default state renders
/// WHY: The tray pre-renders the whole palette at start-up
#[test]
fn given_default_palette_when_rendering_then_all_succeed() {
    for style in StateStyle::defaults() {
        assert!(render_icon(&style).is_ok(), "failed to render {}", style.name);
    }
}

/// WHAT: Rendered icons convert to tray icons
/// WHY: The conversion is the last step before the tray shows them
#[test]
#[allow(clippy::unwrap_used)]
fn given_rendered_icon_when_converting_then_succeeds() {
    // Given: A rendered icon
    let img = render_icon(&StateStyle::new("blue", "#0074d9", None)).unwrap();

    // When: Converting for the tray
    let result = crate::icon_renderer::to_tray_icon(&img);

    // Then: Accepted
    assert!(result.is_ok());
}
