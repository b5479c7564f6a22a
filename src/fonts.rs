// Font loading and raster text drawing on image buffers.

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

/// Candidate system font paths, probed in order. Serif faces first for the
/// 1920s look.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Georgia.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
    "C:\\Windows\\Fonts\\georgia.ttf",
    "C:\\Windows\\Fonts\\times.ttf",
];

/// Load the first parseable font, preferring an explicitly given file. A
/// missing font is not fatal; callers render without text.
pub fn load_font(explicit: Option<&str>) -> Option<Font<'static>> {
    let candidates = explicit
        .into_iter()
        .chain(FONT_CANDIDATES.iter().copied());
    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            if let Some(font) = Font::try_from_vec(data) {
                return Some(font);
            }
        }
    }
    None
}

/// Pixel width of `text` at the given size: the final glyph's position plus
/// its advance, so trailing side bearings and spaces are counted.
pub fn text_width(font: &Font<'_>, size_px: f32, text: &str) -> f32 {
    let scale = Scale::uniform(size_px);
    let v_metrics = font.v_metrics(scale);
    font.layout(text, scale, point(0.0, v_metrics.ascent))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Line height (ascent to descent) at the given size.
pub fn line_height(font: &Font<'_>, size_px: f32) -> f32 {
    let v_metrics = font.v_metrics(Scale::uniform(size_px));
    v_metrics.ascent - v_metrics.descent
}

/// Draw `text` with its top-left corner at `(x, y)`, alpha-blending glyph
/// coverage over the existing pixels.
pub fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'_>,
    size_px: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(size_px);
    let v_metrics = font.v_metrics(scale);
    let baseline = y as f32 + v_metrics.ascent;
    for glyph in font.layout(text, scale, point(x as f32, baseline)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px >= img.width() as i32 || py >= img.height() as i32 {
                    return;
                }
                let dst = img.get_pixel_mut(px as u32, py as u32);
                for c in 0..3 {
                    dst.0[c] =
                        (color.0[c] as f32 * coverage + dst.0[c] as f32 * (1.0 - coverage)) as u8;
                }
            });
        }
    }
}

/// Draw `text` horizontally centered on `center_x`, top edge at `y`.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    font: &Font<'_>,
    size_px: f32,
    center_x: f32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let width = text_width(font, size_px, text);
    draw_text(img, font, size_px, (center_x - width / 2.0) as i32, y, color, text);
}
