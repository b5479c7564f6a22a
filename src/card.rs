// Card rendering: ornate border, title, best-fit image, wrapped body text,
// and the possession attribution line.

use image::{imageops, DynamicImage, Rgba, RgbaImage};
use rusttype::Font;
use std::io::Read;

use crate::data::CardRecord;
use crate::fonts;
use crate::layout::GridLayout;
use crate::text;
use crate::AppError;

// 1920s palette (parchment card, sepia ornaments)
const CARD_BACKGROUND: Rgba<u8> = Rgba([0xF5, 0xE6, 0xD3, 0xFF]);
const SEPIA: Rgba<u8> = Rgba([0x8B, 0x73, 0x55, 0xFF]);
const TEXT_COLOR: Rgba<u8> = Rgba([0x2C, 0x2C, 0x2C, 0xFF]);
const ATTRIBUTION_COLOR: Rgba<u8> = Rgba([0x1A, 0x1A, 0x1A, 0xFF]);

/// Characters per wrapped line. An approximation of what fits the text
/// width, not a pixel measurement.
const WRAP_CHARS: usize = 31;

// Nominal sizes at 72 DPI, scaled by the actual raster resolution.
const TITLE_SIZE: f32 = 24.0;
const TEXT_SIZE: f32 = 10.0;
const TINY_SIZE: f32 = 7.0;
const LINE_HEIGHT: f32 = 12.0;
const TEXT_PADDING: f32 = 10.0;

// QR thumbnail strip at the bottom of character cards.
const QR_SIZE: f32 = 60.0;
const QR_BOTTOM_PADDING: f32 = 12.0;

/// Render one card-slot-sized raster. Asset failures degrade the single
/// card (warning printed, region left blank); they never abort the batch.
pub fn render_card(
    record: &CardRecord,
    title: &str,
    layout: &GridLayout,
    font: Option<&Font<'static>>,
    image_ref: Option<&str>,
    qr_ref: Option<&str>,
) -> RgbaImage {
    let s = layout.dpi as f32 / 72.0;
    let card_w = layout.card_w_px;
    let card_h = layout.card_h_px;
    let mut card = RgbaImage::from_pixel(card_w, card_h, CARD_BACKGROUND);

    draw_ornate_border(&mut card, s);

    let title_top = (12.0 * s) as i32;
    if let Some(font) = font {
        fonts::draw_text_centered(
            &mut card,
            font,
            TITLE_SIZE * s,
            card_w as f32 / 2.0,
            title_top,
            SEPIA,
            title,
        );
    }
    let title_end = ((12.0 + TITLE_SIZE + 8.0) * s) as u32;

    let padding = (TEXT_PADDING * s) as u32;
    let line_height = ((LINE_HEIGHT * s) as u32).max(1);
    let mut lines = text::wrap(&record.text, WRAP_CHARS);

    let image = image_ref.and_then(|reference| match load_image(reference) {
        Ok(img) => Some(img),
        Err(e) => {
            println!("⚠️  Warning: card {}: {}", record.id, e);
            None
        }
    });

    // Character cards carry a QR thumbnail along the bottom edge; the strip
    // it occupies comes out of the image/text space above it.
    let qr_thumb = qr_ref.and_then(|reference| match load_image(reference) {
        Ok(img) => {
            let side = (QR_SIZE * s) as u32;
            Some(img.thumbnail(side, side).to_rgba8())
        }
        Err(e) => {
            println!("⚠️  Warning: card {}: {}", record.id, e);
            None
        }
    });
    let reserved_bottom = match qr_thumb {
        Some(ref qr) => qr.height() + (QR_BOTTOM_PADDING * s) as u32,
        None => 0,
    };

    let content_start = match image {
        Some(img) => {
            let percent = text::fit_image_height(
                lines.len(),
                card_h,
                title_end + reserved_bottom,
                padding,
                line_height,
            )
            .unwrap_or(text::IMAGE_HEIGHT_PERCENTS[text::IMAGE_HEIGHT_PERCENTS.len() - 1]);
            let image_h = card_h * percent / 100;
            let thumb = img
                .thumbnail(card_w.saturating_sub(2 * padding), image_h)
                .to_rgba8();
            let x = (card_w.saturating_sub(thumb.width())) / 2;
            imageops::overlay(&mut card, &thumb, x as i64, title_end as i64);
            title_end + thumb.height() + padding
        }
        // No image: text starts directly after the title, no gap.
        None => title_end,
    };

    let text_bottom = card_h.saturating_sub(reserved_bottom);
    let text_area = text_bottom.saturating_sub(content_start).saturating_sub(padding);
    let max_lines = text::lines_that_fit(text_area as i64, line_height);
    text::truncate_lines(&mut lines, max_lines, WRAP_CHARS);

    if let Some(font) = font {
        let mut line_y = content_start + padding;
        for line in &lines {
            if line_y + line_height >= text_bottom.saturating_sub(padding) {
                break;
            }
            fonts::draw_text(
                &mut card,
                font,
                TEXT_SIZE * s,
                padding as i32,
                line_y as i32,
                TEXT_COLOR,
                line,
            );
            line_y += line_height;
        }

        if let Some(ref possession) = record.possession {
            let owner = format!("— {} —", possession.to_uppercase());
            let tiny = TINY_SIZE * s;
            let owner_y =
                text_bottom as i32 - padding as i32 - fonts::line_height(font, tiny) as i32;
            fonts::draw_text(
                &mut card,
                font,
                tiny,
                padding as i32,
                owner_y,
                ATTRIBUTION_COLOR,
                &owner,
            );
        }
    }

    if let Some(qr) = qr_thumb {
        let x = (card_w.saturating_sub(qr.width())) / 2;
        let y = card_h
            .saturating_sub(qr.height())
            .saturating_sub((QR_BOTTOM_PADDING * s) as u32);
        imageops::overlay(&mut card, &qr, x as i64, y as i64);
    }

    card
}

/// Outer border, inset inner border, and four corner dots.
fn draw_ornate_border(card: &mut RgbaImage, s: f32) {
    let w = card.width() as i32;
    let h = card.height() as i32;
    let inset = (5.0 * s) as i32;
    let stroke = ((2.0 * s) as i32).max(1);
    let thin = (s as i32).max(1);

    draw_rect_outline(card, inset, inset, w - 1 - inset, h - 1 - inset, stroke, SEPIA);

    let inner = inset + stroke + (2.0 * s) as i32;
    draw_rect_outline(card, inner, inner, w - 1 - inner, h - 1 - inner, thin, SEPIA);

    let r = (4.0 * s) as i32;
    let offset = inset + (8.0 * s) as i32;
    for &(cx, cy) in &[
        (offset, offset),
        (w - 1 - offset, offset),
        (offset, h - 1 - offset),
        (w - 1 - offset, h - 1 - offset),
    ] {
        draw_disc(card, cx, cy, r, SEPIA);
    }
}

fn draw_rect_outline(
    img: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    stroke: i32,
    color: Rgba<u8>,
) {
    for t in 0..stroke {
        draw_hline(img, x0, x1, y0 + t, color);
        draw_hline(img, x0, x1, y1 - t, color);
        draw_vline(img, x0 + t, y0, y1, color);
        draw_vline(img, x1 - t, y0, y1, color);
    }
}

fn draw_hline(img: &mut RgbaImage, x0: i32, x1: i32, y: i32, color: Rgba<u8>) {
    if y < 0 || y >= img.height() as i32 {
        return;
    }
    for x in x0.max(0)..=x1.min(img.width() as i32 - 1) {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_vline(img: &mut RgbaImage, x: i32, y0: i32, y1: i32, color: Rgba<u8>) {
    if x < 0 || x >= img.width() as i32 {
        return;
    }
    for y in y0.max(0)..=y1.min(img.height() as i32 - 1) {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_disc(img: &mut RgbaImage, cx: i32, cy: i32, r: i32, color: Rgba<u8>) {
    for y in (cy - r).max(0)..=(cy + r).min(img.height() as i32 - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(img.width() as i32 - 1) {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Load card artwork from a file path or an http(s) URL.
fn load_image(reference: &str) -> Result<DynamicImage, AppError> {
    let bytes = if reference.starts_with("http://") || reference.starts_with("https://") {
        let response = ureq::get(reference)
            .call()
            .map_err(|e| AppError::Image(format!("Failed to fetch {}: {}", reference, e)))?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| AppError::Image(format!("Failed to read response: {}", e)))?;
        bytes
    } else {
        std::fs::read(reference).map_err(|e| AppError::Image(format!("{}: {}", reference, e)))?
    };
    image::load_from_memory(&bytes)
        .map_err(|e| AppError::Image(format!("Failed to decode image: {}", e)))
}
