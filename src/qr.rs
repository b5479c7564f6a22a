// QR code generation for game clues, and the printable contact sheet.

use image::{imageops, DynamicImage, Luma, Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};
use rusttype::Font;
use std::path::{Path, PathBuf};

use crate::fonts;
use crate::layout::{Geometry, GridLayout};
use crate::page::PageCompositor;
use crate::pdf;
use crate::AppError;

/// Caption strip above the QR symbol, holding the encoded URL.
const CAPTION_HEIGHT: u32 = 40;
const CAPTION_SIZE: f32 = 13.0;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Botanical clue slugs hidden around the venue.
const BOTANICALS: &[&str] = &[
    "foxglove",
    "damiana",
    "valerian",
    "mandrake",
    "rose_otto",
    "potassium-bromide",
    "calcium-lactate",
    "iron-citrate",
    "vanilla-cherry-honey",
    "grain-alcohol",
    "plant-specimens",
    "herb-encyclopedia",
    "lavender",
    "rosemary",
    "thyme",
    "nettle",
    "chamomile",
    "ginger",
    "sage",
    "peppers",
];

/// Document clue slugs.
const DOCUMENTS: &[&str] = &[
    "engagement_card",
    "prenup_agreement",
    "death_cert_alice",
    "death_cert_sebastian",
    "death_cert_cordelia",
    "autopsy_alice",
    "autopsy_sebastian",
    "autopsy_cordelia",
    "payment_records",
    "trust_records",
    "name_change_docs",
    "romano_shipping",
    "shipping_manifests_romano",
    "marriage_certificate_dimarco",
    "bank_statement_fragments",
    "boat_registration_marina",
    "treasure_map_hand_drawn",
    "sebastian_pharmacy_orders",
];

/// Playable character slugs.
const CHARACTERS: &[&str] = &[
    "professor",
    "explorer",
    "baker",
    "heiress",
    "fiduciary",
    "doctor",
    "mortician",
    "clockmaker",
    "dressmaker",
    "artcollector",
    "influencer",
    "psychic",
];

#[derive(Debug, Clone, Copy)]
pub enum Category {
    Botanicals,
    Documents,
    Characters,
}

impl Category {
    fn slugs(self) -> &'static [&'static str] {
        match self {
            Category::Botanicals => BOTANICALS,
            Category::Documents => DOCUMENTS,
            Category::Characters => CHARACTERS,
        }
    }

    fn url(self, base_url: &str, slug: &str) -> String {
        match self {
            Category::Botanicals => format!("{}/clue/botanicals/{}.html", base_url, slug),
            Category::Documents => format!("{}/clue/documents/{}.html", base_url, slug),
            Category::Characters => format!("{}/character/{}.html", base_url, slug),
        }
    }

    fn file_prefix(self) -> &'static str {
        match self {
            Category::Botanicals => "botanical",
            Category::Documents => "document",
            Category::Characters => "character",
        }
    }
}

/// Generate one QR code PNG per slug in the category.
pub fn generate_category(
    category: Category,
    base_url: &str,
    out_dir: &Path,
    font: Option<&Font<'static>>,
) -> Result<(), AppError> {
    for slug in category.slugs() {
        let url = category.url(base_url, slug);
        let name = format!("{}_{}", category.file_prefix(), slug);
        let path = make_qr_png(&url, &name, out_dir, font)?;
        println!("✓ Generated: {} -> {}", path.display(), url);
    }
    Ok(())
}

/// Encode a URL as a QR symbol with the URL captioned above it and save it
/// as `{name}.png` in `out_dir` (created if needed).
pub fn make_qr_png(
    url: &str,
    name: &str,
    out_dir: &Path,
    font: Option<&Font<'static>>,
) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(out_dir)?;

    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::L)
        .map_err(|e| AppError::Qr(e.to_string()))?;
    let symbol = code.render::<Luma<u8>>().min_dimensions(300, 300).build();
    let symbol = DynamicImage::ImageLuma8(symbol).to_rgba8();

    let (w, h) = symbol.dimensions();
    let mut img = RgbaImage::from_pixel(w, h + CAPTION_HEIGHT, WHITE);
    imageops::overlay(&mut img, &symbol, 0, CAPTION_HEIGHT as i64);

    match font {
        Some(font) => fonts::draw_text_centered(
            &mut img,
            font,
            CAPTION_SIZE,
            w as f32 / 2.0,
            ((CAPTION_HEIGHT as f32 - CAPTION_SIZE) / 2.0) as i32,
            BLACK,
            url,
        ),
        None => println!("⚠️  Warning: no font for QR caption on {}", name),
    }

    let path = out_dir.join(format!("{}.png", name));
    img.save(&path)
        .map_err(|e| AppError::Qr(format!("{}: {}", path.display(), e)))?;
    Ok(path)
}

/// Compose every PNG in `dir` (sorted by name) into a grid-layout PDF, one
/// labelled cell per code. Returns how many codes were placed.
pub fn write_contact_sheet(
    dir: &Path,
    output: &str,
    geometry: &Geometry,
    layout: &GridLayout,
    font: Option<&Font<'static>>,
) -> Result<usize, AppError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| AppError::Data(format!("{}: {}", dir.display(), e)))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(AppError::Data(format!(
            "No QR codes found in {}",
            dir.display()
        )));
    }

    println!("📊 Found {} QR code files", files.len());
    println!(
        "  Grid: {} columns x {} rows = {} codes per page",
        layout.cols,
        layout.rows,
        layout.per_page()
    );

    let mut compositor = PageCompositor::new(layout);
    for file in &files {
        compositor.push(&render_cell(file, layout, font));
    }
    let pages = compositor.finish();

    pdf::write_pdf(
        &pages,
        geometry.page_w_mm(),
        geometry.page_h_mm(),
        output,
        "QR Codes",
    )?;
    Ok(files.len())
}

/// One contact sheet cell: the QR image centered above a filename label.
fn render_cell(file: &Path, layout: &GridLayout, font: Option<&Font<'static>>) -> RgbaImage {
    let cell_w = layout.card_w_px;
    let cell_h = layout.card_h_px;
    let mut cell = RgbaImage::from_pixel(cell_w, cell_h, WHITE);

    let pad = cell_w / 25;
    let label_h = cell_h / 8;

    match image::open(file) {
        Ok(img) => {
            let thumb = img
                .thumbnail(
                    cell_w.saturating_sub(2 * pad),
                    cell_h.saturating_sub(2 * pad + label_h),
                )
                .to_rgba8();
            let x = (cell_w.saturating_sub(thumb.width())) / 2;
            imageops::overlay(&mut cell, &thumb, x as i64, pad as i64);
        }
        Err(e) => println!("⚠️  Warning: could not load {}: {}", file.display(), e),
    }

    if let Some(font) = font {
        let label = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = (label_h as f32 * 0.5).max(8.0);
        fonts::draw_text_centered(
            &mut cell,
            font,
            size,
            cell_w as f32 / 2.0,
            (cell_h - label_h) as i32,
            BLACK,
            &label,
        );
    }

    cell
}
