// PDF emission: embed each page raster full-bleed into a printpdf document.

use ::image::RgbaImage;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;

use crate::AppError;

/// Serialize page rasters into a single multi-page PDF. An empty page list
/// is fatal; no file is written.
pub fn write_pdf(
    pages: &[RgbaImage],
    page_w_mm: f32,
    page_h_mm: f32,
    output_path: &str,
    title: &str,
) -> Result<(), AppError> {
    let first = pages
        .first()
        .ok_or_else(|| AppError::Pdf("no pages to write".to_string()))?;

    let (doc, page1, layer1) = PdfDocument::new(title, Mm(page_w_mm), Mm(page_h_mm), "Layer 1");
    embed_page_raster(&doc.get_page(page1).get_layer(layer1), first, page_w_mm);

    for raster in &pages[1..] {
        let (page, layer) = doc.add_page(Mm(page_w_mm), Mm(page_h_mm), "Layer 1");
        embed_page_raster(&doc.get_page(page).get_layer(layer), raster, page_w_mm);
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    Ok(())
}

fn embed_page_raster(layer: &PdfLayerReference, raster: &RgbaImage, page_w_mm: f32) {
    let (width, height) = raster.dimensions();

    // Flatten to raw RGB (page canvases are fully opaque)
    let mut raw_pixels = Vec::with_capacity((width * height * 3) as usize);
    for pixel in raster.pixels() {
        raw_pixels.extend_from_slice(&pixel.0[..3]);
    }

    let image = Image::from(ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: raw_pixels,
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI chosen so the raster spans the full physical page width
    let dpi = (width as f32) / (page_w_mm / 25.4);

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}
