// Page composition: paste rendered cards into page canvases, sealing a page
// whenever its grid fills.

use image::{imageops, Rgba, RgbaImage};

use crate::layout::GridLayout;

// Floral white, matching the original print sheets.
const PAGE_BACKGROUND: Rgba<u8> = Rgba([0xFF, 0xFA, 0xF0, 0xFF]);

/// Owns the page canvas being filled; sealed pages are immutable from then
/// on and handed out in order by `finish`.
pub struct PageCompositor<'a> {
    layout: &'a GridLayout,
    pages: Vec<RgbaImage>,
    current: RgbaImage,
    filled: usize,
}

impl<'a> PageCompositor<'a> {
    pub fn new(layout: &'a GridLayout) -> Self {
        PageCompositor {
            layout,
            pages: Vec::new(),
            current: Self::blank(layout),
            filled: 0,
        }
    }

    fn blank(layout: &GridLayout) -> RgbaImage {
        RgbaImage::from_pixel(layout.page_w_px, layout.page_h_px, PAGE_BACKGROUND)
    }

    /// Paste a card at the next row-major slot, rolling over to a fresh page
    /// when the current one is full.
    pub fn push(&mut self, card: &RgbaImage) {
        let (x, y) = self.layout.slot_origin(self.filled);
        imageops::overlay(&mut self.current, card, x as i64, y as i64);
        self.filled += 1;
        if self.filled == self.layout.per_page() {
            let sealed = std::mem::replace(&mut self.current, Self::blank(self.layout));
            self.pages.push(sealed);
            self.filled = 0;
        }
    }

    /// Seal the last partial page iff it holds at least one card.
    pub fn finish(mut self) -> Vec<RgbaImage> {
        if self.filled > 0 {
            self.pages.push(self.current);
        }
        self.pages
    }
}
