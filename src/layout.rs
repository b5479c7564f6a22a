// Grid layout arithmetic: fit fixed-size card slots into a page's usable area.

use crate::AppError;

/// Physical page and card geometry, in inches, rasterized at a fixed DPI.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub page_w_in: f32,
    pub page_h_in: f32,
    pub margin_in: f32,
    pub card_w_in: f32,
    pub card_h_in: f32,
    pub dpi: u32,
}

impl Geometry {
    /// Convert a length in inches to pixels, truncating.
    pub fn px(&self, inches: f32) -> u32 {
        (inches * self.dpi as f32) as u32
    }

    pub fn page_w_mm(&self) -> f32 {
        self.page_w_in * 25.4
    }

    pub fn page_h_mm(&self) -> f32 {
        self.page_h_in * 25.4
    }
}

/// Derived pixel grid: column/row counts and slot placement. Leftover space
/// after integer division is absorbed on the trailing edge.
#[derive(Debug, Clone, Copy)]
pub struct GridLayout {
    pub page_w_px: u32,
    pub page_h_px: u32,
    pub margin_px: u32,
    pub card_w_px: u32,
    pub card_h_px: u32,
    pub cols: u32,
    pub rows: u32,
    pub dpi: u32,
}

impl GridLayout {
    /// A geometry whose card does not fit the usable area at all is a
    /// configuration error, not something to let degenerate downstream.
    pub fn new(geometry: &Geometry) -> Result<Self, AppError> {
        let page_w_px = geometry.px(geometry.page_w_in);
        let page_h_px = geometry.px(geometry.page_h_in);
        let margin_px = geometry.px(geometry.margin_in);
        let card_w_px = geometry.px(geometry.card_w_in);
        let card_h_px = geometry.px(geometry.card_h_in);

        if card_w_px == 0 || card_h_px == 0 {
            return Err(AppError::Layout(format!(
                "card size {}\" x {}\" rasterizes to nothing at {} DPI",
                geometry.card_w_in, geometry.card_h_in, geometry.dpi
            )));
        }

        let usable_w = page_w_px.saturating_sub(2 * margin_px);
        let usable_h = page_h_px.saturating_sub(2 * margin_px);
        let cols = usable_w / card_w_px;
        let rows = usable_h / card_h_px;

        if cols == 0 || rows == 0 {
            return Err(AppError::Layout(format!(
                "card {}\" x {}\" does not fit the usable {}\" x {}\" page area",
                geometry.card_w_in,
                geometry.card_h_in,
                geometry.page_w_in - 2.0 * geometry.margin_in,
                geometry.page_h_in - 2.0 * geometry.margin_in,
            )));
        }

        Ok(GridLayout {
            page_w_px,
            page_h_px,
            margin_px,
            card_w_px,
            card_h_px,
            cols,
            rows,
            dpi: geometry.dpi,
        })
    }

    pub fn per_page(&self) -> usize {
        (self.cols * self.rows) as usize
    }

    /// Top-left pixel of the slot at `index` (row-major within one page).
    pub fn slot_origin(&self, index: usize) -> (u32, u32) {
        let col = (index as u32) % self.cols;
        let row = (index as u32) / self.cols;
        (
            self.margin_px + col * self.card_w_px,
            self.margin_px + row * self.card_h_px,
        )
    }

    pub fn page_count(&self, records: usize) -> usize {
        records.div_ceil(self.per_page())
    }
}
