// mystery-cards: Generate printable cards and QR codes for a murder mystery party game

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

mod card;
mod data;
mod fonts;
mod layout;
mod page;
mod pdf;
mod qr;
mod text;

use layout::{Geometry, GridLayout};
use page::PageCompositor;

// ============================================================================
// Constants
// ============================================================================

/// US Letter page dimensions in inches
const PAGE_WIDTH_IN: f32 = 8.5;
const PAGE_HEIGHT_IN: f32 = 11.0;

/// Page margin
const MARGIN_IN: f32 = 0.5;

/// Default card slot dimensions
const CARD_WIDTH_IN: f32 = 2.5;
const CARD_HEIGHT_IN: f32 = 3.5;

/// QR contact sheet cell size (square)
const QR_CELL_IN: f32 = 2.5;

/// Default base URL for clue QR codes
const BASE_URL: &str = "https://filatova-elena.github.io/murder_mystery";

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("Failed to read data: {0}")]
    Data(String),
    #[error("Failed to generate QR code: {0}")]
    Qr(String),
    #[error("Invalid layout: {0}")]
    Layout(String),
    #[error("Failed to load image: {0}")]
    Image(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser, Debug)]
#[command(version, about = "Generate printable cards and QR codes for a murder mystery party game")]
struct Cli {
    /// TTF font file for card and caption text (system fonts probed otherwise)
    #[arg(long, global = true)]
    font: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render card records from a JSON data file into a card-grid PDF
    Cards {
        /// JSON file containing the card records
        #[arg(long, default_value = "data/rumors.json")]
        data: String,

        /// Output PDF filename
        #[arg(long, default_value = "fact_cards.pdf")]
        output: String,

        /// Title drawn at the top of every card
        #[arg(long, default_value = "FACT")]
        title: String,

        /// Top-level array key to read (rumors, facts, documents, characters, or auto)
        #[arg(long, default_value = "auto")]
        key: String,

        /// Directory of per-record artwork (fact_{id:02}.png naming)
        #[arg(long)]
        images_dir: Option<String>,

        /// Directory of per-record QR codes (character_{id}.png naming)
        #[arg(long)]
        qr_dir: Option<String>,

        /// Card width in inches
        #[arg(long, default_value_t = CARD_WIDTH_IN)]
        card_width: f32,

        /// Card height in inches
        #[arg(long, default_value_t = CARD_HEIGHT_IN)]
        card_height: f32,

        /// Raster resolution in dots per inch
        #[arg(long, default_value_t = 150)]
        dpi: u32,
    },
    /// Generate QR code PNGs for game clues
    Qr {
        /// Which QR codes to generate
        #[arg(long = "type", value_enum, default_value = "all")]
        kind: QrKind,

        /// Custom URL to encode (used with --type custom)
        #[arg(long)]
        url: Option<String>,

        /// Filename for the custom QR code, without extension (used with --type custom)
        #[arg(long)]
        name: Option<String>,

        /// Output directory for QR codes
        #[arg(long, default_value = "qr_codes")]
        output: String,

        /// Base URL for generated clue links
        #[arg(long, default_value = BASE_URL)]
        base_url: String,
    },
    /// Compose QR code PNGs from a directory into a contact sheet PDF
    QrSheet {
        /// Directory of QR code PNGs
        #[arg(long, default_value = "qr_codes")]
        dir: String,

        /// Output PDF filename
        #[arg(long, default_value = "qr_codes_grid.pdf")]
        output: String,

        /// Raster resolution in dots per inch
        #[arg(long, default_value_t = 150)]
        dpi: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum QrKind {
    All,
    Botanicals,
    Documents,
    Characters,
    Custom,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let font = fonts::load_font(cli.font.as_deref());
    if font.is_none() {
        println!("⚠️  No usable font found; text will be skipped");
    }

    match cli.command {
        Command::Cards {
            data,
            output,
            title,
            key,
            images_dir,
            qr_dir,
            card_width,
            card_height,
            dpi,
        } => run_cards(
            &data,
            &output,
            &title,
            &key,
            images_dir.as_deref(),
            qr_dir.as_deref(),
            card_width,
            card_height,
            dpi,
            font.as_ref(),
        ),
        Command::Qr {
            kind,
            url,
            name,
            output,
            base_url,
        } => run_qr(
            kind,
            url.as_deref(),
            name.as_deref(),
            &output,
            &base_url,
            font.as_ref(),
        ),
        Command::QrSheet { dir, output, dpi } => run_qr_sheet(&dir, &output, dpi, font.as_ref()),
    }
}

// ============================================================================
// Cards Command
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn run_cards(
    data_path: &str,
    output: &str,
    title: &str,
    key: &str,
    images_dir: Option<&str>,
    qr_dir: Option<&str>,
    card_width: f32,
    card_height: f32,
    dpi: u32,
    font: Option<&rusttype::Font<'static>>,
) -> Result<(), AppError> {
    let geometry = Geometry {
        page_w_in: PAGE_WIDTH_IN,
        page_h_in: PAGE_HEIGHT_IN,
        margin_in: MARGIN_IN,
        card_w_in: card_width,
        card_h_in: card_height,
        dpi,
    };
    let layout = GridLayout::new(&geometry)?;

    let records = data::load_records(data_path, key)?;

    println!("📊 Found {} cards in {}", records.len(), data_path);
    println!(
        "  Grid: {} columns x {} rows = {} cards per page",
        layout.cols,
        layout.rows,
        layout.per_page()
    );

    let mut compositor = PageCompositor::new(&layout);
    for record in &records {
        let image_ref = resolve_image_ref(record, images_dir);
        let qr_ref = resolve_qr_ref(record, qr_dir);
        let card = card::render_card(
            record,
            title,
            &layout,
            font,
            image_ref.as_deref(),
            qr_ref.as_deref(),
        );
        compositor.push(&card);
    }
    let pages = compositor.finish();

    pdf::write_pdf(
        &pages,
        geometry.page_w_mm(),
        geometry.page_h_mm(),
        output,
        title,
    )?;

    println!("✓ Generated: {}", output);
    println!("  Cards: {}", records.len());
    println!("  Pages: {}", pages.len());

    Ok(())
}

/// Explicit image field on the record wins; otherwise fall back to the
/// conventional fact_{id:02}.png path inside the images directory.
fn resolve_image_ref(record: &data::CardRecord, images_dir: Option<&str>) -> Option<String> {
    if let Some(ref image) = record.image {
        return Some(image.clone());
    }
    images_dir.map(|dir| {
        data::conventional_image_path(std::path::Path::new(dir), &record.id)
            .to_string_lossy()
            .into_owned()
    })
}

/// Explicit qr field on the record wins; otherwise fall back to the
/// conventional character_{id}.png path inside the QR directory.
fn resolve_qr_ref(record: &data::CardRecord, qr_dir: Option<&str>) -> Option<String> {
    if let Some(ref qr) = record.qr {
        return Some(qr.clone());
    }
    qr_dir.map(|dir| {
        data::conventional_qr_path(std::path::Path::new(dir), &record.id)
            .to_string_lossy()
            .into_owned()
    })
}

// ============================================================================
// QR Commands
// ============================================================================

fn run_qr(
    kind: QrKind,
    url: Option<&str>,
    name: Option<&str>,
    output: &str,
    base_url: &str,
    font: Option<&rusttype::Font<'static>>,
) -> Result<(), AppError> {
    let out_dir = std::path::Path::new(output);

    match kind {
        QrKind::All => {
            qr::generate_category(qr::Category::Botanicals, base_url, out_dir, font)?;
            qr::generate_category(qr::Category::Documents, base_url, out_dir, font)?;
            qr::generate_category(qr::Category::Characters, base_url, out_dir, font)?;
        }
        QrKind::Botanicals => {
            qr::generate_category(qr::Category::Botanicals, base_url, out_dir, font)?
        }
        QrKind::Documents => {
            qr::generate_category(qr::Category::Documents, base_url, out_dir, font)?
        }
        QrKind::Characters => {
            qr::generate_category(qr::Category::Characters, base_url, out_dir, font)?
        }
        QrKind::Custom => {
            let (url, name) = match (url, name) {
                (Some(url), Some(name)) => (url, name),
                _ => {
                    return Err(AppError::Qr(
                        "--url and --name are required for custom QR codes".to_string(),
                    ))
                }
            };
            let path = qr::make_qr_png(url, name, out_dir, font)?;
            println!("✓ Generated: {} -> {}", path.display(), url);
        }
    }

    println!("✓ QR codes written to: {}/", output);
    Ok(())
}

fn run_qr_sheet(
    dir: &str,
    output: &str,
    dpi: u32,
    font: Option<&rusttype::Font<'static>>,
) -> Result<(), AppError> {
    let geometry = Geometry {
        page_w_in: PAGE_WIDTH_IN,
        page_h_in: PAGE_HEIGHT_IN,
        margin_in: MARGIN_IN,
        card_w_in: QR_CELL_IN,
        card_h_in: QR_CELL_IN,
        dpi,
    };
    let layout = GridLayout::new(&geometry)?;

    let count =
        qr::write_contact_sheet(std::path::Path::new(dir), output, &geometry, &layout, font)?;

    println!("✓ Generated: {}", output);
    println!("  QR codes: {}", count);
    Ok(())
}
