// Card record loading from the flat JSON data files
// (rumors/facts/documents/characters).

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::AppError;

/// Record identifiers are numeric for facts/rumors and string slugs for
/// documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u32),
    Name(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Number(0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Name(s) => write!(f, "{}", s),
        }
    }
}

/// One card's worth of data. Documents and characters carry `title` instead
/// of `text`.
#[derive(Debug, Clone, Deserialize)]
pub struct CardRecord {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, alias = "title")]
    pub text: String,
    #[serde(default)]
    pub possession: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub qr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CardFile {
    #[serde(default)]
    rumors: Vec<CardRecord>,
    #[serde(default)]
    facts: Vec<CardRecord>,
    #[serde(default)]
    documents: Vec<CardRecord>,
    #[serde(default)]
    characters: Vec<CardRecord>,
}

/// Load records from a JSON file with a top-level array key. `key` selects
/// which array to read; `auto` takes the first non-empty one. Missing file,
/// bad JSON, an unknown key, and an empty record list are all fatal.
pub fn load_records(path: &str, key: &str) -> Result<Vec<CardRecord>, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Data(format!("{}: {}", path, e)))?;
    let file: CardFile = serde_json::from_str(&content)
        .map_err(|e| AppError::Data(format!("Invalid JSON in {}: {}", path, e)))?;

    let records = match key {
        "rumors" => file.rumors,
        "facts" => file.facts,
        "documents" => file.documents,
        "characters" => file.characters,
        "auto" => {
            if !file.rumors.is_empty() {
                file.rumors
            } else if !file.facts.is_empty() {
                file.facts
            } else if !file.documents.is_empty() {
                file.documents
            } else {
                file.characters
            }
        }
        other => {
            return Err(AppError::Data(format!(
                "Unknown data key '{}' (expected rumors, facts, documents, characters, or auto)",
                other
            )))
        }
    };

    if records.is_empty() {
        return Err(AppError::Data(format!("No records found in {}", path)));
    }
    Ok(records)
}

/// Conventional artwork path inside an images directory: fact_{id:02}.png
/// for numeric ids, {id}.png for named ones.
pub fn conventional_image_path(dir: &Path, id: &RecordId) -> PathBuf {
    match id {
        RecordId::Number(n) => dir.join(format!("fact_{:02}.png", n)),
        RecordId::Name(s) => dir.join(format!("{}.png", s)),
    }
}

/// Conventional QR symbol path inside a QR directory: character_{id}.png,
/// matching the filenames the `qr` subcommand writes for characters.
pub fn conventional_qr_path(dir: &Path, id: &RecordId) -> PathBuf {
    dir.join(format!("character_{}.png", id))
}
