// src/storage.rs

//! JSON persistence for drawings: one timestamped record per save, most
//! recent record selected by lexicographic filename order.

use crate::canvas::Canvas;
use crate::color::PaletteColor;
use crate::error::{EditorError, EditorResult};
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Format version written into every record.
pub const RECORD_VERSION: &str = "1.0";

/// One grid cell as persisted: `{"color": "<name>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCell {
    pub color: PaletteColor,
}

/// Record metadata block. `created` serializes as an ISO-8601 UTC timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub created: DateTime<Utc>,
    pub version: String,
}

/// The persisted form of a canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedDrawing {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<SavedCell>>,
    pub metadata: RecordMetadata,
}

impl SavedDrawing {
    /// Captures the current canvas contents, stamped with the current time.
    pub fn from_canvas(canvas: &Canvas) -> Self {
        let grid = (0..canvas.height())
            .map(|y| {
                canvas
                    .row(y)
                    .iter()
                    .map(|&color| SavedCell { color })
                    .collect()
            })
            .collect();
        SavedDrawing {
            width: canvas.width(),
            height: canvas.height(),
            grid,
            metadata: RecordMetadata {
                created: Utc::now(),
                version: RECORD_VERSION.to_string(),
            },
        }
    }

    /// Checks that the grid shape matches the declared dimensions. A record
    /// that fails here is rejected wholesale; nothing is applied.
    pub fn validate(&self) -> EditorResult<()> {
        if self.grid.len() != self.height {
            return Err(EditorError::StorageUnavailable(format!(
                "record declares {} rows but contains {}",
                self.height,
                self.grid.len()
            )));
        }
        for (y, row) in self.grid.iter().enumerate() {
            if row.len() != self.width {
                return Err(EditorError::StorageUnavailable(format!(
                    "record row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    self.width
                )));
            }
        }
        Ok(())
    }

    /// Copies the overlapping region onto `canvas`. Canvas dimensions never
    /// change; cells outside the overlap keep their current color.
    pub fn apply_to(&self, canvas: &mut Canvas) {
        let copy_w = self.width.min(canvas.width());
        let copy_h = self.height.min(canvas.height());
        for y in 0..copy_h {
            for x in 0..copy_w {
                canvas.set(x as i32, y as i32, self.grid[y][x].color);
            }
        }
    }
}

/// Filesystem store holding one JSON file per saved drawing. The directory
/// is created on first save; a missing directory on load just means there is
/// nothing to load yet.
#[derive(Debug, Clone)]
pub struct DrawingStore {
    dir: PathBuf,
}

impl DrawingStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DrawingStore { dir: dir.into() }
    }

    /// Serializes the canvas to a new timestamped record and returns the
    /// filename written.
    pub fn save(&self, canvas: &Canvas) -> EditorResult<String> {
        fs::create_dir_all(&self.dir)?;

        let record = SavedDrawing::from_canvas(canvas);
        let filename = record_filename(&record.metadata.created);
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(self.dir.join(&filename), json)?;

        info!("Saved drawing as {}", filename);
        Ok(filename)
    }

    /// Loads the most recent record (lexicographically greatest `*.json`
    /// filename) and returns it with its filename.
    ///
    /// An empty or missing directory yields `NoSavedRecords`; anything
    /// unreadable or malformed yields `StorageUnavailable` without touching
    /// any canvas.
    pub fn load_latest(&self) -> EditorResult<(String, SavedDrawing)> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Storage directory {} does not exist yet", self.dir.display());
                return Err(EditorError::NoSavedRecords);
            }
            Err(e) => return Err(e.into()),
        };

        let mut names: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        let latest = match names.pop() {
            Some(name) => name,
            None => return Err(EditorError::NoSavedRecords),
        };

        let contents = fs::read_to_string(self.dir.join(&latest))?;
        let record: SavedDrawing = serde_json::from_str(&contents)?;
        record.validate()?;

        info!("Loaded drawing {}", latest);
        Ok((latest, record))
    }
}

/// Builds `drawing-<timestamp>.json` from an instant, with `:` and `.`
/// replaced so the name is filesystem-safe and sorts by recency. Millisecond
/// precision keeps the width fixed, which lexicographic ordering relies on.
fn record_filename(created: &DateTime<Utc>) -> String {
    let stamp = created
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-")
        .replace('.', "-");
    format!("drawing-{}.json", stamp)
}
