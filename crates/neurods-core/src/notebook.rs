//! Notebook answer stripping.
//!
//! Models enough of nbformat v4 to rewrite code cells; unknown fields ride
//! along in flattened maps so a sanitized notebook round-trips.

use crate::error::Error;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Cell source as stored on disk: a single string or a list of lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Text(String),
    Lines(Vec<String>),
}

impl Source {
    /// The cell text with line fragments joined.
    pub fn to_text(&self) -> String {
        match self {
            Source::Text(s) => s.clone(),
            Source::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    pub source: Source,
    /// Present (possibly null) on code cells, absent elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for [`strip_answers`].
#[derive(Debug, Clone)]
pub struct StripOptions {
    /// Marker searched for in code cells; content after it is removed.
    pub marker: String,
    /// Keep the marker line itself in truncated cells.
    pub keep_marker: bool,
    /// Inserted before the extension of the saved copy.
    pub suffix: String,
    /// Drop matching cells entirely instead of truncating them.
    pub remove_cells: bool,
    /// Empty the outputs of every surviving code cell.
    pub clean_outputs: bool,
    /// Write the sanitized copy next to the original (or into `save_dir`).
    pub save: bool,
    pub save_dir: Option<PathBuf>,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            marker: "### STUDENT ANSWER".to_string(),
            keep_marker: true,
            suffix: "student".to_string(),
            remove_cells: false,
            clean_outputs: true,
            save: true,
            save_dir: None,
        }
    }
}

/// Removes answer content and execution artifacts from a notebook.
///
/// Returns the sanitized document. When `save` is set it is also written as
/// `<stem>_<suffix>.<ext>`; the original file is never overwritten.
pub fn strip_answers(path: &Path, opts: &StripOptions) -> Result<Notebook> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut nb: Notebook =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;

    if let Some(major) = nb.extra.get("nbformat").and_then(Value::as_u64) {
        if major != 4 {
            return Err(Error::Malformed(format!(
                "unsupported notebook format {major} (only v4 is handled)"
            ))
            .into());
        }
    }

    // Surviving cells are collected by filtering; popping by index while
    // iterating would skip the cell that slides into the vacated slot.
    let mut cells = Vec::with_capacity(nb.cells.len());
    for mut cell in nb.cells {
        if cell.cell_type != "code" {
            cells.push(cell);
            continue;
        }

        let text = cell.source.to_text();
        if let Some(ix) = text.find(&opts.marker) {
            if opts.remove_cells {
                continue;
            }
            let kept = if opts.keep_marker {
                &text[..ix + opts.marker.len()]
            } else {
                text[..ix].trim_end()
            };
            cell.source = Source::Text(format!("{kept}\n"));
        }

        if opts.clean_outputs {
            cell.outputs = Some(Vec::new());
        }
        cell.execution_count = Some(Value::Null);
        cell.extra.remove("prompt_number");
        cells.push(cell);
    }
    nb.cells = cells;

    if opts.save {
        let out_path = derive_output_path(path, &opts.suffix, opts.save_dir.as_deref())?;
        if let Some(dir) = out_path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        tracing::info!("saving to {}", out_path.display());
        let json = serde_json::to_string_pretty(&nb).context("serialize notebook")?;
        fs::write(&out_path, json).with_context(|| format!("write {}", out_path.display()))?;
    }

    Ok(nb)
}

/// `dir/notebook.ipynb` becomes `dir/notebook_<suffix>.ipynb`, splitting on
/// the last dot only so dotted basenames survive.
fn derive_output_path(path: &Path, suffix: &str, save_dir: Option<&Path>) -> Result<PathBuf> {
    let stem = path.file_stem().and_then(|s| s.to_str());
    let ext = path.extension().and_then(|s| s.to_str());
    let (Some(stem), Some(ext)) = (stem, ext) else {
        return Err(Error::InvalidInput(format!(
            "cannot derive a suffixed name for {}",
            path.display()
        ))
        .into());
    };
    let dir = match save_dir {
        Some(d) => d.to_path_buf(),
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    Ok(dir.join(format!("{stem}_{suffix}.{ext}")))
}
