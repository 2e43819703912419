//! `neurods strip <notebook>` – write a student copy with answers removed.

use anyhow::Result;
use neurods_core::notebook::{strip_answers, StripOptions};
use std::path::{Path, PathBuf};

pub fn run_strip(
    notebook: &Path,
    marker: String,
    suffix: String,
    remove_cells: bool,
    keep_outputs: bool,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let opts = StripOptions {
        marker,
        suffix,
        remove_cells,
        clean_outputs: !keep_outputs,
        save: true,
        save_dir: out_dir,
        ..StripOptions::default()
    };
    let nb = strip_answers(notebook, &opts)?;
    println!("Sanitized notebook has {} cells", nb.cells.len());
    Ok(())
}
