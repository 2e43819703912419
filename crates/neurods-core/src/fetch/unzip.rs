//! Zip extraction into a destination directory.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;

/// Unpacks every member of the archive at `archive` into `dest`.
///
/// Members that would land outside `dest` (absolute paths or `..`) are
/// skipped with a warning. Existing files are overwritten.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).with_context(|| format!("open {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("read {} as a zip archive", archive.display()))?;

    fs::create_dir_all(dest).with_context(|| format!("create {}", dest.display()))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("skipping archive member with unsafe path: {}", entry.name());
            continue;
        };
        let out_path = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .with_context(|| format!("create {}", out_path.display()))?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let mut out =
            File::create(&out_path).with_context(|| format!("create {}", out_path.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("extract {}", out_path.display()))?;
    }

    tracing::debug!("extracted {} members to {}", zip.len(), dest.display());
    Ok(())
}
