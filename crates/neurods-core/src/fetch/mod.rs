//! File fetching: share links or plain URLs to local files, with optional
//! archive unpacking and checksum verification.
//!
//! Share links are rewritten through [`crate::urls::to_downloadable`] first.
//! Archives are fetched to a scratch file and unpacked; plain files refuse to
//! overwrite an existing destination unless `replace` is set.

mod checksum;
mod http;
mod unzip;

pub use checksum::sha256_file;
pub use http::fetch_to_path;
pub use unzip::extract_archive;

use crate::config::CoursePaths;
use crate::error::Error;
use crate::urls;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// One fetch: where from, where to, and how.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Share link or plain URL. Share links must point at a single file;
    /// zip a folder before sharing it.
    pub url: String,
    /// File name (or directory name when `unzip` is set) under the root.
    pub name: String,
    /// Overrides the configured download root.
    pub root: Option<PathBuf>,
    /// Treat the remote file as a zip archive and unpack it into `name/`.
    pub unzip: bool,
    /// Overwrite an existing destination file.
    pub replace: bool,
    /// Expected SHA-256 of the fetched bytes, lowercase hex.
    pub sha256: Option<String>,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            root: None,
            unzip: false,
            replace: false,
            sha256: None,
        }
    }
}

/// Downloads `req.url` under the download root and returns the destination.
///
/// The data and scratch folders are created on first use. Extraction
/// overwrites anything already under the destination directory; plain-file
/// downloads fail on an existing destination unless `replace` is set, and
/// the conflict is detected before any network traffic.
pub fn download_file(req: &DownloadRequest, paths: &CoursePaths) -> Result<PathBuf> {
    paths.ensure()?;

    let url = urls::to_downloadable(&req.url);
    let root = req.root.clone().unwrap_or_else(|| paths.data_root.clone());
    let dest = root.join(&req.name);

    if !req.unzip {
        // Guards come before any directory creation or network traffic.
        if req.name.is_empty() {
            return Err(Error::EmptyName.into());
        }
        if !req.replace && dest.exists() {
            return Err(Error::DestinationExists(dest).into());
        }
    }

    if let Some(parent) = dest.parent() {
        if !parent.is_dir() {
            tracing::info!("creating path {} for output data", parent.display());
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }

    if req.unzip {
        let scratch = tempfile::NamedTempFile::new_in(&paths.scratch_dir)
            .context("create scratch file for archive download")?;
        http::fetch_to_path(&url, scratch.path())?;
        if let Some(expected) = req.sha256.as_deref() {
            checksum::verify_sha256(scratch.path(), expected)?;
        }
        unzip::extract_archive(scratch.path(), &dest)?;
        // The scratch file is removed when `scratch` drops.
    } else {
        http::fetch_to_path(&url, &dest)?;
        if let Some(expected) = req.sha256.as_deref() {
            checksum::verify_sha256(&dest, expected)?;
        }
    }

    tracing::info!("successfully moved file to {}", dest.display());
    Ok(dest)
}
