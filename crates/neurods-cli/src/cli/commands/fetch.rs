//! `neurods fetch <url> <name>` – download a file into the course data folder.

use anyhow::Result;
use neurods_core::config::CourseConfig;
use neurods_core::fetch::{download_file, DownloadRequest};
use std::path::PathBuf;

pub fn run_fetch(
    cfg: &CourseConfig,
    url: String,
    name: String,
    root: Option<PathBuf>,
    unzip: bool,
    replace: bool,
    sha256: Option<String>,
) -> Result<()> {
    let req = DownloadRequest {
        url,
        name,
        root,
        unzip,
        replace,
        sha256,
    };
    let dest = download_file(&req, &cfg.paths())?;
    println!("Downloaded to {}", dest.display());
    Ok(())
}
