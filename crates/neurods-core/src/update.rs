//! Self-update via the package manager.

use anyhow::{Context, Result};
use std::process::Command;

/// Git URL of the course tools repository.
const COURSE_REPO: &str = "https://github.com/neurods/neurods.git";

/// Upgrades the course tools from the given branch of the course repository
/// and returns the captured installer output. A non-zero exit status is an
/// error carrying the installer's stderr.
pub fn update_course_tools(branch: &str) -> Result<String> {
    tracing::info!("upgrading course tools from {COURSE_REPO}@{branch}");
    let output = Command::new("cargo")
        .args([
            "install",
            "--git",
            COURSE_REPO,
            "--branch",
            branch,
            "--force",
            "neurods-cli",
        ])
        .output()
        .context("run cargo install")?;

    if !output.status.success() {
        anyhow::bail!(
            "cargo install exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
