//! CLI for the neurods course utilities.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use neurods_core::config;
use std::path::PathBuf;

use commands::{run_fetch, run_interact, run_strip, run_update};

/// Top-level CLI for the neurods course utilities.
#[derive(Debug, Parser)]
#[command(name = "neurods")]
#[command(about = "neurods: course data download, loading, and notebook tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a file or zip archive into the course data folder.
    Fetch {
        /// Share link or direct URL pointing at a single file.
        url: String,
        /// Destination name under the download root (directory name for archives).
        name: String,
        /// Override the configured download root.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Treat the remote file as a zip archive and unpack it.
        #[arg(long)]
        unzip: bool,
        /// Overwrite the destination if it already exists.
        #[arg(long)]
        replace: bool,
        /// Expected SHA-256 of the downloaded file, hex.
        #[arg(long, value_name = "HEX")]
        sha256: Option<String>,
    },

    /// Strip answer cells and outputs from a notebook, saving a student copy.
    Strip {
        /// Path to the notebook file.
        notebook: PathBuf,
        /// Marker string that starts an answer.
        #[arg(long, default_value = "### STUDENT ANSWER")]
        marker: String,
        /// Suffix inserted before the extension of the saved copy.
        #[arg(long, default_value = "student")]
        suffix: String,
        /// Remove matching cells entirely instead of truncating them.
        #[arg(long)]
        remove_cells: bool,
        /// Keep cell outputs instead of clearing them.
        #[arg(long)]
        keep_outputs: bool,
        /// Directory for the saved copy (defaults to the notebook's).
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Convert a github or course-site URL into an interactive-launch link.
    Interact {
        /// github.com or data8.org URL of the file or folder.
        url: String,
        /// Target hub: data8 or ds8.
        #[arg(long, default_value = "data8")]
        hub: String,
    },

    /// Upgrade the course tools from the pinned course branch.
    Update,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                url,
                name,
                root,
                unzip,
                replace,
                sha256,
            } => run_fetch(&cfg, url, name, root, unzip, replace, sha256)?,
            CliCommand::Strip {
                notebook,
                marker,
                suffix,
                remove_cells,
                keep_outputs,
                out_dir,
            } => run_strip(&notebook, marker, suffix, remove_cells, keep_outputs, out_dir)?,
            CliCommand::Interact { url, hub } => run_interact(&url, &hub)?,
            CliCommand::Update => run_update(&cfg)?,
        }

        Ok(())
    }
}
