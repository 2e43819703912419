//! `neurods interact <url>` – print an interactive-launch link.

use anyhow::Result;
use neurods_core::urls::{to_interact, Hub};

pub fn run_interact(url: &str, hub: &str) -> Result<()> {
    let hub: Hub = hub.parse()?;
    let link = to_interact(url, hub)?;
    println!("Your interactive URL is:\n---\n{link}\n---");
    Ok(())
}
