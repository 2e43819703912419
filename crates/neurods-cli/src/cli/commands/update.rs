//! `neurods update` – upgrade the course tools.

use anyhow::Result;
use neurods_core::config::CourseConfig;
use neurods_core::update::update_course_tools;

pub fn run_update(cfg: &CourseConfig) -> Result<()> {
    let output = update_course_tools(&cfg.update_branch)?;
    print!("{output}");
    Ok(())
}
