//! Single-stream HTTP GET to a local file.
//!
//! One curl Easy transfer per call, redirects followed, body streamed
//! sequentially to the destination. No ranges and no retry: a failed
//! transfer is fatal to the call.

use crate::error::Error;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Fetches `url` with a single GET and writes the body to `dest`.
/// Returns the number of bytes written.
pub fn fetch_to_path(url: &str, dest: &Path) -> Result<u64> {
    let file = File::create(dest).with_context(|| format!("create {}", dest.display()))?;
    let mut writer = BufWriter::new(file);
    let mut written: u64 = 0;
    let mut write_error: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match writer.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    // A disk failure aborts the transfer; report it instead of the generic
    // curl write error it turns into.
    if let Some(e) = write_error {
        return Err(Error::Io(e)).with_context(|| format!("write {}", dest.display()));
    }
    performed.with_context(|| format!("GET {url} failed"))?;

    let code = easy.response_code().context("no response code")?;
    if code < 200 || code >= 300 {
        return Err(Error::Http {
            status: code,
            url: url.to_string(),
        }
        .into());
    }

    writer
        .flush()
        .with_context(|| format!("flush {}", dest.display()))?;
    tracing::debug!("fetched {} bytes from {}", written, url);
    Ok(written)
}
