//! Tabular export of recordings.

use crate::loaders::eeg::Recording;
use anyhow::{Context, Result};
use std::io::Write;

/// A time-by-channel view of a recording: one row per sample, one column per
/// channel, plus a trailing `time` column in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Recording {
    /// Transposes the channels-by-time data to rows of samples and attaches
    /// a time column synthesized from the sample index and sampling rate.
    pub fn to_table(&self) -> SignalTable {
        let mut columns = self.channels.clone();
        columns.push("time".to_string());

        let times = self.times();
        let rows = (0..self.data.ncols())
            .map(|t| {
                let mut row: Vec<f64> = self.data.column(t).iter().copied().collect();
                row.push(times[t]);
                row
            })
            .collect();

        SignalTable { columns, rows }
    }
}

impl SignalTable {
    /// Serializes the table as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(&self.columns).context("write csv header")?;
        for row in &self.rows {
            csv.write_record(row.iter().map(|v| v.to_string()))
                .context("write csv row")?;
        }
        csv.flush().context("flush csv")?;
        Ok(())
    }
}
