//! EEG loading and the in-memory recording type.

use crate::error::Error;
use crate::loaders::edf::EdfFile;
use crate::loaders::filters;
use anyhow::Result;
use ndarray::{s, Array1, Array2};
use std::path::Path;

/// Options for [`load_eeg_data`].
#[derive(Debug, Clone)]
pub struct EegOptions {
    /// Channels whose mean is subtracted from every channel.
    pub reference: Option<Vec<usize>>,
    /// (low, high) band-pass cutoffs in Hz.
    pub band: Option<(f64, f64)>,
    /// Trailing non-signal channels to drop after loading.
    pub drop_trailing: usize,
}

impl Default for EegOptions {
    fn default() -> Self {
        // The course cap records two mastoid channels at the end; channels
        // 6 and 23 are the default references.
        Self {
            reference: Some(vec![6, 23]),
            band: Some((1.0, 12.0)),
            drop_trailing: 2,
        }
    }
}

/// A fully loaded continuous recording, channels by time.
#[derive(Debug, Clone)]
pub struct Recording {
    pub data: Array2<f64>,
    pub channels: Vec<String>,
    pub sfreq: f64,
}

impl Recording {
    /// Seconds since recording start, one entry per sample.
    pub fn times(&self) -> Array1<f64> {
        (0..self.data.ncols()).map(|i| i as f64 / self.sfreq).collect()
    }

    /// Consumes the recording into the (times, data) pair.
    pub fn into_parts(self) -> (Array1<f64>, Array2<f64>) {
        (self.times(), self.data)
    }
}

/// Loads a continuous EEG recording, fully preloaded.
///
/// The trailing non-signal channels are dropped, the optional reference mean
/// is subtracted from every channel, and the optional band-pass is applied
/// at the recording's sampling rate. Every transform builds a new value; the
/// parsed file is never aliased.
pub fn load_eeg_data(path: &Path, opts: &EegOptions) -> Result<Recording> {
    let edf = EdfFile::open(path)?;
    let sfreq = edf.sampling_rate();
    let (data, mut channels) = edf.into_channels()?;

    let keep = data.nrows().saturating_sub(opts.drop_trailing);
    let mut data = data.slice_move(s![..keep, ..]);
    channels.truncate(keep);

    if let Some(reference) = &opts.reference {
        data = rereference(data, reference)?;
    }

    if let Some((low, high)) = opts.band {
        data = filters::band_pass(&data, sfreq, low, high)?;
    }

    Ok(Recording {
        data,
        channels,
        sfreq,
    })
}

/// Subtracts the mean of the `reference` channels from every channel.
fn rereference(data: Array2<f64>, reference: &[usize]) -> Result<Array2<f64>> {
    if reference.is_empty() {
        return Ok(data);
    }
    for &idx in reference {
        if idx >= data.nrows() {
            return Err(Error::InvalidInput(format!(
                "reference channel {idx} out of range ({} channels)",
                data.nrows()
            ))
            .into());
        }
    }

    let mut mean = Array1::<f64>::zeros(data.ncols());
    for &idx in reference {
        mean += &data.row(idx);
    }
    mean /= reference.len() as f64;

    let mut out = data;
    for mut row in out.outer_iter_mut() {
        row -= &mean;
    }
    Ok(out)
}
