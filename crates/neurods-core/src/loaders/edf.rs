//! Compact EDF (European Data Format) reader.
//!
//! Parses the 256-byte fixed header and the per-signal header block, then
//! preloads the full record payload. Digital 16-bit samples are scaled to
//! physical units with the per-signal gain and offset.
//! Specification: https://www.edfplus.info/specs/edf.html

use crate::error::Error;
use anyhow::{Context, Result};
use ndarray::Array2;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Per-signal header fields needed for decoding.
#[derive(Debug, Clone)]
pub struct EdfSignal {
    pub label: String,
    pub physical_min: f64,
    pub physical_max: f64,
    pub digital_min: i64,
    pub digital_max: i64,
    pub samples_per_record: usize,
}

impl EdfSignal {
    fn gain(&self) -> f64 {
        (self.physical_max - self.physical_min) / (self.digital_max - self.digital_min) as f64
    }

    fn offset(&self) -> f64 {
        self.physical_max - self.gain() * self.digital_max as f64
    }
}

/// A parsed EDF file with its full sample payload in memory.
#[derive(Debug)]
pub struct EdfFile {
    pub signals: Vec<EdfSignal>,
    pub num_records: usize,
    pub record_duration: f64,
    payload: Vec<u8>,
}

impl EdfFile {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let mut reader = BufReader::new(file);

        let _version = fixed_str(&mut reader, 8)?;
        let _patient_id = fixed_str(&mut reader, 80)?;
        let _recording_id = fixed_str(&mut reader, 80)?;
        let _start_date = fixed_str(&mut reader, 8)?;
        let _start_time = fixed_str(&mut reader, 8)?;
        let _header_bytes: usize = fixed_num(&mut reader, 8, "header size")?;
        let _reserved = fixed_str(&mut reader, 44)?;
        let num_records: i64 = fixed_num(&mut reader, 8, "record count")?;
        let record_duration: f64 = fixed_num(&mut reader, 8, "record duration")?;
        let num_signals: usize = fixed_num(&mut reader, 4, "signal count")?;

        if num_signals == 0 {
            return Err(Error::Malformed("EDF file declares no signals".to_string()).into());
        }
        if record_duration <= 0.0 {
            return Err(Error::Malformed(format!(
                "EDF record duration must be positive, got {record_duration}"
            ))
            .into());
        }

        // Signal headers are stored field-by-field across all signals.
        let labels = str_column(&mut reader, num_signals, 16)?;
        let _transducers = str_column(&mut reader, num_signals, 80)?;
        let _dimensions = str_column(&mut reader, num_signals, 8)?;
        let physical_min = num_column::<f64, _>(&mut reader, num_signals, 8, "physical minimum")?;
        let physical_max = num_column::<f64, _>(&mut reader, num_signals, 8, "physical maximum")?;
        let digital_min = num_column::<i64, _>(&mut reader, num_signals, 8, "digital minimum")?;
        let digital_max = num_column::<i64, _>(&mut reader, num_signals, 8, "digital maximum")?;
        let _prefiltering = str_column(&mut reader, num_signals, 80)?;
        let samples = num_column::<usize, _>(&mut reader, num_signals, 8, "samples per record")?;
        let _signal_reserved = str_column(&mut reader, num_signals, 32)?;

        let signals: Vec<EdfSignal> = (0..num_signals)
            .map(|i| EdfSignal {
                label: labels[i].clone(),
                physical_min: physical_min[i],
                physical_max: physical_max[i],
                digital_min: digital_min[i],
                digital_max: digital_max[i],
                samples_per_record: samples[i],
            })
            .collect();

        for s in &signals {
            if s.digital_max == s.digital_min {
                return Err(Error::Malformed(format!(
                    "signal {:?} has an empty digital range",
                    s.label
                ))
                .into());
            }
        }

        let mut payload = Vec::new();
        reader
            .read_to_end(&mut payload)
            .with_context(|| format!("read records of {}", path.display()))?;

        let record_size: usize = signals.iter().map(|s| s.samples_per_record * 2).sum();
        if record_size == 0 {
            return Err(Error::Malformed("EDF records hold no samples".to_string()).into());
        }
        // A header may declare -1 records; fall back to what is on disk.
        let num_records = if num_records < 0 {
            payload.len() / record_size
        } else {
            num_records as usize
        };
        if payload.len() < num_records * record_size {
            return Err(Error::Malformed(format!(
                "EDF payload truncated: {} bytes for {} records of {} bytes",
                payload.len(),
                num_records,
                record_size
            ))
            .into());
        }

        Ok(Self {
            signals,
            num_records,
            record_duration,
            payload,
        })
    }

    /// Sampling rate of the first signal in Hz.
    pub fn sampling_rate(&self) -> f64 {
        self.signals[0].samples_per_record as f64 / self.record_duration
    }

    /// Decodes the payload into a channels-by-time array of physical values
    /// plus the channel labels. All signals must share one sampling rate.
    pub fn into_channels(self) -> Result<(Array2<f64>, Vec<String>)> {
        let per_record = self.signals[0].samples_per_record;
        if self.signals.iter().any(|s| s.samples_per_record != per_record) {
            return Err(Error::Malformed(
                "signals with mixed sampling rates are not supported".to_string(),
            )
            .into());
        }

        let nchan = self.signals.len();
        let total = self.num_records * per_record;
        let scaling: Vec<(f64, f64)> = self.signals.iter().map(|s| (s.gain(), s.offset())).collect();

        let mut data = Array2::<f64>::zeros((nchan, total));
        let mut cursor = 0usize;
        for record in 0..self.num_records {
            let base = record * per_record;
            for (ch, &(gain, offset)) in scaling.iter().enumerate() {
                for i in 0..per_record {
                    let raw =
                        i16::from_le_bytes([self.payload[cursor], self.payload[cursor + 1]]);
                    data[[ch, base + i]] = gain * f64::from(raw) + offset;
                    cursor += 2;
                }
            }
        }

        let labels = self.signals.into_iter().map(|s| s.label).collect();
        Ok((data, labels))
    }
}

fn fixed_str<R: Read>(reader: &mut R, len: usize) -> Result<String> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).context("truncated EDF header")?;
    Ok(String::from_utf8_lossy(&buf).trim().to_string())
}

fn fixed_num<R: Read, T: FromStr>(reader: &mut R, len: usize, what: &str) -> Result<T> {
    let s = fixed_str(reader, len)?;
    s.parse::<T>()
        .map_err(|_| anyhow::Error::new(Error::Malformed(format!("invalid EDF {what}: {s:?}"))))
}

fn str_column<R: Read>(reader: &mut R, count: usize, width: usize) -> Result<Vec<String>> {
    (0..count).map(|_| fixed_str(reader, width)).collect()
}

fn num_column<T: FromStr, R: Read>(
    reader: &mut R,
    count: usize,
    width: usize,
    what: &str,
) -> Result<Vec<T>> {
    (0..count).map(|_| fixed_num(reader, width, what)).collect()
}
