//! Butterworth band-pass filtering.
//!
//! Second-order sections (biquads, Direct Form II Transposed) cascaded for
//! numerical stability. The band-pass is a high-pass/low-pass cascade with
//! coefficients obtained through the bilinear transform.

use crate::error::Error;
use anyhow::Result;
use ndarray::Array2;
use std::f64::consts::PI;

/// Filter order of each half of the cascade. Even, so every section is a
/// true biquad.
const ORDER: usize = 4;

#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Biquad {
    /// Runs the section over `signal` in place, Direct Form II Transposed.
    fn run(&self, signal: &mut [f64]) {
        let (mut z1, mut z2) = (0.0, 0.0);
        for sample in signal.iter_mut() {
            let x = *sample;
            let y = self.b0 * x + z1;
            z1 = self.b1 * x - self.a1 * y + z2;
            z2 = self.b2 * x - self.a2 * y;
            *sample = y;
        }
    }
}

/// Band-pass filters every row of `data` (channels by time) between `low`
/// and `high` Hz. Returns a new array; the input is untouched.
pub fn band_pass(data: &Array2<f64>, sfreq: f64, low: f64, high: f64) -> Result<Array2<f64>> {
    let nyquist = sfreq / 2.0;
    if !(0.0 < low && low < high && high < nyquist) {
        return Err(Error::InvalidInput(format!(
            "band ({low}, {high}) Hz does not fit inside (0, {nyquist}) at {sfreq} Hz"
        ))
        .into());
    }

    let sections = design_band_pass(low, high, sfreq);
    let mut out = data.to_owned();
    for mut row in out.outer_iter_mut() {
        let samples = row
            .as_slice_mut()
            .ok_or_else(|| Error::Malformed("non-contiguous channel data".to_string()))?;
        for section in &sections {
            section.run(samples);
        }
    }
    Ok(out)
}

/// Maps an analog cutoff onto the bilinear-transform frequency axis.
fn prewarp(freq: f64, sfreq: f64) -> f64 {
    (PI * freq / sfreq).tan()
}

fn design_band_pass(low: f64, high: f64, sfreq: f64) -> Vec<Biquad> {
    let mut sections = high_pass_sections(prewarp(low, sfreq));
    sections.extend(low_pass_sections(prewarp(high, sfreq)));
    sections
}

fn low_pass_sections(wn: f64) -> Vec<Biquad> {
    (0..ORDER / 2)
        .map(|k| {
            let alpha = -2.0 * butterworth_pole_angle(k).cos();
            let wn2 = wn * wn;
            let denom = 1.0 + alpha * wn + wn2;
            Biquad {
                b0: wn2 / denom,
                b1: 2.0 * wn2 / denom,
                b2: wn2 / denom,
                a1: 2.0 * (wn2 - 1.0) / denom,
                a2: (1.0 - alpha * wn + wn2) / denom,
            }
        })
        .collect()
}

fn high_pass_sections(wn: f64) -> Vec<Biquad> {
    (0..ORDER / 2)
        .map(|k| {
            let alpha = -2.0 * butterworth_pole_angle(k).cos();
            let wn2 = wn * wn;
            let denom = 1.0 + alpha * wn + wn2;
            Biquad {
                b0: 1.0 / denom,
                b1: -2.0 / denom,
                b2: 1.0 / denom,
                a1: 2.0 * (wn2 - 1.0) / denom,
                a2: (1.0 - alpha * wn + wn2) / denom,
            }
        })
        .collect()
}

fn butterworth_pole_angle(k: usize) -> f64 {
    PI * (2.0 * k as f64 + 1.0) / (2.0 * ORDER as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn tone(freq: f64, sfreq: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / sfreq).sin())
            .collect()
    }

    fn rms(samples: &[f64]) -> f64 {
        (samples.iter().map(|v| v * v).sum::<f64>() / samples.len() as f64).sqrt()
    }

    #[test]
    fn passes_in_band_tone() {
        let sfreq = 100.0;
        let n = 2000;
        let data = Array2::from_shape_vec((1, n), tone(5.0, sfreq, n)).unwrap();
        let out = band_pass(&data, sfreq, 1.0, 12.0).unwrap();
        // Ignore the initial transient.
        let settled = &out.row(0).to_vec()[n / 2..];
        assert!(rms(settled) > 0.5, "in-band tone was attenuated: {}", rms(settled));
    }

    #[test]
    fn rejects_out_of_band_tone() {
        let sfreq = 100.0;
        let n = 2000;
        let data = Array2::from_shape_vec((1, n), tone(45.0, sfreq, n)).unwrap();
        let out = band_pass(&data, sfreq, 1.0, 12.0).unwrap();
        let settled = &out.row(0).to_vec()[n / 2..];
        assert!(rms(settled) < 0.05, "out-of-band tone survived: {}", rms(settled));
    }

    #[test]
    fn input_is_left_untouched() {
        let sfreq = 100.0;
        let data = Array2::from_shape_vec((1, 64), tone(5.0, sfreq, 64)).unwrap();
        let before = data.clone();
        let _ = band_pass(&data, sfreq, 1.0, 12.0).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn invalid_band_is_rejected() {
        let data = Array2::<f64>::zeros((1, 16));
        assert!(band_pass(&data, 100.0, 12.0, 1.0).is_err());
        assert!(band_pass(&data, 100.0, 1.0, 60.0).is_err());
        assert!(band_pass(&data, 100.0, 0.0, 12.0).is_err());
    }
}
