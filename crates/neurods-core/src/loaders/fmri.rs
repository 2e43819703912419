//! fMRI volume loading.
//!
//! Volumes come off disk in (x, y, z, t) order; the course convention is
//! time-leading, so every run is reoriented to (t, z, y, x) before masking,
//! normalization, and concatenation.

use crate::error::Error;
use anyhow::{Context, Result};
use ndarray::{concatenate, Array2, Array3, ArrayD, Axis, Ix4};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use std::path::{Path, PathBuf};

/// Options for [`load_fmri_data`].
#[derive(Debug, Clone, Default)]
pub struct FmriOptions {
    /// Standardize each voxel over time, independently per run.
    pub zscore: bool,
    /// Voxel selection over the (z, y, x) spatial axes; reduces the output
    /// to (time, voxels).
    pub mask: Option<Array3<bool>>,
}

/// Loads one or more fMRI runs and concatenates them along the time axis.
///
/// Returns a 4-D (time, z, y, x) array, or 2-D (time, voxels) when a mask is
/// given. Z-scoring happens per run before concatenation, so normalization
/// statistics never span runs. Zero-variance voxels standardize to NaN.
pub fn load_fmri_data(files: &[PathBuf], opts: &FmriOptions) -> Result<ArrayD<f32>> {
    if files.is_empty() {
        return Err(Error::InvalidInput("no fMRI files given".to_string()).into());
    }
    let mut runs = Vec::with_capacity(files.len());
    for path in files {
        tracing::info!("loading {}", path.display());
        runs.push(load_run(path)?);
    }
    assemble_runs(runs, opts)
}

/// Reads one run and reorients it to time-leading order.
fn load_run(path: &Path) -> Result<ArrayD<f32>> {
    let obj = ReaderOptions::new()
        .read_file(path)
        .with_context(|| format!("open NIfTI volume {}", path.display()))?;
    let vol = obj
        .into_volume()
        .into_ndarray::<f32>()
        .with_context(|| format!("decode NIfTI volume {}", path.display()))?;
    if vol.ndim() != 4 {
        return Err(Error::Malformed(format!(
            "{}: expected a 4-D volume, got {}-D",
            path.display(),
            vol.ndim()
        ))
        .into());
    }
    // (x, y, z, t) on disk becomes (t, z, y, x).
    Ok(vol.reversed_axes())
}

/// Masks, standardizes, and concatenates already-reoriented runs.
fn assemble_runs(runs: Vec<ArrayD<f32>>, opts: &FmriOptions) -> Result<ArrayD<f32>> {
    let mut shaped = Vec::with_capacity(runs.len());
    for run in runs {
        let mut run = match &opts.mask {
            Some(mask) => apply_mask(run, mask)?,
            None => run,
        };
        if opts.zscore {
            zscore_time(&mut run);
        }
        shaped.push(run);
    }
    let views: Vec<_> = shaped.iter().map(|r| r.view()).collect();
    concatenate(Axis(0), &views).context("concatenate runs along the time axis")
}

/// Keeps only mask-selected voxels, flattening (t, z, y, x) to (t, voxels).
/// Selection order is the row-major order of the mask.
fn apply_mask(run: ArrayD<f32>, mask: &Array3<bool>) -> Result<ArrayD<f32>> {
    if mask.shape() != &run.shape()[1..] {
        return Err(Error::InvalidInput(format!(
            "mask shape {:?} does not match volume spatial shape {:?}",
            mask.shape(),
            &run.shape()[1..]
        ))
        .into());
    }
    let run = run
        .into_dimensionality::<Ix4>()
        .context("masking a non-4-D run")?;
    let keep: Vec<(usize, usize, usize)> = mask
        .indexed_iter()
        .filter_map(|((z, y, x), &m)| m.then_some((z, y, x)))
        .collect();

    let t = run.len_of(Axis(0));
    let mut out = Array2::<f32>::zeros((t, keep.len()));
    for (ti, mut row) in out.outer_iter_mut().enumerate() {
        for (vi, &(z, y, x)) in keep.iter().enumerate() {
            row[vi] = run[[ti, z, y, x]];
        }
    }
    Ok(out.into_dyn())
}

/// Standardizes along the time axis in place: per voxel, subtract the mean
/// and divide by the population standard deviation.
fn zscore_time(run: &mut ArrayD<f32>) {
    let Some(mean) = run.mean_axis(Axis(0)) else {
        return;
    };
    let std = run.std_axis(Axis(0), 0.0);
    for mut frame in run.outer_iter_mut() {
        frame -= &mean;
        frame /= &std;
    }
}
