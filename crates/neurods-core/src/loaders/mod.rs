//! In-memory loaders for the course datasets.
//!
//! Loaders read local files into `ndarray` structures with the course's
//! time-leading shape conventions. Parsing of the on-disk formats is
//! delegated: NIfTI to the `nifti` crate, EDF to the compact reader in
//! [`edf`].

pub mod edf;
pub mod eeg;
pub mod filters;
pub mod fmri;
pub mod table;

pub use eeg::{load_eeg_data, EegOptions, Recording};
pub use fmri::{load_fmri_data, FmriOptions};
pub use table::SignalTable;
