//! Error taxonomy shared across the course utilities.

use std::path::PathBuf;
use thiserror::Error;

/// Errors the course utilities raise themselves.
///
/// Invalid-input variants are raised synchronously, before any I/O for the
/// checks that precede it. External failures (curl, zip, JSON, readers) are
/// wrapped with context at the call sites rather than re-encoded here.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetch called with an empty destination name and no archive flag.
    #[error("cannot overwrite the download root; give the file a name")]
    EmptyName,

    /// Destination already exists and `replace` was not requested.
    #[error("path {0} exists, use `replace` to overwrite")]
    DestinationExists(PathBuf),

    /// Downloaded bytes do not match the expected SHA-256 digest.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// Server answered with a non-success status.
    #[error("GET {url} returned HTTP {status}")]
    Http { status: u32, url: String },

    /// Interact-link conversion on a URL without a course-site marker.
    #[error("no course-site marker in {0}; provide a URL attached to a data-8 repository")]
    UnrecognizedCourseUrl(String),

    /// Interact-link conversion on a URL with an unknown host family.
    #[error("unsupported host in {0}; provide a URL for github.com or data8.org")]
    UnrecognizedHost(String),

    /// Caller-supplied parameter failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// On-disk structure (EDF header, notebook document) is not usable.
    #[error("malformed data: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
