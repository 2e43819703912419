//! Integration tests: fetching over a local HTTP server into a temp root.

mod common;

use common::http_server;
use neurods_core::config::{CoursePaths, DatasetDirs};
use neurods_core::error::Error;
use neurods_core::fetch::{download_file, sha256_file, DownloadRequest};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn paths_in(dir: &Path) -> CoursePaths {
    CoursePaths {
        data_root: dir.join("data"),
        scratch_dir: dir.join("tmp"),
        datasets: DatasetDirs {
            eeg: dir.join("eeg"),
            ecog: dir.join("ecog"),
            fmri: dir.join("fMRI"),
        },
    }
}

#[test]
fn downloads_file_to_named_destination() {
    let body = b"subject,score\ns01,0.91\n".to_vec();
    let server = http_server::start(body.clone());
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());

    let req = DownloadRequest::new(&server.url, "scores/session1.csv");
    let dest = download_file(&req, &paths).unwrap();

    assert_eq!(dest, paths.data_root.join("scores/session1.csv"));
    assert_eq!(fs::read(&dest).unwrap(), body);
    assert_eq!(server.hits(), 1);
}

#[test]
fn existing_destination_fails_before_any_fetch() {
    let server = http_server::start(b"fresh bytes".to_vec());
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());

    fs::create_dir_all(&paths.data_root).unwrap();
    let dest = paths.data_root.join("kept.bin");
    fs::write(&dest, b"original").unwrap();

    let req = DownloadRequest::new(&server.url, "kept.bin");
    let err = download_file(&req, &paths).unwrap_err();
    let err = err.downcast::<Error>().unwrap();
    assert!(matches!(err, Error::DestinationExists(_)));

    // Nothing fetched, nothing changed.
    assert_eq!(server.hits(), 0);
    assert_eq!(fs::read(&dest).unwrap(), b"original");
}

#[test]
fn replace_overwrites_existing_destination() {
    let server = http_server::start(b"fresh bytes".to_vec());
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());

    fs::create_dir_all(&paths.data_root).unwrap();
    fs::write(paths.data_root.join("kept.bin"), b"original").unwrap();

    let mut req = DownloadRequest::new(&server.url, "kept.bin");
    req.replace = true;
    let dest = download_file(&req, &paths).unwrap();
    assert_eq!(fs::read(dest).unwrap(), b"fresh bytes");
}

#[test]
fn empty_name_fails_before_any_fetch() {
    let server = http_server::start(b"unused".to_vec());
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());

    let req = DownloadRequest::new(&server.url, "");
    let err = download_file(&req, &paths).unwrap_err();
    let err = err.downcast::<Error>().unwrap();
    assert!(matches!(err, Error::EmptyName));

    assert_eq!(server.hits(), 0);
    // Only the base folders exist.
    assert!(paths.data_root.is_dir());
    assert!(paths.scratch_dir.is_dir());
    assert_eq!(fs::read_dir(&paths.data_root).unwrap().count(), 0);
}

#[test]
fn archive_is_unpacked_into_destination_directory() {
    let mut zipped = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut zipped));
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("stim/trial01.txt", options).unwrap();
        zip.write_all(b"left").unwrap();
        zip.start_file("stim/trial02.txt", options).unwrap();
        zip.write_all(b"right").unwrap();
        zip.finish().unwrap();
    }
    let server = http_server::start(zipped);
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());

    let mut req = DownloadRequest::new(&server.url, "experiment");
    req.unzip = true;
    let dest = download_file(&req, &paths).unwrap();

    assert_eq!(dest, paths.data_root.join("experiment"));
    assert_eq!(fs::read(dest.join("stim/trial01.txt")).unwrap(), b"left");
    assert_eq!(fs::read(dest.join("stim/trial02.txt")).unwrap(), b"right");
    // The scratch download is gone.
    assert_eq!(fs::read_dir(&paths.scratch_dir).unwrap().count(), 0);
}

#[test]
fn checksum_match_passes_and_mismatch_fails() {
    let body = b"checked payload".to_vec();
    let server = http_server::start(body.clone());
    let dir = tempdir().unwrap();
    let paths = paths_in(dir.path());

    // Compute the expected digest from a local copy of the body.
    let mut probe = tempfile::NamedTempFile::new().unwrap();
    probe.write_all(&body).unwrap();
    probe.flush().unwrap();
    let digest = sha256_file(probe.path()).unwrap();

    let mut req = DownloadRequest::new(&server.url, "ok.bin");
    req.sha256 = Some(digest);
    download_file(&req, &paths).unwrap();

    let mut bad = DownloadRequest::new(&server.url, "bad.bin");
    bad.sha256 = Some("0".repeat(64));
    let err = download_file(&bad, &paths).unwrap_err();
    let err = err.downcast::<Error>().unwrap();
    assert!(matches!(err, Error::ChecksumMismatch { .. }));
}
