//! Share-link rewriting and interactive-launch links.
//!
//! Cloud-drive share links point at a browser viewer, not at the bytes.
//! [`to_downloadable`] rewrites the recognized families into direct-download
//! form and passes everything else through untouched; [`to_interact`] turns
//! course-site URLs into JupyterHub interact links.

use crate::error::Error;

const DRIVE_HOST: &str = "drive.google.com";
const DRIVE_DIRECT: &str = "https://drive.google.com/uc?export=download&id=";
const DROPBOX_HOST: &str = "www.dropbox.com";
const DROPBOX_DIRECT: &str = "dl.dropboxusercontent.com";

/// Rewrites a share link into a directly fetchable URL.
///
/// Google Drive: the file id is the path segment after the literal `d`
/// segment (`.../file/d/<id>/view`) and the result uses the fixed
/// direct-download template. Dropbox: host swap only, path and query
/// preserved verbatim. Anything else comes back unchanged.
pub fn to_downloadable(url: &str) -> String {
    if url.contains(DRIVE_HOST) {
        let parts: Vec<&str> = url.split('/').collect();
        match parts
            .iter()
            .position(|p| *p == "d")
            .and_then(|i| parts.get(i + 1))
        {
            Some(id) => format!("{DRIVE_DIRECT}{id}"),
            // No id segment to extract; leave the link alone.
            None => url.to_string(),
        }
    } else if url.contains(DROPBOX_HOST) {
        url.replace(DROPBOX_HOST, DROPBOX_DIRECT)
    } else {
        url.to_string()
    }
}

/// Target JupyterHub for interactive links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hub {
    #[default]
    Data8,
    Ds8,
}

impl Hub {
    fn subdomain(self) -> &'static str {
        match self {
            Hub::Data8 => "data8",
            Hub::Ds8 => "ds8",
        }
    }
}

impl std::str::FromStr for Hub {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "data8" => Ok(Hub::Data8),
            "ds8" => Ok(Hub::Ds8),
            other => Err(Error::InvalidInput(format!(
                "unknown hub {other:?} (use data8 or ds8)"
            ))),
        }
    }
}

/// Builds an interactive-launch link from a github or course-site URL.
///
/// github.com URLs are split on the `data-8/` organization prefix, course
/// site URLs on `data8.org/`; the first path segment after the split is the
/// repository, the remainder after `gh-pages/` (github) or the repository
/// segment (course site) is the file path.
pub fn to_interact(url: &str, hub: Hub) -> Result<String, Error> {
    if !url.contains("data-8") && !url.contains("data8.org") {
        return Err(Error::UnrecognizedCourseUrl(url.to_string()));
    }

    let repo_split = if url.contains("github.com") {
        "data-8/"
    } else if url.contains("data8.org") {
        "data8.org/"
    } else {
        return Err(Error::UnrecognizedHost(url.to_string()));
    };

    let after = url.rsplit(repo_split).next().unwrap_or(url);
    let repo = after.split('/').next().unwrap_or(after);

    let name_split = if url.contains("github.com") {
        "gh-pages/".to_string()
    } else {
        format!("{repo}/")
    };
    let name = url.rsplit(name_split.as_str()).next().unwrap_or("");

    Ok(format!(
        "https://{}.berkeley.edu/hub/interact?repo={}&path={}",
        hub.subdomain(),
        repo,
        name
    ))
}
