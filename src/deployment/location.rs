//! URIs handed over by the bootstrapper.
//!
//! Update and activation locations arrive either as absolute URIs
//! (`https://…`, `file:///…`), as bare local paths, or as relative
//! references. Local paths are normalised to `file:` URIs so the manifest
//! fetcher only has to look at the scheme.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Extension the bootstrapper uses for deployment manifests.
pub const MANIFEST_EXTENSION: &str = ".application";

/// Characters in a local path that would otherwise read as URI syntax.
const PATH_ESCAPES: &AsciiSet = &CONTROLS.add(b' ').add(b'%').add(b'#').add(b'?');

/// An absolute or relative deployment URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentUri {
    /// A fully-qualified URI, including local paths converted to `file:`.
    Absolute(Url),
    /// A relative reference, kept verbatim.
    Relative(String),
}

/// Text that is neither an absolute URI, a local path, nor a relative reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidUri(pub String);

impl fmt::Display for InvalidUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URI '{}'", self.0)
    }
}

impl std::error::Error for InvalidUri {}

impl DeploymentUri {
    /// The absolute URI, if this is one.
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            DeploymentUri::Absolute(url) => Some(url),
            DeploymentUri::Relative(_) => None,
        }
    }

    /// Last path segment, without query or fragment. `None` when empty.
    pub fn last_segment(&self) -> Option<&str> {
        let segment = match self {
            DeploymentUri::Absolute(url) => url.path_segments()?.next_back()?,
            DeploymentUri::Relative(reference) => {
                let path = reference
                    .split(['?', '#'])
                    .next()
                    .unwrap_or(reference.as_str());
                path.rsplit('/').next().unwrap_or(path)
            }
        };
        (!segment.is_empty()).then_some(segment)
    }

    /// Application name: the last segment with the manifest extension
    /// stripped, matched case-insensitively. Escapes in absolute URIs are
    /// decoded.
    pub fn application_name(&self) -> Option<String> {
        let segment = match self {
            DeploymentUri::Absolute(_) => {
                percent_decode_str(self.last_segment()?).decode_utf8_lossy()
            }
            DeploymentUri::Relative(_) => self.last_segment()?.into(),
        };
        let segment = segment.as_ref();
        let split = segment.len().checked_sub(MANIFEST_EXTENSION.len());
        let name = match split {
            Some(at)
                if segment.is_char_boundary(at)
                    && segment[at..].eq_ignore_ascii_case(MANIFEST_EXTENSION) =>
            {
                &segment[..at]
            }
            _ => segment,
        };
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Convert a bare local path to `file:` URI text, or `None` if `text`
/// does not look like one. Each segment is escaped so names containing
/// `#`, `?` or `%` stay part of the path.
fn local_path_to_uri(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let is_drive = bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/');
    let is_unc = text.starts_with("\\\\");
    let escaped = || {
        text.replace('\\', "/")
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_ESCAPES).to_string())
            .collect::<Vec<_>>()
            .join("/")
    };

    if is_drive {
        Some(format!("file:///{}", escaped()))
    } else if is_unc {
        Some(format!("file:{}", escaped()))
    } else if text.starts_with('/') && !text.starts_with("//") {
        Some(format!("file://{}", escaped()))
    } else {
        None
    }
}

impl FromStr for DeploymentUri {
    type Err = InvalidUri;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(InvalidUri(s.to_string()));
        }

        // Drive-letter paths parse as URIs with a one-letter scheme, so
        // local paths are recognised first.
        if let Some(file_uri) = local_path_to_uri(text) {
            return Url::parse(&file_uri)
                .map(DeploymentUri::Absolute)
                .map_err(|_| InvalidUri(s.to_string()));
        }

        match Url::parse(text) {
            Ok(url) => Ok(DeploymentUri::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse("http://relative.invalid/")
                    .map_err(|_| InvalidUri(s.to_string()))?;
                base.join(text)
                    .map(|_| DeploymentUri::Relative(text.to_string()))
                    .map_err(|_| InvalidUri(s.to_string()))
            }
            Err(_) => Err(InvalidUri(s.to_string())),
        }
    }
}

impl fmt::Display for DeploymentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentUri::Absolute(url) => write!(f, "{}", url),
            DeploymentUri::Relative(reference) => write!(f, "{}", reference),
        }
    }
}

impl Serialize for DeploymentUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
