//! Deployment manifest parsing.
//!
//! A published deployment manifest is an XML document. Only two elements
//! matter here:
//!
//! ```xml
//! <asmv1:assembly xmlns="urn:schemas-microsoft-com:asm.v2"
//!                 xmlns:asmv1="urn:schemas-microsoft-com:asm.v1">
//!   <asmv1:assemblyIdentity name="Contoso.application" version="1.0.0.7" />
//!   <deployment install="true" minimumRequiredVersion="1.0.0.5" />
//! </asmv1:assembly>
//! ```
//!
//! Elements are matched by namespace URI and local name, so prefixes and
//! surrounding content do not matter.

use percent_encoding::percent_decode_str;
use std::path::PathBuf;
use url::Url;

use crate::deployment::DeploymentUri;
use crate::error::ManifestError;

/// Namespace of the `assemblyIdentity` element.
pub const ASM_V1: &str = "urn:schemas-microsoft-com:asm.v1";

/// Namespace of the `deployment` element.
pub const ASM_V2: &str = "urn:schemas-microsoft-com:asm.v2";

/// Version data extracted from a manifest, still as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Published version (`assemblyIdentity/@version`), never empty.
    pub version: String,
    /// Oldest supported version (`deployment/@minimumRequiredVersion`).
    pub minimum_required_version: Option<String>,
}

/// Where a manifest can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// An `http` or `https` address.
    Remote(Url),
    /// A file on a local or mounted file system.
    File(PathBuf),
}

impl ManifestSource {
    /// Pick the source for an update location.
    ///
    /// Returns `None` for relative references and schemes that are neither
    /// network addresses nor files.
    pub fn resolve(location: &DeploymentUri) -> Option<Self> {
        let url = location.as_url()?;
        match url.scheme() {
            "http" | "https" => Some(ManifestSource::Remote(url.clone())),
            "file" => file_path(url).map(ManifestSource::File),
            _ => None,
        }
    }
}

fn file_path(url: &Url) -> Option<PathBuf> {
    if let Ok(path) = url.to_file_path() {
        return Some(path);
    }
    // Windows-style file URIs on other platforms: keep the path text.
    let decoded = percent_decode_str(url.path()).decode_utf8_lossy();
    let path = decoded.trim_start_matches('/');
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(PathBuf::from(format!("//{}/{}", host, path))),
        _ if !path.is_empty() => Some(PathBuf::from(path)),
        _ => None,
    }
}

/// Extract version information from manifest text.
///
/// `application` names the deployment in the invalid-manifest message.
pub fn parse_manifest(text: &str, application: &str) -> Result<ManifestInfo, ManifestError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let doc =
        roxmltree::Document::parse(text).map_err(|e| ManifestError::Malformed(e.to_string()))?;

    let identity = doc
        .descendants()
        .find(|n| n.has_tag_name((ASM_V1, "assemblyIdentity")))
        .ok_or_else(|| ManifestError::InvalidManifest {
            application: application.to_string(),
        })?;

    let version = identity
        .attribute("version")
        .filter(|v| !v.is_empty())
        .ok_or(ManifestError::EmptyVersion)?;

    let minimum_required_version = doc
        .descendants()
        .find(|n| n.has_tag_name((ASM_V2, "deployment")))
        .and_then(|n| n.attribute("minimumRequiredVersion"))
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    Ok(ManifestInfo {
        version: version.to_string(),
        minimum_required_version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<asmv1:assembly xsi:schemaLocation="urn:schemas-microsoft-com:asm.v1 assembly.adaptive.xsd"
    manifestVersion="1.0"
    xmlns:asmv1="urn:schemas-microsoft-com:asm.v1"
    xmlns="urn:schemas-microsoft-com:asm.v2"
    xmlns:asmv2="urn:schemas-microsoft-com:asm.v2"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <assemblyIdentity name="Contoso.app" version="1.0.0.0" />
  <asmv1:assemblyIdentity name="Contoso.application" version="1.2.0.7"
      publicKeyToken="0000000000000000" language="neutral" processorArchitecture="msil" />
  <description asmv2:publisher="Contoso" asmv2:product="Contoso" />
  <deployment install="true" mapFileExtensions="true" minimumRequiredVersion="1.1.0.0">
    <subscription>
      <update><beforeApplicationStartup /></update>
    </subscription>
    <deploymentProvider codebase="https://deploy.example.com/Contoso.application" />
  </deployment>
</asmv1:assembly>"#;

    #[test]
    fn parses_version_and_minimum() {
        let info = parse_manifest(FULL, "Contoso").unwrap();
        assert_eq!(info.version, "1.2.0.7");
        assert_eq!(info.minimum_required_version.as_deref(), Some("1.1.0.0"));
    }

    #[test]
    fn ignores_assembly_identity_in_other_namespace() {
        // The first assemblyIdentity in FULL is in the v2 default namespace.
        let info = parse_manifest(FULL, "Contoso").unwrap();
        assert_ne!(info.version, "1.0.0.0");
    }

    #[test]
    fn prefixes_do_not_matter() {
        let doc = r#"<a:assembly xmlns:a="urn:schemas-microsoft-com:asm.v1" xmlns:b="urn:schemas-microsoft-com:asm.v2">
  <a:assemblyIdentity version="3.0" />
  <b:deployment minimumRequiredVersion="2.5" />
</a:assembly>"#;
        let info = parse_manifest(doc, "App").unwrap();
        assert_eq!(info.version, "3.0");
        assert_eq!(info.minimum_required_version.as_deref(), Some("2.5"));
    }

    #[test]
    fn missing_minimum_is_not_an_error() {
        let doc = r#"<assembly xmlns="urn:schemas-microsoft-com:asm.v1">
  <assemblyIdentity version="1.0.0.1" />
</assembly>"#;
        let info = parse_manifest(doc, "App").unwrap();
        assert_eq!(info.version, "1.0.0.1");
        assert!(info.minimum_required_version.is_none());
    }

    #[test]
    fn empty_minimum_is_treated_as_absent() {
        let doc = r#"<assembly xmlns="urn:schemas-microsoft-com:asm.v1" xmlns:v2="urn:schemas-microsoft-com:asm.v2">
  <assemblyIdentity version="1.0.0.1" />
  <v2:deployment minimumRequiredVersion="" />
</assembly>"#;
        assert!(parse_manifest(doc, "App")
            .unwrap()
            .minimum_required_version
            .is_none());
    }

    #[test]
    fn missing_identity_is_invalid_manifest() {
        let doc = r#"<assembly xmlns="urn:schemas-microsoft-com:asm.v2"><deployment /></assembly>"#;
        let err = parse_manifest(doc, "Contoso").unwrap_err();
        assert_eq!(
            err,
            ManifestError::InvalidManifest {
                application: "Contoso".to_string()
            }
        );
    }

    #[test]
    fn missing_version_attribute_fails() {
        let doc = r#"<assembly xmlns="urn:schemas-microsoft-com:asm.v1"><assemblyIdentity name="x" /></assembly>"#;
        assert_eq!(
            parse_manifest(doc, "App").unwrap_err(),
            ManifestError::EmptyVersion
        );
    }

    #[test]
    fn empty_version_attribute_fails() {
        let doc = r#"<assembly xmlns="urn:schemas-microsoft-com:asm.v1"><assemblyIdentity version="" /></assembly>"#;
        assert_eq!(
            parse_manifest(doc, "App").unwrap_err(),
            ManifestError::EmptyVersion
        );
    }

    #[test]
    fn malformed_xml_fails() {
        let err = parse_manifest("<assembly><unclosed></assembly>", "App").unwrap_err();
        assert!(matches!(err, ManifestError::Malformed(_)));
    }

    #[test]
    fn leading_bom_is_ignored() {
        let doc = format!(
            "\u{feff}{}",
            r#"<assembly xmlns="urn:schemas-microsoft-com:asm.v1"><assemblyIdentity version="4.0" /></assembly>"#
        );
        assert_eq!(parse_manifest(&doc, "App").unwrap().version, "4.0");
    }

    #[test]
    fn resolves_http_and_file_sources() {
        let remote: DeploymentUri = "https://deploy.example.com/App.application".parse().unwrap();
        assert!(matches!(
            ManifestSource::resolve(&remote),
            Some(ManifestSource::Remote(_))
        ));

        let local: DeploymentUri = "/srv/deploy/App.application".parse().unwrap();
        assert_eq!(
            ManifestSource::resolve(&local),
            Some(ManifestSource::File(PathBuf::from("/srv/deploy/App.application")))
        );
    }

    #[test]
    fn file_source_keeps_escaped_characters_in_path() {
        let local: DeploymentUri = "/srv/Release #2/App.application".parse().unwrap();
        assert_eq!(
            ManifestSource::resolve(&local),
            Some(ManifestSource::File(PathBuf::from("/srv/Release #2/App.application")))
        );
    }

    #[test]
    fn relative_and_other_schemes_have_no_source() {
        let relative: DeploymentUri = "apps/App.application".parse().unwrap();
        assert_eq!(ManifestSource::resolve(&relative), None);

        let ftp: DeploymentUri = "ftp://deploy.example.com/App.application".parse().unwrap();
        assert_eq!(ManifestSource::resolve(&ftp), None);
    }
}
