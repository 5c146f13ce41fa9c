//! Update availability decisions.

use serde::Serialize;

use super::fetch::ManifestFetcher;
use super::manifest::ManifestInfo;
use crate::deployment::{DeploymentContext, Version};
use crate::error::{Result, VersionParseError};

/// Outcome of comparing the running version with a published manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateVerdict {
    /// Running version; `None` sorts below every published version.
    pub current: Option<Version>,
    /// Published version.
    pub latest: Version,
    /// Oldest version the publisher still supports.
    pub minimum: Option<Version>,
}

impl UpdateVerdict {
    /// A newer version is published.
    pub fn is_update_available(&self) -> bool {
        Some(self.latest) > self.current
    }

    /// The running version is below the published minimum.
    pub fn is_mandatory(&self) -> bool {
        self.is_update_available()
            && self
                .minimum
                .is_some_and(|minimum| Some(minimum) > self.current)
    }
}

/// Combine the context with a fetched manifest.
///
/// Returns `Ok(None)` when the context is not network deployed or there is
/// no manifest. Fails only if the manifest carries an unparsable version.
pub fn evaluate(
    context: &DeploymentContext,
    manifest: Option<ManifestInfo>,
) -> std::result::Result<Option<UpdateVerdict>, VersionParseError> {
    if !context.is_network_deployed {
        return Ok(None);
    }
    let Some(manifest) = manifest else {
        return Ok(None);
    };

    let latest: Version = manifest.version.parse()?;
    let minimum = manifest
        .minimum_required_version
        .as_deref()
        .map(str::parse::<Version>)
        .transpose()?;

    Ok(Some(UpdateVerdict {
        current: context.current_version,
        latest,
        minimum,
    }))
}

/// Fetch the manifest for `context` and evaluate it.
///
/// No I/O happens when the context is not network deployed or has no
/// update location.
pub fn check_for_updates(
    context: &DeploymentContext,
    fetcher: &ManifestFetcher,
) -> Result<Option<UpdateVerdict>> {
    if !context.is_network_deployed {
        tracing::debug!("Not network deployed, skipping update check");
        return Ok(None);
    }
    let Some(location) = &context.update_location else {
        tracing::debug!("No update location, skipping update check");
        return Ok(None);
    };

    let application = context.application_name().unwrap_or_default();
    let manifest = fetcher.fetch(location, &application)?;
    Ok(evaluate(context, manifest)?)
}
