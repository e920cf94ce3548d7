//! Resource references and tag targets
//!
//! A resource reference given on the command line may be a numeric id or a
//! name, UUID or commit. [`ResourceRef::coerce`] decides which, and
//! [`ResourceSelector`] records which kind of resource a tag operation
//! targets.

use std::fmt;

use serde::Serialize;

use crate::error::{FleetError, Result};

/// A reference to a remote resource, either by numeric id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ResourceRef {
    Id(u64),
    Name(String),
}

impl ResourceRef {
    /// Try-as-integer coercion.
    ///
    /// The string becomes an [`ResourceRef::Id`] only when it parses as a
    /// base-10 integer whose canonical rendering is the string itself, so
    /// `"1234"` is an id while `"01234"`, `"+1234"` and `"7cf02a6"` stay
    /// names. The id range is the full `u64`, not limited to integers that
    /// survive a round trip through an IEEE double.
    pub fn coerce(raw: &str) -> Self {
        match raw.parse::<u64>() {
            Ok(id) if id.to_string() == raw => ResourceRef::Id(id),
            _ => ResourceRef::Name(raw.to_string()),
        }
    }

    pub fn as_id(&self) -> Option<u64> {
        match self {
            ResourceRef::Id(id) => Some(*id),
            ResourceRef::Name(_) => None,
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRef::Id(id) => write!(f, "{}", id),
            ResourceRef::Name(name) => write!(f, "{}", name),
        }
    }
}

/// The resource kinds that can carry tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Application,
    Device,
    Release,
}

impl ResourceKind {
    /// Remote resource name, also used to derive the tag resource name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Application => "application",
            ResourceKind::Device => "device",
            ResourceKind::Release => "release",
        }
    }

    /// Name of the remote collection holding this kind's tags.
    pub fn tag_resource(&self) -> String {
        format!("{}_tag", self.as_str())
    }

    fn flag(&self) -> &'static str {
        match self {
            ResourceKind::Application => "--application",
            ResourceKind::Device => "--device",
            ResourceKind::Release => "--release",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one tag target.
///
/// Application and device references are coerced up front. Release
/// references stay raw because they go through release disambiguation
/// before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSelector {
    Application(ResourceRef),
    Device(ResourceRef),
    Release(String),
}

impl ResourceSelector {
    /// Build a selector from the individual command line options.
    ///
    /// `app` is the deprecated spelling of `application` and is only used
    /// when `application` is absent. Empty strings count as absent.
    pub fn from_options(
        application: Option<&str>,
        app: Option<&str>,
        device: Option<&str>,
        release: Option<&str>,
    ) -> Result<Self> {
        let application = non_empty(application).or_else(|| non_empty(app));
        let device = non_empty(device);
        let release = non_empty(release);

        let given: Vec<ResourceKind> = [
            application.map(|_| ResourceKind::Application),
            device.map(|_| ResourceKind::Device),
            release.map(|_| ResourceKind::Release),
        ]
        .into_iter()
        .flatten()
        .collect();

        if given.len() > 1 {
            return Err(FleetError::MultipleResourceSelectors {
                given: given.iter().map(|kind| kind.flag().to_string()).collect(),
            });
        }

        match (application, device, release) {
            (Some(application), None, None) => {
                Ok(ResourceSelector::Application(ResourceRef::coerce(application)))
            }
            (None, Some(device), None) => Ok(ResourceSelector::Device(ResourceRef::coerce(device))),
            (None, None, Some(release)) => Ok(ResourceSelector::Release(release.to_string())),
            _ => Err(FleetError::MissingResourceSelector),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceSelector::Application(_) => ResourceKind::Application,
            ResourceSelector::Device(_) => ResourceKind::Device,
            ResourceSelector::Release(_) => ResourceKind::Release,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
