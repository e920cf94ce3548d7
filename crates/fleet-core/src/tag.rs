//! Resource tags
//!
//! A tag is a key/value pair attached to an application, device or release.
//! An empty value is a valid tag, not a missing one.

use serde::Serialize;
use tracing::{debug, info};

use crate::api::FleetApi;
use crate::bail_usage;
use crate::error::Result;
use crate::release::resolve_release_reference;
use crate::resource::{ResourceKind, ResourceRef, ResourceSelector};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// Build a tag, defaulting a missing value to the empty string.
    pub fn new(key: impl Into<String>, value: Option<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            bail_usage!("tag key must not be empty");
        }

        Ok(Self {
            key,
            value: value.unwrap_or_default(),
        })
    }
}

/// Where a tag ended up, as reported back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagAssignment {
    pub resource: ResourceKind,
    pub target: ResourceRef,
    pub tag_key: String,
    pub value: String,
}

/// Set `tag` on the selected resource.
///
/// Release selectors are disambiguated before the tag call, so an
/// ambiguous or unknown release never reaches `set_release_tag`.
pub async fn set_tag(
    api: &dyn FleetApi,
    selector: &ResourceSelector,
    tag: &Tag,
) -> Result<TagAssignment> {
    debug!(resource = %selector.kind(), key = %tag.key, "set_tag");

    let target = match selector {
        ResourceSelector::Application(application) => {
            api.set_application_tag(application, &tag.key, &tag.value)
                .await?;
            application.clone()
        }
        ResourceSelector::Device(device) => {
            api.set_device_tag(device, &tag.key, &tag.value).await?;
            device.clone()
        }
        ResourceSelector::Release(reference) => {
            let release_id = resolve_release_reference(api, reference).await?;
            api.set_release_tag(release_id, &tag.key, &tag.value)
                .await?;
            ResourceRef::Id(release_id)
        }
    };

    info!(resource = %selector.kind(), target = %target, key = %tag.key, "tag set");

    Ok(TagAssignment {
        resource: selector.kind(),
        target,
        tag_key: tag.key.clone(),
        value: tag.value.clone(),
    })
}
