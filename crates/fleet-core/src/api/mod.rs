//! Remote fleet API
//!
//! [`FleetApi`] is the seam between commands and the remote service.
//! [`HttpClient`] talks to the real REST endpoint; tests substitute
//! in-memory implementations.

mod client;
mod odata;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resource::ResourceRef;

pub use client::HttpClient;

/// A release as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,
    pub commit: String,
}

/// Operations the CLI needs from the remote fleet API.
#[async_trait]
pub trait FleetApi: Send + Sync {
    /// Create or update the tag `key` on an application.
    async fn set_application_tag(
        &self,
        application: &ResourceRef,
        key: &str,
        value: &str,
    ) -> Result<()>;

    /// Create or update the tag `key` on a device.
    async fn set_device_tag(&self, device: &ResourceRef, key: &str, value: &str) -> Result<()>;

    /// Create or update the tag `key` on a release, by resolved release id.
    async fn set_release_tag(&self, release_id: u64, key: &str, value: &str) -> Result<()>;

    /// Fetch a release by id, `None` when no such release exists.
    async fn get_release(&self, id: u64) -> Result<Option<Release>>;

    /// Releases whose commit hash starts with `prefix`.
    async fn find_releases_by_commit(&self, prefix: &str) -> Result<Vec<Release>>;
}
