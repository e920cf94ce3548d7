//! HTTP implementation of [`FleetApi`]
//!
//! Requests go to `<api_url>/<api_version>/<resource>` with a bearer token.
//! Collections come back as `{"d": [...]}`. Tags are upserted by creating
//! the tag row and patching it when the service reports a conflict.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{odata, FleetApi, Release};
use crate::config::FleetConfig;
use crate::error::{FleetError, Result};
use crate::resource::{ResourceKind, ResourceRef};

#[derive(Debug, Deserialize)]
struct Collection<T> {
    d: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: u64,
}

/// Client for the remote fleet REST API
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Build a client from configuration. Fails with `NotLoggedIn` when no
    /// token is configured.
    pub fn from_config(config: &FleetConfig) -> Result<Self> {
        let token = config.require_token()?;
        let base_url = format!(
            "{}/{}",
            config.api_url.trim_end_matches('/'),
            config.api_version.trim_matches('/')
        );
        Self::new(base_url, token, Duration::from_secs(config.timeout_seconds))
    }

    /// Build a client against an explicit versioned base URL.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let user_agent = format!(
            "fleet/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    async fn send_get(
        &self,
        resource: &str,
        filter: Option<&str>,
        select: &str,
    ) -> Result<Response> {
        let mut query = vec![("$select", select.to_string())];
        if let Some(filter) = filter {
            query.push(("$filter", filter.to_string()));
        }

        debug!(resource, filter, "GET");
        let response = self
            .client
            .get(self.url(resource))
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await?;
        Ok(response)
    }

    async fn read_collection<T: DeserializeOwned>(response: Response) -> Result<Vec<T>> {
        let collection: Collection<T> = check_status(response).await?.json().await?;
        Ok(collection.d)
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        resource: &str,
        filter: Option<&str>,
        select: &str,
    ) -> Result<Vec<T>> {
        let start = Instant::now();
        let response = self.send_get(resource, filter, select).await?;
        let rows = Self::read_collection(response).await?;
        crate::trace_time!(start, "api_get", resource = resource);
        Ok(rows)
    }

    async fn find_one(
        &self,
        kind: ResourceKind,
        filter: &str,
        reference: &ResourceRef,
    ) -> Result<u64> {
        let rows: Vec<IdRow> = self
            .get_collection(kind.as_str(), Some(filter), "id")
            .await?;
        match rows.as_slice() {
            [] => Err(FleetError::not_found(kind.as_str(), reference)),
            [row] => Ok(row.id),
            _ => Err(FleetError::ambiguous(kind.as_str(), reference, rows.len())),
        }
    }

    async fn application_id(&self, application: &ResourceRef) -> Result<u64> {
        match application {
            ResourceRef::Id(id) => Ok(*id),
            ResourceRef::Name(name) => {
                self.find_one(
                    ResourceKind::Application,
                    &odata::eq("app_name", name),
                    application,
                )
                .await
            }
        }
    }

    async fn device_id(&self, device: &ResourceRef) -> Result<u64> {
        match device {
            ResourceRef::Id(id) => Ok(*id),
            ResourceRef::Name(uuid) => {
                self.find_one(
                    ResourceKind::Device,
                    &odata::starts_with("uuid", &uuid.to_lowercase()),
                    device,
                )
                .await
            }
        }
    }

    async fn upsert_tag(
        &self,
        kind: ResourceKind,
        parent_id: u64,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let start = Instant::now();
        let url = self.url(&kind.tag_resource());

        let mut body = serde_json::Map::new();
        body.insert(kind.as_str().to_string(), parent_id.into());
        body.insert("tag_key".to_string(), key.into());
        body.insert("value".to_string(), value.into());

        debug!(resource = %kind.tag_resource(), parent_id, key, "POST");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            let filter = odata::tag_filter(kind.as_str(), parent_id, key);
            debug!(resource = %kind.tag_resource(), filter = %filter, "PATCH");
            let response = self
                .client
                .patch(&url)
                .bearer_auth(&self.token)
                .query(&[("$filter", filter)])
                .json(&serde_json::json!({ "value": value }))
                .send()
                .await?;
            check_status(response).await?;
        } else {
            check_status(response).await?;
        }

        crate::trace_time!(start, "api_upsert_tag", parent_id = parent_id);
        Ok(())
    }
}

#[async_trait]
impl FleetApi for HttpClient {
    async fn set_application_tag(
        &self,
        application: &ResourceRef,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let id = self.application_id(application).await?;
        self.upsert_tag(ResourceKind::Application, id, key, value)
            .await
    }

    async fn set_device_tag(&self, device: &ResourceRef, key: &str, value: &str) -> Result<()> {
        let id = self.device_id(device).await?;
        self.upsert_tag(ResourceKind::Device, id, key, value).await
    }

    async fn set_release_tag(&self, release_id: u64, key: &str, value: &str) -> Result<()> {
        self.upsert_tag(ResourceKind::Release, release_id, key, value)
            .await
    }

    async fn get_release(&self, id: u64) -> Result<Option<Release>> {
        let start = Instant::now();
        let resource = format!("release({})", id);
        let response = self.send_get(&resource, None, "id,commit").await?;

        // Addressing a missing entity by key is a 404, not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let releases: Vec<Release> = Self::read_collection(response).await?;
        crate::trace_time!(start, "api_get", release_id = id);
        Ok(releases.into_iter().next())
    }

    async fn find_releases_by_commit(&self, prefix: &str) -> Result<Vec<Release>> {
        let filter = odata::starts_with("commit", prefix);
        self.get_collection("release", Some(&filter), "id,commit")
            .await
    }
}

/// Turn a non-success response into `FleetError::Remote`, keeping the body
/// text as the message.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match body.trim() {
        "" => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        text => text.to_string(),
    };

    Err(FleetError::Remote {
        status: status.as_u16(),
        message,
    })
}
