//! HTTP adapter for the remote project API.
//!
//! Speaks the HAL+JSON dialect of the remote API: collections arrive as
//! `_embedded.elements`, resource links as `_links.<name>.href`.

use crate::config::RemoteSettings;
use crate::remote::{
    domain::{
        API_PREFIX, CreatedTask, Project, ProjectId, RemoteTaskId, RemoteTaskPayload, Version,
        VersionId, VersionStatus,
    },
    ports::{ProjectApi, RemoteApiError, RemoteApiResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Remote project API client over `reqwest`.
///
/// Every request carries basic-auth credentials and is bounded by the
/// configured timeout. The JSON content type is a client default, so request
/// bodies set with `.json()` never carry it twice.
#[derive(Debug, Clone)]
pub struct HttpProjectApi {
    http: reqwest::Client,
    base_url: String,
    api_user: String,
    api_key: String,
    timeout: Duration,
}

impl HttpProjectApi {
    /// Creates a client from remote settings.
    ///
    /// Missing credentials are not rejected here; every call reports them as
    /// [`RemoteApiError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError::Connection`] when the HTTP client cannot be
    /// built.
    pub fn new(settings: &RemoteSettings) -> RemoteApiResult<Self> {
        let timeout = settings.timeout();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        let http = reqwest::Client::builder()
            .user_agent(concat!("taskgate/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| RemoteApiError::Connection(err.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_owned(),
            api_user: settings.api_user.clone(),
            api_key: settings.api_key.clone(),
            timeout,
        })
    }

    fn ensure_configured(&self) -> RemoteApiResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(RemoteApiError::NotConfigured("base URL"));
        }
        if self.api_key.trim().is_empty() {
            return Err(RemoteApiError::NotConfigured("API key"));
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    fn map_transport(&self, err: &reqwest::Error) -> RemoteApiError {
        if err.is_timeout() {
            RemoteApiError::Timeout(self.timeout)
        } else if err.is_decode() {
            RemoteApiError::Decode(err.to_string())
        } else {
            RemoteApiError::Connection(err.to_string())
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> RemoteApiResult<T> {
        self.ensure_configured()?;
        let response = request
            .basic_auth(&self.api_user, Some(&self.api_key))
            .send()
            .await
            .map_err(|err| self.map_transport(&err))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_else(|err| {
                tracing::warn!(
                    status = status.as_u16(),
                    error = %err,
                    "error response body could not be read"
                );
                format!("<unreadable response body: {err}>")
            });
            tracing::debug!(status = status.as_u16(), %body, "remote API rejected request");
            return Err(RemoteApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.map_transport(&err))?;
        serde_json::from_slice(&bytes).map_err(|err| RemoteApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl ProjectApi for HttpProjectApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_projects(&self) -> RemoteApiResult<Vec<Project>> {
        let url = self.endpoint("/projects");
        tracing::debug!(%url, "listing remote projects");
        let collection: Collection<ProjectElement> = self.send(self.http.get(url)).await?;
        Ok(collection
            .into_elements()
            .into_iter()
            .map(ProjectElement::into_domain)
            .collect())
    }

    async fn list_versions(&self, project_id: ProjectId) -> RemoteApiResult<Vec<Version>> {
        let url = self.endpoint(&format!("/projects/{project_id}/versions"));
        tracing::debug!(%url, %project_id, "listing remote versions");
        let collection: Collection<VersionElement> = self.send(self.http.get(url)).await?;
        Ok(collection
            .into_elements()
            .into_iter()
            .map(VersionElement::into_domain)
            .collect())
    }

    async fn create_task(&self, payload: &RemoteTaskPayload) -> RemoteApiResult<CreatedTask> {
        let url = self.endpoint("/work_packages");
        tracing::debug!(%url, subject = %payload.subject, "creating remote task");
        let raw: serde_json::Value = self.send(self.http.post(url).json(payload)).await?;
        let element: CreatedElement = serde_json::from_value(raw.clone())
            .map_err(|err| RemoteApiError::Decode(err.to_string()))?;

        let mut created = CreatedTask::new(
            RemoteTaskId::new(element.id),
            element.links.self_link.map(|link| link.href).unwrap_or_default(),
            raw,
        );
        if let Some(version) = element.links.version.and_then(|link| link.href) {
            created = created.with_version_href(version);
        }
        Ok(created)
    }
}

#[derive(Debug, Deserialize)]
struct Collection<T> {
    #[serde(rename = "_embedded", default = "Embedded::empty")]
    embedded: Embedded<T>,
}

impl<T> Collection<T> {
    fn into_elements(self) -> Vec<T> {
        self.embedded.elements
    }
}

#[derive(Debug, Deserialize)]
struct Embedded<T> {
    #[serde(default = "Vec::new")]
    elements: Vec<T>,
}

impl<T> Embedded<T> {
    const fn empty() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Link {
    href: String,
}

#[derive(Debug, Default, Deserialize)]
struct NullableLink {
    href: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SelfLinks {
    #[serde(rename = "self")]
    self_link: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct ProjectElement {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    identifier: String,
    #[serde(default)]
    active: bool,
    #[serde(rename = "_links", default)]
    links: SelfLinks,
}

impl ProjectElement {
    fn into_domain(self) -> Project {
        let href = self.links.self_link.map(|link| link.href).unwrap_or_default();
        Project::new(ProjectId::new(self.id), self.name, self.identifier, href)
            .with_active(self.active)
    }
}

#[derive(Debug, Deserialize)]
struct RawText {
    #[serde(default)]
    raw: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionElement {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    description: Option<RawText>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
}

impl VersionElement {
    fn into_domain(self) -> Version {
        let description = self
            .description
            .and_then(|text| text.raw)
            .unwrap_or_default();
        Version::new(
            VersionId::new(self.id),
            self.name,
            VersionStatus::from_remote(&self.status),
        )
        .with_description(description)
        .with_schedule(self.start_date, self.end_date)
    }
}

#[derive(Debug, Default, Deserialize)]
struct CreatedLinks {
    #[serde(rename = "self")]
    self_link: Option<Link>,
    version: Option<NullableLink>,
}

#[derive(Debug, Deserialize)]
struct CreatedElement {
    id: u64,
    #[serde(rename = "_links", default)]
    links: CreatedLinks,
}
