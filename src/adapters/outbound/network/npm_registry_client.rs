use crate::dependency_analysis::domain::{DependencyMap, Maintainer, PackageInfo, Repository};
use crate::ports::outbound::PackageRegistry;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Connection settings for `NpmRegistryClient`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RegistryFetchError {
    #[error("{0}")]
    InvalidComponent(String),

    #[error("registry returned status code {0}")]
    Status(StatusCode),

    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl RegistryFetchError {
    /// Transport faults, server errors and rate limiting are worth another try.
    /// A 404 or a malformed document will not change on retry.
    fn is_transient(&self) -> bool {
        match self {
            RegistryFetchError::InvalidComponent(_) => false,
            RegistryFetchError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            RegistryFetchError::Transport(e) => !e.is_decode(),
        }
    }
}

/// One version document as served by `/{name}/{version}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryDocument {
    #[serde(default)]
    name: Option<String>,
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    license: Option<Value>,
    #[serde(default)]
    repository: Option<Value>,
    #[serde(default)]
    maintainers: Option<Value>,
    #[serde(default)]
    dependencies: Option<DependencyMap>,
    #[serde(default)]
    dev_dependencies: Option<DependencyMap>,
    #[serde(default)]
    peer_dependencies: Option<DependencyMap>,
}

impl RegistryDocument {
    fn into_package_info(self, requested_name: &str) -> PackageInfo {
        PackageInfo {
            name: self.name.unwrap_or_else(|| requested_name.to_string()),
            version: self.version,
            description: self.description,
            homepage: self.homepage,
            license: self.license.as_ref().and_then(normalize_license),
            repository: self.repository.as_ref().and_then(normalize_repository),
            maintainers: self
                .maintainers
                .as_ref()
                .map(normalize_maintainers)
                .unwrap_or_default(),
            dependencies: self.dependencies.unwrap_or_default(),
            dev_dependencies: self.dev_dependencies.unwrap_or_default(),
            peer_dependencies: self.peer_dependencies.unwrap_or_default(),
        }
    }
}

/// `"MIT"`, `{ "type": "MIT" }` or a legacy list of such objects
fn normalize_license(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::Array(items) => {
            let names: Vec<String> = items.iter().filter_map(normalize_license).collect();
            if names.is_empty() {
                None
            } else {
                Some(names.join(" OR "))
            }
        }
        _ => None,
    }
}

/// `"github:user/repo"` shorthand or `{ "type": "git", "url": ... }`
fn normalize_repository(value: &Value) -> Option<Repository> {
    match value {
        Value::String(url) if !url.trim().is_empty() => Some(Repository {
            kind: "git".to_string(),
            url: url.clone(),
        }),
        Value::Object(map) => {
            let url = map.get("url").and_then(Value::as_str)?;
            let kind = map.get("type").and_then(Value::as_str).unwrap_or("git");
            Some(Repository {
                kind: kind.to_string(),
                url: url.to_string(),
            })
        }
        _ => None,
    }
}

fn normalize_maintainers(value: &Value) -> Vec<Maintainer> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(Maintainer {
                name: name.clone(),
                email: None,
            }),
            Value::Object(map) => {
                let name = map.get("name").and_then(Value::as_str)?;
                Some(Maintainer {
                    name: name.to_string(),
                    email: map.get("email").and_then(Value::as_str).map(str::to_string),
                })
            }
            _ => None,
        })
        .collect()
}

/// NpmRegistryClient adapter for fetching package metadata from an npm registry
///
/// This adapter implements the PackageRegistry port over the registry's
/// JSON API (`{base}/{name}/{version|latest}`).
///
/// # Async Support
/// Uses async reqwest client for non-blocking HTTP requests, enabling sibling
/// dependencies to be resolved concurrently. Every request is bounded by the
/// configured timeout; a timeout counts as a failed lookup.
pub struct NpmRegistryClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl NpmRegistryClient {
    /// Creates a client for the public npm registry with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(RegistrySettings::default())
    }

    pub fn with_settings(settings: RegistrySettings) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("depviz/{}", version);
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_retries: settings.max_retries.max(1),
        })
    }

    /// Fetches a version document with retry for transient failures (async)
    async fn fetch_with_retry(
        &self,
        package_name: &str,
        version: Option<&str>,
    ) -> std::result::Result<RegistryDocument, RegistryFetchError> {
        let mut attempt = 1;

        loop {
            match self.fetch_from_registry(package_name, version).await {
                Ok(document) => return Ok(document),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    tracing::debug!(
                        package = package_name,
                        attempt,
                        error = %e,
                        "transient registry failure, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Validates a package name and encodes it as a single URL path segment
    ///
    /// Scoped names keep the leading `@` and encode the separator:
    /// `@types/react` becomes `@types%2Freact`.
    fn encode_package_name(package_name: &str) -> std::result::Result<String, RegistryFetchError> {
        let invalid =
            |reason: &str| RegistryFetchError::InvalidComponent(format!("Package name {}", reason));

        if package_name.is_empty() {
            return Err(invalid("is empty"));
        }
        if package_name.contains("..") {
            return Err(invalid("contains '..' which is not allowed"));
        }
        if package_name
            .chars()
            .any(|c| c == '\\' || c == '?' || c == '#' || c.is_whitespace())
        {
            return Err(invalid("contains URL-unsafe characters"));
        }

        match package_name.strip_prefix('@') {
            Some(scoped) => {
                let mut parts = scoped.splitn(2, '/');
                let scope = parts.next().unwrap_or_default();
                let name = parts.next().unwrap_or_default();
                if scope.is_empty() || name.is_empty() || name.contains('/') {
                    return Err(invalid("must have the form '@scope/name'"));
                }
                Ok(format!(
                    "@{}%2F{}",
                    urlencoding::encode(scope),
                    urlencoding::encode(name)
                ))
            }
            None => {
                if package_name.contains('/') || package_name.contains('@') {
                    return Err(invalid("contains path separators which are not allowed"));
                }
                Ok(urlencoding::encode(package_name).into_owned())
            }
        }
    }

    fn encode_version(version: &str) -> std::result::Result<String, RegistryFetchError> {
        if version.is_empty()
            || version.contains("..")
            || version
                .chars()
                .any(|c| c == '/' || c == '\\' || c == '?' || c == '#' || c.is_whitespace())
        {
            return Err(RegistryFetchError::InvalidComponent(format!(
                "Version '{}' contains URL-unsafe characters",
                version
            )));
        }
        Ok(urlencoding::encode(version).into_owned())
    }

    fn document_url(
        &self,
        package_name: &str,
        version: Option<&str>,
    ) -> std::result::Result<String, RegistryFetchError> {
        let encoded_name = Self::encode_package_name(package_name)?;
        let encoded_version = match version {
            Some(v) => Self::encode_version(v)?,
            None => "latest".to_string(),
        };
        Ok(format!("{}/{}/{}", self.base_url, encoded_name, encoded_version))
    }

    /// Fetches one version document from the registry (async)
    async fn fetch_from_registry(
        &self,
        package_name: &str,
        version: Option<&str>,
    ) -> std::result::Result<RegistryDocument, RegistryFetchError> {
        let url = self.document_url(package_name, version)?;

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryFetchError::Status(response.status()));
        }

        let document: RegistryDocument = response.json().await?;
        Ok(document)
    }
}

#[async_trait]
impl PackageRegistry for NpmRegistryClient {
    async fn fetch_package_info(
        &self,
        package_name: &str,
        version: Option<&str>,
    ) -> Result<PackageInfo> {
        let document = self.fetch_with_retry(package_name, version).await?;
        Ok(document.into_package_info(package_name))
    }
}
