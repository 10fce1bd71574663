use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;

use gtm_constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_REGISTRY, MAX_ATTEMPTS, REQUEST_TIMEOUT_SECS, USER_AGENT,
};
use gtm_error::{CliError, Result};

/// Anything that can answer "which versions of this package are published".
#[async_trait]
pub trait VersionSource: Send + Sync {
    async fn list_versions(&self, name: &str) -> Result<Vec<String>>;
}

#[derive(Clone, Debug)]
pub struct PackageInfo {
    pub versions: Value,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistInfo {
    pub tarball: String,
    pub integrity: Option<String>,
}

impl PackageInfo {
    #[must_use]
    pub fn version_names(&self) -> Vec<String> {
        self.versions
            .as_object()
            .map(|versions| versions.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn dist(&self, version: &str) -> Option<DistInfo> {
        let dist = self.versions.get(version)?.get("dist")?;
        let tarball = dist.get("tarball")?.as_str()?.to_string();
        let integrity = dist
            .get("integrity")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        Some(DistInfo { tarball, integrity })
    }
}

pub struct RegistryClient {
    client: reqwest::Client,
    registry: String,
    max_attempts: u32,
    retry_delay: Duration,
    cache: Mutex<HashMap<String, PackageInfo>>,
}

impl RegistryClient {
    #[must_use]
    pub fn new(registry: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .tcp_nodelay(true)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(client, registry)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, registry: &str) -> Self {
        let registry = if registry.trim().is_empty() {
            DEFAULT_REGISTRY
        } else {
            registry
        };
        Self {
            client,
            registry: registry.trim_end_matches('/').to_string(),
            max_attempts: MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(1000),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Overrides the retry budget for transient failures.
    #[must_use]
    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &str {
        &self.registry
    }

    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    #[must_use]
    pub fn package_url(&self, name: &str) -> String {
        let encoded_name = urlencoding::encode(name);
        format!("{}/{encoded_name}", self.registry)
    }

    pub async fn fetch_package_info(&self, name: &str) -> Result<PackageInfo> {
        if name.is_empty() {
            return Err(unavailable(name, "package name is empty"));
        }

        {
            let cache = self.cache.lock().await;
            if let Some(cached_info) = cache.get(name) {
                return Ok(cached_info.clone());
            }
        }

        let url = self.package_url(name);
        let mut attempts = 0;

        loop {
            attempts += 1;

            let resp = match self
                .client
                .get(&url)
                .header("Accept", "application/json")
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    if attempts < self.max_attempts {
                        self.backoff(attempts).await;
                        continue;
                    }
                    return Err(unavailable(
                        name,
                        &if e.is_timeout() {
                            format!("request timed out after {attempts} attempts")
                        } else if e.is_connect() {
                            format!("connection failed: {e}")
                        } else {
                            format!("network error: {e}")
                        },
                    ));
                }
            };

            let resp = match resp.error_for_status() {
                Ok(resp) => resp,
                Err(e) => {
                    if attempts < self.max_attempts
                        && (e.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS)
                            || e.status() == Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
                            || e.status() == Some(reqwest::StatusCode::SERVICE_UNAVAILABLE))
                    {
                        self.backoff(attempts).await;
                        continue;
                    }
                    return Err(unavailable(name, &format!("HTTP error: {e}")));
                }
            };

            let text = resp
                .text()
                .await
                .map_err(|e| unavailable(name, &format!("failed to read response: {e}")))?;

            let json: Value = serde_json::from_str(&text).map_err(|e| {
                unavailable(
                    name,
                    &format!("invalid JSON (response length: {}): {e}", text.len()),
                )
            })?;

            let versions = json
                .get("versions")
                .cloned()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
            if !versions.is_object() {
                return Err(unavailable(name, "`versions` is not an object"));
            }

            let package_info = PackageInfo { versions };

            {
                let mut cache = self.cache.lock().await;
                cache.insert(name.to_string(), package_info.clone());
            }

            return Ok(package_info);
        }
    }

    async fn backoff(&self, attempts: u32) {
        let delay = self.retry_delay.saturating_mul(attempts).min(Duration::from_secs(5));
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl VersionSource for RegistryClient {
    async fn list_versions(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.fetch_package_info(name).await?.version_names())
    }
}

fn unavailable(name: &str, reason: &str) -> CliError {
    CliError::RegistryUnavailable(name.to_string(), reason.to_string())
}
