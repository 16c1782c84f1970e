//! HTTP client for Docker Hub style registries.
//!
//! This module provides a thin HTTP client built on reqwest for the three
//! requests a retag needs:
//!
//! 1. `GET <auth_url>?service=<service>&scope=repository:<name>:pull,push`
//!    with Basic credentials, returning a bearer token
//! 2. `GET <registry>/v2/<name>/manifests/<source>`, expecting 200
//! 3. `PUT <registry>/v2/<name>/manifests/<target>`, expecting 201
//!
//! Non-success responses are reported with their status line only. A request
//! that cannot be sent, or whose body cannot be read, is reported as a failure
//! of the same step with the underlying cause. Nothing is retried.

use crate::auth::{Credentials, TokenResponse, push_scope};
use crate::config::Config;
use crate::error::{Result, RetagError};
use crate::manifest::{MANIFEST_V2_MEDIA_TYPE, Manifest};
use crate::name::ImageName;
use crate::reference::{Reference, Tag};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Response, StatusCode};
use std::error::Error as _;
use std::time::Duration;
use tracing::debug;


/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libretag::client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_timeout(60)
///     .with_max_idle_per_host(20);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// Maximum idle connections per host (default: 10)
    pub max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_idle_per_host: 10,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::client::ClientConfig;
    ///
    /// let config = ClientConfig::new().with_timeout(60);
    /// assert_eq!(config.timeout_seconds, 60);
    /// ```
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }
}

/// HTTP client for registry operations.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: ReqwestClient,
    /// Base registry URL (e.g., "https://index.docker.io")
    registry_url: String,
    /// Token endpoint (e.g., "https://auth.docker.io/token")
    auth_url: String,
    /// Value of the token request's `service` parameter
    service: String,
    timeout_seconds: u64,
}

impl Client {
    /// Creates a client with default network settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::client::Client;
    ///
    /// let client = Client::new(
    ///     "https://index.docker.io",
    ///     "https://auth.docker.io/token",
    ///     "registry.docker.io",
    /// )
    /// .unwrap();
    /// assert_eq!(client.registry_url(), "https://index.docker.io");
    /// ```
    pub fn new(registry_url: &str, auth_url: &str, service: &str) -> Result<Self> {
        Self::with_config(registry_url, auth_url, service, ClientConfig::default())
    }

    /// Creates a client with custom network settings.
    pub fn with_config(
        registry_url: &str,
        auth_url: &str,
        service: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let registry_url = Self::normalize_url(registry_url)?;
        let auth_url = Self::normalize_url(auth_url)?;

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| RetagError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            registry_url,
            auth_url,
            service: service.trim().to_string(),
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Creates a client from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_config(
            &config.registry.url,
            &config.registry.auth_url,
            &config.registry.service,
            ClientConfig::new()
                .with_timeout(config.network.timeout)
                .with_max_idle_per_host(config.network.max_idle_per_host),
        )
    }

    /// Normalizes a URL by ensuring it has a scheme and removing trailing slashes.
    fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();

        if url.is_empty() {
            return Err(RetagError::config("URL cannot be empty", None));
        }

        let url = if !url.starts_with("http://") && !url.starts_with("https://") {
            format!("https://{}", url)
        } else {
            url.to_string()
        };

        Ok(url.trim_end_matches('/').to_string())
    }

    /// Returns the base registry URL.
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Returns the token endpoint URL.
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the token service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Builds the manifest URL for a repository and reference.
    pub fn manifest_url(&self, name: &ImageName, reference: &str) -> String {
        format!("{}/v2/{}/manifests/{}", self.registry_url, name, reference)
    }

    /// Requests a bearer token with pull and push scope on `name`.
    ///
    /// # Errors
    ///
    /// [`RetagError::AuthenticationFailed`] if the request cannot be sent, the
    /// token service does not answer 200, the body is not a token response, or
    /// the token is empty.
    pub async fn authenticate(&self, name: &ImageName, credentials: &Credentials) -> Result<String> {
        let scope = push_scope(name);
        debug!(url = %self.auth_url, service = %self.service, %scope, "requesting token");

        let response = self
            .http_client
            .get(&self.auth_url)
            .query(&[("service", self.service.as_str()), ("scope", scope.as_str())])
            .header(AUTHORIZATION, credentials.to_header_value())
            .send()
            .await
            .map_err(|e| {
                RetagError::authentication_failed(self.describe_error(&e, &self.auth_url))
            })?;

        let response = Self::expect_status(response, StatusCode::OK)
            .await
            .map_err(RetagError::authentication_failed)?;

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| RetagError::authentication_failed(format!("invalid token response: {}", e)))?;

        body.into_token()
    }

    /// Fetches the manifest for `reference`, requesting the schema 2 media type.
    ///
    /// # Errors
    ///
    /// [`RetagError::ManifestFetchFailed`] on any status other than 200, or if
    /// the request cannot be sent or the body read.
    pub async fn fetch_manifest(
        &self,
        token: &str,
        name: &ImageName,
        reference: &Reference,
    ) -> Result<Manifest> {
        let url = self.manifest_url(name, &reference.to_string());
        debug!(%url, "fetching manifest");

        let response = self
            .http_client
            .get(&url)
            .header(AUTHORIZATION, Credentials::bearer(token).to_header_value())
            .header(ACCEPT, MANIFEST_V2_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| RetagError::manifest_fetch_failed(self.describe_error(&e, &url)))?;

        let response = Self::expect_status(response, StatusCode::OK)
            .await
            .map_err(RetagError::manifest_fetch_failed)?;

        let media_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RetagError::manifest_fetch_failed(self.describe_error(&e, &url)))?;

        Ok(Manifest::new(bytes.to_vec(), media_type.as_deref()))
    }

    /// Publishes `manifest` under the `target` tag.
    ///
    /// # Errors
    ///
    /// [`RetagError::ManifestPublishFailed`] on any status other than 201, or if
    /// the request cannot be sent.
    pub async fn publish_manifest(
        &self,
        token: &str,
        name: &ImageName,
        target: &Tag,
        manifest: &Manifest,
    ) -> Result<()> {
        let url = self.manifest_url(name, target.as_str());
        debug!(%url, media_type = manifest.media_type(), size = manifest.len(), "publishing manifest");

        let response = self
            .http_client
            .put(&url)
            .header(AUTHORIZATION, Credentials::bearer(token).to_header_value())
            .header(CONTENT_TYPE, manifest.media_type())
            .body(manifest.bytes().to_vec())
            .send()
            .await
            .map_err(|e| RetagError::manifest_publish_failed(self.describe_error(&e, &url)))?;

        Self::expect_status(response, StatusCode::CREATED)
            .await
            .map_err(RetagError::manifest_publish_failed)?;

        Ok(())
    }

    /// Passes the response through if it has the expected status, otherwise
    /// returns its status line (e.g. `404 Not Found`).
    async fn expect_status(
        response: Response,
        expected: StatusCode,
    ) -> std::result::Result<Response, String> {
        let status = response.status();
        if status == expected {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("(unable to read response body)"));
        debug!(%url, %status, %body, "unexpected registry response");

        Err(status.to_string())
    }

    /// Describes a transport failure, ending with its innermost cause
    /// (e.g. `failed to connect to <url>: Connection refused (os error 111)`).
    fn describe_error(&self, error: &reqwest::Error, url: &str) -> String {
        let summary = if error.is_timeout() {
            format!(
                "request to {} timed out after {} seconds",
                url, self.timeout_seconds
            )
        } else if error.is_connect() {
            format!("failed to connect to {}", url)
        } else if error.is_body() || error.is_decode() {
            format!("failed to read response from {}", url)
        } else {
            format!("failed to send request to {}", url)
        };

        match root_cause(error) {
            Some(cause) => format!("{}: {}", summary, cause),
            None => summary,
        }
    }
}

/// Innermost error in the source chain, if there is one.
fn root_cause(error: &reqwest::Error) -> Option<String> {
    let mut cause = error.source()?;
    while let Some(next) = cause.source() {
        cause = next;
    }
    Some(cause.to_string())
}
