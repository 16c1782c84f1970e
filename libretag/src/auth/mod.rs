//! Authentication handling for Docker Hub style registries.
//!
//! Pushing a manifest requires a bearer token scoped to the repository. The
//! token is obtained from the registry's token service using HTTP Basic
//! authentication, then sent as `Authorization: Bearer <token>` on every
//! registry request.

use crate::error::{Result, RetagError};
use crate::name::ImageName;
use serde::Deserialize;
use std::fmt;


/// Environment variable holding the registry username.
pub const USERNAME_ENV: &str = "DOCKER_USER";

/// Environment variable holding the registry password or access token.
pub const PASSWORD_ENV: &str = "DOCKER_PASS";

/// Credentials for registry authentication.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic authentication, used against the token service
    Basic {
        /// Username for authentication
        username: String,
        /// Password or personal access token
        password: String,
    },

    /// Bearer token, used against the registry itself
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl Credentials {
    /// Creates Basic authentication credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::auth::Credentials;
    ///
    /// let creds = Credentials::basic("username", "password");
    /// ```
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates Bearer token credentials.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Builds Basic credentials from optionally supplied parts.
    ///
    /// A missing part is reported by the name of the environment variable
    /// that supplies it.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::auth::Credentials;
    ///
    /// let creds = Credentials::from_parts(Some("user".into()), Some("pass".into()));
    /// assert!(creds.is_ok());
    ///
    /// let err = Credentials::from_parts(Some("user".into()), None).unwrap_err();
    /// assert_eq!(err.to_string(), "DOCKER_PASS not found in environment");
    /// ```
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Result<Self> {
        let username = username.ok_or_else(|| RetagError::missing_credential(USERNAME_ENV))?;
        let password = password.ok_or_else(|| RetagError::missing_credential(PASSWORD_ENV))?;
        Ok(Self::basic(username, password))
    }

    /// Reads Basic credentials from `DOCKER_USER` and `DOCKER_PASS`.
    pub fn from_env() -> Result<Self> {
        Self::from_parts(
            std::env::var(USERNAME_ENV).ok(),
            std::env::var(PASSWORD_ENV).ok(),
        )
    }

    /// Converts credentials to an HTTP Authorization header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::auth::Credentials;
    ///
    /// let header = Credentials::bearer("abc").to_header_value();
    /// assert_eq!(header, "Bearer abc");
    /// ```
    pub fn to_header_value(&self) -> String {
        match self {
            Self::Basic { username, password } => {
                use base64::{Engine as _, engine::general_purpose};
                let credentials = format!("{}:{}", username, password);
                let encoded = general_purpose::STANDARD.encode(credentials);
                format!("Basic {}", encoded)
            }
            Self::Bearer { token } => format!("Bearer {}", token),
        }
    }
}

// Secrets stay out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

/// Token scope granting pull and push on a repository.
///
/// # Examples
///
/// ```
/// use libretag::ImageName;
/// use libretag::auth::push_scope;
///
/// let name = ImageName::canonicalize("org/app").unwrap();
/// assert_eq!(push_scope(&name), "repository:org/app:pull,push");
/// ```
pub fn push_scope(name: &ImageName) -> String {
    format!("repository:{}:pull,push", name)
}

/// Body returned by the token service.
///
/// Docker Hub sends both `token` and `access_token`; other services may only
/// send one of them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub access_token: Option<String>,

    /// Free-form details some services attach to the response
    #[serde(default)]
    pub details: Option<String>,
}

impl TokenResponse {
    /// Returns the token, preferring `token` over `access_token` and
    /// rejecting an empty one.
    pub fn into_token(self) -> Result<String> {
        self.token
            .filter(|token| !token.is_empty())
            .or(self.access_token.filter(|token| !token.is_empty()))
            .ok_or_else(|| RetagError::authentication_failed("empty token"))
    }
}
