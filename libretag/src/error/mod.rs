//! Error types for retag
//!
//! Errors fall into two groups. Resolution errors are produced while turning
//! command-line input into a canonical name and references; they are fully
//! determined by the input. Registry errors name the step of the
//! authenticate/fetch/publish chain that failed and carry either the upstream
//! HTTP status line or the transport failure with its cause.
//!
//! The display strings are the single-line messages shown to users after the
//! tool-name prefix, so they are kept short and lowercase.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for retag operations
#[derive(Error, Debug)]
pub enum RetagError {
    /// Wrong number of positional arguments (must be 2 or 3)
    #[error("invalid arguments")]
    InvalidArguments,

    /// The name could not be reduced to `<org>/<repo>`
    #[error("invalid image name")]
    InvalidImageName { name: String },

    /// The source reference is neither a valid tag nor a valid sha256 digest
    #[error("invalid source reference")]
    InvalidSourceReference { reference: String },

    /// The target reference is not a valid tag (digests included)
    #[error("invalid target reference")]
    InvalidTargetReference { reference: String },

    /// The token endpoint was unreachable, refused the credentials or
    /// returned no token
    #[error("failed to authenticate: {status}")]
    AuthenticationFailed { status: String },

    /// GET of the source manifest failed or did not answer 200
    #[error("failed to pull manifest: {status}")]
    ManifestFetchFailed { status: String },

    /// PUT of the target manifest failed or did not answer 201
    #[error("failed to push manifest: {status}")]
    ManifestPublishFailed { status: String },

    /// A required credential was not supplied
    #[error("{variable} not found in environment")]
    MissingCredential { variable: String },

    /// The HTTP client itself could not be set up
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid config file, bad override)
    #[error("configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for retag operations
pub type Result<T> = std::result::Result<T, RetagError>;

impl RetagError {
    /// Creates a new network error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::error::RetagError;
    ///
    /// let err = RetagError::network("connection refused");
    /// assert!(matches!(err, RetagError::Network { .. }));
    /// ```
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::error::RetagError;
    ///
    /// let err = RetagError::config("invalid config file", Some("/path/to/config.yaml"));
    /// assert!(matches!(err, RetagError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an authentication failure carrying the upstream status line.
    pub fn authentication_failed<S: Into<String>>(status: S) -> Self {
        Self::AuthenticationFailed {
            status: status.into(),
        }
    }

    /// Creates a manifest fetch failure carrying the upstream status line.
    pub fn manifest_fetch_failed<S: Into<String>>(status: S) -> Self {
        Self::ManifestFetchFailed {
            status: status.into(),
        }
    }

    /// Creates a manifest publish failure carrying the upstream status line.
    pub fn manifest_publish_failed<S: Into<String>>(status: S) -> Self {
        Self::ManifestPublishFailed {
            status: status.into(),
        }
    }

    /// Creates a missing credential error naming the environment variable.
    pub fn missing_credential<S: Into<String>>(variable: S) -> Self {
        Self::MissingCredential {
            variable: variable.into(),
        }
    }

    /// Returns true for errors caused by malformed command-line input.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::error::RetagError;
    ///
    /// assert!(RetagError::InvalidArguments.is_resolution_error());
    /// assert!(!RetagError::manifest_fetch_failed("404 Not Found").is_resolution_error());
    /// ```
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArguments
                | Self::InvalidImageName { .. }
                | Self::InvalidSourceReference { .. }
                | Self::InvalidTargetReference { .. }
        )
    }
}
