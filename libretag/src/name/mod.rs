//! Repository names in the `<org>/<repo>` form used by Docker Hub URLs.

use crate::error::{Result, RetagError};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;


/// Registry host prefix that is accepted and dropped.
pub const DOCKER_HUB_PREFIX: &str = "docker.io/";

/// Organization for official images given without one.
pub const DEFAULT_ORGANIZATION: &str = "library";

/// A canonical two-component image name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageName {
    org: String,
    repo: String,
}

impl ImageName {
    /// Reduces `raw` to `<org>/<repo>`.
    ///
    /// A leading `docker.io/` is stripped and a bare repository name lands in
    /// the `library` organization. Case is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::ImageName;
    ///
    /// assert_eq!(ImageName::canonicalize("alpine").unwrap().to_string(), "library/alpine");
    /// assert_eq!(ImageName::canonicalize("docker.io/org/app").unwrap().to_string(), "org/app");
    /// assert!(ImageName::canonicalize("org//app").is_none());
    /// ```
    pub fn canonicalize(raw: &str) -> Option<Self> {
        let trimmed = raw.strip_prefix(DOCKER_HUB_PREFIX).unwrap_or(raw);
        let components: Vec<&str> = trimmed.split('/').collect();

        let (org, repo) = match components.as_slice() {
            [repo] => (DEFAULT_ORGANIZATION, *repo),
            [org, repo] => (*org, *repo),
            _ => return None,
        };

        if org.is_empty() || repo.is_empty() {
            return None;
        }

        Some(Self {
            org: org.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Returns the organization component.
    pub fn org(&self) -> &str {
        &self.org
    }

    /// Returns the repository component.
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl FromStr for ImageName {
    type Err = RetagError;

    fn from_str(s: &str) -> Result<Self> {
        Self::canonicalize(s).ok_or_else(|| RetagError::InvalidImageName {
            name: s.to_string(),
        })
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.repo)
    }
}

impl Serialize for ImageName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
