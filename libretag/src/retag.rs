//! High-level retag API.
//!
//! [`Retagger`] runs the full authenticate, fetch, publish chain for a
//! [`Resolved`] operation. Each step must succeed before the next starts and
//! the first failure is returned as is.
//!
//! # Examples
//!
//! ```no_run
//! use libretag::{Config, Credentials, Retagger, resolve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let op = resolve(&["org/example:1.2.3", "4.5.6"])?;
//!     let retagger = Retagger::from_config(&Config::default())?;
//!     let outcome = retagger.retag(&op, &Credentials::from_env()?).await?;
//!     println!("{}", outcome);
//!     Ok(())
//! }
//! ```

use crate::auth::Credentials;
use crate::client::Client;
use crate::config::Config;
use crate::digest::Digest;
use crate::error::Result;
use crate::name::ImageName;
use crate::reference::{Reference, Tag};
use crate::resolver::Resolved;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

#[cfg(test)]
#[path = "retag_tests.rs"]
mod tests;

/// Result of a successful retag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Retagged {
    pub name: ImageName,
    pub source: Reference,
    pub target: Tag,
    /// sha256 of the copied manifest bytes
    pub digest: Digest,
}

impl fmt::Display for Retagged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Retagged {name}{sep}{source} as {name}:{target}",
            name = self.name,
            sep = self.source.separator(),
            source = self.source,
            target = self.target
        )
    }
}

/// Copies a manifest from one reference to a new tag.
#[derive(Debug, Clone)]
pub struct Retagger {
    client: Client,
}

impl Retagger {
    /// Creates a retagger around an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a retagger using the endpoints and network settings in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Client::from_config(config)?))
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Publishes the manifest of `op.source` under `op.target`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step:
    /// [`RetagError::AuthenticationFailed`](crate::RetagError::AuthenticationFailed),
    /// [`RetagError::ManifestFetchFailed`](crate::RetagError::ManifestFetchFailed) or
    /// [`RetagError::ManifestPublishFailed`](crate::RetagError::ManifestPublishFailed).
    /// Unreachable endpoints are reported through the same variants.
    pub async fn retag(&self, op: &Resolved, credentials: &Credentials) -> Result<Retagged> {
        debug!(name = %op.name, "authenticating");
        let token = self.client.authenticate(&op.name, credentials).await?;

        debug!(name = %op.name, source = %op.source, "pulling manifest");
        let manifest = self
            .client
            .fetch_manifest(&token, &op.name, &op.source)
            .await?;
        debug!(digest = %manifest.digest(), size = manifest.len(), "pulled manifest");

        debug!(name = %op.name, target = %op.target, "pushing manifest");
        self.client
            .publish_manifest(&token, &op.name, &op.target, &manifest)
            .await?;

        let retagged = Retagged {
            name: op.name.clone(),
            source: op.source.clone(),
            target: op.target.clone(),
            digest: manifest.digest().clone(),
        };
        info!(digest = %retagged.digest, "{}", retagged);

        Ok(retagged)
    }
}
