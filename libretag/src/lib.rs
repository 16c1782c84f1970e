//! Retag - Container Image Retagging Library
//!
//! Retag publishes an existing image manifest under a new tag on a Docker
//! Hub style registry, without pulling or pushing any layers.
//!
//! # Quick Start
//!
//! ```no_run
//! use libretag::{Config, Credentials, Retagger, resolve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Same argument forms as the command line
//!     let op = resolve(&["myorg/app", "1.2.3", "stable"])?;
//!
//!     let retagger = Retagger::from_config(&Config::default())?;
//!     let retagged = retagger.retag(&op, &Credentials::from_env()?).await?;
//!     println!("{}", retagged);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`resolve`] - Turns 2 or 3 arguments into a canonical [`Resolved`] operation
//! - [`Retagger`] - Runs the authenticate, fetch, publish chain
//! - [`ImageName`] - Canonical `org/repo` name
//! - [`Reference`] - Source reference, either a [`Tag`] or a [`Digest`]
//! - [`Credentials`] - Registry credentials
//! - [`Config`] - Layered endpoint and network configuration
//!
//! The lower-level modules stay public for callers that need a single
//! request, such as [`client::Client::fetch_manifest`].

#![warn(clippy::all)]

/// Returns the libretag crate version.
///
/// # Examples
///
/// ```
/// let version = libretag::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// High-level public API
mod retag;
pub use retag::{Retagged, Retagger};

pub use auth::Credentials;
pub use config::Config;
pub use digest::Digest;
pub use error::{Result, RetagError};
pub use manifest::Manifest;
pub use name::ImageName;
pub use reference::{Reference, Tag};
pub use resolver::{Resolved, resolve, split_image_ref};

pub mod auth;
pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod manifest;
pub mod name;
pub mod reference;
pub mod resolver;
