//! Raw image manifests.
//!
//! Retagging copies a manifest byte for byte, so the manifest is never parsed.
//! Re-serializing it would change its digest and the registry would store a
//! different document under the new tag.

use crate::digest::Digest;

#[cfg(test)]
mod tests;

/// Docker image manifest, schema 2.
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// A manifest as returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    bytes: Vec<u8>,
    media_type: String,
    digest: Digest,
}

impl Manifest {
    /// Wraps raw manifest bytes with their media type.
    ///
    /// A missing or empty media type falls back to the schema 2 manifest type.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::manifest::{MANIFEST_V2_MEDIA_TYPE, Manifest};
    ///
    /// let manifest = Manifest::new(b"{}".to_vec(), None);
    /// assert_eq!(manifest.media_type(), MANIFEST_V2_MEDIA_TYPE);
    /// assert!(manifest.digest().to_string().starts_with("sha256:"));
    /// ```
    pub fn new(bytes: Vec<u8>, media_type: Option<&str>) -> Self {
        let media_type = media_type
            .map(str::trim)
            .filter(|media_type| !media_type.is_empty())
            .unwrap_or(MANIFEST_V2_MEDIA_TYPE)
            .to_string();
        let digest = Digest::of_bytes(&bytes);

        Self {
            bytes,
            media_type,
            digest,
        }
    }

    /// Returns the raw manifest bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the media type the manifest is published with.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the sha256 digest of the raw bytes.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Returns the manifest size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the manifest body is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
