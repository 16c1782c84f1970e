//! Content digest matching and canonicalization.
//!
//! Only `sha256` digests are recognized. This is narrower than what registries
//! accept in general, but sha256 is the only algorithm in practical use and a
//! narrow grammar keeps `@`-prefixed input from being misread.

use crate::error::{Result, RetagError};
use regex::Regex;
use serde::{Serialize, Serializer};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;


/// Accepted spellings: `@<hex>`, `sha256:<hex>` and `@sha256:<hex>`.
/// A prefix is mandatory, a bare hex string is a tag.
static DIGEST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@|sha256:|@sha256:)([0-9a-f]{64})$").expect("digest pattern compiles")
});

/// A canonical sha256 content digest, rendered as `sha256:<64 lowercase hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    hex: String,
}

impl Digest {
    /// The only supported digest algorithm.
    pub const ALGORITHM: &'static str = "sha256";

    /// Matches `raw` against the digest grammar and returns its canonical form.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::Digest;
    ///
    /// let hex = "0".repeat(64);
    /// let digest = Digest::canonicalize(&format!("@{}", hex)).unwrap();
    /// assert_eq!(digest.to_string(), format!("sha256:{}", hex));
    ///
    /// assert!(Digest::canonicalize(&hex).is_none());
    /// ```
    pub fn canonicalize(raw: &str) -> Option<Self> {
        DIGEST_PATTERN.captures(raw).map(|caps| Self {
            hex: caps[1].to_string(),
        })
    }

    /// Computes the sha256 digest of `bytes`.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self {
            hex: format!("{:x}", hasher.finalize()),
        }
    }

    /// Returns the algorithm name.
    pub fn algorithm(&self) -> &'static str {
        Self::ALGORITHM
    }

    /// Returns the 64-character lowercase hex encoded hash.
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl FromStr for Digest {
    type Err = RetagError;

    fn from_str(s: &str) -> Result<Self> {
        Self::canonicalize(s).ok_or_else(|| RetagError::InvalidSourceReference {
            reference: s.to_string(),
        })
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", Self::ALGORITHM, self.hex)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
