//! Image references: tags and digests.
//!
//! A reference selects one revision of a repository. Registries accept either
//! a mutable tag or an immutable content digest in the manifest URL path.

use crate::digest::Digest;
use crate::error::{Result, RetagError};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;


/// Tag grammar from the distribution reference rules, with one optional
/// leading `:`. ASCII word characters only.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:?([A-Za-z0-9_][A-Za-z0-9_.-]{0,127})$").expect("tag pattern compiles")
});

/// Tag used when a combined name carries no reference.
pub const DEFAULT_TAG: &str = "latest";

/// A canonical tag, without any leading `:`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    /// Matches `raw` against the tag grammar and returns its canonical form.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::Tag;
    ///
    /// assert_eq!(Tag::canonicalize(":1.2.3").unwrap().as_str(), "1.2.3");
    /// assert!(Tag::canonicalize("::1.2.3").is_none());
    /// ```
    pub fn canonicalize(raw: &str) -> Option<Self> {
        TAG_PATTERN
            .captures(raw)
            .map(|caps| Self(caps[1].to_string()))
    }

    /// The `latest` tag.
    pub fn latest() -> Self {
        Self(DEFAULT_TAG.to_string())
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Either a tag or a digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    Tag(Tag),
    Digest(Digest),
}

impl Reference {
    /// Canonicalizes a source reference.
    ///
    /// The digest grammar is tried before the tag grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use libretag::Reference;
    ///
    /// let hex = "a".repeat(64);
    /// let source = Reference::canonicalize_source(&format!("@{}", hex)).unwrap();
    /// assert!(source.is_digest());
    ///
    /// let source = Reference::canonicalize_source(":1.2.3").unwrap();
    /// assert_eq!(source.to_string(), "1.2.3");
    /// ```
    pub fn canonicalize_source(raw: &str) -> Result<Self> {
        if let Some(digest) = Digest::canonicalize(raw) {
            return Ok(Self::Digest(digest));
        }
        Tag::canonicalize(raw)
            .map(Self::Tag)
            .ok_or_else(|| RetagError::InvalidSourceReference {
                reference: raw.to_string(),
            })
    }

    /// Returns true if this reference is a digest.
    pub fn is_digest(&self) -> bool {
        matches!(self, Self::Digest(_))
    }

    /// Returns the tag, if this reference is one.
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Self::Tag(tag) => Some(tag),
            Self::Digest(_) => None,
        }
    }

    /// Returns the digest, if this reference is one.
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            Self::Tag(_) => None,
            Self::Digest(digest) => Some(digest),
        }
    }

    /// Separator placed between a repository name and this reference when
    /// writing a full image reference: `:` for tags, `@` for digests.
    pub fn separator(&self) -> char {
        match self {
            Self::Tag(_) => ':',
            Self::Digest(_) => '@',
        }
    }
}

impl From<Tag> for Reference {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

impl From<Digest> for Reference {
    fn from(digest: Digest) -> Self {
        Self::Digest(digest)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tag) => tag.fmt(f),
            Self::Digest(digest) => digest.fmt(f),
        }
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
