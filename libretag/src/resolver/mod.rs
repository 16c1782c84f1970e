//! Resolution of command-line arguments into a retag operation.
//!
//! Two argument shapes are accepted:
//!
//! - `<name> <source> <target>`
//! - `<name[:tag|@digest]> <target>`
//!
//! In the two-argument shape the combined string is split first and both
//! halves are canonicalized afterwards. Tag characters such as `.` and `-` can
//! sit on either side of the split point, so the split never validates
//! anything by itself.

use crate::error::{Result, RetagError};
use crate::name::ImageName;
use crate::reference::{DEFAULT_TAG, Reference, Tag};
use serde::Serialize;
use std::fmt;


/// A fully canonical retag operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// Repository, as `<org>/<repo>`.
    pub name: ImageName,
    /// Existing reference whose manifest is copied.
    pub source: Reference,
    /// New tag. Digests are content-derived and cannot be assigned.
    pub target: Tag,
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{name}{sep}{source} -> {name}:{target}",
            name = self.name,
            sep = self.source.separator(),
            source = self.source,
            target = self.target
        )
    }
}

/// Resolves raw arguments into a canonical `(name, source, target)` triple.
///
/// Validation runs name, then source, then target; the first failure is the
/// one reported.
///
/// # Examples
///
/// ```
/// use libretag::resolve;
///
/// let op = resolve(&["org/example:1.2.3", ":4.5.6"]).unwrap();
/// assert_eq!(op.name.to_string(), "org/example");
/// assert_eq!(op.source.to_string(), "1.2.3");
/// assert_eq!(op.target.to_string(), "4.5.6");
/// ```
///
/// # Errors
///
/// - [`RetagError::InvalidArguments`] for anything other than 2 or 3 arguments
/// - [`RetagError::InvalidImageName`] if the name is not `[docker.io/][org/]repo`
/// - [`RetagError::InvalidSourceReference`] if the source is neither a tag nor a digest
/// - [`RetagError::InvalidTargetReference`] if the target is not a tag
pub fn resolve<S: AsRef<str>>(args: &[S]) -> Result<Resolved> {
    let (raw_name, raw_source, raw_target) = match args {
        [name, source, target] => (
            name.as_ref(),
            source.as_ref().to_string(),
            target.as_ref(),
        ),
        [combined, target] => {
            let (name, source) = split_image_ref(combined.as_ref());
            (name, source, target.as_ref())
        }
        _ => return Err(RetagError::InvalidArguments),
    };

    let name = ImageName::canonicalize(raw_name).ok_or_else(|| RetagError::InvalidImageName {
        name: raw_name.to_string(),
    })?;

    let source = Reference::canonicalize_source(&raw_source)?;

    let target =
        Tag::canonicalize(raw_target).ok_or_else(|| RetagError::InvalidTargetReference {
            reference: raw_target.to_string(),
        })?;

    Ok(Resolved {
        name,
        source,
        target,
    })
}

/// Splits a combined image reference into its name and reference halves.
///
/// The first `@` wins over any `:`; the reference half keeps its delimiter as
/// a prefix. Without either delimiter the reference is `:latest`. Neither half
/// is canonical.
///
/// # Examples
///
/// ```
/// use libretag::resolver::split_image_ref;
///
/// assert_eq!(split_image_ref("org/app:1.0"), ("org/app", ":1.0".to_string()));
/// assert_eq!(split_image_ref("org/app"), ("org/app", ":latest".to_string()));
/// ```
pub fn split_image_ref(arg: &str) -> (&str, String) {
    if let Some((name, digest)) = arg.split_once('@') {
        return (name, format!("@{}", digest));
    }

    if let Some((name, tag)) = arg.split_once(':') {
        return (name, format!(":{}", tag));
    }

    (arg, format!(":{}", DEFAULT_TAG))
}
