use crate::format::Formattable;
use serde::Serialize;

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;

/// Versions of the binary and the library it was built against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub retag: &'static str,
    pub libretag: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            retag: env!("CARGO_PKG_VERSION"),
            libretag: libretag::version(),
        }
    }
}

impl Formattable for VersionInfo {
    fn format_pretty(&self) -> String {
        format!("retag {} (libretag {})", self.retag, self.libretag)
    }
}
