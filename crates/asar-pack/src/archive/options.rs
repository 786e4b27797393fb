//! Pack options and size limits.

use serde::Deserialize;

/// Largest byte count a reader of the format can address exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Options for a pack call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Compute integrity records for every member.
    pub integrity: bool,
    /// Ceiling on the cumulative payload size.
    pub max_archive_bytes: u64,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            integrity: true,
            max_archive_bytes: MAX_SAFE_INTEGER,
        }
    }
}

/// Partial overrides for `PackOptions`. Used for CLI/config JSON parsing.
/// Unknown keys cause deserialization to fail (deny_unknown_fields).
/// Merge with `PackOptions::default().apply(overrides)`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackOptionsOverrides {
    pub integrity: Option<bool>,
    pub max_archive_bytes: Option<u64>,
}

impl PackOptions {
    /// Apply overrides onto these options. Only `Some` values override.
    ///
    /// `max_archive_bytes` never rises above [`MAX_SAFE_INTEGER`].
    pub fn apply(self, overrides: PackOptionsOverrides) -> Self {
        Self {
            integrity: overrides.integrity.unwrap_or(self.integrity),
            max_archive_bytes: overrides
                .max_archive_bytes
                .unwrap_or(self.max_archive_bytes)
                .min(MAX_SAFE_INTEGER),
        }
    }

    pub fn without_integrity(mut self) -> Self {
        self.integrity = false;
        self
    }
}
