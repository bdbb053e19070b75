// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Configuration for the metadata world.
//!
//! - **Level 1 (Static)**: compile-time constants (handle layouts, limits)
//! - **Level 2 (Dynamic)**: [`MetaConfig`], passed to `World::with_config`
//!
//! # Example
//!
//! ```rust
//! use typemeta::{MetaConfig, World};
//!
//! let config = MetaConfig::default()
//!     .with_builtin_scope(Some("lang"))
//!     .with_path_separator("::");
//! let world = World::with_config(config);
//! assert_eq!(world.config().path_separator, "::");
//! ```

// =======================================================================
// Handle layouts
// =======================================================================

/// Size of the opaque handle a sequence instance stores (pointer to a
/// resizable buffer). Independent of the element type.
pub const SEQUENCE_HANDLE_SIZE: usize = std::mem::size_of::<*const u8>();

/// Alignment of the opaque sequence handle.
pub const SEQUENCE_HANDLE_ALIGN: usize = std::mem::align_of::<*const u8>();

// =======================================================================
// Limits and defaults
// =======================================================================

/// Maximum number of members accepted by a single struct descriptor.
pub const MEMBER_DESC_CACHE_SIZE: usize = 32;

/// Default separator between entity names in diagnostic paths.
pub const DEFAULT_PATH_SEPARATOR: &str = ".";

/// Default scope under which built-in primitive types are created.
pub const DEFAULT_BUILTIN_SCOPE: &str = "meta";

/// Runtime configuration of a [`crate::World`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaConfig {
    /// Name of the parent entity of built-in primitives (`None` = root).
    pub builtin_scope: Option<String>,
    /// Separator used when rendering entity paths.
    pub path_separator: String,
    /// Maximum members per struct descriptor (clamped to at least 1).
    pub member_desc_limit: usize,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            builtin_scope: Some(DEFAULT_BUILTIN_SCOPE.to_string()),
            path_separator: DEFAULT_PATH_SEPARATOR.to_string(),
            member_desc_limit: MEMBER_DESC_CACHE_SIZE,
        }
    }
}

impl MetaConfig {
    /// Set the scope of built-in primitives.
    #[must_use]
    pub fn with_builtin_scope(mut self, scope: Option<&str>) -> Self {
        self.builtin_scope = scope.map(str::to_string);
        self
    }

    /// Set the path separator.
    #[must_use]
    pub fn with_path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    /// Set the member limit of struct descriptors.
    #[must_use]
    pub fn with_member_desc_limit(mut self, limit: usize) -> Self {
        self.member_desc_limit = limit.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = MetaConfig::default();
        assert_eq!(cfg.builtin_scope.as_deref(), Some("meta"));
        assert_eq!(cfg.path_separator, ".");
        assert_eq!(cfg.member_desc_limit, MEMBER_DESC_CACHE_SIZE);
    }

    #[test]
    fn test_member_limit_clamped() {
        let cfg = MetaConfig::default().with_member_desc_limit(0);
        assert_eq!(cfg.member_desc_limit, 1);
    }

    #[test]
    fn test_sequence_handle_is_pointer_sized() {
        assert_eq!(SEQUENCE_HANDLE_SIZE, std::mem::size_of::<usize>());
        assert!(SEQUENCE_HANDLE_ALIGN.is_power_of_two());
    }
}
