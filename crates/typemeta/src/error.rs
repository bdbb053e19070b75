// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type for type registration and layout computation.

use crate::meta::TypeKind;

/// Errors reported while finalizing type metadata.
///
/// Every variant carries the full path of the offending entity so that the
/// message stays meaningful after it is logged away from the call site.
///
/// # Example
///
/// ```rust
/// use typemeta::{meta, MetaError, MetaModule, World};
///
/// let mut world = World::new();
/// let builtins = MetaModule::import(&mut world);
/// let arr = world.entity_named("Empty");
///
/// let res = meta::init_array(&mut world, arr, &meta::Array::new(builtins.u32, 0));
/// assert!(matches!(res, Err(MetaError::ZeroSizeOrAlignment { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    // ========================================================================
    // Conflicts with previously finalized metadata
    // ========================================================================
    /// Type was already finalized with a different kind.
    KindConflict {
        path: String,
        existing: TypeKind,
        requested: TypeKind,
    },
    /// Type was already finalized with a different size.
    SizeConflict {
        path: String,
        existing: usize,
        requested: usize,
    },
    /// Type was already finalized with a different alignment.
    AlignmentConflict {
        path: String,
        existing: usize,
        requested: usize,
    },

    // ========================================================================
    // Unresolvable declarations
    // ========================================================================
    /// Array, sequence or member references an unset type, or a type
    /// without size/alignment metadata.
    MissingElementType { path: String },
    /// Element or aggregate resolves to a zero size or alignment.
    ZeroSizeOrAlignment { path: String },
    /// Member declared on an entity without an enclosing struct.
    MissingParent { path: String },
    /// Element count, member offset or padding exceeds the address space.
    SizeOverflow { path: String },

    // ========================================================================
    // Struct descriptor errors
    // ========================================================================
    /// Member descriptor at `index` has a type but no name.
    MissingMemberName { path: String, index: usize },
    /// Struct descriptor declares no members.
    EmptyStruct { path: String },
}

impl MetaError {
    /// Path of the entity the error was reported for.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            MetaError::KindConflict { path, .. }
            | MetaError::SizeConflict { path, .. }
            | MetaError::AlignmentConflict { path, .. }
            | MetaError::MissingElementType { path }
            | MetaError::ZeroSizeOrAlignment { path }
            | MetaError::MissingParent { path }
            | MetaError::SizeOverflow { path }
            | MetaError::MissingMemberName { path, .. }
            | MetaError::EmptyStruct { path } => path,
        }
    }
}

impl std::fmt::Display for MetaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaError::KindConflict {
                path,
                existing,
                requested,
            } => write!(
                f,
                "type '{}' reregistered with different kind ({} -> {})",
                path, existing, requested
            ),
            MetaError::SizeConflict {
                path,
                existing,
                requested,
            } => write!(
                f,
                "type '{}' reregistered with different size ({} -> {})",
                path, existing, requested
            ),
            MetaError::AlignmentConflict {
                path,
                existing,
                requested,
            } => write!(
                f,
                "type '{}' reregistered with different alignment ({} -> {})",
                path, existing, requested
            ),
            MetaError::MissingElementType { path } => {
                write!(f, "'{}' has no (known) element type", path)
            }
            MetaError::ZeroSizeOrAlignment { path } => {
                write!(f, "'{}' has 0 size/alignment", path)
            }
            MetaError::MissingParent { path } => write!(f, "missing parent for member '{}'", path),
            MetaError::SizeOverflow { path } => write!(f, "size of '{}' overflows", path),
            MetaError::MissingMemberName { path, index } => write!(
                f,
                "member {} of struct '{}' does not have a name",
                index, path
            ),
            MetaError::EmptyStruct { path } => write!(f, "struct '{}' has no members", path),
        }
    }
}

impl std::error::Error for MetaError {}

/// Convenient alias for results of metadata operations.
pub type Result<T> = core::result::Result<T, MetaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::PrimitiveKind;

    #[test]
    fn test_display_names_entity() {
        let err = MetaError::SizeConflict {
            path: "app.Position".to_string(),
            existing: 8,
            requested: 12,
        };
        assert_eq!(
            err.to_string(),
            "type 'app.Position' reregistered with different size (8 -> 12)"
        );
        assert_eq!(err.path(), "app.Position");
    }

    #[test]
    fn test_kind_conflict_display() {
        let err = MetaError::KindConflict {
            path: "T".to_string(),
            existing: TypeKind::Primitive(PrimitiveKind::I32),
            requested: TypeKind::Struct,
        };
        assert_eq!(
            err.to_string(),
            "type 'T' reregistered with different kind (primitive i32 -> struct)"
        );
    }

    #[test]
    fn test_size_overflow_display() {
        let err = MetaError::SizeOverflow {
            path: "Huge".to_string(),
        };
        assert_eq!(err.to_string(), "size of 'Huge' overflows");
        assert_eq!(err.path(), "Huge");
    }
}
