// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Write-once finalization of type kinds and size/alignment records, and
//! registration of primitive types.

use super::descriptor::{Component, PrimitiveKind, TypeKind};
use crate::entity::Entity;
use crate::error::{MetaError, Result};
use crate::store::{MetaStore, RecordKind};

/// Log an error at the point it is detected and hand it back.
pub(crate) fn report(err: MetaError) -> MetaError {
    log::error!("[meta] {}", err);
    err
}

/// Create the type records of `entity` in their uninitialized state.
pub(crate) fn ensure_type_records<S: MetaStore + ?Sized>(store: &mut S, entity: Entity) {
    store.meta_type_mut(entity);
    store.component_mut(entity);
}

/// Fail if `entity` already has a kind other than `kind`.
pub fn check_kind<S: MetaStore + ?Sized>(
    store: &S,
    entity: Entity,
    kind: TypeKind,
) -> Result<()> {
    let existing = store.meta_type(entity).unwrap_or_default().kind;
    if existing != TypeKind::Uninitialized && existing != kind {
        return Err(report(MetaError::KindConflict {
            path: store.path(entity),
            existing,
            requested: kind,
        }));
    }
    Ok(())
}

/// Fail if the size/alignment record of `entity` holds different nonzero
/// values than the requested ones.
pub fn check_component<S: MetaStore + ?Sized>(
    store: &S,
    entity: Entity,
    size: usize,
    alignment: usize,
) -> Result<()> {
    let existing = store.component(entity).unwrap_or_default();
    if existing.size != 0 && existing.size != size {
        return Err(report(MetaError::SizeConflict {
            path: store.path(entity),
            existing: existing.size,
            requested: size,
        }));
    }
    if existing.alignment != 0 && existing.alignment != alignment {
        return Err(report(MetaError::AlignmentConflict {
            path: store.path(entity),
            existing: existing.alignment,
            requested: alignment,
        }));
    }
    Ok(())
}

/// Set the size/alignment record of `entity` (write-once-then-checked).
///
/// Setting the same values again is a no-op. Returns whether the record
/// changed.
pub fn init_component<S: MetaStore + ?Sized>(
    store: &mut S,
    entity: Entity,
    size: usize,
    alignment: usize,
) -> Result<bool> {
    debug_assert!(size != 0 && alignment != 0, "callers reject zero layouts");
    check_component(store, entity, size, alignment)?;

    let component = store.component_mut(entity);
    let value = Component::new(size, alignment);
    if *component == value {
        return Ok(false);
    }
    *component = value;
    store.modified(entity, RecordKind::Component);
    Ok(true)
}

/// Confirm the kind of `entity`.
///
/// The finalize signal (a `MetaType` modification) is emitted when the kind
/// is set for the first time or when `layout_changed` says the records it
/// describes were rewritten. It is emitted last so that listeners observe
/// consistent records.
pub fn init_type<S: MetaStore + ?Sized>(
    store: &mut S,
    entity: Entity,
    kind: TypeKind,
    layout_changed: bool,
) -> Result<()> {
    debug_assert!(kind != TypeKind::Uninitialized);
    check_kind(store, entity, kind)?;

    let meta_type = store.meta_type_mut(entity);
    let fresh = meta_type.kind != kind;
    meta_type.kind = kind;

    if fresh || layout_changed {
        log::debug!("[meta] finalized {} '{}'", kind, store.path(entity));
        store.modified(entity, RecordKind::MetaType);
    }
    Ok(())
}

/// Finalize `entity` as a primitive of `kind` with its native layout.
///
/// Idempotent for the same kind. A different kind on an already finalized
/// entity is a [`MetaError::KindConflict`], even when both kinds share a
/// layout, and leaves every record untouched.
pub fn init_primitive<S: MetaStore + ?Sized>(
    store: &mut S,
    entity: Entity,
    kind: PrimitiveKind,
) -> Result<()> {
    let type_kind = TypeKind::Primitive(kind);
    check_kind(store, entity, type_kind)?;
    check_component(store, entity, kind.size(), kind.alignment())?;
    ensure_type_records(store, entity);

    let changed = init_component(store, entity, kind.size(), kind.alignment())?;
    init_type(store, entity, type_kind, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{Component, MetaType};
    use crate::World;

    #[test]
    fn test_init_component_write_once() {
        let mut world = World::new();
        let e = world.entity_named("T");

        assert_eq!(init_component(&mut world, e, 8, 4), Ok(true));
        assert_eq!(init_component(&mut world, e, 8, 4), Ok(false));

        let err = init_component(&mut world, e, 12, 4).unwrap_err();
        assert!(matches!(
            err,
            MetaError::SizeConflict {
                existing: 8,
                requested: 12,
                ..
            }
        ));
        let err = init_component(&mut world, e, 8, 8).unwrap_err();
        assert!(matches!(err, MetaError::AlignmentConflict { .. }));

        assert_eq!(world.get::<Component>(e), Some(&Component::new(8, 4)));
    }

    #[test]
    fn test_init_type_kind_conflict() {
        let mut world = World::new();
        let e = world.entity_named("T");

        init_type(&mut world, e, TypeKind::Array, false).unwrap();
        init_type(&mut world, e, TypeKind::Array, false).unwrap();
        let err = init_type(&mut world, e, TypeKind::Struct, false).unwrap_err();

        assert_eq!(err.path(), "T");
        assert_eq!(
            world.get::<MetaType>(e).map(|m| m.kind),
            Some(TypeKind::Array)
        );
    }

    #[test]
    fn test_init_primitive_sets_native_layout() {
        let mut world = World::new();
        let e = world.entity_named("my_u16");

        init_primitive(&mut world, e, PrimitiveKind::U16).unwrap();

        assert_eq!(world.get::<Component>(e), Some(&Component::new(2, 2)));
        assert_eq!(
            world.get::<MetaType>(e).map(|m| m.kind),
            Some(TypeKind::Primitive(PrimitiveKind::U16))
        );
    }

    #[test]
    fn test_init_primitive_conflicting_kind_leaves_records() {
        let mut world = World::new();
        let e = world.entity_named("small");

        init_primitive(&mut world, e, PrimitiveKind::U8).unwrap();
        let err = init_primitive(&mut world, e, PrimitiveKind::U64).unwrap_err();

        assert!(matches!(err, MetaError::KindConflict { .. }));
        assert_eq!(world.get::<Component>(e), Some(&Component::new(1, 1)));
    }

    #[test]
    fn test_init_primitive_same_layout_different_kind() {
        let mut world = World::new();
        let e = world.entity_named("word");

        init_primitive(&mut world, e, PrimitiveKind::U32).unwrap();
        let err = init_primitive(&mut world, e, PrimitiveKind::F32).unwrap_err();

        assert_eq!(
            err,
            MetaError::KindConflict {
                path: "word".to_string(),
                existing: TypeKind::Primitive(PrimitiveKind::U32),
                requested: TypeKind::Primitive(PrimitiveKind::F32),
            }
        );
    }

    #[test]
    fn test_check_kind_on_unknown_entity() {
        let mut world = World::new();
        let e = world.entity();
        assert!(check_kind(&world, e, TypeKind::Struct).is_ok());
        assert!(!world.has::<MetaType>(e));
    }
}
