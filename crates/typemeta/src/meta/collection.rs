// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Array and sequence initializers.

use super::descriptor::{Array, Sequence, TypeKind};
use super::registrar::{
    check_component, check_kind, ensure_type_records, init_component, init_type, report,
};
use crate::config::{SEQUENCE_HANDLE_ALIGN, SEQUENCE_HANDLE_SIZE};
use crate::entity::Entity;
use crate::error::{MetaError, Result};
use crate::store::MetaStore;

/// Finalize `entity` as a fixed-size array.
///
/// `size = element.size * count`, `alignment = element.alignment`.
pub fn init_array<S: MetaStore + ?Sized>(
    store: &mut S,
    entity: Entity,
    array: &Array,
) -> Result<()> {
    let Some(elem_type) = array.ty else {
        return Err(report(MetaError::MissingElementType {
            path: store.path(entity),
        }));
    };
    if array.count == 0 {
        return Err(report(MetaError::ZeroSizeOrAlignment {
            path: store.path(entity),
        }));
    }
    check_kind(store, entity, TypeKind::Array)?;

    let Some(elem) = store.component(elem_type) else {
        return Err(report(MetaError::MissingElementType {
            path: store.path(entity),
        }));
    };
    if !elem.is_finalized() {
        return Err(report(MetaError::ZeroSizeOrAlignment {
            path: store.path(entity),
        }));
    }

    let Some(size) = elem.size.checked_mul(array.count as usize) else {
        return Err(report(MetaError::SizeOverflow {
            path: store.path(entity),
        }));
    };
    check_component(store, entity, size, elem.alignment)?;
    ensure_type_records(store, entity);

    let changed = init_component(store, entity, size, elem.alignment)?;
    init_type(store, entity, TypeKind::Array, changed)
}

/// Finalize `entity` as a sequence.
///
/// The layout is that of the opaque buffer handle, whatever the element.
pub fn init_sequence<S: MetaStore + ?Sized>(
    store: &mut S,
    entity: Entity,
    sequence: &Sequence,
) -> Result<()> {
    if sequence.ty.is_none() {
        return Err(report(MetaError::MissingElementType {
            path: store.path(entity),
        }));
    }
    check_kind(store, entity, TypeKind::Sequence)?;
    check_component(store, entity, SEQUENCE_HANDLE_SIZE, SEQUENCE_HANDLE_ALIGN)?;
    ensure_type_records(store, entity);

    let changed = init_component(store, entity, SEQUENCE_HANDLE_SIZE, SEQUENCE_HANDLE_ALIGN)?;
    init_type(store, entity, TypeKind::Sequence, changed)
}
