// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reaction handlers for declaration records.
//!
//! Each handler receives a batch where `entities[i]` carries `values[i]`.
//! A failing entity is logged (by the operation that failed) and skipped;
//! the rest of the batch is still processed. Errors are returned so that
//! callers that care can inspect them.

use super::collection::{init_array, init_sequence};
use super::descriptor::{Array, Member, Primitive, Sequence};
use super::layout::add_member;
use super::registrar::{init_primitive, report};
use crate::entity::Entity;
use crate::error::MetaError;
use crate::store::MetaStore;

/// Finalize every entity of the batch as a primitive.
pub fn set_primitive<S: MetaStore + ?Sized>(
    store: &mut S,
    entities: &[Entity],
    values: &[Primitive],
) -> Vec<MetaError> {
    entities
        .iter()
        .zip(values)
        .filter_map(|(entity, value)| init_primitive(store, *entity, value.kind).err())
        .collect()
}

/// Add every member of the batch to the struct it is a child of.
pub fn set_member<S: MetaStore + ?Sized>(
    store: &mut S,
    entities: &[Entity],
    values: &[Member],
) -> Vec<MetaError> {
    let mut errors = Vec::new();
    for (entity, value) in entities.iter().zip(values) {
        let Some(parent) = store.parent(*entity) else {
            errors.push(report(MetaError::MissingParent {
                path: store.path(*entity),
            }));
            continue;
        };
        if let Err(err) = add_member(store, parent, *entity, value) {
            errors.push(err);
        }
    }
    errors
}

/// Finalize every entity of the batch as an array.
pub fn set_array<S: MetaStore + ?Sized>(
    store: &mut S,
    entities: &[Entity],
    values: &[Array],
) -> Vec<MetaError> {
    entities
        .iter()
        .zip(values)
        .filter_map(|(entity, value)| init_array(store, *entity, value).err())
        .collect()
}

/// Finalize every entity of the batch as a sequence.
pub fn set_sequence<S: MetaStore + ?Sized>(
    store: &mut S,
    entities: &[Entity],
    values: &[Sequence],
) -> Vec<MetaError> {
    entities
        .iter()
        .zip(values)
        .filter_map(|(entity, value)| init_sequence(store, *entity, value).err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{Component, MetaType, PrimitiveKind, StructLayout, TypeKind};
    use crate::World;

    #[test]
    fn test_primitive_batch_continues_after_failure() {
        let mut world = World::new();
        let a = world.entity_named("a");
        let b = world.entity_named("b");
        let c = world.entity_named("c");
        init_primitive(&mut world, b, PrimitiveKind::U8).unwrap();

        let errors = set_primitive(
            &mut world,
            &[a, b, c],
            &[
                Primitive::new(PrimitiveKind::U16),
                Primitive::new(PrimitiveKind::I64),
                Primitive::new(PrimitiveKind::F64),
            ],
        );

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), "b");
        assert_eq!(world.get::<Component>(a), Some(&Component::new(2, 2)));
        assert_eq!(world.get::<Component>(c), Some(&Component::new(8, 8)));
    }

    #[test]
    fn test_member_without_parent() {
        let mut world = World::new();
        let u8_t = world.entity_named("u8");
        init_primitive(&mut world, u8_t, PrimitiveKind::U8).unwrap();
        let orphan = world.entity_named("orphan");

        let errors = set_member(&mut world, &[orphan], &[Member::new(u8_t)]);

        assert_eq!(
            errors,
            vec![MetaError::MissingParent {
                path: "orphan".to_string()
            }]
        );
        assert!(!world.has::<StructLayout>(orphan));
    }

    #[test]
    fn test_member_batch_builds_struct() {
        let mut world = World::new();
        let u8_t = world.entity_named("u8");
        let u32_t = world.entity_named("u32");
        init_primitive(&mut world, u8_t, PrimitiveKind::U8).unwrap();
        init_primitive(&mut world, u32_t, PrimitiveKind::U32).unwrap();
        let s = world.entity_named("S");
        let a = world.child(Some(s), "a");
        let b = world.child(Some(s), "b");

        let errors = set_member(&mut world, &[a, b], &[Member::new(u8_t), Member::new(u32_t)]);

        assert!(errors.is_empty());
        assert_eq!(world.get::<Component>(s), Some(&Component::new(8, 4)));
        assert_eq!(
            world.get::<MetaType>(s).map(|m| m.kind),
            Some(TypeKind::Struct)
        );
    }

    #[test]
    fn test_array_and_sequence_batches() {
        let mut world = World::new();
        let u32_t = world.entity_named("u32");
        init_primitive(&mut world, u32_t, PrimitiveKind::U32).unwrap();
        let good = world.entity_named("good");
        let empty = world.entity_named("empty");
        let seq = world.entity_named("seq");

        let errors = set_array(
            &mut world,
            &[empty, good],
            &[Array::new(u32_t, 0), Array::new(u32_t, 3)],
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(world.get::<Component>(good), Some(&Component::new(12, 4)));

        let errors = set_sequence(&mut world, &[seq], &[Sequence::new(u32_t)]);
        assert!(errors.is_empty());
        assert_eq!(
            world.get::<MetaType>(seq).map(|m| m.kind),
            Some(TypeKind::Sequence)
        );
    }
}
