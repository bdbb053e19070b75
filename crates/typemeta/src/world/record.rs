// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed record storage.

use crate::entity::Entity;
use crate::meta::{Array, Component, Member, MetaType, Primitive, Sequence, StructLayout};
use crate::store::RecordKind;
use std::collections::HashMap;

/// One map per record kind.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct Records {
    primitive: HashMap<Entity, Primitive>,
    member: HashMap<Entity, Member>,
    array: HashMap<Entity, Array>,
    sequence: HashMap<Entity, Sequence>,
    meta_type: HashMap<Entity, MetaType>,
    component: HashMap<Entity, Component>,
    struct_layout: HashMap<Entity, StructLayout>,
}

impl Records {
    /// Destroy every record attached to `entity`.
    pub(crate) fn remove_all(&mut self, entity: Entity) {
        self.primitive.remove(&entity);
        self.member.remove(&entity);
        self.array.remove(&entity);
        self.sequence.remove(&entity);
        self.meta_type.remove(&entity);
        self.component.remove(&entity);
        self.struct_layout.remove(&entity);
    }

    pub(crate) fn has(&self, entity: Entity, kind: RecordKind) -> bool {
        match kind {
            RecordKind::Primitive => self.primitive.contains_key(&entity),
            RecordKind::Member => self.member.contains_key(&entity),
            RecordKind::Array => self.array.contains_key(&entity),
            RecordKind::Sequence => self.sequence.contains_key(&entity),
            RecordKind::MetaType => self.meta_type.contains_key(&entity),
            RecordKind::Component => self.component.contains_key(&entity),
            RecordKind::StructLayout => self.struct_layout.contains_key(&entity),
        }
    }
}

/// A value that can be attached to an entity.
pub trait Record: Sized + 'static {
    /// Tag used to route notifications.
    const KIND: RecordKind;

    #[doc(hidden)]
    fn storage(records: &Records) -> &HashMap<Entity, Self>;

    #[doc(hidden)]
    fn storage_mut(records: &mut Records) -> &mut HashMap<Entity, Self>;
}

macro_rules! impl_record {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl Record for $ty {
            const KIND: RecordKind = RecordKind::$kind;

            fn storage(records: &Records) -> &HashMap<Entity, Self> {
                &records.$field
            }

            fn storage_mut(records: &mut Records) -> &mut HashMap<Entity, Self> {
                &mut records.$field
            }
        }
    };
}

impl_record!(Primitive, Primitive, primitive);
impl_record!(Member, Member, member);
impl_record!(Array, Array, array);
impl_record!(Sequence, Sequence, sequence);
impl_record!(MetaType, MetaType, meta_type);
impl_record!(Component, Component, component);
impl_record!(StructLayout, StructLayout, struct_layout);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_all_clears_every_kind() {
        let e = Entity::from_raw(1).unwrap();
        let mut records = Records::default();
        Component::storage_mut(&mut records).insert(e, Component::new(4, 4));
        MetaType::storage_mut(&mut records).insert(e, MetaType::default());
        StructLayout::storage_mut(&mut records).insert(e, StructLayout::new());

        assert!(records.has(e, RecordKind::Component));
        records.remove_all(e);
        for kind in RecordKind::ALL {
            assert!(!records.has(e, kind), "{} survived", kind);
        }
    }
}
