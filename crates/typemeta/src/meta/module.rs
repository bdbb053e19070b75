// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Module import: observer registration and built-in primitive types.

use super::descriptor::{Primitive, PrimitiveKind};
use super::handlers::{set_array, set_member, set_primitive, set_sequence};
use crate::entity::Entity;
use crate::store::RecordKind;
use crate::world::{OnSet, World};

const MODULE_NAME: &str = "meta";

/// Entry point of the metadata subsystem.
pub struct MetaModule;

impl MetaModule {
    /// Install the declaration handlers on `world` and register one entity
    /// per primitive kind.
    ///
    /// Importing twice is harmless: handlers are only registered once and
    /// the built-in entities are looked up again.
    pub fn import(world: &mut World) -> Builtins {
        let first = world.register_module(MODULE_NAME);
        if first {
            register_observers(world);
        }

        let scope_name = world.config().builtin_scope.clone();
        let scope = scope_name.map(|name| world.child(None, &name));

        // Field initializers run in source order, which is registration order.
        let mut register = |kind: PrimitiveKind| {
            let entity = world.child(scope, kind.name());
            if first {
                world.set(entity, Primitive::new(kind));
            }
            entity
        };
        let builtins = Builtins {
            scope,
            bool: register(PrimitiveKind::Bool),
            char: register(PrimitiveKind::Char),
            byte: register(PrimitiveKind::Byte),
            u8: register(PrimitiveKind::U8),
            u16: register(PrimitiveKind::U16),
            u32: register(PrimitiveKind::U32),
            u64: register(PrimitiveKind::U64),
            uptr: register(PrimitiveKind::UPtr),
            i8: register(PrimitiveKind::I8),
            i16: register(PrimitiveKind::I16),
            i32: register(PrimitiveKind::I32),
            i64: register(PrimitiveKind::I64),
            iptr: register(PrimitiveKind::IPtr),
            f32: register(PrimitiveKind::F32),
            f64: register(PrimitiveKind::F64),
            string: register(PrimitiveKind::String),
            entity: register(PrimitiveKind::Entity),
        };
        log::debug!(
            "[meta] {} builtin primitives under '{}'",
            PrimitiveKind::ALL.len(),
            scope.map(|s| world.path(s)).unwrap_or_default()
        );
        builtins
    }
}

fn register_observers(world: &mut World) {
    world.observe(RecordKind::Primitive, |world, batch| {
        if let OnSet::Primitive(entities, values) = batch {
            set_primitive(world, entities, values);
        }
    });
    world.observe(RecordKind::Member, |world, batch| {
        if let OnSet::Member(entities, values) = batch {
            set_member(world, entities, values);
        }
    });
    world.observe(RecordKind::Array, |world, batch| {
        if let OnSet::Array(entities, values) = batch {
            set_array(world, entities, values);
        }
    });
    world.observe(RecordKind::Sequence, |world, batch| {
        if let OnSet::Sequence(entities, values) = batch {
            set_sequence(world, entities, values);
        }
    });
}

/// Entities of the built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtins {
    /// Parent of the built-in entities (`None` = root).
    pub scope: Option<Entity>,
    pub bool: Entity,
    pub char: Entity,
    pub byte: Entity,
    pub u8: Entity,
    pub u16: Entity,
    pub u32: Entity,
    pub u64: Entity,
    pub uptr: Entity,
    pub i8: Entity,
    pub i16: Entity,
    pub i32: Entity,
    pub i64: Entity,
    pub iptr: Entity,
    pub f32: Entity,
    pub f64: Entity,
    pub string: Entity,
    pub entity: Entity,
}

impl Builtins {
    /// Entity registered for `kind`.
    pub fn get(&self, kind: PrimitiveKind) -> Entity {
        match kind {
            PrimitiveKind::Bool => self.bool,
            PrimitiveKind::Char => self.char,
            PrimitiveKind::Byte => self.byte,
            PrimitiveKind::U8 => self.u8,
            PrimitiveKind::U16 => self.u16,
            PrimitiveKind::U32 => self.u32,
            PrimitiveKind::U64 => self.u64,
            PrimitiveKind::UPtr => self.uptr,
            PrimitiveKind::I8 => self.i8,
            PrimitiveKind::I16 => self.i16,
            PrimitiveKind::I32 => self.i32,
            PrimitiveKind::I64 => self.i64,
            PrimitiveKind::IPtr => self.iptr,
            PrimitiveKind::F32 => self.f32,
            PrimitiveKind::F64 => self.f64,
            PrimitiveKind::String => self.string,
            PrimitiveKind::Entity => self.entity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetaConfig;
    use crate::meta::{Component, MetaType, TypeKind};

    #[test]
    fn test_import_registers_every_primitive() {
        let mut world = World::new();
        let builtins = MetaModule::import(&mut world);

        for kind in PrimitiveKind::ALL {
            let e = builtins.get(kind);
            assert_eq!(world.name(e), Some(kind.name()));
            assert_eq!(
                world.get::<MetaType>(e).map(|m| m.kind),
                Some(TypeKind::Primitive(kind))
            );
            assert_eq!(
                world.get::<Component>(e),
                Some(&Component::new(kind.size(), kind.alignment()))
            );
        }
        assert_eq!(world.lookup("meta.f32"), Some(builtins.f32));
    }

    #[test]
    fn test_import_twice() {
        let mut world = World::new();
        let first = MetaModule::import(&mut world);
        let observers = world.observers().len();
        let second = MetaModule::import(&mut world);

        assert_eq!(first, second);
        assert_eq!(world.observers().len(), observers);
    }

    #[test]
    fn test_import_at_root() {
        let mut world = World::with_config(MetaConfig::default().with_builtin_scope(None));
        let builtins = MetaModule::import(&mut world);

        assert_eq!(builtins.scope, None);
        assert_eq!(world.path(builtins.u64), "u64");
        assert_eq!(world.parent(builtins.u64), None);
    }
}
