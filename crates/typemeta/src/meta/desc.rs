// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor-based declaration helpers.
//!
//! These create (or reuse) the type entity, attach the declaration records
//! and let the registered handlers finalize the type. Without
//! [`super::MetaModule::import`] the declarations are stored but nothing
//! reacts to them.
//!
//! # Example
//!
//! ```rust
//! use typemeta::meta::{self, Component, StructDesc};
//! use typemeta::{MetaModule, World};
//!
//! let mut world = World::new();
//! let b = MetaModule::import(&mut world);
//!
//! let point = meta::struct_init(
//!     &mut world,
//!     &StructDesc::new("Point").member("x", b.f32).member("y", b.f32),
//! )
//! .unwrap();
//! assert_eq!(world.get::<Component>(point), Some(&Component::new(8, 4)));
//! ```

use super::descriptor::{Array, Member, Sequence};
use super::registrar::report;
use crate::entity::Entity;
use crate::error::{MetaError, Result};
use crate::world::World;

/// Target entity of a descriptor: an explicit entity, a name looked up in
/// the current scope, or a fresh anonymous entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityDesc {
    pub entity: Option<Entity>,
    pub name: Option<String>,
}

impl EntityDesc {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            entity: None,
            name: Some(name.into()),
        }
    }

    pub fn existing(entity: Entity) -> Self {
        Self {
            entity: Some(entity),
            name: None,
        }
    }

    fn resolve(&self, world: &mut World) -> Entity {
        match (self.entity, self.name.as_deref()) {
            (Some(entity), _) => entity,
            (None, Some(name)) => world.entity_named(name),
            (None, None) => world.entity(),
        }
    }
}

/// Array declaration descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayDesc {
    pub entity: EntityDesc,
    pub ty: Option<Entity>,
    pub count: u32,
}

impl ArrayDesc {
    pub fn new(ty: Entity, count: u32) -> Self {
        Self {
            entity: EntityDesc::default(),
            ty: Some(ty),
            count,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.entity = EntityDesc::named(name);
        self
    }

    #[must_use]
    pub fn on(mut self, entity: Entity) -> Self {
        self.entity = EntityDesc::existing(entity);
        self
    }
}

/// Sequence declaration descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceDesc {
    pub entity: EntityDesc,
    pub ty: Option<Entity>,
}

impl SequenceDesc {
    pub fn new(ty: Entity) -> Self {
        Self {
            entity: EntityDesc::default(),
            ty: Some(ty),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.entity = EntityDesc::named(name);
        self
    }

    #[must_use]
    pub fn on(mut self, entity: Entity) -> Self {
        self.entity = EntityDesc::existing(entity);
        self
    }
}

/// One member of a [`StructDesc`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDesc {
    pub name: Option<String>,
    /// An unset type terminates the member list.
    pub ty: Option<Entity>,
    pub count: u32,
}

/// Struct declaration descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructDesc {
    pub entity: EntityDesc,
    pub members: Vec<MemberDesc>,
}

impl StructDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            entity: EntityDesc::named(name),
            members: Vec::new(),
        }
    }

    /// Descriptor targeting an existing entity.
    pub fn on(entity: Entity) -> Self {
        Self {
            entity: EntityDesc::existing(entity),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn member(self, name: impl Into<String>, ty: Entity) -> Self {
        self.member_array(name, ty, 0)
    }

    /// Inline array member of `count` elements.
    #[must_use]
    pub fn member_array(mut self, name: impl Into<String>, ty: Entity, count: u32) -> Self {
        self.members.push(MemberDesc {
            name: Some(name.into()),
            ty: Some(ty),
            count,
        });
        self
    }
}

/// Create (or reuse) the entity of `desc` and declare it as an array.
pub fn array_init(world: &mut World, desc: &ArrayDesc) -> Entity {
    let entity = desc.entity.resolve(world);
    world.set(
        entity,
        Array {
            ty: desc.ty,
            count: desc.count,
        },
    );
    entity
}

/// Create (or reuse) the entity of `desc` and declare it as a sequence.
pub fn sequence_init(world: &mut World, desc: &SequenceDesc) -> Entity {
    let entity = desc.entity.resolve(world);
    world.set(entity, Sequence { ty: desc.ty });
    entity
}

/// Create (or reuse) the entity of `desc` and declare one child member per
/// member descriptor.
///
/// Members are read up to the first one without a type, and never past
/// `MetaConfig::member_desc_limit`. A member without a name, or a
/// descriptor that yields no member at all, deletes the struct entity.
/// Failures reported by the member handlers are logged but do not fail
/// the call.
pub fn struct_init(world: &mut World, desc: &StructDesc) -> Result<Entity> {
    let strct = desc.entity.resolve(world);
    let limit = world.config().member_desc_limit;
    if desc.members.len() > limit {
        log::debug!(
            "[meta] struct '{}' declares {} members, only {} are read",
            world.path(strct),
            desc.members.len(),
            limit
        );
    }

    let previous_scope = world.set_scope(Some(strct));
    let mut declared = 0;
    for (index, member) in desc.members.iter().take(limit).enumerate() {
        let Some(ty) = member.ty else {
            break;
        };
        let Some(name) = member.name.as_deref() else {
            world.set_scope(previous_scope);
            let err = report(MetaError::MissingMemberName {
                path: world.path(strct),
                index,
            });
            world.delete(strct);
            return Err(err);
        };

        let entity = world.entity_named(name);
        world.set(
            entity,
            Member {
                ty: Some(ty),
                count: member.count,
            },
        );
        declared += 1;
    }
    world.set_scope(previous_scope);

    if declared == 0 {
        let err = report(MetaError::EmptyStruct {
            path: world.path(strct),
        });
        world.delete(strct);
        return Err(err);
    }
    Ok(strct)
}
