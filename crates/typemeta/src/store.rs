// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host storage interface consumed by the metadata core.
//!
//! The core never owns entities or records. Every operation receives an
//! explicit store handle implementing [`MetaStore`]; [`crate::World`] is the
//! in-process implementation.

use crate::entity::Entity;
use crate::meta::{Component, MetaType, StructLayout};
use std::fmt;

/// Tag of every record kind known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Primitive,
    Member,
    Array,
    Sequence,
    MetaType,
    Component,
    StructLayout,
}

impl RecordKind {
    /// Every record kind.
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Primitive,
        RecordKind::Member,
        RecordKind::Array,
        RecordKind::Sequence,
        RecordKind::MetaType,
        RecordKind::Component,
        RecordKind::StructLayout,
    ];
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Entity/record storage as seen by the metadata core.
///
/// `*_mut` accessors follow get-or-create semantics: a missing record is
/// created in its default (uninitialized) state without notifying anyone.
/// Observers only run when [`MetaStore::modified`] is called.
pub trait MetaStore {
    /// Name of an entity, if it has one.
    fn name(&self, entity: Entity) -> Option<&str>;

    /// Full path of an entity, for diagnostics.
    fn path(&self, entity: Entity) -> String;

    /// Enclosing entity (child-of relationship).
    fn parent(&self, entity: Entity) -> Option<Entity>;

    fn meta_type(&self, entity: Entity) -> Option<MetaType>;

    fn meta_type_mut(&mut self, entity: Entity) -> &mut MetaType;

    fn component(&self, entity: Entity) -> Option<Component>;

    fn component_mut(&mut self, entity: Entity) -> &mut Component;

    fn struct_layout(&self, entity: Entity) -> Option<&StructLayout>;

    fn struct_layout_mut(&mut self, entity: Entity) -> &mut StructLayout;

    /// Signal that a record of `kind` on `entity` changed.
    fn modified(&mut self, entity: Entity, kind: RecordKind);
}
