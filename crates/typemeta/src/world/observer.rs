// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Observer table: synchronous on-set notifications per record kind.
//!
//! Observers are registered once (usually at module import) and invoked in
//! registration order every time a record of their kind is set or marked
//! modified. The batch is delivered as an [`OnSet`] tagged by record kind,
//! giving direct access to the values that were just set.

use super::World;
use crate::entity::Entity;
use crate::meta::{Array, Component, Member, MetaType, Primitive, Sequence};
use crate::store::RecordKind;
use std::fmt;
use std::rc::Rc;

/// Batch of entities whose record of one kind was just set.
///
/// `entities[i]` carries `values[i]`.
#[derive(Debug, Clone, Copy)]
pub enum OnSet<'a> {
    Primitive(&'a [Entity], &'a [Primitive]),
    Member(&'a [Entity], &'a [Member]),
    Array(&'a [Entity], &'a [Array]),
    Sequence(&'a [Entity], &'a [Sequence]),
    /// Finalize signal: a type kind was confirmed.
    MetaType(&'a [Entity], &'a [MetaType]),
    Component(&'a [Entity], &'a [Component]),
    /// Struct layouts are not copied into the batch; read them from the world.
    StructLayout(&'a [Entity]),
}

impl OnSet<'_> {
    pub fn kind(&self) -> RecordKind {
        match self {
            OnSet::Primitive(..) => RecordKind::Primitive,
            OnSet::Member(..) => RecordKind::Member,
            OnSet::Array(..) => RecordKind::Array,
            OnSet::Sequence(..) => RecordKind::Sequence,
            OnSet::MetaType(..) => RecordKind::MetaType,
            OnSet::Component(..) => RecordKind::Component,
            OnSet::StructLayout(..) => RecordKind::StructLayout,
        }
    }

    /// Entities in the batch.
    pub fn entities(&self) -> &[Entity] {
        match self {
            OnSet::Primitive(e, _)
            | OnSet::Member(e, _)
            | OnSet::Array(e, _)
            | OnSet::Sequence(e, _)
            | OnSet::MetaType(e, _)
            | OnSet::Component(e, _)
            | OnSet::StructLayout(e) => e,
        }
    }
}

/// Observer callback.
pub type ObserverFn = Rc<dyn Fn(&mut World, &OnSet<'_>)>;

/// Handle returned by [`ObserverTable::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

/// Registration table binding callbacks to record kinds.
#[derive(Default, Clone)]
pub struct ObserverTable {
    entries: Vec<(ObserverId, RecordKind, ObserverFn)>,
    next_id: usize,
}

impl ObserverTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `callback` to `kind`.
    pub fn register(&mut self, kind: RecordKind, callback: ObserverFn) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, kind, callback));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn has(&self, kind: RecordKind) -> bool {
        self.entries.iter().any(|(_, k, _)| *k == kind)
    }

    /// Callbacks bound to `kind`, in registration order.
    ///
    /// Returned by value so the world can be borrowed mutably while they run.
    pub fn callbacks(&self, kind: RecordKind) -> Vec<ObserverFn> {
        self.entries
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, cb)| Rc::clone(cb))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ObserverTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, kind, _)| (id, kind)))
            .finish()
    }
}
