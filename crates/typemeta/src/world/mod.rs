// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-process entity/record store with synchronous observers.
//!
//! `World` is the host the metadata core runs against: it allocates
//! entities, keeps their names and parents, stores one record per kind per
//! entity, and dispatches [`OnSet`] notifications to registered observers.
//!
//! # Example
//!
//! ```rust
//! use typemeta::meta::{Component, Member};
//! use typemeta::{MetaModule, World};
//!
//! let mut world = World::new();
//! let builtins = MetaModule::import(&mut world);
//!
//! let point = world.entity_named("Point");
//! let x = world.child(Some(point), "x");
//! let y = world.child(Some(point), "y");
//! world.set(x, Member::new(builtins.f32));
//! world.set(y, Member::new(builtins.f32));
//!
//! assert_eq!(world.get::<Component>(point), Some(&Component::new(8, 4)));
//! ```

mod observer;
mod record;

pub use observer::{ObserverFn, ObserverId, ObserverTable, OnSet};
pub use record::{Record, Records};

use crate::config::MetaConfig;
use crate::entity::Entity;
use crate::meta::{Array, Component, Member, MetaType, Primitive, Sequence, StructLayout};
use crate::store::{MetaStore, RecordKind};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroU64;
use std::rc::Rc;

#[derive(Debug, Default)]
struct EntityInfo {
    name: Option<String>,
    parent: Option<Entity>,
}

/// Entity/record store.
#[derive(Debug)]
pub struct World {
    config: MetaConfig,
    next_id: u64,
    entities: HashMap<Entity, EntityInfo>,
    /// Children per parent (`None` = root), in creation order.
    children: HashMap<Option<Entity>, Vec<Entity>>,
    records: Records,
    observers: ObserverTable,
    scope: Option<Entity>,
    modules: HashSet<&'static str>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_config(MetaConfig::default())
    }

    pub fn with_config(config: MetaConfig) -> Self {
        Self {
            config,
            next_id: 0,
            entities: HashMap::new(),
            children: HashMap::new(),
            records: Records::default(),
            observers: ObserverTable::new(),
            scope: None,
            modules: HashSet::new(),
        }
    }

    pub fn config(&self) -> &MetaConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------------

    /// Create an anonymous entity in the current scope.
    pub fn entity(&mut self) -> Entity {
        self.create(self.scope, None)
    }

    /// Look up `name` in the current scope, creating the entity if needed.
    pub fn entity_named(&mut self, name: &str) -> Entity {
        self.child(self.scope, name)
    }

    /// Look up `name` under `parent` (`None` = root), creating it if needed.
    pub fn child(&mut self, parent: Option<Entity>, name: &str) -> Entity {
        match self.lookup_child(parent, name) {
            Some(existing) => existing,
            None => self.create(parent, Some(name)),
        }
    }

    fn create(&mut self, parent: Option<Entity>, name: Option<&str>) -> Entity {
        let entity = Entity::new(NonZeroU64::MIN.saturating_add(self.next_id));
        self.next_id += 1;
        let parent = parent.filter(|p| self.is_alive(*p));
        self.entities.insert(
            entity,
            EntityInfo {
                name: name.map(str::to_string),
                parent,
            },
        );
        self.children.entry(parent).or_default().push(entity);
        entity
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.entities.get(&entity)?.name.as_deref()
    }

    /// Rename an entity. Names copied into struct layouts are unaffected.
    pub fn set_name(&mut self, entity: Entity, name: Option<&str>) {
        if let Some(info) = self.entities.get_mut(&entity) {
            info.name = name.map(str::to_string);
        }
    }

    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.entities.get(&entity)?.parent
    }

    /// Children of `parent` (`None` = root) in creation order.
    pub fn children(&self, parent: Option<Entity>) -> &[Entity] {
        self.children.get(&parent).map_or(&[], Vec::as_slice)
    }

    pub fn lookup_child(&self, parent: Option<Entity>, name: &str) -> Option<Entity> {
        self.children(parent)
            .iter()
            .copied()
            .find(|child| self.name(*child) == Some(name))
    }

    /// Resolve a separator-delimited path from the root.
    pub fn lookup(&self, path: &str) -> Option<Entity> {
        let mut current = None;
        for segment in path.split(self.config.path_separator.as_str()) {
            current = Some(self.lookup_child(current, segment)?);
        }
        current
    }

    /// Full path of an entity. Unnamed entities render as `#<id>`.
    pub fn path(&self, entity: Entity) -> String {
        let mut segments = Vec::new();
        let mut current = Some(entity);
        while let Some(e) = current {
            match self.name(e) {
                Some(name) => segments.push(name.to_string()),
                None => segments.push(e.to_string()),
            }
            current = self.parent(e);
        }
        segments.reverse();
        segments.join(self.config.path_separator.as_str())
    }

    /// Set the scope new entities are created in. Returns the previous scope.
    pub fn set_scope(&mut self, scope: Option<Entity>) -> Option<Entity> {
        std::mem::replace(&mut self.scope, scope)
    }

    pub fn scope(&self) -> Option<Entity> {
        self.scope
    }

    /// Delete an entity, its children, and every record attached to them.
    pub fn delete(&mut self, entity: Entity) {
        let Some(info) = self.entities.remove(&entity) else {
            return;
        };
        if let Some(siblings) = self.children.get_mut(&info.parent) {
            siblings.retain(|e| *e != entity);
        }
        let children = self.children.remove(&Some(entity)).unwrap_or_default();
        for child in children {
            self.delete(child);
        }
        self.records.remove_all(entity);
        if self.scope == Some(entity) {
            self.scope = None;
        }
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    pub fn get<T: Record>(&self, entity: Entity) -> Option<&T> {
        T::storage(&self.records).get(&entity)
    }

    pub fn has<T: Record>(&self, entity: Entity) -> bool {
        self.records.has(entity, T::KIND)
    }

    /// Get a record, creating it in its default state. Does not notify.
    pub fn get_mut_or_default<T: Record + Default>(&mut self, entity: Entity) -> &mut T {
        T::storage_mut(&mut self.records).entry(entity).or_default()
    }

    /// Attach (or overwrite) a record and notify its observers.
    pub fn set<T: Record>(&mut self, entity: Entity, value: T) {
        if !self.is_alive(entity) {
            log::debug!("[world] set {} on dead entity {}", T::KIND, entity);
            return;
        }
        T::storage_mut(&mut self.records).insert(entity, value);
        self.emit(T::KIND, &[entity]);
    }

    /// Attach records to several entities and notify observers once with the
    /// whole batch.
    pub fn set_batch<T: Record + Clone>(&mut self, batch: &[(Entity, T)]) {
        let mut entities = Vec::with_capacity(batch.len());
        for (entity, value) in batch {
            if !self.is_alive(*entity) {
                log::debug!("[world] set {} on dead entity {}", T::KIND, entity);
                continue;
            }
            T::storage_mut(&mut self.records).insert(*entity, value.clone());
            entities.push(*entity);
        }
        self.emit(T::KIND, &entities);
    }

    /// Notify observers that a record changed in place.
    pub fn modified<T: Record>(&mut self, entity: Entity) {
        self.emit(T::KIND, &[entity]);
    }

    /// Detach a record. Dropping the returned value destroys it.
    pub fn remove<T: Record>(&mut self, entity: Entity) -> Option<T> {
        T::storage_mut(&mut self.records).remove(&entity)
    }

    /// Deep copy the record of `src` onto `dst`, releasing what `dst` held.
    ///
    /// Returns false if `src` has no such record or `dst` is not alive.
    pub fn copy_record<T: Record + Clone>(&mut self, dst: Entity, src: Entity) -> bool {
        if dst == src {
            return self.has::<T>(src);
        }
        if !self.is_alive(dst) {
            return false;
        }
        let storage = T::storage_mut(&mut self.records);
        let Some(value) = storage.get(&src).cloned() else {
            return false;
        };
        storage.insert(dst, value);
        true
    }

    /// Move the record of `src` onto `dst`; `src` keeps an empty record.
    pub fn move_record<T: Record + Default>(&mut self, dst: Entity, src: Entity) -> bool {
        if dst == src {
            return self.has::<T>(src);
        }
        if !self.is_alive(dst) {
            return false;
        }
        let storage = T::storage_mut(&mut self.records);
        let Some(slot) = storage.get_mut(&src) else {
            return false;
        };
        let value = std::mem::take(slot);
        storage.insert(dst, value);
        true
    }

    // ------------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------------

    /// Run `callback` every time a record of `kind` is set or modified.
    pub fn observe<F>(&mut self, kind: RecordKind, callback: F) -> ObserverId
    where
        F: Fn(&mut World, &OnSet<'_>) + 'static,
    {
        self.observers.register(kind, Rc::new(callback))
    }

    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    pub fn observers(&self) -> &ObserverTable {
        &self.observers
    }

    /// Mark a module as imported. Returns false if it already was.
    pub fn register_module(&mut self, name: &'static str) -> bool {
        self.modules.insert(name)
    }

    fn gather<T: Record + Copy>(&self, entities: &[Entity]) -> (Vec<Entity>, Vec<T>) {
        let storage = T::storage(&self.records);
        entities
            .iter()
            .filter_map(|e| storage.get(e).map(|value| (*e, *value)))
            .unzip()
    }

    fn emit(&mut self, kind: RecordKind, entities: &[Entity]) {
        let callbacks = self.observers.callbacks(kind);
        if callbacks.is_empty() || entities.is_empty() {
            return;
        }

        match kind {
            RecordKind::Primitive => {
                let (e, v) = self.gather::<Primitive>(entities);
                self.dispatch(&callbacks, &OnSet::Primitive(&e, &v));
            }
            RecordKind::Member => {
                let (e, v) = self.gather::<Member>(entities);
                self.dispatch(&callbacks, &OnSet::Member(&e, &v));
            }
            RecordKind::Array => {
                let (e, v) = self.gather::<Array>(entities);
                self.dispatch(&callbacks, &OnSet::Array(&e, &v));
            }
            RecordKind::Sequence => {
                let (e, v) = self.gather::<Sequence>(entities);
                self.dispatch(&callbacks, &OnSet::Sequence(&e, &v));
            }
            RecordKind::MetaType => {
                let (e, v) = self.gather::<MetaType>(entities);
                self.dispatch(&callbacks, &OnSet::MetaType(&e, &v));
            }
            RecordKind::Component => {
                let (e, v) = self.gather::<Component>(entities);
                self.dispatch(&callbacks, &OnSet::Component(&e, &v));
            }
            RecordKind::StructLayout => {
                let e: Vec<Entity> = entities
                    .iter()
                    .copied()
                    .filter(|e| self.has::<StructLayout>(*e))
                    .collect();
                self.dispatch(&callbacks, &OnSet::StructLayout(&e));
            }
        }
    }

    fn dispatch(&mut self, callbacks: &[ObserverFn], event: &OnSet<'_>) {
        if event.entities().is_empty() {
            return;
        }
        for callback in callbacks {
            callback(self, event);
        }
    }
}

impl MetaStore for World {
    fn name(&self, entity: Entity) -> Option<&str> {
        World::name(self, entity)
    }

    fn path(&self, entity: Entity) -> String {
        World::path(self, entity)
    }

    fn parent(&self, entity: Entity) -> Option<Entity> {
        World::parent(self, entity)
    }

    fn meta_type(&self, entity: Entity) -> Option<MetaType> {
        self.get::<MetaType>(entity).copied()
    }

    fn meta_type_mut(&mut self, entity: Entity) -> &mut MetaType {
        self.get_mut_or_default::<MetaType>(entity)
    }

    fn component(&self, entity: Entity) -> Option<Component> {
        self.get::<Component>(entity).copied()
    }

    fn component_mut(&mut self, entity: Entity) -> &mut Component {
        self.get_mut_or_default::<Component>(entity)
    }

    fn struct_layout(&self, entity: Entity) -> Option<&StructLayout> {
        self.get::<StructLayout>(entity)
    }

    fn struct_layout_mut(&mut self, entity: Entity) -> &mut StructLayout {
        self.get_mut_or_default::<StructLayout>(entity)
    }

    fn modified(&mut self, entity: Entity, kind: RecordKind) {
        self.emit(kind, &[entity]);
    }
}
