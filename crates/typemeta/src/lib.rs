// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typemeta - runtime type reflection and layout
//!
//! Describe data types at runtime by attaching declaration records to
//! entities, and get back their kind, size, alignment and (for structs)
//! member offsets, computed with C layout rules.
//!
//! ## Quick Start
//!
//! ```rust
//! use typemeta::meta::{Component, Member, StructLayout};
//! use typemeta::{MetaModule, World};
//!
//! let mut world = World::new();
//! let b = MetaModule::import(&mut world);
//!
//! // struct Sample { flag: u8, value: u32 }
//! let sample = world.entity_named("Sample");
//! let flag = world.child(Some(sample), "flag");
//! let value = world.child(Some(sample), "value");
//! world.set(flag, Member::new(b.u8));
//! world.set(value, Member::new(b.u32));
//!
//! assert_eq!(world.get::<Component>(sample), Some(&Component::new(8, 4)));
//! let layout = world.get::<StructLayout>(sample).unwrap();
//! assert_eq!(layout.member("value").map(|m| m.offset), Some(4));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |  World (host)   entities, names, records, observer table     |
//! +-------------------------------------------------------------+
//! |  Handlers       set_primitive | set_member | set_array | ... |
//! +-------------------------------------------------------------+
//! |  Core           registrar | struct layout | array/sequence   |
//! +-------------------------------------------------------------+
//! |  MetaStore      record access + "modified" notifications     |
//! +-------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`meta`] - declarations, finalized records, layout computation
//! - [`world`] - in-process entity/record store with observers
//! - [`store`] - storage trait the core runs against
//! - [`config`] - constants and runtime configuration
//!
//! Errors are reported as [`MetaError`] and logged through the `log`
//! facade; install any logger to see them.

pub mod config;
pub mod entity;
pub mod error;
pub mod meta;
pub mod store;
pub mod world;

pub use config::MetaConfig;
pub use entity::Entity;
pub use error::{MetaError, Result};
pub use meta::{Builtins, MetaModule};
pub use store::{MetaStore, RecordKind};
pub use world::{OnSet, World};
