// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Opaque entity identifiers.

use std::fmt;
use std::num::NonZeroU64;

/// Opaque identifier of an entity in the host store.
///
/// Ids are never zero, so `Option<Entity>` is the same size as `Entity` and
/// is used wherever a reference may be unset (element types, member types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity(NonZeroU64);

impl Entity {
    pub const fn new(id: NonZeroU64) -> Self {
        Self(id)
    }

    /// Build an entity from a raw id. Returns `None` for 0.
    #[must_use]
    pub const fn from_raw(id: u64) -> Option<Self> {
        match NonZeroU64::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Raw numeric id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
