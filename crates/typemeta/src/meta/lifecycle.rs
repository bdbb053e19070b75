// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Copy/move/destroy rules of [`StructLayout`].
//!
//! A layout owns its member buffer and every member name:
//!
//! - **copy**: deep copy, names included. Whatever the destination held is
//!   released first.
//! - **move**: the buffer changes hands, the source is left empty. Names are
//!   neither copied nor freed.
//! - **destroy**: names, then the buffer, are released (plain `Drop`).

use super::descriptor::StructLayout;

impl Clone for StructLayout {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.release();
        self.members.extend(source.members.iter().cloned());
    }
}

impl StructLayout {
    /// Replace the members of `self` with a deep copy of `source`'s.
    pub fn copy_from(&mut self, source: &StructLayout) {
        self.clone_from(source);
    }

    /// Take the member buffer of `source`, leaving it empty.
    ///
    /// The previous members of `self` are released.
    pub fn move_from(&mut self, source: &mut StructLayout) {
        self.members = std::mem::take(&mut source.members);
    }

    /// Release every member and its name. The layout stays usable.
    pub fn release(&mut self) {
        self.members.clear();
    }
}
