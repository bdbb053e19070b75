// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type metadata core.
//!
//! Users attach declaration records ([`Primitive`], [`Member`], [`Array`],
//! [`Sequence`]) to entities. The handlers installed by
//! [`MetaModule::import`] react to them and finalize the type: a kind in
//! [`MetaType`], a size/alignment in [`Component`] and, for structs, the
//! member offsets in [`StructLayout`].
//!
//! Every operation here takes an explicit store handle (any
//! [`crate::MetaStore`]); nothing is global.

mod collection;
mod desc;
mod descriptor;
mod handlers;
mod layout;
mod lifecycle;
mod module;
mod registrar;


pub use collection::{init_array, init_sequence};
pub use desc::{
    array_init, sequence_init, struct_init, ArrayDesc, EntityDesc, MemberDesc, SequenceDesc,
    StructDesc,
};
pub use descriptor::{
    Array, Component, Member, MetaType, Primitive, PrimitiveKind, Sequence, StructLayout,
    StructMember, TypeKind,
};
pub use handlers::{set_array, set_member, set_primitive, set_sequence};
pub use layout::{add_member, align_up, compute_layout, rebuild, LayoutPass, Placement};
pub use module::{Builtins, MetaModule};
pub use registrar::{check_component, check_kind, init_component, init_primitive, init_type};
