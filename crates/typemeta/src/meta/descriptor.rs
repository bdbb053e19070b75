// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Metadata records describing declared types.
//!
//! Two groups of records live here:
//!
//! - **Declarations** set by users: [`Primitive`], [`Member`], [`Array`],
//!   [`Sequence`]. Setting one triggers the matching handler.
//! - **Finalized metadata** written by this crate: [`MetaType`],
//!   [`Component`], [`StructLayout`].

use crate::entity::Entity;
use std::fmt;

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    /// Recognized as a type, kind not yet finalized.
    #[default]
    Uninitialized,
    Primitive(PrimitiveKind),
    Struct,
    Array,
    Sequence,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Uninitialized => f.write_str("uninitialized"),
            TypeKind::Primitive(kind) => write!(f, "primitive {}", kind.name()),
            TypeKind::Struct => f.write_str("struct"),
            TypeKind::Array => f.write_str("array"),
            TypeKind::Sequence => f.write_str("sequence"),
        }
    }
}

/// Type descriptor record. The kind is set once and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaType {
    pub kind: TypeKind,
}

impl MetaType {
    pub fn new(kind: TypeKind) -> Self {
        Self { kind }
    }

    /// True once a kind has been confirmed.
    pub fn is_finalized(&self) -> bool {
        self.kind != TypeKind::Uninitialized
    }
}

/// Size/alignment record of a type. Zero means "not finalized".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    pub size: usize,
    pub alignment: usize,
}

impl Component {
    pub fn new(size: usize, alignment: usize) -> Self {
        Self { size, alignment }
    }

    /// True when both size and alignment are known.
    pub fn is_finalized(&self) -> bool {
        self.size != 0 && self.alignment != 0
    }
}

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveKind {
    Bool,
    Char,
    Byte,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    UPtr,
    IPtr,
    /// Handle to an owned, heap allocated string.
    String,
    /// Entity identifier.
    Entity,
}

impl PrimitiveKind {
    /// Every primitive kind, in registration order.
    pub const ALL: [PrimitiveKind; 17] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::Byte,
        PrimitiveKind::U8,
        PrimitiveKind::U16,
        PrimitiveKind::U32,
        PrimitiveKind::U64,
        PrimitiveKind::UPtr,
        PrimitiveKind::I8,
        PrimitiveKind::I16,
        PrimitiveKind::I32,
        PrimitiveKind::I64,
        PrimitiveKind::IPtr,
        PrimitiveKind::F32,
        PrimitiveKind::F64,
        PrimitiveKind::String,
        PrimitiveKind::Entity,
    ];

    /// Platform-native size in bytes.
    pub fn size(&self) -> usize {
        use std::mem::size_of;
        match self {
            Self::Bool => size_of::<bool>(),
            Self::Char => size_of::<std::ffi::c_char>(),
            Self::Byte | Self::U8 => size_of::<u8>(),
            Self::U16 => size_of::<u16>(),
            Self::U32 => size_of::<u32>(),
            Self::U64 => size_of::<u64>(),
            Self::I8 => size_of::<i8>(),
            Self::I16 => size_of::<i16>(),
            Self::I32 => size_of::<i32>(),
            Self::I64 => size_of::<i64>(),
            Self::F32 => size_of::<f32>(),
            Self::F64 => size_of::<f64>(),
            Self::UPtr => size_of::<usize>(),
            Self::IPtr => size_of::<isize>(),
            Self::String => size_of::<*const std::ffi::c_char>(),
            Self::Entity => size_of::<u64>(),
        }
    }

    /// Platform-native alignment in bytes.
    pub fn alignment(&self) -> usize {
        use std::mem::align_of;
        match self {
            Self::Bool => align_of::<bool>(),
            Self::Char => align_of::<std::ffi::c_char>(),
            Self::Byte | Self::U8 => align_of::<u8>(),
            Self::U16 => align_of::<u16>(),
            Self::U32 => align_of::<u32>(),
            Self::U64 => align_of::<u64>(),
            Self::I8 => align_of::<i8>(),
            Self::I16 => align_of::<i16>(),
            Self::I32 => align_of::<i32>(),
            Self::I64 => align_of::<i64>(),
            Self::F32 => align_of::<f32>(),
            Self::F64 => align_of::<f64>(),
            Self::UPtr => align_of::<usize>(),
            Self::IPtr => align_of::<isize>(),
            Self::String => align_of::<*const std::ffi::c_char>(),
            Self::Entity => align_of::<u64>(),
        }
    }

    /// Name the built-in entity for this kind is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Byte => "byte",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::UPtr => "uptr",
            Self::IPtr => "iptr",
            Self::String => "string",
            Self::Entity => "entity",
        }
    }
}

/// Declaration: "this entity is a primitive of kind X".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Primitive {
    pub kind: PrimitiveKind,
}

impl Primitive {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self { kind }
    }
}

/// Declaration: "this entity is a member of its parent struct".
///
/// A `count` of 0 is read as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    pub ty: Option<Entity>,
    pub count: u32,
}

impl Member {
    /// Member of type `ty` with an implicit count of 1.
    pub fn new(ty: Entity) -> Self {
        Self {
            ty: Some(ty),
            count: 0,
        }
    }

    /// Set the repeat count (inline array member).
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// Declaration: fixed-size array of `count` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Array {
    pub ty: Option<Entity>,
    pub count: u32,
}

impl Array {
    pub fn new(ty: Entity, count: u32) -> Self {
        Self {
            ty: Some(ty),
            count,
        }
    }
}

/// Declaration: dynamically sized sequence of elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    pub ty: Option<Entity>,
}

impl Sequence {
    pub fn new(ty: Entity) -> Self {
        Self { ty: Some(ty) }
    }
}

/// Resolved member of a struct layout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructMember {
    /// Entity that declared the member. Matching key, not an ordering key.
    pub member: Entity,
    /// Owned copy of the member entity's name at first declaration.
    pub name: String,
    /// Member type.
    pub ty: Entity,
    /// Repeat count (>= 1).
    pub count: u32,
    /// `count * element size`. 0 until the first successful layout pass.
    pub size: usize,
    /// Byte offset within the struct.
    pub offset: usize,
}

impl StructMember {
    /// True once a layout pass has resolved size and offset.
    pub fn is_resolved(&self) -> bool {
        self.size != 0
    }
}

/// Ordered member list of a struct type.
///
/// Owns its members and their names; see `meta::lifecycle` for the
/// copy/move/destroy rules.
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructLayout {
    pub(crate) members: Vec<StructMember>,
}

impl StructLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[StructMember] {
        &self.members
    }

    /// Member by name.
    pub fn member(&self, name: &str) -> Option<&StructMember> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Position of the member declared by `member`.
    pub fn position_of(&self, member: Entity) -> Option<usize> {
        self.members.iter().position(|m| m.member == member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
