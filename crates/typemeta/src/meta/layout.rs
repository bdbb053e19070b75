// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct layout builder.
//!
//! Members are appended in first-declaration order and the whole layout is
//! recomputed from scratch on every declaration: offsets, struct size and
//! struct alignment follow C rules (each member aligned to its type, the
//! struct padded to its largest member alignment).
//!
//! Sizes of member types are looked up fresh on every pass, so a rebuild
//! picks up types whose own layout changed after they were bound.

use super::descriptor::{Component, Member, StructLayout, StructMember, TypeKind};
use super::registrar::{check_component, check_kind, ensure_type_records, init_type, report};
use crate::entity::Entity;
use crate::error::{MetaError, Result};
use crate::store::{MetaStore, RecordKind};

/// Round `value` up to a multiple of `alignment` (nonzero). `None` on
/// overflow.
#[inline]
pub fn align_up(value: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment != 0);
    value.checked_next_multiple_of(alignment)
}

/// Resolved offset and size of one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub offset: usize,
    pub size: usize,
}

/// Outcome of a layout pass over a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPass {
    /// One entry per member, in member order.
    pub placements: Vec<Placement>,
    /// Struct size, padded to `alignment`.
    pub size: usize,
    /// Largest member alignment.
    pub alignment: usize,
}

/// Compute the layout of `strct` from its current members without writing
/// anything.
pub fn compute_layout<S: MetaStore + ?Sized>(store: &S, strct: Entity) -> Result<LayoutPass> {
    let members = store
        .struct_layout(strct)
        .map(StructLayout::members)
        .unwrap_or_default();

    let mut placements = Vec::with_capacity(members.len());
    let mut size = 0;
    let mut alignment = 0;

    for member in members {
        let Some(elem) = store.component(member.ty) else {
            return Err(report(MetaError::MissingElementType {
                path: store.path(member.member),
            }));
        };
        if !elem.is_finalized() {
            return Err(report(MetaError::ZeroSizeOrAlignment {
                path: store.path(member.member),
            }));
        }

        let placed = align_up(size, elem.alignment).and_then(|offset| {
            let member_size = elem.size.checked_mul(member.count as usize)?;
            let end = offset.checked_add(member_size)?;
            Some((offset, member_size, end))
        });
        let Some((offset, member_size, end)) = placed else {
            return Err(report(MetaError::SizeOverflow {
                path: store.path(member.member),
            }));
        };
        placements.push(Placement {
            offset,
            size: member_size,
        });

        size = end;
        alignment = alignment.max(elem.alignment);
    }

    if size == 0 || alignment == 0 {
        return Err(report(MetaError::ZeroSizeOrAlignment {
            path: store.path(strct),
        }));
    }

    let Some(padded) = align_up(size, alignment) else {
        return Err(report(MetaError::SizeOverflow {
            path: store.path(strct),
        }));
    };
    Ok(LayoutPass {
        placements,
        size: padded,
        alignment,
    })
}

/// Declare (or redeclare) `member` as a member of `strct` and rebuild the
/// struct layout.
///
/// The first declaration of a member entity fixes its position, its name
/// (copied from the entity) and its count. Later declarations of the same
/// entity only replace its type.
///
/// On failure no offset, size or size/alignment record is modified, but a
/// newly appended member stays in the list, unresolved, until a later pass
/// succeeds.
pub fn add_member<S: MetaStore + ?Sized>(
    store: &mut S,
    strct: Entity,
    member: Entity,
    decl: &Member,
) -> Result<()> {
    check_kind(store, strct, TypeKind::Struct)?;
    let Some(ty) = decl.ty else {
        return Err(report(MetaError::MissingElementType {
            path: store.path(member),
        }));
    };

    ensure_type_records(store, strct);
    let changed = upsert_member(store, strct, member, ty, decl.count);
    commit(store, strct, changed)
}

/// Recompute the layout of an existing struct, e.g. after one of its member
/// types was finalized or changed.
pub fn rebuild<S: MetaStore + ?Sized>(store: &mut S, strct: Entity) -> Result<()> {
    check_kind(store, strct, TypeKind::Struct)?;
    if store.struct_layout(strct).is_none() {
        return Err(report(MetaError::ZeroSizeOrAlignment {
            path: store.path(strct),
        }));
    }
    commit(store, strct, false)
}

fn upsert_member<S: MetaStore + ?Sized>(
    store: &mut S,
    strct: Entity,
    member: Entity,
    ty: Entity,
    count: u32,
) -> bool {
    let position = store
        .struct_layout(strct)
        .and_then(|layout| layout.position_of(member));

    match position {
        Some(index) => {
            let existing = &mut store.struct_layout_mut(strct).members[index];
            if existing.ty == ty {
                return false;
            }
            let previous = std::mem::replace(&mut existing.ty, ty);
            log::debug!(
                "[meta] member '{}' redeclared with type {} (was {})",
                store.path(member),
                ty,
                previous
            );
            true
        }
        None => {
            let name = store.name(member).unwrap_or_default().to_string();
            store.struct_layout_mut(strct).members.push(StructMember {
                member,
                name,
                ty,
                count: count.max(1),
                size: 0,
                offset: 0,
            });
            true
        }
    }
}

fn commit<S: MetaStore + ?Sized>(store: &mut S, strct: Entity, mut changed: bool) -> Result<()> {
    let pass = compute_layout(store, strct)?;

    // A size record finalized before the struct took ownership of it (e.g. a
    // natively registered type) must agree with the computed layout.
    let previous = store.component(strct).unwrap_or_default();
    let owned = store.meta_type(strct).unwrap_or_default().kind == TypeKind::Struct;
    if !owned && previous.is_finalized() {
        check_component(store, strct, pass.size, pass.alignment)?;
    }

    let layout = store.struct_layout_mut(strct);
    let mut placed = false;
    for (member, placement) in layout.members.iter_mut().zip(&pass.placements) {
        if member.offset != placement.offset || member.size != placement.size {
            member.offset = placement.offset;
            member.size = placement.size;
            placed = true;
        }
    }
    changed |= placed;
    if changed {
        store.modified(strct, RecordKind::StructLayout);
    }

    let value = Component::new(pass.size, pass.alignment);
    if previous != value {
        *store.component_mut(strct) = value;
        store.modified(strct, RecordKind::Component);
        changed = true;
    }

    init_type(store, strct, TypeKind::Struct, changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{init_primitive, MetaType, PrimitiveKind};
    use crate::World;

    fn primitive(world: &mut World, kind: PrimitiveKind) -> Entity {
        let e = world.entity_named(kind.name());
        init_primitive(world, e, kind).unwrap();
        e
    }

    fn declare(world: &mut World, strct: Entity, name: &str, ty: Entity) -> Result<()> {
        let m = world.child(Some(strct), name);
        add_member(world, strct, m, &Member::new(ty))
    }

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 4), Some(0));
        assert_eq!(align_up(1, 4), Some(4));
        assert_eq!(align_up(4, 4), Some(4));
        assert_eq!(align_up(5, 8), Some(8));
        assert_eq!(align_up(9, 1), Some(9));
        assert_eq!(align_up(usize::MAX - 2, 8), None);
    }

    #[test]
    fn test_compute_layout_matches_members() {
        let mut world = World::new();
        let u8_t = primitive(&mut world, PrimitiveKind::U8);
        let u32_t = primitive(&mut world, PrimitiveKind::U32);
        let s = world.entity_named("S");
        declare(&mut world, s, "a", u8_t).unwrap();
        declare(&mut world, s, "b", u32_t).unwrap();

        let pass = compute_layout(&world, s).unwrap();
        assert_eq!(
            pass.placements,
            vec![
                Placement { offset: 0, size: 1 },
                Placement { offset: 4, size: 4 }
            ]
        );
        assert_eq!((pass.size, pass.alignment), (8, 4));
    }

    #[test]
    fn test_trailing_padding() {
        let mut world = World::new();
        let u64_t = primitive(&mut world, PrimitiveKind::U64);
        let u8_t = primitive(&mut world, PrimitiveKind::U8);
        let s = world.entity_named("S");
        declare(&mut world, s, "big", u64_t).unwrap();
        declare(&mut world, s, "tail", u8_t).unwrap();

        let comp = world.get::<Component>(s).copied().unwrap();
        assert_eq!(comp, Component::new(16, 8));
        let layout = world.get::<StructLayout>(s).unwrap();
        assert_eq!(layout.member("tail").map(|m| m.offset), Some(8));
    }

    #[test]
    fn test_missing_member_type() {
        let mut world = World::new();
        let s = world.entity_named("S");
        let m = world.child(Some(s), "m");

        let err = add_member(&mut world, s, m, &Member::default()).unwrap_err();
        assert_eq!(
            err,
            MetaError::MissingElementType {
                path: "S.m".to_string()
            }
        );
        assert!(!world.has::<StructLayout>(s));
    }

    #[test]
    fn test_rebuild_without_members() {
        let mut world = World::new();
        let s = world.entity_named("S");
        assert!(matches!(
            rebuild(&mut world, s),
            Err(MetaError::ZeroSizeOrAlignment { .. })
        ));
        assert!(!world.has::<MetaType>(s));
    }
}
