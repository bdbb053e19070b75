// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Randomized copy/move/destroy sequences on struct layouts, checked against
// a plain model of the member names each entity should hold.

use typemeta::meta::{self, StructDesc, StructLayout};
use typemeta::{Entity, MetaModule, World};

const SLOTS: usize = 6;
const STEPS: usize = 400;

#[derive(Debug, Clone, Copy)]
enum Op {
    Declare,
    Copy,
    Move,
    Destroy,
}

fn names_of(layout: &StructLayout) -> Vec<String> {
    layout.members().iter().map(|m| m.name.clone()).collect()
}

fn run(seed: u64) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut world = World::new();
    let b = MetaModule::import(&mut world);

    let slots: Vec<Entity> = (0..SLOTS)
        .map(|i| world.entity_named(&format!("slot{}", i)))
        .collect();
    let mut model: Vec<Option<Vec<String>>> = vec![None; SLOTS];
    let mut generation = 0;

    for step in 0..STEPS {
        let op = match rng.u8(..4) {
            0 => Op::Declare,
            1 => Op::Copy,
            2 => Op::Move,
            _ => Op::Destroy,
        };
        let dst = rng.usize(..SLOTS);
        let src = rng.usize(..SLOTS);

        match op {
            Op::Declare => {
                // Build a fresh layout on a scratch struct, then copy it in.
                generation += 1;
                let count = rng.usize(1..5);
                let mut desc = StructDesc::new(format!("scratch{}", generation));
                let mut names = Vec::with_capacity(count);
                for i in 0..count {
                    let name = format!("g{}_m{}", generation, i);
                    desc = desc.member(name.as_str(), b.u32);
                    names.push(name);
                }
                let scratch = meta::struct_init(&mut world, &desc).unwrap();
                assert!(world.copy_record::<StructLayout>(slots[dst], scratch));
                world.delete(scratch);
                model[dst] = Some(names);
            }
            Op::Copy => {
                let copied = world.copy_record::<StructLayout>(slots[dst], slots[src]);
                assert_eq!(copied, model[src].is_some(), "step {}", step);
                if copied {
                    model[dst] = model[src].clone();
                }
            }
            Op::Move => {
                let moved = world.move_record::<StructLayout>(slots[dst], slots[src]);
                assert_eq!(moved, model[src].is_some(), "step {}", step);
                if moved && dst != src {
                    model[dst] = model[src].take();
                    model[src] = Some(Vec::new());
                }
            }
            Op::Destroy => {
                let removed = world.remove::<StructLayout>(slots[dst]);
                assert_eq!(removed.is_some(), model[dst].is_some(), "step {}", step);
                model[dst] = None;
            }
        }

        for (slot, expected) in slots.iter().zip(&model) {
            let actual = world.get::<StructLayout>(*slot).map(names_of);
            assert_eq!(&actual, expected, "seed {} step {} ({:?})", seed, step, op);
        }
    }
}

#[test]
fn random_sequences() {
    for seed in [1, 7, 0xdead_beef, 2024, 31337] {
        run(seed);
    }
}

#[test]
fn copies_are_independent() {
    let mut world = World::new();
    let b = MetaModule::import(&mut world);
    let src = meta::struct_init(
        &mut world,
        &StructDesc::new("Src").member("a", b.u8).member("b", b.u16),
    )
    .unwrap();
    let dst = world.entity_named("Dst");

    assert!(world.copy_record::<StructLayout>(dst, src));
    world.delete(src);

    let layout = world.get::<StructLayout>(dst).unwrap();
    assert_eq!(names_of(layout), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn move_then_destroy_source() {
    let mut world = World::new();
    let b = MetaModule::import(&mut world);
    let src = meta::struct_init(&mut world, &StructDesc::new("Src").member("x", b.f64)).unwrap();
    let dst = world.entity_named("Dst");

    assert!(world.move_record::<StructLayout>(dst, src));
    assert!(world.get::<StructLayout>(src).unwrap().is_empty());
    world.delete(src);

    assert_eq!(world.get::<StructLayout>(dst).map(StructLayout::len), Some(1));
}
