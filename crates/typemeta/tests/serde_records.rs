// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Export of finalized records (requires the `serde` feature).

#![cfg(feature = "serde")]

use typemeta::meta::{self, Component, MetaType, PrimitiveKind, StructDesc, StructLayout, TypeKind};
use typemeta::{MetaModule, World};

#[test]
fn struct_layout_to_json() {
    let mut world = World::new();
    let b = MetaModule::import(&mut world);
    let s = meta::struct_init(
        &mut world,
        &StructDesc::new("Pair").member("k", b.u16).member("v", b.f64),
    )
    .unwrap();

    let layout = world.get::<StructLayout>(s).unwrap();
    let json = serde_json::to_value(layout).unwrap();
    let members = json["members"].as_array().unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[1]["name"], "v");
    assert_eq!(members[1]["offset"], 8);
    assert_eq!(members[1]["size"], 8);

    let back: StructLayout = serde_json::from_value(json).unwrap();
    assert_eq!(&back, layout);
}

#[test]
fn type_records_to_json() {
    let kind = MetaType::new(TypeKind::Primitive(PrimitiveKind::U32));
    let json = serde_json::to_string(&kind).unwrap();
    assert_eq!(json, r#"{"kind":{"Primitive":"U32"}}"#);

    let comp: Component = serde_json::from_str(r#"{"size":12,"alignment":4}"#).unwrap();
    assert_eq!(comp, Component::new(12, 4));
}
