// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Cross-mechanism integration tests.
//!
//! Every operation the harness measures must have the same observable effect
//! on the payload regardless of which mechanism performs it.

use bevy_reflect::func::ArgList;
use bevy_reflect::Struct;
use reflectbench_core::reflect::{call, read_field, write_field};
use reflectbench_core::{hashed, members, MetaAny, Payload, Registries};

#[test]
fn test_hot_field_access_agrees() {
    let registries = Registries::new().expect("registration");
    let reflect = registries.resolve_reflect().expect("reflect handles");
    let meta = registries.resolve_meta().expect("meta handles");
    let mut payload = Payload::default();

    let via_reflect = read_field::<i32>(payload.field_at(reflect.a));
    let via_meta = meta.a.get(&payload).and_then(|v| v.cast::<i32>());
    assert_eq!(via_reflect, Some(payload.a));
    assert_eq!(via_meta, Some(payload.a));

    assert!(write_field(payload.field_at_mut(reflect.b), &4.0_f64));
    assert_eq!(payload.b, 4.0);
    assert!(meta.b.set(&mut payload, MetaAny::new(8.0_f64)));
    assert_eq!(payload.b, 8.0);
}

#[test]
fn test_hot_method_calls_agree() {
    let registries = Registries::new().expect("registration");
    let reflect = registries.resolve_reflect().expect("reflect handles");
    let meta = registries.resolve_meta().expect("meta handles");
    let mut payload = Payload {
        a: 7,
        ..Payload::default()
    };

    let via_reflect = call::<i32>(
        reflect.mul,
        ArgList::new().push_ref(&payload).push_owned(3_i32),
    );
    let via_meta = meta
        .mul
        .invoke(&mut payload, &[MetaAny::new(3_i32)])
        .and_then(|v| v.cast::<i32>());
    assert_eq!(via_reflect, Some(21));
    assert_eq!(via_meta, Some(21));

    assert!(reflect
        .add_to_b
        .call(ArgList::new().push_mut(&mut payload).push_owned(0.5_f64))
        .is_ok());
    let unit = meta.add_to_b.invoke(&mut payload, &[MetaAny::new(0.5_f64)]);
    assert!(unit.is_some_and(|v| v.is::<()>()));
    assert_eq!(payload.b, 3.0);
}

#[test]
fn test_cold_lookup_by_runtime_name() {
    let registries = Registries::new().expect("registration");
    let meta = registries.resolve_meta().expect("meta handles");
    let payload = Payload::default();

    // Names built at runtime, as the cold path does
    let name_a = String::from(members::A);
    let name_mul = String::from(members::MUL);

    assert_eq!(read_field::<i32>(payload.field(&name_a)), Some(1));
    assert!(registries.reflect.function(&name_mul).is_some());

    let data = meta.ty.data(hashed(&name_a)).expect("meta data by name");
    assert_eq!(data.get(&payload).and_then(|v| v.cast::<i32>()), Some(1));
    assert!(meta.ty.func(hashed(&name_mul)).is_some());
}
