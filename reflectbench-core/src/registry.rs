// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Registration of [`Payload`] with both mechanisms and resolution of the
//! handles the hot path reuses.
//!
//! Resolution doubles as the startup sanity check: if any member cannot be
//! found the harness must not start measuring.

use bevy_reflect::func::DynamicFunction;

use crate::error::{RegistrationError, ReflectBenchResult};
use crate::meta::{hashed, MetaContext, MetaData, MetaFactory, MetaFunc, MetaId, MetaType};
use crate::payload::{members, Payload};
use crate::reflect::ReflectRegistry;
use crate::types::Mechanism;

/// Compile-time meta ids of the payload members.
pub mod ids {
    use super::*;

    pub const TYPE: MetaId = hashed(members::TYPE);
    pub const A: MetaId = hashed(members::A);
    pub const B: MetaId = hashed(members::B);
    pub const S: MetaId = hashed(members::S);
    pub const MUL: MetaId = hashed(members::MUL);
    pub const ADD_TO_B: MetaId = hashed(members::ADD_TO_B);
}

/// Cached reflect handles: field indices and function references.
#[derive(Clone, Copy)]
pub struct ReflectHandles<'r> {
    pub a: usize,
    pub b: usize,
    pub mul: &'r DynamicFunction<'static>,
    pub add_to_b: &'r DynamicFunction<'static>,
}

/// Cached meta handles.
#[derive(Debug, Clone, Copy)]
pub struct MetaHandles<'r> {
    pub ty: &'r MetaType,
    pub a: &'r MetaData,
    pub b: &'r MetaData,
    pub mul: &'r MetaFunc,
    pub add_to_b: &'r MetaFunc,
}

/// Both mechanisms, each with [`Payload`] registered.
pub struct Registries {
    pub reflect: ReflectRegistry,
    pub meta: MetaContext,
}

impl Registries {
    /// Register [`Payload`] with both mechanisms.
    pub fn new() -> ReflectBenchResult<Self> {
        let reflect = ReflectRegistry::with_payload()?;

        let mut meta = MetaContext::new();
        meta.register(describe_payload());

        Ok(Self { reflect, meta })
    }

    /// Resolve the hot-path handles for the reflect mechanism.
    pub fn resolve_reflect(&self) -> Result<ReflectHandles<'_>, RegistrationError> {
        let info = self.reflect.struct_info(members::TYPE)?;
        let field = |member: &'static str| {
            info.index_of(member)
                .ok_or(RegistrationError::MissingMember {
                    mechanism: Mechanism::Reflect,
                    member,
                })
        };
        let function = |member: &'static str| {
            self.reflect
                .function(member)
                .ok_or(RegistrationError::MissingMember {
                    mechanism: Mechanism::Reflect,
                    member,
                })
        };

        Ok(ReflectHandles {
            a: field(members::A)?,
            b: field(members::B)?,
            mul: function(members::MUL)?,
            add_to_b: function(members::ADD_TO_B)?,
        })
    }

    /// Resolve the hot-path handles for the meta mechanism.
    pub fn resolve_meta(&self) -> Result<MetaHandles<'_>, RegistrationError> {
        let ty = self
            .meta
            .resolve::<Payload>()
            .ok_or(RegistrationError::TypeNotRegistered {
                mechanism: Mechanism::Meta,
                type_name: members::TYPE,
            })?;
        let missing = |member: &'static str| RegistrationError::MissingMember {
            mechanism: Mechanism::Meta,
            member,
        };

        Ok(MetaHandles {
            ty,
            a: ty.data(ids::A).ok_or_else(|| missing(members::A))?,
            b: ty.data(ids::B).ok_or_else(|| missing(members::B))?,
            mul: ty.func(ids::MUL).ok_or_else(|| missing(members::MUL))?,
            add_to_b: ty
                .func(ids::ADD_TO_B)
                .ok_or_else(|| missing(members::ADD_TO_B))?,
        })
    }
}

/// Meta description of [`Payload`].
pub fn describe_payload() -> MetaType {
    MetaFactory::<Payload>::new(members::TYPE)
        .data(members::A, |p: &Payload| &p.a, |p: &mut Payload| &mut p.a)
        .data(members::B, |p: &Payload| &p.b, |p: &mut Payload| &mut p.b)
        .data(members::S, |p: &Payload| &p.s, |p: &mut Payload| &mut p.s)
        .func(members::MUL, |p: &mut Payload, x: i32| p.mul(x))
        .func(members::ADD_TO_B, |p: &mut Payload, x: f64| p.add_to_b(x))
        .build()
}
