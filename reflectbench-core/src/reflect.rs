// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `bevy_reflect` side of the comparison.
//!
//! Data members go through the derived `Struct` impl, either by cached field
//! index or by name. Member functions are turned into `DynamicFunction`s and
//! kept in a `FunctionRegistry` under their short names.

use std::any::Any;

use bevy_reflect::func::{ArgList, DynamicFunction, FunctionRegistry, FunctionResult, Return};
use bevy_reflect::{PartialReflect, StructInfo, TypeInfo, TypeRegistry};

use crate::error::RegistrationError;
use crate::payload::{members, Payload};
use crate::types::Mechanism;

/// Type and function registries for the reflect mechanism.
pub struct ReflectRegistry {
    types: TypeRegistry,
    functions: FunctionRegistry,
}

impl ReflectRegistry {
    /// Create empty registries.
    pub fn new() -> Self {
        Self {
            types: TypeRegistry::new(),
            functions: FunctionRegistry::default(),
        }
    }

    /// Create registries with [`Payload`] and its member functions registered.
    pub fn with_payload() -> Result<Self, RegistrationError> {
        let mut registry = Self::new();
        registry.types.register::<Payload>();
        registry.register_function(members::MUL, Payload::mul)?;
        registry.register_function(members::ADD_TO_B, Payload::add_to_b)?;
        tracing::debug!(ty = members::TYPE, "reflect registries populated");
        Ok(registry)
    }

    fn register_function<F, Marker>(
        &mut self,
        name: &'static str,
        function: F,
    ) -> Result<(), RegistrationError>
    where
        F: bevy_reflect::func::IntoFunction<'static, Marker> + 'static,
    {
        self.functions
            .register_with_name(name, function)
            .map_err(|e| RegistrationError::FunctionRegistration {
                name,
                reason: e.to_string(),
            })?;
        Ok(())
    }

    /// Look up a registered function by name.
    #[inline]
    pub fn function(&self, name: &str) -> Option<&DynamicFunction<'static>> {
        self.functions.get(name)
    }

    /// Resolve the struct description of a registered type by short path.
    pub fn struct_info(
        &self,
        short_type_path: &'static str,
    ) -> Result<&'static StructInfo, RegistrationError> {
        let registration = self
            .types
            .get_with_short_type_path(short_type_path)
            .ok_or(RegistrationError::TypeNotRegistered {
                mechanism: Mechanism::Reflect,
                type_name: short_type_path,
            })?;

        match registration.type_info() {
            TypeInfo::Struct(info) => Ok(info),
            _ => Err(RegistrationError::NotAStruct {
                type_name: short_type_path,
            }),
        }
    }
}

impl Default for ReflectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy a field value out of a reflected field, if it has type `T`.
#[inline]
pub fn read_field<T: Any + Copy>(field: Option<&dyn PartialReflect>) -> Option<T> {
    field?.try_downcast_ref::<T>().copied()
}

/// Apply `value` onto a reflected field. Returns `false` if the field is
/// missing or has an incompatible type.
#[inline]
pub fn write_field(field: Option<&mut dyn PartialReflect>, value: &dyn PartialReflect) -> bool {
    field.is_some_and(|field| field.try_apply(value).is_ok())
}

/// Invoke `function` with `args`, returning an owned result of type `T`.
#[inline]
pub fn call<T: Any + Copy>(function: &DynamicFunction<'static>, args: ArgList<'_>) -> Option<T> {
    owned_return(function.call(args))
}

/// Extract an owned value of type `T` from a function result.
pub fn owned_return<T: Any + Copy>(result: FunctionResult<'_>) -> Option<T> {
    match result.ok()? {
        Return::Owned(value) => value.try_downcast_ref::<T>().copied(),
        _ => None,
    }
}
