// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Type-erased value container passed in and out of meta accessors.

use std::any::{Any, TypeId};
use std::fmt;

/// An owned value of any `'static` type.
pub struct MetaAny(Box<dyn Any>);

impl MetaAny {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// The value returned by functions without a result.
    pub fn unit() -> Self {
        Self::new(())
    }

    /// Type id of the contained value (not of the box).
    pub fn type_id(&self) -> TypeId {
        (*self.0).type_id()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Copy the value out if it has type `T`.
    pub fn cast<T: Any + Copy>(&self) -> Option<T> {
        self.downcast_ref::<T>().copied()
    }

    /// Consume the container, returning the value if it has type `T`.
    pub fn take<T: Any>(self) -> Option<T> {
        self.0.downcast::<T>().ok().map(|value| *value)
    }
}

impl fmt::Debug for MetaAny {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MetaAny").field(&self.type_id()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_matching_type() {
        let value = MetaAny::new(42_i32);
        assert!(value.is::<i32>());
        assert_eq!(value.cast::<i32>(), Some(42));
        assert_eq!(value.type_id(), TypeId::of::<i32>());
    }

    #[test]
    fn test_cast_mismatched_type() {
        let value = MetaAny::new(1.5_f64);
        assert_eq!(value.cast::<i32>(), None);
        assert_eq!(value.take::<f32>(), None);
    }

    #[test]
    fn test_take_owned() {
        let value = MetaAny::new(String::from("hello"));
        assert_eq!(value.take::<String>().as_deref(), Some("hello"));
        assert!(MetaAny::unit().is::<()>());
    }
}
