// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Hashed-id meta registry.
//!
//! A small runtime reflection layer: a type is described once
//! through a [`MetaFactory`], members are keyed by the FNV-1a hash of their
//! name, and values cross the boundary as [`MetaAny`]. Accessors are stored as
//! type-erased closures over `dyn Any`, so a lookup yields a handle that can
//! be cached (hot path) or re-resolved from a runtime string (cold path).

mod any;
mod id;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

pub use any::MetaAny;
pub use id::{hashed, MetaId};

type Getter = Box<dyn Fn(&dyn Any) -> Option<MetaAny> + Send + Sync>;
type Setter = Box<dyn Fn(&mut dyn Any, MetaAny) -> bool + Send + Sync>;
type Invoker = Box<dyn Fn(&mut dyn Any, &[MetaAny]) -> Option<MetaAny> + Send + Sync>;

/// A reflected data member.
pub struct MetaData {
    id: MetaId,
    name: &'static str,
    value_type: TypeId,
    get: Getter,
    set: Setter,
}

impl MetaData {
    pub fn id(&self) -> MetaId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type id of the member's value.
    pub fn value_type(&self) -> TypeId {
        self.value_type
    }

    /// Read the member from `instance`. `None` if `instance` is not the
    /// owning type.
    #[inline]
    pub fn get<T: Any>(&self, instance: &T) -> Option<MetaAny> {
        (self.get)(instance)
    }

    /// Write `value` into the member. Returns `false` on an instance or value
    /// type mismatch, leaving the instance untouched.
    #[inline]
    pub fn set<T: Any>(&self, instance: &mut T, value: MetaAny) -> bool {
        (self.set)(instance, value)
    }
}

impl fmt::Debug for MetaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaData")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A reflected member function.
pub struct MetaFunc {
    id: MetaId,
    name: &'static str,
    arity: usize,
    invoke: Invoker,
}

impl MetaFunc {
    pub fn id(&self) -> MetaId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Call the function on `instance`.
    ///
    /// Returns `None` on an arity, instance or argument type mismatch.
    /// Functions returning `()` yield [`MetaAny::unit`].
    #[inline]
    pub fn invoke<T: Any>(&self, instance: &mut T, args: &[MetaAny]) -> Option<MetaAny> {
        if args.len() != self.arity {
            return None;
        }
        (self.invoke)(instance, args)
    }
}

impl fmt::Debug for MetaFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaFunc")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Description of one reflected type.
#[derive(Debug)]
pub struct MetaType {
    id: MetaId,
    name: &'static str,
    type_id: TypeId,
    data: HashMap<MetaId, MetaData>,
    funcs: HashMap<MetaId, MetaFunc>,
}

impl MetaType {
    pub fn id(&self) -> MetaId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn data(&self, id: MetaId) -> Option<&MetaData> {
        self.data.get(&id)
    }

    #[inline]
    pub fn func(&self, id: MetaId) -> Option<&MetaFunc> {
        self.funcs.get(&id)
    }
}

/// Builder describing the members of `T`.
pub struct MetaFactory<T> {
    ty: MetaType,
    _marker: PhantomData<fn(T)>,
}

impl<T: Any> MetaFactory<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            ty: MetaType {
                id: hashed(name),
                name,
                type_id: TypeId::of::<T>(),
                data: HashMap::new(),
                funcs: HashMap::new(),
            },
            _marker: PhantomData,
        }
    }

    /// Register a data member through a pair of field projections.
    pub fn data<V, G, M>(mut self, name: &'static str, field: G, field_mut: M) -> Self
    where
        V: Any + Clone,
        G: Fn(&T) -> &V + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let get: Getter = Box::new(move |instance: &dyn Any| -> Option<MetaAny> {
            instance
                .downcast_ref::<T>()
                .map(|obj| MetaAny::new(field(obj).clone()))
        });
        let set: Setter = Box::new(move |instance: &mut dyn Any, value: MetaAny| -> bool {
            let Some(obj) = instance.downcast_mut::<T>() else {
                return false;
            };
            match value.take::<V>() {
                Some(value) => {
                    *field_mut(obj) = value;
                    true
                }
                None => false,
            }
        });

        let id = hashed(name);
        let member = MetaData {
            id,
            name,
            value_type: TypeId::of::<V>(),
            get,
            set,
        };
        if self.ty.data.insert(id, member).is_some() {
            tracing::warn!(member = name, ty = self.ty.name, "meta data member replaced");
        }
        self
    }

    /// Register a single-argument member function.
    pub fn func<A, R, F>(mut self, name: &'static str, function: F) -> Self
    where
        A: Any + Clone,
        R: Any,
        F: Fn(&mut T, A) -> R + Send + Sync + 'static,
    {
        let invoke: Invoker = Box::new(move |instance: &mut dyn Any, args: &[MetaAny]| {
            let obj = instance.downcast_mut::<T>()?;
            let arg = args.first()?.downcast_ref::<A>()?.clone();
            Some(MetaAny::new(function(obj, arg)))
        });

        let id = hashed(name);
        let member = MetaFunc {
            id,
            name,
            arity: 1,
            invoke,
        };
        if self.ty.funcs.insert(id, member).is_some() {
            tracing::warn!(function = name, ty = self.ty.name, "meta function replaced");
        }
        self
    }

    /// Finish the description.
    pub fn build(self) -> MetaType {
        self.ty
    }
}

/// Registry of meta types, resolvable by Rust type or by hashed name.
#[derive(Debug, Default)]
pub struct MetaContext {
    types: HashMap<TypeId, MetaType>,
    by_id: HashMap<MetaId, TypeId>,
}

impl MetaContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type, replacing any earlier description of the same Rust type.
    pub fn register(&mut self, ty: MetaType) {
        tracing::debug!(
            ty = ty.name,
            data = ty.data.len(),
            funcs = ty.funcs.len(),
            "registering meta type"
        );
        self.by_id.insert(ty.id, ty.type_id);
        self.types.insert(ty.type_id, ty);
    }

    pub fn resolve<T: Any>(&self) -> Option<&MetaType> {
        self.types.get(&TypeId::of::<T>())
    }

    pub fn resolve_id(&self, id: MetaId) -> Option<&MetaType> {
        self.by_id.get(&id).and_then(|type_id| self.types.get(type_id))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
