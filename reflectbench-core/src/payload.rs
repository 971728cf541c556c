// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The sample entity every measured operation reflects over.

use bevy_reflect::Reflect;

/// Member names shared by both registries.
pub mod members {
    pub const TYPE: &str = "Payload";
    pub const A: &str = "a";
    pub const B: &str = "b";
    pub const S: &str = "s";
    pub const MUL: &str = "mul";
    pub const ADD_TO_B: &str = "add_to_b";
}

/// Plain record with one field of each primitive flavour and two trivial
/// member functions.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Payload {
    pub a: i32,
    pub b: f64,
    pub s: String,
}

impl Payload {
    #[inline]
    pub fn mul(&self, x: i32) -> i32 {
        self.a.wrapping_mul(x)
    }

    #[inline]
    pub fn add_to_b(&mut self, x: f64) {
        self.b += x;
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self {
            a: 1,
            b: 2.0,
            s: "hello".to_string(),
        }
    }
}
