// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Small shared vocabulary types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reflection mechanism being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mechanism {
    /// `bevy_reflect`: derived `Struct` access and `DynamicFunction` calls
    Reflect,
    /// Hashed-id meta registry with type-erased accessors
    Meta,
}

impl Mechanism {
    /// All mechanisms in report order.
    pub const ALL: [Mechanism; 2] = [Mechanism::Reflect, Mechanism::Meta];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mechanism::Reflect => "reflect",
            Mechanism::Meta => "meta",
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How a member handle is obtained for each measured operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPath {
    /// Handles resolved once and reused
    Hot,
    /// Member looked up by name on every call
    Cold,
}

impl AccessPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessPath::Hot => "hot",
            AccessPath::Cold => "cold",
        }
    }

    /// Human-readable description used in report groups.
    pub fn description(&self) -> &'static str {
        match self {
            AccessPath::Hot => "handles cached; no lookup or hash in loop",
            AccessPath::Cold => "per-iteration lookup by runtime name",
        }
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
