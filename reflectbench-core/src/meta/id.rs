// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Numeric identifiers for meta types and members.
//!
//! Ids are 32-bit FNV-1a hashes of the member name. Because [`hashed`] is a
//! `const fn`, ids for known names are folded at compile time and the hot
//! path never hashes a string.

/// Identifier of a meta type, data member or function.
pub type MetaId = u32;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a hash of `name`.
pub const fn hashed(name: &str) -> MetaId {
    let bytes = name.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}
