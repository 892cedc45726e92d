//! Process-wide memoization of synthesized keys.
//!
//! Key derivation walks the canonical encoder and the digest once per
//! (name, descriptor type) pair; every later lookup is a map hit. This is
//! the "computed once, then cached" rendition of a computation that a
//! language with compile-time reflection would fold away entirely.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::key::{self, Key};
use crate::name::Name;
use crate::sig::SignatureSpec;

static KEYS: Lazy<RwLock<HashMap<(Name, TypeId), Key>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Composite key for `name` under the signature descriptor `S`, memoized.
pub fn key_for<S: SignatureSpec>(name: Name) -> Key {
    let slot = (name, TypeId::of::<S>());
    if let Some(cached) = KEYS.read().expect("key registry poisoned").get(&slot) {
        return cached.clone();
    }
    let key = key::synthesize(name, S::signature().hash64());
    // Two racing derivations compute the same value; first insert wins.
    KEYS.write()
        .expect("key registry poisoned")
        .entry(slot)
        .or_insert(key)
        .clone()
}
