//! Insertion-ordered collections. Anything whose iteration order can reach
//! user-visible output should use these instead of hash maps.

use std::hash::BuildHasherDefault;

pub use indexmap::map::Entry;
use rustc_hash::FxHasher;

pub type IndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<FxHasher>>;
pub type IndexSet<K> = indexmap::IndexSet<K, BuildHasherDefault<FxHasher>>;
