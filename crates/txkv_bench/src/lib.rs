//! Benchmark utilities for TxKV.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use rand::seq::SliceRandom;
use rand::Rng;
use txkv_core::{Store, TransactionStack};

/// Generate `count` keys of the form `key_<n>`.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key_{i}")).collect()
}

/// Generate the same keys in random order.
pub fn shuffled_keys(count: usize) -> Vec<String> {
    let mut keys = generate_keys(count);
    keys.shuffle(&mut rand::thread_rng());
    keys
}

/// Build a store of `count` keys whose values are drawn from `distinct` values.
pub fn random_store(count: usize, distinct: usize) -> Store {
    let mut rng = rand::thread_rng();
    generate_keys(count)
        .into_iter()
        .map(|key| (key, rng.gen_range(0..distinct.max(1)).to_string()))
        .collect()
}

/// Build a stack over a `base_keys` store with `depth` open transactions,
/// each overwriting `writes_per_layer` keys.
pub fn nested_stack(base_keys: usize, depth: usize, writes_per_layer: usize) -> TransactionStack {
    let mut stack = TransactionStack::with_base(random_store(base_keys, 16));
    let keys = generate_keys(base_keys.max(1));
    for layer in 0..depth {
        stack.begin();
        for key in keys.iter().take(writes_per_layer) {
            stack.set(key.as_str(), layer.to_string());
        }
    }
    stack
}
