//! Transaction stack.

use crate::error::{CoreError, CoreResult};
use crate::store::Store;
use crate::transaction::TransactionStatus;
use tracing::{debug, trace};

/// A base store with a stack of open transaction layers above it.
///
/// Each layer holds the complete key/value state, not a diff. A layer starts
/// as a copy of whatever was innermost when its BEGIN ran and is owned
/// exclusively by its stack position.
///
/// ## Effective Store
///
/// Every read and write goes to the *effective store*: the innermost layer,
/// or the base when no transaction is open.
///
/// # Example
///
/// ```rust
/// use txkv_core::TransactionStack;
///
/// let mut stack = TransactionStack::new();
/// stack.set("foo", "123");
///
/// stack.begin();
/// stack.set("foo", "456");
/// assert_eq!(stack.get("foo"), Some("456"));
///
/// stack.rollback().unwrap();
/// assert_eq!(stack.get("foo"), Some("123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionStack {
    /// Committed state.
    base: Store,
    /// Open layers, outermost first.
    layers: Vec<Store>,
}

impl TransactionStack {
    /// Creates an empty stack with an empty base store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stack over an existing base store.
    #[must_use]
    pub fn with_base(base: Store) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Opens a new transaction layer.
    ///
    /// The layer is a full copy of the current effective store. This always
    /// succeeds; there is no depth limit.
    pub fn begin(&mut self) {
        let layer = self.effective_store().clone();
        self.layers.push(layer);
        debug!(depth = self.depth(), "transaction begun");
    }

    /// Folds the innermost layer into the one beneath it.
    ///
    /// At depth 1 the layer becomes the new base. Fails with
    /// [`CoreError::NoActiveTransaction`] at depth 0, leaving state unchanged.
    pub fn commit(&mut self) -> CoreResult<()> {
        let top = self.layers.pop().ok_or(CoreError::NoActiveTransaction)?;
        match self.layers.last_mut() {
            Some(parent) => *parent = top,
            None => self.base = top,
        }
        debug!(depth = self.depth(), "transaction committed");
        Ok(())
    }

    /// Discards the innermost layer.
    ///
    /// Fails with [`CoreError::NoActiveTransaction`] at depth 0, leaving
    /// state unchanged.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let discarded = self.layers.pop().ok_or(CoreError::NoActiveTransaction)?;
        debug!(
            depth = self.depth(),
            discarded_entries = discarded.len(),
            "transaction rolled back"
        );
        Ok(())
    }

    /// Returns the store commands currently act on.
    #[must_use]
    pub fn effective_store(&self) -> &Store {
        self.layers.last().unwrap_or(&self.base)
    }

    /// Returns the store commands currently act on, mutably.
    ///
    /// This is the layer itself, not a copy.
    pub fn effective_store_mut(&mut self) -> &mut Store {
        self.layers.last_mut().unwrap_or(&mut self.base)
    }

    /// Returns the committed base store.
    #[must_use]
    pub fn base(&self) -> &Store {
        &self.base
    }

    /// Returns the number of open transaction layers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Returns whether a transaction is open.
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        TransactionStatus::from_depth(self.depth())
    }

    /// Reads `key` from the effective store.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.effective_store().get(key)
    }

    /// Writes `key` in the effective store.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let depth = self.depth();
        let key = key.into();
        trace!(%key, depth, "set");
        self.effective_store_mut().set(key, value);
    }

    /// Removes `key` from the effective store. Absent keys are ignored.
    pub fn delete(&mut self, key: &str) {
        let removed = self.effective_store_mut().delete(key);
        trace!(key, depth = self.depth(), removed = removed.is_some(), "delete");
    }

    /// Counts entries in the effective store whose value equals `value`.
    #[must_use]
    pub fn count_values(&self, value: &str) -> usize {
        self.effective_store().count_values(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stack_with(pairs: &[(&str, &str)]) -> TransactionStack {
        TransactionStack::with_base(pairs.iter().copied().collect())
    }

    #[test]
    fn new_stack_has_no_transaction() {
        let stack = TransactionStack::new();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.status(), TransactionStatus::None);
        assert!(stack.effective_store().is_empty());
    }

    #[test]
    fn begin_copies_effective_store() {
        let mut stack = stack_with(&[("foo", "123")]);
        stack.begin();

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.effective_store(), stack.base());
        assert_eq!(stack.status(), TransactionStatus::InProgress);
    }

    #[test]
    fn writes_inside_transaction_do_not_touch_base() {
        let mut stack = stack_with(&[("foo", "123")]);
        stack.begin();
        stack.set("foo", "456");
        stack.delete("bar");

        assert_eq!(stack.get("foo"), Some("456"));
        assert_eq!(stack.base().get("foo"), Some("123"));
    }

    #[test]
    fn commit_at_depth_one_replaces_base() {
        let mut stack = stack_with(&[("bar", "123")]);
        stack.begin();
        stack.set("foo", "456");
        stack.delete("bar");
        stack.commit().unwrap();

        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.base().get("foo"), Some("456"));
        assert_eq!(stack.base().get("bar"), None);
    }

    #[test]
    fn commit_nested_folds_into_parent_layer() {
        let mut stack = stack_with(&[("foo", "1")]);
        stack.begin();
        stack.set("foo", "2");
        stack.begin();
        stack.set("foo", "3");
        stack.commit().unwrap();

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.get("foo"), Some("3"));
        assert_eq!(stack.base().get("foo"), Some("1"));
    }

    #[test]
    fn rollback_after_nested_commit_discards_both() {
        let mut stack = stack_with(&[("foo", "1")]);
        stack.begin();
        stack.begin();
        stack.set("foo", "3");
        stack.commit().unwrap();
        stack.rollback().unwrap();

        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.get("foo"), Some("1"));
    }

    #[test]
    fn commit_and_rollback_without_transaction_fail() {
        let mut stack = stack_with(&[("foo", "1")]);
        assert_eq!(stack.commit(), Err(CoreError::NoActiveTransaction));
        assert_eq!(stack.rollback(), Err(CoreError::NoActiveTransaction));
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.get("foo"), Some("1"));
    }

    #[test]
    fn nested_rollbacks_restore_each_level() {
        let mut stack = stack_with(&[("foo", "123"), ("bar", "456")]);
        stack.begin();
        stack.set("foo", "456");
        stack.begin();
        assert_eq!(stack.count_values("456"), 2);

        stack.set("foo", "789");
        stack.rollback().unwrap();
        assert_eq!(stack.get("foo"), Some("456"));

        stack.delete("foo");
        assert_eq!(stack.get("foo"), None);
        stack.rollback().unwrap();
        assert_eq!(stack.get("foo"), Some("123"));
    }

    #[derive(Debug, Clone)]
    enum Mutation {
        Set(String, String),
        Delete(String),
        Begin,
        Commit,
    }

    fn mutation_strategy() -> impl Strategy<Value = Mutation> {
        prop_oneof![
            ("[a-d]", "[0-3]").prop_map(|(k, v)| Mutation::Set(k, v)),
            "[a-d]".prop_map(Mutation::Delete),
            Just(Mutation::Begin),
            Just(Mutation::Commit),
        ]
    }

    fn apply(stack: &mut TransactionStack, mutation: &Mutation, floor: usize) {
        match mutation {
            Mutation::Set(k, v) => stack.set(k.clone(), v.clone()),
            Mutation::Delete(k) => stack.delete(k),
            Mutation::Begin => stack.begin(),
            // Never commit below the layer under test.
            Mutation::Commit if stack.depth() > floor => stack.commit().unwrap(),
            Mutation::Commit => {}
        }
    }

    proptest! {
        #[test]
        fn rollback_restores_snapshot(
            base in prop::collection::btree_map("[a-d]", "[0-3]", 0..4),
            outer in prop::collection::vec(mutation_strategy(), 0..8),
            inner in prop::collection::vec(mutation_strategy(), 0..16),
        ) {
            let mut stack = TransactionStack::with_base(base.into_iter().collect());
            for m in &outer {
                apply(&mut stack, m, 0);
            }
            let before = stack.effective_store().clone();
            let depth_before = stack.depth();

            stack.begin();
            let floor = stack.depth();
            for m in &inner {
                apply(&mut stack, m, floor);
            }
            while stack.depth() > floor {
                stack.rollback().unwrap();
            }
            stack.rollback().unwrap();

            prop_assert_eq!(stack.depth(), depth_before);
            prop_assert_eq!(stack.effective_store(), &before);
        }

        #[test]
        fn depth_conservation(ops in prop::collection::vec(0u8..3, 0..32)) {
            let mut stack = TransactionStack::new();
            for op in ops {
                let depth = stack.depth();
                match op {
                    0 => {
                        stack.begin();
                        prop_assert_eq!(stack.depth(), depth + 1);
                    }
                    1 => {
                        let result = stack.commit();
                        if depth == 0 {
                            prop_assert_eq!(result, Err(CoreError::NoActiveTransaction));
                            prop_assert_eq!(stack.depth(), 0);
                        } else {
                            prop_assert!(result.is_ok());
                            prop_assert_eq!(stack.depth(), depth - 1);
                        }
                    }
                    _ => {
                        let result = stack.rollback();
                        if depth == 0 {
                            prop_assert_eq!(result, Err(CoreError::NoActiveTransaction));
                            prop_assert_eq!(stack.depth(), 0);
                        } else {
                            prop_assert!(result.is_ok());
                            prop_assert_eq!(stack.depth(), depth - 1);
                        }
                    }
                }
            }
        }

        #[test]
        fn commit_is_irreversible(
            key in "[a-d]",
            old in "[0-3]",
            new in "[4-7]",
        ) {
            let mut stack = TransactionStack::new();
            stack.set(key.clone(), old);
            stack.begin();
            stack.set(key.clone(), new.clone());
            stack.commit().unwrap();

            prop_assert_eq!(stack.get(&key), Some(new.as_str()));
            prop_assert_eq!(stack.rollback(), Err(CoreError::NoActiveTransaction));
            prop_assert_eq!(stack.get(&key), Some(new.as_str()));
        }

        #[test]
        fn delete_absent_key_is_idempotent(
            base in prop::collection::btree_map("[a-d]", "[0-3]", 0..4),
            key in "[e-h]",
            nested in any::<bool>(),
        ) {
            let mut stack = TransactionStack::with_base(base.into_iter().collect());
            if nested {
                stack.begin();
            }
            let before = stack.effective_store().clone();
            stack.delete(&key);
            prop_assert_eq!(stack.effective_store(), &before);
        }
    }
}
