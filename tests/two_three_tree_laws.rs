//! Property-based tests for TwoThreeTree: agreement with an ordered-set
//! model, the perfectly balanced height bound, and ceiling-search laws.

use cursory::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

fn arbitrary_keys(max_size: usize) -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(any::<u16>(), 0..max_size)
}

/// Builds a tree and the ordered-set model it must agree with; duplicate
/// keys in the input are rejected by the tree and dropped by the model.
fn tree_and_model(keys: &[u16]) -> (TwoThreeTree<u16>, BTreeSet<u16>) {
    let mut tree = TwoThreeTree::new();
    let mut model = BTreeSet::new();

    for key in keys {
        match tree.insert(*key) {
            Ok(()) => {
                assert!(model.insert(*key));
            }
            Err(ContainerError::DuplicateItems) => {
                assert!(model.contains(key));
            }
            Err(error) => panic!("unexpected insert error: {error}"),
        }
    }

    (tree, model)
}

// =============================================================================
// Insertion Laws
// =============================================================================

proptest! {
    /// Law: iteration yields exactly the distinct keys in ascending
    /// order.
    #[test]
    fn prop_iteration_matches_the_ordered_model(keys in arbitrary_keys(200)) {
        let (tree, model) = tree_and_model(&keys);

        let from_tree: Vec<u16> = tree.iter().copied().collect();
        let from_model: Vec<u16> = model.iter().copied().collect();
        prop_assert_eq!(from_tree, from_model);

        prop_assert_eq!(tree.minimum().ok(), model.first());
        prop_assert_eq!(tree.maximum().ok(), model.last());
    }

    /// Law: all leaves sit at the same depth, so the height is at most
    /// log2(n) + 1 and at least log3(n).
    #[test]
    fn prop_height_is_logarithmic(keys in arbitrary_keys(300)) {
        let (tree, model) = tree_and_model(&keys);
        prop_assume!(!model.is_empty());

        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let upper = (model.len() as f64).log2().floor() as usize + 1;
        prop_assert!(tree.height() <= upper);
    }
}

// =============================================================================
// Deletion Laws
// =============================================================================

proptest! {
    /// Law: after deleting an arbitrary subset, iteration matches the
    /// model with the same subset removed.
    #[test]
    fn prop_deletion_matches_the_ordered_model(
        keys in arbitrary_keys(120),
        deletions in arbitrary_keys(120),
    ) {
        let (mut tree, mut model) = tree_and_model(&keys);

        for key in &deletions {
            let expected = if model.remove(key) {
                Ok(())
            } else {
                Err(ContainerError::ItemNotFound)
            };
            prop_assert_eq!(tree.delete(key), expected);
        }

        let from_tree: Vec<u16> = tree.iter().copied().collect();
        let from_model: Vec<u16> = model.iter().copied().collect();
        prop_assert_eq!(from_tree, from_model);
        prop_assert_eq!(tree.len(), model.len());
    }
}

// =============================================================================
// Search Laws
// =============================================================================

proptest! {
    /// Law: keyed search finds exactly the keys the model contains.
    #[test]
    fn prop_search_agrees_with_membership(keys in arbitrary_keys(100), target: u16) {
        let (mut tree, model) = tree_and_model(&keys);

        tree.search(&target);

        prop_assert_eq!(tree.item_exists(), model.contains(&target));
        if tree.item_exists() {
            prop_assert_eq!(tree.item(), Ok(&target));
        }
    }

    /// Law: a restarted ceiling search lands on the model's first key at
    /// or above the target.
    #[test]
    fn prop_ceiling_search_matches_the_model(keys in arbitrary_keys(100), target: u16) {
        let (mut tree, model) = tree_and_model(&keys);

        tree.search_ceiling_of(&target);

        let expected = model.range(target..).next();
        prop_assert_eq!(tree.item().ok(), expected);
    }
}
