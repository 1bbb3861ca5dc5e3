//! Parent-pointer helpers shared by the menu tree and the reporting chain.
//! The relational layer cannot prevent cycles in self-referential columns, so
//! every write that changes a parent pointer is checked here first.

use std::collections::{HashMap, HashSet};

/// Would setting `node`'s parent to `new_parent` close a loop?
///
/// Walks upward from `new_parent` through `parents`; a visited set guards
/// against pre-existing loops in the map itself.
pub(crate) fn would_cycle(node: i64, new_parent: Option<i64>, parents: &HashMap<i64, Option<i64>>) -> bool {
    let mut seen = HashSet::new();
    let mut current = new_parent;
    while let Some(id) = current {
        if id == node || !seen.insert(id) {
            return true;
        }
        current = parents.get(&id).copied().flatten();
    }
    false
}

/// Walk from `start` to the root, returning the visited ids in order
/// (`start` first). `None` signals a loop.
pub(crate) fn chain_from(start: i64, parents: &HashMap<i64, Option<i64>>) -> Option<Vec<i64>> {
    let mut seen = HashSet::new();
    let mut chain = Vec::new();
    let mut current = Some(start);
    while let Some(id) = current {
        if !seen.insert(id) {
            return None;
        }
        chain.push(id);
        current = parents.get(&id).copied().flatten();
    }
    Some(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parents(pairs: &[(i64, Option<i64>)]) -> HashMap<i64, Option<i64>> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let map = parents(&[(1, None)]);
        assert!(would_cycle(1, Some(1), &map));
    }

    #[test]
    fn reparent_under_descendant_is_a_cycle() {
        // 1 <- 2 <- 3; moving 1 under 3 would loop
        let map = parents(&[(1, None), (2, Some(1)), (3, Some(2))]);
        assert!(would_cycle(1, Some(3), &map));
        assert!(!would_cycle(3, Some(1), &map));
    }

    #[test]
    fn chain_walks_to_root() {
        let map = parents(&[(1, None), (2, Some(1)), (3, Some(2))]);
        assert_eq!(chain_from(3, &map), Some(vec![3, 2, 1]));
    }

    #[test]
    fn mutual_parents_detected() {
        let map = parents(&[(1, Some(2)), (2, Some(1))]);
        assert_eq!(chain_from(1, &map), None);
        assert!(would_cycle(3, Some(1), &map));
    }
}
