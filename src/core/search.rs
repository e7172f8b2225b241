//! Search inclusion set - matched items plus their ancestor chains
//!
//! The tree view prunes to this set when a search term is given: a node
//! survives only if it matched the term itself or sits on the path from
//! the root to a match.
//!
//! Ancestry is derived from a single-valued child -> first-parent map, so
//! an item reachable through several parents is walked up through whichever
//! parent its first line named. That mirrors the tree view's own
//! first-parent-wins attachment (see DESIGN.md).

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::core::identity::EntityId;
use crate::core::metadata::MetadataResolver;
use crate::core::tree::MAX_TREE_DEPTH;
use crate::entities::bom_line::BomLine;

/// Compute the set of items matching `term` plus every ancestor of a match
///
/// Matching is a case-insensitive containment test on the real item code
/// and name; items without master data never match. The upward walk stops
/// at the root or after [`MAX_TREE_DEPTH`] hops, so a malformed parent
/// chain (including a cycle that never reaches the root) cannot loop.
pub fn build_inclusion_set(
    root: &EntityId,
    lines: &[BomLine],
    resolver: &MetadataResolver,
    term: &str,
) -> HashSet<EntityId> {
    let mut first_parent: HashMap<EntityId, EntityId> = HashMap::new();
    for line in lines {
        first_parent
            .entry(line.item_id.clone())
            .or_insert_with(|| line.parent_item_id.clone());
    }

    let mut candidates: BTreeSet<&EntityId> = BTreeSet::new();
    candidates.insert(root);
    for line in lines {
        candidates.insert(&line.item_id);
    }

    let needle = term.to_lowercase();
    let mut included = HashSet::new();

    for id in candidates {
        let Some(meta) = resolver.get(id) else {
            continue;
        };
        if !meta.code.to_lowercase().contains(&needle)
            && !meta.name.to_lowercase().contains(&needle)
        {
            continue;
        }
        included.insert(id.clone());

        let mut current = id.clone();
        for _ in 0..MAX_TREE_DEPTH {
            if current == *root {
                break;
            }
            match first_parent.get(&current) {
                Some(parent) => {
                    included.insert(parent.clone());
                    current = parent.clone();
                }
                None => break,
            }
        }
    }

    included
}
