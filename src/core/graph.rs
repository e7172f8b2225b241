//! BOM graph loader - adjacency built from a batched edge list
//!
//! One `BomGraph` is built per invocation from the full line set of a
//! single version. Construction is O(E) over the batch; traversal never
//! goes back to storage. The graph should be a DAG but nothing here assumes
//! it: cycles and diamonds are the traversal engines' problem to contain.

use std::collections::{BTreeSet, HashMap};

use crate::core::identity::EntityId;
use crate::entities::bom_line::BomLine;

/// Parent -> children adjacency over one BOM version's lines
#[derive(Debug)]
pub struct BomGraph {
    root: EntityId,
    children_by_parent: HashMap<EntityId, Vec<BomLine>>,
    referenced: BTreeSet<EntityId>,
}

impl BomGraph {
    /// Build the adjacency map and the referenced-id set in one pass
    ///
    /// Line order within each parent is preserved exactly as supplied;
    /// callers control ordering by sorting the batch before building.
    pub fn build(root: EntityId, lines: &[BomLine]) -> Self {
        let mut children_by_parent: HashMap<EntityId, Vec<BomLine>> = HashMap::new();
        let mut referenced = BTreeSet::new();
        referenced.insert(root.clone());

        for line in lines {
            referenced.insert(line.parent_item_id.clone());
            referenced.insert(line.item_id.clone());
            children_by_parent
                .entry(line.parent_item_id.clone())
                .or_default()
                .push(line.clone());
        }

        Self {
            root,
            children_by_parent,
            referenced,
        }
    }

    /// The item every traversal starts from
    pub fn root(&self) -> &EntityId {
        &self.root
    }

    /// Outgoing lines of an item, in supplied order
    pub fn children(&self, parent: &EntityId) -> &[BomLine] {
        self.children_by_parent
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Outgoing lines deduplicated by child item id, first line per child wins
    ///
    /// The tree view attaches each child once per parent even when the raw
    /// data carries duplicate lines for the same pair.
    pub fn children_deduped(&self, parent: &EntityId) -> Vec<&BomLine> {
        let mut seen = BTreeSet::new();
        self.children(parent)
            .iter()
            .filter(|line| seen.insert(line.item_id.clone()))
            .collect()
    }

    /// Every item id the graph mentions: root, all parents, all children
    ///
    /// This is the key set for the single batched metadata fetch.
    pub fn referenced(&self) -> &BTreeSet<EntityId> {
        &self.referenced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityPrefix;

    fn item() -> EntityId {
        EntityId::new(EntityPrefix::Item)
    }

    fn line(parent: &EntityId, child: &EntityId, qty: u32) -> BomLine {
        BomLine::new(
            EntityId::new(EntityPrefix::Ver),
            parent.clone(),
            child.clone(),
            qty,
            "test".to_string(),
        )
    }

    #[test]
    fn test_build_collects_referenced_ids() {
        let root = item();
        let a = item();
        let b = item();
        let graph = BomGraph::build(root.clone(), &[line(&root, &a, 2), line(&a, &b, 3)]);

        assert_eq!(graph.referenced().len(), 3);
        assert!(graph.referenced().contains(&root));
        assert!(graph.referenced().contains(&b));
    }

    #[test]
    fn test_children_preserve_supplied_order() {
        let root = item();
        let a = item();
        let b = item();
        let graph = BomGraph::build(root.clone(), &[line(&root, &b, 1), line(&root, &a, 1)]);

        let children = graph.children(&root);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].item_id, b);
        assert_eq!(children[1].item_id, a);
    }

    #[test]
    fn test_children_of_leaf_is_empty() {
        let root = item();
        let a = item();
        let graph = BomGraph::build(root.clone(), &[line(&root, &a, 1)]);

        assert!(graph.children(&a).is_empty());
    }

    #[test]
    fn test_children_deduped_keeps_first_line_per_child() {
        let root = item();
        let a = item();
        let first = line(&root, &a, 2);
        let first_id = first.id.clone();
        let graph = BomGraph::build(root.clone(), &[first, line(&root, &a, 5)]);

        let deduped = graph.children_deduped(&root);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, first_id);
        assert_eq!(deduped[0].quantity, 2);
        // the raw adjacency still carries both lines
        assert_eq!(graph.children(&root).len(), 2);
    }
}
