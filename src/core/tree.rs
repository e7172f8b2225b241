//! Tree builder - pruned, search-aware assembly tree of one BOM version
//!
//! Produces a deduplicated hierarchical node list in post-order: every
//! node is appended only after all of its surviving children, so parents
//! follow their children in result order. Consumers that want parent-first
//! order re-derive it from the `parent_item_id` links.
//!
//! Unlike the explosion walk, dedup here is global: one visited set spans
//! the whole traversal, so a shared sub-assembly attaches to whichever
//! parent reaches it first and the result is a spanning tree, not a
//! lattice. That first-parent-wins policy is a documented limitation
//! (see DESIGN.md) and is kept exactly as the upstream system behaves.

use serde::Serialize;
use std::collections::HashSet;

use crate::core::graph::BomGraph;
use crate::core::identity::EntityId;
use crate::core::metadata::MetadataResolver;
use crate::core::search::build_inclusion_set;
use crate::entities::bom_line::BomLine;
use crate::entities::item::ItemKind;

/// Hard depth cap for the tree walk, not caller-configurable
pub const MAX_TREE_DEPTH: u32 = 64;

/// Hard cap on emitted tree nodes, not caller-configurable
pub const MAX_TREE_NODES: usize = 5000;

/// Display taxonomy for tree nodes
///
/// Raw classification kinds map onto this small closed set; anything
/// unrecognized lands in `Other` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Assembly,
    Part,
    Material,
    Other,
}

impl ItemType {
    /// Total mapping from raw master-data kind to display type
    pub fn from_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Assembly | ItemKind::Subassembly | ItemKind::Phantom => ItemType::Assembly,
            ItemKind::Part | ItemKind::Purchased => ItemType::Part,
            ItemKind::Raw | ItemKind::Consumable => ItemType::Material,
            _ => ItemType::Other,
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Assembly => write!(f, "assembly"),
            ItemType::Part => write!(f, "part"),
            ItemType::Material => write!(f, "material"),
            ItemType::Other => write!(f, "other"),
        }
    }
}

/// Tree request parameters
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Free-text search; non-empty prunes the tree to matches and their
    /// ancestor chains
    pub search: Option<String>,

    /// When false (and no search is active), childless non-root items are
    /// omitted so only assemblies remain
    pub include_leaves: bool,
}

/// One emitted tree node
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    pub item_id: EntityId,
    /// None for the root node only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_item_id: Option<EntityId>,
    pub code: String,
    pub name: String,
    pub item_type: ItemType,
    /// True when any line out of this node is flagged, or any surviving
    /// child reports errors
    pub has_errors: bool,
}

/// Mutable walk state threaded through the recursion
///
/// Request-scoped; nothing here outlives one `build_tree` call, so
/// concurrent invocations share no state.
struct TreeWalk<'a> {
    graph: &'a BomGraph,
    resolver: &'a MetadataResolver,
    inclusion: Option<HashSet<EntityId>>,
    include_leaves: bool,
    visited: HashSet<EntityId>,
    nodes: Vec<TreeNode>,
}

/// Build the assembly tree for one BOM version
///
/// `lines` must be the same batch the graph was built from; it feeds the
/// search inclusion map, which needs the global line order for its
/// first-parent-wins ancestry.
pub fn build_tree(
    graph: &BomGraph,
    resolver: &MetadataResolver,
    lines: &[BomLine],
    opts: &TreeOptions,
) -> Vec<TreeNode> {
    let inclusion = opts
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| build_inclusion_set(graph.root(), lines, resolver, term));

    let mut walk = TreeWalk {
        graph,
        resolver,
        inclusion,
        include_leaves: opts.include_leaves,
        visited: HashSet::new(),
        nodes: Vec::new(),
    };

    visit(&mut walk, graph.root(), None, 0);
    walk.nodes
}

/// Visit one item; returns the emitted node's `has_errors`, or false when
/// the item was pruned, deduplicated, or capped away (pruned subtrees never
/// contribute to a parent's error flag)
fn visit(walk: &mut TreeWalk<'_>, item: &EntityId, parent: Option<&EntityId>, depth: u32) -> bool {
    if depth > MAX_TREE_DEPTH || walk.nodes.len() >= MAX_TREE_NODES {
        return false;
    }

    // Global dedup: an item already attached under some parent is never
    // revisited under another
    if !walk.visited.insert(item.clone()) {
        return false;
    }

    let children = walk.graph.children_deduped(item);

    // Pruning never applies to the root
    if parent.is_some() {
        match &walk.inclusion {
            Some(included) => {
                if !included.contains(item) {
                    return false;
                }
            }
            None => {
                if !walk.include_leaves && children.is_empty() {
                    return false;
                }
            }
        }
    }

    let direct_errors = children.iter().any(|line| line.status.is_flagged());

    // Post-order: children first, collecting their error flags
    let child_items: Vec<EntityId> = children.iter().map(|line| line.item_id.clone()).collect();
    let mut child_errors = false;
    for child in &child_items {
        child_errors |= visit(walk, child, Some(item), depth + 1);
    }

    if walk.nodes.len() >= MAX_TREE_NODES {
        return false;
    }

    let meta = walk.resolver.resolve(item);
    let has_errors = direct_errors || child_errors;
    walk.nodes.push(TreeNode {
        item_id: item.clone(),
        parent_item_id: parent.cloned(),
        code: meta.code,
        name: meta.name,
        item_type: ItemType::from_kind(meta.kind),
        has_errors,
    });

    has_errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::ItemMeta;
    use crate::core::EntityPrefix;
    use crate::entities::bom_line::LineStatus;
    use std::collections::HashMap;

    fn item() -> EntityId {
        EntityId::new(EntityPrefix::Item)
    }

    fn line(parent: &EntityId, child: &EntityId) -> BomLine {
        BomLine::new(
            EntityId::new(EntityPrefix::Ver),
            parent.clone(),
            child.clone(),
            1,
            "test".to_string(),
        )
    }

    fn flagged_line(parent: &EntityId, child: &EntityId) -> BomLine {
        let mut l = line(parent, child);
        l.status = LineStatus::Error;
        l
    }

    fn meta(code: &str, name: &str) -> ItemMeta {
        ItemMeta {
            code: code.to_string(),
            name: name.to_string(),
            kind: ItemKind::Part,
        }
    }

    fn tree(root: &EntityId, lines: &[BomLine], opts: &TreeOptions) -> Vec<TreeNode> {
        let graph = BomGraph::build(root.clone(), lines);
        build_tree(&graph, &MetadataResolver::default(), lines, opts)
    }

    fn tree_with_meta(
        root: &EntityId,
        lines: &[BomLine],
        items: HashMap<EntityId, ItemMeta>,
        opts: &TreeOptions,
    ) -> Vec<TreeNode> {
        let graph = BomGraph::build(root.clone(), lines);
        build_tree(&graph, &MetadataResolver::new(items), lines, opts)
    }

    fn leaves_included() -> TreeOptions {
        TreeOptions {
            search: None,
            include_leaves: true,
        }
    }

    #[test]
    fn test_post_order_children_before_parent() {
        let (root, a, b) = (item(), item(), item());
        let nodes = tree(
            &root,
            &[line(&root, &a), line(&a, &b)],
            &leaves_included(),
        );

        let order: Vec<_> = nodes.iter().map(|n| n.item_id.clone()).collect();
        assert_eq!(order, vec![b.clone(), a.clone(), root.clone()]);
        assert_eq!(nodes[2].parent_item_id, None);
        assert_eq!(nodes[1].parent_item_id, Some(root));
    }

    #[test]
    fn test_diamond_attaches_to_first_parent_only() {
        let (root, p1, p2, x) = (item(), item(), item(), item());
        let nodes = tree(
            &root,
            &[
                line(&root, &p1),
                line(&root, &p2),
                line(&p1, &x),
                line(&p2, &x),
            ],
            &leaves_included(),
        );

        let x_nodes: Vec<_> = nodes.iter().filter(|n| n.item_id == x).collect();
        assert_eq!(x_nodes.len(), 1);
        assert_eq!(x_nodes[0].parent_item_id, Some(p1));
    }

    #[test]
    fn test_duplicate_lines_for_same_child_emit_once() {
        let (root, a) = (item(), item());
        let nodes = tree(
            &root,
            &[line(&root, &a), line(&root, &a)],
            &leaves_included(),
        );
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_assembly_only_view_omits_leaves() {
        let (root, sub, leaf) = (item(), item(), item());
        let nodes = tree(
            &root,
            &[line(&root, &sub), line(&sub, &leaf)],
            &TreeOptions::default(),
        );

        let ids: Vec<_> = nodes.iter().map(|n| n.item_id.clone()).collect();
        assert!(!ids.contains(&leaf));
        assert!(ids.contains(&sub));
        assert!(ids.contains(&root));
    }

    #[test]
    fn test_childless_root_is_always_emitted() {
        let root = item();
        let nodes = tree(&root, &[], &TreeOptions::default());
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].item_id, root);
        assert_eq!(nodes[0].parent_item_id, None);
    }

    #[test]
    fn test_direct_error_sets_flag() {
        let (root, a) = (item(), item());
        let nodes = tree(&root, &[flagged_line(&root, &a)], &leaves_included());

        let root_node = nodes.iter().find(|n| n.item_id == root).unwrap();
        assert!(root_node.has_errors);
        // the child itself has no outgoing flagged lines
        let a_node = nodes.iter().find(|n| n.item_id == a).unwrap();
        assert!(!a_node.has_errors);
    }

    #[test]
    fn test_errors_bubble_through_clean_parents() {
        // root -> a -> b, where b's outgoing line is flagged
        let (root, a, b, c) = (item(), item(), item(), item());
        let nodes = tree(
            &root,
            &[line(&root, &a), line(&a, &b), flagged_line(&b, &c)],
            &leaves_included(),
        );

        for id in [&b, &a, &root] {
            let node = nodes.iter().find(|n| n.item_id == *id).unwrap();
            assert!(node.has_errors, "expected bubbled error on {}", id);
        }
    }

    #[test]
    fn test_search_prunes_unmatched_branches() {
        let (root, keep, drop_) = (item(), item(), item());
        let mut items = HashMap::new();
        items.insert(keep.clone(), meta("K-1", "Seal Kit"));
        items.insert(drop_.clone(), meta("D-1", "Manual"));

        let nodes = tree_with_meta(
            &root,
            &[line(&root, &keep), line(&root, &drop_)],
            items,
            &TreeOptions {
                search: Some("seal".to_string()),
                include_leaves: false,
            },
        );

        let ids: Vec<_> = nodes.iter().map(|n| n.item_id.clone()).collect();
        assert!(ids.contains(&keep));
        assert!(ids.contains(&root));
        assert!(!ids.contains(&drop_));
    }

    #[test]
    fn test_pruned_child_does_not_contribute_errors() {
        // flagged line sits under the branch the search prunes away
        let (root, keep, dropped, under) = (item(), item(), item(), item());
        let mut items = HashMap::new();
        items.insert(keep.clone(), meta("K-1", "Seal Kit"));
        items.insert(dropped.clone(), meta("D-1", "Manual"));

        let nodes = tree_with_meta(
            &root,
            &[
                line(&root, &keep),
                line(&root, &dropped),
                flagged_line(&dropped, &under),
            ],
            items,
            &TreeOptions {
                search: Some("seal".to_string()),
                include_leaves: false,
            },
        );

        let root_node = nodes.iter().find(|n| n.item_id == root).unwrap();
        assert!(!root_node.has_errors);
    }

    #[test]
    fn test_search_excludes_whole_unmatched_subtree() {
        let (root, branch, deep) = (item(), item(), item());
        let mut items = HashMap::new();
        items.insert(branch.clone(), meta("B-1", "Manual"));
        items.insert(deep.clone(), meta("E-1", "Booklet"));

        let nodes = tree_with_meta(
            &root,
            &[line(&root, &branch), line(&branch, &deep)],
            items,
            &TreeOptions {
                search: Some("no-such-term".to_string()),
                include_leaves: true,
            },
        );

        // only the root survives
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].item_id, root);
    }

    #[test]
    fn test_node_cap_stops_the_walk_globally() {
        let root = item();
        let children: Vec<EntityId> = (0..(MAX_TREE_NODES + 50)).map(|_| item()).collect();
        let lines: Vec<_> = children.iter().map(|c| line(&root, c)).collect();

        let nodes = tree(&root, &lines, &leaves_included());
        assert_eq!(nodes.len(), MAX_TREE_NODES);
    }

    #[test]
    fn test_depth_cap_stops_recursion() {
        // chain longer than the cap
        let chain: Vec<EntityId> = (0..(MAX_TREE_DEPTH + 10)).map(|_| item()).collect();
        let lines: Vec<_> = chain.windows(2).map(|w| line(&w[0], &w[1])).collect();

        let nodes = tree(&chain[0], &lines, &leaves_included());
        // root at depth 0 plus MAX_TREE_DEPTH levels below it
        assert_eq!(nodes.len(), (MAX_TREE_DEPTH + 1) as usize);
    }

    #[test]
    fn test_cycle_terminates_via_visited_set() {
        let (root, a, b) = (item(), item(), item());
        let nodes = tree(
            &root,
            &[line(&root, &a), line(&a, &b), line(&b, &a)],
            &leaves_included(),
        );

        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_display_type_mapping_is_total() {
        assert_eq!(ItemType::from_kind(ItemKind::Assembly), ItemType::Assembly);
        assert_eq!(ItemType::from_kind(ItemKind::Phantom), ItemType::Assembly);
        assert_eq!(ItemType::from_kind(ItemKind::Purchased), ItemType::Part);
        assert_eq!(ItemType::from_kind(ItemKind::Raw), ItemType::Material);
        assert_eq!(ItemType::from_kind(ItemKind::Document), ItemType::Other);
        assert_eq!(ItemType::from_kind(ItemKind::Unknown), ItemType::Other);
    }

    #[test]
    fn test_missing_metadata_node_uses_placeholders() {
        let (root, a) = (item(), item());
        let nodes = tree(&root, &[line(&root, &a)], &leaves_included());

        let a_node = nodes.iter().find(|n| n.item_id == a).unwrap();
        assert_eq!(a_node.code, "N/A");
        assert_eq!(a_node.item_type, ItemType::Other);
    }
}
