//! Explosion engine - flattened quantity roll-up of one BOM version
//!
//! Depth-first walk over the loaded adjacency producing one row per edge
//! reached, with the cumulative quantity along the descent path. The walk
//! is iterative: the explicit frame stack doubles as the per-branch
//! ancestor stack, so cycle containment and the 256-level depth cap never
//! depend on the call stack.
//!
//! Cycles are not an error. A line that closes a cycle is still emitted as
//! a row (the bad edge stays visible to the reader) but is never descended
//! into, so the walk terminates on any input. Caps truncate silently.

use serde::Serialize;

use crate::core::graph::BomGraph;
use crate::core::identity::EntityId;
use crate::core::metadata::MetadataResolver;
use crate::entities::bom_line::{LineRole, LineStatus};

/// Hard upper bound on explosion depth
pub const MAX_EXPLOSION_DEPTH: u32 = 256;

/// Hard upper bound on emitted rows
pub const MAX_EXPLOSION_ROWS: usize = 200_000;

/// Caller-tunable traversal limits, clamped to the hard bounds
#[derive(Debug, Clone, Copy)]
pub struct ExplodeOptions {
    max_depth: u32,
    max_rows: usize,
}

impl ExplodeOptions {
    /// Clamp raw request values into the supported ranges
    ///
    /// Zero or negative inputs collapse to 1; values past the hard caps
    /// are pulled down to them.
    pub fn clamped(max_depth: i64, max_rows: i64) -> Self {
        Self {
            max_depth: max_depth.clamp(1, MAX_EXPLOSION_DEPTH as i64) as u32,
            max_rows: max_rows.clamp(1, MAX_EXPLOSION_ROWS as i64) as usize,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }
}

impl Default for ExplodeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_EXPLOSION_DEPTH,
            max_rows: MAX_EXPLOSION_ROWS,
        }
    }
}

/// One flattened row: an edge reached by the walk plus its roll-up fields
#[derive(Debug, Clone, Serialize)]
pub struct ExplosionRow {
    pub line_id: EntityId,
    pub parent_item_id: EntityId,
    pub item_id: EntityId,
    pub item_code: String,
    pub item_name: String,
    pub role: LineRole,
    pub qty: u32,
    pub total_qty: u64,
    pub uom_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_no: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub line_status: LineStatus,
    /// 1-based depth of the row's edge (root children are level 1)
    pub level: u32,
    /// Dot-joined item ids from the root down to this row's child item.
    /// Display aid only; the same item can appear under several paths.
    pub path: String,
}

/// An item currently open on the walk's branch
struct Frame {
    item: EntityId,
    /// Cumulative quantity multiplier for this item's children
    total: u64,
    /// Index of the next child line to visit
    next: usize,
    /// Dot-joined ids from the root to this item
    path: String,
}

/// Flatten one BOM version into explosion rows
///
/// The root itself is never a row; only edges are. Children are visited in
/// loader order. For acyclic data, `total_qty` of every row is the exact
/// product of line quantities along its unique root path (saturating at
/// `u64::MAX` rather than wrapping).
pub fn explode(
    graph: &BomGraph,
    resolver: &MetadataResolver,
    opts: &ExplodeOptions,
) -> Vec<ExplosionRow> {
    let mut rows: Vec<ExplosionRow> = Vec::new();
    let mut stack: Vec<Frame> = vec![Frame {
        item: graph.root().clone(),
        total: 1,
        next: 0,
        path: graph.root().to_string(),
    }];

    loop {
        // Global row cutoff, checked before every emission
        if rows.len() >= opts.max_rows {
            break;
        }

        // Depth of the currently open item = frames below it
        let (parent_item, parent_total, parent_path, next, depth) = match stack.last() {
            Some(top) => (
                top.item.clone(),
                top.total,
                top.path.clone(),
                top.next,
                (stack.len() - 1) as u32,
            ),
            None => break,
        };

        let children = graph.children(&parent_item);
        if next >= children.len() {
            stack.pop();
            continue;
        }
        if let Some(top) = stack.last_mut() {
            top.next += 1;
        }

        let line = &children[next];
        let total_qty = parent_total.saturating_mul(u64::from(line.quantity));
        let path = format!("{}.{}", parent_path, line.item_id);
        let meta = resolver.resolve(&line.item_id);

        rows.push(ExplosionRow {
            line_id: line.id.clone(),
            parent_item_id: line.parent_item_id.clone(),
            item_id: line.item_id.clone(),
            item_code: meta.code,
            item_name: meta.name,
            role: line.role,
            qty: line.quantity,
            total_qty,
            uom_code: line.uom_code.clone(),
            position_no: line.position_no,
            notes: line.notes.clone(),
            line_status: line.status,
            level: depth + 1,
            path: path.clone(),
        });

        // Descend unless the child is already open on this branch (cycle)
        // or the next level would pass the depth cap
        let on_branch = stack.iter().any(|frame| frame.item == line.item_id);
        if !on_branch && depth + 1 < opts.max_depth {
            stack.push(Frame {
                item: line.item_id.clone(),
                total: total_qty,
                next: 0,
                path,
            });
        }
    }

    rows
}
