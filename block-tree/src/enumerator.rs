//! The child enumerator (see module docs on [`crate::sorter`] for how its output is consumed).
//!
//! Given a node, produces its successors in a fixed priority order: fall-through first, then
//! conditional successors, then abnormal successors, then (synthetically) the entry points of any
//! exception handlers whose protected region contains the node. This order is what makes the
//! sorter keep fall-through runs contiguous while still guaranteeing a protected region's code
//! always precedes its handlers in the output.

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::cfg::{CfgNode, CfgRegion, RegionKind};

/// Returns the ordered, duplicate-free successors of `node`.
pub fn children<N: CfgNode>(node: N) -> SmallVec<[N; 4]> {
    let mut seen = HashSet::with_capacity(4);
    let mut out = SmallVec::new();

    let mut push = |out: &mut SmallVec<[N; 4]>, seen: &mut HashSet<N>, n: N| {
        if seen.insert(n) {
            out.push(n);
        }
    };

    if let Some(fall_through) = node.fall_through() {
        push(&mut out, &mut seen, fall_through);
    }
    for succ in node.conditional_successors() {
        push(&mut out, &mut seen, succ);
    }
    for succ in node.abnormal_successors() {
        push(&mut out, &mut seen, succ);
    }
    for handler_entry in handler_entries(node) {
        push(&mut out, &mut seen, handler_entry);
    }

    out
}

/// Walks `node`'s region chain outward, collecting the entry points of every exception handler
/// whose protected sub-region contains `node`, in nearest-to-outermost order, each contributing
/// its own handlers in declaration order.
fn handler_entries<N: CfgNode>(node: N) -> SmallVec<[N; 2]> {
    let mut out = SmallVec::new();
    let mut cursor = Some(node.region());
    while let Some(region) = cursor {
        if let RegionKind::ExceptionHandler { protected, handlers } = region.kind() {
            if protected.contains(node) {
                for handler in handlers {
                    out.push(handler.entry_point());
                }
            }
        }
        cursor = region.parent();
    }
    out
}
