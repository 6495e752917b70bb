//! The deterministic sorter: an iterative reverse-post-order traversal of the CFG, using
//! the child enumerator for successor order and silently dropping back edges.
//!
//! This mirrors the classic two-state ("seen", "expanded") iterative depth-first traversal used
//! elsewhere in this workspace (e.g. computing a dominator tree's reverse post-order): a node is
//! pushed "seen" the first time it's reached; the first time it's popped its unvisited successors
//! are pushed and it's re-pushed "expanded"; the second time it's popped (now "expanded"), it's
//! emitted to the post-order. Reversing that post-order yields an order where every forward edge
//! points from an earlier node to a later one, with cycles broken at whichever edge would
//! otherwise revisit an already-seen node.
//!
//! Successors are pushed onto the stack in the child enumerator's order, which means they are
//! *popped*, and therefore explored, in the reverse of that order — so that after the final
//! reversal of the whole post-order, priority is restored: the highest-priority successor (the
//! fall-through target) ends up earliest in the output, exactly as if it had been explored first.

use alloc::vec::Vec;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::{cfg::CfgNode, enumerator};

struct Frame<N> {
    node: N,
    successors: SmallVec<[N; 4]>,
    expanded: bool,
}

/// Returns all nodes reachable from `entry`, ordered so that every forward edge (one not part of
/// a cycle) points from an earlier node to a later one. Back edges are ignored. Unreachable nodes
/// are omitted.
pub fn topological_order<N: CfgNode>(entry: N) -> Vec<N> {
    let mut seen: HashSet<N> = HashSet::new();
    let mut postorder: Vec<N> = Vec::new();
    let mut stack: Vec<Frame<N>> = Vec::new();

    seen.insert(entry);
    stack.push(Frame {
        node: entry,
        successors: enumerator::children(entry),
        expanded: false,
    });

    while let Some(top) = stack.last() {
        if !top.expanded {
            // Snapshot the successors before pushing anything, since pushing new frames would
            // otherwise alias this borrow of `stack`.
            let successors = top.successors.clone();
            stack.last_mut().expect("just observed via stack.last()").expanded = true;

            // Push in enumerator order so we *pop*, and thus explore, in reverse: this is what
            // makes the post-order-then-reverse dance below restore priority order in the output.
            for succ in successors {
                if seen.insert(succ) {
                    log::trace!("sorter: discovered a new successor during traversal");
                    stack.push(Frame {
                        successors: enumerator::children(succ),
                        node: succ,
                        expanded: false,
                    });
                }
            }
            continue;
        }

        let frame = stack.pop().expect("stack is non-empty in this branch");
        postorder.push(frame.node);
    }

    postorder.reverse();
    postorder
}
