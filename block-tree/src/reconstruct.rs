//! The scope-stack reconstructor: walks the deterministic order from [`crate::sorter`] once,
//! maintaining a stack of frames that mirrors the region chain currently open, and appends each
//! node's basic block into the innermost open frame.
//!
//! Exception-handler regions need one wrinkle. A region's `protected` and `handlers` sub-regions
//! are themselves ordinary regions in the chain, but their content has to land inside the single
//! [`ExceptionHandlerBlock`] owned by their parent frame rather than being wrapped in their own
//! nested scope block. And because the deterministic order can leave a protected region, visit a
//! handler, and come back to the protected region before the exception-handler region itself is
//! ever left, a frame for `protected` or a handler can't own its content directly either — if it
//! did, popping it on the first departure would finalize a scope block that a later re-entry then
//! has no way to keep appending to.
//!
//! So `Protected` and `Handler` frames don't carry storage at all. They carry the stack index of
//! their owning [`FramePayload::ExceptionHandler`] frame and route every append through it. Indices
//! stay valid for as long as the owner is on the stack, because frames are only ever pushed and
//! popped at the end of the stack: popping a child never moves an ancestor. The owner frame itself
//! is only popped once the reconciliation below decides the exception-handler region is no longer
//! on the path to the next node, at which point every one of its sub-regions has necessarily
//! already been closed.

use alloc::vec::Vec;

use crate::{
    block::{Block, ExceptionHandlerBlock, ScopeBlock},
    cfg::{CfgNode, CfgRegion, RegionKind},
    sorter,
};

enum FramePayload<P> {
    Scope(ScopeBlock<P>),
    ExceptionHandler(ExceptionHandlerBlock<P>),
    Protected { owner: usize },
    Handler { owner: usize, index: usize },
}

struct Frame<R, P> {
    region: R,
    payload: FramePayload<P>,
}

/// Reconstructs the block tree reachable from `entry`.
pub fn build_blocks<N: CfgNode>(entry: N) -> ScopeBlock<N::Payload> {
    let order = sorter::topological_order(entry);
    log::debug!("reconstructing block tree over {} node(s)", order.len());

    let mut stack: Vec<Frame<N::Region, N::Payload>> = Vec::new();

    for node in order {
        let chain = region_chain(node.region());
        let common = common_prefix_len(&stack, &chain);

        while stack.len() > common {
            close_top(&mut stack);
        }
        for region in &chain[common..] {
            open(&mut stack, *region);
        }

        let block = Block::Basic(node.payload());
        append(&mut stack, stack.len() - 1, block);
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }

    match stack.pop() {
        Some(Frame { payload: FramePayload::Scope(scope), .. }) => scope,
        Some(_) => unreachable!("the root frame is always a plain scope"),
        None => ScopeBlock::new(),
    }
}

/// The chain of regions from the CFG's root region down to (and including) `region`.
fn region_chain<R: CfgRegion>(region: R) -> Vec<R> {
    let mut chain = alloc::vec![region];
    let mut cursor = region;
    while let Some(parent) = cursor.parent() {
        chain.push(parent);
        cursor = parent;
    }
    chain.reverse();
    chain
}

/// The number of leading frames already open whose region matches the corresponding entry in
/// `chain`; the frames beyond this point need to close, and the chain entries beyond this point
/// need a frame opened for them.
fn common_prefix_len<R: CfgRegion, P>(stack: &[Frame<R, P>], chain: &[R]) -> usize {
    stack.iter().zip(chain.iter()).take_while(|(frame, region)| frame.region == **region).count()
}

/// Pushes a frame for `region`, which must be the next entry in some node's region chain
/// immediately following the stack's current top.
fn open<R: CfgRegion, P>(stack: &mut Vec<Frame<R, P>>, region: R) {
    if let Some(parent_idx) = stack.len().checked_sub(1) {
        if let RegionKind::ExceptionHandler { protected, handlers } = stack[parent_idx].region.kind() {
            if protected == region {
                log::trace!("reconstruct: entering protected sub-region at depth {}, reusing existing protected scope block", parent_idx + 1);
                stack.push(Frame { region, payload: FramePayload::Protected { owner: parent_idx } });
                return;
            }
            if let Some(index) = handlers.iter().position(|&handler| handler == region) {
                log::trace!("reconstruct: entering handler sub-region {index} at depth {}, opening a fresh handler scope block", parent_idx + 1);
                stack.push(Frame { region, payload: FramePayload::Handler { owner: parent_idx, index } });
                return;
            }
            panic!(
                "malformed region tree: region's parent is an exception-handler region, but the \
                 region is neither that handler's protected sub-region nor among its handler \
                 sub-regions"
            );
        }
    }

    let payload = match region.kind() {
        RegionKind::Plain => {
            log::trace!("reconstruct: entering plain region at depth {}", stack.len());
            FramePayload::Scope(ScopeBlock::new())
        }
        RegionKind::ExceptionHandler { handlers, .. } => {
            log::trace!(
                "reconstruct: entering exception-handler region at depth {} with {} handler(s)",
                stack.len(),
                handlers.len()
            );
            FramePayload::ExceptionHandler(ExceptionHandlerBlock::new(handlers.len()))
        }
    };
    stack.push(Frame { region, payload });
}

/// Pops the top frame and, if it owned its own storage, appends the block it built into the new
/// top frame. `Protected`/`Handler` frames own no storage of their own, so popping one is a no-op
/// beyond removing the marker.
fn close_top<R: CfgRegion, P>(stack: &mut Vec<Frame<R, P>>) {
    let depth = stack.len() - 1;
    let frame = stack.pop().expect("close_top is only called with a non-empty stack");
    let block = match frame.payload {
        FramePayload::Scope(scope) => {
            log::trace!("reconstruct: leaving plain region at depth {depth}");
            Block::Scope(scope)
        }
        FramePayload::ExceptionHandler(eh) => {
            log::trace!("reconstruct: leaving exception-handler region at depth {depth}");
            Block::ExceptionHandler(eh)
        }
        FramePayload::Protected { .. } => {
            log::trace!("reconstruct: leaving protected sub-region at depth {depth}, owner keeps the scope block open");
            return;
        }
        FramePayload::Handler { .. } => {
            log::trace!("reconstruct: leaving handler sub-region at depth {depth}, owner keeps the scope block open");
            return;
        }
    };

    let target = stack.len().checked_sub(1).expect("a non-root frame always has a parent");
    append(stack, target, block);
}

/// Where `append` should actually write, after following owner indirection.
enum Dest {
    Scope(usize),
    Protected(usize),
    Handler(usize, usize),
}

/// Appends `block` into whatever frame `target` logically accumulates into, following owner
/// indirection for `Protected`/`Handler` frames.
fn append<R: CfgRegion, P>(stack: &mut [Frame<R, P>], target: usize, block: Block<P>) {
    let dest = match &stack[target].payload {
        FramePayload::Scope(_) => Dest::Scope(target),
        FramePayload::Protected { owner } => Dest::Protected(*owner),
        FramePayload::Handler { owner, index } => Dest::Handler(*owner, *index),
        FramePayload::ExceptionHandler(_) => {
            unreachable!("a node's innermost region is never itself an exception-handler region")
        }
    };

    match dest {
        Dest::Scope(index) => match &mut stack[index].payload {
            FramePayload::Scope(scope) => scope.push(block),
            _ => unreachable!(),
        },
        Dest::Protected(owner) => match &mut stack[owner].payload {
            FramePayload::ExceptionHandler(eh) => eh.protected_mut().push(block),
            _ => unreachable!("a Protected frame's owner is always an ExceptionHandler frame"),
        },
        Dest::Handler(owner, index) => match &mut stack[owner].payload {
            FramePayload::ExceptionHandler(eh) => eh.handler_mut(index).push(block),
            _ => unreachable!("a Handler frame's owner is always an ExceptionHandler frame"),
        },
    }
}
