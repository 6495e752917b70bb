//! Block-structure reconstruction for region-annotated control-flow graphs.
//!
//! Given a control-flow graph whose nodes are tagged with the region they belong to (see
//! [`CfgNode`]/[`CfgRegion`]), [`build_blocks`] rebuilds the nested scope structure those regions
//! describe: a tree of [`Block`]s in which ordinary nesting becomes [`Block::Scope`] and each
//! exception handler's protected code and its handlers become one [`Block::ExceptionHandler`].
//!
//! The crate does this in three passes, one module each:
//!
//! - [`enumerator`] fixes a deterministic, priority-ordered list of each node's successors.
//! - [`sorter`] uses that order to produce a single deterministic visitation order for the whole
//!   graph, dropping back edges.
//! - [`reconstruct`] walks that order once, maintaining a stack of open scopes, to build the tree.
#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod block;
mod cfg;
mod enumerator;
mod reconstruct;
mod sorter;

pub use self::{
    block::{Block, ExceptionHandlerBlock, ScopeBlock},
    cfg::{CfgNode, CfgRegion, RegionKind},
    reconstruct::build_blocks,
};
