//! The output block tree: a pure, append-only tree of scope/basic/exception-handler
//! blocks built bottom-up by the reconstructor, with no arena and no raw pointers — see
//! [`crate::reconstruct`] for how the tree is assembled without needing interior references into
//! blocks that are still under construction.

use alloc::vec::Vec;

/// A node in the output block tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<P> {
    /// A leaf holding one CFG node's payload.
    Basic(P),
    /// An ordered list of child blocks.
    Scope(ScopeBlock<P>),
    /// A protected block plus its ordered handler blocks.
    ExceptionHandler(ExceptionHandlerBlock<P>),
}

impl<P> Block<P> {
    /// Returns the payload if this is a basic block, `None` otherwise.
    pub fn as_basic(&self) -> Option<&P> {
        match self {
            Self::Basic(payload) => Some(payload),
            _ => None,
        }
    }

    /// Returns the exception-handler block if this is one, `None` otherwise.
    pub fn as_exception_handler(&self) -> Option<&ExceptionHandlerBlock<P>> {
        match self {
            Self::ExceptionHandler(eh) => Some(eh),
            _ => None,
        }
    }

    /// Visits every basic block's payload, in tree order, left to right.
    pub fn for_each_basic_block<'a>(&'a self, f: &mut impl FnMut(&'a P)) {
        match self {
            Self::Basic(payload) => f(payload),
            Self::Scope(scope) => {
                for child in &scope.children {
                    child.for_each_basic_block(f);
                }
            }
            Self::ExceptionHandler(eh) => {
                eh.protected.for_each_basic_block(f);
                for handler in &eh.handlers {
                    handler.for_each_basic_block(f);
                }
            }
        }
    }
}

/// An ordered list of child blocks. The output tree's root is always a scope block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeBlock<P> {
    children: Vec<Block<P>>,
}

impl<P> ScopeBlock<P> {
    pub(crate) fn new() -> Self {
        Self { children: Vec::new() }
    }

    pub(crate) fn push(&mut self, child: Block<P>) {
        self.children.push(child);
    }

    /// This scope's child blocks, in order.
    pub fn children(&self) -> &[Block<P>] {
        &self.children
    }

    /// The basic blocks reachable from this scope, in tree order, left to right.
    pub fn basic_blocks(&self) -> Vec<&P> {
        let mut out = Vec::new();
        for child in &self.children {
            child.for_each_basic_block(&mut |payload| out.push(payload));
        }
        out
    }
}

/// A protected block plus its ordered handler blocks, corresponding to one exception-handler
/// region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionHandlerBlock<P> {
    protected: ScopeBlock<P>,
    handlers: Vec<ScopeBlock<P>>,
}

impl<P> ExceptionHandlerBlock<P> {
    pub(crate) fn new(handler_count: usize) -> Self {
        Self {
            protected: ScopeBlock::new(),
            handlers: (0..handler_count).map(|_| ScopeBlock::new()).collect(),
        }
    }

    /// The protected ("try") scope block.
    pub fn protected(&self) -> &ScopeBlock<P> {
        &self.protected
    }

    /// The ordered handler ("catch") scope blocks, in declaration order.
    pub fn handlers(&self) -> &[ScopeBlock<P>] {
        &self.handlers
    }

    pub(crate) fn protected_mut(&mut self) -> &mut ScopeBlock<P> {
        &mut self.protected
    }

    pub(crate) fn handler_mut(&mut self, index: usize) -> &mut ScopeBlock<P> {
        &mut self.handlers[index]
    }
}
