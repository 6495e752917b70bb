use smallvec::SmallVec;

/// Observer capabilities required of a CFG node by the block-structure reconstructor.
///
/// Implementors are expected to be cheap, `Copy` handles into some externally-owned graph (an
/// entity index, a pointer-like reference, ...), not owned data. This crate never constructs or
/// mutates a node; it only ever asks one for its payload, its region, and its successors.
pub trait CfgNode: Copy + Eq + core::hash::Hash {
    /// The opaque contents carried by a basic block. The reconstructor never inspects this, only
    /// clones it into the output tree.
    type Payload: Clone;
    /// The region type this node's `region()` returns.
    type Region: CfgRegion<Node = Self>;

    /// The payload to be carried by this node's basic block in the output tree.
    fn payload(self) -> Self::Payload;

    /// The innermost region this node belongs to.
    fn region(self) -> Self::Region;

    /// The fall-through successor of this node, i.e. the node reached when control does not
    /// branch, if one exists.
    fn fall_through(self) -> Option<Self>;

    /// The conditional successors of this node, in declaration order.
    fn conditional_successors(self) -> SmallVec<[Self; 2]>;

    /// The abnormal successors of this node (e.g. explicit throw/branch-out edges), in
    /// declaration order.
    fn abnormal_successors(self) -> SmallVec<[Self; 2]>;
}

/// Observer capabilities required of a region by the block-structure reconstructor.
///
/// Like [`CfgNode`], implementors are expected to be cheap `Copy` handles.
pub trait CfgRegion: Copy + Eq + core::hash::Hash {
    /// The node type whose `region()` returns this region.
    type Node: CfgNode<Region = Self>;

    /// This region's parent region, or `None` if this is the CFG root region.
    fn parent(self) -> Option<Self>;

    /// The node reached first upon entering this region.
    fn entry_point(self) -> Self::Node;

    /// Whether this is a plain region or an exception-handler region, and if the latter, its
    /// protected and handler sub-regions.
    fn kind(self) -> RegionKind<Self>;

    /// Does `node` lie within this region (directly, or within one of its descendant regions)?
    fn contains(self, node: Self::Node) -> bool;
}

/// The two region variants relevant to block-structure reconstruction.
#[derive(Clone)]
pub enum RegionKind<R> {
    /// An anonymous scope with no special sub-structure.
    Plain,
    /// A region with one protected sub-region and an ordered list of handler sub-regions. Its
    /// children in the region tree are precisely those sub-regions.
    ExceptionHandler {
        protected: R,
        handlers: SmallVec<[R; 2]>,
    },
}

