use crate::arena::NodeId;

/// Where a node hangs in the tree: the link that owns it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NodeSlot {
    /// The tree's root link.
    Root,
    /// The left link of the given parent.
    Left(NodeId),
    /// The right link of the given parent.
    Right(NodeId),
}
