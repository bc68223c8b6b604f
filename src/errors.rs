use crate::graph::NodeId;


#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathPlannerError {
    #[error("no path found")]
    NoPathFound, // Unable to find a path to the goal
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),
    #[error("nodes {from} and {to} are not adjacent")]
    NotAdjacent { from: NodeId, to: NodeId },
    #[error("a path needs at least one node")]
    EmptyPath,
    #[error("cannot join a path ending at {end} with one starting at {start}")]
    DisjointPaths { end: NodeId, start: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    #[error("item is already queued")]
    Duplicate,
    #[error("heap is empty")]
    Empty,
}

/// Raised by movement collaborators. Strategies never retry these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cannot move from {from} to {to}: not an open neighbor")]
    NotAdjacent { from: NodeId, to: NodeId },
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),
    #[error("move needs {needed} steps but only {left} remain")]
    BudgetExhausted { needed: u32, left: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScramError {
    #[error(transparent)]
    Planner(#[from] PathPlannerError),
    #[error(transparent)]
    Move(#[from] MoveError),
}
