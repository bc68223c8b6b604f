//! Strategies for an agent in a weighted cavern graph.
//!
//! - [`hunt`] finds an orb whose location is only hinted at by per-tile distances
//! - [`scram`] escapes to the exit within a step budget, detouring for gold
//!
//! Both work against narrow capability traits ([`hunt::HuntView`],
//! [`scram::ScramView`]) so they can run on the in-memory doubles in [`sim`].

mod collections;
pub mod config;
pub mod errors;
pub mod graph;
pub mod graph_algos;
pub mod heap;
pub mod hunt;
pub mod oracle;
pub mod path;
pub mod scram;
pub mod sim;

pub use collections::FxIndexSet;
pub use config::{HuntConfig, ScramConfig};
pub use errors::{HeapError, MoveError, PathPlannerError, ScramError};
pub use graph::{Graph, NodeId};
pub use heap::{Heap, Order};
pub use hunt::{HuntReport, HuntView, NeighborObservation, hunt};
pub use oracle::PathOracle;
pub use path::Path;
pub use scram::{DetourRecord, ScramReport, ScramView, optimize, plan_escape, scram, walk};
