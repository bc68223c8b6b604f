//! Orb hunt: reach a target whose location is only hinted at.
//!
//! The agent sees its own tile, the open neighbors and a distance hint for
//! each of them. The walk is depth-first: neighbors are tried best hint first,
//! dead ends are backed out of one tile at a time, and the walk stops the
//! moment the agent stands on the orb.

use crate::collections::FxHashSet;
use crate::config::HuntConfig;
use crate::errors::MoveError;
use crate::graph::NodeId;
use crate::heap::Heap;

use tracing::{debug, info, trace};


/// One open neighbor as seen from the current tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighborObservation {
    pub id: NodeId,
    /// Distance from this neighbor to the orb, ignoring walls
    pub distance: u32,
}


/// What the agent can see and do while hunting
pub trait HuntView {

    fn current_location(&self) -> NodeId;

    /// Open neighbors of the current tile, in no particular order
    fn neighbors(&self) -> Vec<NeighborObservation>;

    /// Zero exactly when standing on the orb
    fn distance_to_orb(&self) -> u32;

    /// Step to an open neighbor
    fn move_to(&mut self, id: NodeId) -> Result<(), MoveError>;
}


#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuntReport {
    pub found: bool,
    /// Moves made, backtracking included
    pub steps: usize,
    /// Distinct tiles stood on
    pub visited: usize,
}


/// A tile on the current branch with the neighbors still to try from it
struct Frame {
    node: NodeId,
    candidates: Heap<NeighborObservation>,
}


/// Walk until standing on the orb or until every tile reachable from the start has been tried
///
/// Moves are only ever made to an unvisited neighbor or back to the tile the
/// agent came from, so the walk makes at most two moves per reachable tile.
pub fn hunt<V: HuntView>(view: &mut V, config: &HuntConfig) -> Result<HuntReport, MoveError> {
    let mut visited = FxHashSet::default();
    let mut steps = 0;

    let start = enter(&*view, config, &mut visited, config.start_on_axis);
    let mut stack = vec![start];

    while !stack.is_empty() {
        if view.distance_to_orb() == 0 {
            break;
        }

        let top = stack.len() - 1;
        let here = stack[top].node;
        match next_unvisited(&mut stack[top].candidates, &visited) {
            Some(next) => {
                let on_axis = config.same_axis(here.0, next.0);
                trace!(%here, %next, on_axis, "advance");
                view.move_to(next)?;
                steps += 1;
                stack.push(enter(&*view, config, &mut visited, on_axis));
            }
            None => {
                stack.pop();
                if let Some(parent) = stack.last() {
                    debug!(dead_end = %here, back_to = %parent.node, "backtrack");
                    view.move_to(parent.node)?;
                    steps += 1;
                }
            }
        }
    }

    let found = view.distance_to_orb() == 0;
    info!(found, steps, visited = visited.len(), "hunt finished");
    Ok(HuntReport { found, steps, visited: visited.len() })
}


/// Mark the current tile visited and rank its neighbors
/// Lower priority is tried first; keeping the previous axis earns `axis_bonus`
fn enter<V: HuntView>(view: &V, config: &HuntConfig, visited: &mut FxHashSet<NodeId>, on_axis: bool) -> Frame {
    let node = view.current_location();
    visited.insert(node);

    let mut candidates = Heap::min();
    for observation in view.neighbors() {
        let mut priority = observation.distance as f64;
        if config.same_axis(node.0, observation.id.0) == on_axis {
            priority -= config.axis_bonus;
        }
        if candidates.add(observation, priority).is_err() {
            trace!(neighbor = %observation.id, "duplicate neighbor report ignored");
        }
    }
    Frame { node, candidates }
}

fn next_unvisited(candidates: &mut Heap<NeighborObservation>, visited: &FxHashSet<NodeId>) -> Option<NodeId> {
    while let Ok(observation) = candidates.poll() {
        if !visited.contains(&observation.id) {
            return Some(observation.id);
        }
    }
    None
}
