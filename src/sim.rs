//! In-memory stand-ins for the game engine, driving the strategies over a plain [`Graph`].

use crate::errors::{MoveError, PathPlannerError};
use crate::graph::{Graph, NodeId};
use crate::graph::grid::grid_distance;
use crate::graph_algos::dijkstra_nodes_full;
use crate::hunt::{HuntView, NeighborObservation};
use crate::scram::ScramView;

use tracing::trace;


type Hint = Box<dyn Fn(NodeId) -> u32>;


/// Orb hunt over a graph with a pluggable distance hint
pub struct GraphHunt {
    graph: Graph,
    location: NodeId,
    orb: NodeId,
    hint: Hint,
    trail: Vec<NodeId>,
}

impl GraphHunt {

    /// `hint(node)` estimates the distance from `node` to the orb
    pub fn new<H>(graph: Graph, start: NodeId, orb: NodeId, hint: H) -> Result<Self, PathPlannerError>
    where
        H: Fn(NodeId) -> u32 + 'static,
    {
        for node in [start, orb] {
            if !graph.contains(node) {
                return Err(PathPlannerError::UnknownNode(node));
            }
        }
        Ok(Self {
            graph,
            location: start,
            orb,
            hint: Box::new(hint),
            trail: Vec::new(),
        })
    }

    /// Grid maze (see `Graph::grid`) hinted with Manhattan distance through walls
    pub fn on_grid(graph: Graph, width: u64, start: NodeId, orb: NodeId) -> Result<Self, PathPlannerError> {
        Self::new(graph, start, orb, move |node| grid_distance(node, orb, width))
    }

    /// Hints are exact shortest-path distances, unreachable tiles report `u32::MAX`
    pub fn with_true_distance(graph: Graph, start: NodeId, orb: NodeId) -> Result<Self, PathPlannerError> {
        if !graph.contains(orb) {
            return Err(PathPlannerError::UnknownNode(orb));
        }
        let costs = dijkstra_nodes_full(orb, |n: &NodeId| graph.weighted_neighbors(*n))?;
        let hint = move |node: NodeId| {
            costs.get(&node).map_or(u32::MAX, |&(_, cost)| u32::try_from(cost).unwrap_or(u32::MAX))
        };
        Self::new(graph, start, orb, hint)
    }

    pub fn location(&self) -> NodeId {
        self.location
    }

    /// Every tile moved onto, in order, the start excluded
    pub fn trail(&self) -> &[NodeId] {
        &self.trail
    }

    pub fn steps(&self) -> usize {
        self.trail.len()
    }
}

impl HuntView for GraphHunt {

    fn current_location(&self) -> NodeId {
        self.location
    }

    fn neighbors(&self) -> Vec<NeighborObservation> {
        self.graph.neighbors(self.location)
            .iter()
            .map(|&(id, _)| NeighborObservation { id, distance: self.distance_from(id) })
            .collect()
    }

    fn distance_to_orb(&self) -> u32 {
        self.distance_from(self.location)
    }

    fn move_to(&mut self, id: NodeId) -> Result<(), MoveError> {
        if self.graph.edge_weight(self.location, id).is_none() {
            return Err(MoveError::NotAdjacent { from: self.location, to: id });
        }
        trace!(from = %self.location, to = %id, "hunt move");
        self.location = id;
        self.trail.push(id);
        Ok(())
    }
}

impl GraphHunt {

    // zero is reserved for the orb tile whatever the hint says
    fn distance_from(&self, node: NodeId) -> u32 {
        if node == self.orb {
            0
        } else {
            (self.hint)(node).max(1)
        }
    }
}


/// Escape over a graph with a step budget and gold picked up on arrival
#[derive(Clone, Debug)]
pub struct GraphScram {
    graph: Graph,
    location: NodeId,
    exit: NodeId,
    steps_left: u32,
    collected: u64,
    trail: Vec<NodeId>,
}

impl GraphScram {

    pub fn new(graph: Graph, start: NodeId, exit: NodeId, steps_left: u32) -> Result<Self, PathPlannerError> {
        for node in [start, exit] {
            if !graph.contains(node) {
                return Err(PathPlannerError::UnknownNode(node));
            }
        }
        let mut scram = Self {
            graph,
            location: start,
            exit,
            steps_left,
            collected: 0,
            trail: Vec::new(),
        };
        scram.pick_up();
        Ok(scram)
    }

    fn pick_up(&mut self) {
        let gold = self.graph.take_reward(self.location);
        if gold > 0 {
            trace!(node = %self.location, gold, "picked up gold");
            self.collected += gold as u64;
        }
    }

    pub fn location(&self) -> NodeId {
        self.location
    }

    pub fn collected(&self) -> u64 {
        self.collected
    }

    pub fn trail(&self) -> &[NodeId] {
        &self.trail
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The run succeeds only when it ends on the exit
    pub fn escaped(&self) -> bool {
        self.location == self.exit
    }
}

impl ScramView for GraphScram {
    type Oracle = Graph;

    fn oracle(&self) -> &Graph {
        &self.graph
    }

    fn current_node(&self) -> NodeId {
        self.location
    }

    fn exit(&self) -> NodeId {
        self.exit
    }

    fn all_nodes(&self) -> Vec<NodeId> {
        self.graph.node_ids().collect()
    }

    fn steps_left(&self) -> u32 {
        self.steps_left
    }

    fn move_to(&mut self, node: NodeId) -> Result<(), MoveError> {
        if !self.graph.contains(node) {
            return Err(MoveError::UnknownNode(node));
        }
        let weight = self.graph.edge_weight(self.location, node)
            .ok_or(MoveError::NotAdjacent { from: self.location, to: node })?;
        if weight > self.steps_left {
            return Err(MoveError::BudgetExhausted { needed: weight, left: self.steps_left });
        }

        self.steps_left -= weight;
        self.location = node;
        self.trail.push(node);
        self.pick_up();
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Graph {
        // 0 -2- 1 -3- 2, gold on 1
        let mut graph = Graph::new();
        graph.add_node(NodeId(0), 0);
        graph.add_node(NodeId(1), 8);
        graph.add_node(NodeId(2), 0);
        graph.add_edge(NodeId(0), NodeId(1), 2).unwrap();
        graph.add_edge(NodeId(1), NodeId(2), 3).unwrap();
        graph
    }

    #[test]
    fn test_hunt_rejects_non_adjacent_move() {
        let mut view = GraphHunt::new(line(), NodeId(0), NodeId(2), |_| 5).unwrap();
        assert_eq!(
            view.move_to(NodeId(2)),
            Err(MoveError::NotAdjacent { from: NodeId(0), to: NodeId(2) })
        );
        assert_eq!(view.location(), NodeId(0));
    }

    #[test]
    fn test_hunt_hint_is_zero_only_on_orb() {
        let mut view = GraphHunt::new(line(), NodeId(0), NodeId(1), |_| 0).unwrap();
        assert_eq!(view.distance_to_orb(), 1);
        let observed = view.neighbors();
        assert_eq!(observed, vec![NeighborObservation { id: NodeId(1), distance: 0 }]);

        view.move_to(NodeId(1)).unwrap();
        assert_eq!(view.distance_to_orb(), 0);
        assert_eq!(view.steps(), 1);
    }

    #[test]
    fn test_scram_budget_and_pickup() {
        let mut view = GraphScram::new(line(), NodeId(0), NodeId(2), 5).unwrap();
        view.move_to(NodeId(1)).unwrap();
        assert_eq!(view.steps_left(), 3);
        assert_eq!(view.collected(), 8);
        assert_eq!(view.graph().reward(NodeId(1)), 0);

        view.move_to(NodeId(2)).unwrap();
        assert_eq!(view.steps_left(), 0);
        assert!(view.escaped());
    }

    #[test]
    fn test_scram_move_over_budget_fails() {
        let mut view = GraphScram::new(line(), NodeId(0), NodeId(2), 4).unwrap();
        view.move_to(NodeId(1)).unwrap();
        assert_eq!(
            view.move_to(NodeId(2)),
            Err(MoveError::BudgetExhausted { needed: 3, left: 2 })
        );
        assert_eq!(view.location(), NodeId(1));
    }

    #[test]
    fn test_scram_unknown_node() {
        let mut view = GraphScram::new(line(), NodeId(0), NodeId(2), 4).unwrap();
        assert_eq!(view.move_to(NodeId(42)), Err(MoveError::UnknownNode(NodeId(42))));
        assert!(GraphScram::new(line(), NodeId(0), NodeId(42), 4).is_err());
    }
}
