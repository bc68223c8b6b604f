pub mod grid;

use crate::collections::FxIndexMap;
use crate::errors::PathPlannerError;

use std::fmt;
use serde::{Deserialize, Serialize};


/// Identity of a node (tile) in the cavern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per node data: gold lying on the tile + weighted edges to open neighbors
#[derive(Clone, Debug, Default, PartialEq)]
struct NodeData {
    reward: u32,
    edges: Vec<(NodeId, u32)>,
}


/// Undirected weighted graph with a reward on every node
/// Structure is fixed once built, only rewards change (picked up -> zero)
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: FxIndexMap<NodeId, NodeData>,
}

impl Graph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or update the reward of an existing one
    pub fn add_node(&mut self, id: NodeId, reward: u32) {
        self.nodes.entry(id).or_default().reward = reward;
    }

    /// Add an undirected edge, replacing the weight of an existing one
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: u32) -> Result<(), PathPlannerError> {
        if !self.contains(a) {
            return Err(PathPlannerError::UnknownNode(a));
        }
        if !self.contains(b) {
            return Err(PathPlannerError::UnknownNode(b));
        }
        self.link(a, b, weight);
        if a != b {
            self.link(b, a, weight);
        }
        Ok(())
    }

    fn link(&mut self, from: NodeId, to: NodeId, weight: u32) {
        if let Some(data) = self.nodes.get_mut(&from) {
            match data.edges.iter_mut().find(|(n, _)| *n == to) {
                Some(edge) => edge.1 = weight,
                None => data.edges.push((to, weight)),
            }
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Open neighbors + edge weight, empty for unknown nodes
    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, u32)] {
        self.nodes.get(&id).map(|data| data.edges.as_slice()).unwrap_or(&[])
    }

    /// Neighbors with weights widened to `u64`, so summed route costs cannot overflow
    pub fn weighted_neighbors(&self, id: NodeId) -> Vec<(NodeId, u64)> {
        self.neighbors(id).iter().map(|&(n, w)| (n, w as u64)).collect()
    }

    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.neighbors(from).iter().find(|(n, _)| *n == to).map(|&(_, w)| w)
    }

    pub fn reward(&self, id: NodeId) -> u32 {
        self.nodes.get(&id).map_or(0, |data| data.reward)
    }

    /// Collect the reward on a node, leaving zero behind
    pub fn take_reward(&mut self, id: NodeId) -> u32 {
        self.nodes.get_mut(&id).map_or(0, |data| std::mem::take(&mut data.reward))
    }

    /// Sum of all rewards still lying in the graph
    pub fn total_reward(&self) -> u64 {
        self.nodes.values().map(|data| data.reward as u64).sum()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_undirected() {
        let mut graph = Graph::new();
        graph.add_node(NodeId(1), 0);
        graph.add_node(NodeId(2), 7);
        graph.add_edge(NodeId(1), NodeId(2), 3).unwrap();

        assert_eq!(graph.edge_weight(NodeId(1), NodeId(2)), Some(3));
        assert_eq!(graph.edge_weight(NodeId(2), NodeId(1)), Some(3));
        assert_eq!(graph.neighbors(NodeId(2)), &[(NodeId(1), 3)]);

        // re-adding replaces the weight instead of duplicating the edge
        graph.add_edge(NodeId(2), NodeId(1), 5).unwrap();
        assert_eq!(graph.neighbors(NodeId(1)), &[(NodeId(2), 5)]);
    }

    #[test]
    fn test_edge_to_unknown_node() {
        let mut graph = Graph::new();
        graph.add_node(NodeId(1), 0);
        assert_eq!(graph.add_edge(NodeId(1), NodeId(9), 1), Err(PathPlannerError::UnknownNode(NodeId(9))));
    }

    #[test]
    fn test_take_reward_zeroes_node() {
        let mut graph = Graph::new();
        graph.add_node(NodeId(4), 12);
        assert_eq!(graph.total_reward(), 12);
        assert_eq!(graph.take_reward(NodeId(4)), 12);
        assert_eq!(graph.take_reward(NodeId(4)), 0);
        assert_eq!(graph.reward(NodeId(4)), 0);
        assert_eq!(graph.take_reward(NodeId(99)), 0);
    }
}
