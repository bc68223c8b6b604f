use crate::collections::FxHashSet;
use crate::errors::PathPlannerError;
use crate::graph::{Graph, NodeId};
use crate::graph_algos::dijkstra;
use crate::path::Path;


/// Graph queries the escape planner relies on
pub trait PathOracle {

    /// Minimum total edge weight path, `from` first and `to` last
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Path, PathPlannerError>;

    /// Like `shortest_path` but never entering a node in `avoid`
    /// Oracles that cannot exclude nodes fall back to the plain shortest path
    fn shortest_path_avoiding(&self, from: NodeId, to: NodeId, avoid: &FxHashSet<NodeId>) -> Result<Path, PathPlannerError> {
        let _ = avoid;
        self.shortest_path(from, to)
    }

    fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<u32>;

    /// Current reward on a node
    fn reward(&self, node: NodeId) -> u32;

    /// Sum of edge weights along `nodes`
    /// Fails if two consecutive nodes are not adjacent
    fn path_weight(&self, nodes: &[NodeId]) -> Result<u64, PathPlannerError> {
        nodes.windows(2).try_fold(0u64, |total, pair| {
            self.edge_weight(pair[0], pair[1])
                .map(|w| total + w as u64)
                .ok_or(PathPlannerError::NotAdjacent { from: pair[0], to: pair[1] })
        })
    }

    /// Reward collected by walking `nodes`, each distinct node counted once
    fn path_reward(&self, nodes: &[NodeId]) -> u64 {
        let mut seen = FxHashSet::default();
        nodes.iter()
            .filter(|node| seen.insert(**node))
            .map(|node| self.reward(*node) as u64)
            .sum()
    }
}


impl PathOracle for Graph {

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Path, PathPlannerError> {
        self.shortest_path_avoiding(from, to, &FxHashSet::default())
    }

    fn shortest_path_avoiding(&self, from: NodeId, to: NodeId, avoid: &FxHashSet<NodeId>) -> Result<Path, PathPlannerError> {
        for node in [from, to] {
            if !self.contains(node) {
                return Err(PathPlannerError::UnknownNode(node));
            }
        }
        let neighbors = |n: &NodeId| {
            let mut open = self.weighted_neighbors(*n);
            open.retain(|(m, _)| !avoid.contains(m));
            open
        };
        let nodes = dijkstra(from, neighbors, |n| *n == to)?;
        Path::new(nodes)
    }

    fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<u32> {
        Graph::edge_weight(self, from, to)
    }

    fn reward(&self, node: NodeId) -> u32 {
        Graph::reward(self, node)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ids: &[u64]) -> Vec<NodeId> {
        ids.iter().copied().map(NodeId).collect()
    }

    // 0 -1- 1 -1- 2
    //  \         /
    //   ----5----
    fn triangle() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(NodeId(0), 0);
        graph.add_node(NodeId(1), 4);
        graph.add_node(NodeId(2), 6);
        graph.add_edge(NodeId(0), NodeId(1), 1).unwrap();
        graph.add_edge(NodeId(1), NodeId(2), 1).unwrap();
        graph.add_edge(NodeId(0), NodeId(2), 5).unwrap();
        graph
    }

    #[test]
    fn test_shortest_path_prefers_light_edges() {
        let graph = triangle();
        let path = graph.shortest_path(NodeId(0), NodeId(2)).unwrap();
        assert_eq!(path.nodes(), ids(&[0, 1, 2]).as_slice());
        assert_eq!(graph.path_weight(&path).unwrap(), 2);
    }

    #[test]
    fn test_shortest_path_to_self() {
        let graph = triangle();
        let path = graph.shortest_path(NodeId(1), NodeId(1)).unwrap();
        assert_eq!(path, Path::single(NodeId(1)));
        assert_eq!(graph.path_weight(&path).unwrap(), 0);
    }

    #[test]
    fn test_shortest_path_errors() {
        let mut graph = triangle();
        assert_eq!(graph.shortest_path(NodeId(0), NodeId(9)), Err(PathPlannerError::UnknownNode(NodeId(9))));

        graph.add_node(NodeId(3), 0);
        assert_eq!(graph.shortest_path(NodeId(0), NodeId(3)), Err(PathPlannerError::NoPathFound));
    }

    #[test]
    fn test_path_weight_rejects_gaps() {
        let mut graph = triangle();
        graph.add_node(NodeId(3), 0);
        assert_eq!(
            graph.path_weight(&ids(&[0, 1, 3])),
            Err(PathPlannerError::NotAdjacent { from: NodeId(1), to: NodeId(3) })
        );
    }

    #[test]
    fn test_path_reward_counts_each_node_once() {
        let graph = triangle();
        assert_eq!(graph.path_reward(&ids(&[0, 1, 2])), 10);

        // 1 appears twice but its gold can only be picked up once
        assert_eq!(graph.path_reward(&ids(&[0, 1, 2, 1, 0])), 10);
    }

    #[test]
    fn test_combined_weight_is_sum_of_parts() {
        let graph = triangle();
        let first = graph.shortest_path(NodeId(0), NodeId(1)).unwrap();
        let second = graph.shortest_path(NodeId(1), NodeId(0)).unwrap();
        let expected = graph.path_weight(&first).unwrap() + graph.path_weight(&second).unwrap();

        let joined = Path::combine(first.clone(), second.clone()).unwrap();
        assert_eq!(joined.len(), first.len() + second.len() - 1);
        assert_eq!(graph.path_weight(&joined).unwrap(), expected);
    }

    #[test]
    fn test_heavy_routes_do_not_overflow() {
        // 0 -max- 1 -max- 2, the only route weighs more than a u32 can hold
        let mut graph = Graph::new();
        for id in 0..3 {
            graph.add_node(NodeId(id), 0);
        }
        graph.add_edge(NodeId(0), NodeId(1), u32::MAX).unwrap();
        graph.add_edge(NodeId(1), NodeId(2), u32::MAX).unwrap();

        let path = graph.shortest_path(NodeId(0), NodeId(2)).unwrap();
        assert_eq!(path.nodes(), ids(&[0, 1, 2]).as_slice());
        assert_eq!(graph.path_weight(&path).unwrap(), 2 * u32::MAX as u64);
    }

    #[test]
    fn test_shortest_path_avoiding_nodes() {
        let graph = triangle();
        let avoid: FxHashSet<NodeId> = [NodeId(1)].into_iter().collect();

        let path = graph.shortest_path_avoiding(NodeId(0), NodeId(2), &avoid).unwrap();
        assert_eq!(path.nodes(), ids(&[0, 2]).as_slice());

        let avoid: FxHashSet<NodeId> = [NodeId(1), NodeId(2)].into_iter().collect();
        assert_eq!(
            graph.shortest_path_avoiding(NodeId(0), NodeId(2), &avoid),
            Err(PathPlannerError::NoPathFound)
        );
    }
}
