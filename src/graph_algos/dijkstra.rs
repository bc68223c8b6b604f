use crate::errors::PathPlannerError;
use super::{GraphNodeMap, shortest_path};

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::trace;


/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// Among equally cheap paths the one through earlier discovered nodes wins,
/// so repeated queries on the same graph always agree
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<Vec<N>, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal)?;

    match goal_index {
        Some(goal_index) => shortest_path(&node_map, goal_index),
        None => Err(PathPlannerError::NoPathFound),
    }
}


/// Returns a full map of the graph, includes all (reachable) nodes and costs
pub fn dijkstra_nodes_full<N, C, IT, NN>(start: N, neighbors: NN) -> Result<GraphNodeMap<N, C>, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    {

    let (node_map, _) = build_dijkstra_graph(start, neighbors, |_| false)?;
    Ok(node_map)
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> Result<(GraphNodeMap<N, C>, Option<usize>), PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool
    {

    // Nodes to visit, cheapest first
    let mut nodes_to_visit: BinaryHeap<QueueEntry<C>> = BinaryHeap::new();

    // (parent_index, cost) per node, the start node has parent usize::MAX
    let mut nodes_map: GraphNodeMap<N, C> = GraphNodeMap::default();

    let start_index = nodes_map.insert_full(start, (usize::MAX, Zero::zero())).0;
    nodes_to_visit.push(QueueEntry {
        index: start_index,
        cost: Zero::zero(),
    });

    while let Some(QueueEntry { cost, index }) = nodes_to_visit.pop() {

        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            return Err(PathPlannerError::NoPathFound);
        };

        // Stale queue entry, a cheaper route was already settled
        if cost > c {
            continue;
        }

        if goal_fn(node) {
            trace!(?node, ?cost, explored = nodes_map.len(), "dijkstra reached goal");
            return Ok((nodes_map, Some(index)));
        }

        let node = node.clone();
        for (neighbor, edge_cost) in neighbors(&node) {

            let new_cost = edge_cost + c;

            let neighbor_index = match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    let neighbor_index = e.index();
                    e.insert((index, new_cost));
                    neighbor_index
                }
                Occupied(mut e) => {
                    // strictly better only, ties keep the first parent found
                    if e.get().1 > new_cost {
                        let neighbor_index = e.index();
                        e.insert((index, new_cost));
                        neighbor_index
                    } else {
                        continue;
                    }
                }
            };

            nodes_to_visit.push(QueueEntry {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    Ok((nodes_map, None))
}


/// Queue entry
/// - ordered by cost, then by discovery index so equal costs settle in discovery order
#[derive(Debug)]
struct QueueEntry<T> {
    index: usize,
    cost: T
}

impl<T: Ord> Ord for QueueEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl<T: Ord> PartialOrd for QueueEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: Ord> PartialEq for QueueEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<T: Ord> Eq for QueueEntry<T> {}
