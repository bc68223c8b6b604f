use super::{Graph, NodeId};

use num_traits::{Num, Signed};
use rand::Rng;


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Row-major id of a grid cell
pub fn grid_id(x: u64, y: u64, width: u64) -> NodeId {
    NodeId(y * width + x)
}

/// (x, y) of a grid cell id
pub fn grid_position(id: NodeId, width: u64) -> (u64, u64) {
    (id.0 % width, id.0 / width)
}

/// Manhattan distance between two cells of a grid, ignoring walls
pub fn grid_distance(a: NodeId, b: NodeId, width: u64) -> u32 {
    let (ax, ay) = grid_position(a, width);
    let (bx, by) = grid_position(b, width);
    manhattan_distance(ax as i64, ay as i64, bx as i64, by as i64) as u32
}


impl Graph {

    /// 4-connected maze of `width` x `height` cells with unit edges
    /// Cells where `open(x, y)` is false are walls and get no node
    /// Ids are row-major so horizontal neighbors differ by exactly 1
    pub fn grid<F>(width: u64, height: u64, open: F) -> Self
    where
        F: Fn(u64, u64) -> bool,
    {
        Self::build_grid(width, height, open, |_, _| 1, |_, _| 0)
    }

    /// Wall-free cavern with random edge weights in `1..=max_weight`
    /// and gold in `1..=max_gold` on a `gold_chance` share of the cells
    pub fn random_cavern<R: Rng>(
        rng: &mut R,
        width: u64,
        height: u64,
        gold_chance: f64,
        max_gold: u32,
        max_weight: u32,
    ) -> Self {
        let mut rewards = Vec::with_capacity((width * height) as usize);
        for _ in 0..width * height {
            let gold = if max_gold > 0 && rng.random_bool(gold_chance.clamp(0.0, 1.0)) {
                rng.random_range(1..=max_gold)
            } else {
                0
            };
            rewards.push(gold);
        }

        let mut weights = Vec::with_capacity(2 * rewards.len());
        for _ in 0..2 * rewards.len() {
            weights.push(rng.random_range(1..=max_weight.max(1)));
        }

        // weights[2i] is the edge to the right of cell i, weights[2i + 1] the edge below
        Self::build_grid(
            width,
            height,
            |_, _| true,
            |from, to| {
                let slot = if to.0 == from.0 + 1 { 2 * from.0 } else { 2 * from.0 + 1 };
                weights[slot as usize]
            },
            |x, y| rewards[(y * width + x) as usize],
        )
    }

    fn build_grid<F, W, G>(width: u64, height: u64, open: F, weight: W, gold: G) -> Self
    where
        F: Fn(u64, u64) -> bool,
        W: Fn(NodeId, NodeId) -> u32,
        G: Fn(u64, u64) -> u32,
    {
        let mut graph = Graph::new();
        for y in 0..height {
            for x in 0..width {
                if open(x, y) {
                    graph.add_node(grid_id(x, y, width), gold(x, y));
                }
            }
        }

        for y in 0..height {
            for x in 0..width {
                if !open(x, y) {
                    continue;
                }
                let here = grid_id(x, y, width);
                if x + 1 < width && open(x + 1, y) {
                    let right = grid_id(x + 1, y, width);
                    graph.link(here, right, weight(here, right));
                    graph.link(right, here, weight(here, right));
                }
                if y + 1 < height && open(x, y + 1) {
                    let below = grid_id(x, y + 1, width);
                    graph.link(here, below, weight(here, below));
                    graph.link(below, here, weight(here, below));
                }
            }
        }
        graph
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance(0, 0, 3, 4), 7);
        assert_eq!(manhattan_distance(-2, 5, 1, 1), 7);
    }

    #[test]
    fn test_grid_ids_are_row_major() {
        assert_eq!(grid_id(2, 1, 5), NodeId(7));
        assert_eq!(grid_position(NodeId(7), 5), (2, 1));
        assert_eq!(grid_distance(NodeId(0), NodeId(7), 5), 3);
    }

    #[test]
    fn test_grid_skips_walls() {
        // 3x3 with the centre walled off
        let graph = Graph::grid(3, 3, |x, y| !(x == 1 && y == 1));
        assert_eq!(graph.len(), 8);
        assert!(!graph.contains(NodeId(4)));

        // top-middle only links left and right
        let mut neighbors: Vec<_> = graph.neighbors(NodeId(1)).iter().map(|&(n, _)| n).collect();
        neighbors.sort();
        assert_eq!(neighbors, vec![NodeId(0), NodeId(2)]);
        assert_eq!(graph.edge_weight(NodeId(0), NodeId(3)), Some(1));
    }

    #[test]
    fn test_random_cavern_is_seeded_and_bounded() {
        let a = Graph::random_cavern(&mut StdRng::seed_from_u64(7), 6, 5, 0.3, 9, 4);
        let b = Graph::random_cavern(&mut StdRng::seed_from_u64(7), 6, 5, 0.3, 9, 4);
        assert_eq!(a.len(), 30);

        for id in a.node_ids() {
            assert!(a.reward(id) <= 9);
            assert_eq!(a.reward(id), b.reward(id));
            for &(n, w) in a.neighbors(id) {
                assert!((1..=4).contains(&w));
                assert_eq!(a.edge_weight(n, id), Some(w));
                assert_eq!(b.edge_weight(id, n), Some(w));
            }
        }
    }
}
