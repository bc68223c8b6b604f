//! Escape with gold: plan a route from the current tile to the exit that fits
//! the step budget, then walk it.
//!
//! Planning starts from the shortest route and repeatedly splices in the
//! detour through one gold tile with the best marginal gain. The detour
//! splits the route in two at the gold tile; each half is improved the same
//! way with a share of the budget proportional to its own length.

use crate::collections::{FxHashSet, FxIndexSet};
use crate::config::ScramConfig;
use crate::errors::{PathPlannerError, ScramError, MoveError};
use crate::graph::NodeId;
use crate::heap::Heap;
use crate::oracle::PathOracle;
use crate::path::Path;

use std::hash::{Hash, Hasher};
use tracing::{debug, info, trace, warn};


/// What the agent can see and do while escaping
pub trait ScramView {
    type Oracle: PathOracle;

    /// Full graph, for planning
    fn oracle(&self) -> &Self::Oracle;

    fn current_node(&self) -> NodeId;

    fn exit(&self) -> NodeId;

    fn all_nodes(&self) -> Vec<NodeId>;

    fn steps_left(&self) -> u32;

    /// Step to an adjacent node, spending the edge weight
    /// Gold on the destination is picked up by the environment
    fn move_to(&mut self, node: NodeId) -> Result<(), MoveError>;
}


#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScramReport {
    pub path: Path,
    /// Total edge weight of `path`
    pub planned_weight: u64,
    /// Steps available when planning started
    pub budget: u32,
    /// Gold lying on `path` when it was planned
    pub planned_reward: u64,
}


/// A route from a path's start to its end forced through one extra node
#[derive(Clone, Debug)]
pub struct DetourRecord {
    pub via: NodeId,
    /// path start -> via
    pub first: Path,
    /// via -> path end
    pub second: Path,
    /// Gold over both halves, the shared `via` counted once
    pub reward: u64,
    pub first_cost: u64,
    pub second_cost: u64,
}

impl DetourRecord {

    pub fn evaluate<O: PathOracle>(oracle: &O, path: &Path, via: NodeId) -> Result<Self, PathPlannerError> {
        let first = oracle.shortest_path(path.start(), via)?;
        let mut second = oracle.shortest_path(via, path.end())?;
        let first_cost = oracle.path_weight(&first)?;
        let second_cost = oracle.path_weight(&second)?;

        // among equally short ways back, prefer one that does not retrace the way in
        let retraced: FxHashSet<NodeId> = first.iter()
            .copied()
            .filter(|node| *node != via && *node != path.end())
            .collect();
        if second.iter().any(|node| retraced.contains(node)) {
            if let Ok(fresh) = oracle.shortest_path_avoiding(via, path.end(), &retraced) {
                if oracle.path_weight(&fresh)? == second_cost {
                    second = fresh;
                }
            }
        }

        let walk: Vec<NodeId> = first.iter().chain(second.iter()).copied().collect();
        let reward = oracle.path_reward(&walk);

        Ok(Self { via, first, second, reward, first_cost, second_cost })
    }

    pub fn cost(&self) -> u64 {
        self.first_cost + self.second_cost
    }

    /// Divide `budget` between the halves in proportion to their cost, rounding each down
    /// Whenever the detour fits `budget`, each half gets at least its own cost
    pub fn split_budget(&self, budget: u64) -> (u64, u64) {
        match self.cost() {
            0 => (budget / 2, budget / 2),
            cost => (
                (self.first_cost as u128 * budget as u128 / cost as u128) as u64,
                (self.second_cost as u128 * budget as u128 / cost as u128) as u64,
            ),
        }
    }
}

// a detour is identified by the node it passes through
impl PartialEq for DetourRecord {
    fn eq(&self, other: &Self) -> bool {
        self.via == other.via
    }
}
impl Eq for DetourRecord {}

impl Hash for DetourRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.via.hash(state);
    }
}


/// Improve `path` by splicing in gold detours that fit `budget`
///
/// Returns `path` untouched when no candidate detour fits. Otherwise the
/// detour with the largest gain over the current path is taken and both of
/// its halves are optimized on their share of the budget. The result never
/// weighs more than `budget` as long as `path` itself fits.
pub fn optimize<O: PathOracle>(
    oracle: &O,
    config: &ScramConfig,
    path: Path,
    budget: u64,
    candidates: &FxIndexSet<NodeId>,
) -> Result<Path, PathPlannerError> {
    let path_reward = oracle.path_reward(&path);

    let mut detours = Heap::max();
    for &via in candidates {
        let detour = match DetourRecord::evaluate(oracle, &path, via) {
            Ok(detour) => detour,
            Err(PathPlannerError::NoPathFound) => {
                trace!(%via, "gold unreachable");
                continue;
            }
            Err(e) => return Err(e),
        };

        if !config.fits(detour.cost(), budget) {
            trace!(%via, cost = detour.cost(), budget, "detour too long");
            continue;
        }

        let gain = detour.reward as f64 - path_reward as f64;
        trace!(%via, cost = detour.cost(), gain, "detour candidate");
        if detours.add(detour, gain).is_err() {
            trace!(%via, "detour already queued");
        }
    }

    let Ok(best) = detours.poll() else {
        return Ok(path);
    };

    let remaining: FxIndexSet<NodeId> = candidates
        .iter()
        .filter(|node| !best.first.contains(node) && !best.second.contains(node))
        .copied()
        .collect();

    let (first_budget, second_budget) = best.split_budget(budget);
    debug!(
        via = %best.via,
        cost = best.cost(),
        reward = best.reward,
        budget,
        first_budget,
        second_budget,
        remaining = remaining.len(),
        "taking detour"
    );

    let DetourRecord { first, second, .. } = best;
    let first = optimize(oracle, config, first, first_budget, &remaining)?;
    let second = optimize(oracle, config, second, second_budget, &remaining)?;
    Path::combine(first, second)
}


/// Plan a route from `start` to `exit` within `budget`, collecting gold from `nodes` on the way
pub fn plan_escape<O, I>(
    oracle: &O,
    config: &ScramConfig,
    start: NodeId,
    exit: NodeId,
    budget: u64,
    nodes: I,
) -> Result<Path, PathPlannerError>
where
    O: PathOracle,
    I: IntoIterator<Item = NodeId>,
{
    let baseline = oracle.shortest_path(start, exit)?;
    let baseline_weight = oracle.path_weight(&baseline)?;
    if baseline_weight > budget {
        warn!(baseline_weight, budget, "shortest route to the exit exceeds the budget");
    }

    let candidates: FxIndexSet<NodeId> = nodes
        .into_iter()
        .filter(|node| oracle.reward(*node) > 0 && !baseline.contains(node))
        .collect();
    debug!(%start, %exit, budget, baseline_weight, candidates = candidates.len(), "planning escape");

    optimize(oracle, config, baseline, budget, &candidates)
}


/// Move along `path`, skipping nodes the agent already stands on
pub fn walk<V: ScramView>(view: &mut V, path: &Path) -> Result<(), MoveError> {
    for &node in path.iter() {
        if node != view.current_node() {
            view.move_to(node)?;
        }
    }
    Ok(())
}


/// Plan the escape for the current state, then walk it
pub fn scram<V: ScramView>(view: &mut V, config: &ScramConfig) -> Result<ScramReport, ScramError> {
    let budget = view.steps_left();

    let (path, planned_weight, planned_reward) = {
        let oracle = view.oracle();
        let path = plan_escape(oracle, config, view.current_node(), view.exit(), budget as u64, view.all_nodes())?;
        let weight = oracle.path_weight(&path)?;
        let reward = oracle.path_reward(&path);
        (path, weight, reward)
    };

    walk(view, &path)?;
    info!(
        nodes = path.len(),
        planned_weight,
        planned_reward,
        budget,
        steps_left = view.steps_left(),
        "scram finished"
    );
    Ok(ScramReport { path, planned_weight, budget, planned_reward })
}
