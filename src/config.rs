use serde::{Deserialize, Serialize};


/// Tuning for the orb hunt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuntConfig {
    /// Subtracted from a neighbor's distance hint when the move keeps the previous axis
    pub axis_bonus: f64,
    /// Two ids closer than this are treated as lying on the same axis.
    /// This only works for row-major numbering (see `Graph::grid`); it is a weak
    /// proxy for directional continuity, not a geometric test.
    pub axis_span: u64,
    /// Axis assumed before the first move
    pub start_on_axis: bool,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            axis_bonus: 0.5,
            axis_span: 2,
            start_on_axis: true,
        }
    }
}

impl HuntConfig {

    /// Whether a step between two ids stays on the same axis
    pub fn same_axis(&self, from: u64, to: u64) -> bool {
        from.abs_diff(to) < self.axis_span
    }
}


/// Tuning for the gold-collecting escape
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScramConfig {
    /// Reject detours that would use exactly the remaining budget
    pub strict_budget: bool,
}

impl ScramConfig {

    /// Whether a detour costing `cost` fits within `budget`
    pub fn fits(&self, cost: u64, budget: u64) -> bool {
        if self.strict_budget {
            cost < budget
        } else {
            cost <= budget
        }
    }
}
