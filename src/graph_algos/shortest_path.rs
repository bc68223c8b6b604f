use crate::errors::PathPlannerError;
use super::GraphNodeMap;

/// Walk parent links from the goal back to the root of the search
/// Returns the ordered path from root to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<Vec<N>, PathPlannerError>
where
    N: Clone,
{
    let mut path = Vec::new();
    let mut current_index = goal_index;

    while current_index != usize::MAX {
        let (node, &(parent_index, _)) = node_map
            .get_index(current_index)
            .ok_or(PathPlannerError::NoPathFound)?;
        path.push(node.clone());

        // a parent chain longer than the map means the links loop
        if path.len() > node_map.len() {
            return Err(PathPlannerError::NoPathFound);
        }
        current_index = parent_index;
    }

    if path.is_empty() {
        return Err(PathPlannerError::NoPathFound);
    }
    path.reverse();
    Ok(path)
}
