use crate::errors::PathPlannerError;
use crate::graph::NodeId;

use std::ops::Deref;


/// Non-empty ordered walk through the graph, start first
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path(Vec<NodeId>);

impl Path {

    pub fn new(nodes: Vec<NodeId>) -> Result<Self, PathPlannerError> {
        if nodes.is_empty() {
            return Err(PathPlannerError::EmptyPath);
        }
        Ok(Self(nodes))
    }

    /// Zero-length path that stays put
    pub fn single(node: NodeId) -> Self {
        Self(vec![node])
    }

    pub fn start(&self) -> NodeId {
        self.0[0]
    }

    pub fn end(&self) -> NodeId {
        self.0[self.0.len() - 1]
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    /// Join two paths sharing a boundary node; the join appears once
    /// Resulting length is `first.len() + second.len() - 1`
    pub fn combine(mut first: Path, second: Path) -> Result<Path, PathPlannerError> {
        if first.end() != second.start() {
            return Err(PathPlannerError::DisjointPaths {
                end: first.end(),
                start: second.start(),
            });
        }
        first.0.extend(second.0.into_iter().skip(1));
        Ok(first)
    }
}

impl Deref for Path {
    type Target = [NodeId];

    fn deref(&self) -> &[NodeId] {
        &self.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn path(ids: &[u64]) -> Path {
        Path::new(ids.iter().copied().map(NodeId).collect()).unwrap()
    }

    #[test]
    fn test_empty_path_rejected() {
        assert_eq!(Path::new(vec![]), Err(PathPlannerError::EmptyPath));
    }

    #[test]
    fn test_start_and_end() {
        let p = path(&[4, 5, 9]);
        assert_eq!(p.start(), NodeId(4));
        assert_eq!(p.end(), NodeId(9));
        assert!(p.contains(&NodeId(5)));

        let s = Path::single(NodeId(3));
        assert_eq!(s.start(), s.end());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_combine_drops_join_node() {
        let first = path(&[1, 2, 3]);
        let second = path(&[3, 4]);
        let joined = Path::combine(first.clone(), second.clone()).unwrap();

        assert_eq!(joined, path(&[1, 2, 3, 4]));
        assert_eq!(joined.len(), first.len() + second.len() - 1);
    }

    #[test]
    fn test_combine_single_node_paths() {
        let joined = Path::combine(Path::single(NodeId(2)), path(&[2, 8])).unwrap();
        assert_eq!(joined, path(&[2, 8]));
    }

    #[test]
    fn test_combine_mismatched_boundary() {
        let result = Path::combine(path(&[1, 2]), path(&[3, 4]));
        assert_eq!(result, Err(PathPlannerError::DisjointPaths { end: NodeId(2), start: NodeId(3) }));
    }
}
