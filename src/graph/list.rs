//! Sparse adjacency-list backend

use std::collections::HashSet;

use super::{GraphStore, Representation, VertexId};
use crate::error::{GraphError, Result};

/// Largest vertex count a `ListGraph` accepts (one empty `Vec` per vertex)
pub const MAX_LIST_VERTICES: usize = 1 << 22;

/// Adjacency list with a companion edge set for O(1) lookups.
///
/// Neighbor order is insertion order.
#[derive(Debug, Default, Clone)]
pub struct ListGraph {
    adjacency: Vec<Vec<VertexId>>,
    // Normalized (min, max) pairs
    edges: HashSet<(VertexId, VertexId)>,
}

fn edge_key(i: VertexId, j: VertexId) -> (VertexId, VertexId) {
    if i <= j { (i, j) } else { (j, i) }
}

impl ListGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_vertex(&mut self, id: VertexId) -> Result<()> {
        if id >= MAX_LIST_VERTICES {
            return Err(GraphError::CapacityExceeded { id, limit: MAX_LIST_VERTICES });
        }
        if id >= self.adjacency.len() {
            self.adjacency.resize_with(id + 1, Vec::new);
        }
        Ok(())
    }
}

impl GraphStore for ListGraph {
    fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn has_edge(&self, i: VertexId, j: VertexId) -> Result<bool> {
        Ok(self.edges.contains(&edge_key(i, j)))
    }

    fn neighbors(&self, id: VertexId) -> Result<Vec<VertexId>> {
        Ok(self.adjacency.get(id).cloned().unwrap_or_default())
    }

    fn max_vertices(&self) -> usize {
        MAX_LIST_VERTICES
    }

    fn add_edge(&mut self, i: VertexId, j: VertexId) -> Result<()> {
        self.ensure_vertex(i.max(j))?;
        if !self.edges.insert(edge_key(i, j)) {
            return Ok(());
        }
        self.adjacency[i].push(j);
        if i != j {
            self.adjacency[j].push(i);
        }
        Ok(())
    }

    fn representation(&self) -> Representation {
        Representation::List
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut graph = ListGraph::new();
        graph.add_edge(0, 3).unwrap();

        assert_eq!(graph.num_vertices(), 4);
        assert!(graph.has_edge(0, 3).unwrap());
        assert!(graph.has_edge(3, 0).unwrap());
        assert!(!graph.has_edge(0, 1).unwrap());
        assert_eq!(graph.neighbors(3).unwrap(), vec![0]);
    }

    #[test]
    fn test_duplicate_edges_are_idempotent() {
        // Edge files usually list both (i, j) and (j, i)
        let mut graph = ListGraph::new();
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(1, 0).unwrap();
        graph.add_edge(0, 1).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(0).unwrap(), vec![1]);
        assert_eq!(graph.neighbors(1).unwrap(), vec![0]);
    }

    #[test]
    fn test_neighbors_keep_insertion_order() {
        let mut graph = ListGraph::new();
        graph.add_edge(2, 5).unwrap();
        graph.add_edge(2, 1).unwrap();
        graph.add_edge(2, 4).unwrap();

        assert_eq!(graph.neighbors(2).unwrap(), vec![5, 1, 4]);
    }

    #[test]
    fn test_self_loop_stored_once() {
        let mut graph = ListGraph::new();
        graph.add_edge(1, 1).unwrap();

        assert_eq!(graph.num_vertices(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(1).unwrap(), vec![1]);
    }

    #[test]
    fn test_capacity_limit() {
        let mut graph = ListGraph::new();
        graph.add_edge(0, 1).unwrap();

        let err = graph.add_edge(0, MAX_LIST_VERTICES).unwrap_err();
        assert!(matches!(err, GraphError::CapacityExceeded { id, .. } if id == MAX_LIST_VERTICES));
        assert!(matches!(graph.add_edge(usize::MAX, 0), Err(GraphError::CapacityExceeded { .. })));

        // Rejected edges leave the graph untouched
        assert_eq!(graph.num_vertices(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_out_of_range_has_no_edges() {
        let mut graph = ListGraph::new();
        graph.add_edge(0, 1).unwrap();

        assert!(graph.neighbors(42).unwrap().is_empty());
        assert!(!graph.has_edge(0, 42).unwrap());
    }
}
