//! Dense adjacency-matrix backend
//!
//! Edges are collected first and the N×N matrix is materialized once by
//! `finalize()`. Queries against an unbuilt matrix fail with
//! `GraphError::NotBuilt` instead of answering from partial data.

use std::collections::HashSet;

use super::{GraphStore, Representation, VertexId};
use crate::error::{GraphError, Result};

/// Largest vertex count a `MatrixGraph` accepts (1 GiB of cells)
pub const MAX_MATRIX_VERTICES: usize = 1 << 15;

#[derive(Debug, Default, Clone)]
pub struct MatrixGraph {
    num_vertices: usize,

    // Edge set the matrix is built from, normalized (min, max)
    edges: HashSet<(VertexId, VertexId)>,

    // Row-major num_vertices × num_vertices, None until finalized
    matrix: Option<Vec<bool>>,
}

impl MatrixGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.matrix.is_some()
    }

    fn built(&self) -> Result<&[bool]> {
        self.matrix.as_deref().ok_or(GraphError::NotBuilt)
    }

    /// Materialize the matrix from the edge set, O(N² + E)
    pub fn build(&mut self) -> Result<()> {
        let n = self.num_vertices;
        let capacity_err = || GraphError::CapacityExceeded {
            id: n.saturating_sub(1),
            limit: MAX_MATRIX_VERTICES,
        };
        let cells = n.checked_mul(n).ok_or_else(capacity_err)?;
        let mut matrix = Vec::new();
        matrix.try_reserve_exact(cells).map_err(|_| capacity_err())?;
        matrix.resize(cells, false);

        for &(i, j) in &self.edges {
            matrix[i * n + j] = true;
            matrix[j * n + i] = true;
        }
        self.matrix = Some(matrix);

        tracing::info!(
            "Adjacency matrix built: {} vertices, {} edges",
            n,
            self.edges.len()
        );
        Ok(())
    }
}

impl GraphStore for MatrixGraph {
    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn has_edge(&self, i: VertexId, j: VertexId) -> Result<bool> {
        let matrix = self.built()?;
        let n = self.num_vertices;
        if i >= n || j >= n {
            return Ok(false);
        }
        Ok(matrix[i * n + j])
    }

    fn neighbors(&self, id: VertexId) -> Result<Vec<VertexId>> {
        let matrix = self.built()?;
        let n = self.num_vertices;
        if id >= n {
            return Ok(Vec::new());
        }
        let row = &matrix[id * n..(id + 1) * n];
        Ok(row
            .iter()
            .enumerate()
            .filter_map(|(j, &connected)| connected.then_some(j))
            .collect())
    }

    fn max_vertices(&self) -> usize {
        MAX_MATRIX_VERTICES
    }

    fn add_edge(&mut self, i: VertexId, j: VertexId) -> Result<()> {
        let key = if i <= j { (i, j) } else { (j, i) };
        if key.1 >= MAX_MATRIX_VERTICES {
            return Err(GraphError::CapacityExceeded { id: key.1, limit: MAX_MATRIX_VERTICES });
        }
        if !self.edges.insert(key) {
            return Ok(());
        }
        self.num_vertices = self.num_vertices.max(key.1 + 1);

        // Never patch a built matrix in place
        if self.matrix.take().is_some() {
            tracing::debug!("Edge {}-{} added after build, matrix discarded", i, j);
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if self.is_built() {
            return Ok(());
        }
        self.build()
    }

    fn representation(&self) -> Representation {
        Representation::Matrix
    }
}
