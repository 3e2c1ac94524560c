//! Graph API: the `GraphStore` trait and its two backends

pub mod list;
pub mod matrix;
pub mod traversal;

pub use list::ListGraph;
pub use matrix::MatrixGraph;
pub use traversal::{find_path, vertex_in_range, Algorithm};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Vertex (person) ID, dense in `[0, num_vertices)`
pub type VertexId = usize;

/// Ordered vertex sequence from source to target
pub type Path = Vec<VertexId>;

/// Minimal capability set shared by the list and matrix backends.
///
/// Edges are undirected: `has_edge(i, j) == has_edge(j, i)` always holds.
/// IDs outside `[0, num_vertices)` are never an error here, they simply have
/// no edges; range validation belongs to the query layer.
///
/// `Send + Sync` lets `QueryFacade::paths_between` share one store across
/// rayon workers.
pub trait GraphStore: Send + Sync {
    /// One plus the largest vertex ID inserted so far
    fn num_vertices(&self) -> usize;

    /// Number of distinct undirected edges
    fn edge_count(&self) -> usize;

    /// Check whether `i` and `j` are connected
    fn has_edge(&self, i: VertexId, j: VertexId) -> Result<bool>;

    /// All `j` with `has_edge(id, j)`, in the backend's natural order
    fn neighbors(&self, id: VertexId) -> Result<Vec<VertexId>>;

    /// Largest vertex count this backend will accept
    fn max_vertices(&self) -> usize;

    /// Insert an undirected edge. Inserting an existing edge is a no-op.
    /// IDs at or above `max_vertices()` fail with `CapacityExceeded`.
    fn add_edge(&mut self, i: VertexId, j: VertexId) -> Result<()>;

    /// Materialize any derived structures once all edges are in.
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }

    fn representation(&self) -> Representation;
}

/// Backing representation selected at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Sparse adjacency list
    #[default]
    List,
    /// Dense adjacency matrix
    Matrix,
}

impl Representation {
    /// Create an empty store of this kind
    pub fn new_store(self) -> Box<dyn GraphStore> {
        match self {
            Representation::List => Box::new(ListGraph::new()),
            Representation::Matrix => Box::new(MatrixGraph::new()),
        }
    }

    /// Human-readable label ("List", "Matrix")
    pub fn label(self) -> &'static str {
        match self {
            Representation::List => "List",
            Representation::Matrix => "Matrix",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::List => write!(f, "list"),
            Representation::Matrix => write!(f, "matrix"),
        }
    }
}

impl FromStr for Representation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" | "1" => Ok(Representation::List),
            "matrix" | "2" => Ok(Representation::Matrix),
            other => Err(format!("unknown representation '{}' (expected list or matrix)", other)),
        }
    }
}
