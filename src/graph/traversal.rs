//! Path-finding traversal algorithms

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{GraphStore, Path, VertexId};
use crate::error::{GraphError, Result};

/// Search strategy for path queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Breadth-first: shortest path by edge count
    #[default]
    Bfs,
    /// Depth-first: some path, not necessarily shortest
    Dfs,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bfs => write!(f, "BFS"),
            Algorithm::Dfs => write!(f, "DFS"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "1" => Ok(Algorithm::Bfs),
            "dfs" | "2" => Ok(Algorithm::Dfs),
            other => Err(format!("unknown search method '{}' (expected bfs or dfs)", other)),
        }
    }
}

fn out_of_range(num_vertices: usize, id: impl fmt::Display) -> GraphError {
    let range = match num_vertices {
        0 => "the graph has no vertices".to_string(),
        n => format!("IDs must be between 0 and {} inclusive", n - 1),
    };
    GraphError::InvalidQuery(format!("ID {} out of range: {}", id, range))
}

/// Convert a caller-supplied ID, rejecting negatives and IDs `>= num_vertices`
pub fn vertex_in_range(num_vertices: usize, id: i64) -> Result<VertexId> {
    match usize::try_from(id) {
        Ok(v) if v < num_vertices => Ok(v),
        _ => Err(out_of_range(num_vertices, id)),
    }
}

/// Both endpoints must lie in `[0, num_vertices)` and differ
pub fn validate_endpoints(num_vertices: usize, source: VertexId, target: VertexId) -> Result<()> {
    for id in [source, target] {
        if id >= num_vertices {
            return Err(out_of_range(num_vertices, id));
        }
    }
    if source == target {
        return Err(GraphError::InvalidQuery(format!(
            "the two IDs must be different (both are {})",
            source
        )));
    }
    Ok(())
}

/// Walk parent pointers from target back to source
fn reconstruct_path(parent: &[Option<VertexId>], source: VertexId, target: VertexId) -> Path {
    let mut path = vec![target];
    let mut current = target;
    while current != source {
        match parent[current] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// BFS path search with a FIFO frontier.
///
/// Returns a shortest path, or an empty path when `target` is unreachable.
pub fn bfs_path<F>(
    source: VertexId,
    target: VertexId,
    num_vertices: usize,
    mut get_neighbors: F,
) -> Result<Path>
where
    F: FnMut(VertexId) -> Result<Vec<VertexId>>,
{
    validate_endpoints(num_vertices, source, target)?;

    let mut visited = vec![false; num_vertices];
    let mut parent: Vec<Option<VertexId>> = vec![None; num_vertices];
    let mut queue = VecDeque::from([source]);
    let mut expanded = 0usize;
    visited[source] = true;

    while let Some(node) = queue.pop_front() {
        if node == target {
            tracing::debug!("BFS {} -> {}: found after {} expansions", source, target, expanded);
            return Ok(reconstruct_path(&parent, source, target));
        }
        expanded += 1;

        for neighbor in get_neighbors(node)? {
            if neighbor < num_vertices && !visited[neighbor] {
                visited[neighbor] = true;
                parent[neighbor] = Some(node);
                queue.push_back(neighbor);
            }
        }
    }

    tracing::debug!("BFS {} -> {}: no path ({} expansions)", source, target, expanded);
    Ok(Vec::new())
}

/// DFS path search with a LIFO frontier.
///
/// Returns some simple path, or an empty path when `target` is unreachable.
pub fn dfs_path<F>(
    source: VertexId,
    target: VertexId,
    num_vertices: usize,
    mut get_neighbors: F,
) -> Result<Path>
where
    F: FnMut(VertexId) -> Result<Vec<VertexId>>,
{
    validate_endpoints(num_vertices, source, target)?;

    let mut visited = vec![false; num_vertices];
    let mut parent: Vec<Option<VertexId>> = vec![None; num_vertices];
    let mut stack = vec![source];
    let mut expanded = 0usize;
    visited[source] = true;

    while let Some(node) = stack.pop() {
        if node == target {
            tracing::debug!("DFS {} -> {}: found after {} expansions", source, target, expanded);
            return Ok(reconstruct_path(&parent, source, target));
        }
        expanded += 1;

        for neighbor in get_neighbors(node)? {
            if neighbor < num_vertices && !visited[neighbor] {
                visited[neighbor] = true;
                parent[neighbor] = Some(node);
                stack.push(neighbor);
            }
        }
    }

    tracing::debug!("DFS {} -> {}: no path ({} expansions)", source, target, expanded);
    Ok(Vec::new())
}

/// Find a path in any store with the chosen algorithm
pub fn find_path<G>(store: &G, source: VertexId, target: VertexId, algorithm: Algorithm) -> Result<Path>
where
    G: GraphStore + ?Sized,
{
    let n = store.num_vertices();
    match algorithm {
        Algorithm::Bfs => bfs_path(source, target, n, |id| store.neighbors(id)),
        Algorithm::Dfs => dfs_path(source, target, n, |id| store.neighbors(id)),
    }
}
