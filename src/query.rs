//! Query facade over one loaded graph
//!
//! A `QueryFacade` is the session: it owns a finalized, read-only store.
//! Loading another file means building a new facade and dropping the old
//! one, never mutating the store underneath it.

use std::path::Path as FsPath;

use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::graph::{find_path, vertex_in_range, Algorithm, GraphStore, Path, Representation, VertexId};
use crate::loader::{DeclaredCounts, GraphLoader, LoadedGraph};

/// Neighbors of one vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendList {
    pub id: VertexId,
    pub friends: Vec<VertexId>,
}

impl FriendList {
    pub fn count(&self) -> usize {
        self.friends.len()
    }
}

/// Outcome of a valid path query. Invalid queries are `Err(InvalidQuery)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Connection {
    Found { path: Path },
    NoPath,
}

impl Connection {
    fn from_path(path: Path) -> Self {
        if path.is_empty() {
            Connection::NoPath
        } else {
            Connection::Found { path }
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, Connection::Found { .. })
    }

    /// Path vertices; empty when there is no connection
    pub fn path(&self) -> &[VertexId] {
        match self {
            Connection::Found { path } => path,
            Connection::NoPath => &[],
        }
    }
}

pub struct QueryFacade {
    store: Box<dyn GraphStore>,
    declared: DeclaredCounts,
}

impl QueryFacade {
    /// Wrap a loaded graph. The store is finalized here as well, so a
    /// facade never holds an unbuilt matrix.
    pub fn new(loaded: LoadedGraph) -> Result<Self> {
        let LoadedGraph { mut store, declared, .. } = loaded;
        store.finalize()?;
        Ok(Self { store, declared })
    }

    /// Load `path` into the given representation and open a session on it
    pub fn open<P: AsRef<FsPath>>(path: P, representation: Representation) -> Result<Self> {
        GraphLoader::new(representation).load_path(path).and_then(Self::new)
    }

    pub fn store(&self) -> &dyn GraphStore {
        self.store.as_ref()
    }

    pub fn representation(&self) -> Representation {
        self.store.representation()
    }

    pub fn num_vertices(&self) -> usize {
        self.store.num_vertices()
    }

    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    pub fn declared(&self) -> DeclaredCounts {
        self.declared
    }

    fn vertex(&self, id: i64) -> Result<VertexId> {
        vertex_in_range(self.num_vertices(), id)
    }

    /// Direct neighbors of `id`
    pub fn friends_of(&self, id: i64) -> Result<FriendList> {
        let id = self.vertex(id)?;
        Ok(FriendList { id, friends: self.store.neighbors(id)? })
    }

    /// Find a connection between two IDs.
    ///
    /// Range and distinctness are checked before the graph is touched.
    pub fn path_between(&self, id1: i64, id2: i64, algorithm: Algorithm) -> Result<Connection> {
        let source = self.vertex(id1)?;
        let target = self.vertex(id2)?;
        find_path(self.store.as_ref(), source, target, algorithm).map(Connection::from_path)
    }

    /// Run independent path queries in parallel, results in input order
    pub fn paths_between(&self, pairs: &[(i64, i64)], algorithm: Algorithm) -> Vec<Result<Connection>> {
        pairs
            .par_iter()
            .map(|&(id1, id2)| self.path_between(id1, id2, algorithm))
            .collect()
    }

    /// Every vertex with its neighbor sequence
    pub fn adjacency(&self) -> Result<Vec<FriendList>> {
        (0..self.num_vertices())
            .map(|id| Ok(FriendList { id, friends: self.store.neighbors(id)? }))
            .collect()
    }
}

impl std::fmt::Debug for QueryFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryFacade")
            .field("representation", &self.representation())
            .field("num_vertices", &self.num_vertices())
            .field("edge_count", &self.edge_count())
            .field("declared", &self.declared)
            .finish()
    }
}
