//! friendgraph - undirected social graph engine
//!
//! # Architecture
//!
//! - **GraphStore**: one trait, two backends (`ListGraph`, `MatrixGraph`)
//! - **GraphLoader**: edge-list text → finalized store
//! - **Traversal**: BFS (shortest path) and DFS (some path) over any store
//! - **QueryFacade**: ID validation, friend lists, path queries
//!
//! # Usage example
//!
//! ```
//! use friendgraph::{Algorithm, Connection, GraphLoader, QueryFacade, Representation};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = GraphLoader::new(Representation::Matrix).load_str("4 3\n0 1\n1 2\n2 3\n")?;
//! let session = QueryFacade::new(loaded)?;
//!
//! assert_eq!(session.friends_of(1)?.friends, vec![0, 2]);
//! assert_eq!(
//!     session.path_between(0, 3, Algorithm::Bfs)?,
//!     Connection::Found { path: vec![0, 1, 2, 3] }
//! );
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod loader;
pub mod query;

pub use error::{GraphError, Result};
pub use graph::{Algorithm, GraphStore, ListGraph, MatrixGraph, Path, Representation, VertexId};
pub use loader::{DeclaredCounts, GraphLoader, LoadedGraph};
pub use query::{Connection, FriendList, QueryFacade};
