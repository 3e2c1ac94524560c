//! Edge-list file loader
//!
//! Format:
//!
//! ```text
//! <declared vertices> <declared edges>
//! <i> <j>
//! <i> <j>
//! ...
//! ```
//!
//! The header counts are advisory. The vertex count comes from the data
//! (largest ID + 1) and every edge line present is loaded, whatever the
//! header says. Blank lines are skipped. Any other line that is not exactly
//! two non-negative integers, or that names an ID beyond the backend's
//! `max_vertices()`, aborts the whole load.

use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::{GraphError, Result};
use crate::graph::{GraphStore, Representation, VertexId};

// Verbose load diagnostics - enabled via FRIENDGRAPH_DEBUG=1
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if env::var("FRIENDGRAPH_DEBUG").is_ok() {
            eprintln!("[friendgraph] {}", format!($($arg)*));
        }
    };
}

/// Counts from the header line, for display only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeclaredCounts {
    pub vertices: usize,
    pub edges: usize,
}

/// A finalized store plus what the file claimed about it
pub struct LoadedGraph {
    pub store: Box<dyn GraphStore>,
    pub declared: DeclaredCounts,
    /// Edge lines actually read (duplicates included)
    pub edge_lines: usize,
}

impl std::fmt::Debug for LoadedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedGraph")
            .field("representation", &self.store.representation())
            .field("num_vertices", &self.store.num_vertices())
            .field("edge_count", &self.store.edge_count())
            .field("declared", &self.declared)
            .field("edge_lines", &self.edge_lines)
            .finish()
    }
}

/// Parses edge-list text into the chosen backend
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphLoader {
    representation: Representation,
}

impl GraphLoader {
    pub fn new(representation: Representation) -> Self {
        Self { representation }
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Load from a file path. A missing file is `FileUnavailable`.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<LoadedGraph> {
        let path = path.as_ref();
        debug_log!("load_path() - path: {:?}, representation: {}", path, self.representation);

        let file = File::open(path).map_err(|source| GraphError::FileUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let loaded = self.load_reader(BufReader::new(file))?;

        tracing::info!(
            "Loaded {:?} into {} graph: {} vertices, {} edges",
            path,
            self.representation,
            loaded.store.num_vertices(),
            loaded.store.edge_count()
        );
        Ok(loaded)
    }

    /// Load from in-memory text
    pub fn load_str(&self, text: &str) -> Result<LoadedGraph> {
        self.load_reader(text.as_bytes())
    }

    /// Load from any buffered reader. On error nothing is returned, so a
    /// half-populated store can never escape.
    pub fn load_reader<R: BufRead>(&self, reader: R) -> Result<LoadedGraph> {
        let mut store = self.representation.new_store();
        let mut declared = None;
        let mut edge_lines = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let (a, b) = parse_pair(line_no, &line)?;
            if declared.is_none() {
                declared = Some(DeclaredCounts { vertices: a, edges: b });
                debug_log!("  header: {} vertices, {} edges declared", a, b);
                continue;
            }

            store
                .add_edge(a, b)
                .map_err(|e| GraphError::malformed(line_no, e.to_string()))?;
            edge_lines += 1;
        }

        let declared = declared.ok_or_else(|| GraphError::malformed(1, "missing header line"))?;
        store.finalize()?;

        if declared.vertices != store.num_vertices() || declared.edges != edge_lines {
            tracing::warn!(
                "Header declares {} vertices / {} edges, data has {} vertices / {} edge lines",
                declared.vertices,
                declared.edges,
                store.num_vertices(),
                edge_lines
            );
        }
        debug_log!(
            "  done: {} edge lines, {} distinct edges, {} vertices",
            edge_lines,
            store.edge_count(),
            store.num_vertices()
        );

        Ok(LoadedGraph { store, declared, edge_lines })
    }
}

/// Parse exactly two non-negative integers
fn parse_pair(line_no: usize, line: &str) -> Result<(VertexId, VertexId)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(GraphError::malformed(
            line_no,
            format!("expected 2 integers, found {} tokens in {:?}", tokens.len(), line),
        ));
    }

    let parse = |token: &str| {
        token.parse::<VertexId>().map_err(|_| {
            GraphError::malformed(line_no, format!("{:?} is not a non-negative integer", token))
        })
    };
    Ok((parse(tokens[0])?, parse(tokens[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_chain() {
        let loaded = GraphLoader::new(Representation::List)
            .load_str("4 3\n0 1\n1 2\n2 3\n")
            .unwrap();

        assert_eq!(loaded.declared, DeclaredCounts { vertices: 4, edges: 3 });
        assert_eq!(loaded.edge_lines, 3);
        assert_eq!(loaded.store.num_vertices(), 4);
        assert_eq!(loaded.store.edge_count(), 3);
    }

    #[test]
    fn test_matrix_is_finalized_after_load() {
        let loaded = GraphLoader::new(Representation::Matrix)
            .load_str("3 2\n0 1\n1 2\n")
            .unwrap();

        assert!(loaded.store.has_edge(2, 1).unwrap());
        assert_eq!(loaded.store.neighbors(1).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_header_counts_are_advisory() {
        let loaded = GraphLoader::new(Representation::List)
            .load_str("5 6\n0 1\n1 2\n2 3\n")
            .unwrap();

        assert_eq!(loaded.declared, DeclaredCounts { vertices: 5, edges: 6 });
        assert_eq!(loaded.store.num_vertices(), 4);
        assert_eq!(loaded.edge_lines, 3);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let loaded = GraphLoader::new(Representation::List)
            .load_str("\n3 2\r\n0 1\r\n\r\n   \n1 2\r\n")
            .unwrap();

        assert_eq!(loaded.store.edge_count(), 2);
        assert_eq!(loaded.edge_lines, 2);
    }

    #[test]
    fn test_malformed_token_fails_load() {
        let err = GraphLoader::new(Representation::List)
            .load_str("2 1\n0 1\n1 x\n")
            .unwrap_err();

        match err {
            GraphError::MalformedInput { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("\"x\""));
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_token_count_fails_load() {
        let err = GraphLoader::new(Representation::Matrix)
            .load_str("3 1\n0 1 2\n")
            .unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));

        let err = GraphLoader::new(Representation::List).load_str("3 1\n7\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_negative_id_is_malformed() {
        let err = GraphLoader::new(Representation::List)
            .load_str("2 1\n-1 0\n")
            .unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_id_beyond_capacity_is_malformed() {
        for repr in [Representation::List, Representation::Matrix] {
            let err = GraphLoader::new(repr).load_str("2 1\n0 1\n0 5000000000\n").unwrap_err();
            match err {
                GraphError::MalformedInput { line, reason } => {
                    assert_eq!(line, 3);
                    assert!(reason.contains("capacity"), "{}", reason);
                }
                other => panic!("expected MalformedInput, got {:?}", other),
            }
        }

        let limit = Representation::Matrix.new_store().max_vertices();
        let text = format!("2 1\n0 {}\n", limit);
        let err = GraphLoader::new(Representation::Matrix).load_str(&text).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_missing_or_bad_header() {
        let err = GraphLoader::new(Representation::List).load_str("").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 1, .. }));

        let err = GraphLoader::new(Representation::List).load_str("four three\n0 1\n").unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_header_only_gives_empty_graph() {
        let loaded = GraphLoader::new(Representation::Matrix).load_str("0 0\n").unwrap();

        assert_eq!(loaded.store.num_vertices(), 0);
        assert_eq!(loaded.edge_lines, 0);
    }

    #[test]
    fn test_load_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "3 2").unwrap();
        writeln!(file, "0 1").unwrap();
        writeln!(file, "1 2").unwrap();

        let loaded = GraphLoader::new(Representation::Matrix).load_path(file.path()).unwrap();
        assert_eq!(loaded.store.num_vertices(), 3);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_graph.txt");

        let err = GraphLoader::new(Representation::List).load_path(&missing).unwrap_err();
        match err {
            GraphError::FileUnavailable { path, .. } => assert_eq!(path, missing),
            other => panic!("expected FileUnavailable, got {:?}", other),
        }
    }
}
