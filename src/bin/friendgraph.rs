//! friendgraph - interactive explorer for social graph edge-list files
//!
//! Usage:
//!   friendgraph [<edge-file>] [--list | --matrix] [--json]
//!   friendgraph <edge-file> --friends <id> [--list | --matrix] [--json]
//!   friendgraph <edge-file> --path <id1> <id2> [--bfs | --dfs] [--list | --matrix] [--json]
//!
//! Without `--friends` / `--path` the program runs the interactive menu.
//! Bad input of any kind (missing file, malformed file, invalid IDs) is
//! reported and the session continues.
//!
//! Environment:
//!   FRIENDGRAPH_REPR   default representation (list | matrix)
//!   FRIENDGRAPH_DEBUG  verbose load diagnostics on stderr
//!   RUST_LOG           tracing filter (default: warn)

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use friendgraph::{Algorithm, Connection, FriendList, GraphError, QueryFacade, Representation};

// ============================================================================
// Command line
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OneShot {
    Friends(i64),
    Path { id1: i64, id2: i64 },
}

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    file: Option<PathBuf>,
    representation: Option<Representation>,
    algorithm: Algorithm,
    json: bool,
    command: Option<OneShot>,
    help: bool,
}

fn next_id<'a, I>(iter: &mut I, flag: &str) -> anyhow::Result<i64>
where
    I: Iterator<Item = &'a String>,
{
    let value = iter.next().ok_or_else(|| anyhow!("{} expects an integer ID", flag))?;
    value
        .parse::<i64>()
        .with_context(|| format!("{} expects an integer ID, got {:?}", flag, value))
}

fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "--list" => cli.representation = Some(Representation::List),
            "--matrix" => cli.representation = Some(Representation::Matrix),
            "--bfs" => cli.algorithm = Algorithm::Bfs,
            "--dfs" => cli.algorithm = Algorithm::Dfs,
            "--json" => cli.json = true,
            "--friends" => {
                if cli.command.is_some() {
                    bail!("only one of --friends / --path may be given");
                }
                cli.command = Some(OneShot::Friends(next_id(&mut iter, "--friends")?));
            }
            "--path" => {
                if cli.command.is_some() {
                    bail!("only one of --friends / --path may be given");
                }
                let id1 = next_id(&mut iter, "--path")?;
                let id2 = next_id(&mut iter, "--path")?;
                cli.command = Some(OneShot::Path { id1, id2 });
            }
            flag if flag.starts_with("--") => bail!("unknown option {}", flag),
            path => {
                if cli.file.is_some() {
                    bail!("unexpected extra argument {:?}", path);
                }
                cli.file = Some(PathBuf::from(path));
            }
        }
    }

    if cli.command.is_some() && cli.file.is_none() {
        bail!("--friends / --path need an edge file");
    }
    Ok(cli)
}

fn print_usage() {
    eprintln!("Usage: friendgraph [<edge-file>] [--list | --matrix] [--json]");
    eprintln!("       friendgraph <edge-file> --friends <id>");
    eprintln!("       friendgraph <edge-file> --path <id1> <id2> [--bfs | --dfs]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <edge-file>    First line: vertex and edge counts; then one 'i j' edge per line");
    eprintln!("  --list         Adjacency list storage (default)");
    eprintln!("  --matrix       Adjacency matrix storage");
    eprintln!("  --friends      Print the friend list of <id> and exit");
    eprintln!("  --path         Print a connection between <id1> and <id2> and exit");
    eprintln!("  --json         Print results as JSON");
}

/// Representation from the environment, if configured
fn env_representation() -> Option<Representation> {
    let value = env::var("FRIENDGRAPH_REPR").ok()?;
    match value.parse() {
        Ok(repr) => Some(repr),
        Err(e) => {
            tracing::warn!("Ignoring FRIENDGRAPH_REPR: {}", e);
            None
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render_load_report(session: &QueryFacade) -> String {
    let declared = session.declared();
    let mut report = format!(
        "File loaded successfully. {} Graph has {} vertices and {} edges.",
        session.representation().label(),
        declared.vertices,
        declared.edges
    );
    if declared.vertices != session.num_vertices() {
        report.push_str(&format!(
            "\n(Data contains {} vertices and {} distinct edges.)",
            session.num_vertices(),
            session.edge_count()
        ));
    }
    report
}

fn render_friends(list: &FriendList) -> String {
    let mut out = format!("\n\t==== {}'s FRIEND LIST ====\n\n", list.id);
    for friend in &list.friends {
        out.push_str(&format!("{}\n", friend));
    }
    out.push_str(&format!("\n{}'s Friend Count: {}", list.id, list.count()));
    out
}

fn render_connection(id1: i64, id2: i64, connection: &Connection) -> String {
    match connection {
        Connection::Found { path } => {
            let mut out = format!("A connection from IDs {} to {} EXISTS!", id1, id2);
            for hop in path.windows(2) {
                out.push_str(&format!("\n{} is friends with {}.", hop[0], hop[1]));
            }
            out
        }
        Connection::NoPath => format!("No connection from IDs {} to {}.", id1, id2),
    }
}

fn render_adjacency(rows: &[FriendList]) -> String {
    let mut out = String::from("\n\t==== ADJACENCY ====\n");
    for row in rows {
        let friends: Vec<String> = row.friends.iter().map(|f| f.to_string()).collect();
        out.push_str(&format!("\n{}: {}", row.id, friends.join(" ")));
    }
    out
}

fn render_error(err: &GraphError) -> String {
    match err {
        GraphError::InvalidQuery(reason) => format!(
            "Invalid ID/s: {}.\nIDs must be within the graph's range and the two IDs must differ.",
            reason
        ),
        other => format!("Error: {}", other),
    }
}

fn error_kind(err: &GraphError) -> &'static str {
    match err {
        GraphError::FileUnavailable { .. } => "file_unavailable",
        GraphError::MalformedInput { .. } => "malformed_input",
        GraphError::InvalidQuery(_) => "invalid_query",
        GraphError::NotBuilt => "not_built",
        GraphError::CapacityExceeded { .. } => "capacity_exceeded",
        GraphError::Io(_) => "io",
    }
}

#[derive(Serialize)]
struct JsonError<'a> {
    kind: &'a str,
    error: String,
}

#[derive(Serialize)]
struct JsonFriends<'a> {
    id: usize,
    count: usize,
    friends: &'a [usize],
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"kind\":\"json\",\"error\":{:?}}}", e.to_string()))
}

fn json_error(err: &GraphError) -> String {
    to_json(&JsonError { kind: error_kind(err), error: err.to_string() })
}

fn format_friends(result: &friendgraph::Result<FriendList>, json: bool) -> String {
    match (result, json) {
        (Ok(list), false) => render_friends(list),
        (Ok(list), true) => to_json(&JsonFriends { id: list.id, count: list.count(), friends: &list.friends }),
        (Err(e), false) => render_error(e),
        (Err(e), true) => json_error(e),
    }
}

fn format_connection(id1: i64, id2: i64, result: &friendgraph::Result<Connection>, json: bool) -> String {
    match (result, json) {
        (Ok(connection), false) => render_connection(id1, id2, connection),
        (Ok(connection), true) => to_json(connection),
        (Err(e), false) => render_error(e),
        (Err(e), true) => json_error(e),
    }
}

// ============================================================================
// Interactive menu
// ============================================================================

struct Menu<R, W> {
    input: R,
    out: W,
    json: bool,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    fn new(input: R, out: W, json: bool) -> Self {
        Self { input, out, json }
    }

    /// Read one trimmed line; None on end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_int(&mut self, text: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.out, "Input is not of type int. Please try again.")?,
            }
        }
    }

    fn choose_representation(&mut self) -> io::Result<Option<Representation>> {
        loop {
            writeln!(self.out, "\n\t==== CHOOSING A GRAPH FORMAT ====\n")?;
            writeln!(self.out, "[1] Adjacency List.")?;
            writeln!(self.out, "[2] Matrix.\n")?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                return Ok(None);
            };
            match choice.parse() {
                Ok(repr) => return Ok(Some(repr)),
                Err(_) => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn choose_algorithm(&mut self) -> io::Result<Option<Algorithm>> {
        loop {
            writeln!(self.out, "\nChoose the search method:")?;
            writeln!(self.out, "[1] Breadth First Search.")?;
            writeln!(self.out, "[2] Depth First Search.")?;
            let Some(choice) = self.prompt("\nEnter choice: ")? else {
                return Ok(None);
            };
            match choice.parse() {
                Ok(algorithm) => return Ok(Some(algorithm)),
                Err(_) => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }

    /// Keep asking until a graph loads. None only when input runs out.
    fn load_session(
        &mut self,
        mut file: Option<PathBuf>,
        mut representation: Option<Representation>,
    ) -> io::Result<Option<QueryFacade>> {
        loop {
            let path = match file.take() {
                Some(path) => path,
                None => {
                    writeln!(self.out, "\n\t==== LOAD GRAPH DATA ====\n")?;
                    match self.prompt("Enter file path: ")? {
                        Some(line) if line.is_empty() => continue,
                        Some(line) => PathBuf::from(line),
                        None => return Ok(None),
                    }
                }
            };

            let repr = match representation {
                Some(repr) => repr,
                None => match self.choose_representation()? {
                    Some(repr) => {
                        representation = Some(repr);
                        repr
                    }
                    None => return Ok(None),
                },
            };

            match QueryFacade::open(&path, repr) {
                Ok(session) => {
                    writeln!(self.out, "{}\n", render_load_report(&session))?;
                    return Ok(Some(session));
                }
                Err(e) => {
                    tracing::warn!("Load of {:?} failed: {}", path, e);
                    writeln!(self.out, "{}\nPlease try again.", e)?;
                }
            }
        }
    }

    fn run(&mut self, mut session: QueryFacade) -> io::Result<()> {
        loop {
            writeln!(self.out, "\n\t==== MAIN MENU ====\n")?;
            writeln!(self.out, "[1] Display friend list.")?;
            writeln!(self.out, "[2] Display connections.")?;
            writeln!(self.out, "[3] Display graph.")?;
            writeln!(self.out, "[4] Load another graph.")?;
            writeln!(self.out, "[5] Exit.\n")?;

            let Some(choice) = self.prompt("Enter choice: ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => {
                    let Some(id) = self.prompt_int("Enter ID number: ")? else {
                        return Ok(());
                    };
                    let text = format_friends(&session.friends_of(id), self.json);
                    writeln!(self.out, "{}", text)?;
                }
                "2" => {
                    let Some(id1) = self.prompt_int("Enter ID number 1: ")? else {
                        return Ok(());
                    };
                    let Some(id2) = self.prompt_int("Enter ID number 2: ")? else {
                        return Ok(());
                    };
                    let Some(algorithm) = self.choose_algorithm()? else {
                        return Ok(());
                    };
                    writeln!(self.out, "\nPerforming {} on the graph from {} to {}...\n", algorithm, id1, id2)?;
                    let result = session.path_between(id1, id2, algorithm);
                    writeln!(self.out, "{}", format_connection(id1, id2, &result, self.json))?;
                }
                "3" => {
                    let text = match session.adjacency() {
                        Ok(rows) if self.json => to_json(&rows),
                        Ok(rows) => render_adjacency(&rows),
                        Err(e) => render_error(&e),
                    };
                    writeln!(self.out, "{}", text)?;
                }
                "4" => match self.load_session(None, None)? {
                    Some(next) => session = next,
                    None => return Ok(()),
                },
                "5" => {
                    writeln!(self.out, "Exiting the program...")?;
                    return Ok(());
                }
                other if other.parse::<i64>().is_err() => {
                    writeln!(self.out, "Input is not of type int. Please try again.")?;
                }
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {:#}\n", e);
            print_usage();
            std::process::exit(2);
        }
    };
    if cli.help {
        print_usage();
        return Ok(());
    }

    let representation = cli.representation.or_else(env_representation);
    let stdout = io::stdout();

    if let (Some(command), Some(file)) = (cli.command, cli.file.as_ref()) {
        let session = QueryFacade::open(file, representation.unwrap_or_default())
            .with_context(|| format!("failed to load {}", file.display()))?;
        let text = match command {
            OneShot::Friends(id) => format_friends(&session.friends_of(id), cli.json),
            OneShot::Path { id1, id2 } => {
                let result = session.path_between(id1, id2, cli.algorithm);
                format_connection(id1, id2, &result, cli.json)
            }
        };
        writeln!(stdout.lock(), "{}", text)?;
        return Ok(());
    }

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), stdout.lock(), cli.json);
    if let Some(session) = menu.load_session(cli.file, representation)? {
        menu.run(session)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn graph_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    fn run_menu(input: &str, file: Option<PathBuf>, repr: Option<Representation>) -> String {
        let mut out = Vec::new();
        {
            let mut menu = Menu::new(Cursor::new(input.to_string()), &mut out, false);
            if let Some(session) = menu.load_session(file, repr).unwrap() {
                menu.run(session).unwrap();
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_args_interactive() {
        let cli = parse_args(&args(&["graph.txt", "--matrix", "--json"])).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("graph.txt")));
        assert_eq!(cli.representation, Some(Representation::Matrix));
        assert!(cli.json);
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_parse_args_one_shot() {
        let cli = parse_args(&args(&["g.txt", "--path", "0", "-3", "--dfs"])).unwrap();
        assert_eq!(cli.command, Some(OneShot::Path { id1: 0, id2: -3 }));
        assert_eq!(cli.algorithm, Algorithm::Dfs);

        let cli = parse_args(&args(&["--friends", "7", "g.txt"])).unwrap();
        assert_eq!(cli.command, Some(OneShot::Friends(7)));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--friends", "1"])).is_err());
        assert!(parse_args(&args(&["g.txt", "--friends"])).is_err());
        assert!(parse_args(&args(&["g.txt", "--path", "1", "x"])).is_err());
        assert!(parse_args(&args(&["g.txt", "--friends", "1", "--path", "1", "2"])).is_err());
        assert!(parse_args(&args(&["g.txt", "--verbose"])).is_err());
        assert!(parse_args(&args(&["a.txt", "b.txt"])).is_err());
    }

    #[test]
    fn test_render_connection() {
        let found = Connection::Found { path: vec![0, 1, 2] };
        assert_eq!(
            render_connection(0, 2, &found),
            "A connection from IDs 0 to 2 EXISTS!\n0 is friends with 1.\n1 is friends with 2."
        );
        assert_eq!(render_connection(0, 3, &Connection::NoPath), "No connection from IDs 0 to 3.");
    }

    #[test]
    fn test_render_friends() {
        let text = render_friends(&FriendList { id: 1, friends: vec![0, 2] });
        assert!(text.contains("1's FRIEND LIST"));
        assert!(text.ends_with("1's Friend Count: 2"));
    }

    #[test]
    fn test_json_error_kind() {
        let text = json_error(&GraphError::InvalidQuery("bad".into()));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["kind"], "invalid_query");
    }

    #[test]
    fn test_menu_session() {
        let file = graph_file("4 3\n0 1\n1 2\n2 3\n");
        let input = "1\n1\n2\n0\n3\n1\n1\n9\nabc\n5\n";

        let out = run_menu(input, Some(file.path().to_path_buf()), Some(Representation::List));

        assert!(out.contains("File loaded successfully. List Graph has 4 vertices and 3 edges."));
        assert!(out.contains("1's Friend Count: 2"));
        assert!(out.contains("A connection from IDs 0 to 3 EXISTS!"));
        assert!(out.contains("2 is friends with 3."));
        assert!(out.contains("Invalid ID/s"));
        assert!(out.contains("Input is not of type int."));
        assert!(out.ends_with("Exiting the program...\n"));
    }

    #[test]
    fn test_menu_retries_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let file = graph_file("2 1\n0 1\n");
        let input = format!("2\n{}\n5\n", file.path().display());

        let out = run_menu(&input, Some(missing), None);

        assert!(out.contains("File not found or unreadable"));
        assert!(out.contains("Matrix Graph has 2 vertices and 1 edges."));
        assert!(out.contains("Exiting the program..."));
    }

    #[test]
    fn test_menu_reload_after_malformed_file() {
        let good = graph_file("2 1\n0 1\n");
        let bad = graph_file("2 1\n1 x\n");
        let input = format!("4\n{}\n1\n{}\n3\n5\n", bad.path().display(), good.path().display());

        let out = run_menu(&input, Some(good.path().to_path_buf()), Some(Representation::List));

        assert!(out.contains("Malformed input at line 2"));
        assert!(out.contains("0: 1"));
        assert!(out.contains("Exiting the program..."));
    }

    #[test]
    fn test_menu_recovers_from_oversized_id() {
        let bad = graph_file("2 1\n0 5000000000\n");
        let good = graph_file("2 1\n0 1\n");

        for repr in [Representation::List, Representation::Matrix] {
            let input = format!("{}\n5\n", good.path().display());
            let out = run_menu(&input, Some(bad.path().to_path_buf()), Some(repr));

            assert!(out.contains("Malformed input at line 2"), "{}", out);
            assert!(out.contains("capacity"));
            assert!(out.contains("Please try again."));
            assert!(out.contains("Graph has 2 vertices and 1 edges."));
            assert!(out.ends_with("Exiting the program...\n"));
        }
    }

    #[test]
    fn test_menu_ends_on_eof() {
        let file = graph_file("2 1\n0 1\n");
        let out = run_menu("1\n", Some(file.path().to_path_buf()), Some(Representation::Matrix));

        assert!(out.contains("Enter ID number: "));
        assert!(!out.contains("Exiting"));
    }
}
