use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use avltree::graph::{minimum_spanning_forest, parse_edges, sorted_edges, Edge, GraphError};
use clap::Parser;
use log::{error, info};

// Minimum spanning forest of an edge list, one `<from> <to> <weight>` per
// line. Input ends at the first blank line or end of file.
#[derive(Parser)]
#[clap(name = "mst", about = "Kruskal's minimum spanning forest over an edge list")]
struct Args {
    /// Edge list to read; standard input when omitted.
    input: Option<PathBuf>,

    /// Also print every distinct edge, lightest first.
    #[clap(short, long, action)]
    sorted: bool,

    /// Print only the total weight.
    #[clap(short, long, action)]
    quiet: bool,
}

fn read_edges(input: Option<&PathBuf>) -> Result<Vec<Edge>, GraphError> {
    match input {
        Some(path) => parse_edges(BufReader::new(File::open(path)?)),
        None => parse_edges(io::stdin().lock()),
    }
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let args = Args::parse();

    let edges = match read_edges(args.input.as_ref()) {
        Ok(edges) => edges,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("read {} edges", edges.len());

    if args.sorted && !args.quiet {
        println!("Sorted edges:");
        for edge in &sorted_edges(edges.iter().cloned()) {
            println!("{}", edge);
        }
        println!();
    }

    let forest = minimum_spanning_forest(edges);
    info!(
        "chose {} edges, {} components",
        forest.edges.len(),
        forest.components
    );

    if args.quiet {
        println!("{}", forest.total_weight);
        return ExitCode::SUCCESS;
    }
    println!("Spanning forest:");
    for edge in &forest.edges {
        println!("{}", edge);
    }
    println!("Total weight: {}", forest.total_weight);
    println!("Components: {}", forest.components);
    ExitCode::SUCCESS
}
