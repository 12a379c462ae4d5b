use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use network_parser::{Graph, GraphSource};
use routing_core::{
    find_route, k_shortest_paths, route_total_fee, Amount, CltvDelta, DirectedGraph, NodeId,
    RichWeight, RouteParams, RouteQuery,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "route-cli", version, about = "Computes Lightning-style payment routes over a gossip snapshot.")]
struct Cli {
    /// Path to a JSON gossip snapshot.
    snapshot: PathBuf,
    /// Snapshot dialect.
    #[arg(long = "source-format", value_enum, default_value = "lnd")]
    graph_source: GraphSource,
    #[arg(long = "log", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Finds a single route and its total fee.
    FindRoute {
        #[arg(long)]
        src: String,
        #[arg(long)]
        dst: String,
        #[arg(long)]
        amount: u64,
        /// Candidate pool size when `--randomize` is set.
        #[arg(long = "num-routes", default_value_t = 1)]
        num_routes: u32,
        #[arg(long = "max-fee-base")]
        max_fee_base: Option<u64>,
        #[arg(long = "max-fee-pct")]
        max_fee_pct: Option<f64>,
        #[arg(long = "max-cltv")]
        max_cltv: Option<u32>,
        #[arg(long = "max-length")]
        max_length: Option<u32>,
        #[arg(long)]
        randomize: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Enumerates up to `count` loopless routes in non-decreasing weight order.
    KShortest {
        #[arg(long)]
        src: String,
        #[arg(long)]
        dst: String,
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        count: u32,
    },
}

fn parse_node(s: &str) -> Option<NodeId> {
    NodeId::from_hex(s).ok()
}

fn main() -> ExitCode {
    let args = Cli::parse();
    let log_level = args.log_level.clone();
    let env = Env::default()
        .filter_or("MY_LOG_LEVEL", log_level)
        .write_style_or("MY_LOG_STYLE", "always");
    env_logger::init_from_env(env);

    let json = match std::fs::read_to_string(&args.snapshot) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to read {}: {e}", args.snapshot.display());
            return ExitCode::FAILURE;
        }
    };
    let raw = match Graph::from_json_str(&json, args.graph_source) {
        Ok(g) => g,
        Err(e) => {
            error!("failed to parse snapshot: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("parsed snapshot with {} nodes", raw.nodes.len());
    let graph = match DirectedGraph::from_snapshot(&raw) {
        Ok(graph) => graph,
        Err(e) => {
            error!("failed to build routing graph: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "built routing graph with {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    match args.command {
        Command::FindRoute {
            src,
            dst,
            amount,
            num_routes,
            max_fee_base,
            max_fee_pct,
            max_cltv,
            max_length,
            randomize,
            seed,
        } => {
            let (Some(source), Some(target)) = (parse_node(&src), parse_node(&dst)) else {
                error!("src/dst must be valid hex-encoded node ids");
                return ExitCode::FAILURE;
            };

            let mut params = RouteParams::default();
            if let Some(v) = max_fee_base {
                params.max_fee_base = Amount(v);
            }
            if let Some(v) = max_fee_pct {
                params.max_fee_pct = v;
            }
            if let Some(v) = max_cltv {
                params.route_max_cltv = CltvDelta(v);
            }
            if let Some(v) = max_length {
                params.route_max_length = v;
            }
            params.randomize = randomize;
            params.seed = seed;

            let empty_edges = HashSet::new();
            let empty_vertices = HashSet::new();
            let empty_channels = HashSet::new();
            let no_extra = Vec::new();
            let always_true = |_: &RichWeight| true;
            let never_cancel = || false;
            let query = RouteQuery {
                source,
                target,
                amount: Amount(amount),
                num_routes,
                ignored_edges: &empty_edges,
                ignored_vertices: &empty_vertices,
                ignored_channels: &empty_channels,
                extra_edges: &no_extra,
                boundary_predicate: &always_true,
                cancel: &never_cancel,
            };

            match find_route(&graph, &query, &params) {
                Ok(hops) => {
                    let fee = route_total_fee(&hops, Amount(amount)).unwrap_or(Amount::ZERO);
                    info!("found route with {} hops, fee {}", hops.len(), fee);
                    for hop in &hops {
                        println!(
                            "{} -> {} (fee_base {}, ppm {})",
                            hop.from, hop.to, hop.update.fee_base, hop.update.fee_proportional_millionths
                        );
                    }
                    println!("total fee: {fee}");
                }
                Err(e) => {
                    error!("route search failed: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        Command::KShortest { src, dst, amount, count } => {
            let (Some(source), Some(target)) = (parse_node(&src), parse_node(&dst)) else {
                error!("src/dst must be valid hex-encoded node ids");
                return ExitCode::FAILURE;
            };
            let params = RouteParams::default();
            let empty_edges = HashSet::new();
            let empty_vertices = HashSet::new();
            let empty_channels = HashSet::new();
            let no_extra = Vec::new();
            let always_true = |_: &RichWeight| true;
            let never_cancel = || false;
            let scope = routing_core::SearchScope {
                ignored_edges: &empty_edges,
                ignored_vertices: &empty_vertices,
                ignored_channels: &empty_channels,
                extra_edges: &no_extra,
                boundary_predicate: &always_true,
                cancel: &never_cancel,
            };
            let paths = k_shortest_paths(&graph, source, target, Amount(amount), count, &params, &scope);
            if paths.is_empty() {
                error!("no route found");
                return ExitCode::FAILURE;
            }
            for (i, path) in paths.iter().enumerate() {
                println!("path {i}: weight {:.2}, {} hops", path.weight, path.edges.len());
            }
        }
    }

    ExitCode::SUCCESS
}
