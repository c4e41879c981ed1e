// CLI entry point for wayfield path queries.
//
// Loads a scene file (navigation config plus static obstacles, see
// `scene.rs`), builds the node grid over it and prints the path between two
// world points, one waypoint per line or as JSON.
//
// Usage:
//   wayfield --from <X,Y,Z> --to <X,Y,Z> [OPTIONS]
//     --scene <FILE>             Scene JSON (default: empty 3x3 field)
//     --max-expansions <N>       Override the search expansion cap
//     --parent-only              Use the ParentOnly frontier update
//     --json                     Print a JSON report instead of plain lines
//     --dump-graph <FILE>        Write the built graph as JSON
//     --log-level <LEVEL>        Default log filter when RUST_LOG is unset (default: warn)
//
// Exits with status 2 when the search finds no path.

mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use wayfield_nav::{FrontierUpdate, Navigator, PathResult, SearchOutcome, Vec3};

use crate::scene::{Scene, parse_point};

#[derive(Parser, Debug)]
#[command(name = "wayfield")]
#[command(about = "Find a path across a grid waypoint field")]
#[command(version)]
struct Args {
    /// Scene file (JSON with optional `config` and `obstacles`)
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Start point as x,y,z
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    from: Vec3,

    /// Destination point as x,y,z
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    to: Vec3,

    /// Override the search expansion cap
    #[arg(long)]
    max_expansions: Option<u32>,

    /// Relink parents only when a cheaper frontier route is found
    #[arg(long)]
    parent_only: bool,

    /// Print a JSON report
    #[arg(long)]
    json: bool,

    /// Write the built graph to this file as JSON
    #[arg(long)]
    dump_graph: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Serialize)]
struct Report {
    outcome: String,
    found: bool,
    cost: f32,
    expansions: u32,
    waypoints: Vec<Vec3>,
}

impl Report {
    fn new(result: &PathResult, waypoints: Vec<Vec3>) -> Self {
        Self {
            outcome: format!("{:?}", result.outcome),
            found: result.is_found(),
            cost: result.total_cost,
            expansions: result.expansions,
            waypoints,
        }
    }
}

/// Apply command-line search overrides on top of the scene's config.
fn apply_overrides(args: &Args, scene: &mut Scene) {
    if let Some(cap) = args.max_expansions {
        scene.config.search.max_expansions = cap;
    }
    if args.parent_only {
        scene.config.search.frontier_update = FrontierUpdate::ParentOnly;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let mut scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => Scene::default(),
    };
    apply_overrides(&args, &mut scene);
    info!(
        "scene: {} obstacles, {}x{} grid",
        scene.obstacles.len(),
        scene.config.grid.nodes_x_count,
        scene.config.grid.nodes_z_count
    );

    let mut navigator = Navigator::new(scene.config, scene.obstacles);
    let graph = navigator.generate_nodes();
    info!("graph: {} nodes, {} edges", graph.node_count(), graph.edge_count());
    if let Some(path) = &args.dump_graph {
        let json = serde_json::to_string_pretty(graph)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    let result = navigator.plan(args.from, args.to)?;
    let waypoints = navigator
        .graph()
        .map(|graph| graph.positions_of(&result.nodes))
        .unwrap_or_default();

    if args.json {
        let report = Report::new(&result, waypoints);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for p in &waypoints {
            println!("{} {} {}", p.x, p.y, p.z);
        }
        eprintln!(
            "{:?}: {} waypoints, cost {:.3}, {} expansions",
            result.outcome,
            waypoints.len(),
            result.total_cost,
            result.expansions
        );
    }

    if result.outcome != SearchOutcome::Found {
        std::process::exit(2);
    }
    Ok(())
}
