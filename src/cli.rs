use crate::config::load_config;
use crate::ir::MemoryGraph;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "memlayout",
    version,
    about = "Compute 2D positions for a memory relationship graph"
)]
pub struct Args {
    /// Input graph (.json with `nodes` and `edges`) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout JSON. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Seed for a reproducible layout
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Drop edges lighter than this weight before clustering
    #[arg(long = "min-weight")]
    pub min_weight: Option<f32>,

    /// Emit single-line JSON instead of pretty output
    #[arg(long = "compact")]
    pub compact: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    run_with_args(args)
}

pub fn run_with_args(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.layout.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.layout.canvas.height = height;
    }
    if args.seed.is_some() {
        config.layout.seed = args.seed;
    }
    if let Some(min_weight) = args.min_weight {
        config.layout.min_weight = min_weight;
    }
    config.validate()?;

    let input = read_input(args.input.as_deref())?;
    let graph: MemoryGraph =
        serde_json::from_str(&input).context("input is not a valid memory graph")?;

    let layout = compute_layout(&graph, &config.theme, &config.layout);
    info!(
        "laid out {} nodes in {} clusters",
        layout.positions.len(),
        layout.clusters.len()
    );
    write_layout_dump(args.output.as_deref(), &layout, !args.compact)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let args = Args::parse_from([
            "memlayout", "-i", "graph.json", "-w", "900", "-H", "700", "-s", "12", "--min-weight", "0.7",
            "--compact",
        ]);
        assert_eq!(args.input.as_deref(), Some(Path::new("graph.json")));
        assert_eq!(args.width, Some(900.0));
        assert_eq!(args.height, Some(700.0));
        assert_eq!(args.seed, Some(12));
        assert_eq!(args.min_weight, Some(0.7));
        assert!(args.compact);
    }

    #[test]
    fn layout_round_trip_through_files() {
        let dir = std::env::temp_dir().join(format!("memlayout-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("graph.json");
        let output = dir.join("layout.json");
        std::fs::write(
            &input,
            r#"{"nodes": [
                {"id": "a", "label": "a", "content": "a", "createdAt": "2024-01-01T00:00:00Z"},
                {"id": "b", "label": "b", "content": "b", "createdAt": "2024-01-02T00:00:00Z"}
            ], "edges": [{"source": "a", "target": "b", "weight": 0.9}]}"#,
        )
        .unwrap();

        run_with_args(Args {
            input: Some(input),
            output: Some(output.clone()),
            config: None,
            width: None,
            height: None,
            seed: Some(4),
            min_weight: Some(0.95),
            compact: true,
        })
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["totalNodes"], 2);
        assert_eq!(written["totalEdges"], 0);
        assert_eq!(written["clusters"].as_array().map(Vec::len), Some(2));
        std::fs::remove_dir_all(&dir).ok();
    }
}
