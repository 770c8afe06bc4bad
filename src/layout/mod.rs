mod adjacency;
mod clusters;
mod collision;
mod components;
mod edges;
mod placement;
pub(crate) mod types;
pub use adjacency::*;
pub use clusters::*;
pub use collision::*;
pub use components::*;
pub use edges::*;
pub use placement::*;
pub use types::*;

use crate::config::{CanvasConfig, EdgeStyleConfig, LayoutConfig, PlacementConfig};
use crate::ir::{MemoryEdge, MemoryGraph};
use crate::theme::Theme;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashMap};
use std::f32::consts::TAU;
use tracing::{debug, warn};

/// Lays out a graph snapshot, seeding the random source from `config.seed`
/// (or from the OS when no seed is configured).
pub fn compute_layout(graph: &MemoryGraph, theme: &Theme, config: &LayoutConfig) -> Layout {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    compute_layout_with_rng(graph, theme, config, &mut rng)
}

pub fn compute_layout_with_rng<R: Rng>(
    graph: &MemoryGraph,
    theme: &Theme,
    config: &LayoutConfig,
    rng: &mut R,
) -> Layout {
    if let Err(err) = config.validate() {
        warn!("laying out with an invalid config: {err}");
    }
    let canvas = &config.canvas;
    let clean = graph.sanitize(config.min_weight);
    let mut layout = Layout::empty(canvas.width, canvas.height, canvas.padding);
    layout.stats.sanitize = clean.report;

    let adjacency = AdjacencyIndex::build(
        clean.nodes.iter().map(|node| node.id.as_str()),
        clean
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str())),
    );
    if adjacency.is_empty() {
        return layout;
    }
    let components = find_components(&adjacency);
    let membership = component_membership(&components, adjacency.len());
    let colors = assign_cluster_colors(&components, theme);
    let centers = plan_cluster_centers(&components, config, rng);

    let placed = NodePlacer::new(&adjacency, &membership, &centers, config).place(rng);
    let hub = placed
        .iter()
        .position(|node| node.tier == PlacementTier::Hub);

    for (index, node) in placed.iter().enumerate() {
        let component = membership[index];
        let hub_node = Some(index) == hub;
        layout.stats.record(node.tier);
        layout.positions.push(NodePosition {
            id: adjacency.id(index).to_string(),
            x: node.point.0,
            y: node.point.1,
            component,
            color: if hub_node {
                theme.hub_color.clone()
            } else {
                colors[component].clone()
            },
            hub: hub_node,
            tier: node.tier,
        });
    }
    layout.hub = hub.map(|index| adjacency.id(index).to_string());

    layout.edge_styles = style_edges(
        &clean.edges,
        &adjacency,
        &membership,
        &colors,
        theme,
        &config.edges,
    );
    layout.clusters = components
        .iter()
        .map(|component| ClusterSummary {
            index: component.index,
            color: colors[component.index].clone(),
            nodes: component
                .ids(&adjacency)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();

    debug!(
        nodes = layout.positions.len(),
        edges = layout.edge_styles.len(),
        components = components.len(),
        spiral = layout.stats.spiral,
        random = layout.stats.random,
        "computed memory graph layout"
    );
    if layout.stats.random > 0 {
        warn!(
            "{} of {} nodes needed the unconstrained fallback and may overlap",
            layout.stats.random,
            layout.positions.len()
        );
    }
    layout
}
