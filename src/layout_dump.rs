use crate::layout::{Layout, LayoutStats};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Wire shape handed to the rendering surface.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub hub: Option<String>,
    pub positions: Vec<PositionDump>,
    pub edge_styles: Vec<EdgeStyleDump>,
    pub clusters: Vec<ClusterDump>,
    pub stats: StatsDump,
    pub total_nodes: usize,
    pub total_edges: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDump {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub component: usize,
    pub color: String,
    pub hub: bool,
    pub tier: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyleDump {
    pub source: String,
    pub target: String,
    pub weight: f32,
    pub stroke_width: f32,
    pub opacity: f32,
    pub color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDump {
    pub index: usize,
    pub color: String,
    pub nodes: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDump {
    pub sampled: usize,
    pub spiral: usize,
    pub random: usize,
    pub dropped_nodes: usize,
    pub dropped_edges: usize,
}

impl From<&LayoutStats> for StatsDump {
    fn from(stats: &LayoutStats) -> Self {
        Self {
            sampled: stats.sampled,
            spiral: stats.spiral,
            random: stats.random,
            dropped_nodes: stats.sanitize.duplicate_nodes,
            dropped_edges: stats.sanitize.dropped_edges(),
        }
    }
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let positions = layout
            .positions
            .iter()
            .map(|node| PositionDump {
                id: node.id.clone(),
                x: node.x,
                y: node.y,
                component: node.component,
                color: node.color.clone(),
                hub: node.hub,
                tier: node.tier.as_str(),
            })
            .collect::<Vec<_>>();

        let edge_styles = layout
            .edge_styles
            .iter()
            .map(|edge| EdgeStyleDump {
                source: edge.source.clone(),
                target: edge.target.clone(),
                weight: edge.weight,
                stroke_width: edge.stroke_width,
                opacity: edge.opacity,
                color: edge.color.clone(),
            })
            .collect::<Vec<_>>();

        let clusters = layout
            .clusters
            .iter()
            .map(|cluster| ClusterDump {
                index: cluster.index,
                color: cluster.color.clone(),
                nodes: cluster.nodes.clone(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            padding: layout.padding,
            hub: layout.hub.clone(),
            total_nodes: positions.len(),
            total_edges: edge_styles.len(),
            positions,
            edge_styles,
            clusters,
            stats: StatsDump::from(&layout.stats),
        }
    }
}

pub fn write_layout_dump(
    path: Option<&Path>,
    layout: &Layout,
    pretty: bool,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            write_json(&mut writer, &dump, pretty)?;
            writer.flush()?;
        }
        _ => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_json(&mut writer, &dump, pretty)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(writer: &mut W, dump: &LayoutDump, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, dump)?;
    } else {
        serde_json::to_writer(writer, dump)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{MemoryEdge, MemoryGraph, MemoryNode};
    use crate::layout::compute_layout;
    use crate::theme::Theme;
    use chrono::Utc;

    #[test]
    fn dump_uses_camel_case_contract() {
        let graph = MemoryGraph::new(
            vec![
                MemoryNode::from_memory("a", "first", Utc::now(), Vec::new()),
                MemoryNode::from_memory("b", "second", Utc::now(), Vec::new()),
            ],
            vec![MemoryEdge::new("a", "b", 0.75)],
        );
        let config = LayoutConfig {
            seed: Some(5),
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&graph, &Theme::default(), &config);
        let value = serde_json::to_value(LayoutDump::from_layout(&layout)).unwrap();

        assert_eq!(value["totalNodes"], 2);
        assert_eq!(value["totalEdges"], 1);
        assert_eq!(value["hub"], "a");
        assert!(value["edgeStyles"][0]["strokeWidth"].as_f64().unwrap() > 1.0);
        assert_eq!(value["positions"][0]["tier"], "hub");
        assert!(value["stats"]["droppedEdges"].is_number());
    }
}
