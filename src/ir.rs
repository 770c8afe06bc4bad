use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

const LABEL_MAX_CHARS: usize = 50;

fn default_node_kind() -> String {
    "memory".to_string()
}

fn default_edge_kind() -> String {
    "semantic_similarity".to_string()
}

fn nullable_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryNode {
    pub id: String,
    pub label: String,
    pub content: String,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
    #[serde(rename = "type", default = "default_node_kind")]
    pub kind: String,
}

impl MemoryNode {
    /// Builds a node from a stored memory, deriving the label from its content.
    pub fn from_memory(
        id: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
        tags: Vec<String>,
    ) -> Self {
        let content = content.into();
        Self {
            id: id.into(),
            label: label_from_content(&content),
            content,
            created_at,
            tags,
            kind: default_node_kind(),
        }
    }
}

/// First 50 characters of the content, with an ellipsis when truncated.
pub fn label_from_content(content: &str) -> String {
    match content.char_indices().nth(LABEL_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEdge {
    pub source: String,
    pub target: String,
    pub weight: f32,
    #[serde(rename = "type", default = "default_edge_kind")]
    pub kind: String,
}

impl MemoryEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
            kind: default_edge_kind(),
        }
    }
}

/// A materialized graph snapshot as delivered by the memory query layer.
///
/// Unknown fields such as `total_nodes` / `total_edges` from the API response
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryGraph {
    #[serde(default)]
    pub nodes: Vec<MemoryNode>,
    #[serde(default)]
    pub edges: Vec<MemoryEdge>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeReport {
    pub duplicate_nodes: usize,
    pub dangling_edges: usize,
    pub self_edges: usize,
    pub weak_edges: usize,
    pub duplicate_edges: usize,
}

impl SanitizeReport {
    pub fn dropped_edges(&self) -> usize {
        self.dangling_edges + self.self_edges + self.weak_edges + self.duplicate_edges
    }
}

/// Borrowed view of a graph after sanitation: unique node ids in input order
/// and only edges that connect two distinct known nodes, once per pair, with
/// at least the requested weight.
#[derive(Debug, Clone)]
pub struct SanitizedGraph<'a> {
    pub nodes: Vec<&'a MemoryNode>,
    pub edges: Vec<&'a MemoryEdge>,
    pub report: SanitizeReport,
}

impl MemoryGraph {
    pub fn new(nodes: Vec<MemoryNode>, edges: Vec<MemoryEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops duplicate nodes and every edge that is dangling, a self-connection,
    /// lighter than `min_weight`, or a repeat of an already kept pair.
    pub fn sanitize(&self, min_weight: f32) -> SanitizedGraph<'_> {
        let mut report = SanitizeReport::default();
        let mut seen_ids: HashSet<&str> = HashSet::new();
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if seen_ids.insert(node.id.as_str()) {
                nodes.push(node);
            } else {
                warn!("dropping duplicate memory node '{}'", node.id);
                report.duplicate_nodes += 1;
            }
        }

        let mut seen_pairs: HashSet<(&str, &str)> = HashSet::new();
        let mut edges = Vec::with_capacity(self.edges.len());
        for edge in &self.edges {
            let source = edge.source.as_str();
            let target = edge.target.as_str();
            if !seen_ids.contains(source) || !seen_ids.contains(target) {
                warn!(
                    "dropping edge {} -> {}: endpoint is not a known memory node",
                    source, target
                );
                report.dangling_edges += 1;
                continue;
            }
            if source == target {
                warn!("dropping self-connection on '{}'", source);
                report.self_edges += 1;
                continue;
            }
            if edge.weight < min_weight {
                debug!(
                    "dropping edge {} -> {}: weight {} below {}",
                    source, target, edge.weight, min_weight
                );
                report.weak_edges += 1;
                continue;
            }
            let pair = if source < target {
                (source, target)
            } else {
                (target, source)
            };
            if !seen_pairs.insert(pair) {
                warn!("dropping duplicate edge {} -> {}", source, target);
                report.duplicate_edges += 1;
                continue;
            }
            edges.push(edge);
        }

        SanitizedGraph {
            nodes,
            edges,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> MemoryNode {
        MemoryNode::from_memory(id, format!("memory {id}"), Utc::now(), Vec::new())
    }

    #[test]
    fn short_content_is_its_own_label() {
        assert_eq!(label_from_content("buy milk"), "buy milk");
    }

    #[test]
    fn long_content_is_truncated_on_char_boundary() {
        let content = "é".repeat(60);
        let label = label_from_content(&content);
        assert_eq!(label.chars().count(), 53);
        assert!(label.ends_with("..."));
    }

    #[test]
    fn deserializes_api_response_shape() {
        let json = r#"{
            "nodes": [
                {"id": "a", "label": "A", "content": "alpha", "created_at": "2024-05-01T10:00:00Z", "tags": null},
                {"id": "b", "label": "B", "content": "beta", "createdAt": "2024-05-02T10:00:00Z", "tags": ["x"], "type": "memory"}
            ],
            "edges": [{"source": "a", "target": "b", "weight": 0.82, "type": "semantic_similarity"}],
            "total_nodes": 2,
            "total_edges": 1
        }"#;
        let graph: MemoryGraph = serde_json::from_str(json).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.nodes[0].tags.is_empty());
        assert_eq!(graph.nodes[1].tags, vec!["x".to_string()]);
        assert_eq!(graph.edges[0].kind, "semantic_similarity");
    }

    #[test]
    fn sanitize_drops_dangling_self_and_duplicate_edges() {
        let graph = MemoryGraph::new(
            vec![node("a"), node("b"), node("c"), node("a")],
            vec![
                MemoryEdge::new("a", "b", 0.9),
                MemoryEdge::new("b", "a", 0.7),
                MemoryEdge::new("c", "c", 1.0),
                MemoryEdge::new("c", "ghost", 0.5),
                MemoryEdge::new("b", "c", 0.4),
            ],
        );
        let clean = graph.sanitize(0.0);
        assert_eq!(clean.nodes.len(), 3);
        assert_eq!(clean.edges.len(), 2);
        assert_eq!(clean.edges[0].weight, 0.9);
        assert_eq!(
            clean.report,
            SanitizeReport {
                duplicate_nodes: 1,
                dangling_edges: 1,
                self_edges: 1,
                weak_edges: 0,
                duplicate_edges: 1,
            }
        );
        assert_eq!(clean.report.dropped_edges(), 3);
    }

    #[test]
    fn weak_edges_do_not_claim_their_pair() {
        let graph = MemoryGraph::new(
            vec![node("a"), node("b"), node("c")],
            vec![
                MemoryEdge::new("a", "b", 0.4),
                MemoryEdge::new("b", "a", 0.75),
                MemoryEdge::new("b", "c", 0.69),
                MemoryEdge::new("c", "a", 0.7),
            ],
        );
        let clean = graph.sanitize(0.7);
        let kept: Vec<f32> = clean.edges.iter().map(|edge| edge.weight).collect();
        assert_eq!(kept, vec![0.75, 0.7]);
        assert_eq!(clean.report.weak_edges, 2);
        assert_eq!(clean.report.duplicate_edges, 0);
        assert_eq!(clean.report.dropped_edges(), 2);
    }
}
