use super::*;

/// Maps a weight onto `(stroke_width, opacity)`; weights are clamped to `[0, 1]`.
pub fn stroke_for_weight(weight: f32, config: &EdgeStyleConfig) -> (f32, f32) {
    let t = if weight.is_finite() {
        weight.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let width = config.min_stroke_width + t * (config.max_stroke_width - config.min_stroke_width);
    let opacity = config.min_opacity + t * (config.max_opacity - config.min_opacity);
    (width, opacity)
}

/// Styles every edge whose endpoints are both indexed.
///
/// Kept edges always join two nodes of the same component, so an edge takes
/// its cluster's color; `theme.edge_color` is used when the theme has no
/// cluster palette.
pub fn style_edges(
    edges: &[&MemoryEdge],
    adjacency: &AdjacencyIndex,
    membership: &[usize],
    colors: &[String],
    theme: &Theme,
    config: &EdgeStyleConfig,
) -> Vec<EdgeStyle> {
    edges
        .iter()
        .filter_map(|edge| {
            let source = adjacency.index_of(&edge.source)?;
            adjacency.index_of(&edge.target)?;
            let color = if theme.cluster_palette.is_empty() {
                theme.edge_color.clone()
            } else {
                colors
                    .get(membership[source])
                    .cloned()
                    .unwrap_or_else(|| theme.edge_color.clone())
            };
            let (stroke_width, opacity) = stroke_for_weight(edge.weight, config);
            Some(EdgeStyle {
                source: edge.source.clone(),
                target: edge.target.clone(),
                weight: edge.weight,
                stroke_width,
                opacity,
                color,
            })
        })
        .collect()
}
