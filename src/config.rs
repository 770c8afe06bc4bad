use crate::error::LayoutError;
use crate::theme::Theme;
use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|(?:rgb|rgba|hsl|hsla)\([^()]*\))$")
        .unwrap()
});

pub fn is_valid_color(value: &str) -> bool {
    COLOR_RE.is_match(value.trim())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 50.0,
        }
    }
}

impl CanvasConfig {
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn min_x(&self) -> f32 {
        self.padding
    }

    pub fn max_x(&self) -> f32 {
        self.width - self.padding
    }

    pub fn min_y(&self) -> f32 {
        self.padding
    }

    pub fn max_y(&self) -> f32 {
        self.height - self.padding
    }

    /// Pulls a point into the padded area. An empty range (padding wider
    /// than half the canvas, or NaN) collapses to its midpoint.
    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (
            clamp_axis(x, self.min_x(), self.max_x()),
            clamp_axis(y, self.min_y(), self.max_y()),
        )
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x() && x <= self.max_x() && y >= self.min_y() && y <= self.max_y()
    }
}

fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo <= hi {
        value.max(lo).min(hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Tuning shared by cluster planning and node placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    pub min_distance: f32,
    pub node_attempts: usize,
    pub cluster_attempts: usize,
    pub min_cluster_separation: f32,
    pub cluster_radius_base: f32,
    pub isolated_cluster_radius: f32,
    pub neighbor_distance: f32,
    pub neighbor_jitter: f32,
    /// Radians between consecutive spiral candidates.
    pub spiral_angle_step: f32,
    pub spiral_radius_step: f32,
    pub spiral_max_radius: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_distance: 60.0,
            node_attempts: 50,
            cluster_attempts: 100,
            min_cluster_separation: 200.0,
            cluster_radius_base: 60.0,
            isolated_cluster_radius: 120.0,
            neighbor_distance: 110.0,
            neighbor_jitter: 25.0,
            spiral_angle_step: std::f32::consts::PI / 6.0,
            spiral_radius_step: 8.0,
            spiral_max_radius: 600.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeStyleConfig {
    pub min_stroke_width: f32,
    pub max_stroke_width: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
}

impl Default for EdgeStyleConfig {
    fn default() -> Self {
        Self {
            min_stroke_width: 1.0,
            max_stroke_width: 4.0,
            min_opacity: 0.25,
            max_opacity: 0.9,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub canvas: CanvasConfig,
    pub placement: PlacementConfig,
    pub edges: EdgeStyleConfig,
    /// Edges lighter than this are dropped before clustering.
    pub min_weight: f32,
    /// Fixed seed for reproducible layouts; `None` draws one from the OS.
    pub seed: Option<u64>,
}

fn check_non_negative(name: &'static str, value: f32) -> crate::error::Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LayoutError::InvalidParameter { name, value });
    }
    Ok(())
}

impl LayoutConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        let canvas = &self.canvas;
        if !(canvas.width.is_finite() && canvas.height.is_finite())
            || canvas.width <= 0.0
            || canvas.height <= 0.0
        {
            return Err(LayoutError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        check_non_negative("padding", canvas.padding)?;
        if canvas.padding * 2.0 >= canvas.width || canvas.padding * 2.0 >= canvas.height {
            return Err(LayoutError::PaddingTooLarge {
                padding: canvas.padding,
                width: canvas.width,
                height: canvas.height,
            });
        }

        let placement = &self.placement;
        check_non_negative("minDistance", placement.min_distance)?;
        check_non_negative("minClusterSeparation", placement.min_cluster_separation)?;
        check_non_negative("clusterRadiusBase", placement.cluster_radius_base)?;
        check_non_negative("isolatedClusterRadius", placement.isolated_cluster_radius)?;
        check_non_negative("neighborDistance", placement.neighbor_distance)?;
        check_non_negative("neighborJitter", placement.neighbor_jitter)?;
        check_non_negative("spiralMaxRadius", placement.spiral_max_radius)?;
        check_non_negative("spiralAngleStep", placement.spiral_angle_step)?;
        check_non_negative("spiralRadiusStep", placement.spiral_radius_step)?;
        if placement.spiral_angle_step == 0.0 {
            return Err(LayoutError::InvalidParameter {
                name: "spiralAngleStep",
                value: 0.0,
            });
        }
        if placement.spiral_radius_step == 0.0 {
            return Err(LayoutError::InvalidParameter {
                name: "spiralRadiusStep",
                value: 0.0,
            });
        }
        if placement.node_attempts == 0 {
            return Err(LayoutError::ZeroBudget {
                name: "nodeAttempts",
            });
        }
        if placement.cluster_attempts == 0 {
            return Err(LayoutError::ZeroBudget {
                name: "clusterAttempts",
            });
        }

        check_non_negative("minWeight", self.min_weight)?;

        let edges = &self.edges;
        check_non_negative("minStrokeWidth", edges.min_stroke_width)?;
        check_non_negative("maxStrokeWidth", edges.max_stroke_width)?;
        check_non_negative("minOpacity", edges.min_opacity)?;
        check_non_negative("maxOpacity", edges.max_opacity)?;
        if edges.min_stroke_width > edges.max_stroke_width {
            return Err(LayoutError::InvertedRange {
                min: edges.min_stroke_width,
                max: edges.max_stroke_width,
            });
        }
        if edges.min_opacity > edges.max_opacity {
            return Err(LayoutError::InvertedRange {
                min: edges.min_opacity,
                max: edges.max_opacity,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn validate(&self) -> crate::error::Result<()> {
        self.layout.validate()?;
        let theme = &self.theme;
        for color in theme
            .cluster_palette
            .iter()
            .chain([&theme.node_color, &theme.hub_color, &theme.edge_color])
        {
            if !is_valid_color(color) {
                return Err(LayoutError::InvalidColor {
                    value: color.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CanvasConfigFile {
    width: Option<NumberOrString>,
    height: Option<NumberOrString>,
    padding: Option<NumberOrString>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PlacementConfigFile {
    min_distance: Option<NumberOrString>,
    node_attempts: Option<usize>,
    cluster_attempts: Option<usize>,
    min_cluster_separation: Option<NumberOrString>,
    cluster_radius_base: Option<NumberOrString>,
    isolated_cluster_radius: Option<NumberOrString>,
    neighbor_distance: Option<NumberOrString>,
    neighbor_jitter: Option<NumberOrString>,
    spiral_angle_step: Option<NumberOrString>,
    spiral_radius_step: Option<NumberOrString>,
    spiral_max_radius: Option<NumberOrString>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct EdgeStyleConfigFile {
    min_stroke_width: Option<NumberOrString>,
    max_stroke_width: Option<NumberOrString>,
    min_opacity: Option<NumberOrString>,
    max_opacity: Option<NumberOrString>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    cluster_palette: Option<Vec<String>>,
    node_color: Option<String>,
    hub_color: Option<String>,
    edge_color: Option<String>,
    background: Option<String>,
    canvas: Option<CanvasConfigFile>,
    placement: Option<PlacementConfigFile>,
    edges: Option<EdgeStyleConfigFile>,
    min_weight: Option<NumberOrString>,
    seed: Option<u64>,
}

fn apply_f32(target: &mut f32, value: Option<NumberOrString>) {
    if let Some(v) = value.as_ref().and_then(NumberOrString::as_f32) {
        *target = v;
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .with_context(|| format!("config is neither JSON ({json_err}) nor JSON5"))?,
    };

    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::from_name(theme_name)
            .ok_or_else(|| LayoutError::UnknownTheme(theme_name.to_string()))?;
    }
    if let Some(v) = parsed.cluster_palette {
        config.theme.cluster_palette = v;
    }
    if let Some(v) = parsed.node_color {
        config.theme.node_color = v;
    }
    if let Some(v) = parsed.hub_color {
        config.theme.hub_color = v;
    }
    if let Some(v) = parsed.edge_color {
        config.theme.edge_color = v;
    }
    if let Some(v) = parsed.background {
        config.theme.background = v;
    }

    if let Some(canvas) = parsed.canvas {
        apply_f32(&mut config.layout.canvas.width, canvas.width);
        apply_f32(&mut config.layout.canvas.height, canvas.height);
        apply_f32(&mut config.layout.canvas.padding, canvas.padding);
    }

    if let Some(placement) = parsed.placement {
        let target = &mut config.layout.placement;
        apply_f32(&mut target.min_distance, placement.min_distance);
        if let Some(v) = placement.node_attempts {
            target.node_attempts = v;
        }
        if let Some(v) = placement.cluster_attempts {
            target.cluster_attempts = v;
        }
        apply_f32(
            &mut target.min_cluster_separation,
            placement.min_cluster_separation,
        );
        apply_f32(&mut target.cluster_radius_base, placement.cluster_radius_base);
        apply_f32(
            &mut target.isolated_cluster_radius,
            placement.isolated_cluster_radius,
        );
        apply_f32(&mut target.neighbor_distance, placement.neighbor_distance);
        apply_f32(&mut target.neighbor_jitter, placement.neighbor_jitter);
        apply_f32(&mut target.spiral_angle_step, placement.spiral_angle_step);
        apply_f32(&mut target.spiral_radius_step, placement.spiral_radius_step);
        apply_f32(&mut target.spiral_max_radius, placement.spiral_max_radius);
    }

    if let Some(edges) = parsed.edges {
        let target = &mut config.layout.edges;
        apply_f32(&mut target.min_stroke_width, edges.min_stroke_width);
        apply_f32(&mut target.max_stroke_width, edges.max_stroke_width);
        apply_f32(&mut target.min_opacity, edges.min_opacity);
        apply_f32(&mut target.max_opacity, edges.max_opacity);
    }

    apply_f32(&mut config.layout.min_weight, parsed.min_weight);
    if parsed.seed.is_some() {
        config.layout.seed = parsed.seed;
    }

    config.validate()?;
    Ok(config)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config file {}", path.display()))
}
