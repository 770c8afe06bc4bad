use crate::ir::SanitizeReport;

pub type Point = (f32, f32);

/// Which stage of the fallback chain produced a node's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementTier {
    /// Anchored at the canvas center without collision checks.
    Hub,
    /// Accepted by rejection sampling.
    Sampled,
    /// Found by the outward spiral search.
    Spiral,
    /// Unconstrained random point; may violate the minimum distance.
    Random,
}

impl PlacementTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementTier::Hub => "hub",
            PlacementTier::Sampled => "sampled",
            PlacementTier::Spiral => "spiral",
            PlacementTier::Random => "random",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NodePosition {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub component: usize,
    pub color: String,
    pub hub: bool,
    pub tier: PlacementTier,
}

impl NodePosition {
    pub fn point(&self) -> Point {
        (self.x, self.y)
    }
}

#[derive(Debug, Clone)]
pub struct EdgeStyle {
    pub source: String,
    pub target: String,
    pub weight: f32,
    pub stroke_width: f32,
    pub opacity: f32,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct ClusterSummary {
    pub index: usize,
    pub color: String,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub hub: usize,
    pub sampled: usize,
    pub spiral: usize,
    pub random: usize,
    pub sanitize: SanitizeReport,
}

impl LayoutStats {
    pub fn record(&mut self, tier: PlacementTier) {
        match tier {
            PlacementTier::Hub => self.hub += 1,
            PlacementTier::Sampled => self.sampled += 1,
            PlacementTier::Spiral => self.spiral += 1,
            PlacementTier::Random => self.random += 1,
        }
    }

    pub fn placed(&self) -> usize {
        self.hub + self.sampled + self.spiral + self.random
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    /// One entry per input node, in input order.
    pub positions: Vec<NodePosition>,
    pub edge_styles: Vec<EdgeStyle>,
    pub clusters: Vec<ClusterSummary>,
    pub hub: Option<String>,
    pub stats: LayoutStats,
}

impl Layout {
    pub fn empty(width: f32, height: f32, padding: f32) -> Self {
        Self {
            width,
            height,
            padding,
            positions: Vec::new(),
            edge_styles: Vec::new(),
            clusters: Vec::new(),
            hub: None,
            stats: LayoutStats::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<&NodePosition> {
        self.positions.iter().find(|node| node.id == id)
    }
}
