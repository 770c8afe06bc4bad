use serde::{Deserialize, Serialize};

const DEFAULT_CLUSTER_PALETTE: [&str; 10] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
    "#6366F1", "#84CC16",
];

const MUTED_CLUSTER_PALETTE: [&str; 8] = [
    "#64748B", "#7C8FA6", "#8E9AAF", "#A3B18A", "#B5838D", "#6D6875", "#9A8C98", "#588157",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub cluster_palette: Vec<String>,
    pub node_color: String,
    pub hub_color: String,
    pub edge_color: String,
    pub background: String,
}

impl Theme {
    pub fn default_palette() -> Self {
        Self {
            cluster_palette: DEFAULT_CLUSTER_PALETTE
                .iter()
                .map(|value| value.to_string())
                .collect(),
            node_color: "#94A3B8".to_string(),
            hub_color: "#F8FAFC".to_string(),
            edge_color: "#CBD5E1".to_string(),
            background: "#0F172A".to_string(),
        }
    }

    pub fn muted() -> Self {
        Self {
            cluster_palette: MUTED_CLUSTER_PALETTE
                .iter()
                .map(|value| value.to_string())
                .collect(),
            node_color: "#A8A29E".to_string(),
            hub_color: "#1C1917".to_string(),
            edge_color: "#D6D3D1".to_string(),
            background: "#FAFAF9".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" | "vivid" => Some(Self::default_palette()),
            "muted" => Some(Self::muted()),
            _ => None,
        }
    }

    /// Palette entry for a cluster, cycling through the palette.
    pub fn cluster_color(&self, index: usize) -> &str {
        if self.cluster_palette.is_empty() {
            return &self.node_color;
        }
        &self.cluster_palette[index % self.cluster_palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_palette()
    }
}
