use super::*;

/// Planning-only anchor for one component; dropped once nodes are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterCenter {
    pub component: usize,
    pub center: Point,
    /// Radius of the disc the component's nodes are scattered in.
    pub radius: f32,
}

pub fn assign_cluster_colors(components: &[Component], theme: &Theme) -> Vec<String> {
    components
        .iter()
        .map(|component| theme.cluster_color(component.index).to_string())
        .collect()
}

pub fn cluster_radius(component: &Component, placement: &PlacementConfig) -> f32 {
    if component.is_singleton() {
        placement.isolated_cluster_radius
    } else {
        placement.cluster_radius_base * (component.members.len() as f32).sqrt()
    }
}

/// Center of grid cell `index` when the padded canvas is split into
/// `ceil(sqrt(total))` columns.
pub fn grid_cell_center(canvas: &CanvasConfig, index: usize, total: usize) -> Point {
    let total = total.max(1);
    let columns = (total as f32).sqrt().ceil().max(1.0) as usize;
    let rows = total.div_ceil(columns);
    let cell_width = (canvas.max_x() - canvas.min_x()) / columns as f32;
    let cell_height = (canvas.max_y() - canvas.min_y()) / rows as f32;
    let column = index % columns;
    let row = (index / columns).min(rows - 1);
    (
        canvas.min_x() + (column as f32 + 0.5) * cell_width,
        canvas.min_y() + (row as f32 + 0.5) * cell_height,
    )
}

/// Centers accepted so far during planning.
///
/// Two multi-node clusters must be at least the larger of the configured
/// separation and the sum of their radii apart; any pair involving a
/// singleton only needs the configured separation.
#[derive(Debug, Clone, Default)]
pub struct ClusterSpacing {
    separation: f32,
    accepted: Vec<(Point, f32, bool)>,
}

impl ClusterSpacing {
    pub fn new(separation: f32) -> Self {
        Self {
            separation,
            accepted: Vec::new(),
        }
    }

    pub fn push(&mut self, center: Point, radius: f32, multi: bool) {
        self.accepted.push((center, radius, multi));
    }

    /// Clearance rule for the next cluster to be placed.
    pub fn for_cluster(&self, radius: f32, multi: bool) -> ClusterClearance<'_> {
        ClusterClearance {
            spacing: self,
            radius,
            multi,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClusterClearance<'a> {
    spacing: &'a ClusterSpacing,
    radius: f32,
    multi: bool,
}

impl Clearance for ClusterClearance<'_> {
    fn is_clear(&self, point: Point) -> bool {
        let separation = self.spacing.separation;
        self.spacing
            .accepted
            .iter()
            .all(|&(other, other_radius, other_multi)| {
                let required = if self.multi && other_multi {
                    separation.max(self.radius + other_radius)
                } else {
                    separation
                };
                distance(point, other) > required
            })
    }
}

/// Picks a center for every component, largest components first.
///
/// Candidates come from the shared resolver's rejection sampling over the
/// canvas (inset by the radius for multi-node clusters); a component that
/// finds no room takes its grid cell. The returned vector is indexed by
/// component index.
pub fn plan_cluster_centers<R: Rng>(
    components: &[Component],
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<ClusterCenter> {
    let canvas = &config.canvas;
    let placement = &config.placement;

    let mut centers: Vec<ClusterCenter> = components
        .iter()
        .map(|component| ClusterCenter {
            component: component.index,
            center: canvas.center(),
            radius: cluster_radius(component, placement),
        })
        .collect();
    if components.len() <= 1 {
        return centers;
    }

    let mut order: Vec<&Component> = components.iter().collect();
    order.sort_by(|a, b| b.members.len().cmp(&a.members.len()));

    let resolver = CollisionResolver::new(canvas, placement);
    let mut spacing = ClusterSpacing::new(placement.min_cluster_separation);
    let mut grid_fallbacks = 0usize;
    for component in order {
        let multi = !component.is_singleton();
        let radius = centers[component.index].radius;
        let inset = if multi { radius } else { 0.0 };
        let strategy = CandidateStrategy::Rect {
            min: (canvas.min_x() + inset, canvas.min_y() + inset),
            max: (canvas.max_x() - inset, canvas.max_y() - inset),
        };

        let sampled = resolver.sample(
            &strategy,
            &spacing.for_cluster(radius, multi),
            placement.cluster_attempts,
            rng,
        );
        let center = sampled.unwrap_or_else(|| {
            grid_fallbacks += 1;
            grid_cell_center(canvas, component.index, components.len())
        });

        centers[component.index].center = center;
        spacing.push(center, radius, multi);
    }

    if grid_fallbacks > 0 {
        debug!(
            "{} of {} cluster centers fell back to the grid",
            grid_fallbacks,
            components.len()
        );
    }
    centers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn singletons(count: usize) -> Vec<Component> {
        (0..count)
            .map(|index| Component {
                index,
                members: vec![index],
            })
            .collect()
    }

    #[test]
    fn colors_cycle_through_palette() {
        let theme = Theme::default();
        let components = singletons(theme.cluster_palette.len() + 2);
        let colors = assign_cluster_colors(&components, &theme);
        assert_eq!(colors[0], theme.cluster_palette[0]);
        assert_eq!(colors[theme.cluster_palette.len()], theme.cluster_palette[0]);
        assert_eq!(colors[theme.cluster_palette.len() + 1], theme.cluster_palette[1]);
    }

    #[test]
    fn empty_palette_uses_node_color() {
        let theme = Theme {
            cluster_palette: Vec::new(),
            ..Theme::default()
        };
        let colors = assign_cluster_colors(&singletons(2), &theme);
        assert_eq!(colors, vec![theme.node_color.clone(), theme.node_color.clone()]);
    }

    #[test]
    fn single_component_sits_at_canvas_center() {
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let centers = plan_cluster_centers(&singletons(1), &config, &mut rng);
        assert_eq!(centers[0].center, config.canvas.center());
    }

    #[test]
    fn sampled_centers_keep_their_distance() {
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let centers = plan_cluster_centers(&singletons(4), &config, &mut rng);
        for (i, a) in centers.iter().enumerate() {
            assert!(config.canvas.contains(a.center.0, a.center.1));
            for b in &centers[i + 1..] {
                assert!(distance(a.center, b.center) > config.placement.min_cluster_separation);
            }
        }
    }

    #[test]
    fn crowded_canvas_uses_grid_cells() {
        let mut config = LayoutConfig::default();
        config.placement.min_cluster_separation = 5_000.0;
        let mut rng = StdRng::seed_from_u64(2);
        let components = singletons(9);
        let centers = plan_cluster_centers(&components, &config, &mut rng);
        // first pick is always accepted; the rest land on their grid cells
        for center in &centers[1..] {
            assert_eq!(
                center.center,
                grid_cell_center(&config.canvas, center.component, components.len())
            );
        }
    }

    #[test]
    fn grid_cells_are_distinct_and_inside_canvas() {
        let canvas = CanvasConfig::default();
        let cells: Vec<Point> = (0..10).map(|i| grid_cell_center(&canvas, i, 10)).collect();
        for (i, a) in cells.iter().enumerate() {
            assert!(canvas.contains(a.0, a.1));
            for b in &cells[i + 1..] {
                assert!(distance(*a, *b) > 1.0);
            }
        }
    }

    #[test]
    fn spacing_adds_radii_only_between_multi_node_clusters() {
        let mut spacing = ClusterSpacing::new(100.0);
        spacing.push((0.0, 0.0), 150.0, true);

        let big = spacing.for_cluster(120.0, true);
        assert!(!big.is_clear((200.0, 0.0)));
        assert!(big.is_clear((271.0, 0.0)));

        let single = spacing.for_cluster(120.0, false);
        assert!(single.is_clear((101.0, 0.0)));
        assert!(!single.is_clear((100.0, 0.0)));
    }

    #[test]
    fn multi_node_centers_keep_their_discs_apart() {
        let config = LayoutConfig::default();
        let components: Vec<Component> = (0..3)
            .map(|index| Component {
                index,
                members: (index * 4..index * 4 + 4).collect(),
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(12);
        let centers = plan_cluster_centers(&components, &config, &mut rng);
        let grid: Vec<Point> = (0..3)
            .map(|i| grid_cell_center(&config.canvas, i, 3))
            .collect();
        for (i, a) in centers.iter().enumerate() {
            for b in &centers[i + 1..] {
                if grid.contains(&a.center) || grid.contains(&b.center) {
                    continue;
                }
                let required = config.placement.min_cluster_separation.max(a.radius + b.radius);
                assert!(distance(a.center, b.center) > required);
            }
        }
    }

    #[test]
    fn multi_node_radius_grows_with_sqrt_size() {
        let placement = PlacementConfig::default();
        let component = Component {
            index: 0,
            members: (0..9).collect(),
        };
        assert_eq!(
            cluster_radius(&component, &placement),
            placement.cluster_radius_base * 3.0
        );
    }
}
