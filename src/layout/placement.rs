use super::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedNode {
    pub point: Point,
    pub tier: PlacementTier,
}

/// Node indices ordered by descending degree; ties keep node order.
pub fn placement_order(adjacency: &AdjacencyIndex) -> Vec<usize> {
    let mut order: Vec<usize> = (0..adjacency.len()).collect();
    order.sort_by(|&a, &b| adjacency.degree(b).cmp(&adjacency.degree(a)));
    order
}

/// The node anchored at the canvas center, if the graph has one.
///
/// Requires more than one node and at least one edge.
pub fn select_hub(adjacency: &AdjacencyIndex, order: &[usize]) -> Option<usize> {
    if adjacency.len() < 2 {
        return None;
    }
    let first = *order.first()?;
    (adjacency.degree(first) > 0).then_some(first)
}

pub struct NodePlacer<'a> {
    adjacency: &'a AdjacencyIndex,
    membership: &'a [usize],
    centers: &'a [ClusterCenter],
    config: &'a LayoutConfig,
}

impl<'a> NodePlacer<'a> {
    pub fn new(
        adjacency: &'a AdjacencyIndex,
        membership: &'a [usize],
        centers: &'a [ClusterCenter],
        config: &'a LayoutConfig,
    ) -> Self {
        Self {
            adjacency,
            membership,
            centers,
            config,
        }
    }

    /// Places every node; the result is indexed by node index.
    pub fn place<R: Rng>(&self, rng: &mut R) -> Vec<PlacedNode> {
        let placement = &self.config.placement;
        let resolver = CollisionResolver::new(&self.config.canvas, placement);
        let mut placed = PlacedPositions::new(placement.min_distance);
        let mut slots: Vec<Option<PlacedNode>> = vec![None; self.adjacency.len()];

        let order = placement_order(self.adjacency);
        let hub = select_hub(self.adjacency, &order);

        for node in order {
            let result = if Some(node) == hub {
                let (x, y) = self.config.canvas.center();
                PlacedNode {
                    point: self.config.canvas.clamp(x, y),
                    tier: PlacementTier::Hub,
                }
            } else {
                self.place_near_neighbors(node, &slots, &resolver, &placed, rng)
                    .unwrap_or_else(|| self.place_in_cluster(node, &resolver, &placed, rng))
            };
            if result.tier == PlacementTier::Random {
                debug!(
                    "node '{}' placed by random fallback",
                    self.adjacency.id(node)
                );
            }
            placed.push(result.point);
            slots[node] = Some(result);
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or(PlacedNode {
                    point: self.config.canvas.center(),
                    tier: PlacementTier::Random,
                })
            })
            .collect()
    }

    fn neighbor_centroid(&self, node: usize, slots: &[Option<PlacedNode>]) -> Option<Point> {
        let mut sum = (0.0f32, 0.0f32);
        let mut count = 0usize;
        for neighbor in self.adjacency.neighbors(node) {
            if let Some(placed) = &slots[neighbor] {
                sum.0 += placed.point.0;
                sum.1 += placed.point.1;
                count += 1;
            }
        }
        (count > 0).then(|| (sum.0 / count as f32, sum.1 / count as f32))
    }

    fn place_near_neighbors<R: Rng>(
        &self,
        node: usize,
        slots: &[Option<PlacedNode>],
        resolver: &CollisionResolver<'_>,
        placed: &PlacedPositions,
        rng: &mut R,
    ) -> Option<PlacedNode> {
        if self.adjacency.degree(node) == 0 {
            return None;
        }
        let centroid = self.neighbor_centroid(node, slots)?;
        let placement = &self.config.placement;
        let strategy = CandidateStrategy::Annulus {
            center: centroid,
            inner: placement.neighbor_distance - placement.neighbor_jitter,
            outer: placement.neighbor_distance + placement.neighbor_jitter,
        };
        let point = resolver.sample(&strategy, placed, placement.node_attempts, rng)?;
        Some(PlacedNode {
            point,
            tier: PlacementTier::Sampled,
        })
    }

    fn place_in_cluster<R: Rng>(
        &self,
        node: usize,
        resolver: &CollisionResolver<'_>,
        placed: &PlacedPositions,
        rng: &mut R,
    ) -> PlacedNode {
        let cluster = &self.centers[self.membership[node]];
        let strategy = CandidateStrategy::Disc {
            center: cluster.center,
            radius: cluster.radius,
        };
        let (point, tier) =
            resolver.resolve(&strategy, placed, self.config.placement.node_attempts, rng);
        PlacedNode { point, tier }
    }
}
