use super::*;

/// Anything a candidate point has to keep its distance from.
pub trait Clearance {
    fn is_clear(&self, point: Point) -> bool;
}

/// Positions accepted so far, bucketed on a uniform grid whose cell size is
/// the minimum distance. A clearance test only has to visit the 3x3 block of
/// cells around the candidate.
#[derive(Debug, Clone)]
pub struct PlacedPositions {
    min_distance: f32,
    cell: f32,
    grid: HashMap<(i64, i64), Vec<Point>>,
}

impl PlacedPositions {
    pub fn new(min_distance: f32) -> Self {
        let min_distance = if min_distance.is_finite() {
            min_distance.max(0.0)
        } else {
            0.0
        };
        Self {
            min_distance,
            cell: if min_distance > 0.0 { min_distance } else { 1.0 },
            grid: HashMap::new(),
        }
    }

    fn cell_of(&self, (x, y): Point) -> (i64, i64) {
        ((x / self.cell).floor() as i64, (y / self.cell).floor() as i64)
    }

    pub fn push(&mut self, point: Point) {
        let key = self.cell_of(point);
        self.grid.entry(key).or_default().push(point);
    }
}

impl Clearance for PlacedPositions {
    /// True when `point` is at least the minimum distance from every placed point.
    fn is_clear(&self, point: Point) -> bool {
        if self.min_distance <= 0.0 {
            return true;
        }
        let limit = self.min_distance * self.min_distance;
        let (cx, cy) = self.cell_of(point);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                if bucket
                    .iter()
                    .any(|&other| distance_squared(point, other) < limit)
                {
                    return false;
                }
            }
        }
        true
    }
}

pub fn distance_squared(a: Point, b: Point) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

pub fn distance(a: Point, b: Point) -> f32 {
    distance_squared(a, b).sqrt()
}

/// Uniform sample from `[lo, hi]`, collapsing to the midpoint for an empty
/// or non-finite range.
pub(super) fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo && (hi - lo).is_finite() {
        rng.gen_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

fn offset(center: Point, angle: f32, distance: f32) -> Point {
    (center.0 + distance * angle.cos(), center.1 + distance * angle.sin())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateStrategy {
    /// Uniform over an axis-aligned rectangle.
    Rect { min: Point, max: Point },
    /// Uniform over a disc.
    Disc { center: Point, radius: f32 },
    /// Random angle, distance uniform in `[inner, outer]`.
    Annulus { center: Point, inner: f32, outer: f32 },
}

impl CandidateStrategy {
    pub fn reference(&self) -> Point {
        match *self {
            CandidateStrategy::Rect { min, max } => ((min.0 + max.0) / 2.0, (min.1 + max.1) / 2.0),
            CandidateStrategy::Disc { center, .. } => center,
            CandidateStrategy::Annulus { center, .. } => center,
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> Point {
        match *self {
            CandidateStrategy::Rect { min, max } => {
                (uniform(rng, min.0, max.0), uniform(rng, min.1, max.1))
            }
            CandidateStrategy::Disc { center, radius } => {
                let angle = rng.gen_range(0.0..TAU);
                let distance = radius.max(0.0) * uniform(rng, 0.0, 1.0).sqrt();
                offset(center, angle, distance)
            }
            CandidateStrategy::Annulus {
                center,
                inner,
                outer,
            } => {
                let angle = rng.gen_range(0.0..TAU);
                let distance = uniform(rng, inner.max(0.0), outer.max(0.0));
                offset(center, angle, distance)
            }
        }
    }
}

/// Fallback chain used by both cluster planning and node placement:
/// rejection sampling, then an outward spiral, then an unconstrained point.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver<'a> {
    canvas: &'a CanvasConfig,
    placement: &'a PlacementConfig,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(canvas: &'a CanvasConfig, placement: &'a PlacementConfig) -> Self {
        Self { canvas, placement }
    }

    /// Rejection sampling only. Candidates are clamped into the canvas first.
    pub fn sample<C, R>(
        &self,
        strategy: &CandidateStrategy,
        clearance: &C,
        attempts: usize,
        rng: &mut R,
    ) -> Option<Point>
    where
        C: Clearance + ?Sized,
        R: Rng,
    {
        for _ in 0..attempts {
            let (x, y) = strategy.sample(rng);
            let candidate = self.canvas.clamp(x, y);
            if clearance.is_clear(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    pub fn spiral<C>(&self, origin: Point, clearance: &C) -> Option<Point>
    where
        C: Clearance + ?Sized,
    {
        let angle_step = self.placement.spiral_angle_step;
        let radius_step = self.placement.spiral_radius_step;
        let max_radius = self.placement.spiral_max_radius;
        if !(angle_step > 0.0 && radius_step > 0.0 && max_radius.is_finite()) {
            return None;
        }
        let mut step = 0u32;
        loop {
            let radius = step as f32 * radius_step;
            if radius > max_radius {
                return None;
            }
            let angle = step as f32 * angle_step;
            let candidate = self
                .canvas
                .clamp(origin.0 + radius * angle.cos(), origin.1 + radius * angle.sin());
            if clearance.is_clear(candidate) {
                return Some(candidate);
            }
            step = step.checked_add(1)?;
        }
    }

    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Point {
        (
            uniform(rng, self.canvas.min_x(), self.canvas.max_x()),
            uniform(rng, self.canvas.min_y(), self.canvas.max_y()),
        )
    }

    /// Runs the whole chain; always yields a point.
    pub fn resolve<C, R>(
        &self,
        strategy: &CandidateStrategy,
        clearance: &C,
        attempts: usize,
        rng: &mut R,
    ) -> (Point, PlacementTier)
    where
        C: Clearance + ?Sized,
        R: Rng,
    {
        if let Some(point) = self.sample(strategy, clearance, attempts, rng) {
            return (point, PlacementTier::Sampled);
        }
        if let Some(point) = self.spiral(strategy.reference(), clearance) {
            return (point, PlacementTier::Spiral);
        }
        (self.random_point(rng), PlacementTier::Random)
    }
}
