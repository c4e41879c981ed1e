// Static obstacle geometry and a segment-occlusion oracle over it.
//
// `ObstacleSet` holds axis-aligned boxes and spheres and implements
// `VisibilityOracle`: a segment is obstructed when it passes through the
// interior of any obstacle. Grazing contact (the segment touching a face or
// the sphere surface at a single point, or running exactly along a face)
// does not count, so nodes placed on an obstacle's surface do not
// self-occlude.
//
// Both tests work on the parametric segment `from + t * (to - from)`,
// `t in [0, 1]`, and only look at the overlap of that interval with the
// obstacle, which makes the answer independent of segment direction.
//
// See also: `visibility.rs` for the oracle trait, `builder.rs` and
// `graph.rs` for the two places the oracle is consulted.

use crate::types::Vec3;
use crate::visibility::VisibilityOracle;
use serde::{Deserialize, Serialize};

/// Minimum overlap (in segment-parameter units) that counts as a hit.
const MIN_OVERLAP: f32 = 1e-5;

/// Axis-aligned box given by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box from any two opposite corners.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box centered on `center` with the given half-extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Slab test. Returns the overlap `[t_enter, t_exit]` of the segment with
    /// the box, clipped to `[0, 1]`, if any.
    fn segment_overlap(&self, from: Vec3, to: Vec3) -> Option<(f32, f32)> {
        let origin = [from.x, from.y, from.z];
        let dir = [to.x - from.x, to.y - from.y, to.z - from.z];
        let lo = [self.min.x, self.min.y, self.min.z];
        let hi = [self.max.x, self.max.y, self.max.z];

        let mut t_enter = 0.0f32;
        let mut t_exit = 1.0f32;
        for axis in 0..3 {
            if dir[axis].abs() < f32::EPSILON {
                // Parallel to this slab: must be strictly between its planes.
                if origin[axis] <= lo[axis] || origin[axis] >= hi[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[axis];
            let t1 = (lo[axis] - origin[axis]) * inv;
            let t2 = (hi[axis] - origin[axis]) * inv;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
            if t_enter > t_exit {
                return None;
            }
        }
        Some((t_enter, t_exit))
    }
}

/// Solid sphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    fn segment_overlap(&self, from: Vec3, to: Vec3) -> Option<(f32, f32)> {
        let d = to - from;
        let m = from - self.center;
        let a = d.dot(d);
        let c = m.dot(m) - self.radius * self.radius;
        if a < f32::EPSILON {
            // Degenerate segment: a point, blocked only if strictly inside.
            return (c < 0.0).then_some((0.0, 1.0));
        }
        let b = 2.0 * d.dot(m);
        let disc = b * b - 4.0 * a * c;
        if disc <= 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let t1 = ((-b - root) / (2.0 * a)).max(0.0);
        let t2 = ((-b + root) / (2.0 * a)).min(1.0);
        (t1 <= t2).then_some((t1, t2))
    }
}

/// A single static obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Obstacle {
    Box(Aabb),
    Sphere(Sphere),
}

impl Obstacle {
    /// Whether the segment passes through this obstacle's interior.
    pub fn blocks(&self, from: Vec3, to: Vec3) -> bool {
        let overlap = match self {
            Obstacle::Box(aabb) => aabb.segment_overlap(from, to),
            Obstacle::Sphere(sphere) => sphere.segment_overlap(from, to),
        };
        overlap.is_some_and(|(enter, exit)| exit - enter > MIN_OVERLAP)
    }
}

/// A scene's static obstacles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSet {
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, aabb: Aabb) -> Self {
        self.obstacles.push(Obstacle::Box(aabb));
        self
    }

    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.obstacles.push(Obstacle::Sphere(sphere));
        self
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl VisibilityOracle for ObstacleSet {
    fn is_obstructed(&self, from: Vec3, to: Vec3) -> bool {
        self.obstacles.iter().any(|o| o.blocks(from, to))
    }
}
