// The line-of-sight boundary between the navigation core and scene geometry.
//
// The core never tests geometry itself. Graph construction and nearest-node
// lookup only ask "is the straight segment between these two points
// obstructed?", answered by a `VisibilityOracle`. Closures of the shape
// `Fn(Vec3, Vec3) -> bool` are oracles, as is `ObstacleSet` (see
// `obstacles.rs`) for scenes made of static boxes and spheres.
//
// Oracles are expected to be deterministic and symmetric. The graph builder
// relies on symmetry for its mirrored-edge guarantee and on determinism for
// idempotent rebuilds.

use crate::types::Vec3;

/// Answers whether the straight segment between two points is blocked.
pub trait VisibilityOracle {
    /// `true` if something lies between `from` and `to`.
    fn is_obstructed(&self, from: Vec3, to: Vec3) -> bool;

    fn is_visible(&self, from: Vec3, to: Vec3) -> bool {
        !self.is_obstructed(from, to)
    }
}

impl<F> VisibilityOracle for F
where
    F: Fn(Vec3, Vec3) -> bool,
{
    fn is_obstructed(&self, from: Vec3, to: Vec3) -> bool {
        self(from, to)
    }
}

/// An empty scene: nothing is ever obstructed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unobstructed;

impl VisibilityOracle for Unobstructed {
    fn is_obstructed(&self, _from: Vec3, _to: Vec3) -> bool {
        false
    }
}
