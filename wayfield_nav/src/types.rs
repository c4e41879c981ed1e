// Core types shared across the navigation library.
//
// Defines world-space positions (`Vec3`), compact graph identifiers
// (`NodeId`), the opaque host frame handle (`FrameId`), and the small
// geometric records (`GridDims`, `Bounds`) describing a node field. All types
// derive `Serialize` and `Deserialize` so configs and scenes can be loaded
// from JSON.
//
// The coordinate system follows the host scene: X and Z span the ground
// plane the grid is laid out on, Y is up. Grid nodes all share the field
// center's Y.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A position (or displacement) in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared Euclidean distance. Cheaper than `distance` when only the
    /// ordering matters.
    pub fn distance_squared(self, other: Self) -> f32 {
        let d = self - other;
        d.dot(d)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Logical shape of a grid-built graph: `x_count` columns along X by
/// `z_count` rows along Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub x_count: u32,
    pub z_count: u32,
}

impl GridDims {
    pub const fn new(x_count: u32, z_count: u32) -> Self {
        Self { x_count, z_count }
    }

    pub fn node_count(self) -> usize {
        self.x_count as usize * self.z_count as usize
    }

    /// Node id of grid cell `(i, j)`: `i * z_count + j`.
    pub fn id_of(self, i: u32, j: u32) -> NodeId {
        NodeId(i * self.z_count + j)
    }

    /// Inverse of `id_of`.
    pub fn cell_of(self, id: NodeId) -> (u32, u32) {
        (id.0 / self.z_count, id.0 % self.z_count)
    }
}

/// Axis-aligned rectangle on the ground plane covered by a node field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f32,
    pub z_min: f32,
    pub width: f32,
    pub depth: f32,
}

impl Bounds {
    /// Rectangle of `size_x` by `size_z` centered on `center`.
    pub fn centered(center: Vec3, size_x: f32, size_z: f32) -> Self {
        Self {
            x_min: center.x - size_x * 0.5,
            z_min: center.z - size_z * 0.5,
            width: size_x,
            depth: size_z,
        }
    }

    pub fn x_max(&self) -> f32 {
        self.x_min + self.width
    }

    pub fn z_max(&self) -> f32 {
        self.z_min + self.depth
    }

    /// Whether the point's ground-plane projection lies inside (inclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max()
            && point.z >= self.z_min
            && point.z <= self.z_max()
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Compact identifier for a graph node. Stable for the lifetime of the graph
/// that issued it; a rebuilt graph reissues ids from zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Opaque handle to the host's parent coordinate frame. Node positions are
/// always world-space; the frame only tells the host where to attach
/// whatever scene objects it creates for the nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub u64);
