// Data-driven navigation configuration.
//
// All tunable parameters for graph construction and search live in
// `NavConfig`, loaded from JSON. Every struct uses `#[serde(default)]`, so a
// config file only needs to name the values it overrides.
//
// Grid settings come from interactive editing and are therefore clamped, not
// rejected: `GridSettings::clamped()` forces counts into [3, 10000] and field
// sizes into [1.0, 1000.0] before a build. Node spacing is derived from the
// clamped values as `size / (count - 1)` so the outermost nodes sit exactly
// on the field boundary.
//
// See also: `navigator.rs` which owns a `NavConfig` and applies the clamp
// before every rebuild, `pathfinding.rs` which reads `SearchSettings`.

use crate::error::ConfigError;
use crate::types::{Bounds, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_NODE_COUNT: u32 = 3;
pub const MAX_NODE_COUNT: u32 = 10_000;
pub const MIN_FIELD_SIZE: f32 = 1.0;
pub const MAX_FIELD_SIZE: f32 = 1000.0;

/// Default safety valve on node expansions per search.
pub const DEFAULT_MAX_EXPANSIONS: u32 = 10_000;

/// What A* does when it reaches a node that is already on the frontier by a
/// cheaper route than the one recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontierUpdate {
    /// Lower the node's G, recompute F and move it to its new priority
    /// bucket. Gives optimal paths for the Euclidean heuristic.
    #[default]
    DecreaseKey,
    /// Relink the node's parent only. G and its queue position keep the
    /// first-discovered values, so a later cheaper route never changes when
    /// the node is expanded or what its descendants inherit.
    ParentOnly,
}

/// Layout of the node field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Number of node columns along X.
    pub nodes_x_count: u32,
    /// Number of node rows along Z.
    pub nodes_z_count: u32,
    /// Field extent along X in world units.
    pub size_x: f32,
    /// Field extent along Z in world units.
    pub size_z: f32,
    /// Field center; every node shares its Y.
    pub center: Vec3,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            nodes_x_count: 3,
            nodes_z_count: 3,
            size_x: 2.0,
            size_z: 2.0,
            center: Vec3::ZERO,
        }
    }
}

impl GridSettings {
    /// Copy with counts and sizes forced into their valid ranges.
    pub fn clamped(&self) -> Self {
        Self {
            nodes_x_count: self.nodes_x_count.clamp(MIN_NODE_COUNT, MAX_NODE_COUNT),
            nodes_z_count: self.nodes_z_count.clamp(MIN_NODE_COUNT, MAX_NODE_COUNT),
            size_x: clamp_size(self.size_x),
            size_z: clamp_size(self.size_z),
            center: self.center,
        }
    }

    /// Distance between adjacent nodes along X once clamped.
    pub fn spacing_x(&self) -> f32 {
        let s = self.clamped();
        s.size_x / (s.nodes_x_count - 1) as f32
    }

    /// Distance between adjacent nodes along Z once clamped.
    pub fn spacing_z(&self) -> f32 {
        let s = self.clamped();
        s.size_z / (s.nodes_z_count - 1) as f32
    }

    /// Area covered by the clamped field.
    pub fn bounds(&self) -> Bounds {
        let s = self.clamped();
        Bounds::centered(s.center, s.size_x, s.size_z)
    }
}

fn clamp_size(size: f32) -> f32 {
    if size.is_nan() {
        MIN_FIELD_SIZE
    } else {
        size.clamp(MIN_FIELD_SIZE, MAX_FIELD_SIZE)
    }
}

/// Parameters for a single A* search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum number of node expansions before the search gives up. The
    /// only timeout available to a search.
    pub max_expansions: u32,
    /// Handling of cheaper routes to nodes already on the frontier.
    pub frontier_update: FrontierUpdate,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            frontier_update: FrontierUpdate::default(),
        }
    }
}

/// Complete navigation configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub grid: GridSettings,
    pub search: SearchSettings,
}

impl NavConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
