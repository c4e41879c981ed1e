// Scene files: a navigation config plus the static obstacles it is laid
// over, stored together as one JSON document.
//
// Both halves default when missing, so `{}` is a valid (empty, 3x3) scene.
// Example:
//   {
//     "config": { "grid": { "nodes_x_count": 20, "nodes_z_count": 20,
//                           "size_x": 19.0, "size_z": 19.0 } },
//     "obstacles": { "obstacles": [
//       { "shape": "box", "min": {"x": -1, "y": -1, "z": -6},
//                         "max": {"x": 1, "y": 1, "z": 6} } ] }
//   }

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wayfield_nav::{NavConfig, ObstacleSet, Vec3};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub config: NavConfig,
    pub obstacles: ObstacleSet,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scene {}", path.display()))
    }
}

/// Parse `x,y,z` into a point.
pub fn parse_point(s: &str) -> Result<Vec3> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        bail!("expected x,y,z but got {s:?}");
    };
    let coord = |v: &str| -> Result<f32> {
        let value: f32 = v.parse().with_context(|| format!("bad coordinate {v:?}"))?;
        if !value.is_finite() {
            bail!("coordinate {v:?} is not finite");
        }
        Ok(value)
    };
    Ok(Vec3::new(coord(*x)?, coord(*y)?, coord(*z)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfield_nav::Obstacle;

    #[test]
    fn parse_point_accepts_spaces() {
        assert_eq!(parse_point("1, -2.5,3").unwrap(), Vec3::new(1.0, -2.5, 3.0));
    }

    #[test]
    fn parse_point_rejects_bad_input() {
        assert!(parse_point("1,2").is_err());
        assert!(parse_point("1,2,3,4").is_err());
        assert!(parse_point("a,2,3").is_err());
        assert!(parse_point("inf,2,3").is_err());
    }

    #[test]
    fn load_scene_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(
            &path,
            r#"{
                "config": { "grid": { "nodes_x_count": 7 } },
                "obstacles": { "obstacles": [
                    { "shape": "sphere", "center": {"x": 0.0, "y": 0.0, "z": 0.0}, "radius": 0.5 }
                ] }
            }"#,
        )
        .unwrap();
        let scene = Scene::load(&path).unwrap();
        assert_eq!(scene.config.grid.nodes_x_count, 7);
        assert!(matches!(scene.obstacles.obstacles[0], Obstacle::Sphere(_)));
    }

    #[test]
    fn empty_scene_is_default() {
        let scene: Scene = serde_json::from_str("{}").unwrap();
        assert_eq!(scene, Scene::default());
    }

    #[test]
    fn missing_scene_reports_path() {
        let err = Scene::load(Path::new("/nonexistent/scene.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/scene.json"));
    }
}
