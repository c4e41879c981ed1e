// Waypoint follower for a single agent.
//
// A `Traveler` holds a queue of world positions and walks along them at
// `speed` units per second, one `advance(dt)` call per host frame. A step
// that reaches the front waypoint lands on it, consumes it, and spends the
// remaining distance walking toward the next one, so the traveler covers
// exactly `speed * dt` per frame until the path runs out.
//
// `retarget` asks a `Navigator` for a new path only when the destination
// actually changed, so it is cheap to call every frame with the same target.
//
// See also: `navigator.rs` for path planning.

use crate::error::NavResult;
use crate::navigator::Navigator;
use crate::types::Vec3;
use crate::visibility::VisibilityOracle;
use log::{debug, trace};
use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct Traveler {
    pub position: Vec3,
    /// World units per second.
    pub speed: f32,
    waypoints: VecDeque<Vec3>,
    destination: Option<Vec3>,
}

impl Traveler {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            speed,
            waypoints: VecDeque::new(),
            destination: None,
        }
    }

    /// Replace the remaining waypoints.
    pub fn set_path(&mut self, path: impl IntoIterator<Item = Vec3>) {
        self.waypoints.clear();
        self.waypoints.extend(path);
    }

    /// Plan a path to `destination` unless it is the one already planned
    /// for. Returns whether a new path was requested. On error the previous
    /// destination is forgotten, so the next call tries again.
    pub fn retarget<O>(&mut self, navigator: &mut Navigator<O>, destination: Vec3) -> NavResult<bool>
    where
        O: VisibilityOracle + Sync,
    {
        if self.destination == Some(destination) {
            return Ok(false);
        }
        self.destination = None;
        self.waypoints.clear();
        let path = navigator.find_path_between_points(self.position, destination)?;
        debug!("traveler at {} retargeted to {destination}: {} waypoints", self.position, path.len());
        self.set_path(path);
        self.destination = Some(destination);
        Ok(true)
    }

    /// Walk `speed * dt` along the remaining waypoints.
    pub fn advance(&mut self, dt: f32) {
        let mut budget = self.speed * dt;
        while let Some(&target) = self.waypoints.front() {
            let offset = target - self.position;
            let dist = offset.length();
            if budget < dist {
                self.position = self.position + offset * (budget / dist);
                return;
            }
            self.position = target;
            budget -= dist;
            self.waypoints.pop_front();
            trace!("waypoint {target} reached, {} left", self.waypoints.len());
            if self.waypoints.is_empty() {
                debug!("traveler arrived at {}", self.position);
            }
        }
    }

    pub fn is_arrived(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> impl Iterator<Item = &Vec3> {
        self.waypoints.iter()
    }

    /// Destination of the current plan, if any.
    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }
}
