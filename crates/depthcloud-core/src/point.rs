//! World-space point type.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A point in world space, in meters.
///
/// Laid out as three consecutive `f32`s so a slice of points can be handed to
/// a renderer as a flat position array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    /// Creates a new point.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for WorldPoint {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<WorldPoint> for Vec3 {
    fn from(p: WorldPoint) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}
