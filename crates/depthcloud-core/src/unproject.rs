//! Depth-to-world unprojection.
//!
//! A depth frame is walked on a subsampled pixel grid. Each sample inside the
//! depth band is lifted to a clip-space vector whose Z is the negated metric
//! depth, mapped through the inverse projection into view space, and through
//! the pose transform into world space.

use glam::{Mat4, Vec2, Vec4};

use crate::camera::CameraPose;
use crate::depth::DepthFrame;
use crate::options::{DepthMode, Options};
use crate::point::WorldPoint;

/// Per-frame unprojection state: the inverted projection and the pose.
///
/// Built once per frame so the inverse is shared by every sample.
#[derive(Debug, Clone, Copy)]
pub struct FrameProjector {
    inverse_projection: Mat4,
    transform: Mat4,
    mode: DepthMode,
}

impl FrameProjector {
    /// Returns `None` if the pose's projection matrix cannot be inverted.
    pub fn new(pose: &CameraPose, mode: DepthMode) -> Option<Self> {
        Some(Self {
            inverse_projection: pose.inverse_projection()?,
            transform: pose.transform,
            mode,
        })
    }

    /// Maps a normalized device coordinate at a known metric depth to world space.
    pub fn unproject(&self, ndc: Vec2, depth: f32) -> WorldPoint {
        let clip = Vec4::new(ndc.x, ndc.y, -depth, 1.0);
        let view = self.inverse_projection * clip;
        let world = match self.mode {
            DepthMode::PinAfterInverse => {
                self.transform * Vec4::new(view.x, view.y, -depth, 1.0)
            }
            DepthMode::Unpinned => self.transform * view,
        };
        world.truncate().into()
    }
}

/// Converts pixel coordinates to normalized device coordinates.
///
/// Image rows run top-down while NDC Y runs bottom-up.
pub fn pixel_to_ndc(x: usize, y: usize, width: usize, height: usize) -> Vec2 {
    Vec2::new(
        (x as f32 / width as f32) * 2.0 - 1.0,
        1.0 - (y as f32 / height as f32) * 2.0,
    )
}

/// Turns depth frames into world-space points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unprojector {
    step: usize,
    min_depth: f32,
    max_depth: f32,
    mode: DepthMode,
}

impl Unprojector {
    /// Creates an unprojector. A `step` of 0 is treated as 1.
    pub fn new(step: usize, min_depth: f32, max_depth: f32, mode: DepthMode) -> Self {
        Self {
            step: step.max(1),
            min_depth,
            max_depth,
            mode,
        }
    }

    /// Creates an unprojector from capture options.
    pub fn from_options(options: &Options) -> Self {
        Self::new(
            options.step,
            options.min_depth,
            options.max_depth,
            options.depth_mode,
        )
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn depth_band(&self) -> (f32, f32) {
        (self.min_depth, self.max_depth)
    }

    pub fn mode(&self) -> DepthMode {
        self.mode
    }

    /// Whether a depth sample lies strictly inside the band.
    pub fn accepts(&self, depth: f32) -> bool {
        depth > self.min_depth && depth < self.max_depth
    }

    /// Number of grid samples visited for a frame of the given size.
    pub fn candidate_count(&self, width: usize, height: usize) -> usize {
        width.div_ceil(self.step) * height.div_ceil(self.step)
    }

    /// Lazily projects one frame's depth samples into world space.
    ///
    /// Yields nothing if the projection matrix is singular.
    pub fn project<'a>(&self, frame: &'a DepthFrame, pose: &CameraPose) -> ProjectedPoints<'a> {
        let projector = FrameProjector::new(pose, self.mode);
        if projector.is_none() {
            log::warn!("projection matrix is singular, skipping depth frame");
        }
        ProjectedPoints {
            frame,
            projector,
            unprojector: *self,
            x: 0,
            y: 0,
        }
    }
}

/// Iterator over the world points of one depth frame.
pub struct ProjectedPoints<'a> {
    frame: &'a DepthFrame,
    projector: Option<FrameProjector>,
    unprojector: Unprojector,
    x: usize,
    y: usize,
}

impl Iterator for ProjectedPoints<'_> {
    type Item = WorldPoint;

    fn next(&mut self) -> Option<WorldPoint> {
        let projector = self.projector.as_ref()?;
        let (width, height) = (self.frame.width(), self.frame.height());
        let step = self.unprojector.step;

        while self.y < height {
            if self.x >= width {
                self.x = 0;
                self.y += step;
                continue;
            }
            let (x, y) = (self.x, self.y);
            self.x += step;

            let Some(depth) = self.frame.depth_at(x, y) else {
                continue;
            };
            if !self.unprojector.accepts(depth) {
                continue;
            }
            let ndc = pixel_to_ndc(x, y, width, height);
            return Some(projector.unproject(ndc, depth));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.projector.is_none() {
            return (0, Some(0));
        }
        let step = self.unprojector.step;
        let (width, height) = (self.frame.width(), self.frame.height());
        let columns = width.div_ceil(step);
        let rows_left = height.saturating_sub(self.y).div_ceil(step);
        let in_row = width.saturating_sub(self.x).div_ceil(step);
        let upper = if rows_left == 0 {
            0
        } else {
            in_row + (rows_left - 1) * columns
        };
        (0, Some(upper))
    }
}
