//! Point sources: strategies producing one frame's batch of points.
//!
//! A session picks exactly one source when it starts, based on whether depth
//! sensing was granted.

use depthcloud_core::{
    validate_depth_band, CameraPose, DepthMode, FrameProjector, Result, Unprojector, Vec2,
    WorldPoint,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::frame::DepthQuery;

/// Produces the world points for one frame.
pub trait PointSource {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Writes this frame's points into `out`, which arrives empty.
    fn fill(&mut self, pose: &CameraPose, depth: &DepthQuery, out: &mut Vec<WorldPoint>);
}

/// Unprojects the frame's depth map.
#[derive(Debug)]
pub struct DepthPointSource {
    unprojector: Unprojector,
    frames_without_depth: u64,
    warned_unavailable: bool,
}

impl DepthPointSource {
    pub fn new(unprojector: Unprojector) -> Self {
        Self {
            unprojector,
            frames_without_depth: 0,
            warned_unavailable: false,
        }
    }

    /// Frames so far for which the runtime delivered no depth.
    pub fn frames_without_depth(&self) -> u64 {
        self.frames_without_depth
    }
}

impl PointSource for DepthPointSource {
    fn name(&self) -> &'static str {
        "depth"
    }

    fn fill(&mut self, pose: &CameraPose, depth: &DepthQuery, out: &mut Vec<WorldPoint>) {
        match depth {
            DepthQuery::Available(frame) => {
                out.extend(self.unprojector.project(frame, pose));
            }
            DepthQuery::Unavailable => {
                if !self.warned_unavailable {
                    self.warned_unavailable = true;
                    log::warn!("no depth info available");
                } else {
                    log::trace!("no depth info available");
                }
                self.frames_without_depth += 1;
            }
            DepthQuery::Failed(reason) => {
                log::error!("depth processing error: {reason}");
                self.frames_without_depth += 1;
            }
        }
    }
}

/// Places random points on random pixel rays inside the depth band.
///
/// Used when the session has no depth sensing; needs only the viewer pose.
#[derive(Debug)]
pub struct RandomPointSource {
    points_per_frame: usize,
    min_depth: f32,
    max_depth: f32,
    mode: DepthMode,
    rng: StdRng,
}

impl RandomPointSource {
    /// Creates a source seeded from the operating system.
    ///
    /// Returns [`depthcloud_core::DepthCloudError::InvalidOption`] if the
    /// depth band is empty, negative or not finite.
    pub fn new(
        points_per_frame: usize,
        min_depth: f32,
        max_depth: f32,
        mode: DepthMode,
    ) -> Result<Self> {
        Self::with_rng(
            points_per_frame,
            min_depth,
            max_depth,
            mode,
            StdRng::from_entropy(),
        )
    }

    /// Creates a reproducible source.
    pub fn with_seed(
        points_per_frame: usize,
        min_depth: f32,
        max_depth: f32,
        mode: DepthMode,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(
            points_per_frame,
            min_depth,
            max_depth,
            mode,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        points_per_frame: usize,
        min_depth: f32,
        max_depth: f32,
        mode: DepthMode,
        rng: StdRng,
    ) -> Result<Self> {
        validate_depth_band(min_depth, max_depth)?;
        Ok(Self {
            points_per_frame,
            min_depth,
            max_depth,
            mode,
            rng,
        })
    }
}

impl PointSource for RandomPointSource {
    fn name(&self) -> &'static str {
        "random"
    }

    fn fill(&mut self, pose: &CameraPose, _depth: &DepthQuery, out: &mut Vec<WorldPoint>) {
        let Some(projector) = FrameProjector::new(pose, self.mode) else {
            log::warn!("projection matrix is singular, skipping frame");
            return;
        };
        out.reserve(self.points_per_frame);
        for _ in 0..self.points_per_frame {
            let depth = self.rng.gen_range(self.min_depth..self.max_depth);
            // gen_range is inclusive of the lower bound
            if depth <= self.min_depth {
                continue;
            }
            let ndc = Vec2::new(self.rng.gen_range(-1.0..1.0), self.rng.gen_range(-1.0..1.0));
            out.push(projector.unproject(ndc, depth));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthcloud_core::DepthFrame;

    #[test]
    fn test_depth_source_counts_missing_frames() {
        let mut source = DepthPointSource::new(Unprojector::new(1, 0.1, 5.0, DepthMode::default()));
        let mut out = Vec::new();
        source.fill(&CameraPose::default(), &DepthQuery::Unavailable, &mut out);
        source.fill(
            &CameraPose::default(),
            &DepthQuery::Failed("sensor busy".to_string()),
            &mut out,
        );
        assert!(out.is_empty());
        assert_eq!(source.frames_without_depth(), 2);
    }

    #[test]
    fn test_depth_source_projects_frame() {
        let frame = DepthFrame::from_raw_values(4, 4, &[1000; 16], 0.001).unwrap();
        let mut source = DepthPointSource::new(Unprojector::new(2, 0.1, 5.0, DepthMode::default()));
        let mut out = Vec::new();
        source.fill(&CameraPose::default(), &DepthQuery::Available(frame), &mut out);
        assert_eq!(out.len(), 4);
        assert_eq!(source.frames_without_depth(), 0);
    }

    #[test]
    fn test_random_source_stays_in_band() {
        let mut source =
            RandomPointSource::with_seed(200, 0.5, 2.0, DepthMode::PinAfterInverse, 7).unwrap();
        let mut out = Vec::new();
        source.fill(&CameraPose::default(), &DepthQuery::Unavailable, &mut out);
        assert!(!out.is_empty());
        assert!(out.len() <= 200);
        for p in &out {
            assert!(-p.z > 0.5 && -p.z < 2.0);
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_random_source_rejects_bad_band() {
        assert!(RandomPointSource::with_seed(4, 1.0, 1.0, DepthMode::default(), 1).is_err());
        assert!(RandomPointSource::with_seed(4, 2.0, 1.0, DepthMode::default(), 1).is_err());
        assert!(RandomPointSource::new(4, f32::NAN, 1.0, DepthMode::default()).is_err());
        assert!(RandomPointSource::new(4, 0.1, f32::INFINITY, DepthMode::default()).is_err());
    }

    #[test]
    fn test_warns_once_after_failed_query() {
        let mut source = DepthPointSource::new(Unprojector::new(1, 0.1, 5.0, DepthMode::default()));
        let mut out = Vec::new();
        source.fill(
            &CameraPose::default(),
            &DepthQuery::Failed("sensor busy".to_string()),
            &mut out,
        );
        assert!(!source.warned_unavailable);
        source.fill(&CameraPose::default(), &DepthQuery::Unavailable, &mut out);
        assert!(source.warned_unavailable);
        source.fill(&CameraPose::default(), &DepthQuery::Unavailable, &mut out);
        assert_eq!(source.frames_without_depth(), 3);
    }

    #[test]
    fn test_random_source_is_reproducible() {
        let mut a = RandomPointSource::with_seed(16, 0.1, 3.0, DepthMode::default(), 42).unwrap();
        let mut b = RandomPointSource::with_seed(16, 0.1, 3.0, DepthMode::default(), 42).unwrap();
        let (mut out_a, mut out_b) = (Vec::new(), Vec::new());
        a.fill(&CameraPose::default(), &DepthQuery::Unavailable, &mut out_a);
        b.fill(&CameraPose::default(), &DepthQuery::Unavailable, &mut out_b);
        assert_eq!(out_a, out_b);
    }
}
