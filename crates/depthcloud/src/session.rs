//! Per-session capture state.
//!
//! A [`CaptureSession`] is created when the AR session starts and dropped when
//! it ends. It owns the point buffer, the selected point source and a scratch
//! batch reused across frames.

use std::io::Write;

use depthcloud_core::{
    AppendOutcome, FallbackMode, Options, PointBuffer, PointCloudSnapshot, Result, Unprojector,
    WorldPoint,
};

use crate::frame::{DepthCapability, XrFrame};
use crate::source::{DepthPointSource, PointSource, RandomPointSource};

/// What happened to one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Points produced by the source.
    pub produced: usize,
    /// Outcome of the append; `None` if nothing was appended.
    pub outcome: Option<AppendOutcome>,
}

impl FrameReport {
    const SKIPPED: Self = Self {
        produced: 0,
        outcome: None,
    };
}

/// Running counters for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub frames_without_pose: u64,
    pub points_produced: u64,
    pub batches_appended: u64,
    pub batches_rejected: u64,
    /// Valid points in the buffer.
    pub point_count: usize,
}

/// Capture context for one AR session.
pub struct CaptureSession {
    options: Options,
    source: Option<Box<dyn PointSource>>,
    buffer: PointBuffer,
    scratch: Vec<WorldPoint>,
    stats: SessionStats,
}

impl CaptureSession {
    /// Starts a session, choosing the point source from `capability`.
    pub fn start(options: Options, capability: DepthCapability) -> Result<Self> {
        options.validate()?;

        let source: Option<Box<dyn PointSource>> = match (capability, options.fallback) {
            (DepthCapability::Supported, _) => Some(Box::new(DepthPointSource::new(
                Unprojector::from_options(&options),
            ))),
            (DepthCapability::Unsupported, FallbackMode::Random { points_per_frame }) => {
                Some(Box::new(RandomPointSource::new(
                    points_per_frame,
                    options.min_depth,
                    options.max_depth,
                    options.depth_mode,
                )?))
            }
            (DepthCapability::Unsupported, FallbackMode::Disabled) => None,
        };

        Ok(Self::with_source(options, source))
    }

    /// Starts a session with an explicit point source.
    pub fn with_source(options: Options, source: Option<Box<dyn PointSource>>) -> Self {
        match &source {
            Some(source) => log::info!(
                "capture session started (source: {}, capacity: {})",
                source.name(),
                options.max_points
            ),
            None => log::warn!("depth sensing not supported, point projection disabled"),
        }

        Self {
            buffer: PointBuffer::with_capacity(options.max_points),
            scratch: Vec::new(),
            source,
            options,
            stats: SessionStats::default(),
        }
    }

    /// Runs the point source on one frame and appends its batch.
    pub fn on_frame(&mut self, frame: &XrFrame) -> FrameReport {
        self.stats.frames += 1;

        let Some(pose) = frame.view.as_ref() else {
            self.stats.frames_without_pose += 1;
            return FrameReport::SKIPPED;
        };
        let Some(source) = self.source.as_mut() else {
            return FrameReport::SKIPPED;
        };

        self.scratch.clear();
        source.fill(pose, &frame.depth, &mut self.scratch);
        let produced = self.scratch.len();
        self.stats.points_produced += produced as u64;
        if produced == 0 {
            return FrameReport::SKIPPED;
        }

        let outcome = self.buffer.append(&self.scratch);
        match outcome {
            AppendOutcome::Appended(n) => {
                self.stats.batches_appended += 1;
                log::debug!("points added: {n}, total: {}", self.buffer.len());
            }
            AppendOutcome::Full {
                requested,
                remaining,
            } => {
                self.stats.batches_rejected += 1;
                log::debug!("point buffer full, dropped batch of {requested} ({remaining} free)");
            }
        }
        self.stats.point_count = self.buffer.len();

        FrameReport {
            produced,
            outcome: Some(outcome),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Name of the active point source, if projection is enabled.
    pub fn source_name(&self) -> Option<&'static str> {
        self.source.as_ref().map(|s| s.name())
    }

    pub fn buffer(&self) -> &PointBuffer {
        &self.buffer
    }

    /// The accumulated points.
    pub fn points(&self) -> &[WorldPoint] {
        self.buffer.points()
    }

    /// The accumulated points as a flat `x, y, z` array for drawing.
    pub fn flat_positions(&self) -> &[f32] {
        self.buffer.as_flat()
    }

    pub fn snapshot(&self) -> PointCloudSnapshot {
        self.buffer.snapshot()
    }

    /// The accumulated cloud as a JSON document.
    pub fn export_json(&self) -> Result<String> {
        log::info!("exporting {} points", self.buffer.len());
        self.snapshot().to_json()
    }

    /// Writes the accumulated cloud as JSON.
    pub fn export_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        log::info!("exporting {} points", self.buffer.len());
        self.snapshot().write_json(writer)
    }

    /// Empties the point buffer.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.stats.point_count = 0;
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Ends the session, releasing its buffer.
    ///
    /// The returned stats describe the session as it was when it ended.
    pub fn end(self) -> SessionStats {
        log::info!(
            "capture session ended after {} frames ({} batches appended, {} rejected)",
            self.stats.frames,
            self.stats.batches_appended,
            self.stats.batches_rejected
        );
        self.stats
    }
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("source", &self.source_name())
            .field("buffer", &self.buffer)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
