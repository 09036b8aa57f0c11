//! Adapter between the platform's per-frame callback and capture sessions.

use depthcloud_core::{Options, PointCloudSnapshot, Result};

use crate::frame::{SessionEvent, XrFrame};
use crate::session::{CaptureSession, FrameReport, SessionStats};

/// Owns at most one live [`CaptureSession`] and routes frames to it.
#[derive(Debug)]
pub struct CaptureHost {
    options: Options,
    session: Option<CaptureSession>,
}

impl CaptureHost {
    /// Creates a host with no live session.
    ///
    /// Returns an error if `options` are invalid.
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            session: None,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Applies a lifecycle event.
    ///
    /// Returns the stats of the session that ended, if one was live.
    pub fn handle_event(&mut self, event: SessionEvent) -> Result<Option<SessionStats>> {
        match event {
            SessionEvent::Started { capability } => {
                let previous = self.session.take().map(CaptureSession::end);
                self.session = Some(CaptureSession::start(self.options.clone(), capability)?);
                Ok(previous)
            }
            SessionEvent::Ended => Ok(self.session.take().map(CaptureSession::end)),
        }
    }

    /// Processes one frame. Returns `None` when no session is live.
    pub fn on_frame(&mut self, frame: &XrFrame) -> Option<FrameReport> {
        self.session.as_mut().map(|session| session.on_frame(frame))
    }

    pub fn session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Positions to draw this frame; empty outside a session.
    pub fn flat_positions(&self) -> &[f32] {
        match &self.session {
            Some(session) => session.flat_positions(),
            None => &[],
        }
    }

    /// Number of accumulated points; zero outside a session.
    pub fn point_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.points().len())
    }

    /// Snapshot of the accumulated cloud; empty outside a session.
    pub fn snapshot(&self) -> PointCloudSnapshot {
        self.session
            .as_ref()
            .map_or_else(|| PointCloudSnapshot::new(Vec::new(), 0), CaptureSession::snapshot)
    }

    /// The accumulated cloud as a JSON document.
    pub fn export_json(&self) -> Result<String> {
        match &self.session {
            Some(session) => session.export_json(),
            None => self.snapshot().to_json(),
        }
    }
}
