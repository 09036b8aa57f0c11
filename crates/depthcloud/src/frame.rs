//! Inputs supplied by the AR runtime.

use depthcloud_core::{CameraPose, DepthFrame};

/// Result of asking the runtime for the frame's depth information.
#[derive(Debug, Clone)]
pub enum DepthQuery {
    /// A depth map for the primary view.
    Available(DepthFrame),
    /// The runtime had no depth for this frame.
    Unavailable,
    /// The query raised an error.
    Failed(String),
}

impl DepthQuery {
    /// The depth frame, if one was delivered.
    pub fn frame(&self) -> Option<&DepthFrame> {
        match self {
            Self::Available(frame) => Some(frame),
            Self::Unavailable | Self::Failed(_) => None,
        }
    }
}

impl From<Option<DepthFrame>> for DepthQuery {
    fn from(frame: Option<DepthFrame>) -> Self {
        frame.map_or(Self::Unavailable, Self::Available)
    }
}

/// One rendered frame as seen by the capture core.
#[derive(Debug, Clone)]
pub struct XrFrame {
    /// Pose and projection of the primary view; `None` while tracking is lost.
    pub view: Option<CameraPose>,
    /// Depth information for the primary view.
    pub depth: DepthQuery,
}

impl XrFrame {
    pub fn new(view: Option<CameraPose>, depth: DepthQuery) -> Self {
        Self { view, depth }
    }

    /// A tracked frame carrying a depth map.
    pub fn with_depth(view: CameraPose, depth: DepthFrame) -> Self {
        Self::new(Some(view), DepthQuery::Available(depth))
    }

    /// A tracked frame without depth.
    pub fn without_depth(view: CameraPose) -> Self {
        Self::new(Some(view), DepthQuery::Unavailable)
    }
}

/// Whether the session was granted depth sensing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthCapability {
    #[default]
    Supported,
    Unsupported,
}

/// Session lifecycle notifications from the AR runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started { capability: DepthCapability },
    Ended,
}
