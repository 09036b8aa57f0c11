//! depthcloud: accumulates AR depth-camera samples into a world-space point cloud.
//!
//! Once per rendered frame the host hands an [`XrFrame`] to a
//! [`CaptureHost`]. The live [`CaptureSession`] runs its point source on the
//! frame, appends the batch to a fixed-capacity buffer, and exposes the valid
//! points for drawing and export.
//!
//! # Quick Start
//!
//! ```no_run
//! use depthcloud::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut host = CaptureHost::new(Options::default())?;
//!     host.handle_event(SessionEvent::Started {
//!         capability: DepthCapability::Supported,
//!     })?;
//!
//!     let depth = DepthFrame::from_raw_values(2, 2, &[1200; 4], 0.001)?;
//!     host.on_frame(&XrFrame::with_depth(CameraPose::default(), depth));
//!
//!     println!("{}", host.export_json()?);
//!     host.handle_event(SessionEvent::Ended)?;
//!     Ok(())
//! }
//! ```
//!
//! # Point sources
//!
//! - [`DepthPointSource`] - unprojects the frame's depth map
//! - [`RandomPointSource`] - fallback for sessions without depth sensing

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod frame;
mod host;
mod init;
mod session;
mod source;

// Re-export core types
pub use depthcloud_core::{
    error::{DepthCloudError, Result},
    AppendOutcome, CameraPose, DepthFrame, DepthMode, FallbackMode, FrameProjector, Options,
    PointBuffer, PointCloudSnapshot, Unprojector, WorldPoint, Mat4, Vec2, Vec3, Vec4,
};

pub use frame::{DepthCapability, DepthQuery, SessionEvent, XrFrame};
pub use host::CaptureHost;
pub use init::init_logging;
pub use session::{CaptureSession, FrameReport, SessionStats};
pub use source::{DepthPointSource, PointSource, RandomPointSource};
