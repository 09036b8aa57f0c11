//! Core of depthcloud-rs.
//!
//! This crate turns AR depth maps into a world-space point cloud:
//! - [`DepthFrame`] and [`CameraPose`] describe one frame's input
//! - [`Unprojector`] lazily maps depth samples to [`WorldPoint`]s
//! - [`PointBuffer`] accumulates points up to a fixed capacity
//! - [`PointCloudSnapshot`] is the JSON export of the accumulated cloud

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel coordinates are far below f32's exact integer range
#![allow(clippy::cast_precision_loss)]

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod error;
pub mod export;
pub mod options;
pub mod point;
pub mod unproject;

pub use buffer::{AppendOutcome, PointBuffer};
pub use camera::CameraPose;
pub use depth::{DepthFrame, BYTES_PER_PIXEL};
pub use error::{DepthCloudError, Result};
pub use export::PointCloudSnapshot;
pub use options::{validate_depth_band, DepthMode, FallbackMode, Options};
pub use point::WorldPoint;
pub use unproject::{pixel_to_ndc, FrameProjector, ProjectedPoints, Unprojector};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
