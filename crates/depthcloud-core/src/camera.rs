//! Viewer pose and projection for one frame.

use glam::Mat4;

/// Camera matrices for the frame's primary view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Maps view space to clip space.
    pub projection: Mat4,
    /// Maps view space to world space.
    pub transform: Mat4,
}

impl CameraPose {
    /// Creates a camera pose from projection and view-to-world transform.
    pub fn new(projection: Mat4, transform: Mat4) -> Self {
        Self {
            projection,
            transform,
        }
    }

    /// Creates a camera pose from column-major arrays, the layout AR runtimes
    /// hand out.
    pub fn from_cols_arrays(projection: &[f32; 16], transform: &[f32; 16]) -> Self {
        Self::new(
            Mat4::from_cols_array(projection),
            Mat4::from_cols_array(transform),
        )
    }

    /// Inverse of the projection matrix, or `None` if it is singular.
    pub fn inverse_projection(&self) -> Option<Mat4> {
        let det = self.projection.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(self.projection.inverse())
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}
