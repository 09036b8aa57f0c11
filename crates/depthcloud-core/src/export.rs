//! JSON export of the accumulated point cloud.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{DepthCloudError, Result};

/// A copy of the valid points, serialized as
/// `{ "points": [x0, y0, z0, x1, ...], "count": n }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloudSnapshot {
    pub points: Vec<f32>,
    pub count: usize,
}

impl PointCloudSnapshot {
    pub fn new(points: Vec<f32>, count: usize) -> Self {
        Self { points, count }
    }

    /// Serializes the snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes the snapshot as JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Parses a snapshot and checks that `points` holds `3 * count` values.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.points.len() != snapshot.count * 3 {
            return Err(DepthCloudError::SizeMismatch {
                expected: snapshot.count * 3,
                actual: snapshot.points.len(),
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PointBuffer;
    use crate::point::WorldPoint;

    #[test]
    fn test_json_shape() {
        let snapshot = PointCloudSnapshot::new(vec![1.0, 2.0, 3.0], 1);
        assert_eq!(
            snapshot.to_json().unwrap(),
            r#"{"points":[1.0,2.0,3.0],"count":1}"#
        );
    }

    #[test]
    fn test_export_is_idempotent() {
        let mut buffer = PointBuffer::with_capacity(16);
        buffer.append(&[
            WorldPoint::new(0.1, -0.25, -1.5),
            WorldPoint::new(2.0, 0.333, -0.75),
        ]);
        let first = buffer.snapshot().to_json().unwrap();
        let second = buffer.snapshot().to_json().unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());

        let mut written = Vec::new();
        buffer.snapshot().write_json(&mut written).unwrap();
        assert_eq!(written, first.into_bytes());
    }

    #[test]
    fn test_snapshot_bounded_by_count() {
        let mut buffer = PointBuffer::with_capacity(4);
        buffer.append(&[WorldPoint::new(9.0, 9.0, 9.0); 4]);
        buffer.reset();
        buffer.append(&[WorldPoint::new(1.0, 1.0, 1.0)]);
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.count, 1);
        assert_eq!(snapshot.points, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_from_json_validates_length() {
        let parsed = PointCloudSnapshot::from_json(r#"{"points":[1.0,2.0,3.0],"count":1}"#).unwrap();
        assert_eq!(parsed.count, 1);
        assert!(PointCloudSnapshot::from_json(r#"{"points":[1.0,2.0],"count":1}"#).is_err());
    }
}
