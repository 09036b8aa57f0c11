//! Fixed-capacity point accumulation buffer.

use glam::Vec3;

use crate::export::PointCloudSnapshot;
use crate::point::WorldPoint;

/// Result of appending a batch to a [`PointBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The whole batch was written.
    Appended(usize),
    /// The batch did not fit and nothing was written.
    Full { requested: usize, remaining: usize },
}

impl AppendOutcome {
    pub fn is_appended(self) -> bool {
        matches!(self, Self::Appended(_))
    }
}

/// A pre-allocated buffer of world points.
///
/// Only the prefix `[0, len)` is meaningful. Batches are written whole or not
/// at all; existing entries are never modified until [`PointBuffer::reset`].
pub struct PointBuffer {
    storage: Vec<WorldPoint>,
    count: usize,
}

impl PointBuffer {
    /// Allocates a buffer holding up to `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![WorldPoint::default(); capacity],
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of valid points.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    /// Free slots left before the buffer is full.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.count
    }

    /// Appends a batch if it fits entirely.
    pub fn append(&mut self, batch: &[WorldPoint]) -> AppendOutcome {
        let remaining = self.remaining();
        if batch.len() > remaining {
            return AppendOutcome::Full {
                requested: batch.len(),
                remaining,
            };
        }
        let end = self.count + batch.len();
        self.storage[self.count..end].copy_from_slice(batch);
        self.count = end;
        AppendOutcome::Appended(batch.len())
    }

    /// Marks the buffer empty. Stored values are left in place.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// The valid points.
    pub fn points(&self) -> &[WorldPoint] {
        &self.storage[..self.count]
    }

    /// The valid points as a flat `x, y, z` array of length `3 * len()`.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(self.points())
    }

    /// Axis-aligned bounds of the valid points, or `None` when empty.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        if self.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for &p in self.points() {
            let v = Vec3::from(p);
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// Copies the valid points into an export snapshot.
    pub fn snapshot(&self) -> PointCloudSnapshot {
        PointCloudSnapshot::new(self.as_flat().to_vec(), self.count)
    }
}

impl std::fmt::Debug for PointBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointBuffer")
            .field("count", &self.count)
            .field("capacity", &self.capacity())
            .finish()
    }
}
