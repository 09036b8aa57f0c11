//! Configuration options for depth capture.

use serde::{Deserialize, Serialize};

use crate::error::{DepthCloudError, Result};

/// Capture configuration for one AR session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Capacity of the point buffer.
    pub max_points: usize,

    /// Pixel stride used when walking the depth grid, in both axes.
    pub step: usize,

    /// Samples at or below this depth (meters) are rejected.
    pub min_depth: f32,

    /// Samples at or above this depth (meters) are rejected.
    pub max_depth: f32,

    /// How view-space Z is treated after inverting the projection.
    pub depth_mode: DepthMode,

    /// Point source used when the session has no depth sensing.
    pub fallback: FallbackMode,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_points: 100_000,
            step: 8,
            min_depth: 0.1,
            max_depth: 5.0,
            depth_mode: DepthMode::PinAfterInverse,
            fallback: FallbackMode::Disabled,
        }
    }
}

impl Options {
    /// Smaller buffer, coarser grid and a shorter depth band.
    pub fn compact() -> Self {
        Self {
            max_points: 50_000,
            step: 10,
            max_depth: 3.0,
            ..Self::default()
        }
    }

    /// Parses options from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_points == 0 {
            return Err(DepthCloudError::InvalidOption(
                "max_points must be at least 1".to_string(),
            ));
        }
        if self.step == 0 {
            return Err(DepthCloudError::InvalidOption(
                "step must be at least 1".to_string(),
            ));
        }
        validate_depth_band(self.min_depth, self.max_depth)?;
        if let FallbackMode::Random { points_per_frame } = self.fallback {
            if points_per_frame == 0 {
                return Err(DepthCloudError::InvalidOption(
                    "fallback points_per_frame must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Checks that `(min_depth, max_depth)` is a finite, non-negative, non-empty band.
pub fn validate_depth_band(min_depth: f32, max_depth: f32) -> Result<()> {
    if !min_depth.is_finite() || !max_depth.is_finite() {
        return Err(DepthCloudError::InvalidOption(format!(
            "depth band ({min_depth}, {max_depth}) must be finite"
        )));
    }
    if min_depth < 0.0 || min_depth >= max_depth {
        return Err(DepthCloudError::InvalidOption(format!(
            "depth band ({min_depth}, {max_depth}) is empty or negative"
        )));
    }
    Ok(())
}

/// Treatment of view-space Z after the inverse projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DepthMode {
    /// Re-pin view Z to `-depth` and treat the result as a point (w = 1).
    #[default]
    PinAfterInverse,
    /// Keep the inverse projection's output as is, including w. Legacy.
    Unpinned,
}

/// Point source for sessions without depth sensing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FallbackMode {
    /// No points are produced.
    #[default]
    Disabled,
    /// Random points on random pixel rays inside the depth band.
    Random { points_per_frame: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let default = Options::default();
        assert_eq!(default.max_points, 100_000);
        assert_eq!(default.step, 8);
        assert!(default.validate().is_ok());

        let compact = Options::compact();
        assert_eq!(compact.max_points, 50_000);
        assert_eq!(compact.step, 10);
        assert!((compact.max_depth - 3.0).abs() < f32::EPSILON);
        assert!(compact.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let options = Options::from_json(r#"{ "step": 4, "max_depth": 2.5 }"#).unwrap();
        assert_eq!(options.step, 4);
        assert!((options.max_depth - 2.5).abs() < f32::EPSILON);
        assert_eq!(options.max_points, 100_000);
        assert_eq!(options.depth_mode, DepthMode::PinAfterInverse);
    }

    #[test]
    fn test_from_json_fallback() {
        let options =
            Options::from_json(r#"{ "fallback": { "Random": { "points_per_frame": 32 } } }"#)
                .unwrap();
        assert_eq!(
            options.fallback,
            FallbackMode::Random {
                points_per_frame: 32
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_step = Options {
            step: 0,
            ..Options::default()
        };
        assert!(matches!(
            zero_step.validate(),
            Err(DepthCloudError::InvalidOption(_))
        ));

        let inverted = Options {
            min_depth: 3.0,
            max_depth: 1.0,
            ..Options::default()
        };
        assert!(inverted.validate().is_err());

        let no_capacity = Options {
            max_points: 0,
            ..Options::default()
        };
        assert!(no_capacity.validate().is_err());

        let nan = Options {
            max_depth: f32::NAN,
            ..Options::default()
        };
        assert!(nan.validate().is_err());

        assert!(Options::from_json(r#"{ "step": 0 }"#).is_err());
        assert!(validate_depth_band(1.0, 1.0).is_err());
        assert!(validate_depth_band(f32::NAN, 2.0).is_err());
        assert!(validate_depth_band(0.1, 3.0).is_ok());
        assert!(Options::from_json("not json").is_err());
    }
}
