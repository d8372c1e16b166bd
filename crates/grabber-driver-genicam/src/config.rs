//! Driver configuration.
//!
//! Parsed once at open time by the hosting layer and handed to
//! [`crate::GenicamDriver::open`]; none of it is renegotiated afterwards.

use crate::components::features::DEFAULT_FRAME_RATE;
use serde::Deserialize;

/// Rotation angles the camera pipeline can honor.
const ALLOWED_ROTATIONS: [f64; 4] = [0.0, 90.0, -90.0, 180.0];

/// Configuration for a GenICam camera.
///
/// ```toml
/// serial_number = "40094772"
/// width = 1280
/// height = 720
/// period_s = 0.05          # publisher period; frame rate aligns to it
/// rotation = 90.0
/// rotation_with_crop = true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GenicamConfig {
    /// Serial number of the camera to open (required).
    pub serial_number: String,

    /// Requested image width in pixels (default: 640).
    #[serde(default = "default_width")]
    pub width: u32,

    /// Requested image height in pixels (default: 480).
    #[serde(default = "default_height")]
    pub height: u32,

    /// Refresh period of the hosting publisher in seconds (default: 0.03).
    /// The camera frame rate has to be aligned with it.
    #[serde(default = "default_period")]
    pub period_s: f64,

    /// Rotation applied from the center of the image, in degrees
    /// (default: 0.0; allowed: 0, 90, -90, 180).
    #[serde(default)]
    pub rotation: f64,

    /// With ±90 rotation, swap the requested width/height instead of
    /// rescaling the rotated image (default: false).
    #[serde(default)]
    pub rotation_with_crop: bool,
}

fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    480
}
fn default_period() -> f64 {
    0.03
}

impl Default for GenicamConfig {
    fn default() -> Self {
        Self {
            serial_number: String::new(),
            width: default_width(),
            height: default_height(),
            period_s: default_period(),
            rotation: 0.0,
            rotation_with_crop: false,
        }
    }
}

impl GenicamConfig {
    /// Parse and validate a configuration from a TOML value.
    pub fn from_value(value: toml::Value) -> anyhow::Result<Self> {
        let config: Self = value.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Check semantic constraints that survive parsing.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.serial_number.is_empty() {
            anyhow::bail!("serial_number must be specified");
        }
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("camera resolution must be non-zero");
        }
        if self.period_s < 0.0 {
            anyhow::bail!("period must not be negative");
        }
        if !ALLOWED_ROTATIONS.contains(&self.rotation) {
            anyhow::bail!("rotation must be one of 0, 90, -90 or 180 degrees");
        }
        Ok(())
    }

    /// Frame rate aligned with the publisher period, in frames per second.
    pub fn target_frame_rate(&self) -> f64 {
        if self.period_s > 0.0 {
            1.0 / self.period_s
        } else {
            DEFAULT_FRAME_RATE
        }
    }

    /// Requested geometry after accounting for rotation-with-crop.
    pub fn frame_geometry(&self) -> (u32, u32) {
        if self.rotation_with_crop && (self.rotation == 90.0 || self.rotation == -90.0) {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}
