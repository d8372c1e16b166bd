//! Logical camera features and normalized-range mapping.

use serde::{Deserialize, Serialize};

/// A camera control exposed through the generic frame-grabber interface.
///
/// The set is fixed at compile time; which members a given camera family
/// actually supports is declared by the driver's capability tables. The
/// integer ids are stable and match the declaration order, so external
/// interfaces that speak integers can go through [`CameraFeature::from_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFeature {
    Brightness,
    Exposure,
    Sharpness,
    WhiteBalance,
    Gamma,
    Gain,
    FrameRate,
    Trigger,
}

/// All features, in id order.
pub const ALL_FEATURES: [CameraFeature; 8] = [
    CameraFeature::Brightness,
    CameraFeature::Exposure,
    CameraFeature::Sharpness,
    CameraFeature::WhiteBalance,
    CameraFeature::Gamma,
    CameraFeature::Gain,
    CameraFeature::FrameRate,
    CameraFeature::Trigger,
];

impl CameraFeature {
    /// Map an external integer identifier onto a feature.
    ///
    /// Returns `None` for anything outside the enumerated range; callers
    /// must treat that as an unsupported feature without touching the
    /// session.
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Brightness),
            1 => Some(Self::Exposure),
            2 => Some(Self::Sharpness),
            3 => Some(Self::WhiteBalance),
            4 => Some(Self::Gamma),
            5 => Some(Self::Gain),
            6 => Some(Self::FrameRate),
            7 => Some(Self::Trigger),
            _ => None,
        }
    }

    /// Stable integer identifier.
    pub fn id(&self) -> i32 {
        match self {
            Self::Brightness => 0,
            Self::Exposure => 1,
            Self::Sharpness => 2,
            Self::WhiteBalance => 3,
            Self::Gamma => 4,
            Self::Gain => 5,
            Self::FrameRate => 6,
            Self::Trigger => 7,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Exposure => "exposure",
            Self::Sharpness => "sharpness",
            Self::WhiteBalance => "white_balance",
            Self::Gamma => "gamma",
            Self::Gain => "gain",
            Self::FrameRate => "frame_rate",
            Self::Trigger => "trigger",
        }
    }
}

impl std::fmt::Display for CameraFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Control-loop state of a feature that supports an automatic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMode {
    Auto,
    Manual,
}

/// Physical range a vendor parameter accepts, in its native unit.
///
/// Values cross the driver boundary normalized to `[0, 1]`; the mapping is a
/// plain affine interpolation both ways. Input is intentionally not clamped:
/// a normalized value outside `[0, 1]` maps to a physical value outside the
/// documented range and the device decides whether to accept it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a normalized `[0, 1]` value into this range.
    pub fn to_physical(&self, normalized: f64) -> f64 {
        normalized * (self.max - self.min) + self.min
    }

    /// Map a physical value back into `[0, 1]`.
    pub fn to_normalized(&self, physical: f64) -> f64 {
        (physical - self.min) / (self.max - self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_id_rejects_out_of_range_identifiers() {
        assert_eq!(CameraFeature::from_id(-1), None);
        assert_eq!(CameraFeature::from_id(8), None);
        assert_eq!(CameraFeature::from_id(1234), None);
    }

    #[test]
    fn from_id_round_trips_every_feature() {
        for feature in ALL_FEATURES {
            assert_eq!(CameraFeature::from_id(feature.id()), Some(feature));
        }
    }

    #[test]
    fn range_endpoints_map_to_unit_interval() {
        let range = FeatureRange::new(68.0, 2_300_000.0);
        assert_eq!(range.to_physical(0.0), 68.0);
        assert_eq!(range.to_physical(1.0), 2_300_000.0);
        assert_eq!(range.to_normalized(68.0), 0.0);
        assert_eq!(range.to_normalized(2_300_000.0), 1.0);
    }

    #[test]
    fn mapping_round_trips_within_tolerance() {
        let range = FeatureRange::new(-1.0, 1.0);
        for i in 0..=10 {
            let v = f64::from(i) / 10.0;
            let back = range.to_normalized(range.to_physical(v));
            assert!((back - v).abs() < 1e-12, "round trip drifted for {v}: {back}");
        }
    }

    #[test]
    fn mapping_is_not_clamped() {
        // Out-of-interval input deliberately maps outside the physical range.
        let range = FeatureRange::new(0.0, 10.0);
        assert_eq!(range.to_physical(1.5), 15.0);
        assert_eq!(range.to_physical(-0.5), -5.0);
    }
}
