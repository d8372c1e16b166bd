//! Feature control.
//!
//! Translates between the normalized `[0, 1]` feature protocol and the
//! camera's named GenICam parameters, and answers capability queries from
//! fixed per-family tables.
//!
//! The control surface carries at most two values per feature. White balance
//! uses blue and red, in that order; green is left to the device.

use crate::components::acquisition::write_quiesced;
use grabber_core::{
    CameraFeature, CameraSession, FeatureMode, FeatureRange, GrabResult, GrabberError, ParamKind,
    ParamValue,
};
use parking_lot::Mutex;

/// Features this camera family exposes through the control surface.
// Gamma is present on the sensor but not writable; trigger is wired but unused.
pub(crate) const SUPPORTED_FEATURES: &[CameraFeature] = &[
    CameraFeature::Brightness,
    CameraFeature::Exposure,
    CameraFeature::Sharpness,
    CameraFeature::WhiteBalance,
    CameraFeature::Gain,
    CameraFeature::FrameRate,
];

/// Features with an automatic control loop.
pub(crate) const FEATURES_WITH_AUTO: &[CameraFeature] = &[
    CameraFeature::Exposure,
    CameraFeature::WhiteBalance,
    CameraFeature::Gain,
];

/// Frame rate applied when the configuration gives no period.
pub(crate) const DEFAULT_FRAME_RATE: f64 = 30.0;

const AUTO_CONTINUOUS: &str = "Continuous";
const AUTO_OFF: &str = "Off";

const BALANCE_SELECTOR: &str = "BalanceRatioSelector";
const BALANCE_RATIO: &str = "BalanceRatio";

/// Physical range of each ranged feature, in the parameter's native unit.
///
/// Values from the vendor documentation for the da4200-30mci family. The
/// white-balance range is not clearly documented; it was found empirically.
/// Frame rate has no entry: it is exchanged in frames per second, never
/// normalized.
fn feature_range(feature: CameraFeature) -> Option<FeatureRange> {
    match feature {
        CameraFeature::Brightness => Some(FeatureRange::new(-1.0, 1.0)),
        CameraFeature::Exposure => Some(FeatureRange::new(68.0, 2_300_000.0)),
        CameraFeature::Sharpness => Some(FeatureRange::new(0.0, 1.0)),
        CameraFeature::WhiteBalance => Some(FeatureRange::new(1.0, 8.0)),
        CameraFeature::Gain => Some(FeatureRange::new(0.0, 33.06)),
        _ => None,
    }
}

/// GenICam float parameter carrying a feature's value.
fn value_parameter(feature: CameraFeature) -> Option<&'static str> {
    match feature {
        CameraFeature::Brightness => Some("BslBrightness"),
        // The generic interface counts exposure in 100 µs steps; the camera
        // accepts µs directly, so the range is expressed in µs.
        CameraFeature::Exposure => Some("ExposureTime"),
        CameraFeature::Sharpness => Some("BslSharpnessEnhancement"),
        CameraFeature::Gain => Some("Gain"),
        CameraFeature::FrameRate => Some("AcquisitionFrameRate"),
        _ => None,
    }
}

/// GenICam enumeration parameter driving a feature's automatic loop.
fn auto_parameter(feature: CameraFeature) -> Option<&'static str> {
    match feature {
        CameraFeature::Exposure => Some("ExposureAuto"),
        CameraFeature::WhiteBalance => Some("BalanceWhiteAuto"),
        CameraFeature::Gain => Some("GainAuto"),
        _ => None,
    }
}

struct FeatureState {
    /// Last frame rate applied. Reads return this instead of querying the
    /// device, and it only changes once the device accepted the write.
    frame_rate: f64,
}

/// Feature-parameter mediator.
///
/// Owns the single lock that serializes parameter writes (every write runs
/// stop → write → start under it) and the cached frame rate; otherwise it is
/// stateless. It never owns the session — each call borrows one.
///
/// Reads take no lock and do not pause acquisition.
pub struct GenicamFeatures {
    state: Mutex<FeatureState>,
}

impl GenicamFeatures {
    pub fn new(initial_frame_rate: f64) -> Self {
        Self {
            state: Mutex::new(FeatureState {
                frame_rate: initial_frame_rate,
            }),
        }
    }

    // =========================================================================
    // Capability queries (pure, no session interaction)
    // =========================================================================

    pub fn has_feature(&self, feature: CameraFeature) -> bool {
        SUPPORTED_FEATURES.contains(&feature)
    }

    pub fn has_auto(&self, feature: CameraFeature) -> bool {
        FEATURES_WITH_AUTO.contains(&feature)
    }

    pub fn has_manual(&self, feature: CameraFeature) -> bool {
        self.has_feature(feature)
    }

    /// One-push is only meaningful where an automatic loop exists.
    pub fn has_one_push(&self, feature: CameraFeature) -> bool {
        self.has_auto(feature)
    }

    /// The on/off toggle is the auto/manual switch.
    pub fn has_on_off(&self, feature: CameraFeature) -> bool {
        self.has_auto(feature)
    }

    fn ensure_supported(&self, feature: CameraFeature) -> GrabResult<()> {
        if self.has_feature(feature) {
            Ok(())
        } else {
            Err(GrabberError::Unsupported(feature))
        }
    }

    fn ensure_auto(&self, feature: CameraFeature) -> GrabResult<()> {
        self.ensure_supported(feature)?;
        if self.has_auto(feature) {
            Ok(())
        } else {
            Err(GrabberError::NoAutoMode(feature))
        }
    }

    // =========================================================================
    // Single-value features
    // =========================================================================

    /// Read a feature, normalized to `[0, 1]`.
    ///
    /// Frame rate is the exception twice over: it is served from the cache
    /// rather than the device, and it is reported in frames per second.
    pub fn value(&self, session: &dyn CameraSession, feature: CameraFeature) -> GrabResult<f64> {
        self.ensure_supported(feature)?;
        match feature {
            CameraFeature::WhiteBalance => Err(GrabberError::TwoValued(feature)),
            CameraFeature::FrameRate => Ok(self.state.lock().frame_rate),
            _ => {
                let name = value_parameter(feature).ok_or(GrabberError::Unsupported(feature))?;
                let range = feature_range(feature).ok_or(GrabberError::Unsupported(feature))?;
                let physical = session.parameter(name, ParamKind::Float)?.expect_float(name)?;
                let normalized = range.to_normalized(physical);
                tracing::debug!(feature = %feature, physical, normalized, "read feature value");
                Ok(normalized)
            }
        }
    }

    /// Write a feature from a normalized `[0, 1]` value.
    ///
    /// Frame rate takes the value as frames per second and goes through
    /// [`GenicamFeatures::set_frame_rate`].
    pub fn set_value(
        &self,
        session: &dyn CameraSession,
        feature: CameraFeature,
        value: f64,
    ) -> GrabResult<()> {
        self.ensure_supported(feature)?;
        match feature {
            CameraFeature::WhiteBalance => Err(GrabberError::TwoValued(feature)),
            CameraFeature::FrameRate => self.set_frame_rate(session, value),
            _ => {
                let name = value_parameter(feature).ok_or(GrabberError::Unsupported(feature))?;
                let range = feature_range(feature).ok_or(GrabberError::Unsupported(feature))?;
                self.write_parameter(session, name, ParamValue::Float(range.to_physical(value)))
            }
        }
    }

    // =========================================================================
    // Frame rate
    // =========================================================================

    /// Frame rate last accepted by the device, frames per second.
    pub fn frame_rate(&self) -> f64 {
        self.state.lock().frame_rate
    }

    /// Apply a new frame rate and remember it once the device accepted it.
    ///
    /// The camera rejects `AcquisitionFrameRate` writes while grabbing, so
    /// this goes through the quiesced write path like every other write.
    pub fn set_frame_rate(&self, session: &dyn CameraSession, fps: f64) -> GrabResult<()> {
        let mut state = self.state.lock();
        write_quiesced(session, "AcquisitionFrameRate", ParamValue::Float(fps))?;
        state.frame_rate = fps;
        Ok(())
    }

    // =========================================================================
    // White balance (the one two-value feature)
    // =========================================================================

    /// Read the white-balance pair as (blue, red), normalized.
    pub fn value_pair(
        &self,
        session: &dyn CameraSession,
        feature: CameraFeature,
    ) -> GrabResult<(f64, f64)> {
        if feature != CameraFeature::WhiteBalance {
            return Err(GrabberError::SingleValued(feature));
        }
        let range = feature_range(feature).ok_or(GrabberError::Unsupported(feature))?;

        self.write_parameter(session, BALANCE_SELECTOR, ParamValue::Enumeration("Blue".into()))?;
        let blue = session
            .parameter(BALANCE_RATIO, ParamKind::Float)?
            .expect_float(BALANCE_RATIO)?;
        self.write_parameter(session, BALANCE_SELECTOR, ParamValue::Enumeration("Red".into()))?;
        let red = session
            .parameter(BALANCE_RATIO, ParamKind::Float)?
            .expect_float(BALANCE_RATIO)?;

        Ok((range.to_normalized(blue), range.to_normalized(red)))
    }

    /// Write the white-balance pair as (blue, red), normalized.
    pub fn set_value_pair(
        &self,
        session: &dyn CameraSession,
        feature: CameraFeature,
        blue: f64,
        red: f64,
    ) -> GrabResult<()> {
        if feature != CameraFeature::WhiteBalance {
            return Err(GrabberError::SingleValued(feature));
        }
        let range = feature_range(feature).ok_or(GrabberError::Unsupported(feature))?;

        self.write_parameter(session, BALANCE_SELECTOR, ParamValue::Enumeration("Blue".into()))?;
        self.write_parameter(session, BALANCE_RATIO, ParamValue::Float(range.to_physical(blue)))?;
        self.write_parameter(session, BALANCE_SELECTOR, ParamValue::Enumeration("Red".into()))?;
        self.write_parameter(session, BALANCE_RATIO, ParamValue::Float(range.to_physical(red)))?;
        Ok(())
    }

    // =========================================================================
    // Automatic modes
    // =========================================================================

    /// Engage (`Continuous`) or release (`Off`) the feature's automatic loop.
    pub fn set_active(
        &self,
        session: &dyn CameraSession,
        feature: CameraFeature,
        on: bool,
    ) -> GrabResult<()> {
        self.ensure_auto(feature)?;
        let name = auto_parameter(feature).ok_or(GrabberError::NoAutoMode(feature))?;
        let state = if on { AUTO_CONTINUOUS } else { AUTO_OFF };
        self.write_parameter(session, name, ParamValue::Enumeration(state.into()))
    }

    /// Whether the feature's automatic loop is engaged.
    ///
    /// `Continuous` reads as engaged; `Off` and anything else (e.g. a
    /// device in a transient `Once` state) read as not engaged.
    pub fn active(&self, session: &dyn CameraSession, feature: CameraFeature) -> GrabResult<bool> {
        self.ensure_auto(feature)?;
        let name = auto_parameter(feature).ok_or(GrabberError::NoAutoMode(feature))?;
        let raw = session
            .parameter(name, ParamKind::Enumeration)?
            .expect_enumeration(name)?;
        match raw.as_str() {
            AUTO_CONTINUOUS => Ok(true),
            AUTO_OFF => Ok(false),
            other => {
                tracing::debug!(parameter = name, state = other, "unexpected auto state");
                Ok(false)
            }
        }
    }

    /// Switch the feature between automatic and manual control.
    pub fn set_mode(
        &self,
        session: &dyn CameraSession,
        feature: CameraFeature,
        mode: FeatureMode,
    ) -> GrabResult<()> {
        self.ensure_auto(feature)?;
        match mode {
            FeatureMode::Auto => self.set_active(session, feature, true),
            FeatureMode::Manual => self.set_active(session, feature, false),
        }
    }

    /// Current auto/manual mode of the feature.
    pub fn mode(
        &self,
        session: &dyn CameraSession,
        feature: CameraFeature,
    ) -> GrabResult<FeatureMode> {
        self.ensure_auto(feature)?;
        if self.active(session, feature)? {
            Ok(FeatureMode::Auto)
        } else {
            Ok(FeatureMode::Manual)
        }
    }

    /// Pulse the automatic loop: auto on, then immediately back to manual.
    ///
    /// No wait for convergence is performed between the two writes.
    pub fn one_push(&self, session: &dyn CameraSession, feature: CameraFeature) -> GrabResult<()> {
        self.ensure_auto(feature)?;
        self.set_mode(session, feature, FeatureMode::Auto)?;
        self.set_mode(session, feature, FeatureMode::Manual)
    }

    // =========================================================================
    // Write path
    // =========================================================================

    /// Serialized, quiesced parameter write.
    ///
    /// Holds the mediator lock for the whole stop → write → start span so
    /// concurrent callers cannot interleave their brackets.
    pub(crate) fn write_parameter(
        &self,
        session: &dyn CameraSession,
        name: &str,
        value: ParamValue,
    ) -> GrabResult<()> {
        let _serialized = self.state.lock();
        write_quiesced(session, name, value)
    }
}

impl Default for GenicamFeatures {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}
