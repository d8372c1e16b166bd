//! GenICam industrial-camera driver.
//!
//! Bridges a GenICam-speaking acquisition session to the generic
//! frame-grabber control surface. Componentized:
//! - Features: capability tables and normalized parameter marshalling
//! - Acquisition: grab-state handling around device reconfiguration
//!
//! The session itself (device discovery, node-map transport, frame
//! delivery) is owned by the hosting layer and reaches this crate only
//! through the [`CameraSession`] trait; the `mock` feature (on by default)
//! provides an in-memory session so everything here runs without hardware.

pub mod components;
pub mod config;
#[cfg(feature = "mock")]
pub mod mock;

pub use crate::components::features::GenicamFeatures;
pub use crate::config::GenicamConfig;

use grabber_core::{
    CameraFeature, CameraSession, FeatureControl, FeatureMode, GrabResult, GrabberError,
    ParamValue, ResolutionControl,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Resolve an external integer feature identifier.
///
/// Hosting interfaces that speak integers must go through this gate; an
/// identifier outside the enumerated range fails without any session
/// interaction.
pub fn feature_by_id(id: i32) -> GrabResult<CameraFeature> {
    CameraFeature::from_id(id).ok_or(GrabberError::UnknownFeature(id))
}

/// Driver for GenICam industrial cameras.
///
/// Built around an already-open acquisition session. The driver borrows the
/// session for the duration of each call and never closes it; tearing the
/// device down is its owner's job after the driver is dropped.
pub struct GenicamDriver {
    session: Arc<dyn CameraSession>,
    features: GenicamFeatures,
    geometry: Mutex<(u32, u32)>,
    rotation: f64,
}

impl std::fmt::Debug for GenicamDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenicamDriver")
            .field("geometry", &self.geometry)
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}

impl GenicamDriver {
    /// Validate the configuration, bootstrap the device and start grabbing.
    ///
    /// The bootstrap applies the same sequence a freshly attached camera
    /// needs: frame-rate control and sensor scaling enabled, the requested
    /// resolution, exposure forced to manual, and the target frame rate.
    pub fn open(session: Arc<dyn CameraSession>, config: &GenicamConfig) -> GrabResult<Self> {
        config
            .validate()
            .map_err(|e| GrabberError::Configuration(e.to_string()))?;

        let (width, height) = config.frame_geometry();
        let fps = config.target_frame_rate();
        if config.rotation_with_crop {
            tracing::debug!("rotation with crop");
        }
        tracing::info!(
            serial = %config.serial_number,
            width,
            height,
            fps,
            rotation = config.rotation,
            "opening camera"
        );

        let driver = Self {
            session,
            features: GenicamFeatures::new(fps),
            geometry: Mutex::new((width, height)),
            rotation: config.rotation,
        };

        let session = driver.session.as_ref();
        driver
            .features
            .write_parameter(session, "AcquisitionFrameRateEnable", ParamValue::Bool(true))?;
        driver
            .features
            .write_parameter(session, "BslScalingEnable", ParamValue::Bool(true))?;
        driver.apply_resolution(width, height)?;
        // Keep the exposure loop manual until the caller asks otherwise.
        driver
            .features
            .set_active(session, CameraFeature::Exposure, false)?;
        driver.features.set_frame_rate(session, fps)?;

        driver.session.start_grabbing()?;
        tracing::debug!(fps = driver.features.frame_rate(), "camera started");
        Ok(driver)
    }

    /// Begin frame delivery. No-op when already grabbing.
    pub fn start(&self) -> GrabResult<()> {
        Ok(self.session.start_grabbing()?)
    }

    /// Halt frame delivery. No-op when already stopped.
    pub fn stop(&self) -> GrabResult<()> {
        Ok(self.session.stop_grabbing()?)
    }

    /// Stop grabbing before the session goes back to its owner.
    pub fn close(&self) -> GrabResult<()> {
        tracing::info!("closing camera");
        self.stop()
    }

    /// Whether the device is currently delivering frames.
    pub fn is_grabbing(&self) -> bool {
        self.session.is_grabbing()
    }

    /// Rotation the hosting pipeline applies to delivered images, degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    fn apply_resolution(&self, width: u32, height: u32) -> GrabResult<()> {
        if width == 0 || height == 0 {
            return Err(GrabberError::Configuration(
                "camera resolution must be non-zero".into(),
            ));
        }
        let session = self.session.as_ref();
        self.features
            .write_parameter(session, "Width", ParamValue::Integer(i64::from(width)))?;
        self.features
            .write_parameter(session, "Height", ParamValue::Integer(i64::from(height)))?;
        *self.geometry.lock() = (width, height);
        Ok(())
    }
}

impl FeatureControl for GenicamDriver {
    fn has_feature(&self, feature: CameraFeature) -> bool {
        self.features.has_feature(feature)
    }

    fn has_auto(&self, feature: CameraFeature) -> bool {
        self.features.has_auto(feature)
    }

    fn has_manual(&self, feature: CameraFeature) -> bool {
        self.features.has_manual(feature)
    }

    fn has_one_push(&self, feature: CameraFeature) -> bool {
        self.features.has_one_push(feature)
    }

    fn has_on_off(&self, feature: CameraFeature) -> bool {
        self.features.has_on_off(feature)
    }

    fn value(&self, feature: CameraFeature) -> GrabResult<f64> {
        self.features.value(self.session.as_ref(), feature)
    }

    fn set_value(&self, feature: CameraFeature, value: f64) -> GrabResult<()> {
        self.features.set_value(self.session.as_ref(), feature, value)
    }

    fn value_pair(&self, feature: CameraFeature) -> GrabResult<(f64, f64)> {
        self.features.value_pair(self.session.as_ref(), feature)
    }

    fn set_value_pair(&self, feature: CameraFeature, v1: f64, v2: f64) -> GrabResult<()> {
        self.features
            .set_value_pair(self.session.as_ref(), feature, v1, v2)
    }

    fn active(&self, feature: CameraFeature) -> GrabResult<bool> {
        self.features.active(self.session.as_ref(), feature)
    }

    fn set_active(&self, feature: CameraFeature, on: bool) -> GrabResult<()> {
        self.features.set_active(self.session.as_ref(), feature, on)
    }

    fn mode(&self, feature: CameraFeature) -> GrabResult<FeatureMode> {
        self.features.mode(self.session.as_ref(), feature)
    }

    fn set_mode(&self, feature: CameraFeature, mode: FeatureMode) -> GrabResult<()> {
        self.features.set_mode(self.session.as_ref(), feature, mode)
    }

    fn one_push(&self, feature: CameraFeature) -> GrabResult<()> {
        self.features.one_push(self.session.as_ref(), feature)
    }
}

impl ResolutionControl for GenicamDriver {
    fn resolution(&self) -> (u32, u32) {
        *self.geometry.lock()
    }

    fn set_resolution(&self, width: u32, height: u32) -> GrabResult<()> {
        self.apply_resolution(width, height)
    }
}
