//! Capability traits for the caller-facing driver surface.
//!
//! Devices implement the capabilities they actually support instead of one
//! monolithic camera trait. The hosting adapter programs against these trait
//! bounds and stays driver-agnostic.
//!
//! # Design
//!
//! Each capability trait:
//! - is synchronous and blocking (the session protocol underneath blocks on
//!   hardware I/O),
//! - is thread-safe (requires `Send + Sync`),
//! - uses [`GrabResult`] for fallible operations,
//! - focuses on one concern.

use crate::error::GrabResult;
use crate::feature::{CameraFeature, FeatureMode};

/// Capability: normalized feature control.
///
/// Feature values cross this boundary normalized to `[0, 1]`; the driver owns
/// the mapping to vendor units. White balance is the one two-value feature
/// (blue ratio, red ratio — green is fixed) and is only reachable through the
/// paired accessors.
///
/// # Contract
///
/// - The `has_*` queries are pure and never touch the device.
/// - Mutating calls on unsupported features fail without any session
///   interaction.
/// - Any parameter write pauses acquisition for its duration and acquisition
///   is running again by the time the call returns, whether or not the write
///   succeeded.
pub trait FeatureControl: Send + Sync {
    /// Whether this camera family supports the feature at all.
    fn has_feature(&self, feature: CameraFeature) -> bool;

    /// Whether the feature has an automatic control loop.
    fn has_auto(&self, feature: CameraFeature) -> bool;

    /// Whether the feature can be driven manually. Equivalent to
    /// [`FeatureControl::has_feature`].
    fn has_manual(&self, feature: CameraFeature) -> bool;

    /// Whether the feature supports a one-shot auto measurement. Only
    /// meaningful where an automatic mode exists.
    fn has_one_push(&self, feature: CameraFeature) -> bool;

    /// Whether the feature's control loop can be toggled on and off. The
    /// toggle *is* the auto/manual switch.
    fn has_on_off(&self, feature: CameraFeature) -> bool;

    /// Read a single-value feature, normalized to `[0, 1]`.
    fn value(&self, feature: CameraFeature) -> GrabResult<f64>;

    /// Write a single-value feature from a normalized `[0, 1]` value.
    fn set_value(&self, feature: CameraFeature, value: f64) -> GrabResult<()>;

    /// Read a two-value feature (white balance: blue, red).
    fn value_pair(&self, feature: CameraFeature) -> GrabResult<(f64, f64)>;

    /// Write a two-value feature (white balance: blue, red).
    fn set_value_pair(&self, feature: CameraFeature, v1: f64, v2: f64) -> GrabResult<()>;

    /// Whether the feature's automatic loop is currently engaged.
    fn active(&self, feature: CameraFeature) -> GrabResult<bool>;

    /// Engage or release the feature's automatic loop.
    fn set_active(&self, feature: CameraFeature, on: bool) -> GrabResult<()>;

    /// Current auto/manual mode of the feature.
    fn mode(&self, feature: CameraFeature) -> GrabResult<FeatureMode>;

    /// Switch the feature between auto and manual.
    fn set_mode(&self, feature: CameraFeature, mode: FeatureMode) -> GrabResult<()>;

    /// Pulse the automatic loop once: auto on, then immediately back to
    /// manual. No convergence wait is performed.
    fn one_push(&self, feature: CameraFeature) -> GrabResult<()>;
}

/// Capability: sensor output geometry.
pub trait ResolutionControl: Send + Sync {
    /// Current output resolution as (width, height) in pixels.
    fn resolution(&self) -> (u32, u32);

    /// Request a new output resolution. Zero dimensions are rejected.
    fn set_resolution(&self, width: u32, height: u32) -> GrabResult<()>;
}
