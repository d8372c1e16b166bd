//! `grabber-core`
//!
//! Core trait definitions and types for the frame-grabber driver stack.
//!
//! This crate provides the shared vocabulary between camera drivers and the
//! hosting adapter: the logical feature enumeration and its normalized-range
//! mapping, the typed named-parameter value exchanged with an acquisition
//! session, the session collaborator trait itself, the caller-facing
//! capability traits, and the error hierarchy.
//!
//! Driver crates depend only on this crate; the hosting adapter depends on
//! drivers through the capability traits defined here.
//!
//! ## Key Types
//!
//! - [`CameraFeature`] / [`FeatureMode`]: the logical feature protocol
//! - [`FeatureRange`]: affine mapping between `[0, 1]` and vendor units
//! - [`ParamValue`] / [`ParamKind`]: typed named-parameter values
//! - [`CameraSession`]: the acquisition-session collaborator
//! - [`FeatureControl`] / [`ResolutionControl`]: capability seams
//! - [`GrabberError`] / [`SessionError`]: the error hierarchy

pub mod capabilities;
pub mod error;
pub mod feature;
pub mod param;
pub mod session;

pub use capabilities::{FeatureControl, ResolutionControl};
pub use error::{GrabResult, GrabberError, SessionError, SessionErrorKind};
pub use feature::{CameraFeature, FeatureMode, FeatureRange, ALL_FEATURES};
pub use param::{ParamKind, ParamValue};
pub use session::CameraSession;
