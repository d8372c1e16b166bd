//! Error types shared by the frame-grabber driver stack.
//!
//! Two layers of errors exist:
//!
//! - [`SessionError`] is raised by the acquisition-session collaborator for
//!   anything the device or its node map rejects (unknown parameter, type
//!   mismatch, device/communication faults).
//! - [`GrabberError`] is the driver-level error returned to callers of the
//!   control surface. Cheap local checks (unsupported feature, wrong arity)
//!   are reported here before any session interaction; session failures are
//!   wrapped via `#[from]`.

use crate::feature::CameraFeature;
use thiserror::Error;

// =============================================================================
// Session Errors
// =============================================================================

/// Classification of a session-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    /// The parameter name is unknown to the device node map.
    UnknownParameter,
    /// The requested kind does not match the node's native type.
    TypeMismatch,
    /// The device rejected the operation.
    Device,
    /// Transport-level failure talking to the device.
    Communication,
    /// The device did not answer in time.
    Timeout,
}

impl std::fmt::Display for SessionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SessionErrorKind::UnknownParameter => "unknown_parameter",
            SessionErrorKind::TypeMismatch => "type_mismatch",
            SessionErrorKind::Device => "device",
            SessionErrorKind::Communication => "communication",
            SessionErrorKind::Timeout => "timeout",
        };
        write!(f, "{}", label)
    }
}

/// Failure reported by the acquisition session for a named-parameter
/// operation or a grab-state transition.
#[derive(Error, Debug, Clone)]
#[error("session {kind} error on '{parameter}': {message}")]
pub struct SessionError {
    /// Parameter name the operation targeted (empty for grab-state calls).
    pub parameter: String,
    /// Failure classification.
    pub kind: SessionErrorKind,
    /// Diagnostic text, for logs only.
    pub message: String,
}

impl SessionError {
    pub fn new(
        parameter: impl Into<String>,
        kind: SessionErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a type-mismatch failure on `parameter`.
    pub fn type_mismatch(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(parameter, SessionErrorKind::TypeMismatch, message)
    }

    /// Shorthand for an unknown-parameter failure.
    pub fn unknown_parameter(parameter: impl Into<String>) -> Self {
        Self::new(
            parameter,
            SessionErrorKind::UnknownParameter,
            "no such node in the device node map",
        )
    }
}

// =============================================================================
// Driver Errors
// =============================================================================

/// Convenience alias for results using the driver error type.
pub type GrabResult<T> = std::result::Result<T, GrabberError>;

/// Error type for the frame-grabber control surface.
///
/// Unsupported-feature and wrong-arity errors are detected locally, before
/// any session interaction, and therefore never leave acquisition paused.
#[derive(Error, Debug)]
pub enum GrabberError {
    /// A feature identifier outside the enumerated range was supplied.
    #[error("feature id {0} is outside the known feature range")]
    UnknownFeature(i32),

    /// The feature exists but this camera family does not support it.
    #[error("feature {0} is not supported")]
    Unsupported(CameraFeature),

    /// The feature has no automatic mode, so on/off, auto/manual and
    /// one-push operations do not apply.
    #[error("feature {0} has no automatic mode")]
    NoAutoMode(CameraFeature),

    /// A single-value accessor was used on a two-value feature.
    #[error("feature {0} carries two values; use the paired accessors")]
    TwoValued(CameraFeature),

    /// A paired accessor was used on a single-value feature.
    #[error("feature {0} carries a single value")]
    SingleValued(CameraFeature),

    /// Driver configuration was rejected at open time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The underlying session reported a failure.
    #[error(transparent)]
    Session(#[from] SessionError),
}
