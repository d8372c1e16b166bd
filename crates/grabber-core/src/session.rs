//! Acquisition-session collaborator trait.

use crate::error::SessionError;
use crate::param::{ParamKind, ParamValue};

/// Live handle to an open camera device, owned by the hosting layer.
///
/// The driver never owns the session; it borrows it for the duration of each
/// call. Opening the device happens before the driver is built and closing it
/// happens after the driver is dropped.
///
/// # Contract
///
/// - `start_grabbing` / `stop_grabbing` are idempotent: calling them in the
///   target state is a successful no-op.
/// - `parameter` / `set_parameter` address the device node map by name and
///   fail with [`SessionError`] when the name is unknown, the kind does not
///   match the node's native type, or the device rejects the operation.
/// - Implementations must be safe to call from multiple threads; the driver
///   serializes *writes* itself but does not exclude readers.
pub trait CameraSession: Send + Sync {
    /// Whether the device is currently delivering frames.
    fn is_grabbing(&self) -> bool;

    /// Begin frame delivery. No-op when already grabbing.
    fn start_grabbing(&self) -> Result<(), SessionError>;

    /// Halt frame delivery. No-op when already stopped.
    fn stop_grabbing(&self) -> Result<(), SessionError>;

    /// Read a named parameter, asking for its native kind.
    fn parameter(&self, name: &str, kind: ParamKind) -> Result<ParamValue, SessionError>;

    /// Write a named parameter. The value's kind must match the node.
    fn set_parameter(&self, name: &str, value: ParamValue) -> Result<(), SessionError>;
}
