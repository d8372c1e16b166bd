//! Acquisition-state handling around device reconfiguration.
//!
//! The camera rejects parameter writes while it is delivering frames, so
//! every write is bracketed: stop grabbing, write, start grabbing. The
//! restart must happen on every exit path — a mediator call must never
//! return with acquisition left paused — which is what [`ResumeGuard`]
//! guarantees.

use grabber_core::{CameraSession, GrabResult, ParamValue};

/// Restarts acquisition when dropped.
///
/// A resume failure cannot be propagated out of `Drop`; it is logged and the
/// original error (if any) stays the one the caller sees.
pub(crate) struct ResumeGuard<'a> {
    session: &'a dyn CameraSession,
}

impl<'a> ResumeGuard<'a> {
    pub(crate) fn new(session: &'a dyn CameraSession) -> Self {
        Self { session }
    }
}

impl Drop for ResumeGuard<'_> {
    fn drop(&mut self) {
        if let Err(error) = self.session.start_grabbing() {
            tracing::error!(%error, "failed to resume acquisition after a parameter write");
        }
    }
}

/// Write a named parameter with acquisition quiesced.
///
/// Callers are responsible for serializing concurrent writers; this function
/// only handles the stop → write → start sequence.
pub(crate) fn write_quiesced(
    session: &dyn CameraSession,
    name: &str,
    value: ParamValue,
) -> GrabResult<()> {
    let _resume = ResumeGuard::new(session);
    session.stop_grabbing()?;
    tracing::debug!(parameter = name, value = %value, "writing camera parameter");
    session.set_parameter(name, value)?;
    Ok(())
}
