//! In-memory acquisition session for tests and hardware-free development.
//!
//! Behaves like a real GenICam node map as far as the driver can tell:
//! unknown names and wrong kinds are rejected, `BalanceRatio` resolves
//! through the current `BalanceRatioSelector` to distinct blue/red cells, and
//! grab-state transitions are idempotent. Every call is recorded so tests can
//! assert interaction order (or its absence), and individual parameters can
//! be armed to fail their writes.

use grabber_core::{CameraSession, ParamKind, ParamValue, SessionError, SessionErrorKind};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// One observed session interaction, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Stop,
    Get(String),
    Set(String),
}

#[derive(Debug, Default)]
struct MockState {
    grabbing: bool,
    nodes: HashMap<String, ParamValue>,
    failing_writes: HashSet<String>,
    events: Vec<SessionEvent>,
}

/// Scriptable stand-in for a live camera session.
pub struct MockSession {
    state: Mutex<MockState>,
}

impl MockSession {
    /// A session with the node table of a freshly opened camera, not
    /// grabbing.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        let mut insert = |name: &str, value: ParamValue| {
            nodes.insert(name.to_string(), value);
        };

        insert("BslBrightness", ParamValue::Float(0.0));
        insert("ExposureTime", ParamValue::Float(5000.0));
        insert("BslSharpnessEnhancement", ParamValue::Float(0.0));
        insert("Gain", ParamValue::Float(0.0));
        insert("AcquisitionFrameRate", ParamValue::Float(30.0));
        insert("AcquisitionFrameRateEnable", ParamValue::Bool(false));
        insert("BslScalingEnable", ParamValue::Bool(false));
        insert("ExposureAuto", ParamValue::Enumeration("Off".into()));
        insert("BalanceWhiteAuto", ParamValue::Enumeration("Off".into()));
        insert("GainAuto", ParamValue::Enumeration("Off".into()));
        insert("BalanceRatioSelector", ParamValue::Enumeration("Blue".into()));
        insert("BalanceRatio.Blue", ParamValue::Float(1.0));
        insert("BalanceRatio.Red", ParamValue::Float(1.0));
        insert("Width", ParamValue::Integer(640));
        insert("Height", ParamValue::Integer(480));

        Self {
            state: Mutex::new(MockState {
                grabbing: false,
                nodes,
                failing_writes: HashSet::new(),
                events: Vec::new(),
            }),
        }
    }

    /// Override (or add) a node before handing the session to the driver.
    #[must_use]
    pub fn with_parameter(self, name: &str, value: ParamValue) -> Self {
        self.state.lock().nodes.insert(name.to_string(), value);
        self
    }

    /// Arm writes to `name` to fail with a device error.
    pub fn fail_writes_to(&self, name: &str) {
        self.state.lock().failing_writes.insert(name.to_string());
    }

    /// Snapshot of the recorded interactions, in call order.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.state.lock().events.clone()
    }

    /// Forget the interactions recorded so far.
    pub fn clear_events(&self) {
        self.state.lock().events.clear();
    }

    /// Peek a node by storage key. The selector-dependent balance cells live
    /// under `BalanceRatio.Blue` and `BalanceRatio.Red`.
    pub fn parameter_value(&self, name: &str) -> Option<ParamValue> {
        self.state.lock().nodes.get(name).cloned()
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

/// `BalanceRatio` addresses a different cell depending on the selector.
fn storage_key(state: &MockState, name: &str) -> String {
    if name == "BalanceRatio" {
        let channel = match state.nodes.get("BalanceRatioSelector") {
            Some(ParamValue::Enumeration(channel)) => channel.clone(),
            _ => "Blue".to_string(),
        };
        format!("BalanceRatio.{channel}")
    } else {
        name.to_string()
    }
}

impl CameraSession for MockSession {
    fn is_grabbing(&self) -> bool {
        self.state.lock().grabbing
    }

    fn start_grabbing(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.events.push(SessionEvent::Start);
        state.grabbing = true;
        Ok(())
    }

    fn stop_grabbing(&self) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.events.push(SessionEvent::Stop);
        state.grabbing = false;
        Ok(())
    }

    fn parameter(&self, name: &str, kind: ParamKind) -> Result<ParamValue, SessionError> {
        let mut state = self.state.lock();
        state.events.push(SessionEvent::Get(name.to_string()));
        let key = storage_key(&state, name);
        let value = state
            .nodes
            .get(&key)
            .cloned()
            .ok_or_else(|| SessionError::unknown_parameter(name))?;
        if value.kind() != kind {
            return Err(SessionError::type_mismatch(
                name,
                format!("node is {:?}, requested {:?}", value.kind(), kind),
            ));
        }
        Ok(value)
    }

    fn set_parameter(&self, name: &str, value: ParamValue) -> Result<(), SessionError> {
        let mut state = self.state.lock();
        state.events.push(SessionEvent::Set(name.to_string()));
        if state.failing_writes.contains(name) {
            return Err(SessionError::new(
                name,
                SessionErrorKind::Device,
                "injected write failure",
            ));
        }
        let key = storage_key(&state, name);
        let Some(existing) = state.nodes.get(&key) else {
            return Err(SessionError::unknown_parameter(name));
        };
        if existing.kind() != value.kind() {
            return Err(SessionError::type_mismatch(
                name,
                format!("node is {:?}, got {:?}", existing.kind(), value.kind()),
            ));
        }
        state.nodes.insert(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_node_is_rejected() {
        let session = MockSession::new();
        let err = session.parameter("Bogus", ParamKind::Float).unwrap_err();
        assert_eq!(err.kind, SessionErrorKind::UnknownParameter);
    }

    #[test]
    fn kind_mismatch_is_rejected_both_ways() {
        let session = MockSession::new();
        assert!(session.parameter("Gain", ParamKind::Bool).is_err());
        assert!(session
            .set_parameter("Gain", ParamValue::Bool(true))
            .is_err());
    }

    #[test]
    fn balance_ratio_follows_the_selector() {
        let session = MockSession::new();
        session
            .set_parameter("BalanceRatio", ParamValue::Float(2.0))
            .unwrap();
        session
            .set_parameter("BalanceRatioSelector", ParamValue::Enumeration("Red".into()))
            .unwrap();
        session
            .set_parameter("BalanceRatio", ParamValue::Float(3.0))
            .unwrap();

        assert_eq!(
            session.parameter_value("BalanceRatio.Blue"),
            Some(ParamValue::Float(2.0))
        );
        assert_eq!(
            session.parameter_value("BalanceRatio.Red"),
            Some(ParamValue::Float(3.0))
        );
    }

    #[test]
    fn grab_state_transitions_are_idempotent() {
        let session = MockSession::new();
        assert!(!session.is_grabbing());
        session.start_grabbing().unwrap();
        session.start_grabbing().unwrap();
        assert!(session.is_grabbing());
        session.stop_grabbing().unwrap();
        assert!(!session.is_grabbing());
    }
}
