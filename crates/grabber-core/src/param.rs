//! Named-parameter value type exchanged with the acquisition session.
//!
//! Vendor node maps are typed; the session protocol carries the type as a
//! runtime kind tag instead of a compile-time switch. Enumeration nodes carry
//! their symbolic entry name (e.g. `"Continuous"`), distinct from free-form
//! string nodes.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};

/// Native type of a device parameter node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Float,
    Bool,
    Integer,
    Enumeration,
    String,
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    Float(f64),
    Bool(bool),
    Integer(i64),
    Enumeration(String),
    String(String),
}

impl ParamValue {
    /// Kind tag of this value.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Integer(_) => ParamKind::Integer,
            ParamValue::Enumeration(_) => ParamKind::Enumeration,
            ParamValue::String(_) => ParamKind::String,
        }
    }

    /// Extract a float, or fail with a type-mismatch session error naming
    /// the parameter.
    pub fn expect_float(self, parameter: &str) -> Result<f64, SessionError> {
        match self {
            ParamValue::Float(v) => Ok(v),
            other => Err(SessionError::type_mismatch(
                parameter,
                format!("expected a float node, got {:?}", other.kind()),
            )),
        }
    }

    /// Extract an enumeration entry name, or fail with a type-mismatch
    /// session error naming the parameter.
    pub fn expect_enumeration(self, parameter: &str) -> Result<String, SessionError> {
        match self {
            ParamValue::Enumeration(v) => Ok(v),
            other => Err(SessionError::type_mismatch(
                parameter,
                format!("expected an enumeration node, got {:?}", other.kind()),
            )),
        }
    }

    /// Extract an integer, or fail with a type-mismatch session error.
    pub fn expect_integer(self, parameter: &str) -> Result<i64, SessionError> {
        match self {
            ParamValue::Integer(v) => Ok(v),
            other => Err(SessionError::type_mismatch(
                parameter,
                format!("expected an integer node, got {:?}", other.kind()),
            )),
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Integer(v) => write!(f, "{}", v),
            ParamValue::Enumeration(v) | ParamValue::String(v) => write!(f, "{}", v),
        }
    }
}
