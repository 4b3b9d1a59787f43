//! # Canonical JSON Bytes
//!
//! Deterministic serialization for digest and proof input. Two structurally
//! equal values always canonicalize to the same bytes: object keys are
//! sorted, separators are compact, and floating-point numbers are rejected
//! outright (every numeric field in this system is a fixed-width integer).
//!
//! Proofs and digests accept only [`CanonicalBytes`], never raw `&[u8]` —
//! the type is the evidence that canonicalization happened.

use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;

/// Canonicalized JSON bytes: sorted keys, compact separators, no floats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    pub fn new<T: Serialize>(value: &T) -> Result<Self, ValidationError> {
        let json = serde_json::to_value(value)
            .map_err(|e| ValidationError::Serialization(e.to_string()))?;
        Self::from_value(json)
    }

    /// Canonicalize an already-built JSON value.
    ///
    /// `serde_json::Value` objects iterate in sorted key order (BTreeMap
    /// backing), so serializing the value tree yields sorted-key output.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        reject_floats(&value, "$")?;
        let bytes = serde_json::to_vec(&value)
            .map_err(|e| ValidationError::Serialization(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// The canonical byte representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Walk a JSON value and reject any float, recording the path for the error.
fn reject_floats(value: &Value, path: &str) -> Result<(), ValidationError> {
    match value {
        Value::Number(n) if n.is_f64() => Err(ValidationError::NonCanonicalFloat {
            context: format!("{path} = {n}"),
        }),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                reject_floats(item, &format!("{path}[{i}]"))?;
            }
            Ok(())
        }
        Value::Object(map) => {
            for (key, item) in map {
                reject_floats(item, &format!("{path}.{key}"))?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
