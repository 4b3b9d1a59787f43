//! # Sealed Value Representation
//!
//! [`SealedValue`] is the opaque at-rest form of one sensitive scalar. It
//! carries a scheme tag (which backend produced it), a kind discriminant
//! (what domain the plaintext belongs to), and the encoded payload.
//!
//! The kind discriminant is deliberately public: it leaks only the field's
//! role (already evident from its position in an entity), never its value,
//! and it lets decoding reject kind confusion — an identity seal presented
//! where an amount is expected fails closed instead of yielding a number.
//!
//! Sealed values are immutable: an update produces a new [`SealedValue`],
//! never mutates one in place. Equality compares the full encoded form and
//! is used downstream only for duplicate-submission detection — business
//! logic always compares decoded scalars.

use serde::{Deserialize, Serialize};

/// The domain of a sealed plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SealKind {
    /// A monetary amount in base units.
    Amount,
    /// A fixed-point interest rate in basis points.
    Rate,
    /// A 32-bit identity fragment of an account address.
    Identity,
    /// A boolean flag encoded as 0 or 1.
    Flag,
}

impl SealKind {
    /// The canonical string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Rate => "rate",
            Self::Identity => "identity",
            Self::Flag => "flag",
        }
    }
}

impl std::fmt::Display for SealKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The opaque encoded form of one sensitive scalar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SealedValue {
    /// Which backend scheme produced this value, e.g. `"placeholder-v1"`.
    pub scheme: String,
    /// The plaintext domain.
    pub kind: SealKind,
    /// Hex-encoded payload. Interpretation belongs to the scheme.
    pub payload: String,
}

impl SealedValue {
    /// Assemble a sealed value. Only codec backends construct these.
    pub fn new(scheme: impl Into<String>, kind: SealKind, payload: String) -> Self {
        Self {
            scheme: scheme.into(),
            kind,
            payload,
        }
    }
}

/// Hex-encode raw bytes (lowercase).
pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode lowercase or uppercase hex into bytes. `None` on any malformation.
pub(crate) fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}
