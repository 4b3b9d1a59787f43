//! # Placeholder Codec (Phase 1)
//!
//! A reversible, deterministic structural encoding with **no cryptographic
//! confidentiality**. The payload is the hex encoding of the plaintext's
//! canonical decimal rendering — transparent to anyone who looks.
//!
//! It exists to pin down the codec contract so a real homomorphic backend
//! can replace it without touching any caller: round-trip exactness,
//! injectivity per kind (canonical decimal has no leading zeros, so two
//! distinct values never share a payload), and fail-closed decoding.
//!
//! ## Security Warning
//!
//! **NOT CONFIDENTIAL.** Do not deploy this backend anywhere sealed values
//! must actually resist inspection.

use cbf_core::{AddressId, RateBps};

use crate::error::CodecError;
use crate::sealed::{decode_hex, encode_hex, SealKind, SealedValue};
use crate::ConfidentialCodec;

/// Scheme tag stamped on every sealed value this backend produces.
pub const PLACEHOLDER_SCHEME: &str = "placeholder-v1";

/// The Phase 1 structural codec backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderCodec;

impl PlaceholderCodec {
    /// Seal an arbitrary scalar under the given kind tag.
    fn seal_scalar(&self, kind: SealKind, value: u64) -> SealedValue {
        // Canonical decimal rendering: injective on u64, no leading zeros.
        let payload = encode_hex(value.to_string().as_bytes());
        SealedValue::new(PLACEHOLDER_SCHEME, kind, payload)
    }

    /// Recover the scalar from a sealed value, enforcing scheme, kind, and
    /// canonical-form checks. Every failure is a typed malformation — the
    /// decode never falls back to a default.
    fn unseal_scalar(&self, sealed: &SealedValue, expected: SealKind) -> Result<u64, CodecError> {
        if sealed.scheme != PLACEHOLDER_SCHEME {
            return Err(CodecError::malformed(
                expected,
                format!("foreign scheme {:?}", sealed.scheme),
            ));
        }
        if sealed.kind != expected {
            return Err(CodecError::malformed(
                expected,
                format!("kind tag is {}", sealed.kind),
            ));
        }
        let bytes = decode_hex(&sealed.payload)
            .ok_or_else(|| CodecError::malformed(expected, "payload is not hex"))?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| CodecError::malformed(expected, "payload is not UTF-8"))?;
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::malformed(expected, "payload is not decimal"));
        }
        if text.len() > 1 && text.starts_with('0') {
            // Non-canonical renderings would break injectivity.
            return Err(CodecError::malformed(expected, "non-canonical decimal"));
        }
        text.parse::<u64>()
            .map_err(|_| CodecError::malformed(expected, "value exceeds u64"))
    }
}

impl ConfidentialCodec for PlaceholderCodec {
    fn seal_amount(&self, value: u64) -> SealedValue {
        self.seal_scalar(SealKind::Amount, value)
    }

    fn seal_rate(&self, rate: RateBps) -> SealedValue {
        self.seal_scalar(SealKind::Rate, u64::from(rate.as_bps()))
    }

    fn seal_identity(&self, address: &AddressId) -> SealedValue {
        self.seal_scalar(SealKind::Identity, u64::from(address.identity_fragment()))
    }

    fn seal_flag(&self, flag: bool) -> SealedValue {
        self.seal_scalar(SealKind::Flag, u64::from(flag))
    }

    fn unseal_amount(&self, sealed: &SealedValue) -> Result<u64, CodecError> {
        self.unseal_scalar(sealed, SealKind::Amount)
    }

    fn unseal_rate(&self, sealed: &SealedValue) -> Result<RateBps, CodecError> {
        let raw = self.unseal_scalar(sealed, SealKind::Rate)?;
        let bps = u32::try_from(raw)
            .map_err(|_| CodecError::malformed(SealKind::Rate, "rate exceeds u32"))?;
        RateBps::new(bps)
            .map_err(|e| CodecError::malformed(SealKind::Rate, e.to_string()))
    }

    fn unseal_identity(&self, sealed: &SealedValue) -> Result<u32, CodecError> {
        let raw = self.unseal_scalar(sealed, SealKind::Identity)?;
        u32::try_from(raw)
            .map_err(|_| CodecError::malformed(SealKind::Identity, "fragment exceeds u32"))
    }

    fn unseal_flag(&self, sealed: &SealedValue) -> Result<bool, CodecError> {
        match self.unseal_scalar(sealed, SealKind::Flag)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::malformed(
                SealKind::Flag,
                format!("flag payload is {other}, expected 0 or 1"),
            )),
        }
    }

    fn validate(&self, sealed: &SealedValue) -> bool {
        self.unseal_scalar(sealed, sealed.kind).is_ok()
    }
}
