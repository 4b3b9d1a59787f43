//! # Fixed-Point Units
//!
//! Interest rates and percentages are fixed-point integers, never floats.
//! [`RateBps`] carries basis points: 1 bp = 0.01%, so 100% == 10_000 bps.
//! The scale factor is part of the wire contract — both sides of the
//! confidential boundary agree on it, and no precision drifts in transit.
//!
//! Amounts are plain `u64` base units; the checked-arithmetic helpers here
//! keep overflow explicit instead of wrapping.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum representable rate: 500% in basis points. Rates above this are
/// construction errors — no bond in this system pays more.
pub const MAX_RATE_BPS: u32 = 50_000;

/// An interest rate in basis points (fixed-point, scale factor 10_000).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RateBps(u32);

impl RateBps {
    /// Construct a rate, rejecting values above [`MAX_RATE_BPS`].
    pub fn new(bps: u32) -> Result<Self, ValidationError> {
        if bps > MAX_RATE_BPS {
            return Err(ValidationError::RateOutOfRange {
                bps,
                max: MAX_RATE_BPS,
            });
        }
        Ok(Self(bps))
    }

    /// The raw basis-point value.
    pub fn as_bps(&self) -> u32 {
        self.0
    }

    /// Whole-percent and remainder-bps parts, for display.
    pub fn as_percent_parts(&self) -> (u32, u32) {
        (self.0 / 100, self.0 % 100)
    }
}

impl<'de> Deserialize<'de> for RateBps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u32::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for RateBps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (pct, rem) = self.as_percent_parts();
        write!(f, "{pct}.{rem:02}%")
    }
}

/// Checked addition of two amounts. Overflow is an error, never a wrap.
pub fn checked_amount_add(a: u64, b: u64) -> Result<u64, ValidationError> {
    a.checked_add(b).ok_or_else(|| {
        ValidationError::Serialization(format!("amount overflow: {a} + {b} exceeds u64"))
    })
}
