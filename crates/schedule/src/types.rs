//! Core types for the emission schedule
//!
//! Defines destination pools, temporal and monetary units, and the
//! authority identifier used to gate output-rate changes.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Schedule timestamp in whole seconds (monotonically non-decreasing per state)
pub type Timestamp = u64;

/// Exact decimal mint amount, before settlement to integer token units.
///
/// All accrual arithmetic runs on [`Decimal`] so results are bit-reproducible
/// across platforms; binary floating point never touches value-bearing math.
pub type MintAmount = Decimal;

/// Destination bucket for a fraction of minted emission.
///
/// The set of pools is fixed at compile time; every phase's share map must
/// cover all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pool {
    /// Unallocated remainder, typically carrying a zero share
    Reserve,
    /// Main staking/distribution pool
    Primary,
    /// Bonus reward pool
    Bonus,
    /// Team allocation
    Team,
    /// Partner/ecosystem allocation
    Partner,
}

impl Pool {
    /// Every known pool, in declaration order. Share maps are validated
    /// against this list.
    pub const ALL: [Pool; 5] = [
        Pool::Reserve,
        Pool::Primary,
        Pool::Bonus,
        Pool::Team,
        Pool::Partner,
    ];
}

/// Identity of the party allowed to mutate the schedule's output rate.
///
/// Opaque to this crate; the host decides what it encodes (a public key,
/// an account address, a registry alias).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorityId(pub String);

impl AuthorityId {
    /// Create a new AuthorityId from string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthorityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settle an exact decimal mint amount to integer token units.
///
/// Rounding rule: truncate toward zero, applied once per `advance` result by
/// the caller. Negative amounts cannot occur by construction and settle to 0.
pub fn floor_to_units(amount: MintAmount) -> u128 {
    amount.trunc().to_u128().unwrap_or(0)
}
