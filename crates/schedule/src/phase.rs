//! Phase descriptors and per-pool share maps
//!
//! A phase is a contiguous span of the schedule with its own cycle length,
//! cycle count, decay factor, and pool-share split. Validation happens here,
//! once, at construction; the engine never re-checks.

use crate::errors::ScheduleError;
use crate::types::Pool;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Immutable share split across every known pool.
///
/// Construction fails fast on a missing pool or a negative share, so lookups
/// never have to handle an unmapped pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolShares(HashMap<Pool, Decimal>);

impl PoolShares {
    /// Validate and freeze a share map. Every member of [`Pool::ALL`] must be
    /// present with a non-negative share.
    pub fn new(shares: HashMap<Pool, Decimal>) -> Result<Self, ScheduleError> {
        for pool in Pool::ALL {
            match shares.get(&pool) {
                None => {
                    return Err(ScheduleError::MisconfiguredSchedule(format!(
                        "share map is missing pool {pool:?}"
                    )))
                }
                Some(share) if share.is_sign_negative() => {
                    return Err(ScheduleError::MisconfiguredSchedule(format!(
                        "share for pool {pool:?} is negative: {share}"
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(Self(shares))
    }

    /// Share fraction for a pool. Total coverage is guaranteed at
    /// construction, so this is infallible.
    pub fn share(&self, pool: Pool) -> Decimal {
        self.0[&pool]
    }
}

/// One phase of the emission schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseDescriptor {
    /// Length of one cycle in seconds. Must be > 0 unless the phase is
    /// terminal (a terminal phase has no cycle boundaries).
    pub cycle_duration_secs: u64,
    /// Number of cycles before transitioning to the next phase. 0 means the
    /// phase never transitions: it keeps cycling (and decaying) forever.
    pub cycles_count: u64,
    /// Multiplier applied to the base emission rate at the end of every
    /// completed cycle. Expected in (0, 1] to model decay; any non-negative
    /// value is accepted.
    pub decay_factor: Decimal,
    /// Share split for this phase.
    pub shares: PoolShares,
    /// A terminal phase bypasses cycle counting and decay entirely: accrual
    /// is linear at the current base rate, forever.
    pub terminal: bool,
}

impl PhaseDescriptor {
    pub fn new(
        cycle_duration_secs: u64,
        cycles_count: u64,
        decay_factor: Decimal,
        shares: PoolShares,
    ) -> Self {
        Self {
            cycle_duration_secs,
            cycles_count,
            decay_factor,
            shares,
            terminal: false,
        }
    }

    /// Mark this phase as terminal (linear accrual, no decay, no transition).
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }

    /// Construction-time validation. The engine relies on these invariants to
    /// guarantee termination of its integration loop.
    pub(crate) fn validate(&self, index: usize) -> Result<(), ScheduleError> {
        if !self.terminal && self.cycle_duration_secs == 0 {
            return Err(ScheduleError::MisconfiguredSchedule(format!(
                "phase {index} has cycle_duration_secs == 0; the advance loop could never progress"
            )));
        }
        if self.decay_factor.is_sign_negative() {
            return Err(ScheduleError::MisconfiguredSchedule(format!(
                "phase {index} has negative decay factor {}",
                self.decay_factor
            )));
        }
        if self.decay_factor > Decimal::ONE {
            // Legal, but almost certainly a typo in a decaying schedule.
            warn!(phase = index, decay = %self.decay_factor, "decay factor exceeds 1; emission rate will grow");
        }
        Ok(())
    }
}
