//! Per-pool progress state
//!
//! One `ProgressState` exists per tracked pool. It is the durable checkpoint
//! of how far emission accrual has advanced and the single source of truth
//! for "how much has already been minted". It is mutated exclusively by
//! [`crate::engine::advance`]; the host persists it between calls.

use crate::types::{Pool, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Durable emission-accrual checkpoint for one pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Pool this state integrates emission for; fixed for its lifetime.
    pub pool: Pool,
    /// Last second up to which emission has been accounted.
    pub time: Timestamp,
    /// Index into the schedule's phases. Equal to the phase count once the
    /// schedule is exhausted.
    pub phase_index: usize,
    /// Completed cycles within the current phase; resets to 0 on phase
    /// transition.
    pub cycle_index: u64,
    /// Second at which the current cycle began.
    pub cycle_start_time: Timestamp,
    /// Per-second base emission rate, before pool-share and output-rate
    /// scaling. Decays at every completed cycle boundary.
    pub next_tick_supply: Decimal,
}

impl ProgressState {
    /// Fresh state at the schedule origin (`time == cycle_start_time == 0`).
    pub fn new(pool: Pool, initial_tick_supply: Decimal) -> Self {
        Self::starting_at(pool, initial_tick_supply, 0)
    }

    /// Fresh state for a distribution that starts at a non-zero wall-clock
    /// second. The first cycle's clock begins at `start_time`.
    pub fn starting_at(pool: Pool, initial_tick_supply: Decimal, start_time: Timestamp) -> Self {
        Self {
            pool,
            time: start_time,
            phase_index: 0,
            cycle_index: 0,
            cycle_start_time: start_time,
            next_tick_supply: initial_tick_supply,
        }
    }
}
