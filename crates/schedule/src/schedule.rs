//! Schedule definition and output-rate governance
//!
//! The phase sequence is agreed at deployment time and never mutated; the
//! only runtime-adjustable knob is the global output rate, gated to a single
//! authority.

use crate::errors::ScheduleError;
use crate::phase::PhaseDescriptor;
use crate::state::ProgressState;
use crate::types::AuthorityId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Immutable emission curve plus the one mutable field: the output rate.
///
/// The output rate is a global throttle ≤ 1 applied uniformly to all
/// emission, independent of phase (e.g. because minting is split across
/// multiple ledgers).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    phases: Vec<PhaseDescriptor>,
    output_rate: Decimal,
    authority: AuthorityId,
}

impl ScheduleDefinition {
    /// Validate and freeze a phase sequence.
    ///
    /// Rejects degenerate phases (see [`PhaseDescriptor`] validation) and any
    /// phase placed after a terminal one, since it could never be reached.
    pub fn new(
        phases: Vec<PhaseDescriptor>,
        authority: AuthorityId,
    ) -> Result<Self, ScheduleError> {
        for (index, phase) in phases.iter().enumerate() {
            phase.validate(index)?;
            if phase.terminal && index + 1 < phases.len() {
                return Err(ScheduleError::MisconfiguredSchedule(format!(
                    "phase {index} is terminal but {} phase(s) follow it",
                    phases.len() - index - 1
                )));
            }
            if !phase.terminal && phase.cycles_count == 0 && index + 1 < phases.len() {
                // Legal (the phase cycles forever) but later phases can
                // never be reached.
                warn!(
                    phase = index,
                    "phase has cycles_count == 0; following phases are unreachable"
                );
            }
        }
        Ok(Self {
            phases,
            output_rate: Decimal::ONE,
            authority,
        })
    }

    /// Replace the global output rate.
    ///
    /// Only the designated authority may call this; rates above 1 are
    /// rejected. On failure the current rate is left untouched.
    pub fn set_output_rate(
        &mut self,
        caller: &AuthorityId,
        rate: Decimal,
    ) -> Result<(), ScheduleError> {
        if caller != &self.authority {
            return Err(ScheduleError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if rate > Decimal::ONE {
            return Err(ScheduleError::InvalidRate { rate });
        }
        info!(%rate, previous = %self.output_rate, "output rate updated");
        self.output_rate = rate;
        Ok(())
    }

    pub fn output_rate(&self) -> Decimal {
        self.output_rate
    }

    pub fn phases(&self) -> &[PhaseDescriptor] {
        &self.phases
    }

    pub fn phase(&self, index: usize) -> Option<&PhaseDescriptor> {
        self.phases.get(index)
    }

    /// True once a state has advanced past the last phase; every further
    /// `advance` call mints nothing.
    pub fn is_exhausted(&self, state: &ProgressState) -> bool {
        state.phase_index >= self.phases.len()
    }
}
