//! Schedule advancement engine
//!
//! Integrates emission forward in time for one pool, applying rate decay
//! exactly at cycle boundaries and transitioning phases deterministically.
//! The accounting must never double-count or skip a second: every second
//! between `state.time` and the requested time is accrued exactly once.

use crate::phase::PhaseDescriptor;
use crate::schedule::ScheduleDefinition;
use crate::state::ProgressState;
use crate::types::{MintAmount, Timestamp};
use rust_decimal::Decimal;
use tracing::debug;

/// Advance `state` from its last accounted second up to `target_time` and
/// return the exact amount minted for `state.pool` over that interval.
///
/// Pure computation: no I/O, no locking. The caller must serialize access
/// per pool; at most one mutator may run against a given `ProgressState` at
/// a time. Calling with `target_time <= state.time` is an idempotent no-op
/// returning zero, so stale or repeated clock reads never mint twice.
///
/// Termination is bounded by the number of cycle boundaries crossed plus
/// one: each loop iteration strictly advances `state.time` (schedule
/// validation rejects zero-length cycles on non-terminal phases).
pub fn advance(
    definition: &ScheduleDefinition,
    state: &mut ProgressState,
    target_time: Timestamp,
) -> MintAmount {
    if target_time <= state.time {
        return Decimal::ZERO;
    }

    let mut minted = Decimal::ZERO;
    while target_time > state.time {
        let Some(phase) = definition.phase(state.phase_index) else {
            // Schedule exhausted; remaining time mints nothing.
            break;
        };

        let boundary = if phase.terminal {
            // A terminal phase has no cycle end; accrue straight to target.
            target_time
        } else {
            target_time.min(state.cycle_start_time.saturating_add(phase.cycle_duration_secs))
        };

        let elapsed = Decimal::from(boundary - state.time);
        minted += elapsed
            * state.next_tick_supply
            * definition.output_rate()
            * phase.shares.share(state.pool);

        persist_state_change(state, phase, boundary);
    }
    minted
}

/// Apply the post-accrual state transition for the interval ending at
/// `boundary`.
///
/// Decay and cycle/phase bookkeeping happen if and only if `boundary` lands
/// exactly on the current cycle's end; a boundary strictly inside a cycle
/// only moves the clock. A phase whose `cycles_count` is 0 never satisfies
/// the transition test and keeps cycling (and decaying) forever.
fn persist_state_change(state: &mut ProgressState, phase: &PhaseDescriptor, boundary: Timestamp) {
    state.time = boundary;
    if phase.terminal {
        return;
    }
    if boundary == state.cycle_start_time.saturating_add(phase.cycle_duration_secs) {
        state.next_tick_supply *= phase.decay_factor;
        state.cycle_index += 1;
        state.cycle_start_time = boundary;
        debug!(
            phase = state.phase_index,
            cycle = state.cycle_index,
            tick_supply = %state.next_tick_supply,
            "cycle completed"
        );
        if state.cycle_index == phase.cycles_count {
            state.cycle_index = 0;
            state.phase_index += 1;
            debug!(phase = state.phase_index, at = boundary, "phase transition");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::{PhaseDescriptor, PoolShares};
    use crate::types::{AuthorityId, Pool};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn shares_for(primary: Decimal) -> PoolShares {
        let mut map: HashMap<Pool, Decimal> =
            Pool::ALL.iter().map(|p| (*p, Decimal::ZERO)).collect();
        map.insert(Pool::Primary, primary);
        PoolShares::new(map).unwrap()
    }

    fn single_phase_schedule() -> ScheduleDefinition {
        // duration 100, 2 cycles, halving decay, full share to Primary
        ScheduleDefinition::new(
            vec![PhaseDescriptor::new(100, 2, dec!(0.5), shares_for(dec!(1)))],
            AuthorityId::new("authority"),
        )
        .unwrap()
    }

    #[test]
    fn reference_scenario_half_way_into_second_cycle() {
        let def = single_phase_schedule();
        let mut state = ProgressState::new(Pool::Primary, dec!(10));

        let minted = advance(&def, &mut state, 150);

        // 100s at rate 10, then 50s at the decayed rate 5
        assert_eq!(minted, dec!(1250));
        assert_eq!(state.time, 150);
        assert_eq!(state.cycle_start_time, 100);
        assert_eq!(state.cycle_index, 1);
        assert_eq!(state.next_tick_supply, dec!(5));
        assert_eq!(state.phase_index, 0);
    }

    #[test]
    fn non_advancing_time_is_a_no_op() {
        let def = single_phase_schedule();
        let mut state = ProgressState::new(Pool::Primary, dec!(10));
        advance(&def, &mut state, 150);
        let snapshot = state.clone();

        assert_eq!(advance(&def, &mut state, 150), Decimal::ZERO);
        assert_eq!(advance(&def, &mut state, 149), Decimal::ZERO);
        assert_eq!(advance(&def, &mut state, 0), Decimal::ZERO);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn decay_applies_only_on_exact_cycle_end() {
        let def = single_phase_schedule();
        let mut state = ProgressState::new(Pool::Primary, dec!(10));

        advance(&def, &mut state, 99);
        assert_eq!(state.next_tick_supply, dec!(10));
        assert_eq!(state.cycle_index, 0);

        advance(&def, &mut state, 100);
        assert_eq!(state.next_tick_supply, dec!(5));
        assert_eq!(state.cycle_index, 1);
        assert_eq!(state.cycle_start_time, 100);
    }

    #[test]
    fn phase_transition_resets_cycle_index_and_inherits_rate() {
        let def = ScheduleDefinition::new(
            vec![
                PhaseDescriptor::new(100, 2, dec!(0.5), shares_for(dec!(1))),
                PhaseDescriptor::new(50, 2, dec!(0.5), shares_for(dec!(1))),
            ],
            AuthorityId::new("authority"),
        )
        .unwrap();
        let mut state = ProgressState::new(Pool::Primary, dec!(10));

        advance(&def, &mut state, 200);
        assert_eq!(state.phase_index, 1);
        assert_eq!(state.cycle_index, 0);
        assert_eq!(state.cycle_start_time, 200);
        // Second phase inherits the twice-decayed rate
        assert_eq!(state.next_tick_supply, dec!(2.5));
    }

    #[test]
    fn exhausted_schedule_mints_nothing_forever() {
        let def = single_phase_schedule();
        let mut state = ProgressState::new(Pool::Primary, dec!(10));

        // 2 cycles of 100s each: schedule ends at t = 200
        let total = advance(&def, &mut state, 200);
        assert_eq!(total, dec!(1500));
        assert!(def.is_exhausted(&state));

        let after = state.clone();
        assert_eq!(advance(&def, &mut state, 1_000_000), Decimal::ZERO);
        assert_eq!(state.time, after.time);
        assert_eq!(state.phase_index, after.phase_index);
    }

    #[test]
    fn output_rate_scales_linearly() {
        let mut throttled = single_phase_schedule();
        throttled
            .set_output_rate(&AuthorityId::new("authority"), dec!(0.5))
            .unwrap();
        let full = single_phase_schedule();

        let mut state_a = ProgressState::new(Pool::Primary, dec!(10));
        let mut state_b = ProgressState::new(Pool::Primary, dec!(10));

        let minted_full = advance(&full, &mut state_a, 150);
        let minted_half = advance(&throttled, &mut state_b, 150);

        assert_eq!(minted_half * dec!(2), minted_full);
        // Throttling scales the minted amount, never the decay bookkeeping.
        assert_eq!(state_a, state_b);
    }

    #[test]
    fn shares_split_single_second_across_pools() {
        let mut map: HashMap<Pool, Decimal> = HashMap::new();
        map.insert(Pool::Reserve, dec!(0));
        map.insert(Pool::Primary, dec!(0.72));
        map.insert(Pool::Bonus, dec!(0.08));
        map.insert(Pool::Team, dec!(0.2));
        map.insert(Pool::Partner, dec!(0));
        let def = ScheduleDefinition::new(
            vec![PhaseDescriptor::new(
                100,
                2,
                dec!(0.5),
                PoolShares::new(map).unwrap(),
            )],
            AuthorityId::new("authority"),
        )
        .unwrap();

        let expected = [
            (Pool::Reserve, dec!(0)),
            (Pool::Primary, dec!(720)),
            (Pool::Bonus, dec!(80)),
            (Pool::Team, dec!(200)),
            (Pool::Partner, dec!(0)),
        ];
        for (pool, amount) in expected {
            let mut state = ProgressState::new(pool, dec!(1000));
            assert_eq!(advance(&def, &mut state, 1), amount, "pool {pool:?}");
            assert_eq!(state.time, 1);
        }
    }

    #[test]
    fn zero_cycles_count_phase_cycles_forever_with_decay() {
        let def = ScheduleDefinition::new(
            vec![PhaseDescriptor::new(10, 0, dec!(0.5), shares_for(dec!(1)))],
            AuthorityId::new("authority"),
        )
        .unwrap();
        let mut state = ProgressState::new(Pool::Primary, dec!(8));

        // 3 full cycles: 10*8 + 10*4 + 10*2 = 140, never leaves phase 0
        let minted = advance(&def, &mut state, 30);
        assert_eq!(minted, dec!(140));
        assert_eq!(state.phase_index, 0);
        assert_eq!(state.cycle_index, 3);
        assert_eq!(state.next_tick_supply, dec!(1));
    }

    #[test]
    fn terminal_phase_accrues_linearly_without_decay() {
        let def = ScheduleDefinition::new(
            vec![
                PhaseDescriptor::new(100, 1, dec!(0.5), shares_for(dec!(1))),
                PhaseDescriptor::new(0, 0, dec!(1), shares_for(dec!(1))).terminal(),
            ],
            AuthorityId::new("authority"),
        )
        .unwrap();
        let mut state = ProgressState::new(Pool::Primary, dec!(10));

        // 100s at 10, then the terminal phase holds the decayed rate 5 forever
        let minted = advance(&def, &mut state, 1_100);
        assert_eq!(minted, dec!(1000) + dec!(5) * dec!(1000));
        assert_eq!(state.phase_index, 1);
        assert_eq!(state.cycle_index, 0);
        assert_eq!(state.next_tick_supply, dec!(5));

        // Still not exhausted, still linear
        assert_eq!(advance(&def, &mut state, 1_101), dec!(5));
        assert_eq!(state.next_tick_supply, dec!(5));
    }

    #[test]
    fn splitting_an_interval_preserves_the_total() {
        let def = ScheduleDefinition::new(
            vec![
                PhaseDescriptor::new(100, 2, dec!(0.5), shares_for(dec!(1))),
                PhaseDescriptor::new(30, 3, dec!(0.9), shares_for(dec!(0.6))),
            ],
            AuthorityId::new("authority"),
        )
        .unwrap();

        let mut one_shot = ProgressState::new(Pool::Primary, dec!(10));
        let total = advance(&def, &mut one_shot, 275);

        let mut stepped = ProgressState::new(Pool::Primary, dec!(10));
        let mut sum = Decimal::ZERO;
        for t in [1, 99, 100, 101, 150, 200, 230, 231, 260, 275] {
            sum += advance(&def, &mut stepped, t);
        }

        assert_eq!(sum, total);
        assert_eq!(stepped, one_shot);
    }
}
