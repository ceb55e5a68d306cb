//! Emission Schedule — deterministic piecewise token emission
//!
//! Computes how many tokens should be minted to a distribution pool between
//! two points in time, following a schedule whose per-second rate decays at
//! fixed cycle boundaries and whose pool-share split shifts across phases.
//!
//! The crate is a pure library: no I/O, no clock, no persistence. The host
//! supplies the current timestamp, stores [`ScheduleDefinition`] and every
//! [`ProgressState`], and serializes calls per pool.

pub mod engine;
pub mod errors;
pub mod phase;
pub mod schedule;
pub mod state;
pub mod types;

pub use engine::advance;
pub use errors::ScheduleError;
pub use phase::{PhaseDescriptor, PoolShares};
pub use schedule::ScheduleDefinition;
pub use state::ProgressState;
pub use types::{floor_to_units, AuthorityId, MintAmount, Pool, Timestamp};
