use crate::types::AuthorityId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by schedule construction and output-rate mutation.
///
/// There is no retry policy: every variant is a configuration or
/// authorization error detected before any accrual runs. `advance` itself
/// never fails.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid output rate {rate}: must not exceed 1")]
    InvalidRate { rate: Decimal },

    #[error("caller {caller} is not the schedule authority")]
    Unauthorized { caller: AuthorityId },

    #[error("misconfigured schedule: {0}")]
    MisconfiguredSchedule(String),
}
