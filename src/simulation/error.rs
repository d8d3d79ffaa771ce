use thiserror::Error;

/// Errors raised while driving a run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Tick limit of {limit} reached with {remaining} task(s) undelivered")]
    TickLimitReached { limit: u64, remaining: usize },
}
