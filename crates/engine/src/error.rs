//! Errors raised by the engine.
//!
//! These cover malformed session data and misuse of the API. An ordinary
//! illegal swap is **not** an error: the validator answers it with
//! [`Decision::Reject`].
//!
//! [`Decision::Reject`]: crate::Decision::Reject
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
    #[error("Player \"{0}\" appears more than once in the roster")]
    DuplicatePlayer(String),
    #[error("Team \"{team}\" has {count} players in the roster")]
    TeamQuota { team: String, count: usize },
    #[error("Roster slot {slot} does not exist (roster size {len})")]
    SlotOutOfRange { slot: usize, len: usize },
    #[error("Roster is empty")]
    EmptyRoster,
    #[error("Player \"{id}\" has a negative price ({price})")]
    NegativePrice { id: String, price: String },
    #[error("Budget cannot be negative: {0}")]
    NegativeBudget(String),
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
}
