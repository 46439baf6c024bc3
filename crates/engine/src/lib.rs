//! Squad transfer rules.
//!
//! The crate holds the whole decision logic of the transfer view: the roster
//! of held players, the remaining-budget ledger, the armed selection and the
//! validator that decides which swap is legal. It performs no I/O.
//!
//! ```rust
//! use engine::{Money, PlayerRef, Position, SlotIndex, TransferController, TransferEvent, TransferOutcome};
//!
//! let mut ctl = TransferController::new(
//!     vec![PlayerRef::new("1", "Keeper", Money::from_cents(400), Position::Goalkeeper, "A")],
//!     Money::from_cents(1_000),
//! )
//! .unwrap();
//! ctl.handle(TransferEvent::SelectEntry(SlotIndex(0))).unwrap();
//! let incoming = PlayerRef::new("3", "Other", Money::from_cents(300), Position::Goalkeeper, "B");
//! let outcome = ctl.handle(TransferEvent::PickCandidate(incoming)).unwrap();
//! assert!(matches!(outcome, TransferOutcome::Committed(_)));
//! assert_eq!(ctl.ledger().remaining().to_string(), "11.00");
//! ```

pub use controller::{SwapReceipt, TransferController, TransferEvent, TransferOutcome};
pub use error::EngineError;
pub use ledger::BudgetLedger;
pub use money::Money;
pub use player::{PlayerId, PlayerRef, Position, TeamId};
pub use roster::{RosterEntry, RosterModel, SlotIndex};
pub use selection::SelectionState;
pub use validator::{Decision, MAX_PER_TEAM, RejectReason, evaluate};

mod controller;
mod error;
mod ledger;
mod money;
mod player;
mod roster;
mod selection;
mod validator;

type ResultEngine<T> = Result<T, EngineError>;
