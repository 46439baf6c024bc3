//! The transfer state machine.
//!
//! `TransferController` is the single owner of roster, ledger and selection.
//! It is `Idle` while nothing is armed and `Armed` otherwise; committing a
//! swap is the only transition that touches roster and ledger.

use crate::{
    BudgetLedger, Decision, EngineError, Money, PlayerId, PlayerRef, RejectReason, ResultEngine, RosterModel,
    SelectionState, SlotIndex, validator,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferEvent {
    SelectEntry(SlotIndex),
    ClearSelection,
    PickCandidate(PlayerRef),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferOutcome {
    Armed(SlotIndex),
    Cleared,
    Committed(SwapReceipt),
    Rejected(RejectReason),
    /// A candidate was picked while nothing was armed.
    NoSelection,
}

/// A committed swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapReceipt {
    pub slot: SlotIndex,
    pub outgoing: PlayerRef,
    pub incoming: PlayerRef,
    /// `incoming.price - outgoing.price`, charged to the ledger.
    pub delta: Money,
    pub remaining_after: Money,
}

#[derive(Clone, Debug)]
pub struct TransferController {
    roster: RosterModel,
    ledger: BudgetLedger,
    selection: SelectionState,
    history: Vec<SwapReceipt>,
}

impl TransferController {
    /// Starts a session from the page-load data: the roster in slot order and
    /// the remaining budget.
    pub fn new(players: Vec<PlayerRef>, remaining: Money) -> ResultEngine<Self> {
        let roster = RosterModel::new(players)?;
        let ledger = BudgetLedger::from_remaining(remaining, &roster)?;
        Ok(Self::from_parts(roster, ledger))
    }

    pub fn from_parts(roster: RosterModel, ledger: BudgetLedger) -> Self {
        let selection = SelectionState::new(roster.len());
        Self {
            roster,
            ledger,
            selection,
            history: Vec::new(),
        }
    }

    pub fn roster(&self) -> &RosterModel {
        &self.roster
    }

    pub fn ledger(&self) -> &BudgetLedger {
        &self.ledger
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn history(&self) -> &[SwapReceipt] {
        &self.history
    }

    /// Ids to submit, one per slot, in slot order.
    pub fn proposed_ids(&self) -> Vec<PlayerId> {
        self.roster.ids()
    }

    /// Makes the current roster the new baseline once it has been accepted
    /// remotely.
    pub fn rebase(&mut self) {
        self.history.clear();
        self.selection.clear();
    }

    pub fn handle(&mut self, event: TransferEvent) -> ResultEngine<TransferOutcome> {
        match event {
            TransferEvent::SelectEntry(slot) => {
                self.selection.select(slot)?;
                tracing::debug!(%slot, "roster entry armed");
                Ok(TransferOutcome::Armed(slot))
            }
            TransferEvent::ClearSelection => {
                self.selection.clear();
                tracing::debug!("selection cleared");
                Ok(TransferOutcome::Cleared)
            }
            TransferEvent::PickCandidate(candidate) => self.pick(candidate),
        }
    }

    fn pick(&mut self, incoming: PlayerRef) -> ResultEngine<TransferOutcome> {
        let Some(slot) = self.selection.current() else {
            tracing::warn!(candidate = %incoming.id, "candidate picked with no armed entry");
            return Ok(TransferOutcome::NoSelection);
        };
        if incoming.price.is_negative() {
            return Err(EngineError::NegativePrice {
                id: incoming.id.to_string(),
                price: incoming.price.to_string(),
            });
        }

        match validator::evaluate(&self.roster, &self.ledger, slot, &incoming)? {
            Decision::Reject(reason) => {
                tracing::warn!(%slot, candidate = %incoming.id, reason = reason.code(), "swap rejected");
                Ok(TransferOutcome::Rejected(reason))
            }
            Decision::Accept => self.commit(slot, incoming).map(TransferOutcome::Committed),
        }
    }

    fn commit(&mut self, slot: SlotIndex, incoming: PlayerRef) -> ResultEngine<SwapReceipt> {
        let outgoing_price = self.roster.entry(slot)?.player.price;
        // Ledger first: if it refuses, the roster has not been touched yet.
        let remaining_after = self.ledger.apply(outgoing_price, incoming.price)?;
        let outgoing = self.roster.replace(slot, incoming.clone())?;
        self.selection.clear();

        let receipt = SwapReceipt {
            slot,
            delta: incoming.price - outgoing.price,
            outgoing,
            incoming,
            remaining_after,
        };
        tracing::info!(
            %slot,
            outgoing = %receipt.outgoing.id,
            incoming = %receipt.incoming.id,
            remaining = %remaining_after,
            "swap committed"
        );
        self.history.push(receipt.clone());
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    fn controller() -> TransferController {
        TransferController::new(
            vec![
                PlayerRef::new("1", "Keeper", Money::from_cents(400), Position::Goalkeeper, "A"),
                PlayerRef::new("2", "Back", Money::from_cents(500), Position::Defender, "B"),
            ],
            Money::from_cents(1_000),
        )
        .unwrap()
    }

    #[test]
    fn commit_records_receipt_and_disarms() {
        let mut ctl = controller();
        ctl.handle(TransferEvent::SelectEntry(SlotIndex(0))).unwrap();
        let incoming = PlayerRef::new("3", "New", Money::from_cents(300), Position::Goalkeeper, "A");
        let outcome = ctl.handle(TransferEvent::PickCandidate(incoming)).unwrap();

        let TransferOutcome::Committed(receipt) = outcome else {
            panic!("expected commit, got {outcome:?}");
        };
        assert_eq!(receipt.delta, Money::from_cents(-100));
        assert_eq!(receipt.remaining_after, Money::from_cents(1_100));
        assert_eq!(ctl.history().len(), 1);
        assert!(!ctl.selection().is_armed());

        ctl.rebase();
        assert!(ctl.history().is_empty());
        assert_eq!(ctl.ledger().remaining(), Money::from_cents(1_100));
    }

    #[test]
    fn select_out_of_range_is_an_error() {
        let mut ctl = controller();
        assert!(ctl.handle(TransferEvent::SelectEntry(SlotIndex(2))).is_err());
        assert!(!ctl.selection().is_armed());
    }

    #[test]
    fn clear_disarms() {
        let mut ctl = controller();
        ctl.handle(TransferEvent::SelectEntry(SlotIndex(1))).unwrap();
        assert_eq!(ctl.handle(TransferEvent::ClearSelection).unwrap(), TransferOutcome::Cleared);
        assert_eq!(ctl.selection().current(), None);
    }

    #[test]
    fn negative_priced_candidate_is_refused_without_touching_state() {
        let mut ctl = controller();
        ctl.handle(TransferEvent::SelectEntry(SlotIndex(0))).unwrap();
        let incoming = PlayerRef::new("9", "Free", Money::from_cents(-5_000), Position::Goalkeeper, "C");

        let err = ctl.handle(TransferEvent::PickCandidate(incoming)).unwrap_err();
        assert!(matches!(err, EngineError::NegativePrice { .. }));
        assert_eq!(ctl.ledger().remaining(), Money::from_cents(1_000));
        assert_eq!(ctl.proposed_ids(), [PlayerId::new("1"), PlayerId::new("2")]);
        assert!(ctl.history().is_empty());
    }

    #[test]
    fn overflowing_session_prices_are_an_error() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        let result = TransferController::new(
            vec![
                PlayerRef::new("1", "a", half, Position::Goalkeeper, "A"),
                PlayerRef::new("2", "b", half, Position::Defender, "B"),
            ],
            Money::ZERO,
        );
        assert!(matches!(result, Err(EngineError::InvalidAmount(_))));
    }
}
