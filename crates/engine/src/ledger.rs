//! Remaining-budget bookkeeping.
//!
//! The ledger keeps `remaining == initial - roster.total_price()` at all
//! times: the only mutation is [`BudgetLedger::apply`], called with the
//! prices of the two players swapped in one slot.

use crate::{EngineError, Money, ResultEngine, RosterModel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BudgetLedger {
    initial: Money,
    remaining: Money,
}

impl BudgetLedger {
    /// Seeds the ledger from the remaining value shown at page load.
    ///
    /// The initial budget is not supplied separately, it is whatever makes
    /// the conservation identity hold for the starting roster.
    pub fn from_remaining(remaining: Money, roster: &RosterModel) -> ResultEngine<Self> {
        if remaining.is_negative() {
            return Err(EngineError::NegativeBudget(remaining.to_string()));
        }
        let initial = remaining
            .checked_add(roster.total_price())
            .ok_or_else(|| EngineError::InvalidAmount("budget too large".to_string()))?;
        Ok(Self { initial, remaining })
    }

    pub fn remaining(&self) -> Money {
        self.remaining
    }

    pub fn initial(&self) -> Money {
        self.initial
    }

    /// What a replacement for a player worth `outgoing_price` may cost.
    pub fn available_for(&self, outgoing_price: Money) -> Money {
        self.remaining + outgoing_price
    }

    /// Refunds `outgoing_price` and charges `incoming_price`.
    pub(crate) fn apply(&mut self, outgoing_price: Money, incoming_price: Money) -> ResultEngine<Money> {
        let next = self
            .remaining
            .checked_add(outgoing_price)
            .and_then(|available| available.checked_sub(incoming_price))
            .ok_or_else(|| EngineError::InvalidAmount("amount overflow".to_string()))?;
        if next.is_negative() {
            return Err(EngineError::InsufficientFunds(format!(
                "{incoming_price} exceeds {}",
                self.available_for(outgoing_price)
            )));
        }
        self.remaining = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlayerRef, Position};

    fn roster() -> RosterModel {
        RosterModel::new(vec![
            PlayerRef::new("1", "a", Money::from_cents(400), Position::Goalkeeper, "A"),
            PlayerRef::new("2", "b", Money::from_cents(500), Position::Defender, "B"),
        ])
        .unwrap()
    }

    #[test]
    fn initial_is_derived_from_remaining_and_roster() {
        let ledger = BudgetLedger::from_remaining(Money::from_cents(1000), &roster()).unwrap();
        assert_eq!(ledger.initial(), Money::from_cents(1900));
        assert_eq!(ledger.available_for(Money::from_cents(400)), Money::from_cents(1400));
    }

    #[test]
    fn negative_remaining_is_rejected() {
        let err = BudgetLedger::from_remaining(Money::from_cents(-1), &roster()).unwrap_err();
        assert!(matches!(err, EngineError::NegativeBudget(_)));
    }

    #[test]
    fn apply_never_goes_negative() {
        let mut ledger = BudgetLedger::from_remaining(Money::from_cents(100), &roster()).unwrap();
        let err = ledger
            .apply(Money::from_cents(400), Money::from_cents(501))
            .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientFunds(_)));
        assert_eq!(ledger.remaining(), Money::from_cents(100));

        let remaining = ledger
            .apply(Money::from_cents(400), Money::from_cents(500))
            .unwrap();
        assert_eq!(remaining, Money::ZERO);
    }
}
