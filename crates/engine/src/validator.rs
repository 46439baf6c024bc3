//! Decides whether a proposed swap is legal.
//!
//! Checks run in a fixed order and stop at the first failure, so a user only
//! ever sees one reason per attempt:
//!
//! 1. team quota
//! 2. duplicate player
//! 3. position match
//! 4. budget

use std::fmt;

use crate::{BudgetLedger, Money, PlayerId, PlayerRef, Position, ResultEngine, RosterModel, SlotIndex, TeamId};

/// Maximum number of roster entries from one real-world team.
pub const MAX_PER_TEAM: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject(RejectReason),
}

impl Decision {
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    TeamQuotaExceeded { team: TeamId },
    AlreadyOwned { id: PlayerId },
    PositionMismatch { outgoing: Position, incoming: Position },
    InsufficientBudget { price: Money, available: Money },
}

impl RejectReason {
    /// Short machine-friendly tag.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TeamQuotaExceeded { .. } => "team quota exceeded",
            Self::AlreadyOwned { .. } => "already owned",
            Self::PositionMismatch { .. } => "position mismatch",
            Self::InsufficientBudget { .. } => "insufficient budget",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TeamQuotaExceeded { team } => write!(
                f,
                "You cannot pick more than {MAX_PER_TEAM} players from the same team ({team})."
            ),
            Self::AlreadyOwned { .. } => f.write_str("This player is already in your team"),
            Self::PositionMismatch { outgoing, incoming } => write!(
                f,
                "Cannot swap players from different positions ({outgoing} for {incoming})"
            ),
            Self::InsufficientBudget { price, available } => write!(
                f,
                "Not enough budget remaining for this transfer ({price} > {available})"
            ),
        }
    }
}

/// Evaluates replacing the player in `outgoing` with `incoming`.
///
/// The quota check counts `incoming.team` across the whole roster, the
/// outgoing slot included. Swapping like-for-like inside a team that already
/// has three entries is therefore rejected.
pub fn evaluate(
    roster: &RosterModel,
    ledger: &BudgetLedger,
    outgoing: SlotIndex,
    incoming: &PlayerRef,
) -> ResultEngine<Decision> {
    let outgoing = &roster.entry(outgoing)?.player;

    if roster.team_count(&incoming.team) >= MAX_PER_TEAM {
        return Ok(Decision::Reject(RejectReason::TeamQuotaExceeded {
            team: incoming.team.clone(),
        }));
    }

    if roster.contains(&incoming.id) {
        return Ok(Decision::Reject(RejectReason::AlreadyOwned {
            id: incoming.id.clone(),
        }));
    }

    if incoming.position != outgoing.position {
        return Ok(Decision::Reject(RejectReason::PositionMismatch {
            outgoing: outgoing.position,
            incoming: incoming.position,
        }));
    }

    let available = ledger.available_for(outgoing.price);
    if incoming.price > available {
        return Ok(Decision::Reject(RejectReason::InsufficientBudget {
            price: incoming.price,
            available,
        }));
    }

    Ok(Decision::Accept)
}
