//! The held squad: a fixed number of slots, each holding exactly one player.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use crate::{EngineError, MAX_PER_TEAM, Money, PlayerId, PlayerRef, ResultEngine, TeamId};

/// Position of an entry in the roster. Stable for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(pub usize);

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub slot: SlotIndex,
    pub player: PlayerRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterModel {
    entries: Vec<RosterEntry>,
}

impl RosterModel {
    /// Builds the roster from session data, in slot order.
    ///
    /// Fails when the data already breaks uniqueness or the team quota, or
    /// when a price is negative or the prices do not fit in a [`Money`].
    pub fn new(players: Vec<PlayerRef>) -> ResultEngine<Self> {
        if players.is_empty() {
            return Err(EngineError::EmptyRoster);
        }

        let mut seen: HashSet<&PlayerId> = HashSet::with_capacity(players.len());
        let mut per_team: HashMap<&TeamId, usize> = HashMap::new();
        let mut total = Money::ZERO;
        for player in &players {
            if player.price.is_negative() {
                return Err(EngineError::NegativePrice {
                    id: player.id.to_string(),
                    price: player.price.to_string(),
                });
            }
            total = total
                .checked_add(player.price)
                .ok_or_else(|| EngineError::InvalidAmount("roster total overflows".to_string()))?;
            if !seen.insert(&player.id) {
                return Err(EngineError::DuplicatePlayer(player.id.to_string()));
            }
            let count = per_team.entry(&player.team).or_default();
            *count += 1;
            if *count > MAX_PER_TEAM {
                return Err(EngineError::TeamQuota {
                    team: player.team.to_string(),
                    count: *count,
                });
            }
        }

        let entries = players
            .into_iter()
            .enumerate()
            .map(|(idx, player)| RosterEntry {
                slot: SlotIndex(idx),
                player,
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn entry(&self, slot: SlotIndex) -> ResultEngine<&RosterEntry> {
        self.entries.get(slot.0).ok_or(EngineError::SlotOutOfRange {
            slot: slot.0,
            len: self.entries.len(),
        })
    }

    /// Ids in slot order.
    pub fn ids(&self) -> Vec<PlayerId> {
        self.entries.iter().map(|e| e.player.id.clone()).collect()
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.entries.iter().any(|e| &e.player.id == id)
    }

    /// Number of entries from `team`, counting every slot.
    pub fn team_count(&self, team: &TeamId) -> usize {
        self.entries.iter().filter(|e| &e.player.team == team).count()
    }

    /// Cannot overflow: construction bounds the sum and the ledger keeps
    /// it below the initial budget afterwards.
    pub fn total_price(&self) -> Money {
        self.entries.iter().map(|e| e.player.price).sum()
    }

    /// Puts `player` into `slot` and hands back whoever was there.
    pub(crate) fn replace(&mut self, slot: SlotIndex, player: PlayerRef) -> ResultEngine<PlayerRef> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(slot.0)
            .ok_or(EngineError::SlotOutOfRange { slot: slot.0, len })?;
        Ok(std::mem::replace(&mut entry.player, player))
    }
}
