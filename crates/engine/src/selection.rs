use crate::{EngineError, ResultEngine, SlotIndex};

/// Which roster slot, if any, is armed for replacement.
///
/// Roster slots are replaced in place and never removed, so an armed slot
/// always points at a player currently in the roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    armed: Option<SlotIndex>,
    roster_len: usize,
}

impl SelectionState {
    pub fn new(roster_len: usize) -> Self {
        Self {
            armed: None,
            roster_len,
        }
    }

    /// Arms `slot`, silently replacing any previous selection.
    pub fn select(&mut self, slot: SlotIndex) -> ResultEngine<()> {
        if slot.0 >= self.roster_len {
            return Err(EngineError::SlotOutOfRange {
                slot: slot.0,
                len: self.roster_len,
            });
        }
        self.armed = Some(slot);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.armed = None;
    }

    pub fn current(&self) -> Option<SlotIndex> {
        self.armed
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_replaces_previous() {
        let mut selection = SelectionState::new(3);
        selection.select(SlotIndex(0)).unwrap();
        selection.select(SlotIndex(2)).unwrap();
        assert_eq!(selection.current(), Some(SlotIndex(2)));
        selection.clear();
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn out_of_range_select_keeps_state() {
        let mut selection = SelectionState::new(2);
        selection.select(SlotIndex(1)).unwrap();
        assert!(selection.select(SlotIndex(2)).is_err());
        assert_eq!(selection.current(), Some(SlotIndex(1)));
    }
}
