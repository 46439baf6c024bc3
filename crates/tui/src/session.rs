use std::fs;

use engine::{Money, PlayerRef, TransferController};
use serde::Deserialize;

use crate::error::Result;

/// Roster and remaining budget as handed over by the page load.
///
/// ```text
/// { "budget_remaining": "4.50",
///   "roster": [ { "id": 1, "name": "Lund", "price": 5.5, "position": "Defender", "team": "Malmo" } ] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub budget_remaining: Money,
    pub roster: Vec<PlayerRef>,
}

impl Session {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn into_controller(self) -> Result<TransferController> {
        let controller = TransferController::new(self.roster, self.budget_remaining)?;
        tracing::info!(
            slots = controller.roster().len(),
            remaining = %controller.ledger().remaining(),
            "session loaded"
        );
        Ok(controller)
    }
}
