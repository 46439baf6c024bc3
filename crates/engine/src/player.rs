//! Player identity and the attributes the transfer rules look at.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money};

/// Opaque player identifier, stable across roster and candidate lists.
///
/// Session data may carry ids as JSON numbers; they are kept as their decimal
/// text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct PlayerId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for PlayerId {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        }
    }
}

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Real-world club a player belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(team: impl Into<String>) -> Self {
        Self(team.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Attacker,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Attacker,
    ];

    /// Name used by the filter service and the session data.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::Defender => "Defender",
            Self::Midfielder => "Midfielder",
            Self::Attacker => "Attacker",
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Goalkeeper => "GK",
            Self::Defender => "DF",
            Self::Midfielder => "MF",
            Self::Attacker => "FW",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goalkeeper" | "gk" => Ok(Self::Goalkeeper),
            "defender" | "df" | "def" => Ok(Self::Defender),
            "midfielder" | "mf" | "mid" => Ok(Self::Midfielder),
            "attacker" | "forward" | "fw" | "fwd" | "att" => Ok(Self::Attacker),
            _ => Err(EngineError::InvalidPosition(s.to_string())),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(value: Position) -> Self {
        value.label().to_string()
    }
}

/// A player as displayed in the roster or candidate list.
///
/// `name` is for display only; no transfer rule reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    pub price: Money,
    pub position: Position,
    pub team: TeamId,
}

impl PlayerRef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        position: Position,
        team: impl Into<String>,
    ) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            price,
            position,
            team: TeamId::new(team),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_accepts_names_and_codes() {
        assert_eq!("Goalkeeper".parse::<Position>().unwrap(), Position::Goalkeeper);
        assert_eq!("gk".parse::<Position>().unwrap(), Position::Goalkeeper);
        assert_eq!(" DEF ".parse::<Position>().unwrap(), Position::Defender);
        assert_eq!("MID".parse::<Position>().unwrap(), Position::Midfielder);
        assert_eq!("Forward".parse::<Position>().unwrap(), Position::Attacker);
        assert!(matches!(
            "libero".parse::<Position>(),
            Err(EngineError::InvalidPosition(_))
        ));
    }

    #[test]
    fn player_ref_deserializes_session_shape() {
        let player: PlayerRef = serde_json::from_str(
            r#"{"id":7,"name":"Lund","price":4.5,"position":"Defender","team":"Malmo"}"#,
        )
        .unwrap();
        assert_eq!(player.id.as_str(), "7");
        assert_eq!(player.price, Money::from_cents(450));
        assert_eq!(player.position, Position::Defender);
        assert_eq!(player.team.as_str(), "Malmo");
    }
}
