use serde::{Deserialize, Serialize};

/// Generic error body returned by the remote service.
///
/// `error` is optional: some failures carry no explanation at all.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

pub mod filter {
    use super::*;

    /// Query string of `GET /filter`.
    ///
    /// `argument` is the raw value of the filter control: a name fragment, a
    /// position, a team name, a minimum price or `All`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct FilterQuery {
        pub argument: String,
    }
}

pub mod transfer {
    use super::*;

    /// Player id on the wire.
    ///
    /// Ids in canonical decimal form travel as JSON numbers, everything else
    /// (including `007`) as a string so the id text survives unchanged.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum WireId {
        Numeric(u64),
        Text(String),
    }

    impl From<&str> for WireId {
        fn from(value: &str) -> Self {
            match value.parse::<u64>() {
                Ok(number) if number.to_string() == value => Self::Numeric(number),
                _ => Self::Text(value.to_string()),
            }
        }
    }

    /// Body of `POST /maketransfer`: the full proposed roster, one id per
    /// slot in slot order.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct MakeTransfer {
        pub players: Vec<WireId>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TransferMade {
        pub message: String,
    }
}
