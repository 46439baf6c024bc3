use api_types::{
    ErrorBody,
    filter::FilterQuery,
    transfer::{MakeTransfer, TransferMade, WireId},
};
use engine::{PlayerId, PlayerRef};
use reqwest::Url;
use thiserror::Error;

use crate::{
    error::{AppError, Result},
    feed::fragment,
};

/// Shown when the submission fails without an explanation from the server.
pub const GENERIC_SUBMISSION_ERROR: &str = "Error making transfers, please refresh the page";
/// Shown when the submission succeeds but the body carries no message.
pub const DEFAULT_CONFIRMATION: &str = "Transfers completed";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Server { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::BaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::InvalidUrl(format!("invalid base_url: {err}")))
    }

    /// `GET /filter?argument=...`, returning the candidates found in the
    /// rendered fragment.
    pub async fn filter(&self, argument: &str) -> std::result::Result<Vec<PlayerRef>, ClientError> {
        let endpoint = self.endpoint("filter")?;

        let res = self
            .http
            .get(endpoint)
            .query(&FilterQuery {
                argument: argument.to_string(),
            })
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(server_error(status.as_u16(), res).await);
        }

        let body = res.text().await.map_err(ClientError::Transport)?;
        Ok(fragment::parse_candidates(&body))
    }

    /// `POST /maketransfer` with the full proposed roster. Never retried.
    pub async fn make_transfer(
        &self,
        players: &[PlayerId],
    ) -> std::result::Result<TransferMade, ClientError> {
        let endpoint = self.endpoint("maketransfer")?;

        let payload = MakeTransfer {
            players: players.iter().map(|id| WireId::from(id.as_str())).collect(),
        };

        let res = self
            .http
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(server_error(status.as_u16(), res).await);
        }

        let body = res.text().await.map_err(ClientError::Transport)?;
        Ok(serde_json::from_str::<TransferMade>(&body).unwrap_or_else(|_| TransferMade {
            message: DEFAULT_CONFIRMATION.to_string(),
        }))
    }
}

async fn server_error(status: u16, res: reqwest::Response) -> ClientError {
    let message = res
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty());
    ClientError::Server { status, message }
}

/// Text shown to the user after a failed submission.
pub fn submission_message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Server {
            message: Some(message),
            ..
        } => message.clone(),
        ClientError::Server { message: None, .. }
        | ClientError::Transport(_)
        | ClientError::InvalidUrl(_) => GENERIC_SUBMISSION_ERROR.to_string(),
    }
}

pub fn filter_message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Server {
            message: Some(message),
            ..
        } => format!("Filter failed: {message}"),
        ClientError::Server {
            status,
            message: None,
        } => format!("Filter failed ({status})"),
        ClientError::Transport(err) => format!("Filter unreachable: {err}"),
        ClientError::InvalidUrl(err) => format!("Filter unavailable: {err}"),
    }
}
