//! HTTP access to the match server.

use bevy::log::{debug, info};
use error_stack::{Report, ResultExt};

use crate::core::{MatchId, MatchState, PlayerActionRequest};
use crate::{TransportError, TransportResult};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Remote calls the match controller depends on.
///
/// Implementations block; callers run them on a task pool.
pub trait MatchService: Send + Sync + 'static {
    /// Create a new match and return its first snapshot.
    fn create_match(&self) -> TransportResult<MatchState>;

    /// Apply the current player's action and return the next snapshot.
    fn submit_action(
        &self,
        match_id: &MatchId,
        action: &PlayerActionRequest,
    ) -> TransportResult<MatchState>;
}

/// `MatchService` over plain HTTP/JSON.
pub struct HttpMatchClient {
    /// Server base URL, without trailing slash
    pub server_url: String,
    agent: ureq::Agent,
}

impl HttpMatchClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn game_url(&self) -> String {
        format!("{}/game", self.server_url)
    }

    fn action_url(&self, match_id: &MatchId) -> String {
        format!("{}/game/{}/apply-action", self.server_url, match_id)
    }
}

impl Default for HttpMatchClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

impl MatchService for HttpMatchClient {
    fn create_match(&self) -> TransportResult<MatchState> {
        let url = self.game_url();
        debug!("POST {url}");

        let mut response = self
            .agent
            .post(&url)
            .send_empty()
            .map_err(transport_report)
            .attach(format!("POST {url}"))?;

        let state: MatchState = response
            .body_mut()
            .read_json()
            .map_err(transport_report)
            .attach(format!("POST {url}"))?;

        info!("match {} created, {} to play", state.id, state.current_player());
        Ok(state)
    }

    fn submit_action(
        &self,
        match_id: &MatchId,
        action: &PlayerActionRequest,
    ) -> TransportResult<MatchState> {
        let url = self.action_url(match_id);
        debug!(
            "POST {url} target={} ability={}",
            action.target_id, action.ability_index
        );

        let mut response = self
            .agent
            .post(&url)
            .send_json(action)
            .map_err(transport_report)
            .attach(format!("POST {url}"))?;

        let state: MatchState = response
            .body_mut()
            .read_json()
            .map_err(transport_report)
            .attach(format!("POST {url}"))?;

        info!("match {} updated, {} to play", state.id, state.current_player());
        Ok(state)
    }
}

fn classify(err: &ureq::Error) -> TransportError {
    match err {
        ureq::Error::StatusCode(code) => TransportError::Status(*code),
        ureq::Error::Json(_) => TransportError::Malformed,
        _ => TransportError::Network,
    }
}

fn transport_report(err: ureq::Error) -> Report<TransportError> {
    let kind = classify(&err);
    Report::new(err).change_context(kind)
}
