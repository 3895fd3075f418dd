//! Shareable game links.
//!
//! A link carries the game identifier and, for two-party games, the mode:
//! `<base>/play?gameId=<id>&mode=multi`. Anyone opening it gets the same
//! board.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

/// Default base of generated links.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const PLAY_PATH: &str = "play";
const GAME_ID_PARAM: &str = "gameId";
const MODE_PARAM: &str = "mode";

/// Whether a game is played alone or against an opponent on the same board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameMode {
    /// Solo play.
    #[default]
    Single,
    /// Two parties, results compared through the shared store.
    Multi,
}

/// Link to a game that can be handed to another player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    game_id: String,
    mode: GameMode,
}

impl ShareLink {
    /// Creates a link for `game_id`.
    pub fn new(game_id: impl Into<String>, mode: GameMode) -> Self {
        Self {
            game_id: game_id.into(),
            mode,
        }
    }

    /// Game identifier.
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Renders the link under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ShareLinkError`] if `base_url` is not an absolute URL.
    #[instrument(skip(self), fields(game_id = %self.game_id, mode = %self.mode))]
    pub fn to_url(&self, base_url: &str) -> Result<Url, ShareLinkError> {
        let mut url = Url::parse(base_url)?;
        let base_path = url.path().trim_end_matches('/');
        let path = format!("{}/{}", base_path, PLAY_PATH);
        url.set_path(&path);
        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(GAME_ID_PARAM, &self.game_id);
            if self.mode == GameMode::Multi {
                query.append_pair(MODE_PARAM, &self.mode.to_string());
            }
        }
        debug!(url = %url, "Share link built");
        Ok(url)
    }

    /// Reads a link back. A missing or unknown mode means solo play.
    ///
    /// # Errors
    ///
    /// Returns [`ShareLinkError`] if the text is not a URL or has no
    /// non-empty `gameId` parameter.
    #[instrument]
    pub fn parse(link: &str) -> Result<Self, ShareLinkError> {
        let url = Url::parse(link.trim())?;
        let mut game_id = None;
        let mut mode = GameMode::Single;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                GAME_ID_PARAM => game_id = Some(value.into_owned()),
                MODE_PARAM => mode = value.parse().unwrap_or_default(),
                _ => {}
            }
        }
        let game_id = game_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ShareLinkError::new("Link has no gameId parameter"))?;
        Ok(Self { game_id, mode })
    }
}

/// Share link error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Share link error: {} at {}:{}", message, file, line)]
pub struct ShareLinkError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ShareLinkError {
    /// Creates a new share link error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<url::ParseError> for ShareLinkError {
    #[track_caller]
    fn from(err: url::ParseError) -> Self {
        Self::new(format!("Invalid URL: {}", err))
    }
}
