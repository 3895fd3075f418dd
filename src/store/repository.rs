//! Shared result store and its two-party reconciliation rules.
//!
//! All records live as one JSON array under [`STORAGE_KEY`]. Each save is a
//! read-modify-write of that array; two sessions saving in the same instant
//! can overwrite each other.

use crate::store::{GameResult, StorageArea, StoreError, StoredGame, now_millis};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// Key of the record array in the storage area.
pub const STORAGE_KEY: &str = "word_hunt_games";

/// Default retention window for stored records.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Result slot of a stored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Slot {
    /// The first party's slot.
    Player,
    /// The second party's slot.
    Opponent,
}

impl Slot {
    /// The other party's slot.
    pub fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

/// Decides which slot an incoming result is written to.
///
/// 1. The same submission already stored (see
///    [`GameResult::is_same_submission`]) keeps its own slot, so a session
///    re-saving never occupies the other slot.
/// 2. An empty or incomplete player slot takes the write.
/// 3. Otherwise an empty or incomplete opponent slot takes it.
/// 4. With both slots completed, the write replaces the newer slot when it is
///    at least as new as that slot, and the older slot otherwise.
#[instrument(skip_all, fields(game_id = %game.game_id(), incoming_ts = *incoming.timestamp()))]
pub fn assign_slot(game: &StoredGame, incoming: &GameResult) -> Slot {
    if let Some(slot) = game.slot_of(incoming) {
        debug!(%slot, "Same submission already stored");
        return slot;
    }

    let (player, opponent) = match (game.player_result(), game.opponent_result()) {
        (Some(p), _) if !*p.completed() => return Slot::Player,
        (None, _) => return Slot::Player,
        (Some(_), None) => return Slot::Opponent,
        (Some(_), Some(o)) if !*o.completed() => return Slot::Opponent,
        (Some(p), Some(o)) => (p, o),
    };

    let slot = if player.timestamp() > opponent.timestamp() {
        if incoming.timestamp() >= player.timestamp() {
            Slot::Player
        } else {
            Slot::Opponent
        }
    } else if incoming.timestamp() >= opponent.timestamp() {
        Slot::Opponent
    } else {
        Slot::Player
    };
    debug!(%slot, "Both slots completed, resolved by timestamp");
    slot
}

/// Game result store over a shared storage area.
#[derive(Debug, Clone)]
pub struct ResultStore {
    area: Arc<dyn StorageArea>,
    retention: Duration,
}

impl ResultStore {
    /// Creates a store over the given area with the default retention.
    #[instrument(skip(area))]
    pub fn new(area: Arc<dyn StorageArea>) -> Self {
        info!("Creating ResultStore");
        Self {
            area,
            retention: DEFAULT_RETENTION,
        }
    }

    /// Replaces the retention window used by the sweep.
    #[instrument(skip(self))]
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Retention window used by the sweep.
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Subscribes to change notifications of the underlying area.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.area.subscribe()
    }

    /// Reads every stored record.
    ///
    /// Corrupt JSON reads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage area cannot be read.
    #[instrument(skip(self))]
    pub fn games(&self) -> Result<Vec<StoredGame>, StoreError> {
        let Some(raw) = self.area.read(STORAGE_KEY)? else {
            debug!("No stored games");
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<StoredGame>>(&raw) {
            Ok(games) => {
                debug!(count = games.len(), "Stored games loaded");
                Ok(games)
            }
            Err(e) => {
                warn!(error = %e, "Error parsing stored games, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    #[instrument(skip(self, games), fields(count = games.len()))]
    fn write_games(&self, games: &[StoredGame]) -> Result<(), StoreError> {
        let json = serde_json::to_string(games)?;
        self.area.write(STORAGE_KEY, &json)
    }

    /// Saves a session's result under `game_id`, stamped with the current
    /// time if it carries none.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage area cannot be read or written.
    #[instrument(skip(self, result), fields(score = *result.score()))]
    pub fn save_game_result(&self, game_id: &str, result: GameResult) -> Result<Slot, StoreError> {
        self.save_game_result_at(game_id, result, now_millis())
    }

    /// Saves a session's result as of `now` (epoch milliseconds).
    ///
    /// Re-saving a submission that is already stored leaves the record
    /// untouched and returns its slot. Otherwise a missing timestamp is set
    /// to `now` and [`assign_slot`] chooses the slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage area cannot be read or written.
    #[instrument(skip(self, result), fields(score = *result.score()))]
    pub fn save_game_result_at(
        &self,
        game_id: &str,
        result: GameResult,
        now: i64,
    ) -> Result<Slot, StoreError> {
        let mut games = self.games()?;
        let existing = games.iter_mut().find(|g| g.game_id() == game_id);

        // Identity is checked before stamping: an unstamped re-save must
        // still find its own slot.
        if let Some(slot) = existing.as_ref().and_then(|g| g.slot_of(&result)) {
            info!(game_id, %slot, "Same submission already stored, keeping it");
            return Ok(slot);
        }

        let result = if *result.timestamp() == 0 {
            result.with_timestamp(now)
        } else {
            result
        };

        let slot = match existing {
            Some(game) => {
                let slot = assign_slot(game, &result);
                match slot {
                    Slot::Player => game.player_result = Some(result),
                    Slot::Opponent => game.opponent_result = Some(result),
                }
                slot
            }
            None => {
                games.push(StoredGame::new(game_id.to_string(), result, now));
                Slot::Player
            }
        };

        self.write_games(&games)?;
        info!(game_id, %slot, "Game result saved");
        Ok(slot)
    }

    /// Looks up the stored record for `game_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage area cannot be read.
    #[instrument(skip(self))]
    pub fn get_game_result(&self, game_id: &str) -> Result<Option<StoredGame>, StoreError> {
        let game = self.games()?.into_iter().find(|g| g.game_id() == game_id);
        if game.is_none() {
            debug!("Game not found");
        }
        Ok(game)
    }

    /// Looks up the record for `game_id` as every reader should see it.
    ///
    /// The returned record is a detached copy: both sessions read the same
    /// slot layout, and nothing done to the copy reaches the shared area.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage area cannot be read.
    #[instrument(skip(self))]
    pub fn get_consistent_game_result(
        &self,
        game_id: &str,
    ) -> Result<Option<StoredGame>, StoreError> {
        let game = self.get_game_result(game_id)?;
        if let Some(ref g) = game {
            debug!(filled_slots = g.filled_slots(), "Consistent game read");
        }
        Ok(game)
    }

    /// Drops records older than the retention window.
    ///
    /// Returns the number of records removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage area cannot be read or written.
    #[instrument(skip(self))]
    pub fn clear_old_games(&self) -> Result<usize, StoreError> {
        self.clear_old_games_at(now_millis())
    }

    /// Drops records older than the retention window as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the storage area cannot be read or written.
    #[instrument(skip(self))]
    pub fn clear_old_games_at(&self, now: i64) -> Result<usize, StoreError> {
        let retention = i64::try_from(self.retention.as_millis()).unwrap_or(i64::MAX);
        let games = self.games()?;
        let before = games.len();
        let kept: Vec<StoredGame> = games
            .into_iter()
            .filter(|g| g.age_millis(now) < retention)
            .collect();
        let removed = before - kept.len();

        self.write_games(&kept)?;
        info!(removed, kept = kept.len(), "Old games swept");
        Ok(removed)
    }
}

/// Generates a new game identifier that is always a valid board seed.
#[instrument]
pub fn generate_game_id() -> String {
    crate::games::word_hunt::generate_random_seed().to_string()
}
