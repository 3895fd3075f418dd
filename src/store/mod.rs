//! Shared persistence of game results and two-party reconciliation.

mod area;
mod error;
mod models;
mod poller;
mod repository;

pub use area::{FileArea, MemoryArea, StorageArea};
pub use error::StoreError;
pub use models::{GameResult, StoredGame, now_millis};
pub use poller::{DEFAULT_POLL_INTERVAL, OpponentPoll, OpponentStatus, Perspective, check_opponent};
pub use repository::{
    DEFAULT_RETENTION, ResultStore, STORAGE_KEY, Slot, assign_slot, generate_game_id,
};
