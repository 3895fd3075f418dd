//! Waiting for the other party's result.
//!
//! A session that finished first polls the store until the counterpart's
//! result shows up. The poll runs as a cancellable task: it re-checks on a
//! fixed interval and also on every in-process change notification, and it
//! stops when resolved, cancelled or dropped.

use crate::store::{GameResult, ResultStore, Slot, StoreError, StoredGame};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

/// Default period between store checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Whether the other party has reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentStatus {
    /// No counterpart result yet.
    Waiting,
    /// The counterpart's result.
    Resolved(GameResult),
}

/// Which party is asking for the other's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Perspective {
    /// The caller's own submission, stamped or not.
    Submission(GameResult),
    /// The slot the caller's result was saved to.
    Slot(Slot),
}

impl Perspective {
    /// The other party's result in `game`. A submission found in neither
    /// slot has no counterpart.
    pub fn counterpart<'a>(&self, game: &'a StoredGame) -> Option<&'a GameResult> {
        match self {
            Self::Submission(mine) => game.counterpart_of(mine),
            Self::Slot(slot) => game.slot(slot.other()),
        }
    }
}

/// Checks once for the other party's result in the record for `game_id`.
///
/// # Errors
///
/// Returns [`StoreError`] if the store cannot be read.
#[instrument(skip(store, perspective))]
pub fn check_opponent(
    store: &ResultStore,
    game_id: &str,
    perspective: &Perspective,
) -> Result<OpponentStatus, StoreError> {
    let Some(game) = store.get_consistent_game_result(game_id)? else {
        return Ok(OpponentStatus::Waiting);
    };
    Ok(match perspective.counterpart(&game) {
        Some(result) => OpponentStatus::Resolved(result.clone()),
        None => OpponentStatus::Waiting,
    })
}

/// Background poll for the counterpart's result.
///
/// Must be spawned inside a Tokio runtime. Dropping the handle cancels the
/// poll.
#[derive(Debug)]
pub struct OpponentPoll {
    game_id: String,
    task: Option<JoinHandle<GameResult>>,
}

impl OpponentPoll {
    /// Starts polling `store` every `interval` for the other party's result.
    #[instrument(skip(store))]
    pub fn spawn(
        store: ResultStore,
        game_id: String,
        perspective: Perspective,
        interval: Duration,
    ) -> Self {
        info!("Waiting for opponent result");
        let task_game_id = game_id.clone();
        let task = tokio::spawn(async move {
            poll_until_resolved(store, task_game_id, perspective, interval).await
        });
        Self {
            game_id,
            task: Some(task),
        }
    }

    /// Game being waited on.
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Whether the poll has stopped (resolved or cancelled).
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops polling. A later [`OpponentPoll::wait`] returns `None`.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Opponent poll cancelled");
        }
    }

    /// Waits for the counterpart's result. Returns `None` if the poll was
    /// cancelled. Dropping the returned future cancels the poll.
    #[instrument(skip(self), fields(game_id = %self.game_id))]
    pub async fn wait(mut self) -> Option<GameResult> {
        let task = self.task.as_mut()?;
        let joined = task.await;
        self.task = None;
        match joined {
            Ok(result) => Some(result),
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                warn!(error = %e, "Opponent poll task failed");
                None
            }
        }
    }
}

impl Drop for OpponentPoll {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn poll_until_resolved(
    store: ResultStore,
    game_id: String,
    perspective: Perspective,
    interval: Duration,
) -> GameResult {
    let mut changes = Some(store.subscribe());
    // A zero period is rejected by the timer.
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = next_change(&mut changes) => {}
        }

        match check_opponent(&store, &game_id, &perspective) {
            Ok(OpponentStatus::Resolved(result)) => {
                info!(game_id = %game_id, score = *result.score(), "Opponent result found");
                return result;
            }
            Ok(OpponentStatus::Waiting) => debug!(game_id = %game_id, "Still waiting for opponent"),
            Err(e) => warn!(game_id = %game_id, error = %e, "Opponent check failed, will retry"),
        }
    }
}

/// Resolves on the next change notification; never resolves once the
/// channel is closed.
async fn next_change(changes: &mut Option<broadcast::Receiver<String>>) {
    let Some(rx) = changes.as_mut() else {
        return std::future::pending().await;
    };
    match rx.recv().await {
        Ok(_) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => {
            *changes = None;
            std::future::pending::<()>().await;
        }
    }
}
