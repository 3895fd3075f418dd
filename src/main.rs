//! Word Hunt - command-line front end
//!
//! Deals boards, plays text-mode games and reconciles two-party results
//! through the file-backed result store.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;
use word_hunt::{
    Board, Difficulty, FileArea, GameConfig, GameMode, GameResult, GameSession, MatchSummary,
    OpponentPoll, OpponentStatus, Perspective, ResultStore, Seed, ShareLink, WordSet, check_opponent,
    generate_game_id,
};

const TICK_PERIOD: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = GameConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration resolved");
    let store = open_store(&config);

    match cli.command {
        Command::New { multi, base_url } => run_new(&store, multi, &base_url),
        Command::Board {
            game_id,
            difficulty,
        } => run_board(&game_id, difficulty.unwrap_or(*config.difficulty())),
        Command::Play {
            game_id,
            difficulty,
            words,
            multi,
            name,
        } => {
            let difficulty = difficulty.unwrap_or(*config.difficulty());
            run_play(&config, &store, game_id, difficulty, words, multi, name).await
        }
        Command::Show { game_id } => run_show(&store, &game_id),
        Command::Wait { game_id, slot } => {
            let perspective = Perspective::Slot(slot);
            report_or_wait(&store, &game_id, perspective, None, config.poll_interval()).await
        }
        Command::Sweep => run_sweep(&store),
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[instrument(skip(config))]
fn open_store(config: &GameConfig) -> ResultStore {
    let area = FileArea::new(config.store_dir());
    ResultStore::new(Arc::new(area)).with_retention(config.retention())
}

/// Generate a game id, and a share link for two-party games
#[instrument(skip(store))]
fn run_new(store: &ResultStore, multi: bool, base_url: &str) -> Result<()> {
    store.clear_old_games()?;
    let game_id = generate_game_id();
    info!(game_id = %game_id, "New game");
    println!("{}", game_id);

    if multi {
        let link = ShareLink::new(&game_id, GameMode::Multi).to_url(base_url)?;
        println!("Share this link with your opponent: {}", link);
    }
    Ok(())
}

/// Print the board with its cell indices
#[instrument]
fn run_board(game_id: &str, difficulty: Difficulty) -> Result<()> {
    let board = Board::generate(Seed::from_game_id(game_id), difficulty);
    print_board(&board);
    Ok(())
}

fn print_board(board: &Board) {
    println!("{}", board);
    println!();
    for row in 0..board.size() {
        let indices: Vec<String> = (0..board.size())
            .map(|col| format!("{:>2}", row * board.size() + col))
            .collect();
        println!("{}", indices.join(" "));
    }
}

/// Play one timed game from stdin
#[instrument(skip(config, store))]
async fn run_play(
    config: &GameConfig,
    store: &ResultStore,
    game_id: String,
    difficulty: Difficulty,
    words: Option<PathBuf>,
    multi: bool,
    name: Option<String>,
) -> Result<()> {
    store.clear_old_games()?;
    let words = load_words(words.or_else(|| config.word_list().clone()))?;

    let mut session = GameSession::new(&game_id, difficulty, config.duration());
    if let Some(name) = name {
        session = session.with_player_name(name);
    }
    print_board(session.board());
    println!();
    println!(
        "Trace words as cell indices separated by spaces. {}s on the clock; end input to stop early.",
        config.duration().as_secs()
    );

    session.start();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK_PERIOD);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    debug!("Input closed");
                    break;
                };
                let Some(path) = parse_path(&line) else {
                    println!("Enter cell indices separated by spaces");
                    continue;
                };
                if let Some(outcome) = session.trace_path(&path, &words) {
                    if outcome.is_notice() {
                        println!("{}", outcome);
                    }
                }
            }
            _ = ticker.tick() => {
                if session.tick_at(Instant::now()).is_some() {
                    println!("Time's up!");
                    break;
                }
            }
        }
    }

    let result = session.finish();
    for event in session.drain_events() {
        debug!(?event, "Game event");
    }
    let slot = store.save_game_result(&game_id, result.clone())?;
    debug!(%slot, "Result stored");
    println!("Saved as {} for game {}", slot, game_id);

    println!(
        "Final score: {} ({} words: {})",
        result.score(),
        result.found_words().len(),
        result.found_words().join(", ")
    );

    if multi {
        let perspective = Perspective::Slot(slot);
        report_or_wait(store, &game_id, perspective, Some(&result), config.poll_interval()).await?;
    }
    Ok(())
}

fn load_words(path: Option<PathBuf>) -> Result<WordSet> {
    match path {
        Some(path) => Ok(WordSet::from_file(path)?),
        None => Ok(WordSet::bundled()),
    }
}

/// Parses "6 11 10 7" or "6,11,10,7" into cell indices.
fn parse_path(line: &str) -> Option<Vec<usize>> {
    let path: Option<Vec<usize>> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect();
    path.filter(|p| !p.is_empty())
}

/// Print the opponent's result, polling for it until it arrives or Ctrl-C
#[instrument(skip(store, mine))]
async fn report_or_wait(
    store: &ResultStore,
    game_id: &str,
    perspective: Perspective,
    mine: Option<&GameResult>,
    interval: Duration,
) -> Result<()> {
    if let OpponentStatus::Resolved(theirs) = check_opponent(store, game_id, &perspective)? {
        print_opponent(mine, &theirs);
        return Ok(());
    }

    println!("Waiting for opponent... (Ctrl-C to stop)");
    let poll = OpponentPoll::spawn(store.clone(), game_id.to_string(), perspective, interval);
    tokio::select! {
        theirs = poll.wait() => match theirs {
            Some(theirs) => print_opponent(mine, &theirs),
            None => warn!("Opponent poll ended without a result"),
        },
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Stopped waiting for opponent");
            println!("Stopped waiting for opponent");
        }
    }
    Ok(())
}

fn print_opponent(mine: Option<&GameResult>, theirs: &GameResult) {
    let Some(mine) = mine else {
        println!(
            "Opponent score: {} ({})",
            theirs.score(),
            theirs.found_words().join(", ")
        );
        return;
    };
    print_summary(&MatchSummary::compare(mine, theirs));
}

fn print_summary(summary: &MatchSummary) {
    println!(
        "Your score: {}  Opponent score: {}",
        summary.my_score(),
        summary.their_score()
    );
    println!("{}", summary.verdict());
    println!("Both found: {}", summary.common_words().join(", "));
    println!("Only you: {}", summary.my_unique_words().join(", "));
    println!("Only opponent: {}", summary.their_unique_words().join(", "));
}

/// Print the stored record for a game
#[instrument(skip(store))]
fn run_show(store: &ResultStore, game_id: &str) -> Result<()> {
    let Some(game) = store.get_consistent_game_result(game_id)? else {
        println!("No stored result for game {}", game_id);
        return Ok(());
    };
    println!("{}", serde_json::to_string_pretty(&game)?);

    if let (Some(player), Some(opponent)) = (game.player_result(), game.opponent_result()) {
        println!();
        print_summary(&MatchSummary::compare(player, opponent));
    }
    Ok(())
}

#[instrument(skip(store))]
fn run_sweep(store: &ResultStore) -> Result<()> {
    let removed = store.clear_old_games()?;
    println!("Removed {} old game(s)", removed);
    Ok(())
}
