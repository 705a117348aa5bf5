//! GridClash State Library
//!
//! This crate provides state management for GridClash game logic: a
//! deterministic multi-player grid-game engine that matches waiting
//! players into sessions, validates and applies moves on an NxN board,
//! detects wins on any row, column, or diagonal, and keeps per-player
//! and aggregate statistics.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Game Engine** - The single orchestrator that owns all state and
//!   processes commands one at a time.
//!
//! - **Matchmaking** - A FIFO waiting pool that forms a session the
//!   moment the requested player count is reached.
//!
//! - **Game Sessions** - Board, fixed player order, move history, and
//!   the `active -> won` lifecycle with generalized win detection.
//!
//! - **Player Registry** - Profiles keyed by opaque address with
//!   games-played/won and move counters.
//!
//! - **Stats** - Lazily created, monotonic counters by category.
//!
//! # Design Principles
//!
//! 1. **Strictly sequential** - One command at a time, run to
//!    completion; replaying a command sequence from empty state always
//!    reproduces the same state.
//!
//! 2. **No fatal errors** - Every failure (duplicate registration,
//!    unknown game, occupied cell, malformed command) is reported as a
//!    notice and mutates nothing.
//!
//! 3. **No networking** - This crate is pure state; transport,
//!    persistence, and serialization of the outer envelope live
//!    elsewhere.
//!
//! 4. **Serialization-ready** - Every queryable type converts to JSON
//!    for the inspection layer.
//!
//! # Example
//!
//! ```rust
//! use gridclash_state::state::{Command, Event, GameEngine};
//!
//! let mut engine = GameEngine::new();
//!
//! // Register two players.
//! engine.handle_command(Command::RegisterPlayer {
//!     address: "0xa1".to_string(),
//!     name: "Alice".to_string(),
//! });
//! engine.handle_command(Command::RegisterPlayer {
//!     address: "0xb2".to_string(),
//!     name: "Bob".to_string(),
//! });
//!
//! // First request waits; the second forms game 0.
//! engine.handle_command(Command::StartGame {
//!     grid_size: 3,
//!     num_players: 2,
//!     player_address: "0xa1".to_string(),
//! });
//! let outcome = engine.handle_command(Command::StartGame {
//!     grid_size: 3,
//!     num_players: 2,
//!     player_address: "0xb2".to_string(),
//! });
//!
//! assert_eq!(outcome.notices[0], "Game 0 started with 2 players and grid size 3");
//! assert!(matches!(outcome.events[0], Event::GameStart { game_id: 0, .. }));
//!
//! // Apply a move and inspect the board.
//! engine.handle_command(Command::MakeMove {
//!     game_id: 0,
//!     player_address: "0xa1".to_string(),
//!     row: 0,
//!     col: 0,
//! });
//! let snapshot = engine.game_json(0).unwrap();
//! assert_eq!(snapshot["board"][0][0], "0xa1");
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
