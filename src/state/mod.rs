//! State management module for GridClash.
//!
//! This module provides the core state types and managers:
//!
//! - `board` - Board grid and win detection
//! - `game` - Game sessions and the session manager
//! - `queue` - Matchmaking queue
//! - `player` - Player profiles and counters
//! - `stats` - Aggregate game statistics
//! - `command` - Decoded commands and command outcomes
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         GameEngine                            │
//! │                                                               │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────┐       │
//! │  │ GameManager  │ │ Matchmaking  │ │ PlayerRegistry   │       │
//! │  │              │ │ Queue        │ │                  │       │
//! │  │ game_id →    │ │              │ │ address →        │       │
//! │  │   Game       │ │ FIFO pool of │ │   Player         │       │
//! │  │              │ │ addresses    │ │ + registration   │       │
//! │  │ sequential   │ │              │ │   order          │       │
//! │  │ ids from 0   │ └──────────────┘ └──────────────────┘       │
//! │  └──────────────┘ ┌──────────────────┐                        │
//! │                   │ StatsAggregator  │                        │
//! │                   │ category → count │                        │
//! │                   └──────────────────┘                        │
//! │                                                               │
//! │  Command ──▶ handle_command ──▶ CommandOutcome                │
//! │              (one at a time,     (notices + events)           │
//! │               run to completion)                              │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is a strictly sequential state machine: each command is
//! processed to completion before the next, and replaying the same
//! command sequence from an empty engine always reproduces the same
//! state. Every failure is reported as a notice and leaves all
//! collections untouched; there is no fatal error class.

pub mod board;
pub mod command;
pub mod game;
pub mod player;
pub mod queue;
pub mod stats;

// Re-export commonly used types
pub use board::{Board, Cell, Position};
pub use command::{Command, CommandOutcome, Event};
pub use game::{Game, GameManager, GameStatus, Move, MoveError};
pub use player::{Player, PlayerRegistry, LEADERBOARD_SIZE};
pub use queue::{MatchmakingQueue, QueueOutcome};
pub use stats::StatsAggregator;

/// The game engine: exclusive owner of all top-level state.
///
/// Holds the session manager, the matchmaking queue, the player registry,
/// and the stats counters. Commands mutate state only through
/// [`GameEngine::handle_command`]; the query methods are read-only
/// snapshots for an external inspection layer.
#[derive(Debug, Default)]
pub struct GameEngine {
    pub games: GameManager,
    pub queue: MatchmakingQueue,
    pub players: PlayerRegistry,
    pub stats: StatsAggregator,
}

impl GameEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one command to completion, returning everything it emitted.
    pub fn handle_command(&mut self, command: Command) -> CommandOutcome {
        log::debug!("handling command: {:?}", command);
        let mut outcome = CommandOutcome::new();

        match command {
            Command::RegisterPlayer { address, name } => {
                self.register_player(&address, &name, &mut outcome);
            }
            Command::StartGame {
                grid_size,
                num_players,
                player_address,
            } => {
                self.start_game(grid_size, num_players, &player_address, &mut outcome);
            }
            Command::MakeMove {
                game_id,
                player_address,
                row,
                col,
            } => {
                self.make_move(game_id, &player_address, row, col, &mut outcome);
            }
            Command::Unknown => {
                outcome.notice("Invalid command".to_string());
            }
        }

        outcome
    }

    fn register_player(&mut self, address: &str, name: &str, outcome: &mut CommandOutcome) {
        if self.players.register(address, name) {
            outcome.notice(format!(
                "Player {name} registered with address {address}"
            ));
        } else {
            outcome.notice(format!("Player with address {address} already exists"));
        }
    }

    fn start_game(
        &mut self,
        grid_size: usize,
        num_players: usize,
        player_address: &str,
        outcome: &mut CommandOutcome,
    ) {
        if !self.players.contains(player_address) {
            outcome.notice(format!(
                "Player with address {player_address} not registered"
            ));
            return;
        }

        match self.queue.enqueue_or_start(player_address, num_players) {
            QueueOutcome::Started { players: roster } => {
                let game_id = self.games.create(grid_size, num_players, roster.clone());
                self.players.record_game_start(&roster);
                self.stats.increment("total_games");
                self.stats
                    .increment(&format!("games_{grid_size}x{grid_size}"));

                log::info!("game {game_id} started with players {roster:?}");
                outcome.event(Event::GameStart {
                    game_id,
                    players: roster,
                    grid_size,
                });
                outcome.notice(format!(
                    "Game {game_id} started with {num_players} players and grid size {grid_size}"
                ));
            }
            QueueOutcome::Waiting { remaining } => {
                outcome.notice(format!(
                    "Player {player_address} added to waiting list. \
                     Waiting for {remaining} more players."
                ));
            }
        }
    }

    fn make_move(
        &mut self,
        game_id: u64,
        player_address: &str,
        row: usize,
        col: usize,
        outcome: &mut CommandOutcome,
    ) {
        let Some(game) = self.games.get_mut(game_id) else {
            outcome.notice(format!("Invalid game ID: {game_id}"));
            return;
        };

        match game.apply_move(player_address, row, col) {
            Ok(()) => {
                outcome.notice(format!(
                    "Move made by player {player_address} at ({row}, {col}) in game {game_id}"
                ));

                // The win transition can only fire on the move that made
                // the line, so a winner here is always freshly recorded.
                let winner = game.check_win().map(str::to_string);
                self.players.record_move(player_address);

                if let Some(winner) = winner {
                    self.players.record_win(&winner);
                    log::info!("game {game_id} won by {winner}");
                    outcome.event(Event::GameWin {
                        game_id,
                        winner: winner.clone(),
                    });
                    outcome.notice(format!("Game {game_id} won by player {winner}"));
                }
            }
            Err(reason) => {
                log::debug!("move rejected in game {game_id}: {reason}");
                outcome.notice(format!(
                    "Invalid move by player {player_address} at ({row}, {col}) in game {game_id}"
                ));
            }
        }
    }

    // Query surface: read-only JSON snapshots for the inspection layer.

    /// Waiting-queue snapshot.
    pub fn waiting_players_json(&self) -> serde_json::Value {
        self.queue.to_json()
    }

    /// Full snapshot of one game, or None if the ID is unknown.
    pub fn game_json(&self, game_id: u64) -> Option<serde_json::Value> {
        self.games.get(game_id).map(|g| g.to_json())
    }

    /// A player's profile with derived win rate, or None if unregistered.
    pub fn player_json(&self, address: &str) -> Option<serde_json::Value> {
        self.players.get(address).map(|p| p.to_json())
    }

    /// Snapshot of every stats counter.
    pub fn stats_json(&self) -> serde_json::Value {
        self.stats.to_json()
    }

    /// Top players by games won, at most ten.
    pub fn leaderboard_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .players
            .leaderboard(LEADERBOARD_SIZE)
            .iter()
            .map(|p| p.leaderboard_json())
            .collect();
        serde_json::Value::Array(rows)
    }

    /// All games with no winner yet, in creation order.
    pub fn active_games_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> =
            self.games.active().map(|g| g.summary_json()).collect();
        serde_json::Value::Array(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn register(engine: &mut GameEngine, address: &str, name: &str) -> CommandOutcome {
        engine.handle_command(Command::RegisterPlayer {
            address: address.to_string(),
            name: name.to_string(),
        })
    }

    fn start_game(engine: &mut GameEngine, address: &str) -> CommandOutcome {
        engine.handle_command(Command::StartGame {
            grid_size: 3,
            num_players: 2,
            player_address: address.to_string(),
        })
    }

    fn make_move(engine: &mut GameEngine, game_id: u64, address: &str, row: usize, col: usize) -> CommandOutcome {
        engine.handle_command(Command::MakeMove {
            game_id,
            player_address: address.to_string(),
            row,
            col,
        })
    }

    /// Registers p1 and p2 and starts game 0 between them.
    fn engine_with_game() -> GameEngine {
        let mut engine = GameEngine::new();
        register(&mut engine, "p1", "Alice");
        register(&mut engine, "p2", "Bob");
        start_game(&mut engine, "p1");
        start_game(&mut engine, "p2");
        engine
    }

    #[test]
    fn test_register_and_duplicate() {
        let mut engine = GameEngine::new();

        let outcome = register(&mut engine, "0xa1", "Alice");
        assert_eq!(
            outcome.notices,
            ["Player Alice registered with address 0xa1"]
        );
        assert!(outcome.events.is_empty());

        let outcome = register(&mut engine, "0xa1", "Alice");
        assert_eq!(outcome.notices, ["Player with address 0xa1 already exists"]);
        assert_eq!(engine.players.count(), 1);
    }

    #[test]
    fn test_start_game_requires_registration() {
        let mut engine = GameEngine::new();

        let outcome = start_game(&mut engine, "0xgh0st");
        assert_eq!(
            outcome.notices,
            ["Player with address 0xgh0st not registered"]
        );
        assert!(engine.queue.is_empty());
        assert_eq!(engine.games.count(), 0);
    }

    #[test]
    fn test_matchmaking_flow() {
        let mut engine = GameEngine::new();
        register(&mut engine, "p1", "Alice");
        register(&mut engine, "p2", "Bob");

        let outcome = start_game(&mut engine, "p1");
        assert_eq!(
            outcome.notices,
            ["Player p1 added to waiting list. Waiting for 0 more players."]
        );
        assert_eq!(engine.queue.waiting(), ["p1"]);

        let outcome = start_game(&mut engine, "p2");
        assert_eq!(
            outcome.notices,
            ["Game 0 started with 2 players and grid size 3"]
        );
        assert_eq!(
            outcome.events,
            [Event::GameStart {
                game_id: 0,
                players: vec!["p1".to_string(), "p2".to_string()],
                grid_size: 3,
            }]
        );

        assert!(engine.queue.is_empty());
        let game = engine.games.get(0).unwrap();
        assert_eq!(game.players(), ["p1", "p2"]);
        assert_eq!(engine.players.get("p1").unwrap().games_played, 1);
        assert_eq!(engine.players.get("p2").unwrap().games_played, 1);
        assert_eq!(engine.stats.get("total_games"), 1);
        assert_eq!(engine.stats.get("games_3x3"), 1);
    }

    #[test]
    fn test_move_and_win_flow() {
        let mut engine = engine_with_game();

        make_move(&mut engine, 0, "p1", 1, 0);
        make_move(&mut engine, 0, "p2", 0, 0);
        make_move(&mut engine, 0, "p1", 1, 2);
        make_move(&mut engine, 0, "p2", 1, 1);
        make_move(&mut engine, 0, "p1", 2, 0);

        // p2 completes the main diagonal.
        let outcome = make_move(&mut engine, 0, "p2", 2, 2);
        assert_eq!(
            outcome.notices,
            [
                "Move made by player p2 at (2, 2) in game 0",
                "Game 0 won by player p2",
            ]
        );
        assert_eq!(
            outcome.events,
            [Event::GameWin {
                game_id: 0,
                winner: "p2".to_string(),
            }]
        );

        let game = engine.games.get(0).unwrap();
        assert_eq!(game.winner.as_deref(), Some("p2"));
        assert!(game.end_time.is_some());

        assert_eq!(engine.players.get("p2").unwrap().games_won, 1);
        assert_eq!(engine.players.get("p2").unwrap().total_moves, 3);
        assert_eq!(engine.players.get("p1").unwrap().games_won, 0);
        assert_eq!(engine.players.get("p1").unwrap().total_moves, 3);
    }

    #[test]
    fn test_move_on_unknown_game() {
        let mut engine = engine_with_game();

        let outcome = make_move(&mut engine, 99, "p1", 0, 0);
        assert_eq!(outcome.notices, ["Invalid game ID: 99"]);
        assert_eq!(engine.players.get("p1").unwrap().total_moves, 0);
    }

    #[test]
    fn test_invalid_move_rejected_without_mutation() {
        let mut engine = engine_with_game();
        make_move(&mut engine, 0, "p1", 0, 0);

        let outcome = make_move(&mut engine, 0, "p2", 0, 0);
        assert_eq!(
            outcome.notices,
            ["Invalid move by player p2 at (0, 0) in game 0"]
        );
        assert!(outcome.events.is_empty());

        let game = engine.games.get(0).unwrap();
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.current_player_index, 1);
        assert_eq!(engine.players.get("p2").unwrap().total_moves, 0);
    }

    #[test]
    fn test_moves_rejected_after_win() {
        let mut engine = engine_with_game();
        make_move(&mut engine, 0, "p1", 0, 0);
        make_move(&mut engine, 0, "p1", 0, 1);
        make_move(&mut engine, 0, "p1", 0, 2);

        let won_moves = engine.games.get(0).unwrap().move_count();
        let outcome = make_move(&mut engine, 0, "p2", 2, 2);
        assert_eq!(
            outcome.notices,
            ["Invalid move by player p2 at (2, 2) in game 0"]
        );
        assert_eq!(engine.games.get(0).unwrap().move_count(), won_moves);
        // Win was recorded exactly once.
        assert_eq!(engine.players.get("p1").unwrap().games_won, 1);
    }

    #[test]
    fn test_unknown_command() {
        let mut engine = GameEngine::new();
        let outcome = engine.handle_command(Command::Unknown);
        assert_eq!(outcome.notices, ["Invalid command"]);
        assert!(outcome.events.is_empty());
        assert_eq!(engine.players.count(), 0);
        assert_eq!(engine.games.count(), 0);
    }

    #[test]
    fn test_second_game_gets_next_id() {
        let mut engine = engine_with_game();
        register(&mut engine, "p3", "Carol");
        register(&mut engine, "p4", "Dave");

        start_game(&mut engine, "p3");
        let outcome = start_game(&mut engine, "p4");
        assert_eq!(
            outcome.notices,
            ["Game 1 started with 2 players and grid size 3"]
        );
        assert_eq!(engine.games.count(), 2);
    }

    #[test]
    fn test_queries() {
        let mut engine = engine_with_game();
        make_move(&mut engine, 0, "p1", 0, 0);

        assert_eq!(
            engine.waiting_players_json(),
            serde_json::json!({ "waiting_players": [] })
        );

        let game = engine.game_json(0).unwrap();
        assert_eq!(game["game_id"], 0);
        assert_eq!(game["board"][0][0], "p1");
        assert!(engine.game_json(99).is_none());

        let player = engine.player_json("p1").unwrap();
        assert_eq!(player["total_moves"], 1);
        assert_eq!(player["win_rate"], 0.0);
        assert!(engine.player_json("0xgh0st").is_none());

        assert_eq!(
            engine.stats_json(),
            serde_json::json!({ "games_3x3": 1, "total_games": 1 })
        );

        assert_eq!(
            engine.active_games_json(),
            serde_json::json!([{
                "game_id": 0,
                "grid_size": 3,
                "num_players": 2,
                "current_player": 1,
                "moves_made": 1,
            }])
        );
    }

    #[test]
    fn test_leaderboard_query_ranks_by_wins() {
        let mut engine = GameEngine::new();
        register(&mut engine, "p1", "Alice");
        register(&mut engine, "p2", "Bob");

        // p2 wins three games, p1 wins one.
        for winner in ["p2", "p2", "p2", "p1"] {
            start_game(&mut engine, "p1");
            start_game(&mut engine, "p2");
            let game_id = engine.games.count() as u64 - 1;
            for col in 0..3 {
                make_move(&mut engine, game_id, winner, 0, col);
            }
        }

        let board = engine.leaderboard_json();
        assert_eq!(board[0]["address"], "p2");
        assert_eq!(board[0]["games_won"], 3);
        assert_eq!(board[1]["address"], "p1");
        assert_eq!(board[1]["games_won"], 1);
    }

    #[test]
    fn test_replay_determinism() {
        let script = || {
            vec![
                Command::RegisterPlayer {
                    address: "p1".to_string(),
                    name: "Alice".to_string(),
                },
                Command::RegisterPlayer {
                    address: "p2".to_string(),
                    name: "Bob".to_string(),
                },
                Command::StartGame {
                    grid_size: 3,
                    num_players: 2,
                    player_address: "p1".to_string(),
                },
                Command::StartGame {
                    grid_size: 3,
                    num_players: 2,
                    player_address: "p2".to_string(),
                },
                Command::MakeMove {
                    game_id: 0,
                    player_address: "p1".to_string(),
                    row: 0,
                    col: 0,
                },
                Command::MakeMove {
                    game_id: 0,
                    player_address: "p2".to_string(),
                    row: 1,
                    col: 1,
                },
                Command::Unknown,
            ]
        };

        let run = |commands: Vec<Command>| {
            let mut engine = GameEngine::new();
            let outcomes: Vec<CommandOutcome> = commands
                .into_iter()
                .map(|c| engine.handle_command(c))
                .collect();
            (outcomes, engine)
        };

        let (outcomes_a, engine_a) = run(script());
        let (outcomes_b, engine_b) = run(script());

        assert_eq!(outcomes_a, outcomes_b);
        assert_eq!(engine_a.game_json(0).unwrap()["board"], engine_b.game_json(0).unwrap()["board"]);
        assert_eq!(engine_a.stats_json(), engine_b.stats_json());
        assert_eq!(engine_a.leaderboard_json(), engine_b.leaderboard_json());
        assert_eq!(engine_a.active_games_json(), engine_b.active_games_json());
    }
}
