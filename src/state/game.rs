//! Game session state management.
//!
//! Tracks active game sessions: board, fixed player order, move history,
//! turn rotation, and the win transition. A session has exactly two
//! lifecycle states: `Active` (initial) and `Won` (terminal).

use std::collections::BTreeMap;

use super::board::{Board, Position};

/// Game state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Game in progress
    #[default]
    Active,
    /// Game won by a player (terminal)
    Won,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Won => "won",
        }
    }

    /// Check if game can receive moves.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Check if game is terminal (cannot change).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won)
    }
}

/// A single applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub player: String,
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// Wire form: a `[player, row, col]` triple.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!([self.player, self.row, self.col])
    }
}

/// Move rejection reasons.
///
/// These are expected outcomes, not fatal errors: a rejected move leaves
/// the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Game already has a winner
    GameOver,
    /// Row or column outside the grid
    OutOfBounds,
    /// Target cell already occupied
    CellOccupied,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GameOver => write!(f, "Game already has a winner"),
            Self::OutOfBounds => write!(f, "Position is outside the grid"),
            Self::CellOccupied => write!(f, "Cell is already occupied"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Game session state.
#[derive(Debug, Clone)]
pub struct Game {
    /// Sequential game ID, assigned at creation, never reused
    pub id: u64,

    /// Grid size, fixed at creation
    pub grid_size: usize,

    /// Target player count, fixed at creation
    pub num_players: usize,

    /// The game board
    board: Board,

    /// Participating player addresses in turn order, fixed at creation
    players: Vec<String>,

    /// Whose turn it is: always moves().len() % num_players
    pub current_player_index: usize,

    /// Winning player address, set once
    pub winner: Option<String>,

    /// Append-only move log
    moves_history: Vec<Move>,

    /// Current status
    pub status: GameStatus,

    /// When the session was created
    pub start_time: chrono::DateTime<chrono::Utc>,

    /// When the session was won
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

impl Game {
    /// Create a new active session with a fixed player roster.
    pub fn new(id: u64, grid_size: usize, num_players: usize, players: Vec<String>) -> Self {
        Self {
            id,
            grid_size,
            num_players,
            board: Board::new(grid_size),
            players,
            current_player_index: 0,
            winner: None,
            moves_history: Vec::new(),
            status: GameStatus::Active,
            start_time: chrono::Utc::now(),
            end_time: None,
        }
    }

    /// Apply a move for a player.
    ///
    /// Rejects moves on a won game, out-of-range coordinates, and occupied
    /// cells; a rejection mutates nothing. Note that the session does not
    /// verify `player` is the player whose turn it is — any participant
    /// (or indeed any address) may move on any turn as long as the cell is
    /// vacant. Turn enforcement is left to the caller as a policy choice.
    pub fn apply_move(&mut self, player: &str, row: usize, col: usize) -> Result<(), MoveError> {
        if !self.status.is_active() {
            return Err(MoveError::GameOver);
        }

        let pos = Position::new(row, col);
        if !pos.is_within(self.grid_size) {
            return Err(MoveError::OutOfBounds);
        }
        if !self.board.is_vacant(pos) {
            return Err(MoveError::CellOccupied);
        }

        self.board.occupy(pos, player);
        self.moves_history.push(Move {
            player: player.to_string(),
            row,
            col,
        });
        self.current_player_index = self.moves_history.len() % self.num_players;

        Ok(())
    }

    /// Check the board for a winner, transitioning to `Won` on the first
    /// find and recording winner and end time.
    ///
    /// Idempotent: once won, returns the recorded winner without
    /// re-scanning or touching state.
    pub fn check_win(&mut self) -> Option<&str> {
        if self.status.is_terminal() {
            return self.winner.as_deref();
        }

        let winner = self.board.find_winner()?.to_string();
        self.winner = Some(winner);
        self.status = GameStatus::Won;
        self.end_time = Some(chrono::Utc::now());

        self.winner.as_deref()
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Participating players in turn order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Check if an address is a participant.
    pub fn has_player(&self, address: &str) -> bool {
        self.players.iter().any(|p| p == address)
    }

    /// Applied moves, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves_history
    }

    /// Number of moves applied.
    pub fn move_count(&self) -> usize {
        self.moves_history.len()
    }

    /// Convert full session state to a JSON snapshot.
    pub fn to_json(&self) -> serde_json::Value {
        let moves: Vec<serde_json::Value> =
            self.moves_history.iter().map(|m| m.to_json()).collect();

        serde_json::json!({
            "game_id": self.id,
            "grid_size": self.grid_size,
            "num_players": self.num_players,
            "board": self.board.to_json(),
            "current_player": self.current_player_index,
            "players": self.players,
            "winner": self.winner,
            "moves_history": moves,
            "start_time": self.start_time.to_rfc3339(),
            "end_time": self.end_time.map(|t| t.to_rfc3339()),
        })
    }

    /// Convert to the short JSON row used in active-game listings.
    pub fn summary_json(&self) -> serde_json::Value {
        serde_json::json!({
            "game_id": self.id,
            "grid_size": self.grid_size,
            "num_players": self.num_players,
            "current_player": self.current_player_index,
            "moves_made": self.moves_history.len(),
        })
    }
}

/// Game manager - owns all sessions, keyed by sequential ID.
#[derive(Debug, Default)]
pub struct GameManager {
    /// Sessions by ID; ordered map so iteration follows creation order
    games: BTreeMap<u64, Game>,

    /// Next ID to assign: equals the count of games ever created
    next_id: u64,
}

impl GameManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with the next sequential ID and store it.
    pub fn create(&mut self, grid_size: usize, num_players: usize, players: Vec<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.games.insert(id, Game::new(id, grid_size, num_players, players));
        id
    }

    /// Get a session.
    pub fn get(&self, game_id: u64) -> Option<&Game> {
        self.games.get(&game_id)
    }

    /// Get a mutable session.
    pub fn get_mut(&mut self, game_id: u64) -> Option<&mut Game> {
        self.games.get_mut(&game_id)
    }

    /// All sessions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    /// Sessions with no winner yet, in creation order.
    pub fn active(&self) -> impl Iterator<Item = &Game> {
        self.games.values().filter(|g| g.winner.is_none())
    }

    /// Count sessions still in play.
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Total session count.
    pub fn count(&self) -> usize {
        self.games.len()
    }
}
