//! Command and outcome types.
//!
//! Inbound commands arrive on the wire as a JSON envelope with a
//! `command` tag and a `data` object; [`Command`] is the decoded form
//! handed to the engine. Outbound, every command produces a
//! [`CommandOutcome`]: human-readable notices plus structured events for
//! external indexers. Both channels are advisory; the engine never
//! depends on their delivery.

use serde::Deserialize;

/// A decoded inbound command.
///
/// Anything that does not decode to a known command (unrecognized tag,
/// missing or mistyped fields) becomes `Unknown`, which the engine
/// answers with an invalid-command notice. Malformed input is an
/// expected condition, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", content = "data")]
pub enum Command {
    /// Register a player profile
    #[serde(rename = "REGISTER_PLAYER")]
    RegisterPlayer { address: String, name: String },

    /// Enqueue for matchmaking, possibly forming a session
    #[serde(rename = "START_GAME")]
    StartGame {
        grid_size: usize,
        num_players: usize,
        player_address: String,
    },

    /// Apply a move in an existing session
    #[serde(rename = "MAKE_MOVE")]
    MakeMove {
        game_id: u64,
        player_address: String,
        row: usize,
        col: usize,
    },

    /// Anything else
    #[serde(other)]
    Unknown,
}

impl Command {
    /// Decode a command from its JSON envelope, mapping malformed
    /// payloads to `Unknown`.
    pub fn from_json(payload: &serde_json::Value) -> Self {
        serde_json::from_value(payload.clone()).unwrap_or(Self::Unknown)
    }
}

/// A structured report emitted on a significant state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A session formed and started
    GameStart {
        game_id: u64,
        players: Vec<String>,
        grid_size: usize,
    },
    /// A session was won
    GameWin { game_id: u64, winner: String },
}

impl Event {
    /// The wire payload consumed by external indexers.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::GameStart {
                game_id,
                players,
                grid_size,
            } => serde_json::json!({
                "game_id": game_id,
                "type": "game_start",
                "players": players,
                "grid_size": grid_size,
            }),
            Self::GameWin { game_id, winner } => serde_json::json!({
                "game_id": game_id,
                "type": "game_win",
                "winner": winner,
            }),
        }
    }
}

/// Everything a command emitted, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Human-readable outcome messages; at least one per command
    pub notices: Vec<String>,

    /// Structured events, only on game-start and game-win transitions
    pub events: Vec<Event>,
}

impl CommandOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn notice(&mut self, message: String) {
        self.notices.push(message);
    }

    pub(crate) fn event(&mut self, event: Event) {
        self.events.push(event);
    }
}
