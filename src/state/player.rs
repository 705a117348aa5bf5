//! Player profiles and the registry.
//!
//! A player is identified by an opaque, caller-supplied address. Profiles
//! carry the display name and lifetime counters; they are created on first
//! registration and never destroyed. The registry remembers registration
//! order so that leaderboard ties resolve deterministically.

use std::collections::HashMap;

/// How many players the leaderboard query returns.
pub const LEADERBOARD_SIZE: usize = 10;

/// A registered player profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Opaque identity token, globally unique
    pub address: String,

    /// Display name, set at registration
    pub name: String,

    /// Sessions this player has participated in
    pub games_played: u32,

    /// Sessions this player has won
    pub games_won: u32,

    /// Moves applied across all sessions
    pub total_moves: u32,
}

impl Player {
    pub fn new(address: String, name: String) -> Self {
        Self {
            address,
            name,
            games_played: 0,
            games_won: 0,
            total_moves: 0,
        }
    }

    /// Fraction of played games won; 0 for a player with no games yet.
    pub fn win_rate(&self) -> f64 {
        if self.games_played > 0 {
            f64::from(self.games_won) / f64::from(self.games_played)
        } else {
            0.0
        }
    }

    /// Full profile as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "address": self.address,
            "name": self.name,
            "games_played": self.games_played,
            "games_won": self.games_won,
            "total_moves": self.total_moves,
            "win_rate": self.win_rate(),
        })
    }

    /// The short JSON row used in leaderboard listings.
    pub fn leaderboard_json(&self) -> serde_json::Value {
        serde_json::json!({
            "address": self.address,
            "name": self.name,
            "games_won": self.games_won,
            "win_rate": self.win_rate(),
        })
    }
}

/// Player registry - profiles indexed by address.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    /// Profiles by address
    players: HashMap<String, Player>,

    /// Addresses in registration order, for deterministic iteration
    order: Vec<String>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player. Returns true if a profile was created, false if
    /// the address was already registered (in which case nothing changes,
    /// including the stored name).
    pub fn register(&mut self, address: &str, name: &str) -> bool {
        if self.players.contains_key(address) {
            return false;
        }

        self.players.insert(
            address.to_string(),
            Player::new(address.to_string(), name.to_string()),
        );
        self.order.push(address.to_string());
        true
    }

    /// Get a profile.
    pub fn get(&self, address: &str) -> Option<&Player> {
        self.players.get(address)
    }

    /// Check if an address is registered.
    pub fn contains(&self, address: &str) -> bool {
        self.players.contains_key(address)
    }

    /// Profiles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.order.iter().filter_map(|addr| self.players.get(addr))
    }

    /// Number of registered players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Record session participation for each address.
    pub fn record_game_start(&mut self, addresses: &[String]) {
        for address in addresses {
            if let Some(player) = self.players.get_mut(address) {
                player.games_played += 1;
            }
        }
    }

    /// Record a win for an address.
    pub fn record_win(&mut self, address: &str) {
        if let Some(player) = self.players.get_mut(address) {
            player.games_won += 1;
        }
    }

    /// Record an applied move for an address.
    pub fn record_move(&mut self, address: &str) {
        if let Some(player) = self.players.get_mut(address) {
            player.total_moves += 1;
        }
    }

    /// Top players by games won, at most `limit` of them.
    ///
    /// The sort is stable over registration order, so players with equal
    /// win counts rank by who registered first.
    pub fn leaderboard(&self, limit: usize) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.iter().collect();
        ranked.sort_by(|a, b| b.games_won.cmp(&a.games_won));
        ranked.truncate(limit);
        ranked
    }
}
