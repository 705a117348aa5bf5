//! Matchmaking queue.
//!
//! A single global FIFO pool of players waiting for a session. When an
//! arrival brings the pool to the requested player count, the whole pool
//! (arrival order preserved, the triggering player last) becomes the
//! roster of a new session and the queue is cleared in the same step.
//!
//! The pool is deliberately not partitioned by grid size or player
//! count: requests with different parameters compete for the same slots.
//! That mirrors the behavior this engine replaces; callers wanting
//! partitioned matchmaking must layer it on top.

/// FIFO pool of waiting player addresses.
#[derive(Debug, Clone, Default)]
pub struct MatchmakingQueue {
    waiting: Vec<String>,
}

/// Result of offering a player to the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueOutcome {
    /// Enough players: the full roster in arrival order, queue cleared
    Started { players: Vec<String> },
    /// Still waiting; `remaining` more waiters are needed before the
    /// final, session-triggering arrival
    Waiting { remaining: usize },
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a player to the queue for a session of `num_players`.
    ///
    /// If this arrival reaches `num_players`, returns the roster (waiters
    /// in FIFO order, this player appended last) and clears the queue
    /// atomically. Otherwise appends the player and reports how many more
    /// waiters are needed.
    pub fn enqueue_or_start(&mut self, player: &str, num_players: usize) -> QueueOutcome {
        if self.waiting.len() + 1 == num_players {
            let mut players = std::mem::take(&mut self.waiting);
            players.push(player.to_string());
            QueueOutcome::Started { players }
        } else {
            self.waiting.push(player.to_string());
            // Counts further waiters needed before the session-triggering
            // arrival; saturates rather than underflow on nonsense counts.
            QueueOutcome::Waiting {
                remaining: num_players.saturating_sub(self.waiting.len() + 1),
            }
        }
    }

    /// Waiting players in arrival order.
    pub fn waiting(&self) -> &[String] {
        &self.waiting
    }

    /// Check if a player is already waiting.
    pub fn contains(&self, player: &str) -> bool {
        self.waiting.iter().any(|p| p == player)
    }

    /// Number of waiting players.
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    /// Check if nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Convert to JSON for the inspection layer.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "waiting_players": self.waiting })
    }
}
