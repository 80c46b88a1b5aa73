//! Player, PlayerStatus and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in courts, partner history and lookups).
pub type PlayerId = Uuid;

/// Where a player stands in the current round.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Mid-round only: not yet placed on a court or on the bench.
    #[default]
    Available,
    Playing,
    SittingOut,
}

/// A player in the session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub games_played: u32,
    pub games_sat_out: u32,
    /// Rounds played in a row since the last rest. Zero while sitting out.
    pub played_consecutive_games: u32,
    pub status: PlayerStatus,
}

impl Player {
    /// Create a new player with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            games_played: 0,
            games_sat_out: 0,
            played_consecutive_games: 0,
            status: PlayerStatus::Available,
        }
    }

    /// Seat the player on a court for this round.
    pub fn start_playing(&mut self) {
        self.status = PlayerStatus::Playing;
        self.games_played += 1;
        self.played_consecutive_games += 1;
    }

    /// Bench the player for this round. Breaks any playing streak but does not count the rest;
    /// see [`Player::record_sat_out`].
    pub fn mark_sitting_out(&mut self) {
        self.status = PlayerStatus::SittingOut;
        self.played_consecutive_games = 0;
    }

    /// Record that this player sat out one round.
    pub fn record_sat_out(&mut self) {
        self.games_sat_out += 1;
    }

    /// Reopen the player for the next round's selection.
    pub fn make_available(&mut self) {
        if self.status == PlayerStatus::SittingOut {
            self.played_consecutive_games = 0;
        }
        self.status = PlayerStatus::Available;
    }

    pub fn is_sitting_out(&self) -> bool {
        self.status == PlayerStatus::SittingOut
    }
}

/// Statistics view of a player (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: PlayerId,
    pub name: String,
    pub games_played: u32,
    pub games_sat_out: u32,
    pub played_consecutive_games: u32,
    /// Names of everyone this player has partnered, sorted.
    pub partners: Vec<String>,
}
