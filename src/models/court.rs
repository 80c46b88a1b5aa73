//! Court, CourtAssignment and RoundOutcome for one round of doubles.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Players on a full court.
pub const PLAYERS_PER_COURT: usize = 4;

/// Four players on one court: `[P1, P2]` against `[P3, P4]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub players: [PlayerId; PLAYERS_PER_COURT],
}

impl Court {
    pub fn new(players: [PlayerId; PLAYERS_PER_COURT]) -> Self {
        Self { players }
    }

    pub fn team_1(&self) -> [PlayerId; 2] {
        [self.players[0], self.players[1]]
    }

    pub fn team_2(&self) -> [PlayerId; 2] {
        [self.players[2], self.players[3]]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }
}

/// What the pairing engine produced: full courts plus anyone it could not seat.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourtAssignment {
    pub courts: Vec<Court>,
    pub unassigned: Vec<PlayerId>,
}

/// Result of one full round: courts in play and everyone resting.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub courts: Vec<Court>,
    pub sitting_out: Vec<PlayerId>,
}

impl RoundOutcome {
    /// Every player id in the round, seated ones first.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.courts
            .iter()
            .flat_map(|c| c.players)
            .chain(self.sitting_out.iter().copied())
    }
}
