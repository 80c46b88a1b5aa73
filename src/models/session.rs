//! Session and SessionState.

use crate::models::court::RoundOutcome;
use crate::models::player::{Player, PlayerId, PlayerStats};
use crate::models::roster::Roster;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Courts used when a session is created without an explicit count.
pub const DEFAULT_NUM_COURTS: usize = 2;

/// Errors that can occur during session operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// Not enough players for even one court (need at least 4).
    NotEnoughPlayers,
    /// Court count must be positive.
    InvalidCourtCount,
    /// Session is not in a state that allows this action.
    InvalidState,
    /// Player names must not be blank.
    EmptyName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player not found in the roster.
    PlayerNotFound(PlayerId),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NotEnoughPlayers => {
                write!(f, "Not enough players for even one court (need at least 4)")
            }
            SessionError::InvalidCourtCount => write!(f, "Number of courts must be positive"),
            SessionError::InvalidState => write!(f, "Invalid state for this action"),
            SessionError::EmptyName => write!(f, "Player name must not be empty"),
            SessionError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            SessionError::PlayerNotFound(_) => write!(f, "Player not found"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// Current phase of the session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Entering players and court count; no game yet.
    #[default]
    Setup,
    /// At least one round has been generated.
    InProgress,
}

/// A generated round, kept for the session's history.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub game_number: u32,
    pub generated_at: DateTime<Utc>,
    pub outcome: RoundOutcome,
}

/// Full session state: roster, court count, current round and history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub roster: Roster,
    pub num_courts: usize,
    /// 0 before the first game, then the number of the current game.
    pub game_number: u32,
    pub state: SessionState,
    /// Rounds generated so far, oldest first. The last one is the current game.
    pub history: Vec<RoundRecord>,
}

impl Session {
    /// Create a new session in Setup state with no players.
    pub fn new(num_courts: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            roster: Roster::new(),
            num_courts,
            game_number: 0,
            state: SessionState::Setup,
            history: Vec::new(),
        }
    }

    /// Create a session with initial players. Still in Setup until started.
    /// Blank and duplicate names are skipped with a warning.
    pub fn with_players<I, S>(names: I, num_courts: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut session = Self::new(num_courts);
        session.add_players(names);
        session
    }

    /// Add several players, keeping going past rejected names.
    /// Returns each rejected name with the reason.
    pub fn add_players<I, S>(&mut self, names: I) -> Vec<(String, SessionError)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rejected = Vec::new();
        for name in names {
            let name = name.into();
            if let Err(e) = self.add_player(name.as_str()) {
                log::warn!("Skipping player {:?}: {}", name, e);
                rejected.push((name, e));
            }
        }
        rejected
    }

    pub fn players(&self) -> &[Player] {
        &self.roster.players
    }

    /// The round currently on court, if any.
    pub fn current_round(&self) -> Option<&RoundRecord> {
        self.history.last()
    }

    /// Add a player (valid in Setup or InProgress). Names must be unique (case-insensitive).
    /// A player joining mid-session waits for the next game.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, SessionError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.roster.find_by_name(name_trimmed).is_some() {
            return Err(SessionError::DuplicatePlayerName);
        }
        let player = Player::new(name_trimmed);
        let id = player.id;
        self.roster.players.push(player);
        Ok(id)
    }

    /// Remove a player by id and purge them from everyone's partner history.
    /// The current round is left as generated; the next game re-assigns without them.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<Player, SessionError> {
        let removed = self
            .roster
            .remove_player(player_id)
            .ok_or(SessionError::PlayerNotFound(player_id))?;
        if self.state == SessionState::InProgress {
            log::info!(
                "{} removed; next game will re-assign the remaining {} players",
                removed.name,
                self.roster.len()
            );
        }
        Ok(removed)
    }

    /// Set the number of courts (only valid in Setup).
    pub fn set_num_courts(&mut self, num_courts: usize) -> Result<(), SessionError> {
        if self.state != SessionState::Setup {
            return Err(SessionError::InvalidState);
        }
        if num_courts == 0 {
            return Err(SessionError::InvalidCourtCount);
        }
        self.num_courts = num_courts;
        Ok(())
    }

    /// Reset: back to an empty Setup session with the same court count.
    pub fn reset(&mut self) {
        let id = self.id;
        *self = Self::new(self.num_courts);
        self.id = id;
    }

    /// Stats for every player, least played first.
    pub fn player_stats(&self) -> Vec<PlayerStats> {
        self.roster.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_player_rejects_blank_and_duplicate_names() {
        let mut s = Session::new(1);
        s.add_player("  Ann ").unwrap();
        assert_eq!(s.players()[0].name, "Ann");
        assert_eq!(s.add_player("   "), Err(SessionError::EmptyName));
        assert_eq!(s.add_player("ann"), Err(SessionError::DuplicatePlayerName));
        assert_eq!(s.players().len(), 1);
    }

    #[test]
    fn with_players_skips_invalid_names() {
        let s = Session::with_players(["Ann", "", "Bob", "BOB"], 1);
        let names: Vec<_> = s.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob"]);
    }

    #[test]
    fn add_players_reports_rejected_names() {
        let mut s = Session::new(1);
        let rejected = s.add_players(["Élise", " ", "élise", "Bob"]);
        assert_eq!(
            rejected,
            vec![
                (" ".to_string(), SessionError::EmptyName),
                ("élise".to_string(), SessionError::DuplicatePlayerName),
            ]
        );
        assert_eq!(s.players().len(), 2);
    }

    #[test]
    fn set_num_courts_rejects_zero() {
        let mut s = Session::new(2);
        assert_eq!(s.set_num_courts(0), Err(SessionError::InvalidCourtCount));
        s.set_num_courts(3).unwrap();
        assert_eq!(s.num_courts, 3);
    }

    #[test]
    fn remove_unknown_player_fails() {
        let mut s = Session::new(1);
        let id = Uuid::new_v4();
        assert!(matches!(s.remove_player(id), Err(SessionError::PlayerNotFound(x)) if x == id));
    }

    #[test]
    fn reset_keeps_id_and_courts() {
        let mut s = Session::with_players(["Ann", "Bob"], 3);
        let id = s.id;
        s.reset();
        assert_eq!(s.id, id);
        assert_eq!(s.num_courts, 3);
        assert!(s.players().is_empty());
        assert_eq!(s.state, SessionState::Setup);
    }
}
