//! Roster: the players of a session together with their partner history.

use crate::models::partners::Partnerships;
use crate::models::player::{Player, PlayerId, PlayerStats};
use serde::{Deserialize, Serialize};

/// Everything the rotation core reads and writes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    pub players: Vec<Player>,
    pub partners: Partnerships,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster of fresh players, one per name.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: names.into_iter().map(Player::new).collect(),
            partners: Partnerships::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Case-insensitive lookup, Unicode-aware.
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = name.to_lowercase();
        self.players.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    /// Remove a player and forget every partnership they were part of.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        self.partners.remove_player(id);
        Some(self.players.remove(idx))
    }

    /// Stats view of one player, partner names sorted.
    pub fn stats_for(&self, player: &Player) -> PlayerStats {
        let mut partners: Vec<String> = self
            .partners
            .partners_of(player.id)
            .filter_map(|id| self.get(id).map(|p| p.name.clone()))
            .collect();
        partners.sort();
        PlayerStats {
            id: player.id,
            name: player.name.clone(),
            games_played: player.games_played,
            games_sat_out: player.games_sat_out,
            played_consecutive_games: player.played_consecutive_games,
            partners,
        }
    }

    /// Stats for everyone, least played first (then least rested, then by name).
    pub fn stats(&self) -> Vec<PlayerStats> {
        let mut players: Vec<&Player> = self.players.iter().collect();
        players.sort_by(|a, b| {
            (a.games_played, a.games_sat_out, &a.name).cmp(&(b.games_played, b.games_sat_out, &b.name))
        });
        players.into_iter().map(|p| self.stats_for(p)).collect()
    }
}
