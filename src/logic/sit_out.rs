//! Sit-out selection: who rests this round.

use crate::models::{PlayerId, PlayerStatus, Roster, PLAYERS_PER_COURT};
use rand::Rng;
use std::cmp::Reverse;

/// Players forwarded to court pairing, and players resting this round.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SitOutSelection {
    pub candidates: Vec<PlayerId>,
    pub sitting_out: Vec<PlayerId>,
}

/// How many players cannot get a seat: `max(0, players - courts * 4)`.
pub fn num_to_sit_out(num_players: usize, num_courts: usize) -> usize {
    num_players.saturating_sub(num_courts.saturating_mul(PLAYERS_PER_COURT))
}

/// Close out the previous round and choose this round's resters.
///
/// 1. Everyone becomes available again; anyone who just rested starts a fresh streak.
/// 2. Sort available players by most consecutive games, then most games played, then fewest
///    rests, then a random tiebreak.
/// 3. The first `num_to_sit_out` rest: marked sitting out with the rest counted now.
pub fn select_sit_outs<R: Rng + ?Sized>(
    roster: &mut Roster,
    num_courts: usize,
    rng: &mut R,
) -> SitOutSelection {
    for p in &mut roster.players {
        p.make_available();
    }

    let excess = num_to_sit_out(roster.len(), num_courts);
    if excess == 0 {
        return SitOutSelection {
            candidates: roster.ids(),
            sitting_out: Vec::new(),
        };
    }

    let mut ranked: Vec<(PlayerId, (Reverse<u32>, Reverse<u32>, u32, u32))> = roster
        .players
        .iter()
        .filter(|p| p.status == PlayerStatus::Available)
        .map(|p| {
            let key = (
                Reverse(p.played_consecutive_games),
                Reverse(p.games_played),
                p.games_sat_out,
                rng.gen::<u32>(),
            );
            (p.id, key)
        })
        .collect();
    ranked.sort_by_key(|(_, key)| *key);

    let sitting_out: Vec<PlayerId> = ranked.into_iter().take(excess).map(|(id, _)| id).collect();
    for &id in &sitting_out {
        if let Some(p) = roster.get_mut(id) {
            p.mark_sitting_out();
            p.record_sat_out();
        }
    }

    let candidates = roster
        .players
        .iter()
        .filter(|p| !sitting_out.contains(&p.id))
        .map(|p| p.id)
        .collect();

    SitOutSelection {
        candidates,
        sitting_out,
    }
}
