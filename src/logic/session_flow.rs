//! Session flow: start the first game and generate the following ones.

use crate::logic::rotation::rotate_players;
use crate::models::{
    RoundRecord, Session, SessionError, SessionState, PLAYERS_PER_COURT,
};
use chrono::Utc;
use rand::Rng;

/// Start the session: requires Setup, a positive court count and at least 4 players.
/// Generates game 1 and moves the session to InProgress.
pub fn start_game<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) -> Result<(), SessionError> {
    if session.state != SessionState::Setup {
        return Err(SessionError::InvalidState);
    }
    if session.num_courts == 0 {
        return Err(SessionError::InvalidCourtCount);
    }
    if session.roster.len() < PLAYERS_PER_COURT {
        return Err(SessionError::NotEnoughPlayers);
    }
    session.state = SessionState::InProgress;
    session.game_number = 0;
    session.history.clear();
    generate_round(session, rng);
    log::info!(
        "Session {} started with {} players on {} court(s)",
        session.id,
        session.roster.len(),
        session.num_courts
    );
    Ok(())
}

/// Generate the next game (InProgress only). Needs at least 4 players; with fewer than
/// `num_courts * 4` players as many courts as possible are filled.
pub fn next_game<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) -> Result<(), SessionError> {
    if session.state != SessionState::InProgress {
        return Err(SessionError::InvalidState);
    }
    let players = session.roster.len();
    if players < PLAYERS_PER_COURT {
        return Err(SessionError::NotEnoughPlayers);
    }
    if players < session.num_courts.saturating_mul(PLAYERS_PER_COURT) {
        log::warn!(
            "Only {} players for {} courts; forming as many courts as possible",
            players,
            session.num_courts
        );
    }
    generate_round(session, rng);
    Ok(())
}

fn generate_round<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) {
    let outcome = rotate_players(&mut session.roster, session.num_courts, rng);
    session.game_number += 1;
    log::info!(
        "Game {}: {} court(s), {} sitting out",
        session.game_number,
        outcome.courts.len(),
        outcome.sitting_out.len()
    );
    session.history.push(RoundRecord {
        game_number: session.game_number,
        generated_at: Utc::now(),
        outcome,
    });
}
