//! Data structures for a court rotation session: players, partner history, courts, session state.

mod court;
mod partners;
mod player;
mod roster;
mod session;

pub use court::{Court, CourtAssignment, RoundOutcome, PLAYERS_PER_COURT};
pub use partners::Partnerships;
pub use player::{Player, PlayerId, PlayerStats, PlayerStatus};
pub use roster::Roster;
pub use session::{
    RoundRecord, Session, SessionError, SessionId, SessionState, DEFAULT_NUM_COURTS,
};
