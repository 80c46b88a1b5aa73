//! Court picker: library with models and rotation logic.

pub mod logic;
pub mod models;

pub use logic::{
    assign_players_to_courts, next_game, num_to_sit_out, rotate_players, select_sit_outs,
    start_game, SitOutSelection,
};
pub use models::{
    Court, CourtAssignment, Partnerships, Player, PlayerId, PlayerStats, PlayerStatus, Roster,
    RoundOutcome, RoundRecord, Session, SessionError, SessionId, SessionState, DEFAULT_NUM_COURTS,
    PLAYERS_PER_COURT,
};
