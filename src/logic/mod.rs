//! Rotation logic: sit-out selection, court pairing, and the session flow around them.

mod pairing;
mod rotation;
mod session_flow;
mod sit_out;

pub use pairing::assign_players_to_courts;
pub use rotation::rotate_players;
pub use session_flow::{next_game, start_game};
pub use sit_out::{num_to_sit_out, select_sit_outs, SitOutSelection};
