//! One full round: pick resters, pair the rest onto courts, bench whoever is left over.

use crate::logic::pairing::assign_players_to_courts;
use crate::logic::sit_out::select_sit_outs;
use crate::models::{Roster, RoundOutcome};
use rand::Rng;

/// Generate the next round for `roster` on `num_courts` courts.
///
/// Players the pairing step could not seat join the resters and have their rest counted,
/// so every player ends the round either on a court or sitting out.
pub fn rotate_players<R: Rng + ?Sized>(
    roster: &mut Roster,
    num_courts: usize,
    rng: &mut R,
) -> RoundOutcome {
    let selection = select_sit_outs(roster, num_courts, rng);
    let assignment = assign_players_to_courts(roster, &selection.candidates, num_courts, rng);

    let mut sitting_out = selection.sitting_out;
    for id in assignment.unassigned {
        if sitting_out.contains(&id) {
            continue;
        }
        if let Some(p) = roster.get_mut(id) {
            log::debug!("{} could not be seated and sits out", p.name);
            p.mark_sitting_out();
            p.record_sat_out();
        }
        sitting_out.push(id);
    }

    log::debug!(
        "Round generated: {} court(s), {} sitting out",
        assignment.courts.len(),
        sitting_out.len()
    );

    RoundOutcome {
        courts: assignment.courts,
        sitting_out,
    }
}
