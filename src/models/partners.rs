//! Session-wide partner history: an undirected relation between player ids.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Who has shared a team with whom, over the whole session.
///
/// Stored as an adjacency map so that both directions of a pair are always present together.
/// History only grows, except when a player leaves the session.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Partnerships {
    adjacency: HashMap<PlayerId, HashSet<PlayerId>>,
}

impl Partnerships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `a` and `b` played on the same team. Self-pairs are ignored.
    pub fn record(&mut self, a: PlayerId, b: PlayerId) {
        if a == b {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    /// Number of distinct partners `id` has had.
    pub fn partner_count(&self, id: PlayerId) -> usize {
        self.adjacency.get(&id).map_or(0, HashSet::len)
    }

    pub fn have_partnered(&self, a: PlayerId, b: PlayerId) -> bool {
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Partners of `id`, in no particular order.
    pub fn partners_of(&self, id: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    /// Drop every pair involving `id`.
    pub fn remove_player(&mut self, id: PlayerId) {
        if let Some(partners) = self.adjacency.remove(&id) {
            for other in partners {
                if let Some(set) = self.adjacency.get_mut(&other) {
                    set.remove(&id);
                    if set.is_empty() {
                        self.adjacency.remove(&other);
                    }
                }
            }
        }
    }

    /// True when every pair is stored in both directions and nobody partners themselves.
    pub fn is_consistent(&self) -> bool {
        self.adjacency.iter().all(|(a, set)| {
            !set.contains(a) && set.iter().all(|b| self.have_partnered(*b, *a))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn record_is_symmetric_and_ignores_self() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut rel = Partnerships::new();
        rel.record(a, b);
        rel.record(a, a);
        assert!(rel.have_partnered(a, b));
        assert!(rel.have_partnered(b, a));
        assert!(!rel.have_partnered(a, a));
        assert_eq!(rel.partner_count(a), 1);
        assert!(rel.is_consistent());
    }

    #[test]
    fn repeat_pair_counts_once() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut rel = Partnerships::new();
        rel.record(a, b);
        rel.record(b, a);
        assert_eq!(rel.partner_count(a), 1);
        assert_eq!(rel.partner_count(b), 1);
    }

    #[test]
    fn remove_player_purges_back_references() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut rel = Partnerships::new();
        rel.record(a, b);
        rel.record(a, c);
        rel.remove_player(a);
        assert_eq!(rel.partner_count(a), 0);
        assert!(!rel.have_partnered(b, a));
        assert!(!rel.have_partnered(c, a));
        assert_eq!(rel.partners_of(b).count(), 0);
        assert!(rel.is_consistent());
    }
}
