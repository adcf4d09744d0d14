//! Vote ledger state machine.
//!
//! A voter holds at most one vote per answer. Casting a vote is resolved
//! against the voter's existing vote (if any) into a [`VoteTransition`],
//! which determines both the vote-row mutation and the counter deltas to
//! apply to the answer. Keeping this pure lets the persistence layer run the
//! whole sequence inside one transaction while the arithmetic stays testable.

use serde::Serialize;

use crate::error::CoreError;

/// Direction of a single vote. Stored as `+1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn value(self) -> i16 {
        match self {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        }
    }

    /// Parse a stored or client-supplied vote value. Only `1` and `-1` are
    /// accepted.
    pub fn from_value(value: i64) -> Result<Self, CoreError> {
        match value {
            1 => Ok(VoteDirection::Up),
            -1 => Ok(VoteDirection::Down),
            _ => Err(CoreError::Validation(
                "Vote must be 1 (upvote) or -1 (downvote)".into(),
            )),
        }
    }
}

/// What happens to a voter's vote row when they click a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No prior vote: insert one.
    Cast(VoteDirection),
    /// Same direction clicked again: delete the existing vote.
    Retract(VoteDirection),
    /// Opposite direction clicked: rewrite the existing vote.
    Flip {
        from: VoteDirection,
        to: VoteDirection,
    },
}

impl VoteTransition {
    pub fn resolve(existing: Option<VoteDirection>, requested: VoteDirection) -> Self {
        match existing {
            None => VoteTransition::Cast(requested),
            Some(prev) if prev == requested => VoteTransition::Retract(requested),
            Some(prev) => VoteTransition::Flip {
                from: prev,
                to: requested,
            },
        }
    }

    /// Counter adjustments implied by this transition.
    pub fn deltas(self) -> CounterDelta {
        match self {
            VoteTransition::Cast(dir) => CounterDelta::ZERO.add(dir, 1),
            VoteTransition::Retract(dir) => CounterDelta::ZERO.add(dir, -1),
            VoteTransition::Flip { from, to } => CounterDelta::ZERO.add(from, -1).add(to, 1),
        }
    }

    /// The vote the voter holds after the transition.
    pub fn resulting_vote(self) -> Option<VoteDirection> {
        match self {
            VoteTransition::Cast(dir) => Some(dir),
            VoteTransition::Retract(_) => None,
            VoteTransition::Flip { to, .. } => Some(to),
        }
    }
}

/// Signed change to an answer's `(upvotes, downvotes)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDelta {
    pub upvotes: i32,
    pub downvotes: i32,
}

impl CounterDelta {
    pub const ZERO: CounterDelta = CounterDelta {
        upvotes: 0,
        downvotes: 0,
    };

    fn add(mut self, dir: VoteDirection, by: i32) -> Self {
        match dir {
            VoteDirection::Up => self.upvotes += by,
            VoteDirection::Down => self.downvotes += by,
        }
        self
    }
}

/// An answer's vote counters. `total_votes` is always derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub upvotes: i32,
    pub downvotes: i32,
    total_votes: i32,
}

impl VoteTally {
    pub fn new(upvotes: i32, downvotes: i32) -> Self {
        Self {
            upvotes,
            downvotes,
            total_votes: upvotes - downvotes,
        }
    }

    /// Count a set of votes.
    pub fn from_votes(votes: impl IntoIterator<Item = VoteDirection>) -> Self {
        let (up, down) = votes.into_iter().fold((0, 0), |(up, down), v| match v {
            VoteDirection::Up => (up + 1, down),
            VoteDirection::Down => (up, down + 1),
        });
        Self::new(up, down)
    }

    pub fn total_votes(&self) -> i32 {
        self.total_votes
    }

    pub fn apply(self, delta: CounterDelta) -> Self {
        Self::new(self.upvotes + delta.upvotes, self.downvotes + delta.downvotes)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn cast(
        tally: VoteTally,
        existing: Option<VoteDirection>,
        dir: VoteDirection,
    ) -> (VoteTally, Option<VoteDirection>) {
        let t = VoteTransition::resolve(existing, dir);
        (tally.apply(t.deltas()), t.resulting_vote())
    }

    #[test]
    fn only_plus_and_minus_one_are_valid() {
        assert_eq!(VoteDirection::from_value(1).unwrap(), VoteDirection::Up);
        assert_eq!(VoteDirection::from_value(-1).unwrap(), VoteDirection::Down);
        assert_matches!(VoteDirection::from_value(0), Err(CoreError::Validation(_)));
        assert_matches!(VoteDirection::from_value(2), Err(CoreError::Validation(_)));
    }

    #[test]
    fn first_vote_is_cast() {
        let t = VoteTransition::resolve(None, VoteDirection::Down);
        assert_eq!(t, VoteTransition::Cast(VoteDirection::Down));
        assert_eq!(t.deltas(), CounterDelta { upvotes: 0, downvotes: 1 });
    }

    #[test]
    fn same_direction_twice_retracts() {
        let t = VoteTransition::resolve(Some(VoteDirection::Up), VoteDirection::Up);
        assert_eq!(t, VoteTransition::Retract(VoteDirection::Up));
        assert_eq!(t.resulting_vote(), None);
        assert_eq!(t.deltas(), CounterDelta { upvotes: -1, downvotes: 0 });
    }

    #[test]
    fn flip_moves_one_vote_between_counters() {
        let up_to_down = VoteTransition::resolve(Some(VoteDirection::Up), VoteDirection::Down);
        assert_eq!(up_to_down.deltas(), CounterDelta { upvotes: -1, downvotes: 1 });

        let down_to_up = VoteTransition::resolve(Some(VoteDirection::Down), VoteDirection::Up);
        assert_eq!(down_to_up.deltas(), CounterDelta { upvotes: 1, downvotes: -1 });
    }

    // Regression: +1 then -1 must leave 0 up / 1 down, never 1 / 1.
    #[test]
    fn upvote_then_downvote_nets_single_downvote() {
        let (tally, vote) = cast(VoteTally::default(), None, VoteDirection::Up);
        assert_eq!((tally.upvotes, tally.downvotes), (1, 0));

        let (tally, vote) = cast(tally, vote, VoteDirection::Down);
        assert_eq!((tally.upvotes, tally.downvotes), (0, 1));
        assert_eq!(tally.total_votes(), -1);
        assert_eq!(vote, Some(VoteDirection::Down));
    }

    #[test]
    fn toggle_scenario_restores_starting_counts() {
        let start = VoteTally::new(3, 1);
        assert_eq!(start.total_votes(), 2);

        let (after_up, vote) = cast(start, None, VoteDirection::Up);
        assert_eq!(after_up, VoteTally::new(4, 1));
        assert_eq!(after_up.total_votes(), 3);

        let (after_toggle, vote) = cast(after_up, vote, VoteDirection::Up);
        assert_eq!(after_toggle, start);
        assert_eq!(vote, None);
    }

    #[test]
    fn total_is_always_up_minus_down() {
        let mut tally = VoteTally::new(2, 5);
        let mut vote = None;
        for dir in [
            VoteDirection::Up,
            VoteDirection::Down,
            VoteDirection::Down,
            VoteDirection::Up,
            VoteDirection::Up,
        ] {
            (tally, vote) = cast(tally, vote, dir);
            assert_eq!(tally.total_votes(), tally.upvotes - tally.downvotes);
        }
    }

    #[test]
    fn tally_from_vote_set() {
        let tally = VoteTally::from_votes([
            VoteDirection::Up,
            VoteDirection::Up,
            VoteDirection::Down,
        ]);
        assert_eq!(tally, VoteTally::new(2, 1));
    }

    #[test]
    fn tally_serializes_with_total() {
        let json = serde_json::to_value(VoteTally::new(4, 1)).unwrap();
        assert_eq!(json, serde_json::json!({"upvotes": 4, "downvotes": 1, "totalVotes": 3}));
    }
}
