//! Special plays that pause the normal pitch/swing loop.
//!
//! While `CurrentPlay` is set the game is waiting on a decision, and the
//! turn arbiter only accepts the action that resolves it.

use crate::state::{Base, Runner};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A per-base yes/no decision map.
///
/// Used both for steal declarations (keyed by the runner's origin base)
/// and for contested-advance decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseDecisions {
    pub first: bool,
    pub second: bool,
    pub third: bool,
}

impl BaseDecisions {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            first: false,
            second: false,
            third: false,
        }
    }

    #[must_use]
    pub const fn get(&self, base: Base) -> bool {
        match base {
            Base::First => self.first,
            Base::Second => self.second,
            Base::Third => self.third,
        }
    }

    pub fn set(&mut self, base: Base, value: bool) {
        match base {
            Base::First => self.first = value,
            Base::Second => self.second = value,
            Base::Third => self.third = value,
        }
    }

    /// Declared bases, lead runner first.
    pub fn declared_descending(&self) -> impl Iterator<Item = Base> + '_ {
        [Base::Third, Base::Second, Base::First]
            .into_iter()
            .filter(|&b| self.get(b))
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.first || self.second || self.third
    }
}

/// What kind of contested advance is pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceKind {
    /// Take the extra base on a single (origin base + 2).
    OnSingle,
    /// Try to score from third on a double (runner started on first).
    OnDouble,
    /// Tag up after a caught fly ball (origin base + 1).
    TagUp,
}

impl AdvanceKind {
    /// Where the runner stands while the decision is pending.
    ///
    /// Hits apply standard advancement before asking; tag-ups hold.
    #[must_use]
    pub const fn holding_base(self, from: Base) -> Base {
        match self {
            AdvanceKind::TagUp => from,
            AdvanceKind::OnSingle | AdvanceKind::OnDouble => match from {
                Base::First => Base::Second,
                Base::Second | Base::Third => Base::Third,
            },
        }
    }

    /// Advancement target as a base number (4 = home plate).
    #[must_use]
    pub const fn target(self, from: Base) -> u8 {
        match self {
            AdvanceKind::OnSingle => from.number() + 2,
            AdvanceKind::OnDouble => 4,
            AdvanceKind::TagUp => from.number() + 1,
        }
    }
}

/// One runner with a pending advance decision, keyed by origin base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceSlot {
    pub runner: Runner,
    pub from: Base,
}

/// One base of a resolved steal attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealBaseResult {
    pub runner: Runner,
    pub from: Base,
    /// Target base number (2 or 3; stealing home is not offered).
    pub to: u8,
    pub roll: u8,
    pub catcher_arm: i32,
    /// The runner's effective speed, after the third-base penalty.
    pub target: i32,
    pub safe: bool,
}

/// Overall verdict of a steal attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StealOutcome {
    /// Declared but not yet rolled.
    Pending,
    /// Every attempted runner made it.
    Safe,
    /// At least one runner was thrown out.
    Out,
}

/// A resolved steal attempt awaiting the fielding side's acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingStealAttempt {
    pub results: SmallVec<[StealBaseResult; 2]>,
    pub outcome: StealOutcome,
}

impl PendingStealAttempt {
    /// Aggregate per-base results: `Out` if anyone was caught.
    #[must_use]
    pub fn verdict(results: &[StealBaseResult]) -> StealOutcome {
        if results.is_empty() {
            StealOutcome::Pending
        } else if results.iter().all(|r| r.safe) {
            StealOutcome::Safe
        } else {
            StealOutcome::Out
        }
    }
}

/// How a ground ball with a runner on first resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoublePlayOutcome {
    /// Lead runner and batter both retired.
    DoublePlay,
    /// Lead runner out, batter beat the relay.
    FieldersChoice,
}

/// Record of the infield throw on a ground ball with a force at second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoublePlayDetails {
    pub outcome: DoublePlayOutcome,
    pub roll: u8,
    pub defense: i32,
    pub batter_speed: i32,
}

/// A play blocking the normal loop until someone decides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrentPlay {
    /// A steal has been declared and rolled; the fielding side must
    /// acknowledge before play resumes.
    StealAttempt { declared: BaseDecisions },
    /// Contested advances; the batting side owes a per-runner decision.
    Advance {
        kind: AdvanceKind,
        slots: SmallVec<[AdvanceSlot; 3]>,
        initial_event: String,
    },
    /// Ground ball with the infield in and a runner on third; the batting
    /// side chooses whether to send the runner home.
    InfieldInChoice {
        runner_on_third: Runner,
        batter: Runner,
        runner_on_second: Option<Runner>,
        runner_on_first: Option<Runner>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use smallvec::smallvec;

    fn runner(id: i32) -> Runner {
        Runner::new(CardId(id), CardId(90))
    }

    fn result(id: i32, safe: bool) -> StealBaseResult {
        StealBaseResult {
            runner: runner(id),
            from: Base::First,
            to: 2,
            roll: 10,
            catcher_arm: 2,
            target: 15,
            safe,
        }
    }

    #[test]
    fn test_decisions_descending_order() {
        let mut d = BaseDecisions::none();
        d.set(Base::First, true);
        d.set(Base::Third, true);

        let declared: Vec<_> = d.declared_descending().collect();
        assert_eq!(declared, vec![Base::Third, Base::First]);
        assert!(d.any());
        assert!(!BaseDecisions::none().any());
    }

    #[test]
    fn test_advance_geometry() {
        assert_eq!(AdvanceKind::OnSingle.holding_base(Base::Second), Base::Third);
        assert_eq!(AdvanceKind::OnSingle.target(Base::Second), 4);
        assert_eq!(AdvanceKind::OnSingle.holding_base(Base::First), Base::Second);
        assert_eq!(AdvanceKind::OnSingle.target(Base::First), 3);

        assert_eq!(AdvanceKind::OnDouble.holding_base(Base::First), Base::Third);
        assert_eq!(AdvanceKind::OnDouble.target(Base::First), 4);

        assert_eq!(AdvanceKind::TagUp.holding_base(Base::Second), Base::Second);
        assert_eq!(AdvanceKind::TagUp.target(Base::Second), 3);
    }

    #[test]
    fn test_steal_verdict() {
        assert_eq!(PendingStealAttempt::verdict(&[]), StealOutcome::Pending);
        assert_eq!(
            PendingStealAttempt::verdict(&[result(1, true), result(2, true)]),
            StealOutcome::Safe
        );
        assert_eq!(
            PendingStealAttempt::verdict(&[result(1, true), result(2, false)]),
            StealOutcome::Out
        );
    }

    #[test]
    fn test_current_play_serde() {
        let play = CurrentPlay::Advance {
            kind: AdvanceKind::TagUp,
            slots: smallvec![AdvanceSlot {
                runner: runner(4),
                from: Base::Third,
            }],
            initial_event: "Batter flies out.".into(),
        };
        let json = serde_json::to_string(&play).unwrap();
        let back: CurrentPlay = serde_json::from_str(&json).unwrap();
        assert_eq!(play, back);
    }
}
