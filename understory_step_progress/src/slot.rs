// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot addressing: the alternating step/interval strip.

/// Number of slots for `point_count` points: `2n - 1`, or `0` when empty.
#[must_use]
pub const fn slot_count(point_count: usize) -> usize {
    point_count.saturating_mul(2).saturating_sub(1)
}

/// A logical slot position decoded into what it holds.
///
/// Even positions hold steps (`position / 2` is the point index). Odd positions
/// hold the interval between point `(position - 1) / 2` and the next one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A step slot, carrying its point index.
    Step(usize),
    /// An interval slot, carrying the index of the point it follows.
    Interval(usize),
}

impl Slot {
    /// Decodes a slot position.
    #[must_use]
    pub const fn at(position: usize) -> Self {
        if position.is_multiple_of(2) {
            Self::Step(position / 2)
        } else {
            Self::Interval((position - 1) / 2)
        }
    }

    /// Returns the slot position this value was decoded from.
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::Step(index) => index * 2,
            Self::Interval(index) => index * 2 + 1,
        }
    }

    /// Returns `true` for step slots.
    #[must_use]
    pub const fn is_step(self) -> bool {
        matches!(self, Self::Step(_))
    }
}

/// Where a step sits in the sequence.
///
/// Derived from the slot position and point count every time it is needed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StepType {
    /// The leading step (slot 0).
    First,
    /// Any step between the first and the last.
    Middle,
    /// The trailing step (slot `2 * (n - 1)`).
    Last,
}

impl StepType {
    /// Classifies the step at slot `position` in a sequence of `point_count` points.
    ///
    /// `First` takes precedence, so the sole step of a one-point sequence is `First`.
    #[must_use]
    pub const fn classify(position: usize, point_count: usize) -> Self {
        if position == 0 {
            return Self::First;
        }
        match point_count.checked_sub(1) {
            Some(last) if position == last * 2 => Self::Last,
            _ => Self::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Slot, StepType, slot_count};

    #[test]
    fn slot_count_alternates_steps_and_intervals() {
        assert_eq!(slot_count(0), 0);
        assert_eq!(slot_count(1), 1);
        assert_eq!(slot_count(2), 3);
        assert_eq!(slot_count(5), 9);
    }

    #[test]
    fn positions_decode_to_steps_and_intervals() {
        assert_eq!(Slot::at(0), Slot::Step(0));
        assert_eq!(Slot::at(1), Slot::Interval(0));
        assert_eq!(Slot::at(4), Slot::Step(2));
        assert_eq!(Slot::at(5), Slot::Interval(2));
        for position in 0..9 {
            assert_eq!(Slot::at(position).position(), position);
        }
        assert!(Slot::at(2).is_step());
        assert!(!Slot::at(3).is_step());
    }

    #[test]
    fn step_type_classification() {
        assert_eq!(StepType::classify(0, 3), StepType::First);
        assert_eq!(StepType::classify(2, 3), StepType::Middle);
        assert_eq!(StepType::classify(4, 3), StepType::Last);
        // A lone point is first, not last.
        assert_eq!(StepType::classify(0, 1), StepType::First);
        assert_eq!(StepType::classify(2, 2), StepType::Last);
    }
}
