// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The step data model: points, the active cursor, and per-step tiers.

use alloc::string::String;
use alloc::vec::Vec;

use crate::slot::slot_count;
use crate::{Result, StepProgressError};

/// One labelled step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Primary label.
    pub title: String,
    /// Secondary label; empty when the step has none.
    pub subtitle: String,
}

impl Point {
    /// Creates a point with the given title and no subtitle.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
        }
    }

    /// Sets the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }
}

/// A complete snapshot handed over by the host when new data arrives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    /// Points in display order.
    pub points: Vec<Point>,
    /// Index of the active point.
    pub active_index: usize,
}

impl State {
    /// Creates a state whose first point is active.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            active_index: 0,
        }
    }

    /// Sets the active index.
    #[must_use]
    pub fn with_active_index(mut self, active_index: usize) -> Self {
        self.active_index = active_index;
        self
    }
}

/// Styling class of a step (or interval) relative to the active index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Before the active point.
    Complete,
    /// The active point itself.
    Active,
    /// After the active point.
    Inactive,
}

/// Ordered points plus the active cursor.
///
/// For a non-empty sequence `active_index` always lies in `0..point_count()`.
/// An empty sequence accepts any active index; it has nothing to style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepSequence {
    points: Vec<Point>,
    active_index: usize,
}

impl StepSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: Vec::new(),
            active_index: 0,
        }
    }

    /// Replaces the points and active index wholesale.
    ///
    /// On error nothing is changed.
    pub fn replace(&mut self, points: Vec<Point>, active_index: usize) -> Result<()> {
        check_active_index(active_index, points.len())?;
        self.points = points;
        self.active_index = active_index;
        Ok(())
    }

    /// Moves the active cursor, validating against the current points.
    ///
    /// On error nothing is changed.
    pub fn set_active_index(&mut self, index: usize) -> Result<()> {
        check_active_index(index, self.points.len())?;
        self.active_index = index;
        Ok(())
    }

    /// Number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of slots (steps and intervals) the points expand to.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        slot_count(self.points.len())
    }

    /// Returns the point at `index`, if any.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// All points in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The active index.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// Tier of the step at `index`.
    #[must_use]
    pub const fn tier(&self, index: usize) -> Tier {
        if index < self.active_index {
            Tier::Complete
        } else if index == self.active_index {
            Tier::Active
        } else {
            Tier::Inactive
        }
    }

    /// Tier of the interval following step `index`.
    ///
    /// Intervals leading up to the active step are complete; the rest are inactive.
    #[must_use]
    pub const fn interval_tier(&self, index: usize) -> Tier {
        if index < self.active_index {
            Tier::Complete
        } else {
            Tier::Inactive
        }
    }
}

fn check_active_index(index: usize, len: usize) -> Result<()> {
    if len > 0 && index >= len {
        return Err(StepProgressError::IndexOutOfRange { index, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Point, StepSequence, Tier};
    use crate::StepProgressError;

    fn points(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(alloc::format!("step {i}"))).collect()
    }

    #[test]
    fn tiers_partition_around_active_index() {
        let mut seq = StepSequence::new();
        seq.replace(points(5), 2).unwrap();
        let tiers: Vec<_> = (0..5).map(|i| seq.tier(i)).collect();
        assert_eq!(
            tiers,
            vec![
                Tier::Complete,
                Tier::Complete,
                Tier::Active,
                Tier::Inactive,
                Tier::Inactive,
            ]
        );

        for active in 0..5 {
            seq.set_active_index(active).unwrap();
            assert!((0..active).all(|i| seq.tier(i) == Tier::Complete));
            assert_eq!(seq.tier(active), Tier::Active);
            assert!((active + 1..5).all(|i| seq.tier(i) == Tier::Inactive));
        }
    }

    #[test]
    fn interval_tiers_follow_active_index() {
        let mut seq = StepSequence::new();
        seq.replace(points(3), 1).unwrap();
        assert_eq!(seq.interval_tier(0), Tier::Complete);
        assert_eq!(seq.interval_tier(1), Tier::Inactive);
    }

    #[test]
    fn out_of_range_index_leaves_sequence_unchanged() {
        let mut seq = StepSequence::new();
        seq.replace(points(3), 1).unwrap();
        let before = seq.clone();

        assert_eq!(
            seq.set_active_index(3),
            Err(StepProgressError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(seq, before);

        assert_eq!(
            seq.replace(points(2), 2),
            Err(StepProgressError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(seq, before);
    }

    #[test]
    fn empty_sequence_accepts_any_index() {
        let mut seq = StepSequence::new();
        seq.replace(Vec::new(), 7).unwrap();
        seq.set_active_index(42).unwrap();
        assert_eq!(seq.active_index(), 42);
        assert_eq!(seq.slot_count(), 0);
    }

    #[test]
    fn point_builder_defaults_subtitle() {
        let point = Point::new("Ordered");
        assert!(point.subtitle.is_empty());
        let point = point.with_subtitle("Mon, 10:00");
        assert_eq!(point.title, "Ordered");
        assert_eq!(point.subtitle, "Mon, 10:00");
    }
}
