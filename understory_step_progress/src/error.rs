// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;

use thiserror::Error;

use crate::PositioningStrategy;

/// Result alias used throughout this crate.
pub type Result<T, E = StepProgressError> = core::result::Result<T, E>;

/// Contract violations reported by the step progress core.
///
/// None of these are transient. An operation that returns one of them has not
/// mutated any state, and retrying it with the same arguments fails again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StepProgressError {
    /// The active index lies outside `0..len` of a non-empty sequence.
    #[error("active index {index} is out of range for {len} points")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of points in the sequence it was checked against.
        len: usize,
    },
    /// A slot had to be resolved but no adapter is attached.
    #[error("an adapter must be attached before slots can be resolved")]
    AdapterNotSet,
    /// The positioning strategy cannot lay out this many points.
    #[error("`{strategy}` positioning requires exactly {expected} points, got {actual}")]
    InvalidConfiguration {
        /// The strategy that rejected the sequence.
        strategy: PositioningStrategy,
        /// Point count the strategy supports.
        expected: usize,
        /// Point count it was asked to lay out.
        actual: usize,
    },
    /// A slot position past the end of the current slot sequence.
    #[error("slot {position} does not exist; the sequence has {slot_count} slots")]
    SlotOutOfRange {
        /// The requested position.
        position: usize,
        /// Number of slots for the current sequence.
        slot_count: usize,
    },
}

/// Returned when parsing an unknown [`PositioningStrategy`] name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown positioning strategy `{name}`")]
pub struct ParseStrategyError {
    /// The name that did not match any strategy.
    pub name: String,
}
