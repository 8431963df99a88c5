// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout pass bookkeeping: decides whether a pass has work to do and tracks
//! whether the last applied geometry has settled.

use crate::cache::PassId;
use crate::strategy::LayoutInput;

/// Whether the applied geometry matches what the host measured.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutState {
    /// Geometry is settled; an unchanged pass is skipped.
    #[default]
    Stable,
    /// The last pass changed widths the host had not yet measured; the next
    /// pass re-applies geometry even if widths look right.
    Recalculating,
}

/// What a pass should do, decided before touching any slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutPlan {
    /// No container width or no slots.
    Idle,
    /// Geometry is already correct.
    Skip,
    /// Apply the strategy to every slot with this uniform step width.
    Recalculate {
        /// Target width of every step slot.
        step_width: u32,
    },
}

/// Result of running a layout pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutOutcome {
    /// Nothing to lay out (zero width or empty sequence).
    Idle,
    /// No pass was pending.
    NotScheduled,
    /// The pass was issued for a sequence that has since been replaced.
    Superseded,
    /// Geometry was already correct; nothing was mutated.
    Unchanged,
    /// Geometry was applied to every slot, leaving the coordinator in this state.
    Applied(LayoutState),
}

/// Two-state layout machine plus the pass counter used for bind deduplication.
#[derive(Clone, Debug, Default)]
pub struct LayoutCoordinator {
    state: LayoutState,
    pass: PassId,
}

impl LayoutCoordinator {
    /// Creates a stable coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> LayoutState {
        self.state
    }

    /// Forces the next pass to apply geometry regardless of measured widths.
    pub fn force_recalculation(&mut self) {
        self.state = LayoutState::Recalculating;
    }

    /// Decides what a pass over `input` should do, given the width the host
    /// currently measures for slot 0.
    #[must_use]
    pub fn plan(&self, input: &LayoutInput, applied_width: u32) -> LayoutPlan {
        if input.container_width == 0 || input.point_count == 0 {
            return LayoutPlan::Idle;
        }
        let step_width = input.step_width();
        if step_width == applied_width && self.state == LayoutState::Stable {
            LayoutPlan::Skip
        } else {
            LayoutPlan::Recalculate { step_width }
        }
    }

    /// Records that geometry with `step_width` was applied while the host
    /// measured `applied_width` for slot 0, and returns the new state.
    ///
    /// A mismatch means the host has not caught up yet, so exactly one more
    /// corrective pass is needed.
    pub fn complete(&mut self, step_width: u32, applied_width: u32) -> LayoutState {
        self.state = if step_width == applied_width {
            LayoutState::Stable
        } else {
            LayoutState::Recalculating
        };
        self.state
    }

    /// Starts a new binding pass.
    pub(crate) fn next_pass(&mut self) -> PassId {
        self.pass = self.pass.next();
        self.pass
    }
}
