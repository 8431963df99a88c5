// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The outbound boundary: measurement, geometry commits, and host requests.

use crate::SlotGeometry;

/// Services the host provides to a layout pass.
///
/// `V` is the adapter's view type. Measurements describe the tree as it was
/// last committed by the host, which may lag behind geometry applied during the
/// current pass.
pub trait Host<V> {
    /// Current laid-out width of `view`.
    fn measured_width(&self, view: &V) -> u32;

    /// Width of the marker drawn inside a step view.
    fn marker_width(&self, view: &V) -> u32;

    /// Commits geometry for the slot at `position`, owned by `view`.
    ///
    /// Must be honoured before the next frame.
    fn apply_geometry(&mut self, position: usize, view: &V, geometry: SlotGeometry);
}

bitflags::bitflags! {
    /// Follow-up work the host should schedule, drained with
    /// [`StepProgress::take_requests`](crate::StepProgress::take_requests).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Requests: u8 {
        /// Re-measure and lay out the tree, then run the next frame.
        const RELAYOUT = 0b0000_0001;
        /// Repaint without re-measuring.
        const REPAINT  = 0b0000_0010;
    }
}

impl Default for Requests {
    fn default() -> Self {
        Self::empty()
    }
}
