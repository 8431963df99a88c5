// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`StepProgress`]: one widget instance's sequence, holders, and layout.

use core::fmt;

use smallvec::SmallVec;

use crate::adapter::{rebind_cached, resolve, resolve_slot};
use crate::cache::HolderCache;
use crate::coordinator::{LayoutCoordinator, LayoutOutcome, LayoutPlan, LayoutState};
use crate::host::{Host, Requests};
use crate::sequence::{State, StepSequence};
use crate::slot::Slot;
use crate::strategy::{LayoutInput, PositioningStrategy, SlotGeometry, StepMetrics};
use crate::{Adapter, Holder, Result, StepProgressError};

/// Inline capacity for per-step scratch data; most step indicators are short.
const INLINE_POINTS: usize = 5;
/// Inline capacity for per-slot geometry (`2 * INLINE_POINTS - 1`).
const INLINE_SLOTS: usize = 9;

/// The view type of an adapter's holders.
pub type AdapterView<A> = <<A as Adapter>::Holder as Holder>::View;

/// A scheduled layout pass.
///
/// Tickets are issued against the current sequence. Replacing the sequence
/// supersedes every outstanding ticket; running one afterwards is a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutTicket {
    generation: u64,
}

/// Core of a horizontal step progress indicator.
///
/// Owns the [`StepSequence`], the holders created by the attached [`Adapter`],
/// and the geometry most recently applied by the [`PositioningStrategy`].
/// Everything runs on the host's UI thread; size-dependent work is deferred to
/// the next frame through [`LayoutTicket`]s so that measurements reflect the
/// committed tree.
///
/// A typical host loop:
/// - feed data with [`set_state`](Self::set_state) and size changes with
///   [`notify_size_changed`](Self::notify_size_changed),
/// - call [`run_frame`](Self::run_frame) once per frame,
/// - honour [`take_requests`](Self::take_requests).
pub struct StepProgress<A: Adapter> {
    sequence: StepSequence,
    adapter: Option<A>,
    cache: HolderCache<A::Holder>,
    strategy: PositioningStrategy,
    coordinator: LayoutCoordinator,
    container_width: u32,
    geometry: SmallVec<[SlotGeometry; INLINE_SLOTS]>,
    generation: u64,
    pending: Option<LayoutTicket>,
    requests: Requests,
}

impl<A: Adapter + fmt::Debug> fmt::Debug for StepProgress<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepProgress")
            .field("sequence", &self.sequence)
            .field("adapter", &self.adapter)
            .field("holders", &self.cache.occupied())
            .field("strategy", &self.strategy)
            .field("coordinator", &self.coordinator)
            .field("container_width", &self.container_width)
            .field("generation", &self.generation)
            .field("pending", &self.pending)
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

impl<A: Adapter> Default for StepProgress<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Adapter> StepProgress<A> {
    /// Creates an empty widget with no adapter and the default strategy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sequence: StepSequence::new(),
            adapter: None,
            cache: HolderCache::new(),
            strategy: PositioningStrategy::Default,
            coordinator: LayoutCoordinator::new(),
            container_width: 0,
            geometry: SmallVec::new(),
            generation: 0,
            pending: None,
            requests: Requests::empty(),
        }
    }

    /// Creates an empty widget with `adapter` attached.
    #[must_use]
    pub fn with_adapter(adapter: A) -> Self {
        let mut progress = Self::new();
        progress.adapter = Some(adapter);
        progress
    }

    /// Replaces the sequence.
    ///
    /// Every holder is evicted, the slots are rebuilt through the adapter (if
    /// one is attached), and a full layout pass is scheduled. Fails without
    /// changing anything if the active index is out of range or the current
    /// strategy cannot lay out the new point count.
    pub fn set_state(&mut self, state: State) -> Result<()> {
        let State {
            points,
            active_index,
        } = state;
        if !points.is_empty() {
            self.strategy.validate(points.len())?;
        }
        self.sequence.replace(points, active_index)?;
        tracing::debug!(
            points = self.sequence.point_count(),
            active_index,
            "sequence replaced"
        );

        self.generation = self.generation.wrapping_add(1);
        self.cache.reset(self.sequence.slot_count());
        self.geometry.clear();
        self.rebuild();
        self.coordinator.force_recalculation();
        self.requests |= Requests::RELAYOUT | Requests::REPAINT;
        self.schedule_layout();
        Ok(())
    }

    /// Moves the active cursor and restyles every existing holder.
    ///
    /// Holders are rebound, never recreated. Fails without changing anything if
    /// `index` is out of range for a non-empty sequence.
    pub fn set_active_index(&mut self, index: usize) -> Result<()> {
        self.sequence.set_active_index(index)?;
        if let Some(adapter) = self.adapter.as_mut() {
            let pass = self.coordinator.next_pass();
            rebind_cached(adapter, &mut self.cache, &self.sequence, pass);
        }
        self.requests |= Requests::REPAINT;
        Ok(())
    }

    /// Attaches `adapter`, returning the previous one.
    ///
    /// Holders created by the previous adapter are evicted and the slots are
    /// rebuilt with the new one.
    pub fn attach_adapter(&mut self, adapter: A) -> Option<A> {
        let previous = self.adapter.replace(adapter);
        tracing::debug!(replaced = previous.is_some(), "adapter attached");
        self.cache.reset(self.sequence.slot_count());
        self.rebuild();
        self.coordinator.force_recalculation();
        self.requests |= Requests::RELAYOUT | Requests::REPAINT;
        self.schedule_layout();
        previous
    }

    /// Selects the positioning strategy and schedules a full recalculation.
    ///
    /// Fails without changing anything if the strategy cannot lay out the
    /// current (non-empty) sequence.
    pub fn attach_positioning_strategy(&mut self, strategy: PositioningStrategy) -> Result<()> {
        if !self.sequence.is_empty() {
            strategy.validate(self.sequence.point_count())?;
        }
        self.strategy = strategy;
        self.coordinator.force_recalculation();
        self.requests |= Requests::RELAYOUT;
        self.schedule_layout();
        Ok(())
    }

    /// Records the container width the host settled on and schedules a pass.
    pub fn notify_size_changed(&mut self, width: u32) -> LayoutTicket {
        if width != self.container_width {
            tracing::debug!(from = self.container_width, to = width, "container resized");
            self.container_width = width;
        }
        self.schedule_layout()
    }

    /// Schedules a layout pass for the next frame, superseding any pending one.
    pub fn schedule_layout(&mut self) -> LayoutTicket {
        let ticket = LayoutTicket {
            generation: self.generation,
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Returns `true` if a layout pass is waiting for the next frame.
    #[must_use]
    pub const fn has_pending_layout(&self) -> bool {
        self.pending.is_some()
    }

    /// Runs the pending layout pass, if any.
    pub fn run_frame<H>(&mut self, host: &mut H) -> Result<LayoutOutcome>
    where
        H: Host<AdapterView<A>>,
    {
        match self.pending.take() {
            Some(ticket) => self.run_layout(ticket, host),
            None => Ok(LayoutOutcome::NotScheduled),
        }
    }

    /// Runs the layout pass described by `ticket`.
    ///
    /// A ticket issued before the latest [`set_state`](Self::set_state) is
    /// stale: it reports [`LayoutOutcome::Superseded`] and touches nothing.
    pub fn run_layout<H>(&mut self, ticket: LayoutTicket, host: &mut H) -> Result<LayoutOutcome>
    where
        H: Host<AdapterView<A>>,
    {
        if ticket.generation != self.generation {
            tracing::debug!("layout pass superseded by a newer sequence");
            return Ok(LayoutOutcome::Superseded);
        }
        if self.pending == Some(ticket) {
            self.pending = None;
        }
        self.layout_pass(host)
    }

    /// Resolves the holder at slot `position`, creating and binding it as needed.
    pub fn resolve(&mut self, position: usize) -> Result<&A::Holder> {
        let pass = self.coordinator.next_pass();
        resolve(
            self.adapter.as_mut(),
            &mut self.cache,
            &self.sequence,
            position,
            pass,
        )
    }

    /// Drains the requests accumulated since the last call.
    pub fn take_requests(&mut self) -> Requests {
        core::mem::take(&mut self.requests)
    }

    /// The current sequence.
    #[must_use]
    pub const fn sequence(&self) -> &StepSequence {
        &self.sequence
    }

    /// Number of slots for the current sequence.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.sequence.slot_count()
    }

    /// The holder cached at `position`, if any.
    #[must_use]
    pub fn holder(&self, position: usize) -> Option<&A::Holder> {
        self.cache.get(position)
    }

    /// Cached holders in slot order.
    pub fn holders(&self) -> impl Iterator<Item = (usize, &A::Holder)> {
        self.cache.iter()
    }

    /// The holder cache.
    #[must_use]
    pub const fn cache(&self) -> &HolderCache<A::Holder> {
        &self.cache
    }

    /// Geometry last applied to `position`.
    #[must_use]
    pub fn geometry(&self, position: usize) -> Option<SlotGeometry> {
        self.geometry.get(position).copied()
    }

    /// Geometry last applied to every slot, in slot order.
    ///
    /// Empty until the first applying pass after a sequence replacement.
    #[must_use]
    pub fn geometries(&self) -> &[SlotGeometry] {
        &self.geometry
    }

    /// Current layout state.
    #[must_use]
    pub const fn layout_state(&self) -> LayoutState {
        self.coordinator.state()
    }

    /// Current positioning strategy.
    #[must_use]
    pub const fn strategy(&self) -> PositioningStrategy {
        self.strategy
    }

    /// Last container width reported by the host.
    #[must_use]
    pub const fn container_width(&self) -> u32 {
        self.container_width
    }

    /// The attached adapter, if any.
    #[must_use]
    pub const fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// The attached adapter, mutably.
    ///
    /// Content changes made through the adapter show up on the next bind.
    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    /// Creates and binds a holder for every slot.
    fn rebuild(&mut self) {
        let Some(adapter) = self.adapter.as_mut() else {
            return;
        };
        let pass = self.coordinator.next_pass();
        for position in 0..self.sequence.slot_count() {
            resolve_slot(adapter, &mut self.cache, &self.sequence, position, pass);
        }
    }

    fn layout_pass<H>(&mut self, host: &mut H) -> Result<LayoutOutcome>
    where
        H: Host<AdapterView<A>>,
    {
        let point_count = self.sequence.point_count();
        let input = LayoutInput::new(self.container_width, point_count);
        if input.container_width == 0 || point_count == 0 {
            tracing::debug!(width = input.container_width, point_count, "nothing to lay out");
            return Ok(LayoutOutcome::Idle);
        }
        let Some(adapter) = self.adapter.as_mut() else {
            return Err(StepProgressError::AdapterNotSet);
        };
        self.strategy.validate(point_count)?;

        let applied_width = self
            .cache
            .get(0)
            .map_or(0, |holder| host.measured_width(holder.view()));
        let step_width = match self.coordinator.plan(&input, applied_width) {
            LayoutPlan::Idle => return Ok(LayoutOutcome::Idle),
            LayoutPlan::Skip => {
                tracing::debug!(applied_width, "layout unchanged");
                return Ok(LayoutOutcome::Unchanged);
            }
            LayoutPlan::Recalculate { step_width } => step_width,
        };
        tracing::debug!(
            point_count,
            step_width,
            applied_width,
            strategy = %self.strategy,
            "recalculating slot geometry"
        );

        let pass = self.coordinator.next_pass();
        let mut steps: SmallVec<[StepMetrics; INLINE_POINTS]> =
            SmallVec::with_capacity(point_count);
        for index in 0..point_count {
            let geometry = self.strategy.compute_step(&input, index)?;
            let position = Slot::Step(index).position();
            let holder = resolve_slot(adapter, &mut self.cache, &self.sequence, position, pass);
            steps.push(StepMetrics {
                geometry,
                marker_width: host.marker_width(holder.view()),
            });
        }

        let slot_count = self.sequence.slot_count();
        let mut geometry: SmallVec<[SlotGeometry; INLINE_SLOTS]> =
            SmallVec::with_capacity(slot_count);
        for position in 0..slot_count {
            let slot_geometry = match Slot::at(position) {
                Slot::Step(index) => steps[index].geometry,
                Slot::Interval(index) => self.strategy.compute_interval(
                    &input,
                    index,
                    &steps[index],
                    &steps[index + 1],
                )?,
            };
            // Already bound above for steps; intervals are bound here.
            let holder = resolve_slot(adapter, &mut self.cache, &self.sequence, position, pass);
            host.apply_geometry(position, holder.view(), slot_geometry);
            geometry.push(slot_geometry);
        }
        self.geometry = geometry;

        let state = self.coordinator.complete(step_width, applied_width);
        self.requests |= Requests::RELAYOUT;
        // Follow up next frame; a settled layout reports `Unchanged` and stops.
        self.schedule_layout();
        Ok(LayoutOutcome::Applied(state))
    }
}
