// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Step Progress: the layout and recycling core of a horizontal
//! step progress indicator.
//!
//! A step progress indicator shows an ordered sequence of labelled points joined
//! by intervals, with an active cursor that sorts every point into a
//! [`Tier`] (complete, active, or inactive). This crate owns everything about
//! such a widget except drawing:
//!
//! - [`StepSequence`]: the points and the active index, with range checks.
//! - Slots: `n` points expand into `2n - 1` alternating positions. Even
//!   positions are steps and odd positions are intervals (see [`Slot`],
//!   [`slot_count`], and [`StepType`]).
//! - [`HolderCache`]: one bound [`Holder`] per slot position, reset whenever the
//!   sequence is replaced.
//! - [`Adapter`]: the host's factory and binder for step and interval holders.
//! - [`PositioningStrategy`]: pure functions computing each slot's offset and
//!   width ([`SlotGeometry`]) from the container width and neighbouring steps.
//! - [`LayoutCoordinator`]: a two-state machine ([`LayoutState`]) deciding
//!   whether a pass has work to do and whether one more corrective pass is needed.
//! - [`StepProgress`]: the widget core tying these together and exchanging
//!   measurements, geometry, and [`Requests`] with a [`Host`].
//!
//! This crate deliberately does **not** know about views, text, colours, or any
//! particular UI framework. Hosts are responsible for:
//!
//! - Creating and styling views in their [`Adapter`].
//! - Reporting the container width via [`StepProgress::notify_size_changed`].
//! - Calling [`StepProgress::run_frame`] once per frame, so measurements read
//!   during a pass reflect the tree committed in the previous frame.
//! - Applying geometry handed to [`Host::apply_geometry`] and honouring
//!   [`StepProgress::take_requests`].
//!
//! ## Minimal example
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use understory_step_progress::{
//!     Adapter, Holder, Host, IntervalBinding, LayoutState, Point, SlotGeometry, State,
//!     StepBinding, StepProgress, StepType,
//! };
//!
//! // A view is an index into the host's label storage.
//! struct Handle(usize);
//!
//! impl Holder for Handle {
//!     type View = usize;
//!
//!     fn view(&self) -> &usize {
//!         &self.0
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Labels {
//!     text: Vec<String>,
//! }
//!
//! impl Adapter for Labels {
//!     type Holder = Handle;
//!
//!     fn create_step(&mut self, _step_type: StepType) -> Handle {
//!         self.text.push(String::new());
//!         Handle(self.text.len() - 1)
//!     }
//!
//!     fn bind_step(&mut self, holder: &mut Handle, binding: StepBinding<'_>) {
//!         self.text[holder.0] = binding.point.title.clone();
//!     }
//!
//!     fn create_interval(&mut self) -> Handle {
//!         self.text.push(String::new());
//!         Handle(self.text.len() - 1)
//!     }
//!
//!     fn bind_interval(&mut self, _holder: &mut Handle, _binding: IntervalBinding) {}
//! }
//!
//! // Views report whatever width was last applied to them.
//! #[derive(Default)]
//! struct Frame {
//!     widths: HashMap<usize, u32>,
//! }
//!
//! impl Host<usize> for Frame {
//!     fn measured_width(&self, view: &usize) -> u32 {
//!         self.widths.get(view).copied().unwrap_or(0)
//!     }
//!
//!     fn marker_width(&self, _view: &usize) -> u32 {
//!         16
//!     }
//!
//!     fn apply_geometry(&mut self, _position: usize, view: &usize, geometry: SlotGeometry) {
//!         self.widths.insert(*view, geometry.width);
//!     }
//! }
//!
//! let mut progress = StepProgress::with_adapter(Labels::default());
//! let points = vec![
//!     Point::new("Ordered"),
//!     Point::new("Shipped"),
//!     Point::new("Delivered"),
//! ];
//! progress.set_state(State::new(points).with_active_index(1))?;
//! progress.notify_size_changed(300);
//!
//! // Run frames until the layout settles.
//! let mut host = Frame::default();
//! while progress.has_pending_layout() {
//!     progress.run_frame(&mut host)?;
//! }
//!
//! assert_eq!(progress.layout_state(), LayoutState::Stable);
//! assert_eq!(progress.slot_count(), 5);
//! assert!(progress.geometries().iter().all(|g| g.width == 100));
//! assert_eq!(progress.adapter().unwrap().text[2], "Shipped");
//! # Ok::<(), understory_step_progress::StepProgressError>(())
//! ```
//!
//! ## Strategies
//!
//! - [`PositioningStrategy::Default`] gives every step `width / n` pixels and
//!   anchors each interval on the marker of the step before it.
//! - [`PositioningStrategy::FirstLastEdgeAligned`] supports exactly three
//!   points. It pins the first step to the leading edge and the last step to the
//!   trailing edge, and shortens the edge intervals so they clear the pinned
//!   labels.
//!
//! Strategies parse from and display as stable names (`"default"`,
//! `"first-last-edge-aligned"`) for use in host configuration.
//!
//! Widths are whole pixels. The step width is rounded down and leftover pixels
//! stay unassigned.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies.
//! - `libm`: `no_std` floating-point support for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
mod cache;
mod coordinator;
mod error;
mod host;
mod sequence;
mod slot;
mod strategy;
mod widget;

#[cfg(test)]
mod test_util;

pub use adapter::{Adapter, Holder, IntervalBinding, StepBinding};
pub use cache::{HolderCache, PassId};
pub use coordinator::{LayoutCoordinator, LayoutOutcome, LayoutPlan, LayoutState};
pub use error::{ParseStrategyError, Result, StepProgressError};
pub use host::{Host, Requests};
pub use sequence::{Point, State, StepSequence, Tier};
pub use slot::{Slot, StepType, slot_count};
pub use strategy::{ContentAlign, LayoutInput, PositioningStrategy, SlotGeometry, StepMetrics};
pub use widget::{AdapterView, LayoutTicket, StepProgress};
