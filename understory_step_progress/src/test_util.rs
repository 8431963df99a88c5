// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording adapter and host shared by the unit tests.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::{
    Adapter, Host, Holder, IntervalBinding, Point, SlotGeometry, StepBinding, StepType, Tier,
};

pub(crate) fn points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new(alloc::format!("step {i}")).with_subtitle("sub"))
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TestHolder {
    pub(crate) id: usize,
    pub(crate) kind: Option<StepType>,
}

impl Holder for TestHolder {
    type View = usize;

    fn view(&self) -> &usize {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    CreateStep(StepType),
    CreateInterval,
    BindStep { id: usize, index: usize, tier: Tier },
    BindInterval { id: usize, index: usize, tier: Tier },
}

#[derive(Debug, Default)]
pub(crate) struct RecordingAdapter {
    next_id: usize,
    pub(crate) events: Vec<Event>,
}

impl RecordingAdapter {
    pub(crate) fn starting_at(next_id: usize) -> Self {
        Self {
            next_id,
            events: Vec::new(),
        }
    }

    pub(crate) fn creates(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::CreateStep(_) | Event::CreateInterval))
            .count()
    }

    pub(crate) fn binds(&self) -> usize {
        self.events.len() - self.creates()
    }

    fn fresh(&mut self, kind: Option<StepType>) -> TestHolder {
        let id = self.next_id;
        self.next_id += 1;
        TestHolder { id, kind }
    }
}

impl Adapter for RecordingAdapter {
    type Holder = TestHolder;

    fn create_step(&mut self, step_type: StepType) -> TestHolder {
        self.events.push(Event::CreateStep(step_type));
        self.fresh(Some(step_type))
    }

    fn bind_step(&mut self, holder: &mut TestHolder, binding: StepBinding<'_>) {
        self.events.push(Event::BindStep {
            id: holder.id,
            index: binding.index,
            tier: binding.tier,
        });
    }

    fn create_interval(&mut self) -> TestHolder {
        self.events.push(Event::CreateInterval);
        self.fresh(None)
    }

    fn bind_interval(&mut self, holder: &mut TestHolder, binding: IntervalBinding) {
        self.events.push(Event::BindInterval {
            id: holder.id,
            index: binding.index,
            tier: binding.tier,
        });
    }
}

/// Host whose views report the last width applied to them, and whose markers
/// are all `marker` pixels wide.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) marker: u32,
    pub(crate) widths: BTreeMap<usize, u32>,
    pub(crate) applied: Vec<(usize, SlotGeometry)>,
}

impl RecordingHost {
    pub(crate) fn with_marker(marker: u32) -> Self {
        Self {
            marker,
            ..Self::default()
        }
    }
}

impl Host<usize> for RecordingHost {
    fn measured_width(&self, view: &usize) -> u32 {
        self.widths.get(view).copied().unwrap_or(0)
    }

    fn marker_width(&self, _view: &usize) -> u32 {
        self.marker
    }

    fn apply_geometry(&mut self, position: usize, view: &usize, geometry: SlotGeometry) {
        self.widths.insert(*view, geometry.width);
        self.applied.push((position, geometry));
    }
}
