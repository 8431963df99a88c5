// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning strategies: pure functions from container width, point count,
//! and neighbouring step geometry to per-slot offsets and widths.
//!
//! All values are whole pixels. The step width is `container_width / n`
//! rounded down; leftover pixels are not assigned to any slot.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use kurbo::Rect;

use crate::error::ParseStrategyError;
use crate::{Result, StepProgressError};

/// How a slot's content is aligned inside its box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentAlign {
    /// Pinned to the leading edge.
    Leading,
    /// Centred.
    #[default]
    Center,
    /// Pinned to the trailing edge.
    Trailing,
}

/// Geometry computed for one slot during a layout pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SlotGeometry {
    /// Horizontal offset from the container's leading edge.
    pub offset_x: u32,
    /// Width of the slot.
    pub width: u32,
    /// Alignment of the slot's content.
    pub align: ContentAlign,
}

impl SlotGeometry {
    /// Creates a centred slot.
    #[must_use]
    pub const fn new(offset_x: u32, width: u32) -> Self {
        Self {
            offset_x,
            width,
            align: ContentAlign::Center,
        }
    }

    /// Sets the content alignment.
    #[must_use]
    pub const fn with_align(mut self, align: ContentAlign) -> Self {
        self.align = align;
        self
    }

    /// Trailing edge of the slot.
    #[must_use]
    pub const fn end_x(self) -> u32 {
        self.offset_x.saturating_add(self.width)
    }

    /// The slot as a rectangle spanning `0..height` vertically.
    #[must_use]
    pub fn to_rect(self, height: f64) -> Rect {
        Rect::new(
            f64::from(self.offset_x),
            0.0,
            f64::from(self.end_x()),
            height,
        )
    }
}

/// Inputs shared by every slot of a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutInput {
    /// Width of the container.
    pub container_width: u32,
    /// Number of points in the sequence.
    pub point_count: usize,
}

impl LayoutInput {
    /// Creates a layout input.
    #[must_use]
    pub const fn new(container_width: u32, point_count: usize) -> Self {
        Self {
            container_width,
            point_count,
        }
    }

    /// Uniform step width: `container_width / point_count`, rounded down.
    ///
    /// Zero for an empty sequence.
    #[must_use]
    pub fn step_width(&self) -> u32 {
        match px(self.point_count) {
            0 => 0,
            n => self.container_width / n,
        }
    }
}

/// Geometry of a step slot as seen by its neighbouring intervals.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StepMetrics {
    /// The step's computed geometry.
    pub geometry: SlotGeometry,
    /// Measured width of the marker drawn inside the step.
    pub marker_width: u32,
}

/// A named positioning algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositioningStrategy {
    /// Uniform distribution with intervals anchored on the preceding marker.
    #[default]
    Default,
    /// Three points with the first and last pinned to the container edges.
    FirstLastEdgeAligned,
}

type StepFn = fn(&LayoutInput, usize) -> Result<SlotGeometry>;
type IntervalFn = fn(&LayoutInput, usize, &StepMetrics, &StepMetrics) -> Result<SlotGeometry>;

struct StrategyTable {
    name: &'static str,
    required_points: Option<usize>,
    step: StepFn,
    interval: IntervalFn,
}

const DEFAULT_TABLE: StrategyTable = StrategyTable {
    name: "default",
    required_points: None,
    step: default_step,
    interval: default_interval,
};

const EDGE_ALIGNED_TABLE: StrategyTable = StrategyTable {
    name: "first-last-edge-aligned",
    required_points: Some(3),
    step: edge_aligned_step,
    interval: edge_aligned_interval,
};

impl PositioningStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 2] = [Self::Default, Self::FirstLastEdgeAligned];

    const fn table(self) -> &'static StrategyTable {
        match self {
            Self::Default => &DEFAULT_TABLE,
            Self::FirstLastEdgeAligned => &EDGE_ALIGNED_TABLE,
        }
    }

    /// Stable configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.table().name
    }

    /// Checks that this strategy can lay out `point_count` points.
    pub fn validate(self, point_count: usize) -> Result<()> {
        match self.table().required_points {
            Some(expected) if expected != point_count => {
                Err(StepProgressError::InvalidConfiguration {
                    strategy: self,
                    expected,
                    actual: point_count,
                })
            }
            _ => Ok(()),
        }
    }

    /// Computes the geometry of step `index`.
    pub fn compute_step(self, input: &LayoutInput, index: usize) -> Result<SlotGeometry> {
        self.validate(input.point_count)?;
        (self.table().step)(input, index)
    }

    /// Computes the geometry of interval `index`, which connects step `index`
    /// (`prev`) and step `index + 1` (`next`).
    pub fn compute_interval(
        self,
        input: &LayoutInput,
        index: usize,
        prev: &StepMetrics,
        next: &StepMetrics,
    ) -> Result<SlotGeometry> {
        self.validate(input.point_count)?;
        (self.table().interval)(input, index, prev, next)
    }
}

impl fmt::Display for PositioningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PositioningStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStrategyError {
                name: s.to_string(),
            })
    }
}

/// Saturating `usize` to pixel conversion.
fn px(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Offset of the first pixel past the centre of `step`'s marker.
fn after_marker_center(step: &StepMetrics) -> u32 {
    step.geometry
        .offset_x
        .saturating_add(step.geometry.width / 2)
        .saturating_add(step.marker_width / 2)
}

fn default_step(input: &LayoutInput, index: usize) -> Result<SlotGeometry> {
    let step_width = input.step_width();
    Ok(SlotGeometry::new(
        px(index).saturating_mul(step_width),
        step_width,
    ))
}

fn default_interval(
    _input: &LayoutInput,
    _index: usize,
    prev: &StepMetrics,
    _next: &StepMetrics,
) -> Result<SlotGeometry> {
    Ok(SlotGeometry::new(
        after_marker_center(prev),
        prev.geometry.width,
    ))
}

/// Width of an interval touching a pinned step: `1.5 * step - 1.5 * marker`, floored.
fn edge_interval_width(step_width: u32, marker_width: u32) -> u32 {
    step_width
        .saturating_mul(3)
        .saturating_sub(marker_width.saturating_mul(3))
        / 2
}

fn edge_aligned_step(input: &LayoutInput, index: usize) -> Result<SlotGeometry> {
    let step_width = input.step_width();
    if index == 0 {
        return Ok(SlotGeometry::new(0, step_width).with_align(ContentAlign::Leading));
    }
    if index + 1 == input.point_count {
        let offset_x = input.container_width.saturating_sub(step_width);
        return Ok(SlotGeometry::new(offset_x, step_width).with_align(ContentAlign::Trailing));
    }
    default_step(input, index)
}

fn edge_aligned_interval(
    input: &LayoutInput,
    index: usize,
    prev: &StepMetrics,
    next: &StepMetrics,
) -> Result<SlotGeometry> {
    let step_width = input.step_width();
    if index == 0 {
        // Starts at the trailing edge of the pinned first marker.
        let width = edge_interval_width(step_width, prev.marker_width);
        let offset_x = prev.geometry.offset_x.saturating_add(prev.marker_width);
        return Ok(SlotGeometry::new(offset_x, width));
    }
    if index + 2 == input.point_count {
        // Ends at the leading edge of the pinned last marker.
        let width = edge_interval_width(step_width, next.marker_width);
        let offset_x = next
            .geometry
            .end_x()
            .saturating_sub(next.marker_width)
            .saturating_sub(width);
        return Ok(SlotGeometry::new(offset_x, width));
    }
    Ok(SlotGeometry::new(
        after_marker_center(prev),
        step_width.saturating_sub(prev.marker_width),
    ))
}
