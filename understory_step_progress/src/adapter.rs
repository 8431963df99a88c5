// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Holder creation and binding.
//!
//! An [`Adapter`] knows how to create and fill the host's views. The core only
//! decides *when*: it creates a holder the first time a slot is resolved and
//! rebinds it on every later pass, so tier and content changes always land.

use crate::cache::{Entry, HolderCache, PassId};
use crate::sequence::{Point, StepSequence, Tier};
use crate::slot::{Slot, StepType};
use crate::{Result, StepProgressError};

/// An opaque handle that owns exactly one rendered view.
pub trait Holder {
    /// The host's view type.
    type View;

    /// The view owned by this holder.
    fn view(&self) -> &Self::View;
}

/// Content bound into a step holder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepBinding<'a> {
    /// Point index of the step.
    pub index: usize,
    /// The point to display.
    pub point: &'a Point,
    /// Tier relative to the active index.
    pub tier: Tier,
    /// Position of the step in the sequence.
    pub step_type: StepType,
}

/// Content bound into an interval holder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntervalBinding {
    /// Index of the point this interval follows; it connects `index` and `index + 1`.
    pub index: usize,
    /// [`Tier::Complete`] before the active point, otherwise [`Tier::Inactive`].
    pub tier: Tier,
}

/// Creates and binds holders for step and interval slots.
pub trait Adapter {
    /// Holder type shared by steps and intervals.
    type Holder: Holder;

    /// Creates a holder for a step of the given type.
    fn create_step(&mut self, step_type: StepType) -> Self::Holder;

    /// Binds step content into a holder.
    fn bind_step(&mut self, holder: &mut Self::Holder, binding: StepBinding<'_>);

    /// Creates a holder for an interval.
    fn create_interval(&mut self) -> Self::Holder;

    /// Binds interval content into a holder.
    fn bind_interval(&mut self, holder: &mut Self::Holder, binding: IntervalBinding);
}

/// Resolves the holder for `position`, creating it on a cache miss and
/// binding it unless it was already bound during `pass`.
pub(crate) fn resolve<'c, A: Adapter>(
    adapter: Option<&mut A>,
    cache: &'c mut HolderCache<A::Holder>,
    sequence: &StepSequence,
    position: usize,
    pass: PassId,
) -> Result<&'c A::Holder> {
    let adapter = adapter.ok_or(StepProgressError::AdapterNotSet)?;
    let slot_count = sequence.slot_count();
    if position >= slot_count {
        return Err(StepProgressError::SlotOutOfRange {
            position,
            slot_count,
        });
    }
    Ok(resolve_slot(adapter, cache, sequence, position, pass))
}

/// [`resolve`] for callers that already hold an adapter and a valid position.
pub(crate) fn resolve_slot<'c, A: Adapter>(
    adapter: &mut A,
    cache: &'c mut HolderCache<A::Holder>,
    sequence: &StepSequence,
    position: usize,
    pass: PassId,
) -> &'c A::Holder {
    let slot = Slot::at(position);
    let entry = cache.slot_mut(position).get_or_insert_with(|| {
        tracing::trace!(position, "creating holder");
        let holder = match slot {
            Slot::Step(_) => {
                adapter.create_step(StepType::classify(position, sequence.point_count()))
            }
            Slot::Interval(_) => adapter.create_interval(),
        };
        Entry::new(holder)
    });

    if entry.bound_in != Some(pass) {
        bind(adapter, &mut entry.holder, sequence, slot);
        entry.bound_in = Some(pass);
    }
    &entry.holder
}

/// Rebinds every cached holder without creating missing ones.
pub(crate) fn rebind_cached<A: Adapter>(
    adapter: &mut A,
    cache: &mut HolderCache<A::Holder>,
    sequence: &StepSequence,
    pass: PassId,
) {
    let slot_count = sequence.slot_count();
    for (position, entry) in cache.entries_mut() {
        if position >= slot_count || entry.bound_in == Some(pass) {
            continue;
        }
        bind(adapter, &mut entry.holder, sequence, Slot::at(position));
        entry.bound_in = Some(pass);
    }
}

fn bind<A: Adapter>(adapter: &mut A, holder: &mut A::Holder, sequence: &StepSequence, slot: Slot) {
    match slot {
        Slot::Step(index) => {
            let Some(point) = sequence.point(index) else {
                return;
            };
            tracing::trace!(index, "binding step");
            adapter.bind_step(
                holder,
                StepBinding {
                    index,
                    point,
                    tier: sequence.tier(index),
                    step_type: StepType::classify(slot.position(), sequence.point_count()),
                },
            );
        }
        Slot::Interval(index) => {
            tracing::trace!(index, "binding interval");
            adapter.bind_interval(
                holder,
                IntervalBinding {
                    index,
                    tier: sequence.interval_tier(index),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{rebind_cached, resolve};
    use crate::cache::{HolderCache, PassId};
    use crate::sequence::{StepSequence, Tier};
    use crate::slot::StepType;
    use crate::test_util::{Event, RecordingAdapter, TestHolder, points};
    use crate::StepProgressError;

    fn sequence(n: usize, active: usize) -> StepSequence {
        let mut seq = StepSequence::new();
        seq.replace(points(n), active).unwrap();
        seq
    }

    #[test]
    fn miss_creates_then_binds() {
        let seq = sequence(3, 1);
        let mut adapter = RecordingAdapter::default();
        let mut cache = HolderCache::new();
        let pass = PassId::default().next();

        let holder = resolve(Some(&mut adapter), &mut cache, &seq, 4, pass).unwrap();
        assert_eq!(holder.kind, Some(StepType::Last));
        let interval = resolve(Some(&mut adapter), &mut cache, &seq, 1, pass).unwrap();
        assert_eq!(interval.kind, None);

        assert_eq!(
            adapter.events,
            [
                Event::CreateStep(StepType::Last),
                Event::BindStep {
                    id: 0,
                    index: 2,
                    tier: Tier::Inactive
                },
                Event::CreateInterval,
                Event::BindInterval {
                    id: 1,
                    index: 0,
                    tier: Tier::Complete
                },
            ]
        );
    }

    #[test]
    fn hit_rebinds_once_per_pass() {
        let seq = sequence(2, 0);
        let mut adapter = RecordingAdapter::default();
        let mut cache = HolderCache::new();
        let first = PassId::default().next();

        resolve(Some(&mut adapter), &mut cache, &seq, 0, first).unwrap();
        resolve(Some(&mut adapter), &mut cache, &seq, 0, first).unwrap();
        assert_eq!(adapter.binds(), 1);

        let second = first.next();
        let id = resolve(Some(&mut adapter), &mut cache, &seq, 0, second)
            .unwrap()
            .id;
        assert_eq!(id, 0, "cache hit must reuse the holder");
        assert_eq!(adapter.creates(), 1);
        assert_eq!(adapter.binds(), 2);
    }

    #[test]
    fn missing_adapter_binds_nothing() {
        let seq = sequence(2, 0);
        let mut cache: HolderCache<TestHolder> = HolderCache::new();
        let result = resolve::<RecordingAdapter>(None, &mut cache, &seq, 0, PassId::default());
        assert_eq!(result.err(), Some(StepProgressError::AdapterNotSet));
        assert_eq!(cache.occupied(), 0);
    }

    #[test]
    fn positions_past_the_strip_are_rejected() {
        let seq = sequence(2, 0);
        let mut adapter = RecordingAdapter::default();
        let mut cache = HolderCache::new();
        let result = resolve(Some(&mut adapter), &mut cache, &seq, 3, PassId::default());
        assert_eq!(
            result.err(),
            Some(StepProgressError::SlotOutOfRange {
                position: 3,
                slot_count: 3
            })
        );
        assert!(adapter.events.is_empty());
    }

    #[test]
    fn rebind_cached_skips_empty_positions() {
        let mut seq = sequence(3, 0);
        let mut adapter = RecordingAdapter::default();
        let mut cache = HolderCache::new();
        cache.reset(seq.slot_count());
        let pass = PassId::default().next();
        resolve(Some(&mut adapter), &mut cache, &seq, 2, pass).unwrap();

        seq.set_active_index(2).unwrap();
        adapter.events.clear();
        rebind_cached(&mut adapter, &mut cache, &seq, pass.next());

        let tiers: Vec<_> = adapter
            .events
            .iter()
            .filter_map(|e| match e {
                Event::BindStep { index, tier, .. } => Some((*index, *tier)),
                _ => None,
            })
            .collect();
        assert_eq!(tiers, [(1, Tier::Complete)]);
        assert_eq!(adapter.creates(), 0);
    }
}
