//! Blend-shape sampler: threshold-gated update of the tracked slots.
//!
//! A slot only moves when its coefficient strictly exceeds the activation
//! threshold. Values at or below the threshold leave the slot holding the
//! last accepted value, so a relaxed face keeps showing its peak reading.

use crate::blendshape::BlendShape;
use crate::types::BlendShapeFrame;
use serde::Serialize;

/// Default activation threshold for the tracked coefficients.
pub const ACTIVATION_THRESHOLD: f32 = 0.25;

/// Last accepted value of each tracked blend shape, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TrackedSlots {
    values: [f32; BlendShape::COUNT],
}

impl TrackedSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build slots from raw values in slot order.
    pub fn from_values(values: [f32; BlendShape::COUNT]) -> Self {
        Self { values }
    }

    pub fn get(&self, shape: BlendShape) -> f32 {
        self.values[shape.slot()]
    }

    /// Value at a raw slot index.
    pub fn at(&self, slot: usize) -> f32 {
        self.values[slot]
    }

    pub fn values(&self) -> &[f32; BlendShape::COUNT] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlendShape, f32)> + '_ {
        BlendShape::ALL.into_iter().map(|shape| (shape, self.get(shape)))
    }
}

/// Round to two decimal places.
pub fn round_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Threshold-gated sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    threshold: f32,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(ACTIVATION_THRESHOLD)
    }
}

impl Sampler {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Update `slots` from one frame. Returns the number of slots written.
    ///
    /// Each slot reads its own coefficient. Missing coefficients read as 0.0
    /// and never update; non-finite values and values above 1.0 are out of
    /// range and ignored.
    pub fn sample(&self, slots: &mut TrackedSlots, frame: &BlendShapeFrame) -> usize {
        let mut updated = 0;
        for shape in BlendShape::ALL {
            let value = frame.tracked(shape);
            if !value.is_finite() || value > 1.0 {
                tracing::debug!(
                    shape = shape.name(),
                    value,
                    sequence = frame.sequence,
                    "ignoring out-of-range coefficient"
                );
                continue;
            }
            if value > self.threshold {
                slots.values[shape.slot()] = round_hundredths(value);
                updated += 1;
            }
        }
        updated
    }

    /// Owned form of [`sample`](Self::sample): consumes the slots and returns the updated copy.
    pub fn sampled(&self, mut slots: TrackedSlots, frame: &BlendShapeFrame) -> TrackedSlots {
        self.sample(&mut slots, frame);
        slots
    }
}
