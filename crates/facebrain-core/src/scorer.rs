//! Asymmetry scorer: round-robin left-minus-right differences.
//!
//! Each call to [`Scorer::measure`] scores exactly one pair and advances the
//! cursor Smile → Blink → Move Lips → Raise Eyebrows → Smile.

use crate::blendshape::BlendShape;
use crate::sampler::TrackedSlots;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display value of a pair that has not been measured yet.
pub const UNMEASURED_SENTINEL: f32 = 10.0;

/// A left/right pair of tracked coefficients. Doubles as the scorer cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AsymmetryPair {
    #[default]
    Smile,
    Blink,
    #[serde(rename = "Move Lips")]
    MoveLips,
    #[serde(rename = "Raise Eyebrows")]
    RaiseEyebrows,
}

impl AsymmetryPair {
    pub const COUNT: usize = 4;

    pub const ALL: [AsymmetryPair; Self::COUNT] = [
        AsymmetryPair::Smile,
        AsymmetryPair::Blink,
        AsymmetryPair::MoveLips,
        AsymmetryPair::RaiseEyebrows,
    ];

    /// Pair index (0..4).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Slot index of the left coefficient; the right one follows it.
    pub fn value_index(self) -> usize {
        self.index() * 2
    }

    pub fn left(self) -> BlendShape {
        BlendShape::ALL[self.value_index()]
    }

    pub fn right(self) -> BlendShape {
        BlendShape::ALL[self.value_index() + 1]
    }

    /// The pair after this one, wrapping back to `Smile`.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn label(self) -> &'static str {
        match self {
            AsymmetryPair::Smile => "Smile",
            AsymmetryPair::Blink => "Blink",
            AsymmetryPair::MoveLips => "Move Lips",
            AsymmetryPair::RaiseEyebrows => "Raise Eyebrows",
        }
    }
}

impl fmt::Display for AsymmetryPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Latest difference per pair. Unmeasured pairs hold `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DifferenceRecord {
    values: [Option<f32>; AsymmetryPair::COUNT],
}

impl DifferenceRecord {
    pub fn get(&self, pair: AsymmetryPair) -> Option<f32> {
        self.values[pair.index()]
    }

    /// Difference for display, with [`UNMEASURED_SENTINEL`] standing in for `None`.
    pub fn display_value(&self, pair: AsymmetryPair) -> f32 {
        self.get(pair).unwrap_or(UNMEASURED_SENTINEL)
    }

    pub fn is_measured(&self, pair: AsymmetryPair) -> bool {
        self.get(pair).is_some()
    }

    fn set(&mut self, pair: AsymmetryPair, difference: f32) {
        self.values[pair.index()] = Some(difference);
    }
}

/// Outcome of a single scorer step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Pair that was just scored.
    pub pair: AsymmetryPair,
    /// Left minus right.
    pub difference: f32,
    /// Pair the next step will score.
    pub next: AsymmetryPair,
}

/// Round-robin asymmetry scorer.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    cursor: AsymmetryPair,
    differences: DifferenceRecord,
    last: Option<Measurement>,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score the pair under the cursor and advance.
    pub fn measure(&mut self, slots: &TrackedSlots) -> Measurement {
        let pair = self.cursor;
        let difference = slots.at(pair.value_index()) - slots.at(pair.value_index() + 1);
        self.differences.set(pair, difference);
        self.cursor = pair.next();

        let measurement = Measurement {
            pair,
            difference,
            next: self.cursor,
        };
        tracing::debug!(
            pair = pair.label(),
            left = pair.left().name(),
            right = pair.right().name(),
            difference,
            next = self.cursor.label(),
            "asymmetry measured"
        );
        self.last = Some(measurement);
        measurement
    }

    /// Pair the next call to [`measure`](Self::measure) will score.
    pub fn next_pair(&self) -> AsymmetryPair {
        self.cursor
    }

    /// Slot index of the left coefficient of the next pair.
    pub fn value_index(&self) -> usize {
        self.cursor.value_index()
    }

    pub fn differences(&self) -> &DifferenceRecord {
        &self.differences
    }

    /// Most recent measurement, if any.
    pub fn last_measurement(&self) -> Option<Measurement> {
        self.last
    }
}
