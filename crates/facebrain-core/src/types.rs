//! Frame and readout records exchanged with the tracker and the display layer.

use crate::blendshape::BlendShape;
use crate::scorer::{AsymmetryPair, Measurement};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One frame of named blend-shape coefficients from the face tracker.
///
/// Deserializes from either `{"sequence": 7, "blend_shapes": {...}}` or a
/// bare `{"sequence": 7, "eyeBlinkLeft": 0.4, ...}` object. In both forms
/// `sequence` is optional and never treated as a coefficient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "FrameRepr")]
pub struct BlendShapeFrame {
    pub sequence: Option<u64>,
    pub blend_shapes: HashMap<String, f32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameRepr {
    Full {
        #[serde(default)]
        sequence: Option<u64>,
        blend_shapes: HashMap<String, f32>,
    },
    Bare {
        #[serde(default)]
        sequence: Option<u64>,
        #[serde(flatten)]
        blend_shapes: HashMap<String, f32>,
    },
}

impl From<FrameRepr> for BlendShapeFrame {
    fn from(repr: FrameRepr) -> Self {
        match repr {
            FrameRepr::Full {
                sequence,
                blend_shapes,
            }
            | FrameRepr::Bare {
                sequence,
                blend_shapes,
            } => Self {
                sequence,
                blend_shapes,
            },
        }
    }
}

impl BlendShapeFrame {
    pub fn new(sequence: u64) -> Self {
        Self {
            sequence: Some(sequence),
            blend_shapes: HashMap::new(),
        }
    }

    /// Builder-style insert of one coefficient.
    pub fn with(mut self, name: impl Into<String>, value: f32) -> Self {
        self.blend_shapes.insert(name.into(), value);
        self
    }

    /// Coefficient value by tracker name. Absent coefficients read as 0.0.
    pub fn value(&self, name: &str) -> f32 {
        self.blend_shapes.get(name).copied().unwrap_or(0.0)
    }

    /// Value of a tracked coefficient.
    pub fn tracked(&self, shape: BlendShape) -> f32 {
        self.value(shape.name())
    }

    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Current value of one tracked slot, for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotReadout {
    pub shape: BlendShape,
    pub value: f32,
}

/// Current difference of one left/right pair, for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifferenceReadout {
    pub pair: AsymmetryPair,
    /// `None` until the pair has been measured.
    pub difference: Option<f32>,
    /// Display value: the difference, or the 10.0 sentinel when unmeasured.
    pub display: f32,
}

/// Snapshot of everything the display layer shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub tracked: Vec<SlotReadout>,
    pub differences: Vec<DifferenceReadout>,
    /// Pair the next measurement will score.
    pub next_pair: AsymmetryPair,
    /// Most recent scorer step, if any.
    pub last_measurement: Option<Measurement>,
    pub frames_seen: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_frame() {
        let frame = BlendShapeFrame::from_json(
            r#"{"sequence": 12, "blend_shapes": {"mouthSmileLeft": 0.8, "tongueOut": 0.05}}"#,
        )
        .unwrap();
        assert_eq!(frame.sequence, Some(12));
        assert_eq!(frame.tracked(BlendShape::MouthSmileLeft), 0.8);
        assert_eq!(frame.value("tongueOut"), 0.05);
    }

    #[test]
    fn test_parse_full_frame_without_sequence() {
        let frame =
            BlendShapeFrame::from_json(r#"{"blend_shapes": {"eyeBlinkRight": 0.3}}"#).unwrap();
        assert_eq!(frame.sequence, None);
        assert_eq!(frame.tracked(BlendShape::EyeBlinkRight), 0.3);
    }

    #[test]
    fn test_parse_bare_frame() {
        let frame =
            BlendShapeFrame::from_json(r#"{"eyeBlinkLeft": 0.4, "mouthRight": 0.9}"#).unwrap();
        assert_eq!(frame.sequence, None);
        assert_eq!(frame.tracked(BlendShape::EyeBlinkLeft), 0.4);
        assert_eq!(frame.tracked(BlendShape::MouthRight), 0.9);
    }

    #[test]
    fn test_parse_bare_frame_keeps_sequence_out_of_coefficients() {
        let frame = BlendShapeFrame::from_json(r#"{"sequence": 4, "mouthLeft": 0.5}"#).unwrap();
        assert_eq!(frame.sequence, Some(4));
        assert_eq!(frame.blend_shapes.len(), 1);
        assert_eq!(frame.tracked(BlendShape::MouthLeft), 0.5);
        assert!(!frame.blend_shapes.contains_key("sequence"));
    }

    #[test]
    fn test_parse_explicit_zero_sequence() {
        let frame =
            BlendShapeFrame::from_json(r#"{"sequence": 0, "blend_shapes": {}}"#).unwrap();
        assert_eq!(frame.sequence, Some(0));
    }

    #[test]
    fn test_parse_rejects_non_numeric_values() {
        assert!(BlendShapeFrame::from_json(r#"{"eyeBlinkLeft": "wide"}"#).is_err());
        assert!(BlendShapeFrame::from_json("[0.1, 0.2]").is_err());
    }

    #[test]
    fn test_missing_coefficient_reads_zero() {
        let frame = BlendShapeFrame::new(1).with("mouthLeft", 0.7);
        assert_eq!(frame.tracked(BlendShape::MouthRight), 0.0);
    }
}
