//! Momentary expression cues read from coefficients outside the tracked set.

use crate::types::BlendShapeFrame;
use serde::Serialize;

/// Default cue threshold.
pub const CUE_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionCue {
    TongueOut,
}

impl ExpressionCue {
    pub const ALL: [ExpressionCue; 1] = [ExpressionCue::TongueOut];

    /// Tracker coefficient the cue is read from.
    pub fn blend_shape_name(self) -> &'static str {
        match self {
            ExpressionCue::TongueOut => "tongueOut",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExpressionCue::TongueOut => "tongue out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueDetector {
    threshold: f32,
}

impl Default for CueDetector {
    fn default() -> Self {
        Self::new(CUE_THRESHOLD)
    }
}

impl CueDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Cues whose coefficient strictly exceeds the threshold in this frame.
    pub fn detect(&self, frame: &BlendShapeFrame) -> Vec<ExpressionCue> {
        ExpressionCue::ALL
            .into_iter()
            .filter(|cue| frame.value(cue.blend_shape_name()) > self.threshold)
            .collect()
    }
}
