//! `FaceMonitor` — the single owner of tracked slots and scorer state.

use crate::expression::{CueDetector, ExpressionCue, CUE_THRESHOLD};
use crate::sampler::{Sampler, TrackedSlots, ACTIVATION_THRESHOLD};
use crate::scorer::{AsymmetryPair, Measurement, Scorer};
use crate::types::{BlendShapeFrame, DifferenceReadout, Readout, SlotReadout};

/// Thresholds used by the monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorConfig {
    /// A tracked coefficient must strictly exceed this to update its slot.
    pub activation_threshold: f32,
    /// A cue coefficient must strictly exceed this to be reported.
    pub cue_threshold: f32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            activation_threshold: ACTIVATION_THRESHOLD,
            cue_threshold: CUE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FaceMonitor {
    sampler: Sampler,
    cues: CueDetector,
    slots: TrackedSlots,
    scorer: Scorer,
    frames_seen: u64,
}

impl FaceMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            sampler: Sampler::new(config.activation_threshold),
            cues: CueDetector::new(config.cue_threshold),
            slots: TrackedSlots::new(),
            scorer: Scorer::new(),
            frames_seen: 0,
        }
    }

    /// Sample one tracker frame. Returns the expression cues it carries.
    pub fn on_frame(&mut self, frame: &BlendShapeFrame) -> Vec<ExpressionCue> {
        let updated = self.sampler.sample(&mut self.slots, frame);
        self.frames_seen += 1;
        tracing::trace!(sequence = frame.sequence, updated, "frame sampled");

        let cues = self.cues.detect(frame);
        for cue in &cues {
            tracing::info!(sequence = frame.sequence, cue = cue.description(), "expression cue");
        }
        cues
    }

    /// Score the next pair (one user action).
    pub fn measure(&mut self) -> Measurement {
        let measurement = self.scorer.measure(&self.slots);
        tracing::info!(
            pair = measurement.pair.label(),
            difference = measurement.difference,
            next = measurement.next.label(),
            "measurement taken"
        );
        measurement
    }

    pub fn readout(&self) -> Readout {
        let differences = self.scorer.differences();
        Readout {
            tracked: self
                .slots
                .iter()
                .map(|(shape, value)| SlotReadout { shape, value })
                .collect(),
            differences: AsymmetryPair::ALL
                .into_iter()
                .map(|pair| DifferenceReadout {
                    pair,
                    difference: differences.get(pair),
                    display: differences.display_value(pair),
                })
                .collect(),
            next_pair: self.scorer.next_pair(),
            last_measurement: self.scorer.last_measurement(),
            frames_seen: self.frames_seen,
        }
    }

    pub fn slots(&self) -> &TrackedSlots {
        &self.slots
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blendshape::BlendShape;
    use crate::scorer::UNMEASURED_SENTINEL;

    #[test]
    fn test_smile_asymmetry_end_to_end() {
        let mut monitor = FaceMonitor::default();
        monitor.on_frame(
            &BlendShapeFrame::new(1)
                .with("mouthSmileLeft", 0.8)
                .with("mouthSmileRight", 0.3),
        );

        let m = monitor.measure();
        assert_eq!(m.pair, AsymmetryPair::Smile);
        assert!((m.difference - 0.5).abs() < 1e-6);

        let readout = monitor.readout();
        assert_eq!(readout.next_pair, AsymmetryPair::Blink);
        assert_eq!(readout.last_measurement, Some(m));
        assert_eq!(readout.frames_seen, 1);
        assert_eq!(readout.tracked[0].shape, BlendShape::MouthSmileLeft);
        assert_eq!(readout.tracked[0].value, 0.8);
        assert!(readout.differences[0].difference.is_some());
        assert_eq!(readout.differences[1].difference, None);
        assert_eq!(readout.differences[1].display, UNMEASURED_SENTINEL);
    }

    #[test]
    fn test_readings_persist_after_face_relaxes() {
        let mut monitor = FaceMonitor::default();
        monitor.on_frame(&BlendShapeFrame::new(1).with("eyeBlinkLeft", 0.95));
        monitor.on_frame(&BlendShapeFrame::new(2).with("eyeBlinkLeft", 0.05));
        assert_eq!(monitor.slots().get(BlendShape::EyeBlinkLeft), 0.95);
        assert_eq!(monitor.frames_seen(), 2);
    }

    #[test]
    fn test_on_frame_reports_cues_without_touching_slots() {
        let mut monitor = FaceMonitor::default();
        let cues = monitor.on_frame(&BlendShapeFrame::new(1).with("tongueOut", 0.6));
        assert_eq!(cues, [ExpressionCue::TongueOut]);
        assert_eq!(*monitor.slots(), TrackedSlots::new());
    }

    #[test]
    fn test_config_thresholds_apply() {
        let mut monitor = FaceMonitor::new(MonitorConfig {
            activation_threshold: 0.5,
            cue_threshold: 0.7,
        });
        let cues = monitor.on_frame(
            &BlendShapeFrame::new(1)
                .with("mouthLeft", 0.4)
                .with("tongueOut", 0.6),
        );
        assert!(cues.is_empty());
        assert_eq!(monitor.slots().get(BlendShape::MouthLeft), 0.0);
    }

    #[test]
    fn test_readout_serializes() {
        let json = serde_json::to_value(FaceMonitor::default().readout()).unwrap();
        assert_eq!(json["next_pair"], "Smile");
        assert_eq!(json["tracked"][7]["shape"], "browOuterUpRight");
        assert!(json["differences"][3]["difference"].is_null());
        assert_eq!(json["differences"][3]["pair"], "Raise Eyebrows");
        assert!(json["last_measurement"].is_null());
    }
}
