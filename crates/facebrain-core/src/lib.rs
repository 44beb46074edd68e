//! facebrain-core — Facial asymmetry monitoring.
//!
//! Samples eight left/right blend-shape coefficients from face-tracker
//! frames and scores left-minus-right differences one pair at a time.

pub mod blendshape;
pub mod expression;
pub mod monitor;
pub mod sampler;
pub mod scorer;
pub mod types;

pub use blendshape::BlendShape;
pub use expression::ExpressionCue;
pub use monitor::{FaceMonitor, MonitorConfig};
pub use sampler::{Sampler, TrackedSlots};
pub use scorer::{AsymmetryPair, Measurement, Scorer};
pub use types::{BlendShapeFrame, Readout};
