//! facebrain-hw — Device-side inputs for the monitor.
//!
//! Reads blend-shape frames produced by an external face tracker and
//! discovers paired brain-wave headsets.

pub mod frame_source;
pub mod headset;

pub use frame_source::{FrameSource, FrameSourceError, JsonLinesSource};
pub use headset::{Headset, HeadsetError, HeadsetInfo};
