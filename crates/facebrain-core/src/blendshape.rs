//! The eight tracked blend-shape coefficients and their tracker-side names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A blend shape the monitor keeps a slot for.
///
/// Declaration order is slot order: every left-side coefficient is
/// immediately followed by its right-side partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlendShape {
    MouthSmileLeft,
    MouthSmileRight,
    EyeBlinkLeft,
    EyeBlinkRight,
    MouthLeft,
    MouthRight,
    BrowOuterUpLeft,
    BrowOuterUpRight,
}

impl BlendShape {
    /// Number of tracked slots.
    pub const COUNT: usize = 8;

    /// All tracked shapes in slot order.
    pub const ALL: [BlendShape; Self::COUNT] = [
        BlendShape::MouthSmileLeft,
        BlendShape::MouthSmileRight,
        BlendShape::EyeBlinkLeft,
        BlendShape::EyeBlinkRight,
        BlendShape::MouthLeft,
        BlendShape::MouthRight,
        BlendShape::BrowOuterUpLeft,
        BlendShape::BrowOuterUpRight,
    ];

    /// Slot index (0..8).
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Coefficient name as reported by the face tracker (e.g. "eyeBlinkLeft").
    pub fn name(self) -> &'static str {
        match self {
            BlendShape::MouthSmileLeft => "mouthSmileLeft",
            BlendShape::MouthSmileRight => "mouthSmileRight",
            BlendShape::EyeBlinkLeft => "eyeBlinkLeft",
            BlendShape::EyeBlinkRight => "eyeBlinkRight",
            BlendShape::MouthLeft => "mouthLeft",
            BlendShape::MouthRight => "mouthRight",
            BlendShape::BrowOuterUpLeft => "browOuterUpLeft",
            BlendShape::BrowOuterUpRight => "browOuterUpRight",
        }
    }
}

impl fmt::Display for BlendShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_follow_declaration_order() {
        for (i, shape) in BlendShape::ALL.iter().enumerate() {
            assert_eq!(shape.slot(), i);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = BlendShape::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BlendShape::COUNT);
    }

    #[test]
    fn test_serde_uses_tracker_names() {
        let json = serde_json::to_string(&BlendShape::BrowOuterUpRight).unwrap();
        assert_eq!(json, "\"browOuterUpRight\"");
    }
}
