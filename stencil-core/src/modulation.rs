//! Frame-modulation contract (§6, optional). Consulted only by the ink-map
//! builder; every other stage ignores it. Still-image transforms use the
//! all-zero default, which makes the result uniquely determined by the
//! input and preset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameModulation {
    pub phase: f32,
    pub flow_strength: f32,
    pub jitter: f32,
}

impl Default for FrameModulation {
    fn default() -> Self {
        Self { phase: 0.0, flow_strength: 0.0, jitter: 0.0 }
    }
}
