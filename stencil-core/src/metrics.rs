//! Output metrics record (§6, §8 glossary).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    pub white_ratio: f32,
    pub component_count: u32,
    pub mean_component_area: f32,
    pub max_component_area: u32,
    pub edge_alignment_score: f32,
    pub fallback_segmentation: bool,
    /// Always the full loop count (§9 "open source ambiguity": this
    /// implementation reports the last completed iteration, matching the
    /// specified behavior).
    pub tuned_iterations: u32,
}
