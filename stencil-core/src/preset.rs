//! Preset table (§6): the five named bundles of tuning constants that drive
//! the ink-map builder and the auto-tune loop. Data, not code — mirrors the
//! teacher's static-registry pattern (`parameters/registry.rs`) of keeping a
//! `Lazy<HashMap<Id, Params>>` rather than branching on the id throughout
//! the pipeline.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DitherMode {
    Floyd,
    Bayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetId {
    NeonContour,
    SilhouetteEtch,
    IndustrialNoise,
    CrowdGhost,
    TopoStroke,
}

impl PresetId {
    pub fn all() -> [PresetId; 5] {
        [
            PresetId::NeonContour,
            PresetId::SilhouetteEtch,
            PresetId::IndustrialNoise,
            PresetId::CrowdGhost,
            PresetId::TopoStroke,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetId::NeonContour => "neon-contour",
            PresetId::SilhouetteEtch => "silhouette-etch",
            PresetId::IndustrialNoise => "industrial-noise",
            PresetId::CrowdGhost => "crowd-ghost",
            PresetId::TopoStroke => "topo-stroke",
        }
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetId {
    type Err = std::convert::Infallible;

    /// An unknown id resolves to `neon-contour` — the core never treats an
    /// invalid preset string as an error (§7).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "silhouette-etch" => PresetId::SilhouetteEtch,
            "industrial-noise" => PresetId::IndustrialNoise,
            "crowd-ghost" => PresetId::CrowdGhost,
            "topo-stroke" => PresetId::TopoStroke,
            _ => PresetId::NeonContour,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub edge_weight: f32,
    pub fill_weight: f32,
    pub texture_weight: f32,
    pub ghost_weight: f32,
    pub stroke_thickness: u32,
    pub grain_scale: f32,
    pub smoothing: f32,
    pub white_coverage_target: f32,
    pub coverage_tolerance: f32,
    pub component_min_area: u32,
    pub component_max_count: u32,
    pub center_bias: f32,
    pub edge_gamma: f32,
    pub fill_gamma: f32,
    pub band_frequency: f32,
    pub spaceiness: f32,
    pub background_suppression: f32,
    pub luma_suppression: f32,
    pub isolation_radius: u32,
    pub isolate_whites: bool,
    pub min_white_coverage_floor: f32,
    pub center_focus: f32,
    pub top_suppression: f32,
    pub dither: DitherMode,
}

static PRESETS: Lazy<HashMap<PresetId, Preset>> = Lazy::new(build_presets);

/// Look up the resolved tuning constants for a preset id. Every `PresetId`
/// variant is populated at startup, so this never fails.
pub fn preset_for(id: PresetId) -> Preset {
    PRESETS.get(&id).cloned().expect("all PresetId variants are populated")
}

fn build_presets() -> HashMap<PresetId, Preset> {
    let mut m = HashMap::new();

    m.insert(
        PresetId::NeonContour,
        Preset {
            edge_weight: 1.0,
            fill_weight: 0.25,
            texture_weight: 0.35,
            ghost_weight: 0.0,
            stroke_thickness: 1,
            grain_scale: 3.0,
            smoothing: 1.0,
            white_coverage_target: 0.13,
            coverage_tolerance: 0.035,
            component_min_area: 6,
            component_max_count: 4000,
            center_bias: 0.15,
            edge_gamma: 0.85,
            fill_gamma: 1.2,
            band_frequency: 3.0,
            spaceiness: 0.55,
            background_suppression: 0.3,
            luma_suppression: 0.2,
            isolation_radius: 0,
            isolate_whites: false,
            min_white_coverage_floor: 0.04,
            center_focus: 0.2,
            top_suppression: 0.1,
            dither: DitherMode::Floyd,
        },
    );

    m.insert(
        PresetId::SilhouetteEtch,
        Preset {
            edge_weight: 0.55,
            fill_weight: 1.0,
            texture_weight: 0.15,
            ghost_weight: 0.0,
            stroke_thickness: 2,
            grain_scale: 4.0,
            smoothing: 1.5,
            white_coverage_target: 0.155,
            coverage_tolerance: 0.035,
            component_min_area: 10,
            component_max_count: 1500,
            center_bias: 0.25,
            edge_gamma: 1.0,
            fill_gamma: 0.8,
            band_frequency: 2.0,
            spaceiness: 0.25,
            background_suppression: 0.45,
            luma_suppression: 0.1,
            isolation_radius: 0,
            isolate_whites: false,
            min_white_coverage_floor: 0.05,
            center_focus: 0.3,
            top_suppression: 0.05,
            dither: DitherMode::Bayer,
        },
    );

    m.insert(
        PresetId::IndustrialNoise,
        Preset {
            edge_weight: 0.6,
            fill_weight: 0.2,
            texture_weight: 1.0,
            ghost_weight: 0.1,
            stroke_thickness: 1,
            grain_scale: 2.0,
            smoothing: 0.5,
            white_coverage_target: 0.22,
            coverage_tolerance: 0.05,
            component_min_area: 2,
            component_max_count: 6000,
            center_bias: 0.1,
            edge_gamma: 0.9,
            fill_gamma: 1.3,
            band_frequency: 5.0,
            spaceiness: 0.8,
            background_suppression: 0.6,
            luma_suppression: 0.5,
            isolation_radius: 1,
            isolate_whites: true,
            min_white_coverage_floor: 0.03,
            center_focus: 0.1,
            top_suppression: 0.0,
            dither: DitherMode::Bayer,
        },
    );

    m.insert(
        PresetId::CrowdGhost,
        Preset {
            edge_weight: 0.4,
            fill_weight: 0.35,
            texture_weight: 0.3,
            ghost_weight: 1.0,
            stroke_thickness: 1,
            grain_scale: 5.0,
            smoothing: 1.2,
            white_coverage_target: 0.17,
            coverage_tolerance: 0.04,
            component_min_area: 4,
            component_max_count: 3000,
            center_bias: 0.2,
            edge_gamma: 1.1,
            fill_gamma: 1.0,
            band_frequency: 1.6,
            spaceiness: 0.45,
            background_suppression: 0.35,
            luma_suppression: 0.25,
            isolation_radius: 0,
            isolate_whites: false,
            min_white_coverage_floor: 0.05,
            center_focus: 0.25,
            top_suppression: 0.15,
            dither: DitherMode::Floyd,
        },
    );

    m.insert(
        PresetId::TopoStroke,
        Preset {
            edge_weight: 0.8,
            fill_weight: 0.5,
            texture_weight: 0.2,
            ghost_weight: 0.0,
            stroke_thickness: 3,
            grain_scale: 6.0,
            smoothing: 1.0,
            white_coverage_target: 0.155,
            coverage_tolerance: 0.035,
            component_min_area: 12,
            component_max_count: 1200,
            center_bias: 0.3,
            edge_gamma: 0.9,
            fill_gamma: 1.0,
            band_frequency: 1.2,
            spaceiness: 0.15,
            background_suppression: 0.4,
            luma_suppression: 0.15,
            isolation_radius: 0,
            isolate_whites: false,
            min_white_coverage_floor: 0.06,
            center_focus: 0.35,
            top_suppression: 0.05,
            dither: DitherMode::Floyd,
        },
    );

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_resolves_to_neon_contour() {
        assert_eq!(PresetId::from_str("bogus").unwrap(), PresetId::NeonContour);
    }

    #[test]
    fn round_trips_through_display() {
        for id in PresetId::all() {
            assert_eq!(PresetId::from_str(id.as_str()).unwrap(), id);
        }
    }

    #[test]
    fn all_five_presets_are_registered() {
        for id in PresetId::all() {
            let p = preset_for(id);
            assert!(p.white_coverage_target > 0.0 && p.white_coverage_target < 1.0);
        }
    }
}
