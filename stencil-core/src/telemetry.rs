//! Telemetry: per-run resolved-preset & metrics dump (JSON), written next
//! to the output image. Lets a caller inspect exactly which constants and
//! auto-tune outcome produced a given raster, without re-running the engine.
//!
//! Dependencies in Cargo.toml:
//! serde = { version = "1", features = ["derive"] }
//! serde_json = "1"
//! chrono = { version = "0.4", features = ["clock"] }

use crate::metrics::Metrics;
use crate::modulation::FrameModulation;
use crate::preset::{Preset, PresetId};
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct ImageInfo {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct Build {
    pub git_sha: String,
    pub branch: String,
    pub built_at: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct Dump {
    pub image: ImageInfo,
    pub preset_id: String,
    pub preset: Preset,
    pub modulation: FrameModulation,
    pub metrics: Metrics,
    pub build: Build,
}

fn git_info() -> (String, String) {
    let sha = option_env!("VERGEN_GIT_SHA")
        .or_else(|| option_env!("GIT_COMMIT"))
        .or(option_env!("GITHUB_SHA"))
        .unwrap_or("unknown")
        .to_string();
    let branch = option_env!("VERGEN_GIT_BRANCH")
        .or_else(|| option_env!("GIT_BRANCH"))
        .unwrap_or("unknown")
        .to_string();
    (sha, branch)
}

fn exe_version() -> String {
    option_env!("CARGO_PKG_VERSION").unwrap_or("0.0.0").to_string()
}

pub fn make_dump(
    image_path: &str,
    width: u32,
    height: u32,
    preset_id: PresetId,
    preset: Preset,
    modulation: FrameModulation,
    metrics: Metrics,
) -> Dump {
    let (git_sha, branch) = git_info();
    Dump {
        image: ImageInfo { path: image_path.to_string(), width, height },
        preset_id: preset_id.as_str().to_string(),
        preset,
        modulation,
        metrics,
        build: Build { git_sha, branch, built_at: Utc::now().to_rfc3339(), version: exe_version() },
    }
}

/// Write `<basename>.stencil.json` next to `output_path`.
pub fn write_json_dump(output_path: &Path, dump: &Dump) -> io::Result<PathBuf> {
    let json_path = replace_extension(output_path, "stencil.json");
    if let Some(parent) = json_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&json_path)?;
    serde_json::to_writer_pretty(file, dump)?;
    Ok(json_path)
}

fn replace_extension(path: &Path, new_ext: &str) -> PathBuf {
    let p = path.to_path_buf();
    if let Some(stem) = p.file_stem().and_then(|s| s.to_str()) {
        let parent = p.parent().map(|pp| pp.to_path_buf()).unwrap_or_default();
        return parent.join(format!("{stem}.{new_ext}"));
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::preset_for;

    #[test]
    fn replace_extension_keeps_parent_directory() {
        let p = Path::new("/tmp/out/frame.png");
        assert_eq!(replace_extension(p, "stencil.json"), PathBuf::from("/tmp/out/frame.stencil.json"));
    }

    #[test]
    fn make_dump_carries_preset_id_as_string() {
        let metrics = Metrics {
            white_ratio: 0.15,
            component_count: 12,
            mean_component_area: 4.0,
            max_component_area: 40,
            edge_alignment_score: 0.3,
            fallback_segmentation: false,
            tuned_iterations: 8,
        };
        let dump = make_dump(
            "in.png",
            10,
            10,
            PresetId::NeonContour,
            preset_for(PresetId::NeonContour),
            FrameModulation::default(),
            metrics,
        );
        assert_eq!(dump.preset_id, "neon-contour");
    }
}
