//! Binarizer + auto-tuner (§4.12): dithers the ink map against a scalar
//! threshold, runs morphology/pruning/isolation, and tunes the threshold
//! over up to eight iterations to minimize a composite coverage/topology/
//! edge-alignment/band-balance cost. Falls back to a contrast-boosted
//! rescue pass if coverage is starved.

use crate::algorithms::components::{component_stats, prune};
use crate::algorithms::dither::dither;
use crate::algorithms::isolate::isolate_white_pixels;
use crate::algorithms::morphology::{dilate, erode};
use crate::algorithms::percentile::percentile_normalize;
use crate::metrics::Metrics;
use crate::preset::Preset;
use crate::raster::{BinaryRaster, FloatField, Sobel};

const MAX_ITERATIONS: u32 = 8;

pub fn binarize(
    ink_map: &FloatField,
    sobel: &Sobel,
    preset: &Preset,
    fallback_segmentation: bool,
) -> (BinaryRaster, Metrics) {
    let (binary, metrics) = run_autotune(ink_map, sobel, preset, fallback_segmentation);

    if metrics.white_ratio < 0.9 * preset.min_white_coverage_floor {
        let boosted = boost_ink_map(ink_map);
        return run_autotune(&boosted, sobel, preset, fallback_segmentation);
    }

    (binary, metrics)
}

fn boost_ink_map(ink_map: &FloatField) -> FloatField {
    let renormalized = percentile_normalize(ink_map, 0.005, 0.985);
    let data =
        renormalized.data.iter().map(|&v| (v.max(0.0).powf(0.74) * 1.35).clamp(0.0, 1.0)).collect();
    FloatField::from_data(ink_map.width, ink_map.height, data)
}

fn run_autotune(
    ink_map: &FloatField,
    sobel: &Sobel,
    preset: &Preset,
    fallback_segmentation: bool,
) -> (BinaryRaster, Metrics) {
    let mut t = 0.34 + 0.04 * preset.spaceiness;
    let mut s = 0.16;

    let mut best_cost = f32::INFINITY;
    let mut best_binary = BinaryRaster::new(ink_map.width, ink_map.height);
    let mut best_metrics = Metrics {
        white_ratio: 0.0,
        component_count: 0,
        mean_component_area: 0.0,
        max_component_area: 0,
        edge_alignment_score: 0.0,
        fallback_segmentation,
        tuned_iterations: MAX_ITERATIONS,
    };

    for _ in 1..=MAX_ITERATIONS {
        let raw = dither(ink_map, t, preset.dither);
        let mut post = post_process(&raw, preset, ink_map, false);
        let mut coverage = post.white_ratio();

        if coverage < preset.min_white_coverage_floor && preset.isolate_whites {
            post = post_process(&raw, preset, ink_map, true);
            coverage = post.white_ratio();
        }

        let cc = component_stats(&post);
        let alignment = edge_alignment(&post, sobel);
        let (top_density, low_density) = band_densities(&post);

        let tolerance = preset.coverage_tolerance.max(0.01);
        let cost = (coverage - preset.white_coverage_target).abs() / tolerance
            + (cc.count as f32 - preset.component_max_count as f32).max(0.0)
                / (preset.component_max_count as f32).max(1.0)
            + if cc.count == 0 { 2.0 } else { 0.0 }
            + 1.4 * (0.28 - alignment).max(0.0)
            + 18.0 * (top_density - 1.15 * low_density).max(0.0);

        if cost < best_cost {
            best_cost = cost;
            best_binary = post.clone();
            best_metrics = Metrics {
                white_ratio: coverage,
                component_count: cc.count,
                mean_component_area: cc.mean_area,
                max_component_area: cc.max_area,
                edge_alignment_score: alignment,
                fallback_segmentation,
                tuned_iterations: MAX_ITERATIONS,
            };
        }

        if coverage > preset.white_coverage_target {
            t += s;
        } else {
            t -= s;
        }
        t = t.clamp(0.0, 1.0);
        s *= 0.62;
    }

    (best_binary, best_metrics)
}

fn post_process(
    raw: &BinaryRaster,
    preset: &Preset,
    ink_map: &FloatField,
    skip_isolation: bool,
) -> BinaryRaster {
    let mut b = raw.clone();

    if preset.stroke_thickness > 1 {
        b = dilate(&b, preset.stroke_thickness - 1);
        if preset.spaceiness < 0.7 {
            b = erode(&b, 1);
        }
    } else if preset.spaceiness < 0.7 {
        b = erode(&b, 1);
        b = dilate(&b, 1);
    }

    let min_area = (1u32)
        .max((preset.component_min_area as f32 * (1.0 - 0.7 * preset.spaceiness)).round() as u32);
    let max_count = (1000u32)
        .max((preset.component_max_count as f32 * (1.0 + 0.25 * preset.spaceiness)).round() as u32);
    b = prune(&b, min_area, max_count);

    if preset.isolate_whites && !skip_isolation {
        b = isolate_white_pixels(&b, ink_map, preset.isolation_radius);
    }

    b
}

fn edge_alignment(b: &BinaryRaster, sobel: &Sobel) -> f32 {
    let mut white = 0u32;
    let mut aligned = 0u32;
    for (i, &v) in b.data.iter().enumerate() {
        if v != 0 {
            white += 1;
            if sobel.mag[i] >= 0.2 {
                aligned += 1;
            }
        }
    }
    if white == 0 {
        0.0
    } else {
        aligned as f32 / white as f32
    }
}

fn band_densities(b: &BinaryRaster) -> (f32, f32) {
    let height = b.height;
    let width = b.width as usize;
    let split = (0.28 * height as f32).round() as u32;

    let mut top_white = 0u32;
    let mut top_total = 0u32;
    let mut low_white = 0u32;
    let mut low_total = 0u32;

    for y in 0..height {
        for x in 0..width as u32 {
            let idx = (y as usize) * width + (x as usize);
            if y < split {
                top_total += 1;
                if b.data[idx] != 0 {
                    top_white += 1;
                }
            } else {
                low_total += 1;
                if b.data[idx] != 0 {
                    low_white += 1;
                }
            }
        }
    }

    let top_density = if top_total > 0 { top_white as f32 / top_total as f32 } else { 0.0 };
    let low_density = if low_total > 0 { low_white as f32 / low_total as f32 } else { 0.0 };
    (top_density, low_density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::sobel::sobel;
    use crate::preset::{preset_for, PresetId};

    #[test]
    fn tuned_iterations_always_reports_the_full_loop() {
        let ink = FloatField::new(20, 20, 0.5);
        let grad = sobel(&FloatField::new(20, 20, 0.5));
        let preset = preset_for(PresetId::NeonContour);
        let (_bin, metrics) = binarize(&ink, &grad, &preset, false);
        assert_eq!(metrics.tuned_iterations, MAX_ITERATIONS);
    }

    #[test]
    fn all_black_ink_map_yields_no_components() {
        let ink = FloatField::new(16, 16, 0.0);
        let grad = sobel(&FloatField::new(16, 16, 0.0));
        let preset = preset_for(PresetId::NeonContour);
        let (binary, metrics) = binarize(&ink, &grad, &preset, false);
        assert!(binary.data.iter().all(|&v| v == 0));
        assert_eq!(metrics.component_count, 0);
    }

    #[test]
    fn output_is_strictly_binary() {
        let mut ink = FloatField::new(24, 24, 0.2);
        for y in 8..16 {
            for x in 8..16 {
                ink.set(x, y, 0.9);
            }
        }
        let grad = sobel(&ink);
        let preset = preset_for(PresetId::TopoStroke);
        let (binary, _) = binarize(&ink, &grad, &preset, false);
        assert!(binary.data.iter().all(|&v| v == 0 || v == 1));
    }
}
