//! Ink-map builder (§4.7): weighted blend of edge, fill, detail, oriented
//! stripe texture, deterministic grain, and flowing band modulation; gated
//! by background suppression, luminance prior, center field, top fade, and
//! row gain; then smoothed, row-rebalanced, and percentile-normalized.

use crate::algorithms::blur::box_blur;
use crate::algorithms::hash::hash01;
use crate::algorithms::percentile::percentile_normalize;
use crate::algorithms::row_rebalance::rebalance_rows;
use crate::modulation::FrameModulation;
use crate::preset::Preset;
use crate::raster::{FloatField, Sobel};

const EPS: f32 = 1e-6;

pub fn build_ink_map(
    norm: &FloatField,
    locked_tone: &FloatField,
    row_gain: &[f32],
    sobel: &Sobel,
    fg_mask: &FloatField,
    preset: &Preset,
    modulation: &FrameModulation,
) -> FloatField {
    let width = norm.width;
    let height = norm.height;
    if width == 0 || height == 0 {
        return FloatField::new(width, height, 0.0);
    }

    let blur2 = box_blur(norm, 2);
    let mut detail = FloatField::new(width, height, 0.0);
    for i in 0..detail.data.len() {
        detail.data[i] = (norm.data[i] - blur2.data[i]).abs();
    }

    let mag_field = FloatField::from_data(sobel.width, sobel.height, sobel.mag.clone());
    let edge_near = box_blur(&mag_field, 1);
    let mid_r = (0.5 * preset.grain_scale).round().max(2.0) as u32;
    let far_r = (1.5 * preset.grain_scale).round().max(4.0) as u32;
    let edge_mid = box_blur(&mag_field, mid_r);
    let edge_far = box_blur(&mag_field, far_r);

    let grain_scale = preset.grain_scale.max(1.0);
    let mut ink = FloatField::new(width, height, 0.0);

    for y in 0..height {
        let y_norm = if height > 1 { y as f32 / (height - 1) as f32 } else { 0.0 };
        let dy = (y as f32 - 0.58 * height as f32) / (0.34 * height as f32).max(EPS);
        let gain = row_gain.get(y as usize).copied().unwrap_or(1.0);
        let top_fade = 1.0 - preset.top_suppression * ((0.28 - y_norm) / 0.28).clamp(0.0, 1.0);

        for x in 0..width {
            let idx = (y as usize) * (width as usize) + (x as usize);
            let dx = (x as f32 - 0.5 * width as f32) / (0.34 * width as f32).max(EPS);

            let mag = sobel.mag[idx];
            let gx = sobel.gx[idx];
            let gy = sobel.gy[idx];

            let edge = mag.powf(preset.edge_gamma);
            let fill = locked_tone.data[idx].powf(preset.fill_gamma) * fg_mask.data[idx];

            let angle = (gy + EPS).atan2(gx + EPS);
            let oriented = (x as f32 * angle.cos() + y as f32 * angle.sin()) / grain_scale;
            let stripe = 0.5 * (2.2 * oriented + 2.6 * angle + 0.7 * modulation.phase).sin() + 0.5;
            let noise = hash01(x, y);
            let texture = (0.75 * stripe + noise * (0.32 + 0.12 * modulation.jitter)).clamp(0.0, 1.0);

            let flow = (0.35 * edge_near.data[idx] + 0.35 * edge_mid.data[idx]
                + 0.30 * edge_far.data[idx])
                .clamp(0.0, 1.0);
            let wave = locked_tone.data[idx] * 1.6 + flow * 2.4 + oriented * 0.08 + modulation.phase;
            let ghost_band = (std::f32::consts::PI * preset.band_frequency * wave)
                .sin()
                .abs()
                .powf(2.2)
                * flow.max(0.0).powf(0.9);

            let stipple_keep = if noise > 0.72 * preset.spaceiness { 1.0 } else { 0.45 };
            let bg_kill = fg_mask.data[idx].powf(0.8 + preset.background_suppression);
            let dark_prior = (1.0 - locked_tone.data[idx]).powf(0.8 + preset.luma_suppression);
            let luma_gate = 0.2 + 0.8 * dark_prior;

            let center_field = (-(dx * dx + dy * dy)).exp();
            let center_gate = (1.0 - preset.center_focus)
                + preset.center_focus * (0.35 + 0.65 * center_field).clamp(0.0, 1.0);

            let flow_boost = 1.0 + modulation.flow_strength * (flow - 0.45) * 0.3;

            let mut v = preset.edge_weight * edge
                + preset.fill_weight * fill
                + 0.28 * detail.data[idx] * fg_mask.data[idx]
                + preset.texture_weight * texture * fg_mask.data[idx]
                + preset.ghost_weight * ghost_band * fg_mask.data[idx];

            v *= (0.3 + 0.7 * bg_kill) * luma_gate * center_gate * top_fade * gain * stipple_keep
                * flow_boost;

            ink.data[idx] = v.clamp(0.0, 1.0);
        }
    }

    let smoothed = box_blur(&ink, preset.smoothing.round().max(0.0) as u32);
    let rebalanced = rebalance_rows(&smoothed, fg_mask);
    percentile_normalize(&rebalanced, 0.01, 0.99)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::sobel::sobel;
    use crate::preset::{preset_for, PresetId};

    fn flat_inputs(w: u32, h: u32) -> (FloatField, FloatField, Vec<f32>, Sobel, FloatField) {
        let norm = FloatField::new(w, h, 0.4);
        let locked_tone = FloatField::new(w, h, 0.4);
        let row_gain = vec![1.0; h as usize];
        let grad = sobel(&norm);
        let mask = FloatField::new(w, h, 1.0);
        (norm, locked_tone, row_gain, grad, mask)
    }

    #[test]
    fn output_is_bounded() {
        let (norm, tone, gain, grad, mask) = flat_inputs(24, 24);
        let preset = preset_for(PresetId::NeonContour);
        let ink = build_ink_map(&norm, &tone, &gain, &grad, &mask, &preset, &FrameModulation::default());
        assert!(ink.data.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn background_suppression_kills_zero_mask_pixels() {
        let w = 16;
        let h = 16;
        let norm = FloatField::new(w, h, 0.6);
        let tone = FloatField::new(w, h, 0.6);
        let gain = vec![1.0; h as usize];
        let grad = sobel(&norm);
        let mask = FloatField::new(w, h, 0.0);
        let preset = preset_for(PresetId::SilhouetteEtch);
        let ink = build_ink_map(&norm, &tone, &gain, &grad, &mask, &preset, &FrameModulation::default());
        assert!(ink.data.iter().all(|&v| v <= 0.5));
    }
}
