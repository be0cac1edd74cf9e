//! Light-transfer builder (§4.6): locks local tone against an anchor point
//! and produces a per-row gain that equalizes foreground energy vertically.

use crate::algorithms::blur::box_blur;
use crate::algorithms::rowstats::{box_blur_1d, percentile};
use crate::raster::{FloatField, Sobel};

pub struct LightTransfer {
    pub locked_tone: FloatField,
    pub row_gain: Vec<f32>,
}

pub fn build_light_transfer(norm: &FloatField, sobel: &Sobel, fg_mask: &FloatField) -> LightTransfer {
    let width = norm.width;
    let height = norm.height;
    if width == 0 || height == 0 {
        return LightTransfer { locked_tone: norm.clone(), row_gain: vec![] };
    }

    let min_dim = width.min(height);
    let r = (0.06 * min_dim as f32).round().max(10.0) as u32;
    let local_light = box_blur(norm, r);

    let mut detail = FloatField::new(width, height, 0.0);
    for i in 0..detail.data.len() {
        detail.data[i] = (norm.data[i] - local_light.data[i]).abs();
    }

    let (x0, x1, y0, y1) = inner_crop(width, height);
    let mut best_idx = 0usize;
    let mut best_score = f32::NEG_INFINITY;
    for y in y0..y1 {
        for x in x0..x1 {
            let idx = (y as usize) * (width as usize) + (x as usize);
            let s = fg_mask.data[idx] * (0.52 * sobel.mag[idx] + 0.48 * detail.data[idx]);
            if s > best_score {
                best_score = s;
                best_idx = idx;
            }
        }
    }

    let ref_tone = norm.data[best_idx];
    let ref_detail = detail.data[best_idx];

    let mut locked_tone = FloatField::new(width, height, 0.0);
    for i in 0..locked_tone.data.len() {
        let v = ref_tone + (norm.data[i] - local_light.data[i]) * (1.1 + 1.6 * ref_detail);
        locked_tone.data[i] = v.clamp(0.0, 1.0);
    }

    let mut row_energy = vec![0f32; height as usize];
    for y in 0..height {
        let mut sum = 0f32;
        for x in 0..width {
            let idx = (y as usize) * (width as usize) + (x as usize);
            sum += fg_mask.data[idx]
                * (0.55 * sobel.mag[idx] + 0.45 * (locked_tone.data[idx] - ref_tone).abs());
        }
        row_energy[y as usize] = sum / width as f32;
    }

    let smooth_energy = box_blur_1d(&row_energy, 6);
    let median = percentile(&smooth_energy, 0.5);
    let eps = 1e-6;

    let row_gain: Vec<f32> = smooth_energy
        .iter()
        .map(|&e| 0.72 + 0.56 * (median / e.max(eps)).clamp(0.0, 1.0))
        .collect();

    LightTransfer { locked_tone, row_gain }
}

/// Inner crop `[0.15w, 0.85w) x [0.2h, 0.9h)` the anchor search is limited
/// to; falls back to the full axis range when the crop would be empty
/// (tiny images).
fn inner_crop(width: u32, height: u32) -> (u32, u32, u32, u32) {
    let mut x0 = (0.15 * width as f32).floor() as u32;
    let mut x1 = (0.85 * width as f32).floor() as u32;
    if x1 <= x0 {
        x0 = 0;
        x1 = width;
    }
    let mut y0 = (0.2 * height as f32).floor() as u32;
    let mut y1 = (0.9 * height as f32).floor() as u32;
    if y1 <= y0 {
        y0 = 0;
        y1 = height;
    }
    (x0.min(width - 1), x1.max(1).min(width), y0.min(height - 1), y1.max(1).min(height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::sobel::sobel;

    #[test]
    fn row_gain_has_one_entry_per_row() {
        let norm = FloatField::new(20, 16, 0.4);
        let grad = sobel(&norm);
        let mask = FloatField::new(20, 16, 1.0);
        let result = build_light_transfer(&norm, &grad, &mask);
        assert_eq!(result.row_gain.len(), 16);
    }

    #[test]
    fn degenerate_dimensions_do_not_panic() {
        let norm = FloatField::from_data(0, 0, vec![]);
        let grad = sobel(&norm);
        let mask = FloatField::from_data(0, 0, vec![]);
        let result = build_light_transfer(&norm, &grad, &mask);
        assert!(result.row_gain.is_empty());
    }

    #[test]
    fn locked_tone_stays_in_unit_range() {
        let mut norm = FloatField::new(24, 24, 0.3);
        norm.set(12, 12, 0.9);
        let grad = sobel(&norm);
        let mask = FloatField::new(24, 24, 1.0);
        let result = build_light_transfer(&norm, &grad, &mask);
        assert!(result.locked_tone.data.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}
