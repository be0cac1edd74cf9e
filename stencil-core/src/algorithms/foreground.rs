//! Foreground estimator (§4.5): multi-scale saliency + edge magnitude +
//! center prior, thresholded by histogram quantile, smoothed, with a
//! full-frame fallback when the raw mask ratio is implausible.

use crate::algorithms::blur::box_blur;
use crate::algorithms::percentile::histogram_quantile;
use crate::raster::{FloatField, Sobel};

pub struct ForegroundResult {
    pub mask: FloatField,
    pub fallback: bool,
}

pub fn estimate_foreground(norm: &FloatField, sobel: &Sobel, center_bias: f32) -> ForegroundResult {
    let width = norm.width;
    let height = norm.height;

    let blur_small = box_blur(norm, 3);
    let blur_large = box_blur(norm, 14);
    let mut saliency = FloatField::new(width, height, 0.0);
    for i in 0..saliency.data.len() {
        saliency.data[i] = (1.8 * (blur_small.data[i] - blur_large.data[i]).abs()).clamp(0.0, 1.0);
    }

    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let half_diag = (cx * cx + cy * cy).sqrt().max(1e-6);

    let mut score = FloatField::new(width, height, 0.0);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let center = 1.0 - dist / half_diag;
            let idx = (y as usize) * (width as usize) + (x as usize);
            let s = 0.48 * sobel.mag[idx] + 0.42 * saliency.data[idx] + center_bias * center;
            score.data[idx] = s.clamp(0.0, 1.0);
        }
    }

    let threshold = histogram_quantile(&score.data, 0.64);
    let mut ones = 0usize;
    for &v in &score.data {
        if v > threshold {
            ones += 1;
        }
    }
    let ratio = if score.data.is_empty() { 0.0 } else { ones as f32 / score.data.len() as f32 };

    if !(0.03..=0.86).contains(&ratio) {
        return ForegroundResult { mask: FloatField::new(width, height, 1.0), fallback: true };
    }

    let mut raw = FloatField::new(width, height, 0.0);
    for i in 0..score.data.len() {
        raw.data[i] = if score.data[i] > threshold { 1.0 } else { 0.0 };
    }

    let blurred = box_blur(&raw, 2);
    let mut mask = FloatField::new(width, height, 0.0);
    for i in 0..blurred.data.len() {
        mask.data[i] = if blurred.data[i] > 0.42 { 1.0 } else { 0.0 };
    }

    ForegroundResult { mask, fallback: false }
}
