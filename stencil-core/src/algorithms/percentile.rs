//! Percentile normalization (§4.2): 256-bin histogram contrast stretch, and
//! the shared quantile lookup reused by the foreground estimator (§4.5).

use crate::raster::FloatField;

/// Value (in `[0,1]`, 256-bin resolution) at which the cumulative histogram
/// first reaches `q · N`. Shared by percentile normalization and the
/// foreground estimator's quantile threshold.
pub fn histogram_quantile(data: &[f32], q: f32) -> f32 {
    let n = data.len();
    if n == 0 {
        return 0.0;
    }
    let mut hist = [0u32; 256];
    for &v in data {
        let bin = (v.clamp(0.0, 1.0) * 255.0).round() as usize;
        hist[bin.min(255)] += 1;
    }

    let target = (q * n as f32).ceil().max(1.0) as u32;
    let mut cumulative = 0u32;
    for (bin, &count) in hist.iter().enumerate() {
        cumulative += count;
        if cumulative >= target {
            return bin as f32 / 255.0;
        }
    }
    1.0
}

pub fn percentile_normalize(field: &FloatField, p_low: f32, p_high: f32) -> FloatField {
    if field.data.is_empty() {
        return field.clone();
    }

    let low = histogram_quantile(&field.data, p_low);
    let high_raw = histogram_quantile(&field.data, p_high);
    let high = (low + 1.0 / 255.0).max(high_raw);

    let data = field
        .data
        .iter()
        .map(|&x| ((x - low) / (high - low)).clamp(0.0, 1.0))
        .collect();
    FloatField::from_data(field.width, field.height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretches_a_narrow_range_to_full_scale() {
        let data: Vec<f32> = (0..100).map(|i| 0.4 + 0.002 * i as f32).collect();
        let f = FloatField::from_data(10, 10, data);
        let out = percentile_normalize(&f, 0.02, 0.98);
        let min = out.data.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = out.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!(min < 0.05);
        assert!(max > 0.95);
    }

    #[test]
    fn double_application_is_near_idempotent() {
        let data: Vec<f32> = (0..64).map(|i| i as f32 / 63.0).collect();
        let f = FloatField::from_data(8, 8, data);
        let once = percentile_normalize(&f, 0.01, 0.99);
        let twice = percentile_normalize(&once, 0.01, 0.99);
        for (a, b) in once.data.iter().zip(twice.data.iter()) {
            assert!((a - b).abs() <= 1.0 / 255.0 + 1e-4);
        }
    }

    #[test]
    fn constant_field_does_not_divide_by_zero() {
        let f = FloatField::new(4, 4, 0.5);
        let out = percentile_normalize(&f, 0.02, 0.98);
        assert!(out.data.iter().all(|v| v.is_finite()));
    }
}
