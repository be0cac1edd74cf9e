//! Illumination normalizer (§4.3): homomorphic division by a large-radius
//! blur, log compression, double percentile stretch, and a high-pass
//! rebalancing pass.

use crate::algorithms::blur::box_blur;
use crate::algorithms::percentile::percentile_normalize;
use crate::raster::FloatField;

pub fn normalize_illumination(gray: &FloatField) -> FloatField {
    let width = gray.width;
    let height = gray.height;
    if gray.data.is_empty() {
        return gray.clone();
    }

    let min_dim = width.min(height);
    let r = (0.03 * min_dim as f32).floor().max(6.0) as u32;
    let l = box_blur(gray, r);

    let mut h = FloatField::new(width, height, 0.0);
    for i in 0..gray.data.len() {
        let ratio = gray.data[i] / (l.data[i] + 1e-6);
        h.data[i] = (1.0 + 1.5 * ratio).ln();
    }

    let h = percentile_normalize(&h, 0.01, 0.99);
    let h = percentile_normalize(&h, 0.02, 0.98);

    let m = box_blur(&h, 2);
    let mut n_prime = FloatField::new(width, height, 0.0);
    for i in 0..h.data.len() {
        let v = 0.72 * h.data[i] + 0.28 * (h.data[i] - m.data[i] + 0.5);
        n_prime.data[i] = v.clamp(0.0, 1.0);
    }

    percentile_normalize(&n_prime, 0.01, 0.99)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_stays_in_unit_range() {
        let data: Vec<f32> = (0..64).map(|i| (i % 7) as f32 / 6.0).collect();
        let gray = FloatField::from_data(8, 8, data);
        let out = normalize_illumination(&gray);
        assert!(out.data.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn handles_degenerate_empty_input() {
        let gray = FloatField::from_data(0, 0, vec![]);
        let out = normalize_illumination(&gray);
        assert!(out.data.is_empty());
    }
}
