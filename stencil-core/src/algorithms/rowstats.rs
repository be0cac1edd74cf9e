//! Shared 1D row-statistics helpers (§4.6, §4.8): a box blur over a single
//! axis and a percentile lookup by sorting. The row-length arrays these
//! operate on are small (one value per image row), so a naive O(n·radius)
//! blur and a full sort are cheap — the O(w·h) rolling-sum contract in
//! §4.1 applies to the 2D image buffers, not these.

pub fn box_blur_1d(data: &[f32], radius: u32) -> Vec<f32> {
    let n = data.len();
    if n == 0 || radius == 0 {
        return data.to_vec();
    }
    let window = (2 * radius + 1) as f32;
    let mut out = vec![0f32; n];
    for i in 0..n {
        let mut sum = 0f32;
        for d in -(radius as i64)..=(radius as i64) {
            let idx = (i as i64 + d).clamp(0, n as i64 - 1) as usize;
            sum += data[idx];
        }
        out[i] = sum / window;
    }
    out
}

/// Value at the given percentile (`0..=1`) after ascending sort.
pub fn percentile(data: &[f32], p: f32) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = ((p * (sorted.len() as f32 - 1.0)).round() as usize).min(sorted.len() - 1);
    sorted[idx]
}
