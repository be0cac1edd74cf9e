//! Row rebalancer (§4.8): equalizes ink-map row means against the rows
//! where the foreground mask is actually active, so a few bright/dark rows
//! don't dominate.

use crate::algorithms::rowstats::{box_blur_1d, percentile};
use crate::raster::FloatField;

pub fn rebalance_rows(ink: &FloatField, fg_mask: &FloatField) -> FloatField {
    let width = ink.width;
    let height = ink.height;
    if width == 0 || height == 0 {
        return ink.clone();
    }

    let active_pixel_floor = 0.08 * width as f32;
    let mut row_mean = vec![0f32; height as usize];
    let mut row_active = vec![false; height as usize];
    let mut active_rows: Vec<f32> = Vec::new();

    for y in 0..height {
        let mut sum = 0f32;
        let mut count = 0f32;
        let mut active_count = 0u32;
        for x in 0..width {
            let idx = (y as usize) * (width as usize) + (x as usize);
            if fg_mask.data[idx] >= 0.15 {
                sum += ink.data[idx];
                count += 1.0;
                active_count += 1;
            }
        }
        let mean = if count > 0.0 { sum / count } else { 0.0 };
        row_mean[y as usize] = mean;
        let active = (active_count as f32) > active_pixel_floor;
        row_active[y as usize] = active;
        if active {
            active_rows.push(mean);
        }
    }

    let min_active = (8u32).max((0.1 * height as f32).round() as u32);
    if (active_rows.len() as u32) < min_active {
        return ink.clone();
    }

    let target = percentile(&active_rows, 0.60);
    let eps = 1e-6;

    let raw_gain: Vec<f32> = (0..height as usize)
        .map(|y| if row_active[y] { target / row_mean[y].max(eps) } else { 1.0 })
        .collect();

    let squashed: Vec<f32> =
        raw_gain.iter().map(|&raw| 0.4 + 2.6 * ((raw - 0.4) / 2.6).clamp(0.0, 1.0)).collect();
    let smoothed = box_blur_1d(&squashed, 10);

    let mut data = ink.data.clone();
    for y in 0..height {
        let g = smoothed[y as usize];
        for x in 0..width {
            let idx = (y as usize) * (width as usize) + (x as usize);
            data[idx] = (data[idx] * g).clamp(0.0, 1.0);
        }
    }

    FloatField::from_data(width, height, data)
}
