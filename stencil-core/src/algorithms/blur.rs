//! Separable box blur (§4.1): rolling-sum moving average, O(w·h) in the
//! radius, with edge-clamped boundary reads. Deviating from the rolling-sum
//! contract near boundaries shifts percentile statistics downstream and
//! breaks reproducibility, so every index clamps to the nearest valid
//! column/row rather than wrapping or zero-padding.

use crate::raster::FloatField;

/// Blur `field` with box radius `r` (window size `2r+1`). `r == 0` is identity.
pub fn box_blur(field: &FloatField, r: u32) -> FloatField {
    if r == 0 {
        return field.clone();
    }
    let width = field.width;
    let height = field.height;
    let mut temp = vec![0f32; field.data.len()];
    horizontal_pass(&field.data, &mut temp, width, height, r);
    let mut out = vec![0f32; field.data.len()];
    vertical_pass(&temp, &mut out, width, height, r);
    FloatField::from_data(width, height, out)
}

fn clamp_index(i: i64, len: u32) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

fn horizontal_pass(src: &[f32], dst: &mut [f32], width: u32, height: u32, r: u32) {
    let window = (2 * r + 1) as f32;
    for y in 0..height {
        let row = (y as usize) * (width as usize);
        let mut sum = 0f32;
        for dx in -(r as i64)..=(r as i64) {
            sum += src[row + clamp_index(dx, width)];
        }
        dst[row] = sum / window;
        for x in 1..width as i64 {
            let enter = clamp_index(x + r as i64, width);
            let leave = clamp_index(x - 1 - r as i64, width);
            sum += src[row + enter] - src[row + leave];
            dst[row + x as usize] = sum / window;
        }
    }
}

fn vertical_pass(src: &[f32], dst: &mut [f32], width: u32, height: u32, r: u32) {
    let window = (2 * r + 1) as f32;
    for x in 0..width {
        let xu = x as usize;
        let mut sum = 0f32;
        for dy in -(r as i64)..=(r as i64) {
            sum += src[clamp_index(dy, height) * (width as usize) + xu];
        }
        dst[xu] = sum / window;
        for y in 1..height as i64 {
            let enter = clamp_index(y + r as i64, height);
            let leave = clamp_index(y - 1 - r as i64, height);
            sum += src[enter * (width as usize) + xu] - src[leave * (width as usize) + xu];
            dst[(y as usize) * (width as usize) + xu] = sum / window;
        }
    }
}
