//! Dithering (§4.9): ordered Bayer or Floyd–Steinberg error diffusion
//! against a scalar threshold.

use crate::preset::DitherMode;
use crate::raster::{BinaryRaster, FloatField};

/// The canonical 8x8 Bayer threshold matrix, values 0..63.
const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

pub fn dither(map: &FloatField, threshold: f32, mode: DitherMode) -> BinaryRaster {
    match mode {
        DitherMode::Bayer => dither_bayer(map, threshold),
        DitherMode::Floyd => dither_floyd_steinberg(map, threshold),
    }
}

pub fn dither_bayer(map: &FloatField, threshold: f32) -> BinaryRaster {
    let width = map.width;
    let height = map.height;
    let mut out = BinaryRaster::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let idx = (y as usize) * (width as usize) + (x as usize);
            let b = BAYER8[(y % 8) as usize][(x % 8) as usize] as f32;
            let bias = (b / 64.0 - 0.5) * 0.18;
            out.data[idx] = if map.data[idx] > threshold + bias { 1 } else { 0 };
        }
    }
    out
}

pub fn dither_floyd_steinberg(map: &FloatField, threshold: f32) -> BinaryRaster {
    let width = map.width as i64;
    let height = map.height as i64;
    let mut w = map.data.clone();
    let mut out = BinaryRaster::new(map.width, map.height);

    let idx = |x: i64, y: i64, width: i64| -> usize { (y as usize) * (width as usize) + (x as usize) };

    for y in 0..height {
        for x in 0..width {
            let i = idx(x, y, width);
            let value = w[i];
            let bit = if value >= threshold { 1u8 } else { 0u8 };
            out.data[i] = bit;
            let err = value - bit as f32;

            if x + 1 < width {
                w[idx(x + 1, y, width)] += err * (7.0 / 16.0);
            }
            if y + 1 < height {
                if x - 1 >= 0 {
                    w[idx(x - 1, y + 1, width)] += err * (3.0 / 16.0);
                }
                w[idx(x, y + 1, width)] += err * (5.0 / 16.0);
                if x + 1 < width {
                    w[idx(x + 1, y + 1, width)] += err * (1.0 / 16.0);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bayer_matrix_covers_full_range() {
        let mut seen = [false; 64];
        for row in BAYER8 {
            for v in row {
                seen[v as usize] = true;
            }
        }
        assert!(seen.iter().all(|&b| b));
    }

    #[test]
    fn floyd_steinberg_is_strictly_binary() {
        let data: Vec<f32> = (0..64).map(|i| (i % 5) as f32 / 4.0).collect();
        let map = FloatField::from_data(8, 8, data);
        let out = dither_floyd_steinberg(&map, 0.5);
        assert!(out.data.iter().all(|&b| b == 0 || b == 1));
    }

    #[test]
    fn bayer_is_strictly_binary() {
        let data: Vec<f32> = (0..64).map(|i| (i % 5) as f32 / 4.0).collect();
        let map = FloatField::from_data(8, 8, data);
        let out = dither_bayer(&map, 0.5);
        assert!(out.data.iter().all(|&b| b == 0 || b == 1));
    }

    #[test]
    fn all_zero_map_stays_black() {
        let map = FloatField::new(8, 8, 0.0);
        let out = dither_floyd_steinberg(&map, 0.5);
        assert!(out.data.iter().all(|&b| b == 0));
    }
}
