//! Grayscale conversion (§4.0, stage 1): Rec. 601 luma.

use crate::raster::FloatField;
use image::RgbImage;

pub fn to_grayscale(image: &RgbImage) -> FloatField {
    let (width, height) = image.dimensions();
    let mut data = Vec::with_capacity((width as usize) * (height as usize));
    for p in image.pixels() {
        let r = p[0] as f32 / 255.0;
        let g = p[1] as f32 / 255.0;
        let b = p[2] as f32 / 255.0;
        data.push(0.299 * r + 0.587 * g + 0.114 * b);
    }
    FloatField::from_data(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn solid_white_is_one() {
        let img = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        let gray = to_grayscale(&img);
        assert!(gray.data.iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn solid_black_is_zero() {
        let img = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let gray = to_grayscale(&img);
        assert!(gray.data.iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn weights_match_rec601() {
        let img = RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]));
        let gray = to_grayscale(&img);
        assert!((gray.get(0, 0) - 0.299).abs() < 1e-5);
    }
}
