//! Two-phase API, phase one (§9 design note): the image-dependent, preset-
//! dependent stages that don't vary across frames of the same still image
//! are computed once and reused across repeated `render` calls.

use crate::algorithms::foreground::estimate_foreground;
use crate::algorithms::grayscale::to_grayscale;
use crate::algorithms::illumination::normalize_illumination;
use crate::algorithms::light_transfer::build_light_transfer;
use crate::algorithms::sobel::sobel;
use crate::error::{StencilError, StencilResult};
use crate::preset::Preset;
use crate::raster::{FloatField, Sobel};

/// The cached output of stages 1-6: grayscale through light-transfer.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub width: u32,
    pub height: u32,
    pub norm: FloatField,
    pub sobel: Sobel,
    pub fg_mask: FloatField,
    pub locked_tone: FloatField,
    pub row_gain: Vec<f32>,
    pub fallback_segmentation: bool,
}

pub fn analyze(image: &image::RgbImage, preset: &Preset) -> StencilResult<Analysis> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(StencilError::UnsupportedDimensions { width, height });
    }

    log::debug!("analyze: {}x{} image, preset grain_scale={}", width, height, preset.grain_scale);

    let gray = to_grayscale(image);
    let norm = normalize_illumination(&gray);
    let grad = sobel(&norm);
    let fg = estimate_foreground(&norm, &grad, preset.center_bias);
    let light = build_light_transfer(&norm, &grad, &fg.mask);

    log::info!(
        "analyze complete: fallback_segmentation={} rows={}",
        fg.fallback,
        light.row_gain.len()
    );

    Ok(Analysis {
        width,
        height,
        norm,
        sobel: grad,
        fg_mask: fg.mask,
        locked_tone: light.locked_tone,
        row_gain: light.row_gain,
        fallback_segmentation: fg.fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{preset_for, PresetId};
    use image::{Rgb, RgbImage};

    #[test]
    fn zero_dimensions_are_rejected() {
        let img = RgbImage::new(0, 0);
        let preset = preset_for(PresetId::NeonContour);
        let result = analyze(&img, &preset);
        assert!(matches!(result, Err(StencilError::UnsupportedDimensions { .. })));
    }

    #[test]
    fn analyzes_a_small_image() {
        let img = RgbImage::from_pixel(16, 16, Rgb([120, 90, 60]));
        let preset = preset_for(PresetId::SilhouetteEtch);
        let analysis = analyze(&img, &preset).unwrap();
        assert_eq!(analysis.width, 16);
        assert_eq!(analysis.row_gain.len(), 16);
    }
}
