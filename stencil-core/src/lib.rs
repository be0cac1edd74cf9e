//! # stencil-core
//!
//! Deterministic, single-node raster engine that turns an RGB photo into a
//! strict two-tone stencil against one of five named presets. Platform-
//! agnostic: this crate never touches the filesystem or a display surface,
//! only `image::RgbImage` buffers in and a [`raster::BinaryRaster`] +
//! [`metrics::Metrics`] pair out.
//!
//! The public surface is the two-phase design from the data model: call
//! [`analyze`] once per still image, then [`render`] once per frame (a
//! plain still-image conversion only needs one `render` call with the
//! default [`FrameModulation`]). [`transform`] composes both for the
//! common case.

pub mod algorithms;
pub mod analysis;
pub mod error;
pub mod metrics;
pub mod modulation;
pub mod preset;
pub mod raster;
pub mod render;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use analysis::{analyze, Analysis};
pub use error::{StencilError, StencilResult};
pub use metrics::Metrics;
pub use modulation::FrameModulation;
pub use preset::{preset_for, DitherMode, Preset, PresetId};
pub use raster::BinaryRaster;
pub use render::{render, transform};

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn transform_round_trips_a_small_gradient_image() {
        let mut img = RgbImage::new(48, 48);
        for y in 0..48u32 {
            for x in 0..48u32 {
                let v = ((x + y) * 255 / 96) as u8;
                img.put_pixel(x, y, Rgb([v, v, v]));
            }
        }
        let preset = preset_for(PresetId::SilhouetteEtch);
        let (binary, metrics) = transform(&img, &preset, &FrameModulation::default()).unwrap();

        assert_eq!(binary.width, 48);
        assert_eq!(binary.height, 48);
        assert!(binary.to_bytes().iter().all(|&v| v == 0 || v == 255));
        assert_eq!(metrics.tuned_iterations, 8);
    }

    #[test]
    fn zero_dimension_image_is_rejected() {
        let img = RgbImage::new(0, 0);
        let preset = preset_for(PresetId::NeonContour);
        let result = transform(&img, &preset, &FrameModulation::default());
        assert!(matches!(result, Err(StencilError::UnsupportedDimensions { .. })));
    }

    #[test]
    fn unknown_preset_string_falls_back_to_neon_contour() {
        let id: PresetId = "not-a-real-preset".parse().unwrap();
        assert_eq!(id, PresetId::NeonContour);
    }
}
