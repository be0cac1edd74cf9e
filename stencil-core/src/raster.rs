//! Shared raster buffer types (§3 data model).
//!
//! All buffers are row-major, stride == width, origin top-left. `FloatField`
//! backs every f32 buffer that flows between pipeline stages — it is used
//! directly as `Gray`, `Norm`, `Mask`, `LockedTone`, and `InkMap` from the
//! data model table, since they share the same representation and only
//! differ in the range convention the producing stage guarantees. `Sobel`
//! groups the three gradient buffers, and `BinaryRaster` is the final 0/1
//! (internally) / 0-or-255 (on emission) output.

/// A single f32 value per pixel. Used for `Gray`, `Norm`, `Mask`,
/// `LockedTone`, and `InkMap`.
#[derive(Debug, Clone)]
pub struct FloatField {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl FloatField {
    pub fn new(width: u32, height: u32, fill: f32) -> Self {
        Self { width, height, data: vec![fill; (width as usize) * (height as usize)] }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        Self { width, height, data }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: f32) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = v;
    }
}

/// Gradient buffers produced by the Sobel operator (§4.4).
#[derive(Debug, Clone)]
pub struct Sobel {
    pub width: u32,
    pub height: u32,
    pub gx: Vec<f32>,
    pub gy: Vec<f32>,
    pub mag: Vec<f32>,
}

/// The committed two-tone output. Stored internally as `{0, 1}`; emitted as
/// `{0, 255}` bytes per the output contract.
#[derive(Debug, Clone)]
pub struct BinaryRaster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl BinaryRaster {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, data: vec![0u8; (width as usize) * (height as usize)] }
    }

    /// Expand the internal `{0,1}` representation to `{0,255}` output bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().map(|&b| if b != 0 { 255 } else { 0 }).collect()
    }

    pub fn white_ratio(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let white = self.data.iter().filter(|&&b| b != 0).count();
        white as f32 / self.data.len() as f32
    }
}
