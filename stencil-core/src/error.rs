//! Error types for the stencil engine.
//!
//! The core only raises on boundary failures it cannot absorb internally
//! (bad dimensions, a failed decode/encode). Everything else — an unknown
//! preset id, a starved coverage pass, a degenerate foreground mask — is
//! resolved in-library and reported through [`crate::Metrics`] instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StencilError {
    #[error("unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image encode failed: {message}")]
    Encode { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StencilError {
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode { message: message.into() }
    }
}

pub type StencilResult<T> = Result<T, StencilError>;
