#![deny(missing_docs)]
//! Image types for dense stencil filters.

/// image representation for stencil purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize, PixelValue};
