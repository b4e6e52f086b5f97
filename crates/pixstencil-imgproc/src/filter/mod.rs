//! Filter operations
//!
//! This module provides the dense stencil filters: box blur, gaussian blur,
//! sobel and laplace. All of them clamp reads at the image border.

use pixstencil_image::{Image, ImageError};

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;

/// Fail with [`ImageError::InvalidImageSize`] unless both images have the same size.
pub(crate) fn ensure_same_size<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &Image<T2, C2>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}
