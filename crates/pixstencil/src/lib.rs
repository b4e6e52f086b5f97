//! Windowed stencil evaluation and dense image filters.
//!
//! Re-exports the [`image`] container crate and the [`imgproc`] filters built on
//! the stencil core.

#[doc(inline)]
pub use pixstencil_image as image;

#[doc(inline)]
pub use pixstencil_imgproc as imgproc;
