#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// utilities to draw on images.
pub mod draw;

/// feature detection module.
pub mod features;

/// image filtering module.
pub mod filter;

/// module containing parallization utilities.
pub mod parallel;

/// status codes for the filter entry points.
pub mod status;

/// windowed stencil evaluation core.
pub mod stencil;
