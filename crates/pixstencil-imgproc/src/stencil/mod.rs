//! Windowed stencil evaluation.
//!
//! A stencil pass computes every output pixel from a fixed-shape neighborhood
//! of one or more input images. The building blocks are:
//!
//! - [`Domain`]: which cells of a centered square window take part in a reduction.
//! - [`WeightedMask`]: the same window geometry with a weight per cell.
//! - [`BoundaryAccessor`]: neighborhood reads that never leave the source image.
//! - [`reduce`] and [`convolve`]: the two neighborhood folds.
//! - [`StencilEngine`]: evaluates a per-pixel function over an output image.
//!
//! # Example
//!
//! ```
//! use pixstencil_image::Image;
//! use pixstencil_imgproc::stencil::{reduce, BoundaryAccessor, Domain, ReduceOp, StencilEngine};
//!
//! let src = Image::<f32, 1>::from_size_val([4, 4].into(), 1.0).unwrap();
//! let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
//!
//! let domain = Domain::new(3, 3).unwrap();
//! let input = BoundaryAccessor::clamped(&src, domain.radius());
//!
//! StencilEngine::serial().run(&mut dst, |x, y| {
//!     [reduce(&domain, ReduceOp::Sum, |dx, dy| input.read(x, y, dx, dy)[0])]
//! });
//!
//! assert_eq!(dst.as_slice(), &[9.0; 16]);
//! ```

mod boundary;
mod domain;
mod engine;
mod mask;
mod reduce;

pub use boundary::{BoundaryAccessor, BoundaryMode};
pub use domain::{check_kernel_size, Domain, SUPPORTED_KERNEL_SIZES};
pub use engine::StencilEngine;
pub use mask::WeightedMask;
pub use reduce::{convolve, reduce, Accumulator, ReduceOp, WeightedAccumulator};
