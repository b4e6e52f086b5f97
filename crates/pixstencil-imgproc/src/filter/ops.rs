use pixstencil_image::{Image, ImageError, PixelValue};

use super::{ensure_same_size, kernels};
use crate::stencil::{convolve, reduce, BoundaryAccessor, Domain, ReduceOp, StencilEngine};

/// Blur an image using a box blur filter
///
/// Every output pixel is the mean of the `kernel_x * kernel_y` window around it,
/// accumulated in `u32` and narrowed back by truncation.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
///
/// # Errors
///
/// [`ImageError::InvalidKernelConfiguration`] if the kernel is not a square 3, 5 or 7
/// window, checked before any pixel is read or written.
///
/// # Example
///
/// ```
/// use pixstencil_image::Image;
/// use pixstencil_imgproc::filter::box_blur;
///
/// let src = Image::<u8, 4>::from_size_val([5, 5].into(), 128).unwrap();
/// let mut dst = Image::<u8, 4>::from_size_val(src.size(), 0).unwrap();
///
/// box_blur(&src, &mut dst, (3, 3)).unwrap();
/// assert_eq!(dst, src);
/// ```
pub fn box_blur<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: (usize, usize),
) -> Result<(), ImageError> {
    let domain = Domain::new(kernel_size.0, kernel_size.1)?;
    ensure_same_size(src, dst)?;

    log::debug!("box blur {}x{} over {}", kernel_size.0, kernel_size.1, src.size());

    let input = BoundaryAccessor::clamped(src, domain.radius());
    let norm = (kernel_size.0 * kernel_size.1) as f32;

    StencilEngine::default().run(dst, |x, y| {
        let sum: [u32; C] = reduce(&domain, ReduceOp::Sum, |dx, dy| {
            input.read(x, y, dx, dy).map(u32::from)
        });
        sum.map(|s| u8::from_f32_truncate(s as f32 / norm))
    });

    Ok(())
}

/// Blur an image using the fixed gaussian coefficient tables
///
/// The weighted sum is narrowed with `sum + 0.5` followed by truncation.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y), one of 3x3, 5x5 or 7x7.
///
/// # Errors
///
/// [`ImageError::InvalidKernelConfiguration`] for any other kernel size, before any
/// pixel is read or written.
pub fn gaussian_blur<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: (usize, usize),
) -> Result<(), ImageError> {
    let mask = kernels::gaussian_mask(kernel_size)?;
    ensure_same_size(src, dst)?;

    log::debug!(
        "gaussian blur {}x{} over {}",
        kernel_size.0,
        kernel_size.1,
        src.size()
    );

    let input = BoundaryAccessor::clamped(src, mask.radius());

    StencilEngine::default().run(dst, |x, y| {
        let sum: [f32; C] = convolve(&mask, ReduceOp::Sum, |dx, dy| {
            input.read(x, y, dx, dy).map(f32::from)
        });
        sum.map(u8::from_f32_round_half_up)
    });

    Ok(())
}

/// Compute the sobel edge magnitude of an RGBA image
///
/// Each color channel gets `|Gx| + |Gy|` saturated to 255, alpha is copied from
/// the source pixel.
///
/// # Arguments
///
/// * `src` - The source RGBA image.
/// * `dst` - The destination RGBA image.
/// * `kernel_size` - The size of the kernel, 3x3 or 5x5.
pub fn sobel(
    src: &Image<u8, 4>,
    dst: &mut Image<u8, 4>,
    kernel_size: (usize, usize),
) -> Result<(), ImageError> {
    let (mask_x, mask_y) = kernels::sobel_masks(kernel_size)?;
    ensure_same_size(src, dst)?;

    log::debug!("sobel {}x{} over {}", kernel_size.0, kernel_size.1, src.size());

    let input = BoundaryAccessor::clamped(src, mask_x.radius());
    let value_at =
        |x: usize, y: usize| move |dx: isize, dy: isize| input.read(x, y, dx, dy).map(f32::from);

    StencilEngine::default().run(dst, |x, y| {
        let gx: [f32; 4] = convolve(&mask_x, ReduceOp::Sum, value_at(x, y));
        let gy: [f32; 4] = convolve(&mask_y, ReduceOp::Sum, value_at(x, y));
        let alpha = src.pixel(x, y)[3];
        std::array::from_fn(|c| match c {
            3 => alpha,
            _ => u8::from_f32_truncate(gx[c].abs() + gy[c].abs()),
        })
    });

    Ok(())
}

/// Compute the laplacian magnitude of an RGBA image
///
/// Each color channel gets `|sum|` saturated to 255, alpha is copied from the
/// source pixel.
///
/// # Arguments
///
/// * `src` - The source RGBA image.
/// * `dst` - The destination RGBA image.
/// * `kernel_size` - The size of the kernel, 3x3 or 5x5.
pub fn laplace(
    src: &Image<u8, 4>,
    dst: &mut Image<u8, 4>,
    kernel_size: (usize, usize),
) -> Result<(), ImageError> {
    let mask = kernels::laplace_mask(kernel_size)?;
    ensure_same_size(src, dst)?;

    log::debug!("laplace {}x{} over {}", kernel_size.0, kernel_size.1, src.size());

    let input = BoundaryAccessor::clamped(src, mask.radius());

    StencilEngine::default().run(dst, |x, y| {
        let sum: [f32; 4] = convolve(&mask, ReduceOp::Sum, |dx, dy| {
            input.read(x, y, dx, dy).map(f32::from)
        });
        let alpha = src.pixel(x, y)[3];
        std::array::from_fn(|c| match c {
            3 => alpha,
            _ => u8::from_f32_truncate(sum[c].abs()),
        })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixstencil_image::ImageSize;

    fn rgba(size: ImageSize, px: [u8; 4]) -> Result<Image<u8, 4>, ImageError> {
        let data = px.repeat(size.width * size.height);
        Image::new(size, data)
    }

    #[test]
    fn test_box_blur_constant() -> Result<(), ImageError> {
        let src = rgba([5, 5].into(), [128, 128, 128, 255])?;

        for size in [3, 5, 7] {
            let mut dst = Image::from_size_val(src.size(), 0)?;
            box_blur(&src, &mut dst, (size, size))?;
            assert_eq!(dst, src, "kernel {size}");
        }
        Ok(())
    }

    #[test]
    fn test_box_blur_truncates() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new([3, 3].into(), (0..9).collect())?;
        let mut dst = Image::from_size_val(src.size(), 0)?;

        box_blur(&src, &mut dst, (3, 3))?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                1, 2, 2,
                3, 4, 4,
                5, 6, 6,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_box_blur_rejects_kernel() -> Result<(), ImageError> {
        let src = rgba([4, 4].into(), [10, 20, 30, 255])?;

        for (x, y) in [(1, 1), (4, 4), (9, 9), (3, 5)] {
            let mut dst = rgba(src.size(), [7, 7, 7, 7])?;
            assert_eq!(
                box_blur(&src, &mut dst, (x, y)),
                Err(ImageError::InvalidKernelConfiguration(x, y))
            );
            assert_eq!(dst, rgba(src.size(), [7, 7, 7, 7])?);
        }
        Ok(())
    }

    #[test]
    fn test_box_blur_size_mismatch() -> Result<(), ImageError> {
        let src = rgba([4, 4].into(), [0; 4])?;
        let mut dst = rgba([4, 3].into(), [0; 4])?;
        assert_eq!(
            box_blur(&src, &mut dst, (3, 3)),
            Err(ImageError::InvalidImageSize(4, 4, 4, 3))
        );
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_constant() -> Result<(), ImageError> {
        let src = rgba([6, 5].into(), [128, 64, 255, 255])?;

        for size in [3, 5, 7] {
            let mut dst = Image::from_size_val(src.size(), 0)?;
            gaussian_blur(&src, &mut dst, (size, size))?;
            assert_eq!(dst, src, "kernel {size}");
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_impulse() -> Result<(), ImageError> {
        let mut src = Image::<u8, 1>::from_size_val([5, 5].into(), 0)?;
        src.set_pixel(2, 2, 0, 100)?;
        let mut dst = Image::from_size_val(src.size(), 0)?;

        gaussian_blur(&src, &mut dst, (3, 3))?;

        // 5.7118 rounds half up to 6, 12.4758 to 12 and 27.2496 to 27
        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                0, 0,  0,  0, 0,
                0, 6,  12, 6, 0,
                0, 12, 27, 12, 0,
                0, 6,  12, 6, 0,
                0, 0,  0,  0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_rejects_kernel() -> Result<(), ImageError> {
        let src = rgba([4, 4].into(), [10, 20, 30, 255])?;

        for (x, y) in [(2, 2), (9, 9), (5, 3), (7, 5)] {
            let mut dst = rgba(src.size(), [1, 2, 3, 4])?;
            assert_eq!(
                gaussian_blur(&src, &mut dst, (x, y)),
                Err(ImageError::InvalidKernelConfiguration(x, y))
            );
            assert_eq!(dst, rgba(src.size(), [1, 2, 3, 4])?);
        }
        Ok(())
    }

    #[test]
    fn test_sobel_vertical_edge() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let row = [
            0, 0, 0, 200,  0, 0, 0, 200,  10, 10, 10, 200,  10, 10, 10, 200,
        ];
        let src = Image::<u8, 4>::new([4, 3].into(), row.repeat(3))?;
        let mut dst = Image::from_size_val(src.size(), 0)?;

        sobel(&src, &mut dst, (3, 3))?;

        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 200,  40, 40, 40, 200,  40, 40, 40, 200,  0, 0, 0, 200,
        ];
        assert_eq!(dst.as_slice(), expected.repeat(3).as_slice());

        assert_eq!(
            sobel(&src, &mut dst, (7, 7)),
            Err(ImageError::InvalidKernelConfiguration(7, 7))
        );
        Ok(())
    }

    #[test]
    fn test_laplace_impulse() -> Result<(), ImageError> {
        let mut src = rgba([3, 3].into(), [0, 0, 0, 255])?;
        src.pixel_mut(1, 1).copy_from_slice(&[10, 10, 10, 255]);
        let mut dst = Image::from_size_val(src.size(), 0)?;

        laplace(&src, &mut dst, (3, 3))?;

        let red = (0..9).map(|i| dst.as_slice()[i * 4]).collect::<Vec<_>>();
        assert_eq!(red, vec![0, 10, 0, 10, 40, 10, 0, 10, 0]);
        assert!(dst.as_slice().chunks_exact(4).all(|p| p[3] == 255));
        Ok(())
    }
}
