use pixstencil_image::ImageError;

use crate::stencil::{check_kernel_size, WeightedMask};

/// Normalized 3x3 gaussian coefficients.
#[rustfmt::skip]
pub const GAUSSIAN_3X3: [[f32; 3]; 3] = [
    [0.057118, 0.124758, 0.057118],
    [0.124758, 0.272496, 0.124758],
    [0.057118, 0.124758, 0.057118],
];

/// Normalized 5x5 gaussian coefficients.
#[rustfmt::skip]
pub const GAUSSIAN_5X5: [[f32; 5]; 5] = [
    [0.005008, 0.017300, 0.026151, 0.017300, 0.005008],
    [0.017300, 0.059761, 0.090339, 0.059761, 0.017300],
    [0.026151, 0.090339, 0.136565, 0.090339, 0.026151],
    [0.017300, 0.059761, 0.090339, 0.059761, 0.017300],
    [0.005008, 0.017300, 0.026151, 0.017300, 0.005008],
];

/// Normalized 7x7 gaussian coefficients.
#[rustfmt::skip]
pub const GAUSSIAN_7X7: [[f32; 7]; 7] = [
    [0.000841, 0.003010, 0.006471, 0.008351, 0.006471, 0.003010, 0.000841],
    [0.003010, 0.010778, 0.023169, 0.029902, 0.023169, 0.010778, 0.003010],
    [0.006471, 0.023169, 0.049806, 0.064280, 0.049806, 0.023169, 0.006471],
    [0.008351, 0.029902, 0.064280, 0.082959, 0.064280, 0.029902, 0.008351],
    [0.006471, 0.023169, 0.049806, 0.064280, 0.049806, 0.023169, 0.006471],
    [0.003010, 0.010778, 0.023169, 0.029902, 0.023169, 0.010778, 0.003010],
    [0.000841, 0.003010, 0.006471, 0.008351, 0.006471, 0.003010, 0.000841],
];

const SIXTH: f32 = 0.166666667;

/// Horizontal gradient mask used by the harris detector.
#[rustfmt::skip]
pub const HARRIS_DERIV_X: [[f32; 3]; 3] = [
    [-SIXTH, 0.0, SIXTH],
    [-SIXTH, 0.0, SIXTH],
    [-SIXTH, 0.0, SIXTH],
];

/// Vertical gradient mask used by the harris detector, the transpose of [`HARRIS_DERIV_X`].
#[rustfmt::skip]
pub const HARRIS_DERIV_Y: [[f32; 3]; 3] = [
    [-SIXTH, -SIXTH, -SIXTH],
    [0.0, 0.0, 0.0],
    [SIXTH, SIXTH, SIXTH],
];

/// 4-connectivity laplacian.
#[rustfmt::skip]
pub const LAPLACE_3X3: [[f32; 3]; 3] = [
    [0.0, 1.0, 0.0],
    [1.0, -4.0, 1.0],
    [0.0, 1.0, 0.0],
];

/// 5x5 laplacian, every neighbor weighted one.
#[rustfmt::skip]
pub const LAPLACE_5X5: [[f32; 5]; 5] = [
    [1.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, -24.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0, 1.0],
];

/// Get the fixed gaussian mask for a kernel size.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
///
/// # Errors
///
/// If the kernel is not a square 3, 5 or 7 window.
pub fn gaussian_mask(kernel_size: (usize, usize)) -> Result<WeightedMask, ImageError> {
    match check_kernel_size(kernel_size.0, kernel_size.1)? {
        3 => WeightedMask::from_rows(&GAUSSIAN_3X3),
        5 => WeightedMask::from_rows(&GAUSSIAN_5X5),
        _ => WeightedMask::from_rows(&GAUSSIAN_7X7),
    }
}

/// Get the horizontal and vertical harris gradient masks.
pub fn harris_derivative_masks() -> Result<(WeightedMask, WeightedMask), ImageError> {
    Ok((
        WeightedMask::from_rows(&HARRIS_DERIV_X)?,
        WeightedMask::from_rows(&HARRIS_DERIV_Y)?,
    ))
}

/// Create a sobel kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// The derivative and smoothing taps.
///
/// # Errors
///
/// If no sobel kernel exists for the size.
pub fn sobel_kernel_1d(kernel_size: usize) -> Result<(Vec<f32>, Vec<f32>), ImageError> {
    let (deriv, smooth) = match kernel_size {
        3 => (vec![-1.0, 0.0, 1.0], vec![1.0, 2.0, 1.0]),
        5 => (
            vec![-1.0, -2.0, 0.0, 2.0, 1.0],
            vec![1.0, 4.0, 6.0, 4.0, 1.0],
        ),
        _ => {
            return Err(ImageError::InvalidKernelConfiguration(
                kernel_size,
                kernel_size,
            ))
        }
    };
    Ok((deriv, smooth))
}

/// Get the 2D sobel masks `(gx, gy)` for a kernel size of 3 or 5.
///
/// The horizontal mask is the outer product of the smoothing taps (rows) and
/// the derivative taps (columns); the vertical mask is its transpose.
pub fn sobel_masks(kernel_size: (usize, usize)) -> Result<(WeightedMask, WeightedMask), ImageError> {
    let side = check_kernel_size(kernel_size.0, kernel_size.1)?;
    let (deriv, smooth) = sobel_kernel_1d(side)?;

    let weights = smooth
        .iter()
        .flat_map(|s| deriv.iter().map(move |d| s * d))
        .collect::<Vec<_>>();

    let gx = WeightedMask::new(side, side, &weights)?;
    let gy = gx.transposed();
    Ok((gx, gy))
}

/// Get the laplace mask for a kernel size of 3 or 5.
pub fn laplace_mask(kernel_size: (usize, usize)) -> Result<WeightedMask, ImageError> {
    match check_kernel_size(kernel_size.0, kernel_size.1)? {
        3 => WeightedMask::from_rows(&LAPLACE_3X3),
        5 => WeightedMask::from_rows(&LAPLACE_5X5),
        _ => Err(ImageError::InvalidKernelConfiguration(
            kernel_size.0,
            kernel_size.1,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gaussian_tables_are_normalized() -> Result<(), ImageError> {
        for size in [3, 5, 7] {
            let mask = gaussian_mask((size, size))?;
            assert_eq!(mask.side(), size);
            assert_abs_diff_eq!(mask.sum(), 1.0, epsilon = 1e-4);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_tables_are_symmetric() -> Result<(), ImageError> {
        for size in [3, 5, 7] {
            let mask = gaussian_mask((size, size))?;
            assert_eq!(mask, mask.transposed());
        }
        assert_eq!(gaussian_mask((3, 3))?.weight(0, 0), 0.272496);
        Ok(())
    }

    #[test]
    fn test_gaussian_mask_rejects() {
        for (x, y) in [(1, 1), (9, 9), (3, 5), (4, 4)] {
            assert_eq!(
                gaussian_mask((x, y)),
                Err(ImageError::InvalidKernelConfiguration(x, y))
            );
        }
    }

    #[test]
    fn test_harris_derivative_masks() -> Result<(), ImageError> {
        let (mx, my) = harris_derivative_masks()?;
        assert_eq!(mx.transposed(), my);
        assert_eq!(mx.weight(1, 0), 0.166666667);
        assert_eq!(mx.weight(-1, 1), -0.166666667);
        assert_eq!(mx.weight(0, -1), 0.0);
        assert_abs_diff_eq!(mx.sum(), 0.0);
        Ok(())
    }

    #[test]
    fn test_sobel_kernel_1d() -> Result<(), ImageError> {
        let kernel = sobel_kernel_1d(3)?;
        assert_eq!(kernel.0, vec![-1.0, 0.0, 1.0]);
        assert_eq!(kernel.1, vec![1.0, 2.0, 1.0]);

        let kernel = sobel_kernel_1d(5)?;
        assert_eq!(kernel.0, vec![-1.0, -2.0, 0.0, 2.0, 1.0]);
        assert_eq!(kernel.1, vec![1.0, 4.0, 6.0, 4.0, 1.0]);

        assert!(sobel_kernel_1d(7).is_err());
        Ok(())
    }

    #[test]
    fn test_sobel_masks() -> Result<(), ImageError> {
        let (gx, gy) = sobel_masks((3, 3))?;

        #[rustfmt::skip]
        assert_eq!(gx.weights(), &[
            -1.0, 0.0, 1.0,
            -2.0, 0.0, 2.0,
            -1.0, 0.0, 1.0,
        ]);
        #[rustfmt::skip]
        assert_eq!(gy.weights(), &[
            -1.0, -2.0, -1.0,
            0.0, 0.0, 0.0,
            1.0, 2.0, 1.0,
        ]);

        assert_eq!(sobel_masks((5, 5))?.0.weight(2, 0), 6.0);
        assert_eq!(
            sobel_masks((7, 7)),
            Err(ImageError::InvalidKernelConfiguration(7, 7))
        );
        Ok(())
    }

    #[test]
    fn test_laplace_mask() -> Result<(), ImageError> {
        assert_eq!(laplace_mask((3, 3))?.sum(), 0.0);
        assert_eq!(laplace_mask((5, 5))?.sum(), 0.0);
        assert_eq!(
            laplace_mask((7, 7)),
            Err(ImageError::InvalidKernelConfiguration(7, 7))
        );
        Ok(())
    }
}
