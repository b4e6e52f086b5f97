use pixstencil_image::ImageError;

use super::check_kernel_size;

/// A square window of per-cell weights centered on the output pixel.
///
/// Weights are addressed by offset `(dx, dy)` like a [`super::Domain`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedMask {
    side: usize,
    weights: Vec<f32>,
}

impl WeightedMask {
    /// Create a mask from row-major weights.
    ///
    /// # Arguments
    ///
    /// * `size_x` - The width of the mask.
    /// * `size_y` - The height of the mask.
    /// * `weights` - The `size_x * size_y` weights, row by row.
    ///
    /// # Errors
    ///
    /// If the size is not a square 3, 5 or 7 window, or the weights do not fill it.
    pub fn new(size_x: usize, size_y: usize, weights: &[f32]) -> Result<Self, ImageError> {
        let side = check_kernel_size(size_x, size_y)?;
        if weights.len() != side * side {
            return Err(ImageError::InvalidChannelShape(weights.len(), side * side));
        }
        Ok(Self {
            side,
            weights: weights.to_vec(),
        })
    }

    /// Create a mask from a square table of rows.
    ///
    /// # Example
    ///
    /// ```
    /// use pixstencil_imgproc::stencil::WeightedMask;
    ///
    /// let mask = WeightedMask::from_rows(&[
    ///     [0.0, 1.0, 0.0],
    ///     [1.0, -4.0, 1.0],
    ///     [0.0, 1.0, 0.0],
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(mask.weight(0, 0), -4.0);
    /// assert_eq!(mask.weight(1, 0), 1.0);
    /// ```
    pub fn from_rows<const N: usize>(rows: &[[f32; N]; N]) -> Result<Self, ImageError> {
        let weights = rows.iter().flatten().copied().collect::<Vec<_>>();
        Self::new(N, N, &weights)
    }

    /// The side length of the window.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// The window radius, `(side - 1) / 2`.
    #[inline]
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    /// The weight at offset `(dx, dy)`.
    ///
    /// PRECONDITION: both offsets lie in `[-radius, radius]`.
    #[inline]
    pub fn weight(&self, dx: isize, dy: isize) -> f32 {
        let r = self.radius() as isize;
        self.weights[((dy + r) as usize) * self.side + (dx + r) as usize]
    }

    /// The row-major weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// The mask mirrored along its main diagonal.
    pub fn transposed(&self) -> Self {
        let n = self.side;
        let weights = (0..n * n)
            .map(|i| self.weights[(i % n) * n + i / n])
            .collect();
        Self { side: n, weights }
    }

    /// Iterate `(dx, dy, weight)` over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (isize, isize, f32)> + '_ {
        let r = self.radius() as isize;
        self.weights.iter().enumerate().map(move |(i, &w)| {
            let dx = (i % self.side) as isize - r;
            let dy = (i / self.side) as isize - r;
            (dx, dy, w)
        })
    }
}
