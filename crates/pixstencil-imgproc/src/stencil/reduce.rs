use super::{Domain, WeightedMask};

/// The fold applied by [`reduce`] and [`convolve`].
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReduceOp {
    /// Sum of the cell contributions.
    #[default]
    Sum,
}

/// A value that neighborhood contributions can be summed into.
pub trait Accumulator: Copy {
    /// The additive identity.
    fn zero() -> Self;

    /// Combine two partial sums.
    fn accumulate(self, rhs: Self) -> Self;
}

/// An [`Accumulator`] that can be scaled by a mask weight.
pub trait WeightedAccumulator: Accumulator {
    /// Multiply every component by `weight`.
    fn scaled(self, weight: f32) -> Self;
}

impl Accumulator for f32 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn accumulate(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl WeightedAccumulator for f32 {
    #[inline]
    fn scaled(self, weight: f32) -> Self {
        weight * self
    }
}

impl Accumulator for u32 {
    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn accumulate(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl<A: Accumulator, const N: usize> Accumulator for [A; N] {
    #[inline]
    fn zero() -> Self {
        [A::zero(); N]
    }

    #[inline]
    fn accumulate(self, rhs: Self) -> Self {
        std::array::from_fn(|i| self[i].accumulate(rhs[i]))
    }
}

impl<A: WeightedAccumulator, const N: usize> WeightedAccumulator for [A; N] {
    #[inline]
    fn scaled(self, weight: f32) -> Self {
        self.map(|v| v.scaled(weight))
    }
}

/// Fold the contributions of the active cells of a domain.
///
/// Cells are visited in row-major order. `value_at` receives the offset
/// `(dx, dy)` of the cell from the center.
///
/// # Example
///
/// ```
/// use pixstencil_imgproc::stencil::{reduce, Domain, ReduceOp};
///
/// let domain = Domain::new(3, 3).unwrap();
/// let sum = reduce(&domain, ReduceOp::Sum, |dx, dy| (dx + 2 * dy) as f32);
/// assert_eq!(sum, 0.0);
/// ```
pub fn reduce<V, F>(domain: &Domain, op: ReduceOp, mut value_at: F) -> V
where
    V: Accumulator,
    F: FnMut(isize, isize) -> V,
{
    let r = domain.radius() as isize;
    match op {
        ReduceOp::Sum => {
            let mut acc = V::zero();
            for dy in -r..=r {
                for dx in -r..=r {
                    if domain.is_active(dx, dy) {
                        acc = acc.accumulate(value_at(dx, dy));
                    }
                }
            }
            acc
        }
    }
}

/// Fold the weighted contributions of every cell of a mask.
///
/// Returns the sum of `mask.weight(dx, dy) * value_at(dx, dy)`, visiting the
/// cells in row-major order.
pub fn convolve<V, F>(mask: &WeightedMask, op: ReduceOp, mut value_at: F) -> V
where
    V: WeightedAccumulator,
    F: FnMut(isize, isize) -> V,
{
    let r = mask.radius() as isize;
    match op {
        ReduceOp::Sum => {
            let mut acc = V::zero();
            for dy in -r..=r {
                for dx in -r..=r {
                    let w = mask.weight(dx, dy);
                    acc = acc.accumulate(value_at(dx, dy).scaled(w));
                }
            }
            acc
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixstencil_image::ImageError;

    #[test]
    fn test_reduce_counts_active_cells() -> Result<(), ImageError> {
        let domain = Domain::new(7, 7)?;
        let n: u32 = reduce(&domain, ReduceOp::Sum, |_, _| 1);
        assert_eq!(n, 49);

        #[rustfmt::skip]
        let cross = Domain::from_cells(3, 3, &[
            false, true, false,
            true,  true, true,
            false, true, false,
        ])?;
        let n: u32 = reduce(&cross, ReduceOp::Sum, |_, _| 1);
        assert_eq!(n, 5);
        Ok(())
    }

    #[test]
    fn test_reduce_visits_row_major() -> Result<(), ImageError> {
        let domain = Domain::new(3, 3)?;
        let mut visited = vec![];
        let _: u32 = reduce(&domain, ReduceOp::Sum, |dx, dy| {
            visited.push((dx, dy));
            0
        });
        assert_eq!(
            visited,
            vec![
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (0, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1)
            ]
        );
        Ok(())
    }

    #[test]
    fn test_reduce_vector_accumulator() -> Result<(), ImageError> {
        let domain = Domain::new(3, 3)?;
        let sum: [u32; 4] = reduce(&domain, ReduceOp::Sum, |dx, _| [1, 2, (dx + 1) as u32, 255]);
        assert_eq!(sum, [9, 18, 9, 2295]);
        Ok(())
    }

    #[test]
    fn test_convolve_weights() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let mask = WeightedMask::new(3, 3, &[
            0.0, 0.0, 0.0,
            -1.0, 0.0, 1.0,
            0.0, 0.0, 0.0,
        ])?;

        let g: f32 = convolve(&mask, ReduceOp::Sum, |dx, _| 10.0 * dx as f32);
        assert_eq!(g, 20.0);

        let v: [f32; 2] = convolve(&mask, ReduceOp::Sum, |dx, _| [dx as f32, 1.0]);
        assert_eq!(v, [2.0, 0.0]);
        Ok(())
    }
}
