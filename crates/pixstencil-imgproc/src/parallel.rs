use rayon::prelude::*;
use thiserror::Error;

use pixstencil_image::Image;

/// Errors that can occur when configuring parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how a stencil pass is executed.
///
/// Every strategy produces the same output: a pass never depends on the order
/// in which output pixels are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread, row-major.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a dedicated thread pool with `n` threads.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Build the dedicated thread pool required by the strategy, if any.
    pub(crate) fn build_pool(&self) -> Result<Option<rayon::ThreadPool>, ParallelError> {
        match *self {
            ExecutionStrategy::Fixed(0) => Err(ParallelError::InvalidThreadCount(0)),
            ExecutionStrategy::Fixed(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map(Some)
                .map_err(|e| ParallelError::BuildError(e.to_string())),
            ExecutionStrategy::ParallelRows | ExecutionStrategy::Serial => Ok(None),
        }
    }
}

/// Apply a function to each pixel in the image in parallel.
///
/// Rows of `src` and `dst` are paired, then every source pixel is handed to
/// `f` together with the destination pixel at the same position.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    if src.cols() == 0 {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixstencil_image::ImageError;

    #[test]
    fn test_build_pool() {
        assert!(matches!(ExecutionStrategy::Serial.build_pool(), Ok(None)));
        assert!(matches!(ExecutionStrategy::ParallelRows.build_pool(), Ok(None)));
        assert!(matches!(ExecutionStrategy::Fixed(2).build_pool(), Ok(Some(_))));
        assert!(matches!(
            ExecutionStrategy::Fixed(0).build_pool(),
            Err(ParallelError::InvalidThreadCount(0))
        ));
    }

    #[test]
    fn test_par_iter_rows() -> Result<(), ImageError> {
        let src = Image::<u8, 2>::new([2, 2].into(), vec![1, 2, 3, 4, 5, 6, 7, 8])?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        par_iter_rows(&src, &mut dst, |s, d| d[0] = s[0] + s[1]);

        assert_eq!(dst.as_slice(), &[3, 7, 11, 15]);
        Ok(())
    }
}
