use std::sync::Arc;

use rayon::prelude::*;

use pixstencil_image::Image;

use crate::parallel::{ExecutionStrategy, ParallelError};

/// Evaluates a per-pixel function over every pixel of an output image.
///
/// The output image is the iteration space: the function is called exactly once
/// for each `(x, y)` in `[0, width) x [0, height)` and its result is stored at
/// that position. The function may read any number of input images through
/// [`super::BoundaryAccessor`]s, but it is `Fn + Sync` so it cannot mutate
/// shared state, which makes every [`ExecutionStrategy`] produce the same output.
#[derive(Debug, Clone, Default)]
pub struct StencilEngine {
    strategy: ExecutionStrategy,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl StencilEngine {
    /// Create an engine for the given strategy.
    ///
    /// # Errors
    ///
    /// If the strategy asks for a dedicated pool that cannot be built.
    pub fn new(strategy: ExecutionStrategy) -> Result<Self, ParallelError> {
        let pool = strategy.build_pool()?.map(Arc::new);
        Ok(Self { strategy, pool })
    }

    /// Create an engine that evaluates pixels row-major on the calling thread.
    pub fn serial() -> Self {
        Self {
            strategy: ExecutionStrategy::Serial,
            pool: None,
        }
    }

    /// The strategy this engine runs with.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// Evaluate `kernel(x, y)` for every pixel of `dst` and write the results.
    ///
    /// # Arguments
    ///
    /// * `dst` - The output image, which defines the iteration space.
    /// * `kernel` - The per-pixel function returning the channels of the output pixel.
    pub fn run<T, const C: usize, F>(&self, dst: &mut Image<T, C>, kernel: F)
    where
        T: Copy + Send + Sync,
        F: Fn(usize, usize) -> [T; C] + Send + Sync,
    {
        let row_stride = dst.cols() * C;
        if row_stride == 0 || dst.rows() == 0 {
            return;
        }

        log::trace!(
            "stencil pass over {} with {:?}",
            dst.size(),
            self.strategy
        );

        let eval_row = |(y, row): (usize, &mut [T])| {
            row.chunks_exact_mut(C)
                .enumerate()
                .for_each(|(x, pixel)| pixel.copy_from_slice(&kernel(x, y)));
        };

        let data = dst.as_slice_mut();
        match (&self.strategy, &self.pool) {
            (ExecutionStrategy::Serial, _) => {
                data.chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each(eval_row);
            }
            (_, Some(pool)) => pool.install(|| {
                data.par_chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each(eval_row);
            }),
            (_, None) => {
                data.par_chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each(eval_row);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixstencil_image::ImageError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_run_writes_every_pixel() -> Result<(), ImageError> {
        let mut dst = Image::<u32, 2>::from_size_val([3, 2].into(), 0)?;

        StencilEngine::serial().run(&mut dst, |x, y| [x as u32, y as u32]);

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                0, 0,  1, 0,  2, 0,
                0, 1,  1, 1,  2, 1,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_run_visits_once() -> Result<(), Box<dyn std::error::Error>> {
        let strategies = [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelRows,
            ExecutionStrategy::Fixed(3),
        ];

        for strategy in strategies {
            let engine = StencilEngine::new(strategy)?;
            let calls = AtomicUsize::new(0);
            let mut dst = Image::<u8, 1>::from_size_val([17, 9].into(), 0)?;

            engine.run(&mut dst, |_, _| {
                calls.fetch_add(1, Ordering::Relaxed);
                [1]
            });

            assert_eq!(calls.load(Ordering::Relaxed), 17 * 9, "{strategy:?}");
            assert!(dst.as_slice().iter().all(|&v| v == 1), "{strategy:?}");
        }
        Ok(())
    }

    #[test]
    fn test_run_empty_image() -> Result<(), ImageError> {
        let mut dst = Image::<f32, 1>::new([0, 4].into(), vec![])?;
        StencilEngine::default().run(&mut dst, |_, _| [1.0]);
        assert!(dst.as_slice().is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_engine() {
        assert!(matches!(
            StencilEngine::new(ExecutionStrategy::Fixed(0)),
            Err(ParallelError::InvalidThreadCount(0))
        ));
    }
}
