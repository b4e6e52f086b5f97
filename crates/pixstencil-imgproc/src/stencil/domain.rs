use pixstencil_image::ImageError;

/// The window side lengths the stencil core supports.
pub const SUPPORTED_KERNEL_SIZES: [usize; 3] = [3, 5, 7];

/// Check that a kernel is square and its side is one of [`SUPPORTED_KERNEL_SIZES`].
///
/// # Arguments
///
/// * `size_x` - The width of the kernel.
/// * `size_y` - The height of the kernel.
///
/// # Returns
///
/// The side length of the kernel.
///
/// # Errors
///
/// [`ImageError::InvalidKernelConfiguration`] when the kernel is rejected.
pub fn check_kernel_size(size_x: usize, size_y: usize) -> Result<usize, ImageError> {
    if size_x != size_y || !SUPPORTED_KERNEL_SIZES.contains(&size_x) {
        log::warn!("rejecting kernel configuration {size_x}x{size_y}");
        return Err(ImageError::InvalidKernelConfiguration(size_x, size_y));
    }
    Ok(size_x)
}

/// A square activation mask centered on the output pixel.
///
/// Cells are addressed by their offset `(dx, dy)` from the center, both in
/// `[-radius, radius]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    side: usize,
    cells: Vec<bool>,
}

impl Domain {
    /// Create a domain with every cell active.
    ///
    /// # Errors
    ///
    /// If the size is not square or not one of 3, 5 or 7.
    pub fn new(size_x: usize, size_y: usize) -> Result<Self, ImageError> {
        let side = check_kernel_size(size_x, size_y)?;
        Ok(Self {
            side,
            cells: vec![true; side * side],
        })
    }

    /// Create a domain from row-major activation cells.
    ///
    /// # Errors
    ///
    /// If the size is rejected or `cells` does not hold `size_x * size_y` values.
    pub fn from_cells(size_x: usize, size_y: usize, cells: &[bool]) -> Result<Self, ImageError> {
        let side = check_kernel_size(size_x, size_y)?;
        if cells.len() != side * side {
            return Err(ImageError::InvalidChannelShape(cells.len(), side * side));
        }
        Ok(Self {
            side,
            cells: cells.to_vec(),
        })
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

    /// Whether the cell at offset `(dx, dy)` takes part in reductions.
    ///
    /// Offsets outside the window are inactive.
    pub fn is_active(&self, dx: isize, dy: isize) -> bool {
        self.index(dx, dy).is_some_and(|i| self.cells[i])
    }

    /// Enable or disable the cell at offset `(dx, dy)`.
    ///
    /// Offsets outside the window are ignored.
    pub fn set_active(&mut self, dx: isize, dy: isize, active: bool) {
        if let Some(i) = self.index(dx, dy) {
            self.cells[i] = active;
        }
    }

    /// Number of active cells.
    pub fn num_active(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Offsets of the active cells in row-major order.
    pub fn active_offsets(&self) -> impl Iterator<Item = (isize, isize)> + '_ {
        let r = self.radius() as isize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &active)| active)
            .map(move |(i, _)| {
                let dx = (i % self.side) as isize - r;
                let dy = (i / self.side) as isize - r;
                (dx, dy)
            })
    }

    fn index(&self, dx: isize, dy: isize) -> Option<usize> {
        let r = self.radius() as isize;
        if dx < -r || dx > r || dy < -r || dy > r {
            return None;
        }
        Some(((dy + r) as usize) * self.side + (dx + r) as usize)
    }
}
