use pixstencil_image::Image;

/// How neighborhood reads outside the image are resolved.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Take the outermost row or column of pixels, independently per axis.
    ///
    /// Example: ...d c b a | a a a a...
    #[default]
    Clamp,
}

impl BoundaryMode {
    /// Maps index `i` to a valid index i.e. within `[0, len)`.
    ///
    /// PRECONDITION: `len > 0`.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            BoundaryMode::Clamp => i.clamp(0, len as isize - 1) as usize,
        }
    }
}

/// Read-only neighborhood access into an image.
///
/// The accessor borrows its source, so the image cannot be written while a
/// pass reads from it.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryAccessor<'a, T, const C: usize> {
    image: &'a Image<T, C>,
    radius: usize,
    mode: BoundaryMode,
}

impl<'a, T, const C: usize> BoundaryAccessor<'a, T, C>
where
    T: Copy,
{
    /// Create an accessor over `image` for a window of the given radius.
    pub fn new(image: &'a Image<T, C>, radius: usize, mode: BoundaryMode) -> Self {
        Self {
            image,
            radius,
            mode,
        }
    }

    /// Create an edge-clamping accessor.
    pub fn clamped(image: &'a Image<T, C>, radius: usize) -> Self {
        Self::new(image, radius, BoundaryMode::Clamp)
    }

    /// The source image.
    pub fn image(&self) -> &'a Image<T, C> {
        self.image
    }

    /// The window radius the accessor was created for.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// The boundary mode.
    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    /// Resolve the source coordinate of the neighbor `(dx, dy)` of `(cx, cy)`.
    #[inline]
    pub fn resolve(&self, cx: usize, cy: usize, dx: isize, dy: isize) -> (usize, usize) {
        debug_assert!(dx.unsigned_abs() <= self.radius && dy.unsigned_abs() <= self.radius);
        let x = self.mode.map_index(cx as isize + dx, self.image.width());
        let y = self.mode.map_index(cy as isize + dy, self.image.height());
        (x, y)
    }

    /// Read the neighbor `(dx, dy)` of the center `(cx, cy)`.
    ///
    /// PRECONDITION: the image is not empty.
    #[inline]
    pub fn read(&self, cx: usize, cy: usize, dx: isize, dy: isize) -> [T; C] {
        let (x, y) = self.resolve(cx, cy, dx, dy);
        let pixel = self.image.pixel(x, y);
        std::array::from_fn(|c| pixel[c])
    }
}
