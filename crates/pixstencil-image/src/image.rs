use num_traits::AsPrimitive;

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use pixstencil_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for the pixel component types a stencil pass can read and write.
///
/// It fixes the widening and narrowing rules between the storage type and the
/// `f32` accumulators used by the filters.
pub trait PixelValue: Copy + Default + Send + Sync + AsPrimitive<f32> + 'static {
    /// Widen the value to `f32`.
    #[inline]
    fn to_f32(self) -> f32 {
        self.as_()
    }

    /// Narrow a `f32` by truncating towards zero, saturating at the type bounds.
    fn from_f32_truncate(x: f32) -> Self;

    /// Narrow a `f32` by adding `0.5` and truncating, i.e. rounding half up.
    fn from_f32_round_half_up(x: f32) -> Self;
}

impl PixelValue for u8 {
    #[inline]
    fn from_f32_truncate(x: f32) -> Self {
        x as u8
    }

    #[inline]
    fn from_f32_round_half_up(x: f32) -> Self {
        (x + 0.5) as u8
    }
}

impl PixelValue for f32 {
    #[inline]
    fn from_f32_truncate(x: f32) -> Self {
        x
    }

    // floating point storage is not narrowed
    #[inline]
    fn from_f32_round_half_up(x: f32) -> Self {
        x
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major and interleaved, i.e. with shape (H, W, C).
/// The pixel format is part of the type: `Image<u8, 4>` is RGBA8,
/// `Image<u8, 1>` is an 8-bit luma image and `Image<f32, 1>` a float plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixstencil_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 4>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 4],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 4);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.width * size.height * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and every component set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixstencil_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32, 1>::from_size_val([3, 2].into(), 0.5).unwrap();
    ///
    /// assert_eq!(image.as_slice(), &[0.5; 6]);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Create a new image by copying the given pixel data.
    pub fn from_size_slice(size: ImageSize, data: &[T]) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Image::new(size, data.to_vec())
    }

    /// Get the size of the image in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    #[inline]
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    #[inline]
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    #[inline]
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the channels of the pixel at `(x, y)`.
    ///
    /// PRECONDITION: `x < width` and `y < height`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[T] {
        let start = (y * self.size.width + x) * CHANNELS;
        &self.data[start..start + CHANNELS]
    }

    /// Get the channels of the pixel at `(x, y)` mutably.
    ///
    /// PRECONDITION: `x < width` and `y < height`.
    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [T] {
        let start = (y * self.size.width + x) * CHANNELS;
        &mut self.data[start..start + CHANNELS]
    }

    /// Get a single pixel component.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate of the pixel.
    /// * `y` - The y-coordinate of the pixel.
    /// * `ch` - The channel index of the pixel.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<&T, ImageError> {
        self.check_index(x, y, ch)?;
        Ok(&self.data[(y * self.size.width + x) * CHANNELS + ch])
    }

    /// Set a single pixel component.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: T) -> Result<(), ImageError> {
        self.check_index(x, y, ch)?;
        self.data[(y * self.size.width + x) * CHANNELS + ch] = val;
        Ok(())
    }

    fn check_index(&self, x: usize, y: usize, ch: usize) -> Result<(), ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }
        Ok(())
    }
}
