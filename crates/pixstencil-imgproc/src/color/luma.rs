use crate::{filter::ensure_same_size, parallel};
use pixstencil_image::{Image, ImageError};

/// Define the RGB weights for the luma conversion.
const RW: f64 = 0.2126;
const GW: f64 = 0.7152;
const BW: f64 = 0.0722;

/// Convert an RGBA8 image to 8-bit luma using the formula:
///
/// Y = 0.2126 * R + 0.7152 * G + 0.0722 * B
///
/// The weighted sum is truncated, alpha is ignored.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output luma image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use pixstencil_image::Image;
/// use pixstencil_imgproc::color::luma_from_rgba;
///
/// let image = Image::<u8, 4>::new([1, 1].into(), vec![10, 200, 30, 255]).unwrap();
/// let mut luma = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// luma_from_rgba(&image, &mut luma).unwrap();
/// assert_eq!(luma.as_slice(), &[147]);
/// ```
pub fn luma_from_rgba(src: &Image<u8, 4>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    ensure_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f64;
        let g = src_pixel[1] as f64;
        let b = src_pixel[2] as f64;
        dst_pixel[0] = (RW * r + GW * g + BW * b) as u8;
    });

    Ok(())
}
