use pixstencil_image::{Image, ImageError};

use crate::color::luma_from_rgba;
use crate::draw::{draw_cross_marker, MarkerBound};
use crate::filter::{ensure_same_size, kernels};
use crate::stencil::{
    convolve, reduce, BoundaryAccessor, Domain, ReduceOp, StencilEngine, WeightedMask,
};

/// Parameters of the harris corner detector.
#[derive(Debug, Clone, PartialEq)]
pub struct HarrisConfig {
    /// Sensitivity factor of the trace term.
    pub k: f32,
    /// Responses strictly above this value are marked as corners.
    pub threshold: f32,
    /// Number of pixels each arm of a corner marker extends from its center.
    pub marker_half_length: usize,
    /// RGB color of the corner markers.
    pub marker_color: [u8; 3],
    /// Lower bound of the vertical marker arm.
    pub marker_bound: MarkerBound,
}

impl Default for HarrisConfig {
    fn default() -> Self {
        Self {
            k: 0.04,
            threshold: 20000.0,
            marker_half_length: 10,
            marker_color: [255, 255, 255],
            marker_bound: MarkerBound::Symmetric,
        }
    }
}

/// A pixel whose harris response exceeded the threshold.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Corner {
    /// The x-coordinate of the corner in the image.
    pub x: usize,
    /// The y-coordinate of the corner in the image.
    pub y: usize,
    /// The harris response at the corner.
    pub score: f32,
}

/// Compute the horizontal and vertical gradients of a luma image.
///
/// Both gradients are 3x3 convolutions with taps of `±1/6`, clamped at the
/// image border.
///
/// # Arguments
///
/// * `src` - The luma image.
/// * `dx` - The horizontal gradient.
/// * `dy` - The vertical gradient.
pub fn harris_derivatives(
    src: &Image<u8, 1>,
    dx: &mut Image<f32, 1>,
    dy: &mut Image<f32, 1>,
) -> Result<(), ImageError> {
    ensure_same_size(src, dx)?;
    ensure_same_size(src, dy)?;

    let (mask_x, mask_y) = kernels::harris_derivative_masks()?;
    let input = BoundaryAccessor::clamped(src, mask_x.radius());
    let engine = StencilEngine::default();

    for (dst, mask) in [(dx, &mask_x), (dy, &mask_y)] {
        engine.run(dst, |x, y| {
            [convolve(mask, ReduceOp::Sum, |ox, oy| {
                f32::from(input.read(x, y, ox, oy)[0])
            })]
        });
    }

    Ok(())
}

/// Compute the harris corner response from image gradients.
///
/// The second-moment sums are weighted by the gaussian table of the same size:
///
/// R = (Sxx * Syy - Sxy^2) - k * (Sxx + Syy)^2
///
/// # Arguments
///
/// * `dx` - The horizontal gradient.
/// * `dy` - The vertical gradient.
/// * `dst` - The response.
/// * `kernel_size` - The window size, 3x3, 5x5 or 7x7.
/// * `k` - The sensitivity factor.
pub fn harris_response(
    dx: &Image<f32, 1>,
    dy: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_size: (usize, usize),
    k: f32,
) -> Result<(), ImageError> {
    let domain = Domain::new(kernel_size.0, kernel_size.1)?;
    let gauss = kernels::gaussian_mask(kernel_size)?;
    ensure_same_size(dx, dst)?;
    ensure_same_size(dy, dst)?;

    response_pass(dx, dy, dst, &domain, &gauss, k);
    Ok(())
}

fn response_pass(
    dx: &Image<f32, 1>,
    dy: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    domain: &Domain,
    gauss: &WeightedMask,
    k: f32,
) {
    let input_x = BoundaryAccessor::clamped(dx, domain.radius());
    let input_y = BoundaryAccessor::clamped(dy, domain.radius());

    StencilEngine::default().run(dst, |x, y| {
        let [sum_x, sum_y, sum_xy] = reduce(domain, ReduceOp::Sum, |ox, oy| {
            let g = gauss.weight(ox, oy);
            let gx = input_x.read(x, y, ox, oy)[0];
            let gy = input_y.read(x, y, ox, oy)[0];
            [g * gx * gx, g * gy * gy, g * gx * gy]
        });

        let det = (sum_x * sum_y) - (sum_xy * sum_xy);
        let trace = sum_x + sum_y;
        [det - (k * trace * trace)]
    });
}

/// List the pixels whose response is strictly above `threshold`, row-major.
pub fn corners_above_threshold(response: &Image<f32, 1>, threshold: f32) -> Vec<Corner> {
    let cols = response.cols();
    if cols == 0 {
        return vec![];
    }

    response
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, score)| **score > threshold)
        .map(|(i, &score)| Corner {
            x: i % cols,
            y: i / cols,
            score,
        })
        .collect()
}

/// Overlay a cross marker on a copy of `src` for every corner in `response`.
///
/// # Arguments
///
/// * `src` - The source RGBA image, left untouched.
/// * `response` - The harris response.
/// * `dst` - Receives the copy of `src` with the markers.
/// * `config` - The threshold and marker parameters.
///
/// # Returns
///
/// The corners that were marked.
pub fn mark_corners(
    src: &Image<u8, 4>,
    response: &Image<f32, 1>,
    dst: &mut Image<u8, 4>,
    config: &HarrisConfig,
) -> Result<Vec<Corner>, ImageError> {
    ensure_same_size(src, response)?;
    ensure_same_size(src, dst)?;

    dst.as_slice_mut().copy_from_slice(src.as_slice());

    let corners = corners_above_threshold(response, config.threshold);
    for corner in corners.iter() {
        draw_cross_marker(
            dst,
            (corner.x, corner.y),
            config.marker_half_length,
            config.marker_color,
            config.marker_bound,
        );
    }

    Ok(corners)
}

/// Detect harris corners in an RGBA image and draw them on a copy of it.
///
/// The pipeline runs luma, gradients, corner response and marking, each stage
/// finishing before the next one starts.
///
/// # Arguments
///
/// * `src` - The RGBA image.
/// * `dst` - Receives `src` with a cross marker on every corner.
/// * `kernel_size` - The window size of the corner response, 3x3, 5x5 or 7x7.
/// * `config` - The detector parameters.
///
/// # Returns
///
/// The detected corners.
///
/// # Errors
///
/// [`ImageError::InvalidKernelConfiguration`] before any stage runs if the
/// window size is not supported.
///
/// # Example
///
/// ```
/// use pixstencil_image::Image;
/// use pixstencil_imgproc::features::{harris_corners, HarrisConfig};
///
/// let src = Image::<u8, 4>::from_size_val([16, 16].into(), 90).unwrap();
/// let mut dst = Image::<u8, 4>::from_size_val(src.size(), 0).unwrap();
///
/// let corners = harris_corners(&src, &mut dst, (3, 3), &HarrisConfig::default()).unwrap();
/// assert!(corners.is_empty());
/// assert_eq!(dst, src);
/// ```
pub fn harris_corners(
    src: &Image<u8, 4>,
    dst: &mut Image<u8, 4>,
    kernel_size: (usize, usize),
    config: &HarrisConfig,
) -> Result<Vec<Corner>, ImageError> {
    let domain = Domain::new(kernel_size.0, kernel_size.1)?;
    let gauss = kernels::gaussian_mask(kernel_size)?;
    ensure_same_size(src, dst)?;

    log::debug!(
        "harris {}x{} over {}",
        kernel_size.0,
        kernel_size.1,
        src.size()
    );

    let mut luma = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    luma_from_rgba(src, &mut luma)?;

    log::debug!("harris: gradients");
    let mut dx = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    let mut dy = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    harris_derivatives(&luma, &mut dx, &mut dy)?;

    log::debug!("harris: corner response");
    let mut response = Image::<f32, 1>::from_size_val(src.size(), 0.0)?;
    response_pass(&dx, &dy, &mut response, &domain, &gauss, config.k);

    let corners = mark_corners(src, &response, dst, config)?;
    log::debug!("harris: marked {} corners", corners.len());

    Ok(corners)
}
