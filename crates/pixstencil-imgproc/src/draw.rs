use pixstencil_image::Image;

/// Lower bound applied to the vertical arm of a cross marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerBound {
    /// Paint every row of the vertical arm that lies inside the image.
    #[default]
    Symmetric,

    /// Never paint row 0 with the vertical arm, for byte-exact parity with
    /// overlays produced with the `y + i > 0` bound.
    Reference,
}

/// Helper function to set the color channels of a pixel, leaving alpha untouched.
#[inline]
fn set_color(img: &mut Image<u8, 4>, x: usize, y: usize, color: [u8; 3]) {
    img.pixel_mut(x, y)[..3].copy_from_slice(&color);
}

/// Draws a cross centered on a pixel, clipped to the image bounds.
///
/// The horizontal arm covers `x - half_length ..= x + half_length` on row `y`,
/// the vertical arm covers `y - half_length ..= y + half_length` on column `x`.
///
/// # Arguments
///
/// * `img` - The RGBA image to draw on.
/// * `center` - The center of the cross as a tuple of (x, y).
/// * `half_length` - The number of pixels each arm extends from the center.
/// * `color` - The RGB color of the cross.
/// * `bound` - The lower bound of the vertical arm.
pub fn draw_cross_marker(
    img: &mut Image<u8, 4>,
    center: (usize, usize),
    half_length: usize,
    color: [u8; 3],
    bound: MarkerBound,
) {
    let (x, y) = (center.0 as i64, center.1 as i64);
    let (width, height) = (img.width() as i64, img.height() as i64);
    let r = half_length as i64;

    for i in -r..=r {
        let px = x + i;
        if px >= 0 && px < width && y < height {
            set_color(img, px as usize, y as usize, color);
        }
    }

    let min_y = match bound {
        MarkerBound::Symmetric => 0,
        MarkerBound::Reference => 1,
    };
    for i in -r..=r {
        let py = y + i;
        if py >= min_y && py < height && x < width {
            set_color(img, x as usize, py as usize, color);
        }
    }
}
