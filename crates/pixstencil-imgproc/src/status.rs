//! Integer status codes for callers that cannot consume a `Result`.
//!
//! A filter invocation reports a non-negative status on success and
//! [`REJECTED_CONFIGURATION`] when it fails, e.g. because the kernel size is
//! not supported.

use pixstencil_image::ImageError;

/// Status reported for a successful invocation.
pub const SUCCESS: i32 = 0;

/// Status reported when an invocation is rejected.
pub const REJECTED_CONFIGURATION: i32 = -1;

/// Map the result of a filter invocation to its status code.
///
/// # Example
///
/// ```
/// use pixstencil_image::Image;
/// use pixstencil_imgproc::{filter::gaussian_blur, status};
///
/// let src = Image::<u8, 4>::from_size_val([4, 4].into(), 0).unwrap();
/// let mut dst = src.clone();
///
/// let res = gaussian_blur(&src, &mut dst, (9, 9));
/// assert_eq!(status::status_code(&res), status::REJECTED_CONFIGURATION);
/// ```
pub fn status_code<T>(result: &Result<T, ImageError>) -> i32 {
    match result {
        Ok(_) => SUCCESS,
        Err(_) => REJECTED_CONFIGURATION,
    }
}
