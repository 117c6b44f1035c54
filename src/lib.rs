//! # gaussbox
//!
//! Fast approximate Gaussian blur for 32-bit pixel buffers.
//!
//! A true Gaussian convolution costs O(radius) per pixel; this crate gets
//! within a hair of the same result in O(1) per pixel by composing three
//! box blurs whose widths are planned from the target standard deviation.
//! Each box blur is separable — a horizontal sliding-window pass followed
//! by a vertical one — so the whole blur is five tight loops over the
//! buffer regardless of strength.
//!
//! ## Pipeline
//!
//! 1. **Planner** — [`blur::boxes_for_gauss`] quantizes a continuous sigma
//!    into three odd box widths.
//! 2. **Passes** — [`blur::box_blur_horizontal`] and
//!    [`blur::box_blur_vertical`] run the moving average along rows and
//!    columns of one channel, edge-clamped at the boundaries.
//! 3. **Driver** — [`blur::gaussian_blur`] chains three box-blur steps per
//!    color channel over a ping-ponged pair of buffers; alpha passes
//!    through untouched.
//! 4. **Surface entry** — [`blur::blur_image_surface`] validates the
//!    format and stride of an [`surface::ImageSurface`] before handing its
//!    bytes to the driver.

pub mod basics;
pub mod blur;
pub mod surface;
