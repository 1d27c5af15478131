//! Foundational primitives for Gaussian beam metrology.
//!
//! ## Image Views and Stride
//! Frames use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded camera buffers without copying.
//!
//! ## Beam Descriptor
//! [`GaussianBeam`] is the value type the profiling pipeline produces. It is
//! populated, never validated: whether the fitted parameters are physically
//! plausible is the caller's concern.

mod beam;
mod error;
mod image;

pub use beam::{GaussianBeam, OpticsConfig};
pub use error::Error;
pub use image::{Image, ImageView, to_f32, to_f32_u16};
