//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Fill resize** | `DynamicImage::resize_exact` with Lanczos3 |
//! | **Anchored crop** | `DynamicImage::crop_imm` |
//! | **Write back** | in-memory encode, then replace the file |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Parameters**: Data structures describing a crop
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{CropOffset, CropPlan, anchor_offset, calculate_fill_dimensions, plan_crop};
pub use operations::{crop_file_to_fit, crop_file_with_anchor, crop_to_fit, get_dimensions};
pub use params::{CropAnchor, CropSpec, Quality};
pub use rust_backend::RustBackend;
