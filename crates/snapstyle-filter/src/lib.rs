//! snapstyle-filter - Coverage mask filtering
//!
//! This crate provides the blur used by the shadow renderer:
//!
//! - Box blur with running sums ([`box_blur_mask`])
//! - Gaussian blur approximated by three box passes
//!   ([`gaussian_blur_mask`])

pub mod block_conv;
mod error;
pub mod gaussian;

pub use error::{FilterError, FilterResult};

pub use block_conv::{box_blur_mask, box_blur_mask_in_place};
pub use gaussian::{GAUSSIAN_BOX_PASSES, box_sizes_for_gaussian, gaussian_blur_mask};
