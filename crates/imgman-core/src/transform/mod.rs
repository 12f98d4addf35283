//! Image transformation operations: orientation correction and downscaling.
//!
//! Both operate on a borrowed [`RawImage`](crate::decode::RawImage) and return
//! a new one; the pipeline swaps the result in and drops the original.
//!
//! # Transform Order
//!
//! The pipeline applies transforms in call order. The usual sequence is:
//! 1. Orientation correction (needs metadata cached from the original source)
//! 2. Downscale
//!
//! # Coordinate System
//!
//! - Rotations are clockwise
//! - Origin is top-left corner

mod downscale;
mod orientation;

pub use downscale::{downscale, fit_within, resize_exact};
pub use orientation::apply_orientation;
