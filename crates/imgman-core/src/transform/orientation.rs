//! EXIF orientation correction.
//!
//! The stored pixels of a camera image are often rotated relative to how
//! the photo was framed. The orientation code says how; this module undoes it.
//! All rotations here are clockwise (`image::imageops` convention):
//!
//! ```text
//! code  correction
//!  1    none
//!  2    flip horizontal
//!  3    rotate 180
//!  4    rotate 180, flip horizontal   (= flip vertical)
//!  5    rotate 90,  flip horizontal   (= transpose)
//!  6    rotate 90
//!  7    rotate 270, flip horizontal   (= transverse)
//!  8    rotate 270
//! ```

use image::imageops;

use crate::decode::{Orientation, RawImage};

/// Return a copy of `image` corrected for `orientation`.
///
/// `Orientation::Normal` returns a plain clone. A buffer whose length does not
/// match its dimensions is returned unchanged.
pub fn apply_orientation(image: &RawImage, orientation: Orientation) -> RawImage {
    let Some(view) = image.as_view() else {
        return image.clone();
    };

    let corrected = match orientation {
        Orientation::Normal => return image.clone(),
        Orientation::FlipHorizontal => imageops::flip_horizontal(&view),
        Orientation::Rotate180 => imageops::rotate180(&view),
        Orientation::FlipVertical => {
            let mut rotated = imageops::rotate180(&view);
            imageops::flip_horizontal_in_place(&mut rotated);
            rotated
        }
        Orientation::Transpose => {
            let mut rotated = imageops::rotate90(&view);
            imageops::flip_horizontal_in_place(&mut rotated);
            rotated
        }
        Orientation::Rotate90CW => imageops::rotate90(&view),
        Orientation::Transverse => {
            let mut rotated = imageops::rotate270(&view);
            imageops::flip_horizontal_in_place(&mut rotated);
            rotated
        }
        Orientation::Rotate270CW => imageops::rotate270(&view),
    };

    RawImage::from_rgb_image(corrected)
}
