use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use thiserror::Error;

/// Red, green and blue; no alpha channel, no row padding.
pub const BYTES_PER_PIXEL: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("pixel buffer is {actual} bytes, {width}x{height} RGB needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Number of bytes a `width` x `height` RGB buffer must hold, or `None` if
/// that does not fit in `usize`.
pub fn expected_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

/// A bitmap ready to be shown in the status bar.
///
/// Pixel dimensions always equal the dimensions of the buffer it was built
/// from; scaling is left to whoever displays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayImage {
    pixels: RgbImage,
}

impl DisplayImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGB value at `(x, y)`, `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixels.get_pixel_checked(x, y).map(|Rgb(rgb)| *rgb)
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Four-channel copy with every pixel fully opaque.
    pub fn to_rgba(&self) -> RgbaImage {
        DynamicImage::ImageRgb8(self.pixels.clone()).into_rgba8()
    }
}

/// Convert a raw row-major RGB buffer into a [`DisplayImage`].
///
/// The buffer must be exactly `width * height * 3` bytes long. It is copied,
/// never mutated or kept.
pub fn to_image(buffer: &[u8], width: u32, height: u32) -> Result<DisplayImage, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::EmptyDimensions { width, height });
    }

    let mismatch = |expected| ImageError::SizeMismatch {
        width,
        height,
        expected,
        actual: buffer.len(),
    };

    let expected = expected_len(width, height).ok_or_else(|| mismatch(usize::MAX))?;
    if buffer.len() != expected {
        return Err(mismatch(expected));
    }

    let pixels = RgbImage::from_raw(width, height, buffer.to_vec()).ok_or_else(|| mismatch(expected))?;
    Ok(DisplayImage { pixels })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        (0..expected_len(width, height).unwrap())
            .map(|i| (i % 251) as u8)
            .collect()
    }

    // -----------------------------------------------------------------------
    // to_image: sizes
    // -----------------------------------------------------------------------

    #[test]
    fn exact_length_keeps_dimensions() {
        for (w, h) in [(1, 1), (40, 22), (3, 7), (128, 1)] {
            let img = to_image(&gradient(w, h), w, h).unwrap();
            assert_eq!((img.width(), img.height()), (w, h));
        }
    }

    #[test]
    fn all_zero_status_bar_buffer_is_black() {
        let buffer = vec![0u8; 40 * 22 * 3];
        let img = to_image(&buffer, 40, 22).unwrap();
        assert_eq!((img.width(), img.height()), (40, 22));
        assert!(img.as_rgb().pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn short_buffer_fails_cleanly() {
        let buffer = vec![0u8; 40 * 22 * 3 - 1];
        assert_eq!(
            to_image(&buffer, 40, 22),
            Err(ImageError::SizeMismatch {
                width: 40,
                height: 22,
                expected: 2640,
                actual: 2639,
            })
        );
    }

    #[test]
    fn long_buffer_fails() {
        let buffer = vec![0u8; 40 * 22 * 3 + 3];
        assert!(matches!(
            to_image(&buffer, 40, 22),
            Err(ImageError::SizeMismatch { actual: 2643, .. })
        ));
    }

    #[test]
    fn empty_buffer_with_claimed_size_fails() {
        assert!(matches!(
            to_image(&[], 40, 22),
            Err(ImageError::SizeMismatch { actual: 0, .. })
        ));
    }

    #[test]
    fn huge_claimed_size_does_not_read_past_buffer() {
        let buffer = vec![0u8; 12];
        assert!(matches!(
            to_image(&buffer, u32::MAX, u32::MAX),
            Err(ImageError::SizeMismatch { actual: 12, .. })
        ));
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            to_image(&[], 0, 22),
            Err(ImageError::EmptyDimensions {
                width: 0,
                height: 22
            })
        );
        assert!(to_image(&[], 40, 0).is_err());
    }

    // -----------------------------------------------------------------------
    // to_image: layout and determinism
    // -----------------------------------------------------------------------

    #[test]
    fn pixels_are_row_major_rgb() {
        // 2x2: red, green / blue, white
        let buffer = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let img = to_image(&buffer, 2, 2).unwrap();
        assert_eq!(img.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(img.pixel(1, 0), Some([0, 255, 0]));
        assert_eq!(img.pixel(0, 1), Some([0, 0, 255]));
        assert_eq!(img.pixel(1, 1), Some([255, 255, 255]));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn same_input_same_output() {
        let buffer = gradient(40, 22);
        let first = to_image(&buffer, 40, 22).unwrap();
        let second = to_image(&buffer, 40, 22).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_rgb().as_raw(), &buffer);
    }

    #[test]
    fn input_buffer_untouched() {
        let buffer = gradient(4, 4);
        let before = buffer.clone();
        let _ = to_image(&buffer, 4, 4).unwrap();
        assert_eq!(buffer, before);
    }

    #[test]
    fn rgba_copy_is_opaque() {
        let buffer = gradient(5, 3);
        let rgba = to_image(&buffer, 5, 3).unwrap().to_rgba();
        assert_eq!((rgba.width(), rgba.height()), (5, 3));
        assert!(rgba.pixels().all(|p| p.0[3] == 255));
        assert_eq!(rgba.get_pixel(1, 0).0, [3, 4, 5, 255]);
    }
}
