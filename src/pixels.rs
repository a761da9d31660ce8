use image::DynamicImage;

use crate::error::AnalysisError;
use crate::indexed;

/// Decoded sample grid (像素矩阵)
///
/// **布局**: `height × width × channels`, row-major, channels innermost.
/// A grayscale image has `channels == 1`, which is the same population as a
/// plain 2-D array.
///
/// **取值**: samples keep their native range. 8-bit images give 0–255,
/// 16-bit images give 0–65535 and float images keep their raw values; no
/// normalisation happens here.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelArray {
    height: usize,
    width: usize,
    channels: usize,
    samples: Vec<f64>,
}

impl PixelArray {
    /// Builds an array from raw samples, checking that the shape matches.
    pub fn new(
        height: usize,
        width: usize,
        channels: usize,
        samples: Vec<f64>,
    ) -> Result<Self, AnalysisError> {
        let expected = height * width * channels;
        if samples.len() != expected {
            return Err(AnalysisError::Compute(format!(
                "pixel array of shape ({height}, {width}, {channels}) needs {expected} samples, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            height,
            width,
            channels,
            samples,
        })
    }

    /// Decodes an in-memory encoded image (PNG, JPEG, ...).
    ///
    /// The format is sniffed from the leading bytes, so the caller does not
    /// need to say what it is sending. Indexed PNG/GIF images yield palette
    /// indices (see [`crate::indexed`]); everything else goes through `image`.
    pub fn decode(bytes: &[u8]) -> Result<Self, AnalysisError> {
        if let Some(indexed) = indexed::decode_indexed(bytes)? {
            return Ok(indexed);
        }
        let image =
            image::load_from_memory(bytes).map_err(|e| AnalysisError::Decode(e.to_string()))?;
        Ok(Self::from_image(&image))
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        let height = image.height() as usize;
        let width = image.width() as usize;

        let (channels, samples) = match image {
            DynamicImage::ImageLuma8(buf) => (1, widen(buf.as_raw())),
            DynamicImage::ImageLumaA8(buf) => (2, widen(buf.as_raw())),
            DynamicImage::ImageRgb8(buf) => (3, widen(buf.as_raw())),
            DynamicImage::ImageRgba8(buf) => (4, widen(buf.as_raw())),
            DynamicImage::ImageLuma16(buf) => (1, widen(buf.as_raw())),
            DynamicImage::ImageLumaA16(buf) => (2, widen(buf.as_raw())),
            DynamicImage::ImageRgb16(buf) => (3, widen(buf.as_raw())),
            DynamicImage::ImageRgba16(buf) => (4, widen(buf.as_raw())),
            DynamicImage::ImageRgb32F(buf) => (3, widen(buf.as_raw())),
            DynamicImage::ImageRgba32F(buf) => (4, widen(buf.as_raw())),
            // `DynamicImage` is non-exhaustive; anything newer goes through RGBA floats.
            other => (4, widen(other.to_rgba32f().as_raw())),
        };

        Self {
            height,
            width,
            channels,
            samples,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of samples in one row (`width * channels`).
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn widen<T: Copy + Into<f64>>(raw: &[T]) -> Vec<f64> {
    raw.iter().map(|&s| s.into()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Luma, Rgb};
    use std::io::Cursor;

    fn encode_png(image: &DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodes_grayscale_png_into_single_channel() {
        let gray = ImageBuffer::from_fn(3, 2, |x, y| Luma([(x + 10 * y) as u8]));
        let bytes = encode_png(&DynamicImage::ImageLuma8(gray));

        let pixels = PixelArray::decode(&bytes).unwrap();
        assert_eq!(pixels.height(), 2);
        assert_eq!(pixels.width(), 3);
        assert_eq!(pixels.channels(), 1);
        assert_eq!(pixels.samples(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn rgb_samples_are_interleaved_per_pixel() {
        let rgb = ImageBuffer::from_fn(2, 1, |x, _| Rgb([x as u8, 100, 200]));
        let pixels = PixelArray::from_image(&DynamicImage::ImageRgb8(rgb));

        assert_eq!(pixels.channels(), 3);
        assert_eq!(pixels.row_len(), 6);
        assert_eq!(pixels.samples(), &[0.0, 100.0, 200.0, 1.0, 100.0, 200.0]);
    }

    #[test]
    fn sixteen_bit_samples_keep_native_range() {
        let deep = ImageBuffer::from_fn(1, 1, |_, _| Luma([40_000u16]));
        let pixels = PixelArray::from_image(&DynamicImage::ImageLuma16(deep));
        assert_eq!(pixels.samples(), &[40_000.0]);
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = PixelArray::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, AnalysisError::Decode(_)));
    }

    #[test]
    fn empty_input_is_a_decode_error() {
        assert!(matches!(
            PixelArray::decode(&[]),
            Err(AnalysisError::Decode(_))
        ));
    }

    #[test]
    fn truncated_png_is_a_decode_error() {
        let gray = ImageBuffer::from_fn(8, 8, |_, _| Luma([77u8]));
        let bytes = encode_png(&DynamicImage::ImageLuma8(gray));
        let truncated = &bytes[..bytes.len() / 2];
        assert!(PixelArray::decode(truncated).is_err());
    }

    #[test]
    fn new_rejects_mismatched_shape() {
        let err = PixelArray::new(2, 2, 1, vec![0.0; 3]).unwrap_err();
        assert!(err.to_string().contains("needs 4 samples, got 3"));
    }
}
