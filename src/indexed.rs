//! Palette-aware decoding for PNG and GIF.
//!
//! The generic `image` path expands palettes into RGB. Here an indexed image
//! keeps its palette indices as samples, one channel per pixel. Anything that
//! is not indexed falls back to the generic decoder.

use image::ImageFormat;
use std::io::Cursor;

use crate::error::AnalysisError;
use crate::pixels::PixelArray;

/// `Ok(None)` means "not an indexed image, use the generic decoder".
pub fn decode_indexed(bytes: &[u8]) -> Result<Option<PixelArray>, AnalysisError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => decode_png(bytes),
        Ok(ImageFormat::Gif) => decode_gif(bytes).map(Some),
        _ => Ok(None),
    }
}

fn decode_error(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Decode(e.to_string())
}

fn decode_png(bytes: &[u8]) -> Result<Option<PixelArray>, AnalysisError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    // No expansion: indices stay indices, sub-byte depths stay packed.
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(decode_error)?;

    let (color_type, bit_depth) = {
        let info = reader.info();
        (info.color_type, info.bit_depth)
    };
    match (color_type, bit_depth) {
        (png::ColorType::Indexed, _) => {}
        (png::ColorType::Grayscale, png::BitDepth::One) => {
            return Err(AnalysisError::Compute(
                "1-bit image has boolean samples, which have no numeric gradient".to_string(),
            ));
        }
        _ => return Ok(None),
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(decode_error)?;
    let width = frame.width as usize;
    let samples = unpack_rows(
        &buf[..frame.buffer_size()],
        frame.line_size,
        width,
        frame.bit_depth as u8,
    );

    PixelArray::new(frame.height as usize, width, 1, samples).map(Some)
}

/// Unpacks MSB-first packed rows of `bit_depth`-bit indices (1, 2, 4 or 8).
pub(crate) fn unpack_rows(buf: &[u8], line_size: usize, width: usize, bit_depth: u8) -> Vec<f64> {
    if line_size == 0 {
        return Vec::new();
    }
    let depth = usize::from(bit_depth);
    let per_byte = 8 / depth;
    let mask = ((1u16 << depth) - 1) as u8;

    buf.chunks(line_size)
        .flat_map(|row| {
            (0..width).map(move |x| {
                let byte = row[x / per_byte];
                let shift = 8 - depth * (x % per_byte + 1);
                f64::from((byte >> shift) & mask)
            })
        })
        .collect()
}

/// First frame only, placed on the logical screen. Pixels the frame does not
/// cover take the background index (0 when there is none).
fn decode_gif(bytes: &[u8]) -> Result<PixelArray, AnalysisError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(Cursor::new(bytes)).map_err(decode_error)?;

    let width = usize::from(decoder.width());
    let height = usize::from(decoder.height());
    let fill = decoder.bg_color().unwrap_or(0) as f64;

    let frame = decoder
        .read_next_frame()
        .map_err(decode_error)?
        .ok_or_else(|| AnalysisError::Decode("GIF contains no frames".to_string()))?;

    let mut canvas = vec![fill; width * height];
    let frame_width = usize::from(frame.width).max(1);
    for (row, line) in frame.buffer.chunks(frame_width).enumerate() {
        let y = usize::from(frame.top) + row;
        if y >= height {
            break;
        }
        for (col, &index) in line.iter().enumerate() {
            let x = usize::from(frame.left) + col;
            if x >= width {
                break;
            }
            canvas[y * width + x] = f64::from(index);
        }
    }

    PixelArray::new(height, width, 1, canvas)
}
