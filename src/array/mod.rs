//! C array encoder.
//!
//! Turns a decoded [`ImageRecord`] into a `static const uint8_t` array
//! literal. 1-bit images become `0b` literals, 4-bit images become decimal
//! bytes; both complement the stored pixel values.

mod encode;

pub use encode::dump_rows;

use alloc::string::String;
use core::fmt::Write;

use enough::Stop;

use crate::decode::ImageRecord;
use crate::error::BitmapError;
use crate::pixel::{PixelFormat, nibble_row_bytes};

/// Row order for 4-bit output.
///
/// The legacy tool always emitted 4-bit rows last-stored-first and ignored
/// the reverse flag for that depth.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NibbleRowOrder {
    /// Last stored row first, whatever `reverse_rows` says.
    #[default]
    AlwaysReversed,
    /// Same ordering rule as 1-bit output.
    FollowReverseFlag,
}

/// Bytes emitted per 4-bit row.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NibbleStride {
    /// `ceil(width * 4 / 8)`: pixel bytes only, alignment padding dropped.
    #[default]
    Legacy,
    /// The on-disk row stride, padding included.
    Padded,
}

/// Builder for rendering an [`ImageRecord`] as a C array.
#[derive(Clone, Copy, Debug)]
pub struct ArrayRequest<'a> {
    name: &'a str,
    reverse_rows: bool,
    nibble_order: NibbleRowOrder,
    nibble_stride: NibbleStride,
}

impl Default for ArrayRequest<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ArrayRequest<'a> {
    pub fn new() -> Self {
        Self {
            name: "imgArray",
            reverse_rows: false,
            nibble_order: NibbleRowOrder::AlwaysReversed,
            nibble_stride: NibbleStride::Legacy,
        }
    }

    /// Identifier of the emitted array.
    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    /// Emit rows last-stored-first. For a bottom-up BMP that is top-down
    /// visual order.
    pub fn reverse_rows(mut self, reverse: bool) -> Self {
        self.reverse_rows = reverse;
        self
    }

    pub fn nibble_row_order(mut self, order: NibbleRowOrder) -> Self {
        self.nibble_order = order;
        self
    }

    pub fn nibble_stride(mut self, stride: NibbleStride) -> Self {
        self.nibble_stride = stride;
        self
    }

    /// Render the array into a new string.
    pub fn encode(&self, record: &ImageRecord, stop: impl Stop) -> Result<String, BitmapError> {
        let mut out = String::new();
        self.encode_into(record, &mut out, stop)?;
        Ok(out)
    }

    /// Render the array into `out`.
    ///
    /// Nothing is written when the record's image data was not read.
    pub fn encode_into<W: Write>(
        &self,
        record: &ImageRecord,
        out: &mut W,
        stop: impl Stop,
    ) -> Result<(), BitmapError> {
        if !record.decode_complete() || !record.image_data_read() {
            return Err(BitmapError::NotDecoded);
        }
        let format = record.pixel_format().ok_or(BitmapError::UnsupportedDepth {
            depth: record.header().depth.bits(),
        })?;

        write!(out, "static const uint8_t {}[] = \n{{\n", self.name)?;
        match format {
            PixelFormat::Mono1 => {
                encode::write_mono_rows(record.rows(), self.reverse_rows, out, &stop)?;
            }
            PixelFormat::Indexed4 => {
                let reverse = match self.nibble_order {
                    NibbleRowOrder::AlwaysReversed => true,
                    NibbleRowOrder::FollowReverseFlag => self.reverse_rows,
                };
                let row_len = match self.nibble_stride {
                    NibbleStride::Legacy => nibble_row_bytes(record.width()),
                    NibbleStride::Padded => record.header().row_stride,
                };
                encode::write_nibble_rows(record.rows(), row_len as usize, reverse, out, &stop)?;
            }
        }
        out.write_str("};")?;
        Ok(())
    }

    /// Render the array and write it to `path`.
    ///
    /// The whole array is rendered before the file is created, so a decode
    /// or encode failure never leaves a file behind.
    #[cfg(feature = "std")]
    pub fn write_file(
        &self,
        record: &ImageRecord,
        path: impl AsRef<std::path::Path>,
        stop: impl Stop,
    ) -> Result<(), BitmapError> {
        let text = self.encode(record, stop)?;
        let path = path.as_ref();
        std::fs::write(path, text).map_err(|err| BitmapError::OutputUnwritable {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}
