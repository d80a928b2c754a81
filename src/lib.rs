//! # bmp2array
//!
//! Converts 1-bit and 4-bit Windows BMP images into C byte-array literals
//! for firmware and low-memory display drivers.
//!
//! ## Pipeline
//!
//! Decoding makes one forward pass over the file: file header, image
//! header, palette (skipped, never kept), then the padded pixel rows. The
//! result is an [`ImageRecord`] that keeps the raw rows in file order and
//! carries any decode error as a status instead of returning early, so
//! partially decoded headers stay inspectable.
//!
//! Encoding reads the record and emits `static const uint8_t imgArray[]`:
//! - **1-bit**: one `0b........` literal per stored byte, every bit
//!   complemented (stored 1 becomes 0), MSB first.
//! - **4-bit**: one decimal literal per byte, each nibble `n` replaced by
//!   `15 - n`.
//!
//! ## Supported Input
//!
//! - Uncompressed BMP with a BITMAPINFOHEADER or larger DIB header
//! - 1 and 4 bits per pixel
//!
//! ## Non-Goals
//!
//! - 8/16/24-bit depths (parsed, but rejected when pixel rows are requested)
//! - RLE, bitfields, JPEG or PNG payloads (rejected in the pixel phase)
//! - Palette interpretation
//!
//! ## Usage
//!
//! ```no_run
//! use bmp2array::{ArrayRequest, BitDepth, DecodeRequest};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! let record = DecodeRequest::new(data)
//!     .with_depth(BitDepth::One)
//!     .decode(Unstoppable);
//! if let Err(err) = record.status() {
//!     eprintln!("decode failed: {err}");
//! }
//!
//! let text = ArrayRequest::new()
//!     .reverse_rows(true)
//!     .encode(&record, Unstoppable)?;
//! println!("{text}");
//! # Ok::<(), bmp2array::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod limits;
mod pixel;

pub mod array;
pub mod trace;

mod bmp;
mod decode;

// Re-exports
pub use array::{ArrayRequest, NibbleRowOrder, NibbleStride, dump_rows};
pub use decode::{BmpHeader, DecodeRequest, ImageRecord};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;
pub use pixel::{BitDepth, Compression, PixelFormat, nibble_row_bytes};
pub use trace::{DecodeTrace, LogTrace, NoTrace, TraceEvent};

/// Decode BMP bytes with no depth expectation, limits or tracing.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> ImageRecord {
    DecodeRequest::new(data).decode(stop)
}

/// Encode a decoded record with default array options.
pub fn encode_array(
    record: &ImageRecord,
    reverse_rows: bool,
    stop: impl Stop,
) -> Result<alloc::string::String, BitmapError> {
    ArrayRequest::new()
        .reverse_rows(reverse_rows)
        .encode(record, stop)
}
