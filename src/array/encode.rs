//! Per-format array bodies and the debug dump.

use alloc::string::String;
use core::fmt::Write;

use enough::Stop;

use crate::decode::ImageRecord;
use crate::error::BitmapError;
use crate::pixel::nibble_row_bytes;

/// Index of the `i`th row to emit out of `count` stored rows.
fn row_index(i: usize, count: usize, reverse: bool) -> usize {
    if reverse { count - 1 - i } else { i }
}

/// Complement both nibbles of a 4-bit pixel pair.
pub(crate) fn invert_nibbles(byte: u8) -> u8 {
    let high = 15 - (byte >> 4);
    let low = 15 - (byte & 0x0f);
    (high << 4) + low
}

/// 1-bit body: one `0b` literal per stored byte, bits complemented.
pub(crate) fn write_mono_rows<W: Write>(
    rows: &[alloc::vec::Vec<u8>],
    reverse: bool,
    out: &mut W,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    for i in 0..rows.len() {
        if i % 16 == 0 {
            stop.check()?;
        }
        for byte in &rows[row_index(i, rows.len(), reverse)] {
            write!(out, "0b{:08b}, ", !byte)?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

/// 4-bit body: one decimal literal per byte, both nibbles complemented.
/// Only the first `row_len` bytes of each row are emitted.
pub(crate) fn write_nibble_rows<W: Write>(
    rows: &[alloc::vec::Vec<u8>],
    row_len: usize,
    reverse: bool,
    out: &mut W,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    for i in 0..rows.len() {
        if i % 16 == 0 {
            stop.check()?;
        }
        let row = &rows[row_index(i, rows.len(), reverse)];
        for &byte in row.iter().take(row_len) {
            write!(out, "{},\t", invert_nibbles(byte))?;
        }
        out.write_char('\n')?;
    }
    Ok(())
}

/// Render the stored rows as text for inspection.
///
/// 1-bit rows print every bit as `0`/`1` without inversion. 4-bit rows print
/// each pixel-carrying byte as its two nibble values.
pub fn dump_rows(record: &ImageRecord) -> Result<String, BitmapError> {
    if !record.image_data_read() {
        return Err(BitmapError::NotDecoded);
    }
    let format = record.pixel_format().ok_or(BitmapError::UnsupportedDepth {
        depth: record.header().depth.bits(),
    })?;

    let mut out = String::new();
    match format {
        crate::PixelFormat::Mono1 => {
            for row in record.rows() {
                for byte in row {
                    write!(out, "{byte:08b}")?;
                }
                out.push('\n');
            }
        }
        crate::PixelFormat::Indexed4 => {
            let row_len = nibble_row_bytes(record.width()) as usize;
            for row in record.rows() {
                for &byte in row.iter().take(row_len) {
                    write!(out, "{} {} ", byte >> 4, byte & 0x0f)?;
                }
                out.push('\n');
            }
        }
    }
    Ok(out)
}
