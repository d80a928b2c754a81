//! Sequential BMP decoder for 1-bit and 4-bit uncompressed DIBs.
//!
//! One forward pass: file header, image header, palette (skipped), pixel
//! rows. The cursor never moves backwards.

use alloc::vec::Vec;

use enough::Stop;

use crate::decode::ImageRecord;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{BitDepth, Compression, PixelFormat};
use crate::trace::{DecodeTrace, TraceEvent};

const FILE_HEADER_LEN: u32 = 14;
/// BITMAPINFOHEADER, the smallest DIB header whose fields we read.
const INFO_HEADER_LEN: u32 = 40;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let new_pos = self
            .pos
            .checked_add(n)
            .ok_or(BitmapError::TruncatedStream)?;
        if new_pos > self.data.len() {
            self.pos = self.data.len();
            return Err(BitmapError::TruncatedStream);
        }
        self.pos = new_pos;
        Ok(())
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        if n > self.remaining() {
            self.pos = self.data.len();
            return Err(BitmapError::TruncatedStream);
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_bytes(N)?);
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }
}

// ── Decoder state ───────────────────────────────────────────────────

struct BmpDecoderState<'a, 't> {
    bytes: Cursor<'a>,
    record: ImageRecord,
    trace: &'t mut dyn DecodeTrace,
}

/// Decode `data` into a record. Errors are stored on the record.
pub(crate) fn decode_record(
    data: &[u8],
    requested: Option<BitDepth>,
    limits: Option<&Limits>,
    trace: &mut dyn DecodeTrace,
    stop: &dyn Stop,
) -> ImageRecord {
    let mut dec = BmpDecoderState {
        bytes: Cursor::new(data),
        record: ImageRecord::empty(),
        trace,
    };
    let result = dec.run(requested, limits, stop);

    let BmpDecoderState {
        mut record, trace, ..
    } = dec;
    if let Err(err) = result {
        record.image_data_read = false;
        record.error = Some(err);
    }
    record.decode_complete = true;
    trace.event(TraceEvent::Finished {
        image_data_read: record.image_data_read,
    });
    record
}

impl BmpDecoderState<'_, '_> {
    fn run(
        &mut self,
        requested: Option<BitDepth>,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<(), BitmapError> {
        self.read_file_header()?;
        self.read_image_header()?;
        self.skip_palette()?;
        stop.check()?;
        self.read_pixel_rows(requested, limits, stop)
    }

    fn read_file_header(&mut self) -> Result<(), BitmapError> {
        let signature = self.bytes.read_fixed_bytes::<2>()?;
        self.record.header.signature = signature;
        self.trace.event(TraceEvent::Signature(signature));
        if &signature != b"BM" {
            log::warn!("unexpected BMP signature {signature:02x?}, decoding anyway");
        }

        let file_size = self.bytes.get_u32_le()?;
        self.record.header.file_size = file_size;
        self.trace.event(TraceEvent::FileSize(file_size));

        // Reserved (4 bytes)
        self.bytes.skip(4)?;

        let offset = self.bytes.get_u32_le()?;
        self.record.header.pixel_data_offset = offset;
        self.trace.event(TraceEvent::PixelDataOffset(offset));
        Ok(())
    }

    fn read_image_header(&mut self) -> Result<(), BitmapError> {
        let dib_size = self.bytes.get_u32_le()?;
        let header_size = dib_size.checked_add(FILE_HEADER_LEN).ok_or_else(|| {
            BitmapError::InvalidHeader(alloc::format!("DIB header size {dib_size} overflows"))
        })?;
        self.record.header.header_size = header_size;
        self.trace.event(TraceEvent::HeaderSize(header_size));
        if dib_size < INFO_HEADER_LEN {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "DIB header size {dib_size} is smaller than BITMAPINFOHEADER"
            )));
        }

        let width = self.bytes.get_u32_le()?;
        self.record.header.width = width;
        self.trace.event(TraceEvent::Width(width));

        let height = self.bytes.get_u32_le()?;
        self.record.header.height = height;
        self.trace.event(TraceEvent::Height(height));

        // Planes
        self.bytes.skip(2)?;

        let depth = BitDepth::from_bits(self.bytes.get_u16_le()?);
        self.record.header.depth = depth;
        self.trace.event(TraceEvent::Depth(depth));

        let compression = Compression::from_u32(self.bytes.get_u32_le()?);
        self.record.header.compression = compression;
        self.trace.event(TraceEvent::Compression(compression));

        let image_size = self.bytes.get_u32_le()?;
        self.record.header.image_data_size = image_size;
        self.trace.event(TraceEvent::ImageDataSize(image_size));

        // Horizontal and vertical resolution
        self.bytes.skip(8)?;

        let colors_used = self.bytes.get_u32_le()?;
        self.record.header.colors_used = colors_used;
        self.trace.event(TraceEvent::ColorsUsed(colors_used));

        let colors_important = self.bytes.get_u32_le()?;
        self.record.header.colors_important = colors_important;
        self.trace.event(TraceEvent::ColorsImportant(colors_important));

        // V4/V5 headers: masks, color space and ICC fields are not used.
        self.bytes.skip((dib_size - INFO_HEADER_LEN) as usize)?;

        self.record.header.has_palette = header_size != self.record.header.pixel_data_offset;

        if width == 0 {
            return Err(BitmapError::InvalidHeader("BMP width is zero".into()));
        }
        if height == 0 {
            return Err(BitmapError::InvalidHeader("BMP height is zero".into()));
        }
        Ok(())
    }

    /// Advance past the color table without keeping it.
    fn skip_palette(&mut self) -> Result<(), BitmapError> {
        let header = &self.record.header;
        if !header.has_palette {
            self.trace.event(TraceEvent::Palette(None));
            return Ok(());
        }
        let span = header
            .pixel_data_offset
            .checked_sub(header.header_size)
            .ok_or_else(|| {
                BitmapError::InvalidHeader(alloc::format!(
                    "pixel data offset {} lies inside the {}-byte header",
                    header.pixel_data_offset,
                    header.header_size
                ))
            })?;
        let entries = span / 4;
        self.trace.event(TraceEvent::Palette(Some(entries)));
        // BGRA entries, 4 bytes each. A trailing partial entry is not consumed.
        self.bytes.skip(entries as usize * 4)
    }

    fn read_pixel_rows(
        &mut self,
        requested: Option<BitDepth>,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<(), BitmapError> {
        let header = self.record.header;

        if let Some(requested) = requested {
            if PixelFormat::from_depth(requested).is_none() {
                return Err(BitmapError::UnsupportedDepth {
                    depth: requested.bits(),
                });
            }
            if requested != header.depth {
                log::warn!(
                    "requested {}-bit decode but header says {}-bit, using header depth",
                    requested.bits(),
                    header.depth.bits()
                );
            }
        }

        let format = PixelFormat::from_depth(header.depth).ok_or(BitmapError::UnsupportedDepth {
            depth: header.depth.bits(),
        })?;
        if header.compression != Compression::None {
            return Err(BitmapError::UnsupportedCompression {
                code: header.compression.code(),
            });
        }

        let stride = format.row_stride(header.width);
        self.record.header.row_stride = stride;
        self.trace.event(TraceEvent::RowStride(stride));

        if let Some(limits) = limits {
            limits.check(header.width, header.height)?;
            limits.check_memory(stride, header.height)?;
        }

        let stride = stride as usize;
        // Never reserve more rows than the input can hold.
        let available_rows = self.bytes.remaining() / stride;
        self.record.rows = Vec::with_capacity((header.height as usize).min(available_rows));

        for row in 0..header.height {
            if row % 16 == 0 {
                stop.check()?;
            }
            let bytes = self.bytes.read_bytes(stride)?;
            self.record.rows.push(bytes.to_vec());
        }

        self.record.image_data_read = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_reads_little_endian() {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xff];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.get_u16_le().unwrap(), 0x1234);
        assert_eq!(cursor.get_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn cursor_short_read_is_truncation() {
        let data = [1, 2, 3];
        let mut cursor = Cursor::new(&data);
        assert!(matches!(
            cursor.get_u32_le(),
            Err(BitmapError::TruncatedStream)
        ));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn cursor_skip_past_end() {
        let data = [0u8; 4];
        let mut cursor = Cursor::new(&data);
        cursor.skip(3).unwrap();
        assert!(matches!(cursor.skip(2), Err(BitmapError::TruncatedStream)));
        assert!(matches!(cursor.skip(usize::MAX), Err(BitmapError::TruncatedStream)));
    }
}
