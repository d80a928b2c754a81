use alloc::vec::Vec;

use enough::Stop;

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{BitDepth, Compression, PixelFormat};
use crate::trace::{DecodeTrace, NoTrace};

/// Header fields of a decoded BMP, as stored on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    /// File tag, normally `BM`. Recorded, not validated.
    pub signature: [u8; 2],
    pub file_size: u32,
    pub pixel_data_offset: u32,
    /// Absolute offset where the image header ends (DIB header size + 14).
    pub header_size: u32,
    pub width: u32,
    /// Row count. The sign bit of a top-down BMP is not interpreted.
    pub height: u32,
    pub depth: BitDepth,
    pub compression: Compression,
    pub image_data_size: u32,
    pub colors_used: u32,
    pub colors_important: u32,
    /// Bytes exist between the end of the header and the pixel data.
    pub has_palette: bool,
    /// Bytes one stored row occupies, padding included. Zero until the
    /// pixel phase starts.
    pub row_stride: u32,
}

impl Default for BmpHeader {
    fn default() -> Self {
        Self {
            signature: [0; 2],
            file_size: 0,
            pixel_data_offset: 0,
            header_size: 0,
            width: 0,
            height: 0,
            depth: BitDepth::Other(0),
            compression: Compression::None,
            image_data_size: 0,
            colors_used: 0,
            colors_important: 0,
            has_palette: false,
            row_stride: 0,
        }
    }
}

/// Result of one decode attempt.
///
/// A failed decode still yields a record: header fields and rows read
/// before the failure stay available, and [`status`](Self::status) carries
/// the error. Rows are kept in file order, so for a bottom-up BMP the last
/// row is the visual top.
#[derive(Debug)]
pub struct ImageRecord {
    pub(crate) header: BmpHeader,
    pub(crate) rows: Vec<Vec<u8>>,
    pub(crate) image_data_read: bool,
    pub(crate) decode_complete: bool,
    pub(crate) error: Option<BitmapError>,
}

impl ImageRecord {
    pub(crate) fn empty() -> Self {
        Self {
            header: BmpHeader::default(),
            rows: Vec::new(),
            image_data_read: false,
            decode_complete: false,
            error: None,
        }
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    /// Stored pixel rows, each `row_stride` bytes, in file order.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// Pixel format of the rows, if the header depth is one we can read.
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        PixelFormat::from_depth(self.header.depth)
    }

    /// Every row was read without running out of input.
    pub fn image_data_read(&self) -> bool {
        self.image_data_read
    }

    /// The decode attempt ran to its end, successfully or not.
    pub fn decode_complete(&self) -> bool {
        self.decode_complete
    }

    /// `Ok` if the image decoded, otherwise the error that stopped it.
    pub fn status(&self) -> Result<(), &BitmapError> {
        match &self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Convert to a `Result`, dropping partial state on failure.
    pub fn into_result(mut self) -> Result<Self, BitmapError> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// Builder for decoding a BMP byte buffer into an [`ImageRecord`].
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    depth: Option<BitDepth>,
    limits: Option<&'a Limits>,
    trace: Option<&'a mut dyn DecodeTrace>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            depth: None,
            limits: None,
            trace: None,
        }
    }

    /// Depth the caller expects. Must be one the row reader supports; the
    /// header's own depth still decides how rows are read.
    pub fn with_depth(mut self, depth: BitDepth) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_trace(mut self, trace: &'a mut dyn DecodeTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Run the decode. Always returns a completed record; check
    /// [`ImageRecord::status`] for the outcome.
    pub fn decode(self, stop: impl Stop) -> ImageRecord {
        let mut no_trace = NoTrace;
        let trace: &mut dyn DecodeTrace = match self.trace {
            Some(trace) => trace,
            None => &mut no_trace,
        };
        crate::bmp::decode(self.data, self.depth, self.limits, trace, &stop)
    }
}
