//! Decode trace sink.
//!
//! The decoder reports every header field it reads, the palette size and
//! the row stride as [`TraceEvent`]s. Sinks only receive events; nothing
//! a sink does can change how a file decodes.

use crate::pixel::{BitDepth, Compression};

/// One observation made while decoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    Signature([u8; 2]),
    FileSize(u32),
    PixelDataOffset(u32),
    /// Absolute offset where the image header ends (DIB size + 14).
    HeaderSize(u32),
    Width(u32),
    Height(u32),
    Depth(BitDepth),
    Compression(Compression),
    ImageDataSize(u32),
    ColorsUsed(u32),
    ColorsImportant(u32),
    /// Palette entries skipped; `None` when the file has no palette.
    Palette(Option<u32>),
    RowStride(u32),
    /// The decode attempt finished.
    Finished { image_data_read: bool },
}

/// Receiver for [`TraceEvent`]s.
pub trait DecodeTrace {
    fn event(&mut self, event: TraceEvent);
}

/// Discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl DecodeTrace for NoTrace {
    fn event(&mut self, _event: TraceEvent) {}
}

/// Forwards events to the `log` crate at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;

impl DecodeTrace for LogTrace {
    fn event(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::Signature(sig) => log::debug!(
                target: "bmp2array::decode",
                "signature: {:?}",
                core::str::from_utf8(&sig).unwrap_or("??")
            ),
            TraceEvent::FileSize(v) => log::debug!(target: "bmp2array::decode", "file size: {v}"),
            TraceEvent::PixelDataOffset(v) => {
                log::debug!(target: "bmp2array::decode", "pixel data offset: {v}")
            }
            TraceEvent::HeaderSize(v) => log::debug!(target: "bmp2array::decode", "header size: {v}"),
            TraceEvent::Width(v) => log::debug!(target: "bmp2array::decode", "width: {v}"),
            TraceEvent::Height(v) => log::debug!(target: "bmp2array::decode", "height: {v}"),
            TraceEvent::Depth(d) => log::debug!(target: "bmp2array::decode", "depth: {}", d.bits()),
            TraceEvent::Compression(c) => {
                log::debug!(target: "bmp2array::decode", "compression: {c:?} ({})", c.code())
            }
            TraceEvent::ImageDataSize(v) => {
                log::debug!(target: "bmp2array::decode", "image data size: {v}")
            }
            TraceEvent::ColorsUsed(v) => log::debug!(target: "bmp2array::decode", "colors used: {v}"),
            TraceEvent::ColorsImportant(v) => {
                log::debug!(target: "bmp2array::decode", "colors important: {v}")
            }
            TraceEvent::Palette(Some(n)) => {
                log::debug!(target: "bmp2array::decode", "palette: {n} entries")
            }
            TraceEvent::Palette(None) => log::debug!(target: "bmp2array::decode", "palette: none"),
            TraceEvent::RowStride(v) => log::debug!(target: "bmp2array::decode", "row stride: {v}"),
            TraceEvent::Finished { image_data_read } => log::debug!(
                target: "bmp2array::decode",
                "decode finished, image data read: {image_data_read}"
            ),
        }
    }
}

/// Collects events in order. Handy in tests and for diagnostics output.
impl DecodeTrace for alloc::vec::Vec<TraceEvent> {
    fn event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
