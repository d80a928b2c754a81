//! BMP decoding (internal).
//!
//! Use [`crate::DecodeRequest`] or [`crate::decode_bmp`].

mod decode;

use crate::decode::ImageRecord;
use crate::limits::Limits;
use crate::pixel::BitDepth;
use crate::trace::DecodeTrace;
use enough::Stop;

/// Decode BMP data into a completed [`ImageRecord`].
pub(crate) fn decode(
    data: &[u8],
    requested: Option<BitDepth>,
    limits: Option<&Limits>,
    trace: &mut dyn DecodeTrace,
    stop: &dyn Stop,
) -> ImageRecord {
    decode::decode_record(data, requested, limits, trace, stop)
}
