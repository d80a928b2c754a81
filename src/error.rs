use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding and array encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("unsupported color depth: {depth} bit")]
    UnsupportedDepth { depth: u16 },

    #[error("unsupported compression scheme: {code}")]
    UnsupportedCompression { code: u32 },

    #[error("unexpected end of input")]
    TruncatedStream,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("image data was not read, nothing to encode")]
    NotDecoded,

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[error("failed to format output")]
    Format(#[from] core::fmt::Error),

    #[error("cannot write output file {path}: {reason}")]
    OutputUnwritable { path: String, reason: String },
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
