/// Color depth field of the BMP image header.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 1 bit per pixel, two-color palette.
    One,
    /// 4 bits per pixel, 16-color palette.
    Four,
    Eight,
    Sixteen,
    TwentyFour,
    /// Any other value found in the header.
    Other(u16),
}

impl BitDepth {
    pub fn from_bits(bits: u16) -> Self {
        match bits {
            1 => Self::One,
            4 => Self::Four,
            8 => Self::Eight,
            16 => Self::Sixteen,
            24 => Self::TwentyFour,
            other => Self::Other(other),
        }
    }

    /// Bits per pixel as stored in the header.
    pub fn bits(self) -> u16 {
        match self {
            Self::One => 1,
            Self::Four => 4,
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::TwentyFour => 24,
            Self::Other(bits) => bits,
        }
    }
}

/// Compression field of the BMP image header.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    Rle8,
    Rle4,
    BitFields,
    Jpeg,
    Png,
    Unknown(u32),
}

impl Compression {
    pub fn from_u32(code: u32) -> Self {
        match code {
            0 => Self::None,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::BitFields,
            4 => Self::Jpeg,
            5 => Self::Png,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::BitFields => 3,
            Self::Jpeg => 4,
            Self::Png => 5,
            Self::Unknown(code) => code,
        }
    }
}

/// Pixel formats the row reader and array encoder understand.
///
/// Each variant owns its stride rule and its array encoding; adding a depth
/// means adding a variant here and an arm in the encoder.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 1 bit per pixel, MSB is the leftmost pixel.
    Mono1,
    /// 4 bits per pixel, high nibble is the leftmost pixel.
    Indexed4,
}

impl PixelFormat {
    /// Format for a header depth, or `None` if rows of that depth can't be read.
    pub fn from_depth(depth: BitDepth) -> Option<Self> {
        match depth {
            BitDepth::One => Some(Self::Mono1),
            BitDepth::Four => Some(Self::Indexed4),
            _ => None,
        }
    }

    pub fn depth(self) -> BitDepth {
        match self {
            Self::Mono1 => BitDepth::One,
            Self::Indexed4 => BitDepth::Four,
        }
    }

    /// Bytes one row occupies on disk, including padding to a 4-byte boundary.
    pub fn row_stride(self, width: u32) -> u32 {
        match self {
            Self::Mono1 => {
                let bits = u64::from(width);
                let rem = bits % 32;
                let padded = bits + if rem == 0 { 0 } else { 32 - rem };
                (padded / 8) as u32
            }
            Self::Indexed4 => {
                let bytes = (u64::from(width) * 4).div_ceil(8);
                let pad = 4 - bytes % 4;
                // A full word of padding means the row was already aligned.
                (bytes + if pad == 4 { 0 } else { pad }) as u32
            }
        }
    }
}

/// Bytes of a 4-bit row that carry pixels, rounded to whole bytes only.
///
/// This is the row length the legacy array output uses; it ignores the
/// 4-byte alignment of [`PixelFormat::row_stride`] and so differs from it
/// for every width where `ceil(width / 2)` is not a multiple of 4.
pub fn nibble_row_bytes(width: u32) -> u32 {
    let bits = u64::from(width) * 4;
    let extra = if bits % 8 == 4 { 1 } else { 0 };
    (bits / 8 + extra) as u32
}
