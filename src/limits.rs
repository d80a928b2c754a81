/// Resource limits for decoding.
///
/// All fields default to `None` (no limit). The row store grows on demand,
/// so these are the only bounds on how much a single file may allocate.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum bytes held by the pixel row store (stride * height).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), crate::BitmapError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        Ok(())
    }

    /// Check that the row store for `height` rows of `stride` bytes fits.
    pub(crate) fn check_memory(&self, stride: u32, height: u32) -> Result<(), crate::BitmapError> {
        if let Some(max_mem) = self.max_memory_bytes {
            let bytes = u64::from(stride) * u64::from(height);
            if bytes > max_mem {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "row store {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
