//! Raw I420 pictures
//!
//! Planar 4:2:0 layout: a full-resolution Y plane followed by U and V planes
//! at half resolution in each dimension (rounded up for odd sizes).

use bytes::Bytes;

/// A raw picture produced by capture or decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicYuv {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Presentation timestamp in milliseconds
    pub pts: u64,
    /// Packed Y, U and V planes
    pub data: Bytes,
}

impl PicYuv {
    /// Create a picture from packed I420 data
    pub fn new(width: u32, height: u32, pts: u64, data: Bytes) -> Self {
        Self {
            width,
            height,
            pts,
            data,
        }
    }

    /// Create a picture of a single flat color
    ///
    /// Dimensions too large to address produce a picture with no data, which
    /// [`is_valid`](Self::is_valid) rejects.
    pub fn filled(width: u32, height: u32, pts: u64, y: u8, u: u8, v: u8) -> Self {
        let Some((luma, chroma)) = Self::plane_sizes(width, height) else {
            return Self::new(width, height, pts, Bytes::new());
        };
        let mut data = Vec::with_capacity(luma + 2 * chroma);
        data.resize(luma, y);
        data.resize(luma + chroma, u);
        data.resize(luma + 2 * chroma, v);

        Self::new(width, height, pts, Bytes::from(data))
    }

    /// Luma and per-chroma plane sizes, `None` if the whole picture would
    /// not fit in `usize`
    fn plane_sizes(width: u32, height: u32) -> Option<(usize, usize)> {
        let luma = usize::try_from(width)
            .ok()?
            .checked_mul(usize::try_from(height).ok()?)?;
        let chroma = usize::try_from(width.div_ceil(2))
            .ok()?
            .checked_mul(usize::try_from(height.div_ceil(2)).ok()?)?;
        // The packed picture must be addressable as a whole
        chroma.checked_mul(2)?.checked_add(luma)?;
        Some((luma, chroma))
    }

    /// Byte length of a packed I420 picture of the given size
    ///
    /// Returns `None` if the length does not fit in `usize`.
    pub fn expected_len(width: u32, height: u32) -> Option<usize> {
        let (luma, chroma) = Self::plane_sizes(width, height)?;
        Some(luma + 2 * chroma)
    }

    /// Check that the data length matches the dimensions
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && Self::expected_len(self.width, self.height) == Some(self.data.len())
    }

    /// Luma plane
    ///
    /// Returns `None` if the data is shorter than the dimensions require.
    pub fn y(&self) -> Option<Bytes> {
        let (luma, _) = Self::plane_sizes(self.width, self.height)?;
        self.plane(0, luma)
    }

    /// Cb plane
    pub fn u(&self) -> Option<Bytes> {
        let (luma, chroma) = Self::plane_sizes(self.width, self.height)?;
        self.plane(luma, chroma)
    }

    /// Cr plane
    pub fn v(&self) -> Option<Bytes> {
        let (luma, chroma) = Self::plane_sizes(self.width, self.height)?;
        self.plane(luma + chroma, chroma)
    }

    fn plane(&self, offset: usize, len: usize) -> Option<Bytes> {
        let end = offset.checked_add(len)?;
        (end <= self.data.len()).then(|| self.data.slice(offset..end))
    }
}
