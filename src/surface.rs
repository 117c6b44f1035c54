//! Owned image surface — the pixel buffer contract the blur operates on.
//!
//! Models the subset of an image surface the blur entry point needs: a
//! pixel format, integer dimensions, a row stride, and the backing bytes.
//! Rows are stored top-down and contiguously; the buffer is owned, so the
//! usual raw-pointer attach/detach dance is unnecessary and all row access
//! is safe slicing.

/// Pixel layout of an [`ImageSurface`].
///
/// Matches the common image-surface formats: 32-bit pixels with or without
/// alpha, an 8-bit alpha mask, and a 1-bit alpha mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32 bits per pixel, alpha in the fourth byte.
    Argb32,
    /// 32 bits per pixel, fourth byte unused.
    Rgb24,
    /// 8-bit alpha mask, one byte per pixel.
    A8,
    /// 1-bit alpha mask, packed 32 pixels per word.
    A1,
}

impl PixelFormat {
    /// Minimal stride for a row of `width` pixels, padded to a 4-byte
    /// boundary the way image surfaces conventionally are.
    pub fn stride_for_width(self, width: u32) -> u32 {
        match self {
            PixelFormat::Argb32 | PixelFormat::Rgb24 => width * 4,
            PixelFormat::A8 => (width + 3) & !3,
            PixelFormat::A1 => (width + 31) / 32 * 4,
        }
    }
}

/// An owned, row-major pixel buffer with format and stride metadata.
pub struct ImageSurface {
    data: Vec<u8>,
    width: u32,
    height: u32,
    stride: u32,
    format: PixelFormat,
}

impl ImageSurface {
    /// Create a zero-filled surface with the minimal stride for its format.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Self {
        let stride = format.stride_for_width(width);
        Self {
            data: vec![0; stride as usize * height as usize],
            width,
            height,
            stride,
            format,
        }
    }

    /// Wrap caller-provided bytes as a surface.
    ///
    /// `stride` may exceed the minimal row width (padded rows); the buffer
    /// must hold at least `stride * height` bytes.
    pub fn from_data(
        data: Vec<u8>,
        format: PixelFormat,
        width: u32,
        height: u32,
        stride: u32,
    ) -> Result<Self, String> {
        let min_stride = format.stride_for_width(width);
        if stride < min_stride {
            return Err(format!(
                "stride {} too small for {} pixels (need at least {})",
                stride, width, min_stride
            ));
        }
        let needed = stride as usize * height as usize;
        if data.len() < needed {
            return Err(format!(
                "buffer of {} bytes too small for {}x{} surface with stride {} (need {})",
                data.len(),
                width,
                height,
                stride,
                needed
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Full backing buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Full backing buffer, mutable.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The `stride` bytes of row `y`.
    pub fn row_slice(&self, y: u32) -> &[u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y as usize * self.stride as usize;
        &self.data[start..start + self.stride as usize]
    }

    /// The `stride` bytes of row `y`, mutable.
    pub fn row_slice_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y as usize * self.stride as usize;
        &mut self.data[start..start + self.stride as usize]
    }

    /// Consume the surface, returning the backing buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_for_width() {
        assert_eq!(PixelFormat::Argb32.stride_for_width(10), 40);
        assert_eq!(PixelFormat::Rgb24.stride_for_width(7), 28);
        assert_eq!(PixelFormat::A8.stride_for_width(5), 8);
        assert_eq!(PixelFormat::A8.stride_for_width(8), 8);
        assert_eq!(PixelFormat::A1.stride_for_width(10), 4);
        assert_eq!(PixelFormat::A1.stride_for_width(33), 8);
    }

    #[test]
    fn test_new_allocates_zeroed() {
        let s = ImageSurface::new(PixelFormat::Argb32, 10, 4);
        assert_eq!(s.width(), 10);
        assert_eq!(s.height(), 4);
        assert_eq!(s.stride(), 40);
        assert_eq!(s.data().len(), 160);
        assert!(s.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_data_rejects_short_buffer() {
        let r = ImageSurface::from_data(vec![0; 100], PixelFormat::Argb32, 10, 4, 40);
        assert!(r.is_err());
    }

    #[test]
    fn test_from_data_rejects_narrow_stride() {
        let r = ImageSurface::from_data(vec![0; 160], PixelFormat::Argb32, 10, 4, 32);
        assert!(r.is_err());
    }

    #[test]
    fn test_from_data_accepts_padded_stride() {
        let s = ImageSurface::from_data(vec![0; 44 * 4], PixelFormat::Argb32, 10, 4, 44).unwrap();
        assert_eq!(s.stride(), 44);
    }

    #[test]
    fn test_row_slice_write_read() {
        let mut s = ImageSurface::new(PixelFormat::Argb32, 5, 3);
        s.row_slice_mut(1)[0] = 42;
        s.row_slice_mut(1)[19] = 99;
        assert_eq!(s.row_slice(1)[0], 42);
        assert_eq!(s.row_slice(1)[19], 99);
        assert_eq!(s.row_slice(0)[0], 0);
        assert_eq!(s.row_slice(2)[0], 0);
    }

    #[test]
    fn test_into_data_round_trip() {
        let mut s = ImageSurface::new(PixelFormat::A8, 4, 2);
        s.row_slice_mut(0)[0] = 7;
        let data = s.into_data();
        assert_eq!(data.len(), 8);
        assert_eq!(data[0], 7);
    }
}
