//! Pixel requantization from RGBA8888 to LVGL's ARGB8565 layout
//!
//! LVGL's `LV_IMG_CF_TRUE_COLOR_ALPHA` format (with `LV_COLOR_DEPTH 16`)
//! stores every pixel as three bytes:
//!
//! | byte | contents                         |
//! |------|----------------------------------|
//! | 0    | alpha, unchanged                 |
//! | 1    | RGB565 high byte (`RRRRRGGG`)    |
//! | 2    | RGB565 low byte (`GGGBBBBB`)     |
//!
//! The conversion truncates each color channel to its top bits, so it is
//! lossy. Feeding the packed bytes back in as if they were a fresh RGBA pixel
//! does not reproduce them: the three bytes are not channel values, and
//! repacking them reinterprets alpha as red, and so on. Only
//! [`PackedPixel::expand`] followed by [`PackedPixel::from_rgba`] is a
//! fixed point.

use image::Rgba;

/// Number of bytes emitted per pixel.
pub const BYTES_PER_PIXEL: usize = 3;

/// Pack 8-bit red, green and blue channels into a 16-bit RGB565 value.
///
/// # Examples
///
/// ```
/// use lvsprite::color::rgb565;
///
/// assert_eq!(rgb565(255, 0, 0), 0xF800);
/// assert_eq!(rgb565(0, 255, 0), 0x07E0);
/// assert_eq!(rgb565(0, 0, 255), 0x001F);
/// ```
#[inline]
pub fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// A single ARGB8565 pixel in emission order: `[alpha, rgb565_hi, rgb565_lo]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedPixel(pub [u8; BYTES_PER_PIXEL]);

impl PackedPixel {
    /// Requantize a decoded RGBA pixel.
    ///
    /// Total over all inputs; every channel is already bounded to 8 bits.
    ///
    /// ```
    /// use image::Rgba;
    /// use lvsprite::color::PackedPixel;
    ///
    /// let packed = PackedPixel::from_rgba(Rgba([0, 255, 0, 128]));
    /// assert_eq!(packed.bytes(), [0x80, 0x07, 0xE0]);
    /// ```
    #[inline]
    pub fn from_rgba(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        let [hi, lo] = rgb565(r, g, b).to_be_bytes();
        Self([a, hi, lo])
    }

    /// The three bytes in emission order.
    pub fn bytes(&self) -> [u8; BYTES_PER_PIXEL] {
        self.0
    }

    pub fn alpha(&self) -> u8 {
        self.0[0]
    }

    /// The packed 16-bit color.
    pub fn rgb565(&self) -> u16 {
        u16::from_be_bytes([self.0[1], self.0[2]])
    }

    /// Widen back to RGBA8888 by replicating the high bits into the low bits.
    ///
    /// Used for previews; it cannot recover the bits dropped by packing.
    pub fn expand(&self) -> Rgba<u8> {
        let c = self.rgb565();
        let r5 = ((c >> 11) & 0x1F) as u8;
        let g6 = ((c >> 5) & 0x3F) as u8;
        let b5 = (c & 0x1F) as u8;
        Rgba([(r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2), self.alpha()])
    }
}

impl From<Rgba<u8>> for PackedPixel {
    fn from(pixel: Rgba<u8>) -> Self {
        Self::from_rgba(pixel)
    }
}
