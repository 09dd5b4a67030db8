//! Color value types and the packed pixel layout used by the color cache.

/// Alpha value of a fully transparent pixel. Such pixels never contribute to a block color.
pub const ALPHA_TRANSPARENT: u8 = 0;
pub const ALPHA_OPAQUE: u8 = 255;

/// An 8 bit per channel RGBA color.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Returned for blocks that are not known.
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, ALPHA_TRANSPARENT);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, ALPHA_OPAQUE)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == ALPHA_TRANSPARENT
    }

    /// Packs the color as RGBA8888: red in the most significant byte, alpha in the least.
    pub fn pack(&self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Inverse of [`Rgba8::pack`].
    pub fn unpack(pixel: u32) -> Self {
        let [r, g, b, a] = pixel.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Converts to HSV, see [`rgb_to_hsv`].
    pub fn to_hsv(&self) -> Hsv8 {
        rgb_to_hsv(*self)
    }
}

impl From<image::Rgba<u8>> for Rgba8 {
    fn from(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }
}

/// A coarse HSV color. `h` is the hue in degrees truncated to 8 bits, so hues of 256 and above
/// wrap around. It is only good for banding, not for converting back.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Hsv8 {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Converts an RGB color to HSV. Alpha is ignored.
///
/// `v` is the largest channel, `s` is `(max - min) / max` scaled to `0..=255`, and `h` is the
/// hue angle normalized into `[0, 360)` and then truncated to 8 bits. Grays have `h = s = 0`.
pub fn rgb_to_hsv(rgb: Rgba8) -> Hsv8 {
    let r = rgb.r as f64;
    let g = rgb.g as f64;
    let b = rgb.b as f64;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return Hsv8 {
            h: 0,
            s: 0,
            v: max as u8,
        };
    }

    let saturation = (delta / max * 255.0).round().clamp(0.0, 255.0);

    let mut hue = if r == max {
        60.0 * (g - b) / delta
    } else if g == max {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };

    if hue < 0.0 {
        hue += 360.0;
    }
    if hue >= 360.0 {
        hue -= 360.0;
    }

    Hsv8 {
        h: (hue as u16) as u8,
        s: saturation as u8,
        v: max as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        let color = Rgba8::new(0x11, 0x22, 0x33, 0x44);
        assert_eq!(color.pack(), 0x1122_3344);
        assert_eq!(Rgba8::unpack(0x1122_3344), color);
        assert_eq!(Rgba8::TRANSPARENT.pack(), 0);
    }

    #[test]
    fn test_hsv_black() {
        let hsv = rgb_to_hsv(Rgba8::opaque(0, 0, 0));
        assert_eq!(hsv, Hsv8 { h: 0, s: 0, v: 0 });
    }

    #[test]
    fn test_hsv_red() {
        let hsv = rgb_to_hsv(Rgba8::opaque(255, 0, 0));
        assert_eq!(hsv, Hsv8 { h: 0, s: 255, v: 255 });
    }

    #[test]
    fn test_hsv_gray_has_no_hue() {
        let hsv = Rgba8::opaque(128, 128, 128).to_hsv();
        assert_eq!(hsv, Hsv8 { h: 0, s: 0, v: 128 });
    }

    #[test]
    fn test_hsv_hue_wraps_to_eight_bits() {
        // Green is 120 degrees, blue is 240, magenta is 300 which wraps to 44.
        assert_eq!(rgb_to_hsv(Rgba8::opaque(0, 255, 0)).h, 120);
        assert_eq!(rgb_to_hsv(Rgba8::opaque(0, 0, 255)).h, 240);
        assert_eq!(rgb_to_hsv(Rgba8::opaque(255, 0, 255)).h, 44);
    }

    #[test]
    fn test_hsv_half_saturation() {
        let hsv = rgb_to_hsv(Rgba8::opaque(200, 100, 100));
        assert_eq!(hsv.v, 200);
        assert_eq!(hsv.s, 128);
        assert_eq!(hsv.h, 0);
    }
}
