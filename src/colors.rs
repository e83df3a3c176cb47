//! Packed ARGB8888 colors.
//!
//! All pixel storage in the crate (textures and output rasters) uses one
//! `u32` per pixel laid out as `0xAARRGGBB`.

pub const BACKGROUND: u32 = 0xFFFFFFFF;
pub const BLACK: u32 = 0xFF000000;
/// Solid color used when a model has no texture bound.
pub const PLACEHOLDER: u32 = 0xFFC87D82;

/// Pack 8-bit RGBA channels into ARGB8888.
#[inline]
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Opaque color from 8-bit RGB channels.
#[inline]
pub const fn from_rgb(r: u8, g: u8, b: u8) -> u32 {
    pack_rgba(r, g, b, 0xFF)
}

/// Split ARGB8888 into `[r, g, b, a]`.
#[inline]
pub const fn unpack_rgba(color: u32) -> [u8; 4] {
    [
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
        (color >> 24) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack() {
        let c = pack_rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c, 0x78123456);
        assert_eq!(unpack_rgba(c), [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(from_rgb(200, 125, 130), PLACEHOLDER);
        assert_eq!(unpack_rgba(BLACK)[3], 0xFF);
    }
}
