use std::fmt;
use std::path::Path;

use image::error::{ParameterError, ParameterErrorKind};
use log::{error, info};

use crate::colors;

/// Errors from building a texture out of raw pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// Width or height is zero.
    EmptyDimensions { width: u32, height: u32 },
    /// The pixel slice does not hold `width * height` entries.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::EmptyDimensions { width, height } => {
                write!(f, "texture dimensions must be non-zero, got {width}x{height}")
            }
            TextureError::SizeMismatch { expected, actual } => {
                write!(f, "expected {expected} texels, got {actual}")
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// An immutable 2D grid of ARGB colors used for texture mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Vec<u32>, // The pixel data of the texture in ARGB format, row-major, top row first.
    width: u32,     // The width of the texture in pixels.
    height: u32,    // The height of the texture in pixels.
}

impl Default for Texture {
    /// 1x1 placeholder used when a model has no texture bound.
    fn default() -> Self {
        Self::solid(colors::PLACEHOLDER)
    }
}

impl Texture {
    // Load a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let texture = Self::from_image(&image::open(path.as_ref())?.to_rgba8())?;
        info!(
            "Loaded texture {} ({}x{})",
            path.as_ref().display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Convert decoded RGBA8 pixels. Empty images are rejected like
    /// [`Texture::from_pixels`] rejects them.
    pub fn from_image(img: &image::RgbaImage) -> Result<Self, image::ImageError> {
        let (width, height) = img.dimensions();

        // Convert RGBA bytes to ARGB u32
        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                colors::pack_rgba(r, g, b, a)
            })
            .collect();

        Self::from_pixels(width, height, data).map_err(|e| {
            image::ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::Generic(
                e.to_string(),
            )))
        })
    }

    /// Build a texture from row-major ARGB texels.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A 1x1 texture of a single color.
    pub fn solid(color: u32) -> Self {
        Self {
            data: vec![color],
            width: 1,
            height: 1,
        }
    }

    /// Texel at integer coordinates.
    ///
    /// # Panics
    /// Out-of-range coordinates are a caller bug (sampling clamps before
    /// calling this), so they abort instead of returning a fallback color.
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            error!(
                "texel ({}, {}) outside {}x{} texture",
                x, y, self.width, self.height
            );
            panic!(
                "texel ({x}, {y}) outside {}x{} texture",
                self.width, self.height
            );
        }
        self.data[(y * self.width + x) as usize]
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// # UV Coordinate Convention
    /// - UV (0,0) is the first texel of the first row, (1,1) the last texel
    ///   of the last row. No V flip is applied.
    ///
    /// # Clamping
    /// UVs are scaled by the texture size and clamped into
    /// `[0, width-1] x [0, height-1]` before truncation, so any input
    /// (including out-of-range or NaN) lands on a valid texel.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;

        // `as u32` saturates and maps NaN to 0
        let x = (u * self.width as f32).clamp(0.0, max_x) as u32;
        let y = (v * self.height as f32).clamp(0.0, max_y) as u32;

        self.texel(x, y)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Texture {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| y * 1000 + x))
            .collect();
        Texture::from_pixels(width, height, data).unwrap()
    }

    #[test]
    fn corners_map_to_first_and_last_texel() {
        let tex = gradient(4, 3);
        assert_eq!(tex.sample(0.0, 0.0), tex.texel(0, 0));
        assert_eq!(tex.sample(1.0, 1.0), tex.texel(3, 2));
    }

    #[test]
    fn out_of_range_uvs_are_clamped() {
        let tex = gradient(4, 3);
        assert_eq!(tex.sample(-5.0, -0.1), tex.texel(0, 0));
        assert_eq!(tex.sample(7.0, 1.5), tex.texel(3, 2));
        assert_eq!(tex.sample(f32::NAN, f32::INFINITY), tex.texel(0, 2));
    }

    #[test]
    fn nearest_neighbor_truncates() {
        let tex = gradient(4, 1);
        assert_eq!(tex.sample(0.24, 0.0), 0);
        assert_eq!(tex.sample(0.26, 0.0), 1);
        assert_eq!(tex.sample(0.99, 0.0), 3);
    }

    #[test]
    fn default_is_one_by_one_placeholder() {
        let tex = Texture::default();
        assert_eq!((tex.width(), tex.height()), (1, 1));
        assert_eq!(tex.sample(0.5, 0.5), colors::PLACEHOLDER);
    }

    #[test]
    fn from_pixels_validates() {
        assert_eq!(
            Texture::from_pixels(0, 4, vec![]),
            Err(TextureError::EmptyDimensions {
                width: 0,
                height: 4
            })
        );
        assert_eq!(
            Texture::from_pixels(2, 2, vec![0; 3]),
            Err(TextureError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn empty_decoded_image_is_rejected() {
        assert!(Texture::from_image(&image::RgbaImage::new(0, 0)).is_err());

        let img = image::RgbaImage::from_pixel(2, 1, image::Rgba([200, 125, 130, 255]));
        let tex = Texture::from_image(&img).unwrap();
        assert_eq!((tex.width(), tex.height()), (2, 1));
        assert_eq!(tex.sample(0.9, 0.0), colors::PLACEHOLDER);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 texture")]
    fn texel_out_of_bounds_is_fatal() {
        gradient(2, 2).texel(2, 0);
    }
}
