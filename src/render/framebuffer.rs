//! Output raster, depth buffer, and the borrowed view the rasterizer writes through.
//!
//! The [`Raster`] belongs to the caller and persists between frames; the
//! [`DepthBuffer`] belongs to the renderer and is reset every frame. During a
//! render call both are lent to the rasterizer as a single [`FrameBuffer`].
//!
//! # Depth Buffer
//!
//! Stores view-space depth (camera-space Z) per pixel. Smaller is nearer;
//! the cleared value is `+inf`, so the first fragment at any pixel passes.

use std::path::Path;

use crate::colors;

/// Caller-owned ARGB8888 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl Raster {
    /// A raster filled with [`colors::BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![colors::BACKGROUND; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Raw ARGB8888 bytes in native endianness, for handing to a display layer.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding or invalid bit patterns, u8 has alignment 1,
        // and the byte length covers exactly the borrowed pixel storage.
        unsafe {
            std::slice::from_raw_parts(
                self.pixels.as_ptr() as *const u8,
                self.pixels.len() * std::mem::size_of::<u32>(),
            )
        }
    }

    /// Convert to an RGBA image.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(colors::unpack_rgba(self.pixels[(y * self.width + x) as usize]))
        })
    }

    /// Write to an image file; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.to_image().save(path)
    }
}

/// Per-pixel nearest depth written so far.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![f32::INFINITY; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocates only when the dimensions change. Contents are undefined
    /// until the next [`DepthBuffer::reset`].
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            self.depths = vec![f32::INFINITY; width as usize * height as usize];
            self.width = width;
            self.height = height;
        }
    }

    /// Clear every entry to `+inf` for a new frame.
    pub fn reset(&mut self) {
        self.depths.fill(f32::INFINITY);
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depths[(y * self.width + x) as usize])
        } else {
            None
        }
    }
}

impl Default for DepthBuffer {
    fn default() -> Self {
        DepthBuffer::new(0, 0)
    }
}

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's created for the
/// duration of one frame's rasterization.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    ///
    /// # Panics
    /// Panics (in debug builds) if buffer lengths don't match width * height
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f32],
        width: u32,
        height: u32,
    ) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            width as usize * height as usize,
            "Color buffer size doesn't match dimensions"
        );
        debug_assert_eq!(
            depth_buffer.len(),
            width as usize * height as usize,
            "Depth buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    /// Borrow a caller's raster together with the renderer's depth buffer.
    pub fn from_parts(raster: &'a mut Raster, depth: &'a mut DepthBuffer) -> Self {
        let (width, height) = (raster.width, raster.height);
        Self::new(&mut raster.pixels, &mut depth.depths, width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Depth test without writing. True when `depth` is strictly nearer than
    /// the stored value.
    #[inline]
    pub fn passes_depth(&self, x: i32, y: i32, depth: f32) -> bool {
        self.index(x, y)
            .is_some_and(|idx| depth < self.depth_buffer[idx])
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is strictly less than the stored
    /// depth. Silently ignores out-of-bounds coordinates. Returns whether the
    /// pixel was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth_buffer[idx] => {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// Set a pixel without depth testing. Returns whether (x, y) was in bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.color_buffer[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }
}
