//! Triangle rasterization.
//!
//! A [`ProjectedTriangle`] is the hand-off between the transform/projection
//! stage and the rasterizer: three screen-space points that keep their
//! view-space depth in `z`, plus the three UVs.
//!
//! Available algorithms:
//! - [`EdgeFunctionRasterizer`]: Bounding box iteration with barycentric tests

mod edgefunction;
mod shader;

pub use edgefunction::EdgeFunctionRasterizer;
pub use shader::TextureShader;

use super::framebuffer::FrameBuffer;
use crate::light::PointLight;
use crate::math::{Vec2, Vec3};
use crate::texture::Texture;

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedTriangle {
    /// Screen x, screen y, view depth.
    pub points: [Vec3; 3],
    pub uvs: [Vec2; 3],
    /// Smallest of the three view depths.
    pub min_depth: f32,
    /// Index of the model this triangle came from within the render call.
    pub source: usize,
    /// Camera-space centroid, used for distance shading.
    pub centroid: Vec3,
}

impl ProjectedTriangle {
    pub fn new(points: [Vec3; 3], uvs: [Vec2; 3], source: usize) -> Self {
        let min_depth = points[0].z.min(points[1].z).min(points[2].z);
        Self {
            points,
            uvs,
            min_depth,
            source,
            centroid: Vec3::ZERO,
        }
    }

    pub fn with_centroid(mut self, centroid: Vec3) -> Self {
        self.centroid = centroid;
        self
    }

    /// The 2D screen positions.
    pub fn screen_points(&self) -> [Vec2; 3] {
        self.points.map(|p| Vec2::new(p.x, p.y))
    }
}

/// How a fragment interacts with the depth buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthTest {
    /// Write only when strictly nearer than the stored depth, then store it.
    #[default]
    Less,
    /// Always overwrite color; depth buffer untouched. Used for painter's order.
    Always,
}

/// Barycentric weights of `p` with respect to triangle `(a, b, c)`.
///
/// Each weight is the signed area of the sub-triangle opposite its vertex,
/// divided by the signed area of the whole triangle. Returns `None` when the
/// triangle is degenerate (zero area).
#[inline]
pub fn barycentric(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Option<[f32; 3]> {
    let area = (b - a).cross(c - a);
    if area == 0.0 {
        return None;
    }
    Some([
        (b - p).cross(c - p) / area,
        (c - p).cross(a - p) / area,
        (a - p).cross(b - p) / area,
    ])
}

/// Point with barycentric weights `lambda` in triangle `(a, b, c)`.
#[inline]
pub fn from_barycentric(a: Vec2, b: Vec2, c: Vec2, lambda: [f32; 3]) -> Vec2 {
    a * lambda[0] + b * lambda[1] + c * lambda[2]
}

/// Weighted sum of three scalars.
#[inline]
pub fn interpolate(values: [f32; 3], lambda: [f32; 3]) -> f32 {
    lambda[0] * values[0] + lambda[1] * values[1] + lambda[2] * values[2]
}

/// Trait for triangle rasterization algorithms.
///
/// Implementors define how a projected triangle is filled into a pixel
/// buffer, with texture sampling and the requested depth behavior.
pub trait Rasterizer {
    /// Fill a triangle into the frame buffer.
    ///
    /// # Arguments
    /// * `triangle` - The triangle to rasterize
    /// * `texture` - Texture sampled at the interpolated UVs
    /// * `light` - Optional distance shading applied to every sample
    /// * `buffer` - The frame buffer to draw into
    /// * `depth_test` - Depth buffer behavior
    ///
    /// # Returns
    /// The number of pixels written.
    fn fill_triangle(
        &self,
        triangle: &ProjectedTriangle,
        texture: &Texture,
        light: Option<&PointLight>,
        buffer: &mut FrameBuffer,
        depth_test: DepthTest,
    ) -> usize;
}
