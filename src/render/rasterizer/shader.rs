//! Per-pixel attribute interpolation and texture sampling.
//!
//! The rasterizer handles coverage (bounding box, barycentric weights,
//! inside test). The shader turns the weights of a covered pixel into a
//! depth and a color.
//!
//! Both depth and UV are interpolated linearly in screen space. This is not
//! perspective-correct: textures on steeply receding triangles will swim.

use super::{interpolate, ProjectedTriangle};
use crate::light::PointLight;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::texture::Texture;

/// Samples a texture at interpolated UV coordinates.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
    depths: [f32; 3],
    centroid: Vec3,
    /// Light and this triangle's offset, computed once per triangle.
    light: Option<(&'a PointLight, f32)>,
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, triangle: &ProjectedTriangle) -> Self {
        Self {
            texture,
            uvs: triangle.uvs,
            depths: triangle.points.map(|p| p.z),
            centroid: triangle.centroid,
            light: None,
        }
    }

    /// Shade every sample of the triangle by its distance to `light`.
    pub fn with_light(mut self, light: Option<&'a PointLight>) -> Self {
        self.light = light.map(|l| (l, l.offset(self.centroid)));
        self
    }

    /// Interpolated view depth.
    #[inline]
    pub fn depth(&self, lambda: [f32; 3]) -> f32 {
        interpolate(self.depths, lambda)
    }

    /// Interpolate UV coordinates using barycentric weights
    #[inline]
    pub fn interpolate_uv(&self, lambda: [f32; 3]) -> Vec2 {
        Vec2::new(
            interpolate(self.uvs.map(|uv| uv.x), lambda),
            interpolate(self.uvs.map(|uv| uv.y), lambda),
        )
    }

    /// Nearest-neighbor texture color.
    #[inline]
    pub fn shade(&self, lambda: [f32; 3]) -> u32 {
        let uv = self.interpolate_uv(lambda);
        let color = self.texture.sample(uv.x, uv.y);
        match self.light {
            Some((light, offset)) => light.shade(color, offset),
            None => color,
        }
    }
}
