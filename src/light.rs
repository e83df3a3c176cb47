//! Distance shading for the renderer.

use crate::colors;
use crate::math::vec3::Vec3;

/// A point light that shades whole faces by how far they are from it.
///
/// Each RGB channel of a face is offset by
/// `(distance - reference_distance) * falloff`, where `distance` runs from the
/// light to the face's camera-space centroid, and clamped to `[0, ceiling]`.
/// Faces nearer than the reference distance darken; farther ones fade toward
/// the ceiling gray. Alpha is untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Camera-space position.
    pub position: Vec3,
    pub reference_distance: f32,
    /// Channel offset per unit of distance.
    pub falloff: f32,
    pub ceiling: u8,
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 100.0))
    }
}

impl PointLight {
    pub const DEFAULT_REFERENCE_DISTANCE: f32 = 120.0;
    pub const DEFAULT_FALLOFF: f32 = 2.0;
    pub const DEFAULT_CEILING: u8 = 200;

    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            reference_distance: Self::DEFAULT_REFERENCE_DISTANCE,
            falloff: Self::DEFAULT_FALLOFF,
            ceiling: Self::DEFAULT_CEILING,
        }
    }

    /// Channel offset for a face whose centroid is at `centroid`.
    pub fn offset(&self, centroid: Vec3) -> f32 {
        ((centroid - self.position).magnitude() - self.reference_distance) * self.falloff
    }

    /// Apply a face offset to an ARGB color.
    #[inline]
    pub fn shade(&self, color: u32, offset: f32) -> u32 {
        let [r, g, b, a] = colors::unpack_rgba(color);
        let ceiling = self.ceiling as f32;
        let channel = |c: u8| (c as f32 + offset).clamp(0.0, ceiling) as u8;
        colors::pack_rgba(channel(r), channel(g), channel(b), a)
    }
}
