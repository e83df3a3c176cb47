//! Small value-type vector math used by the pipeline.

pub mod vec2;
pub mod vec3;

pub use vec2::Vec2;
pub use vec3::Vec3;

/// Rotates `point` about the origin by `angles` (radians), X then Y then Z.
///
/// Pure: the input is never modified.
#[inline]
pub fn rotate(point: Vec3, angles: Vec3) -> Vec3 {
    point.rotated(angles)
}
