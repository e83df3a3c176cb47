//! Model space to screen space.
//!
//! For each vertex: local rotation, translation by `model - camera`,
//! camera yaw then pitch, then the perspective divide
//!
//! ```text
//! screen_x =  (x * Px) / (Px + z) + width / 2
//! screen_y = -(y * Py) / (Py + z) + height / 2
//! ```
//!
//! Camera-space `z` is kept as the vertex's view depth. There is no geometric
//! near-plane clipping: a triangle with any vertex at or behind the camera is
//! dropped whole, which makes geometry pop out as it crosses the camera plane.

use std::fmt;

use super::rasterizer::ProjectedTriangle;
use crate::camera::Camera;
use crate::math::vec3::Vec3;
use crate::mesh::Triangle;
use crate::transform::Transform;

/// Why a triangle was not handed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Smallest view depth is `<= 0` (or not a number).
    BehindCamera,
    /// A vertex hit `P + z == 0`, so it has no finite screen position.
    DegenerateProjection,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::BehindCamera => write!(f, "behind camera"),
            Rejection::DegenerateProjection => write!(f, "degenerate projection"),
        }
    }
}

/// Per-frame transform and projection constants.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    camera: Camera,
    focal_x: f32,
    focal_y: f32,
    half_width: f32,
    half_height: f32,
}

impl Projector {
    /// Derive the frame's projection factors for a raster of the given size.
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        let (focal_x, focal_y) = camera.projection().focal_lengths(width, height);
        Self {
            camera: *camera,
            focal_x,
            focal_y,
            half_width: width as f32 / 2.0,
            half_height: height as f32 / 2.0,
        }
    }

    /// Model-space position to camera space.
    #[inline]
    pub fn to_view(&self, transform: &Transform, local: Vec3) -> Vec3 {
        self.camera.to_view(transform.apply(local))
    }

    /// Camera-space point to (screen x, screen y, view depth).
    /// `None` when either denominator is zero.
    #[inline]
    pub fn project_point(&self, view: Vec3) -> Option<Vec3> {
        let denom_x = self.focal_x + view.z;
        let denom_y = self.focal_y + view.z;
        if denom_x == 0.0 || denom_y == 0.0 {
            return None;
        }
        Some(Vec3::new(
            (view.x * self.focal_x) / denom_x + self.half_width,
            -(view.y * self.focal_y) / denom_y + self.half_height,
            view.z,
        ))
    }

    /// Transform and project one triangle of a model.
    pub fn project_triangle(
        &self,
        transform: &Transform,
        triangle: &Triangle,
        source: usize,
    ) -> Result<ProjectedTriangle, Rejection> {
        let view = triangle.positions().map(|p| self.to_view(transform, p));

        let min_depth = view[0].z.min(view[1].z).min(view[2].z);
        // Written so NaN also rejects
        if !(min_depth > 0.0) {
            return Err(Rejection::BehindCamera);
        }

        let mut points = [Vec3::ZERO; 3];
        for (point, v) in points.iter_mut().zip(view) {
            *point = self
                .project_point(v)
                .ok_or(Rejection::DegenerateProjection)?;
        }

        let centroid = (view[0] + view[1] + view[2]) / 3.0;
        Ok(ProjectedTriangle::new(points, triangle.uvs(), source).with_centroid(centroid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::projection::Projection;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, Projection::FocalLength(100.0))
    }

    fn tri(z: [f32; 3]) -> Triangle {
        Triangle::untextured([
            Vec3::new(-1.0, -1.0, z[0]),
            Vec3::new(1.0, -1.0, z[1]),
            Vec3::new(0.0, 1.0, z[2]),
        ])
    }

    #[test]
    fn origin_offset_projects_to_center() {
        let p = Projector::new(&camera(), 200, 100);
        let s = p.project_point(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        assert_eq!(s, Vec3::new(100.0, 50.0, 5.0));
        // Pure function of its inputs
        assert_eq!(p.project_point(Vec3::new(0.0, 0.0, 5.0)), Some(s));
    }

    #[test]
    fn weak_perspective_formula() {
        let p = Projector::new(&camera(), 100, 100);
        let s = p.project_point(Vec3::new(10.0, 10.0, 100.0)).unwrap();
        // 10 * 100 / 200 = 5, y is flipped
        assert_relative_eq!(s.x, 55.0);
        assert_relative_eq!(s.y, 45.0);
        assert_eq!(s.z, 100.0);
    }

    #[test]
    fn zero_denominator_is_none() {
        let p = Projector::new(&camera(), 100, 100);
        assert_eq!(p.project_point(Vec3::new(1.0, 1.0, -100.0)), None);
    }

    #[test]
    fn behind_camera_is_rejected() {
        let p = Projector::new(&camera(), 100, 100);
        let t = Transform::default();
        assert_eq!(
            p.project_triangle(&t, &tri([-5.0, -5.0, -5.0]), 0),
            Err(Rejection::BehindCamera)
        );
        // One vertex on the camera plane is enough
        assert_eq!(
            p.project_triangle(&t, &tri([5.0, 5.0, 0.0]), 0),
            Err(Rejection::BehindCamera)
        );
    }

    #[test]
    fn negative_focal_length_can_hit_zero_denominator() {
        let cam = Camera::new(Vec3::ZERO, Projection::FocalLength(-5.0));
        let p = Projector::new(&cam, 100, 100);
        assert_eq!(
            p.project_triangle(&Transform::default(), &tri([5.0, 6.0, 7.0]), 0),
            Err(Rejection::DegenerateProjection)
        );
    }

    #[test]
    fn depths_and_uvs_are_carried() {
        let p = Projector::new(&camera(), 100, 100);
        let mut t = Transform::default();
        t.set_position_xyz(0.0, 0.0, 5.0);

        let projected = p.project_triangle(&t, &tri([0.0, 1.0, 2.0]), 3).unwrap();
        assert_eq!(projected.points.map(|v| v.z), [5.0, 6.0, 7.0]);
        assert_eq!(projected.min_depth, 5.0);
        assert_eq!(projected.uvs[1], Vec2::new(1.0, 0.0));
        assert_eq!(projected.source, 3);
        assert_relative_eq!(projected.centroid.x, 0.0);
        assert_relative_eq!(projected.centroid.y, -1.0 / 3.0);
        assert_relative_eq!(projected.centroid.z, 6.0);
    }

    #[test]
    fn model_and_camera_translation_cancel() {
        let mut cam = camera();
        cam.set_position(Vec3::new(10.0, 20.0, 30.0));
        let p = Projector::new(&cam, 100, 100);
        let mut t = Transform::default();
        t.set_position_xyz(10.0, 20.0, 35.0);

        let view = p.to_view(&t, Vec3::ZERO);
        assert_eq!(view, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn view_is_camera_view_of_world_position() {
        let mut cam = camera();
        cam.set_position(Vec3::new(3.0, -2.0, 1.0));
        cam.set_orientation(0.4, -0.2);
        let p = Projector::new(&cam, 100, 100);

        let mut t = Transform::default();
        t.set_position_xyz(5.0, 1.0, 20.0).set_rotation_xyz(0.3, 0.7, -0.5);
        let local = Vec3::new(1.0, 2.0, -3.0);

        let expected = cam.to_view(t.apply(local));
        let view = p.to_view(&t, local);
        assert_relative_eq!(view.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(view.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(view.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn camera_orientation_is_applied() {
        let cam = Camera::looking_along(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Projection::FocalLength(100.0),
        );
        let p = Projector::new(&cam, 100, 100);
        let mut t = Transform::default();
        t.set_position_xyz(5.0, 0.0, 0.0);

        let view = p.to_view(&t, Vec3::ZERO);
        assert_relative_eq!(view.z, 5.0, epsilon = 1e-5);
        assert_relative_eq!(view.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn model_rotation_is_local() {
        let p = Projector::new(&camera(), 100, 100);
        let mut t = Transform::default();
        t.set_position_xyz(0.0, 0.0, 10.0)
            .set_rotation_xyz(0.0, FRAC_PI_2, 0.0);

        // Local +X swings to -Z about the model's own origin
        let view = p.to_view(&t, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(view.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(view.z, 9.0, epsilon = 1e-5);
    }
}
