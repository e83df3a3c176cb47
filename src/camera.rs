//! First-person camera
//!
//! # Coordinate System
//!
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen), and the view depth after transform
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles. A forward direction can be
//! supplied instead; it is converted with `yaw = atan2(f.x, f.z)` and
//! `pitch = asin(f.y)`.
//!
//! - **Yaw**: Rotation around Y-axis (positive = look right, toward +X)
//! - **Pitch**: Rotation around X-axis (positive = look up, toward +Y)
//!
//! There is no roll; the camera's up vector always lies in the plane spanned
//! by world up and the forward direction.

use crate::math::vec3::Vec3;
use crate::projection::Projection;

const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Camera with position, yaw/pitch orientation and a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,   // Rotation around Y-axis (radians)
    pitch: f32, // Rotation around X-axis (radians)
    projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Projection::default())
    }
}

impl Camera {
    /// Creates a camera at the given position, looking along +Z.
    pub fn new(position: Vec3, projection: Projection) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            projection,
        }
    }

    /// Creates a camera at `position` looking along `forward`.
    pub fn looking_along(position: Vec3, forward: Vec3, projection: Projection) -> Self {
        let mut camera = Self::new(position, projection);
        camera.set_forward(forward);
        camera
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Points the camera along `forward`. A zero vector is ignored.
    pub fn set_forward(&mut self, forward: Vec3) {
        let f = forward.normalize();
        if f == Vec3::ZERO {
            return;
        }
        self.yaw = f.x.atan2(f.z);
        self.pitch = f.y.clamp(-1.0, 1.0).asin();
    }

    /// Sets yaw and pitch directly (radians).
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }

    /// Rotates the camera by yaw (horizontal) and pitch (vertical) deltas.
    /// Pitch is clamped just short of straight up/down.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Points the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        self.set_forward(target - self.position);
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves the camera along its forward direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.position = self.position + self.forward() * distance;
    }

    /// Moves the camera along its right direction (strafe).
    pub fn move_right(&mut self, distance: f32) {
        self.position = self.position + self.right() * distance;
    }

    /// Moves the camera along world up.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    /// Teleports the camera to a new position without changing orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Unit forward direction.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Unit right direction (always horizontal).
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    // =========================================================================
    // View Transform
    // =========================================================================

    /// Rotates an offset already relative to the camera position into camera
    /// space: yaw about Y first, then pitch about X.
    #[inline]
    pub fn orient(&self, offset: Vec3) -> Vec3 {
        offset.rotate_y(-self.yaw).rotate_x(self.pitch)
    }

    /// World point to camera space. The result's `z` is the view depth.
    #[inline]
    pub fn to_view(&self, world: Vec3) -> Vec3 {
        self.orient(world - self.position)
    }
}

// =============================================================================
// Tests
// =============================================================================
