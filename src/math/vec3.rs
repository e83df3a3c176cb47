use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Right-handed rotation about the X axis.
    pub fn rotate_x(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Right-handed rotation about the Y axis.
    pub fn rotate_y(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    /// Right-handed rotation about the Z axis.
    pub fn rotate_z(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }

    /// Rotates about the origin by Euler angles, X first, then Y, then Z.
    pub fn rotated(&self, angles: Vec3) -> Self {
        self.rotate_x(angles.x)
            .rotate_y(angles.y)
            .rotate_z(angles.z)
    }

    pub fn magnitude(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    /// Returns the unit vector, or zero for a zero-length input.
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Self::ZERO;
        }
        *self / magnitude
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Scalar multiplication of a vector.
impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

/// Scalar division of a vector.
impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn zero_angles_are_identity() {
        let points = [
            Vec3::new(1.0, -2.0, 3.5),
            Vec3::new(-100.0, 0.25, 7.0),
            Vec3::ZERO,
        ];
        for p in points {
            assert_eq!(p.rotated(Vec3::ZERO), p);
        }
    }

    #[test]
    fn quarter_turns_are_right_handed() {
        // +Y goes to +Z about X, +Z goes to +X about Y, +X goes to +Y about Z
        assert_vec_eq(Vec3::UP.rotate_x(FRAC_PI_2), Vec3::FORWARD);
        assert_vec_eq(Vec3::FORWARD.rotate_y(FRAC_PI_2), Vec3::new(1.0, 0.0, 0.0));
        assert_vec_eq(Vec3::new(1.0, 0.0, 0.0).rotate_z(FRAC_PI_2), Vec3::UP);
    }

    #[test]
    fn composition_matches_single_call() {
        let p = Vec3::new(0.3, -1.2, 2.0);
        let (ax, ay, az) = (0.7, -1.1, 2.4);
        let stepwise = p
            .rotated(Vec3::new(ax, 0.0, 0.0))
            .rotated(Vec3::new(0.0, ay, 0.0))
            .rotated(Vec3::new(0.0, 0.0, az));
        assert_vec_eq(stepwise, p.rotated(Vec3::new(ax, ay, az)));
    }

    #[test]
    fn order_is_x_then_y_then_z() {
        // X then Y: +Y -> +Z -> +X. The reverse order would give +Z.
        let p = Vec3::UP.rotated(Vec3::new(FRAC_PI_2, FRAC_PI_2, 0.0));
        assert_vec_eq(p, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn full_turns_return_to_start() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_eq(p.rotated(Vec3::new(TAU, -TAU, 2.0 * PI)), p);
    }

    #[test]
    fn rotation_preserves_length() {
        let p = Vec3::new(-4.0, 1.5, 9.0);
        let r = p.rotated(Vec3::new(1.3, -5.9, 6.1));
        assert_relative_eq!(p.magnitude(), r.magnitude(), epsilon = 1e-4);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_relative_eq!(Vec3::new(3.0, 4.0, 0.0).normalize().magnitude(), 1.0);
    }
}
