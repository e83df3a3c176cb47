//! Perspective projection parameters.
//!
//! The pipeline projects camera-space points with
//!
//! ```text
//! screen_x =  (x * Px) / (Px + z)
//! screen_y = -(y * Py) / (Py + z)
//! ```
//!
//! where `Px`/`Py` are focal-length-equivalent scale factors. A
//! [`Projection`] either stores that factor directly or derives it each
//! frame from a field of view and the output raster size.

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Focal length in pixels, used for both axes.
    FocalLength(f32),
    /// Horizontal and vertical field of view in radians.
    FieldOfView { fov_x: f32, fov_y: f32 },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::FocalLength(100.0)
    }
}

impl Projection {
    /// Creates a field-of-view projection from a vertical FOV and aspect ratio.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    pub fn from_fov_y(fov_y: f32, aspect_ratio: f32) -> Self {
        let fov_x = 2.0 * (aspect_ratio * (fov_y / 2.0).tan()).atan();
        Projection::FieldOfView { fov_x, fov_y }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32) -> Self {
        Self::from_fov_y(fov_y_degrees.to_radians(), aspect_ratio)
    }

    /// Focal-length-equivalent factors `(Px, Py)` for a raster of the given size.
    pub fn focal_lengths(&self, width: u32, height: u32) -> (f32, f32) {
        match *self {
            Projection::FocalLength(p) => (p, p),
            Projection::FieldOfView { fov_x, fov_y } => (
                (width as f32 / 2.0) / (fov_x / 2.0).tan(),
                (height as f32 / 2.0) / (fov_y / 2.0).tan(),
            ),
        }
    }
}
