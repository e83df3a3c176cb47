//! Frame rendering.
//!
//! The [`Renderer`] owns the per-frame state: the depth buffer and a scratch
//! list of projected triangles, both reused across frames. The output raster
//! belongs to the caller and is drawn over, not cleared, so the caller decides
//! the background.

use log::{debug, trace};

use super::framebuffer::{DepthBuffer, FrameBuffer, Raster};
use super::projector::{Projector, Rejection};
use super::rasterizer::{EdgeFunctionRasterizer, ProjectedTriangle, Rasterizer};
use super::visibility::{sort_back_to_front, VisibilityMode};
use crate::camera::Camera;
use crate::light::PointLight;
use crate::model::Model;

/// Counters for one [`Renderer::render`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles across all models.
    pub submitted: usize,
    /// Dropped because a vertex was at or behind the camera plane.
    pub behind_camera: usize,
    /// Dropped because a vertex had no finite screen position.
    pub degenerate: usize,
    /// Handed to the rasterizer.
    pub rasterized: usize,
    /// Color writes, counting overdraw.
    pub pixels_written: usize,
}

#[derive(Debug, Default)]
pub struct Renderer {
    depth: DepthBuffer,
    visibility: VisibilityMode,
    light: Option<PointLight>,
    rasterizer: EdgeFunctionRasterizer,
    triangles: Vec<ProjectedTriangle>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visibility(visibility: VisibilityMode) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    pub fn visibility(&self) -> VisibilityMode {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: VisibilityMode) {
        self.visibility = visibility;
    }

    pub fn light(&self) -> Option<&PointLight> {
        self.light.as_ref()
    }

    /// Distance shading for every drawn face; `None` draws texels as sampled.
    pub fn set_light(&mut self, light: Option<PointLight>) {
        self.light = light;
    }

    /// Depth buffer as left by the last frame.
    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Draw every triangle of every model into `raster`.
    ///
    /// The camera and models are only read. Triangles that reach the
    /// rasterizer are drawn in submission order (model order, then triangle
    /// order) unless painter's mode reorders them.
    pub fn render(&mut self, models: &[Model], camera: &Camera, raster: &mut Raster) -> FrameStats {
        let (width, height) = (raster.width(), raster.height());
        self.depth.resize(width, height);
        self.depth.reset();
        self.triangles.clear();

        let mut stats = FrameStats::default();
        let projector = Projector::new(camera, width, height);

        // Model space -> screen space
        for (source, model) in models.iter().enumerate() {
            for (index, triangle) in model.triangles().iter().enumerate() {
                stats.submitted += 1;
                match projector.project_triangle(model.transform(), triangle, source) {
                    Ok(projected) => self.triangles.push(projected),
                    Err(reason) => {
                        trace!("{} triangle {index} rejected: {reason}", model.name());
                        match reason {
                            Rejection::BehindCamera => stats.behind_camera += 1,
                            Rejection::DegenerateProjection => stats.degenerate += 1,
                        }
                    }
                }
            }
        }

        if self.visibility == VisibilityMode::PainterSort {
            sort_back_to_front(&mut self.triangles);
        }

        let depth_test = self.visibility.depth_test();
        let mut fb = FrameBuffer::from_parts(raster, &mut self.depth);
        for triangle in &self.triangles {
            let texture = models[triangle.source].texture();
            stats.pixels_written += self
                .rasterizer
                .fill_triangle(triangle, texture, self.light.as_ref(), &mut fb, depth_test);
        }
        stats.rasterized = self.triangles.len();

        debug!(
            "frame {width}x{height}: {} submitted, {} behind camera, {} degenerate, {} rasterized, {} pixels",
            stats.submitted,
            stats.behind_camera,
            stats.degenerate,
            stats.rasterized,
            stats.pixels_written
        );

        stats
    }
}
