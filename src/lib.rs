//! A CPU-only 3D rasterizer.
//!
//! Textured triangle models are transformed into camera space, projected with
//! a simple perspective divide, and rasterized into a caller-owned pixel
//! buffer with a per-pixel depth test and nearest-neighbor texture sampling.
//!
//! # Quick Start
//!
//! ```no_run
//! use dimensional::prelude::*;
//!
//! let mut cube = Model::cube(100.0);
//! cube.transform_mut().set_position_xyz(0.0, 0.0, 300.0);
//!
//! let camera = Camera::new(Vec3::ZERO, Projection::from_degrees(60.0, 4.0 / 3.0));
//! let mut raster = Raster::new(800, 600);
//! let mut renderer = Renderer::new();
//! renderer.render(&[cube], &camera, &mut raster);
//! raster.save("cube.png")?;
//! # Ok::<(), image::ImageError>(())
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;

// Re-export commonly needed types at crate root for convenience
pub use camera::Camera;
pub use config::{ConfigError, SceneConfig};
pub use light::PointLight;
pub use mesh::{LoadError, Triangle, Vertex};
pub use model::Model;
pub use projection::Projection;
pub use render::{FrameStats, Raster, Renderer, VisibilityMode};
pub use texture::{Texture, TextureError};
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use dimensional::prelude::*;
/// ```
pub mod prelude {
    // Scene
    pub use crate::camera::Camera;
    pub use crate::light::PointLight;
    pub use crate::model::Model;
    pub use crate::projection::Projection;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::render::{FrameStats, Raster, Renderer, VisibilityMode};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        DepthBuffer, DepthTest, EdgeFunctionRasterizer, FrameBuffer, ProjectedTriangle,
        Raster, Rasterizer,
    };
    pub use crate::texture::Texture;
}
