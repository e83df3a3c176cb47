//! The rendering pipeline: projection, visibility, and rasterization.

pub mod framebuffer;
pub mod projector;
pub mod rasterizer;
pub mod renderer;
pub mod visibility;

pub use framebuffer::{DepthBuffer, FrameBuffer, Raster};
pub use projector::{Projector, Rejection};
pub use rasterizer::{DepthTest, EdgeFunctionRasterizer, ProjectedTriangle, Rasterizer};
pub use renderer::{FrameStats, Renderer};
pub use visibility::{sort_back_to_front, VisibilityMode};
