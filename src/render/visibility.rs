//! Hidden-surface strategies.
//!
//! [`VisibilityMode::DepthBuffer`] resolves visibility per pixel and is the
//! default. [`VisibilityMode::PainterSort`] is the legacy whole-triangle
//! ordering: projected triangles are drawn back to front by their smallest
//! view depth and overwrite unconditionally.
//!
//! Painter's order is wrong for intersecting triangles, for cyclic overlaps,
//! and for long slanted triangles whose nearest vertex is not representative
//! of the part that overlaps something else.

use serde::Deserialize;

use super::rasterizer::{DepthTest, ProjectedTriangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityMode {
    /// Per-pixel nearest-wins test against the depth buffer.
    #[default]
    #[serde(alias = "depth")]
    DepthBuffer,
    /// Back-to-front sort by minimum depth, no per-pixel test.
    #[serde(alias = "painter")]
    PainterSort,
}

impl VisibilityMode {
    /// The per-fragment test this mode rasterizes with.
    pub fn depth_test(self) -> DepthTest {
        match self {
            VisibilityMode::DepthBuffer => DepthTest::Less,
            VisibilityMode::PainterSort => DepthTest::Always,
        }
    }
}

/// Order triangles farthest-first by `min_depth`.
///
/// The sort is stable, so triangles with equal keys keep submission order.
pub fn sort_back_to_front(triangles: &mut [ProjectedTriangle]) {
    triangles.sort_by(|a, b| b.min_depth.total_cmp(&a.min_depth));
}
