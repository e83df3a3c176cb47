//! Bounding-box triangle rasterization with barycentric coverage.
//!
//! # Algorithm Overview
//!
//! 1. Compute the screen-space bounding box of the three points. A box with
//!    zero width or height has no area to fill.
//! 2. For each integer pixel in the box (clipped to the frame buffer),
//!    compute the barycentric weights of the pixel center `(x + 0.5, y + 0.5)`.
//! 3. The pixel is covered iff all three weights are `>= 0`.
//! 4. Interpolate depth, run the depth test, then interpolate UV and sample.
//!
//! # Edge Rule
//!
//! Coverage is inclusive on all three edges. Pixels whose centers lie exactly
//! on an edge shared by two triangles are shaded by both; with the depth
//! buffer the first one submitted wins ties. There is no top-left fill rule.
//!
//! # Winding Order
//!
//! Weights are normalized by the signed area, so clockwise and
//! counter-clockwise triangles rasterize identically.

use super::shader::TextureShader;
use super::{barycentric, DepthTest, ProjectedTriangle, Rasterizer};
use crate::light::PointLight;
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

/// Triangle rasterizer using bounding box iteration and barycentric tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    /// Creates a new rasterizer instance.
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    fn fill_triangle(
        &self,
        triangle: &ProjectedTriangle,
        texture: &Texture,
        light: Option<&PointLight>,
        buffer: &mut FrameBuffer,
        depth_test: DepthTest,
    ) -> usize {
        let [a, b, c] = triangle.screen_points();

        // ─────────────────────────────────────────────────────────────────────
        // Step 1: Compute bounding box
        // ─────────────────────────────────────────────────────────────────────
        let min_x = a.x.min(b.x).min(c.x);
        let max_x = a.x.max(b.x).max(c.x);
        let min_y = a.y.min(b.y).min(c.y);
        let max_y = a.y.max(b.y).max(c.y);

        // NaN extents fail this test too
        if !(max_x - min_x > 0.0 && max_y - min_y > 0.0) {
            return 0;
        }

        // Reject degenerate (collinear) triangles before touching any pixel
        if barycentric(a, b, c, a).is_none() {
            return 0;
        }

        // Clip to framebuffer bounds. Float-to-int casts saturate.
        let x_start = (min_x.floor() as i32).max(0);
        let x_end = (max_x.ceil() as i32).min(buffer.width() as i32 - 1);
        let y_start = (min_y.floor() as i32).max(0);
        let y_end = (max_y.ceil() as i32).min(buffer.height() as i32 - 1);

        let shader = TextureShader::new(texture, triangle).with_light(light);
        let mut written = 0;

        // ─────────────────────────────────────────────────────────────────────
        // Step 2: Iterate over all pixels in bounding box
        // ─────────────────────────────────────────────────────────────────────
        for y in y_start..=y_end {
            for x in x_start..=x_end {
                // Sample at pixel center
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

                let Some(lambda) = barycentric(a, b, c, p) else {
                    return written;
                };
                if lambda[0] < 0.0 || lambda[1] < 0.0 || lambda[2] < 0.0 {
                    continue;
                }

                let depth = shader.depth(lambda);
                let wrote = match depth_test {
                    DepthTest::Less => {
                        // Skip the texture fetch for occluded fragments
                        buffer.passes_depth(x, y, depth)
                            && buffer.set_pixel_with_depth(x, y, depth, shader.shade(lambda))
                    }
                    DepthTest::Always => buffer.set_pixel(x, y, shader.shade(lambda)),
                };
                written += wrote as usize;
            }
        }

        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::math::vec3::Vec3;
    use crate::render::framebuffer::{DepthBuffer, Raster};

    const RED: u32 = 0xFFFF0000;
    const BLUE: u32 = 0xFF0000FF;

    fn flat(points: [(f32, f32); 3], depth: f32) -> ProjectedTriangle {
        ProjectedTriangle::new(
            points.map(|(x, y)| Vec3::new(x, y, depth)),
            [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            0,
        )
    }

    fn fill(
        raster: &mut Raster,
        depth: &mut DepthBuffer,
        tri: &ProjectedTriangle,
        color: u32,
        test: DepthTest,
    ) -> usize {
        let mut fb = FrameBuffer::from_parts(raster, depth);
        EdgeFunctionRasterizer::new().fill_triangle(tri, &Texture::solid(color), None, &mut fb, test)
    }

    #[test]
    fn covers_interior_not_exterior() {
        let mut raster = Raster::new(20, 20);
        let mut depth = DepthBuffer::new(20, 20);
        let tri = flat([(2.0, 2.0), (18.0, 2.0), (2.0, 18.0)], 1.0);

        let written = fill(&mut raster, &mut depth, &tri, RED, DepthTest::Less);

        assert!(written > 0);
        assert_eq!(raster.pixel(3, 3), Some(RED));
        assert_eq!(raster.pixel(17, 17), Some(colors::BACKGROUND));
        assert_eq!(raster.pixel(0, 0), Some(colors::BACKGROUND));
        assert_eq!(depth.get(3, 3), Some(1.0));
        assert_eq!(
            written,
            raster.pixels().iter().filter(|&&p| p == RED).count()
        );
    }

    #[test]
    fn clockwise_and_counter_clockwise_match() {
        let mut r1 = Raster::new(16, 16);
        let mut d1 = DepthBuffer::new(16, 16);
        let mut r2 = Raster::new(16, 16);
        let mut d2 = DepthBuffer::new(16, 16);

        let n1 = fill(&mut r1, &mut d1, &flat([(1.0, 1.0), (14.0, 3.0), (5.0, 14.0)], 1.0), RED, DepthTest::Less);
        let n2 = fill(&mut r2, &mut d2, &flat([(1.0, 1.0), (5.0, 14.0), (14.0, 3.0)], 1.0), RED, DepthTest::Less);

        assert_eq!(n1, n2);
        assert_eq!(r1, r2);
    }

    #[test]
    fn zero_height_bounding_box_is_skipped() {
        let mut raster = Raster::new(8, 8);
        let mut depth = DepthBuffer::new(8, 8);
        let tri = flat([(1.0, 4.0), (6.0, 4.0), (3.0, 4.0)], 1.0);
        assert_eq!(fill(&mut raster, &mut depth, &tri, RED, DepthTest::Less), 0);
    }

    #[test]
    fn collinear_diagonal_is_skipped() {
        let mut raster = Raster::new(8, 8);
        let mut depth = DepthBuffer::new(8, 8);
        let tri = flat([(0.0, 0.0), (3.0, 3.0), (6.0, 6.0)], 1.0);
        assert_eq!(fill(&mut raster, &mut depth, &tri, RED, DepthTest::Less), 0);
        assert!(raster.pixels().iter().all(|&p| p == colors::BACKGROUND));
    }

    #[test]
    fn offscreen_parts_are_clipped() {
        let mut raster = Raster::new(10, 10);
        let mut depth = DepthBuffer::new(10, 10);
        let tri = flat([(-50.0, -50.0), (200.0, -50.0), (-50.0, 200.0)], 1.0);
        let written = fill(&mut raster, &mut depth, &tri, RED, DepthTest::Less);
        assert_eq!(written, 100);
    }

    #[test]
    fn nearer_fragment_wins_regardless_of_order() {
        let near = flat([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], 2.0);
        let far = flat([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], 8.0);

        for order in [[(near, RED), (far, BLUE)], [(far, BLUE), (near, RED)]] {
            let mut raster = Raster::new(10, 10);
            let mut depth = DepthBuffer::new(10, 10);
            for (tri, color) in order {
                fill(&mut raster, &mut depth, &tri, color, DepthTest::Less);
            }
            assert_eq!(raster.pixel(2, 2), Some(RED));
            assert_eq!(depth.get(2, 2), Some(2.0));
        }
    }

    #[test]
    fn always_overwrites_and_leaves_depth() {
        let near = flat([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], 2.0);
        let far = flat([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], 8.0);
        let mut raster = Raster::new(10, 10);
        let mut depth = DepthBuffer::new(10, 10);

        fill(&mut raster, &mut depth, &near, RED, DepthTest::Always);
        fill(&mut raster, &mut depth, &far, BLUE, DepthTest::Always);

        assert_eq!(raster.pixel(2, 2), Some(BLUE));
        assert_eq!(depth.get(2, 2), Some(f32::INFINITY));
    }

    #[test]
    fn texture_follows_uvs() {
        // Left half red, right half blue
        let tex = Texture::from_pixels(2, 1, vec![RED, BLUE]).unwrap();
        let tri = ProjectedTriangle::new(
            [
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(20.0, 0.0, 1.0),
                Vec3::new(0.0, 20.0, 1.0),
            ],
            [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0)],
            0,
        );
        let mut raster = Raster::new(20, 20);
        let mut depth = DepthBuffer::new(20, 20);
        let mut fb = FrameBuffer::from_parts(&mut raster, &mut depth);
        EdgeFunctionRasterizer::new().fill_triangle(&tri, &tex, None, &mut fb, DepthTest::Less);

        assert_eq!(raster.pixel(1, 1), Some(RED));
        assert_eq!(raster.pixel(16, 1), Some(BLUE));
    }

    #[test]
    fn light_shades_every_written_pixel() {
        let light = PointLight::default();
        // Centroid 130 units from the light: +20 on each channel
        let tri = flat([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], 1.0)
            .with_centroid(Vec3::new(0.0, 0.0, 230.0));
        let mut raster = Raster::new(10, 10);
        let mut depth = DepthBuffer::new(10, 10);
        let mut fb = FrameBuffer::from_parts(&mut raster, &mut depth);
        let tex = Texture::solid(colors::from_rgb(100, 100, 100));
        let written = EdgeFunctionRasterizer::new().fill_triangle(
            &tri,
            &tex,
            Some(&light),
            &mut fb,
            DepthTest::Less,
        );

        assert!(written > 0);
        assert_eq!(raster.pixel(2, 2), Some(colors::from_rgb(120, 120, 120)));
    }
}
