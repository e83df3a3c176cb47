//! Renderable model: immutable geometry plus a per-instance transform.
//!
//! A [`Model`] owns its triangle list behind an `Arc`, so cloning a model is
//! cheap and yields an independent instance: the clone gets its own
//! [`Transform`] while the geometry and texture stay shared and read-only.

use std::path::Path;
use std::sync::Arc;

use crate::math::vec3::Vec3;
use crate::mesh::{self, LoadError, Triangle, Vertex};
use crate::texture::Texture;
use crate::transform::Transform;

#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    triangles: Arc<[Triangle]>,
    scale: f32,
    transform: Transform,
    texture: Arc<Texture>,
}

impl Model {
    /// Create a model, applying `scale` to every vertex position once.
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>, scale: f32) -> Self {
        let triangles: Arc<[Triangle]> = triangles
            .into_iter()
            .map(|tri| {
                Triangle::new(
                    tri.vertices
                        .map(|v| Vertex::new(v.position * scale, v.uv)),
                )
            })
            .collect();

        Self {
            name: name.into(),
            triangles,
            scale,
            transform: Transform::default(),
            texture: Arc::new(Texture::default()),
        }
    }

    /// Load a model from an OBJ file.
    ///
    /// All objects/groups in the file are merged into one triangle list.
    pub fn from_obj<P: AsRef<Path>>(
        name: impl Into<String>,
        file_path: P,
        scale: f32,
    ) -> Result<Self, LoadError> {
        let triangles = mesh::load_obj(file_path)?;
        Ok(Self::new(name, triangles, scale))
    }

    /// The built-in cube.
    pub fn cube(scale: f32) -> Self {
        Self::new("cube", mesh::cube(), scale)
    }

    /// Get the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scaled, model-space triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// The scale factor baked in at construction.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    // ============ Transform Accessors ============

    /// Get a reference to the model's world transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Get a mutable reference to the model's world transform.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation()
    }

    // ============ Texture ============

    /// Bind a texture. The same `Arc` may be shared by several models.
    pub fn set_texture(&mut self, texture: Arc<Texture>) {
        self.texture = texture;
    }

    /// Builder form of [`Model::set_texture`].
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = texture;
        self
    }

    /// Get the bound texture (the 1x1 placeholder if none was set).
    pub fn texture(&self) -> &Texture {
        &self.texture
    }
}
