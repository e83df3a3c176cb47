//! TOML scene description.
//!
//! ```toml
//! [render]
//! width = 800
//! height = 600
//! output = "frame.png"
//! visibility = "depth"      # or "painter"
//! background = [255, 255, 255]
//!
//! [camera]
//! position = [0.0, 0.0, 0.0]
//! forward = [0.0, 0.0, 1.0] # or yaw_degrees / pitch_degrees
//! fov_degrees = 60.0        # or focal_length = 100.0
//!
//! [light]                   # optional distance shading
//! position = [0.0, 0.0, 100.0]
//! reference_distance = 120.0
//! falloff = 2.0
//! ceiling = 200
//!
//! [[models]]
//! path = "cube"             # built-in, or an OBJ file
//! texture = "crate.png"
//! scale = 100.0
//! position = [0.0, 0.0, 300.0]
//! rotation_degrees = [30.0, 45.0, 0.0]
//! ```
//!
//! Every field is optional. Relative paths resolve against the working
//! directory.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use serde::Deserialize;

use crate::camera::Camera;
use crate::colors;
use crate::light::PointLight;
use crate::math::vec3::Vec3;
use crate::mesh::LoadError;
use crate::model::Model;
use crate::projection::Projection;
use crate::render::VisibilityMode;
use crate::texture::Texture;

/// Model path that selects the built-in cube instead of an OBJ file.
pub const BUILTIN_CUBE: &str = "cube";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
    Model { path: String, source: LoadError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read scene file: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse scene TOML: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid scene: {}", msg),
            ConfigError::Model { path, source } => {
                write!(f, "failed to load model {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
            ConfigError::Model { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    /// Distance shading; off when absent.
    pub light: Option<LightConfig>,
    #[serde(default = "default_models")]
    pub models: Vec<ModelConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            light: None,
            models: default_models(),
        }
    }
}

fn default_models() -> Vec<ModelConfig> {
    vec![ModelConfig {
        path: BUILTIN_CUBE.to_string(),
        texture: None,
        scale: 100.0,
        position: [0.0, 0.0, 300.0],
        rotation_degrees: [30.0, 45.0, 0.0],
    }]
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub visibility: VisibilityMode,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            visibility: VisibilityMode::default(),
            background: default_background(),
        }
    }
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}
fn default_output() -> String {
    "frame.png".to_string()
}
fn default_background() -> [u8; 3] {
    [255, 255, 255]
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub position: [f32; 3],
    /// Takes precedence over yaw/pitch when present.
    pub forward: Option<[f32; 3]>,
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default)]
    pub pitch_degrees: f32,
    /// Takes precedence over `fov_degrees` when present.
    pub focal_length: Option<f32>,
    /// Vertical field of view; the horizontal one follows the aspect ratio.
    pub fov_degrees: Option<f32>,
}

const DEFAULT_FOV_DEGREES: f32 = 60.0;

#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_position")]
    pub position: [f32; 3],
    #[serde(default = "default_reference_distance")]
    pub reference_distance: f32,
    #[serde(default = "default_falloff")]
    pub falloff: f32,
    #[serde(default = "default_ceiling")]
    pub ceiling: u8,
}

fn default_light_position() -> [f32; 3] {
    [0.0, 0.0, 100.0]
}
fn default_reference_distance() -> f32 {
    PointLight::DEFAULT_REFERENCE_DISTANCE
}
fn default_falloff() -> f32 {
    PointLight::DEFAULT_FALLOFF
}
fn default_ceiling() -> u8 {
    PointLight::DEFAULT_CEILING
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: String,
    pub texture: Option<String>,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation_degrees: [f32; 3],
}

fn default_model_path() -> String {
    BUILTIN_CUBE.to_string()
}
fn default_scale() -> f32 {
    1.0
}

impl SceneConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&content)?;
        info!("Loaded scene {}", path.as_ref().display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.width == 0 || self.render.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "raster size {}x{} has no pixels",
                self.render.width, self.render.height
            )));
        }
        if let Some(p) = self.camera.focal_length {
            if !(p.is_finite() && p > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "focal length {p} must be positive"
                )));
            }
        }
        if let Some(fov) = self.camera.fov_degrees {
            if !(fov > 0.0 && fov < 180.0) {
                return Err(ConfigError::Invalid(format!(
                    "field of view {fov} must be between 0 and 180 degrees"
                )));
            }
        }
        for model in &self.models {
            if !(model.scale.is_finite() && model.scale != 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "model {} has scale {}",
                    model.path, model.scale
                )));
            }
        }
        Ok(())
    }

    pub fn background(&self) -> u32 {
        let [r, g, b] = self.render.background;
        colors::from_rgb(r, g, b)
    }

    pub fn camera(&self) -> Camera {
        let cam = &self.camera;
        let aspect = self.render.width as f32 / self.render.height as f32;
        let projection = match (cam.focal_length, cam.fov_degrees) {
            (Some(p), _) => Projection::FocalLength(p),
            (None, fov) => Projection::from_degrees(fov.unwrap_or(DEFAULT_FOV_DEGREES), aspect),
        };

        let position = Vec3::from(cam.position);
        match cam.forward {
            Some(forward) => Camera::looking_along(position, Vec3::from(forward), projection),
            None => {
                let mut camera = Camera::new(position, projection);
                camera.set_orientation(cam.yaw_degrees.to_radians(), cam.pitch_degrees.to_radians());
                camera
            }
        }
    }

    pub fn light(&self) -> Option<PointLight> {
        self.light.as_ref().map(|light| PointLight {
            position: Vec3::from(light.position),
            reference_distance: light.reference_distance,
            falloff: light.falloff,
            ceiling: light.ceiling,
        })
    }

    /// Load every model, sharing textures loaded from the same path.
    ///
    /// A texture that fails to load falls back to the placeholder; a model
    /// that fails to load is an error.
    pub fn build_models(&self) -> Result<Vec<Model>, ConfigError> {
        let mut textures: Vec<(&str, Arc<Texture>)> = Vec::new();
        let mut models = Vec::with_capacity(self.models.len());

        for entry in &self.models {
            let mut model = if entry.path == BUILTIN_CUBE {
                Model::cube(entry.scale)
            } else {
                Model::from_obj(&entry.path, &entry.path, entry.scale).map_err(|source| {
                    ConfigError::Model {
                        path: entry.path.clone(),
                        source,
                    }
                })?
            };

            if let Some(path) = entry.texture.as_deref() {
                let cached = textures.iter().find(|(p, _)| *p == path);
                let texture = match cached {
                    Some((_, texture)) => Arc::clone(texture),
                    None => {
                        let texture = match Texture::from_file(path) {
                            Ok(texture) => Arc::new(texture),
                            Err(e) => {
                                warn!("Texture {} unavailable ({}), using placeholder", path, e);
                                Arc::new(Texture::default())
                            }
                        };
                        textures.push((path, Arc::clone(&texture)));
                        texture
                    }
                };
                model.set_texture(texture);
            }

            let [rx, ry, rz] = entry.rotation_degrees;
            model
                .transform_mut()
                .set_position(Vec3::from(entry.position))
                .set_rotation_xyz(rx.to_radians(), ry.to_radians(), rz.to_radians());
            models.push(model);
        }

        Ok(models)
    }
}
