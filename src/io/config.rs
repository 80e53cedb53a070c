use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// TOML scene description.
///
/// Shaders are declared once under `[shaders.<name>]` and referenced by name
/// from objects, so several objects can share a single shader instance.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub shaders: HashMap<String, ShaderConfig>,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,
    /// Background color in linear RGB.
    #[serde(default = "default_background")]
    pub background: [f32; 3],

    // --- Per-frame toggles ---
    #[serde(default = "default_shading_mode")]
    pub shading_mode: String, // "observed-area", "diffuse", "specular", "combined"
    #[serde(default = "default_true")]
    pub use_normal_map: bool,
    #[serde(default = "default_false")]
    pub visualize_depth: bool,

    // --- Animation ---
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            background: default_background(),
            shading_mode: default_shading_mode(),
            use_normal_map: true,
            visualize_depth: false,
            frames: default_frames(),
            frame_time: default_frame_time(),
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_output() -> String {
    "render.png".to_string()
}
fn default_background() -> [f32; 3] {
    // The reference gray backdrop (100/255 per channel, linearized)
    [0.117, 0.117, 0.117]
}
fn default_shading_mode() -> String {
    "combined".to_string()
}
fn default_frames() -> u32 {
    1
}
fn default_frame_time() -> f32 {
    1.0 / 60.0
}
fn default_false() -> bool {
    false
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_origin")]
    pub origin: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            origin: default_camera_origin(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            walk_speed: default_walk_speed(),
            rotation_speed: default_rotation_speed(),
        }
    }
}

fn default_camera_origin() -> [f32; 3] {
    [0.0, 0.0, -10.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_walk_speed() -> f32 {
    10.0
}
fn default_rotation_speed() -> f32 {
    0.01
}

#[derive(Debug, Deserialize)]
pub struct ShaderConfig {
    /// "unlit", "lambert" or "opaque".
    pub r#type: String,

    pub diffuse_texture: Option<String>,
    pub normal_texture: Option<String>,
    pub gloss_texture: Option<String>,
    pub specular_texture: Option<String>,

    #[serde(default)]
    pub alpha_clip: f32,
    #[serde(default = "default_light_direction")]
    pub light_direction: [f32; 3],
    #[serde(default)]
    pub ambient: [f32; 3],
    #[serde(default = "default_diffuse_reflection")]
    pub diffuse_reflection: f32,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

fn default_light_direction() -> [f32; 3] {
    [0.577, -0.577, 0.577]
}
fn default_diffuse_reflection() -> f32 {
    7.0
}
fn default_shininess() -> f32 {
    25.0
}

#[derive(Debug, Deserialize)]
pub struct ObjectConfig {
    /// OBJ file path. When omitted, a built-in quad is used (particles).
    pub path: Option<String>,
    /// Name of a `[shaders.<name>]` entry.
    pub shader: String,
    /// "triangle-list" or "triangle-strip". When omitted, the mesh keeps
    /// the topology it was built with.
    pub topology: Option<String>,

    #[serde(default)]
    pub position: [f32; 3],
    /// Euler rotation in degrees, applied X then Y then Z.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Spin around local Y in degrees per second.
    #[serde(default)]
    pub spin: f32,
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.width, 640);
        assert_eq!(config.render.frames, 1);
        assert_eq!(config.camera.fov, 45.0);
        assert!(config.objects.is_empty());
    }

    #[test]
    fn shader_tables_parse_by_name() {
        let config: Config = toml::from_str(
            r#"
            [shaders.fire]
            type = "unlit"
            alpha_clip = 0.05

            [[objects]]
            shader = "fire"
            spin = 45.0
            "#,
        )
        .unwrap();

        assert_eq!(config.shaders["fire"].r#type, "unlit");
        assert_eq!(config.shaders["fire"].alpha_clip, 0.05);
        assert_eq!(config.objects[0].shader, "fire");
        assert_eq!(config.objects[0].spin, 45.0);
        assert!(config.objects[0].path.is_none());
    }
}
