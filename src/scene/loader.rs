use crate::core::color::ColorRgb;
use crate::core::geometry::PrimitiveTopology;
use crate::core::math::transform::TransformFactory;
use crate::io::config::{Config, ObjectConfig, ShaderConfig};
use crate::io::obj_loader::load_obj;
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use crate::scene::shadable::ShadableObject;
use crate::scene::texture::Texture;
use crate::scene::Scene;
use crate::shading::{LambertShader, Shader, UnlitShader};
use log::warn;
use nalgebra::{Matrix4, Point3, Vector3};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a renderable scene from a parsed config.
///
/// Shader tables are constructed once and shared: every object naming the
/// same `[shaders.<name>]` entry holds a clone of the same `Arc`.
pub fn build_scene(config: &Config, aspect_ratio: f32) -> Result<Scene, String> {
    let cam = &config.camera;
    let mut camera = Camera::new(
        cam.fov,
        cam.near,
        cam.far,
        Point3::new(cam.origin[0], cam.origin[1], cam.origin[2]),
        aspect_ratio,
    );
    camera.walk_speed = cam.walk_speed;
    camera.rotation_speed = cam.rotation_speed;

    let mut shaders: HashMap<&str, Arc<Shader>> = HashMap::new();
    for (name, shader_config) in &config.shaders {
        shaders.insert(name.as_str(), Arc::new(build_shader(shader_config)?));
    }

    let mut scene = Scene::new(camera);
    for object_config in &config.objects {
        let shader = shaders
            .get(object_config.shader.as_str())
            .ok_or_else(|| format!("Object references unknown shader '{}'", object_config.shader))?
            .clone();
        scene.add_object(build_object(object_config, shader)?);
    }

    Ok(scene)
}

fn build_object(config: &ObjectConfig, shader: Arc<Shader>) -> Result<ShadableObject, String> {
    let mut mesh = match &config.path {
        Some(path) => load_obj(path)?,
        None => Mesh::create_quad(),
    };

    if let Some(topology) = &config.topology {
        mesh.topology = match topology.as_str() {
            "triangle-list" => PrimitiveTopology::TriangleList,
            "triangle-strip" => PrimitiveTopology::TriangleStrip,
            other => return Err(format!("Unknown topology '{}'", other)),
        };
    }
    mesh.world = world_matrix(config);

    Ok(ShadableObject::new(mesh, shader).with_spin(config.spin.to_radians()))
}

fn world_matrix(config: &ObjectConfig) -> Matrix4<f32> {
    let translation =
        TransformFactory::translation(&Vector3::from_row_slice(&config.position));
    let rotation = TransformFactory::rotation_z(config.rotation[2].to_radians())
        * TransformFactory::rotation_y(config.rotation[1].to_radians())
        * TransformFactory::rotation_x(config.rotation[0].to_radians());
    let scaling = TransformFactory::scaling(&Vector3::from_row_slice(&config.scale));
    translation * rotation * scaling
}

fn build_shader(config: &ShaderConfig) -> Result<Shader, String> {
    match config.r#type.as_str() {
        "unlit" => Ok(Shader::Unlit(UnlitShader {
            diffuse_texture: load_texture(&config.diffuse_texture),
            alpha_clip: config.alpha_clip,
        })),
        "lambert" => Ok(Shader::Lambert(build_lambert(config))),
        "opaque" => Ok(Shader::Opaque(build_lambert(config))),
        other => Err(format!(
            "Unknown shader type '{}' (expected unlit, lambert or opaque)",
            other
        )),
    }
}

fn build_lambert(config: &ShaderConfig) -> LambertShader {
    LambertShader {
        diffuse_texture: load_texture(&config.diffuse_texture),
        normal_texture: load_texture(&config.normal_texture),
        gloss_texture: load_texture(&config.gloss_texture),
        specular_texture: load_texture(&config.specular_texture),
        ambient_light: ColorRgb::new(config.ambient[0], config.ambient[1], config.ambient[2]),
        light_direction: Vector3::from_row_slice(&config.light_direction),
        diffuse_reflection: config.diffuse_reflection,
        shininess: config.shininess,
        alpha_clip: config.alpha_clip,
    }
}

/// Textures are optional resources: a failed load degrades to the shader's
/// documented fallback instead of failing the scene.
fn load_texture(path: &Option<String>) -> Option<Arc<Texture>> {
    let path = path.as_ref()?;
    match Texture::load(path) {
        Ok(texture) => Some(Arc::new(texture)),
        Err(e) => {
            warn!("{} - falling back to untextured shading", e);
            None
        }
    }
}
