pub mod lambert;
pub mod unlit;

pub use lambert::LambertShader;
pub use unlit::UnlitShader;

use crate::core::color::ColorRgb;
use crate::core::geometry::VertexOut;
use std::str::FromStr;

/// Which lighting term(s) the lit shaders output, selected per frame to
/// inspect each term in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    ObservedArea,
    Diffuse,
    Specular,
    #[default]
    Combined,
}

impl FromStr for ShadingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "observed-area" => Ok(Self::ObservedArea),
            "diffuse" => Ok(Self::Diffuse),
            "specular" => Ok(Self::Specular),
            "combined" => Ok(Self::Combined),
            other => Err(format!(
                "unknown shading mode '{}' (expected observed-area, diffuse, specular or combined)",
                other
            )),
        }
    }
}

/// Per-frame render toggles, produced by the CLI/config layer and passed
/// into every render call. Deliberately a plain value rather than shader or
/// rasterizer state.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub shading_mode: ShadingMode,
    pub use_normal_map: bool,
    pub visualize_depth: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            shading_mode: ShadingMode::Combined,
            use_normal_map: true,
            visualize_depth: false,
        }
    }
}

/// The closed set of shading models the rasterizer can dispatch to.
///
/// `Opaque` reuses the lambert lighting model but never alpha-clips; it is
/// meant for fully opaque geometry where the gate test is wasted work.
pub enum Shader {
    Unlit(UnlitShader),
    Lambert(LambertShader),
    Opaque(LambertShader),
}

impl Shader {
    /// Predicate consulted before any pixel write. A false result skips the
    /// pixel entirely (no color and no depth commit).
    pub fn can_shade(&self, vertex: &VertexOut) -> bool {
        match self {
            Self::Unlit(s) => s.can_shade(vertex),
            Self::Lambert(s) => s.can_shade(vertex),
            Self::Opaque(_) => true,
        }
    }

    /// Computes the fragment color for an interpolated vertex.
    /// The caller applies the max-to-one clamp before writing.
    pub fn shade(&self, vertex: &VertexOut, options: &RenderOptions) -> ColorRgb {
        match self {
            Self::Unlit(s) => s.shade(vertex),
            Self::Lambert(s) | Self::Opaque(s) => s.shade(vertex, options),
        }
    }
}
