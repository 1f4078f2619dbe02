//! Shader definitions handed to the rendering engine
//!
//! The sky dome uses a vertical gradient: the fragment colour mixes the
//! bottom and top colours by the height of the normalized world position,
//! followed by the engine's dithering pass. Compilation happens in the host
//! engine; this module only owns the sources and the uniform block.

use bytemuck::{Pod, Zeroable};
use pinmap_core::{Color, NodeKind, Point3f};

/// Vertex shader for the gradient sky
pub const GRADIENT_VERTEX_SHADER: &str = r#"
varying vec3 vWorldPosition;
void main() {
 vec4 worldPosition = modelMatrix * vec4( position, 1.0 );
 vWorldPosition = worldPosition.xyz;
 gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0 );
}
"#;

/// Fragment shader for the gradient sky
pub const GRADIENT_FRAGMENT_SHADER: &str = r#"
#include <common>
#include <dithering_pars_fragment>
uniform vec3 bottomColor;
uniform vec3 topColor;
uniform float offset;
varying vec3 vWorldPosition;
void main() {
 float h = normalize( vWorldPosition ).y;
 gl_FragColor = vec4( mix( bottomColor, topColor, max( pow( max(h, 0.0 ), 0.8 ), 0.0 ) ), 1.0 );
 #include <dithering_fragment>
}
"#;

/// Exponent applied to the height before mixing
pub const GRADIENT_EXPONENT: f32 = 0.8;

/// A named vertex + fragment program pair and its uniform names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderDefinition {
    pub name: &'static str,
    pub vertex: &'static str,
    pub fragment: &'static str,
    pub uniforms: &'static [&'static str],
}

/// The vertical-gradient sky shader
pub const GRADIENT_SHADER: ShaderDefinition = ShaderDefinition {
    name: "gradientshader",
    vertex: GRADIENT_VERTEX_SHADER,
    fragment: GRADIENT_FRAGMENT_SHADER,
    uniforms: &["topColor", "bottomColor", "offset"],
};

/// Uniform block of [`GRADIENT_SHADER`], laid out for upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GradientUniforms {
    pub top_color: [f32; 3],
    pub offset: f32,
    pub bottom_color: [f32; 3],
    pub _padding: f32,
}

impl GradientUniforms {
    pub fn new(top: Color, bottom: Color) -> Self {
        Self {
            top_color: top.to_array(),
            offset: 0.0,
            bottom_color: bottom.to_array(),
            _padding: 0.0,
        }
    }

    /// Uniforms of a sky node, if `kind` is one
    pub fn from_node(kind: &NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Sky { top_color, bottom_color } => Some(Self::new(*top_color, *bottom_color)),
            _ => None,
        }
    }

    pub fn top(&self) -> Color {
        let [r, g, b] = self.top_color;
        Color::new(r, g, b)
    }

    pub fn bottom(&self) -> Color {
        let [r, g, b] = self.bottom_color;
        Color::new(r, g, b)
    }

    /// CPU evaluation of the fragment colour at a world position, without dithering
    pub fn sample(&self, world_position: &Point3f) -> Color {
        let norm = world_position.coords.norm();
        let h = if norm > 0.0 { world_position.y / norm } else { 0.0 };
        let weight = h.max(0.0).powf(GRADIENT_EXPONENT).max(0.0);
        self.bottom().mix(&self.top(), weight)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for GradientUniforms {
    fn default() -> Self {
        Self::new(Color::RED, Color::BLUE)
    }
}
