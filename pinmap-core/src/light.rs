//! Colors and light parameters attached to scene nodes

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `#rgb` or a space separated triple such as `1 0 0`
    pub fn parse(input: &str) -> Result<Self> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            let expanded: String = match hex.len() {
                3 => hex.chars().flat_map(|c| [c, c]).collect(),
                6 => hex.to_string(),
                _ => return Err(Error::InvalidData(format!("invalid hex color '{input}'"))),
            };
            let value = u32::from_str_radix(&expanded, 16)
                .map_err(|_| Error::InvalidData(format!("invalid hex color '{input}'")))?;
            return Ok(Self::from_hex(value));
        }

        let parts: Vec<f32> = s
            .split_whitespace()
            .map(|p| p.parse::<f32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| Error::InvalidData(format!("invalid color triple '{input}'")))?;
        match parts.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(Error::InvalidData(format!("invalid color triple '{input}'"))),
        }
    }

    pub fn from_hex(value: u32) -> Self {
        Self::new(
            ((value >> 16) & 0xff) as f32 / 255.0,
            ((value >> 8) & 0xff) as f32 / 255.0,
            (value & 0xff) as f32 / 255.0,
        )
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Component-wise linear blend, `t = 0` gives `self`
    pub fn mix(&self, other: &Color, t: f32) -> Color {
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

/// Light variants the map scene uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LightKind {
    Hemisphere { ground_color: Color },
    Directional,
}

/// Light component parameters, editable from the debug panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Light {
    pub kind: LightKind,
    pub intensity: f32,
    pub color: Color,
    pub cast_shadow: bool,
    pub shadow_bias: f32,
    pub shadow_radius: f32,
}

impl Light {
    pub fn hemisphere(color: Color, ground_color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Hemisphere { ground_color },
            intensity,
            color,
            cast_shadow: false,
            shadow_bias: 0.0,
            shadow_radius: 1.0,
        }
    }

    pub fn directional(color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            intensity,
            color,
            cast_shadow: true,
            shadow_bias: 0.0,
            shadow_radius: 1.0,
        }
    }
}
