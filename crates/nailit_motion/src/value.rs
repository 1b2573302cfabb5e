// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animatable property values.

use serde::{Deserialize, Serialize};

/// RGBA color with channels in 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    /// Fully transparent black
    pub const TRANSPARENT: Rgba = Rgba([0.0, 0.0, 0.0, 0.0]);

    /// Opaque color from 8-bit channels
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
    }

    /// Parse `#RRGGBB`, `#RRGGBBAA` or `transparent`
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Some(Self([
            channel(0)? as f32 / 255.0,
            channel(2)? as f32 / 255.0,
            channel(4)? as f32 / 255.0,
            alpha as f32 / 255.0,
        ]))
    }

    /// `#RRGGBBAA` representation
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// Kind of value a property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Scalar
    Float,
    /// Color
    Color,
}

/// Value of an animatable property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Scalar value
    Float(f32),
    /// Color (RGBA)
    Color(Rgba),
}

impl From<f32> for PropertyValue {
    fn from(v: f32) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<Rgba> for PropertyValue {
    fn from(v: Rgba) -> Self {
        PropertyValue::Color(v)
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Interpolate Vec4
    pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        [
            Self::lerp(a[0], b[0], t),
            Self::lerp(a[1], b[1], t),
            Self::lerp(a[2], b[2], t),
            Self::lerp(a[3], b[3], t),
        ]
    }
}

impl PropertyValue {
    /// Kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::Float(_) => ValueKind::Float,
            PropertyValue::Color(_) => ValueKind::Color,
        }
    }

    /// Interpolate towards `other`; `None` for mismatched kinds
    pub fn interpolate(&self, other: &PropertyValue, t: f32) -> Option<PropertyValue> {
        match (self, other) {
            (PropertyValue::Float(a), PropertyValue::Float(b)) => {
                Some(PropertyValue::Float(Interpolation::lerp(*a, *b, t)))
            }
            (PropertyValue::Color(a), PropertyValue::Color(b)) => {
                Some(PropertyValue::Color(Rgba(Interpolation::lerp_vec4(a.0, b.0, t))))
            }
            _ => None,
        }
    }

    /// Get as float if possible
    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(v) => Some(*v),
            PropertyValue::Color(_) => None,
        }
    }

    /// Get as color if possible
    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            PropertyValue::Color(v) => Some(*v),
            PropertyValue::Float(_) => None,
        }
    }
}
