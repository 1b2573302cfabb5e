// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation targets and their properties.

use crate::value::{PropertyValue, Rgba, ValueKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of an animated element (or group of elements)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub String);

impl TargetId {
    /// Create a target ID
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The target name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Animatable property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// Horizontal translation in pixels
    X,
    /// Vertical translation in pixels
    Y,
    /// Opacity (0.0 - 1.0)
    Opacity,
    /// Uniform scale
    Scale,
    /// Rotation in degrees
    Rotation,
    /// Background color
    Background,
    /// Foreground (text) color
    Color,
}

impl Property {
    /// Kind of value this property holds
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Background | Self::Color => ValueKind::Color,
            Self::X | Self::Y | Self::Opacity | Self::Scale | Self::Rotation => ValueKind::Float,
        }
    }

    /// Value used when a target does not declare one
    pub fn default_value(&self) -> PropertyValue {
        match self {
            Self::X | Self::Y | Self::Rotation => PropertyValue::Float(0.0),
            Self::Opacity | Self::Scale => PropertyValue::Float(1.0),
            Self::Background => PropertyValue::Color(Rgba::TRANSPARENT),
            Self::Color => PropertyValue::Color(Rgba::rgb(0, 0, 0)),
        }
    }

    /// Short name
    pub fn name(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::Rotation => "rotation",
            Self::Background => "background",
            Self::Color => "color",
        }
    }
}

/// A declared target: how many elements it covers and their resting values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Number of elements sharing this name (for staggered groups)
    pub members: usize,
    /// Declared initial values
    pub initial: IndexMap<Property, PropertyValue>,
}

impl TargetSpec {
    /// Initial value of `property`, falling back to the property default
    pub fn initial_value(&self, property: Property) -> PropertyValue {
        self.initial
            .get(&property)
            .copied()
            .unwrap_or_else(|| property.default_value())
    }
}

/// The set of targets a timeline may animate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    targets: IndexMap<TargetId, TargetSpec>,
}

impl Stage {
    /// Create an empty stage
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a single-element target
    pub fn target(self, id: impl Into<TargetId>) -> Self {
        self.group(id, 1)
    }

    /// Declare a target covering `members` elements
    pub fn group(mut self, id: impl Into<TargetId>, members: usize) -> Self {
        self.targets.insert(
            id.into(),
            TargetSpec {
                members: members.max(1),
                initial: IndexMap::new(),
            },
        );
        self
    }

    /// Set the initial value of a property on an already declared target.
    /// Undeclared targets are declared on the fly.
    pub fn initial(mut self, id: impl Into<TargetId>, property: Property, value: impl Into<PropertyValue>) -> Self {
        let spec = self.targets.entry(id.into()).or_insert_with(|| TargetSpec {
            members: 1,
            initial: IndexMap::new(),
        });
        spec.initial.insert(property, value.into());
        self
    }

    /// Look up a target
    pub fn get(&self, id: &TargetId) -> Option<&TargetSpec> {
        self.targets.get(id)
    }

    /// Mutable access to a target
    pub(crate) fn get_mut(&mut self, id: &TargetId) -> Option<&mut TargetSpec> {
        self.targets.get_mut(id)
    }

    /// All targets in declaration order
    pub fn targets(&self) -> impl Iterator<Item = (&TargetId, &TargetSpec)> {
        self.targets.iter()
    }

    /// Resting frame with every target at its initial values
    pub fn initial_frame(&self) -> Frame {
        let mut frame = Frame::default();
        for (id, spec) in &self.targets {
            let values: IndexMap<Property, PropertyValue> =
                spec.initial.iter().map(|(p, v)| (*p, *v)).collect();
            frame.values.insert(id.clone(), vec![values; spec.members]);
        }
        frame
    }
}

/// Evaluated property values for every target member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    values: IndexMap<TargetId, Vec<IndexMap<Property, PropertyValue>>>,
}

impl Frame {
    /// Value of `property` on member `member` of `target`
    pub fn get(&self, target: &TargetId, member: usize, property: Property) -> Option<PropertyValue> {
        self.values.get(target)?.get(member)?.get(&property).copied()
    }

    /// Float value shortcut
    pub fn float(&self, target: &str, member: usize, property: Property) -> Option<f32> {
        self.get(&TargetId::new(target), member, property)?.as_float()
    }

    /// Color value shortcut
    pub fn color(&self, target: &str, member: usize, property: Property) -> Option<Rgba> {
        self.get(&TargetId::new(target), member, property)?.as_color()
    }

    /// All values of one target member
    pub fn member(&self, target: &TargetId, member: usize) -> Option<&IndexMap<Property, PropertyValue>> {
        self.values.get(target)?.get(member)
    }

    pub(crate) fn set(&mut self, target: &TargetId, member: usize, property: Property, value: PropertyValue) {
        if let Some(slot) = self.values.get_mut(target).and_then(|m| m.get_mut(member)) {
            slot.insert(property, value);
        }
    }
}
