//! Runtime value overrides attached to content nodes.
//!
//! A host resolves a key path, then registers a callback per animatable
//! property on every resolved node. The player evaluates those callbacks
//! against the current [`FrameInfo`] each frame.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::KeyPath;

/// Animatable properties a value override can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Color,
    StrokeColor,
    Opacity,
    StrokeWidth,
    TransformPosition,
    TransformScale,
    TransformRotation,
    TransformOpacity,
}

impl Property {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::StrokeColor => "stroke_color",
            Self::Opacity => "opacity",
            Self::StrokeWidth => "stroke_width",
            Self::TransformPosition => "transform_position",
            Self::TransformScale => "transform_scale",
            Self::TransformRotation => "transform_rotation",
            Self::TransformOpacity => "transform_opacity",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value produced by an override callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PropertyValue {
    Float(f32),
    Vec2([f32; 2]),
    /// RGBA, components in 0..=1
    Color([f32; 4]),
}

/// Playback position handed to override callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    pub frame: f32,
    pub start_frame: f32,
    pub end_frame: f32,
    /// Absolute position within the composition, 0..=1.
    pub progress: f32,
}

impl FrameInfo {
    pub fn new(frame: f32, start_frame: f32, end_frame: f32) -> Self {
        let span = end_frame - start_frame;
        let progress = if span > 0.0 {
            (frame - start_frame) / span
        } else {
            0.0
        };
        Self {
            frame,
            start_frame,
            end_frame,
            progress,
        }
    }
}

pub type ValueCallback = Arc<dyn Fn(&FrameInfo) -> PropertyValue + Send + Sync>;

/// A callback registered for one property of one node.
#[derive(Clone)]
pub struct ValueOverride {
    pub property: Property,
    pub callback: ValueCallback,
}

impl ValueOverride {
    pub fn new(property: Property, callback: ValueCallback) -> Self {
        Self { property, callback }
    }

    #[inline]
    pub fn evaluate(&self, info: &FrameInfo) -> PropertyValue {
        (self.callback)(info)
    }
}

impl fmt::Debug for ValueOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueOverride")
            .field("property", &self.property)
            .finish_non_exhaustive()
    }
}

/// One evaluated override for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideValue {
    /// Concrete key path of the node (container keys omitted).
    pub path: KeyPath,
    pub property: Property,
    pub value: PropertyValue,
}
