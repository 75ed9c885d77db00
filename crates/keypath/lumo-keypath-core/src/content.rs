//! Content tree model: layers, groups and shapes of a composition.
//!
//! `ContentNode` is the concrete tree the player owns. It deserialises from a
//! small JSON form (`key`, `kind`, `children`); value overrides are runtime
//! state and are never serialised.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::element::{is_container_key, KeyPathElement, CONTAINER_KEY};
use crate::error::KeyPathError;
use crate::value_override::{FrameInfo, OverrideValue, Property, ValueCallback, ValueOverride};
use crate::KeyPath;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Structural node injected by the player; transparent to key paths.
    Container,
    Layer,
    #[default]
    Group,
    Shape,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ContentNode {
    pub key: String,
    #[serde(default)]
    pub kind: ContentKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
    #[serde(skip)]
    overrides: Vec<ValueOverride>,
}

impl ContentNode {
    pub fn new(key: impl Into<String>, kind: ContentKind, children: Vec<ContentNode>) -> Self {
        Self {
            key: key.into(),
            kind,
            children,
            overrides: Vec::new(),
        }
    }

    pub fn container(children: Vec<ContentNode>) -> Self {
        Self::new(CONTAINER_KEY, ContentKind::Container, children)
    }

    pub fn layer(key: impl Into<String>, children: Vec<ContentNode>) -> Self {
        Self::new(key, ContentKind::Layer, children)
    }

    pub fn group(key: impl Into<String>, children: Vec<ContentNode>) -> Self {
        Self::new(key, ContentKind::Group, children)
    }

    pub fn shape(key: impl Into<String>) -> Self {
        Self::new(key, ContentKind::Shape, Vec::new())
    }

    /// True for player-injected structural nodes.
    pub fn is_container(&self) -> bool {
        self.kind == ContentKind::Container || is_container_key(&self.key)
    }

    /// Parse a tree from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Node reached by following child indices from `self`.
    pub fn node_at(&self, address: &[usize]) -> Result<&ContentNode, KeyPathError> {
        let mut node = self;
        for &index in address {
            node = node
                .children
                .get(index)
                .ok_or_else(|| KeyPathError::NodeNotFound {
                    address: address.to_vec(),
                })?;
        }
        Ok(node)
    }

    pub fn node_at_mut(&mut self, address: &[usize]) -> Result<&mut ContentNode, KeyPathError> {
        let mut node = self;
        for &index in address {
            node = node
                .children
                .get_mut(index)
                .ok_or_else(|| KeyPathError::NodeNotFound {
                    address: address.to_vec(),
                })?;
        }
        Ok(node)
    }

    /// Number of nodes in this subtree, containers excluded.
    pub fn addressable_count(&self) -> usize {
        let own = usize::from(!self.is_container());
        own + self
            .children
            .iter()
            .map(ContentNode::addressable_count)
            .sum::<usize>()
    }

    /// Register (or replace) the override for `property` on this node.
    pub fn register_value_override(&mut self, property: Property, callback: ValueCallback) {
        if let Some(existing) = self.overrides.iter_mut().find(|o| o.property == property) {
            existing.callback = callback;
        } else {
            self.overrides.push(ValueOverride::new(property, callback));
        }
    }

    /// Remove the override for `property`. Returns whether one was present.
    pub fn clear_value_override(&mut self, property: Property) -> bool {
        let before = self.overrides.len();
        self.overrides.retain(|o| o.property != property);
        self.overrides.len() != before
    }

    pub fn has_value_override(&self, property: Property) -> bool {
        self.overrides.iter().any(|o| o.property == property)
    }

    pub fn value_overrides(&self) -> &[ValueOverride] {
        &self.overrides
    }

    /// Evaluate every override in this subtree, in pre-order.
    pub fn evaluate_overrides(&self, info: &FrameInfo) -> Vec<OverrideValue> {
        let mut out = Vec::new();
        self.collect_overrides(&KeyPath::empty(), info, &mut out);
        out
    }

    fn collect_overrides(&self, parent: &KeyPath, info: &FrameInfo, out: &mut Vec<OverrideValue>) {
        let owned;
        let path = if self.is_container() {
            parent
        } else {
            owned = parent.add_key(self.key.as_str());
            &owned
        };
        for o in &self.overrides {
            out.push(OverrideValue {
                path: path.clone(),
                property: o.property,
                value: o.evaluate(info),
            });
        }
        for child in &self.children {
            child.collect_overrides(path, info, out);
        }
    }
}

impl KeyPathElement for ContentNode {
    fn key(&self) -> &str {
        &self.key
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> Option<&dyn KeyPathElement> {
        self.children
            .get(index)
            .map(|c| c as &dyn KeyPathElement)
    }
}

impl fmt::Debug for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNode")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("children", &self.children)
            .field("overrides", &self.overrides)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PropertyValue;
    use std::sync::Arc;

    fn sample() -> ContentNode {
        ContentNode::container(vec![ContentNode::layer(
            "Layer",
            vec![ContentNode::group(
                "Group",
                vec![ContentNode::shape("Fill"), ContentNode::shape("Stroke")],
            )],
        )])
    }

    #[test]
    fn json_roundtrip_skips_overrides() {
        let json = r#"{"key":"__container","kind":"container","children":[{"key":"L","kind":"layer"}]}"#;
        let mut node = ContentNode::from_json_str(json).unwrap();
        assert!(node.is_container());
        node.children[0].register_value_override(
            Property::Opacity,
            Arc::new(|_: &FrameInfo| PropertyValue::Float(1.0)),
        );
        let back = serde_json::to_string(&node).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn kind_defaults_to_group() {
        let node = ContentNode::from_json_str(r#"{"key":"G"}"#).unwrap();
        assert_eq!(node.kind, ContentKind::Group);
        assert!(node.children.is_empty());
    }

    #[test]
    fn node_at_follows_addresses() {
        let tree = sample();
        assert_eq!(tree.node_at(&[0, 0, 1]).unwrap().key, "Stroke");
        assert_eq!(tree.node_at(&[]).unwrap().key, CONTAINER_KEY);
        assert_eq!(
            tree.node_at(&[0, 3]).unwrap_err(),
            KeyPathError::NodeNotFound {
                address: vec![0, 3]
            }
        );
    }

    #[test]
    fn addressable_count_skips_containers() {
        assert_eq!(sample().addressable_count(), 4);
    }

    #[test]
    fn register_replaces_same_property() {
        let mut tree = sample();
        let fill = tree.node_at_mut(&[0, 0, 0]).unwrap();
        fill.register_value_override(
            Property::Color,
            Arc::new(|_: &FrameInfo| PropertyValue::Color([1.0, 0.0, 0.0, 1.0])),
        );
        fill.register_value_override(
            Property::Color,
            Arc::new(|_: &FrameInfo| PropertyValue::Color([0.0, 1.0, 0.0, 1.0])),
        );
        assert_eq!(fill.value_overrides().len(), 1);

        let values = tree.evaluate_overrides(&FrameInfo::new(0.0, 0.0, 10.0));
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].path, KeyPath::new(["Layer", "Group", "Fill"]));
        assert_eq!(values[0].value, PropertyValue::Color([0.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn clear_override() {
        let mut tree = sample();
        let group = tree.node_at_mut(&[0, 0]).unwrap();
        group.register_value_override(
            Property::TransformRotation,
            Arc::new(|info: &FrameInfo| PropertyValue::Float(info.frame)),
        );
        assert!(group.has_value_override(Property::TransformRotation));
        assert!(group.clear_value_override(Property::TransformRotation));
        assert!(!group.clear_value_override(Property::TransformRotation));
        assert!(tree.evaluate_overrides(&FrameInfo::new(1.0, 0.0, 2.0)).is_empty());
    }
}
