use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use lumo_diagnostics_core::StatsAggregator;
use lumo_keypath_core::{
    resolve_key_path, ContentNode, FrameInfo, KeyPath, OverrideValue, Property, PropertyValue,
    ValueCallback,
};
use lumo_playback_core::{CompositionBounds, PlaybackDriver, PlaybackState};

use crate::config::PlayerConfig;
use crate::error::PlayerError;

/// Output of one [`CompositionPlayer::advance`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFrame {
    pub frame: f32,
    /// Absolute position within the composition, 0..=1.
    pub progress: f32,
    pub state: PlaybackState,
    /// Override values evaluated at `frame`, in content pre-order.
    pub overrides: Vec<OverrideValue>,
}

/// Drives one composition: owns its content tree, the playback driver and
/// the render time aggregator.
#[derive(Debug)]
pub struct CompositionPlayer {
    content: ContentNode,
    bounds: CompositionBounds,
    driver: PlaybackDriver,
    stats: StatsAggregator,
}

impl CompositionPlayer {
    /// Bind `root` with `bounds` and apply `config`.
    pub fn new(
        root: ContentNode,
        bounds: CompositionBounds,
        config: &PlayerConfig,
    ) -> Result<Self, PlayerError> {
        let mut driver = PlaybackDriver::with_config(&config.playback);
        driver.set_composition(bounds)?;
        if config.min_frame.is_some() || config.max_frame.is_some() {
            driver.set_min_and_max_frames(
                config.min_frame.unwrap_or(bounds.start_frame),
                config.max_frame.unwrap_or(bounds.end_frame),
            )?;
        }

        log::info!(
            "loaded composition: {} addressable node(s), frames [{}, {}] @ {} fps",
            root.addressable_count(),
            bounds.start_frame,
            bounds.end_frame,
            bounds.frame_rate
        );

        let mut player = Self {
            content: root,
            bounds,
            driver,
            stats: StatsAggregator::with_enabled(config.performance_tracking),
        };
        if config.auto_play {
            player.driver.play_animation();
        }
        Ok(player)
    }

    pub fn content(&self) -> &ContentNode {
        &self.content
    }

    pub fn bounds(&self) -> CompositionBounds {
        self.bounds
    }

    pub fn driver(&self) -> &PlaybackDriver {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut PlaybackDriver {
        &mut self.driver
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatsAggregator {
        &mut self.stats
    }

    /// Concrete key paths of every node `key_path` matches.
    pub fn resolve_key_path(&self, key_path: &KeyPath) -> Vec<KeyPath> {
        resolve_key_path(key_path, &self.content)
            .into_iter()
            .map(|resolved| resolved.into_key_path())
            .collect()
    }

    /// Attach `callback` for `property` on every node `key_path` matches.
    /// Returns how many nodes received it.
    pub fn add_value_callback<F>(
        &mut self,
        key_path: &KeyPath,
        property: Property,
        callback: F,
    ) -> Result<usize, PlayerError>
    where
        F: Fn(&FrameInfo) -> PropertyValue + Send + Sync + 'static,
    {
        let callback: ValueCallback = Arc::new(callback);
        let addresses = self.addresses(key_path);
        for address in &addresses {
            self.content
                .node_at_mut(address)?
                .register_value_override(property, Arc::clone(&callback));
        }
        log::debug!(
            "attached {} callback to {} node(s) for {}",
            property,
            addresses.len(),
            key_path
        );
        Ok(addresses.len())
    }

    /// Remove the `property` override from every node `key_path` matches.
    /// Returns how many nodes had one.
    pub fn clear_value_callback(
        &mut self,
        key_path: &KeyPath,
        property: Property,
    ) -> Result<usize, PlayerError> {
        let mut cleared = 0;
        for address in self.addresses(key_path) {
            if self.content.node_at_mut(&address)?.clear_value_override(property) {
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    pub fn frame_info(&self) -> FrameInfo {
        FrameInfo::new(
            self.driver.frame(),
            self.bounds.start_frame,
            self.bounds.end_frame,
        )
    }

    /// Tick playback by `elapsed` and evaluate overrides at the new frame.
    pub fn advance(&mut self, elapsed: Duration) -> PlayerFrame {
        let state = self.driver.tick(elapsed);
        let info = self.frame_info();
        PlayerFrame {
            frame: info.frame,
            progress: self.driver.animated_value_absolute(),
            state,
            overrides: self.content.evaluate_overrides(&info),
        }
    }

    pub fn record_render_time(&mut self, name: &str, millis: f64) {
        self.stats.record_render_time(name, millis);
    }

    fn addresses(&self, key_path: &KeyPath) -> Vec<Vec<usize>> {
        resolve_key_path(key_path, &self.content)
            .iter()
            .map(|resolved| resolved.address().to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> ContentNode {
        ContentNode::container(vec![ContentNode::layer(
            "Layer",
            vec![ContentNode::shape("Fill"), ContentNode::shape("Stroke")],
        )])
    }

    fn bounds() -> CompositionBounds {
        CompositionBounds::new(0.0, 100.0, 50.0)
    }

    #[test]
    fn rejects_invalid_sub_range() {
        let config = PlayerConfig {
            min_frame: Some(80.0),
            max_frame: Some(20.0),
            ..PlayerConfig::default()
        };
        let err = CompositionPlayer::new(tree(), bounds(), &config).unwrap_err();
        assert_eq!(err.category(), "range");
    }

    #[test]
    fn rejects_invalid_bounds() {
        let err = CompositionPlayer::new(
            tree(),
            CompositionBounds::new(0.0, 10.0, 0.0),
            &PlayerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlayerError::Playback(_)));
    }

    #[test]
    fn partial_sub_range_keeps_other_bound() {
        let config = PlayerConfig {
            max_frame: Some(60.0),
            ..PlayerConfig::default()
        };
        let player = CompositionPlayer::new(tree(), bounds(), &config).unwrap();
        assert_eq!(player.driver().min_frame(), 0.0);
        assert_eq!(player.driver().max_frame(), 60.0);
        assert_eq!(player.driver().state(), PlaybackState::Idle);
    }

    #[test]
    fn clear_callback_counts_nodes() {
        let mut player =
            CompositionPlayer::new(tree(), bounds(), &PlayerConfig::default()).unwrap();
        let all = KeyPath::new(["Layer", "*"]);
        let attached = player
            .add_value_callback(&all, Property::Opacity, |_| PropertyValue::Float(0.5))
            .unwrap();
        assert_eq!(attached, 2);
        let fill = KeyPath::new(["Layer", "Fill"]);
        assert_eq!(player.clear_value_callback(&fill, Property::Opacity).unwrap(), 1);
        assert_eq!(player.clear_value_callback(&fill, Property::Opacity).unwrap(), 0);
        assert_eq!(player.advance(Duration::ZERO).overrides.len(), 1);
    }
}
