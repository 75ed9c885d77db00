//! Named render time aggregation.

use std::fmt;

use indexmap::IndexMap;

use crate::running_stat::RunningStat;

/// Segment name reported when a whole frame has been rendered.
pub const FRAME_SEGMENT: &str = "__container";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameListenerId(pub u32);

type FrameListener = Box<dyn FnMut(f64)>;

/// Collects render time samples per segment name while enabled.
///
/// Segments are created on first sample and kept in first-recorded order,
/// which is also the tie-break order of [`sorted_render_times`].
///
/// [`sorted_render_times`]: StatsAggregator::sorted_render_times
#[derive(Default)]
pub struct StatsAggregator {
    enabled: bool,
    stats: IndexMap<String, RunningStat>,
    next_listener: u32,
    frame_listeners: Vec<(FrameListenerId, FrameListener)>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggle recording. Samples already collected are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Record one sample in milliseconds. Ignored while disabled.
    pub fn record_render_time(&mut self, name: &str, millis: f64) {
        if !self.enabled {
            return;
        }
        match self.stats.get_mut(name) {
            Some(stat) => stat.record(millis),
            None => {
                let mut stat = RunningStat::new();
                stat.record(millis);
                self.stats.insert(name.to_owned(), stat);
            }
        }
        if name == FRAME_SEGMENT {
            for (_, listener) in self.frame_listeners.iter_mut() {
                listener(millis);
            }
        }
    }

    /// Snapshot of `(name, mean)` pairs, slowest first.
    pub fn sorted_render_times(&self) -> Vec<(String, f64)> {
        if !self.enabled {
            return Vec::new();
        }
        let mut out: Vec<(String, f64)> = self
            .stats
            .iter()
            .map(|(name, stat)| (name.clone(), stat.mean))
            .collect();
        // stable: equal means keep insertion order
        out.sort_by(|a, b| b.1.total_cmp(&a.1));
        out
    }

    pub fn running_stat(&self, name: &str) -> Option<RunningStat> {
        self.stats.get(name).copied()
    }

    pub fn segment_count(&self) -> usize {
        self.stats.len()
    }

    pub fn clear_render_times(&mut self) {
        self.stats.clear();
    }

    /// Called with the frame time each time a whole frame is recorded.
    pub fn add_frame_listener(&mut self, listener: impl FnMut(f64) + 'static) -> FrameListenerId {
        let id = FrameListenerId(self.next_listener);
        self.next_listener = self.next_listener.wrapping_add(1);
        self.frame_listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_frame_listener(&mut self, id: FrameListenerId) -> bool {
        let before = self.frame_listeners.len();
        self.frame_listeners.retain(|(lid, _)| *lid != id);
        self.frame_listeners.len() != before
    }

    pub fn log_render_times(&self) {
        if !self.enabled {
            return;
        }
        log::debug!("Render times:");
        for (name, mean) in self.sorted_render_times() {
            log::debug!("\t\t{name:>30}:{mean:.2}");
        }
    }
}

impl fmt::Debug for StatsAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsAggregator")
            .field("enabled", &self.enabled)
            .field("stats", &self.stats)
            .field("frame_listeners", &self.frame_listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn disabled_ignores_samples() {
        let mut agg = StatsAggregator::new();
        agg.record_render_time("Layer", 3.0);
        assert!(agg.running_stat("Layer").is_none());
        agg.set_enabled(true);
        agg.record_render_time("Layer", 3.0);
        assert_eq!(agg.running_stat("Layer").map(|s| s.count), Some(1));
    }

    #[test]
    fn ties_keep_first_recorded_order() {
        let mut agg = StatsAggregator::with_enabled(true);
        agg.record_render_time("b", 1.0);
        agg.record_render_time("a", 1.0);
        agg.record_render_time("c", 5.0);
        let names: Vec<String> = agg
            .sorted_render_times()
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn frame_listeners_fire_on_frame_segment_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut agg = StatsAggregator::with_enabled(true);
        let sink = Rc::clone(&seen);
        let id = agg.add_frame_listener(move |ms| sink.borrow_mut().push(ms));

        agg.record_render_time("Shape Layer 1", 2.0);
        agg.record_render_time(FRAME_SEGMENT, 16.0);
        assert_eq!(*seen.borrow(), vec![16.0]);

        assert!(agg.remove_frame_listener(id));
        assert!(!agg.remove_frame_listener(id));
        agg.record_render_time(FRAME_SEGMENT, 17.0);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn clear_drops_segments() {
        let mut agg = StatsAggregator::with_enabled(true);
        agg.record_render_time("x", 1.0);
        agg.clear_render_times();
        assert_eq!(agg.segment_count(), 0);
        assert!(agg.sorted_render_times().is_empty());
    }
}
