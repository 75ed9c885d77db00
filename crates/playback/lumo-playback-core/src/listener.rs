//! Lifecycle listeners for the playback driver.
//!
//! Listeners are notified synchronously, in registration order, from inside
//! the driver call that caused the transition.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Callbacks fired by [`PlaybackDriver`](crate::PlaybackDriver). Every method
/// defaults to a no-op so listeners implement only what they need.
pub trait PlaybackListener {
    fn on_animation_start(&mut self, _reversed: bool) {}
    fn on_animation_end(&mut self, _reversed: bool) {}
    fn on_animation_repeat(&mut self) {}
    fn on_animation_cancel(&mut self) {}
    /// Fired whenever the frame changes, by direct assignment or by a tick.
    fn on_value_changed(&mut self, _frame: f32) {}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

/// Discrete playback notifications, as recorded by [`EventRecorder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    AnimationStart { reversed: bool },
    AnimationEnd { reversed: bool },
    AnimationRepeat,
    AnimationCancel,
    ValueChanged { frame: f32 },
}

impl PlaybackEvent {
    /// True for everything except `ValueChanged`.
    #[inline]
    pub fn is_lifecycle(&self) -> bool {
        !matches!(self, Self::ValueChanged { .. })
    }
}

/// Listener that appends every notification to a shared log.
///
/// Clones share the same log, so one clone can be handed to the driver while
/// the host keeps another to read from.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<PlaybackEvent>>>,
    skip_value_changes: bool,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that ignores `ValueChanged` notifications.
    pub fn lifecycle_only() -> Self {
        Self {
            events: Rc::default(),
            skip_value_changes: true,
        }
    }

    pub fn events(&self) -> Vec<PlaybackEvent> {
        self.events.borrow().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn count(&self, pred: impl Fn(&PlaybackEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: PlaybackEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl PlaybackListener for EventRecorder {
    fn on_animation_start(&mut self, reversed: bool) {
        self.push(PlaybackEvent::AnimationStart { reversed });
    }

    fn on_animation_end(&mut self, reversed: bool) {
        self.push(PlaybackEvent::AnimationEnd { reversed });
    }

    fn on_animation_repeat(&mut self) {
        self.push(PlaybackEvent::AnimationRepeat);
    }

    fn on_animation_cancel(&mut self) {
        self.push(PlaybackEvent::AnimationCancel);
    }

    fn on_value_changed(&mut self, frame: f32) {
        if !self.skip_value_changes {
            self.push(PlaybackEvent::ValueChanged { frame });
        }
    }
}

/// Registered listeners plus a monotonic id allocator.
#[derive(Default)]
pub(crate) struct ListenerSet {
    next_id: u32,
    entries: Vec<(ListenerId, Box<dyn PlaybackListener>)>,
}

impl ListenerSet {
    pub(crate) fn add(&mut self, listener: Box<dyn PlaybackListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(eid, _)| *eid != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, event: PlaybackEvent) {
        for (_, listener) in self.entries.iter_mut() {
            match event {
                PlaybackEvent::AnimationStart { reversed } => listener.on_animation_start(reversed),
                PlaybackEvent::AnimationEnd { reversed } => listener.on_animation_end(reversed),
                PlaybackEvent::AnimationRepeat => listener.on_animation_repeat(),
                PlaybackEvent::AnimationCancel => listener.on_animation_cancel(),
                PlaybackEvent::ValueChanged { frame } => listener.on_value_changed(frame),
            }
        }
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("next_id", &self.next_id)
            .field("listeners", &self.entries.len())
            .finish()
    }
}
