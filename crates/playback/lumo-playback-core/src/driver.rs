//! PlaybackDriver: current position and lifecycle of one composition.
//!
//! Frame math:
//! - the active sub-range `[min_frame, max_frame]` defaults to the whole composition
//! - `animated_fraction` is direction aware (0 -> 1 towards the finishing bound)
//! - `animated_value_absolute` is the position on the full composition timeline
//!
//! Ticks advance by `elapsed_frames` in the direction given by the sign of the
//! speed. Running past the active bound either ends playback or starts another
//! pass, depending on the repeat budget.

use std::time::Duration;

use crate::composition::CompositionBounds;
use crate::config::{PlaybackConfig, RepeatCount, RepeatMode};
use crate::error::PlaybackError;
use crate::listener::{ListenerId, ListenerSet, PlaybackEvent, PlaybackListener};
use crate::state::PlaybackState;

#[derive(Debug)]
pub struct PlaybackDriver {
    composition: Option<CompositionBounds>,
    min_frame: f32,
    max_frame: f32,
    frame: f32,
    speed: f32,
    repeat_count: RepeatCount,
    repeat_mode: RepeatMode,
    /// Repeats completed since the last `play_animation`.
    completed_repeats: u32,
    /// Set while a `Reverse` repeat has flipped the configured direction.
    speed_reversed_for_repeat: bool,
    state: PlaybackState,
    listeners: ListenerSet,
}

impl PlaybackDriver {
    pub fn new() -> Self {
        Self::with_config(&PlaybackConfig::default())
    }

    pub fn with_config(config: &PlaybackConfig) -> Self {
        let mut driver = Self {
            composition: None,
            min_frame: 0.0,
            max_frame: 0.0,
            frame: 0.0,
            speed: 1.0,
            repeat_count: config.repeat_count,
            repeat_mode: config.repeat_mode,
            completed_repeats: 0,
            speed_reversed_for_repeat: false,
            state: PlaybackState::Idle,
            listeners: ListenerSet::default(),
        };
        driver.set_speed(config.speed);
        driver
    }

    /// Apply speed and repeat settings. Position and state are untouched.
    pub fn apply_config(&mut self, config: &PlaybackConfig) {
        self.set_speed(config.speed);
        self.set_repeat_count(config.repeat_count);
        self.set_repeat_mode(config.repeat_mode);
    }

    /// Bind composition bounds; resets the sub-range to the whole composition
    /// and the frame to its start.
    pub fn set_composition(&mut self, bounds: CompositionBounds) -> Result<(), PlaybackError> {
        bounds.validate()?;
        log::debug!(
            "binding composition [{}, {}] @ {} fps",
            bounds.start_frame,
            bounds.end_frame,
            bounds.frame_rate
        );
        self.composition = Some(bounds);
        self.min_frame = bounds.start_frame;
        self.max_frame = bounds.end_frame;
        self.set_frame(bounds.start_frame);
        Ok(())
    }

    /// Detach the composition and stop driving frames.
    pub fn clear_composition(&mut self) {
        self.transition(PlaybackState::Idle);
        self.composition = None;
        self.min_frame = 0.0;
        self.max_frame = 0.0;
        self.set_frame(0.0);
    }

    pub fn composition(&self) -> Option<&CompositionBounds> {
        self.composition.as_ref()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    #[inline]
    pub fn frame(&self) -> f32 {
        self.frame
    }

    /// Set the frame verbatim, even outside the active sub-range. The next
    /// tick clamps it back.
    pub fn set_frame(&mut self, frame: f32) {
        if self.frame == frame {
            return;
        }
        self.frame = frame;
        self.listeners.notify(PlaybackEvent::ValueChanged { frame });
    }

    pub fn min_frame(&self) -> f32 {
        if self.composition.is_none() {
            return 0.0;
        }
        self.min_frame
    }

    pub fn max_frame(&self) -> f32 {
        if self.composition.is_none() {
            return 0.0;
        }
        self.max_frame
    }

    pub fn set_min_frame(&mut self, min_frame: f32) -> Result<(), PlaybackError> {
        self.set_min_and_max_frames(min_frame, self.max_frame)
    }

    pub fn set_max_frame(&mut self, max_frame: f32) -> Result<(), PlaybackError> {
        self.set_min_and_max_frames(self.min_frame, max_frame)
    }

    /// Set the active sub-range. Requires
    /// `start_frame <= min_frame <= max_frame <= end_frame`; on violation
    /// nothing changes. The current frame is clamped into the new range.
    pub fn set_min_and_max_frames(
        &mut self,
        min_frame: f32,
        max_frame: f32,
    ) -> Result<(), PlaybackError> {
        let bounds = self.composition.ok_or(PlaybackError::NoComposition)?;
        for frame in [min_frame, max_frame] {
            if !frame.is_finite() || !bounds.contains(frame) {
                return Err(PlaybackError::FrameOutOfRange {
                    frame,
                    start: bounds.start_frame,
                    end: bounds.end_frame,
                });
            }
        }
        if min_frame > max_frame {
            return Err(PlaybackError::InvertedRange {
                min: min_frame,
                max: max_frame,
            });
        }
        self.min_frame = min_frame;
        self.max_frame = max_frame;
        self.set_frame(self.frame.clamp(min_frame, max_frame));
        Ok(())
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Non-finite speeds are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if !speed.is_finite() {
            log::warn!("ignoring non-finite speed {speed}");
            return;
        }
        self.speed = speed;
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.speed < 0.0
    }

    pub fn repeat_count(&self) -> RepeatCount {
        self.repeat_count
    }

    pub fn set_repeat_count(&mut self, repeat_count: RepeatCount) {
        self.repeat_count = repeat_count;
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Leaving `Reverse` mode undoes a direction flip made by a bounce.
    pub fn set_repeat_mode(&mut self, repeat_mode: RepeatMode) {
        self.repeat_mode = repeat_mode;
        if repeat_mode != RepeatMode::Reverse && self.speed_reversed_for_repeat {
            self.speed_reversed_for_repeat = false;
            self.reverse_animation_speed();
        }
    }

    /// Repeats completed since playback last started.
    pub fn completed_repeats(&self) -> u32 {
        self.completed_repeats
    }

    /// Progress towards the finishing bound of the active range, 0..=1.
    pub fn animated_fraction(&self) -> f32 {
        if self.composition.is_none() {
            return 0.0;
        }
        let span = self.max_frame - self.min_frame;
        if span <= 0.0 {
            return 0.0;
        }
        let forward = (self.frame - self.min_frame) / span;
        if self.is_reversed() {
            1.0 - forward
        } else {
            forward
        }
    }

    /// Position on the whole composition timeline, independent of direction.
    pub fn animated_value_absolute(&self) -> f32 {
        let Some(bounds) = self.composition else {
            return 0.0;
        };
        let span = bounds.duration_frames();
        if span <= 0.0 {
            return 0.0;
        }
        (self.frame - bounds.start_frame) / span
    }

    /// Start from the beginning of the active range in the current direction.
    pub fn play_animation(&mut self) {
        let start = if self.is_reversed() {
            self.max_frame()
        } else {
            self.min_frame()
        };
        self.set_frame(start);
        self.completed_repeats = 0;
        self.start_running();
    }

    /// Continue from the current frame. A frame sitting on the finishing bound
    /// restarts from the opposite one.
    pub fn resume_animation(&mut self) {
        let (min, max) = (self.min_frame(), self.max_frame());
        if self.is_reversed() && self.frame == min {
            self.set_frame(max);
        } else if !self.is_reversed() && self.frame == max {
            self.set_frame(min);
        }
        self.start_running();
    }

    /// Negate the speed. The frame stays where it is, so the reported
    /// fraction flips to its complement.
    pub fn reverse_animation_speed(&mut self) {
        self.set_speed(-self.speed);
    }

    /// Halt without notifying; `resume_animation` continues from here.
    pub fn pause_animation(&mut self) {
        if self.state.is_running() {
            self.transition(PlaybackState::Paused);
        }
    }

    /// Stop immediately and report the end of playback.
    pub fn end_animation(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let reversed = self.is_reversed();
        self.transition(PlaybackState::Ended);
        self.listeners
            .notify(PlaybackEvent::AnimationEnd { reversed });
    }

    /// Stop and report cancellation. The frame is kept. No-op unless running
    /// or paused.
    pub fn cancel(&mut self) {
        if !self.state.is_active() {
            return;
        }
        self.transition(PlaybackState::Cancelled);
        self.listeners.notify(PlaybackEvent::AnimationCancel);
    }

    /// Advance by wall-clock time, converted with the composition frame rate
    /// and the speed magnitude.
    pub fn tick(&mut self, elapsed: Duration) -> PlaybackState {
        let Some(bounds) = self.composition else {
            if self.state.is_running() {
                log::warn!("tick without a composition; ignoring");
            }
            return self.state;
        };
        let elapsed_frames = elapsed.as_secs_f32() * bounds.frame_rate * self.speed.abs();
        self.tick_frames(elapsed_frames)
    }

    /// Advance by `elapsed_frames` in the current direction. Negative elapsed
    /// time counts as zero; non-finite elapsed time is ignored.
    pub fn tick_frames(&mut self, elapsed_frames: f32) -> PlaybackState {
        if !self.state.is_running() {
            return self.state;
        }
        if self.composition.is_none() {
            log::warn!("tick without a composition; ignoring");
            return self.state;
        }
        if !elapsed_frames.is_finite() {
            log::warn!("ignoring non-finite tick of {elapsed_frames} frames");
            return self.state;
        }

        let reversed = self.is_reversed();
        let elapsed = elapsed_frames.max(0.0);
        let delta = if self.speed == 0.0 {
            0.0
        } else if reversed {
            -elapsed
        } else {
            elapsed
        };
        let current = if self.frame.is_nan() {
            if reversed {
                self.max_frame
            } else {
                self.min_frame
            }
        } else {
            self.frame
        };
        let advanced = current + delta;
        let crossed = advanced < self.min_frame || advanced > self.max_frame;
        log::trace!("tick {} -> {} (crossed: {})", self.frame, advanced, crossed);
        // the crossed bound when out of range
        let mut next = advanced.clamp(self.min_frame, self.max_frame);

        if !crossed {
            self.set_frame(next);
        } else if self.repeat_count.is_exhausted(self.completed_repeats) {
            self.set_frame(next);
            self.transition(PlaybackState::Ended);
            self.listeners
                .notify(PlaybackEvent::AnimationEnd { reversed });
        } else {
            self.listeners.notify(PlaybackEvent::AnimationRepeat);
            self.completed_repeats = self.completed_repeats.saturating_add(1);
            match self.repeat_mode {
                RepeatMode::Restart => {
                    next = if reversed {
                        self.max_frame
                    } else {
                        self.min_frame
                    };
                }
                RepeatMode::Reverse => {
                    self.speed_reversed_for_repeat = !self.speed_reversed_for_repeat;
                    self.reverse_animation_speed();
                }
            }
            self.set_frame(next);
        }
        self.state
    }

    pub fn add_listener(&mut self, listener: Box<dyn PlaybackListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn start_running(&mut self) {
        let reversed = self.is_reversed();
        self.transition(PlaybackState::Running);
        self.listeners
            .notify(PlaybackEvent::AnimationStart { reversed });
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            log::debug!("playback {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
    }
}

impl Default for PlaybackDriver {
    fn default() -> Self {
        Self::new()
    }
}
