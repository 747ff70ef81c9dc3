//! Teaser playback controller
//!
//! Wraps one [`MediaElement`] and keeps [`PlaybackState`] in sync with it.
//! State is only ever derived from what the element reports: a refused
//! `play()` leaves the player paused, a denied fullscreen request leaves the
//! fullscreen flag untouched.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::media::element::{MediaElement, MediaEvent};
use crate::models::PlaybackState;

/// Controls hide after this long without pointer movement while playing
pub const IDLE_HIDE_MS: i64 = 2_500;

#[derive(Debug)]
pub struct PlaybackController {
    element: Box<dyn MediaElement>,
    clock: Arc<dyn Clock>,
    state: PlaybackState,
    last_pointer: DateTime<Utc>,
}

impl PlaybackController {
    pub fn new(element: Box<dyn MediaElement>, clock: Arc<dyn Clock>) -> Self {
        let last_pointer = clock.now();
        let state = PlaybackState {
            is_muted: element.muted(),
            is_fullscreen: element.is_fullscreen(),
            is_playing: !element.paused(),
            ..PlaybackState::default()
        };
        Self {
            element,
            clock,
            state,
            last_pointer,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Position in seconds
    pub fn position(&self) -> f64 {
        self.element.current_time()
    }

    /// Length in seconds (0 or NaN while unknown)
    pub fn duration(&self) -> f64 {
        self.element.duration()
    }

    // -------------------------------------------------------------------------
    // Playback
    // -------------------------------------------------------------------------

    /// Attempt playback without a user gesture (overlay just opened)
    pub fn autoplay(&mut self) {
        self.start();
    }

    /// User-initiated play
    pub fn play(&mut self) {
        self.element.activate();
        self.start();
    }

    pub fn pause(&mut self) {
        self.element.pause();
        self.sync_playing();
        self.state.controls_visible = true;
    }

    pub fn toggle_play(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    fn start(&mut self) {
        if let Err(e) = self.element.play() {
            tracing::debug!(error = %e, "playback refused by host");
        }
        self.sync_playing();
        self.last_pointer = self.clock.now();
    }

    fn sync_playing(&mut self) {
        self.state.is_playing = !self.element.paused();
    }

    /// Jump to `fraction` of the total length. No-op while the length is unknown.
    pub fn seek(&mut self, fraction: f64) {
        let duration = self.element.duration();
        if !has_duration(duration) || fraction.is_nan() {
            return;
        }
        let target = fraction.clamp(0.0, 1.0) * duration;
        self.element.set_current_time(target);
        self.on_time_update(self.element.current_time(), duration);
    }

    /// Seek relative to the current position, as a fraction of the length
    pub fn seek_by(&mut self, delta_fraction: f64) {
        let duration = self.element.duration();
        if !has_duration(duration) {
            return;
        }
        let current = self.element.current_time() / duration;
        self.seek(current + delta_fraction);
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.element.muted();
        self.element.set_muted(muted);
        self.state.is_muted = self.element.muted();
    }

    /// Request or leave fullscreen. The flag flips when the host confirms.
    pub fn toggle_fullscreen(&mut self) {
        let result = if self.element.is_fullscreen() {
            self.element.exit_fullscreen()
        } else {
            self.element.request_fullscreen()
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "fullscreen change refused by host");
        }
    }

    // -------------------------------------------------------------------------
    // Element notifications
    // -------------------------------------------------------------------------

    pub fn on_time_update(&mut self, current: f64, duration: f64) {
        self.state.progress_percent = progress_percent(current, duration);
    }

    pub fn on_ended(&mut self) {
        self.state.is_playing = false;
        self.state.controls_visible = true;
    }

    pub fn on_fullscreen_change(&mut self, fullscreen: bool) {
        self.state.is_fullscreen = fullscreen;
    }

    pub fn handle(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate { current, duration } => self.on_time_update(current, duration),
            MediaEvent::Ended => self.on_ended(),
            MediaEvent::FullscreenChange(on) => self.on_fullscreen_change(on),
        }
    }

    /// Pump element notifications and apply the idle-hide rule
    pub fn frame(&mut self) {
        for event in self.element.poll() {
            self.handle(event);
        }
        self.sync_playing();

        if self.state.is_playing && self.state.controls_visible {
            let idle = self.clock.now() - self.last_pointer;
            if idle >= Duration::milliseconds(IDLE_HIDE_MS) {
                self.state.controls_visible = false;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Pointer
    // -------------------------------------------------------------------------

    pub fn pointer_moved(&mut self) {
        self.last_pointer = self.clock.now();
        self.state.controls_visible = true;
    }

    pub fn pointer_left(&mut self) {
        if self.state.is_playing {
            self.state.controls_visible = false;
        }
    }
}

fn has_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}

/// `current / duration * 100`, clamped; 0 while the length is unknown
pub fn progress_percent(current: f64, duration: f64) -> f64 {
    if !has_duration(duration) || !current.is_finite() {
        return 0.0;
    }
    (current / duration * 100.0).clamp(0.0, 100.0)
}
