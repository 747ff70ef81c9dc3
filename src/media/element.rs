//! Media element abstraction
//!
//! [`MediaElement`] is the surface the playback controller drives: the same
//! operations and notifications a browser video element exposes. The
//! terminal host uses [`VirtualElement`], a clock-driven timeline.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::clock::Clock;

/// Notifications raised by a media element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    /// Playback position moved
    TimeUpdate { current: f64, duration: f64 },
    /// Reached end of stream
    Ended,
    /// Host entered or left fullscreen
    FullscreenChange(bool),
}

/// Host refusals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("playback not allowed without user activation")]
    NotAllowed,
    #[error("fullscreen request denied")]
    Denied,
    #[error("media not ready")]
    Unsupported,
}

/// Whether playback may start before the user has interacted with the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayPolicy {
    #[default]
    Allowed,
    /// Reject `play()` until [`MediaElement::activate`] has been called
    RequireActivation,
}

pub trait MediaElement: Send + fmt::Debug {
    /// Start playback. The host may refuse.
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn paused(&self) -> bool;

    /// Position in seconds
    fn current_time(&self) -> f64;
    /// Total length in seconds; 0 or NaN while unknown
    fn duration(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);

    fn muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);

    /// Ask the host for fullscreen. Success is reported later through
    /// [`MediaEvent::FullscreenChange`].
    fn request_fullscreen(&mut self) -> Result<(), MediaError>;
    fn exit_fullscreen(&mut self) -> Result<(), MediaError>;
    fn is_fullscreen(&self) -> bool;

    /// Record a user gesture on the player
    fn activate(&mut self) {}

    /// Drain notifications raised since the last poll
    fn poll(&mut self) -> Vec<MediaEvent>;
}

/// Builds a fresh element each time the teaser overlay opens
pub struct MediaSource {
    make: Box<dyn Fn(Arc<dyn Clock>) -> Box<dyn MediaElement> + Send>,
}

impl MediaSource {
    pub fn new<F>(make: F) -> Self
    where
        F: Fn(Arc<dyn Clock>) -> Box<dyn MediaElement> + Send + 'static,
    {
        Self { make: Box::new(make) }
    }

    /// Virtual timeline of `duration_secs`
    pub fn virtual_teaser(duration_secs: f64, autoplay: AutoplayPolicy) -> Self {
        Self::new(move |clock: Arc<dyn Clock>| -> Box<dyn MediaElement> {
            Box::new(VirtualElement::new(clock, duration_secs).with_autoplay(autoplay))
        })
    }

    pub fn open(&self, clock: Arc<dyn Clock>) -> Box<dyn MediaElement> {
        (self.make)(clock)
    }
}

impl fmt::Debug for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaSource").finish_non_exhaustive()
    }
}

/// Timeline element advanced by a [`Clock`]
#[derive(Debug)]
pub struct VirtualElement {
    clock: Arc<dyn Clock>,
    duration: f64,
    /// Position at `playing_since` (or the paused position)
    base: f64,
    playing_since: Option<DateTime<Utc>>,
    muted: bool,
    fullscreen: bool,
    fullscreen_allowed: bool,
    autoplay: AutoplayPolicy,
    activated: bool,
    pending: VecDeque<MediaEvent>,
}

impl VirtualElement {
    pub fn new(clock: Arc<dyn Clock>, duration_secs: f64) -> Self {
        Self {
            clock,
            duration: duration_secs,
            base: 0.0,
            playing_since: None,
            muted: false,
            fullscreen: false,
            fullscreen_allowed: true,
            autoplay: AutoplayPolicy::Allowed,
            activated: false,
            pending: VecDeque::new(),
        }
    }

    pub fn with_autoplay(mut self, policy: AutoplayPolicy) -> Self {
        self.autoplay = policy;
        self
    }

    pub fn with_fullscreen_allowed(mut self, allowed: bool) -> Self {
        self.fullscreen_allowed = allowed;
        self
    }

    fn has_duration(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }

    fn position_at(&self, now: DateTime<Utc>) -> f64 {
        match self.playing_since {
            Some(since) => {
                let elapsed = (now - since).num_milliseconds().max(0) as f64 / 1000.0;
                (self.base + elapsed).min(self.duration)
            }
            None => self.base,
        }
    }
}

impl MediaElement for VirtualElement {
    fn play(&mut self) -> Result<(), MediaError> {
        if self.autoplay == AutoplayPolicy::RequireActivation && !self.activated {
            return Err(MediaError::NotAllowed);
        }
        if !self.has_duration() {
            return Err(MediaError::Unsupported);
        }
        if self.playing_since.is_some() {
            return Ok(());
        }
        // Playing from the end starts over
        if self.base >= self.duration {
            self.base = 0.0;
        }
        self.playing_since = Some(self.clock.now());
        Ok(())
    }

    fn pause(&mut self) {
        self.base = self.position_at(self.clock.now());
        self.playing_since = None;
    }

    fn paused(&self) -> bool {
        self.playing_since.is_none()
    }

    fn current_time(&self) -> f64 {
        self.position_at(self.clock.now())
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_current_time(&mut self, secs: f64) {
        let upper = if self.has_duration() { self.duration } else { 0.0 };
        self.base = secs.clamp(0.0, upper);
        if self.playing_since.is_some() {
            self.playing_since = Some(self.clock.now());
        }
        self.pending.push_back(MediaEvent::TimeUpdate {
            current: self.base,
            duration: self.duration,
        });
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn request_fullscreen(&mut self) -> Result<(), MediaError> {
        if !self.fullscreen_allowed {
            return Err(MediaError::Denied);
        }
        if !self.fullscreen {
            self.pending.push_back(MediaEvent::FullscreenChange(true));
        }
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), MediaError> {
        if self.fullscreen {
            self.pending.push_back(MediaEvent::FullscreenChange(false));
        }
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn activate(&mut self) {
        self.activated = true;
    }

    fn poll(&mut self) -> Vec<MediaEvent> {
        let mut events: Vec<MediaEvent> = self.pending.drain(..).collect();
        for event in &events {
            if let MediaEvent::FullscreenChange(on) = event {
                self.fullscreen = *on;
            }
        }

        if self.playing_since.is_some() {
            let now = self.clock.now();
            let current = self.position_at(now);
            if current >= self.duration {
                self.base = self.duration;
                self.playing_since = None;
                events.push(MediaEvent::TimeUpdate {
                    current: self.duration,
                    duration: self.duration,
                });
                events.push(MediaEvent::Ended);
            } else {
                events.push(MediaEvent::TimeUpdate {
                    current,
                    duration: self.duration,
                });
            }
        }
        events
    }
}
