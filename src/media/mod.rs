//! Teaser media
//!
//! - `element`: media element surface and the clock-driven virtual element
//! - `controller`: playback state kept in sync with an element
//! - `external`: hand-off to VLC/mpv

pub mod controller;
pub mod element;
pub mod external;

pub use controller::PlaybackController;
pub use element::{AutoplayPolicy, MediaElement, MediaError, MediaEvent, MediaSource, VirtualElement};
pub use external::{ExternalPlayer, PlayerError, PlayerKind};
