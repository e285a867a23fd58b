//! Visual state derived from gesture geometry. No timing happens here: the
//! reveal delay is a value for the render loop to wait on after a commit.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::{
    domain::{Offset, SwipeAction},
    protocol::CardTransform,
};

pub const DEFAULT_ROTATION_FACTOR: f64 = 0.1;
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationSettings {
    /// Degrees of tilt per pixel of horizontal drag.
    pub rotation_factor: f64,
    pub reveal_delay: Duration,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            rotation_factor: DEFAULT_ROTATION_FACTOR,
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }
}

impl PresentationSettings {
    pub fn card_transform(&self, offset: Offset) -> CardTransform {
        CardTransform {
            translate: offset,
            rotation_deg: offset.dx * self.rotation_factor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitAnimation {
    SwipeRight,
    SwipeLeft,
    SwipeUp,
}

impl ExitAnimation {
    /// `None` for a neutral release, which snaps the card back instead.
    pub fn for_action(action: SwipeAction) -> Option<Self> {
        match action {
            SwipeAction::Favorite => Some(ExitAnimation::SwipeRight),
            SwipeAction::Pass => Some(ExitAnimation::SwipeLeft),
            SwipeAction::Cart => Some(ExitAnimation::SwipeUp),
            SwipeAction::Neutral => None,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            ExitAnimation::SwipeRight => "swipe-right",
            ExitAnimation::SwipeLeft => "swipe-left",
            ExitAnimation::SwipeUp => "swipe-up",
        }
    }
}

/// Stamp text drawn over the card while dragging.
pub fn status_badge(status: SwipeAction) -> Option<&'static str> {
    match status {
        SwipeAction::Favorite => Some("FAVORITE"),
        SwipeAction::Pass => Some("PASS"),
        SwipeAction::Cart => Some("CART"),
        SwipeAction::Neutral => None,
    }
}

#[cfg(test)]
#[path = "tests/presentation_tests.rs"]
mod tests;
