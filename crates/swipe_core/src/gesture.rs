//! Turns a stream of pointer samples for one card into a swipe decision.

use serde::{Deserialize, Serialize};
use shared::{
    domain::{Offset, Point, SwipeAction},
    error::SwipeError,
};
use tracing::debug;

pub const DEFAULT_PROVISIONAL_THRESHOLD: f64 = 50.0;
pub const DEFAULT_COMMIT_THRESHOLD: f64 = 100.0;

/// Distances (in input pixels) a drag has to exceed along an axis.
///
/// `provisional` drives the live status badge, `commit` decides what a
/// release does. Both compare strictly: a drag of exactly the threshold
/// does not count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeThresholds {
    pub provisional: f64,
    pub commit: f64,
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self {
            provisional: DEFAULT_PROVISIONAL_THRESHOLD,
            commit: DEFAULT_COMMIT_THRESHOLD,
        }
    }
}

impl SwipeThresholds {
    pub fn new(provisional: f64, commit: f64) -> Result<Self, SwipeError> {
        let valid = provisional.is_finite()
            && commit.is_finite()
            && provisional > 0.0
            && provisional <= commit;
        if !valid {
            return Err(SwipeError::InvalidThresholds {
                provisional,
                commit,
            });
        }
        Ok(Self {
            provisional,
            commit,
        })
    }

    pub fn provisional_intent(&self, offset: Offset) -> SwipeAction {
        classify(offset, self.provisional)
    }

    pub fn committed_action(&self, offset: Offset) -> SwipeAction {
        classify(offset, self.commit)
    }
}

// Horizontal wins over vertical; downward drags never mean anything.
fn classify(offset: Offset, threshold: f64) -> SwipeAction {
    if offset.dx > threshold {
        SwipeAction::Favorite
    } else if offset.dx < -threshold {
        SwipeAction::Pass
    } else if offset.dy < -threshold {
        SwipeAction::Cart
    } else {
        SwipeAction::Neutral
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    origin: Point,
    offset: Offset,
    intent: SwipeAction,
}

#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    thresholds: SwipeThresholds,
    drag: Option<ActiveDrag>,
}

impl GestureInterpreter {
    pub fn new(thresholds: SwipeThresholds) -> Self {
        Self {
            thresholds,
            drag: None,
        }
    }

    pub fn thresholds(&self) -> SwipeThresholds {
        self.thresholds
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_some()
    }

    pub fn origin(&self) -> Option<Point> {
        self.drag.map(|drag| drag.origin)
    }

    /// Current displacement, `(0, 0)` when no drag is in progress.
    pub fn offset(&self) -> Offset {
        self.drag.map(|drag| drag.offset).unwrap_or(Offset::ZERO)
    }

    pub fn provisional_intent(&self) -> SwipeAction {
        self.drag
            .map(|drag| drag.intent)
            .unwrap_or(SwipeAction::Neutral)
    }

    /// Starts a drag at `point`. A drag already in progress is discarded.
    pub fn begin(&mut self, point: Point) {
        if self.drag.is_some() {
            debug!("gesture: restarting drag at x={} y={}", point.x, point.y);
        }
        self.drag = Some(ActiveDrag {
            origin: point,
            offset: Offset::ZERO,
            intent: SwipeAction::Neutral,
        });
    }

    pub fn update(&mut self, point: Point) -> Result<SwipeAction, SwipeError> {
        let thresholds = self.thresholds;
        let drag = self.drag.as_mut().ok_or(SwipeError::GestureNotActive)?;
        drag.offset = point - drag.origin;
        drag.intent = thresholds.provisional_intent(drag.offset);
        debug!(
            dx = drag.offset.dx,
            dy = drag.offset.dy,
            intent = %drag.intent,
            "gesture: sample"
        );
        Ok(drag.intent)
    }

    /// Finishes the drag and resolves the action to commit. `Neutral`
    /// means the card snaps back and nothing is committed.
    pub fn end(&mut self) -> Result<SwipeAction, SwipeError> {
        let drag = self.drag.take().ok_or(SwipeError::GestureNotActive)?;
        let action = self.thresholds.committed_action(drag.offset);
        debug!(
            dx = drag.offset.dx,
            dy = drag.offset.dy,
            action = %action,
            "gesture: released"
        );
        Ok(action)
    }

    /// Abandons any drag in progress without resolving it.
    pub fn reset(&mut self) {
        self.drag = None;
    }
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
