//! Swipe-to-decide card deck: gesture interpretation, the card queue, and
//! the cart/favorites collections it feeds.

pub mod collections;
pub mod gesture;
pub mod presentation;
mod session;

pub use collections::{Collection, CollectionStore};
pub use gesture::{GestureInterpreter, SwipeThresholds};
pub use presentation::{status_badge, ExitAnimation, PresentationSettings};
pub use session::{Session, SwipeOutcome};
pub use shared::{
    domain::{CollectionKind, Offset, Point, Product, ProductId, SessionPhase, SwipeAction},
    error::SwipeError,
    protocol::{CardTransform, SessionEvent, SessionView},
};
