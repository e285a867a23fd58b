use std::{fmt, ops::Sub};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ProductId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub image_url: String,
    pub price: f64,
    pub original_price: f64,
    #[serde(default)]
    pub discount_percentage: u32,
}

impl Product {
    pub fn has_discount(&self) -> bool {
        self.discount_percentage > 0
    }
}

/// Pointer position in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, origin: Point) -> Offset {
        Offset {
            dx: self.x - origin.x,
            dy: self.y - origin.y,
        }
    }
}

/// Drag displacement from the gesture origin. Negative `dy` is upward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };
}

/// Directional meaning of a drag: shown live while dragging and committed on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeAction {
    #[default]
    Neutral,
    Favorite,
    Pass,
    Cart,
}

impl SwipeAction {
    pub fn is_neutral(self) -> bool {
        self == SwipeAction::Neutral
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwipeAction::Neutral => "neutral",
            SwipeAction::Favorite => "favorite",
            SwipeAction::Pass => "pass",
            SwipeAction::Cart => "cart",
        }
    }

    /// The collection a committed action lands in, if any.
    pub fn collection(self) -> Option<CollectionKind> {
        match self {
            SwipeAction::Favorite => Some(CollectionKind::Favorites),
            SwipeAction::Cart => Some(CollectionKind::Cart),
            SwipeAction::Pass | SwipeAction::Neutral => None,
        }
    }
}

impl fmt::Display for SwipeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Cart,
    Favorites,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Cart => f.write_str("cart"),
            CollectionKind::Favorites => f.write_str("favorites"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Empty,
    Browsing,
    Exhausted,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Empty => f.write_str("empty"),
            SessionPhase::Browsing => f.write_str("browsing"),
            SessionPhase::Exhausted => f.write_str("exhausted"),
        }
    }
}
