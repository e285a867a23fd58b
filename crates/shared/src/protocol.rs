use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CollectionKind, Offset, Product, ProductId, SessionId, SwipeAction},
    error::ErrorPayload,
};

/// One entry of a recorded pointer script, as fed by a rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    RemoveFromCart { product_id: ProductId },
    RemoveFromFavorites { product_id: ProductId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    CardCommitted {
        session_id: SessionId,
        product: Product,
        action: SwipeAction,
        position: usize,
        at: DateTime<Utc>,
    },
    GestureCancelled {
        session_id: SessionId,
        product_id: ProductId,
    },
    SessionExhausted {
        session_id: SessionId,
        committed: usize,
    },
    CollectionChanged {
        kind: CollectionKind,
        product_id: ProductId,
        added: bool,
    },
    Error(ErrorPayload),
}

/// Translate and tilt applied to the card under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CardTransform {
    pub translate: Offset,
    pub rotation_deg: f64,
}

impl CardTransform {
    pub const IDENTITY: CardTransform = CardTransform {
        translate: Offset::ZERO,
        rotation_deg: 0.0,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionView {
    NoProducts,
    OutOfProducts,
    Card {
        current: Product,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preview: Option<Product>,
        status: SwipeAction,
        transform: CardTransform,
    },
}
