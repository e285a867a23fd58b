use chrono::Utc;
use shared::{
    domain::{CollectionKind, Point, Product, ProductId, SessionId, SessionPhase, SwipeAction},
    error::SwipeError,
    protocol::{SessionEvent, SessionView},
};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::{
    collections::CollectionStore,
    gesture::{GestureInterpreter, SwipeThresholds},
    presentation::PresentationSettings,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// What a fused release did to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeOutcome {
    pub action: SwipeAction,
    /// The committed card; `None` when the release was neutral.
    pub product: Option<Product>,
}

/// One pass over a fixed product queue, one card at a time.
///
/// Every mutation is synchronous: when a call returns, `position`, the
/// collections and the phase already agree with each other.
pub struct Session {
    session_id: SessionId,
    queue: Vec<Product>,
    position: usize,
    phase: SessionPhase,
    store: CollectionStore,
    gesture: GestureInterpreter,
    presentation: PresentationSettings,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn new(products: Vec<Product>) -> Self {
        Self::new_with_store(products, CollectionStore::new())
    }

    pub fn new_with_store(products: Vec<Product>, store: CollectionStore) -> Self {
        Self::new_with_dependencies(
            products,
            store,
            SwipeThresholds::default(),
            PresentationSettings::default(),
        )
    }

    pub fn new_with_dependencies(
        products: Vec<Product>,
        store: CollectionStore,
        thresholds: SwipeThresholds,
        presentation: PresentationSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let phase = if products.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Browsing
        };
        let session_id = SessionId::new();
        info!(
            "session: started session_id={session_id} products={} phase={phase}",
            products.len()
        );
        Self {
            session_id,
            queue: products,
            position: 0,
            phase,
            store,
            gesture: GestureInterpreter::new(thresholds),
            presentation,
            events,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.phase == SessionPhase::Empty
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == SessionPhase::Exhausted
    }

    pub fn current_card(&self) -> Result<&Product, SwipeError> {
        match self.phase {
            SessionPhase::Browsing => Ok(&self.queue[self.position]),
            phase => Err(SwipeError::NoCurrentCard { phase }),
        }
    }

    pub fn preview_card(&self) -> Option<&Product> {
        self.queue.get(self.position + 1)
    }

    pub fn thresholds(&self) -> SwipeThresholds {
        self.gesture.thresholds()
    }

    pub fn gesture(&self) -> &GestureInterpreter {
        &self.gesture
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn begin_gesture(&mut self, point: Point) -> Result<(), SwipeError> {
        self.current_card()?;
        self.gesture.begin(point);
        debug!("session: drag started at x={} y={}", point.x, point.y);
        Ok(())
    }

    pub fn update_gesture(&mut self, point: Point) -> Result<SwipeAction, SwipeError> {
        self.gesture.update(point)
    }

    pub fn end_gesture(&mut self) -> Result<SwipeAction, SwipeError> {
        let action = self.gesture.end()?;
        if action.is_neutral() {
            if let Ok(card) = self.current_card() {
                let product_id = card.id;
                debug!("session: drag cancelled product_id={product_id}");
                self.emit(SessionEvent::GestureCancelled {
                    session_id: self.session_id,
                    product_id,
                });
            }
        }
        Ok(action)
    }

    pub fn reset_gesture(&mut self) {
        self.gesture.reset();
    }

    /// Applies `action` to the current card and advances to the next one.
    /// Returns the card that was committed.
    pub fn commit_action(&mut self, action: SwipeAction) -> Result<Product, SwipeError> {
        if action.is_neutral() {
            return Err(SwipeError::NeutralCommit);
        }
        let product = self.current_card()?.clone();
        self.gesture.reset();

        if let Some(kind) = action.collection() {
            self.add_to(kind, product.clone());
        }

        let committed_at = self.position;
        self.position += 1;
        if self.position >= self.queue.len() {
            self.phase = SessionPhase::Exhausted;
        }

        info!(
            "session: committed product_id={} action={action} position={committed_at}",
            product.id
        );
        self.emit(SessionEvent::CardCommitted {
            session_id: self.session_id,
            product: product.clone(),
            action,
            position: committed_at,
            at: Utc::now(),
        });
        if self.is_exhausted() {
            info!(
                "session: exhausted session_id={} committed={}",
                self.session_id, self.position
            );
            self.emit(SessionEvent::SessionExhausted {
                session_id: self.session_id,
                committed: self.position,
            });
        }
        Ok(product)
    }

    /// Ends the drag and commits whatever it resolved to, unless neutral.
    pub fn release_gesture(&mut self) -> Result<SwipeOutcome, SwipeError> {
        let action = self.end_gesture()?;
        if action.is_neutral() {
            return Ok(SwipeOutcome {
                action,
                product: None,
            });
        }
        let product = self.commit_action(action)?;
        Ok(SwipeOutcome {
            action,
            product: Some(product),
        })
    }

    pub fn view(&self) -> SessionView {
        match self.phase {
            SessionPhase::Empty => SessionView::NoProducts,
            SessionPhase::Exhausted => SessionView::OutOfProducts,
            SessionPhase::Browsing => SessionView::Card {
                current: self.queue[self.position].clone(),
                preview: self.preview_card().cloned(),
                status: self.gesture.provisional_intent(),
                transform: self.presentation.card_transform(self.gesture.offset()),
            },
        }
    }

    pub fn list_cart(&self) -> Vec<Product> {
        self.store.list(CollectionKind::Cart)
    }

    pub fn list_favorites(&self) -> Vec<Product> {
        self.store.list(CollectionKind::Favorites)
    }

    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        self.store.contains(CollectionKind::Cart, product_id)
    }

    pub fn is_in_favorites(&self, product_id: ProductId) -> bool {
        self.store.contains(CollectionKind::Favorites, product_id)
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        self.remove_from(CollectionKind::Cart, product_id)
    }

    pub fn remove_from_favorites(&mut self, product_id: ProductId) -> bool {
        self.remove_from(CollectionKind::Favorites, product_id)
    }

    fn add_to(&mut self, kind: CollectionKind, product: Product) {
        let product_id = product.id;
        if self.store.add(kind, product) {
            self.emit(SessionEvent::CollectionChanged {
                kind,
                product_id,
                added: true,
            });
        } else {
            debug!("session: product_id={product_id} already in {kind}");
        }
    }

    fn remove_from(&mut self, kind: CollectionKind, product_id: ProductId) -> bool {
        let removed = self.store.remove(kind, product_id);
        if removed {
            info!("session: removed product_id={product_id} from {kind}");
            self.emit(SessionEvent::CollectionChanged {
                kind,
                product_id,
                added: false,
            });
        }
        removed
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
