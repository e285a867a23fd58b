use super::*;
use shared::protocol::CardTransform;

fn product(id: i64) -> Product {
    Product {
        id: ProductId(id),
        name: format!("product {id}"),
        brand: "acme".to_string(),
        image_url: format!("https://img.example/{id}.jpg"),
        price: 799.0,
        original_price: 799.0,
        discount_percentage: 0,
    }
}

fn session_of(count: i64) -> Session {
    Session::new((1..=count).map(product).collect())
}

fn swipe(session: &mut Session, to: (f64, f64)) -> SwipeOutcome {
    session.begin_gesture(Point::new(0.0, 0.0)).expect("begin");
    session
        .update_gesture(Point::new(to.0, to.1))
        .expect("update");
    session.release_gesture().expect("release")
}

fn ids(items: &[Product]) -> Vec<i64> {
    items.iter().map(|p| p.id.0).collect()
}

#[test]
fn starts_browsing_at_first_card() {
    let session = session_of(3);
    assert_eq!(session.phase(), SessionPhase::Browsing);
    assert_eq!(session.position(), 0);
    assert_eq!(session.current_card().expect("current").id, ProductId(1));
    assert_eq!(session.preview_card().map(|p| p.id), Some(ProductId(2)));
    assert!(!session.is_empty());
    assert!(!session.is_exhausted());
}

#[test]
fn empty_queue_is_empty_not_exhausted() {
    let mut session = Session::new(Vec::new());
    assert!(session.is_empty());
    assert!(!session.is_exhausted());
    assert_eq!(
        session.current_card(),
        Err(SwipeError::NoCurrentCard {
            phase: SessionPhase::Empty
        })
    );
    assert!(session.preview_card().is_none());
    assert_eq!(
        session.begin_gesture(Point::new(0.0, 0.0)),
        Err(SwipeError::NoCurrentCard {
            phase: SessionPhase::Empty
        })
    );
    assert_eq!(
        session.commit_action(SwipeAction::Pass),
        Err(SwipeError::NoCurrentCard {
            phase: SessionPhase::Empty
        })
    );
    assert!(!session.is_exhausted());
    assert_eq!(session.view(), SessionView::NoProducts);
}

#[test]
fn favorite_swipe_adds_to_favorites_and_advances() {
    let mut session = session_of(2);
    session.begin_gesture(Point::new(0.0, 0.0)).expect("begin");
    assert_eq!(
        session.update_gesture(Point::new(60.0, 0.0)).expect("update"),
        SwipeAction::Favorite
    );
    session
        .update_gesture(Point::new(150.0, 0.0))
        .expect("update");
    let action = session.end_gesture().expect("end");
    assert_eq!(action, SwipeAction::Favorite);
    let committed = session.commit_action(action).expect("commit");

    assert_eq!(committed.id, ProductId(1));
    assert!(session.list_cart().is_empty());
    assert_eq!(ids(&session.list_favorites()), vec![1]);
    assert_eq!(session.current_card().expect("current").id, ProductId(2));
    assert_eq!(session.position(), 1);
}

#[test]
fn neutral_release_keeps_the_card() {
    let mut session = session_of(2);
    let outcome = swipe(&mut session, (10.0, 10.0));

    assert_eq!(
        outcome,
        SwipeOutcome {
            action: SwipeAction::Neutral,
            product: None
        }
    );
    assert_eq!(session.position(), 0);
    assert_eq!(session.current_card().expect("current").id, ProductId(1));
    assert!(!session.gesture().is_active());
}

#[test]
fn pass_advances_without_touching_collections() {
    let mut session = session_of(2);
    let outcome = swipe(&mut session, (-140.0, 30.0));
    assert_eq!(outcome.action, SwipeAction::Pass);
    assert_eq!(outcome.product.map(|p| p.id), Some(ProductId(1)));
    assert!(session.list_cart().is_empty());
    assert!(session.list_favorites().is_empty());
    assert_eq!(session.position(), 1);
}

#[test]
fn upward_swipe_adds_to_cart() {
    let mut session = session_of(2);
    swipe(&mut session, (20.0, -180.0));
    assert_eq!(ids(&session.list_cart()), vec![1]);
    assert!(session.is_in_cart(ProductId(1)));
    assert!(!session.is_in_favorites(ProductId(1)));
}

#[test]
fn committing_neutral_is_rejected() {
    let mut session = session_of(2);
    assert_eq!(
        session.commit_action(SwipeAction::Neutral),
        Err(SwipeError::NeutralCommit)
    );
    assert_eq!(session.position(), 0);
}

#[test]
fn gesture_calls_without_begin_are_rejected() {
    let mut session = session_of(1);
    assert_eq!(
        session.update_gesture(Point::new(5.0, 5.0)),
        Err(SwipeError::GestureNotActive)
    );
    assert_eq!(session.end_gesture(), Err(SwipeError::GestureNotActive));
    assert_eq!(session.release_gesture(), Err(SwipeError::GestureNotActive));
}

#[test]
fn committing_every_card_exhausts_the_session() {
    let mut session = session_of(3);
    for action in [SwipeAction::Favorite, SwipeAction::Pass, SwipeAction::Cart] {
        session.commit_action(action).expect("commit");
    }

    assert!(session.is_exhausted());
    assert!(!session.is_empty());
    assert_eq!(session.position(), 3);
    assert_eq!(session.remaining(), 0);
    assert_eq!(
        session.current_card(),
        Err(SwipeError::NoCurrentCard {
            phase: SessionPhase::Exhausted
        })
    );
    assert!(session.preview_card().is_none());
    assert_eq!(
        session.commit_action(SwipeAction::Pass),
        Err(SwipeError::NoCurrentCard {
            phase: SessionPhase::Exhausted
        })
    );
    assert_eq!(session.view(), SessionView::OutOfProducts);
}

#[test]
fn preview_is_absent_on_last_card() {
    let mut session = session_of(2);
    session.commit_action(SwipeAction::Pass).expect("commit");
    assert_eq!(session.current_card().expect("current").id, ProductId(2));
    assert!(session.preview_card().is_none());
}

#[test]
fn duplicate_products_do_not_duplicate_collection_entries() {
    let mut session = Session::new(vec![product(7), product(7)]);
    session.commit_action(SwipeAction::Favorite).expect("first");
    session.commit_action(SwipeAction::Favorite).expect("second");
    assert_eq!(ids(&session.list_favorites()), vec![7]);
    assert!(session.is_exhausted());
}

#[test]
fn injected_store_contents_are_respected() {
    let mut store = CollectionStore::new();
    store.add(CollectionKind::Cart, product(1));
    let mut session = Session::new_with_store(vec![product(1), product(2)], store);

    swipe(&mut session, (0.0, -150.0));
    assert_eq!(ids(&session.list_cart()), vec![1]);
    assert_eq!(session.store().collection(CollectionKind::Cart).len(), 1);
}

#[test]
fn manual_removal_leaves_position_and_cart_alone() {
    let mut session = session_of(3);
    swipe(&mut session, (0.0, -150.0));
    swipe(&mut session, (150.0, 0.0));
    assert_eq!(session.position(), 2);

    assert!(session.remove_from_favorites(ProductId(2)));
    assert!(session.list_favorites().is_empty());
    assert_eq!(ids(&session.list_cart()), vec![1]);
    assert_eq!(session.position(), 2);

    assert!(!session.remove_from_favorites(ProductId(2)));
    assert!(!session.remove_from_cart(ProductId(99)));
    assert!(session.remove_from_cart(ProductId(1)));
    assert!(session.list_cart().is_empty());
}

#[test]
fn view_reflects_live_drag() {
    let mut session = session_of(2);
    session.begin_gesture(Point::new(10.0, 10.0)).expect("begin");
    session
        .update_gesture(Point::new(80.0, 0.0))
        .expect("update");

    match session.view() {
        SessionView::Card {
            current,
            preview,
            status,
            transform,
        } => {
            assert_eq!(current.id, ProductId(1));
            assert_eq!(preview.map(|p| p.id), Some(ProductId(2)));
            assert_eq!(status, SwipeAction::Favorite);
            assert_eq!(transform.translate.dx, 70.0);
            assert_eq!(transform.translate.dy, -10.0);
        }
        other => panic!("expected a card view, got {other:?}"),
    }

    session.end_gesture().expect("end");
    match session.view() {
        SessionView::Card {
            status, transform, ..
        } => {
            assert_eq!(status, SwipeAction::Neutral);
            assert_eq!(transform, CardTransform::IDENTITY);
        }
        other => panic!("expected a card view, got {other:?}"),
    }
}

#[test]
fn commit_discards_an_active_drag() {
    let mut session = session_of(2);
    session.begin_gesture(Point::new(0.0, 0.0)).expect("begin");
    session
        .update_gesture(Point::new(0.0, -70.0))
        .expect("update");
    session.commit_action(SwipeAction::Pass).expect("commit");

    assert!(!session.gesture().is_active());
    assert_eq!(session.end_gesture(), Err(SwipeError::GestureNotActive));
}

#[tokio::test]
async fn subscribers_see_commits_and_exhaustion() {
    let mut session = session_of(1);
    let session_id = session.session_id();
    let mut events = session.subscribe_events();

    swipe(&mut session, (5.0, 5.0));
    swipe(&mut session, (200.0, 0.0));

    match events.recv().await.expect("cancel event") {
        SessionEvent::GestureCancelled {
            session_id: id,
            product_id,
        } => {
            assert_eq!(id, session_id);
            assert_eq!(product_id, ProductId(1));
        }
        other => panic!("unexpected event {other:?}"),
    }
    match events.recv().await.expect("collection event") {
        SessionEvent::CollectionChanged {
            kind,
            product_id,
            added,
        } => {
            assert_eq!(kind, CollectionKind::Favorites);
            assert_eq!(product_id, ProductId(1));
            assert!(added);
        }
        other => panic!("unexpected event {other:?}"),
    }
    match events.recv().await.expect("commit event") {
        SessionEvent::CardCommitted {
            product,
            action,
            position,
            ..
        } => {
            assert_eq!(product.id, ProductId(1));
            assert_eq!(action, SwipeAction::Favorite);
            assert_eq!(position, 0);
        }
        other => panic!("unexpected event {other:?}"),
    }
    match events.recv().await.expect("exhausted event") {
        SessionEvent::SessionExhausted { committed, .. } => assert_eq!(committed, 1),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn custom_thresholds_flow_through_session() {
    let thresholds = SwipeThresholds::new(20.0, 40.0).expect("thresholds");
    let mut session = Session::new_with_dependencies(
        vec![product(1), product(2)],
        CollectionStore::new(),
        thresholds,
        PresentationSettings::default(),
    );
    let outcome = swipe(&mut session, (45.0, 0.0));
    assert_eq!(outcome.action, SwipeAction::Favorite);
    assert_eq!(session.thresholds(), thresholds);
}
