//! End-to-end shopper flows driven through `UiEvent`s.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use studio_core::{CategoryFilter, Price, ProductId, Size};
use studio_integration_tests::open_session;
use studio_storefront::{StorefrontError, UiEvent};

fn event(json: &str) -> UiEvent {
    serde_json::from_str(json).unwrap()
}

#[test]
fn browse_filter_and_search() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_session(dir.path());

    let view = session
        .handle(event(r#"{"event":"set_category","name":"Outerwear"}"#))
        .unwrap();
    assert_eq!(view.active_category, CategoryFilter::Only("Outerwear".to_string()));
    assert_eq!(view.products.len(), 1);
    assert_eq!(view.products[0].name, "Trench Coat");

    let view = session
        .handle(event(r#"{"event":"set_search_query","text":"HOODIE"}"#))
        .unwrap();
    assert!(view.products.is_empty());

    let view = session
        .handle(event(r#"{"event":"set_category","name":"All"}"#))
        .unwrap();
    assert_eq!(view.products.len(), 1);
    assert_eq!(view.products[0].name, "Oversized Hoodie");

    let view = session
        .handle(event(r#"{"event":"set_search_query","text":""}"#))
        .unwrap();
    assert_eq!(view.products.len(), 4);
}

#[test]
fn quick_view_purchase_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_session(dir.path());

    for json in [
        r#"{"event":"set_selected_product","product_id":3}"#,
        r#"{"event":"select_size","size":"S"}"#,
    ] {
        session.handle(event(json)).unwrap();
    }
    let view = session
        .handle(event(r#"{"event":"add_selected_to_cart"}"#))
        .unwrap();

    assert_eq!(view.selected_product, None);
    assert_eq!(view.cart.item_count, 1);
    assert_eq!(view.cart.lines[0].product_id, ProductId::new(3));
    assert_eq!(view.cart.lines[0].size, Size::S);
    assert!(view.toast_visible);

    let view = session.handle(event(r#"{"event":"open_cart"}"#)).unwrap();
    assert!(view.cart_open);
    assert_eq!(view.cart.total_display, "₹34.99");

    let err = session.handle(event(r#"{"event":"checkout"}"#)).unwrap_err();
    assert!(matches!(err, StorefrontError::CheckoutUnavailable));
    assert_eq!(session.cart().item_count(), 1);
}

#[test]
fn drawer_quantity_controls() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_session(dir.path());

    session
        .handle(event(r#"{"event":"add_to_cart","product_id":2,"size":"M"}"#))
        .unwrap();
    session
        .handle(event(r#"{"event":"increment","product_id":2,"size":"M"}"#))
        .unwrap();
    let view = session
        .handle(event(r#"{"event":"increment","product_id":2,"size":"M"}"#))
        .unwrap();
    assert_eq!(view.cart.lines[0].quantity.get(), 3);
    assert_eq!(view.cart.total, Price::from_minor(3 * 4_999));

    let view = session
        .handle(event(r#"{"event":"update_quantity","product_id":2,"size":"M","quantity":-4}"#))
        .unwrap();
    assert_eq!(view.cart.lines[0].quantity.get(), 1);

    let view = session
        .handle(event(r#"{"event":"decrement","product_id":2,"size":"M"}"#))
        .unwrap();
    assert_eq!(view.cart.lines[0].quantity.get(), 1);

    let view = session
        .handle(event(r#"{"event":"remove_from_cart","product_id":2,"size":"M"}"#))
        .unwrap();
    assert!(view.cart.is_empty());
}

#[test]
fn unknown_events_change_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_session(dir.path());
    session
        .handle(event(r#"{"event":"add_to_cart","product_id":1}"#))
        .unwrap();
    let before = session.view();

    let after = session
        .handle(event(r#"{"event":"apply_coupon","code":"SPRING"}"#))
        .unwrap();
    assert_eq!(after.cart, before.cart);
    assert_eq!(after.products, before.products);
}

#[test]
fn view_serializes_for_the_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_session(dir.path());
    let view = session.add_to_cart(ProductId::new(1), Size::M);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["cart"]["item_count"], 1);
    assert_eq!(json["cart"]["total"], 12_499);
    assert_eq!(json["cart"]["lines"][0]["size"], "M");
    assert_eq!(json["active_category"], "All");
    assert_eq!(json["products"][0]["cat"], "Outerwear");
}

#[tokio::test(start_paused = true)]
async fn repeated_adds_keep_toast_up() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_session(dir.path());

    session.add_to_cart(ProductId::new(1), Size::M);
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    session.add_to_cart(ProductId::new(4), Size::M);

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert!(session.view().toast_visible);

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    assert!(!session.view().toast_visible);
}
