//! End-to-end engine tests against an in-memory database
//!
//! Every test opens a fresh engine, so order ids always start at 0001
//! and the seeded catalogs are in effect unless a test changes them.

use std::collections::BTreeMap;

use anyhow::Result;
use booking_engine::db::repository::RepoError;
use booking_engine::orders::ChangeKind;
use booking_engine::services::{RESET_PHRASE, ResetConfirmation};
use booking_engine::{Engine, OrderStatus};
use shared::models::{BookingDraft, BookingPatch, GstPolicy};
use shared::ErrorCode;

fn draft(service: &str, items: &[(&str, f64)]) -> BookingDraft {
    BookingDraft {
        customer_name: "Asha Verma".into(),
        phone: "9876543210".into(),
        service_type: service.into(),
        urgent_delivery: false,
        pickup_date: None,
        delivery_date: None,
        instructions: None,
        items: items
            .iter()
            .map(|(id, qty)| (id.to_string(), *qty))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[tokio::test]
async fn create_booking_prices_and_totals() -> Result<()> {
    let engine = Engine::open_in_memory().await?;

    // dry-clean pant is 70.00 in the seeded matrix; 3 x 70 = 210
    let booking = engine
        .editor
        .create_booking(draft("dry-clean", &[("pant", 3.0)]))
        .await?;

    assert_eq!(booking.order_id, "0001");
    assert_eq!(booking.status, OrderStatus::Pending);
    assert_eq!(booking.version, 1);
    assert_eq!(booking.total_items, 3.0);
    assert_eq!(booking.total_cost, 210.0);
    assert_eq!(booking.sgst, 18.9);
    assert_eq!(booking.cgst, 18.9);
    assert_eq!(booking.grand_total, 247.8);
    assert!(
        (booking.total_cost + booking.sgst + booking.cgst - booking.grand_total).abs() < 1e-9
    );
    Ok(())
}

#[tokio::test]
async fn order_ids_are_sequential_and_padded() -> Result<()> {
    let engine = Engine::open_in_memory().await?;

    let first = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;
    let second = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 2.0)]))
        .await?;

    assert_eq!(first.order_id, "0001");
    assert_eq!(second.order_id, "0002");
    assert_eq!(engine.counter.current().await?, 2);
    Ok(())
}

#[tokio::test]
async fn concurrent_allocation_yields_distinct_ids() -> Result<()> {
    // A fresh store: the racing tasks also race on seeding the counter
    let engine = Engine::open_in_memory().await?;

    let mut handles = Vec::new();
    for _ in 0..20 {
        let counter = engine.counter.clone();
        handles.push(tokio::spawn(async move { counter.allocate().await }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await??);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    assert_eq!(engine.counter.current().await?, 20);
    Ok(())
}

#[tokio::test]
async fn allocation_continues_past_an_existing_maximum() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    for _ in 0..47 {
        engine.counter.allocate().await?;
    }
    assert_eq!(engine.counter.current().await?, 47);

    let booking = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;
    assert_eq!(booking.order_id, "0048");
    Ok(())
}

#[tokio::test]
async fn rejects_draft_without_customer_name() -> Result<()> {
    let engine = Engine::open_in_memory().await?;

    let mut bad = draft("ironing", &[("shirt", 1.0)]);
    bad.customer_name = String::new();

    let err = engine.editor.create_booking(bad).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    Ok(())
}

#[tokio::test]
async fn edit_session_recomputes_totals_and_bumps_version() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let booking = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 2.0)]))
        .await?;

    let mut session = engine.editor.begin_edit(&booking.order_id).await?;
    session.set_quantity("shirt", 5.0)?;
    session.add_item("pant")?;
    let saved = engine.editor.save(session).await?;

    // 5 x 10 (shirt) + 1 x 12 (pant) = 62
    assert_eq!(saved.total_items, 6.0);
    assert_eq!(saved.total_cost, 62.0);
    assert_eq!(saved.version, 2);
    assert_eq!(saved.status, OrderStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn editing_is_rejected_once_work_starts() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let booking = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 2.0)]))
        .await?;
    engine
        .editor
        .set_status(&booking.order_id, OrderStatus::InProgress)
        .await?;

    let err = engine
        .editor
        .begin_edit(&booking.order_id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EditNotAllowed);

    // The stored record is untouched by the rejected attempt
    let stored = engine.bookings.get(&booking.order_id).await?;
    assert_eq!(stored.status, OrderStatus::InProgress);
    assert_eq!(stored.total_cost, booking.total_cost);
    Ok(())
}

#[tokio::test]
async fn status_cannot_move_backwards() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let booking = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;
    engine
        .editor
        .set_status(&booking.order_id, OrderStatus::Completed)
        .await?;

    let err = engine
        .editor
        .set_status(&booking.order_id, OrderStatus::InProgress)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    Ok(())
}

#[tokio::test]
async fn switching_service_reprices_every_line() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let booking = engine
        .editor
        .create_booking(draft("dry-clean", &[("shirt", 2.0)]))
        .await?;
    assert_eq!(booking.total_cost, 120.0); // 2 x 60

    let mut session = engine.editor.begin_edit(&booking.order_id).await?;
    session.apply_patch(BookingPatch {
        service_type: Some("ironing".into()),
        ..BookingPatch::default()
    });
    let saved = engine.editor.save(session).await?;

    // shirt is 10.00 under ironing
    assert_eq!(saved.service_type, "ironing");
    assert_eq!(saved.items["shirt"].price, 10.0);
    assert_eq!(saved.total_cost, 20.0);
    Ok(())
}

#[tokio::test]
async fn removing_the_last_item_zeroes_totals() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let booking = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 2.0)]))
        .await?;

    let mut session = engine.editor.begin_edit(&booking.order_id).await?;
    session.remove_item("shirt")?;
    let saved = engine.editor.save(session).await?;

    assert!(saved.items.is_empty());
    assert_eq!(saved.total_items, 0.0);
    assert_eq!(saved.total_cost, 0.0);
    assert_eq!(saved.grand_total, 0.0);
    Ok(())
}

#[tokio::test]
async fn duplicate_and_missing_items_are_rejected_in_session() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let booking = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;

    let mut session = engine.editor.begin_edit(&booking.order_id).await?;
    let dup = session.add_item("shirt").unwrap_err();
    assert_eq!(dup.code, ErrorCode::ItemAlreadyPresent);
    let missing = session.remove_item("saree").unwrap_err();
    assert_eq!(missing.code, ErrorCode::ItemNotFound);
    Ok(())
}

#[tokio::test]
async fn stale_version_update_is_a_conflict() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let booking = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;

    // Two writers load the same snapshot; the second one loses
    let mut first = booking.clone();
    first.instructions = Some("starch".into());
    engine.bookings.update_cas(&first).await?;

    let mut second = booking.clone();
    second.instructions = Some("no starch".into());
    let err = engine.bookings.update_cas(&second).await.unwrap_err();
    assert!(matches!(err, RepoError::StaleVersion(_)));
    Ok(())
}

#[tokio::test]
async fn reset_requires_full_confirmation() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;

    let err = engine
        .admin
        .reset_orders(ResetConfirmation {
            acknowledged: false,
            phrase: RESET_PHRASE.into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfirmationRequired);

    let err = engine
        .admin
        .reset_orders(ResetConfirmation {
            acknowledged: true,
            phrase: "reset all orders".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfirmationRequired);

    // Nothing was deleted by the refused attempts
    assert_eq!(engine.bookings.find_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn confirmed_reset_reports_exact_count_and_restarts_ids() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    for _ in 0..3 {
        engine
            .editor
            .create_booking(draft("ironing", &[("shirt", 1.0)]))
            .await?;
    }

    let removed = engine
        .admin
        .reset_orders(ResetConfirmation::confirmed())
        .await?;
    assert_eq!(removed, 3);
    assert!(engine.bookings.find_all().await?.is_empty());
    assert_eq!(engine.counter.current().await?, 0);

    let booking = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;
    assert_eq!(booking.order_id, "0001");
    Ok(())
}

#[tokio::test]
async fn feed_publishes_full_snapshots() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let mut rx = engine.feed.subscribe();

    let booking = engine
        .editor
        .create_booking(draft("dry-clean", &[("pant", 3.0)]))
        .await?;

    let change = rx.recv().await?;
    assert_eq!(change.kind, ChangeKind::Created);
    assert_eq!(change.order_id, booking.order_id);
    let snapshot = change.booking.expect("created events carry a snapshot");
    assert_eq!(snapshot.grand_total, booking.grand_total);

    engine
        .editor
        .set_status(&booking.order_id, OrderStatus::Ready)
        .await?;
    let change = rx.recv().await?;
    assert_eq!(change.kind, ChangeKind::Updated);
    assert_eq!(
        change.booking.expect("updates carry a snapshot").status,
        OrderStatus::Ready
    );
    Ok(())
}

#[tokio::test]
async fn gst_policy_change_applies_to_new_sessions() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    engine.catalog.save_gst_policy(&GstPolicy::disabled()).await?;

    let booking = engine
        .editor
        .create_booking(draft("dry-clean", &[("pant", 3.0)]))
        .await?;

    assert!(!booking.gst_enabled);
    assert_eq!(booking.sgst, 0.0);
    assert_eq!(booking.cgst, 0.0);
    assert_eq!(booking.grand_total, 210.0);
    Ok(())
}

#[tokio::test]
async fn policy_changes_never_touch_persisted_bookings() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let booking = engine
        .editor
        .create_booking(draft("dry-clean", &[("pant", 3.0)]))
        .await?;
    assert_eq!(booking.sgst, 18.9);

    engine.catalog.save_gst_policy(&GstPolicy::disabled()).await?;

    // The stored booking keeps the tax snapshot taken at creation
    let stored = engine.bookings.get(&booking.order_id).await?;
    assert!(stored.gst_enabled);
    assert_eq!(stored.sgst, 18.9);
    assert_eq!(stored.cgst, 18.9);
    assert_eq!(stored.grand_total, 247.8);

    // Only new sessions see the new policy
    let fresh = engine
        .editor
        .create_booking(draft("dry-clean", &[("pant", 3.0)]))
        .await?;
    assert!(!fresh.gst_enabled);
    assert_eq!(fresh.grand_total, 210.0);
    Ok(())
}

#[tokio::test]
async fn customers_are_upserted_by_phone() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;
    let mut renamed = draft("ironing", &[("shirt", 1.0)]);
    renamed.customer_name = "A. Verma".into();
    engine.editor.create_booking(renamed).await?;

    let customers = engine.customers.find_all().await?;
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].name, "A. Verma");
    assert!(customers[0].created_at > 0);
    Ok(())
}

#[tokio::test]
async fn bookings_survive_a_reopen_on_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = booking_engine::Config::with_work_dir(dir.path().to_string_lossy());

    let order_id = {
        let engine = Engine::open(&config).await?;
        let booking = engine
            .editor
            .create_booking(draft("ironing", &[("shirt", 2.0)]))
            .await?;
        booking.order_id
    };

    let engine = Engine::open(&config).await?;
    let stored = engine.bookings.get(&order_id).await?;
    assert_eq!(stored.total_cost, 20.0);
    assert_eq!(engine.counter.current().await?, 1);
    Ok(())
}

#[tokio::test]
async fn deleting_a_booking_does_not_reuse_its_id() -> Result<()> {
    let engine = Engine::open_in_memory().await?;
    let first = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;
    engine.editor.delete_booking(&first.order_id).await?;

    let second = engine
        .editor
        .create_booking(draft("ironing", &[("shirt", 1.0)]))
        .await?;
    assert_eq!(second.order_id, "0002");
    Ok(())
}
