//! Order editor — create/edit orchestration
//!
//! # Edit Flow
//!
//! ```text
//! begin_edit(order_id)
//!     ├─ 1. Load booking; reject unless status = pending
//!     ├─ 2. Snapshot catalog + GST through the shared cache
//!     └─ 3. Hand out an EditSession
//! session mutations (apply_patch / add_item / remove_item / set_quantity)
//!     └─ every mutation recomputes totals; preview == persisted
//! save(session)
//!     ├─ 1. Validate required fields (fail fast, nothing written)
//!     ├─ 2. Drop zero-quantity lines, recompute totals
//!     ├─ 3. Force status = pending, stamp last_modified
//!     └─ 4. Compare-and-swap persist; stale version -> Conflict
//! ```
//!
//! Status changes run independently of the edit path through
//! [`OrderEditor::set_status`].

use crate::db::repository::{BookingRepository, CounterRepository};
use crate::orders::feed::{BookingChange, BookingFeed};
use crate::pricing::compute_totals;
use crate::services::CatalogService;
use shared::models::{
    Booking, BookingDraft, BookingItem, BookingPatch, CustomerUpsert, GstPolicy, OrderStatus,
    ServiceCatalog,
};
use shared::{AppError, AppResult};
use std::collections::BTreeMap;
use validator::Validate;

/// Orchestrates pricing, the state machine, and persistence for
/// create/edit flows
#[derive(Clone)]
pub struct OrderEditor {
    bookings: BookingRepository,
    counter: CounterRepository,
    catalog: CatalogService,
    feed: BookingFeed,
}

impl OrderEditor {
    pub fn new(
        bookings: BookingRepository,
        counter: CounterRepository,
        catalog: CatalogService,
        feed: BookingFeed,
    ) -> Self {
        Self {
            bookings,
            counter,
            catalog,
            feed,
        }
    }

    /// Create a booking from a draft
    ///
    /// Prices every line from the current service matrix, computes
    /// totals, allocates the next order id, and persists the booking
    /// together with its customer in one transaction.
    pub async fn create_booking(&self, draft: BookingDraft) -> AppResult<Booking> {
        draft.validate().map_err(validation_error)?;

        // Configuration is re-read (through the shared cache) at the
        // start of every create/edit session
        let catalog = self.catalog.services().await?;
        let gst = self.catalog.gst_policy().await?;

        let mut items: BTreeMap<String, BookingItem> = BTreeMap::new();
        for (cloth_id, quantity) in &draft.items {
            if *quantity <= 0.0 {
                continue;
            }
            items.insert(
                cloth_id.clone(),
                BookingItem {
                    quantity: *quantity,
                    price: catalog.price_of(&draft.service_type, cloth_id),
                },
            );
        }
        let totals = compute_totals(&items, &gst);

        let order_id = self.counter.allocate().await?;
        let now = shared::util::now_millis();
        let mut booking = Booking {
            order_id: order_id.clone(),
            customer_name: draft.customer_name.clone(),
            phone: draft.phone.clone(),
            service_type: draft.service_type,
            urgent_delivery: draft.urgent_delivery,
            pickup_date: draft.pickup_date,
            delivery_date: draft.delivery_date,
            instructions: draft.instructions,
            items,
            total_items: 0.0,
            total_cost: 0.0,
            sgst: 0.0,
            cgst: 0.0,
            grand_total: 0.0,
            gst_enabled: gst.enabled,
            sgst_percentage: gst.sgst_percentage,
            cgst_percentage: gst.cgst_percentage,
            status: OrderStatus::Pending,
            created_at: now,
            last_modified: now,
            version: 1,
        };
        booking.apply_totals(totals);

        let customer = CustomerUpsert {
            phone: draft.phone,
            name: draft.customer_name,
        };
        let stored = self
            .bookings
            .create_with_customer(booking, customer)
            .await?;

        tracing::info!(order_id = %stored.order_id, grand_total = stored.grand_total, "Booking created");
        self.feed.publish(BookingChange::created(stored.clone()));
        Ok(stored)
    }

    /// Begin an edit session for a pending booking
    pub async fn begin_edit(&self, order_id: &str) -> AppResult<EditSession> {
        let booking = self
            .bookings
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::booking_not_found(order_id))?;

        if !booking.status.is_editable() {
            return Err(AppError::edit_not_allowed(
                order_id,
                booking.status.as_str(),
            ));
        }

        let catalog = self.catalog.services().await?;
        let gst = self.catalog.gst_policy().await?;
        Ok(EditSession::new(booking, catalog, gst))
    }

    /// Validate, recompute, and persist an edit session
    ///
    /// Fails fast with a validation error before anything is written.
    /// Saving forces the status back to pending and stamps
    /// `last_modified`; the write is a compare-and-swap on the version
    /// loaded at `begin_edit`, so a concurrent writer surfaces as a
    /// conflict instead of being silently overwritten.
    pub async fn save(&self, session: EditSession) -> AppResult<Booking> {
        let EditSession {
            mut booking, gst, ..
        } = session;

        for (field, value) in [
            ("customer_name", &booking.customer_name),
            ("phone", &booking.phone),
            ("service_type", &booking.service_type),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::required_field(field));
            }
        }

        // Only lines with quantity > 0 are persisted
        booking.items.retain(|_, item| item.quantity > 0.0);
        let totals = compute_totals(&booking.items, &gst);
        booking.apply_totals(totals);
        booking.gst_enabled = gst.enabled;
        booking.sgst_percentage = gst.sgst_percentage;
        booking.cgst_percentage = gst.cgst_percentage;
        booking.status = OrderStatus::Pending;
        booking.last_modified = shared::util::now_millis();

        let stored = self.bookings.update_cas(&booking).await?;
        tracing::info!(order_id = %stored.order_id, version = stored.version, "Booking saved");
        self.feed.publish(BookingChange::updated(stored.clone()));
        Ok(stored)
    }

    /// Change a booking's status, independent of the edit path
    ///
    /// Legality is decided by [`OrderStatus::can_transition`]; the write
    /// updates `status` and `last_modified` only, via compare-and-swap.
    pub async fn set_status(&self, order_id: &str, to: OrderStatus) -> AppResult<Booking> {
        let mut booking = self
            .bookings
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::booking_not_found(order_id))?;

        if !booking.status.can_transition(to) {
            return Err(AppError::invalid_transition(
                booking.status.as_str(),
                to.as_str(),
            ));
        }

        let from = booking.status;
        booking.status = to;
        booking.last_modified = shared::util::now_millis();

        let stored = self.bookings.update_cas(&booking).await?;
        tracing::info!(order_id, from = %from, to = %to, "Booking status changed");
        self.feed.publish(BookingChange::updated(stored.clone()));
        Ok(stored)
    }

    /// Delete a booking; its order id is never reissued
    pub async fn delete_booking(&self, order_id: &str) -> AppResult<()> {
        if !self.bookings.delete(order_id).await? {
            return Err(AppError::booking_not_found(order_id));
        }
        tracing::info!(order_id, "Booking deleted");
        self.feed.publish(BookingChange::deleted(order_id));
        Ok(())
    }
}

/// In-memory edit over one booking
///
/// Every mutation recomputes totals through the pricing calculator, so
/// the preview a caller reads off the session is byte-for-byte what
/// `save()` persists. The session holds the catalog and GST snapshot
/// taken when the edit began.
#[derive(Debug)]
pub struct EditSession {
    booking: Booking,
    catalog: ServiceCatalog,
    gst: GstPolicy,
}

impl EditSession {
    fn new(booking: Booking, catalog: ServiceCatalog, gst: GstPolicy) -> Self {
        let mut session = Self {
            booking,
            catalog,
            gst,
        };
        session.recompute();
        session
    }

    /// Current state of the booking under edit
    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    /// Apply a partial patch
    ///
    /// When the service type changes, every currently-selected line is
    /// re-priced from the new service's matrix row; cloths the new
    /// service does not map default to price 0.
    pub fn apply_patch(&mut self, patch: BookingPatch) {
        if let Some(name) = patch.customer_name {
            self.booking.customer_name = name;
        }
        if let Some(phone) = patch.phone {
            self.booking.phone = phone;
        }
        if let Some(urgent) = patch.urgent_delivery {
            self.booking.urgent_delivery = urgent;
        }
        if let Some(pickup) = patch.pickup_date {
            self.booking.pickup_date = Some(pickup);
        }
        if let Some(delivery) = patch.delivery_date {
            self.booking.delivery_date = Some(delivery);
        }
        if let Some(instructions) = patch.instructions {
            self.booking.instructions = Some(instructions);
        }
        if let Some(service) = patch.service_type
            && service != self.booking.service_type
        {
            self.booking.service_type = service;
            let service_id = self.booking.service_type.clone();
            for (cloth_id, item) in self.booking.items.iter_mut() {
                item.price = self.catalog.price_of(&service_id, cloth_id);
            }
        }
        self.recompute();
    }

    /// Add a line with quantity 1, priced from the current service
    pub fn add_item(&mut self, cloth_id: &str) -> AppResult<()> {
        if self.booking.items.contains_key(cloth_id) {
            return Err(AppError::with_message(
                shared::ErrorCode::ItemAlreadyPresent,
                format!("Item {cloth_id} is already on the booking"),
            )
            .with_detail("cloth_id", cloth_id));
        }
        let price = self
            .catalog
            .price_of(&self.booking.service_type, cloth_id);
        self.booking.items.insert(
            cloth_id.to_string(),
            BookingItem {
                quantity: 1.0,
                price,
            },
        );
        self.recompute();
        Ok(())
    }

    /// Remove a line
    pub fn remove_item(&mut self, cloth_id: &str) -> AppResult<()> {
        if self.booking.items.remove(cloth_id).is_none() {
            return Err(AppError::with_message(
                shared::ErrorCode::ItemNotFound,
                format!("Item {cloth_id} not found on the booking"),
            )
            .with_detail("cloth_id", cloth_id));
        }
        self.recompute();
        Ok(())
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn set_quantity(&mut self, cloth_id: &str, quantity: f64) -> AppResult<()> {
        if quantity <= 0.0 {
            return self.remove_item(cloth_id);
        }
        match self.booking.items.get_mut(cloth_id) {
            Some(item) => item.quantity = quantity,
            None => {
                return Err(AppError::with_message(
                    shared::ErrorCode::ItemNotFound,
                    format!("Item {cloth_id} not found on the booking"),
                )
                .with_detail("cloth_id", cloth_id));
            }
        }
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        let totals = compute_totals(&self.booking.items, &self.gst);
        self.booking.apply_totals(totals);
    }
}

/// Convert validator output into a field-detailed validation error
fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let mut err = AppError::validation("Required fields are missing");
    for (field, field_errors) in errors.field_errors() {
        if let Some(first) = field_errors.first() {
            let reason = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            err = err.with_detail(field.to_string(), reason);
        }
    }
    err
}
