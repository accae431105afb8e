//! Booking change feed
//!
//! Push-based feed over a broadcast channel. Every successful write
//! publishes the latest full snapshot, never an incremental diff, so
//! consumers always reconcile against the newest value. Dropping the
//! receiver is the cancellation contract. A lagged receiver re-reads
//! the repository instead of replaying missed events.

use shared::models::Booking;
use tokio::sync::broadcast;

/// Feed channel capacity (bounded; slow consumers lag and re-read)
const FEED_CHANNEL_CAPACITY: usize = 1024;

/// What happened to a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
    /// Administrative reset removed every booking
    Reset,
}

/// One feed event carrying the latest snapshot
#[derive(Debug, Clone)]
pub struct BookingChange {
    pub kind: ChangeKind,
    pub order_id: String,
    /// Full booking snapshot; `None` for deletions and resets
    pub booking: Option<Booking>,
}

impl BookingChange {
    pub fn created(booking: Booking) -> Self {
        Self {
            kind: ChangeKind::Created,
            order_id: booking.order_id.clone(),
            booking: Some(booking),
        }
    }

    pub fn updated(booking: Booking) -> Self {
        Self {
            kind: ChangeKind::Updated,
            order_id: booking.order_id.clone(),
            booking: Some(booking),
        }
    }

    pub fn deleted(order_id: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            order_id: order_id.into(),
            booking: None,
        }
    }

    pub fn reset() -> Self {
        Self {
            kind: ChangeKind::Reset,
            order_id: String::new(),
            booking: None,
        }
    }
}

/// Broadcast feed of booking changes
///
/// The `epoch` is a unique identifier generated when the engine starts;
/// consumers use it to detect restarts and trigger a full re-read.
#[derive(Clone)]
pub struct BookingFeed {
    tx: broadcast::Sender<BookingChange>,
    epoch: String,
}

impl BookingFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CHANNEL_CAPACITY);
        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(epoch = %epoch, "Booking feed started with new epoch");
        Self { tx, epoch }
    }

    /// Engine instance epoch
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// Subscribe to booking changes; drop the receiver to unsubscribe
    pub fn subscribe(&self) -> broadcast::Receiver<BookingChange> {
        self.tx.subscribe()
    }

    /// Publish a change; a send with no subscribers is not an error
    pub fn publish(&self, change: BookingChange) {
        let receivers = self.tx.receiver_count();
        if receivers > 0 {
            let _ = self.tx.send(change);
        }
    }
}

impl Default for BookingFeed {
    fn default() -> Self {
        Self::new()
    }
}
