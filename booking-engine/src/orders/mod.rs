//! Orders Module
//!
//! Edit sessions, status changes, the booking change feed, and the
//! outbound order summary text.

mod editor;
mod feed;
mod summary;

pub use editor::{EditSession, OrderEditor};
pub use feed::{BookingChange, BookingFeed, ChangeKind};
pub use summary::render_summary;
