//! Pricing Module
//!
//! One authoritative totals computation for bookings. Both the live
//! preview shown to an operator and the persisted values come from
//! [`compute_totals`] — never two independently-derived computations.

mod calculator;

pub use calculator::*;
