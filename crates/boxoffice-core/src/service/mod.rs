//! Service facades over the inventory store.
//!
//! Reads and bookings go through [`BookingService`]; catalog changes go
//! through [`AdministrationService`]. Both wrap the same store instance,
//! constructed once at startup and passed in explicitly.

mod admin;
mod booking;

pub use admin::AdministrationService;
pub use booking::BookingService;
