//! Concurrent seat inventory engine.
//!
//! The inventory is an in-memory catalog of movies and theaters. Each theater
//! holds one seat grid per movie it shows, and seats are booked at most once
//! even when many callers race for them.
//!
//! # Architecture
//!
//! Locking is layered, outermost first:
//!
//! - [`InventoryStore`]: reader-writer lock over the movie and theater maps.
//!   Lookups share the lock; inserts and removals take it exclusively.
//! - [`Theater`]: one mutex per theater. Multi-seat bookings validate and
//!   commit inside a single critical section, which makes them all-or-nothing.
//! - [`Seat`]: lock-free compare-and-set on the booked flag. Exactly one
//!   `book()` call ever succeeds.
//!
//! The store lock is released before a booking reaches the theater, and no
//! lock in this crate is ever held across I/O.
//!
//! # Components
//!
//! - [`BookingService`]: customer-facing reads and bookings
//! - [`AdministrationService`]: catalog management and scheduling
//! - [`Inventory`]: store abstraction shared by both facades

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod layout;
mod movie;
mod seat;
pub mod service;
pub mod store;
mod theater;

pub use error::InventoryError;
pub use layout::{DEFAULT_CAPACITY, SeatLayout};
pub use movie::{Movie, MovieId, TheaterId};
pub use seat::{DEFAULT_PREMIUM_MULTIPLIER, Seat, SeatCategory};
pub use service::{AdministrationService, BookingService};
pub use store::{Inventory, InventoryStore};
pub use theater::Theater;
