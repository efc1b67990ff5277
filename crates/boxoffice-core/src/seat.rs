//! Seat: the smallest unit of bookable inventory.
//!
//! A seat carries a single booked flag that only ever moves from `false` to
//! `true`. The transition is a compare-and-set, so exactly one caller wins no
//! matter how many threads race for the same seat and whether or not they hold
//! the owning theater's lock.
//!
//! # Invariants
//!
//! - Once booked, a seat is never un-booked.
//! - `book()` returns `true` for exactly one call over the seat's lifetime.

use std::sync::atomic::{AtomicBool, Ordering};

/// Premium multiplier applied when a layout does not specify one.
pub const DEFAULT_PREMIUM_MULTIPLIER: f64 = 2.5;

/// Seat category metadata.
///
/// The booking algorithm never branches on the category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SeatCategory {
    /// Regular seat.
    #[default]
    Standard,
    /// Premium seat with a pricing multiplier relative to a standard seat.
    Premium {
        /// Relative price factor (metadata only)
        multiplier: f64,
    },
}

impl SeatCategory {
    /// Premium category with the default multiplier.
    pub fn premium() -> Self {
        Self::Premium { multiplier: DEFAULT_PREMIUM_MULTIPLIER }
    }

    /// Whether this is a premium seat.
    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Premium { .. })
    }
}

/// A single seat within one theater's grid for one movie.
#[derive(Debug)]
pub struct Seat {
    id: String,
    category: SeatCategory,
    booked: AtomicBool,
}

impl Seat {
    /// Create an unbooked standard seat.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_category(id, SeatCategory::Standard)
    }

    /// Create an unbooked seat of the given category.
    pub fn with_category(id: impl Into<String>, category: SeatCategory) -> Self {
        Self { id: id.into(), category, booked: AtomicBool::new(false) }
    }

    /// Informational read of the booked flag.
    ///
    /// The answer may be stale by the time the caller acts on it. Never gate a
    /// booking on this; call [`Seat::book`] and use its result.
    pub fn is_available(&self) -> bool {
        !self.booked.load(Ordering::Acquire)
    }

    /// Atomically book the seat.
    ///
    /// Returns `true` iff this call moved the seat from available to booked.
    pub fn book(&self) -> bool {
        self.booked.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_ok()
    }

    /// Seat id, e.g. `a1` or `c12`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Category metadata.
    pub fn category(&self) -> SeatCategory {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_seat_is_available() {
        let seat = Seat::new("a1");
        assert_eq!(seat.id(), "a1");
        assert!(seat.is_available());
        assert_eq!(seat.category(), SeatCategory::Standard);
    }

    #[test]
    fn book_once_then_fail() {
        let seat = Seat::new("a3");
        assert!(seat.book());
        assert!(!seat.is_available());
        assert!(!seat.book());
        assert!(!seat.is_available());
    }

    #[test]
    fn premium_seat_books_like_standard() {
        let seat = Seat::with_category("e1", SeatCategory::premium());
        assert!(seat.category().is_premium());
        assert!(seat.book());
        assert!(!seat.book());
    }
}
