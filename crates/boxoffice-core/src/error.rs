//! Inventory error types.
//!
//! Queries with a natural empty result (seat availability, theater listings)
//! never produce these; they degrade to empty collections. Errors are reserved
//! for lookups that must yield a value, failed bookings surfaced through the
//! facades, and rejected catalog mutations.

use thiserror::Error;

use crate::movie::{MovieId, TheaterId};

/// Errors from the inventory store and its service facades.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Movie is not in the catalog
    #[error("movie not found: {0}")]
    MovieNotFound(MovieId),

    /// Theater is not in the catalog
    #[error("theater not found: {0}")]
    TheaterNotFound(TheaterId),

    /// Movie id is already taken
    #[error("movie already exists: {0}")]
    MovieAlreadyExists(MovieId),

    /// Theater id is already taken
    #[error("theater already exists: {0}")]
    TheaterAlreadyExists(TheaterId),

    /// At least one requested seat is unknown or already booked
    #[error("seats unavailable in theater {theater_id} for movie {movie_id}")]
    SeatsUnavailable {
        /// Theater the booking targeted
        theater_id: TheaterId,
        /// Movie the booking targeted
        movie_id: MovieId,
    },

    /// Caller supplied arguments that can never succeed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Operation exists in the interface but is not supported yet
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl InventoryError {
    /// Returns true if the error names a missing movie or theater.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MovieNotFound(_) | Self::TheaterNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(InventoryError::MovieNotFound(MovieId(3)).to_string(), "movie not found: 3");
        assert_eq!(
            InventoryError::SeatsUnavailable { theater_id: TheaterId(1), movie_id: MovieId(2) }
                .to_string(),
            "seats unavailable in theater 1 for movie 2"
        );
        assert_eq!(
            InventoryError::Unsupported("set_theater_capacity").to_string(),
            "unsupported operation: set_theater_capacity"
        );
    }

    #[test]
    fn unsupported_is_distinct_from_not_found() {
        assert!(InventoryError::TheaterNotFound(TheaterId(9)).is_not_found());
        assert!(!InventoryError::Unsupported("remove_movie_from_theater").is_not_found());
    }
}
