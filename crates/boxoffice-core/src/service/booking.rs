use std::sync::Arc;

use crate::{
    error::InventoryError,
    movie::{Movie, MovieId, TheaterId},
    store::{Inventory, InventoryStore},
    theater::Theater,
};

/// Customer-facing facade: catalog queries and seat booking.
///
/// Thin pass-through over the store. It adds validation and turns a failed
/// booking into [`InventoryError::SeatsUnavailable`].
#[derive(Debug, Clone)]
pub struct BookingService<S = InventoryStore> {
    store: S,
}

impl<S: Inventory> BookingService<S> {
    /// Create a facade over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All movies, ordered by id.
    pub fn get_all_movies(&self) -> Vec<Movie> {
        self.store.get_all_movies()
    }

    /// Theaters currently showing `movie_id`, ordered by id.
    pub fn get_theaters_showing_movie(&self, movie_id: MovieId) -> Vec<Arc<Theater>> {
        self.store.get_theaters_showing_movie(movie_id)
    }

    /// Available seat ids for a screening. Empty if the theater or movie is
    /// unknown.
    pub fn get_available_seats(&self, theater_id: TheaterId, movie_id: MovieId) -> Vec<String> {
        self.store.get_available_seats(theater_id, movie_id)
    }

    /// Book every seat in `seat_ids`, or none.
    ///
    /// The return value is the only authoritative answer to whether the seats
    /// were reserved.
    pub fn book_seats<T: AsRef<str>>(
        &self,
        theater_id: TheaterId,
        movie_id: MovieId,
        seat_ids: &[T],
    ) -> Result<(), InventoryError> {
        if seat_ids.is_empty() {
            return Err(InventoryError::InvalidRequest("no seats requested".to_string()));
        }

        if self.store.book_seats(theater_id, movie_id, seat_ids) {
            tracing::debug!(%theater_id, %movie_id, seats = seat_ids.len(), "seats booked");
            Ok(())
        } else {
            tracing::debug!(%theater_id, %movie_id, seats = seat_ids.len(), "booking rejected");
            Err(InventoryError::SeatsUnavailable { theater_id, movie_id })
        }
    }

    /// Advisory check: would booking these seats succeed right now?
    ///
    /// Recomputes availability and checks the request is a subset. Another
    /// session can book the same seats between this call and a later
    /// [`BookingService::book_seats`], so the answer is a hint only.
    pub fn can_book_seats<T: AsRef<str>>(
        &self,
        theater_id: TheaterId,
        movie_id: MovieId,
        seat_ids: &[T],
    ) -> bool {
        if seat_ids.is_empty() {
            return false;
        }

        let available = self.store.get_available_seats(theater_id, movie_id);
        seat_ids.iter().all(|id| {
            let wanted: &str = id.as_ref();
            available.iter().any(|seat| seat == wanted)
        })
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
