//! Inventory store abstraction.
//!
//! The store is the single source of truth for movies and theaters. The trait
//! is synchronous and cheap to clone; implementations share their catalog via
//! `Arc`, so every clone sees the same data.

mod memory;

use std::sync::Arc;

pub use memory::InventoryStore;

use crate::{
    error::InventoryError,
    movie::{Movie, MovieId, TheaterId},
    theater::Theater,
};

/// Catalog of movies and theaters, shared by all sessions.
///
/// Must be Clone (one instance is threaded into both facades and the session
/// dispatcher), Send + Sync, and synchronous.
///
/// # Locking
///
/// Implementations guard the top-level collections with a reader-writer lock.
/// Booking resolves the theater under the read lock and releases it before
/// calling into the theater, so the store lock never covers a booking
/// decision.
pub trait Inventory: Clone + Send + Sync + 'static {
    /// Insert or replace a movie.
    fn add_movie(&self, movie: Movie);

    /// Insert a movie unless its id is already taken.
    ///
    /// The check and the insert run under one write lock, so concurrent
    /// callers racing on the same id see exactly one success.
    fn insert_movie_if_absent(&self, movie: Movie) -> Result<(), InventoryError>;

    /// Remove a movie. No-op if absent; returns whether it was present.
    fn remove_movie(&self, movie_id: MovieId) -> bool;

    /// Fetch a movie by id.
    fn get_movie(&self, movie_id: MovieId) -> Result<Movie, InventoryError>;

    /// All movies, ordered by id.
    fn get_all_movies(&self) -> Vec<Movie>;

    /// Whether the movie is in the catalog.
    fn movie_exists(&self, movie_id: MovieId) -> bool;

    /// Insert or replace a theater.
    fn add_theater(&self, theater: Arc<Theater>);

    /// Insert a theater unless its id is already taken. Same atomicity as
    /// [`Inventory::insert_movie_if_absent`].
    fn insert_theater_if_absent(&self, theater: Arc<Theater>) -> Result<(), InventoryError>;

    /// Remove a theater. No-op if absent; returns whether it was present.
    fn remove_theater(&self, theater_id: TheaterId) -> bool;

    /// Shared handle to a theater. `None` if absent.
    fn get_theater(&self, theater_id: TheaterId) -> Option<Arc<Theater>>;

    /// All theaters, ordered by id.
    fn get_all_theaters(&self) -> Vec<Arc<Theater>>;

    /// Whether the theater is in the catalog.
    fn theater_exists(&self, theater_id: TheaterId) -> bool;

    /// Theaters currently showing `movie_id`, ordered by id.
    fn get_theaters_showing_movie(&self, movie_id: MovieId) -> Vec<Arc<Theater>> {
        self.get_all_theaters().into_iter().filter(|t| t.shows_movie(movie_id)).collect()
    }

    /// Available seat ids for a screening. Empty if the theater is absent.
    fn get_available_seats(&self, theater_id: TheaterId, movie_id: MovieId) -> Vec<String> {
        self.get_theater(theater_id).map(|t| t.available_seats(movie_id)).unwrap_or_default()
    }

    /// All-or-nothing booking. `false` if the theater is absent.
    fn book_seats<S: AsRef<str>>(
        &self,
        theater_id: TheaterId,
        movie_id: MovieId,
        seat_ids: &[S],
    ) -> bool {
        self.get_theater(theater_id).is_some_and(|t| t.book_seats(movie_id, seat_ids))
    }
}
