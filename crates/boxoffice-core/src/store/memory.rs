use std::{
    collections::{HashMap, hash_map::Entry},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use super::Inventory;
use crate::{
    error::InventoryError,
    movie::{Movie, MovieId, TheaterId},
    theater::Theater,
};

/// In-memory inventory store.
///
/// Movies are held by value; theaters are shared `Arc` handles so in-flight
/// bookings keep a theater alive even if it is removed from the catalog
/// concurrently. The catalog lives behind `Arc<RwLock<_>>`: clones share it,
/// lookups take the read lock, structural changes take the write lock. Every
/// operation is O(1) except the listings, which are O(n log n) for ordering.
#[derive(Clone, Default)]
pub struct InventoryStore {
    inner: Arc<RwLock<Catalog>>,
}

#[derive(Default)]
struct Catalog {
    movies: HashMap<MovieId, Movie>,
    theaters: HashMap<TheaterId, Arc<Theater>>,
}

impl InventoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of movies in the catalog.
    pub fn movie_count(&self) -> usize {
        self.read().movies.len()
    }

    /// Number of theaters in the catalog.
    pub fn theater_count(&self) -> usize {
        self.read().theaters.len()
    }

    // The catalog maps hold no invariant spanning more than one entry, so a
    // writer that panicked mid-operation leaves them usable.
    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let catalog = self.read();
        f.debug_struct("InventoryStore")
            .field("movies", &catalog.movies.len())
            .field("theaters", &catalog.theaters.len())
            .finish()
    }
}

impl Inventory for InventoryStore {
    fn add_movie(&self, movie: Movie) {
        self.write().movies.insert(movie.id(), movie);
    }

    fn insert_movie_if_absent(&self, movie: Movie) -> Result<(), InventoryError> {
        match self.write().movies.entry(movie.id()) {
            Entry::Occupied(entry) => Err(InventoryError::MovieAlreadyExists(*entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(movie);
                Ok(())
            },
        }
    }

    fn remove_movie(&self, movie_id: MovieId) -> bool {
        self.write().movies.remove(&movie_id).is_some()
    }

    fn get_movie(&self, movie_id: MovieId) -> Result<Movie, InventoryError> {
        self.read().movies.get(&movie_id).cloned().ok_or(InventoryError::MovieNotFound(movie_id))
    }

    fn get_all_movies(&self) -> Vec<Movie> {
        let mut movies: Vec<Movie> = self.read().movies.values().cloned().collect();
        movies.sort_by_key(Movie::id);
        movies
    }

    fn movie_exists(&self, movie_id: MovieId) -> bool {
        self.read().movies.contains_key(&movie_id)
    }

    fn add_theater(&self, theater: Arc<Theater>) {
        self.write().theaters.insert(theater.id(), theater);
    }

    fn insert_theater_if_absent(&self, theater: Arc<Theater>) -> Result<(), InventoryError> {
        match self.write().theaters.entry(theater.id()) {
            Entry::Occupied(entry) => Err(InventoryError::TheaterAlreadyExists(*entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(theater);
                Ok(())
            },
        }
    }

    fn remove_theater(&self, theater_id: TheaterId) -> bool {
        self.write().theaters.remove(&theater_id).is_some()
    }

    fn get_theater(&self, theater_id: TheaterId) -> Option<Arc<Theater>> {
        self.read().theaters.get(&theater_id).cloned()
    }

    fn get_all_theaters(&self) -> Vec<Arc<Theater>> {
        let mut theaters: Vec<Arc<Theater>> = self.read().theaters.values().cloned().collect();
        theaters.sort_by_key(|t| t.id());
        theaters
    }

    fn theater_exists(&self, theater_id: TheaterId) -> bool {
        self.read().theaters.contains_key(&theater_id)
    }
}
