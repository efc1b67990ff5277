use std::sync::Arc;

use crate::{
    error::InventoryError,
    layout::SeatLayout,
    movie::{Movie, MovieId, TheaterId},
    store::{Inventory, InventoryStore},
    theater::Theater,
};

/// Catalog-management facade: movies, theaters and scheduling.
///
/// Existence checks and the writes they guard are single store operations,
/// so any number of facades over one store agree on which call won.
#[derive(Debug, Clone)]
pub struct AdministrationService<S = InventoryStore> {
    store: S,
}

impl<S: Inventory> AdministrationService<S> {
    /// Create a facade over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Add a movie to the catalog.
    pub fn add_movie(&self, movie: Movie) -> Result<(), InventoryError> {
        let movie_id = movie.id();
        let title = movie.title().to_owned();
        self.store.insert_movie_if_absent(movie)?;
        tracing::info!(%movie_id, %title, "movie added");
        Ok(())
    }

    /// Remove a movie from the catalog.
    ///
    /// Theaters that already show the movie keep their grids.
    pub fn remove_movie(&self, movie_id: MovieId) -> Result<(), InventoryError> {
        if !self.store.remove_movie(movie_id) {
            return Err(InventoryError::MovieNotFound(movie_id));
        }

        tracing::info!(%movie_id, "movie removed");
        Ok(())
    }

    /// All movies, ordered by id.
    pub fn get_all_movies(&self) -> Vec<Movie> {
        self.store.get_all_movies()
    }

    /// Whether the movie is in the catalog.
    pub fn movie_exists(&self, movie_id: MovieId) -> bool {
        self.store.movie_exists(movie_id)
    }

    /// Add a theater and return the shared handle the store now owns.
    pub fn add_theater(&self, theater: Theater) -> Result<Arc<Theater>, InventoryError> {
        let theater = Arc::new(theater);
        self.store.insert_theater_if_absent(Arc::clone(&theater))?;
        tracing::info!(theater_id = %theater.id(), name = theater.name(), "theater added");
        Ok(theater)
    }

    /// Remove a theater from the catalog.
    ///
    /// Requests already holding the theater's handle finish against it.
    pub fn remove_theater(&self, theater_id: TheaterId) -> Result<(), InventoryError> {
        if !self.store.remove_theater(theater_id) {
            return Err(InventoryError::TheaterNotFound(theater_id));
        }

        tracing::info!(%theater_id, "theater removed");
        Ok(())
    }

    /// All theaters, ordered by id.
    pub fn get_all_theaters(&self) -> Vec<Arc<Theater>> {
        self.store.get_all_theaters()
    }

    /// Whether the theater is in the catalog.
    pub fn theater_exists(&self, theater_id: TheaterId) -> bool {
        self.store.theater_exists(theater_id)
    }

    /// Schedule a catalog movie into a theater with the default layout.
    pub fn schedule_movie(
        &self,
        theater_id: TheaterId,
        movie_id: MovieId,
    ) -> Result<(), InventoryError> {
        self.schedule_movie_with_layout(theater_id, movie_id, SeatLayout::default())
    }

    /// Schedule a catalog movie into a theater with an explicit layout.
    ///
    /// Scheduling a movie the theater already shows resets its grid.
    pub fn schedule_movie_with_layout(
        &self,
        theater_id: TheaterId,
        movie_id: MovieId,
        layout: SeatLayout,
    ) -> Result<(), InventoryError> {
        if layout.capacity == 0 {
            return Err(InventoryError::InvalidRequest("capacity must be at least 1".to_string()));
        }

        let theater =
            self.store.get_theater(theater_id).ok_or(InventoryError::TheaterNotFound(theater_id))?;
        let movie = self.store.get_movie(movie_id)?;

        theater.add_movie_with_layout(movie, layout);
        tracing::info!(%theater_id, %movie_id, capacity = layout.capacity, "movie scheduled");
        Ok(())
    }

    /// Remove a movie from a theater's schedule. Not supported yet.
    pub fn remove_movie_from_theater(
        &self,
        _theater_id: TheaterId,
        _movie_id: MovieId,
    ) -> Result<(), InventoryError> {
        Err(InventoryError::Unsupported("remove_movie_from_theater"))
    }

    /// Change a theater's seating capacity. Not supported yet.
    pub fn set_theater_capacity(
        &self,
        _theater_id: TheaterId,
        _capacity: usize,
    ) -> Result<(), InventoryError> {
        Err(InventoryError::Unsupported("set_theater_capacity"))
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
