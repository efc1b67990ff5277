//! Theater: owns one seat grid per movie it shows.
//!
//! All grid access goes through a single per-theater mutex. Multi-seat booking
//! validates every requested seat and then commits them inside one critical
//! section, so no other booking against the same theater can interleave
//! between the check and the commit. The seat-level compare-and-set stays in
//! place underneath the lock.
//!
//! # Invariants
//!
//! - A movie's grid is fully populated when the movie is added; seats are
//!   never added to or removed from an existing grid.
//! - `book_seats` either books every requested seat or changes nothing.

use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{
    layout::SeatLayout,
    movie::{Movie, MovieId, TheaterId},
    seat::{Seat, SeatCategory},
};

/// Seats for one (theater, movie) pairing, kept in grid order.
#[derive(Debug)]
struct SeatGrid {
    layout: SeatLayout,
    seats: Vec<Seat>,
    /// Seat id → position in `seats`
    index: HashMap<String, usize>,
}

impl SeatGrid {
    fn new(layout: SeatLayout) -> Self {
        let seats = layout.build_seats();
        let index =
            seats.iter().enumerate().map(|(pos, seat)| (seat.id().to_owned(), pos)).collect();
        Self { layout, seats, index }
    }

    fn seat(&self, id: &str) -> Option<&Seat> {
        self.index.get(id).map(|&pos| &self.seats[pos])
    }
}

#[derive(Debug, Default)]
struct TheaterState {
    /// Movies currently shown, in scheduling order
    movies: Vec<Movie>,
    grids: HashMap<MovieId, SeatGrid>,
}

/// A theater and its per-movie seat grids.
///
/// Shared between concurrent requests behind an `Arc`; all methods take
/// `&self`.
#[derive(Debug)]
pub struct Theater {
    id: TheaterId,
    name: String,
    state: Mutex<TheaterState>,
}

impl Theater {
    /// Create a theater showing nothing.
    pub fn new(id: impl Into<TheaterId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), state: Mutex::new(TheaterState::default()) }
    }

    /// Theater id.
    pub fn id(&self) -> TheaterId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Show `movie` with the default 20-seat layout.
    pub fn add_movie(&self, movie: Movie) {
        self.add_movie_with_layout(movie, SeatLayout::default());
    }

    /// Show `movie` with an explicit layout.
    ///
    /// Adding a movie that is already shown replaces its grid with a fresh one,
    /// discarding existing bookings for that movie in this theater.
    pub fn add_movie_with_layout(&self, movie: Movie, layout: SeatLayout) {
        let movie_id = movie.id();
        let grid = SeatGrid::new(layout);

        let mut state = self.state();
        if let Some(existing) = state.movies.iter_mut().find(|m| m.id() == movie_id) {
            tracing::warn!(
                theater_id = %self.id,
                %movie_id,
                "movie already shown, re-initializing its seat grid"
            );
            *existing = movie;
        } else {
            state.movies.push(movie);
        }
        state.grids.insert(movie_id, grid);
    }

    /// Whether this theater currently shows `movie_id`.
    pub fn shows_movie(&self, movie_id: MovieId) -> bool {
        self.state().grids.contains_key(&movie_id)
    }

    /// Movies shown here, in scheduling order.
    pub fn movies(&self) -> Vec<Movie> {
        self.state().movies.clone()
    }

    /// Layout of a screening. `None` if the movie is not shown.
    pub fn layout(&self, movie_id: MovieId) -> Option<SeatLayout> {
        self.state().grids.get(&movie_id).map(|grid| grid.layout)
    }

    /// Category of one seat. `None` if the movie or seat is unknown.
    pub fn seat_category(&self, movie_id: MovieId, seat_id: &str) -> Option<SeatCategory> {
        self.state().grids.get(&movie_id)?.seat(seat_id).map(Seat::category)
    }

    /// Ids of currently available seats, in grid order.
    ///
    /// Snapshot semantics: the result may be stale as soon as it returns.
    /// Empty if the movie is not shown.
    pub fn available_seats(&self, movie_id: MovieId) -> Vec<String> {
        let state = self.state();
        let Some(grid) = state.grids.get(&movie_id) else {
            return Vec::new();
        };

        grid.seats
            .iter()
            .filter(|seat| seat.is_available())
            .map(|seat| seat.id().to_owned())
            .collect()
    }

    /// Book every seat in `seat_ids`, or none of them.
    ///
    /// Returns `false` without mutating anything if the movie is not shown, the
    /// request is empty or repeats a seat, or any seat is unknown or already
    /// booked.
    pub fn book_seats<S: AsRef<str>>(&self, movie_id: MovieId, seat_ids: &[S]) -> bool {
        if seat_ids.is_empty() {
            return false;
        }

        let state = self.state();
        let Some(grid) = state.grids.get(&movie_id) else {
            return false;
        };

        let mut requested = Vec::with_capacity(seat_ids.len());
        let mut seen = HashSet::with_capacity(seat_ids.len());
        for seat_id in seat_ids {
            let seat_id: &str = seat_id.as_ref();
            if !seen.insert(seat_id) {
                return false;
            }
            match grid.seat(seat_id) {
                Some(seat) if seat.is_available() => requested.push(seat),
                _ => return false,
            }
        }

        // Grid seats never leave this theater and every booking path holds the
        // lock, so each seat validated above is still free and no CAS below can
        // lose. A loss would leave earlier seats booked.
        for seat in &requested {
            let won = seat.book();
            debug_assert!(won, "seat {} booked outside the theater lock", seat.id());
            if !won {
                tracing::error!(
                    theater_id = %self.id,
                    %movie_id,
                    seat_id = seat.id(),
                    "seat booked outside the theater lock during commit"
                );
                return false;
            }
        }

        true
    }

    fn state(&self) -> MutexGuard<'_, TheaterState> {
        // Grids are immutable after creation and seat flags are atomic, so a
        // poisoned guard still protects consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
