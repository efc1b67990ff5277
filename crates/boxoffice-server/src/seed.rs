//! Demo catalog used by the binary and end-to-end tests.

use boxoffice_core::{
    AdministrationService, Inventory, InventoryError, Movie, MovieId, Theater, TheaterId,
};

/// Seed two movies and two theaters.
///
/// - Movies: 1 "Inception", 2 "The Matrix"
/// - Theater 1 "Cinema One" shows both movies
/// - Theater 2 "Cinema Two" shows "The Matrix"
///
/// Every screening uses the default 20-seat layout. Fails if any of the ids
/// are already taken.
pub fn seed_demo_catalog<S: Inventory>(
    admin: &AdministrationService<S>,
) -> Result<(), InventoryError> {
    admin.add_movie(Movie::new(1, "Inception"))?;
    admin.add_movie(Movie::new(2, "The Matrix"))?;

    admin.add_theater(Theater::new(1, "Cinema One"))?;
    admin.add_theater(Theater::new(2, "Cinema Two"))?;

    for (theater_id, movie_id) in [(1, 1), (1, 2), (2, 2)] {
        admin.schedule_movie(TheaterId(theater_id), MovieId(movie_id))?;
    }

    tracing::info!(movies = 2, theaters = 2, "demo catalog seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use boxoffice_core::InventoryStore;

    use super::*;

    #[test]
    fn seeds_expected_schedule() {
        let store = InventoryStore::new();
        let admin = AdministrationService::new(store.clone());
        seed_demo_catalog(&admin).unwrap();

        assert_eq!(store.movie_count(), 2);
        assert_eq!(store.theater_count(), 2);
        let showing: Vec<_> =
            store.get_theaters_showing_movie(MovieId(2)).iter().map(|t| t.id()).collect();
        assert_eq!(showing, [TheaterId(1), TheaterId(2)]);
        let showing: Vec<_> =
            store.get_theaters_showing_movie(MovieId(1)).iter().map(|t| t.id()).collect();
        assert_eq!(showing, [TheaterId(1)]);
        assert_eq!(store.get_available_seats(TheaterId(2), MovieId(2)).len(), 20);
    }

    #[test]
    fn seeding_twice_fails() {
        let admin = AdministrationService::new(InventoryStore::new());
        seed_demo_catalog(&admin).unwrap();
        assert_eq!(
            seed_demo_catalog(&admin),
            Err(InventoryError::MovieAlreadyExists(MovieId(1)))
        );
    }
}
