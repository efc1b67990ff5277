//! Request dispatch: one request line in, one reply line out.
//!
//! The dispatcher is pure with respect to I/O. It decodes a line, runs the
//! request against the booking facade and encodes the reply in the same wire
//! form as the request. Decoding failures become error replies; nothing here
//! can end a session.

use boxoffice_core::{BookingService, Inventory, InventoryStore};
use boxoffice_proto::{BookingStatus, Encoding, Listing, Request, RequestError, Response};

use crate::env::{Clock, SystemClock};

/// Executes decoded requests against the booking facade.
#[derive(Debug, Clone)]
pub struct Dispatcher<S = InventoryStore, C = SystemClock> {
    booking: BookingService<S>,
    clock: C,
}

impl<S: Inventory, C: Clock> Dispatcher<S, C> {
    /// Create a dispatcher over `booking`, stamping bookings with `clock`.
    pub fn new(booking: BookingService<S>, clock: C) -> Self {
        Self { booking, clock }
    }

    /// Handle one raw request line and return the newline-terminated reply.
    pub fn handle_line(&self, line: &str) -> String {
        let encoding = Encoding::detect(line);
        let response = match Request::decode(line, encoding) {
            Ok(request) => {
                tracing::debug!(command = %request.kind(), ?encoding, "request decoded");
                self.execute(request)
            },
            Err(err) => {
                tracing::warn!(error = %err, ?encoding, "rejected request");
                Response::from(err)
            },
        };

        response.encode(encoding)
    }

    /// Reply to a line that was cut off at the length limit.
    ///
    /// `prefix` is what was read before the limit; it only picks the reply
    /// encoding.
    pub fn reject_oversized(&self, prefix: &str) -> String {
        let encoding = Encoding::detect(prefix);
        tracing::warn!(?encoding, limit = boxoffice_proto::MAX_LINE_LEN, "request line too long");
        Response::from(RequestError::line_too_long()).encode(encoding)
    }

    /// Run a decoded request.
    pub fn execute(&self, request: Request) -> Response {
        match request {
            Request::ListMovies => {
                Response::Movies(self.booking.get_all_movies().iter().map(Listing::from).collect())
            },
            Request::ListTheaters { movie_id } => Response::Theaters(
                self.booking
                    .get_theaters_showing_movie(movie_id)
                    .iter()
                    .map(|theater| Listing::from(theater.as_ref()))
                    .collect(),
            ),
            Request::ListSeats { theater_id, movie_id } => Response::Seats {
                theater_id,
                movie_id,
                available_seats: self.booking.get_available_seats(theater_id, movie_id),
            },
            Request::Book { theater_id, movie_id, seats } => {
                let status = match self.booking.book_seats(theater_id, movie_id, &seats) {
                    Ok(()) => BookingStatus::Booked,
                    Err(_) => BookingStatus::Failed,
                };
                Response::Booking {
                    status,
                    theater_id,
                    movie_id,
                    seats,
                    timestamp: self.clock.wall_clock_secs(),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use boxoffice_core::{AdministrationService, Movie, MovieId, Theater, TheaterId};

    use super::*;
    use crate::env::FixedClock;

    fn dispatcher() -> Dispatcher<InventoryStore, FixedClock> {
        let store = InventoryStore::new();
        let admin = AdministrationService::new(store.clone());
        admin.add_movie(Movie::new(1, "Inception")).unwrap();
        admin.add_movie(Movie::new(2, "The Matrix")).unwrap();
        admin.add_theater(Theater::new(1, "Cinema One")).unwrap();
        admin.schedule_movie(TheaterId(1), MovieId(1)).unwrap();
        Dispatcher::new(BookingService::new(store), FixedClock(1_700_000_000))
    }

    #[test]
    fn plain_round_trip() {
        let d = dispatcher();
        assert_eq!(d.handle_line("LIST_MOVIES\n"), "1: Inception; 2: The Matrix\n");
        assert_eq!(d.handle_line("LIST_THEATERS 1\n"), "1: Cinema One\n");
        assert_eq!(d.handle_line("LIST_THEATERS 2\n"), "\n");
        assert_eq!(d.handle_line("BOOK 1 1 a1 a2\n"), "BOOKED\n");
        assert_eq!(d.handle_line("BOOK 1 1 a2 a3\n"), "FAILED\n");
        assert!(d.handle_line("LIST_SEATS 1 1\n").starts_with("a3 a4 a5 b1"));
    }

    #[test]
    fn json_booking_reply_carries_clock_timestamp() {
        let d = dispatcher();
        let reply =
            d.handle_line(r#"{"command":"BOOK","theater_id":1,"movie_id":1,"seats":["c1"]}"#);
        assert!(reply.ends_with('\n'));
        let reply: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(
            reply,
            serde_json::json!({
                "status": "BOOKED",
                "theater_id": 1,
                "movie_id": 1,
                "seats": ["c1"],
                "timestamp": 1_700_000_000u64,
            })
        );
    }

    #[test]
    fn errors_become_replies() {
        let d = dispatcher();
        assert_eq!(d.handle_line("HELLO\n"), "UNKNOWN_COMMAND\n");
        assert_eq!(d.handle_line("\n"), "INVALID_REQUEST: empty request\n");
        let reply: serde_json::Value =
            serde_json::from_str(&d.handle_line("{\"command\":\n")).unwrap();
        assert_eq!(reply["error"], "INVALID_REQUEST");
    }

    #[test]
    fn oversized_line_reply_follows_prefix_encoding() {
        let d = dispatcher();
        assert_eq!(
            d.reject_oversized("LIST_SEATS 1 1 1 1 1"),
            "INVALID_REQUEST: request line exceeds 65536 bytes\n"
        );
        let reply: serde_json::Value =
            serde_json::from_str(&d.reject_oversized("{\"command\":\"BOOK\",\"seats\":[")).unwrap();
        assert_eq!(reply["error"], "INVALID_REQUEST");
        assert_eq!(reply["message"], "request line exceeds 65536 bytes");
    }

    #[test]
    fn unknown_screening_books_nothing() {
        let d = dispatcher();
        assert_eq!(d.handle_line("BOOK 1 2 a1\n"), "FAILED\n");
        assert_eq!(d.handle_line("BOOK 9 1 a1\n"), "FAILED\n");
        assert_eq!(d.handle_line("LIST_SEATS 9 1\n"), "\n");
    }
}
