//! Response encoding.
//!
//! Plain replies are single free-text lines. JSON replies are single objects
//! with the field names clients already depend on (`movies`, `theaters`,
//! `available_seats`, `total_available`, `status`, `timestamp`, `error`).

use boxoffice_core::{Movie, MovieId, Theater, TheaterId};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    command::CommandKind,
    error::{ErrorCode, RequestError},
    request::Encoding,
};

/// One `{id, name}` entry of a movie or theater listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Movie or theater id
    pub id: u32,
    /// Movie title or theater name
    pub name: String,
}

impl From<&Movie> for Listing {
    fn from(movie: &Movie) -> Self {
        Self { id: movie.id().0, name: movie.title().to_owned() }
    }
}

impl From<&Theater> for Listing {
    fn from(theater: &Theater) -> Self {
        Self { id: theater.id().0, name: theater.name().to_owned() }
    }
}

/// Outcome of a `BOOK` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Every requested seat was booked
    Booked,
    /// Nothing was booked
    Failed,
}

impl BookingStatus {
    /// Wire spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "BOOKED",
            Self::Failed => "FAILED",
        }
    }
}

/// A reply to exactly one request line.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// `LIST_MOVIES` result
    Movies(Vec<Listing>),
    /// `LIST_THEATERS` result
    Theaters(Vec<Listing>),
    /// `LIST_SEATS` result
    Seats {
        /// Theater that was queried
        theater_id: TheaterId,
        /// Movie that was queried
        movie_id: MovieId,
        /// Available seat ids in grid order
        available_seats: Vec<String>,
    },
    /// `BOOK` result
    Booking {
        /// Whether the seats were booked
        status: BookingStatus,
        /// Theater that was targeted
        theater_id: TheaterId,
        /// Movie that was targeted
        movie_id: MovieId,
        /// Seats as requested
        seats: Vec<String>,
        /// Unix seconds when the request was handled
        timestamp: u64,
    },
    /// The request line could not be decoded
    Error(RequestError),
}

impl Response {
    /// Encode as one newline-terminated line.
    pub fn encode(&self, encoding: Encoding) -> String {
        let mut line = match encoding {
            Encoding::Plain => self.to_plain(),
            Encoding::Json => self.to_json().to_string(),
        };
        line.push('\n');
        line
    }

    /// Plain free-text form, without a line terminator.
    ///
    /// Embedded line breaks (e.g. in a movie title) are flattened to spaces so
    /// the reply stays on one line.
    pub fn to_plain(&self) -> String {
        let text = match self {
            Self::Movies(entries) | Self::Theaters(entries) => entries
                .iter()
                .map(|entry| format!("{}: {}", entry.id, entry.name))
                .collect::<Vec<_>>()
                .join("; "),
            Self::Seats { available_seats, .. } => available_seats.join(" "),
            Self::Booking { status, .. } => status.as_str().to_string(),
            Self::Error(RequestError::UnknownCommand(_)) => {
                ErrorCode::UnknownCommand.as_str().to_string()
            },
            Self::Error(RequestError::Invalid(message)) => {
                format!("{}: {message}", ErrorCode::InvalidRequest.as_str())
            },
        };

        if text.contains(['\r', '\n']) { text.replace(['\r', '\n'], " ") } else { text }
    }

    /// JSON object form.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Movies(movies) => json!({ "movies": movies }),
            Self::Theaters(theaters) => json!({ "theaters": theaters }),
            Self::Seats { theater_id, movie_id, available_seats } => json!({
                "theater_id": theater_id,
                "movie_id": movie_id,
                "available_seats": available_seats,
                "total_available": available_seats.len(),
            }),
            Self::Booking { status, theater_id, movie_id, seats, timestamp } => json!({
                "status": status,
                "theater_id": theater_id,
                "movie_id": movie_id,
                "seats": seats,
                "timestamp": timestamp,
            }),
            Self::Error(RequestError::UnknownCommand(command)) => json!({
                "error": ErrorCode::UnknownCommand,
                "received_command": command,
                "valid_commands": CommandKind::ALL.map(CommandKind::as_str),
            }),
            Self::Error(RequestError::Invalid(message)) => json!({
                "error": ErrorCode::InvalidRequest,
                "message": message,
                "sample_format": sample_format(),
            }),
        }
    }
}

impl From<RequestError> for Response {
    fn from(err: RequestError) -> Self {
        Self::Error(err)
    }
}

/// One well-formed JSON request per command, keyed by command name.
///
/// Sent back with every JSON `INVALID_REQUEST` reply.
pub fn sample_format() -> Value {
    json!({
        "LIST_MOVIES": { "command": "LIST_MOVIES" },
        "LIST_THEATERS": { "command": "LIST_THEATERS", "movie_id": 1 },
        "LIST_SEATS": { "command": "LIST_SEATS", "theater_id": 1, "movie_id": 2 },
        "BOOK": { "command": "BOOK", "theater_id": 1, "movie_id": 2, "seats": ["a1", "a2", "b3"] },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Request;

    fn listings() -> Vec<Listing> {
        vec![
            Listing { id: 1, name: "Inception".to_string() },
            Listing { id: 2, name: "The Matrix".to_string() },
        ]
    }

    #[test]
    fn plain_listings() {
        assert_eq!(Response::Movies(listings()).to_plain(), "1: Inception; 2: The Matrix");
        assert_eq!(Response::Theaters(Vec::new()).to_plain(), "");
    }

    #[test]
    fn plain_seats_and_booking() {
        let seats = Response::Seats {
            theater_id: TheaterId(1),
            movie_id: MovieId(1),
            available_seats: vec!["a3".to_string(), "a4".to_string()],
        };
        assert_eq!(seats.encode(Encoding::Plain), "a3 a4\n");

        let booking = Response::Booking {
            status: BookingStatus::Failed,
            theater_id: TheaterId(1),
            movie_id: MovieId(1),
            seats: vec!["a1".to_string()],
            timestamp: 1_700_000_000,
        };
        assert_eq!(booking.encode(Encoding::Plain), "FAILED\n");
    }

    #[test]
    fn plain_errors() {
        let unknown = Response::from(RequestError::UnknownCommand("HELLO".to_string()));
        assert_eq!(unknown.to_plain(), "UNKNOWN_COMMAND");
        let invalid = Response::from(RequestError::Invalid("missing movie_id".to_string()));
        assert_eq!(invalid.to_plain(), "INVALID_REQUEST: missing movie_id");
    }

    #[test]
    fn plain_reply_is_always_one_line() {
        let movies = Response::Movies(vec![Listing { id: 1, name: "Two\nLines".to_string() }]);
        let line = movies.encode(Encoding::Plain);
        assert_eq!(line, "1: Two Lines\n");
    }

    #[test]
    fn json_shapes() {
        assert_eq!(
            Response::Movies(listings()).to_json(),
            json!({
                "movies": [{ "id": 1, "name": "Inception" }, { "id": 2, "name": "The Matrix" }]
            })
        );

        let seats = Response::Seats {
            theater_id: TheaterId(1),
            movie_id: MovieId(2),
            available_seats: vec!["a1".to_string(), "a2".to_string()],
        };
        assert_eq!(
            seats.to_json(),
            json!({
                "theater_id": 1,
                "movie_id": 2,
                "available_seats": ["a1", "a2"],
                "total_available": 2,
            })
        );

        let booking = Response::Booking {
            status: BookingStatus::Booked,
            theater_id: TheaterId(1),
            movie_id: MovieId(2),
            seats: vec!["a1".to_string()],
            timestamp: 42,
        };
        assert_eq!(
            booking.to_json(),
            json!({
                "status": "BOOKED",
                "theater_id": 1,
                "movie_id": 2,
                "seats": ["a1"],
                "timestamp": 42,
            })
        );
    }

    #[test]
    fn json_errors() {
        let unknown = Response::from(RequestError::UnknownCommand("CANCEL".to_string())).to_json();
        assert_eq!(unknown["error"], "UNKNOWN_COMMAND");
        assert_eq!(unknown["received_command"], "CANCEL");
        assert_eq!(
            unknown["valid_commands"],
            json!(["LIST_MOVIES", "LIST_THEATERS", "LIST_SEATS", "BOOK"])
        );

        let invalid = Response::from(RequestError::Invalid("bad".to_string())).to_json();
        assert_eq!(invalid["error"], "INVALID_REQUEST");
        assert_eq!(invalid["message"], "bad");
        assert_eq!(invalid["sample_format"], sample_format());
    }

    #[test]
    fn samples_decode_as_requests() {
        let samples = sample_format();
        for kind in CommandKind::ALL {
            let line = samples[kind.as_str()].to_string();
            assert_eq!(Request::parse_json(&line).map(|r| r.kind()), Ok(kind));
        }
    }

    #[test]
    fn json_encoding_is_single_line() {
        let movies = Response::Movies(vec![Listing { id: 1, name: "Two\nLines".to_string() }]);
        let line = movies.encode(Encoding::Json);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));
    }
}
