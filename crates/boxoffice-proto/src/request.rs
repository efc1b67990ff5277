//! Request decoding.
//!
//! A request line is decoded in two steps: [`Encoding::detect`] picks the
//! form, then [`Request::decode`] parses it. JSON decoding first reads the
//! `command` field on its own so an unrecognized command is reported as
//! `UNKNOWN_COMMAND` rather than as a generic schema mismatch.

use boxoffice_core::{MovieId, TheaterId};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{command::CommandKind, error::RequestError};

/// Wire form of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Space-separated tokens
    Plain,
    /// One JSON object
    Json,
}

impl Encoding {
    /// JSON if the first non-blank character is `{`, plain otherwise.
    pub fn detect(line: &str) -> Self {
        if line.trim_start().starts_with('{') { Self::Json } else { Self::Plain }
    }
}

/// A decoded protocol request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// List every movie in the catalog.
    ListMovies,
    /// List theaters showing a movie.
    ListTheaters {
        /// Movie to look up
        movie_id: MovieId,
    },
    /// List available seats for one screening.
    ListSeats {
        /// Theater to look up
        theater_id: TheaterId,
        /// Movie to look up
        movie_id: MovieId,
    },
    /// Book a set of seats, all or nothing.
    Book {
        /// Target theater
        theater_id: TheaterId,
        /// Target movie
        movie_id: MovieId,
        /// Seat ids; never empty once decoded
        seats: Vec<String>,
    },
}

impl Request {
    /// Decode one line in the given encoding.
    ///
    /// Trailing line terminators are ignored.
    pub fn decode(line: &str, encoding: Encoding) -> Result<Self, RequestError> {
        let line = line.trim_end_matches(['\r', '\n']);
        match encoding {
            Encoding::Plain => Self::parse_plain(line),
            Encoding::Json => Self::parse_json(line),
        }
    }

    /// Parse the plain token form.
    ///
    /// Tokens past the last expected argument of a `LIST_*` command are
    /// ignored.
    pub fn parse_plain(line: &str) -> Result<Self, RequestError> {
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            return Err(RequestError::Invalid("empty request".to_string()));
        };
        let kind = CommandKind::parse(command)
            .ok_or_else(|| RequestError::UnknownCommand(command.to_string()))?;

        match kind {
            CommandKind::ListMovies => Ok(Self::ListMovies),
            CommandKind::ListTheaters => {
                Ok(Self::ListTheaters { movie_id: next_id(&mut tokens, "movie_id")? })
            },
            CommandKind::ListSeats => {
                let theater_id = next_id(&mut tokens, "theater_id")?;
                let movie_id = next_id(&mut tokens, "movie_id")?;
                Ok(Self::ListSeats { theater_id, movie_id })
            },
            CommandKind::Book => {
                let theater_id = next_id(&mut tokens, "theater_id")?;
                let movie_id = next_id(&mut tokens, "movie_id")?;
                let seats: Vec<String> = tokens.map(str::to_owned).collect();
                Self::book(theater_id, movie_id, seats)
            },
        }
    }

    /// Parse the JSON object form.
    pub fn parse_json(line: &str) -> Result<Self, RequestError> {
        let value: Value =
            serde_json::from_str(line).map_err(|e| RequestError::Invalid(e.to_string()))?;

        match value.get("command") {
            Some(Value::String(command)) => {
                if CommandKind::parse(command).is_none() {
                    return Err(RequestError::UnknownCommand(command.clone()));
                }
            },
            Some(_) => return Err(RequestError::Invalid("`command` must be a string".to_string())),
            None => return Err(RequestError::Invalid("missing field `command`".to_string())),
        }

        match serde_json::from_value(value).map_err(|e| RequestError::Invalid(e.to_string()))? {
            Self::Book { theater_id, movie_id, seats } => Self::book(theater_id, movie_id, seats),
            request => Ok(request),
        }
    }

    /// Command of this request.
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::ListMovies => CommandKind::ListMovies,
            Self::ListTheaters { .. } => CommandKind::ListTheaters,
            Self::ListSeats { .. } => CommandKind::ListSeats,
            Self::Book { .. } => CommandKind::Book,
        }
    }

    /// Encode in the plain token form, without a line terminator.
    pub fn to_plain(&self) -> String {
        match self {
            Self::ListMovies => CommandKind::ListMovies.to_string(),
            Self::ListTheaters { movie_id } => format!("LIST_THEATERS {movie_id}"),
            Self::ListSeats { theater_id, movie_id } => {
                format!("LIST_SEATS {theater_id} {movie_id}")
            },
            Self::Book { theater_id, movie_id, seats } => {
                format!("BOOK {theater_id} {movie_id} {}", seats.join(" "))
            },
        }
    }

    /// Encode as a JSON object.
    pub fn to_json(&self) -> Value {
        let command = self.kind().as_str();
        match self {
            Self::ListMovies => json!({ "command": command }),
            Self::ListTheaters { movie_id } => json!({ "command": command, "movie_id": movie_id }),
            Self::ListSeats { theater_id, movie_id } => {
                json!({ "command": command, "theater_id": theater_id, "movie_id": movie_id })
            },
            Self::Book { theater_id, movie_id, seats } => json!({
                "command": command,
                "theater_id": theater_id,
                "movie_id": movie_id,
                "seats": seats,
            }),
        }
    }

    fn book(
        theater_id: TheaterId,
        movie_id: MovieId,
        seats: Vec<String>,
    ) -> Result<Self, RequestError> {
        if seats.is_empty() {
            return Err(RequestError::Invalid("BOOK requires at least one seat id".to_string()));
        }
        Ok(Self::Book { theater_id, movie_id, seats })
    }
}

fn next_id<'a, T: From<u32>>(
    tokens: &mut impl Iterator<Item = &'a str>,
    field: &str,
) -> Result<T, RequestError> {
    let token = tokens.next().ok_or_else(|| RequestError::Invalid(format!("missing {field}")))?;
    token.parse::<u32>().map(T::from).map_err(|_| {
        RequestError::Invalid(format!("{field} must be a non-negative integer, got {token:?}"))
    })
}
