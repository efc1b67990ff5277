//! Protocol command names.

use std::fmt;

/// One of the four protocol operations.
///
/// Matching is case-sensitive and exact; `list_movies` is not a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `LIST_MOVIES`
    ListMovies,
    /// `LIST_THEATERS <movie_id>`
    ListTheaters,
    /// `LIST_SEATS <theater_id> <movie_id>`
    ListSeats,
    /// `BOOK <theater_id> <movie_id> <seat_id>...`
    Book,
}

impl CommandKind {
    /// Every command, in protocol documentation order.
    pub const ALL: [Self; 4] = [Self::ListMovies, Self::ListTheaters, Self::ListSeats, Self::Book];

    /// Parse a command token. `None` for anything that is not an exact match.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "LIST_MOVIES" => Some(Self::ListMovies),
            "LIST_THEATERS" => Some(Self::ListTheaters),
            "LIST_SEATS" => Some(Self::ListSeats),
            "BOOK" => Some(Self::Book),
            _ => None,
        }
    }

    /// Wire name of the command.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListMovies => "LIST_MOVIES",
            Self::ListTheaters => "LIST_THEATERS",
            Self::ListSeats => "LIST_SEATS",
            Self::Book => "BOOK",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
