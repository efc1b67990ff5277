//! Catalog identifiers and the movie value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique movie identifier within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u32);

/// Unique theater identifier within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TheaterId(pub u32);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TheaterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MovieId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for TheaterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A movie in the catalog.
///
/// Immutable once created. Copies are cheap enough that the store hands out
/// clones rather than references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Movie {
    id: MovieId,
    title: String,
}

impl Movie {
    /// Create a movie value.
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into() }
    }

    /// Catalog id.
    pub fn id(&self) -> MovieId {
        self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_accessors() {
        let movie = Movie::new(42, "Blade Runner");
        assert_eq!(movie.id(), MovieId(42));
        assert_eq!(movie.title(), "Blade Runner");
    }

    #[test]
    fn ids_display_as_bare_integers() {
        assert_eq!(MovieId(7).to_string(), "7");
        assert_eq!(TheaterId(12).to_string(), "12");
    }
}
