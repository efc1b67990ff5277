//! Wire codec for the boxoffice line protocol.
//!
//! Every request and every response is exactly one newline-terminated line.
//! Two encodings share the same command set:
//!
//! - Plain: space-separated tokens, first token is the command
//!   (`BOOK 1 2 a1 a2`). Replies are free text.
//! - JSON: one object per line with a `command` field
//!   (`{"command":"LIST_SEATS","theater_id":1,"movie_id":2}`). Replies are one
//!   JSON object per line.
//!
//! The encoding is chosen per line by [`Encoding::detect`], so one connection
//! may freely mix both forms. Replies are encoded in the form of the request
//! that produced them.
//!
//! Decoding never panics and never drops input: every line maps to either a
//! [`Request`] or a [`RequestError`], and both have a reply.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod command;
mod error;
mod request;
mod response;

pub use command::CommandKind;
pub use error::{ErrorCode, RequestError};
pub use request::{Encoding, Request};
pub use response::{BookingStatus, Listing, Response, sample_format};

/// Longest accepted request line in bytes, not counting the newline.
///
/// Readers must stop buffering once a line reaches this length without a
/// terminator and answer with [`RequestError::line_too_long`].
pub const MAX_LINE_LEN: usize = 64 * 1024;
