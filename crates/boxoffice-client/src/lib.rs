//! Blocking client for the boxoffice line protocol.
//!
//! A [`Client`] owns one persistent connection and speaks strictly
//! request/reply: every call writes one line and reads exactly one line back.
//! The typed helpers send the JSON form and parse the reply into a
//! [`serde_json::Value`]; [`Client::send_plain`] sends the token form and
//! returns the raw reply text.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::{
    io::{self, BufRead, BufReader, Write},
    net::{SocketAddr, TcpStream, ToSocketAddrs},
};

use boxoffice_core::{MovieId, TheaterId};
use boxoffice_proto::Request;
use serde_json::Value;
use thiserror::Error;

/// Errors from the client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Socket error while connecting, writing or reading
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Server closed the connection before replying
    #[error("server closed the connection")]
    Disconnected,

    /// Reply line was not valid JSON
    #[error("invalid JSON reply: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One connection to a boxoffice server.
#[derive(Debug)]
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer_addr: SocketAddr,
}

impl Client {
    /// Connect to a server.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let writer = TcpStream::connect(addr)?;
        let peer_addr = writer.peer_addr()?;
        let reader = BufReader::new(writer.try_clone()?);
        tracing::debug!(%peer_addr, "connected");
        Ok(Self { reader, writer, peer_addr })
    }

    /// Address of the server.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Send one raw line and return the reply without its terminator.
    ///
    /// A trailing newline is appended to `line` if it has none.
    pub fn send_line(&mut self, line: &str) -> Result<String, ClientError> {
        self.writer.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;

        let mut reply = String::new();
        if self.reader.read_line(&mut reply)? == 0 {
            return Err(ClientError::Disconnected);
        }

        let trimmed = reply.trim_end_matches(['\r', '\n']).len();
        reply.truncate(trimmed);
        Ok(reply)
    }

    /// Send a request in the plain token form and return the reply text.
    pub fn send_plain(&mut self, request: &Request) -> Result<String, ClientError> {
        self.send_line(&request.to_plain())
    }

    /// Send a request in the JSON form and parse the reply.
    pub fn send_json(&mut self, request: &Request) -> Result<Value, ClientError> {
        let reply = self.send_line(&request.to_json().to_string())?;
        Ok(serde_json::from_str(&reply)?)
    }

    /// `LIST_MOVIES`: `{"movies":[{"id","name"}, ...]}`.
    pub fn list_movies(&mut self) -> Result<Value, ClientError> {
        self.send_json(&Request::ListMovies)
    }

    /// `LIST_THEATERS`: `{"theaters":[{"id","name"}, ...]}`.
    pub fn list_theaters(&mut self, movie_id: MovieId) -> Result<Value, ClientError> {
        self.send_json(&Request::ListTheaters { movie_id })
    }

    /// `LIST_SEATS`: available seats and their count.
    pub fn list_seats(
        &mut self,
        theater_id: TheaterId,
        movie_id: MovieId,
    ) -> Result<Value, ClientError> {
        self.send_json(&Request::ListSeats { theater_id, movie_id })
    }

    /// `BOOK`: reply `status` is `BOOKED` or `FAILED`.
    pub fn book<T: AsRef<str>>(
        &mut self,
        theater_id: TheaterId,
        movie_id: MovieId,
        seats: &[T],
    ) -> Result<Value, ClientError> {
        let seats = seats.iter().map(|seat| seat.as_ref().to_owned()).collect();
        self.send_json(&Request::Book { theater_id, movie_id, seats })
    }
}
