//! Per-connection session loop.
//!
//! Reads newline-delimited requests and writes exactly one reply per request
//! before reading the next. End-of-stream closes the session cleanly; an I/O
//! error closes it with a warning. Bytes that are not valid UTF-8 are decoded
//! lossily, so they yield an error reply instead of ending the session.
//!
//! A line is never buffered past [`MAX_LINE_LEN`] bytes. A peer that reaches
//! the limit without sending a newline gets an `INVALID_REQUEST` reply and the
//! session is closed, since the rest of that line cannot be framed.

use std::{
    io::{self, BufRead, BufReader, Read, Write},
    net::TcpStream,
};

use boxoffice_core::Inventory;
use boxoffice_proto::MAX_LINE_LEN;

use crate::{dispatch::Dispatcher, env::Clock};

/// Serve requests from `stream` until the peer disconnects or I/O fails.
///
/// Returns the number of requests answered. An oversized line is answered
/// and then ends the session with an `InvalidData` error.
pub(crate) fn run<S: Inventory, C: Clock>(
    session_id: u64,
    stream: TcpStream,
    dispatcher: &Dispatcher<S, C>,
) -> io::Result<u64> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;
    let mut buf = Vec::new();
    let mut served = 0u64;

    loop {
        buf.clear();
        let read = (&mut reader).take(MAX_LINE_LEN as u64 + 1).read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(served);
        }

        if read > MAX_LINE_LEN && !buf.ends_with(b"\n") {
            let reply = dispatcher.reject_oversized(&String::from_utf8_lossy(&buf));
            writer.write_all(reply.as_bytes())?;
            writer.flush()?;
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("request line exceeds {MAX_LINE_LEN} bytes"),
            ));
        }

        let line = String::from_utf8_lossy(&buf);
        let reply = dispatcher.handle_line(&line);
        writer.write_all(reply.as_bytes())?;
        writer.flush()?;

        served += 1;
        tracing::trace!(session_id, served, "reply sent");
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Read, net::TcpListener, thread};

    use boxoffice_core::{BookingService, InventoryStore};

    use super::*;
    use crate::env::FixedClock;

    fn serve_one(input: impl Into<Vec<u8>>) -> (io::Result<u64>, String) {
        let input = input.into();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.write_all(&input).unwrap();
            stream.shutdown(std::net::Shutdown::Write).unwrap();
            let mut out = String::new();
            stream.read_to_string(&mut out).unwrap();
            out
        });

        let (stream, _) = listener.accept().unwrap();
        let dispatcher =
            Dispatcher::new(BookingService::new(InventoryStore::new()), FixedClock(0));
        let result = run(1, stream, &dispatcher);
        (result, client.join().unwrap())
    }

    #[test]
    fn one_reply_per_line_then_clean_close() {
        let (result, out) = serve_one(b"LIST_MOVIES\nNOPE\nLIST_SEATS 1 1\n");
        assert_eq!(result.unwrap(), 3);
        assert_eq!(out, "\nUNKNOWN_COMMAND\n\n");
    }

    #[test]
    fn invalid_utf8_gets_a_reply() {
        let (result, out) = serve_one(b"\xff\xfe\nLIST_MOVIES\n");
        assert_eq!(result.unwrap(), 2);
        assert_eq!(out, "UNKNOWN_COMMAND\n\n");
    }

    #[test]
    fn trailing_partial_line_is_answered() {
        let (result, out) = serve_one(b"BOOK 1 1");
        assert_eq!(result.unwrap(), 1);
        assert_eq!(out, "INVALID_REQUEST: BOOK requires at least one seat id\n");
    }

    #[test]
    fn line_at_the_limit_is_served() {
        let mut input = vec![b'A'; MAX_LINE_LEN];
        input.extend_from_slice(b"\nLIST_MOVIES\n");
        let (result, out) = serve_one(input);
        assert_eq!(result.unwrap(), 2);
        assert_eq!(out, "UNKNOWN_COMMAND\n\n");
    }

    #[test]
    fn oversized_line_is_rejected_and_closes_session() {
        // Exactly one byte over, so the server consumes everything it was sent
        let (result, out) = serve_one(vec![b'A'; MAX_LINE_LEN + 1]);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert_eq!(out, "INVALID_REQUEST: request line exceeds 65536 bytes\n");
    }
}
