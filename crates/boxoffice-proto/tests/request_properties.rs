//! Property-based tests for request decoding
//!
//! Decoding is total: any line yields a request or an error, and the reply to
//! it is always exactly one line.

use boxoffice_core::{MovieId, TheaterId};
use boxoffice_proto::{Encoding, Request, RequestError, Response};
use proptest::prelude::*;

fn seat_id() -> impl Strategy<Value = String> {
    "[a-z]{1,2}[1-9][0-9]?"
}

fn request() -> impl Strategy<Value = Request> {
    prop_oneof![
        Just(Request::ListMovies),
        any::<u32>().prop_map(|m| Request::ListTheaters { movie_id: MovieId(m) }),
        (any::<u32>(), any::<u32>()).prop_map(|(t, m)| Request::ListSeats {
            theater_id: TheaterId(t),
            movie_id: MovieId(m),
        }),
        (any::<u32>(), any::<u32>(), prop::collection::vec(seat_id(), 1..6)).prop_map(
            |(t, m, seats)| Request::Book { theater_id: TheaterId(t), movie_id: MovieId(m), seats }
        ),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: Arbitrary input never panics and always gets a one-line reply
    #[test]
    fn prop_decode_is_total(line in any::<String>()) {
        let encoding = Encoding::detect(&line);
        if let Err(err) = Request::decode(&line, encoding) {
            let reply = Response::from(err).encode(encoding);
            prop_assert!(reply.ends_with('\n'));
            prop_assert_eq!(reply.matches('\n').count(), 1);
        }
    }

    /// Property: Both encodings of a request decode to the same request
    #[test]
    fn prop_plain_and_json_agree(request in request()) {
        let plain = request.to_plain();
        let json = request.to_json().to_string();

        prop_assert_eq!(Encoding::detect(&plain), Encoding::Plain);
        prop_assert_eq!(Encoding::detect(&json), Encoding::Json);
        prop_assert_eq!(Request::decode(&plain, Encoding::Plain), Ok(request.clone()));
        prop_assert_eq!(Request::decode(&json, Encoding::Json), Ok(request));
    }

    /// Property: Extra whitespace between plain tokens is ignored
    #[test]
    fn prop_plain_whitespace_insensitive(request in request(), pad in "[ \t]{1,4}") {
        let padded = request.to_plain().split(' ').collect::<Vec<_>>().join(pad.as_str());
        let line = format!("{pad}{padded}{pad}\r\n");
        prop_assert_eq!(Request::decode(&line, Encoding::detect(&line)), Ok(request));
    }

    /// Property: Lowercase or otherwise altered command tokens are unknown
    #[test]
    fn prop_command_match_is_case_sensitive(request in request()) {
        let plain = request.to_plain();
        let lowered = plain.to_lowercase();
        let command = lowered.split(' ').next().unwrap_or_default().to_string();
        prop_assert_eq!(
            Request::decode(&lowered, Encoding::Plain),
            Err(RequestError::UnknownCommand(command))
        );
    }
}
