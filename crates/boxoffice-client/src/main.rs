//! Boxoffice client binary.
//!
//! Sends one request and prints the raw reply line.
//!
//! # Usage
//!
//! ```bash
//! boxoffice-client list-movies
//! boxoffice-client --plain list-seats 1 2
//! boxoffice-client --addr 10.0.0.5:12345 book 1 2 a1 a2
//! ```

use std::io::{self, Write};

use boxoffice_client::Client;
use boxoffice_core::{MovieId, TheaterId};
use boxoffice_proto::Request;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxoffice command-line client
#[derive(Parser, Debug)]
#[command(name = "boxoffice-client")]
#[command(about = "Send one request to a boxoffice server and print the reply")]
#[command(version)]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:12345")]
    addr: String,

    /// Use the plain token form instead of JSON
    #[arg(long)]
    plain: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every movie
    ListMovies,
    /// List theaters showing a movie
    ListTheaters {
        /// Movie id
        movie_id: u32,
    },
    /// List available seats for a screening
    ListSeats {
        /// Theater id
        theater_id: u32,
        /// Movie id
        movie_id: u32,
    },
    /// Book seats, all or nothing
    Book {
        /// Theater id
        theater_id: u32,
        /// Movie id
        movie_id: u32,
        /// Seat ids (e.g. a1 b3)
        #[arg(required = true)]
        seats: Vec<String>,
    },
}

impl From<Command> for Request {
    fn from(command: Command) -> Self {
        match command {
            Command::ListMovies => Self::ListMovies,
            Command::ListTheaters { movie_id } => {
                Self::ListTheaters { movie_id: MovieId(movie_id) }
            },
            Command::ListSeats { theater_id, movie_id } => {
                Self::ListSeats { theater_id: TheaterId(theater_id), movie_id: MovieId(movie_id) }
            },
            Command::Book { theater_id, movie_id, seats } => {
                Self::Book { theater_id: TheaterId(theater_id), movie_id: MovieId(movie_id), seats }
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let request = Request::from(args.command);
    let line = if args.plain { request.to_plain() } else { request.to_json().to_string() };

    let mut client = Client::connect(&args.addr)?;
    let reply = client.send_line(&line)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{reply}")?;
    Ok(())
}
