//! Server lifecycle: shutdown stops accepting, closes sessions and joins.

use std::{
    thread,
    time::{Duration, Instant},
};

use boxoffice_client::{Client, ClientError};
use boxoffice_core::{BookingService, InventoryStore};
use boxoffice_server::{Server, ServerConfig};

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}

fn bind(workers: usize) -> Server {
    let config = ServerConfig { bind_address: "127.0.0.1:0".to_string(), workers };
    Server::bind(config, BookingService::new(InventoryStore::new())).unwrap()
}

#[test]
fn shutdown_closes_idle_sessions_and_joins() {
    let server = bind(2);
    let addr = server.local_addr();
    let handle = server.shutdown_handle();
    let running = thread::spawn(move || server.run());

    let mut a = Client::connect(addr).unwrap();
    let mut b = Client::connect(addr).unwrap();
    a.send_line("LIST_MOVIES").unwrap();
    b.send_line("LIST_MOVIES").unwrap();
    assert!(wait_until(|| handle.active_sessions() == 2));

    let sessions = handle.sessions();
    assert_eq!(sessions.len(), 2);
    assert!(sessions[0].0 < sessions[1].0);
    assert!(sessions.iter().all(|(_, peer)| peer.ip().is_loopback()));

    handle.shutdown();
    running.join().unwrap().unwrap();

    assert_eq!(handle.active_sessions(), 0);
    assert!(handle.sessions().is_empty());
    assert!(matches!(
        a.send_line("LIST_MOVIES"),
        Err(ClientError::Disconnected | ClientError::Io(_))
    ));
    assert!(Client::connect(addr).is_err());
}

#[test]
fn shutdown_before_run_returns_immediately() {
    let server = bind(1);
    let handle = server.shutdown_handle();
    handle.shutdown();
    // Second call is a no-op
    handle.shutdown();

    server.run().unwrap();
}

#[test]
fn queued_connections_are_closed_on_shutdown() {
    let server = bind(1);
    let addr = server.local_addr();
    let handle = server.shutdown_handle();
    let running = thread::spawn(move || server.run());

    let mut busy = Client::connect(addr).unwrap();
    busy.send_line("LIST_MOVIES").unwrap();
    // Accepted but waiting for the single worker
    let mut queued = Client::connect(addr).unwrap();

    handle.shutdown();
    running.join().unwrap().unwrap();

    assert!(queued.send_line("LIST_MOVIES").is_err());
}
