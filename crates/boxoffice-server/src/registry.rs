//! Session registry for tracking live connections.
//!
//! Every accepted connection is registered under a fresh session id for as
//! long as its session loop runs. The registry keeps a second handle to each
//! socket so shutdown can force-close sessions that are blocked in a read.

use std::{
    collections::HashMap,
    net::{Shutdown, SocketAddr, TcpStream},
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

/// Information about a registered session.
#[derive(Debug)]
struct SessionEntry {
    /// Remote address of the client
    peer_addr: SocketAddr,
    /// Cloned handle used only for forced close
    stream: TcpStream,
}

/// Registry of live sessions.
///
/// Shared between the accept loop, the workers and the shutdown handle.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// Next session id to hand out; ids are never reused
    next_id: AtomicU64,
    /// Session ID → session entry
    sessions: Mutex<HashMap<u64, SessionEntry>>,
}

impl SessionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a live session and return its id.
    ///
    /// `stream` should be a clone of the session's socket.
    pub fn register(&self, peer_addr: SocketAddr, stream: TcpStream) -> u64 {
        let session_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.sessions().insert(session_id, SessionEntry { peer_addr, stream });
        session_id
    }

    /// Remove a session. Returns its peer address if it was registered.
    pub fn unregister(&self, session_id: u64) -> Option<SocketAddr> {
        self.sessions().remove(&session_id).map(|entry| entry.peer_addr)
    }

    /// Number of live sessions.
    pub fn active_sessions(&self) -> usize {
        self.sessions().len()
    }

    /// Live sessions as `(session_id, peer_addr)`, ordered by id.
    pub fn sessions_snapshot(&self) -> Vec<(u64, SocketAddr)> {
        let mut snapshot: Vec<_> =
            self.sessions().iter().map(|(&id, entry)| (id, entry.peer_addr)).collect();
        snapshot.sort_unstable_by_key(|&(id, _)| id);
        snapshot
    }

    /// Shut down both directions of every live socket.
    ///
    /// Sessions blocked in a read wake with end-of-stream and unregister
    /// themselves. Returns the number of sockets closed.
    pub fn close_all(&self) -> usize {
        let sessions = self.sessions();
        for (session_id, entry) in sessions.iter() {
            if let Err(err) = entry.stream.shutdown(Shutdown::Both) {
                // Peer already gone; the session loop will notice on its own
                tracing::debug!(session_id, error = %err, "socket already closed");
            }
        }
        sessions.len()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<u64, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
