//! Boxoffice production server.
//!
//! Blocking TCP server for the boxoffice line protocol, built on std threads.
//!
//! # Architecture
//!
//! One accept loop hands every accepted connection to a fixed-size
//! [`WorkerPool`]. The worker that takes a connection runs its whole session:
//! read a line, dispatch it, write one reply, repeat. Pool size therefore
//! bounds concurrent connections, and requests within one connection are
//! strictly sequential. No data-structure lock is held across socket I/O.
//!
//! # Components
//!
//! - [`Server`]: accept loop and lifecycle
//! - [`ShutdownHandle`]: stops the accept loop and force-closes sessions
//! - [`Dispatcher`]: decode, execute, encode (no I/O)
//! - [`SessionRegistry`]: live sessions, for forced close and reporting
//! - [`WorkerPool`]: fixed set of worker threads
//! - [`Clock`]: wall-clock source for booking timestamps

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatch;
mod env;
mod error;
mod pool;
mod registry;
mod seed;
mod session;

use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream},
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use boxoffice_core::{BookingService, Inventory, InventoryStore};
pub use dispatch::Dispatcher;
pub use env::{Clock, FixedClock, SystemClock};
pub use error::ServerError;
pub use pool::WorkerPool;
pub use registry::SessionRegistry;
pub use seed::seed_demo_catalog;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 12345;

/// Server configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (e.g., "0.0.0.0:12345")
    pub bind_address: String,
    /// Worker threads, i.e. maximum concurrent connections being served
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: format!("0.0.0.0:{DEFAULT_PORT}"),
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}

/// State shared by the accept loop, the workers and the shutdown handle.
#[derive(Debug)]
struct Shared<S, C> {
    dispatcher: Dispatcher<S, C>,
    registry: SessionRegistry,
    stopping: AtomicBool,
}

/// Production boxoffice server.
#[derive(Debug)]
pub struct Server<S = InventoryStore, C = SystemClock> {
    listener: TcpListener,
    local_addr: SocketAddr,
    pool: WorkerPool,
    shared: Arc<Shared<S, C>>,
}

impl<S: Inventory> Server<S, SystemClock> {
    /// Bind the listener and start the worker pool.
    pub fn bind(config: ServerConfig, booking: BookingService<S>) -> Result<Self, ServerError> {
        Self::bind_with_clock(config, booking, SystemClock)
    }
}

impl<S: Inventory, C: Clock> Server<S, C> {
    /// Bind with an explicit clock for booking timestamps.
    pub fn bind_with_clock(
        config: ServerConfig,
        booking: BookingService<S>,
        clock: C,
    ) -> Result<Self, ServerError> {
        if config.workers == 0 {
            return Err(ServerError::Config("workers must be at least 1".to_string()));
        }

        let listener = TcpListener::bind(&config.bind_address).map_err(|e| {
            ServerError::Config(format!("cannot bind {}: {e}", config.bind_address))
        })?;
        let local_addr = listener.local_addr()?;
        let pool = WorkerPool::new(config.workers)?;

        let shared = Arc::new(Shared {
            dispatcher: Dispatcher::new(booking, clock),
            registry: SessionRegistry::new(),
            stopping: AtomicBool::new(false),
        });

        Ok(Self { listener, local_addr, pool, shared })
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle that can stop this server from another thread.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            wake_addr: wake_address(self.local_addr),
            shared: Arc::clone(&self.shared) as Arc<dyn Stoppable>,
        }
    }

    /// Run the accept loop until [`ShutdownHandle::shutdown`] is called.
    ///
    /// Returns after every session has ended and every worker has joined.
    pub fn run(self) -> Result<(), ServerError> {
        let Self { listener, local_addr, mut pool, shared } = self;
        tracing::info!(addr = %local_addr, workers = pool.size(), "server listening");

        for incoming in listener.incoming() {
            if shared.stopping.load(Ordering::Acquire) {
                break;
            }

            match incoming {
                Ok(stream) => {
                    let job_shared = Arc::clone(&shared);
                    if let Err(err) = pool.submit(move || serve_connection(stream, &job_shared)) {
                        tracing::warn!(error = %err, "dropping connection");
                    }
                },
                Err(err) => {
                    tracing::error!(error = %err, "accept failed");
                },
            }
        }

        drop(listener);
        let closed = shared.registry.close_all();
        pool.shutdown();

        tracing::info!(addr = %local_addr, closed_sessions = closed, "server stopped");
        Ok(())
    }
}

/// Type-erased view of [`Shared`] so the handle carries no type parameters.
trait Stoppable: Send + Sync {
    fn begin_stop(&self) -> bool;
    fn close_sessions(&self) -> usize;
    fn active_sessions(&self) -> usize;
    fn sessions(&self) -> Vec<(u64, SocketAddr)>;
}

impl<S: Inventory, C: Clock> Stoppable for Shared<S, C> {
    fn begin_stop(&self) -> bool {
        !self.stopping.swap(true, Ordering::AcqRel)
    }

    fn close_sessions(&self) -> usize {
        self.registry.close_all()
    }

    fn active_sessions(&self) -> usize {
        self.registry.active_sessions()
    }

    fn sessions(&self) -> Vec<(u64, SocketAddr)> {
        self.registry.sessions_snapshot()
    }
}

/// Cloneable handle that stops a running [`Server`].
#[derive(Clone)]
pub struct ShutdownHandle {
    wake_addr: SocketAddr,
    shared: Arc<dyn Stoppable>,
}

impl std::fmt::Debug for ShutdownHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownHandle").field("wake_addr", &self.wake_addr).finish_non_exhaustive()
    }
}

impl ShutdownHandle {
    /// Stop accepting connections and force-close live sessions.
    ///
    /// [`Server::run`] returns once its workers have joined. Calling this
    /// more than once is a no-op.
    pub fn shutdown(&self) {
        if !self.shared.begin_stop() {
            return;
        }
        tracing::info!("shutdown requested");

        // accept() only observes the flag once it returns; a throwaway
        // connection makes it return.
        if let Err(err) = TcpStream::connect(self.wake_addr) {
            tracing::warn!(error = %err, addr = %self.wake_addr, "failed to wake accept loop");
        }

        for (session_id, peer_addr) in self.shared.sessions() {
            tracing::debug!(session_id, %peer_addr, "force-closing session");
        }
        let closed = self.shared.close_sessions();
        tracing::debug!(closed, "sessions force-closed");
    }

    /// Number of sessions currently being served.
    pub fn active_sessions(&self) -> usize {
        self.shared.active_sessions()
    }

    /// Live sessions as `(session_id, peer_addr)`, ordered by id.
    pub fn sessions(&self) -> Vec<(u64, SocketAddr)> {
        self.shared.sessions()
    }
}

/// Address to connect to in order to wake our own accept loop.
fn wake_address(local_addr: SocketAddr) -> SocketAddr {
    let ip = match local_addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, local_addr.port())
}

/// Run one connection's session on the current worker.
fn serve_connection<S: Inventory, C: Clock>(stream: TcpStream, shared: &Shared<S, C>) {
    let peer_addr = match stream.peer_addr() {
        Ok(addr) => addr,
        Err(err) => {
            tracing::warn!(error = %err, "connection lost before session start");
            return;
        },
    };
    let registry_handle = match stream.try_clone() {
        Ok(handle) => handle,
        Err(err) => {
            tracing::warn!(%peer_addr, error = %err, "cannot track connection");
            return;
        },
    };

    let session_id = shared.registry.register(peer_addr, registry_handle);

    // Registered after the flag was set means close_all may already have run
    if shared.stopping.load(Ordering::Acquire) {
        shared.registry.unregister(session_id);
        return;
    }

    tracing::info!(session_id, %peer_addr, "session opened");
    match session::run(session_id, stream, &shared.dispatcher) {
        Ok(served) => tracing::info!(session_id, %peer_addr, served, "session closed"),
        Err(err) => {
            tracing::warn!(session_id, %peer_addr, error = %err, "session ended with error");
        },
    }

    shared.registry.unregister(session_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "0.0.0.0:12345");
        assert!(config.workers >= 1);
    }

    #[test]
    fn zero_workers_is_config_error() {
        let config = ServerConfig { bind_address: "127.0.0.1:0".to_string(), workers: 0 };
        let err = Server::bind(config, BookingService::new(InventoryStore::new())).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn unparseable_bind_address_is_config_error() {
        let config = ServerConfig { bind_address: "not an address".to_string(), workers: 1 };
        let err = Server::bind(config, BookingService::new(InventoryStore::new())).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn wake_address_maps_unspecified_to_loopback() {
        let addr: SocketAddr = "0.0.0.0:4000".parse().unwrap();
        assert_eq!(wake_address(addr), "127.0.0.1:4000".parse::<SocketAddr>().unwrap());
        let addr: SocketAddr = "[::]:4000".parse().unwrap();
        assert_eq!(wake_address(addr), "[::1]:4000".parse::<SocketAddr>().unwrap());
        let addr: SocketAddr = "10.0.0.5:4000".parse().unwrap();
        assert_eq!(wake_address(addr), addr);
    }
}
