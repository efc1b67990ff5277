//! Fixed-size worker pool.
//!
//! Jobs are queued on a channel and picked up by whichever worker is free.
//! A job runs to completion on the worker that took it; for the server that
//! means one worker per live connection, so the pool size bounds concurrent
//! connections. Submission never blocks: when every worker is busy the job
//! waits in the queue.
//!
//! # Shutdown
//!
//! Closing the channel lets workers drain the queue and exit; `shutdown()`
//! then joins every thread. Dropping the pool does the same, so no worker
//! outlives its pool.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, PoisonError, mpsc},
    thread::{self, JoinHandle},
};

use crate::error::ServerError;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed set of worker threads fed from one job queue.
#[derive(Debug)]
pub struct WorkerPool {
    sender: Option<mpsc::Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers. A size of zero is rounded up to one.
    pub fn new(size: usize) -> Result<Self, ServerError> {
        let size = size.max(1);
        let (sender, receiver) = mpsc::channel::<Job>();
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(size);
        for index in 0..size {
            let receiver = Arc::clone(&receiver);
            let handle = thread::Builder::new()
                .name(format!("boxoffice-worker-{index}"))
                .spawn(move || worker_loop(index, &receiver))
                .map_err(|e| ServerError::Config(format!("failed to spawn worker {index}: {e}")))?;
            workers.push(handle);
        }

        Ok(Self { sender: Some(sender), workers })
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Queue a job. Fails only after shutdown.
    pub fn submit<F>(&self, job: F) -> Result<(), ServerError>
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = self.sender.as_ref().ok_or(ServerError::PoolClosed)?;
        sender.send(Box::new(job)).map_err(|_| ServerError::PoolClosed)
    }

    /// Stop accepting jobs, let queued jobs finish, and join every worker.
    ///
    /// Idempotent.
    pub fn shutdown(&mut self) {
        // Closing the channel ends each worker's recv loop once the queue drains
        drop(self.sender.take());

        for handle in self.workers.drain(..) {
            let name = handle.thread().name().map(str::to_owned);
            if handle.join().is_err() {
                tracing::error!(worker = ?name, "worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(index: usize, receiver: &Mutex<mpsc::Receiver<Job>>) {
    loop {
        // The guard is released before the job runs
        let job = receiver.lock().unwrap_or_else(PoisonError::into_inner).recv();
        let Ok(job) = job else {
            break;
        };

        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            tracing::error!(worker = index, "job panicked; worker continues");
        }
    }

    tracing::debug!(worker = index, "worker exiting");
}
