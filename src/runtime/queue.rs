// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size worker pool with a pending-work barrier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  submit  ┌───────────────────┐  pop   ┌──────────────┐
//! │ caller/task  │─────────▶│ VecDeque<Task>    │───────▶│ worker-0..N  │
//! └──────────────┘          │ pending, shutdown │        └──────┬───────┘
//!        ▲                  └───────────────────┘               │
//!        │ await_idle            ▲  pending -= 1                │
//!        └───────── idle ────────┴──────────────────────────────┘
//! ```
//!
//! # Worker states
//!
//! `IDLE` (waiting for work or shutdown) → `RUNNING` (exactly one task) →
//! `IDLE`, or `TERMINATED` once shutdown is observed between tasks. Queued
//! tasks that have not started when shutdown happens are dropped.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **PENDING_COVERS_QUEUED**: `pending` counts queued plus running tasks.
//! 2. **IDLE_NOTIFIED**: every decrement reaching zero wakes all `await_idle` callers.
//! 3. **PANIC_CONTAINED**: a panicking task is logged; its worker keeps running
//!    and `pending` is still decremented.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, error, info, warn};

/// Worker count used when none (or an invalid one) is configured.
pub const DEFAULT_WORKERS: usize = 5;

type Task = Box<dyn FnOnce() + Send + 'static>;

struct QueueState {
    tasks: VecDeque<Task>,
    pending: usize,
    shutdown: bool,
}

struct Shared {
    state: Mutex<QueueState>,
    work_ready: Condvar,
    idle: Condvar,
}

impl Shared {
    fn submit(&self, task: Task) {
        let mut state = self.state.lock();
        if state.shutdown {
            warn!("task submitted after shutdown; ignoring it");
            return;
        }
        state.tasks.push_back(task);
        state.pending += 1;
        drop(state);
        self.work_ready.notify_one();
    }

    fn await_idle(&self) {
        let mut state = self.state.lock();
        while state.pending > 0 {
            self.idle.wait(&mut state);
        }
    }

    /// Block until a task is available. `None` means the worker should exit.
    fn next_task(&self) -> Option<Task> {
        let mut state = self.state.lock();
        loop {
            if state.shutdown {
                return None;
            }
            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }
            self.work_ready.wait(&mut state);
        }
    }

    fn finish_task(&self) {
        let mut state = self.state.lock();
        state.pending = state.pending.saturating_sub(1);
        if state.pending == 0 {
            self.idle.notify_all();
        }
    }
}

/// Cloneable submission handle, for tasks that schedule more tasks.
#[derive(Clone)]
pub struct QueueHandle {
    shared: Arc<Shared>,
}

impl QueueHandle {
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.submit(Box::new(task));
    }

    pub fn await_idle(&self) {
        self.shared.await_idle();
    }
}

impl fmt::Debug for QueueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueHandle").finish_non_exhaustive()
    }
}

/// A pool of named worker threads draining one FIFO queue.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use quarry::TaskQueue;
///
/// let queue = TaskQueue::new(4).unwrap();
/// let counter = Arc::new(AtomicUsize::new(0));
/// for _ in 0..10 {
///     let counter = Arc::clone(&counter);
///     queue.submit(move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     });
/// }
/// queue.await_idle();
/// assert_eq!(counter.load(Ordering::SeqCst), 10);
/// ```
pub struct TaskQueue {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl TaskQueue {
    /// Spawn `workers` threads (at least one).
    ///
    /// # Errors
    ///
    /// Returns the OS error if a thread cannot be spawned. Threads spawned
    /// before the failure are shut down and joined.
    pub fn new(workers: usize) -> io::Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                pending: 0,
                shutdown: false,
            }),
            work_ready: Condvar::new(),
            idle: Condvar::new(),
        });

        let mut queue = Self {
            shared,
            workers: Vec::with_capacity(workers.max(1)),
        };
        for id in 0..workers.max(1) {
            let shared = Arc::clone(&queue.shared);
            let handle = thread::Builder::new()
                .name(format!("quarry-worker-{id}"))
                .spawn(move || worker_loop(id, &shared))?;
            queue.workers.push(handle);
        }

        info!(workers = queue.workers.len(), "task queue started");
        Ok(queue)
    }

    /// Queue `task` and wake one idle worker.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.submit(Box::new(task));
    }

    /// Block until every submitted task has finished (or been dropped by shutdown).
    pub fn await_idle(&self) {
        self.shared.await_idle();
    }

    /// Stop the workers. Running tasks finish; queued ones are dropped.
    pub fn shutdown(&self) {
        let mut state = self.shared.state.lock();
        if state.shutdown {
            return;
        }
        state.shutdown = true;
        let queued = std::mem::take(&mut state.tasks);
        state.pending -= queued.len();
        if state.pending == 0 {
            self.shared.idle.notify_all();
        }
        drop(state);
        self.shared.work_ready.notify_all();

        if !queued.is_empty() {
            warn!(dropped = queued.len(), "task queue shut down with queued tasks");
        }
        // Captured state is released outside the queue lock.
        drop(queued);
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Tasks queued or running right now.
    pub fn pending(&self) -> usize {
        self.shared.state.lock().pending
    }

    pub fn is_shutdown(&self) -> bool {
        self.shared.state.lock().shutdown
    }

    /// A cloneable handle that can submit from inside running tasks.
    pub fn handle(&self) -> QueueHandle {
        QueueHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("workers", &self.workers.len())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Drop for TaskQueue {
    fn drop(&mut self) {
        self.shutdown();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("worker thread exited abnormally");
            }
        }
        debug!("task queue stopped");
    }
}

fn worker_loop(id: usize, shared: &Shared) {
    debug!(worker = id, "worker started");
    while let Some(task) = shared.next_task() {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
            error!(worker = id, reason = panic_message(&*payload), "task panicked");
        }
        // The task (and anything it captured) is gone before the barrier can release.
        shared.finish_task();
    }
    debug!(worker = id, "worker stopped");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
