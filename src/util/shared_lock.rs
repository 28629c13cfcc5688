// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Multi-reader/single-writer lock that owns the data it guards.
//!
//! Acquisition hands back a guard; dropping the guard is the release. That
//! pairs every acquire with a release on every exit path, including a panic
//! unwinding through a worker, so a failed build task can never leave the
//! index locked.
//!
//! # Starvation policy
//!
//! Backed by `parking_lot::RwLock`, which is task-fair: once a writer is
//! queued, new readers wait behind it, and waiting readers are admitted in a
//! batch when the writer leaves. Neither side can starve the other. Searches
//! only ever take one read guard per query, so the "reader blocked behind a
//! queued writer while already holding a read guard" deadlock cannot arise.
//!
//! # Instrumentation
//!
//! The lock counts its current holders. The counters are bumped after the
//! underlying lock is taken and dropped before it is released, so a snapshot
//! taken while holding a write guard always reads `(0 readers, 1 writer)`.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Current holder counts of a [`SharedLock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Holders {
    pub readers: usize,
    pub writers: usize,
}

#[derive(Debug, Default)]
pub struct SharedLock<T> {
    data: RwLock<T>,
    readers: AtomicUsize,
    writers: AtomicUsize,
}

impl<T> SharedLock<T> {
    pub fn new(value: T) -> Self {
        Self {
            data: RwLock::new(value),
            readers: AtomicUsize::new(0),
            writers: AtomicUsize::new(0),
        }
    }

    /// Acquire shared access. Blocks while a writer holds or waits for the lock.
    pub fn read(&self) -> SharedReadGuard<'_, T> {
        let guard = self.data.read();
        self.readers.fetch_add(1, Ordering::SeqCst);
        SharedReadGuard {
            guard,
            readers: &self.readers,
        }
    }

    /// Acquire exclusive access. Blocks while any reader or writer holds the lock.
    pub fn write(&self) -> SharedWriteGuard<'_, T> {
        let guard = self.data.write();
        self.writers.fetch_add(1, Ordering::SeqCst);
        SharedWriteGuard {
            guard,
            writers: &self.writers,
        }
    }

    /// Snapshot of how many readers and writers currently hold the lock.
    pub fn holders(&self) -> Holders {
        Holders {
            readers: self.readers.load(Ordering::SeqCst),
            writers: self.writers.load(Ordering::SeqCst),
        }
    }

    /// Consume the lock and return the guarded value.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }

    /// Mutable access without locking; the borrow checker proves exclusivity.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

/// Shared access to a [`SharedLock`]'s data. Dropping it releases the read hold.
pub struct SharedReadGuard<'a, T> {
    guard: RwLockReadGuard<'a, T>,
    readers: &'a AtomicUsize,
}

impl<T> Deref for SharedReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> Drop for SharedReadGuard<'_, T> {
    fn drop(&mut self) {
        // Runs before `guard` is dropped, i.e. while the read hold is still live.
        self.readers.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Exclusive access to a [`SharedLock`]'s data. Dropping it releases the write hold.
pub struct SharedWriteGuard<'a, T> {
    guard: RwLockWriteGuard<'a, T>,
    writers: &'a AtomicUsize,
}

impl<T> Deref for SharedWriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for SharedWriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T> Drop for SharedWriteGuard<'_, T> {
    fn drop(&mut self) {
        self.writers.fetch_sub(1, Ordering::SeqCst);
    }
}
