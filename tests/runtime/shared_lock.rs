//! SharedLock exclusion, checked through its holder counters.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use quarry::SharedLock;

#[test]
fn readers_hold_the_lock_together() {
    let lock = Arc::new(SharedLock::new(7));
    let barrier = Arc::new(Barrier::new(4));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let barrier = Arc::clone(&barrier);
            let peak = Arc::clone(&peak);
            thread::spawn(move || {
                let guard = lock.read();
                // All four reach this point while holding their guard.
                barrier.wait();
                peak.fetch_max(lock.holders().readers, Ordering::SeqCst);
                let value = *guard;
                barrier.wait();
                value
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("reader panicked"), 7);
    }
    assert_eq!(peak.load(Ordering::SeqCst), 4);
    assert_eq!(lock.holders().readers, 0);
}

#[test]
fn writers_are_exclusive() {
    let lock = Arc::new(SharedLock::new(0u64));
    let violated = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let violated = Arc::clone(&violated);
            thread::spawn(move || {
                for _ in 0..500 {
                    let mut guard = lock.write();
                    let holders = lock.holders();
                    if holders.writers != 1 || holders.readers != 0 {
                        violated.store(true, Ordering::SeqCst);
                    }
                    *guard += 1;
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let violated = Arc::clone(&violated);
            thread::spawn(move || {
                for _ in 0..500 {
                    let _guard = lock.read();
                    if lock.holders().writers != 0 {
                        violated.store(true, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().expect("thread panicked");
    }

    assert!(!violated.load(Ordering::SeqCst));
    assert_eq!(*lock.read(), 2000);
}

#[test]
fn panic_while_writing_releases_the_lock() {
    let lock = Arc::new(SharedLock::new(Vec::<u32>::new()));

    let result = {
        let lock = Arc::clone(&lock);
        thread::spawn(move || {
            let mut guard = lock.write();
            guard.push(1);
            panic!("writer failed");
        })
        .join()
    };
    assert!(result.is_err());

    assert_eq!(lock.holders().writers, 0);
    lock.write().push(2);
    assert_eq!(*lock.read(), vec![1, 2]);
}

#[test]
fn writer_waits_for_reader() {
    let lock = Arc::new(SharedLock::new(0));
    let reader = lock.read();

    let writer = {
        let lock = Arc::clone(&lock);
        thread::spawn(move || {
            *lock.write() = 1;
        })
    };

    thread::sleep(Duration::from_millis(50));
    assert_eq!(*reader, 0);
    assert_eq!(lock.holders().writers, 0);
    drop(reader);

    writer.join().expect("writer panicked");
    assert_eq!(*lock.read(), 1);
}
