//! TaskQueue behavior seen from outside the crate.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use quarry::{QueueHandle, TaskQueue};

#[test]
fn ten_tasks_on_four_workers() {
    let queue = TaskQueue::new(4).expect("queue");
    let counter = Arc::new(AtomicUsize::new(0));

    for _ in 0..10 {
        let counter = Arc::clone(&counter);
        queue.submit(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    }
    queue.await_idle();

    assert_eq!(counter.load(Ordering::SeqCst), 10);
    assert_eq!(queue.pending(), 0);
}

#[test]
fn every_task_runs_exactly_once() {
    let queue = TaskQueue::new(8).expect("queue");
    let seen = Arc::new(Mutex::new(Vec::new()));

    for id in 0..500 {
        let seen = Arc::clone(&seen);
        queue.submit(move || seen.lock().push(id));
    }
    queue.await_idle();

    let seen = seen.lock();
    assert_eq!(seen.len(), 500);
    let unique: HashSet<_> = seen.iter().copied().collect();
    assert_eq!(unique.len(), 500);
}

#[test]
fn barrier_is_reusable() {
    let queue = TaskQueue::new(2).expect("queue");
    let counter = Arc::new(AtomicUsize::new(0));

    for round in 1..=3 {
        for _ in 0..5 {
            let counter = Arc::clone(&counter);
            queue.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        queue.await_idle();
        assert_eq!(counter.load(Ordering::SeqCst), round * 5);
    }
}

#[test]
fn await_idle_on_empty_queue_returns() {
    let queue = TaskQueue::new(1).expect("queue");
    queue.await_idle();
    assert_eq!(queue.size(), 1);
}

#[test]
fn panics_do_not_hang_the_barrier() {
    let queue = TaskQueue::new(2).expect("queue");
    let counter = Arc::new(AtomicUsize::new(0));

    for i in 0..20 {
        let counter = Arc::clone(&counter);
        queue.submit(move || {
            if i % 4 == 0 {
                panic!("task {i} failed");
            }
            counter.fetch_add(1, Ordering::SeqCst);
        });
    }
    queue.await_idle();

    assert_eq!(counter.load(Ordering::SeqCst), 15);
    assert_eq!(queue.size(), 2);
}

fn fan_out(handle: QueueHandle, depth: u32, counter: Arc<AtomicUsize>) {
    counter.fetch_add(1, Ordering::SeqCst);
    if depth == 0 {
        return;
    }
    for _ in 0..2 {
        let next = handle.clone();
        let counter = Arc::clone(&counter);
        handle.submit(move || fan_out(next, depth - 1, counter));
    }
}

#[test]
fn tasks_submitted_by_tasks_are_awaited() {
    let queue = TaskQueue::new(3).expect("queue");
    let counter = Arc::new(AtomicUsize::new(0));

    let handle = queue.handle();
    let root = Arc::clone(&counter);
    queue.submit(move || fan_out(handle, 4, root));
    queue.await_idle();

    // 1 + 2 + 4 + 8 + 16
    assert_eq!(counter.load(Ordering::SeqCst), 31);
}

#[test]
fn shutdown_drops_queued_work() {
    let queue = TaskQueue::new(1).expect("queue");
    let started = Arc::new(AtomicUsize::new(0));
    let ran = Arc::new(AtomicUsize::new(0));

    {
        let started = Arc::clone(&started);
        queue.submit(move || {
            started.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(100));
        });
    }
    while started.load(Ordering::SeqCst) == 0 {
        thread::yield_now();
    }
    for _ in 0..5 {
        let ran = Arc::clone(&ran);
        queue.submit(move || {
            ran.fetch_add(1, Ordering::SeqCst);
        });
    }

    queue.shutdown();
    queue.await_idle();

    assert!(queue.is_shutdown());
    assert_eq!(queue.pending(), 0);
    assert_eq!(ran.load(Ordering::SeqCst), 0);

    queue.submit(|| panic!("never runs"));
    assert_eq!(queue.pending(), 0);
}

#[test]
fn drop_joins_workers() {
    let counter = Arc::new(AtomicUsize::new(0));
    {
        let queue = TaskQueue::new(2).expect("queue");
        let counter = Arc::clone(&counter);
        queue.submit(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        queue.await_idle();
    }
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
