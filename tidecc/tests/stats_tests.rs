//! Counter correctness under concurrent callback streams.
//!
//! Many connections drive their strategies at once; the shared totals must
//! come out exact under any interleaving.

use std::sync::Arc;
use std::thread;

use tidecc::{CongestionStrategy, CubicConfig, CustomCubic, StackStats, Window};

const THREADS: usize = 8;
const CONNECTIONS_PER_THREAD: usize = 5_000;

#[test]
fn connection_counter_has_no_lost_updates() {
    let stats = Arc::new(StackStats::new());

    // Each thread opens connections and releases every second one, from its
    // own strategy instances, all hammering the shared counters.
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let stats = Arc::clone(&stats);
            thread::spawn(move || {
                for i in 0..CONNECTIONS_PER_THREAD {
                    let mut cc = CustomCubic::new(CubicConfig::default(), Arc::clone(&stats));
                    cc.on_init(&Window::default());
                    if i % 2 == 0 {
                        cc.on_release();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let opened = (THREADS * CONNECTIONS_PER_THREAD) as i64;
    let released = (THREADS * CONNECTIONS_PER_THREAD / 2) as i64;
    assert_eq!(stats.connections(), opened - released);
}

#[test]
fn fork_counts_survive_contention() {
    let stats = Arc::new(StackStats::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let stats = Arc::clone(&stats);
            thread::spawn(move || {
                let mut cc = CustomCubic::new(CubicConfig::default(), Arc::clone(&stats));
                cc.on_init(&Window::default());
                for _ in 0..CONNECTIONS_PER_THREAD {
                    let mut child = cc.on_fork();
                    child.on_release();
                }
                cc.on_release();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Every open and fork was matched by a release.
    assert_eq!(stats.connections(), 0);
}

#[test]
fn packet_total_is_exact_under_concurrent_acks() {
    let stats = Arc::new(StackStats::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let stats = Arc::clone(&stats);
            thread::spawn(move || {
                let mut cc = CustomCubic::new(CubicConfig::default(), Arc::clone(&stats));
                let mut win = Window::default();
                cc.on_init(&win);

                let mut sent = 0u64;
                for i in 0..CONNECTIONS_PER_THREAD {
                    // Vary the acked amount per call, including zero.
                    let acked = ((t + i) % 7) as u32;
                    cc.on_ack(&mut win, acked, i as u32);
                    sent += u64::from(acked);
                }
                cc.on_release();
                sent
            })
        })
        .collect();

    let expected: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(stats.packets(), expected);
}
