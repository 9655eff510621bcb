//! Thread-backed interval timer with tick coalescing
//!
//! The timer thread wakes every interval. It only enqueues a tick when the
//! [`TickGate`] is open; enqueuing closes the gate and the dispatch loop opens
//! it again when it dequeues the tick ([`TimerSource::acknowledge`]). However
//! slow the dispatch loop is, at most one tick is ever pending.

use crate::host::{TickStamp, TimerSource};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace};

/// Default playback interval
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(30);

/// One-slot flag shared by the timer thread and the dispatch loop
#[derive(Debug, Clone, Default)]
pub struct TickGate(Arc<AtomicBool>);

impl TickGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot. Returns `false` if a tick is already pending.
    pub fn try_arm(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    /// Free the slot after the pending tick was dequeued
    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_armed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Default)]
struct Shared {
    running: AtomicBool,
    epoch: AtomicU64,
    shutdown: AtomicBool,
    gate: TickGate,
}

/// [`TimerSource`] that fires on a background thread
#[derive(Debug)]
pub struct IntervalTimer {
    shared: Arc<Shared>,
    interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl IntervalTimer {
    /// Spawn the timer thread. It starts stopped.
    ///
    /// `fire` enqueues a tick on the dispatch queue; returning `false` (queue
    /// closed) ends the thread.
    pub fn spawn<F>(interval: Duration, fire: F) -> io::Result<Self>
    where
        F: Fn(TickStamp) -> bool + Send + 'static,
    {
        let shared = Arc::new(Shared::default());
        let worker = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("typeout-timer".to_string())
            .spawn(move || loop {
                thread::sleep(interval);
                if worker.shutdown.load(Ordering::Acquire) {
                    break;
                }
                if !worker.running.load(Ordering::Acquire) {
                    continue;
                }
                if !worker.gate.try_arm() {
                    trace!("tick already pending, coalescing");
                    continue;
                }
                let stamp = TickStamp(worker.epoch.load(Ordering::Acquire));
                if !fire(stamp) {
                    debug!("dispatch queue closed, timer thread exiting");
                    break;
                }
            })?;

        Ok(IntervalTimer {
            shared,
            interval,
            handle: Some(handle),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether a tick is currently enqueued and not yet acknowledged
    pub fn tick_pending(&self) -> bool {
        self.shared.gate.is_armed()
    }

    fn next_epoch(&self) -> u64 {
        self.shared.epoch.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl TimerSource for IntervalTimer {
    fn start(&mut self) {
        let epoch = self.next_epoch();
        self.shared.running.store(true, Ordering::Release);
        debug!(epoch, "timer started");
    }

    fn stop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        let epoch = self.next_epoch();
        debug!(epoch, "timer stopped");
    }

    fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    fn acknowledge(&mut self, stamp: TickStamp) -> bool {
        self.shared.gate.release();
        self.is_running() && stamp.0 == self.shared.epoch.load(Ordering::Acquire)
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_gate_allows_one_pending_tick() {
        let gate = TickGate::new();
        assert!(gate.try_arm());
        assert!(!gate.try_arm());
        assert!(!gate.try_arm());
        gate.release();
        assert!(gate.try_arm());
    }

    #[test]
    fn test_firings_coalesce_until_acknowledged() {
        let (tx, rx) = mpsc::channel();
        let mut timer =
            IntervalTimer::spawn(Duration::from_millis(1), move |stamp| tx.send(stamp).is_ok()).unwrap();
        timer.start();

        // Many intervals elapse without the dispatch loop running
        thread::sleep(Duration::from_millis(60));
        let pending: Vec<TickStamp> = rx.try_iter().collect();
        assert_eq!(pending.len(), 1);
        assert!(timer.tick_pending());

        assert!(timer.acknowledge(pending[0]));
        let next = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(next, pending[0]);
    }

    #[test]
    fn test_stale_stamp_rejected_after_stop() {
        let (tx, rx) = mpsc::channel();
        let mut timer =
            IntervalTimer::spawn(Duration::from_millis(1), move |stamp| tx.send(stamp).is_ok()).unwrap();
        timer.start();
        let stamp = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        timer.stop();
        assert!(!timer.acknowledge(stamp));

        timer.start();
        assert!(!timer.acknowledge(stamp));
        let fresh = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(timer.acknowledge(fresh));
    }
}
