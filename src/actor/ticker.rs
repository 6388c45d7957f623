//! Periodic frame signal on its own thread.
//!
//! Dashboards redraw on a timer as well as on input. The ticker keeps that
//! timer off the main thread so the loop can `select!` over both.

use super::worker::{stopping, Worker};
use crate::error::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Longest single sleep, so a stop request is noticed promptly.
const NAP: Duration = Duration::from_millis(1);

/// One timer firing.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Zero-based count of ticks sent so far.
    pub frame: u64,
    /// Time since the ticker started.
    pub elapsed: Duration,
}

/// Sends a [`Tick`] every interval until stopped or dropped.
pub struct Ticker {
    worker: Worker,
    ticks: Receiver<Tick>,
}

impl Ticker {
    /// Start a ticker firing every `interval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn the thread.
    pub fn spawn(interval: Duration) -> Result<Self> {
        // Two slots: a slow receiver skips ticks rather than queueing them.
        let (tx, ticks) = bounded(2);
        let worker = Worker::spawn("trellis-ticker", move |flag| {
            let mut schedule = Schedule::new(Instant::now(), interval);
            while !stopping(flag) {
                match schedule.poll(Instant::now()) {
                    Ok(tick) => send(&tx, tick),
                    Err(wait) => thread::sleep(wait.min(NAP)),
                }
            }
        })?;
        Ok(Self { worker, ticks })
    }

    /// Channel side for `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.ticks
    }

    /// Ask the thread to stop without waiting for it.
    pub fn shutdown(&self) {
        self.worker.request_stop();
    }

    /// Stop the thread and wait for it to exit.
    pub fn join(mut self) {
        self.worker.stop_and_wait();
    }
}

fn send(tx: &Sender<Tick>, tick: Tick) {
    // Full means the receiver is behind; that tick is simply lost.
    let _ = tx.try_send(tick);
}

/// Deadline bookkeeping, separate from the thread for testing.
struct Schedule {
    start: Instant,
    interval: Duration,
    due: Instant,
    frame: u64,
}

impl Schedule {
    fn new(start: Instant, interval: Duration) -> Self {
        Self {
            start,
            interval,
            due: start + interval,
            frame: 0,
        }
    }

    /// The tick due at `now`, or how long until the next one.
    fn poll(&mut self, now: Instant) -> std::result::Result<Tick, Duration> {
        if now < self.due {
            return Err(self.due - now);
        }
        let tick = Tick {
            frame: self.frame,
            elapsed: now - self.start,
        };
        self.frame += 1;
        self.due += self.interval;
        // More than a whole interval late: restart from now rather than burst.
        if self.due < now {
            self.due = now + self.interval;
        }
        Ok(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_schedule_waits_then_fires() {
        let start = Instant::now();
        let mut schedule = Schedule::new(start, 10 * MS);

        assert_eq!(schedule.poll(start + 4 * MS).unwrap_err(), 6 * MS);

        let tick = schedule.poll(start + 10 * MS).unwrap();
        assert_eq!(tick.frame, 0);
        assert_eq!(tick.elapsed, 10 * MS);

        assert!(schedule.poll(start + 15 * MS).is_err());
        assert_eq!(schedule.poll(start + 20 * MS).unwrap().frame, 1);
    }

    #[test]
    fn test_schedule_resyncs_when_late() {
        let start = Instant::now();
        let mut schedule = Schedule::new(start, 10 * MS);

        // Three intervals late: one tick, then the next is a full interval away.
        assert_eq!(schedule.poll(start + 40 * MS).unwrap().frame, 0);
        assert_eq!(schedule.poll(start + 41 * MS).unwrap_err(), 9 * MS);
    }

    #[test]
    fn test_ticker_delivers() {
        let ticker = Ticker::spawn(10 * MS).unwrap();
        let first = ticker.receiver().recv_timeout(200 * MS).unwrap();
        assert_eq!(first.frame, 0);
        assert!(ticker.receiver().recv_timeout(200 * MS).is_ok());
        ticker.join();
    }

    #[test]
    fn test_shutdown_before_first_tick() {
        let ticker = Ticker::spawn(100 * MS).unwrap();
        ticker.shutdown();
        ticker.join();
    }
}
