//! Repeating playback tick.
//!
//! The tick is a scoped resource: it runs only while the clock has a
//! non-zero direction and must be torn down when the direction returns to
//! zero or its owner is dropped. [`TickSource`] is the seam between the
//! editor and whatever drives the ticks.

use std::time::Duration;

use crossbeam::channel::Sender;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::time::frame_duration;

/// Tick period for a frame rate (`1000 / fps` ms)
pub fn tick_period(fps: u32) -> Duration {
    Duration::from_secs_f64(frame_duration(fps))
}

/// Something that can deliver periodic ticks to the host
pub trait TickSource {
    /// Start ticking every `period`. Restarts if already running.
    fn start(&mut self, period: Duration);
    /// Stop ticking. Safe to call when not running.
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// Tick source driven by the host itself.
///
/// It only records lifecycle calls; the host calls `TimelineEditor::tick`
/// from its own frame loop while [`ManualTicker::is_running`] is true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTicker {
    running: bool,
    period: Option<Duration>,
    starts: usize,
    stops: usize,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Number of times the ticker was started
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// Number of times a running ticker was stopped
    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl TickSource for ManualTicker {
    fn start(&mut self, period: Duration) {
        self.running = true;
        self.period = Some(period);
        self.starts += 1;
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// One tick delivered by [`TokioTicker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    /// 1-based tick count since the ticker was last started
    pub sequence: u64,
}

/// Interval task on a tokio runtime posting [`ClockTick`]s into a crossbeam channel.
///
/// The task is aborted on `stop` and on drop, so a ticker can never outlive
/// its owner.
pub struct TokioTicker {
    runtime: Handle,
    tx: Sender<ClockTick>,
    task: Option<JoinHandle<()>>,
}

impl TokioTicker {
    pub fn new(runtime: Handle, tx: Sender<ClockTick>) -> Self {
        Self {
            runtime,
            tx,
            task: None,
        }
    }
}

impl TickSource for TokioTicker {
    fn start(&mut self, period: Duration) {
        self.stop();

        let period = period.max(Duration::from_millis(1));
        let tx = self.tx.clone();
        log::debug!("starting playback ticker every {:?}", period);

        self.task = Some(self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the first frame step
            // should land one period after play.
            interval.tick().await;

            let mut sequence = 0u64;
            loop {
                interval.tick().await;
                sequence += 1;
                if tx.send(ClockTick { sequence }).is_err() {
                    // Receiver gone, nobody to tick for
                    break;
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            log::debug!("stopping playback ticker");
            task.abort();
        }
    }

    fn is_running(&self) -> bool {
        self.task.as_ref().map_or(false, |task| !task.is_finished())
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
    }

    #[test]
    fn test_tick_period() {
        assert_eq!(tick_period(25), Duration::from_millis(40));
    }

    #[test]
    fn test_manual_ticker_lifecycle() {
        let mut ticker = ManualTicker::new();
        assert!(!ticker.is_running());
        ticker.stop();
        assert_eq!(ticker.stops(), 0);

        ticker.start(tick_period(24));
        assert!(ticker.is_running());
        assert_eq!(ticker.period(), Some(tick_period(24)));
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(ticker.starts(), 1);
        assert_eq!(ticker.stops(), 1);
    }

    #[test]
    fn test_tokio_ticker_delivers_and_stops() {
        let rt = runtime();
        let (tx, rx) = channel::unbounded();
        let mut ticker = TokioTicker::new(rt.handle().clone(), tx);

        ticker.start(Duration::from_millis(5));
        rt.block_on(async { tokio::time::sleep(Duration::from_millis(60)).await });
        let ticks: Vec<ClockTick> = rx.try_iter().collect();
        assert!(!ticks.is_empty());
        assert_eq!(ticks[0].sequence, 1);

        ticker.stop();
        assert!(!ticker.is_running());
        rt.block_on(async { tokio::time::sleep(Duration::from_millis(5)).await });
        rx.try_iter().for_each(drop);
        rt.block_on(async { tokio::time::sleep(Duration::from_millis(30)).await });
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_tokio_ticker_aborted_on_drop() {
        let rt = runtime();
        let (tx, rx) = channel::unbounded();
        {
            let mut ticker = TokioTicker::new(rt.handle().clone(), tx);
            ticker.start(Duration::from_millis(5));
            rt.block_on(async { tokio::time::sleep(Duration::from_millis(20)).await });
        }
        rt.block_on(async { tokio::time::sleep(Duration::from_millis(5)).await });
        rx.try_iter().for_each(drop);
        rt.block_on(async { tokio::time::sleep(Duration::from_millis(30)).await });
        assert_eq!(rx.try_iter().count(), 0);
        // Every sender is gone once the aborted task is dropped
        assert!(rx.recv_timeout(Duration::from_millis(10)).is_err());
    }
}
