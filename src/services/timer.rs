use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Pure countdown state: the remaining fraction is a function of elapsed
/// time, sampled by whoever renders a progress bar. No callbacks here.
#[derive(Clone, Copy, Debug)]
pub struct Countdown {
    started_at: Instant,
    duration: Duration,
}

impl Countdown {
    pub fn begin(duration: Duration) -> Self {
        Self {
            started_at: Instant::now(),
            duration,
        }
    }

    /// Decreases monotonically from 1.0 at start to 0.0 at expiry.
    pub fn fraction_remaining(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let elapsed = self.started_at.elapsed().as_secs_f64();
        (1.0 - elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.started_at.elapsed() >= self.duration
    }
}

/// A running single-shot timer.
///
/// `on_expire` fires exactly once after the duration, unless `stop` is
/// called first. Dropping the handle does not cancel the timer; whoever
/// restarts a countdown must stop the previous one.
pub struct TimerHandle {
    countdown: Countdown,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

/// Spawns a single-shot countdown that invokes `on_expire` when it runs out.
pub fn start<F>(duration: Duration, on_expire: F) -> TimerHandle
where
    F: FnOnce() + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancel_flag = Arc::clone(&cancelled);

    let task = tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        if !cancel_flag.load(Ordering::SeqCst) {
            on_expire();
        }
    });

    TimerHandle {
        countdown: Countdown::begin(duration),
        cancelled,
        task,
    }
}

impl TimerHandle {
    /// Cancels the pending expiry. Idempotent; a timer that already fired
    /// stays fired.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }

    pub fn fraction_remaining(&self) -> f64 {
        self.countdown.fraction_remaining()
    }

    pub fn is_expired(&self) -> bool {
        self.countdown.is_expired()
    }
}
