//! Cooperative timers for group animations.
//!
//! Animations never sleep or spawn threads of their own. They ask a
//! [`Scheduler`] for a repeating task that runs on the host's event loop,
//! the same logical thread as every other mutation, and re-arm it each tick
//! until they settle.
//!
//! Two schedulers ship with the crate:
//! - [`TokioScheduler`] spawns onto the current tokio runtime (intended to be
//!   a current-thread runtime driving the UI).
//! - [`ManualScheduler`] runs due tasks only when the host calls
//!   [`ManualScheduler::advance`], which suits hosts with their own frame
//!   loop and deterministic tests.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What a repeating task wants after running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskControl {
    /// Run again after another interval.
    Continue,
    /// Stop; the task is dropped.
    Stop,
}

/// Shortest interval a task can be scheduled at; shorter ones are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A task run once per interval.
pub type RepeatingTask = Box<dyn FnMut() -> TaskControl + Send>;

/// Handle to a scheduled task.
///
/// Cancelling is synchronous and idempotent: once `cancel` returns the task
/// will not run again, and cancelling twice is a no-op.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Source of time and periodic callbacks.
pub trait Scheduler: Send + Sync {
    /// Current time as seen by scheduled tasks.
    fn now(&self) -> Instant;

    /// Run `task` every `interval`, starting one interval from now, until it
    /// returns [`TaskControl::Stop`] or the handle is cancelled. Intervals
    /// below [`MIN_INTERVAL`] are clamped to it.
    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TimerHandle;
}

// =============================================================================
// Tokio
// =============================================================================

/// Scheduler backed by `tokio::time::interval`.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    /// Use the runtime the caller is running in.
    ///
    /// Returns `None` outside a tokio runtime.
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current()
            .ok()
            .map(|handle| Self { handle })
    }

    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Instant {
        // tokio's clock so paused test time is honored
        tokio::time::Instant::now().into_std()
    }

    fn schedule_repeating(&self, interval: Duration, mut task: RepeatingTask) -> TimerHandle {
        let interval = interval.max(MIN_INTERVAL);
        let timer = TimerHandle::new();
        let cancelled = timer.clone();
        self.handle.spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if cancelled.is_cancelled() {
                    break;
                }
                if task() == TaskControl::Stop {
                    break;
                }
            }
        });
        timer
    }
}

// =============================================================================
// Manual
// =============================================================================

struct ScheduledTask {
    timer: TimerHandle,
    interval: Duration,
    due: Duration,
    task: RepeatingTask,
}

/// Scheduler driven explicitly by the host.
///
/// Time starts at the moment of construction and only moves in
/// [`advance`](ManualScheduler::advance). Tasks run on the caller's thread,
/// with no lock held, so they may schedule or cancel other tasks.
pub struct ManualScheduler {
    origin: Instant,
    elapsed: Mutex<Duration>,
    tasks: Mutex<Vec<ScheduledTask>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Time since construction.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }

    /// Number of live (not cancelled, not stopped) tasks.
    pub fn pending(&self) -> usize {
        self.tasks
            .lock()
            .iter()
            .filter(|t| !t.timer.is_cancelled())
            .count()
    }

    /// Move time forward by `by`, running every task that falls due, in due
    /// order. Returns how many task runs happened.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.elapsed() + by;
        let mut runs = 0;

        while let Some(mut next) = self.take_next_due(target) {
            *self.elapsed.lock() = next.due;
            runs += 1;
            let control = (next.task)();
            if control == TaskControl::Continue && !next.timer.is_cancelled() {
                next.due += next.interval;
                self.tasks.lock().push(next);
            }
        }

        *self.elapsed.lock() = target;
        runs
    }

    fn take_next_due(&self, target: Duration) -> Option<ScheduledTask> {
        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.timer.is_cancelled());
        let index = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| t.due)
            .map(|(i, _)| i)?;
        Some(tasks.remove(index))
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("elapsed", &self.elapsed())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TimerHandle {
        let interval = interval.max(MIN_INTERVAL);
        let timer = TimerHandle::new();
        let due = self.elapsed() + interval;
        self.tasks.lock().push(ScheduledTask {
            timer: timer.clone(),
            interval,
            due,
            task,
        });
        timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_task(counter: Arc<Mutex<u32>>, stop_after: u32) -> RepeatingTask {
        Box::new(move || {
            let mut count = counter.lock();
            *count += 1;
            if *count >= stop_after {
                TaskControl::Stop
            } else {
                TaskControl::Continue
            }
        })
    }

    #[test]
    fn test_manual_runs_due_ticks() {
        let scheduler = ManualScheduler::new();
        let count = Arc::new(Mutex::new(0));
        scheduler.schedule_repeating(
            Duration::from_millis(10),
            counting_task(count.clone(), u32::MAX),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(9)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(35)), 3);
        assert_eq!(*count.lock(), 4);
        assert_eq!(scheduler.elapsed(), Duration::from_millis(45));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let scheduler = ManualScheduler::new();
        let count = Arc::new(Mutex::new(0));
        scheduler.schedule_repeating(Duration::ZERO, counting_task(count.clone(), u32::MAX));

        assert_eq!(scheduler.advance(Duration::from_millis(5)), 5);
        assert_eq!(*count.lock(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_zero_interval_is_clamped() {
        let scheduler = TokioScheduler::current().unwrap();
        let count = Arc::new(Mutex::new(0));
        scheduler.schedule_repeating(Duration::ZERO, counting_task(count.clone(), 3));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(*count.lock(), 3);
    }

    #[test]
    fn test_manual_stop_drops_task() {
        let scheduler = ManualScheduler::new();
        let count = Arc::new(Mutex::new(0));
        scheduler.schedule_repeating(Duration::from_millis(10), counting_task(count.clone(), 2));

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*count.lock(), 2);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let scheduler = ManualScheduler::new();
        let count = Arc::new(Mutex::new(0));
        let timer = scheduler.schedule_repeating(
            Duration::from_millis(10),
            counting_task(count.clone(), u32::MAX),
        );

        scheduler.advance(Duration::from_millis(10));
        timer.cancel();
        timer.cancel();
        assert!(timer.is_cancelled());

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(*count.lock(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_now_follows_task_due_time() {
        let scheduler = Arc::new(ManualScheduler::new());
        let start = scheduler.now();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let clock = scheduler.clone();
        let sink = seen.clone();
        scheduler.schedule_repeating(
            Duration::from_millis(10),
            Box::new(move || {
                sink.lock().push(clock.now() - start);
                TaskControl::Continue
            }),
        );

        scheduler.advance(Duration::from_millis(25));
        assert_eq!(
            *seen.lock(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
        assert_eq!(scheduler.now() - start, Duration::from_millis(25));
    }

    #[test]
    fn test_task_may_schedule_another() {
        let scheduler = Arc::new(ManualScheduler::new());
        let count = Arc::new(Mutex::new(0));

        let inner = scheduler.clone();
        let counter = count.clone();
        scheduler.schedule_repeating(
            Duration::from_millis(5),
            Box::new(move || {
                inner.schedule_repeating(Duration::from_millis(5), counting_task(counter.clone(), 1));
                TaskControl::Stop
            }),
        );

        scheduler.advance(Duration::from_millis(10));
        assert_eq!(*count.lock(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_ticks_until_stop() {
        let scheduler = TokioScheduler::current().unwrap();
        let count = Arc::new(Mutex::new(0));
        scheduler.schedule_repeating(Duration::from_millis(10), counting_task(count.clone(), 3));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*count.lock(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_cancel() {
        let scheduler = TokioScheduler::current().unwrap();
        let count = Arc::new(Mutex::new(0));
        let timer = scheduler.schedule_repeating(
            Duration::from_millis(10),
            counting_task(count.clone(), u32::MAX),
        );

        tokio::time::sleep(Duration::from_millis(25)).await;
        timer.cancel();
        let seen = *count.lock();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*count.lock(), seen);
        assert_eq!(seen, 2);
    }
}
