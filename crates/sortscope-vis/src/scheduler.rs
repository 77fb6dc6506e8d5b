//! Cancellable periodic tasks.
//!
//! Playback ticks are driven through the [`Scheduler`] trait so that
//! cancellation is an explicit operation on a [`TaskHandle`] rather than a
//! dropped timer. [`TokioScheduler`] runs on `tokio::time::interval`;
//! [`ManualScheduler`] fires on demand for deterministic hosts and tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

/// Whether a periodic task wants another tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

/// Callback run on every period.
pub type TickFn = Box<dyn FnMut() -> TickFlow + Send + 'static>;

/// Runs a callback periodically until it stops or is cancelled.
pub trait Scheduler: Send + Sync {
    /// Run `tick` every `period`, first after one full period.
    fn every(&self, period: Duration, tick: TickFn) -> TaskHandle;
}

/// Handle to a scheduled task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
    abort: Option<AbortHandle>,
}

impl TaskHandle {
    fn new(abort: Option<AbortHandle>) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            abort,
        }
    }

    /// Stop the task. No tick starts after this returns.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Scheduler backed by the ambient Tokio runtime.
///
/// [`every`](Scheduler::every) spawns a task and must be called from within
/// a runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn every(&self, period: Duration, mut tick: TickFn) -> TaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                if flag.load(Ordering::Acquire) {
                    break;
                }
                if tick() == TickFlow::Stop {
                    break;
                }
            }
        });

        TaskHandle {
            cancelled,
            abort: Some(task.abort_handle()),
        }
    }
}

struct ManualTask {
    period: Duration,
    handle: TaskHandle,
    tick: TickFn,
    finished: bool,
}

/// Scheduler that only ticks when told to.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    tasks: Arc<Mutex<Vec<ManualTask>>>,
}

impl ManualScheduler {
    /// Create a scheduler with no tasks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every live task once. Returns how many ticks ran.
    pub fn fire(&self) -> usize {
        self.run(|task| !task.finished && !task.handle.is_cancelled())
    }

    /// Fire cancelled tasks as well, as if their timers had already elapsed
    /// when cancellation happened.
    pub fn fire_including_cancelled(&self) -> usize {
        self.run(|task| !task.finished)
    }

    /// Number of tasks that are neither finished nor cancelled.
    pub fn live_tasks(&self) -> usize {
        self.lock()
            .iter()
            .filter(|t| !t.finished && !t.handle.is_cancelled())
            .count()
    }

    /// Periods of the live tasks, oldest first.
    pub fn periods(&self) -> Vec<Duration> {
        self.lock()
            .iter()
            .filter(|t| !t.finished && !t.handle.is_cancelled())
            .map(|t| t.period)
            .collect()
    }

    fn run(&self, eligible: impl Fn(&ManualTask) -> bool) -> usize {
        // ticks may schedule new tasks, so run them without holding the lock
        let mut batch = std::mem::take(&mut *self.lock());
        let mut fired = 0;
        for task in batch.iter_mut().filter(|t| eligible(&**t)) {
            fired += 1;
            if (task.tick)() == TickFlow::Stop {
                task.finished = true;
            }
        }

        let mut tasks = self.lock();
        let added = std::mem::take(&mut *tasks);
        *tasks = batch;
        tasks.extend(added);
        fired
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ManualTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, period: Duration, tick: TickFn) -> TaskHandle {
        let handle = TaskHandle::new(None);
        self.lock().push(ManualTask {
            period,
            handle: handle.clone(),
            tick,
            finished: false,
        });
        handle
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("live_tasks", &self.live_tasks())
            .finish()
    }
}
