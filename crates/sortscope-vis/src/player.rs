//! Timed playback: a controller driven by a scheduler.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use sortscope_steps::AlgorithmId;
use tokio::sync::broadcast;
use tracing::trace;

use crate::events::{StepHistory, StepSnapshot};
use crate::playback::{
    ConfigChange, PlaybackController, PlaybackStatus, StartOutcome, Ticket,
};
use crate::scheduler::{Scheduler, TaskHandle, TickFlow};
use crate::session::ConfigUpdate;

struct Inner {
    controller: PlaybackController,
    task: Option<TaskHandle>,
}

impl Inner {
    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }
}

/// Handles the renderer's intents and keeps exactly one tick task alive
/// while playback is running.
pub struct Player<S: Scheduler> {
    inner: Arc<Mutex<Inner>>,
    scheduler: S,
}

impl<S: Scheduler> Player<S> {
    /// Wrap `controller`, scheduling ticks on `scheduler`.
    pub fn new(controller: PlaybackController, scheduler: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                controller,
                task: None,
            })),
            scheduler,
        }
    }

    /// Start or resume playback; ignored while running.
    pub fn start(&self) -> StartOutcome {
        let mut inner = self.lock();
        let outcome = inner.controller.start();
        if let Some(ticket) = outcome.ticket() {
            self.schedule(&mut inner, ticket);
        }
        outcome
    }

    /// Pause playback; returns whether it was running.
    pub fn pause(&self) -> bool {
        let mut inner = self.lock();
        inner.cancel_task();
        inner.controller.pause()
    }

    /// Stop playback and draw a fresh input.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.cancel_task();
        inner.controller.reset();
    }

    /// Choose the algorithm for the next run.
    pub fn set_algorithm(&self, algorithm: AlgorithmId) {
        self.lock().controller.set_algorithm(algorithm);
    }

    /// Apply a configuration change, retiming ticks if needed.
    pub fn set_config(&self, update: ConfigUpdate) -> ConfigChange {
        let mut inner = self.lock();
        let change = inner.controller.set_config(update);
        match change {
            ConfigChange::Retimed(ticket) => self.schedule(&mut inner, ticket),
            ConfigChange::Reset => inner.cancel_task(),
            ConfigChange::Stored | ConfigChange::Unchanged => {}
        }
        change
    }

    /// Receive a snapshot on every tick and state change.
    pub fn subscribe(&self) -> broadcast::Receiver<StepSnapshot> {
        self.lock().controller.subscribe()
    }

    /// Snapshot of what the renderer should currently show.
    pub fn snapshot(&self) -> StepSnapshot {
        self.lock().controller.snapshot()
    }

    /// Current playback status.
    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(&self.lock().controller)
    }

    /// Descriptions of every step in the current run.
    pub fn history(&self) -> StepHistory {
        self.lock().controller.history()
    }

    /// Read the controller under the lock.
    pub fn with_controller<R>(&self, f: impl FnOnce(&PlaybackController) -> R) -> R {
        f(&self.lock().controller)
    }

    fn schedule(&self, inner: &mut Inner, ticket: Ticket) {
        inner.cancel_task();
        let period = inner.controller.config().tick_interval();
        let shared: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);

        let task = self.scheduler.every(
            period,
            Box::new(move || {
                let Some(shared) = shared.upgrade() else {
                    return TickFlow::Stop;
                };
                let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
                match inner.controller.tick(ticket) {
                    Some(_) if inner.controller.ticket() == Some(ticket) => TickFlow::Continue,
                    Some(_) => {
                        inner.task = None;
                        TickFlow::Stop
                    }
                    None => {
                        trace!("tick task retired");
                        TickFlow::Stop
                    }
                }
            }),
        );
        trace!(period_ms = period.as_millis() as u64, "tick task scheduled");
        inner.task = Some(task);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Scheduler> Drop for Player<S> {
    fn drop(&mut self) {
        self.lock().cancel_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackState;
    use crate::scheduler::{ManualScheduler, TokioScheduler};
    use crate::session::{InputSource, SessionConfig};
    use std::time::Duration;

    fn controller(size: usize, speed: u32) -> PlaybackController {
        PlaybackController::with_inputs(SessionConfig::new(size, speed), InputSource::seeded(9))
    }

    #[test]
    fn manual_playback_runs_to_completion() {
        let scheduler = ManualScheduler::new();
        let player = Player::new(controller(5, 100), scheduler.clone());

        player.start();
        assert_eq!(scheduler.periods(), vec![Duration::from_millis(200)]);

        let total = player.with_controller(|c| c.steps().len());
        for _ in 0..total - 1 {
            assert_eq!(scheduler.fire(), 1);
        }
        assert_eq!(player.status().state, PlaybackState::Completed);
        assert_eq!(scheduler.live_tasks(), 0);
        assert_eq!(scheduler.fire(), 0);
    }

    #[test]
    fn second_start_does_not_add_a_task() {
        let scheduler = ManualScheduler::new();
        let player = Player::new(controller(5, 100), scheduler.clone());

        player.start();
        assert_eq!(player.start(), StartOutcome::Ignored);
        assert_eq!(scheduler.live_tasks(), 1);

        scheduler.fire();
        assert_eq!(player.status().step_index, 1);
    }

    #[test]
    fn pause_cancels_and_raced_tick_is_dropped() {
        let scheduler = ManualScheduler::new();
        let player = Player::new(controller(5, 100), scheduler.clone());
        let mut rx = player.subscribe();

        player.start();
        scheduler.fire();
        assert!(player.pause());
        assert_eq!(scheduler.live_tasks(), 0);

        // drain start, tick and pause snapshots
        let seen: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(seen.len(), 3);

        // the timer had already elapsed when pause landed
        scheduler.fire_including_cancelled();
        assert_eq!(player.status().step_index, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reset_invalidates_pending_ticks() {
        let scheduler = ManualScheduler::new();
        let player = Player::new(controller(5, 100), scheduler.clone());

        player.start();
        scheduler.fire();
        player.reset();
        player.start();

        // the old task races once; only the new run advances
        assert_eq!(scheduler.fire_including_cancelled(), 2);
        let status = player.status();
        assert_eq!(status.state, PlaybackState::Running);
        assert_eq!(status.step_index, 1);
    }

    #[test]
    fn speed_change_reschedules() {
        let scheduler = ManualScheduler::new();
        let player = Player::new(controller(5, 10), scheduler.clone());

        player.start();
        assert_eq!(scheduler.periods(), vec![Duration::from_millis(920)]);

        let change = player.set_config(ConfigUpdate {
            size: None,
            speed: Some(200),
        });
        assert!(matches!(change, ConfigChange::Retimed(_)));
        assert_eq!(scheduler.periods(), vec![Duration::from_millis(50)]);

        assert_eq!(scheduler.fire_including_cancelled(), 2);
        assert_eq!(player.status().step_index, 1);
    }

    #[test]
    fn resume_schedules_fresh_task() {
        let scheduler = ManualScheduler::new();
        let player = Player::new(controller(5, 100), scheduler.clone());

        player.start();
        scheduler.fire();
        player.pause();
        assert!(matches!(player.start(), StartOutcome::Resumed(_)));
        assert_eq!(scheduler.live_tasks(), 1);

        scheduler.fire();
        assert_eq!(player.status().step_index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_playback_publishes_every_step_in_order() {
        let player = Player::new(controller(5, 200), TokioScheduler);
        let mut rx = player.subscribe();
        player.start();

        let mut expected = 0;
        loop {
            let snapshot = rx.recv().await.unwrap();
            assert_eq!(snapshot.step_index, expected);
            expected += 1;
            if snapshot.state == PlaybackState::Completed {
                assert_eq!(expected, snapshot.total_steps);
                break;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_pause_freezes_cursor() {
        let player = Player::new(controller(10, 100), TokioScheduler);
        player.start();

        tokio::time::sleep(Duration::from_millis(650)).await;
        assert_eq!(player.status().step_index, 3);

        player.pause();
        tokio::time::sleep(Duration::from_secs(5)).await;
        let status = player.status();
        assert_eq!(status.step_index, 3);
        assert_eq!(status.state, PlaybackState::Paused);
    }
}
