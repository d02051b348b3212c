//! Fixed-interval run scheduling
//!
//! The scheduler owns a current-thread runtime used for the interval timer and
//! Ctrl-C handling. Each run executes on a blocking task and is awaited before
//! the next tick is considered, so runs never overlap. Ticks that elapse while
//! a run is in progress are skipped, not queued.

use crate::types::SyncError;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tokio::time::MissedTickBehavior;
use tracing::info;

/// Triggers a job immediately and then every `interval`
pub struct Scheduler {
    runtime: Runtime,
    interval: Duration,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Result<Self, SyncError> {
        if interval.is_zero() {
            return Err(SyncError::Config(
                "Scheduling interval must be non-zero".to_string(),
            ));
        }

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SyncError::Io)?;

        Ok(Self { runtime, interval })
    }

    /// Run `job` until Ctrl-C or until a run fails
    ///
    /// Returns the number of completed runs. The first failing run stops the
    /// loop and its error is returned.
    pub fn run<F>(&self, job: F) -> Result<usize, SyncError>
    where
        F: Fn() -> Result<(), SyncError> + Send + Sync + 'static,
    {
        self.run_until(job, None, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Ctrl-C handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        })
    }

    /// Run `job` until `shutdown` resolves, a run fails, or `max_runs` runs
    /// have completed
    ///
    /// `shutdown` is polled before every tick, so it is armed before the first
    /// run starts and a shutdown requested during a run takes effect right
    /// after it.
    pub fn run_until<F, S>(
        &self,
        job: F,
        max_runs: Option<usize>,
        shutdown: S,
    ) -> Result<usize, SyncError>
    where
        F: Fn() -> Result<(), SyncError> + Send + Sync + 'static,
        S: Future<Output = ()>,
    {
        let job = Arc::new(job);

        self.runtime.block_on(async {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tokio::pin!(shutdown);

            let mut completed = 0usize;
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown => {
                        info!("shutdown requested, stopping scheduler");
                        break;
                    }
                    _ = ticker.tick() => {}
                }

                let job = Arc::clone(&job);
                let outcome = tokio::task::spawn_blocking(move || job())
                    .await
                    .map_err(|e| SyncError::Scheduler(format!("run task failed: {}", e)))?;
                outcome?;

                completed += 1;
                if max_runs.is_some_and(|max| completed >= max) {
                    break;
                }
            }

            Ok(completed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn never() -> std::future::Pending<()> {
        std::future::pending()
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(matches!(
            Scheduler::new(Duration::ZERO),
            Err(SyncError::Config(_))
        ));
    }

    #[test]
    fn test_runs_immediately_then_on_interval_without_overlap() {
        let scheduler = Scheduler::new(Duration::from_millis(20)).expect("scheduler");
        let calls = Arc::new(AtomicUsize::new(0));
        let active = Arc::new(AtomicUsize::new(0));
        let max_active = Arc::new(AtomicUsize::new(0));

        let job = {
            let calls = Arc::clone(&calls);
            let active = Arc::clone(&active);
            let max_active = Arc::clone(&max_active);
            move || {
                let now_active = active.fetch_add(1, Ordering::SeqCst) + 1;
                max_active.fetch_max(now_active, Ordering::SeqCst);
                // Longer than the interval, so ticks are missed while running.
                std::thread::sleep(Duration::from_millis(50));
                calls.fetch_add(1, Ordering::SeqCst);
                active.fetch_sub(1, Ordering::SeqCst);
                Ok(())
            }
        };

        let started = Instant::now();
        let completed = scheduler
            .run_until(job, Some(3), never())
            .expect("scheduler run");

        assert_eq!(completed, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(max_active.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() >= Duration::from_millis(150));
    }

    #[test]
    fn test_failing_run_stops_the_loop() {
        let scheduler = Scheduler::new(Duration::from_millis(5)).expect("scheduler");
        let calls = Arc::new(AtomicUsize::new(0));

        let job = {
            let calls = Arc::clone(&calls);
            move || {
                if calls.fetch_add(1, Ordering::SeqCst) == 1 {
                    Err(SyncError::Config("config vanished".to_string()))
                } else {
                    Ok(())
                }
            }
        };

        let result = scheduler.run_until(job, Some(10), never());

        assert!(matches!(result, Err(SyncError::Config(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_pending_shutdown_wins_over_the_first_tick() {
        let scheduler = Scheduler::new(Duration::from_secs(60)).expect("scheduler");
        let calls = Arc::new(AtomicUsize::new(0));

        let job = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        };

        for _ in 0..20 {
            let completed = scheduler
                .run_until(job.clone(), None, std::future::ready(()))
                .expect("scheduler run");
            assert_eq!(completed, 0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shutdown_during_a_run_stops_after_it() {
        let scheduler = Scheduler::new(Duration::from_millis(5)).expect("scheduler");
        let calls = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let tx = std::sync::Mutex::new(Some(tx));

        let job = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                if let Some(tx) = tx.lock().expect("lock sender").take() {
                    let _ = tx.send(());
                }
                Ok(())
            }
        };

        let completed = scheduler
            .run_until(job, Some(10), async {
                let _ = rx.await;
            })
            .expect("scheduler run");

        assert_eq!(completed, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
