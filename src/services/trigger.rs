// SPDX-License-Identifier: MIT

//! Coalescing recomputation trigger.
//!
//! Rapid-fire UI events (continuous panning, keystrokes in the search box)
//! must collapse into a single recomputation once the input goes quiet.
//! Each `fire` takes a ticket and schedules the action after the window;
//! the scheduled task runs only if its ticket is still the newest, so a
//! newer trigger simply supersedes the pending one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Debounced wrapper around a recomputation action.
///
/// `fire` must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct DebouncedTrigger {
    window: Duration,
    latest: Arc<AtomicU64>,
    action: Arc<dyn Fn() + Send + Sync>,
}

impl DebouncedTrigger {
    pub fn new(window: Duration, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            window,
            latest: Arc::new(AtomicU64::new(0)),
            action: Arc::new(action),
        }
    }

    /// Register a trigger event. The action runs once the window elapses
    /// with no newer event.
    pub fn fire(&self) {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.latest);
        let action = Arc::clone(&self.action);
        let window = self.window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            if latest.load(Ordering::SeqCst) == ticket {
                action();
            }
        });
    }

    /// Number of trigger events seen so far (superseded ones included).
    pub fn fired(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn test_single_fire_runs_once_after_window() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let trigger = DebouncedTrigger::new(Duration::from_millis(300), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        trigger.fire();
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_fires_coalesce() {
        let runs = Arc::new(AtomicUsize::new(0));
        let ran_at = Arc::new(std::sync::Mutex::new(None));

        let counter = Arc::clone(&runs);
        let stamp = Arc::clone(&ran_at);
        let trigger = DebouncedTrigger::new(Duration::from_millis(300), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            *stamp.lock().unwrap() = Some(tokio::time::Instant::now());
        });

        let started = tokio::time::Instant::now();
        for _ in 0..10 {
            trigger.fire();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let last_fire = started + Duration::from_millis(90);
        assert_eq!(trigger.fired(), 10);
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // The one run happened after the last event plus the window.
        let ran_at = ran_at.lock().unwrap().expect("action ran");
        assert!(ran_at >= last_fire + Duration::from_millis(300));
    }
}
