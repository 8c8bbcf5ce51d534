//! # Dashboard Clock
//!
//! A repeating task that publishes the current local time once per
//! interval until it is stopped.
//!
//! ```text
//!   Clock::start ──► tokio task ──tick──► watch::Sender<String> ──► readers
//!        │                 ▲
//!        └── stop() ───────┘ oneshot, task exits and is awaited
//! ```
//!
//! Dropping a [`Clock`] without calling [`Clock::stop`] also cancels the
//! task (the oneshot sender is dropped with it).

use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// `hh:mm:ss AM/PM`, as shown in the dashboard header.
pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%I:%M:%S %p").to_string()
}

/// Handle to a running clock task.
pub struct Clock {
    display: watch::Receiver<String>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Clock {
    /// Spawns the ticker. The first tick fires immediately.
    pub fn start(tick: Duration) -> Self {
        let (display_tx, display_rx) = watch::channel(format_clock(&Local::now()));
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        if display_tx.send(format_clock(&Local::now())).is_err() {
                            break;
                        }
                    }
                }
            }

            debug!("Clock stopped");
        });

        Clock {
            display: display_rx,
            stop: Some(stop_tx),
            task: Some(task),
        }
    }

    /// The most recently published time.
    pub fn now(&self) -> String {
        self.display.borrow().clone()
    }

    /// A receiver that is notified on every tick.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display.clone()
    }

    /// Cancels the task and waits for it to finish.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}
