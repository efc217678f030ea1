//! Unread-badge poller.
//!
//! Fetches the unread count immediately, then on every interval tick and on
//! each foreground / manual refresh trigger. Fetches may overlap; each takes
//! a sequence ticket from [`BadgeState`] and only completions newer than the
//! last applied one reach the stream. Failures apply a count of 0.

use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::Stream;
use roomflow_engine::BadgeState;
use roomflow_engine::format::badge_label;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::Result;
use crate::client::NotificationOps;

/// Where unread counts come from.
pub trait UnreadCountSource: Send + Sync + 'static {
    /// False when no one is signed in; no request is made then.
    fn has_session(&self) -> bool;

    fn fetch_unread_count(&self) -> BoxFuture<'_, Result<u64>>;
}

impl UnreadCountSource for NotificationOps {
    fn has_session(&self) -> bool {
        self.session_active()
    }

    fn fetch_unread_count(&self) -> BoxFuture<'_, Result<u64>> {
        Box::pin(self.unread_count())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeUpdate {
    pub seq: u64,
    pub count: u64,
}

impl BadgeUpdate {
    pub fn label(&self) -> Option<String> {
        badge_label(self.count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Foreground,
    Refresh,
}

pub struct BadgePoller<S> {
    source: Arc<S>,
    interval: Duration,
}

impl<S: UnreadCountSource> BadgePoller<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        Self {
            source: Arc::new(source),
            interval,
        }
    }

    /// Spawn the polling task. Must be called inside a tokio runtime.
    pub fn start(self) -> (BadgeHandle, BadgeStream) {
        let state = Arc::new(Mutex::new(BadgeState::new()));
        let (trigger_tx, trigger_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(
            self.source,
            self.interval,
            state.clone(),
            update_tx,
            trigger_rx,
        ));

        (
            BadgeHandle {
                triggers: trigger_tx,
                state,
                task,
            },
            BadgeStream { receiver: update_rx },
        )
    }
}

async fn run<S: UnreadCountSource>(
    source: Arc<S>,
    interval: Duration,
    state: Arc<Mutex<BadgeState>>,
    updates: mpsc::UnboundedSender<BadgeUpdate>,
    mut triggers: mpsc::UnboundedReceiver<Trigger>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            trigger = triggers.recv() => match trigger {
                Some(trigger) => tracing::debug!("Badge refresh triggered: {:?}", trigger),
                None => break,
            },
        }
        if updates.is_closed() {
            break;
        }
        spawn_fetch(source.clone(), state.clone(), updates.clone());
    }
}

fn spawn_fetch<S: UnreadCountSource>(
    source: Arc<S>,
    state: Arc<Mutex<BadgeState>>,
    updates: mpsc::UnboundedSender<BadgeUpdate>,
) {
    if !source.has_session() {
        let ticket = lock(&state).reset();
        let _ = updates.send(BadgeUpdate {
            seq: ticket.seq(),
            count: 0,
        });
        return;
    }

    let ticket = lock(&state).begin();
    tokio::spawn(async move {
        let count = match source.fetch_unread_count().await {
            Ok(count) => Some(count),
            Err(err) if err.is_network_unavailable() || err.is_expected() => {
                tracing::debug!("Unread count unavailable: {}", err);
                None
            }
            Err(err) => {
                tracing::warn!("Failed to fetch unread count: {}", err);
                None
            }
        };

        let applied = lock(&state).finish(ticket, count);
        match applied {
            Some(count) => {
                let _ = updates.send(BadgeUpdate {
                    seq: ticket.seq(),
                    count,
                });
            }
            None => tracing::debug!("Discarding stale unread count (seq {})", ticket.seq()),
        }
    });
}

fn lock(state: &Mutex<BadgeState>) -> MutexGuard<'_, BadgeState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Control side of a running poller. Dropping it stops polling.
pub struct BadgeHandle {
    triggers: mpsc::UnboundedSender<Trigger>,
    state: Arc<Mutex<BadgeState>>,
    task: JoinHandle<()>,
}

impl BadgeHandle {
    /// The app came back to the foreground.
    pub fn notify_foreground(&self) {
        let _ = self.triggers.send(Trigger::Foreground);
    }

    pub fn refresh(&self) {
        let _ = self.triggers.send(Trigger::Refresh);
    }

    /// Latest applied count.
    pub fn count(&self) -> u64 {
        lock(&self.state).count()
    }

    pub fn label(&self) -> Option<String> {
        badge_label(self.count())
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for BadgeHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Applied badge updates, in application order.
pub struct BadgeStream {
    receiver: mpsc::UnboundedReceiver<BadgeUpdate>,
}

impl BadgeStream {
    /// Next update if one is already queued.
    pub fn try_next(&mut self) -> Option<BadgeUpdate> {
        self.receiver.try_recv().ok()
    }
}

impl Stream for BadgeStream {
    type Item = BadgeUpdate;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
