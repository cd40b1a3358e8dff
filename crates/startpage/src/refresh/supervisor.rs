//! Refresh supervisor: one tokio task per mounted widget.
//!
//! The task fetches once on mount, then on every interval tick or manual
//! trigger, and publishes each transition through a `watch` channel. After a
//! publish it pokes the shared notify channel with the widget id so the UI
//! knows to redraw.
//!
//! Unmounting bumps the handle's generation and signals shutdown. A fetch
//! that completes after that point is dropped without touching state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::{mpsc, oneshot, watch, Notify};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{Fetcher, Lifecycle, RefreshState};
use crate::registry::WidgetId;

/// Per-instance refresh settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Time between automatic refreshes.
    pub interval: Duration,
    /// Keep showing the last good data (marked stale) after a failure.
    pub show_stale: bool,
}

/// State shared between a handle and its task.
#[derive(Debug, Default)]
struct Shared {
    /// Bumped on unmount; the task only publishes while it matches the
    /// generation it was spawned with.
    generation: AtomicU64,
    in_flight: AtomicBool,
    trigger: Notify,
}

/// Spawns refresh tasks that report to a single notify channel.
#[derive(Debug, Clone)]
pub struct RefreshSupervisor {
    notify: mpsc::Sender<WidgetId>,
}

impl RefreshSupervisor {
    /// Creates a supervisor whose tasks send the widget id on `notify`
    /// after every state change.
    pub fn new(notify: mpsc::Sender<WidgetId>) -> Self {
        Self { notify }
    }

    /// Starts refreshing `fetcher` for widget `id`.
    ///
    /// Must be called from within a tokio runtime. The first fetch starts
    /// immediately.
    pub fn mount<F: Fetcher>(
        &self,
        id: WidgetId,
        fetcher: F,
        options: RefreshOptions,
    ) -> SupervisorHandle<F::Output> {
        let (state_tx, state_rx) = watch::channel(RefreshState::Idle);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let shared = Arc::new(Shared::default());
        let generation = shared.generation.load(Ordering::SeqCst);

        let task = RefreshTask {
            id,
            fetcher: Arc::new(fetcher),
            // tokio's interval panics on zero
            interval: options.interval.max(Duration::from_millis(1)),
            shared: Arc::clone(&shared),
            generation,
            state_tx,
            notify: self.notify.clone(),
        };
        tokio::spawn(task.run(shutdown_rx));
        info!(widget = %id, interval = ?options.interval, "widget mounted");

        SupervisorHandle {
            id,
            state_rx,
            shared,
            shutdown: Some(shutdown_tx),
            show_stale: options.show_stale,
        }
    }
}

/// Owner's view of one mounted widget's refresh task.
///
/// Dropping the handle unmounts the widget.
pub struct SupervisorHandle<T> {
    id: WidgetId,
    state_rx: watch::Receiver<RefreshState<T>>,
    shared: Arc<Shared>,
    shutdown: Option<oneshot::Sender<()>>,
    show_stale: bool,
}

impl<T> SupervisorHandle<T> {
    /// Widget this handle refreshes.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Borrows the latest published state.
    ///
    /// Hold the guard only while rendering; the task cannot publish while it
    /// is alive.
    pub fn state(&self) -> watch::Ref<'_, RefreshState<T>> {
        self.state_rx.borrow()
    }

    /// Whether failures should keep showing the last good data.
    pub fn show_stale(&self) -> bool {
        self.show_stale
    }

    /// Whether a fetch is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.shared.in_flight.load(Ordering::SeqCst)
    }

    /// Whether the task is still attached.
    pub fn is_mounted(&self) -> bool {
        self.shutdown.is_some()
    }

    /// Requests an immediate refresh.
    ///
    /// Returns `false` without doing anything if a fetch is already in
    /// flight or the widget is unmounted.
    pub fn refresh_now(&self) -> bool {
        if !self.is_mounted() || self.is_in_flight() {
            debug!(widget = %self.id, "manual refresh skipped");
            return false;
        }
        self.shared.trigger.notify_one();
        true
    }

    /// Stops the task. Any fetch still running is discarded when it
    /// completes. Idempotent.
    pub fn unmount(&mut self) {
        let Some(shutdown) = self.shutdown.take() else {
            return;
        };
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        let _ = shutdown.send(());
        info!(widget = %self.id, "widget unmounted");
    }
}

impl<T> Drop for SupervisorHandle<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

struct RefreshTask<F: Fetcher> {
    id: WidgetId,
    fetcher: Arc<F>,
    interval: Duration,
    shared: Arc<Shared>,
    generation: u64,
    state_tx: watch::Sender<RefreshState<F::Output>>,
    notify: mpsc::Sender<WidgetId>,
}

impl<F: Fetcher> RefreshTask<F> {
    async fn run(self, mut shutdown: oneshot::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut lifecycle = Lifecycle::new();

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
                _ = self.shared.trigger.notified() => {
                    ticker.reset();
                }
            }

            self.shared.in_flight.store(true, Ordering::SeqCst);
            if !self.publish(lifecycle.start()) {
                break;
            }

            let fetcher = Arc::clone(&self.fetcher);
            let job = tokio::task::spawn_blocking(move || fetcher.fetch());
            let outcome = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    debug!(widget = %self.id, "unmounted during fetch, result will be discarded");
                    break;
                }
                joined = job => joined,
            };
            self.shared.in_flight.store(false, Ordering::SeqCst);

            let next = match outcome {
                Ok(Ok(data)) => {
                    debug!(widget = %self.id, "refresh succeeded");
                    lifecycle.succeed(data, Local::now())
                }
                Ok(Err(e)) => {
                    warn!(widget = %self.id, error = %e, "refresh failed");
                    lifecycle.fail(e.to_string())
                }
                Err(e) => {
                    warn!(widget = %self.id, error = %e, "refresh task panicked");
                    lifecycle.fail(super::FetchError::Task(e.to_string()).to_string())
                }
            };
            if !self.publish(next) {
                break;
            }
        }

        self.shared.in_flight.store(false, Ordering::SeqCst);
        debug!(widget = %self.id, "refresh task stopped");
    }

    /// Publishes `state` if this task still belongs to the mounted
    /// instance. Returns `false` once it does not.
    fn publish(&self, state: &RefreshState<F::Output>) -> bool {
        if self.shared.generation.load(Ordering::SeqCst) != self.generation {
            debug!(widget = %self.id, "stale generation, dropping update");
            return false;
        }
        self.state_tx.send_replace(state.clone());
        // Redraw hint only; a full channel already has a redraw pending.
        let _ = self.notify.try_send(self.id);
        true
    }
}
