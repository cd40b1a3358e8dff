//! Refresh state machine.

use chrono::{DateTime, Local};

/// Data from a successful fetch and when it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    /// Fetched payload.
    pub data: T,
    /// Completion time of the fetch.
    pub fetched_at: DateTime<Local>,
}

/// Lifecycle of one widget instance's data.
///
/// `Idle` before the first fetch, `Loading` while a fetch is in flight,
/// then `Ready` or `Failed`. A failure keeps the last good snapshot so the
/// widget may choose to show it, labelled as stale.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RefreshState<T> {
    /// Mounted, nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Latest fetch succeeded.
    Ready {
        /// Fetched payload.
        data: T,
        /// Completion time of the fetch.
        fetched_at: DateTime<Local>,
    },
    /// Latest fetch failed.
    Failed {
        /// Human-readable error.
        reason: String,
        /// Most recent successful snapshot, if any.
        last_good: Option<Snapshot<T>>,
    },
}

/// What a widget should draw for a given state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateView<'a, T> {
    /// Nothing to show yet.
    Pending,
    /// Current data.
    Fresh {
        /// Payload to draw.
        data: &'a T,
        /// Recency to display.
        fetched_at: DateTime<Local>,
    },
    /// Old data after a failed refresh; only produced when stale display is
    /// enabled for the widget.
    Stale {
        /// Last good payload.
        data: &'a T,
        /// When the last good payload was fetched.
        fetched_at: DateTime<Local>,
        /// Why the latest refresh failed.
        reason: &'a str,
    },
    /// Error message in place of data.
    Error {
        /// Why the latest refresh failed.
        reason: &'a str,
    },
}

impl<T> RefreshState<T> {
    /// Maps the state to what should be drawn.
    ///
    /// A failure renders as an error and discards stale data unless
    /// `show_stale` is set and a previous snapshot exists.
    pub fn view(&self, show_stale: bool) -> StateView<'_, T> {
        match self {
            RefreshState::Idle | RefreshState::Loading => StateView::Pending,
            RefreshState::Ready { data, fetched_at } => StateView::Fresh {
                data,
                fetched_at: *fetched_at,
            },
            RefreshState::Failed {
                reason,
                last_good: Some(snapshot),
            } if show_stale => StateView::Stale {
                data: &snapshot.data,
                fetched_at: snapshot.fetched_at,
                reason,
            },
            RefreshState::Failed { reason, .. } => StateView::Error { reason },
        }
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, RefreshState::Loading)
    }
}

/// Drives [`RefreshState`] transitions and remembers the last good snapshot
/// across `Loading` phases.
#[derive(Debug, Clone)]
pub struct Lifecycle<T> {
    state: RefreshState<T>,
    last_good: Option<Snapshot<T>>,
}

impl<T: Clone> Lifecycle<T> {
    /// Starts in `Idle`.
    pub fn new() -> Self {
        Self {
            state: RefreshState::Idle,
            last_good: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> &RefreshState<T> {
        &self.state
    }

    /// Enters `Loading`.
    pub fn start(&mut self) -> &RefreshState<T> {
        self.state = RefreshState::Loading;
        &self.state
    }

    /// Enters `Ready`, replacing any previous snapshot.
    pub fn succeed(&mut self, data: T, fetched_at: DateTime<Local>) -> &RefreshState<T> {
        self.last_good = Some(Snapshot {
            data: data.clone(),
            fetched_at,
        });
        self.state = RefreshState::Ready { data, fetched_at };
        &self.state
    }

    /// Enters `Failed`, carrying the last good snapshot.
    pub fn fail(&mut self, reason: impl Into<String>) -> &RefreshState<T> {
        self.state = RefreshState::Failed {
            reason: reason.into(),
            last_good: self.last_good.clone(),
        };
        &self.state
    }
}

impl<T: Clone> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}
