//! Per-widget refresh lifecycle.
//!
//! Every mounted widget owns one [`SupervisorHandle`]. The handle's task
//! polls a [`Fetcher`] on the widget's own interval and publishes a
//! [`RefreshState`] that only that widget reads. Supervisors share nothing
//! with each other, so one widget failing or hanging cannot affect another.

mod gather;
mod state;
mod supervisor;

pub use gather::{gather, Partial, SourceFailure};
pub use state::{Lifecycle, RefreshState, Snapshot, StateView};
pub use supervisor::{RefreshOptions, RefreshSupervisor, SupervisorHandle};

use startpage_feeds::FeedError;
use thiserror::Error;

/// Why a refresh attempt failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream source failed.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// A required setting (usually an API key) is missing.
    #[error("{0}")]
    NotConfigured(&'static str),

    /// Every source of a multi-source widget failed.
    #[error("all {count} sources failed (first error: {first})")]
    AllSourcesFailed {
        /// Number of sources attempted.
        count: usize,
        /// Message of the first failure, or a note that there were no sources.
        first: String,
    },

    /// The blocking fetch task panicked or was cancelled.
    #[error("refresh task failed: {0}")]
    Task(String),
}

/// Something that can produce a widget's data.
///
/// `fetch` is blocking and runs on tokio's blocking pool. Any
/// `Fn() -> Result<T, FetchError>` closure is a fetcher.
pub trait Fetcher: Send + Sync + 'static {
    /// Payload handed to the widget on success.
    type Output: Clone + Send + Sync + 'static;

    /// Performs one fetch attempt.
    fn fetch(&self) -> Result<Self::Output, FetchError>;
}

impl<F, T> Fetcher for F
where
    F: Fn() -> Result<T, FetchError> + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    type Output = T;

    fn fetch(&self) -> Result<T, FetchError> {
        self()
    }
}
