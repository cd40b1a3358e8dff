//! Fan-out helper for widgets backed by several independent sources.

use std::fmt::Display;

use tracing::debug;

use super::FetchError;

/// One source that failed during a [`gather`].
#[derive(Debug)]
pub struct SourceFailure {
    /// Display form of the source (symbol, item id, ...).
    pub source: String,
    /// What went wrong.
    pub error: FetchError,
}

/// Results of a [`gather`] where at least one source succeeded.
#[derive(Debug)]
pub struct Partial<T> {
    /// Successful results, in source order.
    pub items: Vec<T>,
    /// Sources that failed, in source order.
    pub failures: Vec<SourceFailure>,
}

/// Runs `lookup` for every source concurrently and keeps whatever succeeds.
///
/// Blocking; call it from inside a [`Fetcher`](super::Fetcher). Fails with
/// [`FetchError::AllSourcesFailed`] when nothing succeeded, including when
/// `sources` is empty.
pub fn gather<S, T, F>(sources: &[S], lookup: F) -> Result<Partial<T>, FetchError>
where
    S: Display + Sync,
    T: Send,
    F: Fn(&S) -> Result<T, FetchError> + Sync,
{
    let lookup = &lookup;
    let results: Vec<Result<T, FetchError>> = std::thread::scope(|scope| {
        let workers: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || lookup(source)))
            .collect();
        workers
            .into_iter()
            .map(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|_| Err(FetchError::Task("source lookup panicked".to_string())))
            })
            .collect()
    });

    let mut items = Vec::new();
    let mut failures = Vec::new();
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(item) => items.push(item),
            Err(error) => {
                debug!(source = %source, error = %error, "source failed");
                failures.push(SourceFailure {
                    source: source.to_string(),
                    error,
                });
            }
        }
    }

    if items.is_empty() {
        let first = failures
            .first()
            .map(|f| format!("{}: {}", f.source, f.error))
            .unwrap_or_else(|| "no sources".to_string());
        return Err(FetchError::AllSourcesFailed {
            count: sources.len(),
            first,
        });
    }
    Ok(Partial { items, failures })
}

#[cfg(test)]
mod tests {
    use super::*;
    use startpage_feeds::FeedError;

    fn lookup(symbol: &&str) -> Result<String, FetchError> {
        match *symbol {
            "BAD" => Err(FeedError::Upstream(format!("no quote for {symbol}")).into()),
            other => Ok(other.to_lowercase()),
        }
    }

    #[test]
    fn test_partial_failure_keeps_successes_in_order() {
        let partial = gather(&["AAPL", "BAD", "MSFT"], lookup).expect("partial success");
        assert_eq!(partial.items, vec!["aapl", "msft"]);
        assert_eq!(partial.failures.len(), 1);
        assert_eq!(partial.failures[0].source, "BAD");
    }

    #[test]
    fn test_all_failed_reports_count_and_first_error() {
        let err = gather(&["BAD", "BAD"], lookup).expect_err("all failed");
        match err {
            FetchError::AllSourcesFailed { count, first } => {
                assert_eq!(count, 2);
                assert!(first.starts_with("BAD: "), "got {first}");
            }
            other => panic!("expected AllSourcesFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_sources_is_failure() {
        let sources: [&str; 0] = [];
        assert!(matches!(
            gather(&sources, lookup),
            Err(FetchError::AllSourcesFailed { count: 0, .. })
        ));
    }

    #[test]
    fn test_panicking_source_counts_as_failure() {
        let partial = gather(&[1u32, 2, 3], |n| {
            if *n == 2 {
                panic!("source two exploded");
            }
            Ok(*n * 10)
        })
        .expect("others succeed");
        assert_eq!(partial.items, vec![10, 30]);
        assert_eq!(partial.failures[0].source, "2");
    }
}
