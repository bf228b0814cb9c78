//! Small helpers shared by the reconcilers.

use std::time::Duration;

use tokio::task::JoinSet;

/// Returns `true` if both slices hold the same strings, ignoring order.
///
/// Duplicates count: `["a", "a"]` does not equal `["a", "b"]`.
#[must_use]
pub fn string_slice_content_equal<S: AsRef<str>>(a: &[S], b: &[S]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&str> = a.iter().map(AsRef::as_ref).collect();
    let mut b: Vec<&str> = b.iter().map(AsRef::as_ref).collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Returns `true` if `list` contains `s`.
#[must_use]
pub fn contains<S: AsRef<str>>(list: &[S], s: &str) -> bool {
    list.iter().any(|v| v.as_ref() == s)
}

/// Wait for every task in `tasks` to finish, giving up after `timeout`.
///
/// Returns `true` if the wait timed out. Tasks still running on timeout are
/// left in the set.
pub async fn wait_timeout<T: 'static>(tasks: &mut JoinSet<T>, timeout: Duration) -> bool {
    let drain = async {
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "Task failed while waiting");
            }
        }
    };

    match tokio::time::timeout(timeout, drain).await {
        Ok(()) => false,
        Err(_) => {
            tracing::debug!(?timeout, "Timed out waiting for tasks");
            true
        }
    }
}
