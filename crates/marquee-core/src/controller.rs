use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Monotonic request counter. Only the newest request may commit state.
#[derive(Debug, Default)]
pub(crate) struct Generations(AtomicU64);

impl Generations {
    /// Start a new request, making every earlier one stale.
    pub(crate) fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

/// Apply `update` to the published state unless the request was cancelled
/// or superseded. Returns whether the update was committed.
///
/// The check runs under the channel's write lock, so a request that becomes
/// stale after this point is ordered after the commit.
pub(crate) fn commit<T>(
    state: &watch::Sender<T>,
    generations: &Generations,
    generation: u64,
    cancel: &CancellationToken,
    update: impl FnOnce(&mut T),
) -> bool {
    state.send_if_modified(|s| {
        if cancel.is_cancelled() || !generations.is_current(generation) {
            return false;
        }
        update(s);
        true
    })
}

/// Await `fut`, abandoning it if `cancel` fires first.
pub(crate) async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        out = fut => Some(out),
    }
}
