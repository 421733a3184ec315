//! Error-queue drain.

use sslerr::ErrorQueue;
use tracing::trace;

use crate::NativeSurface;

/// Pop every pending error on the calling thread, oldest first.
///
/// Safe on an empty queue. When this returns, the thread's native queue is
/// empty no matter how many entries it held; a single failed high-level
/// call commonly leaves several.
pub fn drain<S: NativeSurface + ?Sized>(surface: &S) -> ErrorQueue {
    let mut records = Vec::new();
    while let Some(rec) = surface.pop_error() {
        records.push(rec);
    }

    if !records.is_empty() {
        trace!(count = records.len(), "drained native error queue");
    }
    ErrorQueue::from(records)
}
