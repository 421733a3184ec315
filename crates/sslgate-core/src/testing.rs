//! Minimal surface for unit tests in this crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use sslerr::ErrorRecord;

use crate::NativeSurface;

/// A single shared queue. Not thread-local; tests here stay on one thread.
#[derive(Default)]
pub(crate) struct QueueSurface {
    queue: Mutex<VecDeque<ErrorRecord>>,
}

impl QueueSurface {
    pub(crate) fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}

impl NativeSurface for QueueSurface {
    fn pop_error(&self) -> Option<ErrorRecord> {
        self.queue.lock().unwrap().pop_front()
    }

    fn push_error(&self, library: i32, function: i32, reason: i32) {
        let rec = ErrorRecord::new(library, function, reason);
        let rec = match sslerr::codes::reason_string(library, reason) {
            Some(text) => rec.with_text(text),
            None => rec,
        };
        self.queue.lock().unwrap().push_back(rec);
    }

    fn needs_random_engine(&self) -> bool {
        false
    }

    fn add_random_engine(&self) -> i32 {
        2
    }

    fn supports_providers(&self) -> bool {
        false
    }

    fn load_provider(&self, _name: &str) -> bool {
        false
    }

    fn package_version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }
}
