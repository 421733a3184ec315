//! `MemorySurface` — in-process model of a native error-queue library.
//!
//! Reproduces the conventions the binding depends on without linking
//! anything:
//!   - one error queue per thread (a `thread_local!` map keyed by surface id),
//!   - engine registration that succeeds once, reports "already present"
//!     afterwards, and leaves lookup noise on the queue the first time,
//!   - named providers that load or fail with a DSO error,
//!   - an embedded package version.
//!
//! Every knob is a builder method so tests can script failures.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use sslerr::codes::*;
use sslerr::ErrorRecord;
use sslgate_core::NativeSurface;

thread_local! {
    /// Pending errors per surface, for the current thread only.
    static QUEUES: RefCell<HashMap<u64, VecDeque<ErrorRecord>>> = RefCell::new(HashMap::new());
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Build a record the way libcrypto would report it, text included.
fn record(library: i32, function: i32, reason: i32) -> ErrorRecord {
    let rec = ErrorRecord::new(library, function, reason);
    match reason_string(library, reason) {
        Some(text) => rec.with_text(text),
        None => rec,
    }
}

#[derive(Debug)]
pub struct MemorySurface {
    id: u64,
    package_version: String,
    needs_engine: bool,
    engine_fails: bool,
    engine_noise: Vec<(i32, i32, i32)>,
    /// `None`: no provider support at all.
    providers: Option<Vec<String>>,

    engine_installed: AtomicBool,
    engine_calls: AtomicUsize,
    provider_loads: AtomicUsize,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            package_version: env!("CARGO_PKG_VERSION").to_string(),
            needs_engine: true,
            engine_fails: false,
            // ENGINE_by_id misses before the engine is first added.
            engine_noise: vec![(ERR_LIB_ENGINE, ENGINE_F_ENGINE_BY_ID, ENGINE_R_NO_SUCH_ENGINE)],
            providers: Some(vec!["default".to_string(), "legacy".to_string()]),
            engine_installed: AtomicBool::new(false),
            engine_calls: AtomicUsize::new(0),
            provider_loads: AtomicUsize::new(0),
        }
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the version token the "native component" reports.
    pub fn with_package_version(mut self, version: &str) -> Self {
        self.package_version = version.to_string();
        self
    }

    /// Also leave this entry on the queue when the engine is first added.
    pub fn engine_noise(mut self, library: i32, function: i32, reason: i32) -> Self {
        self.engine_noise.push((library, function, reason));
        self
    }

    /// First registration leaves nothing on the queue.
    pub fn quiet_engine(mut self) -> Self {
        self.engine_noise.clear();
        self
    }

    /// Registration returns a failure status and pushes `ENGINE_R_INIT_FAILED`.
    pub fn failing_engine(mut self) -> Self {
        self.engine_fails = true;
        self
    }

    /// The build has no use for a custom engine.
    pub fn no_engine_needed(mut self) -> Self {
        self.needs_engine = false;
        self
    }

    /// The build predates providers.
    pub fn without_providers(mut self) -> Self {
        self.providers = None;
        self
    }

    /// Make loading `name` fail.
    pub fn without_provider(mut self, name: &str) -> Self {
        if let Some(providers) = self.providers.as_mut() {
            providers.retain(|p| p != name);
        }
        self
    }

    /// Number of `add_random_engine` calls so far, across all threads.
    pub fn engine_calls(&self) -> usize {
        self.engine_calls.load(Ordering::Acquire)
    }

    pub fn engine_installed(&self) -> bool {
        self.engine_installed.load(Ordering::Acquire)
    }

    /// Number of `load_provider` calls so far, across all threads.
    pub fn provider_loads(&self) -> usize {
        self.provider_loads.load(Ordering::Acquire)
    }

    /// Errors pending on the calling thread.
    pub fn pending_errors(&self) -> usize {
        QUEUES.with(|q| q.borrow().get(&self.id).map_or(0, VecDeque::len))
    }

    fn push(&self, rec: ErrorRecord) {
        QUEUES.with(|q| q.borrow_mut().entry(self.id).or_default().push_back(rec));
    }
}

impl NativeSurface for MemorySurface {
    fn pop_error(&self) -> Option<ErrorRecord> {
        QUEUES.with(|q| {
            let mut queues = q.borrow_mut();
            let queue = queues.get_mut(&self.id)?;
            let rec = queue.pop_front();
            if queue.is_empty() {
                queues.remove(&self.id);
            }
            rec
        })
    }

    fn push_error(&self, library: i32, function: i32, reason: i32) {
        self.push(record(library, function, reason));
    }

    fn needs_random_engine(&self) -> bool {
        self.needs_engine
    }

    fn add_random_engine(&self) -> i32 {
        self.engine_calls.fetch_add(1, Ordering::AcqRel);

        if self.engine_fails {
            self.push(record(ERR_LIB_ENGINE, ENGINE_F_ENGINE_ADD, ENGINE_R_INIT_FAILED));
            return 0;
        }
        if self.engine_installed.swap(true, Ordering::AcqRel) {
            return 2;
        }
        for &(library, function, reason) in &self.engine_noise {
            self.push(record(library, function, reason));
        }
        1
    }

    fn supports_providers(&self) -> bool {
        self.providers.is_some()
    }

    fn load_provider(&self, name: &str) -> bool {
        self.provider_loads.fetch_add(1, Ordering::AcqRel);

        let found = self
            .providers
            .as_ref()
            .is_some_and(|providers| providers.iter().any(|p| p == name));
        if !found {
            self.push(record(ERR_LIB_DSO, DSO_F_DLFCN_LOAD, DSO_R_LOAD_FAILED));
        }
        found
    }

    fn package_version(&self) -> &str {
        &self.package_version
    }
}

impl Drop for MemorySurface {
    fn drop(&mut self) {
        // Only the dropping thread's queue can be reached from here.
        let _ = QUEUES.try_with(|q| q.borrow_mut().remove(&self.id));
    }
}
