//! sslgate End-to-End Smoke Test
//!
//! Tests the full stack:
//!   Part A — Error queue: drain order, assertion primitive
//!   Part B — Startup filter: allowed and rejected triples
//!   Part C — Init gate: single registration, concurrency, re-registration
//!   Part D — Checkpoints: legacy provider, version mismatch
//!   Part E — Default surface through the process-wide gate
//!
//! Run: ./target/release/sslgate-smoke
//! (build with --features libcrypto to run Part E against the system libcrypto)
//! Log level: SSLGATE_LOG=debug

use std::sync::{Arc, Barrier};
use std::thread;

use sslerr::codes::*;
use sslerr::ErrorRecord;
use sslgate::filter;
use sslgate::{
    drain, EngineStatus, GateConfig, GateError, GateState, InitGate, LibraryBinding, NativeSurface,
};
use sslgate_module::{DefaultSurface, MemorySurface};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── Test harness ──

struct TestRunner {
    total: usize,
    passed: usize,
    failed: usize,
}

const LINE: &str = "────────────────────────────────────────────────────────────";

impl TestRunner {
    fn new() -> Self {
        Self { total: 0, passed: 0, failed: 0 }
    }

    fn section(&self, name: &str) {
        println!("\n{}", LINE);
        println!("  {}", name);
        println!("{}", LINE);
    }

    fn pass(&mut self, name: &str) {
        self.total += 1;
        self.passed += 1;
        println!("  [{:2}] {:<52} PASS", self.total, name);
    }

    fn fail(&mut self, name: &str, reason: &str) {
        self.total += 1;
        self.failed += 1;
        println!("  [{:2}] {:<52} FAIL: {}", self.total, name, reason);
    }

    fn check(&mut self, name: &str, ok: bool, reason: &str) {
        if ok { self.pass(name); } else { self.fail(name, reason); }
    }

    fn summary(&self) {
        println!("\n{}", LINE);
        println!(
            "  Total: {}  Passed: {}  Failed: {}",
            self.total, self.passed, self.failed
        );
        println!("{}", LINE);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SSLGATE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

// ════════════════════════════════════════════════════════════
// Part A: Error queue
// ════════════════════════════════════════════════════════════

fn test_queue(t: &mut TestRunner) {
    t.section("Part A: Error queue");
    let s = MemorySurface::new();

    t.check("drain empty queue", drain(&s).is_empty(), "expected no records");

    for reason in [EVP_R_BAD_DECRYPT, EVP_R_XTS_DUPLICATED_KEYS, EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH] {
        s.push_error(ERR_LIB_EVP, 0, reason);
    }
    let q = drain(&s);
    let order: Vec<i32> = q.iter().map(ErrorRecord::reason_code).collect();
    t.check(
        "drain keeps push order",
        order == [EVP_R_BAD_DECRYPT, EVP_R_XTS_DUPLICATED_KEYS, EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH],
        &format!("got {:?}", order),
    );
    t.check("queue empty after drain", s.pending_errors() == 0, "records left behind");

    s.push_error(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT);
    t.check("assert_native(true) keeps queue",
        sslgate::assert_native(&s, true).is_ok() && s.pending_errors() == 1,
        "queue was touched");
    drain(&s);

    match sslgate::assert_native(&s, false) {
        Err(e) => t.check("assert_native(false) on empty queue", e.errors().is_empty(),
            "unexpected payload"),
        Ok(()) => t.fail("assert_native(false) on empty queue", "did not fail"),
    }

    s.push_error(ERR_LIB_EVP, EVP_F_EVP_ENCRYPTFINAL_EX, EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH);
    match sslgate::assert_native(&s, false) {
        Err(e) => {
            let text_ok = e
                .errors()
                .first()
                .and_then(ErrorRecord::reason_text)
                .is_some_and(|txt| txt.contains("data not multiple of block length"));
            t.check("assert_native(false) carries record", e.errors().len() == 1 && text_ok,
                &e.to_string());
        }
        Ok(()) => t.fail("assert_native(false) carries record", "did not fail"),
    }
}

// ════════════════════════════════════════════════════════════
// Part B: Startup filter
// ════════════════════════════════════════════════════════════

fn test_filter(t: &mut TestRunner) {
    t.section("Part B: Startup filter");

    let allowed = [
        ("ENGINE_BY_ID no such engine", ErrorRecord::new(ERR_LIB_ENGINE, ENGINE_F_ENGINE_BY_ID, ENGINE_R_NO_SUCH_ENGINE)),
        ("conflicting engine id (any func)", ErrorRecord::new(ERR_LIB_ENGINE, 0, ENGINE_R_CONFLICTING_ENGINE_ID)),
        ("DSO load failed (any func)", ErrorRecord::new(ERR_LIB_DSO, DSO_F_DLFCN_LOAD, DSO_R_LOAD_FAILED)),
        ("EVP block length", ErrorRecord::new(ERR_LIB_EVP, EVP_F_EVP_ENCRYPTFINAL_EX, EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH)),
    ];
    for (name, rec) in &allowed {
        t.check(&format!("allowed: {}", name), filter::is_allowed(rec), "rejected");
    }

    let rejected = ErrorRecord::new(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT);
    t.check("rejected: EVP bad decrypt", !filter::is_allowed(&rejected), "allowed");

    let mixed = vec![allowed[0].1.clone(), rejected].into();
    match filter::check_startup(mixed) {
        Err(e) => t.check("check_startup keeps full queue", e.errors().len() == 2,
            &format!("got {} records", e.errors().len())),
        Ok(()) => t.fail("check_startup keeps full queue", "accepted"),
    }
}

// ════════════════════════════════════════════════════════════
// Part C: Init gate
// ════════════════════════════════════════════════════════════

fn test_gate(t: &mut TestRunner) {
    t.section("Part C: Init gate");
    let config = GateConfig::default();

    let gate = InitGate::new();
    let s = MemorySurface::new();
    s.push_error(ERR_LIB_EVP, EVP_F_EVP_ENCRYPTFINAL_EX, EVP_R_DATA_NOT_MULTIPLE_OF_BLOCK_LENGTH);
    let res = gate.open(&s, &config);
    t.check("open with benign startup error", res == Ok(true), &format!("{:?}", res));
    t.check("queue empty after open", s.pending_errors() == 0, "records left behind");
    t.check("state is Ready", gate.state() == GateState::Ready { legacy_available: true },
        &format!("{:?}", gate.state()));

    let res = gate.open(&s, &config);
    t.check("second open is a no-op", res.is_ok() && s.engine_calls() == 1,
        &format!("engine calls: {}", s.engine_calls()));

    let gate = Arc::new(InitGate::new());
    let s = Arc::new(MemorySurface::new());
    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let (gate, s, barrier) = (Arc::clone(&gate), Arc::clone(&s), Arc::clone(&barrier));
            thread::spawn(move || {
                barrier.wait();
                gate.open(&*s, &GateConfig::default()).is_ok() && s.pending_errors() == 0
            })
        })
        .collect();
    let all_ok = handles.into_iter().all(|h| h.join().unwrap_or(false));
    t.check("8 racing opens all succeed", all_ok, "a racer failed or left errors");
    t.check("exactly one registration", s.engine_calls() == 1 && gate.registrations() == 1,
        &format!("engine calls: {}, registrations: {}", s.engine_calls(), gate.registrations()));

    let b = LibraryBinding::with_gate(&gate, Arc::clone(&s), &config);
    match b {
        Ok(b) => {
            let status = b.register_random_engine();
            t.check("re-registration reports already present",
                matches!(status, Ok(EngineStatus::AlreadyPresent)), &format!("{:?}", status));
            t.check("re-registration leaves queue empty", b.consume_errors().is_empty(),
                "records left behind");
        }
        Err(e) => t.fail("binding on open gate", &e.to_string()),
    }

    let gate = InitGate::new();
    let s = MemorySurface::new();
    s.push_error(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT);
    let res = gate.open(&s, &config);
    t.check("stale error fails first open", matches!(res, Err(GateError::Internal(_))),
        &format!("{:?}", res));
    let res = gate.open(&s, &config);
    t.check("retry resumes without re-registering", res.is_ok() && s.engine_calls() == 1,
        &format!("{:?}", res));

    let gate = InitGate::new();
    let s = MemorySurface::new();
    s.push_error(ERR_LIB_EVP, 0, EVP_R_BAD_DECRYPT);
    let res = gate.open(&s, &GateConfig::new().discard_stale_errors(true));
    t.check("stale error discarded when configured", res.is_ok(), &format!("{:?}", res));
}

// ════════════════════════════════════════════════════════════
// Part D: Checkpoints
// ════════════════════════════════════════════════════════════

fn test_checkpoints(t: &mut TestRunner) {
    t.section("Part D: Checkpoints");

    let gate = InitGate::new();
    let s = MemorySurface::new().without_provider("legacy");
    let res = gate.open(&s, &GateConfig::default());
    t.check("missing legacy fatal when required",
        matches!(res, Err(GateError::LegacyProvider(_))), &format!("{:?}", res));

    let gate = InitGate::new();
    let s = Arc::new(MemorySurface::new().without_provider("legacy"));
    let config = GateConfig::new().require_legacy(false);
    match LibraryBinding::with_gate(&gate, s, &config) {
        Ok(b) => {
            t.check("missing legacy tolerated when optional", !b.legacy_available(), "legacy reported");
            t.check("legacy checkpoint fails", b.require_legacy_for("RC2").is_err(), "passed");
            t.check("load errors discarded", b.consume_errors().is_empty(), "records left behind");
        }
        Err(e) => t.fail("missing legacy tolerated when optional", &e.to_string()),
    }

    let gate = InitGate::new();
    let s = MemorySurface::new().with_package_version("0.0.0-mismatch");
    let first = gate.open(&s, &GateConfig::default());
    let second = gate.open(&s, &GateConfig::default());
    t.check("version mismatch rejected",
        matches!(first, Err(GateError::VersionMismatch(_))), &format!("{:?}", first));
    t.check("version mismatch is sticky", first == second && s.engine_calls() == 0,
        &format!("{:?}", second));

    let gate = InitGate::new();
    let good = MemorySurface::new();
    let ready = gate.open(&good, &GateConfig::default());
    let other = MemorySurface::new().with_package_version("0.0.0-mismatch");
    let res = gate.open(&other, &GateConfig::default());
    t.check("mismatched surface refused after ready",
        ready.is_ok() && matches!(res, Err(GateError::VersionMismatch(_))), &format!("{:?}", res));
}

// ════════════════════════════════════════════════════════════
// Part E: Default surface
// ════════════════════════════════════════════════════════════

fn test_default_surface(t: &mut TestRunner) {
    t.section("Part E: Default surface (global gate)");
    let surface = Arc::new(DefaultSurface::new());
    info!(version = surface.package_version(), "default surface");

    match LibraryBinding::new(Arc::clone(&surface)) {
        Ok(b) => {
            t.pass("LibraryBinding::new");
            t.check("queue empty after construction", b.consume_errors().is_empty(),
                "records left behind");
            let again = LibraryBinding::new(surface);
            t.check("second binding shares the gate",
                again.is_ok() && sslgate::global_gate().registrations() == 1,
                &format!("registrations: {}", sslgate::global_gate().registrations()));
        }
        Err(e) => t.fail("LibraryBinding::new", &e.to_string()),
    }
}

fn main() {
    init_logging();
    println!("=== sslgate End-to-End Smoke Test ===");
    println!("    version: {}", sslgate::PACKAGE_VERSION);

    let mut t = TestRunner::new();

    test_queue(&mut t);
    test_filter(&mut t);
    test_gate(&mut t);
    test_checkpoints(&mut t);
    test_default_surface(&mut t);

    t.summary();
    std::process::exit(if t.failed > 0 { 1 } else { 0 });
}
