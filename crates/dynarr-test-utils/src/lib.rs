//! Test utilities for dynarr development.
//!
//! Provides a [`Ledger`] that counts every element built and dropped, and
//! can be armed to refuse (or panic on) builds after a budget. The
//! instrumented element type lives in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Probe, ProbeError};

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// How an armed ledger refuses a build once its budget is spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    /// The build returns `Err(ProbeError)`.
    Error,
    /// The build panics.
    Panic,
}

#[derive(Debug)]
struct Counters {
    constructed: AtomicUsize,
    cloned: AtomicUsize,
    dropped: AtomicUsize,
    refused: AtomicUsize,
    budget: AtomicUsize,
    panics: AtomicBool,
}

/// Shared tally of probe lifetimes.
///
/// Cloning a `Ledger` shares the counters. Uses atomics so probes stay
/// `Send` and can cross thread boundaries in stress tests.
#[derive(Clone, Debug)]
pub struct Ledger {
    counters: Arc<Counters>,
}

impl Ledger {
    /// A ledger that never refuses a build.
    pub fn new() -> Self {
        Self {
            counters: Arc::new(Counters {
                constructed: AtomicUsize::new(0),
                cloned: AtomicUsize::new(0),
                dropped: AtomicUsize::new(0),
                refused: AtomicUsize::new(0),
                budget: AtomicUsize::new(usize::MAX),
                panics: AtomicBool::new(false),
            }),
        }
    }

    /// A ledger that returns `Err` once `succeed_count` builds have happened.
    pub fn failing_after(succeed_count: usize) -> Self {
        let ledger = Self::new();
        ledger.arm(succeed_count, Failure::Error);
        ledger
    }

    /// A ledger that panics once `succeed_count` builds have happened.
    pub fn panicking_after(succeed_count: usize) -> Self {
        let ledger = Self::new();
        ledger.arm(succeed_count, Failure::Panic);
        ledger
    }

    /// A ledger that refuses every build.
    pub fn always_failing() -> Self {
        Self::failing_after(0)
    }

    /// Allow `more` further builds (constructions or clones), then fail the
    /// way `failure` says.
    pub fn arm(&self, more: usize, failure: Failure) {
        let limit = self.builds().saturating_add(more);
        self.counters.budget.store(limit, Ordering::Relaxed);
        self.counters
            .panics
            .store(failure == Failure::Panic, Ordering::Relaxed);
    }

    /// Lift the budget.
    pub fn disarm(&self) {
        self.counters.budget.store(usize::MAX, Ordering::Relaxed);
    }

    /// Build a fresh probe, subject to the budget.
    pub fn make(&self, value: u64) -> Result<Probe, ProbeError> {
        self.admit()?;
        self.counters.constructed.fetch_add(1, Ordering::Relaxed);
        Ok(Probe::new(value, self.clone()))
    }

    /// Probes built by [`make`](Self::make).
    pub fn constructed(&self) -> usize {
        self.counters.constructed.load(Ordering::Relaxed)
    }

    /// Probes built by cloning.
    pub fn cloned(&self) -> usize {
        self.counters.cloned.load(Ordering::Relaxed)
    }

    /// Probes dropped.
    pub fn dropped(&self) -> usize {
        self.counters.dropped.load(Ordering::Relaxed)
    }

    /// Builds refused by the budget (errors and panics).
    pub fn refused(&self) -> usize {
        self.counters.refused.load(Ordering::Relaxed)
    }

    /// Successful builds of either kind.
    pub fn builds(&self) -> usize {
        self.constructed() + self.cloned()
    }

    /// Probes built and not yet dropped.
    pub fn live(&self) -> usize {
        self.builds() - self.dropped()
    }

    /// Asserts that every probe built has been dropped exactly once.
    pub fn assert_balanced(&self) {
        assert_eq!(
            self.builds(),
            self.dropped(),
            "ledger unbalanced: {} constructed + {} cloned, {} dropped",
            self.constructed(),
            self.cloned(),
            self.dropped()
        );
    }

    pub(crate) fn admit(&self) -> Result<(), ProbeError> {
        let builds = self.builds();
        if builds < self.counters.budget.load(Ordering::Relaxed) {
            return Ok(());
        }
        self.counters.refused.fetch_add(1, Ordering::Relaxed);
        if self.counters.panics.load(Ordering::Relaxed) {
            panic!("probe build refused after {builds} builds");
        }
        Err(ProbeError { builds })
    }

    pub(crate) fn record_clone(&self) {
        self.counters.cloned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_drop(&self) {
        self.counters.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `f`, returning `None` if it panicked.
///
/// Wraps the closure in `AssertUnwindSafe`: callers inspect the state it
/// touched afterwards, which is the point of the test.
pub fn catch_panic<R>(f: impl FnOnce() -> R) -> Option<R> {
    panic::catch_unwind(AssertUnwindSafe(f)).ok()
}
