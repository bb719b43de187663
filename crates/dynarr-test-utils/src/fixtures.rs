//! Instrumented element fixtures.
//!
//! - [`Probe`]: an element whose builds and drops are counted by a
//!   [`Ledger`] and whose copies can be refused by it.
//! - [`fails_always`] / [`fails_after_42`]: ready-made ledgers for the two
//!   classic failure scenarios.

use std::error::Error;
use std::fmt;

use dynarr_core::TryClone;

use crate::Ledger;

/// A counted element.
///
/// Implements [`TryClone`] but not `Clone`, so every copy goes through the
/// ledger's budget.
pub struct Probe {
    value: u64,
    ledger: Ledger,
}

impl Probe {
    pub(crate) fn new(value: u64, ledger: Ledger) -> Self {
        Self { value, ledger }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn set_value(&mut self, value: u64) {
        self.value = value;
    }
}

impl TryClone for Probe {
    type Error = ProbeError;

    fn try_clone(&self) -> Result<Self, ProbeError> {
        self.ledger.admit()?;
        self.ledger.record_clone();
        Ok(Probe::new(self.value, self.ledger.clone()))
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.ledger.record_drop();
    }
}

impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<u64> for Probe {
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Probe({})", self.value)
    }
}

/// A build refused by an armed [`Ledger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeError {
    /// Successful builds on the ledger when the refusal happened.
    pub builds: usize,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "probe build refused after {} builds", self.builds)
    }
}

impl Error for ProbeError {}

/// A ledger that refuses every build.
pub fn fails_always() -> Ledger {
    Ledger::always_failing()
}

/// A ledger that allows exactly 42 builds, then returns `Err`.
pub fn fails_after_42() -> Ledger {
    Ledger::failing_after(42)
}
