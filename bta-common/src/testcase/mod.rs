//! Test-case strategy objects and the per-run state they act on.
//!
//! Each concrete case issues one outbound command on entry, then reacts to
//! the semantic events the dispatcher decodes until it finalizes the run.
//! Hooks default to log-only no-ops, so a case overrides exactly the subset
//! it cares about.

mod close;
mod discover;
mod open;
mod pair;
mod rename;
mod unpair;

pub use close::CloseCase;
pub use discover::DiscoverCase;
pub use open::OpenCase;
pub use pair::PairCase;
pub use rename::RenameCase;
pub use unpair::UnpairCase;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::link::LinkOps;
use crate::registry::DeviceRegistry;
use crate::report::{ResultReporter, RunReport};
use crate::types::{PendingPairing, RemoteDevice, TestKind, TestOutcome};

/// Mutable state of one harness run, shared between the dispatcher and the
/// active test case.
pub struct TestRun {
    run_id: Uuid,
    kind: TestKind,
    /// Name of the remote device this run is scoped to. Empty when the test
    /// kind does not use one.
    pub target: String,
    /// PIN applied by pairing auto-confirmation.
    pub pin: String,
    pub registry: DeviceRegistry,
    /// First device whose name matched the target during this run.
    pub matched: Option<RemoteDevice>,
    /// Pairing attempt awaiting its bond-state notification.
    pub pending_pairing: Option<PendingPairing>,
    outcome: TestOutcome,
    reporter: Box<dyn ResultReporter>,
}

impl TestRun {
    pub fn new(
        kind: TestKind,
        target: impl Into<String>,
        pin: impl Into<String>,
        reporter: Box<dyn ResultReporter>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            kind,
            target: target.into(),
            pin: pin.into(),
            registry: DeviceRegistry::new(),
            matched: None,
            pending_pairing: None,
            outcome: TestOutcome::Pending,
            reporter,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn kind(&self) -> TestKind {
        self.kind
    }

    pub fn outcome(&self) -> &TestOutcome {
        &self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_final()
    }

    /// Record the terminal outcome and deliver it to the reporter.
    ///
    /// Idempotent: only the first call has any effect. Once finalized the
    /// run issues no further commands and late notifications are dropped by
    /// the dispatcher.
    pub fn finalize(&mut self, success: bool, reason: Option<&str>) {
        if self.outcome.is_final() {
            warn!(
                run_id = %self.run_id,
                success,
                reason = reason.unwrap_or(""),
                "finalize after terminal outcome ignored"
            );
            return;
        }
        debug!(
            run_id = %self.run_id,
            test = %self.kind,
            success,
            reason = reason.unwrap_or(""),
            "finalizing run"
        );
        let reason = reason.map(String::from);
        self.outcome = if success {
            TestOutcome::Success {
                reason: reason.clone(),
            }
        } else {
            TestOutcome::Failure {
                reason: reason.clone(),
            }
        };
        self.reporter.report(&RunReport {
            run_id: self.run_id,
            test: self.kind,
            success,
            reason,
            finished_at: Utc::now(),
        });
    }
}

/// One scripted test operation. Constructed once per run; `begin` fires the
/// entry action synchronously, the remaining hooks react to decoded events.
pub trait TestCase {
    fn begin(&mut self, link: &mut dyn LinkOps, run: &mut TestRun);

    fn on_open(&mut self, _link: &mut dyn LinkOps, _run: &mut TestRun, success: bool) {
        debug!(success, "radio open result observed");
    }

    fn on_close(&mut self, _link: &mut dyn LinkOps, _run: &mut TestRun, success: bool) {
        debug!(success, "radio close result observed");
    }

    fn on_bonded(
        &mut self,
        _link: &mut dyn LinkOps,
        _run: &mut TestRun,
        device: &RemoteDevice,
        success: bool,
    ) {
        debug!(device = device.label(), success, "bond result observed");
    }

    fn on_unbound(&mut self, _link: &mut dyn LinkOps, _run: &mut TestRun, device: &RemoteDevice) {
        debug!(device = device.label(), "unbind observed");
    }

    fn on_connected(
        &mut self,
        _link: &mut dyn LinkOps,
        _run: &mut TestRun,
        device: &RemoteDevice,
        success: bool,
    ) {
        debug!(device = device.label(), success, "profile connect observed");
    }

    fn on_disconnected(
        &mut self,
        _link: &mut dyn LinkOps,
        _run: &mut TestRun,
        device: &RemoteDevice,
        success: bool,
    ) {
        debug!(device = device.label(), success, "profile disconnect observed");
    }

    /// The scan target was matched. Fires at most once per run.
    fn on_device_found(
        &mut self,
        _link: &mut dyn LinkOps,
        _run: &mut TestRun,
        device: &RemoteDevice,
    ) {
        debug!(device = device.label(), "target device found");
    }

    /// Discovery ended without the target having been matched.
    fn on_discovery_exhausted(&mut self, _link: &mut dyn LinkOps, _run: &mut TestRun) {
        debug!("discovery exhausted without a match");
    }
}

/// Select the strategy for a test kind. `rename_to` is only consulted by
/// [`RenameCase`].
pub fn case_for(kind: TestKind, rename_to: Option<String>) -> Box<dyn TestCase> {
    match kind {
        TestKind::Open => Box::new(OpenCase),
        TestKind::Close => Box::new(CloseCase),
        TestKind::Discover => Box::new(DiscoverCase),
        TestKind::Pair => Box::new(PairCase),
        TestKind::Unpair => Box::new(UnpairCase),
        TestKind::Rename => Box::new(RenameCase::new(rename_to)),
    }
}
