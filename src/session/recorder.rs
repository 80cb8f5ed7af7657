use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tracing::{info, warn};

use crate::outcome::{Outcome, OutcomeCounter};
use crate::probe::{ProbeError, ProbeKind};

/// Result of one executed probe, as seen by the runner.
#[derive(Debug)]
pub struct ProbeReport {
    pub kind: ProbeKind,
    pub outcome: Outcome,
    pub error: Option<ProbeError>,
}

impl ProbeReport {
    /// Console line in the `<Label> = <Outcome>[: reason]` shape.
    pub fn console_line(&self) -> String {
        match &self.error {
            Some(err) => format!("{} = {}: {}", self.kind.label(), self.outcome, err),
            None => format!("{} = {}", self.kind.label(), self.outcome),
        }
    }
}

/// Wraps probe execution so that every probe lands in the counter exactly
/// once, whether it returns, fails or panics.
#[derive(Debug, Default)]
pub struct OutcomeRecorder {
    counter: OutcomeCounter,
    reports: Vec<ProbeReport>,
}

impl OutcomeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `probe`, records its outcome, then hands the error (if any) back.
    pub async fn record<F>(&mut self, kind: ProbeKind, probe: F) -> Result<(), &ProbeError>
    where
        F: Future<Output = Result<(), ProbeError>>,
    {
        let result = match AssertUnwindSafe(probe).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => Err(ProbeError::Panicked(panic_message(&*payload))),
        };

        let report = match result {
            Ok(()) => ProbeReport {
                kind,
                outcome: Outcome::Passed,
                error: None,
            },
            Err(err) => ProbeReport {
                kind,
                outcome: Outcome::Failed,
                error: Some(err),
            },
        };

        let report = self.push(report);
        match &report.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Records `kind` as skipped without running anything.
    pub fn skip(&mut self, kind: ProbeKind) {
        self.push(ProbeReport {
            kind,
            outcome: Outcome::Skipped,
            error: None,
        });
    }

    #[cfg(test)]
    pub fn counter(&self) -> &OutcomeCounter {
        &self.counter
    }

    #[cfg(test)]
    pub fn reports(&self) -> &[ProbeReport] {
        &self.reports
    }

    pub fn into_parts(self) -> (OutcomeCounter, Vec<ProbeReport>) {
        (self.counter, self.reports)
    }

    fn push(&mut self, report: ProbeReport) -> &ProbeReport {
        self.counter.record(report.outcome);

        match &report.error {
            Some(err) => warn!(
                probe = %report.kind,
                outcome = %report.outcome,
                error = %err,
                "probe finished"
            ),
            None => info!(probe = %report.kind, outcome = %report.outcome, "probe finished"),
        }
        println!("{}", report.console_line());

        self.reports.push(report);
        &self.reports[self.reports.len() - 1]
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
