//! One smoke-test session: readiness wait, ordered probes, summary.
//!
//! [`Session::run`] consumes the session, so accumulation, finalization and
//! the summary write happen once per session value.

mod context;
mod probes;
mod recorder;

pub use context::{PollFixture, SessionContext};
pub use recorder::{OutcomeRecorder, ProbeReport};

use anyhow::{Context, Result};
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::HarnessConfig;
use crate::outcome::{write_summary_file, Outcome, Summary};
use crate::probe::{DatastoreProbe, MongoDatastore, PollApiClient, ProbeKind};

pub struct Session<D: DatastoreProbe> {
    config: HarnessConfig,
    client: PollApiClient,
    datastore: D,
    context: SessionContext,
    recorder: OutcomeRecorder,
}

impl Session<MongoDatastore> {
    /// Session against the configured service and MongoDB instance.
    pub fn from_config(config: HarnessConfig) -> Result<Self> {
        let datastore = MongoDatastore::new(
            config.datastore_host.clone(),
            config.datastore_port,
            config.datastore_timeout(),
        );
        Self::new(config, datastore)
    }
}

impl<D: DatastoreProbe> Session<D> {
    pub fn new(config: HarnessConfig, datastore: D) -> Result<Self> {
        let client = PollApiClient::new(
            &config.base_url,
            config.request_timeout(),
            config.liveness_timeout(),
        )
        .context("building polling service client")?;

        Ok(Self {
            config,
            client,
            datastore,
            context: SessionContext::new(),
            recorder: OutcomeRecorder::new(),
        })
    }

    /// Runs every probe in declared order, then writes the summary.
    ///
    /// Never fails: probe errors end up in the report and a failed summary
    /// write is reported through [`SessionReport::persist_error`].
    pub async fn run(mut self) -> SessionReport {
        info!(
            base_url = %self.config.base_url,
            datastore = %self.datastore.address(),
            "smoke session starting"
        );

        self.wait_for_readiness().await;

        for kind in ProbeKind::ALL {
            self.run_probe(kind).await;
        }

        self.finalize().await
    }

    async fn wait_for_readiness(&self) {
        let wait = self.config.readiness_wait();
        if wait.is_zero() {
            return;
        }
        info!(wait_secs = wait.as_secs(), "waiting for services to start");
        sleep(wait).await;
    }

    async fn run_probe(&mut self, kind: ProbeKind) {
        if self.config.is_skipped(kind) {
            self.recorder.skip(kind);
            return;
        }

        let client = &self.client;
        let config = &self.config;
        let context = &mut self.context;
        let datastore = &self.datastore;

        let result = match kind {
            ProbeKind::Login => {
                self.recorder
                    .record(kind, probes::login(client, &config.username, &config.password))
                    .await
            }
            ProbeKind::CreatePoll => {
                self.recorder
                    .record(kind, probes::create_poll(client, context))
                    .await
            }
            ProbeKind::ListPolls => self.recorder.record(kind, probes::list_polls(client)).await,
            ProbeKind::VotePoll => {
                self.recorder
                    .record(kind, probes::vote_poll(client, context))
                    .await
            }
            ProbeKind::ServiceLiveness => {
                self.recorder
                    .record(kind, probes::service_liveness(client))
                    .await
            }
            ProbeKind::DatastoreLiveness => {
                self.recorder
                    .record(kind, probes::datastore_liveness(datastore))
                    .await
            }
        };

        if let Err(err) = result {
            if err.is_connectivity() {
                warn!(
                    probe = %kind,
                    error = %err,
                    "dependency unreachable, later probes against it will likely fail too"
                );
            }
        }
    }

    async fn finalize(self) -> SessionReport {
        let (counter, probes) = self.recorder.into_parts();
        debug_assert_eq!(counter.total() as usize, probes.len());

        let summary = Summary::from(counter);
        println!("{}", summary.console_report());

        let persist_error = match write_summary_file(&self.config.summary_path, &summary).await {
            Ok(()) => None,
            Err(err) => {
                let message = format!("{err:#}");
                error!(error = %message, "failed to persist summary");
                Some(message)
            }
        };

        info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            "smoke session finished"
        );

        SessionReport {
            summary,
            probes,
            context: self.context,
            persist_error,
        }
    }
}

/// Everything a finished session produced.
#[derive(Debug)]
pub struct SessionReport {
    pub summary: Summary,
    pub probes: Vec<ProbeReport>,
    pub context: SessionContext,
    pub persist_error: Option<String>,
}

impl SessionReport {
    pub fn probe(&self, kind: ProbeKind) -> Option<&ProbeReport> {
        self.probes.iter().find(|report| report.kind == kind)
    }

    pub fn outcome(&self, kind: ProbeKind) -> Option<Outcome> {
        self.probe(kind).map(|report| report.outcome)
    }

    pub fn failed_probes(&self) -> impl Iterator<Item = &ProbeReport> {
        self.probes
            .iter()
            .filter(|report| report.outcome == Outcome::Failed)
    }

    /// True when no probe failed and the summary reached disk.
    pub fn is_success(&self) -> bool {
        self.summary.failed == 0 && self.persist_error.is_none()
    }
}
