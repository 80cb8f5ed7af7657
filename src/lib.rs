pub mod config;
pub mod outcome;
pub mod probe;
pub mod session;

pub use config::HarnessConfig;
pub use outcome::{Outcome, OutcomeCounter, Summary};
pub use probe::{DatastoreProbe, MongoDatastore, PollApiClient, ProbeError, ProbeKind};
pub use session::{ProbeReport, Session, SessionContext, SessionReport};
