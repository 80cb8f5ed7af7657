mod client;
mod datastore;
mod error;

pub use client::{CreatedPoll, LoginResponse, PollApiClient, PollOption, VoteResponse};
pub use datastore::{DatastoreProbe, MongoDatastore};
pub use error::ProbeError;

use std::fmt;
use std::str::FromStr;

pub const LOGIN_PATH: &str = "/auth/login";
pub const POLLS_PATH: &str = "/polls";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

pub const POLL_QUESTION: &str = "Favorite color?";
pub const POLL_OPTIONS: [&str; 3] = ["Red", "Blue", "Green"];
pub const VOTE_OPTION: &str = "Red";

/// The probes a session runs, in declared execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeKind {
    Login,
    CreatePoll,
    ListPolls,
    VotePoll,
    ServiceLiveness,
    DatastoreLiveness,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 6] = [
        ProbeKind::Login,
        ProbeKind::CreatePoll,
        ProbeKind::ListPolls,
        ProbeKind::VotePoll,
        ProbeKind::ServiceLiveness,
        ProbeKind::DatastoreLiveness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::Login => "login",
            ProbeKind::CreatePoll => "create_poll",
            ProbeKind::ListPolls => "list_polls",
            ProbeKind::VotePoll => "vote_poll",
            ProbeKind::ServiceLiveness => "service_liveness",
            ProbeKind::DatastoreLiveness => "datastore_liveness",
        }
    }

    /// Label printed on the per-probe console line.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeKind::Login => "TestLogin",
            ProbeKind::CreatePoll => "TestCreatePoll",
            ProbeKind::ListPolls => "TestGetPolls",
            ProbeKind::VotePoll => "TestVotePoll",
            ProbeKind::ServiceLiveness => "TestNodeService",
            ProbeKind::DatastoreLiveness => "TestMongoDB",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbeKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        ProbeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown probe: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_kind_from_str() {
        assert_eq!("login".parse::<ProbeKind>().unwrap(), ProbeKind::Login);
        assert_eq!(
            "DATASTORE_LIVENESS".parse::<ProbeKind>().unwrap(),
            ProbeKind::DatastoreLiveness
        );
        assert!("cast_vote".parse::<ProbeKind>().is_err());
    }

    #[test]
    fn test_declared_order() {
        let names: Vec<_> = ProbeKind::ALL.iter().map(ProbeKind::as_str).collect();
        assert_eq!(
            names,
            vec![
                "login",
                "create_poll",
                "list_polls",
                "vote_poll",
                "service_liveness",
                "datastore_liveness"
            ]
        );
    }
}
