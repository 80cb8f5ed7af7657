use tracing::info;

use super::SessionContext;
use crate::probe::{
    DatastoreProbe, PollApiClient, ProbeError, LOGIN_SUCCESS_MESSAGE, POLL_OPTIONS, POLL_QUESTION,
    VOTE_OPTION,
};

pub(crate) async fn login(
    client: &PollApiClient,
    username: &str,
    password: &str,
) -> Result<(), ProbeError> {
    let response = client.login(username, password).await?;
    if response.message != LOGIN_SUCCESS_MESSAGE {
        return Err(ProbeError::Assertion(format!(
            "expected login message {:?}, got {:?}",
            LOGIN_SUCCESS_MESSAGE, response.message
        )));
    }
    Ok(())
}

pub(crate) async fn create_poll(
    client: &PollApiClient,
    context: &mut SessionContext,
) -> Result<(), ProbeError> {
    let created = client.create_poll(POLL_QUESTION, &POLL_OPTIONS).await?;
    let poll = context.capture_poll(&created, VOTE_OPTION)?;
    info!(poll_id = %poll.id, baseline_votes = poll.baseline_votes, "poll created");
    Ok(())
}

pub(crate) async fn list_polls(client: &PollApiClient) -> Result<(), ProbeError> {
    let polls = client.list_polls().await?;
    if polls.is_empty() {
        return Err(ProbeError::Assertion(
            "expected at least one poll, got an empty list".to_string(),
        ));
    }
    Ok(())
}

pub(crate) async fn vote_poll(
    client: &PollApiClient,
    context: &SessionContext,
) -> Result<(), ProbeError> {
    let poll = context.poll().ok_or(ProbeError::MissingFixture("poll id"))?;
    let response = client.vote(&poll.id, VOTE_OPTION).await?;

    let expected = poll.baseline_votes + 1;
    let voted = response
        .options
        .iter()
        .find(|opt| opt.option == VOTE_OPTION)
        .ok_or_else(|| {
            ProbeError::Assertion(format!("option {:?} missing from vote response", VOTE_OPTION))
        })?;

    if voted.votes != expected {
        return Err(ProbeError::Assertion(format!(
            "expected {} vote(s) for {:?}, got {}",
            expected, VOTE_OPTION, voted.votes
        )));
    }
    Ok(())
}

pub(crate) async fn service_liveness(client: &PollApiClient) -> Result<(), ProbeError> {
    let body = client.root().await?;
    info!(url = %client.base_url(), response = %body, "service is accessible");
    Ok(())
}

pub(crate) async fn datastore_liveness<D: DatastoreProbe>(datastore: &D) -> Result<(), ProbeError> {
    let version = datastore.server_info().await.map_err(|err| match err {
        ProbeError::DatastoreUnreachable(_) => err,
        other => ProbeError::DatastoreUnreachable(other.to_string()),
    })?;
    info!(address = %datastore.address(), version = %version, "datastore is accessible");
    Ok(())
}
