use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{ProbeError, LOGIN_PATH, POLLS_PATH};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePollRequest<'a> {
    pub question: &'a str,
    pub options: &'a [&'a str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub option: String,
    #[serde(default)]
    pub votes: u64,
}

/// Creation response. The identifier may be any JSON scalar and is checked
/// when the poll is captured; some deployments also echo the stored options
/// with their initial counts.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPoll {
    #[serde(rename = "_id", default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub options: Vec<PollOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteRequest<'a> {
    pub option: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteResponse {
    pub options: Vec<PollOption>,
}

/// Thin client over the polling service's HTTP API.
pub struct PollApiClient {
    http_client: Client,
    base_url: String,
    liveness_timeout: Duration,
}

impl PollApiClient {
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        liveness_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http_client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            liveness_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ProbeError> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        debug!("Posting credentials to {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        decode(expect_status(response, StatusCode::OK).await?).await
    }

    #[instrument(skip(self, options))]
    pub async fn create_poll(
        &self,
        question: &str,
        options: &[&str],
    ) -> Result<CreatedPoll, ProbeError> {
        let url = format!("{}{}", self.base_url, POLLS_PATH);
        debug!("Creating poll at {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&CreatePollRequest { question, options })
            .send()
            .await?;

        decode(expect_status(response, StatusCode::CREATED).await?).await
    }

    #[instrument(skip(self))]
    pub async fn list_polls(&self) -> Result<Vec<serde_json::Value>, ProbeError> {
        let url = format!("{}{}", self.base_url, POLLS_PATH);
        debug!("Listing polls at {}", url);

        let response = self.http_client.get(&url).send().await?;

        decode(expect_status(response, StatusCode::OK).await?).await
    }

    #[instrument(skip(self))]
    pub async fn vote(&self, poll_id: &str, option: &str) -> Result<VoteResponse, ProbeError> {
        let url = format!("{}{}/{}/vote", self.base_url, POLLS_PATH, poll_id);
        debug!("Casting vote at {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&VoteRequest { option })
            .send()
            .await?;

        decode(expect_status(response, StatusCode::OK).await?).await
    }

    /// Bare GET on the service root. Returns the response text on 200.
    #[instrument(skip(self))]
    pub async fn root(&self) -> Result<String, ProbeError> {
        let url = format!("{}/", self.base_url);
        debug!("Checking service root at {}", url);

        let response = self
            .http_client
            .get(&url)
            .timeout(self.liveness_timeout)
            .send()
            .await?;

        let response = expect_status(response, StatusCode::OK).await?;
        Ok(response.text().await?)
    }
}

async fn expect_status(response: Response, expected: StatusCode) -> Result<Response, ProbeError> {
    let actual = response.status();
    if actual == expected {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProbeError::UnexpectedStatus {
        expected,
        actual,
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProbeError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ProbeError::InvalidResponse(format!("Failed to parse response body: {}", e)))
}
