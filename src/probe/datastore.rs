use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;
use tracing::{debug, info, instrument};

use super::ProbeError;

/// Liveness check against the datastore backing the polling service.
#[async_trait]
pub trait DatastoreProbe: Send + Sync {
    /// Connects and requests server info. Returns the reported server
    /// version, or `"unknown"` when the reply carries none.
    async fn server_info(&self) -> Result<String, ProbeError>;

    fn address(&self) -> String;
}

pub struct MongoDatastore {
    host: String,
    port: u16,
    selection_timeout: Duration,
}

impl MongoDatastore {
    pub fn new(host: impl Into<String>, port: u16, selection_timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            selection_timeout,
        }
    }

    fn connection_uri(&self) -> String {
        format!("mongodb://{}:{}", self.host, self.port)
    }
}

#[async_trait]
impl DatastoreProbe for MongoDatastore {
    #[instrument(skip(self), fields(address = %self.address()))]
    async fn server_info(&self) -> Result<String, ProbeError> {
        let mut options = ClientOptions::parse(self.connection_uri())
            .await
            .map_err(|e| ProbeError::DatastoreUnreachable(e.to_string()))?;
        options.server_selection_timeout = Some(self.selection_timeout);
        options.connect_timeout = Some(self.selection_timeout);
        options.app_name = Some("poll-smoke".to_string());

        let client = Client::with_options(options)
            .map_err(|e| ProbeError::DatastoreUnreachable(e.to_string()))?;

        debug!("Requesting datastore build info");
        let reply = client
            .database("admin")
            .run_command(doc! { "buildInfo": 1 })
            .await
            .map_err(|e| ProbeError::DatastoreUnreachable(e.to_string()))?;

        let version = reply
            .get_str("version")
            .map(str::to_string)
            .unwrap_or_else(|_| "unknown".to_string());
        info!(version = %version, "Datastore answered build info");

        Ok(version)
    }

    fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_uri() {
        let store = MongoDatastore::new("localhost", 27017, Duration::from_millis(5000));
        assert_eq!(store.connection_uri(), "mongodb://localhost:27017");
        assert_eq!(store.address(), "localhost:27017");
    }
}
