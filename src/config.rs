use std::{env, path::PathBuf, time::Duration};

use anyhow::{Context, Result};

use crate::probe::ProbeKind;

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the polling service
    pub base_url: String,

    /// Credentials sent by the login probe
    pub username: String,
    pub password: String,

    /// Datastore host and port
    pub datastore_host: String,
    pub datastore_port: u16,

    /// Datastore server-selection timeout in milliseconds
    pub datastore_timeout_ms: u64,

    /// Fixed wait before the first probe, in seconds
    pub readiness_wait_secs: u64,

    /// Timeout applied to every API request, in seconds
    pub request_timeout_secs: u64,

    /// Timeout applied to the service root liveness request, in seconds
    pub liveness_timeout_secs: u64,

    /// Summary file, overwritten at the end of every session
    pub summary_path: PathBuf,

    /// Probes recorded as skipped without being executed
    pub skip_probes: Vec<ProbeKind>,

    /// Log level
    pub log_level: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            username: "admin".to_string(),
            password: "password123".to_string(),
            datastore_host: "localhost".to_string(),
            datastore_port: 27017,
            datastore_timeout_ms: 5000,
            readiness_wait_secs: 10,
            request_timeout_secs: 5,
            liveness_timeout_secs: 5,
            summary_path: PathBuf::from("test_results.txt"),
            skip_probes: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = HarnessConfig::default();

        if let Ok(url) = env::var("SMOKE_BASE_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }

        if let Ok(username) = env::var("SMOKE_USERNAME") {
            config.username = username;
        }

        if let Ok(password) = env::var("SMOKE_PASSWORD") {
            config.password = password;
        }

        if let Ok(host) = env::var("SMOKE_DATASTORE_HOST") {
            if !host.trim().is_empty() {
                config.datastore_host = host.trim().to_string();
            }
        }

        if let Ok(port) = env::var("SMOKE_DATASTORE_PORT") {
            config.datastore_port = port
                .parse::<u16>()
                .context("failed to parse SMOKE_DATASTORE_PORT as u16")?;
        }

        if let Ok(timeout) = env::var("SMOKE_DATASTORE_TIMEOUT_MS") {
            config.datastore_timeout_ms = timeout
                .parse::<u64>()
                .context("failed to parse SMOKE_DATASTORE_TIMEOUT_MS as u64")?;
        }

        if let Ok(wait) = env::var("SMOKE_READINESS_WAIT_SECS") {
            config.readiness_wait_secs = wait
                .parse::<u64>()
                .context("failed to parse SMOKE_READINESS_WAIT_SECS as u64")?;
        }

        if let Ok(timeout) = env::var("SMOKE_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = timeout
                .parse::<u64>()
                .context("failed to parse SMOKE_REQUEST_TIMEOUT_SECS as u64")?;
        }

        if let Ok(timeout) = env::var("SMOKE_LIVENESS_TIMEOUT_SECS") {
            config.liveness_timeout_secs = timeout
                .parse::<u64>()
                .context("failed to parse SMOKE_LIVENESS_TIMEOUT_SECS as u64")?;
        }

        if let Ok(path) = env::var("SMOKE_SUMMARY_PATH") {
            if !path.trim().is_empty() {
                config.summary_path = PathBuf::from(path.trim());
            }
        }

        if let Ok(list) = env::var("SMOKE_SKIP_PROBES") {
            config.skip_probes =
                parse_probe_list(&list).context("failed to parse SMOKE_SKIP_PROBES")?;
        }

        if let Ok(level) = env::var("LOG_LEVEL") {
            if !level.trim().is_empty() {
                config.log_level = level;
            }
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("SMOKE_BASE_URL cannot be empty");
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "SMOKE_BASE_URL must start with http:// or https://, got {}",
                self.base_url
            );
        }

        if self.datastore_host.is_empty() {
            anyhow::bail!("SMOKE_DATASTORE_HOST cannot be empty");
        }

        if self.datastore_timeout_ms == 0 {
            anyhow::bail!("SMOKE_DATASTORE_TIMEOUT_MS must be greater than 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("SMOKE_REQUEST_TIMEOUT_SECS must be greater than 0");
        }
        if self.liveness_timeout_secs == 0 {
            anyhow::bail!("SMOKE_LIVENESS_TIMEOUT_SECS must be greater than 0");
        }

        if self.summary_path.as_os_str().is_empty() {
            anyhow::bail!("SMOKE_SUMMARY_PATH cannot be empty");
        }

        Ok(())
    }

    pub fn readiness_wait(&self) -> Duration {
        Duration::from_secs(self.readiness_wait_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn liveness_timeout(&self) -> Duration {
        Duration::from_secs(self.liveness_timeout_secs)
    }

    pub fn datastore_timeout(&self) -> Duration {
        Duration::from_millis(self.datastore_timeout_ms)
    }

    pub fn is_skipped(&self, kind: ProbeKind) -> bool {
        self.skip_probes.contains(&kind)
    }
}

fn parse_probe_list(list: &str) -> Result<Vec<ProbeKind>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<ProbeKind>())
        .collect()
}
