use std::net::TcpListener;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use poll_smoke_harness::{DatastoreProbe, MongoDatastore, ProbeError};

fn unused_port() -> Result<u16> {
    let port = TcpListener::bind("127.0.0.1:0")
        .context("binding to ephemeral port")?
        .local_addr()
        .context("reading socket address")?
        .port();
    Ok(port)
}

#[tokio::test]
async fn closed_port_is_reported_as_datastore_unreachable() -> Result<()> {
    let datastore = MongoDatastore::new("127.0.0.1", unused_port()?, Duration::from_millis(300));

    let start = Instant::now();
    let result = datastore.server_info().await;

    match result {
        Err(ProbeError::DatastoreUnreachable(message)) => assert!(!message.is_empty()),
        other => bail!("expected datastore unreachable, got {:?}", other),
    }
    // Bounded by the selection timeout, not the driver's 30s default
    assert!(start.elapsed() < Duration::from_secs(10));
    Ok(())
}
