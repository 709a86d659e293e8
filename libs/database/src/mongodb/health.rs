use mongodb::{Client, bson::doc};
use std::time::Duration;

use crate::common::{DatabaseError, DatabaseResult};

/// Upper bound on a single health probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Check MongoDB health with a `ping` against `database`
pub async fn check_health(client: &Client, database: &str) -> DatabaseResult<()> {
    let db = client.database(database);
    let probe = db.run_command(doc! { "ping": 1 });

    match tokio::time::timeout(PROBE_TIMEOUT, probe).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(DatabaseError::HealthCheckFailed(e.to_string())),
        Err(_) => Err(DatabaseError::HealthCheckFailed(format!(
            "ping timed out after {:?}",
            PROBE_TIMEOUT
        ))),
    }
}
