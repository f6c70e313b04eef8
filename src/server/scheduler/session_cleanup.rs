use tokio_cron_scheduler::{Job, JobScheduler};
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::error::AppError;

/// Starts the expired session cleanup scheduler
///
/// Runs at the top of every hour and deletes sessions whose inactivity expiry has
/// passed.
///
/// # Arguments
/// - `store`: Session store shared with the session layer
pub async fn start_scheduler(store: SqliteStore) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let store = store.clone();

        Box::pin(async move {
            purge_expired(&store).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Session cleanup scheduler started");

    Ok(scheduler)
}

/// Deletes every expired session. Failures are logged and retried on the next run.
pub async fn purge_expired(store: &SqliteStore) {
    match store.delete_expired().await {
        Ok(()) => tracing::debug!("Expired sessions deleted"),
        Err(e) => tracing::error!("Error deleting expired sessions: {}", e),
    }
}
