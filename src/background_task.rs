use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use tokio::{fs, time::interval};

/// Periodically deletes files in the multipart temp directory that are older
/// than `max_age`. Requests clean up after themselves; this catches what a
/// crashed or aborted request left behind.
pub async fn start_temp_sweep_task(temp_dir: PathBuf, every: Duration, max_age: Duration) {
    let mut interval = interval(every);

    loop {
        interval.tick().await;

        match purge_stale_temp_files(&temp_dir, max_age).await {
            Ok(0) => tracing::debug!("Temp sweep found nothing to purge"),
            Ok(count) => tracing::info!("Purged {} stale temp files", count),
            Err(e) => tracing::error!("Temp sweep failed: {}", e),
        }
    }
}

pub async fn purge_stale_temp_files(temp_dir: &Path, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let mut entries = fs::read_dir(temp_dir).await?;
    let mut purged = 0;

    while let Some(entry) = entries.next_entry().await? {
        let meta = entry.metadata().await?;
        if !meta.is_file() {
            continue;
        }

        let age = meta
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .unwrap_or_default();

        if age >= max_age {
            match fs::remove_file(entry.path()).await {
                Ok(()) => purged += 1,
                Err(e) => tracing::warn!("Failed to purge {}: {}", entry.path().display(), e),
            }
        }
    }

    Ok(purged)
}
