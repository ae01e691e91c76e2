use serde_json::Value;

use crate::{
    db::Store,
    error::AppError,
    models::{Collection, NewMovie},
};

/// Outcome of one ingestion batch, used for logging only
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub inserted: usize,
    /// Records whose uuid was already taken, either before the batch or by a
    /// concurrent writer
    pub skipped_duplicate: usize,
    /// Malformed records and records the store refused for other reasons
    pub rejected: usize,
}

/// Inserts the records of `raw_movies` that are not already known into `collection`.
///
/// Never fails: every per-record problem is logged and the batch continues.
/// The existence check is only an optimisation; the store's uniqueness guard
/// decides when two writers race on the same uuid.
pub async fn ingest(store: &dyn Store, collection: &Collection, raw_movies: &[Value]) -> IngestReport {
    let mut report = IngestReport::default();

    for (index, record) in raw_movies.iter().enumerate() {
        let movie = match NewMovie::from_record(record) {
            Ok(movie) => movie,
            Err(reason) => {
                tracing::warn!(
                    collection = %collection.uuid,
                    index,
                    reason = %reason,
                    "Rejecting malformed movie record"
                );
                report.rejected += 1;
                continue;
            }
        };

        match store.find_movie(movie.uuid).await {
            Ok(Some(_)) => {
                tracing::warn!(movie = %movie.uuid, "Movie already exists, skipping");
                report.skipped_duplicate += 1;
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!(movie = %movie.uuid, error = %e, "Movie lookup failed");
                report.rejected += 1;
                continue;
            }
        }

        match store.insert_movie(collection.id, &movie).await {
            Ok(_) => report.inserted += 1,
            Err(AppError::Conflict(_)) => {
                tracing::error!(
                    movie = %movie.uuid,
                    title = %movie.title,
                    "Uniqueness violation while inserting movie"
                );
                report.skipped_duplicate += 1;
            }
            Err(e) => {
                tracing::error!(
                    movie = %movie.uuid,
                    title = %movie.title,
                    error = %e,
                    "Failed to insert movie"
                );
                report.rejected += 1;
            }
        }
    }

    tracing::info!(
        collection = %collection.uuid,
        inserted = report.inserted,
        skipped_duplicate = report.skipped_duplicate,
        rejected = report.rejected,
        "Movie ingestion finished"
    );

    report
}
