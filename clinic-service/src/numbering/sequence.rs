//! Atomic per-kind sequence numbers backed by a `counters` collection.

use super::DocumentKind;
use mongodb::{
    bson::{doc, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use service_core::error::{is_duplicate_key, AppError};

pub const COUNTERS_COLLECTION: &str = "counters";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    #[serde(rename = "_id")]
    pub id: String,
    pub seq: i64,
}

/// Hands out strictly increasing sequence numbers per [`DocumentKind`].
///
/// A counter is seeded from the number of documents already in the kind's
/// collection the first time it is used, so the first value handed out is
/// `count + 1`. After that only `$inc` moves it, which makes concurrent
/// creations and earlier deletions unable to produce a repeated number.
#[derive(Clone)]
pub struct SequenceAllocator {
    db: Database,
}

impl SequenceAllocator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn counters(&self) -> Collection<Counter> {
        self.db.collection(COUNTERS_COLLECTION)
    }

    #[tracing::instrument(skip(self), fields(kind = kind.as_str()))]
    pub async fn next(&self, kind: DocumentKind, collection: &str) -> Result<u64, AppError> {
        self.ensure_seeded(kind, collection).await?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters()
            .find_one_and_update(
                doc! { "_id": kind.as_str() },
                doc! { "$inc": { "seq": 1_i64 } },
                options,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to advance {} counter: {}", kind.as_str(), e);
                AppError::from(e)
            })?
            .ok_or_else(|| {
                AppError::InternalError(anyhow::anyhow!(
                    "Counter for {} disappeared after seeding",
                    kind.as_str()
                ))
            })?;

        u64::try_from(counter.seq).map_err(|_| {
            AppError::InternalError(anyhow::anyhow!(
                "Counter for {} holds a negative value",
                kind.as_str()
            ))
        })
    }

    async fn ensure_seeded(&self, kind: DocumentKind, collection: &str) -> Result<(), AppError> {
        let existing = self
            .counters()
            .find_one(doc! { "_id": kind.as_str() }, None)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        let count = self
            .db
            .collection::<Document>(collection)
            .count_documents(doc! {}, None)
            .await?;

        let seed = Counter {
            id: kind.as_str().to_string(),
            seq: i64::try_from(count).unwrap_or(i64::MAX),
        };

        match self.counters().insert_one(&seed, None).await {
            Ok(_) => {
                tracing::info!(kind = kind.as_str(), seq = seed.seq, "Seeded sequence counter");
                Ok(())
            }
            // Another writer seeded it between our read and insert.
            Err(e) if is_duplicate_key(&e) => Ok(()),
            Err(e) => Err(AppError::from(e)),
        }
    }
}
