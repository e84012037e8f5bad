//! Write path shared by every record type.
//!
//! Codes are allocated and financial fields recomputed here, immediately
//! before the single insert or replace that stores the record.

use super::database::ClinicDb;
use super::metrics::{record_code_generated, record_document_written};
use crate::finance::{normalize, FinancialDocument};
use crate::models::Record;
use crate::numbering::{Coded, SequenceAllocator};
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use service_core::error::AppError;

/// Label used for records without a payment status.
const UNTRACKED_STATUS: &str = "recorded";

#[derive(Clone)]
pub struct Repository {
    db: ClinicDb,
    sequences: SequenceAllocator,
}

/// One page of a listing plus the size of the whole result set.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl Repository {
    pub fn new(db: ClinicDb) -> Self {
        let sequences = SequenceAllocator::new(db.database().clone());
        Self { db, sequences }
    }

    #[tracing::instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn get<T: Record>(&self, id: &str) -> Result<T, AppError> {
        self.db
            .collection::<T>()
            .find_one(doc! { "_id": id }, None)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("{} record {} not found", T::COLLECTION, id))
            })
    }

    /// Newest first.
    #[tracing::instrument(skip(self, filter), fields(collection = T::COLLECTION))]
    pub async fn list<T: Record>(
        &self,
        filter: Document,
        skip: u64,
        limit: u64,
    ) -> Result<Page<T>, AppError> {
        let collection = self.db.collection::<T>();
        let total = collection.count_documents(filter.clone(), None).await?;

        let find_options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .build();

        let mut cursor = collection.find(filter, find_options).await?;
        let mut items = Vec::new();
        while let Some(record) = cursor.try_next().await? {
            items.push(record);
        }

        Ok(Page { items, total })
    }

    #[tracing::instrument(skip(self, record), fields(collection = T::COLLECTION, id = record.id()))]
    pub async fn insert<T: Record>(&self, record: &T) -> Result<(), AppError> {
        self.db
            .collection::<T>()
            .insert_one(record, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to insert {} into {}: {}",
                    record.id(),
                    T::COLLECTION,
                    e
                );
                AppError::from(e)
            })?;
        record_document_written(T::COLLECTION, UNTRACKED_STATUS);
        Ok(())
    }

    /// Insert a record that carries a generated code.
    pub async fn insert_coded<T: Record + Coded>(&self, record: &mut T) -> Result<(), AppError> {
        self.assign_code(record).await?;
        self.insert(record).await
    }

    /// Normalise, assign a code, then insert. A document whose amounts
    /// overflow is rejected before it consumes a code.
    pub async fn insert_financial<T>(&self, document: &mut T) -> Result<(), AppError>
    where
        T: Record + FinancialDocument,
    {
        normalize(document)?;
        self.assign_code(document).await?;
        let status = document.ledger().status.as_str();

        self.db
            .collection::<T>()
            .insert_one(&*document, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to insert {} into {}: {}",
                    document.id(),
                    T::COLLECTION,
                    e
                );
                AppError::from(e)
            })?;

        tracing::info!(
            collection = T::COLLECTION,
            id = document.id(),
            code = document.code().unwrap_or_default(),
            status,
            "Financial document created"
        );
        record_document_written(T::COLLECTION, status);
        Ok(())
    }

    /// Replace a stored record with `record`, bumping `updatedAt`.
    #[tracing::instrument(skip(self, record), fields(collection = T::COLLECTION, id = record.id()))]
    pub async fn replace<T: Record>(&self, record: &mut T) -> Result<(), AppError> {
        record.touch();
        self.replace_one(record).await?;
        record_document_written(T::COLLECTION, UNTRACKED_STATUS);
        Ok(())
    }

    /// Normalise and replace. Every edit of a financial document goes here.
    #[tracing::instrument(skip(self, document), fields(collection = T::COLLECTION, id = document.id()))]
    pub async fn replace_financial<T>(&self, document: &mut T) -> Result<(), AppError>
    where
        T: Record + FinancialDocument,
    {
        normalize(document)?;
        document.touch();
        self.replace_one(document).await?;
        record_document_written(T::COLLECTION, document.ledger().status.as_str());
        Ok(())
    }

    async fn replace_one<T: Record>(&self, record: &T) -> Result<(), AppError> {
        let result = self
            .db
            .collection::<T>()
            .replace_one(doc! { "_id": record.id() }, record, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to update {} in {}: {}",
                    record.id(),
                    T::COLLECTION,
                    e
                );
                AppError::from(e)
            })?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(anyhow::anyhow!(
                "{} record {} not found",
                T::COLLECTION,
                record.id()
            )));
        }
        Ok(())
    }

    /// Generate a code when the record has none. Existing codes are kept.
    async fn assign_code<T: Record + Coded>(&self, record: &mut T) -> Result<(), AppError> {
        if record.code().is_some() {
            return Ok(());
        }

        let sequence = self.sequences.next(T::KIND, T::COLLECTION).await?;
        let code = T::KIND.format().render(sequence, Utc::now().date_naive());
        tracing::debug!(kind = T::KIND.as_str(), code = %code, "Generated document code");
        record.assign_code(code);
        record_code_generated(T::KIND.as_str());
        Ok(())
    }
}
