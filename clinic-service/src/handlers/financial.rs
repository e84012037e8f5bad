//! Edit and status operations shared by every financial document route.

use super::status_conflict;
use crate::finance::{apply_manual_status, ensure_open, FinancialDocument, ManualStatus};
use crate::models::Record;
use crate::services::Repository;
use service_core::error::AppError;

/// Load, apply `change`, recompute and store. Cancelled documents are read-only.
pub(crate) async fn edit<T, F>(repo: &Repository, id: &str, change: F) -> Result<T, AppError>
where
    T: Record + FinancialDocument,
    F: FnOnce(&mut T),
{
    let mut document: T = repo.get(id).await?;
    ensure_open(*document.ledger().status).map_err(status_conflict)?;

    change(&mut document);
    repo.replace_financial(&mut document).await?;
    Ok(document)
}

/// Set `overdue` or `cancelled` by hand.
pub(crate) async fn set_status<T>(
    repo: &Repository,
    id: &str,
    requested: ManualStatus,
) -> Result<T, AppError>
where
    T: Record + FinancialDocument,
{
    let mut document: T = repo.get(id).await?;
    let current = *document.ledger().status;
    let next = apply_manual_status(current, requested).map_err(status_conflict)?;

    tracing::info!(
        collection = T::COLLECTION,
        id = id,
        from = current.as_str(),
        to = next.as_str(),
        "Manual status change"
    );

    *document.ledger().status = next;
    repo.replace_financial(&mut document).await?;
    Ok(document)
}
