use super::financial;
use crate::dtos::{
    payment_status_filter, ClaimResponse, CreateClaimRequest, ListParams, ListResponse,
    UpdateClaimRequest,
};
use crate::middleware::StaffId;
use crate::models::InsuranceClaim;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mongodb::bson::doc;
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

#[tracing::instrument(skip_all)]
pub async fn create_claim(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreateClaimRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut claim = request.into_claim(staff.0);
    state.repo.insert_financial(&mut claim).await?;

    Ok((StatusCode::CREATED, Json(ClaimResponse::from(claim))))
}

#[tracing::instrument(skip_all)]
pub async fn list_claims(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<ClaimResponse>>, AppError> {
    let mut filter = doc! {};
    if let Some(status) = params.status.as_deref() {
        filter.insert("status", status);
    }
    if let Some(status) = params.payment_status.as_deref() {
        filter.insert("paymentStatus", payment_status_filter(status));
    }
    if let Some(patient_id) = params.patient_id.as_deref() {
        filter.insert("patientId", patient_id);
    }

    let page = state
        .repo
        .list::<InsuranceClaim>(filter, params.skip(), params.page_size())
        .await?;

    let data = page.items.into_iter().map(ClaimResponse::from).collect();

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(claim_id = %id))]
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimResponse>, AppError> {
    let claim: InsuranceClaim = state.repo.get(&id).await?;
    Ok(Json(ClaimResponse::from(claim)))
}

/// Review outcomes and insurer settlements arrive through this route; the
/// approved amount replaces the claimed amount as the payable total.
#[tracing::instrument(skip_all, fields(claim_id = %id))]
pub async fn update_claim(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateClaimRequest>,
) -> Result<Json<ClaimResponse>, AppError> {
    let claim = financial::edit(&state.repo, &id, |claim: &mut InsuranceClaim| {
        request.apply(claim)
    })
    .await?;
    Ok(Json(ClaimResponse::from(claim)))
}
