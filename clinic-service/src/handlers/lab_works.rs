use super::financial;
use crate::dtos::{
    payment_status_filter, CreateLabWorkRequest, LabWorkResponse, ListParams, ListResponse,
    UpdateLabWorkRequest,
};
use crate::middleware::StaffId;
use crate::models::LabWork;
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
pub async fn create_lab_work(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreateLabWorkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut work = request.into_lab_work(staff.0);
    state.repo.insert_financial(&mut work).await?;

    Ok((StatusCode::CREATED, Json(LabWorkResponse::from(work))))
}

#[tracing::instrument(skip_all)]
pub async fn list_lab_works(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<LabWorkResponse>>, AppError> {
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
        .list::<LabWork>(filter, params.skip(), params.page_size())
        .await?;

    let data = page.items.into_iter().map(LabWorkResponse::from).collect();

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(lab_work_id = %id))]
pub async fn get_lab_work(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LabWorkResponse>, AppError> {
    let work: LabWork = state.repo.get(&id).await?;
    Ok(Json(LabWorkResponse::from(work)))
}

#[tracing::instrument(skip_all, fields(lab_work_id = %id))]
pub async fn update_lab_work(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateLabWorkRequest>,
) -> Result<Json<LabWorkResponse>, AppError> {
    let work = financial::edit(&state.repo, &id, |work: &mut LabWork| request.apply(work)).await?;
    Ok(Json(LabWorkResponse::from(work)))
}
