use crate::dtos::{
    treatment_status_filter, AddSessionRequest, CreateTreatmentRequest, ListParams, ListResponse,
    TreatmentResponse, UpdateTreatmentRequest,
};
use crate::middleware::StaffId;
use crate::models::{refresh_payment_status, Treatment, TreatmentStatus};
use crate::progress::{treatment_progress, TreatmentProgress};
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
pub async fn create_treatment(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreateTreatmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut treatment = request.into_treatment(staff.0);
    refresh_payment_status(&mut treatment);
    state.repo.insert(&treatment).await?;

    Ok((StatusCode::CREATED, Json(TreatmentResponse::from(treatment))))
}

#[tracing::instrument(skip_all)]
pub async fn list_treatments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<TreatmentResponse>>, AppError> {
    let mut filter = doc! {};
    if let Some(status) = params.status.as_deref() {
        filter.insert("status", treatment_status_filter(status));
    }
    if let Some(patient_id) = params.patient_id.as_deref() {
        filter.insert("patientId", patient_id);
    }

    let page = state
        .repo
        .list::<Treatment>(filter, params.skip(), params.page_size())
        .await?;

    let data = page.items.into_iter().map(TreatmentResponse::from).collect();

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(treatment_id = %id))]
pub async fn get_treatment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TreatmentResponse>, AppError> {
    let treatment: Treatment = state.repo.get(&id).await?;
    Ok(Json(TreatmentResponse::from(treatment)))
}

#[tracing::instrument(skip_all, fields(treatment_id = %id))]
pub async fn update_treatment(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateTreatmentRequest>,
) -> Result<Json<TreatmentResponse>, AppError> {
    let mut treatment: Treatment = state.repo.get(&id).await?;
    request.apply(&mut treatment);
    refresh_payment_status(&mut treatment);
    state.repo.replace(&mut treatment).await?;

    Ok(Json(TreatmentResponse::from(treatment)))
}

/// Record a visit. The first visit moves a planned treatment to in-progress.
#[tracing::instrument(skip_all, fields(treatment_id = %id))]
pub async fn add_session(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AddSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut treatment: Treatment = state.repo.get(&id).await?;
    if treatment.status == TreatmentStatus::Cancelled {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Treatment {} is cancelled",
            treatment.id
        )));
    }

    treatment.sessions.push(request.into_session());
    if treatment.status == TreatmentStatus::Planned {
        treatment.status = TreatmentStatus::InProgress;
    }
    state.repo.replace(&mut treatment).await?;

    tracing::info!(
        sessions = treatment.sessions.len(),
        planned = treatment.planned_sessions,
        status = treatment.status.as_str(),
        "Treatment session recorded"
    );

    Ok((StatusCode::CREATED, Json(TreatmentResponse::from(treatment))))
}

#[tracing::instrument(skip_all, fields(treatment_id = %id))]
pub async fn get_progress(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TreatmentProgress>, AppError> {
    let treatment: Treatment = state.repo.get(&id).await?;
    Ok(Json(treatment_progress(&treatment)))
}
