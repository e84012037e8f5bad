use super::financial;
use crate::dtos::{
    CreatePrescriptionRequest, ListParams, ListResponse, PrescriptionResponse,
    UpdatePrescriptionRequest,
};
use crate::middleware::StaffId;
use crate::models::Prescription;
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
pub async fn create_prescription(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreatePrescriptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut prescription = request.into_prescription(staff.0);
    state.repo.insert_financial(&mut prescription).await?;

    Ok((StatusCode::CREATED, Json(PrescriptionResponse::from(prescription))))
}

#[tracing::instrument(skip_all)]
pub async fn list_prescriptions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<PrescriptionResponse>>, AppError> {
    let mut filter = doc! {};
    if let Some(patient_id) = params.patient_id.as_deref() {
        filter.insert("patientId", patient_id);
    }

    let page = state
        .repo
        .list::<Prescription>(filter, params.skip(), params.page_size())
        .await?;

    let data = page.items.into_iter().map(PrescriptionResponse::from).collect();

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(prescription_id = %id))]
pub async fn get_prescription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PrescriptionResponse>, AppError> {
    let prescription: Prescription = state.repo.get(&id).await?;
    Ok(Json(PrescriptionResponse::from(prescription)))
}

#[tracing::instrument(skip_all, fields(prescription_id = %id))]
pub async fn update_prescription(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePrescriptionRequest>,
) -> Result<Json<PrescriptionResponse>, AppError> {
    let prescription = financial::edit(&state.repo, &id, |prescription: &mut Prescription| {
        request.apply(prescription)
    })
    .await?;
    Ok(Json(PrescriptionResponse::from(prescription)))
}
