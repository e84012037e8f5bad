use crate::dtos::{CreatePaymentRequest, ListParams, ListResponse, PaymentResponse};
use crate::middleware::StaffId;
use crate::models::Payment;
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
pub async fn create_payment(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut payment = request.into_payment(staff.0);
    state.repo.insert_coded(&mut payment).await?;

    tracing::info!(
        payment_id = payment.payment_id.as_deref().unwrap_or_default(),
        amount = %payment.amount,
        "Payment received"
    );

    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

#[tracing::instrument(skip_all)]
pub async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<PaymentResponse>>, AppError> {
    let mut filter = doc! {};
    if let Some(status) = params.status.as_deref() {
        filter.insert("status", status);
    }
    if let Some(patient_id) = params.patient_id.as_deref() {
        filter.insert("patientId", patient_id);
    }

    let page = state
        .repo
        .list::<Payment>(filter, params.skip(), params.page_size())
        .await?;

    let data = page.items.into_iter().map(PaymentResponse::from).collect();

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(payment_id = %id))]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PaymentResponse>, AppError> {
    let payment: Payment = state.repo.get(&id).await?;
    Ok(Json(PaymentResponse::from(payment)))
}
