use super::financial;
use crate::dtos::{
    payment_status_filter, BillingResponse, CreateBillingRequest, ListParams, ListResponse,
    ManualStatusRequest, RecordPaymentRequest, UpdateBillingRequest,
};
use crate::finance::add_payment;
use crate::middleware::StaffId;
use crate::models::Billing;
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
pub async fn create_billing(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreateBillingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut billing = request.into_billing(staff.0);
    state.repo.insert_financial(&mut billing).await?;

    Ok((StatusCode::CREATED, Json(BillingResponse::from(billing))))
}

#[tracing::instrument(skip_all)]
pub async fn list_billings(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<BillingResponse>>, AppError> {
    let mut filter = doc! {};
    if let Some(status) = params.status.as_deref() {
        filter.insert("status", payment_status_filter(status));
    }
    if let Some(patient_id) = params.patient_id.as_deref() {
        filter.insert("patientId", patient_id);
    }

    let page = state
        .repo
        .list::<Billing>(filter, params.skip(), params.page_size())
        .await?;
    let data = page.items.into_iter().map(BillingResponse::from).collect();

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(billing_id = %id))]
pub async fn get_billing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BillingResponse>, AppError> {
    let billing: Billing = state.repo.get(&id).await?;
    Ok(Json(BillingResponse::from(billing)))
}

#[tracing::instrument(skip_all, fields(billing_id = %id))]
pub async fn update_billing(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateBillingRequest>,
) -> Result<Json<BillingResponse>, AppError> {
    let billing = financial::edit(&state.repo, &id, |billing: &mut Billing| {
        request.apply(billing)
    })
    .await?;
    Ok(Json(BillingResponse::from(billing)))
}

/// Add a received amount to the invoice. Overpayment is clamped to the total.
#[tracing::instrument(skip_all, fields(billing_id = %id))]
pub async fn record_payment(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<RecordPaymentRequest>,
) -> Result<Json<BillingResponse>, AppError> {
    let amount = request.amount;
    let billing = financial::edit(&state.repo, &id, |billing: &mut Billing| {
        billing.paid_amount = add_payment(billing.paid_amount, amount);
        if let Some(method) = request.payment_method {
            billing.payment_method = Some(method);
        }
    })
    .await?;

    tracing::info!(
        amount = %amount,
        paid_amount = %billing.paid_amount,
        status = billing.status.as_str(),
        "Payment recorded against invoice"
    );

    Ok(Json(BillingResponse::from(billing)))
}

#[tracing::instrument(skip_all, fields(billing_id = %id))]
pub async fn set_billing_status(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ManualStatusRequest>,
) -> Result<Json<BillingResponse>, AppError> {
    let billing = financial::set_status::<Billing>(&state.repo, &id, request.status).await?;
    Ok(Json(BillingResponse::from(billing)))
}
