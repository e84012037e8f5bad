use super::financial;
use crate::dtos::{
    payment_status_filter, CreateInventoryOrderRequest, InventoryOrderResponse, ListParams,
    ListResponse, ManualStatusRequest, UpdateInventoryOrderRequest,
};
use crate::middleware::StaffId;
use crate::models::InventoryOrder;
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
pub async fn create_order(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreateInventoryOrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut order = request.into_order(staff.0);
    state.repo.insert_financial(&mut order).await?;

    Ok((StatusCode::CREATED, Json(InventoryOrderResponse::from(order))))
}

#[tracing::instrument(skip_all)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<InventoryOrderResponse>>, AppError> {
    let mut filter = doc! {};
    if let Some(status) = params.status.as_deref() {
        filter.insert("status", status);
    }
    if let Some(status) = params.payment_status.as_deref() {
        filter.insert("paymentStatus", payment_status_filter(status));
    }

    let page = state
        .repo
        .list::<InventoryOrder>(filter, params.skip(), params.page_size())
        .await?;

    let data = page.items.into_iter().map(InventoryOrderResponse::from).collect();

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(order_id = %id))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InventoryOrderResponse>, AppError> {
    let order: InventoryOrder = state.repo.get(&id).await?;
    Ok(Json(InventoryOrderResponse::from(order)))
}

#[tracing::instrument(skip_all, fields(order_id = %id))]
pub async fn update_order(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateInventoryOrderRequest>,
) -> Result<Json<InventoryOrderResponse>, AppError> {
    let order = financial::edit(&state.repo, &id, |order: &mut InventoryOrder| {
        request.apply(order)
    })
    .await?;
    Ok(Json(InventoryOrderResponse::from(order)))
}

#[tracing::instrument(skip_all, fields(order_id = %id))]
pub async fn set_order_payment_status(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ManualStatusRequest>,
) -> Result<Json<InventoryOrderResponse>, AppError> {
    let order = financial::set_status::<InventoryOrder>(&state.repo, &id, request.status).await?;
    Ok(Json(InventoryOrderResponse::from(order)))
}
