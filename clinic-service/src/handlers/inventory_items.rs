use crate::dtos::{
    CreateInventoryItemRequest, InventoryItemResponse, ListParams, ListResponse,
    UpdateInventoryItemRequest,
};
use crate::middleware::StaffId;
use crate::models::{needs_reorder, stock_value, InventoryItem};
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
pub async fn create_item(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreateInventoryItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut item = request.into_item(staff.0);
    stock_value(&item)?;
    state.repo.insert_coded(&mut item).await?;

    Ok((StatusCode::CREATED, Json(InventoryItemResponse::try_from(item)?)))
}

#[tracing::instrument(skip_all)]
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<InventoryItemResponse>>, AppError> {
    let mut filter = doc! {};
    if let Some(category) = params.category.as_deref() {
        filter.insert("category", category);
    }
    if params.low_stock == Some(true) {
        filter.insert("$expr", doc! { "$lte": ["$quantity", "$reorderLevel"] });
    }

    let page = state
        .repo
        .list::<InventoryItem>(filter, params.skip(), params.page_size())
        .await?;
    let data = page
        .items
        .into_iter()
        .map(InventoryItemResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(item_id = %id))]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InventoryItemResponse>, AppError> {
    let item: InventoryItem = state.repo.get(&id).await?;
    Ok(Json(InventoryItemResponse::try_from(item)?))
}

#[tracing::instrument(skip_all, fields(item_id = %id))]
pub async fn update_item(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateInventoryItemRequest>,
) -> Result<Json<InventoryItemResponse>, AppError> {
    let mut item: InventoryItem = state.repo.get(&id).await?;
    request.apply(&mut item);
    stock_value(&item)?;
    state.repo.replace(&mut item).await?;

    if needs_reorder(&item) {
        tracing::warn!(
            sku = item.sku.as_deref().unwrap_or_default(),
            quantity = item.quantity,
            reorder_level = item.reorder_level,
            "Stock at or below reorder level"
        );
    }

    Ok(Json(InventoryItemResponse::try_from(item)?))
}
