use super::financial;
use crate::dtos::{
    payment_status_filter, CreateExpenseRequest, ExpenseResponse, ListParams, ListResponse,
    ManualStatusRequest, UpdateExpenseRequest,
};
use crate::middleware::StaffId;
use crate::models::Expense;
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
pub async fn create_expense(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreateExpenseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut expense = request.into_expense(staff.0);
    state.repo.insert_financial(&mut expense).await?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(expense))))
}

#[tracing::instrument(skip_all)]
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<ExpenseResponse>>, AppError> {
    let mut filter = doc! {};
    if let Some(status) = params.status.as_deref() {
        filter.insert("status", payment_status_filter(status));
    }
    if let Some(category) = params.category.as_deref() {
        filter.insert("category", category);
    }

    let page = state
        .repo
        .list::<Expense>(filter, params.skip(), params.page_size())
        .await?;

    let data = page.items.into_iter().map(ExpenseResponse::from).collect();

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(expense_id = %id))]
pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let expense: Expense = state.repo.get(&id).await?;
    Ok(Json(ExpenseResponse::from(expense)))
}

#[tracing::instrument(skip_all, fields(expense_id = %id))]
pub async fn update_expense(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let expense = financial::edit(&state.repo, &id, |expense: &mut Expense| {
        request.apply(expense)
    })
    .await?;
    Ok(Json(ExpenseResponse::from(expense)))
}

#[tracing::instrument(skip_all, fields(expense_id = %id))]
pub async fn set_expense_status(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ManualStatusRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let expense = financial::set_status::<Expense>(&state.repo, &id, request.status).await?;
    Ok(Json(ExpenseResponse::from(expense)))
}
