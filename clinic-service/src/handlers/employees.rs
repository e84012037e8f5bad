use crate::dtos::{
    CreateEmployeeRequest, EmployeeResponse, ListParams, ListResponse, UpdateEmployeeRequest,
};
use crate::middleware::StaffId;
use crate::models::Employee;
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
pub async fn create_employee(
    State(state): State<AppState>,
    staff: StaffId,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut employee = request.into_employee(staff.0);
    state.repo.insert_coded(&mut employee).await?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

#[tracing::instrument(skip_all)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<EmployeeResponse>>, AppError> {
    let mut filter = doc! {};
    if let Some(role) = params.role.as_deref() {
        filter.insert("role", role);
    }

    let page = state
        .repo
        .list::<Employee>(filter, params.skip(), params.page_size())
        .await?;
    let data = page.items.into_iter().map(EmployeeResponse::from).collect();

    Ok(Json(ListResponse::new(data, page.total, &params)))
}

#[tracing::instrument(skip_all, fields(employee_id = %id))]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee: Employee = state.repo.get(&id).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

#[tracing::instrument(skip_all, fields(employee_id = %id))]
pub async fn update_employee(
    State(state): State<AppState>,
    _staff: StaffId,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let mut employee: Employee = state.repo.get(&id).await?;
    request.apply(&mut employee);
    state.repo.replace(&mut employee).await?;

    Ok(Json(EmployeeResponse::from(employee)))
}
