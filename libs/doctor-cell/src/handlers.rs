use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::extractor::ForwardedToken;

use crate::models::{DoctorAvailabilityResponse, DoctorError};
use crate::services::{availability::AvailabilityService, doctor::DoctorService};

#[derive(Debug, Deserialize)]
pub struct DoctorListQuery {
    pub department: Option<String>,
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(id) => AppError::NotFound(format!("Doctor not found: {}", id)),
            DoctorError::InvalidId(id) => AppError::BadRequest(format!("Invalid doctor id: {}", id)),
            DoctorError::Directory(e) => AppError::ExternalService(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn list_departments(
    State(state): State<Arc<AppConfig>>,
    token: ForwardedToken,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let departments = doctor_service.list_departments(token.as_deref()).await?;

    Ok(Json(json!({
        "departments": departments,
        "total": departments.len()
    })))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<DoctorListQuery>,
    token: ForwardedToken,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let department = query.department.as_deref().filter(|d| !d.trim().is_empty());
    let doctors = doctor_service.list_doctors(department, token.as_deref()).await?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    token: ForwardedToken,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service.get_doctor(&doctor_id, token.as_deref()).await?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_doctor_availability(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    token: ForwardedToken,
) -> Result<Json<DoctorAvailabilityResponse>, AppError> {
    let availability_service = AvailabilityService::new(&state);

    let response = availability_service
        .get_doctor_availability(&doctor_id, token.as_deref())
        .await?;

    Ok(Json(response))
}
