use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::extractor::ForwardedToken;

use doctor_cell::models::{DayCode, TimeOfDay};
use doctor_cell::services::{AvailabilityService, DoctorService};

use crate::models::{
    BookableTimesRequest, BookableTimesResponse, BookingSelection, DateSelectableRequest,
    DateSelectableResponse, DoctorSlotsQuery, DoctorSlotsResponse, SelectionError,
    SelectionEvent, SelectionTransitionRequest, SelectionTransitionResponse, SelectionValidateRequest,
    TimeBookableRequest, TimeBookableResponse,
};
use crate::services::slots::{bookable_times_for_date, is_date_selectable, is_time_bookable};

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// The request's reference date, or the server's current UTC date.
fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Utc::now().date_naive())
}

// ==============================================================================
// SLOT RESOLUTION
// ==============================================================================

#[axum::debug_handler]
pub async fn check_date_selectable(
    Json(request): Json<DateSelectableRequest>,
) -> Json<DateSelectableResponse> {
    let today = today_or_now(request.today);
    let selectable = is_date_selectable(&request.availability, request.date, today);

    Json(DateSelectableResponse {
        date: request.date,
        day_code: DayCode::for_date(request.date),
        selectable,
    })
}

#[axum::debug_handler]
pub async fn list_bookable_times(
    Json(request): Json<BookableTimesRequest>,
) -> Json<BookableTimesResponse> {
    let times = bookable_times_for_date(&request.availability, request.date);

    Json(BookableTimesResponse {
        date: request.date,
        day_code: DayCode::for_date(request.date),
        times,
    })
}

#[axum::debug_handler]
pub async fn check_time_bookable(
    Json(request): Json<TimeBookableRequest>,
) -> Json<TimeBookableResponse> {
    let bookable = request
        .time
        .parse::<TimeOfDay>()
        .map(|time| is_time_bookable(&request.availability, request.date, time))
        .unwrap_or(false);

    Json(TimeBookableResponse {
        date: request.date,
        time: request.time,
        bookable,
    })
}

#[axum::debug_handler]
pub async fn get_doctor_slots(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    Query(query): Query<DoctorSlotsQuery>,
    token: ForwardedToken,
) -> Result<Json<DoctorSlotsResponse>, AppError> {
    let availability_service = AvailabilityService::new(&state);

    let availability = availability_service
        .get_weekly_availability(&doctor_id, token.as_deref())
        .await?;

    let today = today_or_now(query.today);
    let selectable = is_date_selectable(&availability, query.date, today);
    let times = bookable_times_for_date(&availability, query.date);

    debug!(
        "Doctor {} on {}: selectable={}, {} bookable time(s)",
        doctor_id,
        query.date,
        selectable,
        times.len()
    );

    Ok(Json(DoctorSlotsResponse {
        doctor_id,
        date: query.date,
        day_code: DayCode::for_date(query.date),
        selectable,
        times,
    }))
}

// ==============================================================================
// SELECTION STATE
// ==============================================================================

#[axum::debug_handler]
pub async fn apply_selection_event(
    State(state): State<Arc<AppConfig>>,
    token: ForwardedToken,
    Json(request): Json<SelectionTransitionRequest>,
) -> Result<Json<SelectionTransitionResponse>, AppError> {
    let mut selection = request.state;
    let mut event = request.event;

    // The form did not say who works in the new department; ask the directory.
    if let SelectionEvent::DepartmentChanged { department_id: Some(department_id), doctor_ids } = &mut event {
        if doctor_ids.is_none() && selection.doctor_id.is_some() {
            let doctor_service = DoctorService::new(&state);
            let members = doctor_service
                .doctor_ids_in_department(department_id, token.as_deref())
                .await?;
            debug!("Department {} has {} doctor(s)", department_id, members.len());
            *doctor_ids = Some(members);
        }
    }

    let cleared = selection.apply(event);

    Ok(Json(SelectionTransitionResponse { state: selection, cleared }))
}

#[axum::debug_handler]
pub async fn validate_selection(
    Json(request): Json<SelectionValidateRequest>,
) -> Result<Json<BookingSelection>, AppError> {
    let today = today_or_now(request.today);
    let booking = request.state.validate(&request.availability, today)?;

    Ok(Json(booking))
}
