// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        // Slot resolution over an availability supplied by the caller
        .route("/slots/selectable", post(handlers::check_date_selectable))
        .route("/slots/times", post(handlers::list_bookable_times))
        .route("/slots/validate", post(handlers::check_time_bookable))

        // Slot resolution for a doctor fetched from the directory
        .route("/doctors/{doctor_id}/slots", get(handlers::get_doctor_slots))

        // Booking form state transitions
        .route("/selection/transition", post(handlers::apply_selection_event))
        .route("/selection/validate", post(handlers::validate_selection))
        .with_state(state)
}
