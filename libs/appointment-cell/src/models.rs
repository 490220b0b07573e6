use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctor_cell::models::{DayCode, TimeOfDay, WeeklyAvailability};

// ==============================================================================
// SELECTION STATE
// ==============================================================================

/// In-progress booking or edit, owned by the form that shows it.
///
/// The day code is always derived from `date`, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionState {
    pub department_id: Option<String>,
    pub doctor_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeOfDay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionField {
    Department,
    Doctor,
    Date,
    Time,
}

/// Input change reported by the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SelectionEvent {
    DoctorChanged {
        doctor_id: Option<String>,
    },
    DepartmentChanged {
        department_id: Option<String>,
        /// Doctors that belong to the new department. When absent, the HTTP
        /// layer looks the membership up in the directory.
        #[serde(default)]
        doctor_ids: Option<Vec<String>>,
    },
    DateChanged {
        date: Option<NaiveDate>,
    },
    TimeChanged {
        time: Option<TimeOfDay>,
    },
    Reset,
}

/// A complete, validated selection ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSelection {
    pub doctor_id: String,
    pub department_id: Option<String>,
    pub date: NaiveDate,
    pub day_code: DayCode,
    pub time: TimeOfDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No doctor selected")]
    MissingDoctor,

    #[error("No date selected")]
    MissingDate,

    #[error("No time selected")]
    MissingTime,

    #[error("Date {0} is not available for the selected doctor")]
    DateNotSelectable(NaiveDate),

    #[error("Time {time} is not bookable on {date}")]
    TimeNotBookable { date: NaiveDate, time: TimeOfDay },
}

// ==============================================================================
// REQUEST / RESPONSE DTOs
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSelectableRequest {
    pub availability: WeeklyAvailability,
    pub date: NaiveDate,
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSelectableResponse {
    pub date: NaiveDate,
    pub day_code: DayCode,
    pub selectable: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookableTimesRequest {
    pub availability: WeeklyAvailability,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookableTimesResponse {
    pub date: NaiveDate,
    pub day_code: DayCode,
    pub times: Vec<TimeOfDay>,
}

/// `time` stays a raw string: an unparseable time is just not bookable.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBookableRequest {
    pub availability: WeeklyAvailability,
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBookableResponse {
    pub date: NaiveDate,
    pub time: String,
    pub bookable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorSlotsQuery {
    pub date: NaiveDate,
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSlotsResponse {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub day_code: DayCode,
    pub selectable: bool,
    pub times: Vec<TimeOfDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTransitionRequest {
    #[serde(default)]
    pub state: SelectionState,
    pub event: SelectionEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionTransitionResponse {
    pub state: SelectionState,
    pub cleared: Vec<SelectionField>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionValidateRequest {
    pub state: SelectionState,
    pub availability: WeeklyAvailability,
    pub today: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_selection_event_wire_format() {
        let event: SelectionEvent = serde_json::from_value(json!({
            "type": "departmentChanged",
            "departmentId": "cardio",
            "doctorIds": ["doc-1", "doc-2"]
        }))
        .unwrap();

        assert_eq!(
            event,
            SelectionEvent::DepartmentChanged {
                department_id: Some("cardio".to_string()),
                doctor_ids: Some(vec!["doc-1".to_string(), "doc-2".to_string()]),
            }
        );

        let without_members: SelectionEvent = serde_json::from_value(json!({
            "type": "departmentChanged",
            "departmentId": "cardio"
        }))
        .unwrap();
        assert_matches!(
            without_members,
            SelectionEvent::DepartmentChanged { doctor_ids: None, .. }
        );

        let reset: SelectionEvent = serde_json::from_value(json!({"type": "reset"})).unwrap();
        assert_eq!(reset, SelectionEvent::Reset);
    }

    #[test]
    fn test_selection_state_defaults_missing_fields() {
        let state: SelectionState = serde_json::from_value(json!({
            "doctorId": "doc-1",
            "date": "2026-02-10"
        }))
        .unwrap();

        assert_eq!(state.doctor_id.as_deref(), Some("doc-1"));
        assert_eq!(state.date, NaiveDate::from_ymd_opt(2026, 2, 10));
        assert!(state.time.is_none());
        assert!(state.department_id.is_none());
    }

    #[test]
    fn test_selection_state_rejects_malformed_time() {
        let result = serde_json::from_value::<SelectionState>(json!({"time": "25:00"}));
        assert!(result.is_err());
    }
}
