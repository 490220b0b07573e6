// libs/doctor-cell/tests/integration_test.rs

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::{Mock, MockServer, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use doctor_cell::models::{DayCode, DoctorError, TimeInterval};
use doctor_cell::services::{AvailabilityService, DoctorService};
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

#[tokio::test]
async fn test_weekly_availability_from_directory() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_app_config();

    Mock::given(method("GET"))
        .and(path("/doctors/doc-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "doc-7",
            "name": "Dr. Mensah",
            "departmentId": "peds",
            "schedule": [
                {"day": "TUE", "start_time": "08:00:00", "end_time": "11:30:00"},
                {"day": "tuesday", "startTime": "13:00", "endTime": "15:00"},
                {"startTime": "09:00", "endTime": "10:00"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let service = AvailabilityService::new(&config);
    let availability = service.get_weekly_availability("doc-7", None).await.unwrap();

    assert_eq!(availability.days().collect::<Vec<_>>(), vec![DayCode::Tue]);
    assert_eq!(
        availability.intervals_for(DayCode::Tue),
        &[
            TimeInterval::new("08:00:00", "11:30:00"),
            TimeInterval::new("13:00", "15:00"),
        ]
    );
}

#[tokio::test]
async fn test_doctor_ids_in_department() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_app_config();

    Mock::given(method("GET"))
        .and(path("/doctors"))
        .and(query_param("department", "cardio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockBackendResponses::doctor_response("doc-1", "cardio", &[]),
            MockBackendResponses::doctor_response("doc-3", "cardio", &[]),
        ])))
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&config);
    let ids = service.doctor_ids_in_department("cardio", None).await.unwrap();

    assert_eq!(ids, vec!["doc-1".to_string(), "doc-3".to_string()]);
}

#[tokio::test]
async fn test_missing_doctor_maps_to_not_found() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_app_config();

    Mock::given(method("GET"))
        .and(path("/doctors/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let service = AvailabilityService::new(&config);
    let result = service.get_weekly_availability("ghost", None).await;

    assert_matches!(result, Err(DoctorError::NotFound(id)) if id == "ghost");
}

#[tokio::test]
async fn test_malformed_directory_payload_is_directory_error() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_url(&mock_server.uri()).to_app_config();

    Mock::given(method("GET"))
        .and(path("/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&mock_server)
        .await;

    let service = DoctorService::new(&config);
    let result = service.list_departments(None).await;

    assert_matches!(result, Err(DoctorError::Directory(_)));
}
