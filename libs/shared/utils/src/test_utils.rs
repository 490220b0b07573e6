use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub hospital_api_url: String,
    pub hospital_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            hospital_api_url: "http://localhost:8080".to_string(),
            hospital_api_key: "test-api-key".to_string(),
        }
    }
}

impl TestConfig {
    /// Config pointing at a mock server.
    pub fn with_url(url: &str) -> Self {
        Self {
            hospital_api_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            hospital_api_url: self.hospital_api_url.clone(),
            hospital_api_key: self.hospital_api_key.clone(),
            port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    /// Doctor record with a schedule given as `(day, start, end)` rows.
    pub fn doctor_response(id: &str, department_id: &str, schedule: &[(&str, &str, &str)]) -> Value {
        let schedule: Vec<Value> = schedule
            .iter()
            .map(|(day, start, end)| json!({
                "day": day,
                "startTime": start,
                "endTime": end
            }))
            .collect();

        json!({
            "_id": id,
            "name": "Dr. Test",
            "email": "doctor@example.com",
            "specialization": "General Medicine",
            "department": {
                "_id": department_id,
                "name": "General"
            },
            "schedule": schedule
        })
    }

    pub fn department_response(id: &str, name: &str) -> Value {
        json!({
            "_id": id,
            "name": name,
            "description": null
        })
    }

    pub fn error_response(message: &str) -> Value {
        json!({
            "message": message
        })
    }
}
