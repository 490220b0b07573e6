use tracing::{debug, warn};

use shared_backend::{ApiStatusError, HospitalApiClient};
use shared_config::AppConfig;

use crate::models::{Department, Doctor, DoctorError};

pub struct DoctorService {
    client: HospitalApiClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: HospitalApiClient::new(config),
        }
    }

    /// Get a single doctor by id
    pub async fn get_doctor(&self, doctor_id: &str, auth_token: Option<&str>) -> Result<Doctor, DoctorError> {
        let doctor_id = doctor_id.trim();
        if doctor_id.is_empty() || doctor_id.contains(['/', '?', '#']) {
            return Err(DoctorError::InvalidId(doctor_id.to_string()));
        }

        debug!("Fetching doctor: {}", doctor_id);

        let path = format!("/doctors/{}", urlencoding::encode(doctor_id));
        match self.client.get::<Doctor>(&path, auth_token).await {
            Ok(doctor) => Ok(doctor),
            Err(e) if e.downcast_ref::<ApiStatusError>().is_some_and(ApiStatusError::is_not_found) => {
                Err(DoctorError::NotFound(doctor_id.to_string()))
            }
            Err(e) => Err(DoctorError::Directory(e)),
        }
    }

    /// List doctors, optionally restricted to one department
    pub async fn list_doctors(
        &self,
        department_id: Option<&str>,
        auth_token: Option<&str>,
    ) -> Result<Vec<Doctor>, DoctorError> {
        let path = match department_id {
            Some(id) => format!("/doctors?department={}", urlencoding::encode(id)),
            None => "/doctors".to_string(),
        };

        let doctors: Vec<Doctor> = self.client.get(&path, auth_token).await?;

        // Some directory deployments ignore the filter; enforce it here.
        let doctors = match department_id {
            Some(id) => {
                let total = doctors.len();
                let filtered: Vec<Doctor> = doctors
                    .into_iter()
                    .filter(|doctor| doctor.department_id() == Some(id))
                    .collect();
                if filtered.len() != total {
                    warn!(
                        "Directory returned {} doctor(s) outside department {}",
                        total - filtered.len(),
                        id
                    );
                }
                filtered
            }
            None => doctors,
        };

        debug!("Found {} doctors", doctors.len());
        Ok(doctors)
    }

    /// Ids of the doctors that belong to a department
    pub async fn doctor_ids_in_department(
        &self,
        department_id: &str,
        auth_token: Option<&str>,
    ) -> Result<Vec<String>, DoctorError> {
        let doctors = self.list_doctors(Some(department_id), auth_token).await?;
        Ok(doctors.into_iter().map(|doctor| doctor.id).collect())
    }

    pub async fn list_departments(&self, auth_token: Option<&str>) -> Result<Vec<Department>, DoctorError> {
        let departments: Vec<Department> = self.client.get("/departments", auth_token).await?;
        debug!("Found {} departments", departments.len());
        Ok(departments)
    }
}
