use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::models::{DayCode, Doctor, DoctorAvailabilityResponse, DoctorError, ScheduleEntry, TimeInterval, WeeklyAvailability};
use crate::services::doctor::DoctorService;

/// Convert directory schedule rows into a [`WeeklyAvailability`].
///
/// Rows without a recognizable day are dropped. Rows with a day but missing
/// times are kept as malformed intervals: the day still has entries, it just
/// yields no bookable times.
pub fn normalize_schedule(entries: &[ScheduleEntry]) -> WeeklyAvailability {
    let mut availability = WeeklyAvailability::new();

    for entry in entries {
        let Some(raw_day) = entry.day.as_deref() else {
            warn!("Dropping schedule entry without a day: {:?}", entry);
            continue;
        };

        let Some(day) = DayCode::parse_name(raw_day) else {
            warn!("Dropping schedule entry with unknown day '{}'", raw_day);
            continue;
        };

        let interval = TimeInterval::new(
            entry.start_time.clone().unwrap_or_default(),
            entry.end_time.clone().unwrap_or_default(),
        );

        if !interval.is_usable() {
            debug!(
                "Schedule entry on {} has no usable window ({} - {})",
                day, interval.start_time, interval.end_time
            );
        }

        availability.push(day, interval);
    }

    availability
}

impl Doctor {
    pub fn weekly_availability(&self) -> WeeklyAvailability {
        normalize_schedule(self.schedule_entries())
    }
}

pub struct AvailabilityService {
    doctors: DoctorService,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            doctors: DoctorService::new(config),
        }
    }

    /// Fetch a doctor and normalize their recurring schedule.
    pub async fn get_weekly_availability(
        &self,
        doctor_id: &str,
        auth_token: Option<&str>,
    ) -> Result<WeeklyAvailability, DoctorError> {
        debug!("Fetching weekly availability for doctor: {}", doctor_id);

        let doctor = self.doctors.get_doctor(doctor_id, auth_token).await?;
        Ok(doctor.weekly_availability())
    }

    pub async fn get_doctor_availability(
        &self,
        doctor_id: &str,
        auth_token: Option<&str>,
    ) -> Result<DoctorAvailabilityResponse, DoctorError> {
        let doctor = self.doctors.get_doctor(doctor_id, auth_token).await?;
        let availability = doctor.weekly_availability();

        debug!(
            "Doctor {} is scheduled on {} day(s)",
            doctor.id,
            availability.days().count()
        );

        Ok(DoctorAvailabilityResponse {
            doctor_id: doctor.id.clone(),
            doctor_name: doctor.display_name().to_string(),
            availability,
        })
    }
}
