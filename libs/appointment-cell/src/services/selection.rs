use chrono::NaiveDate;
use tracing::debug;

use doctor_cell::models::{DayCode, TimeOfDay, WeeklyAvailability};

use crate::models::{BookingSelection, SelectionError, SelectionEvent, SelectionField, SelectionState};
use crate::services::slots::{is_date_selectable, is_time_bookable};

impl SelectionState {
    pub fn day_code(&self) -> Option<DayCode> {
        self.date.map(DayCode::for_date)
    }

    /// Choose a different doctor. Date and time belong to the old doctor's
    /// schedule and are always cleared.
    pub fn select_doctor(&mut self, doctor_id: Option<String>) -> Vec<SelectionField> {
        if self.doctor_id == doctor_id {
            return Vec::new();
        }

        self.doctor_id = doctor_id;
        let mut cleared = Vec::new();
        self.clear(SelectionField::Date, &mut cleared);
        self.clear(SelectionField::Time, &mut cleared);
        cleared
    }

    /// Choose a different date. Times are per weekday, so time is cleared.
    pub fn select_date(&mut self, date: Option<NaiveDate>) -> Vec<SelectionField> {
        if self.date == date {
            return Vec::new();
        }

        self.date = date;
        let mut cleared = Vec::new();
        self.clear(SelectionField::Time, &mut cleared);
        cleared
    }

    /// Choose a department. The current doctor survives only if they belong
    /// to it; otherwise doctor, date and time are cleared.
    pub fn select_department(&mut self, department_id: Option<String>, doctor_ids: &[String]) -> Vec<SelectionField> {
        self.department_id = department_id;

        let mut cleared = Vec::new();
        let doctor_in_department = self
            .doctor_id
            .as_ref()
            .map_or(true, |doctor_id| doctor_ids.contains(doctor_id));

        if !doctor_in_department {
            self.clear(SelectionField::Doctor, &mut cleared);
            self.clear(SelectionField::Date, &mut cleared);
            self.clear(SelectionField::Time, &mut cleared);
        }
        cleared
    }

    pub fn select_time(&mut self, time: Option<TimeOfDay>) -> Vec<SelectionField> {
        self.time = time;
        Vec::new()
    }

    pub fn reset(&mut self) -> Vec<SelectionField> {
        let mut cleared = Vec::new();
        self.clear(SelectionField::Department, &mut cleared);
        self.clear(SelectionField::Doctor, &mut cleared);
        self.clear(SelectionField::Date, &mut cleared);
        self.clear(SelectionField::Time, &mut cleared);
        cleared
    }

    /// Apply a form event, returning the fields that were set and got cleared.
    pub fn apply(&mut self, event: SelectionEvent) -> Vec<SelectionField> {
        let cleared = match event {
            SelectionEvent::DoctorChanged { doctor_id } => self.select_doctor(doctor_id),
            SelectionEvent::DepartmentChanged { department_id, doctor_ids: Some(doctor_ids) } => {
                self.select_department(department_id, &doctor_ids)
            }
            // Membership unknown, so there is nothing to hold the doctor against.
            SelectionEvent::DepartmentChanged { department_id, doctor_ids: None } => {
                self.department_id = department_id;
                Vec::new()
            }
            SelectionEvent::DateChanged { date } => self.select_date(date),
            SelectionEvent::TimeChanged { time } => self.select_time(time),
            SelectionEvent::Reset => self.reset(),
        };

        if !cleared.is_empty() {
            debug!("Selection change cleared {:?}", cleared);
        }
        cleared
    }

    /// Check the selection against the governing doctor's schedule before
    /// submitting. Stale dates or times are reported, never repaired.
    pub fn validate(&self, availability: &WeeklyAvailability, today: NaiveDate) -> Result<BookingSelection, SelectionError> {
        let doctor_id = self.doctor_id.clone().ok_or(SelectionError::MissingDoctor)?;
        let date = self.date.ok_or(SelectionError::MissingDate)?;

        if !is_date_selectable(availability, date, today) {
            return Err(SelectionError::DateNotSelectable(date));
        }

        let time = self.time.ok_or(SelectionError::MissingTime)?;
        if !is_time_bookable(availability, date, time) {
            return Err(SelectionError::TimeNotBookable { date, time });
        }

        Ok(BookingSelection {
            doctor_id,
            department_id: self.department_id.clone(),
            date,
            day_code: DayCode::for_date(date),
            time,
        })
    }

    fn clear(&mut self, field: SelectionField, cleared: &mut Vec<SelectionField>) {
        let was_set = match field {
            SelectionField::Department => self.department_id.take().is_some(),
            SelectionField::Doctor => self.doctor_id.take().is_some(),
            SelectionField::Date => self.date.take().is_some(),
            SelectionField::Time => self.time.take().is_some(),
        };
        if was_set {
            cleared.push(field);
        }
    }
}
