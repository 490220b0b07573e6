use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

// ==============================================================================
// AVAILABILITY DOMAIN
// ==============================================================================

/// Weekday identifier independent of any specific date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayCode {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl DayCode {
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayCode::Sun,
            Weekday::Mon => DayCode::Mon,
            Weekday::Tue => DayCode::Tue,
            Weekday::Wed => DayCode::Wed,
            Weekday::Thu => DayCode::Thu,
            Weekday::Fri => DayCode::Fri,
            Weekday::Sat => DayCode::Sat,
        }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    /// Normalize a day name as the directory sends it.
    ///
    /// Accepts the three-letter code or the full English name in any casing,
    /// with surrounding whitespace ignored (`"mon"`, `"Monday"`, `" MONDAY "`).
    pub fn parse_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        let code = match upper.as_str() {
            "SUN" | "SUNDAY" => DayCode::Sun,
            "MON" | "MONDAY" => DayCode::Mon,
            "TUE" | "TUESDAY" => DayCode::Tue,
            "WED" | "WEDNESDAY" => DayCode::Wed,
            "THU" | "THURSDAY" => DayCode::Thu,
            "FRI" | "FRIDAY" => DayCode::Fri,
            "SAT" | "SATURDAY" => DayCode::Sat,
            _ => return None,
        };
        Some(code)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayCode::Sun => "SUN",
            DayCode::Mon => "MON",
            DayCode::Tue => "TUE",
            DayCode::Wed => "WED",
            DayCode::Thu => "THU",
            DayCode::Fri => "FRI",
            DayCode::Sat => "SAT",
        }
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DayCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        DayCode::parse_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown day of week: {}", name)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time of day '{0}', expected HH:MM")]
pub struct TimeParseError(pub String);

/// Minute-precision wall-clock time, rendered as zero-padded 24-hour `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    pub fn from_minutes(minutes_since_midnight: u32) -> Option<Self> {
        Self::from_hm(minutes_since_midnight / 60, minutes_since_midnight % 60)
    }

    pub fn minutes(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Seconds are tolerated but dropped; slots have minute precision.
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .map_err(|_| TimeParseError(s.to_string()))?;

        TimeOfDay::from_hm(parsed.hour(), parsed.minute()).ok_or_else(|| TimeParseError(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One recurring window of a doctor's day, kept as the raw strings the
/// directory sent. Parsing happens when slots are generated so a bad entry
/// only knocks out itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    #[serde(default, alias = "start_time", deserialize_with = "lenient_time")]
    pub start_time: String,
    #[serde(default, alias = "end_time", deserialize_with = "lenient_time")]
    pub end_time: String,
}

/// Missing, `null` or non-string times read as empty, which leaves the
/// interval unusable instead of failing the whole availability.
fn lenient_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => Ok(raw),
        _ => Ok(String::new()),
    }
}

impl TimeInterval {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Parsed `(start, end)` when the interval is usable: both ends parse and
    /// `end` is strictly after `start`.
    pub fn bounds(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        let start: TimeOfDay = self.start_time.parse().ok()?;
        let end: TimeOfDay = self.end_time.parse().ok()?;
        (end > start).then_some((start, end))
    }

    pub fn is_usable(&self) -> bool {
        self.bounds().is_some()
    }
}

/// A doctor's recurring weekly schedule, keyed by day code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability {
    days: BTreeMap<DayCode, Vec<TimeInterval>>,
}

impl WeeklyAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, day: DayCode, interval: TimeInterval) {
        self.days.entry(day).or_default().push(interval);
    }

    pub fn with_interval(mut self, day: DayCode, start_time: &str, end_time: &str) -> Self {
        self.push(day, TimeInterval::new(start_time, end_time));
        self
    }

    /// True when no day carries any interval.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    /// Whether the day has entries at all. Degenerate intervals still count.
    pub fn has_entries(&self, day: DayCode) -> bool {
        self.days.get(&day).is_some_and(|intervals| !intervals.is_empty())
    }

    pub fn intervals_for(&self, day: DayCode) -> &[TimeInterval] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn days(&self) -> impl Iterator<Item = DayCode> + '_ {
        self.days
            .iter()
            .filter(|(_, intervals)| !intervals.is_empty())
            .map(|(day, _)| *day)
    }
}

impl FromIterator<(DayCode, TimeInterval)> for WeeklyAvailability {
    fn from_iter<I: IntoIterator<Item = (DayCode, TimeInterval)>>(iter: I) -> Self {
        let mut availability = WeeklyAvailability::new();
        for (day, interval) in iter {
            availability.push(day, interval);
        }
        availability
    }
}

// ==============================================================================
// DIRECTORY RECORDS
// ==============================================================================

/// Schedule row as the hospital API returns it. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    #[serde(default, alias = "dayOfWeek", alias = "day_of_week")]
    pub day: Option<String>,
    #[serde(default, alias = "start_time")]
    pub start_time: Option<String>,
    #[serde(default, alias = "end_time")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DepartmentRefRecord")]
pub struct DepartmentRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DepartmentRecord")]
pub struct Department {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DoctorRecord")]
pub struct Doctor {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub specialization: Option<String>,
    pub department_id: Option<String>,
    pub department: Option<DepartmentRef>,
    pub schedule: Option<Vec<ScheduleEntry>>,
}

// Wire shapes of the records above. Directories may send `id`, Mongo-style
// `_id`, or both; `id` wins when both are present.

fn record_id(id: Option<String>, object_id: Option<String>, kind: &str) -> Result<String, String> {
    id.or(object_id)
        .ok_or_else(|| format!("{} record has neither `id` nor `_id`", kind))
}

#[derive(Deserialize)]
struct DepartmentRefRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<DepartmentRefRecord> for DepartmentRef {
    type Error = String;

    fn try_from(record: DepartmentRefRecord) -> Result<Self, Self::Error> {
        Ok(DepartmentRef {
            id: record_id(record.id, record.object_id, "department")?,
            name: record.name,
        })
    }
}

#[derive(Deserialize)]
struct DepartmentRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<DepartmentRecord> for Department {
    type Error = String;

    fn try_from(record: DepartmentRecord) -> Result<Self, Self::Error> {
        Ok(Department {
            id: record_id(record.id, record.object_id, "department")?,
            name: record.name,
            description: record.description,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DoctorRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    specialization: Option<String>,
    #[serde(default, alias = "department_id")]
    department_id: Option<String>,
    #[serde(default)]
    department: Option<DepartmentRef>,
    #[serde(default)]
    schedule: Option<Vec<ScheduleEntry>>,
}

impl TryFrom<DoctorRecord> for Doctor {
    type Error = String;

    fn try_from(record: DoctorRecord) -> Result<Self, Self::Error> {
        Ok(Doctor {
            id: record_id(record.id, record.object_id, "doctor")?,
            name: record.name,
            email: record.email,
            specialization: record.specialization,
            department_id: record.department_id,
            department: record.department,
            schedule: record.schedule,
        })
    }
}

impl Doctor {
    /// Department id from either the flat field or the nested record.
    pub fn department_id(&self) -> Option<&str> {
        self.department_id
            .as_deref()
            .or_else(|| self.department.as_ref().map(|d| d.id.as_str()))
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown doctor")
    }

    pub fn schedule_entries(&self) -> &[ScheduleEntry] {
        self.schedule.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorAvailabilityResponse {
    pub doctor_id: String,
    pub doctor_name: String,
    pub availability: WeeklyAvailability,
}

// Error types specific to doctor operations
#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Invalid doctor id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    Directory(#[from] anyhow::Error),
}
