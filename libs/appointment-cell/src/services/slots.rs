//! Appointment slot resolution.
//!
//! Pure functions over a doctor's [`WeeklyAvailability`]: which calendar
//! dates can be picked, which start times a picked date offers, and whether a
//! given time is one of them. Nothing here reads the clock or does I/O; the
//! reference date for "no past dates" is always passed in.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use doctor_cell::models::{DayCode, TimeOfDay, WeeklyAvailability};

/// Spacing of bookable start times within an availability window.
pub const SLOT_STEP_MINUTES: u32 = 15;

/// Whether `candidate_date` can be chosen in the date picker.
///
/// False when the doctor has no schedule at all, when the weekday has no
/// entries, or when the date is before `today`. A weekday whose intervals are
/// all unusable still counts as having entries, so a selectable date may
/// offer zero times.
pub fn is_date_selectable(availability: &WeeklyAvailability, candidate_date: NaiveDate, today: NaiveDate) -> bool {
    if availability.is_empty() {
        return false;
    }

    if !availability.has_entries(DayCode::for_date(candidate_date)) {
        return false;
    }

    candidate_date >= today
}

/// Bookable start times on `candidate_date`, ascending and de-duplicated.
pub fn bookable_times_for_date(availability: &WeeklyAvailability, candidate_date: NaiveDate) -> Vec<TimeOfDay> {
    let day = DayCode::for_date(candidate_date);

    let slots: BTreeSet<TimeOfDay> = availability
        .intervals_for(day)
        .iter()
        .filter_map(|interval| interval.bounds())
        .flat_map(|(start, end)| {
            (start.minutes()..end.minutes())
                .step_by(SLOT_STEP_MINUTES as usize)
                .filter_map(TimeOfDay::from_minutes)
        })
        .collect();

    slots.into_iter().collect()
}

pub fn is_time_bookable(availability: &WeeklyAvailability, candidate_date: NaiveDate, candidate_time: TimeOfDay) -> bool {
    bookable_times_for_date(availability, candidate_date)
        .binary_search(&candidate_time)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2026-02-09 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 9).unwrap()
    }

    fn day_after(date: NaiveDate, days: i64) -> NaiveDate {
        date + chrono::Duration::days(days)
    }

    fn times(values: &[&str]) -> Vec<TimeOfDay> {
        values.iter().map(|v| v.parse().unwrap()).collect()
    }

    #[test]
    fn test_single_window_on_matching_weekday() {
        let availability = WeeklyAvailability::new().with_interval(DayCode::Mon, "09:00", "09:45");

        assert!(is_date_selectable(&availability, monday(), monday()));
        assert_eq!(
            bookable_times_for_date(&availability, monday()),
            times(&["09:00", "09:15", "09:30"])
        );
    }

    #[test]
    fn test_weekday_without_schedule() {
        let availability = WeeklyAvailability::new().with_interval(DayCode::Mon, "09:00", "09:45");
        let tuesday = day_after(monday(), 1);

        assert!(!is_date_selectable(&availability, tuesday, monday()));
        assert!(bookable_times_for_date(&availability, tuesday).is_empty());
    }

    #[test]
    fn test_degenerate_window_keeps_day_selectable() {
        let availability = WeeklyAvailability::new().with_interval(DayCode::Wed, "14:00", "14:00");
        let wednesday = day_after(monday(), 2);

        assert!(is_date_selectable(&availability, wednesday, monday()));
        assert!(bookable_times_for_date(&availability, wednesday).is_empty());
    }

    #[test]
    fn test_overlapping_windows_are_merged() {
        let availability = WeeklyAvailability::new()
            .with_interval(DayCode::Fri, "09:00", "10:00")
            .with_interval(DayCode::Fri, "09:30", "09:45");
        let friday = day_after(monday(), 4);

        assert_eq!(
            bookable_times_for_date(&availability, friday),
            times(&["09:00", "09:15", "09:30", "09:45"])
        );
    }

    #[test]
    fn test_today_is_selectable_but_yesterday_is_not() {
        let availability = WeeklyAvailability::new()
            .with_interval(DayCode::Mon, "09:00", "10:00")
            .with_interval(DayCode::Sun, "09:00", "10:00");
        let sunday_before = day_after(monday(), -1);

        assert!(is_date_selectable(&availability, monday(), monday()));
        assert!(!is_date_selectable(&availability, sunday_before, monday()));
        assert!(!is_date_selectable(&availability, day_after(monday(), -7), monday()));
        assert!(is_date_selectable(&availability, day_after(monday(), 7), monday()));
    }

    #[test]
    fn test_empty_availability_disables_every_date() {
        let availability = WeeklyAvailability::new();

        for offset in 0..7 {
            assert!(!is_date_selectable(&availability, day_after(monday(), offset), monday()));
        }
    }

    #[test]
    fn test_unaligned_start_steps_from_start() {
        let availability = WeeklyAvailability::new().with_interval(DayCode::Mon, "09:10", "09:50");

        assert_eq!(
            bookable_times_for_date(&availability, monday()),
            times(&["09:10", "09:25", "09:40"])
        );
    }

    #[test]
    fn test_end_time_is_exclusive() {
        let availability = WeeklyAvailability::new().with_interval(DayCode::Mon, "09:00", "10:00");
        let slots = bookable_times_for_date(&availability, monday());

        assert_eq!(slots.last().map(ToString::to_string), Some("09:45".to_string()));
        assert!(!is_time_bookable(&availability, monday(), "10:00".parse().unwrap()));
    }

    #[test]
    fn test_malformed_window_skips_only_itself() {
        let availability = WeeklyAvailability::new()
            .with_interval(DayCode::Mon, "nine", "10:00")
            .with_interval(DayCode::Mon, "25:00", "26:00")
            .with_interval(DayCode::Mon, "13:00", "13:30");

        assert!(is_date_selectable(&availability, monday(), monday()));
        assert_eq!(
            bookable_times_for_date(&availability, monday()),
            times(&["13:00", "13:15"])
        );
    }

    #[test]
    fn test_window_running_to_end_of_day() {
        let availability = WeeklyAvailability::new().with_interval(DayCode::Mon, "23:15", "23:59");

        assert_eq!(
            bookable_times_for_date(&availability, monday()),
            times(&["23:15", "23:30", "23:45"])
        );
    }

    #[test]
    fn test_order_independent_of_insertion() {
        let forward = WeeklyAvailability::new()
            .with_interval(DayCode::Mon, "08:00", "08:30")
            .with_interval(DayCode::Mon, "14:00", "14:30");
        let reversed = WeeklyAvailability::new()
            .with_interval(DayCode::Mon, "14:00", "14:30")
            .with_interval(DayCode::Mon, "08:00", "08:30");

        let expected = times(&["08:00", "08:15", "14:00", "14:15"]);
        assert_eq!(bookable_times_for_date(&forward, monday()), expected);
        assert_eq!(bookable_times_for_date(&reversed, monday()), expected);
    }

    #[test]
    fn test_is_time_bookable_agrees_with_listing() {
        let availability = WeeklyAvailability::new()
            .with_interval(DayCode::Mon, "09:05", "10:00")
            .with_interval(DayCode::Mon, "09:30", "11:00");
        let listed = bookable_times_for_date(&availability, monday());

        for minutes in 0..24 * 60 {
            let t = TimeOfDay::from_minutes(minutes).unwrap();
            assert_eq!(
                is_time_bookable(&availability, monday(), t),
                listed.contains(&t),
                "disagreement at {}",
                t
            );
        }
    }

    #[test]
    fn test_listing_is_strictly_ascending() {
        let availability = WeeklyAvailability::new()
            .with_interval(DayCode::Thu, "16:00", "18:00")
            .with_interval(DayCode::Thu, "08:00", "12:00")
            .with_interval(DayCode::Thu, "11:00", "13:07")
            .with_interval(DayCode::Thu, "08:05", "08:40");
        let thursday = day_after(monday(), 3);
        let slots = bookable_times_for_date(&availability, thursday);

        assert!(!slots.is_empty());
        assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
