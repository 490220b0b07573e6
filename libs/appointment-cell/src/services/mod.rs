pub mod slots;
pub mod selection;

pub use slots::{bookable_times_for_date, is_date_selectable, is_time_bookable, SLOT_STEP_MINUTES};
