pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

pub use models::{
    BookingSelection, SelectionError, SelectionEvent, SelectionField, SelectionState,
};
pub use services::slots::{bookable_times_for_date, is_date_selectable, is_time_bookable};

pub use router::appointment_routes;
