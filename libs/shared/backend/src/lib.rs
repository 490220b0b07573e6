pub mod client;

pub use client::{ApiStatusError, HospitalApiClient};
