// src/models/mod.rs

//! Domain models for the crawler application.

mod house;
mod record;
mod site;

pub use house::House;
pub use record::{BookingRecord, STATUS_BOOKED};
pub use site::SiteVariant;
