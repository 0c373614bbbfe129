//! Business logic services for the Disaster Early Warning System

pub mod alert;
pub mod disaster;
pub mod weather;

pub use alert::AlertService;
pub use disaster::DisasterService;
pub use weather::WeatherService;
