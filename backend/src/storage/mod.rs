//! Alert persistence

pub mod alerts;

pub use alerts::{AlertRepository, InMemoryAlertRepository, JsonFileAlertRepository};
