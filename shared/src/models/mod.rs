//! Domain models for the Disaster Early Warning System

mod alert;
mod disaster;
mod observation;

pub use alert::*;
pub use disaster::*;
pub use observation::*;
