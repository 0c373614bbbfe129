//! Shared types and models for the Disaster Early Warning System
//!
//! This crate contains the domain model and the risk engine, shared between
//! the backend, the browser (via WASM), and other components of the system.

pub mod models;
pub mod risk;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
