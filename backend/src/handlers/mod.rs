//! HTTP handlers for the Disaster Early Warning System API
//!
//! Successful responses carry `success: true` next to their payload;
//! failures are rendered by [`crate::error::AppError`].

pub mod alert;
pub mod disaster;
pub mod health;
pub mod weather;

use serde::Serialize;

use crate::error::AppError;

pub use alert::*;
pub use disaster::*;
pub use health::*;
pub use weather::*;

/// `{success, data}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{success, data, count}`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{success, message}` with an optional `data`
#[derive(Debug, Serialize)]
pub struct MessageResponse<T> {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> MessageResponse<T> {
    pub fn with_data(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data: Some(data),
        }
    }
}

impl MessageResponse<()> {
    pub fn message(message: &'static str) -> Self {
        Self {
            success: true,
            message,
            data: None,
        }
    }
}

/// Fallback for unmatched paths
pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route".to_string())
}
