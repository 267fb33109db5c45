//! HTTP Routes

pub mod cars;
pub mod history;
pub mod home;
pub mod trips;

use data_validator::Validator;
use serde::{Deserialize, Serialize};
use storage::Page;

use crate::error::ApiError;

/// `{ "message": ..., "data": ... }` response body
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Zero-based paging parameters
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

pub(crate) fn default_size() -> u32 {
    20
}

impl PageQuery {
    pub fn to_page(&self, validator: &Validator) -> Result<Page, ApiError> {
        validator.validate_page_size(self.size)?;
        Ok(Page::new(self.page, self.size))
    }
}

/// "6 Cylinder"
pub(crate) fn cylinder_label(cylinders: i64) -> String {
    format!("{} Cylinder", cylinders)
}

/// "320 hp"
pub(crate) fn power_label(horsepower: f64) -> String {
    format!("{} hp", horsepower.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(cylinder_label(6), "6 Cylinder");
        assert_eq!(power_label(320.0), "320 hp");
        assert_eq!(power_label(104.6), "105 hp");
    }

    #[test]
    fn test_page_query_limits() {
        let validator = Validator::default();
        let ok = PageQuery { page: 2, size: 20 }.to_page(&validator).unwrap();
        assert_eq!(ok.offset(), 40);
        assert!(PageQuery { page: 0, size: 0 }.to_page(&validator).is_err());
        assert!(PageQuery { page: 0, size: 500 }.to_page(&validator).is_err());
    }
}
