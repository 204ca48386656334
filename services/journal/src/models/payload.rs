//! Request and response payloads of the HTTP API

use serde::{Deserialize, Serialize};

/// Body of `/api/register` and `/api/login`
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Body of `/api/savetoday`
#[derive(Debug, Deserialize)]
pub struct NewEntryRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Query string of `/api/logs`
#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub date: Option<String>,
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub response: String,
}

impl MessageResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// One element of the `/api/dates` listing
#[derive(Debug, Serialize)]
pub struct DateItem {
    pub day: String,
}

/// Response for `/api/dates`
#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub response: Vec<DateItem>,
}

/// Response for `/api/logs`; `response` carries the entry body
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub response: String,
    pub title: String,
}
